//! Render pass abstraction for reducing wgpu boilerplate.
//!
//! Provides [`RenderPassBuilder`] for declarative render pass configuration
//! and [`FrameEncoder`] for managing per-frame command encoding lifecycle.

/// Clear color behind the sky; only visible if the sky fails to draw.
pub const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.08,
    g: 0.08,
    b: 0.10,
    a: 1.0,
};

/// Configuration for depth stencil attachment.
#[derive(Debug)]
pub struct DepthAttachmentConfig {
    pub view: wgpu::TextureView,
    pub clear_value: f32,
}

/// Builder for configuring render pass descriptors with a fluent API.
///
/// A builder without a color attachment produces a depth-only pass.
#[derive(Debug)]
pub struct RenderPassBuilder {
    clear_color: Option<wgpu::Color>,
    depth_attachment: Option<DepthAttachmentConfig>,
    label: Option<&'static str>,
}

impl Default for RenderPassBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderPassBuilder {
    /// Color pass cleared to [`CLEAR_COLOR`].
    pub fn new() -> Self {
        Self {
            clear_color: Some(CLEAR_COLOR),
            depth_attachment: None,
            label: None,
        }
    }

    /// Depth-only pass: no color attachment is bound.
    pub fn depth_only() -> Self {
        Self {
            clear_color: None,
            ..Self::new()
        }
    }

    /// Set the clear color for the color attachment.
    pub fn clear_color(mut self, color: wgpu::Color) -> Self {
        self.clear_color = Some(color);
        self
    }

    /// Set up depth attachment, cleared to `clear_value` and stored.
    pub fn depth(mut self, view: wgpu::TextureView, clear_value: f32) -> Self {
        self.depth_attachment = Some(DepthAttachmentConfig { view, clear_value });
        self
    }

    /// Set debug label for the render pass.
    pub fn label(mut self, label: &'static str) -> Self {
        self.label = Some(label);
        self
    }

    /// Whether the pass writes a color target.
    pub fn has_color(&self) -> bool {
        self.clear_color.is_some()
    }

    /// Begin the pass. `color_view` is ignored for depth-only passes.
    pub fn begin<'encoder>(
        &self,
        encoder: &'encoder mut wgpu::CommandEncoder,
        color_view: &wgpu::TextureView,
    ) -> wgpu::RenderPass<'encoder> {
        let color_attachment = self
            .clear_color
            .map(|clear| wgpu::RenderPassColorAttachment {
                view: color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(clear),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            });

        let depth_stencil_attachment =
            self.depth_attachment
                .as_ref()
                .map(|depth| wgpu::RenderPassDepthStencilAttachment {
                    view: &depth.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(depth.clear_value),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                });

        let color_attachments: &[Option<wgpu::RenderPassColorAttachment<'_>>] =
            match &color_attachment {
                Some(_) => std::slice::from_ref(&color_attachment),
                None => &[],
            };

        encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: self.label,
            color_attachments,
            depth_stencil_attachment,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        })
    }
}

/// Manages per-frame command encoding lifecycle with automatic submission.
pub struct FrameEncoder {
    encoder: Option<wgpu::CommandEncoder>,
    queue: wgpu::Queue,
    surface_texture: Option<wgpu::SurfaceTexture>,
    surface_view: wgpu::TextureView,
}

impl FrameEncoder {
    /// Create a new frame encoder for the given device, queue, and surface texture.
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        surface_texture: wgpu::SurfaceTexture,
    ) -> Self {
        let encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("frame-encoder"),
        });

        let surface_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        Self {
            encoder: Some(encoder),
            queue: queue.clone(),
            surface_texture: Some(surface_texture),
            surface_view,
        }
    }

    /// The encoder and the surface view it should render into.
    ///
    /// `None` once the frame was submitted.
    pub fn parts(&mut self) -> Option<(&mut wgpu::CommandEncoder, &wgpu::TextureView)> {
        let encoder = self.encoder.as_mut()?;
        Some((encoder, &self.surface_view))
    }

    /// Submit the command buffer to the queue and present the surface texture.
    /// Consumes self to prevent double-submission.
    pub fn submit(mut self) {
        self.finish();
    }

    fn finish(&mut self) {
        if let (Some(encoder), Some(surface_texture)) =
            (self.encoder.take(), self.surface_texture.take())
        {
            self.queue.submit([encoder.finish()]);
            surface_texture.present();
        }
    }
}

impl Drop for FrameEncoder {
    fn drop(&mut self) {
        if self.encoder.is_some() {
            log::warn!("FrameEncoder dropped without explicit submit() - auto-submitting");
            self.finish();
        }
    }
}
