//! GPU device initialization and surface management.
//!
//! Provides [`RenderContext`] which owns all wgpu GPU state, and [`RenderContextError`]
//! for clear diagnostics when initialization fails.

use std::sync::Arc;
use winit::window::Window;

/// Error type for render context initialization failures.
#[derive(Debug, thiserror::Error)]
pub enum RenderContextError {
    /// No compatible GPU adapter found.
    #[error("no compatible GPU adapter found")]
    NoAdapter,

    /// Failed to request GPU device.
    #[error("failed to request GPU device: {0}")]
    DeviceRequest(#[from] wgpu::RequestDeviceError),

    /// Failed to create surface.
    #[error("failed to create surface: {0}")]
    SurfaceCreation(#[from] wgpu::CreateSurfaceError),
}

/// Error type for surface acquisition failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SurfaceError {
    /// Surface was lost and could not be recovered.
    #[error("surface lost")]
    Lost,

    /// GPU ran out of memory.
    #[error("out of memory")]
    OutOfMemory,

    /// Operation timed out (recoverable - skip frame).
    #[error("timeout")]
    Timeout,
}

impl SurfaceError {
    /// Whether the frame can simply be skipped.
    pub fn is_recoverable(self) -> bool {
        matches!(self, SurfaceError::Timeout)
    }
}

/// Owns all GPU state: instance, adapter, device, queue, and surface.
pub struct RenderContext {
    pub instance: wgpu::Instance,
    pub adapter: wgpu::Adapter,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub surface: wgpu::Surface<'static>,
    pub surface_config: wgpu::SurfaceConfiguration,
    pub surface_format: wgpu::TextureFormat,
}

impl RenderContext {
    /// Initialize the GPU asynchronously from a window handle.
    pub async fn new(window: Arc<Window>) -> Result<Self, RenderContextError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        // Read before the window moves into the surface
        let size = window.inner_size();
        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|_| RenderContextError::NoAdapter)?;

        let info = adapter.get_info();
        log::info!(
            "Selected GPU: {} ({:?}, {:?})",
            info.name,
            info.backend,
            info.device_type
        );

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("vista-device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: wgpu::MemoryHints::default(),
                experimental_features: wgpu::ExperimentalFeatures::default(),
                trace: wgpu::Trace::Off,
            })
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = select_preferred_srgb_format(&surface_caps.formats)
            .ok_or(RenderContextError::NoAdapter)?;

        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: select_present_mode(&surface_caps.present_modes),
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &surface_config);

        Ok(Self {
            instance,
            adapter,
            device,
            queue,
            surface,
            surface_config,
            surface_format,
        })
    }

    /// Reconfigure the surface after a window resize.
    ///
    /// Zero-sized requests (minimized windows) are ignored so the surface
    /// keeps its last valid size.
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        if width == 0 || height == 0 {
            return false;
        }
        self.surface_config.width = width;
        self.surface_config.height = height;
        self.surface.configure(&self.device, &self.surface_config);
        true
    }

    /// Current surface size in pixels.
    pub fn surface_size(&self) -> (u32, u32) {
        (self.surface_config.width, self.surface_config.height)
    }

    /// Get the current surface texture, reconfiguring once on lost or outdated surfaces.
    pub fn get_current_texture(&self) -> Result<wgpu::SurfaceTexture, SurfaceError> {
        match self.surface.get_current_texture() {
            Ok(texture) => Ok(texture),
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("Surface lost or outdated, reconfiguring");
                self.surface.configure(&self.device, &self.surface_config);
                self.surface
                    .get_current_texture()
                    .map_err(|_| SurfaceError::Lost)
            }
            Err(wgpu::SurfaceError::OutOfMemory) => Err(SurfaceError::OutOfMemory),
            Err(wgpu::SurfaceError::Timeout) => Err(SurfaceError::Timeout),
            Err(wgpu::SurfaceError::Other) => {
                log::error!("Unknown surface error occurred");
                Err(SurfaceError::Lost)
            }
        }
    }
}

/// Initialize the GPU synchronously using `pollster`.
pub fn init_render_context_blocking(
    window: Arc<Window>,
) -> Result<RenderContext, RenderContextError> {
    pollster::block_on(RenderContext::new(window))
}

/// Prefer Bgra8UnormSrgb, then Rgba8UnormSrgb, then any sRGB format, then anything.
fn select_preferred_srgb_format(formats: &[wgpu::TextureFormat]) -> Option<wgpu::TextureFormat> {
    [
        wgpu::TextureFormat::Bgra8UnormSrgb,
        wgpu::TextureFormat::Rgba8UnormSrgb,
    ]
    .into_iter()
    .find(|f| formats.contains(f))
    .or_else(|| formats.iter().copied().find(|f| f.is_srgb()))
    .or_else(|| formats.first().copied())
}

/// Vsync when available.
fn select_present_mode(modes: &[wgpu::PresentMode]) -> wgpu::PresentMode {
    if modes.contains(&wgpu::PresentMode::Fifo) || modes.is_empty() {
        wgpu::PresentMode::Fifo
    } else {
        modes[0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_selection_prefers_bgra_srgb() {
        let formats = [
            wgpu::TextureFormat::Rgba8Unorm,
            wgpu::TextureFormat::Bgra8UnormSrgb,
            wgpu::TextureFormat::Rgba8UnormSrgb,
        ];
        assert_eq!(
            select_preferred_srgb_format(&formats),
            Some(wgpu::TextureFormat::Bgra8UnormSrgb)
        );
    }

    #[test]
    fn test_format_selection_fallback_rgba_srgb() {
        let formats = [
            wgpu::TextureFormat::Rgba8Unorm,
            wgpu::TextureFormat::Rgba8UnormSrgb,
        ];
        assert_eq!(
            select_preferred_srgb_format(&formats),
            Some(wgpu::TextureFormat::Rgba8UnormSrgb)
        );
    }

    #[test]
    fn test_format_selection_fallback_first() {
        let formats = [
            wgpu::TextureFormat::Bgra8Unorm,
            wgpu::TextureFormat::Rgba8Unorm,
        ];
        assert_eq!(
            select_preferred_srgb_format(&formats),
            Some(wgpu::TextureFormat::Bgra8Unorm)
        );
    }

    #[test]
    fn test_format_selection_empty() {
        assert_eq!(select_preferred_srgb_format(&[]), None);
    }

    #[test]
    fn test_present_mode_prefers_fifo() {
        let modes = [wgpu::PresentMode::Mailbox, wgpu::PresentMode::Fifo];
        assert_eq!(select_present_mode(&modes), wgpu::PresentMode::Fifo);
        assert_eq!(
            select_present_mode(&[wgpu::PresentMode::Immediate]),
            wgpu::PresentMode::Immediate
        );
    }

    #[test]
    fn test_only_timeout_is_recoverable() {
        assert!(SurfaceError::Timeout.is_recoverable());
        assert!(!SurfaceError::Lost.is_recoverable());
        assert!(!SurfaceError::OutOfMemory.is_recoverable());
    }
}
