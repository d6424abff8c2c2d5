//! Window-sized depth buffer with reverse-Z.
//!
//! Near plane maps to 1.0 and far plane to 0.0. The sky is drawn exactly at
//! 0.0, so the cleared value doubles as "nothing drawn here yet".

/// Depth attachment for the color pass. Reallocated on resize.
pub struct DepthBuffer {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    width: u32,
    height: u32,
}

impl DepthBuffer {
    /// 32-bit float depth format for maximum precision with reverse-Z.
    pub const FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

    /// Reverse-Z clear value: 0.0 represents the far plane.
    pub const CLEAR_VALUE: f32 = 0.0;

    /// Reverse-Z depth comparison: closer objects have higher depth values.
    pub const COMPARE_FUNCTION: wgpu::CompareFunction = wgpu::CompareFunction::GreaterEqual;

    pub fn new(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("depth-buffer"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: Self::FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        Self {
            texture,
            view,
            width,
            height,
        }
    }

    /// Reallocate for new dimensions. No-op if unchanged.
    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        if self.width == width.max(1) && self.height == height.max(1) {
            return;
        }
        log::debug!("Depth buffer resized to {width}x{height}");
        *self = Self::new(device, width, height);
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::tests::create_test_device;

    #[test]
    fn test_depth_texture_format_is_depth32float() {
        assert_eq!(DepthBuffer::FORMAT, wgpu::TextureFormat::Depth32Float);
    }

    #[test]
    fn test_reverse_z_constants() {
        assert_eq!(DepthBuffer::CLEAR_VALUE, 0.0);
        assert_eq!(
            DepthBuffer::COMPARE_FUNCTION,
            wgpu::CompareFunction::GreaterEqual
        );
    }

    #[test]
    fn test_resize_updates_dimensions() {
        let Some((device, _queue)) = create_test_device() else {
            return;
        };
        let mut depth = DepthBuffer::new(&device, 800, 600);
        assert_eq!((depth.width(), depth.height()), (800, 600));

        depth.resize(&device, 1024, 768);
        assert_eq!((depth.width(), depth.height()), (1024, 768));
    }

    #[test]
    fn test_zero_size_is_clamped() {
        let Some((device, _queue)) = create_test_device() else {
            return;
        };
        let depth = DepthBuffer::new(&device, 0, 0);
        assert_eq!((depth.width(), depth.height()), (1, 1));
        assert!(
            depth
                .texture
                .usage()
                .contains(wgpu::TextureUsages::RENDER_ATTACHMENT)
        );
    }
}
