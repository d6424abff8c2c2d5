//! Shadow map for the directional light.
//!
//! A single depth texture rendered from the light's point of view through an
//! orthographic volume. The lit pass samples it with a comparison sampler.
//! Depth follows the reverse-Z convention of the rest of the renderer: the
//! plane nearest the light stores 1.0 and the far plane 0.0.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

use crate::DirectionalLightUniform;

/// Shadow map parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct ShadowConfig {
    /// Shadow map resolution (width = height). Default: 2048.
    pub resolution: u32,
    /// Half-size of the orthographic volume on both light-space axes.
    pub extent: f32,
    /// Near plane distance from the light position.
    pub near: f32,
    /// Far plane distance from the light position.
    pub far: f32,
    /// Depth offset added to the receiver before comparison.
    pub bias: f32,
}

impl Default for ShadowConfig {
    fn default() -> Self {
        Self {
            resolution: 2048,
            extent: 10.0,
            near: 0.5,
            far: 50.0,
            bias: 0.002,
        }
    }
}

/// Light transform used by the depth pass. 64 bytes.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct LightMatrixUniform {
    /// Light-space view-projection, column-major.
    pub view_proj: [[f32; 4]; 4],
}

/// Everything the lit pass needs to shade and shadow a fragment.
///
/// Total size: 64 + 32 + 16 = 112 bytes.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct ShadowUniform {
    /// Light-space view-projection, column-major.
    pub light_view_proj: [[f32; 4]; 4],
    /// Direction, intensity and color of the light.
    pub light: DirectionalLightUniform,
    /// x = depth bias, y = texel size (1 / resolution), zw = padding.
    pub params: [f32; 4],
}

/// Shadow map GPU resources.
pub struct ShadowMap {
    /// Depth texture the depth pass renders into.
    pub texture: wgpu::Texture,
    /// View used both as depth attachment and as sampled texture.
    pub view: wgpu::TextureView,
    /// Comparison sampler for hardware PCF.
    pub sampler: wgpu::Sampler,
    /// Current light-space view-projection matrix.
    pub light_view_proj: Mat4,
    /// Configuration.
    pub config: ShadowConfig,
}

impl ShadowMap {
    /// Depth format of the shadow texture.
    pub const FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

    /// Create shadow map resources on the GPU.
    pub fn new(device: &wgpu::Device, config: &ShadowConfig) -> Self {
        let resolution = config.resolution.max(1);
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("shadow-map-depth"),
            size: wgpu::Extent3d {
                width: resolution,
                height: resolution,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: Self::FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });

        let view = texture.create_view(&wgpu::TextureViewDescriptor {
            label: Some("shadow-map-view"),
            ..Default::default()
        });

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("shadow-comparison-sampler"),
            compare: Some(wgpu::CompareFunction::GreaterEqual), // reverse-Z
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            ..Default::default()
        });

        log::debug!("Created {resolution}x{resolution} shadow map");

        Self {
            texture,
            view,
            sampler,
            light_view_proj: Mat4::IDENTITY,
            config: ShadowConfig {
                resolution,
                ..config.clone()
            },
        }
    }

    /// Recompute the light matrix for a light at `position` aimed at `target`.
    pub fn update(&mut self, position: Vec3, target: Vec3) {
        self.light_view_proj = compute_light_matrix(
            position,
            target,
            self.config.extent,
            self.config.near,
            self.config.far,
        );
    }

    /// Square viewport covering the whole map.
    pub fn resolution(&self) -> u32 {
        self.config.resolution
    }

    /// Uniform for the lit pass.
    pub fn to_uniform(&self, light: &crate::DirectionalLight) -> ShadowUniform {
        ShadowUniform {
            light_view_proj: self.light_view_proj.to_cols_array_2d(),
            light: light.to_uniform(),
            params: [
                self.config.bias,
                1.0 / self.config.resolution as f32,
                0.0,
                0.0,
            ],
        }
    }

    /// Uniform for the depth pass.
    pub fn light_matrix_uniform(&self) -> LightMatrixUniform {
        LightMatrixUniform {
            view_proj: self.light_view_proj.to_cols_array_2d(),
        }
    }
}

/// Orthographic light-space view-projection.
///
/// The light looks from `position` at `target`; the volume spans
/// `[-extent, extent]` on both light-space axes and `[near, far]` along the
/// view direction. Near and far are swapped for reverse-Z.
pub fn compute_light_matrix(position: Vec3, target: Vec3, extent: f32, near: f32, far: f32) -> Mat4 {
    let dir = (target - position).normalize_or_zero();
    let up = if dir.y.abs() > 0.99 { Vec3::Z } else { Vec3::Y };
    let view = Mat4::look_at_rh(position, target, up);
    let ortho = Mat4::orthographic_rh(-extent, extent, -extent, extent, far, near);
    ortho * view
}
