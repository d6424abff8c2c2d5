//! Uniform layouts and bind groups shared by the depth, lit and sky pipelines.
//!
//! | pass  | group 0        | group 1 | group 2              |
//! |-------|----------------|---------|----------------------|
//! | depth | light matrix   | object  |                      |
//! | lit   | camera         | object  | shadow map + sampler |
//! | sky   | camera         |         |                      |

use std::marker::PhantomData;
use std::num::NonZeroU64;

use bytemuck::{Pod, Zeroable};
use static_assertions::assert_eq_size;
use vista_lighting::{LightMatrixUniform, ShadowMap, ShadowUniform};

/// Light transform slot in the depth pass.
pub const LIGHT_GROUP: u32 = 0;
/// Camera slot in the lit and sky passes.
pub const CAMERA_GROUP: u32 = 0;
/// Per-object slot in the depth and lit passes.
pub const OBJECT_GROUP: u32 = 1;
/// Shadow map slot in the lit pass.
pub const SHADOW_GROUP: u32 = 2;

/// Camera matrices for the color phase.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct CameraUniform {
    pub view: [[f32; 4]; 4],
    /// Reverse-Z perspective.
    pub proj: [[f32; 4]; 4],
    /// World-space eye, w = 1.
    pub eye: [f32; 4],
}

/// Per-object transform and base color.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct ObjectUniform {
    pub model: [[f32; 4]; 4],
    /// Inverse-transpose of view × model; normals land in view space.
    pub normal_matrix: [[f32; 4]; 4],
    /// Linear RGB base color, w = 1.
    pub color: [f32; 4],
}

assert_eq_size!(CameraUniform, [u8; 144]);
assert_eq_size!(ObjectUniform, [u8; 144]);
assert_eq_size!(LightMatrixUniform, [u8; 64]);
assert_eq_size!(ShadowUniform, [u8; 112]);

impl ObjectUniform {
    pub fn new(model: glam::Mat4, view: glam::Mat4, color: glam::Vec3) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            normal_matrix: vista_math::normal_matrix(view, model).to_cols_array_2d(),
            color: [color.x, color.y, color.z, 1.0],
        }
    }
}

fn uniform_entry(binding: u32, visibility: wgpu::ShaderStages, size: usize) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: NonZeroU64::new(size as u64),
        },
        count: None,
    }
}

/// Every bind group layout the renderer uses, created once at setup.
pub struct BindGroupLayouts {
    pub camera: wgpu::BindGroupLayout,
    pub object: wgpu::BindGroupLayout,
    pub light: wgpu::BindGroupLayout,
    pub shadow: wgpu::BindGroupLayout,
}

impl BindGroupLayouts {
    pub fn new(device: &wgpu::Device) -> Self {
        let camera = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("camera-bgl"),
            entries: &[uniform_entry(
                0,
                wgpu::ShaderStages::VERTEX_FRAGMENT,
                std::mem::size_of::<CameraUniform>(),
            )],
        });

        let object = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("object-bgl"),
            entries: &[uniform_entry(
                0,
                wgpu::ShaderStages::VERTEX_FRAGMENT,
                std::mem::size_of::<ObjectUniform>(),
            )],
        });

        let light = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("light-matrix-bgl"),
            entries: &[uniform_entry(
                0,
                wgpu::ShaderStages::VERTEX,
                std::mem::size_of::<LightMatrixUniform>(),
            )],
        });

        let shadow = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("shadow-bgl"),
            entries: &[
                // binding 0: shadow uniform buffer
                uniform_entry(
                    0,
                    wgpu::ShaderStages::VERTEX_FRAGMENT,
                    std::mem::size_of::<ShadowUniform>(),
                ),
                // binding 1: shadow depth texture
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Depth,
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                // binding 2: comparison sampler
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Comparison),
                    count: None,
                },
            ],
        });

        Self {
            camera,
            object,
            light,
            shadow,
        }
    }
}

/// A uniform buffer and the single-entry bind group exposing it.
pub struct UniformBinding<T> {
    pub buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
    _marker: PhantomData<T>,
}

impl<T: Pod> UniformBinding<T> {
    pub fn new(device: &wgpu::Device, layout: &wgpu::BindGroupLayout, label: &str, value: &T) -> Self {
        use wgpu::util::DeviceExt;

        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::bytes_of(value),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        });
        Self {
            buffer,
            bind_group,
            _marker: PhantomData,
        }
    }

    pub fn write(&self, queue: &wgpu::Queue, value: &T) {
        queue.write_buffer(&self.buffer, 0, bytemuck::bytes_of(value));
    }
}

pub type CameraBinding = UniformBinding<CameraUniform>;
pub type ObjectBinding = UniformBinding<ObjectUniform>;
pub type LightBinding = UniformBinding<LightMatrixUniform>;

/// Shadow uniform plus the shadow map's texture and comparison sampler.
pub struct ShadowBinding {
    pub buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
}

impl ShadowBinding {
    pub fn new(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        shadow_map: &ShadowMap,
        value: &ShadowUniform,
    ) -> Self {
        use wgpu::util::DeviceExt;

        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("shadow-uniform"),
            contents: bytemuck::bytes_of(value),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("shadow-bind-group"),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&shadow_map.view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&shadow_map.sampler),
                },
            ],
        });
        Self { buffer, bind_group }
    }

    pub fn write(&self, queue: &wgpu::Queue, value: &ShadowUniform) {
        queue.write_buffer(&self.buffer, 0, bytemuck::bytes_of(value));
    }
}
