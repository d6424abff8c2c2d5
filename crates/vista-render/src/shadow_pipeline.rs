//! Depth-only render pipeline for shadow map generation.
//!
//! Renders scene geometry from the light's perspective into the shadow map.
//! No color output, only depth writes. One variant per cull mode, since
//! culling is baked into a wgpu pipeline.

use crate::bindings::BindGroupLayouts;
use crate::buffer::Vertex;
use crate::renderable::CullFace;

/// WGSL shader source for shadow depth-only rendering.
pub const SHADOW_SHADER_SOURCE: &str = r#"
struct LightMatrix {
    view_proj: mat4x4<f32>,
};

struct Object {
    model: mat4x4<f32>,
    normal_matrix: mat4x4<f32>,
    color: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> light: LightMatrix;

@group(1) @binding(0)
var<uniform> obj: Object;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) uv: vec2<f32>,
};

@vertex
fn vs_shadow(in: VertexInput) -> @builtin(position) vec4<f32> {
    return light.view_proj * obj.model * vec4<f32>(in.position, 1.0);
}
"#;

/// Depth-only pipeline for rendering shadow maps.
pub struct ShadowPipeline {
    /// Variants indexed by [`CullFace::index`].
    variants: [wgpu::RenderPipeline; 3],
}

impl ShadowPipeline {
    pub fn new(device: &wgpu::Device, shader: &wgpu::ShaderModule, layouts: &BindGroupLayouts) -> Self {
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("shadow-pipeline-layout"),
            bind_group_layouts: &[&layouts.light, &layouts.object],
            immediate_size: 0,
        });

        let variants = CullFace::ALL.map(|cull| {
            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some("shadow-depth-pipeline"),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: shader,
                    entry_point: Some("vs_shadow"),
                    buffers: &[Vertex::layout()],
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                },
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    strip_index_format: None,
                    front_face: wgpu::FrontFace::Ccw,
                    cull_mode: cull.to_wgpu(),
                    unclipped_depth: false,
                    polygon_mode: wgpu::PolygonMode::Fill,
                    conservative: false,
                },
                depth_stencil: Some(wgpu::DepthStencilState {
                    format: vista_lighting::ShadowMap::FORMAT,
                    depth_write_enabled: true,
                    depth_compare: wgpu::CompareFunction::GreaterEqual, // reverse-Z
                    stencil: wgpu::StencilState::default(),
                    bias: wgpu::DepthBiasState::default(),
                }),
                multisample: wgpu::MultisampleState::default(),
                fragment: None, // depth-only, no fragment output
                multiview_mask: None,
                cache: None,
            })
        });

        Self { variants }
    }

    pub fn pipeline(&self, cull: CullFace) -> &wgpu::RenderPipeline {
        &self.variants[cull.index()]
    }
}
