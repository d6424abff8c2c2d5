//! Lit rendering pipeline: Blinn-Phong shading with a shadow map lookup.
//!
//! Camera at group 0, object at group 1, shadow uniform + shadow map +
//! comparison sampler at group 2. Lighting is computed in view space using
//! the per-object normal matrix.

use crate::bindings::BindGroupLayouts;
use crate::buffer::Vertex;
use crate::depth::DepthBuffer;
use crate::renderable::CullFace;

/// Lit rendering pipeline with shadow support.
pub struct LitPipeline {
    /// Variants indexed by [`CullFace::index`].
    variants: [wgpu::RenderPipeline; 3],
}

impl LitPipeline {
    pub fn new(
        device: &wgpu::Device,
        shader: &wgpu::ShaderModule,
        surface_format: wgpu::TextureFormat,
        layouts: &BindGroupLayouts,
    ) -> Self {
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("lit-pipeline-layout"),
            bind_group_layouts: &[&layouts.camera, &layouts.object, &layouts.shadow],
            immediate_size: 0,
        });

        let variants = CullFace::ALL.map(|cull| {
            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some("lit-pipeline"),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: shader,
                    entry_point: Some("vs_main"),
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
                    format: DepthBuffer::FORMAT,
                    depth_write_enabled: true,
                    depth_compare: DepthBuffer::COMPARE_FUNCTION,
                    stencil: wgpu::StencilState::default(),
                    bias: wgpu::DepthBiasState::default(),
                }),
                multisample: wgpu::MultisampleState {
                    count: 1,
                    mask: !0,
                    alpha_to_coverage_enabled: false,
                },
                fragment: Some(wgpu::FragmentState {
                    module: shader,
                    entry_point: Some("fs_main"),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: surface_format,
                        blend: None,
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                }),
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

/// WGSL shader source for lit objects.
///
/// Blinn-Phong in view space. The shadow term averages a 3×3 grid of
/// hardware comparisons; fragments outside the light volume count as lit.
pub const LIT_SHADER_SOURCE: &str = r#"
struct Camera {
    view: mat4x4<f32>,
    proj: mat4x4<f32>,
    eye: vec4<f32>,
};

struct Object {
    model: mat4x4<f32>,
    normal_matrix: mat4x4<f32>,
    color: vec4<f32>,
};

struct DirectionalLight {
    direction_intensity: vec4<f32>,
    color_padding: vec4<f32>,
};

struct Shadow {
    light_view_proj: mat4x4<f32>,
    sun: DirectionalLight,
    // x = bias, y = texel size
    params: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> camera: Camera;

@group(1) @binding(0)
var<uniform> obj: Object;

@group(2) @binding(0)
var<uniform> shadow: Shadow;

@group(2) @binding(1)
var shadow_map: texture_depth_2d;

@group(2) @binding(2)
var shadow_sampler: sampler_comparison;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) uv: vec2<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) view_position: vec3<f32>,
    @location(1) view_normal: vec3<f32>,
    @location(2) light_space: vec4<f32>,
};

const AMBIENT: f32 = 0.18;
const SHININESS: f32 = 32.0;
const SPECULAR_STRENGTH: f32 = 0.35;

@vertex
fn vs_main(in: VertexInput) -> VertexOutput {
    let world = obj.model * vec4<f32>(in.position, 1.0);
    let view_pos = camera.view * world;

    var out: VertexOutput;
    out.clip_position = camera.proj * view_pos;
    out.view_position = view_pos.xyz;
    out.view_normal = (obj.normal_matrix * vec4<f32>(in.normal, 0.0)).xyz;
    out.light_space = shadow.light_view_proj * world;
    return out;
}

fn shadow_factor(light_space: vec4<f32>) -> f32 {
    let ndc = light_space.xyz / light_space.w;
    let uv = vec2<f32>(ndc.x * 0.5 + 0.5, -ndc.y * 0.5 + 0.5);

    if uv.x < 0.0 || uv.x > 1.0 || uv.y < 0.0 || uv.y > 1.0 || ndc.z < 0.0 || ndc.z > 1.0 {
        return 1.0;
    }

    // Reverse-Z: a receiver is lit when it is at least as close to the
    // light as the stored occluder, after the bias.
    let reference = ndc.z + shadow.params.x;
    let texel = shadow.params.y;
    var lit = 0.0;
    for (var dy = -1; dy <= 1; dy++) {
        for (var dx = -1; dx <= 1; dx++) {
            let offset = vec2<f32>(f32(dx), f32(dy)) * texel;
            lit += textureSampleCompareLevel(shadow_map, shadow_sampler, uv + offset, reference);
        }
    }
    return lit / 9.0;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let normal = normalize(in.view_normal);
    let to_light = normalize((camera.view * vec4<f32>(-shadow.sun.direction_intensity.xyz, 0.0)).xyz);
    let to_eye = normalize(-in.view_position);
    let half_dir = normalize(to_light + to_eye);

    let light_color = shadow.sun.color_padding.xyz * shadow.sun.direction_intensity.w;
    let diffuse = max(dot(normal, to_light), 0.0);
    var specular = 0.0;
    if diffuse > 0.0 {
        specular = pow(max(dot(normal, half_dir), 0.0), SHININESS) * SPECULAR_STRENGTH;
    }

    let lit = shadow_factor(in.light_space);
    let base = obj.color.rgb;
    let color = base * AMBIENT + (base * diffuse + vec3<f32>(specular)) * light_color * lit;
    return vec4<f32>(color, 1.0);
}
"#;
