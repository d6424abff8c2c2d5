//! Sky backdrop pipeline.
//!
//! The sky cube is rotated with the camera but never translated, and every
//! vertex is pushed onto the reverse-Z far plane (depth 0). With a
//! `GreaterEqual` test against the cleared depth buffer it only fills pixels
//! no object covered. Depth writes are off.

use crate::bindings::BindGroupLayouts;
use crate::buffer::Vertex;
use crate::depth::DepthBuffer;

pub const SKY_SHADER_SOURCE: &str = r#"
struct Camera {
    view: mat4x4<f32>,
    proj: mat4x4<f32>,
    eye: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> camera: Camera;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) uv: vec2<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) direction: vec3<f32>,
};

const ZENITH: vec3<f32> = vec3<f32>(0.18, 0.36, 0.72);
const HORIZON: vec3<f32> = vec3<f32>(0.70, 0.80, 0.90);
const NADIR: vec3<f32> = vec3<f32>(0.30, 0.30, 0.32);

@vertex
fn vs_sky(in: VertexInput) -> VertexOutput {
    let rotation = mat3x3<f32>(camera.view[0].xyz, camera.view[1].xyz, camera.view[2].xyz);
    let clip = camera.proj * vec4<f32>(rotation * in.position, 1.0);

    var out: VertexOutput;
    out.clip_position = vec4<f32>(clip.x, clip.y, 0.0, clip.w);
    out.direction = in.position;
    return out;
}

@fragment
fn fs_sky(in: VertexOutput) -> @location(0) vec4<f32> {
    let up = normalize(in.direction).y;
    var color: vec3<f32>;
    if up >= 0.0 {
        color = mix(HORIZON, ZENITH, pow(up, 0.6));
    } else {
        color = mix(HORIZON, NADIR, min(-up * 4.0, 1.0));
    }
    return vec4<f32>(color, 1.0);
}
"#;

/// Pipeline drawing the sky cube from the inside.
pub struct SkyPipeline {
    pub pipeline: wgpu::RenderPipeline,
}

impl SkyPipeline {
    pub fn new(
        device: &wgpu::Device,
        shader: &wgpu::ShaderModule,
        surface_format: wgpu::TextureFormat,
        layouts: &BindGroupLayouts,
    ) -> Self {
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("sky-pipeline-layout"),
            bind_group_layouts: &[&layouts.camera],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("sky-pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: shader,
                entry_point: Some("vs_sky"),
                buffers: &[Vertex::layout()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None, // seen from inside
                unclipped_depth: false,
                polygon_mode: wgpu::PolygonMode::Fill,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DepthBuffer::FORMAT,
                depth_write_enabled: false,
                depth_compare: DepthBuffer::COMPARE_FUNCTION,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: shader,
                entry_point: Some("fs_sky"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            multiview_mask: None,
            cache: None,
        });

        Self { pipeline }
    }
}
