//! wgpu rendering: device and surface setup, mesh buffers, the depth/lit/sky
//! pipelines and the per-frame shadow pass orchestration.

pub mod bindings;
pub mod buffer;
pub mod camera;
pub mod depth;
pub mod frame;
pub mod geometry;
pub mod gpu;
pub mod lit_pipeline;
pub mod pass;
pub mod renderable;
pub mod shader;
pub mod shadow_pipeline;
pub mod sky_pipeline;

pub use bindings::{
    BindGroupLayouts, CAMERA_GROUP, CameraBinding, CameraUniform, LIGHT_GROUP, LightBinding,
    OBJECT_GROUP, ObjectBinding, ObjectUniform, SHADOW_GROUP, ShadowBinding, UniformBinding,
};
pub use buffer::{BufferAllocator, MeshBuffer, Vertex};
pub use camera::{Camera, MAX_PITCH_DEGREES};
pub use depth::DepthBuffer;
pub use frame::{FrameBindings, FramePipelines, FramePlan, FrameStep, FrameTargets, execute};
pub use geometry::GeometryBuffer;
pub use gpu::{RenderContext, RenderContextError, SurfaceError, init_render_context_blocking};
pub use lit_pipeline::{LIT_SHADER_SOURCE, LitPipeline};
pub use pass::{CLEAR_COLOR, FrameEncoder, RenderPassBuilder};
pub use renderable::{CullFace, Program, Renderable, RenderableKind};
pub use shader::{ShaderError, ShaderLibrary};
pub use shadow_pipeline::{SHADOW_SHADER_SOURCE, ShadowPipeline};
pub use sky_pipeline::{SKY_SHADER_SOURCE, SkyPipeline};
