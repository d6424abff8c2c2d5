//! The seam between scene objects and the frame plan.

use crate::geometry::GeometryBuffer;

/// Which fixed scene object a renderable is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderableKind {
    Model,
    Ground,
    Sky,
}

/// Shader program a draw runs with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Program {
    /// Depth-only, from the light.
    Depth,
    /// Blinn-Phong with shadow lookup.
    Lit,
    /// Procedural sky on the far plane.
    Sky,
}

/// Face culling state. In wgpu this selects a pipeline variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CullFace {
    Front,
    #[default]
    Back,
    None,
}

impl CullFace {
    /// Every variant, in pipeline variant order.
    pub const ALL: [CullFace; 3] = [CullFace::Front, CullFace::Back, CullFace::None];

    pub fn to_wgpu(self) -> Option<wgpu::Face> {
        match self {
            CullFace::Front => Some(wgpu::Face::Front),
            CullFace::Back => Some(wgpu::Face::Back),
            CullFace::None => None,
        }
    }

    /// Index into a `[_; 3]` of pipeline variants.
    pub fn index(self) -> usize {
        match self {
            CullFace::Front => 0,
            CullFace::Back => 1,
            CullFace::None => 2,
        }
    }
}

/// Anything the frame plan can draw.
pub trait Renderable {
    fn kind(&self) -> RenderableKind;

    /// Culling used when drawn into the shadow map; `None` excludes it from
    /// the depth phase.
    fn shadow_cull(&self) -> Option<CullFace>;

    /// Program for the color phase.
    fn program(&self) -> Program;

    fn geometry(&self) -> &[GeometryBuffer];

    /// Group 1 bind group with the object's transform. The sky has none.
    fn object_bind_group(&self) -> Option<&wgpu::BindGroup>;

    /// Upload model matrix, normal matrix and color for this frame's view.
    fn send_matrix_to_shader(&self, queue: &wgpu::Queue, view: glam::Mat4);
}
