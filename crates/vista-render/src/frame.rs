//! Per-frame draw orchestration: a depth phase from the light, then a color
//! phase from the camera.
//!
//! [`FramePlan::build`] turns the scene's renderables into an ordered list of
//! [`FrameStep`]s without touching the GPU, which keeps the ordering rules
//! testable. [`execute`] records a plan into a command encoder.

use crate::bindings::{CAMERA_GROUP, LIGHT_GROUP, OBJECT_GROUP, SHADOW_GROUP};
use crate::depth::DepthBuffer;
use crate::lit_pipeline::LitPipeline;
use crate::pass::RenderPassBuilder;
use crate::renderable::{CullFace, Program, Renderable};
use crate::shadow_pipeline::ShadowPipeline;
use crate::sky_pipeline::SkyPipeline;

/// One recorded action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStep {
    /// Bind and clear the shadow map, viewport = shadow resolution.
    BeginDepthPass,
    UseProgram(Program),
    BindLightTransform { group: u32 },
    SetCullFace(CullFace),
    /// One indexed draw of `renderables[renderable].geometry()[mesh]`.
    DrawMesh {
        renderable: usize,
        mesh: usize,
        index_count: u32,
    },
    EndDepthPass,
    /// Bind and clear the window target and depth buffer, viewport = window.
    BeginColorPass,
    BindCamera { group: u32 },
    BindShadowMap { group: u32 },
    EndColorPass,
}

/// Ordered steps for one frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FramePlan {
    steps: Vec<FrameStep>,
}

impl FramePlan {
    /// Build the plan for `renderables`, given in registry order.
    ///
    /// Depth phase: every shadow caster in registry order, each with its own
    /// cull face, then back-face culling is restored. Color phase: the shadow
    /// map is bound before the first draw, lit objects are drawn in registry
    /// order and sky renderables come last.
    pub fn build(renderables: &[&dyn Renderable]) -> Self {
        let mut steps = vec![
            FrameStep::BeginDepthPass,
            FrameStep::UseProgram(Program::Depth),
            FrameStep::BindLightTransform { group: LIGHT_GROUP },
        ];

        let mut cull = CullFace::Back;
        for (index, renderable) in renderables.iter().enumerate() {
            let Some(caster_cull) = renderable.shadow_cull() else {
                continue;
            };
            if caster_cull != cull {
                steps.push(FrameStep::SetCullFace(caster_cull));
                cull = caster_cull;
            }
            push_draws(&mut steps, index, *renderable);
        }
        if cull != CullFace::Back {
            steps.push(FrameStep::SetCullFace(CullFace::Back));
        }
        steps.push(FrameStep::EndDepthPass);

        steps.push(FrameStep::BeginColorPass);
        let by_program = |program: Program| {
            renderables
                .iter()
                .enumerate()
                .filter(move |(_, r)| r.program() == program)
        };

        steps.push(FrameStep::UseProgram(Program::Lit));
        steps.push(FrameStep::BindCamera {
            group: CAMERA_GROUP,
        });
        steps.push(FrameStep::BindShadowMap {
            group: SHADOW_GROUP,
        });
        for (index, renderable) in by_program(Program::Lit) {
            push_draws(&mut steps, index, *renderable);
        }

        let mut sky = by_program(Program::Sky).peekable();
        if sky.peek().is_some() {
            steps.push(FrameStep::UseProgram(Program::Sky));
            steps.push(FrameStep::BindCamera {
                group: CAMERA_GROUP,
            });
            for (index, renderable) in sky {
                push_draws(&mut steps, index, *renderable);
            }
        }
        steps.push(FrameStep::EndColorPass);

        Self { steps }
    }

    pub fn steps(&self) -> &[FrameStep] {
        &self.steps
    }

    /// Draw steps only, in order.
    pub fn draws(&self) -> impl Iterator<Item = (usize, usize, u32)> + '_ {
        self.steps.iter().filter_map(|step| match *step {
            FrameStep::DrawMesh {
                renderable,
                mesh,
                index_count,
            } => Some((renderable, mesh, index_count)),
            _ => None,
        })
    }
}

fn push_draws(steps: &mut Vec<FrameStep>, renderable: usize, item: &dyn Renderable) {
    for (mesh, geometry) in item.geometry().iter().enumerate() {
        let index_count = geometry.index_count();
        if index_count == 0 {
            continue;
        }
        steps.push(FrameStep::DrawMesh {
            renderable,
            mesh,
            index_count,
        });
    }
}

/// Pipelines the executor resolves programs against.
pub struct FramePipelines<'a> {
    pub depth: &'a ShadowPipeline,
    pub lit: &'a LitPipeline,
    pub sky: &'a SkyPipeline,
}

impl FramePipelines<'_> {
    fn resolve(&self, program: Program, cull: CullFace) -> &wgpu::RenderPipeline {
        match program {
            Program::Depth => self.depth.pipeline(cull),
            Program::Lit => self.lit.pipeline(cull),
            Program::Sky => &self.sky.pipeline,
        }
    }
}

/// Frame-wide bind groups.
pub struct FrameBindings<'a> {
    pub light: &'a wgpu::BindGroup,
    pub camera: &'a wgpu::BindGroup,
    pub shadow: &'a wgpu::BindGroup,
}

/// Attachments and viewport sizes.
pub struct FrameTargets<'a> {
    pub color: &'a wgpu::TextureView,
    pub depth: &'a wgpu::TextureView,
    pub shadow_map: &'a wgpu::TextureView,
    pub shadow_resolution: u32,
    pub viewport: (u32, u32),
}

/// Pipeline state tracked inside one pass.
struct PassState {
    program: Option<Program>,
    cull: CullFace,
}

/// Record `plan` into `encoder`.
pub fn execute(
    plan: &FramePlan,
    encoder: &mut wgpu::CommandEncoder,
    renderables: &[&dyn Renderable],
    pipelines: &FramePipelines<'_>,
    bindings: &FrameBindings<'_>,
    targets: &FrameTargets<'_>,
) {
    let mut steps = plan.steps().iter();
    while let Some(step) = steps.next() {
        let (builder, viewport) = match step {
            FrameStep::BeginDepthPass => (
                RenderPassBuilder::depth_only()
                    .label("shadow-depth-pass")
                    .depth(targets.shadow_map.clone(), DepthBuffer::CLEAR_VALUE),
                (targets.shadow_resolution, targets.shadow_resolution),
            ),
            FrameStep::BeginColorPass => (
                RenderPassBuilder::new()
                    .label("color-pass")
                    .depth(targets.depth.clone(), DepthBuffer::CLEAR_VALUE),
                targets.viewport,
            ),
            other => {
                log::warn!("Frame step {other:?} outside of a pass ignored");
                continue;
            }
        };

        let mut pass = builder.begin(encoder, targets.color);
        pass.set_viewport(0.0, 0.0, viewport.0 as f32, viewport.1 as f32, 0.0, 1.0);
        let mut state = PassState {
            program: None,
            cull: CullFace::Back,
        };

        for inner in steps.by_ref() {
            match *inner {
                FrameStep::EndDepthPass | FrameStep::EndColorPass => break,
                FrameStep::UseProgram(program) => {
                    state.program = Some(program);
                    pass.set_pipeline(pipelines.resolve(program, state.cull));
                }
                FrameStep::SetCullFace(cull) => {
                    state.cull = cull;
                    if let Some(program) = state.program {
                        pass.set_pipeline(pipelines.resolve(program, cull));
                    }
                }
                FrameStep::BindLightTransform { group } => {
                    pass.set_bind_group(group, bindings.light, &[]);
                }
                FrameStep::BindCamera { group } => {
                    pass.set_bind_group(group, bindings.camera, &[]);
                }
                FrameStep::BindShadowMap { group } => {
                    pass.set_bind_group(group, bindings.shadow, &[]);
                }
                FrameStep::DrawMesh {
                    renderable, mesh, ..
                } => {
                    let Some(item) = renderables.get(renderable) else {
                        continue;
                    };
                    if state.program != Some(Program::Sky)
                        && let Some(object) = item.object_bind_group()
                    {
                        pass.set_bind_group(OBJECT_GROUP, object, &[]);
                    }
                    if let Some(geometry) = item.geometry().get(mesh) {
                        geometry.draw(&mut pass);
                    }
                }
                FrameStep::BeginDepthPass | FrameStep::BeginColorPass => {
                    log::warn!("Nested pass begin ignored");
                }
            }
        }
    }
}
