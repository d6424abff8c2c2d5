//! GPU side of the scene: pipelines, shadow map, depth buffer and the
//! frame-wide bindings, plus the per-frame draw.

use std::path::PathBuf;

use vista_lighting::ShadowMap;
use vista_render::{
    BindGroupLayouts, CameraBinding, DepthBuffer, FrameBindings, FrameEncoder, FramePipelines,
    FrameTargets, LIT_SHADER_SOURCE, LightBinding, LitPipeline, RenderContext, SHADOW_SHADER_SOURCE,
    SKY_SHADER_SOURCE, ShaderLibrary, ShadowBinding, ShadowPipeline, SkyPipeline, SurfaceError,
    execute,
};

use crate::context::{SceneContext, SceneError};

pub struct SceneRenderer {
    layouts: BindGroupLayouts,
    shaders: ShaderLibrary,
    shadow_pipeline: ShadowPipeline,
    lit_pipeline: LitPipeline,
    sky_pipeline: SkyPipeline,
    depth: DepthBuffer,
    shadow_map: ShadowMap,
    light_binding: LightBinding,
    camera_binding: CameraBinding,
    shadow_binding: ShadowBinding,
}

impl SceneRenderer {
    /// Build every GPU resource the scene needs. Any failure here is fatal
    /// for the viewer; nothing is recreated later except the depth buffer.
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        scene: &SceneContext,
        shader_dir: Option<PathBuf>,
    ) -> Result<Self, SceneError> {
        let layouts = BindGroupLayouts::new(device);

        let mut shaders = ShaderLibrary::new();
        if let Some(dir) = shader_dir {
            shaders = shaders.with_shader_dir(dir);
        }
        let shadow_shader = shaders.load(device, "shadow", "shadow.wgsl", SHADOW_SHADER_SOURCE)?;
        let lit_shader = shaders.load(device, "lit", "lit.wgsl", LIT_SHADER_SOURCE)?;
        let sky_shader = shaders.load(device, "sky", "sky.wgsl", SKY_SHADER_SOURCE)?;

        let shadow_pipeline = ShadowPipeline::new(device, &shadow_shader, &layouts);
        let lit_pipeline = LitPipeline::new(device, &lit_shader, surface_format, &layouts);
        let sky_pipeline = SkyPipeline::new(device, &sky_shader, surface_format, &layouts);

        let (width, height) = scene.viewport();
        let depth = DepthBuffer::new(device, width, height);

        let mut shadow_map = ShadowMap::new(device, scene.shadow_config());
        shadow_map.update(scene.light_position(), scene.light_target());

        let light_binding = LightBinding::new(
            device,
            &layouts.light,
            "light-transform",
            &shadow_map.light_matrix_uniform(),
        );
        let camera_binding =
            CameraBinding::new(device, &layouts.camera, "camera", &scene.camera.to_uniform());
        let shadow_binding = ShadowBinding::new(
            device,
            &layouts.shadow,
            &shadow_map,
            &shadow_map.to_uniform(&scene.light),
        );

        log::info!(
            "Scene renderer ready: {} shaders, {}x{} shadow map",
            shaders.len(),
            shadow_map.resolution(),
            shadow_map.resolution()
        );

        Ok(Self {
            layouts,
            shaders,
            shadow_pipeline,
            lit_pipeline,
            sky_pipeline,
            depth,
            shadow_map,
            light_binding,
            camera_binding,
            shadow_binding,
        })
    }

    pub fn layouts(&self) -> &BindGroupLayouts {
        &self.layouts
    }

    pub fn shaders(&self) -> &ShaderLibrary {
        &self.shaders
    }

    /// Reallocate the window-sized depth buffer.
    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.depth.resize(device, width, height);
    }

    /// Upload dirty geometry and write this frame's uniforms.
    pub fn prepare(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, scene: &mut SceneContext) {
        scene.upload(device, queue, &self.layouts.object);
        scene.sync(queue);

        self.shadow_map
            .update(scene.light_position(), scene.light_target());
        self.light_binding
            .write(queue, &self.shadow_map.light_matrix_uniform());
        self.shadow_binding
            .write(queue, &self.shadow_map.to_uniform(&scene.light));
        self.camera_binding.write(queue, &scene.camera.to_uniform());
    }

    /// Record the depth phase and the color phase into `encoder`.
    pub fn encode(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        color_view: &wgpu::TextureView,
        scene: &SceneContext,
    ) {
        let renderables = scene.renderables();
        let plan = scene.frame_plan();

        let pipelines = FramePipelines {
            depth: &self.shadow_pipeline,
            lit: &self.lit_pipeline,
            sky: &self.sky_pipeline,
        };
        let bindings = FrameBindings {
            light: &self.light_binding.bind_group,
            camera: &self.camera_binding.bind_group,
            shadow: &self.shadow_binding.bind_group,
        };
        let targets = FrameTargets {
            color: color_view,
            depth: &self.depth.view,
            shadow_map: &self.shadow_map.view,
            shadow_resolution: self.shadow_map.resolution(),
            viewport: (self.depth.width(), self.depth.height()),
        };

        execute(&plan, encoder, &renderables, &pipelines, &bindings, &targets);
    }

    /// Draw one frame to the window surface.
    pub fn render(
        &mut self,
        gpu: &RenderContext,
        scene: &mut SceneContext,
    ) -> Result<(), SurfaceError> {
        let surface_texture = gpu.get_current_texture()?;
        self.prepare(&gpu.device, &gpu.queue, scene);

        let mut frame = FrameEncoder::new(&gpu.device, &gpu.queue, surface_texture);
        if let Some((encoder, view)) = frame.parts() {
            self.encode(encoder, view, scene);
        }
        frame.submit();
        Ok(())
    }
}

impl Drop for SceneRenderer {
    fn drop(&mut self) {
        log::info!("Scene renderer teardown");
    }
}
