//! The scene registry: the three fixed renderables, the light and the camera.
//!
//! `SceneContext` is plain CPU state. Input handlers mutate it between
//! frames; [`SceneRenderer`](crate::SceneRenderer) reads it when drawing.

use glam::Vec3;
use vista_config::Config;
use vista_lighting::{DirectionalLight, LightError, ShadowConfig};
use vista_render::{Camera, FramePlan, Renderable, ShaderError};

use crate::{Ground, Model, Skybox};

/// Scene setup failures. All of them are fatal.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error("invalid light: {0}")]
    Light(#[from] LightError),

    #[error("shader setup failed: {0}")]
    Shader(#[from] ShaderError),
}

pub struct SceneContext {
    pub model: Model,
    pub ground: Ground,
    pub sky: Skybox,
    pub camera: Camera,
    pub light: DirectionalLight,
    light_position: Vec3,
    light_target: Vec3,
    shadow: ShadowConfig,
    viewport: (u32, u32),
}

impl SceneContext {
    pub fn new(model: Model, config: &Config) -> Result<Self, SceneError> {
        let light_position = Vec3::from(config.light.position);
        let light_target = Vec3::from(config.light.target);
        let light = DirectionalLight::looking_at(
            light_position,
            light_target,
            Vec3::from(config.light.color),
            config.light.intensity,
        )?;

        let mut camera = Camera::looking_at(
            Vec3::from(config.camera.eye),
            Vec3::from(config.camera.center),
        );
        camera.fov_y = config.camera.fov_y_degrees.to_radians();
        camera.near = config.camera.near;
        camera.far = config.camera.far;

        let viewport = (config.window.width.max(1), config.window.height.max(1));
        camera.set_aspect_ratio(viewport.0, viewport.1);

        let scene = &config.scene;
        let ground = Ground::new(
            scene.ground_height,
            scene.ground_half_size,
            Vec3::from(scene.ground_color),
        );

        log::debug!(
            "Scene created: {} model meshes, viewport {}x{}",
            model.meshes().len(),
            viewport.0,
            viewport.1
        );

        Ok(Self {
            model,
            ground,
            sky: Skybox::new(),
            camera,
            light,
            light_position,
            light_target,
            shadow: ShadowConfig {
                resolution: config.light.shadow_resolution,
                extent: config.light.shadow_extent,
                near: config.light.shadow_near,
                far: config.light.shadow_far,
                bias: config.light.shadow_bias,
            },
            viewport,
        })
    }

    /// Model, ground, sky. The frame plan depends on this order.
    pub fn renderables(&self) -> [&dyn Renderable; 3] {
        [&self.model, &self.ground, &self.sky]
    }

    pub fn frame_plan(&self) -> FramePlan {
        FramePlan::build(&self.renderables())
    }

    pub fn light_position(&self) -> Vec3 {
        self.light_position
    }

    pub fn light_target(&self) -> Vec3 {
        self.light_target
    }

    pub fn shadow_config(&self) -> &ShadowConfig {
        &self.shadow
    }

    pub fn viewport(&self) -> (u32, u32) {
        self.viewport
    }

    /// Track a new window size. Zero sizes (minimized) are ignored.
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        if width == 0 || height == 0 {
            return false;
        }
        self.viewport = (width, height);
        self.camera.set_aspect_ratio(width, height);
        true
    }

    /// Upload dirty meshes and create per-object bindings.
    pub fn upload(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        object_layout: &wgpu::BindGroupLayout,
    ) {
        self.model.upload(device, queue, object_layout);
        self.ground.upload(device, queue, object_layout);
        self.sky.upload(device, queue);
    }

    /// Write every object's matrices for the current camera.
    pub fn sync(&self, queue: &wgpu::Queue) {
        let view = self.camera.view_matrix();
        for renderable in self.renderables() {
            renderable.send_matrix_to_shader(queue, view);
        }
    }

    /// Free all GPU buffers owned by the renderables.
    pub fn release(&mut self) {
        self.model.release();
        self.ground.release();
        self.sky.release();
    }
}

impl Drop for SceneContext {
    fn drop(&mut self) {
        log::info!("Scene teardown");
        self.release();
    }
}
