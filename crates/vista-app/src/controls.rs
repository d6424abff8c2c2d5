//! Input dispatch for the two interaction modes.
//!
//! In object mode the camera stays put and the pointer turns the model
//! through the trackball. In FPS mode the cursor is captured, mouse motion
//! turns the camera and WASD flies it around.

use glam::{Mat3, Vec2, Vec3};
use tracing::{debug, info};
use vista_config::Config;
use vista_input::{CursorMode, FpsController, KeyboardState, Trackball};
use vista_scene::SceneContext;
use winit::event::{ElementState, MouseButton};
use winit::keyboard::KeyCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionMode {
    /// Fixed camera, trackball rotates the model.
    #[default]
    Object,
    /// Free-fly first-person camera.
    Fps,
}

impl InteractionMode {
    pub fn toggled(self) -> Self {
        match self {
            InteractionMode::Object => InteractionMode::Fps,
            InteractionMode::Fps => InteractionMode::Object,
        }
    }

    /// Cursor behaviour while this mode is active and idle.
    pub fn cursor_mode(self) -> CursorMode {
        match self {
            InteractionMode::Object => CursorMode::Normal,
            InteractionMode::Fps => CursorMode::Captured,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            InteractionMode::Object => "object",
            InteractionMode::Fps => "fps",
        }
    }
}

/// What the window layer has to do after an input was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlResponse {
    /// Not bound in the current mode.
    Ignored,
    Handled,
    Quit,
    SetCursor(CursorMode),
    /// Log the current frame rate.
    ReportFps,
}

pub struct Controls {
    mode: InteractionMode,
    trackball: Trackball,
    fps: FpsController,
    translate_step: f32,
    scale_down: f32,
    scale_up: f32,
}

impl Controls {
    pub fn new(config: &Config) -> Self {
        let trackball = Trackball::new(config.window.width, config.window.height)
            .with_tuning(config.trackball.damping, config.trackball.axis_epsilon);
        Self {
            mode: InteractionMode::default(),
            trackball,
            fps: FpsController::new(config.camera.move_speed, config.camera.mouse_sensitivity),
            translate_step: config.scene.translate_step,
            scale_down: config.scene.scale_down,
            scale_up: config.scene.scale_up,
        }
    }

    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    pub fn trackball(&self) -> &Trackball {
        &self.trackball
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.trackball.resize(width, height);
    }

    /// Dispatch a fresh key press.
    pub fn on_key(
        &mut self,
        code: KeyCode,
        shift: bool,
        scene: &mut SceneContext,
    ) -> ControlResponse {
        let step = self.translate_step;
        match code {
            KeyCode::Escape => ControlResponse::Quit,
            KeyCode::KeyR => {
                scene.model.reset();
                debug!("Model transform reset");
                ControlResponse::Handled
            }
            KeyCode::ArrowLeft => self.translate(scene, Vec3::new(-step, 0.0, 0.0)),
            KeyCode::ArrowRight => self.translate(scene, Vec3::new(step, 0.0, 0.0)),
            KeyCode::ArrowUp => self.translate(scene, Vec3::new(0.0, step, 0.0)),
            KeyCode::ArrowDown => self.translate(scene, Vec3::new(0.0, -step, 0.0)),
            KeyCode::KeyC => self.toggle_mode(scene),
            KeyCode::KeyP => ControlResponse::ReportFps,
            // S is "move back" while flying.
            KeyCode::KeyS if self.mode == InteractionMode::Object => {
                let factor = if shift { self.scale_up } else { self.scale_down };
                scene.model.scale(Vec3::splat(factor));
                ControlResponse::Handled
            }
            KeyCode::F1 => {
                info!("Directional light selected");
                ControlResponse::Handled
            }
            KeyCode::F2 => {
                info!("Only the directional light is available");
                ControlResponse::Handled
            }
            _ => ControlResponse::Ignored,
        }
    }

    fn translate(&self, scene: &mut SceneContext, offset: Vec3) -> ControlResponse {
        scene.model.translate(offset);
        ControlResponse::Handled
    }

    fn toggle_mode(&mut self, scene: &mut SceneContext) -> ControlResponse {
        self.trackball.end_drag();
        self.mode = self.mode.toggled();
        if self.mode == InteractionMode::Fps {
            scene.camera.sync_angles_from_target();
        }
        info!("Camera mode: {}", self.mode.name());
        ControlResponse::SetCursor(self.mode.cursor_mode())
    }

    /// Left button in object mode starts and ends a trackball drag.
    pub fn on_button(
        &mut self,
        button: MouseButton,
        state: ElementState,
        cursor: Vec2,
    ) -> ControlResponse {
        if self.mode != InteractionMode::Object || button != MouseButton::Left {
            return ControlResponse::Ignored;
        }
        match state {
            ElementState::Pressed => {
                self.trackball.begin_drag(cursor.x, cursor.y);
                ControlResponse::SetCursor(CursorMode::Hidden)
            }
            ElementState::Released => {
                self.trackball.end_drag();
                ControlResponse::SetCursor(CursorMode::Normal)
            }
        }
    }

    /// Rotate the model while a drag is active. Returns whether it turned.
    pub fn on_cursor_moved(&mut self, cursor: Vec2, scene: &mut SceneContext) -> bool {
        if self.mode != InteractionMode::Object {
            return false;
        }
        let Some((angle, axis)) = self.trackball.drag_to(cursor.x, cursor.y) else {
            return false;
        };
        // The trackball axis lives in view space.
        let view_rotation = Mat3::from_mat4(scene.camera.view_matrix());
        let world_axis = view_rotation.transpose() * axis;
        scene.model.rotate(angle, world_axis);
        true
    }

    /// Wheel lines push the model away from (or pull it toward) the viewer.
    pub fn on_wheel(&mut self, lines: f32, scene: &mut SceneContext) {
        if lines != 0.0 {
            scene.model.translate(Vec3::new(0.0, 0.0, -lines));
        }
    }

    /// Raw mouse motion accumulated since the last frame.
    pub fn on_look(&mut self, delta: Vec2, scene: &mut SceneContext) {
        if self.mode == InteractionMode::Fps {
            self.fps
                .rotate_from_mouse_delta(&mut scene.camera, delta.x, delta.y);
        }
    }

    /// Per-frame update from held keys. Returns whether the camera moved.
    pub fn update(&mut self, dt: f32, keys: &KeyboardState, scene: &mut SceneContext) -> bool {
        match self.mode {
            InteractionMode::Object => false,
            InteractionMode::Fps => self.fps.apply_movement(&mut scene.camera, keys, dt),
        }
    }
}
