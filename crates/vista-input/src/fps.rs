//! First-person fly camera: mouse look and held-key movement.

use glam::Vec3;
use vista_render::{Camera, MAX_PITCH_DEGREES};
use winit::keyboard::KeyCode;

use crate::keyboard::KeyboardState;

/// Units per second.
pub const MOVE_SPEED: f32 = 10.0;

/// Degrees per pixel of mouse motion.
pub const MOUSE_SENSITIVITY: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FpsController {
    pub move_speed: f32,
    pub sensitivity: f32,
}

impl Default for FpsController {
    fn default() -> Self {
        Self {
            move_speed: MOVE_SPEED,
            sensitivity: MOUSE_SENSITIVITY,
        }
    }
}

impl FpsController {
    pub fn new(move_speed: f32, sensitivity: f32) -> Self {
        Self {
            move_speed,
            sensitivity,
        }
    }

    /// Turn the camera by a mouse delta in pixels. Moving right turns right,
    /// moving down looks down. Pitch is clamped short of straight up/down.
    pub fn rotate_from_mouse_delta(&self, camera: &mut Camera, dx: f32, dy: f32) {
        if dx == 0.0 && dy == 0.0 {
            return;
        }
        camera.yaw = (camera.yaw + dx * self.sensitivity) % 360.0;
        camera.pitch = (camera.pitch - dy * self.sensitivity)
            .clamp(-MAX_PITCH_DEGREES, MAX_PITCH_DEGREES);
        camera.apply_angles();
    }

    /// Offset for this frame from the held movement keys.
    ///
    /// W/S follow the view direction, A/D the right vector and Space/Ctrl
    /// the camera's up vector. Each key contributes `dt * move_speed`.
    pub fn movement(&self, camera: &Camera, keys: &KeyboardState, dt: f32) -> Vec3 {
        let step = dt * self.move_speed;
        let forward = camera.forward();
        let right = camera.right();
        let up = camera.up.normalize_or(Vec3::Y);

        let mut offset = Vec3::ZERO;
        if keys.is_held(KeyCode::KeyW) {
            offset += forward * step;
        }
        if keys.is_held(KeyCode::KeyS) {
            offset -= forward * step;
        }
        if keys.is_held(KeyCode::KeyD) {
            offset += right * step;
        }
        if keys.is_held(KeyCode::KeyA) {
            offset -= right * step;
        }
        if keys.is_held(KeyCode::Space) {
            offset += up * step;
        }
        if keys.any_held(&[KeyCode::ControlLeft, KeyCode::ControlRight]) {
            offset -= up * step;
        }
        offset
    }

    /// Move eye and center together by this frame's offset.
    pub fn apply_movement(&self, camera: &mut Camera, keys: &KeyboardState, dt: f32) -> bool {
        let offset = self.movement(camera, keys, dt);
        if offset == Vec3::ZERO {
            return false;
        }
        camera.translate(offset);
        true
    }
}
