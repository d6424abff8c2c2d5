//! Look-at camera for view and projection matrix generation.

use glam::{Mat4, Vec3};

use crate::bindings::CameraUniform;

/// Pitch limit in degrees for FPS look.
pub const MAX_PITCH_DEGREES: f32 = 89.0;

/// A perspective camera described by eye, center and up.
///
/// `yaw`/`pitch` (degrees) are only meaningful in FPS mode, where the look
/// direction is derived from them. Object mode keeps the camera fixed and
/// rotates the model instead.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub center: Vec3,
    pub up: Vec3,
    /// Degrees around +Y; -90 looks down -Z.
    pub yaw: f32,
    /// Degrees above the horizon, clamped to ±[`MAX_PITCH_DEGREES`].
    pub pitch: f32,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    /// Near clip plane distance (always positive).
    pub near: f32,
    /// Far clip plane distance (always positive, > near).
    pub far: f32,
    /// Width / height.
    pub aspect: f32,
}

impl Camera {
    /// Camera at `eye` looking at `center`, with yaw/pitch matching that direction.
    pub fn looking_at(eye: Vec3, center: Vec3) -> Self {
        let mut camera = Self {
            eye,
            center,
            ..Self::default()
        };
        camera.sync_angles_from_target();
        camera
    }

    /// Compute the view matrix.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.center, self.up)
    }

    /// Compute the projection matrix with reverse-Z.
    pub fn projection_matrix(&self) -> Mat4 {
        // Swapped near/far maps the near plane to z=1 and the far plane to z=0.
        Mat4::perspective_rh(self.fov_y, self.aspect, self.far, self.near)
    }

    /// Compute the combined view-projection matrix.
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Unit vector from eye toward center.
    pub fn forward(&self) -> Vec3 {
        (self.center - self.eye).normalize_or(Vec3::NEG_Z)
    }

    /// Unit vector to the right of the view direction.
    pub fn right(&self) -> Vec3 {
        self.forward().cross(self.up).normalize_or(Vec3::X)
    }

    /// Update the aspect ratio. Zero-sized viewports are ignored.
    pub fn set_aspect_ratio(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.aspect = width as f32 / height as f32;
    }

    /// Recompute yaw/pitch from the current eye→center direction.
    pub fn sync_angles_from_target(&mut self) {
        let dir = self.forward();
        self.pitch = dir
            .y
            .clamp(-1.0, 1.0)
            .asin()
            .to_degrees()
            .clamp(-MAX_PITCH_DEGREES, MAX_PITCH_DEGREES);
        self.yaw = dir.z.atan2(dir.x).to_degrees();
    }

    /// Unit look direction for the current yaw/pitch.
    pub fn direction_from_angles(&self) -> Vec3 {
        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());
        Vec3::new(yaw.cos() * pitch.cos(), pitch.sin(), yaw.sin() * pitch.cos()).normalize()
    }

    /// Move the center so the camera looks along yaw/pitch, keeping the eye.
    pub fn apply_angles(&mut self) {
        let distance = (self.center - self.eye).length().max(1.0);
        self.center = self.eye + self.direction_from_angles() * distance;
    }

    /// Move eye and center together.
    pub fn translate(&mut self, offset: Vec3) {
        self.eye += offset;
        self.center += offset;
    }

    /// Convert the camera to a uniform suitable for GPU upload.
    pub fn to_uniform(&self) -> CameraUniform {
        CameraUniform {
            view: self.view_matrix().to_cols_array_2d(),
            proj: self.projection_matrix().to_cols_array_2d(),
            eye: [self.eye.x, self.eye.y, self.eye.z, 1.0],
        }
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, 5.0),
            center: Vec3::ZERO,
            up: Vec3::Y,
            yaw: -90.0,
            pitch: 0.0,
            fov_y: std::f32::consts::FRAC_PI_4, // 45 degrees
            near: 0.1,
            far: 1000.0,
            aspect: 800.0 / 600.0,
        }
    }
}
