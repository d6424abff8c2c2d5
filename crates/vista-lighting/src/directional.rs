//! Directional light: the single sun-like light of the scene.
//!
//! [`DirectionalLight`] is the CPU-side description; [`DirectionalLightUniform`]
//! is the packed form embedded in the shadow uniform read by the lit shader.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// Invalid light parameters.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum LightError {
    /// Light position and target coincide, so there is no direction.
    #[error("directional light direction must not be zero (got {0:?})")]
    ZeroDirection(Vec3),
}

/// CPU-side directional light description.
///
/// Static for the whole run: built once at scene setup.
#[derive(Clone, Debug, PartialEq)]
pub struct DirectionalLight {
    /// Normalized direction vector pointing FROM the light (toward the scene).
    pub direction: Vec3,
    /// Linear RGB color of the light (not premultiplied by intensity).
    pub color: Vec3,
    /// Scalar intensity multiplier.
    pub intensity: f32,
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self {
            // From (5, 5, 0) toward the origin.
            direction: Vec3::new(-1.0, -1.0, 0.0).normalize(),
            color: Vec3::new(1.0, 0.96, 0.90),
            intensity: 1.0,
        }
    }
}

impl DirectionalLight {
    /// Light shining from `position` toward `target`.
    pub fn looking_at(
        position: Vec3,
        target: Vec3,
        color: Vec3,
        intensity: f32,
    ) -> Result<Self, LightError> {
        let mut light = Self {
            color,
            intensity,
            ..Self::default()
        };
        light.set_direction(target - position)?;
        Ok(light)
    }

    /// Set the light direction, normalizing the input.
    pub fn set_direction(&mut self, dir: Vec3) -> Result<(), LightError> {
        let len = dir.length();
        if !(len > 1e-6) {
            return Err(LightError::ZeroDirection(dir));
        }
        self.direction = dir / len;
        Ok(())
    }

    /// Build the GPU-side uniform from this light's properties.
    pub fn to_uniform(&self) -> DirectionalLightUniform {
        DirectionalLightUniform {
            direction_intensity: [
                self.direction.x,
                self.direction.y,
                self.direction.z,
                self.intensity,
            ],
            color_padding: [self.color.x, self.color.y, self.color.z, 0.0],
        }
    }
}

/// GPU-side representation, 32 bytes, std140-compatible.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct DirectionalLightUniform {
    /// xyz = direction (normalized), w = intensity.
    pub direction_intensity: [f32; 4],
    /// xyz = color (linear RGB), w = padding.
    pub color_padding: [f32; 4],
}
