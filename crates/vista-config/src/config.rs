//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level viewer configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Window settings.
    pub window: WindowConfig,
    /// Camera placement, projection and FPS controls.
    pub camera: CameraConfig,
    /// Trackball rotation tuning.
    pub trackball: TrackballConfig,
    /// Directional light and its shadow map.
    pub light: LightConfig,
    /// Model, ground and sky.
    pub scene: SceneConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Window configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    /// Window width in physical pixels.
    pub width: u32,
    /// Window height in physical pixels.
    pub height: u32,
    /// Window title.
    pub title: String,
}

/// Camera configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    /// Initial eye position.
    pub eye: [f32; 3],
    /// Initial look-at point.
    pub center: [f32; 3],
    /// Vertical field of view in degrees.
    pub fov_y_degrees: f32,
    /// Near clip plane distance.
    pub near: f32,
    /// Far clip plane distance.
    pub far: f32,
    /// FPS look: degrees of yaw/pitch per pixel of mouse motion.
    pub mouse_sensitivity: f32,
    /// FPS movement speed in world units per second.
    pub move_speed: f32,
}

/// Trackball configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TrackballConfig {
    /// Divisor applied to the angle between two sphere points.
    pub damping: f32,
    /// Rotation axes shorter than this are ignored.
    pub axis_epsilon: f32,
}

/// Directional light configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LightConfig {
    /// Position the shadow camera looks from.
    pub position: [f32; 3],
    /// Point the light shines at.
    pub target: [f32; 3],
    /// Linear RGB color.
    pub color: [f32; 3],
    /// Scalar intensity multiplier.
    pub intensity: f32,
    /// Half-size of the orthographic shadow volume.
    pub shadow_extent: f32,
    /// Near plane of the shadow volume.
    pub shadow_near: f32,
    /// Far plane of the shadow volume.
    pub shadow_far: f32,
    /// Shadow map width and height in texels.
    pub shadow_resolution: u32,
    /// Depth offset applied before the shadow comparison.
    pub shadow_bias: f32,
}

/// Scene configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SceneConfig {
    /// Model to load when none is given on the command line.
    pub model_path: Option<PathBuf>,
    /// Accumulate node transforms while flattening the node tree.
    pub apply_node_transforms: bool,
    /// Base color of the model.
    pub model_color: [f32; 3],
    /// Base color of the ground plane.
    pub ground_color: [f32; 3],
    /// Height of the ground plane.
    pub ground_height: f32,
    /// Half-size of the ground plane.
    pub ground_half_size: f32,
    /// Arrow-key translation per press.
    pub translate_step: f32,
    /// Scale factor applied by `S`.
    pub scale_down: f32,
    /// Scale factor applied by `Shift+S`.
    pub scale_up: f32,
    /// Directory with `.wgsl` files overriding the built-in shaders.
    pub shader_dir: Option<PathBuf>,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

// --- Default implementations ---

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            title: "Vista".to_string(),
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            eye: [0.0, 0.0, 5.0],
            center: [0.0, 0.0, 0.0],
            fov_y_degrees: 45.0,
            near: 0.1,
            far: 1000.0,
            mouse_sensitivity: 0.1,
            move_speed: 10.0,
        }
    }
}

impl Default for TrackballConfig {
    fn default() -> Self {
        Self {
            damping: 15.0,
            axis_epsilon: 1e-4,
        }
    }
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            position: [5.0, 5.0, 0.0],
            target: [0.0, 0.0, 0.0],
            color: [1.0, 0.96, 0.90],
            intensity: 1.0,
            shadow_extent: 10.0,
            shadow_near: 0.5,
            shadow_far: 50.0,
            shadow_resolution: 2048,
            shadow_bias: 0.002,
        }
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            model_path: None,
            apply_node_transforms: false,
            model_color: [0.72, 0.72, 0.75],
            ground_color: [0.35, 0.45, 0.30],
            ground_height: -1.5,
            ground_half_size: 25.0,
            translate_step: 1.0,
            scale_down: 0.9,
            scale_up: 1.1,
            shader_dir: None,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

// --- Load / Save / Reload ---

fn read_config(path: &Path) -> Result<Config, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    ron::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join("config.ron");

        if config_path.exists() {
            let config = read_config(&config_path)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(|source| ConfigError::Write {
            path: config_dir.to_path_buf(),
            source,
        })?;

        let config_path = config_dir.join("config.ron");
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized = ron::ser::to_string_pretty(self, pretty)?;
        std::fs::write(&config_path, serialized).map_err(|source| ConfigError::Write {
            path: config_path.clone(),
            source,
        })?;
        Ok(())
    }

    /// Re-read the file: returns `Some(new_config)` if it changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let config_path = config_dir.join("config.ron");
        let new_config = read_config(&config_path)?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }
}
