//! Configuration system for the Vista viewer.
//!
//! Settings persist to disk as a RON file and can be overridden from the
//! command line. Every section is `#[serde(default)]`, so older or partial
//! files keep loading as new settings appear.

mod cli;
mod config;
mod error;
mod paths;

pub use cli::{CliArgs, MAX_ARGS};
pub use config::{
    CameraConfig, Config, DebugConfig, LightConfig, SceneConfig, TrackballConfig, WindowConfig,
};
pub use error::ConfigError;
pub use paths::{APP_NAME, default_config_dir, default_log_dir};
