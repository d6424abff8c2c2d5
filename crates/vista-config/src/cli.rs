//! Command-line argument parsing for the Vista viewer.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::{ArgAction, CommandFactory, Parser};

use crate::{Config, ConfigError};

/// Largest number of arguments (program name excluded) accepted on the
/// command line: `-h -w W H --log-level L --config D <model>`.
pub const MAX_ARGS: usize = 9;

/// Vista command-line arguments.
///
/// CLI values override settings loaded from `config.ron`. `-h` does not
/// exit: it prints usage and the viewer keeps starting.
#[derive(Parser, Debug, Default, Clone, PartialEq)]
#[command(
    name = "vista",
    about = "Interactive model viewer with shadow mapping",
    disable_help_flag = true
)]
pub struct CliArgs {
    /// Print usage and continue.
    #[arg(short = 'h', long = "help", action = ArgAction::SetTrue)]
    pub help: bool,

    /// Window size in pixels.
    #[arg(short = 'w', long = "window", num_args = 2, value_names = ["WIDTH", "HEIGHT"])]
    pub window: Option<Vec<u32>>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Model file to view (.obj, .gltf or .glb).
    pub model: Option<PathBuf>,
}

impl CliArgs {
    /// Parse from the process arguments.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::try_parse_args(std::env::args_os())
    }

    /// Parse an argument list whose first element is the program name.
    ///
    /// More than [`MAX_ARGS`] arguments, unknown flags, or a second model path
    /// are usage errors.
    pub fn try_parse_args<I, T>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
        let given = args.len().saturating_sub(1);
        if given > MAX_ARGS {
            return Err(ConfigError::Usage(format!(
                "number of given arguments not supported ({given} > {MAX_ARGS})\n{}",
                Self::usage()
            )));
        }
        Self::try_parse_from(args).map_err(|e| ConfigError::Usage(e.to_string()))
    }

    /// Rendered usage text.
    pub fn usage() -> String {
        Self::command().render_help().to_string()
    }

    /// Width and height from `-w`, if given.
    pub fn window_size(&self) -> Option<(u32, u32)> {
        match self.window.as_deref() {
            Some(&[width, height]) => Some((width, height)),
            _ => None,
        }
    }
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some((w, h)) = args.window_size() {
            self.window.width = w;
            self.window.height = h;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
        if let Some(ref model) = args.model {
            self.scene.model_path = Some(model.clone());
        }
    }
}
