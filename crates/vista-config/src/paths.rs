//! OS-specific directory resolution.

use std::path::{Path, PathBuf};

use crate::ConfigError;

/// Directory name used under the OS config and data roots.
pub const APP_NAME: &str = "vista";

/// `<config_dir>/vista`, e.g. `~/.config/vista` on Linux.
pub fn default_config_dir() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|base| base.join(APP_NAME))
        .ok_or(ConfigError::NoConfigDir)
}

/// Log directory: `<data_local_dir>/vista/logs`, falling back to `<config>/logs`.
pub fn default_log_dir(config_dir: &Path) -> PathBuf {
    dirs::data_local_dir()
        .map(|base| base.join(APP_NAME))
        .unwrap_or_else(|| config_dir.to_path_buf())
        .join("logs")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_dir_ends_with_app_name() {
        let Ok(dir) = default_config_dir() else {
            return;
        };
        assert!(dir.ends_with(APP_NAME));
        assert!(dir.is_absolute());
    }

    #[test]
    fn test_log_dir_ends_with_logs() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = default_log_dir(tmp.path());
        assert_eq!(dir.file_name().unwrap(), "logs");
    }
}
