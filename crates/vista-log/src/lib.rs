//! Structured logging for the Vista viewer.
//!
//! Console output with uptime timestamps and module paths, plus a JSON log file
//! in debug builds. Library crates log through the `log` facade; those records
//! are forwarded into the same subscriber.

use std::path::Path;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use vista_config::Config;

/// Filter used when neither `RUST_LOG` nor the config specify one.
pub const DEFAULT_FILTER: &str = "info,wgpu=warn,naga=warn";

/// File name of the JSON log written in debug builds.
pub const LOG_FILE_NAME: &str = "vista.log";

/// Initialize the global tracing subscriber.
///
/// * `log_dir` - directory for the JSON log file (debug builds only)
/// * `debug_build` - enables the file layer
/// * `config` - supplies `debug.log_level` when `RUST_LOG` is unset
///
/// Calling this twice is harmless: the second attempt is ignored.
pub fn init_logging(log_dir: Option<&Path>, debug_build: bool, config: Option<&Config>) {
    let filter_str = filter_from_config(config);

    // RUST_LOG wins over the config value
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter_str));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_level(true)
        .with_timer(fmt::time::uptime());

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer);

    if debug_build
        && let Some(log_dir) = log_dir
        && std::fs::create_dir_all(log_dir).is_ok()
        && let Ok(log_file) = std::fs::File::create(log_dir.join(LOG_FILE_NAME))
    {
        let file_layer = fmt::layer()
            .with_writer(log_file)
            .with_ansi(false)
            .with_target(true)
            .with_timer(fmt::time::uptime())
            .json();

        let _ = subscriber.with(file_layer).try_init();
        return;
    }

    let _ = subscriber.try_init();
}

/// The filter directive derived from the config's `debug.log_level`.
///
/// A bare level such as `"debug"` keeps wgpu and naga at `warn`.
pub fn filter_from_config(config: Option<&Config>) -> String {
    match config.map(|c| c.debug.log_level.trim()) {
        Some(level) if !level.is_empty() && !level.contains('=') => {
            format!("{level},wgpu=warn,naga=warn")
        }
        Some(level) if !level.is_empty() => level.to_string(),
        _ => DEFAULT_FILTER.to_string(),
    }
}

/// Create an `EnvFilter` with the default filter string.
pub fn default_env_filter() -> EnvFilter {
    EnvFilter::new(DEFAULT_FILTER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_log_level() {
        let filter_str = format!("{}", default_env_filter());
        assert!(filter_str.contains("wgpu=warn"));
        assert!(filter_str.contains("naga=warn"));
        assert!(filter_str.contains("info"));
    }

    #[test]
    fn test_filter_without_config_is_default() {
        assert_eq!(filter_from_config(None), DEFAULT_FILTER);
    }

    #[test]
    fn test_bare_level_keeps_gpu_noise_down() {
        let mut config = Config::default();
        config.debug.log_level = "debug".to_string();
        assert_eq!(
            filter_from_config(Some(&config)),
            "debug,wgpu=warn,naga=warn"
        );
    }

    #[test]
    fn test_directive_list_passed_through() {
        let mut config = Config::default();
        config.debug.log_level = "warn,vista_render=trace".to_string();
        assert_eq!(filter_from_config(Some(&config)), "warn,vista_render=trace");
    }

    #[test]
    fn test_empty_level_falls_back_to_default() {
        let mut config = Config::default();
        config.debug.log_level = "  ".to_string();
        assert_eq!(filter_from_config(Some(&config)), DEFAULT_FILTER);
    }

    #[test]
    fn test_env_filter_parsing() {
        let valid_filters = [
            "info",
            "debug,vista_render=trace",
            "warn,vista_import=debug,vista_scene=trace",
            "error",
        ];

        for filter_str in &valid_filters {
            let result = EnvFilter::try_from(*filter_str);
            assert!(result.is_ok(), "Failed to parse filter: {}", filter_str);
        }
    }

    #[test]
    fn test_file_logger_creation() {
        let temp_dir = tempfile::tempdir().unwrap();
        let log_dir = temp_dir.path().join("logs");
        init_logging(Some(&log_dir), true, Some(&Config::default()));
        assert!(log_dir.join(LOG_FILE_NAME).exists());
    }
}
