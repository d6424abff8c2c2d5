//! Configuration error types.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// `config.ron` exists but is not valid RON for [`Config`](crate::Config).
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] ron::Error),

    /// Bad command line; the message includes the usage text.
    #[error("invalid usage: {0}")]
    Usage(String),

    #[error("could not determine OS configuration directory")]
    NoConfigDir,
}
