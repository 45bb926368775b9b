use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration file not found at {path:?}")]
    NotFound { path: PathBuf },

    #[error("failed to read config from {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config from {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("temperature must be within 0.0..=2.0, got {0}")]
    InvalidTemperature(f32),

    #[error("coalescer window must be greater than zero")]
    InvalidWindow,

    #[error("max_turns must be at least 1")]
    InvalidTurnLimit,

    #[error("environment variable {var} has invalid value '{value}'")]
    InvalidEnv { var: String, value: String },

    #[error("cannot expand path '{path}': {reason}")]
    Expand { path: String, reason: String },
}
