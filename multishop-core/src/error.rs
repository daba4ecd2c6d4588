//! Structured error types for multishop-core.
//!
//! Library crates get typed errors; the `multishop` binary wraps them
//! with `anyhow` context.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for multishop-core operations
#[derive(Error, Debug)]
pub enum CoreError {
    /// Config file exists but could not be read
    #[error("Failed to read config file {path:?}: {source}")]
    Io { path: PathBuf, source: io::Error },

    /// Config file is not valid TOML for `ShopConfig`
    #[error("Invalid config file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// An override (environment or flag) could not be parsed
    #[error("Invalid value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Result type alias for multishop-core operations
pub type Result<T> = std::result::Result<T, CoreError>;

impl CoreError {
    /// Create an invalid value error
    pub fn invalid_value(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            key: key.into(),
            reason: reason.into(),
        }
    }
}
