//! Error types for dbver-core

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for dbver
#[derive(Error, Debug)]
pub enum CoreError {
    /// C001: Configuration file not found
    #[error("[C001] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// C002: Failed to parse configuration file
    #[error("[C002] Failed to parse config: {message}")]
    ConfigParseError { message: String },

    /// C003: Invalid configuration value
    #[error("[C003] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// C004: SQL root path does not exist
    #[error("[C004] SQL path not found: {}", path.display())]
    PathNotFound { path: PathBuf },

    /// C005: SQL root path is not a directory
    #[error("[C005] SQL path is not a directory: {}", path.display())]
    NotADirectory { path: PathBuf },

    /// C006: Filesystem walk failed during discovery
    #[error("[C006] Discovery failed under {}", root.display())]
    Discovery {
        root: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    /// C007: Version directory name does not parse (strict mode only)
    #[error("[C007] Invalid version directory name: {} (expected ver<N>)", path.display())]
    InvalidVersionDir { path: PathBuf },

    /// C008: IO error with path context
    #[error("[C008] IO error at {path}")]
    IoWithPath {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;

impl From<serde_yaml::Error> for CoreError {
    fn from(err: serde_yaml::Error) -> Self {
        CoreError::ConfigParseError {
            message: err.to_string(),
        }
    }
}
