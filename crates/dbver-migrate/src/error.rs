//! Error types for the migration engine.

use dbver_core::{CoreError, SchemaVersion};
use dbver_db::DbError;
use std::path::PathBuf;
use thiserror::Error;

/// Migration errors.
#[derive(Error, Debug)]
pub enum MigrateError {
    /// Configuration, path, or discovery failure from dbver-core.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Could not open the database (M001).
    #[error("[M001] Cannot connect to database {target}")]
    Connectivity {
        target: String,
        #[source]
        source: DbError,
    },

    /// Version table missing, unreadable, or rejected a record (M002).
    #[error("[M002] Version store error: {0}")]
    Store(String),

    /// A statement file could not be read or executed (M003).
    #[error("[M003] Failed to apply {}: {message}", file.display())]
    Apply {
        version: SchemaVersion,
        file: PathBuf,
        message: String,
    },

    /// Transaction control failed (M004).
    #[error("[M004] Transaction failed")]
    Transaction(#[from] DbError),

    /// Any failure while a version was being applied (M005).
    #[error("[M005] Migration to version {version} failed")]
    VersionFailed {
        version: SchemaVersion,
        #[source]
        source: Box<MigrateError>,
    },
}

/// Result type alias for [`MigrateError`].
pub type MigrateResult<T> = Result<T, MigrateError>;

/// Coarse classification of a failure, used for reporting and exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing or invalid configuration
    Config,
    /// SQL root missing or not a directory
    Path,
    /// Database unreachable
    Connectivity,
    /// Version table missing or record conflict
    Store,
    /// Filesystem walk failure or rejected directory name
    Discovery,
    /// Statement file failed to read or execute
    Apply,
}

impl ErrorKind {
    /// Classify a [`CoreError`].
    pub fn of_core(err: &CoreError) -> Self {
        match err {
            CoreError::ConfigNotFound { .. }
            | CoreError::ConfigParseError { .. }
            | CoreError::ConfigInvalid { .. } => ErrorKind::Config,
            CoreError::PathNotFound { .. }
            | CoreError::NotADirectory { .. }
            | CoreError::IoWithPath { .. } => ErrorKind::Path,
            CoreError::Discovery { .. } | CoreError::InvalidVersionDir { .. } => {
                ErrorKind::Discovery
            }
        }
    }
}

impl MigrateError {
    /// Classify this error. [`MigrateError::VersionFailed`] reports the kind
    /// of the failure it wraps.
    pub fn kind(&self) -> ErrorKind {
        match self {
            MigrateError::Core(core) => ErrorKind::of_core(core),
            MigrateError::Connectivity { .. } => ErrorKind::Connectivity,
            MigrateError::Store(_) => ErrorKind::Store,
            MigrateError::Apply { .. } | MigrateError::Transaction(_) => ErrorKind::Apply,
            MigrateError::VersionFailed { source, .. } => source.kind(),
        }
    }

    /// The version being applied when the error occurred, if any.
    pub fn version(&self) -> Option<SchemaVersion> {
        match self {
            MigrateError::VersionFailed { version, .. } | MigrateError::Apply { version, .. } => {
                Some(*version)
            }
            _ => None,
        }
    }
}
