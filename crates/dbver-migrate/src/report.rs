//! Results of a migration run or status check.

use dbver_core::{PendingVersion, SchemaVersion};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;

/// One version committed during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedVersion {
    /// Version recorded
    pub version: SchemaVersion,
    /// Statement files executed, in order
    pub files: Vec<PathBuf>,
    /// Wall time spent on the transaction
    pub elapsed: Duration,
}

/// Outcome of a successful [`Migrator::run`](crate::Migrator::run).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationReport {
    /// Version before the run
    pub from: SchemaVersion,
    /// Version after the run
    pub to: SchemaVersion,
    /// Versions applied, ascending
    pub applied: Vec<AppliedVersion>,
    /// Version directories left out because their name did not parse
    pub skipped_invalid: Vec<PathBuf>,
}

impl MigrationReport {
    /// True when nothing was pending.
    pub fn is_up_to_date(&self) -> bool {
        self.applied.is_empty()
    }
}

/// Read-only view of where the database stands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusReport {
    /// Current version, or `None` if the version table does not exist yet
    pub current: Option<SchemaVersion>,
    /// Versions a run would apply, ascending
    pub pending: Vec<PendingVersion>,
    /// Version directories whose name did not parse
    pub invalid: Vec<PathBuf>,
}
