//! Applies one version's statement files as a single transaction.

use crate::error::{MigrateError, MigrateResult};
use crate::report::AppliedVersion;
use crate::store::VersionStore;
use dbver_core::PendingVersion;
use dbver_db::{with_transaction, Database};
use std::path::PathBuf;
use std::time::Instant;

/// Execute every file in `files` and record `pending.version`, all inside
/// one transaction.
///
/// Each file's full contents are sent as one multi-statement batch, in the
/// order given. Any read, execution, or record failure rolls back the whole
/// transaction; the error is wrapped in [`MigrateError::VersionFailed`].
pub fn apply_version(
    db: &dyn Database,
    store: &VersionStore,
    pending: &PendingVersion,
    files: &[PathBuf],
) -> MigrateResult<AppliedVersion> {
    let version = pending.version;
    let start = Instant::now();

    with_transaction(db, |tx| {
        for file in files {
            let sql = std::fs::read_to_string(file).map_err(|e| MigrateError::Apply {
                version,
                file: file.clone(),
                message: format!("read failed: {e}"),
            })?;

            if sql.trim().is_empty() {
                log::debug!("Skipping empty file {}", file.display());
                continue;
            }

            log::debug!("Executing {} (version {version})", file.display());
            tx.execute_batch(&sql).map_err(|e| MigrateError::Apply {
                version,
                file: file.clone(),
                message: e.to_string(),
            })?;
        }
        store.record_version(tx, version)
    })
    .map_err(|e| MigrateError::VersionFailed {
        version,
        source: Box::new(e),
    })?;

    Ok(AppliedVersion {
        version,
        files: files.to_vec(),
        elapsed: start.elapsed(),
    })
}

#[cfg(test)]
#[path = "applier_test.rs"]
mod tests;
