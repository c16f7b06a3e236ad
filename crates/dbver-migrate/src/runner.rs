//! Migration orchestration.
//!
//! A run moves through `Init -> Connected -> VersionKnown -> Applying(v)...
//! -> Done`, or to `Failed` from any of them. Versions are applied strictly
//! in ascending order and the first failure ends the run; versions already
//! committed stay applied.

use crate::applier::apply_version;
use crate::error::{MigrateError, MigrateResult};
use crate::report::{MigrationReport, StatusReport};
use crate::store::VersionStore;
use dbver_core::discovery::{check_root, list_sql_files, list_version_units};
use dbver_core::{
    check_invalid, select_pending, Config, ConnectionConfig, InvalidDirPolicy, PendingVersion,
    SchemaVersion,
};
use dbver_db::{Database, DuckDbBackend};
use std::fmt;
use std::path::{Path, PathBuf};

/// Open the database described by `conn`.
///
/// The DuckDB backend opens the database name as a file (`:memory:` for an
/// in-memory database); host and credentials only appear in the logged DSN.
pub fn connect(conn: &ConnectionConfig) -> MigrateResult<DuckDbBackend> {
    log::debug!("Connecting to {}", conn.redacted_dsn());
    DuckDbBackend::new(conn.name()).map_err(|source| MigrateError::Connectivity {
        target: conn.redacted_dsn(),
        source,
    })
}

/// Settings for a [`Migrator`].
#[derive(Debug, Clone)]
pub struct MigratorOptions {
    /// Root directory searched for `ver<N>` directories
    pub sql_root: PathBuf,
    /// Handling of directories whose name does not parse
    pub invalid_dirs: InvalidDirPolicy,
}

impl MigratorOptions {
    /// Options rooted at `sql_root` with the default policy.
    pub fn new(sql_root: impl Into<PathBuf>) -> Self {
        Self {
            sql_root: sql_root.into(),
            invalid_dirs: InvalidDirPolicy::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunState {
    Init,
    Connected,
    VersionKnown(SchemaVersion),
    Applying(SchemaVersion),
    Done(SchemaVersion),
    Failed,
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunState::Init => write!(f, "Init"),
            RunState::Connected => write!(f, "Connected"),
            RunState::VersionKnown(v) => write!(f, "VersionKnown({v})"),
            RunState::Applying(v) => write!(f, "Applying({v})"),
            RunState::Done(v) => write!(f, "Done({v})"),
            RunState::Failed => write!(f, "Failed"),
        }
    }
}

/// Applies pending version directories to a database.
#[derive(Debug, Clone)]
pub struct Migrator {
    options: MigratorOptions,
    store: VersionStore,
}

impl Migrator {
    /// Create a migrator. Fails with a path error if the SQL root is missing
    /// or is not a directory.
    pub fn new(options: MigratorOptions, store: VersionStore) -> MigrateResult<Self> {
        check_root(&options.sql_root)?;
        Ok(Self { options, store })
    }

    /// Build a migrator from loaded configuration.
    pub fn from_config(config: &Config) -> MigrateResult<Self> {
        let options = MigratorOptions {
            sql_root: config.sql_path.clone(),
            invalid_dirs: if config.strict {
                InvalidDirPolicy::Fail
            } else {
                InvalidDirPolicy::Skip
            },
        };
        Self::new(options, VersionStore::new(config.version_table()?))
    }

    /// The version store used by this migrator.
    pub fn store(&self) -> &VersionStore {
        &self.store
    }

    /// Root directory searched for version directories.
    pub fn sql_root(&self) -> &Path {
        &self.options.sql_root
    }

    /// Open the database described by `conn` and bring it up to the newest
    /// discovered version.
    ///
    /// A connection failure ends the run before any SQL file is read.
    pub fn connect_and_run(&self, conn: &ConnectionConfig) -> MigrateResult<MigrationReport> {
        let mut state = RunState::Init;
        let db = connect(conn).map_err(|err| fail(&mut state, err))?;
        transition(&mut state, RunState::Connected);
        self.run_connected(&db, state)
    }

    /// Bring an already open `db` up to the newest discovered version.
    ///
    /// Creates the version table if needed, then applies every pending
    /// version in ascending order, one transaction each. Stops at the first
    /// failure.
    pub fn run(&self, db: &dyn Database) -> MigrateResult<MigrationReport> {
        let mut state = RunState::Init;
        transition(&mut state, RunState::Connected);
        self.run_connected(db, state)
    }

    fn run_connected(
        &self,
        db: &dyn Database,
        mut state: RunState,
    ) -> MigrateResult<MigrationReport> {
        log::debug!("Migrating {} database", db.db_type());
        self.run_from_connected(db, &mut state)
            .map_err(|err| fail(&mut state, err))
    }

    fn run_from_connected(
        &self,
        db: &dyn Database,
        state: &mut RunState,
    ) -> MigrateResult<MigrationReport> {
        self.store.ensure_initialized(db)?;
        let current = self.store.current_version(db)?;
        log::info!("Current schema version: {current}");
        transition(state, RunState::VersionKnown(current));

        let (pending, skipped_invalid) = self.discover(current, self.options.invalid_dirs)?;
        let mut report = MigrationReport {
            from: current,
            to: current,
            applied: Vec::with_capacity(pending.len()),
            skipped_invalid,
        };

        for unit in &pending {
            transition(state, RunState::Applying(unit.version));
            let files = list_sql_files(&unit.path).map_err(|e| MigrateError::VersionFailed {
                version: unit.version,
                source: Box::new(e.into()),
            })?;
            log::info!(
                "Applying version {} ({} file{})",
                unit.version,
                files.len(),
                if files.len() == 1 { "" } else { "s" }
            );

            let applied = apply_version(db, &self.store, unit, &files)?;
            report.to = applied.version;
            report.applied.push(applied);
        }

        transition(state, RunState::Done(report.to));
        Ok(report)
    }

    /// Report the current version and what a run would apply, without
    /// changing the database.
    pub fn status(&self, db: &dyn Database) -> MigrateResult<StatusReport> {
        let current = if self.store.exists(db)? {
            Some(self.store.current_version(db)?)
        } else {
            None
        };

        let floor = current.unwrap_or(SchemaVersion::ZERO);
        let (pending, invalid) = self.discover(floor, InvalidDirPolicy::Skip)?;
        Ok(StatusReport {
            current,
            pending,
            invalid,
        })
    }

    /// Discover version units and select those newer than `current`.
    fn discover(
        &self,
        current: SchemaVersion,
        policy: InvalidDirPolicy,
    ) -> MigrateResult<(Vec<PendingVersion>, Vec<PathBuf>)> {
        let units = list_version_units(&self.options.sql_root)?;
        let invalid = check_invalid(&units, policy)?
            .into_iter()
            .map(|u| u.path)
            .collect();
        let pending = select_pending(units, current);
        log::debug!("{} pending version(s) above {current}", pending.len());
        Ok((pending, invalid))
    }
}

fn transition(state: &mut RunState, next: RunState) {
    log::debug!("Migration state: {state} -> {next}");
    *state = next;
}

fn fail(state: &mut RunState, err: MigrateError) -> MigrateError {
    log::error!("Migration failed in state {state}: {err}");
    transition(state, RunState::Failed);
    err
}

#[cfg(test)]
#[path = "runner_test.rs"]
mod tests;
