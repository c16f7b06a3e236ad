//! dbver-migrate - Migration engine for dbver
//!
//! Reads the database's current schema version, discovers `ver<N>`
//! directories, and applies each pending version's SQL files together with
//! its version record in a single transaction, stopping at the first
//! failure.

pub mod applier;
pub mod error;
pub mod report;
pub mod runner;
pub mod store;

#[cfg(test)]
pub(crate) mod test_utils;

pub use applier::apply_version;
pub use error::{ErrorKind, MigrateError, MigrateResult};
pub use report::{AppliedVersion, MigrationReport, StatusReport};
pub use runner::{connect, Migrator, MigratorOptions};
pub use store::{VersionRecord, VersionStore};
