//! dbver-core - Core library for dbver
//!
//! This crate provides the version types, filesystem discovery of version
//! directories and their SQL files, ordering of pending versions, and the
//! configuration layer shared by the migration engine and the CLI.

pub mod config;
pub mod discovery;
pub mod error;
pub mod sequencer;
pub mod unit;
pub mod version;

pub use config::{Config, ConnectionConfig, VersionTable};
pub use discovery::{check_root, list_statement_files, list_version_units};
pub use error::{CoreError, CoreResult};
pub use sequencer::{check_invalid, select_pending, InvalidDirPolicy};
pub use unit::{PendingVersion, VersionUnit};
pub use version::{SchemaVersion, VersionTag};
