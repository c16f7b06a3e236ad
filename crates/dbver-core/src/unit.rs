//! Version directories discovered on disk.

use crate::version::{SchemaVersion, VersionTag};
use serde::Serialize;
use std::path::PathBuf;

/// A directory whose name starts with `ver`, found during discovery.
///
/// Units are rebuilt on every run and never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionUnit {
    /// Version parsed from the directory name
    pub tag: VersionTag,

    /// Directory name as found on disk
    pub name: String,

    /// Full path to the directory
    pub path: PathBuf,
}

impl VersionUnit {
    /// Build a unit from a directory path, parsing its name.
    pub fn from_path(path: PathBuf) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            tag: VersionTag::from_dir_name(&name),
            name,
            path,
        }
    }
}

/// A unit selected for application: the version is known to be valid and
/// greater than the database's current version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PendingVersion {
    /// Version that will be recorded once the unit commits
    pub version: SchemaVersion,

    /// Directory holding the unit's SQL files
    pub path: PathBuf,
}
