//! Filesystem discovery of version directories and their SQL files.
//!
//! Both walks are depth-first with entries sorted by file name at every
//! level, so the returned order is stable across runs and platforms. Each
//! call returns a fresh owned list.

use crate::error::{CoreError, CoreResult};
use crate::unit::VersionUnit;
use crate::version::VERSION_DIR_PREFIX;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// File suffix for statement files.
pub const SQL_FILE_SUFFIX: &str = ".sql";

/// Verify the SQL root exists and is a directory.
pub fn check_root(root: &Path) -> CoreResult<()> {
    let meta = match std::fs::metadata(root) {
        Ok(meta) => meta,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(CoreError::PathNotFound {
                path: root.to_path_buf(),
            });
        }
        Err(e) => {
            return Err(CoreError::IoWithPath {
                path: root.display().to_string(),
                source: e,
            });
        }
    };
    if !meta.is_dir() {
        return Err(CoreError::NotADirectory {
            path: root.to_path_buf(),
        });
    }
    Ok(())
}

/// Find every directory under `root` (at any depth, `root` included) whose
/// name starts with `ver`.
///
/// Names that do not parse to a version still produce a unit, tagged
/// [`VersionTag::Invalid`](crate::VersionTag::Invalid), so callers can decide
/// how to report them.
pub fn list_version_units(root: &Path) -> CoreResult<Vec<VersionUnit>> {
    let paths = walk_sorted(root, |entry| {
        entry.file_type().is_dir() && file_name(entry).starts_with(VERSION_DIR_PREFIX)
    })?;
    let units: Vec<VersionUnit> = paths.into_iter().map(VersionUnit::from_path).collect();
    log::debug!(
        "Discovered {} version director{} under {}",
        units.len(),
        if units.len() == 1 { "y" } else { "ies" },
        root.display()
    );
    Ok(units)
}

/// List the `.sql` files inside a unit's directory, at any depth, in
/// execution order.
pub fn list_statement_files(unit: &VersionUnit) -> CoreResult<Vec<PathBuf>> {
    list_sql_files(&unit.path)
}

/// List the `.sql` files under `dir` in walk order.
pub fn list_sql_files(dir: &Path) -> CoreResult<Vec<PathBuf>> {
    walk_sorted(dir, |entry| {
        !entry.file_type().is_dir() && file_name(entry).ends_with(SQL_FILE_SUFFIX)
    })
}

/// Walk `root` depth-first and collect the paths of entries matching
/// `keep`. Any walk error aborts the whole listing.
fn walk_sorted<F>(root: &Path, keep: F) -> CoreResult<Vec<PathBuf>>
where
    F: Fn(&DirEntry) -> bool,
{
    let mut found = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|source| CoreError::Discovery {
            root: root.to_path_buf(),
            source,
        })?;
        if keep(&entry) {
            found.push(entry.into_path());
        }
    }
    Ok(found)
}

fn file_name(entry: &DirEntry) -> std::borrow::Cow<'_, str> {
    entry.file_name().to_string_lossy()
}

#[cfg(test)]
#[path = "discovery_test.rs"]
mod tests;
