//! Ordering of discovered version units and selection of pending ones.

use crate::error::{CoreError, CoreResult};
use crate::unit::{PendingVersion, VersionUnit};
use crate::version::{SchemaVersion, VersionTag};

/// What to do with directories whose name does not parse as `ver<N>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InvalidDirPolicy {
    /// Log a warning and leave the directory out of the run
    #[default]
    Skip,
    /// Abort discovery with [`CoreError::InvalidVersionDir`]
    Fail,
}

/// Apply the invalid-directory policy to a discovered list.
///
/// Returns the invalid units that were skipped. With
/// [`InvalidDirPolicy::Fail`] the first invalid unit becomes an error.
pub fn check_invalid(
    units: &[VersionUnit],
    policy: InvalidDirPolicy,
) -> CoreResult<Vec<VersionUnit>> {
    let invalid: Vec<VersionUnit> = units
        .iter()
        .filter(|u| !u.tag.is_valid())
        .cloned()
        .collect();

    if let Some(first) = invalid.first() {
        if policy == InvalidDirPolicy::Fail {
            return Err(CoreError::InvalidVersionDir {
                path: first.path.clone(),
            });
        }
    }
    for unit in &invalid {
        log::warn!(
            "Skipping directory not named ver<N> with N in 0..={}: {}",
            SchemaVersion::MAX,
            unit.path.display()
        );
    }
    Ok(invalid)
}

/// Sort units ascending by version and keep those strictly newer than
/// `current`.
///
/// The sort is stable, so two directories with the same version keep their
/// discovery order. Invalid units are always dropped.
pub fn select_pending(mut units: Vec<VersionUnit>, current: SchemaVersion) -> Vec<PendingVersion> {
    units.sort_by_key(|u| u.tag);
    warn_duplicates(&units);

    units
        .into_iter()
        .filter_map(|unit| match unit.tag {
            VersionTag::Valid(version) if version > current => Some(PendingVersion {
                version,
                path: unit.path,
            }),
            VersionTag::Valid(_) | VersionTag::Invalid => None,
        })
        .collect()
}

/// Warn about adjacent units that share a version number. Expects a sorted
/// slice.
fn warn_duplicates(sorted: &[VersionUnit]) {
    for pair in sorted.windows(2) {
        if let (VersionTag::Valid(a), VersionTag::Valid(b)) = (pair[0].tag, pair[1].tag) {
            if a == b {
                log::warn!(
                    "Version {a} is defined twice: {} and {}",
                    pair[0].path.display(),
                    pair[1].path.display()
                );
            }
        }
    }
}

#[cfg(test)]
#[path = "sequencer_test.rs"]
mod tests;
