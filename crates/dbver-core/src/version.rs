//! Schema version numbers and the tag parsed from a version directory name.

use serde::Serialize;
use std::fmt;

/// Directory-name prefix that marks a version directory (`ver12`).
pub const VERSION_DIR_PREFIX: &str = "ver";

/// A non-negative migration level as recorded in the version table.
///
/// Always fits the table's `BIGINT` column: the value never exceeds
/// `i64::MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct SchemaVersion(u64);

impl SchemaVersion {
    /// The seed version written when the version table is created.
    pub const ZERO: SchemaVersion = SchemaVersion(0);

    /// The largest version the version table can hold.
    pub const MAX: SchemaVersion = SchemaVersion(i64::MAX as u64);

    /// Wrap a raw version number.
    pub const fn new(value: u32) -> Self {
        Self(value as u64)
    }

    /// The raw version number.
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Convert a value read back from the database.
    ///
    /// Returns `None` for negative values.
    pub fn from_db(value: i64) -> Option<Self> {
        u64::try_from(value).ok().map(Self)
    }

    /// Parse the digits after the `ver` prefix.
    fn parse_suffix(digits: &str) -> Option<Self> {
        digits
            .parse::<u64>()
            .ok()
            .filter(|n| *n <= Self::MAX.0)
            .map(Self)
    }

    /// The value as bound into SQL.
    pub fn to_db(self) -> i64 {
        // Lossless: the constructors keep the value within `i64::MAX`.
        self.0 as i64
    }
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for SchemaVersion {
    fn from(value: u32) -> Self {
        Self::new(value)
    }
}

/// Version parsed from a directory name.
///
/// `Invalid` orders before every valid version, but callers must exclude it
/// explicitly; it is never applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum VersionTag {
    /// The directory name did not parse as `ver<N>`.
    Invalid,
    /// A well-formed version directory.
    Valid(SchemaVersion),
}

impl VersionTag {
    /// Parse a directory name such as `ver3`.
    ///
    /// The `ver` prefix is stripped once and the remainder must be an
    /// integer in `0..=SchemaVersion::MAX`. Anything else, including a
    /// number too large for the version table, yields
    /// [`VersionTag::Invalid`].
    pub fn from_dir_name(name: &str) -> Self {
        name.strip_prefix(VERSION_DIR_PREFIX)
            .and_then(SchemaVersion::parse_suffix)
            .map_or(VersionTag::Invalid, VersionTag::Valid)
    }

    /// The version if this tag is valid.
    pub fn version(self) -> Option<SchemaVersion> {
        match self {
            VersionTag::Valid(v) => Some(v),
            VersionTag::Invalid => None,
        }
    }

    /// Returns true for [`VersionTag::Valid`].
    pub fn is_valid(self) -> bool {
        matches!(self, VersionTag::Valid(_))
    }
}

impl fmt::Display for VersionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionTag::Valid(v) => write!(f, "{v}"),
            VersionTag::Invalid => write!(f, "invalid"),
        }
    }
}

#[cfg(test)]
#[path = "version_test.rs"]
mod tests;
