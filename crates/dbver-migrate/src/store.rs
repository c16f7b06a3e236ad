//! Persisted schema version.
//!
//! The version table holds one row per applied version plus the seed row
//! `(0, now)` written when the table is created. The current version is the
//! maximum recorded value.

use crate::error::{MigrateError, MigrateResult};
use dbver_core::{SchemaVersion, VersionTable};
use dbver_db::{with_transaction, Database, DbError};
use serde::Serialize;

/// One row of the version table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionRecord {
    /// Applied version
    pub version: SchemaVersion,

    /// When the version was recorded, as rendered by the database
    pub applied_at: Option<String>,
}

/// Reads and writes the version table.
#[derive(Debug, Clone, Default)]
pub struct VersionStore {
    table: VersionTable,
}

impl VersionStore {
    /// Store backed by `table`.
    pub fn new(table: VersionTable) -> Self {
        Self { table }
    }

    /// The version table this store reads and writes.
    pub fn table(&self) -> &VersionTable {
        &self.table
    }

    /// Probe for the version table.
    pub fn exists(&self, db: &dyn Database) -> MigrateResult<bool> {
        db.relation_exists(self.table.schema(), self.table.table())
            .map_err(|e| {
                MigrateError::Store(format!("failed to probe for table {}: {e}", self.table))
            })
    }

    /// Create the version table and its seed row if the table is absent.
    ///
    /// Returns `true` when the table was created by this call.
    pub fn ensure_initialized(&self, db: &dyn Database) -> MigrateResult<bool> {
        if self.exists(db)? {
            log::debug!("Version table {} already exists", self.table);
            return Ok(false);
        }

        let table = self.table.quoted();
        let mut ddl = String::new();
        if let Some(schema) = self.table.schema() {
            ddl.push_str(&format!("CREATE SCHEMA IF NOT EXISTS \"{schema}\";\n"));
        }
        ddl.push_str(&format!(
            "CREATE TABLE {table} (
                 version BIGINT NOT NULL PRIMARY KEY,
                 addTime TIMESTAMP
             );
             INSERT INTO {table} (version, addTime) VALUES (0, now());"
        ));

        with_transaction(db, |tx| {
            tx.execute_batch(&ddl).map_err(|e| {
                MigrateError::Store(format!("failed to create version table {}: {e}", self.table))
            })
        })?;
        log::info!("Created version table {} at version 0", self.table);
        Ok(true)
    }

    /// Return the highest recorded version.
    pub fn current_version(&self, db: &dyn Database) -> MigrateResult<SchemaVersion> {
        let sql = format!(
            "SELECT CAST(MAX(version) AS BIGINT) FROM {}",
            self.table.quoted()
        );
        let max = db.query_scalar_i64(&sql).map_err(|e| match e {
            DbError::TableNotFound(_) => MigrateError::Store(format!(
                "version table {} does not exist; it has not been initialized",
                self.table
            )),
            other => MigrateError::Store(format!("failed to read schema version: {other}")),
        })?;

        let raw = max.ok_or_else(|| {
            MigrateError::Store(format!("version table {} has no records", self.table))
        })?;
        SchemaVersion::from_db(raw).ok_or_else(|| {
            MigrateError::Store(format!(
                "version table {} holds out-of-range version {raw}",
                self.table
            ))
        })
    }

    /// Insert a record for `version` on the caller's open transaction.
    ///
    /// Does not commit.
    pub fn record_version(&self, tx: &dyn Database, version: SchemaVersion) -> MigrateResult<()> {
        let sql = format!(
            "INSERT INTO {} (version, addTime) VALUES ({}, now())",
            self.table.quoted(),
            version.to_db()
        );
        tx.execute(&sql).map_err(|e| match e {
            DbError::ConstraintViolation(_) => MigrateError::Store(format!(
                "version {version} is already recorded in {}",
                self.table
            )),
            other => MigrateError::Store(format!("failed to record version {version}: {other}")),
        })?;
        Ok(())
    }

    /// All records, oldest version first.
    pub fn history(&self, db: &dyn Database) -> MigrateResult<Vec<VersionRecord>> {
        let sql = format!(
            "SELECT version, CAST(addTime AS VARCHAR) FROM {} ORDER BY version",
            self.table.quoted()
        );
        let rows = db
            .query_rows(&sql)
            .map_err(|e| MigrateError::Store(format!("failed to read version history: {e}")))?;

        rows.into_iter()
            .map(|row| {
                let raw = row.first().map(String::as_str).unwrap_or_default();
                let version = raw
                    .parse::<i64>()
                    .ok()
                    .and_then(SchemaVersion::from_db)
                    .ok_or_else(|| {
                        MigrateError::Store(format!("unreadable version value '{raw}'"))
                    })?;
                let applied_at = row.get(1).filter(|v| v.as_str() != "null").cloned();
                Ok(VersionRecord {
                    version,
                    applied_at,
                })
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
