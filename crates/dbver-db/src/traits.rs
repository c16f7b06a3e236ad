//! Database trait definition

use crate::error::{DbError, DbResult};

/// Database abstraction trait for dbver
///
/// Calls block until the engine answers. Implementations hold a single
/// connection, so at most one transaction is open at a time.
pub trait Database {
    /// Execute one SQL statement, returns affected rows
    fn execute(&self, sql: &str) -> DbResult<usize>;

    /// Execute multiple semicolon-separated SQL statements in one call
    fn execute_batch(&self, sql: &str) -> DbResult<()>;

    /// Check if a table or view exists. `schema` defaults to the
    /// backend's default schema.
    fn relation_exists(&self, schema: Option<&str>, name: &str) -> DbResult<bool>;

    /// Run a query returning a single (possibly NULL) integer
    fn query_scalar_i64(&self, sql: &str) -> DbResult<Option<i64>>;

    /// Run a query and return every row with values coerced to strings
    fn query_rows(&self, sql: &str) -> DbResult<Vec<Vec<String>>>;

    /// Database type identifier for logging
    fn db_type(&self) -> &'static str;

    /// Open a transaction
    fn begin(&self) -> DbResult<()> {
        self.execute_batch("BEGIN TRANSACTION")
            .map_err(|e| DbError::TransactionError(format!("BEGIN failed: {e}")))
    }

    /// Commit the open transaction
    fn commit(&self) -> DbResult<()> {
        self.execute_batch("COMMIT")
            .map_err(|e| DbError::TransactionError(format!("COMMIT failed: {e}")))
    }

    /// Roll back the open transaction
    fn rollback(&self) -> DbResult<()> {
        self.execute_batch("ROLLBACK")
            .map_err(|e| DbError::TransactionError(format!("ROLLBACK failed: {e}")))
    }
}

/// Execute `body` within a `BEGIN` / `COMMIT` transaction, rolling back on
/// error.
///
/// Every exit path ends the transaction: `Ok` commits (rolling back if the
/// commit itself fails) and `Err` rolls back before the error is returned.
pub fn with_transaction<D, T, E, F>(db: &D, body: F) -> Result<T, E>
where
    D: Database + ?Sized,
    E: From<DbError>,
    F: FnOnce(&D) -> Result<T, E>,
{
    db.begin()?;

    let result = body(db);

    match &result {
        Ok(_) => {
            if let Err(commit_err) = db.commit() {
                if let Err(rollback_err) = db.rollback() {
                    log::warn!("Rollback after failed commit also failed: {rollback_err}");
                }
                return Err(commit_err.into());
            }
        }
        Err(_) => {
            if let Err(rollback_err) = db.rollback() {
                log::warn!("Rollback failed: {rollback_err}");
            }
        }
    }
    result
}
