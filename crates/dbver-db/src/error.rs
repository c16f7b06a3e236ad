//! Error types for dbver-db

use thiserror::Error;

/// Database operation errors
#[derive(Error, Debug)]
pub enum DbError {
    /// Connection error (D001)
    #[error("[D001] Database connection failed: {0}")]
    ConnectionError(String),

    /// Query execution error (D002)
    #[error("[D002] SQL execution failed: {0}")]
    ExecutionError(String),

    /// Table not found (D003)
    #[error("[D003] Table or view not found: {0}")]
    TableNotFound(String),

    /// Transaction control error (D004)
    #[error("[D004] Transaction failed: {0}")]
    TransactionError(String),

    /// Constraint violation such as a duplicate primary key (D005)
    #[error("[D005] Constraint violation: {0}")]
    ConstraintViolation(String),
}

/// Result type alias for DbError
pub type DbResult<T> = Result<T, DbError>;

impl From<duckdb::Error> for DbError {
    fn from(err: duckdb::Error) -> Self {
        // duckdb::Error does not expose structured variants, so classify by
        // message with narrow patterns.
        let msg = err.to_string();
        if msg.contains("Table with name")
            || msg.contains("Table or view with name")
            || (msg.contains("Catalog Error") && msg.contains("Table") && msg.contains("not found"))
        {
            DbError::TableNotFound(msg)
        } else if msg.contains("Constraint Error") {
            DbError::ConstraintViolation(msg)
        } else {
            DbError::ExecutionError(msg)
        }
    }
}
