//! DuckDB database backend implementation

use crate::error::{DbError, DbResult};
use crate::row_helpers::get_column_as_string;
use crate::traits::Database;
use duckdb::Connection;
use std::fmt;
use std::path::Path;

/// Schema used for unqualified relation names
const DEFAULT_SCHEMA: &str = "main";

/// DuckDB database backend
///
/// Single-threaded: one owned connection, no `Mutex`.
pub struct DuckDbBackend {
    conn: Connection,
}

impl fmt::Debug for DuckDbBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DuckDbBackend").finish_non_exhaustive()
    }
}

impl DuckDbBackend {
    /// Create a new in-memory DuckDB connection
    pub fn in_memory() -> DbResult<Self> {
        let conn =
            Connection::open_in_memory().map_err(|e| DbError::ConnectionError(e.to_string()))?;
        Ok(Self { conn })
    }

    /// Create a new DuckDB connection from a file path
    pub fn from_path(path: &Path) -> DbResult<Self> {
        let conn = Connection::open(path)
            .map_err(|e| DbError::ConnectionError(format!("{e}: {}", path.display())))?;
        Ok(Self { conn })
    }

    /// Create from path string (handles :memory: special case)
    pub fn new(path: &str) -> DbResult<Self> {
        if path == ":memory:" {
            Self::in_memory()
        } else {
            Self::from_path(Path::new(path))
        }
    }
}

impl Database for DuckDbBackend {
    fn execute(&self, sql: &str) -> DbResult<usize> {
        self.conn.execute(sql, []).map_err(DbError::from)
    }

    fn execute_batch(&self, sql: &str) -> DbResult<()> {
        self.conn.execute_batch(sql).map_err(DbError::from)
    }

    fn relation_exists(&self, schema: Option<&str>, name: &str) -> DbResult<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM information_schema.tables \
             WHERE lower(table_schema) = lower(?) AND lower(table_name) = lower(?)",
            duckdb::params![schema.unwrap_or(DEFAULT_SCHEMA), name],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    fn query_scalar_i64(&self, sql: &str) -> DbResult<Option<i64>> {
        let value: Option<i64> = self.conn.query_row(sql, [], |row| row.get(0))?;
        Ok(value)
    }

    fn query_rows(&self, sql: &str) -> DbResult<Vec<Vec<String>>> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt
            .query_map([], |row| {
                let col_count = row.as_ref().column_count();
                Ok((0..col_count)
                    .map(|i| get_column_as_string(row, i))
                    .collect())
            })?
            .collect::<Result<Vec<Vec<String>>, _>>()?;
        Ok(rows)
    }

    fn db_type(&self) -> &'static str {
        "duckdb"
    }
}

#[cfg(test)]
#[path = "duckdb_test.rs"]
mod tests;
