//! Shared test helpers for the migration engine.

use dbver_db::{Database, DbResult, DuckDbBackend};
use std::cell::{Cell, RefCell};
use std::fs;
use std::path::Path;

/// In-memory DuckDB wrapper that records every batch and transaction call.
pub(crate) struct RecordingDb {
    inner: DuckDbBackend,
    pub batches: RefCell<Vec<String>>,
    pub begins: Cell<usize>,
    pub commits: Cell<usize>,
    pub rollbacks: Cell<usize>,
}

impl RecordingDb {
    pub fn new() -> Self {
        Self {
            inner: DuckDbBackend::in_memory().unwrap(),
            batches: RefCell::new(Vec::new()),
            begins: Cell::new(0),
            commits: Cell::new(0),
            rollbacks: Cell::new(0),
        }
    }

    /// Forget all recorded calls.
    pub fn reset(&self) {
        self.batches.borrow_mut().clear();
        self.begins.set(0);
        self.commits.set(0);
        self.rollbacks.set(0);
    }

    pub fn batch_count(&self) -> usize {
        self.batches.borrow().len()
    }
}

impl Database for RecordingDb {
    fn execute(&self, sql: &str) -> DbResult<usize> {
        self.inner.execute(sql)
    }

    fn execute_batch(&self, sql: &str) -> DbResult<()> {
        self.batches.borrow_mut().push(sql.to_string());
        self.inner.execute_batch(sql)
    }

    fn relation_exists(&self, schema: Option<&str>, name: &str) -> DbResult<bool> {
        self.inner.relation_exists(schema, name)
    }

    fn query_scalar_i64(&self, sql: &str) -> DbResult<Option<i64>> {
        self.inner.query_scalar_i64(sql)
    }

    fn query_rows(&self, sql: &str) -> DbResult<Vec<Vec<String>>> {
        self.inner.query_rows(sql)
    }

    fn db_type(&self) -> &'static str {
        "recording"
    }

    fn begin(&self) -> DbResult<()> {
        self.begins.set(self.begins.get() + 1);
        self.inner.begin()
    }

    fn commit(&self) -> DbResult<()> {
        self.commits.set(self.commits.get() + 1);
        self.inner.commit()
    }

    fn rollback(&self) -> DbResult<()> {
        self.rollbacks.set(self.rollbacks.get() + 1);
        self.inner.rollback()
    }
}

/// Write `contents` to `root/rel`, creating parent directories.
pub(crate) fn write_sql(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}

/// Count rows returned by `sql`.
pub(crate) fn count(db: &dyn Database, sql: &str) -> i64 {
    db.query_scalar_i64(sql).unwrap().unwrap_or(0)
}
