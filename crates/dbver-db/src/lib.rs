//! dbver-db - Database abstraction layer for dbver
//!
//! This crate provides the synchronous `Database` trait, a transaction
//! helper built on it, and the DuckDB implementation.

pub mod duckdb;
pub mod error;
pub(crate) mod row_helpers;
pub mod traits;

pub use duckdb::DuckDbBackend;
pub use error::{DbError, DbResult};
pub use traits::{with_transaction, Database};
