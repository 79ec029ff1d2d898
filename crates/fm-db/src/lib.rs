//! fm-db - Database layer for Feathermig
//!
//! This crate provides the `Database` trait the migration tasks talk to,
//! the script statement splitter, and a DuckDB implementation that keeps
//! the migration history in a table.

pub mod duckdb;
pub mod error;
pub mod statements;
pub mod traits;

pub use duckdb::DuckDbDatabase;
pub use error::{DbError, DbResult};
pub use statements::split_statements;
pub use traits::Database;
