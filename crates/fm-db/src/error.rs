//! Error types for fm-db

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

    /// A statement of a migration script failed (D003)
    #[error("[D003] Migration {script_name} (v{version}) failed on statement `{statement}`: {message}")]
    StatementFailed {
        script_name: String,
        version: u32,
        statement: String,
        message: String,
    },

    /// History table holds a row that cannot be mapped to a migration (D004)
    #[error("[D004] Corrupt migration history: {0}")]
    CorruptHistory(String),
}

/// Result type alias for DbError
pub type DbResult<T> = Result<T, DbError>;

impl From<duckdb::Error> for DbError {
    fn from(err: duckdb::Error) -> Self {
        DbError::ExecutionError(err.to_string())
    }
}
