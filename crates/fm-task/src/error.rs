//! Error types for fm-task

use fm_core::CoreError;
use fm_db::DbError;
use thiserror::Error;

/// Task errors
#[derive(Error, Debug)]
pub enum TaskError {
    /// Discovery or script read failure (T001)
    #[error("[T001] {0}")]
    Repository(#[from] CoreError),

    /// Database failure (T002)
    #[error("[T002] {0}")]
    Database(#[from] DbError),

    /// An applied script changed after it was applied (T003)
    #[error("[T003] Checksum of {script_name} (v{version}) changed since it was applied: recorded {recorded:016x}, script {current:016x}")]
    ChecksumMismatch {
        script_name: String,
        version: u32,
        recorded: u64,
        current: u64,
    },

    /// An applied version has no script anymore (T004)
    #[error("[T004] Migration {script_name} (v{version}) was applied but no script with that version exists")]
    MissingScript { script_name: String, version: u32 },
}

/// Result type alias for TaskError
pub type TaskResult<T> = Result<T, TaskError>;
