//! fm-task - Migration tasks for Feathermig
//!
//! Tasks combine a [`fm_core::MigrationRepository`] with a
//! [`fm_db::Database`]: applying pending migrations, checking applied ones
//! for drift, and resynchronizing stored checksums.

pub mod checksum;
pub mod drift;
pub mod error;
pub mod migrate;

pub use checksum::{CalculateChecksumTask, ChecksumSummary};
pub use drift::{detect_drift, Drift};
pub use error::{TaskError, TaskResult};
pub use migrate::{MigrationSummary, MigrationTask};

/// A unit of work run against a database.
pub trait Task {
    type Output;

    /// Run the task. Errors are never retried.
    fn execute(&self) -> TaskResult<Self::Output>;
}

#[cfg(test)]
pub(crate) mod testing;
