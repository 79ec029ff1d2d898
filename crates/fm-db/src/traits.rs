//! Database trait definition

use crate::error::DbResult;
use fm_core::DbMigration;

/// Migration history store and script executor
///
/// Calls are blocking. Implementations do not retry; any failure is returned
/// to the caller as-is.
pub trait Database {
    /// Highest applied version, or `0` when nothing was applied.
    fn current_version(&self) -> DbResult<u32>;

    /// Every recorded migration, in no guaranteed order.
    fn load_migrations(&self) -> DbResult<Vec<DbMigration>>;

    /// Insert or update the history row for `migration.version()`.
    ///
    /// An existing row keeps its original execution time.
    fn update_migration(&self, migration: &DbMigration) -> DbResult<()>;

    /// Execute the script's statements, then record it in the history.
    fn apply_migration(&self, migration: &DbMigration) -> DbResult<()>;

    /// Database type identifier for logging
    fn db_type(&self) -> &'static str;
}
