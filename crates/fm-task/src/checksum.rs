//! Recalculate stored checksums of applied migrations
//!
//! Used after a deliberate, harmless edit of an applied script (whitespace,
//! comments) so that validation stops reporting it as drift. Each record is
//! written back individually; there is no transaction around the batch, so a
//! failure part-way leaves earlier records already updated.

use crate::error::TaskResult;
use crate::Task;
use fm_core::{DbMigration, MigrationRepository};
use fm_db::Database;
use serde::Serialize;
use std::collections::HashMap;

/// Outcome of a checksum recalculation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ChecksumSummary {
    /// Records written back
    pub updated: usize,
    /// Records whose checksum differed from the stored one
    pub changed: usize,
}

/// Recompute and persist the checksum of every applied migration.
///
/// By default the checksum is computed over the script text stored in the
/// history table. With [`with_repository`](Self::with_repository) the stored
/// script and name are first replaced with the current script file of the
/// same version.
pub struct CalculateChecksumTask<'a, D: Database + ?Sized> {
    database: &'a D,
    repository: Option<&'a MigrationRepository>,
}

impl<'a, D: Database + ?Sized> CalculateChecksumTask<'a, D> {
    pub fn new(database: &'a D) -> Self {
        Self {
            database,
            repository: None,
        }
    }

    /// Take script content from `repository` instead of the history table.
    pub fn with_repository(mut self, repository: &'a MigrationRepository) -> Self {
        self.repository = Some(repository);
        self
    }

    fn current_scripts(&self) -> TaskResult<HashMap<u32, DbMigration>> {
        let Some(repository) = self.repository else {
            return Ok(HashMap::new());
        };
        Ok(repository
            .migrations_since(0)?
            .into_iter()
            .map(|m| (m.version(), m))
            .collect())
    }
}

impl<D: Database + ?Sized> Task for CalculateChecksumTask<'_, D> {
    type Output = ChecksumSummary;

    fn execute(&self) -> TaskResult<ChecksumSummary> {
        let mut migrations = self.database.load_migrations()?;
        let current = self.current_scripts()?;
        log::info!(
            "Recalculating checksums of {} applied migration(s) in {}",
            migrations.len(),
            self.database.db_type()
        );

        let mut summary = ChecksumSummary::default();
        for migration in &mut migrations {
            if let Some(script) = current.get(&migration.version()) {
                migration.sync_with(script);
            } else if self.repository.is_some() {
                log::warn!(
                    "No script for {} (v{}), keeping stored content",
                    migration.script_name(),
                    migration.version()
                );
            }

            if migration.update_checksum() {
                log::info!(
                    "Checksum of {} (v{}) changed to {:016x}",
                    migration.script_name(),
                    migration.version(),
                    migration.checksum()
                );
                summary.changed += 1;
            }
            self.database.update_migration(migration)?;
            summary.updated += 1;
        }

        log::info!(
            "Updated {} checksum(s), {} changed",
            summary.updated,
            summary.changed
        );
        Ok(summary)
    }
}

#[cfg(test)]
#[path = "checksum_test.rs"]
mod tests;
