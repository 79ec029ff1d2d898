//! Apply pending migrations

use crate::drift::detect_drift;
use crate::error::TaskResult;
use crate::Task;
use fm_core::MigrationRepository;
use fm_db::Database;
use serde::Serialize;

/// Outcome of a migration run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MigrationSummary {
    pub previous_version: u32,
    pub current_version: u32,
    /// Script names applied in this run, in order
    pub applied: Vec<String>,
}

/// Bring the database up to the latest script version.
///
/// Scripts newer than the highest applied version are executed in ascending
/// order. The run stops at the first failing script; scripts applied before it
/// stay applied.
pub struct MigrationTask<'a, D: Database + ?Sized> {
    database: &'a D,
    repository: &'a MigrationRepository,
    validate_checksums: bool,
}

impl<'a, D: Database + ?Sized> MigrationTask<'a, D> {
    pub fn new(database: &'a D, repository: &'a MigrationRepository) -> Self {
        Self {
            database,
            repository,
            validate_checksums: true,
        }
    }

    /// Do not compare applied migrations against their scripts first.
    pub fn skip_validation(mut self) -> Self {
        self.validate_checksums = false;
        self
    }

    fn validate(&self) -> TaskResult<()> {
        let applied = self.database.load_migrations()?;
        match detect_drift(&applied, self.repository)?.into_iter().next() {
            Some(drift) => Err(drift.into()),
            None => Ok(()),
        }
    }
}

impl<D: Database + ?Sized> Task for MigrationTask<'_, D> {
    type Output = MigrationSummary;

    fn execute(&self) -> TaskResult<MigrationSummary> {
        let previous_version = self.database.current_version()?;
        if self.validate_checksums {
            self.validate()?;
        }

        let mut summary = MigrationSummary {
            previous_version,
            current_version: previous_version,
            applied: Vec::new(),
        };

        let latest = self.repository.latest_version();
        if latest <= previous_version {
            log::info!(
                "{} is up to date at version {previous_version}",
                self.database.db_type()
            );
            return Ok(summary);
        }

        // latest > previous_version, so this cannot overflow
        let pending = self.repository.migrations_since(previous_version + 1)?;
        log::info!(
            "Applying {} migration(s) from version {previous_version}",
            pending.len()
        );
        for migration in &pending {
            log::info!(
                "Applying {} (v{})",
                migration.script_name(),
                migration.version()
            );
            self.database.apply_migration(migration)?;
            summary.current_version = migration.version();
            summary.applied.push(migration.script_name().to_string());
        }

        log::info!("Migrated to version {}", summary.current_version);
        Ok(summary)
    }
}

#[cfg(test)]
#[path = "migrate_test.rs"]
mod tests;
