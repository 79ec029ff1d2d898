//! Shared utilities for CLI commands

use anyhow::{Context, Result};
use fm_core::{Config, MigrationRepository};
use fm_db::DuckDbDatabase;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::cli::GlobalArgs;

/// Error type representing a non-zero process exit code.
///
/// Use `return Err(ExitCode(N).into())` instead of `std::process::exit(N)`
/// so that RAII destructors run and the database is closed properly.
#[derive(Debug)]
pub(crate) struct ExitCode(pub(crate) i32);

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Control flow only, never shown to the user.
        write!(f, "")
    }
}

impl std::error::Error for ExitCode {}

/// A loaded project: its directory and configuration.
pub(crate) struct Project {
    pub(crate) root: PathBuf,
    pub(crate) config: Config,
}

impl Project {
    /// Build the migration repository over the configured resource roots.
    pub(crate) fn repository(&self) -> Result<MigrationRepository> {
        let classpath = self.config.classpath(&self.root);
        MigrationRepository::builder(Arc::new(classpath))
            .script_path(self.config.script_path.clone())
            .convention(self.config.scripts.clone())
            .collector(self.config.duplicates.collector())
            .build()
            .context("Failed to discover migration scripts")
    }

    /// Open the history database, creating the history table if needed.
    pub(crate) fn database(&self) -> Result<DuckDbDatabase> {
        let path = self.config.database_path(&self.root);
        if path != ":memory:" {
            if let Some(parent) = Path::new(&path).parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
        }
        log::debug!("Opening database {path}");
        let db = DuckDbDatabase::new(&path)
            .and_then(|db| db.with_history_table(&self.config.database.history_table))
            .with_context(|| format!("Failed to open database {path}"))?;
        Ok(db.with_comment_prefix(self.config.scripts.comment_prefix.clone()))
    }
}

/// Load the project named by the global arguments.
pub(crate) fn load_project(global: &GlobalArgs) -> Result<Project> {
    let root = PathBuf::from(&global.project_dir);
    let config = match &global.config {
        Some(path) => Config::load(Path::new(path)),
        None => Config::load_from_dir(&root),
    }
    .context("Failed to load project")?;
    Ok(Project { root, config })
}

#[cfg(test)]
#[path = "common_test.rs"]
mod tests;
