//! Drift detection between the history table and the script repository

use crate::error::{TaskError, TaskResult};
use fm_core::{DbMigration, MigrationRepository};
use serde::Serialize;
use std::collections::HashMap;

/// An applied migration that no longer matches its script
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Drift {
    /// The script was edited after it was applied
    ChecksumMismatch {
        script_name: String,
        version: u32,
        recorded: u64,
        current: u64,
    },
    /// No script carries the applied version anymore
    MissingScript { script_name: String, version: u32 },
}

impl Drift {
    pub fn version(&self) -> u32 {
        match self {
            Drift::ChecksumMismatch { version, .. } | Drift::MissingScript { version, .. } => {
                *version
            }
        }
    }
}

impl From<Drift> for TaskError {
    fn from(drift: Drift) -> Self {
        match drift {
            Drift::ChecksumMismatch {
                script_name,
                version,
                recorded,
                current,
            } => TaskError::ChecksumMismatch {
                script_name,
                version,
                recorded,
                current,
            },
            Drift::MissingScript {
                script_name,
                version,
            } => TaskError::MissingScript {
                script_name,
                version,
            },
        }
    }
}

/// Compare every applied migration against the repository.
///
/// Only scripts up to the highest applied version are read. Scripts that were
/// never applied are not drift. The result is ordered by version.
pub fn detect_drift(
    applied: &[DbMigration],
    repository: &MigrationRepository,
) -> TaskResult<Vec<Drift>> {
    let Some(highest) = applied.iter().map(DbMigration::version).max() else {
        return Ok(Vec::new());
    };
    let scripts = match highest.checked_add(1) {
        Some(end) => repository.migrations_in_range(0, end)?,
        None => repository.migrations_since(0)?,
    };
    let by_version: HashMap<u32, &DbMigration> =
        scripts.iter().map(|m| (m.version(), m)).collect();

    let mut drift: Vec<Drift> = applied
        .iter()
        .filter_map(|record| match by_version.get(&record.version()) {
            None => Some(Drift::MissingScript {
                script_name: record.script_name().to_string(),
                version: record.version(),
            }),
            Some(script) if !record.matches_checksum(script) => Some(Drift::ChecksumMismatch {
                script_name: script.script_name().to_string(),
                version: record.version(),
                recorded: record.checksum(),
                current: script.checksum(),
            }),
            Some(_) => None,
        })
        .collect();
    drift.sort_by_key(Drift::version);

    for item in &drift {
        log::warn!("{}", TaskError::from(item.clone()));
    }
    Ok(drift)
}

#[cfg(test)]
#[path = "drift_test.rs"]
mod tests;
