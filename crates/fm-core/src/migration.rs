//! The migration record: one script's identity, content, and checksum.

use crate::checksum::compute_checksum;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A single schema change, either freshly discovered or loaded from history.
///
/// The checksum is computed eagerly from `script` when a record is built from
/// discovered content. Records loaded from history keep the persisted
/// checksum until [`update_checksum`](Self::update_checksum) is called.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DbMigration {
    script_name: String,
    version: u32,
    script: String,
    checksum: u64,
    executed_at: Option<DateTime<Utc>>,
}

impl DbMigration {
    /// Build a record from discovered script content.
    pub fn new(script_name: impl Into<String>, version: u32, script: impl Into<String>) -> Self {
        let script = script.into();
        let checksum = compute_checksum(&script);
        Self {
            script_name: script_name.into(),
            version,
            script,
            checksum,
            executed_at: None,
        }
    }

    /// Rebuild a record from the migration history, keeping its stored checksum.
    pub fn from_history(
        script_name: impl Into<String>,
        version: u32,
        script: impl Into<String>,
        checksum: u64,
        executed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            script_name: script_name.into(),
            version,
            script: script.into(),
            checksum,
            executed_at: Some(executed_at),
        }
    }

    pub fn script_name(&self) -> &str {
        &self.script_name
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn script(&self) -> &str {
        &self.script
    }

    pub fn checksum(&self) -> u64 {
        self.checksum
    }

    /// Time the migration was originally applied; `None` for discovered records.
    pub fn executed_at(&self) -> Option<DateTime<Utc>> {
        self.executed_at
    }

    /// Recompute the checksum from the current script content.
    ///
    /// Returns `true` when the stored checksum changed.
    pub fn update_checksum(&mut self) -> bool {
        let checksum = compute_checksum(&self.script);
        let changed = checksum != self.checksum;
        self.checksum = checksum;
        changed
    }

    /// Replace the script content and name with the current state of its file.
    ///
    /// The version is the join key with history and is never touched. The
    /// checksum is left as-is until [`update_checksum`](Self::update_checksum).
    pub fn sync_with(&mut self, current: &DbMigration) {
        debug_assert_eq!(self.version, current.version);
        if self.script_name != current.script_name {
            log::info!(
                "Migration v{} was renamed from {} to {}",
                self.version,
                self.script_name,
                current.script_name
            );
            self.script_name = current.script_name.clone();
        }
        self.script = current.script.clone();
    }

    /// Whether `other` carries the same content checksum as this record.
    pub fn matches_checksum(&self, other: &DbMigration) -> bool {
        self.checksum == other.checksum
    }
}

#[cfg(test)]
#[path = "migration_test.rs"]
mod tests;
