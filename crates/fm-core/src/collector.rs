//! Collection policies applied to every discovered script.
//!
//! A collector decides what happens when two scripts share a version. The
//! repository hands each candidate to [`ScriptCollector::collect`] and orders
//! whatever the collector returns; every policy guarantees that no two
//! returned scripts share a version.

use crate::error::{CoreError, CoreResult};
use crate::script::ScriptFile;
use serde::{Deserialize, Serialize};
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Acceptance policy for discovered scripts
pub trait ScriptCollector {
    /// Offer a candidate. May accept it, replace an existing entry, or fail.
    fn collect(&mut self, script: ScriptFile) -> CoreResult<()>;

    /// The accepted scripts, in no particular order.
    fn script_files(&self) -> Vec<ScriptFile>;
}

/// Rejects any second script for an already collected version.
#[derive(Debug, Default)]
pub struct FailOnDuplicatesCollector {
    scripts: HashMap<u32, ScriptFile>,
}

impl ScriptCollector for FailOnDuplicatesCollector {
    fn collect(&mut self, script: ScriptFile) -> CoreResult<()> {
        match self.scripts.entry(script.version) {
            Entry::Occupied(existing) => Err(CoreError::DuplicateVersion {
                version: script.version,
                existing: existing.get().script_name.clone(),
                duplicate: script.script_name,
            }),
            Entry::Vacant(slot) => {
                slot.insert(script);
                Ok(())
            }
        }
    }

    fn script_files(&self) -> Vec<ScriptFile> {
        self.scripts.values().cloned().collect()
    }
}

/// Keeps the first script seen for a version and ignores later ones.
#[derive(Debug, Default)]
pub struct FirstWinsCollector {
    scripts: HashMap<u32, ScriptFile>,
}

impl ScriptCollector for FirstWinsCollector {
    fn collect(&mut self, script: ScriptFile) -> CoreResult<()> {
        match self.scripts.entry(script.version) {
            Entry::Occupied(existing) => {
                log::warn!(
                    "Ignoring {} because {} already provides version {}",
                    script.resource_name,
                    existing.get().resource_name,
                    script.version
                );
            }
            Entry::Vacant(slot) => {
                slot.insert(script);
            }
        }
        Ok(())
    }

    fn script_files(&self) -> Vec<ScriptFile> {
        self.scripts.values().cloned().collect()
    }
}

/// Replaces an earlier script with a later one of the same version.
#[derive(Debug, Default)]
pub struct LastWinsCollector {
    scripts: HashMap<u32, ScriptFile>,
}

impl ScriptCollector for LastWinsCollector {
    fn collect(&mut self, script: ScriptFile) -> CoreResult<()> {
        if let Some(replaced) = self.scripts.insert(script.version, script) {
            log::warn!(
                "Version {} from {} was replaced by a later script",
                replaced.version,
                replaced.resource_name
            );
        }
        Ok(())
    }

    fn script_files(&self) -> Vec<ScriptFile> {
        self.scripts.values().cloned().collect()
    }
}

/// Configurable choice of the built-in collectors
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Abort discovery on duplicate versions
    #[default]
    Fail,
    /// Keep the first script found for a version
    FirstWins,
    /// Keep the last script found for a version
    LastWins,
}

impl DuplicatePolicy {
    /// Create a fresh collector implementing this policy.
    pub fn collector(self) -> Box<dyn ScriptCollector> {
        match self {
            DuplicatePolicy::Fail => Box::<FailOnDuplicatesCollector>::default(),
            DuplicatePolicy::FirstWins => Box::<FirstWinsCollector>::default(),
            DuplicatePolicy::LastWins => Box::<LastWinsCollector>::default(),
        }
    }
}

#[cfg(test)]
#[path = "collector_test.rs"]
mod tests;
