//! Discovery-time view of a migration script.

use serde::Serialize;

/// A candidate migration found while scanning, before its content is loaded.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ScriptFile {
    /// Version extracted from the script name
    pub version: u32,

    /// Resource name the content is loaded from (e.g. `db/migration/001_init.sql`)
    pub resource_name: String,

    /// Base name of the script file, persisted as the migration's identity
    pub script_name: String,
}

impl ScriptFile {
    pub fn new(
        version: u32,
        resource_name: impl Into<String>,
        script_name: impl Into<String>,
    ) -> Self {
        Self {
            version,
            resource_name: resource_name.into(),
            script_name: script_name.into(),
        }
    }
}
