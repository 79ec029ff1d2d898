//! Naming convention for migration scripts.
//!
//! Scripts are named `<version><delimiter><name><extension>`, for example
//! `001_create_users.sql`. The extension is compared case-sensitively and the
//! version must parse as a base-10 non-negative integer.

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};

/// Separator used in resource names regardless of platform.
pub const PATH_SEPARATOR: char = '/';

/// Script naming and content conventions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScriptConvention {
    /// File extension marking a migration script, including the leading dot
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Single character between the version and the descriptive name
    #[serde(default = "default_delimiter")]
    pub delimiter: char,

    /// Lines starting with this prefix are skipped when executing a script
    #[serde(default = "default_comment_prefix")]
    pub comment_prefix: String,
}

fn default_extension() -> String {
    ".sql".to_string()
}

fn default_delimiter() -> char {
    '_'
}

fn default_comment_prefix() -> String {
    "--".to_string()
}

impl Default for ScriptConvention {
    fn default() -> Self {
        Self {
            extension: default_extension(),
            delimiter: default_delimiter(),
            comment_prefix: default_comment_prefix(),
        }
    }
}

impl ScriptConvention {
    /// Whether a resource name denotes a migration script.
    pub fn is_migration_script(&self, resource_name: &str) -> bool {
        resource_name.ends_with(&self.extension)
    }

    /// Base name of a resource: everything after the final `/`.
    pub fn script_name<'a>(&self, resource_name: &'a str) -> &'a str {
        match resource_name.rfind(PATH_SEPARATOR) {
            Some(pos) => &resource_name[pos + 1..],
            None => resource_name,
        }
    }

    /// Extract the version from a script name.
    ///
    /// The name is cut at the first delimiter; if that segment still holds a
    /// `/` (version folders), only the part after the last `/` is parsed.
    pub fn extract_version(&self, script_name: &str) -> CoreResult<u32> {
        let segment = script_name
            .split(self.delimiter)
            .next()
            .unwrap_or(script_name);
        let version = match segment.rfind(PATH_SEPARATOR) {
            Some(pos) => &segment[pos + 1..],
            None => segment,
        };
        version
            .parse::<u32>()
            .map_err(|source| CoreError::InvalidVersion {
                script_name: script_name.to_string(),
                source,
            })
    }

    pub(crate) fn validate(&self) -> CoreResult<()> {
        if !self.extension.starts_with('.') || self.extension.len() < 2 {
            return Err(CoreError::ConfigInvalid {
                message: format!(
                    "script extension '{}' must start with '.' and name a suffix",
                    self.extension
                ),
            });
        }
        if self.delimiter == PATH_SEPARATOR || self.delimiter.is_ascii_digit() {
            return Err(CoreError::ConfigInvalid {
                message: format!("'{}' cannot be used as version delimiter", self.delimiter),
            });
        }
        if self.comment_prefix.trim().is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "comment_prefix must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "convention_test.rs"]
mod tests;
