//! Configuration types and parsing for feathermig.yml

use crate::collector::DuplicatePolicy;
use crate::convention::ScriptConvention;
use crate::error::{CoreError, CoreResult};
use crate::repository::DEFAULT_SCRIPT_PATH;
use crate::resource::Classpath;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main project configuration from feathermig.yml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Logical path of the migration scripts below every resource root
    #[serde(default = "default_script_path")]
    pub script_path: String,

    /// Directories searched for `script_path`, relative to the project directory
    #[serde(default = "default_resource_roots")]
    pub resource_roots: Vec<String>,

    /// Script naming conventions
    #[serde(default)]
    pub scripts: ScriptConvention,

    /// What to do when two scripts share a version
    #[serde(default)]
    pub duplicates: DuplicatePolicy,

    /// Migration history database
    #[serde(default)]
    pub database: DatabaseConfig,
}

/// Migration history database settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    /// Database file path, or `:memory:`
    #[serde(default = "default_db_path")]
    pub path: String,

    /// Table recording applied migrations, optionally `schema.table`
    #[serde(default = "default_history_table")]
    pub history_table: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            history_table: default_history_table(),
        }
    }
}

fn default_script_path() -> String {
    DEFAULT_SCRIPT_PATH.to_string()
}

fn default_resource_roots() -> Vec<String> {
    vec![".".to_string()]
}

fn default_db_path() -> String {
    "target/feathermig.duckdb".to_string()
}

fn default_history_table() -> String {
    "schema_migration".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            script_path: default_script_path(),
            resource_roots: default_resource_roots(),
            scripts: ScriptConvention::default(),
            duplicates: DuplicatePolicy::default(),
            database: DatabaseConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a file path
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        let config: Config = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a project directory
    /// Looks for feathermig.yml or feathermig.yaml
    pub fn load_from_dir(dir: &Path) -> CoreResult<Self> {
        let yml_path = dir.join("feathermig.yml");
        let yaml_path = dir.join("feathermig.yaml");

        if yml_path.exists() {
            Self::load(&yml_path)
        } else if yaml_path.exists() {
            Self::load(&yaml_path)
        } else {
            Err(CoreError::ConfigNotFound {
                path: yml_path.display().to_string(),
            })
        }
    }

    /// Validate the configuration
    fn validate(&self) -> CoreResult<()> {
        if self.script_path.trim_matches('/').trim().is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "script_path cannot be empty".to_string(),
            });
        }

        if self.resource_roots.is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "At least one resource_roots entry must be specified".to_string(),
            });
        }

        self.scripts.validate()?;

        if !is_table_identifier(&self.database.history_table) {
            return Err(CoreError::ConfigInvalid {
                message: format!(
                    "history_table '{}' must be an identifier or schema.identifier",
                    self.database.history_table
                ),
            });
        }

        Ok(())
    }

    /// Resource search path built from `resource_roots`, resolved against `root`.
    pub fn classpath(&self, root: &Path) -> Classpath {
        self.resource_roots
            .iter()
            .fold(Classpath::new(), |classpath, dir| {
                classpath.with_directory(resolve_dir(root, dir))
            })
    }

    /// Database path resolved against `root` (`:memory:` is passed through).
    pub fn database_path(&self, root: &Path) -> String {
        if self.database.path == ":memory:" {
            return self.database.path.clone();
        }
        resolve_dir(root, &self.database.path)
            .display()
            .to_string()
    }
}

fn resolve_dir(root: &Path, dir: &str) -> PathBuf {
    let path = Path::new(dir);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

fn is_table_identifier(name: &str) -> bool {
    let parts: Vec<&str> = name.split('.').collect();
    parts.len() <= 2
        && parts.iter().all(|part| {
            let mut chars = part.chars();
            matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
