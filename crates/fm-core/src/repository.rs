//! The migration repository: every discovered script, ordered by version.
//!
//! A repository is built once by scanning all locations the logical script
//! path resolves to. Only names ending in the configured extension are
//! considered and each one must carry a numeric version. The resulting list
//! is immutable; rescanning means building a new repository.
//!
//! Script content is not read during discovery. [`MigrationRepository::migrations_in_range`]
//! loads the content of the scripts it returns at query time.

use crate::collector::{DuplicatePolicy, ScriptCollector};
use crate::convention::{ScriptConvention, PATH_SEPARATOR};
use crate::error::{CoreError, CoreResult};
use crate::migration::DbMigration;
use crate::resource::ResourceLoader;
use crate::scanner::ScannerRegistry;
use crate::script::ScriptFile;
use std::io;
use std::ops::{Bound, RangeBounds};
use std::sync::Arc;

/// Default logical path scanned for migration scripts
pub const DEFAULT_SCRIPT_PATH: &str = "db/migration";

/// Version-ordered view of all migration scripts
#[derive(Clone)]
pub struct MigrationRepository {
    scripts: Vec<ScriptFile>,
    loader: Arc<dyn ResourceLoader>,
}

/// Configures and builds a [`MigrationRepository`]
pub struct MigrationRepositoryBuilder {
    loader: Arc<dyn ResourceLoader>,
    script_path: String,
    collector: Option<Box<dyn ScriptCollector>>,
    registry: Option<ScannerRegistry>,
    convention: ScriptConvention,
}

impl MigrationRepositoryBuilder {
    /// Logical path to scan (default [`DEFAULT_SCRIPT_PATH`]).
    pub fn script_path(mut self, script_path: impl Into<String>) -> Self {
        self.script_path = script_path.into();
        self
    }

    /// Collection policy (default: fail on duplicate versions).
    pub fn collector(mut self, collector: Box<dyn ScriptCollector>) -> Self {
        self.collector = Some(collector);
        self
    }

    /// Scanner registry (default: the loader's own scanners).
    pub fn registry(mut self, registry: ScannerRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn convention(mut self, convention: ScriptConvention) -> Self {
        self.convention = convention;
        self
    }

    /// Scan every location and build the repository.
    ///
    /// Fails without producing a repository if a location cannot be listed,
    /// a script name has no numeric version, or the collector rejects a
    /// duplicate version.
    pub fn build(self) -> CoreResult<MigrationRepository> {
        let script_path = normalize_path(&self.script_path)?;
        let registry = self
            .registry
            .unwrap_or_else(|| self.loader.scanner_registry());
        let mut collector = self
            .collector
            .unwrap_or_else(|| DuplicatePolicy::Fail.collector());

        log::debug!("Scanning for migration scripts in {script_path}");
        for location in self.loader.resolve(&script_path)? {
            log::debug!("Potential script folder: {location}");
            let Some(scanner) = registry.scanner(location.scheme()) else {
                log::warn!(
                    "No location scanner available for scheme '{}'. Skipping {}",
                    location.scheme(),
                    location
                );
                continue;
            };
            for resource in scanner.find_resource_names(&script_path, &location)? {
                if !self.convention.is_migration_script(&resource) {
                    log::warn!(
                        "Ignoring file {resource} because it is not a {} file",
                        self.convention.extension
                    );
                    continue;
                }
                let script_name = self.convention.script_name(&resource).to_string();
                let version = self.convention.extract_version(&script_name)?;
                collector.collect(ScriptFile::new(version, resource, script_name))?;
            }
        }

        let mut scripts = collector.script_files();
        scripts.sort_by_key(|s| s.version);
        log::info!("Found {} migration scripts", scripts.len());

        Ok(MigrationRepository {
            scripts,
            loader: self.loader,
        })
    }
}

impl MigrationRepository {
    /// Start configuring a repository that reads through `loader`.
    pub fn builder(loader: Arc<dyn ResourceLoader>) -> MigrationRepositoryBuilder {
        MigrationRepositoryBuilder {
            loader,
            script_path: DEFAULT_SCRIPT_PATH.to_string(),
            collector: None,
            registry: None,
            convention: ScriptConvention::default(),
        }
    }

    /// Build a repository with the default collector, scanners and convention.
    pub fn new(script_path: &str, loader: Arc<dyn ResourceLoader>) -> CoreResult<Self> {
        Self::builder(loader).script_path(script_path).build()
    }

    /// Discovered scripts in ascending version order.
    pub fn scripts(&self) -> &[ScriptFile] {
        &self.scripts
    }

    pub fn len(&self) -> usize {
        self.scripts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scripts.is_empty()
    }

    /// Highest script version, or `0` when the repository is empty.
    pub fn latest_version(&self) -> u32 {
        self.scripts.last().map_or(0, |s| s.version)
    }

    /// All migrations with `version >= start_version`.
    pub fn migrations_since(&self, start_version: u32) -> CoreResult<Vec<DbMigration>> {
        self.load_range(start_version..)
    }

    /// Migrations with `start_version <= version < end_version`, in version order.
    ///
    /// Content is read from the backing resources now. A single unreadable
    /// script fails the whole query.
    pub fn migrations_in_range(
        &self,
        start_version: u32,
        end_version: u32,
    ) -> CoreResult<Vec<DbMigration>> {
        if start_version > end_version {
            return Err(CoreError::InvalidRange {
                start: start_version,
                end: end_version,
            });
        }
        self.load_range(start_version..end_version)
    }

    fn load_range(&self, range: impl RangeBounds<u32>) -> CoreResult<Vec<DbMigration>> {
        let lo = match range.start_bound() {
            Bound::Included(&v) => self.scripts.partition_point(|s| s.version < v),
            Bound::Excluded(&v) => self.scripts.partition_point(|s| s.version <= v),
            Bound::Unbounded => 0,
        };
        let hi = match range.end_bound() {
            Bound::Included(&v) => self.scripts.partition_point(|s| s.version <= v),
            Bound::Excluded(&v) => self.scripts.partition_point(|s| s.version < v),
            Bound::Unbounded => self.scripts.len(),
        };
        if lo >= hi {
            return Ok(Vec::new());
        }
        self.scripts[lo..hi]
            .iter()
            .map(|script| self.load(script))
            .collect()
    }

    fn load(&self, script: &ScriptFile) -> CoreResult<DbMigration> {
        log::debug!("Reading resource as string: {}", script.resource_name);
        let read_error = |source: io::Error| CoreError::ScriptRead {
            script_name: script.script_name.clone(),
            resource: script.resource_name.clone(),
            source,
        };
        let bytes = self.loader.read(&script.resource_name).map_err(read_error)?;
        let content = String::from_utf8(bytes)
            .map_err(|e| read_error(io::Error::new(io::ErrorKind::InvalidData, e)))?;
        Ok(DbMigration::new(
            script.script_name.clone(),
            script.version,
            content,
        ))
    }
}

impl std::fmt::Debug for MigrationRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MigrationRepository")
            .field("scripts", &self.scripts)
            .finish_non_exhaustive()
    }
}

/// Strip leading separators and end with exactly one trailing separator.
pub fn normalize_path(script_path: &str) -> CoreResult<String> {
    let trimmed = script_path
        .trim_start_matches(PATH_SEPARATOR)
        .trim_end_matches(PATH_SEPARATOR);
    if trimmed.trim().is_empty() {
        return Err(CoreError::EmptyScriptPath);
    }
    Ok(format!("{trimmed}{PATH_SEPARATOR}"))
}

#[cfg(test)]
#[path = "repository_test.rs"]
mod tests;
