//! Resource search path for migration scripts.
//!
//! A logical script path such as `db/migration/` may exist in several roots
//! at once: a project directory, a shared directory, or a bundle of scripts
//! compiled into the binary with `include_str!`. [`ResourceLoader::resolve`]
//! returns every physical location holding the path; content is read back by
//! resource name with [`ResourceLoader::read`].

use crate::error::{CoreError, CoreResult};
use crate::location::{Location, EMBEDDED_SCHEME, FILE_SCHEME};
use crate::scanner::{EmbeddedScanner, FileSystemScanner, ScannerRegistry};
use std::io;
use std::path::PathBuf;

/// Source of migration resources
pub trait ResourceLoader: Send + Sync {
    /// Every physical location that holds `logical_path`, in search order.
    fn resolve(&self, logical_path: &str) -> CoreResult<Vec<Location>>;

    /// Raw bytes of a resource, from the first root that contains it.
    fn read(&self, resource_name: &str) -> io::Result<Vec<u8>>;

    /// Scanners able to list the locations this loader resolves.
    fn scanner_registry(&self) -> ScannerRegistry;
}

/// A single script compiled into the binary.
#[derive(Debug)]
pub struct EmbeddedResource {
    /// Resource name, e.g. `db/migration/001_init.sql`
    pub name: &'static str,
    /// Script content
    pub content: &'static str,
}

/// A named set of compiled-in scripts.
///
/// ```ignore
/// static CORE_MIGRATIONS: EmbeddedBundle = EmbeddedBundle {
///     name: "core",
///     resources: &[EmbeddedResource {
///         name: "db/migration/001_init.sql",
///         content: include_str!("../db/migration/001_init.sql"),
///     }],
/// };
/// ```
#[derive(Debug)]
pub struct EmbeddedBundle {
    pub name: &'static str,
    pub resources: &'static [EmbeddedResource],
}

/// One entry of a [`Classpath`]
#[derive(Debug, Clone)]
pub enum ResourceRoot {
    Directory(PathBuf),
    Embedded(&'static EmbeddedBundle),
}

/// Ordered list of directories and embedded bundles searched for resources.
#[derive(Debug, Clone, Default)]
pub struct Classpath {
    roots: Vec<ResourceRoot>,
}

impl Classpath {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a directory root.
    pub fn with_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.roots.push(ResourceRoot::Directory(dir.into()));
        self
    }

    /// Append a compiled-in bundle root.
    pub fn with_bundle(mut self, bundle: &'static EmbeddedBundle) -> Self {
        self.roots.push(ResourceRoot::Embedded(bundle));
        self
    }

    fn bundles(&self) -> Vec<&'static EmbeddedBundle> {
        self.roots
            .iter()
            .filter_map(|root| match root {
                ResourceRoot::Embedded(bundle) => Some(*bundle),
                ResourceRoot::Directory(_) => None,
            })
            .collect()
    }
}

impl ResourceLoader for Classpath {
    fn resolve(&self, logical_path: &str) -> CoreResult<Vec<Location>> {
        let mut locations = Vec::new();
        for root in &self.roots {
            match root {
                ResourceRoot::Directory(dir) => {
                    let candidate = dir.join(logical_path.trim_end_matches('/'));
                    if !candidate.is_dir() {
                        continue;
                    }
                    let path = candidate.to_str().ok_or_else(|| CoreError::LocationScan {
                        location: candidate.display().to_string(),
                        source: io::Error::new(
                            io::ErrorKind::InvalidData,
                            "location path is not valid UTF-8",
                        ),
                    })?;
                    locations.push(Location::new(FILE_SCHEME, path));
                }
                ResourceRoot::Embedded(bundle) => {
                    if bundle
                        .resources
                        .iter()
                        .any(|r| r.name.starts_with(logical_path))
                    {
                        locations.push(Location::new(
                            EMBEDDED_SCHEME,
                            format!("{}/{}", bundle.name, logical_path),
                        ));
                    }
                }
            }
        }
        Ok(locations)
    }

    fn read(&self, resource_name: &str) -> io::Result<Vec<u8>> {
        for root in &self.roots {
            match root {
                ResourceRoot::Directory(dir) => {
                    let path = dir.join(resource_name);
                    if path.is_file() {
                        return std::fs::read(path);
                    }
                }
                ResourceRoot::Embedded(bundle) => {
                    if let Some(resource) = bundle.resources.iter().find(|r| r.name == resource_name)
                    {
                        return Ok(resource.content.as_bytes().to_vec());
                    }
                }
            }
        }
        Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("resource '{resource_name}' not found on the classpath"),
        ))
    }

    fn scanner_registry(&self) -> ScannerRegistry {
        ScannerRegistry::new()
            .register(FILE_SCHEME, FileSystemScanner)
            .register(EMBEDDED_SCHEME, EmbeddedScanner::new(self.bundles()))
    }
}

#[cfg(test)]
#[path = "resource_test.rs"]
mod tests;
