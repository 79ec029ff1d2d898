//! Per-scheme location scanners and the registry that dispatches to them.
//!
//! The repository never lists a location itself: it looks up the scanner
//! registered for the location's scheme and skips locations nobody can read.
//! Additional schemes are plugged in with [`ScannerRegistry::register`].

mod embedded;
mod filesystem;

pub use embedded::EmbeddedScanner;
pub use filesystem::FileSystemScanner;

use crate::error::CoreResult;
use crate::location::Location;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Lists resource names under a physical location of one URI scheme
pub trait LocationScanner: Send + Sync {
    /// Whether this scanner can read locations of `scheme`.
    fn supports(&self, scheme: &str) -> bool;

    /// List every resource below `location`.
    ///
    /// Names are returned in resource form: `logical_path` (normalized, with a
    /// trailing `/`) followed by the resource's path relative to `location`,
    /// using `/` as separator.
    fn find_resource_names(&self, logical_path: &str, location: &Location)
        -> CoreResult<Vec<String>>;
}

/// Scheme-keyed registry of [`LocationScanner`]s
#[derive(Clone, Default)]
pub struct ScannerRegistry {
    scanners: HashMap<String, Arc<dyn LocationScanner>>,
}

impl ScannerRegistry {
    /// An empty registry. Every location will be skipped until scanners are registered.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `scanner` for `scheme`, replacing any earlier registration.
    pub fn register(
        mut self,
        scheme: impl Into<String>,
        scanner: impl LocationScanner + 'static,
    ) -> Self {
        self.scanners
            .insert(scheme.into().to_ascii_lowercase(), Arc::new(scanner));
        self
    }

    /// The scanner responsible for `scheme`, if any.
    pub fn scanner(&self, scheme: &str) -> Option<&dyn LocationScanner> {
        self.scanners
            .get(&scheme.to_ascii_lowercase())
            .filter(|scanner| scanner.supports(scheme))
            .map(|scanner| scanner.as_ref())
    }
}

impl fmt::Debug for ScannerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut schemes: Vec<_> = self.scanners.keys().collect();
        schemes.sort();
        f.debug_struct("ScannerRegistry")
            .field("schemes", &schemes)
            .finish()
    }
}

#[cfg(test)]
#[path = "scanner_test.rs"]
mod tests;
