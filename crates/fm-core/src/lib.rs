//! fm-core - Core library for Feathermig
//!
//! This crate provides the migration repository model: script discovery
//! across pluggable resource locations, version extraction, duplicate-version
//! policies, ordered range queries, and the migration record with its
//! checksum semantics.

pub mod checksum;
pub mod collector;
pub mod config;
pub mod convention;
pub mod error;
pub mod location;
pub mod migration;
pub mod repository;
pub mod resource;
pub mod scanner;
pub mod script;

pub use checksum::compute_checksum;
pub use collector::{
    DuplicatePolicy, FailOnDuplicatesCollector, FirstWinsCollector, LastWinsCollector,
    ScriptCollector,
};
pub use config::{Config, DatabaseConfig};
pub use convention::ScriptConvention;
pub use error::{CoreError, CoreResult};
pub use location::Location;
pub use migration::DbMigration;
pub use repository::{MigrationRepository, MigrationRepositoryBuilder};
pub use resource::{Classpath, EmbeddedBundle, EmbeddedResource, ResourceLoader, ResourceRoot};
pub use scanner::{EmbeddedScanner, FileSystemScanner, LocationScanner, ScannerRegistry};
pub use script::ScriptFile;
