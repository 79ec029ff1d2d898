use super::*;
use crate::location::{EMBEDDED_SCHEME, FILE_SCHEME};
use crate::resource::{EmbeddedBundle, EmbeddedResource};
use crate::CoreError;
use tempfile::TempDir;

static BUNDLE: EmbeddedBundle = EmbeddedBundle {
    name: "core",
    resources: &[
        EmbeddedResource {
            name: "db/migration/002_b.cql",
            content: "b",
        },
        EmbeddedResource {
            name: "db/migration/001_a.cql",
            content: "a",
        },
        EmbeddedResource {
            name: "db/other/003_c.cql",
            content: "c",
        },
    ],
};

struct StaticScanner(Vec<&'static str>);

impl LocationScanner for StaticScanner {
    fn supports(&self, scheme: &str) -> bool {
        scheme == "mem"
    }

    fn find_resource_names(&self, _: &str, _: &Location) -> CoreResult<Vec<String>> {
        Ok(self.0.iter().map(|s| s.to_string()).collect())
    }
}

#[test]
fn test_registry_dispatches_by_scheme() {
    let registry = ScannerRegistry::new()
        .register(FILE_SCHEME, FileSystemScanner)
        .register("mem", StaticScanner(vec!["db/migration/001_a.cql"]));

    assert!(registry.scanner("file").is_some());
    assert!(registry.scanner("FILE").is_some());
    assert!(registry.scanner("mem").is_some());
    assert!(registry.scanner("jar").is_none());

    let names = registry
        .scanner("mem")
        .unwrap()
        .find_resource_names("db/migration/", &Location::new("mem", "x"))
        .unwrap();
    assert_eq!(names, vec!["db/migration/001_a.cql"]);
}

#[test]
fn test_empty_registry_supports_nothing() {
    assert!(ScannerRegistry::new().scanner(FILE_SCHEME).is_none());
}

#[test]
fn test_filesystem_scanner_lists_recursively_with_logical_prefix() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir_all(dir.path().join("nested")).unwrap();
    std::fs::write(dir.path().join("002_b.cql"), "b").unwrap();
    std::fs::write(dir.path().join("001_a.cql"), "a").unwrap();
    std::fs::write(dir.path().join("nested/003_c.cql"), "c").unwrap();

    let location = Location::new(FILE_SCHEME, dir.path().to_str().unwrap());
    let names = FileSystemScanner
        .find_resource_names("db/migration/", &location)
        .unwrap();
    assert_eq!(
        names,
        vec![
            "db/migration/001_a.cql",
            "db/migration/002_b.cql",
            "db/migration/nested/003_c.cql",
        ]
    );
}

#[cfg(unix)]
#[test]
fn test_filesystem_scanner_does_not_follow_directory_links() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("001_a.cql"), "a").unwrap();
    std::fs::write(dir.path().join("target.cql"), "t").unwrap();
    std::os::unix::fs::symlink(dir.path(), dir.path().join("loop")).unwrap();
    std::os::unix::fs::symlink(dir.path().join("target.cql"), dir.path().join("002_b.cql"))
        .unwrap();

    let location = Location::new(FILE_SCHEME, dir.path().to_str().unwrap());
    let names = FileSystemScanner
        .find_resource_names("db/migration/", &location)
        .unwrap();
    assert_eq!(
        names,
        vec![
            "db/migration/001_a.cql",
            "db/migration/002_b.cql",
            "db/migration/target.cql",
        ]
    );
}

#[test]
fn test_filesystem_scanner_unreadable_location() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("gone");
    let location = Location::new(FILE_SCHEME, missing.to_str().unwrap());

    let err = FileSystemScanner
        .find_resource_names("db/migration/", &location)
        .unwrap_err();
    assert!(matches!(err, CoreError::LocationScan { .. }));
}

#[test]
fn test_embedded_scanner_filters_by_logical_path() {
    let scanner = EmbeddedScanner::new(vec![&BUNDLE]);
    let location = Location::new(EMBEDDED_SCHEME, "core/db/migration/");
    let names = scanner
        .find_resource_names("db/migration/", &location)
        .unwrap();
    assert_eq!(names, vec!["db/migration/001_a.cql", "db/migration/002_b.cql"]);
}

#[test]
fn test_embedded_scanner_unknown_bundle() {
    let scanner = EmbeddedScanner::new(vec![&BUNDLE]);
    let location = Location::new(EMBEDDED_SCHEME, "plugins/db/migration/");
    assert!(matches!(
        scanner.find_resource_names("db/migration/", &location),
        Err(CoreError::LocationScan { .. })
    ));
}
