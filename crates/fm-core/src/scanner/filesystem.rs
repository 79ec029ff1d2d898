//! Scanner for directories on the local filesystem.

use super::LocationScanner;
use crate::error::{CoreError, CoreResult};
use crate::location::{Location, FILE_SCHEME};
use std::path::Path;

/// Lists files below a `file:` location, recursing into subdirectories.
///
/// Links to files are listed; links to directories are not followed.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileSystemScanner;

impl LocationScanner for FileSystemScanner {
    fn supports(&self, scheme: &str) -> bool {
        scheme.eq_ignore_ascii_case(FILE_SCHEME)
    }

    fn find_resource_names(
        &self,
        logical_path: &str,
        location: &Location,
    ) -> CoreResult<Vec<String>> {
        let root = Path::new(location.path());
        let mut names = Vec::new();
        walk(root, logical_path, &mut names).map_err(|source| CoreError::LocationScan {
            location: location.to_string(),
            source,
        })?;
        names.sort();
        log::debug!("Found {} resources in {}", names.len(), location);
        Ok(names)
    }
}

fn walk(dir: &Path, prefix: &str, names: &mut Vec<String>) -> std::io::Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let Some(file_name) = entry.file_name().to_str().map(str::to_owned) else {
            log::warn!("Skipping non UTF-8 path {}", path.display());
            continue;
        };
        let file_type = entry.file_type()?;
        if file_type.is_dir() {
            walk(&path, &format!("{prefix}{file_name}/"), names)?;
        } else if file_type.is_symlink() && path.is_dir() {
            log::debug!("Not following directory link {}", path.display());
        } else {
            names.push(format!("{prefix}{file_name}"));
        }
    }
    Ok(())
}
