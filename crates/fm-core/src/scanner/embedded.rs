//! Scanner for resources compiled into the binary.

use super::LocationScanner;
use crate::error::{CoreError, CoreResult};
use crate::location::{Location, EMBEDDED_SCHEME};
use crate::resource::EmbeddedBundle;
use std::io;

/// Lists resources of the [`EmbeddedBundle`]s it was built with.
///
/// `embedded:` locations are written `<bundle>/<logical path>`.
#[derive(Debug, Clone, Default)]
pub struct EmbeddedScanner {
    bundles: Vec<&'static EmbeddedBundle>,
}

impl EmbeddedScanner {
    pub fn new(bundles: Vec<&'static EmbeddedBundle>) -> Self {
        Self { bundles }
    }
}

impl LocationScanner for EmbeddedScanner {
    fn supports(&self, scheme: &str) -> bool {
        scheme.eq_ignore_ascii_case(EMBEDDED_SCHEME)
    }

    fn find_resource_names(
        &self,
        logical_path: &str,
        location: &Location,
    ) -> CoreResult<Vec<String>> {
        let bundle_name = location
            .path()
            .split_once('/')
            .map_or(location.path(), |(bundle, _)| bundle);
        let bundle = self
            .bundles
            .iter()
            .find(|b| b.name == bundle_name)
            .ok_or_else(|| CoreError::LocationScan {
                location: location.to_string(),
                source: io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("no embedded bundle named '{bundle_name}'"),
                ),
            })?;

        let mut names: Vec<String> = bundle
            .resources
            .iter()
            .filter(|r| r.name.starts_with(logical_path))
            .map(|r| r.name.to_string())
            .collect();
        names.sort();
        Ok(names)
    }
}
