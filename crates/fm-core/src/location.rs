//! Physical resource locations.

use std::fmt;

/// Scheme of directories on the local filesystem.
pub const FILE_SCHEME: &str = "file";

/// Scheme of resources compiled into the binary.
pub const EMBEDDED_SCHEME: &str = "embedded";

/// A physical place a logical script path resolved to, written `scheme:path`.
///
/// For `file` the path is a directory; for `embedded` it is
/// `<bundle>/<logical path>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Location {
    scheme: String,
    path: String,
}

impl Location {
    pub fn new(scheme: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            scheme: scheme.into(),
            path: path.into(),
        }
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.scheme, self.path)
    }
}
