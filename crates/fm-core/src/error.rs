//! Error types for fm-core

use thiserror::Error;

/// Core error type for Feathermig
#[derive(Error, Debug)]
pub enum CoreError {
    /// E001: Configuration file not found
    #[error("[E001] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// E002: Failed to parse configuration file
    #[error("[E002] Failed to parse config: {0}")]
    ConfigParseError(#[from] serde_yaml::Error),

    /// E003: Invalid configuration value
    #[error("[E003] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// E004: IO error with file path context
    #[error("[E004] Failed to read '{path}': {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },

    /// M001: The logical script path is empty after normalization
    #[error("[M001] Script path must not be empty")]
    EmptyScriptPath,

    /// M002: A resolved location could not be listed
    #[error("[M002] Error while scanning script location '{location}': {source}")]
    LocationScan {
        location: String,
        source: std::io::Error,
    },

    /// M003: The version prefix of a script name is not a non-negative integer
    #[error("[M003] Error for script {script_name}. Unable to extract version: {source}")]
    InvalidVersion {
        script_name: String,
        source: std::num::ParseIntError,
    },

    /// M004: Two scripts share a version under a policy that forbids it
    #[error("[M004] Found two different migration scripts with the same version {version}: '{existing}' and '{duplicate}'")]
    DuplicateVersion {
        version: u32,
        existing: String,
        duplicate: String,
    },

    /// M005: Range query with start after end
    #[error("[M005] endVersion {end} cannot be smaller than startVersion {start}")]
    InvalidRange { start: u32, end: u32 },

    /// M006: Script content could not be read or decoded at query time
    #[error("[M006] Error while reading script {script_name} from '{resource}': {source}")]
    ScriptRead {
        script_name: String,
        resource: String,
        source: std::io::Error,
    },
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;
