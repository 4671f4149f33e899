//! Error types for sw-core

use thiserror::Error;

/// Core error type for Seedway
#[derive(Error, Debug)]
pub enum CoreError {
    /// E001: Configuration file not found
    #[error("[E001] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// E002: Failed to parse configuration file
    #[error("[E002] Failed to parse config: {message}")]
    ConfigParseError { message: String },

    /// E003: Invalid configuration value
    #[error("[E003] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// E004: Version string rejected by the version grammar
    #[error("[E004] Invalid version '{version}': {reason}")]
    InvalidVersion { version: String, reason: String },

    /// E005: The resource space failed while expanding a location pattern
    #[error("[E005] Unable to load resource from {location}: {source}")]
    ResourceAccess {
        location: String,
        #[source]
        source: std::io::Error,
    },

    /// E006: Location pattern could not be compiled
    #[error("[E006] Invalid location pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// E007: IO error
    #[error("[E007] IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;
