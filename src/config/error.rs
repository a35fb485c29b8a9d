//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Port value is outside valid range (1-65535).
    #[error("invalid port '{value}': must be between 1 and 65535")]
    InvalidPort { value: String },

    /// Port string could not be parsed as a number.
    #[error("failed to parse port '{value}': {source}")]
    PortParseError {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    /// Bind address string could not be parsed.
    #[error("failed to parse bind address '{value}': {source}")]
    InvalidBindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },

    /// Threshold string could not be parsed as a number.
    #[error("failed to parse threshold '{value}': {source}")]
    ThresholdParseError {
        value: String,
        #[source]
        source: std::num::ParseFloatError,
    },

    /// Threshold is outside the percentage range.
    #[error("invalid threshold '{value}': must be between 0 and 100")]
    InvalidThreshold { value: String },

    /// Eligible content type is blank.
    #[error("eligible content type must not be empty")]
    EmptyContentType,

    /// CORS origin is not a valid header value.
    #[error("invalid CORS origin '{value}'")]
    InvalidCorsOrigin { value: String },

    /// Upload limit string could not be parsed as a byte count.
    #[error("failed to parse upload limit '{value}': {source}")]
    UploadLimitParseError {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    /// Upload limit of zero would reject every document.
    #[error("upload limit must be greater than zero")]
    InvalidUploadLimit,

    /// Specified path does not exist on the filesystem.
    #[error("path does not exist: {path}")]
    PathNotFound { path: PathBuf },

    /// Path exists but is not a directory (when a directory was expected).
    #[error("path is not a directory: {path}")]
    NotADirectory { path: PathBuf },
}
