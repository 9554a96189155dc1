//! Error types for the kdspace command-line driver

use thiserror::Error;

use kdspace_core::SpatialError;

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Main error type for CLI operations
#[derive(Error, Debug)]
pub enum CliError {
    /// Errors from the point index or point loading
    #[error(transparent)]
    Spatial(#[from] SpatialError),

    /// Config file could not be parsed
    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Config values are inconsistent
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// JSON rendering errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
