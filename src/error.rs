//! Error types for the profile cache
//!
//! Cache operations are total and never fail; these cover the fallible
//! edges around them (configuration and fixture loading).

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the profile cache crate.
#[derive(Error, Debug)]
pub enum CacheError {
    /// A configuration value is out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Fixture file could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Fixture file is not valid JSON for the expected shape
    #[error("Malformed fixtures: {0}")]
    Json(#[from] serde_json::Error),
}

// == Result Type Alias ==
/// Convenience Result type for the profile cache crate.
pub type Result<T> = std::result::Result<T, CacheError>;
