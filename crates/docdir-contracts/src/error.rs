//! Error types for the docdir crates.
//!
//! Library operations return `DirectoryResult<T>`. The listing and
//! autocomplete layers are responsible for degrading network errors into
//! empty results; nothing in this module decides that.

use thiserror::Error;

/// The unified error type for the doctor directory.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// A remote source could not be reached or answered with a failure status.
    #[error("fetch from '{url}' failed: {reason}")]
    Fetch { url: String, reason: String },

    /// A response body did not have the expected shape.
    #[error("could not decode response: {reason}")]
    Decode { reason: String },

    /// A configuration file or symptom table is missing or invalid.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },
}

/// Convenience alias used throughout the docdir crates.
pub type DirectoryResult<T> = Result<T, DirectoryError>;
