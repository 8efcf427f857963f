//! Error types for prop
//!
//! Provides a unified error type for all backend operations.

use thiserror::Error;

/// Result type alias using PropError
pub type Result<T> = std::result::Result<T, PropError>;

/// Unified error type for prop operations
#[derive(Debug, Error)]
pub enum PropError {
    // -------------------------------------------------------------------------
    // Lookup Errors
    // -------------------------------------------------------------------------
    /// A key, list element, set member or index does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// A list index is beyond the bounds of the list
    #[error("Index out of range: {index} (list length {len})")]
    OutOfRange { index: i64, len: usize },

    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Backend Errors
    // -------------------------------------------------------------------------
    /// The selected backend does not implement this operation
    #[error("Not implemented: {0}")]
    Unsupported(&'static str),

    // -------------------------------------------------------------------------
    // Permission Errors
    // -------------------------------------------------------------------------
    /// A configured system user or group could not be resolved
    #[error("Identity resolution failed: {0}")]
    IdentityResolution(String),

    // -------------------------------------------------------------------------
    // Input Errors
    // -------------------------------------------------------------------------
    /// A namespace or key is not usable as a single path segment
    #[error("Invalid name: {0:?}")]
    InvalidName(String),

    /// A value cannot be stored or read in the on-disk encoding
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for PropError {
    fn from(err: serde_json::Error) -> Self {
        PropError::Serialization(err.to_string())
    }
}
