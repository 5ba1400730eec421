//! Error types for bundle handling

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Bundle handling errors
///
/// Lookup failures are data-integrity errors: a reference that does not
/// resolve means the input bundle violates its own cross-reference
/// invariants, so callers treat these as fatal rather than retrying.
#[derive(Error, Debug)]
pub enum Error {
    #[error("No entry found for reference: {0}")]
    ReferenceNotFound(String),

    #[error("No {resource_type} resource found in bundle")]
    ResourceNotFound { resource_type: String },

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid field value: {0}")]
    InvalidFieldValue(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
