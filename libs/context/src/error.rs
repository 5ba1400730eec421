//! Error types for context construction

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Context construction errors
#[derive(Error, Debug)]
pub enum Error {
    #[error("Patient has no race extension ({0})")]
    RaceExtensionMissing(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Bundle error: {0}")]
    Bundle(#[from] scribe_bundle::Error),
}
