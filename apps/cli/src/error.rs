//! Error type for the pipeline driver

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Pipeline errors
///
/// Every variant is fatal: the run aborts on the first one. Skipping a
/// document reference because no template applies is not an error.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Bundle error: {0}")]
    Bundle(#[from] scribe_bundle::Error),

    #[error("Context error: {0}")]
    Context(#[from] scribe_context::Error),

    #[error("Generation error: {0}")]
    Generation(#[from] scribe_llm::Error),

    #[error("No DocumentReference with id {0} in the output bundle")]
    DocumentReferenceNotFound(String),

    #[error("DocumentReference {0} has no attachment to write into")]
    AttachmentMissing(String),

    #[error("Invalid output path derived from {0}")]
    InvalidOutputPath(PathBuf),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
