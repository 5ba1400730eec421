//! Error types for the generation boundary

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Generation boundary errors
///
/// `RateLimited` is the only transient condition; everything else
/// propagates immediately without retry.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Rate limited by the generation service")]
    RateLimited,

    #[error("Generation service error: {0}")]
    Api(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Malformed completion response: {0}")]
    MalformedResponse(String),

    #[error("Generation failed after {attempts} rate-limited attempts")]
    RetriesExhausted { attempts: u32 },
}
