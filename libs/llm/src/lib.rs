//! Chat-completion client and bounded-retry note generation
//!
//! The generation service is modeled as a single call boundary
//! ([`ChatClient`]) with two failure classes: rate-limit conditions,
//! which are retried with linear backoff under a [`RetryPolicy`], and
//! everything else, which is terminal. [`NoteGenerator`] ties the two
//! together.

pub mod client;
pub mod error;
pub mod generator;

// Re-export commonly used types
pub use client::{ChatClient, OpenAiClient};
pub use error::{Error, Result};
pub use generator::{NoteGenerator, RetryPolicy};
