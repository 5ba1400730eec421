//! Runtime configuration
//!
//! The credential and model selection come from the environment once at
//! startup and are injected into the client constructor; nothing reads
//! the environment mid-pipeline.

use anyhow::Context;

const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Settings for the generation boundary.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub model: String,
    /// Custom API endpoint; `None` means the client default.
    pub base_url: Option<String>,
}

impl Config {
    /// Load from the environment.
    ///
    /// `OPENAI_API_KEY` is required; `OPENAI_MODEL` and `OPENAI_BASE_URL`
    /// are optional overrides.
    pub fn from_env() -> anyhow::Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .context("OPENAI_API_KEY must be set to reach the generation service")?;
        let model = std::env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let base_url = std::env::var("OPENAI_BASE_URL").ok();
        Ok(Self {
            api_key,
            model,
            base_url,
        })
    }
}
