//! Chat-completion client
//!
//! The pipeline only ever talks to the generation service through the
//! `ChatClient` trait: a system instruction plus a user prompt in, the
//! generated text out. `OpenAiClient` is the production implementation;
//! tests substitute scripted mocks.

use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// The external generation boundary.
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Exchange a two-message conversation (system instruction + user
    /// prompt) for generated text.
    async fn complete(&self, system: &str, user: &str) -> Result<String>;
}

/// Chat-completion client for the OpenAI API.
///
/// The credential is injected at construction; nothing here reads the
/// environment.
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl OpenAiClient {
    /// Create a client against the default API endpoint.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Result<Self> {
        Self::with_base_url(api_key, model, DEFAULT_BASE_URL)
    }

    /// Create a client against a custom endpoint (Azure deployments,
    /// proxies, test servers).
    pub fn with_base_url(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            model: model.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn parse_response(json: &Value) -> Result<String> {
        json.pointer("/choices/0/message/content")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| {
                Error::MalformedResponse("missing choices[0].message.content".to_string())
            })
    }
}

#[async_trait]
impl ChatClient for OpenAiClient {
    async fn complete(&self, system: &str, user: &str) -> Result<String> {
        let body = serde_json::json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": system },
                { "role": "user", "content": user }
            ]
        });

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        if response.status() == StatusCode::TOO_MANY_REQUESTS {
            return Err(Error::RateLimited);
        }
        if !response.status().is_success() {
            return Err(Error::Api(format!(
                "completion failed with status {}",
                response.status()
            )));
        }

        let json: Value = response.json().await?;
        Self::parse_response(&json)
    }
}
