//! Note generation with bounded retry
//!
//! Wraps one `ChatClient` call in a retry policy: rate-limit failures back
//! off linearly and retry up to the attempt budget, every other failure
//! propagates immediately. Exhausting the budget is terminal for the whole
//! run, not just the current note.

use crate::client::ChatClient;
use crate::error::{Error, Result};
use std::time::Duration;
use tokio::time::sleep;

/// Retry budget and backoff shape for generation calls.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl RetryPolicy {
    /// Delay before retrying after the given (1-based) failed attempt:
    /// `attempt * base_delay`.
    pub fn delay_after(&self, attempt: u32) -> Duration {
        self.base_delay * attempt
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 4,
            base_delay: Duration::from_secs(5),
        }
    }
}

/// Drives the generation boundary under a retry policy.
pub struct NoteGenerator<C> {
    client: C,
    policy: RetryPolicy,
}

impl<C: ChatClient> NoteGenerator<C> {
    pub fn new(client: C, policy: RetryPolicy) -> Self {
        Self { client, policy }
    }

    /// Generate text for one prompt, retrying rate-limit failures.
    ///
    /// No sleep follows the final failed attempt; exhaustion surfaces as
    /// `RetriesExhausted` right away.
    pub async fn generate(&self, system_role: &str, prompt: &str) -> Result<String> {
        for attempt in 1..=self.policy.max_attempts {
            match self.client.complete(system_role, prompt).await {
                Ok(text) => return Ok(text),
                Err(Error::RateLimited) => {
                    if attempt == self.policy.max_attempts {
                        break;
                    }
                    let delay = self.policy.delay_after(attempt);
                    tracing::warn!(
                        attempt,
                        delay_secs = delay.as_secs(),
                        "Rate limited, backing off before retry"
                    );
                    sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
        Err(Error::RetriesExhausted {
            attempts: self.policy.max_attempts,
        })
    }
}
