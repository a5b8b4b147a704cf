//! Resilient page fetching
//!
//! auto.ru answers suspected bots with a small interstitial page (captcha or
//! outright block) instead of an HTTP error, so validity is judged by size:
//! a fully rendered listing page is far larger than any interstitial. An
//! undersized body triggers a circuit rotation and a bounded retry.

use crate::config::FetchConfig;
use crate::crawler::transport::{Transport, TransportError};
use std::time::Duration;
use thiserror::Error;

/// Errors raised by the resilient fetch loop
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("gave up on {url} after {attempts} blocked responses; restart the run later")]
    RetriesExhausted { url: String, attempts: u32 },
}

/// Wraps a [`Transport`] with a size-based validity check and bounded
/// retry-with-rotation
///
/// # Retry contract
///
/// | Observation | Action |
/// |-------------|--------|
/// | Body length >= `min_html_length` chars | Return the body |
/// | Undersized body, budget remains | Rotate circuit, fixed pause, retry |
/// | Undersized body, budget exhausted | `FetchError::RetriesExhausted` |
/// | Transport failure | Propagated immediately, no retry |
///
/// The attempt budget is scoped to one [`fetch`](ResilientFetcher::fetch)
/// call; distinct URLs do not share failures. The pause is a fixed delay
/// with no backoff growth: rotation is what clears the block, not time.
pub struct ResilientFetcher<T: Transport> {
    transport: T,
    config: FetchConfig,
}

impl<T: Transport> ResilientFetcher<T> {
    /// Creates a fetcher over the given transport
    pub fn new(transport: T, config: FetchConfig) -> Self {
        Self { transport, config }
    }

    /// Fetches one URL, rotating the egress identity until the response
    /// looks like a real listing page or the attempt budget runs out
    pub async fn fetch(&mut self, url: &str) -> Result<String, FetchError> {
        let mut attempts = 0u32;

        loop {
            let body = self.transport.fetch(url).await?;

            if body.chars().count() >= self.config.min_html_length {
                return Ok(body);
            }

            attempts += 1;
            tracing::warn!(
                "response for {} is undersized ({} < {} chars), likely a captcha or request block; rotating circuit",
                url,
                body.chars().count(),
                self.config.min_html_length
            );
            tracing::info!("attempt {}/{}", attempts, self.config.max_attempts);

            self.transport.rotate_identity().await?;
            tokio::time::sleep(Duration::from_millis(self.config.rotate_delay_ms)).await;

            if attempts == self.config.max_attempts {
                return Err(FetchError::RetriesExhausted {
                    url: url.to_string(),
                    attempts,
                });
            }
        }
    }

    /// Consumes the fetcher and returns the transport
    pub fn into_transport(self) -> T {
        self.transport
    }
}
