//! Status-based retry decorator

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use sling::{Error, Response, Transport, TransportRequest};

const DEFAULT_RETRY_STATUSES: [u16; 4] = [500, 502, 503, 504];
const DEFAULT_MAX_RETRIES: u32 = 3;
const DEFAULT_BACKOFF: Duration = Duration::from_millis(500);

/// Transport decorator that retries on retryable status codes
///
/// A response whose status is in the retry set is retried up to
/// `max_retries` times with exponential backoff (`backoff * 2^attempt`).
/// Transport errors are not retried: they surface to the caller unchanged,
/// so a connection failure is never masked by the retry loop. The final
/// response is returned as-is even if its status is still retryable.
#[derive(Clone)]
pub struct Retry {
    inner: Arc<dyn Transport>,
    max_retries: u32,
    retry_statuses: Vec<u16>,
    backoff: Duration,
}

impl Retry {
    /// Wrap `inner` with the default policy: 3 retries on 500/502/503/504,
    /// 500ms initial backoff
    pub fn new(inner: Arc<dyn Transport>) -> Self {
        Self {
            inner,
            max_retries: DEFAULT_MAX_RETRIES,
            retry_statuses: DEFAULT_RETRY_STATUSES.to_vec(),
            backoff: DEFAULT_BACKOFF,
        }
    }

    /// Maximum number of retries after the initial attempt
    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Replace the set of status codes that trigger a retry
    pub fn retry_statuses(mut self, statuses: impl IntoIterator<Item = u16>) -> Self {
        self.retry_statuses = statuses.into_iter().collect();
        self
    }

    /// Initial backoff delay; doubles on every further attempt
    pub fn backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }
}

impl fmt::Debug for Retry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Retry")
            .field("max_retries", &self.max_retries)
            .field("retry_statuses", &self.retry_statuses)
            .field("backoff", &self.backoff)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Transport for Retry {
    async fn send(&self, request: TransportRequest) -> Result<Response, Error> {
        let mut attempt = 0;
        loop {
            let response = self.inner.send(request.clone()).await?;
            if attempt >= self.max_retries || !self.retry_statuses.contains(&response.status()) {
                return Ok(response);
            }

            let delay = self.backoff.saturating_mul(2u32.saturating_pow(attempt));
            tracing::warn!(
                status = response.status(),
                attempt = attempt + 1,
                delay_ms = delay.as_millis() as u64,
                "retrying request"
            );
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }
}
