//! Request/response logging decorator

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use sling::{Error, Response, Transport, TransportRequest};

/// Transport decorator that logs every request and its outcome
///
/// Emits an info event with the method and URL before the send, and the
/// status plus elapsed time after it. Requests and responses pass through
/// unchanged.
#[derive(Clone)]
pub struct Logging {
    inner: Arc<dyn Transport>,
}

impl Logging {
    /// Wrap `inner` with logging
    pub fn new(inner: Arc<dyn Transport>) -> Self {
        Self { inner }
    }
}

impl fmt::Debug for Logging {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logging").finish_non_exhaustive()
    }
}

#[async_trait]
impl Transport for Logging {
    async fn send(&self, request: TransportRequest) -> Result<Response, Error> {
        let method = request.method;
        let url = request.url_with_params();
        tracing::info!(%method, %url, "sending request");

        let start = Instant::now();
        let result = self.inner.send(request).await;
        let elapsed_ms = start.elapsed().as_millis() as u64;

        match &result {
            Ok(response) => {
                tracing::info!(status = response.status(), elapsed_ms, "request finished");
            }
            Err(error) => {
                tracing::warn!(%error, elapsed_ms, "request failed");
            }
        }

        result
    }
}
