//! Fixed-header injection decorator

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use sling::{Error, Headers, Response, Transport, TransportRequest};

/// Transport decorator that adds fixed headers to every request
///
/// A header already present on the request (from the session defaults or a
/// per-call option) is left untouched; the decorator only fills gaps.
#[derive(Clone)]
pub struct ExtraHeaders {
    inner: Arc<dyn Transport>,
    headers: Headers,
}

impl ExtraHeaders {
    /// Wrap `inner`, injecting `headers` into every request
    pub fn new(inner: Arc<dyn Transport>, headers: Headers) -> Self {
        Self { inner, headers }
    }
}

impl fmt::Debug for ExtraHeaders {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtraHeaders")
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Transport for ExtraHeaders {
    async fn send(&self, mut request: TransportRequest) -> Result<Response, Error> {
        for (name, value) in self.headers.iter() {
            if !request.headers.contains(name) {
                request.headers.insert(name, value);
            }
        }
        self.inner.send(request).await
    }
}
