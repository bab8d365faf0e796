//! Transport abstraction and the reqwest-backed default

use async_trait::async_trait;

use crate::error::{Error, TransportError};
use crate::headers::Headers;
use crate::method::Method;
use crate::request::{Body, TransportRequest};
use crate::response::Response;

/// Pluggable HTTP engine
///
/// The core only builds requests; connections, TLS, and raw I/O belong to the
/// transport. Implementations must be safe to call from many tasks at once,
/// since the client shares one transport across every chain derived from it.
/// Cancellation is by future drop; `send` must not require cleanup beyond
/// what the backend itself guarantees.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send a fully built request and return the raw response
    ///
    /// An HTTP response with an error status is returned as `Ok`; only
    /// failures that prevented a response (connection errors, timeouts) are
    /// `Err`.
    async fn send(&self, request: TransportRequest) -> Result<Response, Error>;
}

/// Default transport backed by a shared `reqwest::Client`
///
/// The reqwest client maintains its own connection pool and is cheap to
/// clone; all clones share the pool.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    inner: reqwest::Client,
}

impl HttpTransport {
    /// Transport with default reqwest settings
    pub fn new() -> Self {
        Self {
            inner: reqwest::Client::new(),
        }
    }

    /// Transport over a preconfigured `reqwest::Client`
    pub fn from_reqwest(client: reqwest::Client) -> Self {
        Self { inner: client }
    }
}

fn reqwest_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Patch => reqwest::Method::PATCH,
        Method::Delete => reqwest::Method::DELETE,
        Method::Head => reqwest::Method::HEAD,
        Method::Options => reqwest::Method::OPTIONS,
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: TransportRequest) -> Result<Response, Error> {
        let url = request.url_with_params();
        let mut builder = self.inner.request(reqwest_method(request.method), url);

        for (name, value) in request.headers.iter() {
            builder = builder.header(name, value);
        }

        builder = match &request.body {
            Some(Body::Json(value)) => builder.json(value),
            Some(Body::Bytes(bytes)) => builder.body(bytes.clone()),
            None => builder,
        };

        let response = builder.send().await.map_err(TransportError::from)?;

        let status = response.status().as_u16();
        let mut headers = Headers::new();
        for (name, value) in response.headers() {
            headers.insert(
                name.as_str(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            );
        }
        let body = response
            .bytes()
            .await
            .map_err(TransportError::from)?
            .to_vec();

        Ok(Response::new(status, headers, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_is_constructable() {
        let transport = HttpTransport::new();
        let _ = format!("{:?}", transport);
    }

    #[test]
    fn from_reqwest_wraps_existing_client() {
        let transport = HttpTransport::from_reqwest(reqwest::Client::new());
        let _ = format!("{:?}", transport);
    }
}
