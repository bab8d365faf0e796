//! HTTP response handle

use serde::de::DeserializeOwned;

use crate::error::Error;
use crate::headers::Headers;

/// Plain-data HTTP response
///
/// Carries the status code, case-insensitive headers, and the raw body
/// bytes. Body decoding is lazy: [`text`](Response::text) and
/// [`json`](Response::json) only fail when they are called on a body that
/// cannot be decoded. The type is `Clone` so composition layers (for example
/// a response cache) can store and replay it.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    status: u16,
    headers: Headers,
    body: Vec<u8>,
}

impl Response {
    /// Assemble a response from its parts
    ///
    /// Transports and test doubles use this; library consumers normally only
    /// read responses.
    pub fn new(status: u16, headers: Headers, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// HTTP status code
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Whether the status is a success (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Whether the status is a client error (4xx)
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status)
    }

    /// Whether the status is a server error (5xx)
    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.status)
    }

    /// Response headers
    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Raw body bytes
    pub fn bytes(&self) -> &[u8] {
        &self.body
    }

    /// Body as UTF-8 text
    pub fn text(&self) -> Result<&str, Error> {
        Ok(std::str::from_utf8(&self.body)?)
    }

    /// Decode the body as JSON
    ///
    /// A malformed body raises [`Error::Json`] here and nowhere earlier.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, Error> {
        Ok(serde_json::from_slice(&self.body)?)
    }
}
