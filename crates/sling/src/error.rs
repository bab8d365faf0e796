//! Error types

use thiserror::Error;

/// Errors surfaced by the client core
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid base URL at construction
    #[error("invalid base URL: {0}")]
    Config(#[from] url::ParseError),
    /// Transport-level failure: the request never produced an HTTP response
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),
    /// JSON serialization or deserialization failed
    ///
    /// Body decoding is lazy: a malformed body only raises this error when
    /// [`Response::json`](crate::Response::json) is called.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// Response body requested as text but not valid UTF-8
    #[error("body is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),
}

/// Classified transport failures
///
/// An HTTP response with an error status is not a transport failure; it is
/// returned as a normal [`Response`](crate::Response). This type only covers
/// requests that never completed.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Request timed out
    #[error("request timeout")]
    Timeout,
    /// Connection could not be established or was dropped
    #[error("connection error: {0}")]
    Connection(String),
    /// Request could not be built
    #[error("request build error: {0}")]
    Build(String),
    /// Other backend failure
    #[error("{0}")]
    Other(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout
        } else if err.is_connect() {
            TransportError::Connection(err.to_string())
        } else if err.is_builder() {
            TransportError::Build(err.to_string())
        } else {
            TransportError::Other(err.to_string())
        }
    }
}
