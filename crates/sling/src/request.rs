//! Per-call request options and the transport request

use std::collections::BTreeMap;

use serde::Serialize;

use crate::auth::Auth;
use crate::error::Error;
use crate::headers::Headers;
use crate::method::Method;

/// Request body payload
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    /// JSON value, serialized onto the wire with a `content-type` of
    /// `application/json`
    Json(serde_json::Value),
    /// Raw bytes passed through unchanged
    Bytes(Vec<u8>),
}

/// Transient per-call options, built in place and consumed by dispatch
///
/// ```
/// use sling::{Auth, RequestOptions};
///
/// let options = RequestOptions::new()
///     .param("limit", 10)
///     .header("accept", "application/json")
///     .auth(Auth::bearer("token"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub(crate) params: BTreeMap<String, String>,
    pub(crate) headers: Headers,
    pub(crate) body: Option<Body>,
    pub(crate) auth: Option<Auth>,
}

impl RequestOptions {
    /// Empty options
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one query parameter; a later write to the same key wins
    pub fn param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.params.insert(key.into(), value.to_string());
        self
    }

    /// Add several query parameters at once
    pub fn params<I, K, V>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: ToString,
    {
        for (key, value) in params {
            self.params.insert(key.into(), value.to_string());
        }
        self
    }

    /// Add one header, merged over the client defaults at dispatch time
    /// (per-call values win per name)
    pub fn header(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Set a JSON body
    pub fn json<T: Serialize + ?Sized>(mut self, value: &T) -> Result<Self, Error> {
        self.body = Some(Body::Json(serde_json::to_value(value)?));
        Ok(self)
    }

    /// Set a raw byte body
    pub fn bytes(mut self, bytes: impl Into<Vec<u8>>) -> Self {
        self.body = Some(Body::Bytes(bytes.into()));
        self
    }

    /// Override the client's default credential for this call only
    pub fn auth(mut self, auth: Auth) -> Self {
        self.auth = Some(auth);
        self
    }
}

/// A fully merged request, ready for a [`Transport`](crate::Transport)
///
/// Headers already include the session defaults and the rendered
/// `authorization` credential; nothing is added by the transport besides
/// what the backend itself requires.
#[derive(Debug, Clone)]
pub struct TransportRequest {
    /// Request method
    pub method: Method,
    /// Resolved URL without the query string
    pub url: String,
    /// Query parameters, one value per key
    pub params: BTreeMap<String, String>,
    /// Merged headers
    pub headers: Headers,
    /// Body payload, if any
    pub body: Option<Body>,
}

impl TransportRequest {
    /// Final URL including the serialized query string
    ///
    /// Parameters are form-urlencoded in key order, so the same request
    /// always yields the same string.
    pub fn url_with_params(&self) -> String {
        if self.params.is_empty() {
            return self.url.clone();
        }
        let query = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.params.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .finish();
        format!("{}?{}", self.url, query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_param_write_wins() {
        let options = RequestOptions::new().param("page", 1).param("page", 2);
        assert_eq!(options.params.get("page").map(String::as_str), Some("2"));
    }

    #[test]
    fn json_body_is_serialized_once() {
        let options = RequestOptions::new()
            .json(&serde_json::json!({"name": "x"}))
            .expect("serializable body");
        assert_eq!(
            options.body,
            Some(Body::Json(serde_json::json!({"name": "x"})))
        );
    }

    #[test]
    fn url_with_params_is_sorted_and_encoded() {
        let request = TransportRequest {
            method: Method::Get,
            url: "http://localhost:8000/users".to_string(),
            params: [("b", "two words"), ("a", "1")]
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            headers: Headers::new(),
            body: None,
        };
        assert_eq!(
            request.url_with_params(),
            "http://localhost:8000/users?a=1&b=two+words"
        );
    }

    #[test]
    fn url_without_params_has_no_query() {
        let request = TransportRequest {
            method: Method::Get,
            url: "http://localhost:8000/users".to_string(),
            params: BTreeMap::new(),
            headers: Headers::new(),
            body: None,
        };
        assert_eq!(request.url_with_params(), "http://localhost:8000/users");
    }
}
