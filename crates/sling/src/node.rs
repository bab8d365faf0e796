//! Path nodes and request dispatch

use std::fmt;
use std::ops::Div;
use std::sync::Arc;

use crate::client::Session;
use crate::error::Error;
use crate::method::Method;
use crate::request::{RequestOptions, TransportRequest};
use crate::response::Response;

/// A position in the logical URL tree
///
/// A node is the ordered list of segments accumulated from the root client.
/// Nodes are value-like and immutable: extending one yields a new node, and
/// two nodes built from the same client over the same segment sequence are
/// observably indistinguishable. Nodes are cheap to clone and normally live
/// only as long as the expression that builds them.
///
/// Segment strings are opaque. They are never split, escaped, or collapsed,
/// even when they contain `/`; the same policy applies to [`child`] and
/// [`join`]. Chaining and dispatch are distinct methods, so a resource whose
/// name matches an HTTP verb is simply `node.child("get")`.
///
/// [`child`]: PathNode::child
/// [`join`]: PathNode::join
#[derive(Debug, Clone)]
pub struct PathNode {
    pub(crate) session: Arc<Session>,
    pub(crate) segments: Vec<String>,
}

impl PathNode {
    /// Derive the child node for one more path segment
    pub fn child(&self, name: impl Into<String>) -> PathNode {
        let mut segments = self.segments.clone();
        segments.push(name.into());
        PathNode {
            session: Arc::clone(&self.session),
            segments,
        }
    }

    /// Extend with zero or more segments, left to right
    ///
    /// `join([])` yields a node resolving to the same URL as `self`.
    pub fn join<I, S>(&self, segments: I) -> PathNode
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut extended = self.segments.clone();
        extended.extend(segments.into_iter().map(Into::into));
        PathNode {
            session: Arc::clone(&self.session),
            segments: extended,
        }
    }

    /// Segment names from the root to this node
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Fully resolved URL, per the session's resolver
    pub fn url(&self) -> String {
        self.session.resolver.resolve(
            &self.session.base,
            &self.segments,
            self.session.append_slash,
        )
    }

    /// Resolve the chain and send a request with the given method
    ///
    /// Session defaults and per-call options are merged here: per-call
    /// headers win per name, and a per-call credential overrides the session
    /// default. Neither the node nor the session is mutated.
    ///
    /// # Errors
    ///
    /// Surfaces transport failures as [`Error::Transport`]. An HTTP response
    /// with an error status is not an error; inspect
    /// [`Response::status`](crate::Response::status).
    pub async fn dispatch(
        &self,
        method: Method,
        options: RequestOptions,
    ) -> Result<Response, Error> {
        let request = self.build_request(method, options);
        tracing::debug!(method = %request.method, url = %request.url, "dispatching request");
        self.session.transport.send(request).await
    }

    /// GET the resource addressed by this node
    pub async fn get(&self, options: RequestOptions) -> Result<Response, Error> {
        self.dispatch(Method::Get, options).await
    }

    /// POST to the resource addressed by this node
    pub async fn post(&self, options: RequestOptions) -> Result<Response, Error> {
        self.dispatch(Method::Post, options).await
    }

    /// PUT to the resource addressed by this node
    pub async fn put(&self, options: RequestOptions) -> Result<Response, Error> {
        self.dispatch(Method::Put, options).await
    }

    /// PATCH the resource addressed by this node
    pub async fn patch(&self, options: RequestOptions) -> Result<Response, Error> {
        self.dispatch(Method::Patch, options).await
    }

    /// DELETE the resource addressed by this node
    pub async fn delete(&self, options: RequestOptions) -> Result<Response, Error> {
        self.dispatch(Method::Delete, options).await
    }

    /// HEAD the resource addressed by this node
    pub async fn head(&self, options: RequestOptions) -> Result<Response, Error> {
        self.dispatch(Method::Head, options).await
    }

    fn build_request(&self, method: Method, options: RequestOptions) -> TransportRequest {
        let mut headers = self.session.headers.clone();
        headers.merge(&options.headers);

        // Per-call credential wins over the session default; an explicit
        // per-call authorization header wins over both.
        let auth = options.auth.as_ref().or(self.session.auth.as_ref());
        if let Some(auth) = auth {
            if !options.headers.contains("authorization") {
                headers.insert("authorization", auth.header_value());
            }
        }

        TransportRequest {
            method,
            url: self.url(),
            params: options.params,
            headers,
            body: options.body,
        }
    }
}

impl fmt::Display for PathNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url())
    }
}

impl Div<&str> for &PathNode {
    type Output = PathNode;

    fn div(self, segment: &str) -> PathNode {
        self.child(segment)
    }
}

impl Div<&str> for PathNode {
    type Output = PathNode;

    fn div(mut self, segment: &str) -> PathNode {
        self.segments.push(segment.to_string());
        self
    }
}

#[cfg(test)]
mod tests {
    use crate::client::Client;

    fn client() -> Client {
        Client::new("http://localhost:8000").expect("valid base URL")
    }

    #[test]
    fn child_and_join_are_equivalent() {
        let api = client();
        let by_child = api.child("sample").child("path");
        let by_join = api.join(["sample", "path"]);
        assert_eq!(by_child.url(), by_join.url());
    }

    #[test]
    fn empty_join_resolves_to_parent_url() {
        let node = client().child("users");
        let rejoined = node.join(Vec::<String>::new());
        assert_eq!(rejoined.url(), node.url());
    }

    #[test]
    fn display_matches_url() {
        let node = client().child("a").child("b");
        assert_eq!(node.to_string(), node.url());
        assert_eq!(node.url(), "http://localhost:8000/a/b");
    }

    #[test]
    fn div_chains_by_value_and_by_reference() {
        let api = client();
        let node = &api / "a" / "b";
        assert_eq!(node.url(), "http://localhost:8000/a/b");
        let further = &node / "c";
        assert_eq!(further.url(), "http://localhost:8000/a/b/c");
        // The original node is untouched.
        assert_eq!(node.url(), "http://localhost:8000/a/b");
    }

    #[test]
    fn segments_reports_the_chain() {
        let node = client().join(["a", "b"]);
        assert_eq!(node.segments(), ["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn verb_named_segments_are_plain_segments() {
        let node = client().child("get");
        assert_eq!(node.url(), "http://localhost:8000/get");
    }
}
