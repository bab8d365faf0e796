//! Client session and builder

use std::fmt;
use std::ops::Div;
use std::sync::Arc;

use url::Url;

use crate::auth::Auth;
use crate::error::Error;
use crate::headers::Headers;
use crate::node::PathNode;
use crate::resolver::{ResolveUrl, StandardResolver};
use crate::transport::{HttpTransport, Transport};

/// Shared session configuration, read-only after construction
///
/// Every node derived from a client holds an `Arc` to the same session, so
/// concurrent dispatches never contend on locks.
pub(crate) struct Session {
    pub(crate) base: Url,
    pub(crate) headers: Headers,
    pub(crate) auth: Option<Auth>,
    pub(crate) append_slash: bool,
    pub(crate) transport: Arc<dyn Transport>,
    pub(crate) resolver: Arc<dyn ResolveUrl>,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("base", &self.base)
            .field("headers", &self.headers)
            .field("append_slash", &self.append_slash)
            .finish_non_exhaustive()
    }
}

/// Root of the chaining API
///
/// Owns the session configuration (base URL, default headers, credential,
/// trailing-slash policy) and the shared transport. Chaining derives
/// [`PathNode`] values and never mutates the client; clones share the same
/// session.
///
/// ```no_run
/// use sling::{Client, RequestOptions};
///
/// # async fn example() -> Result<(), sling::Error> {
/// let api = Client::builder("http://localhost:8000")
///     .header("accept", "application/json")
///     .append_slash(false)
///     .build()?;
/// let response = api.child("users").get(RequestOptions::new()).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Client {
    session: Arc<Session>,
}

impl Client {
    /// Client with default configuration over `base_url`
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if `base_url` is not a valid absolute URL.
    pub fn new(base_url: impl Into<String>) -> Result<Self, Error> {
        Self::builder(base_url).build()
    }

    /// Start configuring a client
    pub fn builder(base_url: impl Into<String>) -> ClientBuilder {
        ClientBuilder {
            base_url: base_url.into(),
            headers: Headers::new(),
            auth: None,
            append_slash: false,
            transport: None,
            resolver: None,
        }
    }

    /// The node addressing the base URL itself
    pub fn root(&self) -> PathNode {
        PathNode {
            session: Arc::clone(&self.session),
            segments: Vec::new(),
        }
    }

    /// Derive the child node for one path segment
    pub fn child(&self, name: impl Into<String>) -> PathNode {
        self.root().child(name)
    }

    /// Derive a node by extending with zero or more segments, left to right
    pub fn join<I, S>(&self, segments: I) -> PathNode
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.root().join(segments)
    }

    /// The validated base URL
    pub fn base_url(&self) -> &Url {
        &self.session.base
    }

    /// Resolved URL of the root, per the session's resolver
    pub fn url(&self) -> String {
        self.session
            .resolver
            .resolve(&self.session.base, &[], self.session.append_slash)
    }

    /// Explicitly release the session and its transport
    ///
    /// Dropping the last clone of a client (and of every node derived from
    /// it) has the same effect; `close` only makes the release visible at the
    /// call site.
    pub fn close(self) {
        tracing::debug!(base = %self.session.base, "closing client session");
    }
}

impl fmt::Display for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url())
    }
}

impl Div<&str> for &Client {
    type Output = PathNode;

    fn div(self, segment: &str) -> PathNode {
        self.child(segment)
    }
}

/// Builder for [`Client`]
///
/// Defaults: no headers, no credential, `append_slash` off, a fresh
/// [`HttpTransport`], and the [`StandardResolver`].
pub struct ClientBuilder {
    base_url: String,
    headers: Headers,
    auth: Option<Auth>,
    append_slash: bool,
    transport: Option<Arc<dyn Transport>>,
    resolver: Option<Arc<dyn ResolveUrl>>,
}

impl fmt::Debug for ClientBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientBuilder")
            .field("base_url", &self.base_url)
            .field("headers", &self.headers)
            .field("append_slash", &self.append_slash)
            .finish_non_exhaustive()
    }
}

impl ClientBuilder {
    /// Add one default header, sent with every request
    pub fn header(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Add several default headers at once
    pub fn headers<I, K, V>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        for (name, value) in headers {
            self.headers.insert(name, value);
        }
        self
    }

    /// Set the default credential, applied unless a call overrides it
    pub fn auth(mut self, auth: Auth) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Append a trailing `/` to every resolved non-root URL
    pub fn append_slash(mut self, append_slash: bool) -> Self {
        self.append_slash = append_slash;
        self
    }

    /// Inject the transport; tests and middleware substitute their own here
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Inject the URL resolution strategy
    pub fn resolver(mut self, resolver: Arc<dyn ResolveUrl>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    /// Validate the base URL and build the client
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the base URL does not parse.
    pub fn build(self) -> Result<Client, Error> {
        let base = Url::parse(&self.base_url)?;
        Ok(Client {
            session: Arc::new(Session {
                base,
                headers: self.headers,
                auth: self.auth,
                append_slash: self.append_slash,
                transport: self
                    .transport
                    .unwrap_or_else(|| Arc::new(HttpTransport::new())),
                resolver: self.resolver.unwrap_or_else(|| Arc::new(StandardResolver)),
            }),
        })
    }
}
