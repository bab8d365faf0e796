//! Fluent segment-chaining HTTP client
//!
//! This crate builds request URLs by deriving immutable path nodes from a
//! shared [`Client`] session. Each chaining step appends one path segment; a
//! terminal verb call resolves the accumulated chain into a URL and sends the
//! request through a pluggable [`Transport`].
//!
//! # Example
//!
//! ```no_run
//! use sling::{Client, RequestOptions};
//!
//! async fn example() -> Result<(), sling::Error> {
//!     let api = Client::new("http://localhost:8000")?;
//!     let resource = api.child("sample").child("path").child("to").child("resource");
//!     let response = resource.get(RequestOptions::new()).await?;
//!     assert_eq!(response.status(), 200);
//!     Ok(())
//! }
//! ```
//!
//! Chains never mutate the session: every node derived from a [`Client`]
//! shares the same configuration and transport, and two chains built from the
//! same segment sequence resolve to identical URLs.

mod auth;
mod client;
mod error;
mod headers;
mod method;
mod node;
mod request;
mod resolver;
mod response;
mod transport;

pub use auth::Auth;
pub use client::{Client, ClientBuilder};
pub use error::{Error, TransportError};
pub use headers::Headers;
pub use method::Method;
pub use node::PathNode;
pub use request::{Body, RequestOptions, TransportRequest};
pub use resolver::{build_url, ResolveUrl, StandardResolver};
pub use response::Response;
pub use transport::{HttpTransport, Transport};
