//! Composition-layer decorators and pagination helpers for sling
//!
//! The core client never retries, caches, or logs beyond a debug event;
//! those concerns are layered on here. Each decorator implements
//! [`sling::Transport`] and wraps an inner transport, so a stack is composed
//! by construction and injected into
//! [`ClientBuilder::transport`](sling::ClientBuilder::transport). Order
//! matters: the outermost decorator sees the request first.

mod cache;
mod headers;
mod logging;
pub mod pagination;
mod retry;

pub use cache::{Cache, CacheStore, MemoryStore};
pub use headers::ExtraHeaders;
pub use logging::Logging;
pub use retry::Retry;
