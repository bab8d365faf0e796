//! GET-response caching decorator with injectable storage

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use sling::{Error, Method, Response, Transport, TransportRequest};
use tokio::sync::Mutex;

/// Storage backend for [`Cache`]
///
/// Implementations own the TTL/eviction policy: `get` must only return
/// entries that are still valid.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Look up an unexpired entry
    async fn get(&self, key: &str) -> Option<Response>;
    /// Store a response under `key`
    async fn put(&self, key: String, response: Response);
}

/// In-memory store with a fixed TTL
///
/// Entries expire `ttl` after insertion; an expired entry is evicted the
/// next time it is looked up.
pub struct MemoryStore {
    ttl: Duration,
    entries: Mutex<HashMap<String, (Instant, Response)>>,
}

impl MemoryStore {
    /// Empty store whose entries live for `ttl`
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }
}

impl fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryStore")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl CacheStore for MemoryStore {
    async fn get(&self, key: &str) -> Option<Response> {
        let mut entries = self.entries.lock().await;
        match entries.get(key) {
            Some((stored_at, response)) if stored_at.elapsed() < self.ttl => {
                Some(response.clone())
            }
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    async fn put(&self, key: String, response: Response) {
        self.entries.lock().await.insert(key, (Instant::now(), response));
    }
}

/// Transport decorator caching successful GET responses
///
/// The cache key is the resolved URL including the serialized query string.
/// Only 200 responses are stored; every other status and every non-GET
/// request passes through untouched. Transport errors are never cached.
#[derive(Clone)]
pub struct Cache<S = MemoryStore> {
    inner: Arc<dyn Transport>,
    store: Arc<S>,
}

impl<S: CacheStore> Cache<S> {
    /// Wrap `inner` with the given store
    pub fn new(inner: Arc<dyn Transport>, store: S) -> Self {
        Self {
            inner,
            store: Arc::new(store),
        }
    }
}

impl Cache<MemoryStore> {
    /// Wrap `inner` with an in-memory store expiring entries after `ttl`
    pub fn with_ttl(inner: Arc<dyn Transport>, ttl: Duration) -> Self {
        Self::new(inner, MemoryStore::new(ttl))
    }
}

impl<S> fmt::Debug for Cache<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cache").finish_non_exhaustive()
    }
}

#[async_trait]
impl<S: CacheStore> Transport for Cache<S> {
    async fn send(&self, request: TransportRequest) -> Result<Response, Error> {
        if request.method != Method::Get {
            return self.inner.send(request).await;
        }

        let key = request.url_with_params();
        if let Some(response) = self.store.get(&key).await {
            tracing::debug!(url = %key, "cache hit");
            return Ok(response);
        }

        tracing::debug!(url = %key, "cache miss");
        let response = self.inner.send(request).await?;
        if response.status() == 200 {
            self.store.put(key, response.clone()).await;
        }
        Ok(response)
    }
}
