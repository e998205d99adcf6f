//! Short-lived in-memory cache for upstream listing responses.
//!
//! Exchanges publish their whole currency list at one URL, so every ticker
//! checked within the TTL window is served from a single upstream fetch. A
//! stale read is acceptable; the cache never changes what an adapter reports
//! for a given body.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;

use crate::http_client::{HttpClient, HttpFuture, HttpRequest, HttpResponse, RetainFuture};

/// Default TTL, matching a one-minute revalidation window.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(60);

#[derive(Debug, Clone)]
struct CacheEntry {
    body: String,
    expires_at: Instant,
}

/// Thread-safe TTL map from request URL to response body.
#[derive(Debug, Clone)]
pub struct CacheStore {
    entries: Arc<RwLock<HashMap<String, CacheEntry>>>,
    ttl: Duration,
}

impl CacheStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    /// A cache that never stores anything.
    pub fn disabled() -> Self {
        Self::new(Duration::ZERO)
    }

    pub fn is_disabled(&self) -> bool {
        self.ttl.is_zero()
    }

    /// Returns the body for `key` if present and not expired.
    pub async fn get(&self, key: &str) -> Option<String> {
        let entries = self.entries.read().await;
        entries
            .get(key)
            .filter(|entry| Instant::now() <= entry.expires_at)
            .map(|entry| entry.body.clone())
    }

    /// Stores `body` under `key`; no-op when the cache is disabled.
    pub async fn put(&self, key: String, body: String) {
        if self.is_disabled() {
            return;
        }

        let expires_at = Instant::now() + self.ttl;
        let mut entries = self.entries.write().await;
        entries.retain(|_, entry| entry.expires_at > Instant::now());
        entries.insert(key, CacheEntry { body, expires_at });
    }

    /// Number of stored entries, including expired ones not yet evicted.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for CacheStore {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_TTL)
    }
}

/// `HttpClient` decorator that serves repeated GETs of one URL from a [`CacheStore`].
///
/// A body enters the cache only through [`HttpClient::retain`], after the
/// adapter has decoded it. Error envelopes and undecodable bodies are fetched
/// again on the next lookup.
pub struct CachedHttpClient {
    inner: Arc<dyn HttpClient>,
    store: CacheStore,
}

impl CachedHttpClient {
    pub fn new(inner: Arc<dyn HttpClient>, store: CacheStore) -> Self {
        Self { inner, store }
    }

    pub fn store(&self) -> &CacheStore {
        &self.store
    }
}

impl HttpClient for CachedHttpClient {
    fn execute<'a>(&'a self, request: HttpRequest) -> HttpFuture<'a> {
        Box::pin(async move {
            if self.store.is_disabled() {
                return self.inner.execute(request).await;
            }

            if let Some(body) = self.store.get(&request.url).await {
                tracing::trace!(url = %request.url, "serving upstream response from cache");
                return Ok(HttpResponse::ok_json(body));
            }

            self.inner.execute(request).await
        })
    }

    fn retain<'a>(&'a self, url: &'a str, body: String) -> RetainFuture<'a> {
        Box::pin(async move {
            // A cache hit is retained again by the adapter; keep the original expiry.
            if self.store.is_disabled() || self.store.get(url).await.is_some() {
                return;
            }
            self.store.put(url.to_string(), body).await;
        })
    }
}
