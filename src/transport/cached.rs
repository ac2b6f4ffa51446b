//! Short-lived cache for read-only aggregator queries

use std::time::Duration;

use serde_json::Value;
use tracing::debug;

use super::{NetworkClient, RequestParams, TransportError};
use crate::cache::{CacheStats, MemoryCache};

/// TTL'd, bounded cache of successful GET responses
///
/// Keyed by URL plus sorted query parameters; headers are not part of the
/// key. Failures are never cached.
#[derive(Debug)]
pub struct ResponseCache {
    cache: MemoryCache<String, Value>,
}

impl ResponseCache {
    pub fn new(ttl: Duration, max_entries: usize) -> Self {
        Self {
            cache: MemoryCache::new()
                .with_ttl(ttl)
                .with_max_entries(max_entries),
        }
    }

    /// Return the cached response for this request or fetch and remember it
    pub async fn get_or_fetch(
        &self,
        client: &dyn NetworkClient,
        url: &str,
        params: &RequestParams,
    ) -> Result<Value, TransportError> {
        let key = format!("{url}?{}", params.normalized_query());
        if let Some(value) = self.cache.get(&key).await {
            return Ok(value);
        }

        let value = client.get(url, params).await?;
        debug!(url, "Caching aggregator response");
        self.cache.insert(key, value.clone()).await;
        Ok(value)
    }

    pub async fn stats(&self) -> CacheStats {
        self.cache.stats().await
    }
}
