// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! In-memory cache implementation with optional TTL and size limits

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

use super::CacheStats;

/// Entry in the memory cache with metadata
#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    /// When this entry was created
    created_at: Instant,
    /// Sequence number of the last access, for LRU eviction
    access_seq: u64,
}

impl<V> CacheEntry<V> {
    fn new(value: V, access_seq: u64) -> Self {
        Self {
            value,
            created_at: Instant::now(),
            access_seq,
        }
    }

    fn is_expired(&self, ttl: Option<Duration>) -> bool {
        ttl.is_some_and(|ttl| self.created_at.elapsed() >= ttl)
    }
}

/// Configuration for memory cache
#[derive(Debug, Clone, Default)]
struct MemoryCacheConfig {
    /// Maximum number of entries before eviction starts
    max_entries: Option<usize>,
    /// Time-to-live for cache entries
    ttl: Option<Duration>,
}

/// Internal state for memory cache
#[derive(Debug)]
struct MemoryCacheState<K, V> {
    entries: HashMap<K, CacheEntry<V>>,
    stats: CacheStats,
    /// Sequence counter for deterministic LRU ordering
    next_seq: u64,
}

impl<K, V> Default for MemoryCacheState<K, V> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
            stats: CacheStats::default(),
            next_seq: 0,
        }
    }
}

/// In-memory cache with optional TTL and size limits
///
/// It supports:
/// - Optional TTL (time-to-live) for automatic expiration
/// - Optional size limits with LRU (least recently used) eviction
/// - Explicit removal, for evicting entries whose source failed
///
/// Time is measured with [`tokio::time::Instant`], so paused test clocks
/// drive expiration.
///
/// # Examples
///
/// ```rust,ignore
/// use relayswap::cache::MemoryCache;
/// use std::time::Duration;
///
/// // Short-lived aggregator responses
/// let prices: MemoryCache<String, serde_json::Value> = MemoryCache::new()
///     .with_ttl(Duration::from_secs(5))
///     .with_max_entries(100);
///
/// // Token decimals never expire
/// let decimals: MemoryCache<(u64, Address), TokenDecimals> = MemoryCache::new();
/// ```
///
/// # Performance
///
/// - Get: O(1) average case (HashMap lookup)
/// - Insert: O(1) without eviction, O(n) with eviction (finds LRU)
#[derive(Debug)]
pub struct MemoryCache<K, V> {
    config: MemoryCacheConfig,
    state: Mutex<MemoryCacheState<K, V>>,
}

impl<K, V> MemoryCache<K, V>
where
    K: Eq + Hash + Clone + Debug,
    V: Clone,
{
    /// Creates a new memory cache with no limits
    pub fn new() -> Self {
        Self {
            config: MemoryCacheConfig::default(),
            state: Mutex::new(MemoryCacheState::default()),
        }
    }

    /// Sets the maximum number of entries in the cache
    ///
    /// When the limit is reached, the least recently used (LRU) entry will be evicted
    /// to make room for new entries.
    pub fn with_max_entries(mut self, max_entries: usize) -> Self {
        self.config.max_entries = Some(max_entries.max(1));
        self
    }

    /// Sets the time-to-live for cache entries
    ///
    /// Entries older than the TTL will be automatically expired when accessed.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.config.ttl = Some(ttl);
        self
    }

    /// Evicts the least recently used entry from the cache
    fn evict_lru(state: &mut MemoryCacheState<K, V>) {
        let lru_key = state
            .entries
            .iter()
            .min_by_key(|(_, entry)| entry.access_seq)
            .map(|(key, _)| key.clone());

        if let Some(key) = lru_key {
            debug!(key = ?key, "Evicting LRU cache entry");
            state.entries.remove(&key);
            state.stats.evictions += 1;
        }
    }

    /// Returns a clone of the cached value, if present and fresh
    pub async fn get(&self, key: &K) -> Option<V> {
        let mut state = self.state.lock().await;
        let seq = state.next_seq;

        let expired = state
            .entries
            .get(key)
            .map(|entry| entry.is_expired(self.config.ttl));

        match expired {
            None => {
                state.stats.misses += 1;
                debug!(key = ?key, "Cache miss (memory)");
                return None;
            }
            Some(true) => {
                debug!(key = ?key, "Cache entry expired");
                state.entries.remove(key);
                state.stats.expirations += 1;
                state.stats.misses += 1;
                state.stats.entries = state.entries.len();
                return None;
            }
            Some(false) => {}
        }

        state.next_seq += 1;
        state.stats.hits += 1;
        let entry = state.entries.get_mut(key)?;
        entry.access_seq = seq;
        debug!(key = ?key, "Cache hit (memory)");
        Some(entry.value.clone())
    }

    /// Inserts a value, evicting the LRU entry when the cache is full
    pub async fn insert(&self, key: K, value: V) {
        let mut state = self.state.lock().await;

        if let Some(max_entries) = self.config.max_entries {
            while !state.entries.contains_key(&key) && state.entries.len() >= max_entries {
                Self::evict_lru(&mut state);
            }
        }

        debug!(key = ?key, "Inserting entry into memory cache");
        let seq = state.next_seq;
        state.next_seq += 1;
        state.entries.insert(key, CacheEntry::new(value, seq));
        state.stats.entries = state.entries.len();
    }

    /// Removes an entry, returning whether it was present
    pub async fn remove(&self, key: &K) -> bool {
        let mut state = self.state.lock().await;
        let removed = state.entries.remove(key).is_some();
        if removed {
            debug!(key = ?key, "Removing entry from memory cache");
            state.stats.removals += 1;
            state.stats.entries = state.entries.len();
        }
        removed
    }

    /// Removes every entry
    pub async fn clear(&self) {
        let mut state = self.state.lock().await;
        debug!(entries = state.entries.len(), "Clearing memory cache");
        state.entries.clear();
        state.stats.entries = 0;
    }

    /// Current statistics
    pub async fn stats(&self) -> CacheStats {
        let state = self.state.lock().await;
        state.stats.clone()
    }
}

impl<K, V> Default for MemoryCache<K, V>
where
    K: Eq + Hash + Clone + Debug,
    V: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(n: u32) -> String {
        format!("56:token-{n}")
    }

    #[tokio::test]
    async fn test_memory_cache_basic_operations() {
        let cache = MemoryCache::new();

        // Cache miss initially
        assert!(cache.get(&key(1)).await.is_none());

        cache.insert(key(1), 18u8).await;
        assert_eq!(cache.get(&key(1)).await, Some(18));

        // Stats should show 1 hit, 1 miss
        let stats = cache.stats().await;
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.entries, 1);
    }

    #[tokio::test]
    async fn test_memory_cache_size_limit() {
        let cache = MemoryCache::new().with_max_entries(3);

        for n in 1..=3 {
            cache.insert(key(n), n).await;
        }
        assert_eq!(cache.stats().await.entries, 3);

        // Access 1 to make it recently used
        assert!(cache.get(&key(1)).await.is_some());

        // Insert 4 - should evict 2 (least recently used)
        cache.insert(key(4), 4).await;

        let stats = cache.stats().await;
        assert_eq!(stats.entries, 3);
        assert_eq!(stats.evictions, 1);

        assert!(cache.get(&key(1)).await.is_some());
        assert!(cache.get(&key(3)).await.is_some());
        assert!(cache.get(&key(4)).await.is_some());
        assert!(cache.get(&key(2)).await.is_none());
    }

    #[tokio::test]
    async fn test_memory_cache_overwrite_does_not_evict() {
        let cache = MemoryCache::new().with_max_entries(2);
        cache.insert(key(1), 1).await;
        cache.insert(key(2), 2).await;
        cache.insert(key(2), 20).await;

        assert_eq!(cache.stats().await.evictions, 0);
        assert_eq!(cache.get(&key(1)).await, Some(1));
        assert_eq!(cache.get(&key(2)).await, Some(20));
    }

    #[tokio::test(start_paused = true)]
    async fn test_memory_cache_ttl() {
        let cache = MemoryCache::new().with_ttl(Duration::from_secs(5));

        cache.insert(key(1), 1).await;
        tokio::time::advance(Duration::from_secs(4)).await;
        assert!(cache.get(&key(1)).await.is_some());

        tokio::time::advance(Duration::from_secs(2)).await;
        assert!(cache.get(&key(1)).await.is_none());

        let stats = cache.stats().await;
        assert_eq!(stats.expirations, 1);
        assert_eq!(stats.entries, 0);
    }

    #[tokio::test]
    async fn test_memory_cache_remove() {
        let cache = MemoryCache::new();
        cache.insert(key(1), 1).await;

        assert!(cache.remove(&key(1)).await);
        assert!(!cache.remove(&key(1)).await);
        assert!(cache.get(&key(1)).await.is_none());
        assert_eq!(cache.stats().await.removals, 1);
    }

    #[tokio::test]
    async fn test_memory_cache_clear() {
        let cache = MemoryCache::new();
        for n in 1..=5 {
            cache.insert(key(n), n).await;
        }
        cache.clear().await;

        assert_eq!(cache.stats().await.entries, 0);
        for n in 1..=5 {
            assert!(cache.get(&key(n)).await.is_none());
        }
    }

    #[tokio::test]
    async fn test_memory_cache_hit_rate() {
        let cache = MemoryCache::new();
        cache.get(&key(1)).await;
        cache.insert(key(1), 1).await;
        cache.get(&key(1)).await;
        cache.get(&key(1)).await;
        cache.get(&key(1)).await;

        let stats = cache.stats().await;
        assert_eq!(stats.hits, 3);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hit_rate(), 75.0);
    }
}
