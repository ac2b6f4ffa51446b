// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Bounded in-memory caches shared by quote providers and chain readers.
//!
//! This module provides explicit cache objects that are passed by reference
//! to their consumers:
//!
//! - [`MemoryCache`]: keyed cache with optional TTL and LRU size limit, used
//!   for aggregator price responses (seconds-long TTL) and token decimals
//!   (no TTL, eviction on lookup failure)
//! - [`CacheStats`]: hit/miss/eviction counters for observability

use serde::{Deserialize, Serialize};
use std::fmt;

mod memory;

pub use memory::MemoryCache;

/// Statistics about cache performance
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    /// Number of cache hits (successful retrievals)
    pub hits: u64,
    /// Number of cache misses (key not found or expired)
    pub misses: u64,
    /// Number of entries evicted due to size limits
    pub evictions: u64,
    /// Number of entries expired due to TTL
    pub expirations: u64,
    /// Number of entries removed explicitly
    pub removals: u64,
    /// Current number of entries in the cache
    pub entries: usize,
}

impl CacheStats {
    /// Calculates the cache hit rate as a percentage (0.0 to 100.0)
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            (self.hits as f64 / total as f64) * 100.0
        }
    }
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hits={}, misses={}, evictions={}, expirations={}, removals={}, entries={}, \
             hit_rate={:.1}%",
            self.hits,
            self.misses,
            self.evictions,
            self.expirations,
            self.removals,
            self.entries,
            self.hit_rate()
        )
    }
}
