//! Token decimals cache

use std::sync::Arc;

use alloy_primitives::Address;
use tracing::warn;

use super::ChainClient;
use crate::cache::{CacheStats, MemoryCache};
use crate::types::tokens::{normalize_native, TokenDecimals, NATIVE_COIN_ADDRESS};

/// Remembers token decimals per (chain, token) for the life of the process
///
/// The native coin resolves to 18 without a lookup. A failed lookup evicts
/// the key and returns 18, so the next call retries the node.
pub struct TokenDecimalsCache {
    client: Arc<dyn ChainClient>,
    cache: MemoryCache<(u64, Address), TokenDecimals>,
}

impl TokenDecimalsCache {
    pub fn new(client: Arc<dyn ChainClient>) -> Self {
        Self {
            client,
            cache: MemoryCache::new(),
        }
    }

    pub async fn get(&self, chain_id: u64, token: Address) -> TokenDecimals {
        let token = normalize_native(token);
        if token == NATIVE_COIN_ADDRESS {
            return TokenDecimals::STANDARD;
        }

        let key = (chain_id, token);
        if let Some(decimals) = self.cache.get(&key).await {
            return decimals;
        }

        match self.client.token_decimals(chain_id, token).await {
            Ok(decimals) => {
                self.cache.insert(key, decimals).await;
                decimals
            }
            Err(e) => {
                warn!(chain_id, ?token, error = %e, "Decimals lookup failed, assuming 18");
                self.cache.remove(&key).await;
                TokenDecimals::STANDARD
            }
        }
    }

    pub async fn stats(&self) -> CacheStats {
        self.cache.stats().await
    }
}

impl std::fmt::Debug for TokenDecimalsCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenDecimalsCache").finish_non_exhaustive()
    }
}
