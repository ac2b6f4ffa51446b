//! Configuration for relayswap operations
//!
//! This module provides the configuration consumed by the orchestrator,
//! the relay reward estimator, the quote providers and the chain client.
//!
//! # Example: Using defaults
//!
//! ```rust
//! use relayswap::RelaySwapConfig;
//!
//! // Ethereum and BNB Smart Chain, 0x for every swap
//! let config = RelaySwapConfig::default();
//! assert!(config.chain(56).is_ok());
//! ```
//!
//! # Example: Custom configuration
//!
//! ```rust
//! use relayswap::{ApprovalMode, QuoteProviderKind, RelaySwapConfigBuilder};
//! use std::time::Duration;
//!
//! let config = RelaySwapConfigBuilder::with_defaults()
//!     .zero_ex_api_key("my-key")
//!     .swap_provider(QuoteProviderKind::ParaSwap)
//!     .approval_mode(ApprovalMode::Exact)
//!     .estimation_debounce(Duration::from_millis(300))
//!     .build();
//! ```

use std::collections::HashMap;
use std::time::Duration;

use alloy_primitives::Address;
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use crate::errors::ChainError;
use crate::instructions::ApprovalMode;
use crate::quote::QuoteProviderKind;
use crate::types::slippage::Slippage;

pub mod constants;

use constants::{aggregators, hub_bridge, relay, wrapped_native};

/// Ethereum mainnet chain id
pub const ETHEREUM_CHAIN_ID: u64 = 1;

/// BNB Smart Chain chain id
pub const BSC_CHAIN_ID: u64 = 56;

/// Configuration for relayswap operations
///
/// Use [`RelaySwapConfigBuilder`] for a fluent API to construct instances.
#[derive(Debug, Clone)]
pub struct RelaySwapConfig {
    /// Per-chain settings keyed by chain id
    pub chains: HashMap<u64, ChainConfig>,

    /// 0x aggregator settings
    pub zero_ex: ZeroExConfig,

    /// ParaSwap aggregator settings
    pub paraswap: ParaSwapConfig,

    /// Relay reward settings
    pub relay: RelayConfig,

    /// Main swap settings
    pub swap: SwapConfig,

    /// Timeout for aggregator HTTP requests
    /// Default: 30 seconds
    pub http_timeout: Duration,
}

/// Settings for one supported chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainConfig {
    pub chain_id: u64,

    /// JSON-RPC endpoint used for allowance and decimals reads
    pub rpc_endpoint: String,

    /// Hub bridge that receives deposits
    pub bridge_contract: Address,

    /// Canonical wrapped form of the native coin
    pub wrapped_native: Address,

    /// Fixed gas price in gwei, overriding the caller-supplied price
    pub gas_price_override_gwei: Option<BigDecimal>,
}

/// 0x API settings
#[derive(Debug, Clone)]
pub struct ZeroExConfig {
    /// Sent as the `0x-api-key` header when present
    pub api_key: Option<String>,

    /// Base URL per chain id
    pub base_urls: HashMap<u64, String>,

    /// Lifetime of cached price responses
    /// Default: 5 seconds
    pub price_cache_ttl: Duration,

    /// Maximum cached price responses
    /// Default: 100
    pub price_cache_entries: usize,
}

/// ParaSwap API settings
#[derive(Debug, Clone)]
pub struct ParaSwapConfig {
    pub base_url: String,

    /// Lifetime of cached price routes
    /// Default: 2 seconds
    pub price_cache_ttl: Duration,

    /// Maximum cached price routes
    /// Default: 100
    pub price_cache_entries: usize,

    /// Maximum price impact in percent accepted by the router
    /// Default: 50
    pub max_impact: u32,
}

/// Worst-case gas per sub-operation of a relayed transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RelayGasLimits {
    /// Any relayed call
    pub base: u64,
    /// Deploying the smart wallet when it does not exist yet
    pub create: u64,
    /// One aggregator swap (also charged for swapping the gas token)
    pub swap: u64,
}

impl Default for RelayGasLimits {
    fn default() -> Self {
        Self {
            base: relay::BASE_GAS,
            create: relay::CREATE_GAS,
            swap: relay::SWAP_GAS,
        }
    }
}

/// Relay reward settings
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Receiver of the relay reward
    pub broadcaster: Address,

    pub gas_limits: RelayGasLimits,

    /// Slippage for swapping the gas token into the reward
    /// Default: 5%
    pub slippage: Slippage,

    /// Aggregator used for the reward swap
    pub provider: QuoteProviderKind,

    /// Quiet window before re-estimating the reward
    /// Default: 100ms
    pub estimation_debounce: Duration,
}

/// Main swap settings
#[derive(Debug, Clone)]
pub struct SwapConfig {
    /// Default slippage when an intent does not carry its own
    /// Default: 5%
    pub slippage: Slippage,

    /// Size of approvals emitted when allowance is short
    /// Default: unlimited
    pub approval_mode: ApprovalMode,

    /// Aggregator used for the main swap
    pub provider: QuoteProviderKind,

    /// Quiet window before re-estimating a swap
    /// Default: 500ms
    pub estimation_debounce: Duration,

    /// Longest an estimation may be postponed by continuous input
    /// Default: 2000ms
    pub estimation_max_wait: Duration,
}

impl Default for RelaySwapConfig {
    fn default() -> Self {
        Self::with_common_defaults()
    }
}

impl RelaySwapConfig {
    /// Create config for Ethereum and BNB Smart Chain with production endpoints
    ///
    /// BNB Smart Chain uses a fixed 5 gwei gas price for relay rewards.
    pub fn with_common_defaults() -> Self {
        let mut config = Self::minimal();

        config.set_chain(ChainConfig {
            chain_id: ETHEREUM_CHAIN_ID,
            rpc_endpoint: "https://ethereum-rpc.publicnode.com".to_string(),
            bridge_contract: hub_bridge::ETH_HUB_BRIDGE,
            wrapped_native: wrapped_native::ETH_WETH,
            gas_price_override_gwei: None,
        });

        config.set_chain(ChainConfig {
            chain_id: BSC_CHAIN_ID,
            rpc_endpoint: "https://rpc.ankr.com/bsc/".to_string(),
            bridge_contract: hub_bridge::BSC_HUB_BRIDGE,
            wrapped_native: wrapped_native::BSC_WBNB,
            gas_price_override_gwei: Some(BigDecimal::from(relay::BSC_GAS_PRICE_GWEI)),
        });

        config.zero_ex.base_urls.insert(
            ETHEREUM_CHAIN_ID,
            aggregators::ZERO_EX_ETHEREUM_API_URL.to_string(),
        );
        config
            .zero_ex
            .base_urls
            .insert(BSC_CHAIN_ID, aggregators::ZERO_EX_BSC_API_URL.to_string());

        config
    }

    /// Create config with no chains and no 0x endpoints
    ///
    /// Suitable for tests and for callers that register their own chains.
    pub fn minimal() -> Self {
        Self {
            chains: HashMap::new(),
            zero_ex: ZeroExConfig {
                api_key: None,
                base_urls: HashMap::new(),
                price_cache_ttl: Duration::from_secs(5),
                price_cache_entries: 100,
            },
            paraswap: ParaSwapConfig {
                base_url: aggregators::PARASWAP_API_URL.to_string(),
                price_cache_ttl: Duration::from_secs(2),
                price_cache_entries: 100,
                max_impact: 50,
            },
            relay: RelayConfig {
                broadcaster: relay::BROADCASTER,
                gas_limits: RelayGasLimits::default(),
                slippage: Slippage::from_percent(relay::REWARD_SLIPPAGE_PERCENT),
                provider: QuoteProviderKind::ZeroEx,
                estimation_debounce: Duration::from_millis(100),
            },
            swap: SwapConfig {
                slippage: Slippage::from_percent(5),
                approval_mode: ApprovalMode::Unlimited,
                provider: QuoteProviderKind::ZeroEx,
                estimation_debounce: Duration::from_millis(500),
                estimation_max_wait: Duration::from_millis(2000),
            },
            http_timeout: Duration::from_secs(30),
        }
    }

    /// Get the settings of a configured chain
    ///
    /// # Example
    ///
    /// ```rust
    /// use relayswap::{ChainError, RelaySwapConfig};
    ///
    /// let config = RelaySwapConfig::default();
    /// assert_eq!(config.chain(1).unwrap().chain_id, 1);
    /// assert!(matches!(config.chain(10), Err(ChainError::UnknownChain(10))));
    /// ```
    pub fn chain(&self, chain_id: u64) -> Result<&ChainConfig, ChainError> {
        self.chains
            .get(&chain_id)
            .ok_or(ChainError::UnknownChain(chain_id))
    }

    /// Wrapped native token of a chain, if the chain is configured
    pub fn get_wrapped_native(&self, chain_id: u64) -> Option<Address> {
        self.chains.get(&chain_id).map(|c| c.wrapped_native)
    }

    /// Fixed gas price for a chain, if one is configured
    pub fn get_gas_price_override(&self, chain_id: u64) -> Option<&BigDecimal> {
        self.chains
            .get(&chain_id)
            .and_then(|c| c.gas_price_override_gwei.as_ref())
    }

    /// Add or replace a chain
    pub fn set_chain(&mut self, chain: ChainConfig) {
        self.chains.insert(chain.chain_id, chain);
    }
}

/// Builder for [`RelaySwapConfig`]
///
/// # Example
///
/// ```rust
/// use relayswap::{ChainConfig, RelaySwapConfigBuilder};
/// use alloy_primitives::Address;
///
/// let config = RelaySwapConfigBuilder::new()
///     .chain(ChainConfig {
///         chain_id: 31337,
///         rpc_endpoint: "http://localhost:8545".to_string(),
///         bridge_contract: Address::ZERO,
///         wrapped_native: Address::repeat_byte(0x42),
///         gas_price_override_gwei: None,
///     })
///     .build();
/// assert!(config.chain(31337).is_ok());
/// ```
pub struct RelaySwapConfigBuilder {
    config: RelaySwapConfig,
}

impl Default for RelaySwapConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RelaySwapConfigBuilder {
    /// Create a new builder with minimal defaults
    pub fn new() -> Self {
        Self {
            config: RelaySwapConfig::minimal(),
        }
    }

    /// Create a new builder with common defaults
    pub fn with_defaults() -> Self {
        Self {
            config: RelaySwapConfig::with_common_defaults(),
        }
    }

    /// Add or replace a chain
    pub fn chain(mut self, chain: ChainConfig) -> Self {
        self.config.set_chain(chain);
        self
    }

    /// Set a fixed gas price for an already configured chain
    pub fn chain_gas_price_override(mut self, chain_id: u64, gwei: BigDecimal) -> Self {
        if let Some(chain) = self.config.chains.get_mut(&chain_id) {
            chain.gas_price_override_gwei = Some(gwei);
        }
        self
    }

    pub fn zero_ex_api_key(mut self, key: impl Into<String>) -> Self {
        self.config.zero_ex.api_key = Some(key.into());
        self
    }

    pub fn zero_ex_base_url(mut self, chain_id: u64, url: impl Into<String>) -> Self {
        self.config.zero_ex.base_urls.insert(chain_id, url.into());
        self
    }

    pub fn paraswap_base_url(mut self, url: impl Into<String>) -> Self {
        self.config.paraswap.base_url = url.into();
        self
    }

    /// Set the lifetime of cached price responses for both aggregators
    pub fn price_cache_ttl(mut self, ttl: Duration) -> Self {
        self.config.zero_ex.price_cache_ttl = ttl;
        self.config.paraswap.price_cache_ttl = ttl;
        self
    }

    pub fn broadcaster(mut self, broadcaster: Address) -> Self {
        self.config.relay.broadcaster = broadcaster;
        self
    }

    pub fn relay_gas_limits(mut self, limits: RelayGasLimits) -> Self {
        self.config.relay.gas_limits = limits;
        self
    }

    pub fn relay_slippage(mut self, slippage: Slippage) -> Self {
        self.config.relay.slippage = slippage;
        self
    }

    pub fn relay_provider(mut self, provider: QuoteProviderKind) -> Self {
        self.config.relay.provider = provider;
        self
    }

    pub fn swap_slippage(mut self, slippage: Slippage) -> Self {
        self.config.swap.slippage = slippage;
        self
    }

    pub fn swap_provider(mut self, provider: QuoteProviderKind) -> Self {
        self.config.swap.provider = provider;
        self
    }

    pub fn approval_mode(mut self, mode: ApprovalMode) -> Self {
        self.config.swap.approval_mode = mode;
        self
    }

    pub fn estimation_debounce(mut self, debounce: Duration) -> Self {
        self.config.swap.estimation_debounce = debounce;
        self
    }

    pub fn estimation_max_wait(mut self, max_wait: Duration) -> Self {
        self.config.swap.estimation_max_wait = max_wait;
        self
    }

    pub fn http_timeout(mut self, timeout: Duration) -> Self {
        self.config.http_timeout = timeout;
        self
    }

    /// Build the configuration
    pub fn build(self) -> RelaySwapConfig {
        self.config
    }
}
