//! Span creation helpers for relayswap operations.
//!
//! Telemetry is kept apart from business logic: instead of `#[instrument]`
//! attributes, each instrumented operation has a span helper here and the
//! operation attaches it to its future.
//!
//! Usage pattern:
//! ```rust,ignore
//! pub async fn my_operation(&self, param: Type) -> Result<T> {
//!     async move {
//!         // Business logic here
//!     }
//!     .instrument(spans::my_operation(param_value))
//!     .await
//! }
//! ```

use alloy_chains::Chain;
use alloy_primitives::Address;
use tracing::{Level, Span};

/// Create span for a price query against an aggregator.
///
/// Parent: estimate_relay_reward or estimate_swap span
#[inline]
pub(crate) fn get_price(provider: &'static str, chain_id: u64) -> Span {
    tracing::debug_span!(
        "relayswap.get_price",
        provider = provider,
        chain = %Chain::from_id(chain_id),
    )
}

/// Create span for building a swap instruction through an aggregator.
///
/// Parent: build_reward_instructions or build_swap_plan span
#[inline]
pub(crate) fn build_swap_instruction(provider: &'static str, chain_id: u64) -> Span {
    tracing::debug_span!(
        "relayswap.build_swap_instruction",
        provider = provider,
        chain = %Chain::from_id(chain_id),
    )
}

/// Create span for estimating the relay reward spend limit.
///
/// Parent: estimate_swap span, or none when called directly
/// Children: get_price span when the gas token must be swapped
#[inline]
pub(crate) fn estimate_relay_reward(chain_id: u64, gas_token: Address, complexity: u64) -> Span {
    tracing::span!(
        Level::INFO,
        "relayswap.estimate_relay_reward",
        chain = %Chain::from_id(chain_id),
        gas_token = %gas_token,
        complexity = complexity,
    )
}

/// Create span for building the instructions that pay the relay reward.
///
/// Parent: build_swap_plan span
/// Children: build_swap_instruction span when the gas token must be swapped
#[inline]
pub(crate) fn build_reward_instructions(chain_id: u64, gas_token: Address) -> Span {
    tracing::span!(
        Level::INFO,
        "relayswap.build_reward_instructions",
        chain = %Chain::from_id(chain_id),
        gas_token = %gas_token,
    )
}

/// Create span for estimating a swap intent.
///
/// This is a public API entry point.
///
/// Parent: None (root span for this operation)
/// Children: estimate_relay_reward, get_price
#[inline]
pub(crate) fn estimate_swap(chain_id: u64, sell_token: Address, buy_token: Address) -> Span {
    tracing::span!(
        Level::INFO,
        "relayswap.estimate_swap",
        chain = %Chain::from_id(chain_id),
        sell_token = %sell_token,
        buy_token = %buy_token,
    )
}

/// Create span for building the full instruction list of a swap intent.
///
/// This is a public API entry point.
///
/// Parent: None (root span for this operation)
/// Children: build_reward_instructions, build_swap_instruction
#[inline]
pub(crate) fn build_swap_plan(chain_id: u64, sell_token: Address, buy_token: Address) -> Span {
    tracing::span!(
        Level::INFO,
        "relayswap.build_swap_plan",
        chain = %Chain::from_id(chain_id),
        sell_token = %sell_token,
        buy_token = %buy_token,
    )
}

/// Create span for one coordinated estimation run.
#[inline]
pub(crate) fn coordinated_estimation(key: &str, generation: u64) -> Span {
    tracing::trace_span!(
        "relayswap.coordinated_estimation",
        key = key,
        generation = generation,
    )
}
