// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Chain node reads: ERC-20 allowances and token decimals.
//!
//! Orchestration reads chain state only through the [`ChainClient`] trait.
//! [`AlloyChainClient`] implements it with one alloy HTTP provider per
//! configured chain; tests use in-memory mocks.
//!
//! Allowances are read fresh for every decision and never cached. Decimals
//! go through [`TokenDecimalsCache`], which remembers successful lookups
//! forever and substitutes 18 when a lookup fails.
//!
//! # Example
//!
//! ```rust,ignore
//! use relayswap::{AlloyChainClient, ChainClient, RelaySwapConfig};
//!
//! let config = RelaySwapConfig::default();
//! let client = AlloyChainClient::from_config(&config)?;
//! let allowance = client.allowance(56, token, wallet, spender).await?;
//! ```

use alloy_primitives::{Address, U256};
use async_trait::async_trait;

use crate::errors::ChainError;
use crate::types::tokens::TokenDecimals;

mod alloy;
mod assets;
mod decimals;

pub use alloy::{AlloyChainClient, AnyHttpProvider};
pub use assets::{asset_kind, canonical_asset, same_canonical_asset, AssetKind};
pub use decimals::TokenDecimalsCache;

/// Read access to chain state
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Current ERC-20 allowance of `spender` over `owner`'s `token`
    async fn allowance(
        &self,
        chain_id: u64,
        token: Address,
        owner: Address,
        spender: Address,
    ) -> Result<U256, ChainError>;

    /// `decimals()` of an ERC-20 token
    async fn token_decimals(
        &self,
        chain_id: u64,
        token: Address,
    ) -> Result<TokenDecimals, ChainError>;
}
