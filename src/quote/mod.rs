// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Swap quotes from DEX aggregators
//!
//! This module puts every aggregator behind one trait so that orchestration
//! never branches on the backend in use.
//!
//! # Architecture
//!
//! A swap is quoted and built in two phases:
//!
//! 1. [`SwapQuoteProvider::get_price`] returns an indicative [`Quote`]. Price
//!    queries are read-only and served from a short-lived cache, so rapid
//!    re-estimation does not flood the aggregator.
//! 2. [`SwapQuoteProvider::build_swap_instruction`] returns the executable
//!    [`Instruction`] together with the quote it was built from. Build
//!    queries always hit the network.
//!
//! [`SwapQuoteProvider::calculate_estimation_limit`] turns a quote into the
//! worst acceptable outcome under a slippage tolerance: the minimum received
//! for exact-input swaps and the maximum spent for exact-output swaps.
//!
//! Callers always express slippage as a fraction ([`Slippage`]). Each
//! provider converts it to its own wire convention and excludes short-lived
//! RFQ liquidity, which can expire while a relayed transaction is signed.
//!
//! # Implementations
//!
//! - [`ZeroExProvider`]: 0x swap API, one base URL per chain. Cannot deliver
//!   proceeds to a third party, callers append a forward step.
//! - [`ParaSwapProvider`]: ParaSwap v5 API. Delivers to a receiver natively.
//!
//! # Example: Implementing SwapQuoteProvider
//!
//! ```rust,ignore
//! use relayswap::quote::{ProviderInstruction, Quote, QuoteRequest, SwapQuoteProvider};
//! use relayswap::QuoteError;
//! use async_trait::async_trait;
//!
//! struct FixedRateProvider;
//!
//! #[async_trait]
//! impl SwapQuoteProvider for FixedRateProvider {
//!     fn name(&self) -> &'static str {
//!         "fixed"
//!     }
//!
//!     fn supports_receiver(&self) -> bool {
//!         false
//!     }
//!
//!     async fn get_price(
//!         &self,
//!         chain_id: u64,
//!         request: &QuoteRequest,
//!     ) -> Result<Quote, QuoteError> {
//!         // one to one
//!         let amount = request.amount.value();
//!         Ok(Quote::new(amount, amount, Address::ZERO, serde_json::Value::Null))
//!     }
//!
//!     async fn build_swap_instruction(
//!         &self,
//!         chain_id: u64,
//!         request: &QuoteRequest,
//!     ) -> Result<ProviderInstruction, QuoteError> {
//!         unimplemented!()
//!     }
//! }
//! ```

use std::sync::Arc;

use alloy_primitives::{Address, Bytes, U256};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::RelaySwapConfig;
use crate::errors::QuoteError;
use crate::transport::{NetworkClient, TransportError};
use crate::types::instruction::Instruction;
use crate::types::intent::SwapSide;
use crate::types::slippage::Slippage;
use crate::types::tokens::TokenDecimals;
use crate::units::parse_minimal_units;

mod limits;
mod paraswap;
mod zero_ex;

pub use limits::EstimationLimit;
pub use paraswap::ParaSwapProvider;
pub use zero_ex::ZeroExProvider;

/// The fixed side of a quoted swap, in minimal units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SwapAmount {
    /// Exact amount of the sell token
    Sell(U256),
    /// Exact amount of the buy token
    Buy(U256),
}

impl SwapAmount {
    pub fn side(&self) -> SwapSide {
        match self {
            SwapAmount::Sell(_) => SwapSide::Sell,
            SwapAmount::Buy(_) => SwapSide::Buy,
        }
    }

    pub fn value(&self) -> U256 {
        match self {
            SwapAmount::Sell(value) | SwapAmount::Buy(value) => *value,
        }
    }
}

/// Parameters of a price or build query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteRequest {
    pub sell_token: Address,
    pub sell_decimals: TokenDecimals,
    pub buy_token: Address,
    pub buy_decimals: TokenDecimals,
    pub amount: SwapAmount,
    pub slippage: Slippage,
    /// Address that holds the sell token and executes the swap
    pub taker: Address,
    /// Third party that should receive the proceeds, if any
    pub receiver: Option<Address>,
}

/// An aggregator's answer to a price or build query
///
/// `payload` is the provider's raw response. Providers that need to echo it
/// back (ParaSwap's price route) pass it on untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    /// Sell token amount in minimal units
    pub sell_amount: U256,
    /// Buy token amount in minimal units
    pub buy_amount: U256,
    /// Spender that must be approved for the sell token
    pub allowance_target: Address,
    pub payload: Arc<Value>,
}

impl Quote {
    pub fn new(
        sell_amount: U256,
        buy_amount: U256,
        allowance_target: Address,
        payload: Value,
    ) -> Self {
        Self {
            sell_amount,
            buy_amount,
            allowance_target,
            payload: Arc::new(payload),
        }
    }
}

/// An executable swap call and the quote it executes
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderInstruction {
    pub instruction: Instruction,
    pub quote: Quote,
}

/// A DEX aggregator backend
///
/// Implementations are object-safe and shared as `Arc<dyn SwapQuoteProvider>`.
///
/// # Required Methods
///
/// - [`name`](SwapQuoteProvider::name): label used in errors and logs
/// - [`supports_receiver`](SwapQuoteProvider::supports_receiver): whether
///   the built swap can pay out to [`QuoteRequest::receiver`]
/// - [`get_price`](SwapQuoteProvider::get_price): cached indicative quote
/// - [`build_swap_instruction`](SwapQuoteProvider::build_swap_instruction):
///   live executable swap
///
/// # Optional Methods
///
/// - [`calculate_estimation_limit`](SwapQuoteProvider::calculate_estimation_limit):
///   slippage-adjusted bound (default: [`EstimationLimit::from_quote`])
#[async_trait]
pub trait SwapQuoteProvider: Send + Sync {
    /// Short provider label
    fn name(&self) -> &'static str;

    /// Whether built swaps deliver directly to a receiver
    ///
    /// When `false`, callers append a forward step for receiver-bound swaps.
    fn supports_receiver(&self) -> bool;

    /// Indicative quote, possibly served from cache
    async fn get_price(&self, chain_id: u64, request: &QuoteRequest) -> Result<Quote, QuoteError>;

    /// Executable swap, never served from cache
    async fn build_swap_instruction(
        &self,
        chain_id: u64,
        request: &QuoteRequest,
    ) -> Result<ProviderInstruction, QuoteError>;

    /// Worst acceptable outcome of `quote` under `slippage`
    fn calculate_estimation_limit(
        &self,
        quote: &Quote,
        side: SwapSide,
        slippage: Slippage,
    ) -> EstimationLimit {
        EstimationLimit::from_quote(quote, side, slippage)
    }
}

/// Available aggregator backends
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuoteProviderKind {
    #[default]
    ZeroEx,
    ParaSwap,
}

impl std::fmt::Display for QuoteProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuoteProviderKind::ZeroEx => f.write_str("0x"),
            QuoteProviderKind::ParaSwap => f.write_str("paraswap"),
        }
    }
}

/// Create the provider selected by `kind`
///
/// Each call creates a provider with its own price cache; share the returned
/// `Arc` to share the cache.
pub fn build_quote_provider(
    kind: QuoteProviderKind,
    config: &RelaySwapConfig,
    client: Arc<dyn NetworkClient>,
) -> Arc<dyn SwapQuoteProvider> {
    match kind {
        QuoteProviderKind::ZeroEx => Arc::new(ZeroExProvider::new(client, config.zero_ex.clone())),
        QuoteProviderKind::ParaSwap => {
            Arc::new(ParaSwapProvider::new(client, config.paraswap.clone()))
        }
    }
}

/// Map a transport failure to a generic request failure
pub(crate) fn request_failed(provider: &'static str, error: &TransportError) -> QuoteError {
    QuoteError::RequestFailed {
        provider,
        message: error.describe(),
        status: error.status,
    }
}

/// Read an integer amount that may be encoded as a JSON string or number
pub(crate) fn amount_field(
    provider: &'static str,
    body: &Value,
    field: &str,
) -> Result<U256, QuoteError> {
    let raw = match body.get(field) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => return Err(QuoteError::malformed(provider, format!("missing `{field}`"))),
    };
    parse_minimal_units(&raw)
        .map_err(|e| QuoteError::malformed(provider, format!("`{field}`: {e}")))
}

pub(crate) fn address_field(
    provider: &'static str,
    body: &Value,
    field: &str,
) -> Result<Address, QuoteError> {
    body.get(field)
        .and_then(Value::as_str)
        .ok_or_else(|| QuoteError::malformed(provider, format!("missing `{field}`")))?
        .parse()
        .map_err(|e| QuoteError::malformed(provider, format!("`{field}`: {e}")))
}

/// Turn a `{to, data, value}` transaction object into an [`Instruction`]
pub(crate) fn transaction_instruction(
    provider: &'static str,
    body: &Value,
) -> Result<Instruction, QuoteError> {
    let to = address_field(provider, body, "to")?;
    let data: Bytes = body
        .get("data")
        .and_then(Value::as_str)
        .ok_or_else(|| QuoteError::malformed(provider, "missing `data`"))?
        .parse()
        .map_err(|e| QuoteError::malformed(provider, format!("`data`: {e}")))?;
    let value = match body.get("value") {
        None | Some(Value::Null) => U256::ZERO,
        Some(_) => amount_field(provider, body, "value")?,
    };
    Ok(Instruction::call_with_value(to, data, value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_amount_field_accepts_strings_and_numbers() {
        let body = json!({ "a": "1000", "b": 42, "c": "0x10", "d": "-1" });
        assert_eq!(amount_field("t", &body, "a").unwrap(), U256::from(1000));
        assert_eq!(amount_field("t", &body, "b").unwrap(), U256::from(42));
        assert_eq!(amount_field("t", &body, "c").unwrap(), U256::from(16));
        assert!(matches!(
            amount_field("t", &body, "d"),
            Err(QuoteError::MalformedResponse { .. })
        ));
        assert!(amount_field("t", &body, "missing").is_err());
    }

    #[test]
    fn test_transaction_instruction() {
        let body = json!({
            "to": "0xdef1c0ded9bec7f1a1670819833240f027b25eff",
            "data": "0xd9627aa4",
            "value": "5"
        });
        let instruction = transaction_instruction("t", &body).unwrap();
        assert_eq!(instruction.data.len(), 4);
        assert_eq!(instruction.value, U256::from(5));

        let no_value = json!({
            "to": "0xdef1c0ded9bec7f1a1670819833240f027b25eff",
            "data": "0x"
        });
        assert_eq!(
            transaction_instruction("t", &no_value).unwrap().value,
            U256::ZERO
        );
    }

    #[test]
    fn test_swap_amount_side() {
        assert_eq!(SwapAmount::Sell(U256::from(1)).side(), SwapSide::Sell);
        assert_eq!(SwapAmount::Buy(U256::from(2)).value(), U256::from(2));
    }
}
