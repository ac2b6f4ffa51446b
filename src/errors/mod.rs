// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for the relayswap library.
//!
//! This module follows a hybrid approach:
//!
//! - **Module-specific errors** for fine-grained handling ([`AmountError`],
//!   [`QuoteError`], [`ChainError`], [`SwapError`])
//! - **Unified error type** ([`RelaySwapError`]) for callers that don't need
//!   to distinguish between error sources
//!
//! # Architecture
//!
//! - [`AmountError`] - Decimal conversion failures (`InvalidAmount`)
//! - [`QuoteError`] - Swap aggregator failures, including the distinct
//!   `InsufficientLiquidity` condition
//! - [`ChainError`] - Chain node failures (`AllowanceQueryFailed`, unknown chains)
//! - [`SwapError`] - Orchestration failures (`InsufficientFundsForReward`,
//!   missing deposit destination, missing configuration)
//!
//! Provider failures are turned into a single readable message by
//! [`describe_failure`].
//!
//! # Examples
//!
//! ```rust,ignore
//! use relayswap::{QuoteError, SwapError};
//!
//! match orchestrator.build(&request).await {
//!     Ok(plan) => submit(plan.instructions),
//!     Err(SwapError::InsufficientFundsForReward { required, available }) => {
//!         eprintln!("Need {required} to pay the relay, only {available} available");
//!     }
//!     Err(SwapError::Quote(QuoteError::InsufficientLiquidity { provider, .. })) => {
//!         eprintln!("{provider} found no route");
//!     }
//!     Err(e) => eprintln!("Other error: {e}"),
//! }
//! ```

mod amount;
mod chain;
mod message;
mod quote;
mod swap;

pub use amount::AmountError;
pub use chain::ChainError;
pub use message::describe_failure;
pub use quote::QuoteError;
pub use swap::SwapError;

/// Unified error type for all relayswap operations.
///
/// All module-specific error types convert into `RelaySwapError` via `From`,
/// so `?` propagates them naturally.
#[derive(Debug, thiserror::Error)]
pub enum RelaySwapError {
    /// Error from decimal amount conversion.
    #[error("Amount error: {0}")]
    Amount(#[from] AmountError),

    /// Error from a swap quote provider.
    #[error("Quote error: {0}")]
    Quote(#[from] QuoteError),

    /// Error from a chain node.
    #[error("Chain error: {0}")]
    Chain(#[from] ChainError),

    /// Error from swap orchestration.
    #[error("Swap error: {0}")]
    Swap(#[from] SwapError),
}

impl RelaySwapError {
    /// Whether retrying the same call may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            RelaySwapError::Chain(e) => e.is_retryable(),
            RelaySwapError::Quote(e) => e.is_retryable(),
            RelaySwapError::Swap(e) => e.is_retryable(),
            RelaySwapError::Amount(_) => false,
        }
    }
}
