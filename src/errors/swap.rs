//! Error types for swap orchestration.

use alloy_primitives::Address;
use bigdecimal::BigDecimal;

use super::{AmountError, ChainError, QuoteError};

/// Errors that abort building a swap plan.
///
/// Orchestration-level conditions (`InsufficientFundsForReward`,
/// `MissingDepositDestination`) are fatal to the current build attempt and are
/// never folded into a generic failure.
#[derive(Debug, thiserror::Error)]
pub enum SwapError {
    /// After reserving the relay reward nothing is left for the main operation.
    #[error("Not enough to pay relay reward: requires {required}, available {available}")]
    InsufficientFundsForReward {
        /// Spend limit reserved for the relay reward
        required: BigDecimal,
        /// Declared amount of the sold token
        available: BigDecimal,
    },

    /// Selling a token for its canonical equivalent requires a deposit
    /// destination, none was given.
    #[error("Deposit destination is required when sell and buy tokens are the same asset")]
    MissingDepositDestination,

    /// A required piece of configuration is absent.
    #[error("Configuration missing: {details}")]
    ConfigurationMissing {
        /// What is missing
        details: String,
    },

    /// Amount conversion failed.
    #[error(transparent)]
    Amount(#[from] AmountError),

    /// Quote provider failed.
    #[error(transparent)]
    Quote(#[from] QuoteError),

    /// Chain node read failed.
    #[error(transparent)]
    Chain(#[from] ChainError),
}

impl SwapError {
    /// Create a `ConfigurationMissing` error.
    pub fn configuration_missing(details: impl Into<String>) -> Self {
        SwapError::ConfigurationMissing {
            details: details.into(),
        }
    }

    /// Create a `ConfigurationMissing` error for an unroutable pair.
    pub fn unsupported_pair(chain_id: u64, sell: Address, buy: Address) -> Self {
        Self::configuration_missing(format!(
            "no route for {sell} -> {buy} on chain {chain_id}"
        ))
    }

    /// Whether retrying the same build may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            SwapError::Quote(e) => e.is_retryable(),
            SwapError::Chain(e) => e.is_retryable(),
            _ => false,
        }
    }
}
