//! Error types for chain node operations.

use alloy_primitives::Address;

/// Errors that can occur while reading from a chain node.
#[derive(Debug, thiserror::Error)]
pub enum ChainError {
    /// No chain configuration exists for this chain id.
    #[error("Unknown or unconfigured chain: {0}")]
    UnknownChain(u64),

    /// Reading the ERC-20 allowance failed.
    ///
    /// Allowance reads are recoverable: the caller may retry the whole
    /// decision, since nothing was written.
    #[error("Failed to query allowance of {token} (owner {owner}, spender {spender})")]
    AllowanceQueryFailed {
        /// Token contract
        token: Address,
        /// Token holder
        owner: Address,
        /// Approved spender
        spender: Address,
        /// The underlying provider error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Reading `decimals()` from a token contract failed.
    #[error("Failed to query decimals of {token}")]
    DecimalsQueryFailed {
        /// Token contract
        token: Address,
        /// The underlying provider error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The configured RPC endpoint is not a valid URL.
    #[error("Invalid provider URL: {0}")]
    ProviderUrlInvalid(String),
}

impl ChainError {
    /// Create an `AllowanceQueryFailed` error.
    pub fn allowance_query_failed(
        token: Address,
        owner: Address,
        spender: Address,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        ChainError::AllowanceQueryFailed {
            token,
            owner,
            spender,
            source: Box::new(source),
        }
    }

    /// Create a `DecimalsQueryFailed` error.
    pub fn decimals_query_failed(
        token: Address,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        ChainError::DecimalsQueryFailed {
            token,
            source: Box::new(source),
        }
    }

    /// Node reads may succeed on retry.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ChainError::AllowanceQueryFailed { .. } | ChainError::DecimalsQueryFailed { .. }
        )
    }
}
