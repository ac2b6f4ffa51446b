//! Error types for swap quote providers.

/// Errors returned by [`crate::quote::SwapQuoteProvider`] implementations.
///
/// `InsufficientLiquidity` is kept apart from transport failures so callers
/// can tell "no route exists" from "the service is down".
#[derive(Debug, Clone, thiserror::Error)]
pub enum QuoteError {
    /// The aggregator found no viable route for the requested pair and size.
    #[error("{provider}: insufficient liquidity ({message})")]
    InsufficientLiquidity {
        /// Provider that reported the condition
        provider: &'static str,
        /// Provider-decoded reason
        message: String,
    },

    /// The request failed for any other reason.
    ///
    /// `message` is already normalized by [`crate::errors::describe_failure`].
    #[error("{provider} request failed: {message}")]
    RequestFailed {
        /// Provider that was queried
        provider: &'static str,
        /// Normalized failure description
        message: String,
        /// HTTP status, when a response was received
        status: Option<u16>,
    },

    /// The provider does not serve the requested chain.
    #[error("{provider} does not support chain {chain_id}")]
    UnsupportedChain {
        /// Provider that was queried
        provider: &'static str,
        /// Requested chain id
        chain_id: u64,
    },

    /// The provider answered with a payload that could not be interpreted.
    #[error("{provider} returned a malformed response: {details}")]
    MalformedResponse {
        /// Provider that was queried
        provider: &'static str,
        /// What was missing or unparsable
        details: String,
    },
}

impl QuoteError {
    /// Create a `MalformedResponse` error.
    pub fn malformed(provider: &'static str, details: impl Into<String>) -> Self {
        QuoteError::MalformedResponse {
            provider,
            details: details.into(),
        }
    }

    /// Whether this error signals a missing route rather than a failure.
    pub fn is_insufficient_liquidity(&self) -> bool {
        matches!(self, QuoteError::InsufficientLiquidity { .. })
    }

    /// Transport failures and server errors may succeed on retry.
    pub fn is_retryable(&self) -> bool {
        match self {
            QuoteError::RequestFailed { status, .. } => {
                status.is_none_or(|code| code >= 500 || code == 429)
            }
            _ => false,
        }
    }
}
