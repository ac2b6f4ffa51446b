//! Error types for decimal amount conversion.

/// Errors raised while converting between decimal amounts and minimal units.
///
/// # Examples
///
/// ```rust
/// use relayswap::{to_minimal_units, AmountError, TokenDecimals};
///
/// let err = to_minimal_units("-1", TokenDecimals::STANDARD).unwrap_err();
/// assert!(matches!(err, AmountError::InvalidAmount { .. }));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AmountError {
    /// The amount is not a finite, non-negative decimal number.
    #[error("Invalid amount '{value}': {reason}")]
    InvalidAmount {
        /// The rejected input, verbatim
        value: String,
        /// Why the input was rejected
        reason: String,
    },

    /// Token precision above 18 decimals cannot be expressed in the
    /// 18-decimal reference unit.
    #[error("Unsupported token precision: {0} decimals")]
    UnsupportedDecimals(u8),
}

impl AmountError {
    /// Create an `InvalidAmount` error.
    pub fn invalid(value: impl Into<String>, reason: impl Into<String>) -> Self {
        AmountError::InvalidAmount {
            value: value.into(),
            reason: reason.into(),
        }
    }
}
