//! Token decimal precision type

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

/// ERC-20 token decimal precision
///
/// Most tokens (and every native coin this crate handles) use 18 decimals,
/// which is also the reference precision for amount conversion:
/// - Native coins, WETH, WBNB: 18 decimals
/// - USDC on Ethereum: 6 decimals
///
/// # Examples
///
/// ```
/// use relayswap::TokenDecimals;
///
/// let native = TokenDecimals::STANDARD;
/// assert_eq!(native.as_u8(), 18);
///
/// let usdc = TokenDecimals::USDC;
/// assert_eq!(usdc.as_u8(), 6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenDecimals(u8);

impl TokenDecimals {
    /// Maximum supported decimals (the 18-decimal reference unit)
    pub const MAX_REASONABLE: u8 = 18;

    /// Standard decimals for native coins and most tokens (18)
    pub const STANDARD: Self = Self(18);

    /// USDC decimals on Ethereum (6)
    pub const USDC: Self = Self(6);

    /// Create a new decimal precision value
    pub const fn new(decimals: u8) -> Self {
        Self(decimals)
    }

    /// Get the inner u8 value
    pub const fn as_u8(&self) -> u8 {
        self.0
    }

    /// Check if decimals fit the reference unit (0-18)
    pub const fn is_reasonable(&self) -> bool {
        self.0 <= Self::MAX_REASONABLE
    }

    /// `10^decimals` as a `U256`
    ///
    /// ```
    /// use alloy_primitives::U256;
    /// use relayswap::TokenDecimals;
    ///
    /// assert_eq!(TokenDecimals::USDC.scale(), U256::from(1_000_000u64));
    /// ```
    pub fn scale(&self) -> U256 {
        U256::from(10u64).pow(U256::from(self.0))
    }
}

impl Default for TokenDecimals {
    fn default() -> Self {
        Self::STANDARD
    }
}

impl From<u8> for TokenDecimals {
    fn from(value: u8) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for TokenDecimals {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} decimals", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_decimals_reasonable() {
        assert!(TokenDecimals::new(0).is_reasonable());
        assert!(TokenDecimals::new(18).is_reasonable());
        assert!(!TokenDecimals::new(19).is_reasonable());
        assert!(!TokenDecimals::new(255).is_reasonable());
    }

    #[test]
    fn test_token_decimals_scale() {
        assert_eq!(TokenDecimals::new(0).scale(), U256::from(1u64));
        assert_eq!(
            TokenDecimals::STANDARD.scale(),
            U256::from(1_000_000_000_000_000_000u64)
        );
    }

    #[test]
    fn test_token_decimals_default_is_standard() {
        assert_eq!(TokenDecimals::default(), TokenDecimals::STANDARD);
    }

    #[test]
    fn test_token_decimals_display() {
        assert_eq!(format!("{}", TokenDecimals::USDC), "6 decimals");
    }
}
