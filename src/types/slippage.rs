//! Slippage tolerance as a fraction of one
//!
//! Aggregators disagree on units (0x takes a fraction, ParaSwap takes basis
//! points). Callers always speak in fractions; providers convert at the edge.

use alloy_primitives::U256;
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use crate::errors::AmountError;
use crate::types::tokens::TokenDecimals;
use crate::units::{
    decimal_to_minimal_units, from_minimal_units, minimal_units_to_decimal, parse_amount,
};

/// 1.0 expressed in slippage parts
const ONE: U256 = U256::from_limbs([1_000_000_000_000_000_000, 0, 0, 0]);

/// Basis points in one
const BPS_PER_ONE: u64 = 10_000;

/// Maximum tolerated adverse price movement, as a fraction in `[0, 1)`.
///
/// Stored with 18 fractional digits so limit arithmetic stays integral.
///
/// # Examples
///
/// ```
/// use relayswap::Slippage;
///
/// let slippage = Slippage::from_percent(5);
/// assert_eq!(slippage.to_fraction_string(), "0.05");
/// assert_eq!(slippage.to_bps(), 500);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "U256", into = "U256")]
pub struct Slippage(U256);

impl Slippage {
    /// No slippage tolerated
    pub const ZERO: Self = Self(U256::ZERO);

    /// Parse a fraction such as `"0.05"`.
    pub fn from_fraction(fraction: &str) -> Result<Self, AmountError> {
        Self::from_decimal(&parse_amount(fraction)?)
    }

    /// Build from a decimal fraction.
    pub fn from_decimal(fraction: &BigDecimal) -> Result<Self, AmountError> {
        let parts = decimal_to_minimal_units(fraction, TokenDecimals::STANDARD)?;
        Self::try_from(parts).map_err(|_| {
            AmountError::invalid(fraction.to_string(), "slippage must be below 1")
        })
    }

    /// Whole percent, e.g. `5` for 5%. Values of 100 or more saturate just below 1.
    pub fn from_percent(percent: u8) -> Self {
        Self::from_bps(u32::from(percent) * 100)
    }

    /// Basis points, e.g. `500` for 5%.
    pub fn from_bps(bps: u32) -> Self {
        let bps = u64::from(bps).min(BPS_PER_ONE - 1);
        Self(ONE / U256::from(BPS_PER_ONE) * U256::from(bps))
    }

    /// Fraction as a plain decimal string (0x convention).
    pub fn to_fraction_string(&self) -> String {
        from_minimal_units(self.0, TokenDecimals::STANDARD)
    }

    /// Fraction as a decimal.
    pub fn to_decimal(&self) -> BigDecimal {
        minimal_units_to_decimal(self.0, TokenDecimals::STANDARD)
    }

    /// Basis points, rounded down (ParaSwap convention).
    pub fn to_bps(&self) -> u64 {
        let bps = self.0 * U256::from(BPS_PER_ONE) / ONE;
        bps.try_into().unwrap_or(BPS_PER_ONE)
    }

    /// `value × (1 − slippage)`, rounded down.
    pub fn apply_min(&self, value: U256) -> U256 {
        mul_div_floor(value, ONE - self.0, ONE)
    }

    /// `value × (1 + slippage)`, rounded up.
    pub fn apply_max(&self, value: U256) -> U256 {
        mul_div_ceil(value, ONE + self.0, ONE)
    }
}

/// Parts per 10^18; one or more is rejected.
impl TryFrom<U256> for Slippage {
    type Error = AmountError;

    fn try_from(parts: U256) -> Result<Self, Self::Error> {
        if parts >= ONE {
            return Err(AmountError::invalid(
                from_minimal_units(parts, TokenDecimals::STANDARD),
                "slippage must be below 1",
            ));
        }
        Ok(Self(parts))
    }
}

impl From<Slippage> for U256 {
    fn from(slippage: Slippage) -> Self {
        slippage.0
    }
}

impl std::fmt::Display for Slippage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_fraction_string())
    }
}

fn mul_div_floor(value: U256, numerator: U256, denominator: U256) -> U256 {
    match value.checked_mul(numerator) {
        Some(product) => product / denominator,
        // Huge values: divide first, losing at most one unit of precision
        None => value / denominator * numerator,
    }
}

fn mul_div_ceil(value: U256, numerator: U256, denominator: U256) -> U256 {
    match value.checked_mul(numerator) {
        Some(product) => {
            let quotient = product / denominator;
            if product % denominator == U256::ZERO {
                quotient
            } else {
                quotient + U256::from(1u64)
            }
        }
        None => (value / denominator + U256::from(1u64)).saturating_mul(numerator),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_fraction() {
        let slippage = Slippage::from_fraction("0.05").unwrap();
        assert_eq!(slippage, Slippage::from_percent(5));
        assert_eq!(slippage.to_bps(), 500);
    }

    #[test]
    fn test_rejects_one_and_above() {
        assert!(Slippage::from_fraction("1").is_err());
        assert!(Slippage::from_fraction("1.5").is_err());
        assert!(Slippage::from_fraction("-0.1").is_err());
    }

    #[test]
    fn test_apply_min_and_max() {
        let slippage = Slippage::from_percent(5);
        assert_eq!(slippage.apply_min(U256::from(1000u64)), U256::from(950u64));
        assert_eq!(slippage.apply_max(U256::from(1000u64)), U256::from(1050u64));
    }

    #[test]
    fn test_rounding_direction() {
        let slippage = Slippage::from_percent(5);
        // 7 * 0.95 = 6.65 -> 6; 7 * 1.05 = 7.35 -> 8
        assert_eq!(slippage.apply_min(U256::from(7u64)), U256::from(6u64));
        assert_eq!(slippage.apply_max(U256::from(7u64)), U256::from(8u64));
    }

    #[test]
    fn test_zero_slippage_is_identity() {
        let value = U256::from(123_456_789u64);
        assert_eq!(Slippage::ZERO.apply_min(value), value);
        assert_eq!(Slippage::ZERO.apply_max(value), value);
    }

    #[test]
    fn test_deserialize_rejects_one_and_above() {
        // 2.0 and 1.0 as 18-decimal parts
        let two = serde_json::json!("0x1bc16d674ec80000");
        let one = serde_json::json!("0xde0b6b3a7640000");
        assert!(serde_json::from_value::<Slippage>(two).is_err());
        assert!(serde_json::from_value::<Slippage>(one).is_err());
    }

    #[test]
    fn test_serde_keeps_valid_fraction() {
        let slippage = Slippage::from_percent(5);
        let json = serde_json::to_value(slippage).unwrap();
        let back: Slippage = serde_json::from_value(json).unwrap();
        assert_eq!(back, slippage);
        assert_eq!(back.apply_min(U256::from(1000u64)), U256::from(950u64));
    }

    #[test]
    fn test_from_percent_saturates() {
        assert_eq!(Slippage::from_percent(200).to_bps(), 9_999);
    }
}
