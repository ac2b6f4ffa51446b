// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Exact conversion between human decimal amounts and chain minimal units.
//!
//! All arithmetic is arbitrary precision ([`BigDecimal`] and `U256`); floats
//! are never involved. Token precision is bounded by the 18-decimal
//! reference unit (wei); a token with more decimals is rejected.
//!
//! # Example
//!
//! ```rust
//! use alloy_primitives::U256;
//! use relayswap::{from_minimal_units, to_minimal_units, TokenDecimals};
//!
//! let raw = to_minimal_units("1.5", TokenDecimals::USDC)?;
//! assert_eq!(raw, U256::from(1_500_000u64));
//! assert_eq!(from_minimal_units(raw, TokenDecimals::USDC), "1.5");
//! # Ok::<(), relayswap::AmountError>(())
//! ```

use std::str::FromStr;

use alloy_primitives::U256;
use bigdecimal::BigDecimal;

use crate::errors::AmountError;
use crate::types::tokens::TokenDecimals;

/// Parse a human decimal amount, rejecting negative and non-numeric input.
pub fn parse_amount(amount: &str) -> Result<BigDecimal, AmountError> {
    let trimmed = amount.trim();
    let value = BigDecimal::from_str(trimmed)
        .map_err(|_| AmountError::invalid(amount, "not a finite decimal number"))?;
    if value < BigDecimal::from(0) {
        return Err(AmountError::invalid(amount, "amount must not be negative"));
    }
    Ok(value)
}

/// Convert a decimal string into token minimal units.
///
/// Fractional digits beyond the token's precision are rounded half-up.
pub fn to_minimal_units(amount: &str, decimals: TokenDecimals) -> Result<U256, AmountError> {
    decimal_to_minimal_units(&parse_amount(amount)?, decimals)
}

/// Convert a decimal value into token minimal units.
pub fn decimal_to_minimal_units(
    value: &BigDecimal,
    decimals: TokenDecimals,
) -> Result<U256, AmountError> {
    check_decimals(decimals)?;
    if *value < BigDecimal::from(0) {
        return Err(AmountError::invalid(
            value.to_string(),
            "amount must not be negative",
        ));
    }

    let scaled = value.clone() * BigDecimal::new(1.into(), -i64::from(decimals.as_u8()));
    // with_scale truncates, which is floor for non-negative values
    let rounded = (scaled + BigDecimal::new(5.into(), 1)).with_scale(0);
    let (digits, _) = rounded.into_bigint_and_exponent();

    U256::from_str_radix(&digits.to_string(), 10)
        .map_err(|_| AmountError::invalid(value.to_string(), "amount exceeds 256 bits"))
}

/// Convert token minimal units into a plain decimal string.
///
/// Trailing fractional zeros are removed and scientific notation is never
/// produced, so the output always parses back to the same minimal units.
pub fn from_minimal_units(value: U256, decimals: TokenDecimals) -> String {
    let places = decimals.as_u8() as usize;
    if places == 0 {
        return value.to_string();
    }

    let divisor = decimals.scale();
    let whole = value / divisor;
    let fractional = value % divisor;

    let fractional_str = format!("{:0width$}", fractional, width = places);
    let trimmed = fractional_str.trim_end_matches('0');

    if trimmed.is_empty() {
        format!("{}", whole)
    } else {
        format!("{}.{}", whole, trimmed)
    }
}

/// Convert token minimal units into a [`BigDecimal`] for further arithmetic.
pub fn minimal_units_to_decimal(value: U256, decimals: TokenDecimals) -> BigDecimal {
    let formatted = from_minimal_units(value, decimals);
    // Formatting above only emits digits and a single point
    BigDecimal::from_str(&formatted).unwrap_or_else(|_| BigDecimal::from(0))
}

/// Parse an integer string of minimal units (decimal or `0x` hex).
pub fn parse_minimal_units(value: &str) -> Result<U256, AmountError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AmountError::invalid(value, "empty amount"));
    }
    let parsed = match trimmed.strip_prefix("0x") {
        Some(hex) => U256::from_str_radix(hex, 16),
        None => U256::from_str_radix(trimmed, 10),
    };
    parsed.map_err(|_| AmountError::invalid(value, "not a non-negative integer"))
}

fn check_decimals(decimals: TokenDecimals) -> Result<(), AmountError> {
    if decimals.is_reasonable() {
        Ok(())
    } else {
        Err(AmountError::UnsupportedDecimals(decimals.as_u8()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_minimal_units_standard() {
        assert_eq!(
            to_minimal_units("100", TokenDecimals::STANDARD).unwrap(),
            U256::from(100_000_000_000_000_000_000u128)
        );
        assert_eq!(
            to_minimal_units("0.0075", TokenDecimals::STANDARD).unwrap(),
            U256::from(7_500_000_000_000_000u64)
        );
    }

    #[test]
    fn test_to_minimal_units_rounds_half_up() {
        assert_eq!(
            to_minimal_units("1.2345675", TokenDecimals::USDC).unwrap(),
            U256::from(1_234_568u64)
        );
        assert_eq!(
            to_minimal_units("1.2345674", TokenDecimals::USDC).unwrap(),
            U256::from(1_234_567u64)
        );
    }

    #[test]
    fn test_to_minimal_units_zero_decimals() {
        assert_eq!(
            to_minimal_units("42", TokenDecimals::new(0)).unwrap(),
            U256::from(42u64)
        );
    }

    #[test]
    fn test_invalid_amounts_rejected() {
        for input in ["-1", "abc", "", "NaN", "inf", "1.2.3"] {
            let result = to_minimal_units(input, TokenDecimals::STANDARD);
            assert!(
                matches!(result, Err(AmountError::InvalidAmount { .. })),
                "{input} should be rejected"
            );
        }
    }

    #[test]
    fn test_unsupported_decimals_rejected() {
        assert_eq!(
            to_minimal_units("1", TokenDecimals::new(19)),
            Err(AmountError::UnsupportedDecimals(19))
        );
    }

    #[test]
    fn test_from_minimal_units_trims_zeros() {
        assert_eq!(
            from_minimal_units(U256::from(1_500_000u64), TokenDecimals::USDC),
            "1.5"
        );
        assert_eq!(
            from_minimal_units(U256::from(2_000_000u64), TokenDecimals::USDC),
            "2"
        );
        assert_eq!(
            from_minimal_units(U256::from(1u64), TokenDecimals::STANDARD),
            "0.000000000000000001"
        );
        assert_eq!(from_minimal_units(U256::ZERO, TokenDecimals::STANDARD), "0");
    }

    #[test]
    fn test_parse_minimal_units_hex_and_decimal() {
        assert_eq!(parse_minimal_units("0x10").unwrap(), U256::from(16u64));
        assert_eq!(parse_minimal_units("1000").unwrap(), U256::from(1000u64));
        assert!(parse_minimal_units("1.5").is_err());
    }

    #[test]
    fn test_minimal_units_to_decimal() {
        let value = minimal_units_to_decimal(
            U256::from(7_500_000_000_000_000u64),
            TokenDecimals::STANDARD,
        );
        assert_eq!(value, BigDecimal::from_str("0.0075").unwrap());
    }
}
