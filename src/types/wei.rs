// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Strong types for native currency amounts
//!
//! This module provides a newtype wrapper for native currency (ETH, BNB) in
//! wei to keep relay rewards apart from ERC-20 token amounts.

use alloy_primitives::U256;
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use std::ops::Add;

use crate::errors::AmountError;
use crate::types::tokens::TokenDecimals;
use crate::units::{decimal_to_minimal_units, from_minimal_units, minimal_units_to_decimal};

/// Gwei has 9 decimals (10^9 wei = 1 gwei)
const GWEI_DECIMALS: TokenDecimals = TokenDecimals::new(9);

/// Represents an amount of native currency in wei
///
/// # Examples
///
/// ```
/// use bigdecimal::BigDecimal;
/// use relayswap::WeiAmount;
///
/// let gas_price = WeiAmount::from_gwei(&BigDecimal::from(5)).unwrap();
/// let reward = gas_price.checked_mul_gas(1_500_000).unwrap();
/// assert_eq!(reward.to_ether_string(), "0.0075");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct WeiAmount(U256);

impl WeiAmount {
    /// Zero wei amount
    pub const ZERO: Self = Self(U256::ZERO);

    /// Create a new wei amount
    pub const fn new(wei: U256) -> Self {
        Self(wei)
    }

    /// Convert a decimal gwei value to wei, rounding half-up to whole wei
    pub fn from_gwei(gwei: &BigDecimal) -> Result<Self, AmountError> {
        decimal_to_minimal_units(gwei, GWEI_DECIMALS).map(Self)
    }

    /// Get the inner U256 value (in wei)
    pub const fn as_u256(&self) -> U256 {
        self.0
    }

    /// Multiply a per-gas price by a gas limit
    pub fn checked_mul_gas(&self, gas: u64) -> Option<Self> {
        self.0.checked_mul(U256::from(gas)).map(Self)
    }

    /// Format as a plain ether decimal string
    pub fn to_ether_string(&self) -> String {
        from_minimal_units(self.0, TokenDecimals::STANDARD)
    }

    /// Ether value as a decimal for further arithmetic
    pub fn to_ether(&self) -> BigDecimal {
        minimal_units_to_decimal(self.0, TokenDecimals::STANDARD)
    }

    /// Check if the amount is zero
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl From<U256> for WeiAmount {
    fn from(value: U256) -> Self {
        Self(value)
    }
}

impl Add for WeiAmount {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl std::fmt::Display for WeiAmount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} wei", self.0)
    }
}
