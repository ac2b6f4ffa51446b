//! Slippage-adjusted swap limits

use alloy_primitives::U256;
use bigdecimal::BigDecimal;

use super::Quote;
use crate::types::intent::SwapSide;
use crate::types::slippage::Slippage;
use crate::types::tokens::TokenDecimals;
use crate::units::{from_minimal_units, minimal_units_to_decimal};

/// Worst acceptable outcome of a quoted swap, in minimal units
///
/// For [`SwapSide::Sell`] this is the minimum amount of the buy token to
/// receive; for [`SwapSide::Buy`] the maximum amount of the sell token to
/// spend. Derived on demand and never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EstimationLimit {
    pub side: SwapSide,
    pub amount: U256,
}

impl EstimationLimit {
    /// `buy × (1 − slippage)` rounded down, or `sell × (1 + slippage)` rounded up
    ///
    /// # Examples
    ///
    /// ```
    /// use relayswap::quote::{EstimationLimit, Quote};
    /// use relayswap::{Slippage, SwapSide};
    /// use alloy_primitives::{Address, U256};
    ///
    /// let quote = Quote::new(
    ///     U256::from(1000),
    ///     U256::from(2000),
    ///     Address::ZERO,
    ///     serde_json::Value::Null,
    /// );
    /// let slippage = Slippage::from_percent(5);
    ///
    /// let min = EstimationLimit::from_quote(&quote, SwapSide::Sell, slippage);
    /// assert_eq!(min.amount, U256::from(1900));
    ///
    /// let max = EstimationLimit::from_quote(&quote, SwapSide::Buy, slippage);
    /// assert_eq!(max.amount, U256::from(1050));
    /// ```
    pub fn from_quote(quote: &Quote, side: SwapSide, slippage: Slippage) -> Self {
        let amount = match side {
            SwapSide::Sell => slippage.apply_min(quote.buy_amount),
            SwapSide::Buy => slippage.apply_max(quote.sell_amount),
        };
        Self { side, amount }
    }

    /// Minimal units of the limited token
    pub fn as_u256(&self) -> U256 {
        self.amount
    }

    /// Limit as a decimal string in the limited token's units
    ///
    /// `decimals` belongs to the buy token for exact-input swaps and to the
    /// sell token for exact-output swaps.
    pub fn to_decimal_string(&self, decimals: TokenDecimals) -> String {
        from_minimal_units(self.amount, decimals)
    }

    pub fn to_decimal(&self, decimals: TokenDecimals) -> BigDecimal {
        minimal_units_to_decimal(self.amount, decimals)
    }
}
