//! Worst-case gas accounting for relayed transactions

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

use crate::config::RelayGasLimits;

/// Required gas limit of a relayed transaction, split by sub-operation
///
/// Keeps the flags it was computed under so a stored estimate can tell
/// whether an offline rescale is still valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GasLimitBreakdown {
    pub limits: RelayGasLimits,
    /// Number of bundled main swaps
    pub complexity: u64,
    /// Whether the smart wallet is already deployed
    pub wallet_exists: bool,
    /// Whether the gas token is the native coin or its wrapped form
    pub native_like: bool,
}

impl GasLimitBreakdown {
    pub fn new(
        limits: RelayGasLimits,
        complexity: u64,
        wallet_exists: bool,
        native_like: bool,
    ) -> Self {
        Self {
            limits,
            complexity,
            wallet_exists,
            native_like,
        }
    }

    /// Share of any relayed call
    pub fn base(&self) -> u64 {
        self.limits.base
    }

    /// Share of deploying the wallet
    pub fn create(&self) -> u64 {
        if self.wallet_exists {
            0
        } else {
            self.limits.create
        }
    }

    /// Share of swapping the gas token into the native reward
    pub fn gas_swap(&self) -> u64 {
        if self.native_like {
            0
        } else {
            self.limits.swap
        }
    }

    /// Share of the bundled main swaps
    pub fn swaps(&self) -> u64 {
        self.complexity.saturating_mul(self.limits.swap)
    }

    /// `base + create + gas_swap + complexity × swap`
    pub fn total(&self) -> u64 {
        self.base()
            .saturating_add(self.create())
            .saturating_add(self.gas_swap())
            .saturating_add(self.swaps())
    }

    /// Same flags, different number of bundled swaps
    pub fn with_complexity(self, complexity: u64) -> Self {
        Self { complexity, ..self }
    }

    /// Whether a value estimated under `other` can be rescaled to `self`
    pub fn same_flags(&self, other: &Self) -> bool {
        self.limits == other.limits
            && self.wallet_exists == other.wallet_exists
            && self.native_like == other.native_like
    }
}

/// Rescale an estimate made for `old_gas_limit` to the shares of `new_gas_limit`
///
/// Each share of the new limit is a fixed fraction of the old limit, so the
/// whole rescale is `old_estimation × new_total / old_gas_limit`. It is
/// computed in one multiplication and one floor division, which makes an
/// unchanged limit reproduce `old_estimation` exactly.
///
/// # Examples
///
/// ```
/// use relayswap::relay::{recalculate_estimation, GasLimitBreakdown};
/// use relayswap::RelayGasLimits;
/// use alloy_primitives::U256;
///
/// let one_swap = GasLimitBreakdown::new(RelayGasLimits::default(), 1, true, false);
/// let two_swaps = one_swap.with_complexity(2);
///
/// // 1.5M gas estimated at 3000 units, 2M gas is 4000 units
/// let rescaled = recalculate_estimation(&two_swaps, one_swap.total(), U256::from(3000));
/// assert_eq!(rescaled, U256::from(4000));
/// ```
pub fn recalculate_estimation(
    new_gas_limit: &GasLimitBreakdown,
    old_gas_limit: u64,
    old_estimation: U256,
) -> U256 {
    if old_gas_limit == 0 {
        return U256::ZERO;
    }
    old_estimation.saturating_mul(U256::from(new_gas_limit.total())) / U256::from(old_gas_limit)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn breakdown(complexity: u64, wallet_exists: bool, native_like: bool) -> GasLimitBreakdown {
        GasLimitBreakdown::new(
            RelayGasLimits::default(),
            complexity,
            wallet_exists,
            native_like,
        )
    }

    #[test]
    fn test_total_existing_wallet_token_gas() {
        assert_eq!(breakdown(1, true, false).total(), 1_500_000);
    }

    #[test]
    fn test_total_new_wallet_adds_creation() {
        assert_eq!(breakdown(1, false, false).total(), 2_500_000);
    }

    #[test]
    fn test_total_native_gas_token_skips_gas_swap() {
        assert_eq!(breakdown(0, true, true).total(), 500_000);
        assert_eq!(breakdown(3, true, true).total(), 2_000_000);
    }

    #[test]
    fn test_recalculate_identity() {
        let gas = breakdown(2, false, false);
        let estimate = U256::from(123_456_789u64);
        assert_eq!(recalculate_estimation(&gas, gas.total(), estimate), estimate);
    }

    #[test]
    fn test_recalculate_to_zero_complexity() {
        let old = breakdown(1, true, false);
        let new = old.with_complexity(0);
        // 1.5M -> 1.0M
        assert_eq!(
            recalculate_estimation(&new, old.total(), U256::from(1500)),
            U256::from(1000)
        );
    }

    #[test]
    fn test_same_flags() {
        let a = breakdown(1, true, false);
        assert!(a.same_flags(&a.with_complexity(5)));
        assert!(!a.same_flags(&breakdown(1, false, false)));
        assert!(!a.same_flags(&breakdown(1, true, true)));
    }
}
