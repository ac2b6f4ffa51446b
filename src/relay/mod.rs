// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Relay reward estimation
//!
//! A relayed smart-wallet transaction pays its broadcaster a reward in the
//! native coin, funded from a token the wallet holds (the gas token). This
//! module sizes that reward and plans its payment.
//!
//! # Sizing
//!
//! 1. The required gas limit is a worst case built from fixed shares, see
//!    [`GasLimitBreakdown`].
//! 2. The reward is `gas price × required gas limit`. Chains with a gas
//!    price override in [`RelaySwapConfig`] ignore the caller's price.
//! 3. A native or wrapped-native gas token pays the reward as is. Any other
//!    gas token is swapped for exactly the reward; the spend limit is the
//!    quote's maximum sell amount under the relay slippage.
//!
//! When only the number of bundled swaps changes,
//! [`RelayRewardEstimator::recalculate`] rescales a previous estimate offline.
//! It refuses when the wallet-existence, gas-token or gas-price inputs differ
//! from those the estimate was made under.
//!
//! # Example
//!
//! ```rust,ignore
//! use relayswap::relay::{RelayRewardEstimator, RelayRewardParams};
//!
//! let estimator = RelayRewardEstimator::new(&config, provider, chain_client);
//! let estimate = estimator.estimate(&params).await?;
//! println!("reserve {} of the gas token", estimate.spend_limit_decimal());
//! ```

use std::sync::Arc;

use alloy_primitives::{Address, U256};
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, Instrument};

use crate::chain::{asset_kind, AssetKind, ChainClient};
use crate::config::RelaySwapConfig;
use crate::errors::{AmountError, SwapError};
use crate::instructions::{calls, ApprovalPlanner};
use crate::quote::{QuoteRequest, SwapAmount, SwapQuoteProvider};
use crate::spans;
use crate::types::instruction::Instruction;
use crate::types::intent::SwapSide;
use crate::types::tokens::{TokenDecimals, NATIVE_COIN_ADDRESS};
use crate::types::wei::WeiAmount;
use crate::units::minimal_units_to_decimal;

mod gas;

pub use gas::{recalculate_estimation, GasLimitBreakdown};

/// Inputs of a relay reward estimate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayRewardParams {
    pub chain_id: u64,
    /// Caller's gas price, ignored on chains with an override
    pub gas_price_gwei: BigDecimal,
    /// Token the reward is paid from
    pub gas_token: Address,
    pub gas_token_decimals: TokenDecimals,
    /// Number of bundled main swaps
    pub complexity: u64,
    pub wallet_exists: bool,
    /// Smart wallet holding the gas token
    pub wallet: Address,
}

/// Outcome of a relay reward estimate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayEstimate {
    pub gas_limit: GasLimitBreakdown,
    pub gas_price: WeiAmount,
    /// Reward owed to the broadcaster
    pub reward_native: WeiAmount,
    /// Most of the gas token the reward may consume, in minimal units
    pub spend_limit: U256,
    pub gas_token: Address,
    pub gas_token_decimals: TokenDecimals,
}

impl RelayEstimate {
    pub fn required_gas_limit(&self) -> u64 {
        self.gas_limit.total()
    }

    /// Spend limit in gas token units
    pub fn spend_limit_decimal(&self) -> BigDecimal {
        minimal_units_to_decimal(self.spend_limit, self.gas_token_decimals)
    }
}

/// Instructions paying the relay reward
#[derive(Debug, Clone, PartialEq)]
pub struct RewardPlan {
    /// Approval of the aggregator spender, when allowance is short
    pub approval: Option<Instruction>,
    /// Swap or unwrap plus transfer, ending with the broadcaster paid
    pub payment: Vec<Instruction>,
    /// Most of the gas token the payment may consume, in minimal units
    pub spend_limit: U256,
    pub reward_native: WeiAmount,
}

/// Sizes and plans relay rewards
#[derive(Clone)]
pub struct RelayRewardEstimator {
    config: RelaySwapConfig,
    provider: Arc<dyn SwapQuoteProvider>,
    approvals: ApprovalPlanner,
}

impl RelayRewardEstimator {
    pub fn new(
        config: &RelaySwapConfig,
        provider: Arc<dyn SwapQuoteProvider>,
        chain: Arc<dyn ChainClient>,
    ) -> Self {
        Self {
            config: config.clone(),
            provider,
            approvals: ApprovalPlanner::new(chain, config.swap.approval_mode),
        }
    }

    fn gas_token_kind(&self, params: &RelayRewardParams) -> Result<AssetKind, SwapError> {
        let wrapped = self.config.chain(params.chain_id)?.wrapped_native;
        Ok(asset_kind(params.gas_token, wrapped))
    }

    /// Worst-case gas limit for `params`
    pub fn required_gas_limit(
        &self,
        params: &RelayRewardParams,
    ) -> Result<GasLimitBreakdown, SwapError> {
        Ok(GasLimitBreakdown::new(
            self.config.relay.gas_limits,
            params.complexity,
            params.wallet_exists,
            self.gas_token_kind(params)?.is_native_like(),
        ))
    }

    /// Effective gas price: the chain override when configured
    pub fn gas_price(&self, params: &RelayRewardParams) -> Result<WeiAmount, SwapError> {
        let gwei = self
            .config
            .get_gas_price_override(params.chain_id)
            .unwrap_or(&params.gas_price_gwei);
        Ok(WeiAmount::from_gwei(gwei)?)
    }

    /// `gas price × required gas limit`
    pub fn reward_native(&self, params: &RelayRewardParams) -> Result<WeiAmount, SwapError> {
        let gas_limit = self.required_gas_limit(params)?;
        reward_for(self.gas_price(params)?, &gas_limit)
    }

    /// Estimate the reward and the gas token spend limit covering it
    ///
    /// Native-like gas tokens need no quote. Otherwise the configured relay
    /// provider prices a buy of exactly the reward.
    pub async fn estimate(&self, params: &RelayRewardParams) -> Result<RelayEstimate, SwapError> {
        let span =
            spans::estimate_relay_reward(params.chain_id, params.gas_token, params.complexity);
        async move {
            let gas_limit = self.required_gas_limit(params)?;
            let gas_price = self.gas_price(params)?;
            let reward_native = reward_for(gas_price, &gas_limit)?;

            let spend_limit = if gas_limit.native_like {
                reward_native.as_u256()
            } else {
                let request = self.reward_swap_request(params, reward_native);
                let quote = self.provider.get_price(params.chain_id, &request).await?;
                self.provider
                    .calculate_estimation_limit(&quote, SwapSide::Buy, request.slippage)
                    .as_u256()
            };

            let estimate = RelayEstimate {
                gas_limit,
                gas_price,
                reward_native,
                spend_limit,
                gas_token: params.gas_token,
                gas_token_decimals: params.gas_token_decimals,
            };
            info!(
                gas_limit = estimate.required_gas_limit(),
                reward = %reward_native.to_ether_string(),
                spend_limit = %estimate.spend_limit_decimal(),
                "Estimated relay reward"
            );
            Ok(estimate)
        }
        .instrument(span)
        .await
    }

    /// Rescale `previous` to the complexity in `params` without a quote
    ///
    /// Returns `None` when `previous` was made under different wallet
    /// existence, gas token, chain or gas price; the caller must then run a
    /// fresh [`estimate`](Self::estimate).
    pub fn recalculate(
        &self,
        previous: &RelayEstimate,
        params: &RelayRewardParams,
    ) -> Result<Option<RelayEstimate>, SwapError> {
        let gas_limit = self.required_gas_limit(params)?;
        let gas_price = self.gas_price(params)?;

        if !gas_limit.same_flags(&previous.gas_limit)
            || gas_price != previous.gas_price
            || params.gas_token != previous.gas_token
        {
            debug!(
                previous = ?previous.gas_limit,
                current = ?gas_limit,
                "Relay inputs changed, offline recalculation not applicable"
            );
            return Ok(None);
        }

        let spend_limit = recalculate_estimation(
            &gas_limit,
            previous.required_gas_limit(),
            previous.spend_limit,
        );
        Ok(Some(RelayEstimate {
            gas_limit,
            gas_price,
            reward_native: reward_for(gas_price, &gas_limit)?,
            spend_limit,
            gas_token: previous.gas_token,
            gas_token_decimals: previous.gas_token_decimals,
        }))
    }

    /// Plan the instructions that pay the reward
    ///
    /// - Native coin: transfer the reward to the broadcaster.
    /// - Wrapped native: unwrap the reward, then transfer it.
    /// - Any other token: approval if needed, a swap buying exactly the reward
    ///   for the broadcaster, then a forward when the provider cannot pay a
    ///   third party directly.
    pub async fn build_reward_instructions(
        &self,
        params: &RelayRewardParams,
    ) -> Result<RewardPlan, SwapError> {
        let span = spans::build_reward_instructions(params.chain_id, params.gas_token);
        async move {
            let broadcaster = self.config.relay.broadcaster;
            let reward_native = self.reward_native(params)?;
            let reward = reward_native.as_u256();

            let plan = match self.gas_token_kind(params)? {
                AssetKind::Native => RewardPlan {
                    approval: None,
                    payment: vec![Instruction::native_transfer(broadcaster, reward)],
                    spend_limit: reward,
                    reward_native,
                },
                AssetKind::WrappedNative => RewardPlan {
                    approval: None,
                    payment: vec![
                        calls::unwrap_native(params.gas_token, reward),
                        Instruction::native_transfer(broadcaster, reward),
                    ],
                    spend_limit: reward,
                    reward_native,
                },
                AssetKind::Token => {
                    let request = self.reward_swap_request(params, reward_native);
                    let built = self
                        .provider
                        .build_swap_instruction(params.chain_id, &request)
                        .await?;
                    let spend_limit = self
                        .provider
                        .calculate_estimation_limit(
                            &built.quote,
                            SwapSide::Buy,
                            request.slippage,
                        )
                        .as_u256();

                    let approval = self
                        .approvals
                        .approval_for(
                            params.chain_id,
                            params.gas_token,
                            params.wallet,
                            built.quote.allowance_target,
                            spend_limit,
                        )
                        .await?;

                    let mut payment = vec![built.instruction];
                    if !self.provider.supports_receiver() {
                        payment.push(Instruction::native_transfer(
                            broadcaster,
                            built.quote.buy_amount,
                        ));
                    }

                    RewardPlan {
                        approval,
                        payment,
                        spend_limit,
                        reward_native,
                    }
                }
            };

            debug!(
                approval = plan.approval.is_some(),
                payment = plan.payment.len(),
                spend_limit = %plan.spend_limit,
                "Planned relay reward payment"
            );
            Ok(plan)
        }
        .instrument(span)
        .await
    }

    fn reward_swap_request(
        &self,
        params: &RelayRewardParams,
        reward_native: WeiAmount,
    ) -> QuoteRequest {
        QuoteRequest {
            sell_token: params.gas_token,
            sell_decimals: params.gas_token_decimals,
            buy_token: NATIVE_COIN_ADDRESS,
            buy_decimals: TokenDecimals::STANDARD,
            amount: SwapAmount::Buy(reward_native.as_u256()),
            slippage: self.config.relay.slippage,
            taker: params.wallet,
            receiver: Some(self.config.relay.broadcaster),
        }
    }
}

fn reward_for(
    gas_price: WeiAmount,
    gas_limit: &GasLimitBreakdown,
) -> Result<WeiAmount, SwapError> {
    let reward = gas_price.checked_mul_gas(gas_limit.total()).ok_or_else(|| {
        AmountError::invalid(gas_price.to_string(), "relay reward exceeds 256 bits")
    })?;
    Ok(reward)
}

impl std::fmt::Debug for RelayRewardEstimator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelayRewardEstimator")
            .field("provider", &self.provider.name())
            .field("broadcaster", &self.config.relay.broadcaster)
            .finish_non_exhaustive()
    }
}
