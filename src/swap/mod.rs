// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Swap orchestration
//!
//! [`SwapOrchestrator`] turns a [`SwapIntent`] into an ordered instruction
//! list for the smart wallet, reserving the relay reward along the way.
//!
//! # Workflow
//!
//! 1. **Mode**: selling a token for its canonical equivalent (native coin,
//!    its wrapped form) is a hub bridge deposit, not a swap. Deposits bundle
//!    no swap, so the relay complexity drops to zero.
//! 2. **Reward**: the relay reward is estimated (or planned, when building)
//!    through [`RelayRewardEstimator`].
//! 3. **Split**: when the reward is paid from the sell token of an
//!    exact-input intent, its spend limit is taken off the declared amount.
//!    Nothing left means [`SwapError::InsufficientFundsForReward`].
//! 4. **Main operation**: a quote for the remainder (swap mode) or a hub
//!    deposit (deposit mode), each preceded by an approval when the
//!    allowance is short.
//! 5. **Assembly** in strict order: reward approval, reward payment, main
//!    approval, main operation, forward to the receiver.
//!
//! # Example
//!
//! ```rust,ignore
//! use relayswap::{IntentAmount, SwapIntent, SwapOrchestrator, SwapRequest};
//!
//! let orchestrator = SwapOrchestrator::from_config(&config, network, chain);
//! let intent = SwapIntent::new(56, usdt, wbnb, IntentAmount::sell("100")?, wallet);
//! let plan = orchestrator.build(&SwapRequest::new(intent).with_relay(relay_params)).await?;
//! for instruction in &plan.instructions {
//!     println!("{} {}", instruction.to, instruction.data);
//! }
//! ```

use std::sync::Arc;

use alloy_primitives::{Address, U256};
use bigdecimal::BigDecimal;
use tracing::{debug, info, Instrument};

use crate::chain::{same_canonical_asset, ChainClient, TokenDecimalsCache};
use crate::config::{ChainConfig, RelaySwapConfig};
use crate::errors::{QuoteError, SwapError};
use crate::instructions::{
    calls, grants_unlimited, ApprovalPlanner, InstructionListBuilder, InstructionStage,
};
use crate::quote::{
    build_quote_provider, EstimationLimit, Quote, QuoteRequest, SwapAmount, SwapQuoteProvider,
};
use crate::relay::{RelayEstimate, RelayRewardEstimator, RelayRewardParams, RewardPlan};
use crate::spans;
use crate::transport::NetworkClient;
use crate::types::instruction::Instruction;
use crate::types::intent::{IntentAmount, SwapIntent};
use crate::types::tokens::{is_native, normalize_native, TokenDecimals};
use crate::units::{decimal_to_minimal_units, minimal_units_to_decimal};

/// What the main operation of a plan does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwapMode {
    /// Aggregator swap from the sell token to the buy token
    Swap,
    /// Hub bridge deposit of the sell token, no swap
    DepositOnly,
}

/// An intent plus the relay reward inputs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapRequest {
    pub intent: SwapIntent,
    /// `None` skips the relay reward entirely
    pub relay: Option<RelayRewardParams>,
}

impl SwapRequest {
    pub fn new(intent: SwapIntent) -> Self {
        Self {
            intent,
            relay: None,
        }
    }

    pub fn with_relay(mut self, relay: RelayRewardParams) -> Self {
        self.relay = Some(relay);
        self
    }
}

/// Result of [`SwapOrchestrator::estimate`]
#[derive(Debug, Clone, PartialEq)]
pub struct SwapEstimate {
    pub mode: SwapMode,
    pub relay: Option<RelayEstimate>,
    /// Fixed side of the main operation, after the reward reservation
    pub main_amount: SwapAmount,
    /// Indicative quote, absent for deposits
    pub quote: Option<Quote>,
    /// Minimum received or maximum spent, absent for deposits
    pub limit: Option<EstimationLimit>,
}

/// Result of [`SwapOrchestrator::build`]
#[derive(Debug, Clone, PartialEq)]
pub struct SwapPlan {
    pub mode: SwapMode,
    /// Ordered instructions for the smart wallet
    pub instructions: Vec<Instruction>,
    /// Stage of each non-empty sub-list, in emission order
    pub stages: Vec<InstructionStage>,
    pub reward: Option<RewardPlan>,
    pub main_amount: SwapAmount,
    pub limit: Option<EstimationLimit>,
}

/// Plans swaps and deposits with relay rewards
#[derive(Clone)]
pub struct SwapOrchestrator {
    config: RelaySwapConfig,
    provider: Arc<dyn SwapQuoteProvider>,
    relay: RelayRewardEstimator,
    approvals: ApprovalPlanner,
    decimals: Arc<TokenDecimalsCache>,
}

impl SwapOrchestrator {
    /// Create an orchestrator with explicit providers for the main swap and
    /// the reward swap
    pub fn new(
        config: &RelaySwapConfig,
        provider: Arc<dyn SwapQuoteProvider>,
        reward_provider: Arc<dyn SwapQuoteProvider>,
        chain: Arc<dyn ChainClient>,
    ) -> Self {
        Self {
            config: config.clone(),
            provider,
            relay: RelayRewardEstimator::new(config, reward_provider, chain.clone()),
            approvals: ApprovalPlanner::new(chain.clone(), config.swap.approval_mode),
            decimals: Arc::new(TokenDecimalsCache::new(chain)),
        }
    }

    /// Create an orchestrator with the providers selected in `config`
    pub fn from_config(
        config: &RelaySwapConfig,
        network: Arc<dyn NetworkClient>,
        chain: Arc<dyn ChainClient>,
    ) -> Self {
        let provider = build_quote_provider(config.swap.provider, config, network.clone());
        let reward_provider = if config.relay.provider == config.swap.provider {
            provider.clone()
        } else {
            build_quote_provider(config.relay.provider, config, network)
        };
        Self::new(config, provider, reward_provider, chain)
    }

    pub fn relay_estimator(&self) -> &RelayRewardEstimator {
        &self.relay
    }

    /// Whether `intent` sells a token for its canonical equivalent
    pub fn is_deposit_only(&self, intent: &SwapIntent) -> Result<bool, SwapError> {
        let chain = self.config.chain(intent.chain_id)?;
        Ok(same_canonical_asset(
            intent.sell_token,
            intent.buy_token,
            chain.wrapped_native,
        ))
    }

    /// Estimate the reward reservation and the outcome of the main operation
    pub async fn estimate(&self, request: &SwapRequest) -> Result<SwapEstimate, SwapError> {
        let intent = &request.intent;
        let span = spans::estimate_swap(intent.chain_id, intent.sell_token, intent.buy_token);
        async move {
            let mode = self.mode(intent)?;
            let relay = match self.relay_params(request, mode) {
                Some(params) => Some(self.relay.estimate(&params).await?),
                None => None,
            };
            let reward_spend = relay.as_ref().map(|r| (r.gas_token, r.spend_limit_decimal()));

            let (sell_decimals, buy_decimals) = self.token_decimals(intent).await;
            let main_amount =
                split_main_amount(intent, reward_spend.as_ref(), sell_decimals, buy_decimals)?;

            let (quote, limit) = match mode {
                SwapMode::DepositOnly => (None, None),
                SwapMode::Swap => {
                    let quote_request =
                        main_quote_request(intent, main_amount, sell_decimals, buy_decimals);
                    let quote = self
                        .provider
                        .get_price(intent.chain_id, &quote_request)
                        .await
                        .map_err(|e| unroutable(intent, e))?;
                    let limit = self.provider.calculate_estimation_limit(
                        &quote,
                        main_amount.side(),
                        intent.slippage,
                    );
                    (Some(quote), Some(limit))
                }
            };

            info!(
                ?mode,
                main_amount = %main_amount.value(),
                limit = ?limit.map(|l| l.amount),
                "Estimated swap"
            );
            Ok(SwapEstimate {
                mode,
                relay,
                main_amount,
                quote,
                limit,
            })
        }
        .instrument(span)
        .await
    }

    /// Build the ordered instruction list for `request`
    ///
    /// Fresh quotes and allowances are fetched; nothing from a previous
    /// [`estimate`](Self::estimate) is reused.
    pub async fn build(&self, request: &SwapRequest) -> Result<SwapPlan, SwapError> {
        let intent = &request.intent;
        let span = spans::build_swap_plan(intent.chain_id, intent.sell_token, intent.buy_token);
        async move {
            let chain = self.config.chain(intent.chain_id)?;
            let mode = self.mode(intent)?;
            if mode == SwapMode::DepositOnly && intent.deposit_destination.is_none() {
                return Err(SwapError::MissingDepositDestination);
            }

            let reward = match self.relay_params(request, mode) {
                Some(params) => Some((
                    params.gas_token,
                    params.gas_token_decimals,
                    self.relay.build_reward_instructions(&params).await?,
                )),
                None => None,
            };
            let reward_spend = reward.as_ref().map(|(token, decimals, plan)| {
                (*token, minimal_units_to_decimal(plan.spend_limit, *decimals))
            });

            let (sell_decimals, buy_decimals) = self.token_decimals(intent).await;
            let main_amount =
                split_main_amount(intent, reward_spend.as_ref(), sell_decimals, buy_decimals)?;

            let mut builder = InstructionListBuilder::new();
            let reward = reward.map(|(_, _, plan)| plan);
            if let Some(plan) = &reward {
                builder
                    .push_opt(InstructionStage::RewardApproval, plan.approval.clone())
                    .push(InstructionStage::Reward, plan.payment.clone());
            }

            let limit = match mode {
                SwapMode::DepositOnly => {
                    self.push_deposit(&mut builder, intent, chain, main_amount.value())
                        .await?;
                    None
                }
                SwapMode::Swap => {
                    let queued = reward.as_ref().and_then(|plan| plan.approval.as_ref());
                    let limit = self
                        .push_swap(
                            &mut builder,
                            intent,
                            main_amount,
                            (sell_decimals, buy_decimals),
                            queued,
                        )
                        .await?;
                    Some(limit)
                }
            };

            let stages = builder.stages();
            let instructions = builder.build();
            info!(
                ?mode,
                instructions = instructions.len(),
                main_amount = %main_amount.value(),
                "Built swap plan"
            );
            Ok(SwapPlan {
                mode,
                instructions,
                stages,
                reward,
                main_amount,
                limit,
            })
        }
        .instrument(span)
        .await
    }

    fn mode(&self, intent: &SwapIntent) -> Result<SwapMode, SwapError> {
        Ok(if self.is_deposit_only(intent)? {
            SwapMode::DepositOnly
        } else {
            SwapMode::Swap
        })
    }

    /// Relay inputs for this request, with complexity zeroed for deposits
    fn relay_params(&self, request: &SwapRequest, mode: SwapMode) -> Option<RelayRewardParams> {
        let mut params = request.relay.clone()?;
        if mode == SwapMode::DepositOnly {
            params.complexity = 0;
        }
        Some(params)
    }

    async fn token_decimals(&self, intent: &SwapIntent) -> (TokenDecimals, TokenDecimals) {
        let sell = self.decimals.get(intent.chain_id, intent.sell_token).await;
        let buy = self.decimals.get(intent.chain_id, intent.buy_token).await;
        (sell, buy)
    }

    async fn push_deposit(
        &self,
        builder: &mut InstructionListBuilder,
        intent: &SwapIntent,
        chain: &ChainConfig,
        amount: U256,
    ) -> Result<(), SwapError> {
        let destination = intent
            .deposit_destination
            .as_ref()
            .ok_or(SwapError::MissingDepositDestination)?;
        let bridge = chain.bridge_contract;

        if is_native(intent.sell_token) {
            builder.push(
                InstructionStage::Main,
                vec![calls::hub_deposit_native(bridge, destination, amount)],
            );
        } else {
            let approval = self
                .approvals
                .approval_for(intent.chain_id, intent.sell_token, intent.taker, bridge, amount)
                .await?;
            builder
                .push_opt(InstructionStage::MainApproval, approval)
                .push(
                    InstructionStage::Main,
                    vec![calls::hub_deposit_token(
                        bridge,
                        intent.sell_token,
                        destination,
                        amount,
                    )],
                );
        }
        debug!(?bridge, %amount, "Planned hub deposit");
        Ok(())
    }

    async fn push_swap(
        &self,
        builder: &mut InstructionListBuilder,
        intent: &SwapIntent,
        main_amount: SwapAmount,
        (sell_decimals, buy_decimals): (TokenDecimals, TokenDecimals),
        queued_approval: Option<&Instruction>,
    ) -> Result<EstimationLimit, SwapError> {
        let request = main_quote_request(intent, main_amount, sell_decimals, buy_decimals);
        let built = self
            .provider
            .build_swap_instruction(intent.chain_id, &request)
            .await
            .map_err(|e| unroutable(intent, e))?;
        let limit = self.provider.calculate_estimation_limit(
            &built.quote,
            main_amount.side(),
            intent.slippage,
        );

        // Exact output spends at most the limit; exact input spends the amount
        let max_spend = match main_amount {
            SwapAmount::Sell(amount) => amount,
            SwapAmount::Buy(_) => limit.amount,
        };
        let spender = built.quote.allowance_target;
        let approval = match queued_approval {
            Some(queued) if grants_unlimited(queued, intent.sell_token, spender) => {
                debug!(?spender, "Reward approval already unlimited for the main swap");
                None
            }
            _ => {
                self.approvals
                    .approval_for(
                        intent.chain_id,
                        intent.sell_token,
                        intent.taker,
                        spender,
                        max_spend,
                    )
                    .await?
            }
        };

        builder
            .push_opt(InstructionStage::MainApproval, approval)
            .push(InstructionStage::Main, vec![built.instruction]);

        if let Some(receiver) = intent.receiver {
            if !self.provider.supports_receiver() {
                // Exact output delivers the quoted amount; exact input at least the limit
                let amount = match main_amount {
                    SwapAmount::Sell(_) => limit.amount,
                    SwapAmount::Buy(_) => built.quote.buy_amount,
                };
                builder.push(
                    InstructionStage::Forward,
                    vec![calls::forward(intent.buy_token, receiver, amount)],
                );
            }
        }

        Ok(limit)
    }
}

/// Fixed side of the main operation in minimal units
///
/// Subtracts the reward reservation when it is paid from the sell token of
/// an exact-input intent.
fn split_main_amount(
    intent: &SwapIntent,
    reward_spend: Option<&(Address, BigDecimal)>,
    sell_decimals: TokenDecimals,
    buy_decimals: TokenDecimals,
) -> Result<SwapAmount, SwapError> {
    match &intent.amount {
        IntentAmount::Buy(amount) => Ok(SwapAmount::Buy(decimal_to_minimal_units(
            amount,
            buy_decimals,
        )?)),
        IntentAmount::Sell(declared) => {
            let available = match reward_spend {
                Some((gas_token, spend))
                    if normalize_native(*gas_token) == normalize_native(intent.sell_token) =>
                {
                    let remaining = declared - spend;
                    if remaining <= BigDecimal::from(0) {
                        return Err(SwapError::InsufficientFundsForReward {
                            required: spend.clone(),
                            available: declared.clone(),
                        });
                    }
                    remaining
                }
                _ => declared.clone(),
            };
            Ok(SwapAmount::Sell(decimal_to_minimal_units(
                &available,
                sell_decimals,
            )?))
        }
    }
}

/// A provider that does not serve the chain leaves the pair unroutable
fn unroutable(intent: &SwapIntent, error: QuoteError) -> SwapError {
    match error {
        QuoteError::UnsupportedChain { .. } => {
            SwapError::unsupported_pair(intent.chain_id, intent.sell_token, intent.buy_token)
        }
        other => other.into(),
    }
}

fn main_quote_request(
    intent: &SwapIntent,
    amount: SwapAmount,
    sell_decimals: TokenDecimals,
    buy_decimals: TokenDecimals,
) -> QuoteRequest {
    QuoteRequest {
        sell_token: intent.sell_token,
        sell_decimals,
        buy_token: intent.buy_token,
        buy_decimals,
        amount,
        slippage: intent.slippage,
        taker: intent.taker,
        receiver: intent.receiver,
    }
}

impl std::fmt::Debug for SwapOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SwapOrchestrator")
            .field("provider", &self.provider.name())
            .field("relay", &self.relay)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::tokens::NATIVE_COIN_ADDRESS;
    use std::str::FromStr;

    fn intent(amount: IntentAmount) -> SwapIntent {
        SwapIntent::new(
            56,
            Address::repeat_byte(0x11),
            Address::repeat_byte(0x22),
            amount,
            Address::repeat_byte(0x33),
        )
    }

    fn spend(token: Address, amount: &str) -> (Address, BigDecimal) {
        (token, BigDecimal::from_str(amount).unwrap())
    }

    #[test]
    fn test_reward_subtracted_from_same_token() {
        let intent = intent(IntentAmount::sell("100").unwrap());
        let reward = spend(intent.sell_token, "0.5");
        let amount = split_main_amount(
            &intent,
            Some(&reward),
            TokenDecimals::STANDARD,
            TokenDecimals::STANDARD,
        )
        .unwrap();
        assert_eq!(
            amount,
            SwapAmount::Sell(U256::from(99_500_000_000_000_000_000u128))
        );
    }

    #[test]
    fn test_reward_from_other_token_not_subtracted() {
        let intent = intent(IntentAmount::sell("100").unwrap());
        let reward = spend(NATIVE_COIN_ADDRESS, "0.5");
        let amount = split_main_amount(
            &intent,
            Some(&reward),
            TokenDecimals::USDC,
            TokenDecimals::STANDARD,
        )
        .unwrap();
        assert_eq!(amount, SwapAmount::Sell(U256::from(100_000_000u64)));
    }

    #[test]
    fn test_reward_exceeding_amount_fails() {
        let intent = intent(IntentAmount::sell("0.5").unwrap());
        let reward = spend(intent.sell_token, "0.5");
        let result = split_main_amount(
            &intent,
            Some(&reward),
            TokenDecimals::STANDARD,
            TokenDecimals::STANDARD,
        );
        assert!(matches!(
            result,
            Err(SwapError::InsufficientFundsForReward { .. })
        ));
    }

    #[test]
    fn test_exact_output_uses_buy_decimals() {
        let intent = intent(IntentAmount::buy("2").unwrap());
        let reward = spend(intent.sell_token, "5");
        let amount = split_main_amount(
            &intent,
            Some(&reward),
            TokenDecimals::STANDARD,
            TokenDecimals::USDC,
        )
        .unwrap();
        assert_eq!(amount, SwapAmount::Buy(U256::from(2_000_000u64)));
    }
}
