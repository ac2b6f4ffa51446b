// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Cross-chain swap orchestration and relay-fee estimation.
//!
//! relayswap turns a user's swap intent into an ordered list of chain
//! instructions that a relayer broadcasts from a smart wallet. When the
//! relayer is paid in a token other than the native coin, the reward is
//! sourced through a swap aggregator before the main swap runs.
//!
//! # Components
//!
//! - [`units`]: decimal strings to minimal on-chain units and back
//! - [`quote`]: the [`SwapQuoteProvider`](quote::SwapQuoteProvider) seam plus
//!   0x and ParaSwap implementations
//! - [`relay`]: gas-limit accounting and the [`RelayRewardEstimator`]
//! - [`swap`]: the [`SwapOrchestrator`], which combines reward and main swap
//! - [`instructions`]: stage-ordered instruction assembly and approvals
//! - [`estimation`]: debouncing and stale-result suppression for live quotes
//!
//! # Example
//!
//! ```rust,ignore
//! use relayswap::{
//!     AlloyChainClient, IntentAmount, ReqwestNetworkClient, RelaySwapConfig, SwapIntent,
//!     SwapOrchestrator, SwapRequest,
//! };
//! use std::sync::Arc;
//!
//! let config = RelaySwapConfig::default();
//! let network = Arc::new(ReqwestNetworkClient::new(config.http_timeout));
//! let chain = Arc::new(AlloyChainClient::from_config(&config)?);
//! let orchestrator = SwapOrchestrator::from_config(&config, network, chain);
//!
//! let intent = SwapIntent::new(56, usdt, wbnb, IntentAmount::sell("100")?, wallet);
//! let plan = orchestrator.build(&SwapRequest::new(intent).with_relay(params)).await?;
//! for instruction in plan.instructions {
//!     println!("{} value={} data={}", instruction.to, instruction.value, instruction.data);
//! }
//! ```

pub mod cache;
pub mod chain;
pub mod config;
mod contracts;
pub mod errors;
pub mod estimation;
pub mod instructions;
pub mod quote;
pub mod relay;
mod spans;
pub mod swap;
pub mod transport;
pub mod types;
pub mod units;

pub use chain::{AlloyChainClient, ChainClient, TokenDecimalsCache};
pub use config::{ChainConfig, RelayGasLimits, RelaySwapConfig, RelaySwapConfigBuilder};
pub use errors::{
    describe_failure, AmountError, ChainError, QuoteError, RelaySwapError, SwapError,
};
pub use estimation::{Debouncer, EstimationCoordinator, EstimationOutcome, EstimationState};
pub use instructions::{ApprovalMode, InstructionListBuilder, InstructionStage};
pub use quote::{QuoteProviderKind, SwapQuoteProvider};
pub use relay::{RelayEstimate, RelayRewardEstimator, RelayRewardParams};
pub use swap::{SwapEstimate, SwapMode, SwapOrchestrator, SwapPlan, SwapRequest};
pub use transport::{NetworkClient, ReqwestNetworkClient};
pub use types::instruction::Instruction;
pub use types::intent::{DepositDestination, IntentAmount, SwapIntent, SwapSide};
pub use types::slippage::Slippage;
pub use types::tokens::{is_native, normalize_native, TokenDecimals, NATIVE_COIN_ADDRESS};
pub use types::wei::WeiAmount;
pub use units::{from_minimal_units, parse_amount, to_minimal_units};
