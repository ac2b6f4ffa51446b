//! User swap intents
//!
//! A [`SwapIntent`] is created per user action and consumed once by the
//! orchestrator. The amount is either the exact input (sell) or the exact
//! output (buy), never both; the enum makes the other state unrepresentable.

use alloy_primitives::{Address, B256};
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use crate::errors::AmountError;
use crate::types::slippage::Slippage;
use crate::types::tokens::normalize_native;
use crate::units::parse_amount;

/// Which side of the trade is fixed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SwapSide {
    /// Exact input: the sold amount is fixed, the received amount floats
    Sell,
    /// Exact output: the bought amount is fixed, the spent amount floats
    Buy,
}

impl SwapSide {
    /// Upper-case label used by aggregator APIs
    pub fn as_str(&self) -> &'static str {
        match self {
            SwapSide::Sell => "SELL",
            SwapSide::Buy => "BUY",
        }
    }
}

/// Declared amount of a swap intent, in human decimal units
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum IntentAmount {
    /// Amount of the sell token to spend
    Sell(BigDecimal),
    /// Amount of the buy token to receive
    Buy(BigDecimal),
}

impl IntentAmount {
    /// Parse an exact-input amount
    pub fn sell(amount: &str) -> Result<Self, AmountError> {
        parse_amount(amount).map(Self::Sell)
    }

    /// Parse an exact-output amount
    pub fn buy(amount: &str) -> Result<Self, AmountError> {
        parse_amount(amount).map(Self::Buy)
    }

    pub fn side(&self) -> SwapSide {
        match self {
            IntentAmount::Sell(_) => SwapSide::Sell,
            IntentAmount::Buy(_) => SwapSide::Buy,
        }
    }

    pub fn value(&self) -> &BigDecimal {
        match self {
            IntentAmount::Sell(value) | IntentAmount::Buy(value) => value,
        }
    }
}

/// Where a deposit-only operation sends funds through the hub bridge
///
/// Both fields are raw `bytes32` arguments of the bridge contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositDestination {
    /// Destination chain tag, ASCII, right-padded with zeros
    pub destination_chain: B256,
    /// Recipient on the destination chain, left-padded with zeros
    pub recipient: B256,
}

impl DepositDestination {
    /// Destination chain tag used for Minter
    pub const MINTER_CHAIN: &'static str = "minter";

    /// Build a destination from an ASCII chain tag and an EVM-style recipient.
    ///
    /// Returns `None` if the tag is longer than 32 bytes.
    pub fn new(chain_tag: &str, recipient: Address) -> Option<Self> {
        let tag = chain_tag.as_bytes();
        if tag.len() > 32 {
            return None;
        }
        let mut destination_chain = [0u8; 32];
        destination_chain[..tag.len()].copy_from_slice(tag);
        Some(Self {
            destination_chain: B256::from(destination_chain),
            recipient: recipient.into_word(),
        })
    }

    /// Destination on Minter for an `Mx…` address (or its `0x…` equivalent).
    pub fn minter(address: &str) -> Option<Self> {
        let hex = address
            .strip_prefix("Mx")
            .or_else(|| address.strip_prefix("0x"))?;
        let recipient: Address = format!("0x{hex}").parse().ok()?;
        Self::new(Self::MINTER_CHAIN, recipient)
    }
}

/// A user's declared swap
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapIntent {
    pub chain_id: u64,
    pub sell_token: Address,
    pub buy_token: Address,
    pub amount: IntentAmount,
    pub slippage: Slippage,
    /// Smart wallet that holds the funds and executes the instructions
    pub taker: Address,
    /// Optional third party that should end up with the proceeds
    pub receiver: Option<Address>,
    /// Required when sell and buy resolve to the same asset
    pub deposit_destination: Option<DepositDestination>,
}

impl SwapIntent {
    pub fn new(
        chain_id: u64,
        sell_token: Address,
        buy_token: Address,
        amount: IntentAmount,
        taker: Address,
    ) -> Self {
        Self {
            chain_id,
            sell_token,
            buy_token,
            amount,
            slippage: Slippage::from_percent(5),
            taker,
            receiver: None,
            deposit_destination: None,
        }
    }

    pub fn with_slippage(mut self, slippage: Slippage) -> Self {
        self.slippage = slippage;
        self
    }

    pub fn with_receiver(mut self, receiver: Address) -> Self {
        self.receiver = Some(receiver);
        self
    }

    pub fn with_deposit_destination(mut self, destination: DepositDestination) -> Self {
        self.deposit_destination = Some(destination);
        self
    }

    /// Key shared by estimations of the same chain, tokens and amount
    ///
    /// Native spellings are normalized so `0x0` and the sentinel collide.
    pub fn estimation_key(&self) -> String {
        format!(
            "{}:{}:{}:{}:{}",
            self.chain_id,
            normalize_native(self.sell_token),
            normalize_native(self.buy_token),
            self.amount.side().as_str(),
            self.amount.value().normalized()
        )
    }
}
