// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Ordered instruction lists
//!
//! A swap plan is a flat list of [`Instruction`]s executed front to back by
//! the smart wallet. Later steps spend balances produced by earlier ones, so
//! the emitted order is the execution contract. [`InstructionListBuilder`]
//! only concatenates labelled sub-lists in the order they are pushed; it
//! never reorders, deduplicates or merges.
//!
//! The canonical order of a plan is:
//!
//! 1. [`InstructionStage::RewardApproval`]
//! 2. [`InstructionStage::Reward`] (swap or direct transfer to the broadcaster)
//! 3. [`InstructionStage::MainApproval`]
//! 4. [`InstructionStage::Main`] (swap or hub deposit)
//! 5. [`InstructionStage::Forward`] (proceeds to a third-party receiver)
//!
//! # Example
//!
//! ```rust
//! use relayswap::{Instruction, InstructionListBuilder, InstructionStage};
//! use alloy_primitives::{Address, U256};
//!
//! let broadcaster = Address::repeat_byte(0x64);
//! let mut builder = InstructionListBuilder::new();
//! builder.push(
//!     InstructionStage::Reward,
//!     vec![Instruction::native_transfer(broadcaster, U256::from(1_000))],
//! );
//! let instructions = builder.build();
//! assert_eq!(instructions.len(), 1);
//! ```

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::types::instruction::Instruction;

mod approval;
pub mod calls;

pub use approval::{grants_unlimited, ApprovalPlanner};

/// How much to approve when an allowance is short
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ApprovalMode {
    /// Approve `U256::MAX` so later swaps of the same token skip approval
    #[default]
    Unlimited,
    /// Approve exactly the amount about to be spent
    Exact,
}

impl ApprovalMode {
    /// Amount to put in the `approve` call for a `required` spend
    pub fn approval_amount(&self, required: U256) -> U256 {
        match self {
            ApprovalMode::Unlimited => U256::MAX,
            ApprovalMode::Exact => required,
        }
    }
}

/// Role of a sub-list inside a swap plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InstructionStage {
    RewardApproval,
    Reward,
    MainApproval,
    Main,
    Forward,
}

impl std::fmt::Display for InstructionStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            InstructionStage::RewardApproval => "reward-approval",
            InstructionStage::Reward => "reward",
            InstructionStage::MainApproval => "main-approval",
            InstructionStage::Main => "main",
            InstructionStage::Forward => "forward",
        };
        f.write_str(label)
    }
}

/// Concatenates labelled sub-lists in push order
#[derive(Debug, Clone, Default)]
pub struct InstructionListBuilder {
    stages: Vec<(InstructionStage, Vec<Instruction>)>,
}

impl InstructionListBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a sub-list. Empty sub-lists are dropped.
    pub fn push(&mut self, stage: InstructionStage, instructions: Vec<Instruction>) -> &mut Self {
        if !instructions.is_empty() {
            self.stages.push((stage, instructions));
        }
        self
    }

    /// Append a single optional instruction
    pub fn push_opt(
        &mut self,
        stage: InstructionStage,
        instruction: Option<Instruction>,
    ) -> &mut Self {
        self.push(stage, instruction.into_iter().collect())
    }

    /// Stage labels in emission order, one per non-empty sub-list
    pub fn stages(&self) -> Vec<InstructionStage> {
        self.stages.iter().map(|(stage, _)| *stage).collect()
    }

    /// Total number of instructions
    pub fn len(&self) -> usize {
        self.stages.iter().map(|(_, list)| list.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Flatten into the final ordered list
    pub fn build(self) -> Vec<Instruction> {
        debug!(
            stages = ?self.stages(),
            instructions = self.len(),
            "Assembled instruction list"
        );
        self.stages
            .into_iter()
            .flat_map(|(_, instructions)| instructions)
            .collect()
    }
}
