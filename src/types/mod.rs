// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Strong types for type safety across relayswap.
//!
//! This module provides newtype wrappers and value types for:
//! - Token decimals and native-coin addresses
//! - Native wei amounts (the 18-decimal reference unit)
//! - Slippage tolerances
//! - Swap intents and deposit destinations
//! - Chain instructions

pub mod instruction;
pub mod intent;
pub mod slippage;
pub mod tokens;
pub mod wei;

// Note: Public types are re-exported from lib.rs, not here
