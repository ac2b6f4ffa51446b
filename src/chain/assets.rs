//! Canonical asset resolution
//!
//! A chain's native coin and its wrapped form are the same asset for routing
//! decisions: selling one for the other is a deposit, not a swap, and a gas
//! token in either form pays the relay without an aggregator.

use alloy_primitives::Address;

use crate::types::tokens::{normalize_native, NATIVE_COIN_ADDRESS};

/// How a token relates to the chain's native coin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    /// The native coin itself
    Native,
    /// The canonical wrapped form of the native coin
    WrappedNative,
    /// Any other token
    Token,
}

impl AssetKind {
    /// Native or wrapped native
    pub fn is_native_like(&self) -> bool {
        matches!(self, AssetKind::Native | AssetKind::WrappedNative)
    }
}

/// Classify `token` against the chain's wrapped native address
pub fn asset_kind(token: Address, wrapped_native: Address) -> AssetKind {
    let token = normalize_native(token);
    if token == NATIVE_COIN_ADDRESS {
        AssetKind::Native
    } else if token == wrapped_native {
        AssetKind::WrappedNative
    } else {
        AssetKind::Token
    }
}

/// Collapse native spellings and the wrapped form into [`NATIVE_COIN_ADDRESS`]
pub fn canonical_asset(token: Address, wrapped_native: Address) -> Address {
    if asset_kind(token, wrapped_native).is_native_like() {
        NATIVE_COIN_ADDRESS
    } else {
        token
    }
}

/// Whether two tokens resolve to the same canonical asset
pub fn same_canonical_asset(a: Address, b: Address, wrapped_native: Address) -> bool {
    canonical_asset(a, wrapped_native) == canonical_asset(b, wrapped_native)
}
