//! Opaque chain calls handed to the signer

use alloy_primitives::{Address, Bytes, U256};
use serde::{Deserialize, Serialize};

/// One chain call: target, calldata and attached native value.
///
/// Instructions are meaningless in isolation; their relative order inside a
/// list is the execution contract (an approval must precede the swap that
/// spends it, an unwrap must precede the transfer of the unwrapped coin).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instruction {
    /// Call target
    pub to: Address,
    /// ABI-encoded calldata, empty for plain value transfers
    pub data: Bytes,
    /// Native value in wei
    pub value: U256,
}

impl Instruction {
    /// A contract call without attached value.
    pub fn call(to: Address, data: impl Into<Bytes>) -> Self {
        Self {
            to,
            data: data.into(),
            value: U256::ZERO,
        }
    }

    /// A contract call with attached native value.
    pub fn call_with_value(to: Address, data: impl Into<Bytes>, value: U256) -> Self {
        Self {
            to,
            data: data.into(),
            value,
        }
    }

    /// A plain native coin transfer.
    pub fn native_transfer(to: Address, value: U256) -> Self {
        Self {
            to,
            data: Bytes::new(),
            value,
        }
    }

    /// Whether this is a plain value transfer with no calldata.
    pub fn is_native_transfer(&self) -> bool {
        self.data.is_empty()
    }
}
