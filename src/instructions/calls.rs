//! Calldata encoders for the contracts a plan touches

use alloy_primitives::{Address, U256};
use alloy_sol_types::SolCall;

use crate::contracts::{IHubBridge, IWrappedNative, IERC20};
use crate::types::instruction::Instruction;
use crate::types::intent::DepositDestination;
use crate::types::tokens::is_native;

/// `token.approve(spender, amount)`
pub fn approve(token: Address, spender: Address, amount: U256) -> Instruction {
    let data = IERC20::approveCall {
        spender,
        value: amount,
    }
    .abi_encode();
    Instruction::call(token, data)
}

/// Spender and amount of an `approve` call, if `instruction` is one
pub fn decode_approve(instruction: &Instruction) -> Option<(Address, U256)> {
    let call = IERC20::approveCall::abi_decode(&instruction.data[..]).ok()?;
    Some((call.spender, call.value))
}

/// `token.transfer(to, amount)`
pub fn erc20_transfer(token: Address, to: Address, amount: U256) -> Instruction {
    let data = IERC20::transferCall { to, value: amount }.abi_encode();
    Instruction::call(token, data)
}

/// `wrapped.withdraw(amount)`, turning wrapped native back into the coin
pub fn unwrap_native(wrapped_native: Address, amount: U256) -> Instruction {
    let data = IWrappedNative::withdrawCall { wad: amount }.abi_encode();
    Instruction::call(wrapped_native, data)
}

/// Send `amount` of `token` to `to`, as a value transfer for the native coin
pub fn forward(token: Address, to: Address, amount: U256) -> Instruction {
    if is_native(token) {
        Instruction::native_transfer(to, amount)
    } else {
        erc20_transfer(token, to, amount)
    }
}

/// Hub bridge deposit of an ERC-20 token, zero bridge fee
pub fn hub_deposit_token(
    bridge: Address,
    token: Address,
    destination: &DepositDestination,
    amount: U256,
) -> Instruction {
    let data = IHubBridge::transferToChainCall {
        token,
        destinationChain: destination.destination_chain,
        destination: destination.recipient,
        amount,
        fee: U256::ZERO,
    }
    .abi_encode();
    Instruction::call(bridge, data)
}

/// Hub bridge deposit of the native coin, zero bridge fee
pub fn hub_deposit_native(
    bridge: Address,
    destination: &DepositDestination,
    amount: U256,
) -> Instruction {
    let data = IHubBridge::transferETHToChainCall {
        destinationChain: destination.destination_chain,
        destination: destination.recipient,
        fee: U256::ZERO,
    }
    .abi_encode();
    Instruction::call_with_value(bridge, data, amount)
}
