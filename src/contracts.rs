// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Solidity bindings for the contracts relayswap reads from or calls.
//!
//! The ERC-20 binding carries `#[sol(rpc)]` so the chain client can read
//! allowances and decimals; the others are only used to encode calldata.

use alloy_sol_types::sol;

sol! {
    /// Subset of the ERC-20 interface
    #[sol(rpc)]
    interface IERC20 {
        function decimals() external view returns (uint8);
        function allowance(address owner, address spender) external view returns (uint256);
        function approve(address spender, uint256 value) external returns (bool);
        function transfer(address to, uint256 value) external returns (bool);
    }
}

sol! {
    /// Wrapped native coin (WETH, WBNB)
    interface IWrappedNative {
        function withdraw(uint256 wad) external;
    }
}

sol! {
    /// Hub bridge accepting deposits towards another chain
    interface IHubBridge {
        function transferToChain(
            address token,
            bytes32 destinationChain,
            bytes32 destination,
            uint256 amount,
            uint256 fee
        ) external;

        function transferETHToChain(
            bytes32 destinationChain,
            bytes32 destination,
            uint256 fee
        ) external payable;
    }
}
