// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Well-known contract addresses and operational constants.

/// Canonical wrapped forms of native coins
pub mod wrapped_native {
    use alloy_primitives::{address, Address};

    /// WETH on Ethereum mainnet
    pub const ETH_WETH: Address = address!("c02aaa39b223fe8d0a0e5c4f27ead9083c756cc2");

    /// WBNB on BNB Smart Chain
    pub const BSC_WBNB: Address = address!("bb4cdb9cbd36b01bd1cbaebf2de08d9173bc095c");
}

/// Hub bridge contracts that accept deposits towards Minter
pub mod hub_bridge {
    use alloy_primitives::{address, Address};

    /// Hub bridge on Ethereum mainnet
    pub const ETH_HUB_BRIDGE: Address = address!("897c27fa372aa730d4c75b1243e7ea38879194e2");

    /// Hub bridge on BNB Smart Chain
    pub const BSC_HUB_BRIDGE: Address = address!("f5b0ed82a0b3e11567081694cc66c3df133f7c8f");
}

/// Relay service parameters
pub mod relay {
    use alloy_primitives::{address, Address};

    /// Account that broadcasts relayed transactions and collects the reward
    pub const BROADCASTER: Address = address!("64e51d5930cdbbf99f3cb27654a03b18f7060c5e");

    /// Worst-case gas for executing any relayed call
    pub const BASE_GAS: u64 = 500_000;

    /// Worst-case gas for deploying the smart wallet on first use
    pub const CREATE_GAS: u64 = 1_000_000;

    /// Worst-case gas for one aggregator swap
    pub const SWAP_GAS: u64 = 500_000;

    /// Fixed gas price on BNB Smart Chain, in gwei
    pub const BSC_GAS_PRICE_GWEI: u64 = 5;

    /// Slippage for the relay reward swap, in percent
    pub const REWARD_SLIPPAGE_PERCENT: u8 = 5;
}

/// Aggregator endpoints
pub mod aggregators {
    /// 0x API on Ethereum mainnet
    pub const ZERO_EX_ETHEREUM_API_URL: &str = "https://api.0x.org/";

    /// 0x API on BNB Smart Chain
    pub const ZERO_EX_BSC_API_URL: &str = "https://bsc.api.0x.org/";

    /// ParaSwap v5 API (one endpoint for all networks)
    pub const PARASWAP_API_URL: &str = "https://apiv5.paraswap.io/";
}
