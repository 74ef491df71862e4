// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0
//! Mainnet contract addresses for USDC and the CCTP contracts
//!
//! Standard (v1) transfers use per-chain TokenMessenger and MessageTransmitter
//! deployments; fast (v2) transfers use one address for each across chains.

use alloy_primitives::{address, Address};

// USDC Addresses

/// <https://etherscan.io/address/0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48>
pub const ETHEREUM_USDC: Address = address!("A0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48");

/// <https://snowtrace.io/address/0xB97EF9Ef8734C71904D8002F8b6Bc66Dd9c48a6E>
pub const AVALANCHE_USDC: Address = address!("B97EF9Ef8734C71904D8002F8b6Bc66Dd9c48a6E");

/// <https://arbiscan.io/address/0xaf88d065e77c8cC2239327C5EDb3A432268e5831>
pub const ARBITRUM_USDC: Address = address!("af88d065e77c8cC2239327C5EDb3A432268e5831");

/// <https://basescan.org/address/0x833589fCD6eDb6E08f4c7C32D4f71b54bdA02913>
pub const BASE_USDC: Address = address!("833589fCD6eDb6E08f4c7C32D4f71b54bdA02913");

/// <https://lineascan.build/address/0x176211869cA2b568f2A7D4EE941E073a821EE1ff>
pub const LINEA_USDC: Address = address!("176211869cA2b568f2A7D4EE941E073a821EE1ff");

/// <https://optimistic.etherscan.io/address/0x0b2C639c533813f4Aa9D7837CAf62653d097Ff85>
pub const OPTIMISM_USDC: Address = address!("0b2C639c533813f4Aa9D7837CAf62653d097Ff85");

/// <https://polygonscan.com/address/0x3c499c542cEF5E3811e1192ce70d8cC03d5c3359>
pub const POLYGON_USDC: Address = address!("3c499c542cEF5E3811e1192ce70d8cC03d5c3359");

/// <https://uniscan.xyz/address/0x078D782b760474a361dDA0AF3839290b0EF57AD6>
pub const UNICHAIN_USDC: Address = address!("078D782b760474a361dDA0AF3839290b0EF57AD6");

// MessageTransmitter Addresses (v1)

/// <https://etherscan.io/address/0x0a992d191DEeC32aFe36203Ad87D7d289a738F81>
pub const ETHEREUM_MESSAGE_TRANSMITTER_ADDRESS: Address =
    address!("0a992d191DEeC32aFe36203Ad87D7d289a738F81");

/// <https://snowtrace.io/address/0x8186359af5f57fbb40c6b14a588d2a59c0c29880>
pub const AVALANCHE_MESSAGE_TRANSMITTER_ADDRESS: Address =
    address!("8186359af5f57fbb40c6b14a588d2a59c0c29880");

/// <https://arbiscan.io/address/0xC30362313FBBA5cf9163F0bb16a0e01f01a896ca>
pub const ARBITRUM_MESSAGE_TRANSMITTER_ADDRESS: Address =
    address!("c30362313fbba5cf9163f0bb16a0e01f01a896ca");

/// <https://basescan.org/address/0xAD09780d193884d503182aD4588450C416D6F9D4>
pub const BASE_MESSAGE_TRANSMITTER_ADDRESS: Address =
    address!("ad09780d193884d503182ad4588450c416d6f9d4");

/// <https://optimistic.etherscan.io/address/0x4D41f22c5a0e5c74090899E5a8Fb597a8842b3e8>
pub const OPTIMISM_MESSAGE_TRANSMITTER_ADDRESS: Address =
    address!("4D41f22c5a0e5c74090899E5a8Fb597a8842b3e8");

/// <https://polygonscan.com/address/0xF3be9355363857F3e001be68856A2f96b4C39Ba9>
pub const POLYGON_MESSAGE_TRANSMITTER_ADDRESS: Address =
    address!("F3be9355363857F3e001be68856A2f96b4C39Ba9");

/// <https://uniscan.xyz/address/0x353bE9E2E38AB1D19104534e4edC21c643Df86f4>
pub const UNICHAIN_MESSAGE_TRANSMITTER_ADDRESS: Address =
    address!("353bE9E2E38AB1D19104534e4edC21c643Df86f4");

// TokenMessenger Addresses (v1)

/// <https://developers.circle.com/stablecoins/evm-smart-contracts>
pub const ETHEREUM_TOKEN_MESSENGER_ADDRESS: Address =
    address!("bd3fa81b58ba92a82136038b25adec7066af3155");

/// <https://developers.circle.com/stablecoins/evm-smart-contracts>
pub const AVALANCHE_TOKEN_MESSENGER_ADDRESS: Address =
    address!("6b25532e1060ce10cc3b0a99e5683b91bfde6982");

/// <https://developers.circle.com/stablecoins/evm-smart-contracts>
pub const ARBITRUM_TOKEN_MESSENGER_ADDRESS: Address =
    address!("19330d10D9Cc8751218eaf51E8885D058642E08A");

/// <https://developers.circle.com/stablecoins/evm-smart-contracts>
pub const BASE_TOKEN_MESSENGER_ADDRESS: Address =
    address!("1682ae6375c4e4a97e4b583bc394c861a46d8962");

/// <https://developers.circle.com/stablecoins/evm-smart-contracts>
pub const OPTIMISM_TOKEN_MESSENGER_ADDRESS: Address =
    address!("2B4069517957735bE00ceE0fadAE88a26365528f");

/// <https://developers.circle.com/stablecoins/evm-smart-contracts>
pub const POLYGON_TOKEN_MESSENGER_ADDRESS: Address =
    address!("9daF8c91AEFAE50b9c0E69629D3F6Ca40cA3B3FE");

/// <https://uniscan.xyz/address/0x4e744b28E787c3aD0e810eD65A24461D4ac5a762>
pub const UNICHAIN_TOKEN_MESSENGER_ADDRESS: Address =
    address!("4e744b28E787c3aD0e810eD65A24461D4ac5a762");

// =============================================================================
// CCTP V2 Contract Addresses
// =============================================================================
//
// V2 uses unified contract addresses across all mainnet chains.
//
// Reference: <https://developers.circle.com/cctp/evm-smart-contracts>

/// CCTP V2 MessageTransmitter address (Mainnet)
///
/// <https://developers.circle.com/cctp/evm-smart-contracts>
pub const CCTP_V2_MESSAGE_TRANSMITTER_MAINNET: Address =
    address!("81D40F21F12A8F0E3252Bccb954D722d4c464B64");

/// CCTP V2 TokenMessenger address (Mainnet)
///
/// <https://developers.circle.com/cctp/evm-smart-contracts>
pub const CCTP_V2_TOKEN_MESSENGER_MAINNET: Address =
    address!("28b5a0e9C621a5BadaA536219b3a228C8168cf5d");
