// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0
//! Contract bindings
//!
//! Thin wrappers over `sol!` generated instances. Reads are called directly;
//! writes are returned as [`TransactionRequest`](alloy_rpc_types::TransactionRequest)s
//! for the chain adapter to send through its wallet-backed provider.

pub mod erc20;
pub mod message_transmitter;
pub mod token_messenger;

pub use erc20::Erc20Contract;
pub use message_transmitter::MessageTransmitterContract;
pub use token_messenger::TokenMessengerContract;
