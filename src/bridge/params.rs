// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0
use alloy_chains::NamedChain;
use alloy_primitives::{Address, U256};
use bon::Builder;

use crate::protocol::ProtocolGeneration;

/// USDC fixed decimal precision. Amounts are never rescaled.
pub const USDC_DECIMALS: u32 = 6;

/// A request to move USDC from one chain to another
///
/// # Example
///
/// ```rust
/// use alloy_chains::NamedChain;
/// use alloy_primitives::{Address, U256};
/// use cctp_transfer::{ProtocolGeneration, TransferRequest};
///
/// let request = TransferRequest::builder()
///     .source_chain(NamedChain::Mainnet)
///     .destination_chain(NamedChain::Base)
///     .amount(U256::from(5_000_000u64)) // 5 USDC
///     .generation(ProtocolGeneration::Standard)
///     .sender(Address::ZERO)
///     .recipient(Address::ZERO)
///     .build();
///
/// assert_eq!(request.fee(), U256::ZERO);
/// ```
#[derive(Builder, Debug, Clone, PartialEq, Eq)]
pub struct TransferRequest {
    source_chain: NamedChain,
    destination_chain: NamedChain,
    /// Amount in USDC minor units (6 decimals)
    amount: U256,
    generation: ProtocolGeneration,
    sender: Address,
    recipient: Address,
}

impl TransferRequest {
    pub fn source_chain(&self) -> NamedChain {
        self.source_chain
    }

    pub fn destination_chain(&self) -> NamedChain {
        self.destination_chain
    }

    pub fn amount(&self) -> U256 {
        self.amount
    }

    pub fn generation(&self) -> ProtocolGeneration {
        self.generation
    }

    pub fn sender(&self) -> Address {
        self.sender
    }

    pub fn recipient(&self) -> Address {
        self.recipient
    }

    /// Maximum fee for this transfer under its generation's fee rule.
    pub fn fee(&self) -> U256 {
        self.generation.max_fee(self.amount)
    }

    /// Allowance the token messenger needs, `amount + fee`.
    pub fn required_allowance(&self) -> U256 {
        self.generation.required_allowance(self.amount)
    }
}

/// Renders a minor-unit amount as a decimal USDC string, trimming trailing zeros.
pub fn format_usdc(amount: U256) -> String {
    let scale = U256::from(10u64.pow(USDC_DECIMALS));
    let whole = amount / scale;
    let fraction = amount % scale;

    if fraction.is_zero() {
        return whole.to_string();
    }

    let fraction = format!("{:0>width$}", fraction.to_string(), width = USDC_DECIMALS as usize);
    format!("{whole}.{}", fraction.trim_end_matches('0'))
}
