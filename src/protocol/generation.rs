// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0
//! Protocol generation strategy
//!
//! Every rule that differs between the two CCTP contract sets lives here:
//! the fee cap, the finality threshold, the shape of the Iris messages
//! endpoint and the `depositForBurn` call shape. Orchestration code asks the
//! generation instead of branching on it.

use alloy_primitives::{Address, FixedBytes, TxHash, U256};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

use super::FinalityThreshold;
use crate::error::CctpError;

/// Fee granularity for fast transfers: one basis point of the amount, rounded up.
const FAST_FEE_DIVISOR: u64 = 10_000;

/// CCTP protocol generation used for a transfer
///
/// # Example
///
/// ```rust
/// use alloy_primitives::U256;
/// use cctp_transfer::ProtocolGeneration;
///
/// let fee = ProtocolGeneration::Fast.max_fee(U256::from(10_000_000u64));
/// assert_eq!(fee, U256::from(1_000u64));
/// assert_eq!(ProtocolGeneration::Standard.max_fee(U256::from(10_000_000u64)), U256::ZERO);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProtocolGeneration {
    /// CCTP v2 contracts with a fee-capped, low finality burn
    Fast,
    /// CCTP v1 contracts, zero fee, finalized burn
    Standard,
}

impl ProtocolGeneration {
    pub const ALL: [Self; 2] = [Self::Fast, Self::Standard];

    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Fast => "fast",
            Self::Standard => "standard",
        }
    }

    #[inline]
    pub const fn is_fast(self) -> bool {
        matches!(self, Self::Fast)
    }

    /// Finality threshold the burn is attested at.
    ///
    /// Standard burns never pass this on-chain; it is reported for telemetry only.
    #[inline]
    pub const fn finality_threshold(self) -> FinalityThreshold {
        match self {
            Self::Fast => FinalityThreshold::Fast,
            Self::Standard => FinalityThreshold::Standard,
        }
    }

    /// Maximum fee the burn may pay, in stablecoin minor units.
    ///
    /// Fast transfers cap the fee at `ceil(amount / 10000)`; standard
    /// transfers are free. Approval and burn both read this value.
    pub fn max_fee(self, amount: U256) -> U256 {
        match self {
            Self::Fast => {
                amount.saturating_add(U256::from(FAST_FEE_DIVISOR - 1))
                    / U256::from(FAST_FEE_DIVISOR)
            }
            Self::Standard => U256::ZERO,
        }
    }

    /// Allowance the token messenger needs to burn `amount` including fees.
    pub fn required_allowance(self, amount: U256) -> U256 {
        amount.saturating_add(self.max_fee(amount))
    }

    /// Path (and query) of the Iris endpoint that returns burn messages.
    ///
    /// - fast: `/v2/messages/{domain}?transactionHash={tx}`
    /// - standard: `/v1/messages/{domain}/{tx}`
    pub fn messages_path(self, source_domain: u32, tx_hash: TxHash) -> String {
        match self {
            Self::Fast => format!("/v2/messages/{source_domain}?transactionHash={tx_hash}"),
            Self::Standard => format!("/v1/messages/{source_domain}/{tx_hash}"),
        }
    }

    /// Builds the `depositForBurn` arguments for this generation.
    ///
    /// The recipient is left-padded to 32 bytes. Fast burns also restrict the
    /// destination caller to the recipient and carry the fee cap and finality.
    pub fn burn_call(
        self,
        amount: U256,
        destination_domain: u32,
        recipient: Address,
        burn_token: Address,
    ) -> BurnCall {
        let mint_recipient = recipient.into_word();
        let fast = match self {
            Self::Fast => Some(FastBurnParams {
                destination_caller: mint_recipient,
                max_fee: self.max_fee(amount),
                min_finality_threshold: self.finality_threshold().as_u32(),
            }),
            Self::Standard => None,
        };

        BurnCall {
            amount,
            destination_domain,
            mint_recipient,
            burn_token,
            fast,
        }
    }
}

impl fmt::Display for ProtocolGeneration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ProtocolGeneration {
    type Err = CctpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fast" | "v2" => Ok(Self::Fast),
            "standard" | "v1" => Ok(Self::Standard),
            other => Err(CctpError::InvalidConfig(format!(
                "unknown protocol generation: {other}"
            ))),
        }
    }
}

/// Arguments of a `depositForBurn` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BurnCall {
    pub amount: U256,
    pub destination_domain: u32,
    /// Recipient address left-zero-padded to bytes32
    pub mint_recipient: FixedBytes<32>,
    pub burn_token: Address,
    /// Present only for fast burns (V2 `depositForBurn` overload)
    pub fast: Option<FastBurnParams>,
}

/// Extra V2 `depositForBurn` arguments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FastBurnParams {
    pub destination_caller: FixedBytes<32>,
    pub max_fee: U256,
    pub min_finality_threshold: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;
    use rstest::rstest;

    #[rstest]
    #[case(0, 0)]
    #[case(1, 1)]
    #[case(9_999, 1)]
    #[case(10_000, 1)]
    #[case(10_001, 2)]
    #[case(1_000_000, 100)]
    #[case(5_000_000, 500)]
    #[case(10_000_000, 1_000)]
    fn test_fast_fee_rounds_up(#[case] amount: u64, #[case] expected: u64) {
        assert_eq!(
            ProtocolGeneration::Fast.max_fee(U256::from(amount)),
            U256::from(expected)
        );
    }

    #[test]
    fn test_standard_transfers_are_free() {
        let amount = U256::from(5_000_000u64);
        assert_eq!(ProtocolGeneration::Standard.max_fee(amount), U256::ZERO);
        assert_eq!(ProtocolGeneration::Standard.required_allowance(amount), amount);
    }

    #[test]
    fn test_required_allowance_includes_fee() {
        assert_eq!(
            ProtocolGeneration::Fast.required_allowance(U256::from(10_000_000u64)),
            U256::from(10_001_000u64)
        );
    }

    #[test]
    fn test_finality_thresholds() {
        assert_eq!(ProtocolGeneration::Fast.finality_threshold().as_u32(), 1000);
        assert_eq!(
            ProtocolGeneration::Standard.finality_threshold().as_u32(),
            2000
        );
    }

    #[test]
    fn test_messages_path() {
        let tx = TxHash::from([0x12; 32]);
        insta::assert_snapshot!(
            ProtocolGeneration::Fast.messages_path(3, tx),
            @"/v2/messages/3?transactionHash=0x1212121212121212121212121212121212121212121212121212121212121212"
        );
        insta::assert_snapshot!(
            ProtocolGeneration::Standard.messages_path(0, tx),
            @"/v1/messages/0/0x1212121212121212121212121212121212121212121212121212121212121212"
        );
    }

    #[test]
    fn test_fast_burn_call_carries_fee_and_caller() {
        let recipient = address!("742d35Cc6634C0532925a3b844Bc9e7595f8fA0d");
        let usdc = address!("A0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48");

        let call = ProtocolGeneration::Fast.burn_call(U256::from(1_000_000u64), 6, recipient, usdc);

        assert_eq!(&call.mint_recipient[..12], &[0u8; 12]);
        assert_eq!(&call.mint_recipient[12..], recipient.as_slice());
        let fast = call.fast.expect("fast params");
        assert_eq!(fast.max_fee, U256::from(100u64));
        assert_eq!(fast.min_finality_threshold, 1000);
        assert_eq!(fast.destination_caller, call.mint_recipient);
    }

    #[test]
    fn test_standard_burn_call_omits_fast_params() {
        let call = ProtocolGeneration::Standard.burn_call(
            U256::from(1_000_000u64),
            3,
            Address::repeat_byte(0x11),
            Address::repeat_byte(0x22),
        );
        assert!(call.fast.is_none());
        assert_eq!(call.destination_domain, 3);
    }

    #[test]
    fn test_parse_generation() {
        assert_eq!(
            "fast".parse::<ProtocolGeneration>().unwrap(),
            ProtocolGeneration::Fast
        );
        assert_eq!(
            "Standard".parse::<ProtocolGeneration>().unwrap(),
            ProtocolGeneration::Standard
        );
        assert!("turbo".parse::<ProtocolGeneration>().is_err());
    }
}
