// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0
//! Cross-chain message decoding
//!
//! Both message generations share the same leading header layout:
//!
//! - version: uint32, bytes [0, 4)
//! - sourceDomain: uint32, bytes [4, 8)
//! - destinationDomain: uint32, bytes [8, 12)
//! - nonce: bytes [12, 44) (uint64 in v1, bytes32 in v2, padded here)
//! - sender: bytes32, bytes [44, 76)
//! - recipient: bytes32, bytes [76, 108)
//!
//! All integers are big-endian.

use alloy_primitives::{hex, Address};

use crate::error::{CctpError, Result};

/// The routing fields recovered from an attested message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrossChainMessage {
    pub source_domain: u32,
    pub destination_domain: u32,
    /// Low 20 bytes of the 32-byte recipient field
    pub recipient: Address,
}

impl CrossChainMessage {
    /// Shortest message that still contains the recipient field
    pub const MIN_LEN: usize = 108;

    /// Decodes the routing fields from raw message bytes.
    ///
    /// The 12 padding bytes above the recipient are not validated.
    ///
    /// # Errors
    ///
    /// Returns [`CctpError::MessageTooShort`] when fewer than 108 bytes are given.
    ///
    /// # Example
    ///
    /// ```rust
    /// use cctp_transfer::CrossChainMessage;
    ///
    /// assert!(CrossChainMessage::decode(&[0u8; 76]).is_err());
    /// ```
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < Self::MIN_LEN {
            return Err(CctpError::MessageTooShort {
                expected: Self::MIN_LEN,
                actual: bytes.len(),
            });
        }

        let source_domain = u32::from_be_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);
        let destination_domain = u32::from_be_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]);
        let recipient = Address::from_slice(&bytes[88..108]);

        Ok(Self {
            source_domain,
            destination_domain,
            recipient,
        })
    }

    /// Decodes a hex encoded message, with or without the `0x` prefix.
    pub fn decode_hex(message: &str) -> Result<Self> {
        let bytes = hex::decode(message)?;
        Self::decode(&bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    /// A v2 burn message from Arbitrum (3) to Base (6) as returned by Iris
    const API_MESSAGE: &str = "0000000100000003000000062f3cb13cf4a6103f9e3b256495b08c4e05630fcba639565d199ed420a5f2be010000000000000000000000008fe6b999dc680ccfdd5bf7eb0974218be2542daa0000000000000000000000008fe6b999dc680ccfdd5bf7eb0974218be2542daa0000000000000000000000000000000000000000000000000000000000000000000007d0000007d00000000100000000000000000000000075faf114eafb1bdbe2f0316df893fd58ce46aa4d0000000000000000000000007f7d081724f0240c64c9e01cde4626602f9a019200000000000000000000000000000000000000000000000000000000000f42400000000000000000000000007f7d081724f0240c64c9e01cde4626602f9a0192000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000";

    fn message_with(source: u32, destination: u32, recipient: Address) -> Vec<u8> {
        let mut bytes = vec![0u8; 116];
        bytes[0..4].copy_from_slice(&1u32.to_be_bytes());
        bytes[4..8].copy_from_slice(&source.to_be_bytes());
        bytes[8..12].copy_from_slice(&destination.to_be_bytes());
        bytes[76..108].copy_from_slice(recipient.into_word().as_slice());
        bytes
    }

    #[test]
    fn test_decode_real_message() {
        let decoded = CrossChainMessage::decode_hex(API_MESSAGE).unwrap();

        assert_eq!(decoded.source_domain, 3);
        assert_eq!(decoded.destination_domain, 6);
        assert_eq!(
            decoded.recipient,
            address!("8fe6b999dc680ccfdd5bf7eb0974218be2542daa")
        );
    }

    #[test]
    fn test_decode_accepts_prefixed_hex() {
        let prefixed = format!("0x{API_MESSAGE}");
        assert_eq!(
            CrossChainMessage::decode_hex(&prefixed).unwrap(),
            CrossChainMessage::decode_hex(API_MESSAGE).unwrap()
        );
    }

    #[test]
    fn test_decode_reads_documented_offsets() {
        let recipient = address!("742d35Cc6634C0532925a3b844Bc9e7595f8fA0d");
        let bytes = message_with(10, 0x0102_0304, recipient);

        let decoded = CrossChainMessage::decode(&bytes).unwrap();
        assert_eq!(decoded.source_domain, 10);
        assert_eq!(decoded.destination_domain, 0x0102_0304);
        assert_eq!(decoded.recipient, recipient);

        // Deterministic for the same input
        assert_eq!(CrossChainMessage::decode(&bytes).unwrap(), decoded);
    }

    #[test]
    fn test_decode_exactly_min_len() {
        let bytes = message_with(1, 2, Address::repeat_byte(0xab));
        assert!(CrossChainMessage::decode(&bytes[..CrossChainMessage::MIN_LEN]).is_ok());
    }

    #[test]
    fn test_truncated_message_fails() {
        let bytes = message_with(1, 2, Address::repeat_byte(0xab));

        let err = CrossChainMessage::decode(&bytes[..76]).unwrap_err();
        assert!(matches!(
            err,
            CctpError::MessageTooShort {
                expected: 108,
                actual: 76
            }
        ));

        assert!(CrossChainMessage::decode(&bytes[..107]).is_err());
        assert!(CrossChainMessage::decode(&[]).is_err());
    }

    #[test]
    fn test_invalid_hex_fails() {
        assert!(matches!(
            CrossChainMessage::decode_hex("0xzz"),
            Err(CctpError::Hex(_))
        ));
    }
}
