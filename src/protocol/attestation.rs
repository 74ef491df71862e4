// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0
use alloy_primitives::{hex::FromHex, Bytes};
use serde::{Deserialize, Deserializer};

// ============================================================================
// Attested message handed to the mint step
// ============================================================================

/// A burn message together with Circle's signature over it.
///
/// Produced by the attestation poller once Iris reports `complete`, consumed
/// by `receiveMessage` on the destination chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attestation {
    /// Raw message bytes emitted by the source-chain `MessageSent` event
    pub message: Bytes,
    /// Attestation signature bytes
    pub attestation: Bytes,
    pub status: AttestationStatus,
}

// ============================================================================
// Fast (v2) Response Types
// ============================================================================

/// Response of `/v2/messages/{sourceDomain}?transactionHash={tx}`
///
/// A single transaction can emit multiple `MessageSent` events, so the
/// messages come back as an array.
///
/// # Example Response
///
/// ```json
/// {
///   "messages": [
///     {
///       "status": "complete",
///       "message": "0x...",
///       "attestation": "0x..."
///     }
///   ]
/// }
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct V2AttestationResponse {
    #[serde(default)]
    pub messages: Vec<V2Message>,
}

/// A single message in the v2 messages response
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct V2Message {
    pub status: AttestationStatus,

    /// The original message bytes from the MessageSent event
    #[serde(default, deserialize_with = "deserialize_optional_bytes_or_pending")]
    pub message: Option<Bytes>,

    /// The signed attestation bytes (null/PENDING until complete)
    #[serde(default, deserialize_with = "deserialize_optional_bytes_or_pending")]
    pub attestation: Option<Bytes>,
}

// ============================================================================
// Standard (v1) Response Types
// ============================================================================

/// Response of `/v1/messages/{sourceDomain}/{txHash}`
#[derive(Debug, Clone, Deserialize)]
pub struct V1MessagesResponse {
    #[serde(default)]
    pub messages: Vec<V1Message>,
}

/// A single message in the v1 messages response
///
/// The v1 endpoint carries no status; the message is `null` until the burn
/// is indexed and the attestation stays `PENDING` until signed.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct V1Message {
    #[serde(default, deserialize_with = "deserialize_optional_bytes_or_pending")]
    pub message: Option<Bytes>,

    #[serde(default, deserialize_with = "deserialize_optional_bytes_or_pending")]
    pub attestation: Option<Bytes>,
}

/// Response of `/v1/attestations/{messageHash}`
///
/// **API Quirk**: Circle's Iris API sometimes returns the string `"PENDING"` for the
/// attestation field instead of `null` when the attestation is not yet ready. This
/// deserializer handles that case gracefully by treating "PENDING" as `None`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttestationResponse {
    pub status: AttestationStatus,
    #[serde(default, deserialize_with = "deserialize_optional_bytes_or_pending")]
    pub attestation: Option<Bytes>,
}

// ============================================================================
// Fast transfer discovery
// ============================================================================

/// Response of `/v2/fastBurn/USDC/allowance`
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FastBurnAllowance {
    /// Remaining fast transfer allowance in USDC
    pub allowance: f64,
}

/// Response of `/v2/fastBurn/USDC/fees/{sourceDomain}/{destinationDomain}`
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FastBurnFees {
    /// Minimum fee in basis points
    pub minimum_fee: f64,
}

/// Custom deserializer that handles Circle API quirk where attestation field
/// may be the string "PENDING" instead of null
///
/// Handles the following cases:
/// - Valid hex string (with or without "0x") → deserializes to `Some(Bytes)`
/// - "PENDING" or "pending" → returns `None`
/// - null or missing field → returns `None`
/// - Empty string → returns `None`
/// - Invalid hex → returns error
fn deserialize_optional_bytes_or_pending<'de, D>(deserializer: D) -> Result<Option<Bytes>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;

    match opt {
        None => Ok(None),
        Some(s) if s.is_empty() => Ok(None),
        Some(s) if s.eq_ignore_ascii_case("pending") => Ok(None),
        Some(s) => {
            let bytes = Bytes::from_hex(s).map_err(serde::de::Error::custom)?;
            Ok(Some(bytes))
        }
    }
}

/// Represents the status of the attestation.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AttestationStatus {
    Complete,
    Pending,
    PendingConfirmations,
    Failed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_attestation_with_valid_hex() {
        let json = r#"{"status":"complete","attestation":"0x1234abcd"}"#;
        let response: AttestationResponse = serde_json::from_str(json).unwrap();

        assert_eq!(response.status, AttestationStatus::Complete);
        assert_eq!(
            response.attestation.unwrap().to_vec(),
            vec![0x12, 0x34, 0xab, 0xcd]
        );
    }

    #[test]
    fn test_deserialize_attestation_with_pending_string() {
        let json = r#"{"status":"pending","attestation":"PENDING"}"#;
        let response: AttestationResponse = serde_json::from_str(json).unwrap();

        assert_eq!(response.status, AttestationStatus::Pending);
        assert!(response.attestation.is_none());
    }

    #[test]
    fn test_deserialize_attestation_missing_or_empty() {
        for json in [
            r#"{"status":"pending"}"#,
            r#"{"status":"pending","attestation":null}"#,
            r#"{"status":"pending","attestation":""}"#,
        ] {
            let response: AttestationResponse = serde_json::from_str(json).unwrap();
            assert!(response.attestation.is_none(), "{json}");
        }
    }

    #[test]
    fn test_deserialize_attestation_with_invalid_hex_fails() {
        let json = r#"{"status":"complete","attestation":"not_valid_hex"}"#;
        assert!(serde_json::from_str::<AttestationResponse>(json).is_err());
    }

    #[test]
    fn test_deserialize_all_status_variants() {
        for (raw, expected) in [
            ("complete", AttestationStatus::Complete),
            ("pending", AttestationStatus::Pending),
            ("pending_confirmations", AttestationStatus::PendingConfirmations),
            ("failed", AttestationStatus::Failed),
        ] {
            let json = format!(r#"{{"status":"{raw}"}}"#);
            let response: AttestationResponse = serde_json::from_str(&json).unwrap();
            assert_eq!(response.status, expected);
        }
    }

    #[test]
    fn test_v2_deserialize_complete_response() {
        let json = r#"{
            "messages": [
                {
                    "status": "complete",
                    "message": "0xdeadbeef",
                    "attestation": "0x1234abcd"
                }
            ]
        }"#;
        let response: V2AttestationResponse = serde_json::from_str(json).unwrap();

        assert_eq!(response.messages.len(), 1);
        assert_eq!(response.messages[0].status, AttestationStatus::Complete);
        assert_eq!(
            response.messages[0].message.as_ref().unwrap().to_vec(),
            vec![0xde, 0xad, 0xbe, 0xef]
        );
        assert_eq!(
            response.messages[0].attestation.as_ref().unwrap().to_vec(),
            vec![0x12, 0x34, 0xab, 0xcd]
        );
    }

    #[test]
    fn test_v2_deserialize_pending_with_string() {
        let json = r#"{
            "messages": [
                {
                    "status": "pending_confirmations",
                    "message": "PENDING",
                    "attestation": "PENDING"
                }
            ]
        }"#;
        let response: V2AttestationResponse = serde_json::from_str(json).unwrap();

        assert_eq!(
            response.messages[0].status,
            AttestationStatus::PendingConfirmations
        );
        assert!(response.messages[0].message.is_none());
        assert!(response.messages[0].attestation.is_none());
    }

    #[test]
    fn test_v2_deserialize_missing_messages() {
        let response: V2AttestationResponse = serde_json::from_str("{}").unwrap();
        assert!(response.messages.is_empty());
    }

    #[test]
    fn test_v1_deserialize_messages_response() {
        let json = r#"{
            "messages": [
                {
                    "attestation": "PENDING",
                    "message": "0x00000000",
                    "eventNonce": "9682"
                }
            ]
        }"#;
        let response: V1MessagesResponse = serde_json::from_str(json).unwrap();

        assert_eq!(response.messages.len(), 1);
        assert_eq!(
            response.messages[0].message.as_ref().unwrap().to_vec(),
            vec![0, 0, 0, 0]
        );
        assert!(response.messages[0].attestation.is_none());
    }

    #[test]
    fn test_v1_deserialize_unindexed_message() {
        let json = r#"{"messages":[{"message":null}]}"#;
        let response: V1MessagesResponse = serde_json::from_str(json).unwrap();
        assert!(response.messages[0].message.is_none());
    }

    #[test]
    fn test_deserialize_fast_burn_discovery() {
        let allowance: FastBurnAllowance =
            serde_json::from_str(r#"{"allowance": 4999000.5, "lastUpdated": "2025-01-01"}"#)
                .unwrap();
        assert_eq!(allowance.allowance, 4_999_000.5);

        let fees: FastBurnFees = serde_json::from_str(r#"{"minimumFee": 1}"#).unwrap();
        assert_eq!(fees.minimum_fee, 1.0);
    }
}
