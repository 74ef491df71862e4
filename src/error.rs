// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0
use alloy_chains::NamedChain;
use thiserror::Error;

use crate::protocol::ProtocolGeneration;

#[derive(Error, Debug)]
pub enum CctpError {
    #[error("Approval failed: {reason}")]
    ApprovalFailed { reason: String },

    #[error("Burn failed: {reason}")]
    BurnFailed { reason: String },

    #[error("Burn transaction not confirmed: {reason}")]
    BurnNotConfirmed { reason: String },

    #[error("Attestation retrieval failed: {reason}")]
    AttestationRetrievalFailed { reason: String },

    #[error("No configured chain for destination domain {domain}")]
    UnknownDestinationDomain { domain: u32 },

    #[error("Mint failed after {attempts} attempt(s): {reason}")]
    MintFailed { attempts: u32, reason: String },

    #[error("Chain {chain} is not configured for {generation} transfers")]
    ChainNotConfigured {
        chain: NamedChain,
        generation: ProtocolGeneration,
    },

    #[error("Attestation not found (will retry)")]
    AttestationNotFound,

    #[error("Rate limit exceeded, retry after {retry_after_seconds} seconds")]
    RateLimitExceeded { retry_after_seconds: u64 },

    #[error("Timeout waiting for attestation")]
    AttestationTimeout,

    #[error("Transaction execution failed: {reason}")]
    TransactionExecution { reason: String },

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Contract call failed: {0}")]
    ContractCall(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid session transition from {from} to {to}")]
    InvalidTransition { from: String, to: String },

    #[error("Message too short: expected at least {expected} bytes, got {actual}")]
    MessageTooShort { expected: usize, actual: usize },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("RPC error: {0}")]
    Rpc(#[from] alloy_json_rpc::RpcError<alloy_transport::TransportErrorKind>),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Hex conversion error: {0}")]
    Hex(#[from] alloy_primitives::hex::FromHexError),
}

impl CctpError {
    /// Returns true for failures raised while a node executed (or simulated)
    /// a transaction. Mint retries only this class.
    pub fn is_execution_error(&self) -> bool {
        matches!(
            self,
            Self::TransactionExecution { .. }
                | Self::Rpc(alloy_json_rpc::RpcError::ErrorResp(_))
        )
    }

    /// Static name of the variant, used for span error attributes.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ApprovalFailed { .. } => "ApprovalFailed",
            Self::BurnFailed { .. } => "BurnFailed",
            Self::BurnNotConfirmed { .. } => "BurnNotConfirmed",
            Self::AttestationRetrievalFailed { .. } => "AttestationRetrievalFailed",
            Self::UnknownDestinationDomain { .. } => "UnknownDestinationDomain",
            Self::MintFailed { .. } => "MintFailed",
            Self::ChainNotConfigured { .. } => "ChainNotConfigured",
            Self::AttestationNotFound => "AttestationNotFound",
            Self::RateLimitExceeded { .. } => "RateLimitExceeded",
            Self::AttestationTimeout => "AttestationTimeout",
            Self::TransactionExecution { .. } => "TransactionExecution",
            Self::Provider(_) => "Provider",
            Self::ContractCall(_) => "ContractCall",
            Self::InvalidConfig(_) => "InvalidConfig",
            Self::InvalidTransition { .. } => "InvalidTransition",
            Self::MessageTooShort { .. } => "MessageTooShort",
            Self::Network(_) => "Network",
            Self::Rpc(_) => "Rpc",
            Self::Json(_) => "Json",
            Self::Hex(_) => "Hex",
        }
    }
}

pub type Result<T> = std::result::Result<T, CctpError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_execution_errors_are_classified() {
        let revert = CctpError::TransactionExecution {
            reason: "execution reverted: Nonce already used".to_string(),
        };
        assert!(revert.is_execution_error());

        assert!(!CctpError::Provider("connection reset".to_string()).is_execution_error());
        assert!(!CctpError::AttestationNotFound.is_execution_error());
    }

    #[test]
    fn test_burn_failed_carries_cause() {
        let err = CctpError::BurnFailed {
            reason: "insufficient funds for gas".to_string(),
        };
        assert_eq!(err.to_string(), "Burn failed: insufficient funds for gas");
        assert_eq!(err.kind(), "BurnFailed");
    }

    #[test]
    fn test_chain_not_configured_display() {
        let err = CctpError::ChainNotConfigured {
            chain: NamedChain::Linea,
            generation: ProtocolGeneration::Standard,
        };
        assert_eq!(
            err.to_string(),
            "Chain linea is not configured for standard transfers"
        );
    }
}
