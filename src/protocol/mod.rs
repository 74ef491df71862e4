// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0
//! CCTP protocol types and definitions
//!
//! Domain identifiers, finality thresholds, the per-generation strategy,
//! Iris response types and the message decoder.

mod attestation;
mod domain_id;
mod finality;
mod generation;
mod message;

pub use attestation::{
    Attestation, AttestationResponse, AttestationStatus, FastBurnAllowance, FastBurnFees,
    V1Message, V1MessagesResponse, V2AttestationResponse, V2Message,
};
pub use domain_id::DomainId;
pub use finality::FinalityThreshold;
pub use generation::{BurnCall, FastBurnParams, ProtocolGeneration};
pub use message::CrossChainMessage;
