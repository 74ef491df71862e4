// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0
//! Transfer orchestration
//!
//! Two state machines share the attestation poller and the mint step:
//!
//! - [`TransferOrchestrator`] runs a new transfer from approval to mint
//! - [`ResumeOrchestrator`] finishes a transfer from its burn transaction

mod config;
mod mint;
mod params;
mod poller;
mod resume;
mod session;
mod transfer;

pub use config::{
    MintRetryPolicy, PollingConfig, ATTESTATION_PATH_V1, BURN_CONFIRMATION_TIMEOUT,
    FAST_BURN_ALLOWANCE_PATH, FAST_BURN_FEES_PATH, IRIS_API,
};
pub use params::{format_usdc, TransferRequest, USDC_DECIMALS};
pub use poller::AttestationPoller;
pub use resume::ResumeOrchestrator;
pub use session::{
    LogEntry, ResumeSession, ResumeStep, Session, SessionStep, TransferSession, TransferStep,
};
pub use transfer::TransferOrchestrator;
