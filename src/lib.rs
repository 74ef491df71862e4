// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0
//! # cctp-transfer
//!
//! Resumable USDC transfers over Circle's Cross-Chain Transfer Protocol.
//!
//! A transfer approves the token messenger, burns on the source chain, waits
//! for Circle's attestation and mints on the destination chain. Each run is
//! tracked in a session with a forward-only state and a timestamped log
//! trail. A transfer interrupted after its burn can be finished later from
//! the burn transaction alone.
//!
//! Two protocol generations are supported:
//!
//! - [`ProtocolGeneration::Fast`]: CCTP v2 contracts, fee capped at one basis
//!   point of the amount, attested at low finality
//! - [`ProtocolGeneration::Standard`]: CCTP v1 contracts, no fee, attested
//!   after finality
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use alloy_chains::NamedChain;
//! use alloy_network::EthereumWallet;
//! use alloy_primitives::{Address, U256};
//! use cctp_transfer::providers::{AlloyChainAdapter, IrisAttestationProvider, TokioClock};
//! use cctp_transfer::{
//!     AttestationPoller, BridgeConfig, ChainRegistry, ProtocolGeneration, TransferOrchestrator,
//!     TransferRequest,
//! };
//!
//! # async fn example(wallet: EthereumWallet, me: Address) -> Result<(), cctp_transfer::CctpError> {
//! let config = BridgeConfig::from_env()?;
//! let mut orchestrator = TransferOrchestrator::builder()
//!     .adapter(AlloyChainAdapter::from_config(&config, wallet))
//!     .poller(AttestationPoller::new(
//!         IrisAttestationProvider::from_config(&config),
//!         TokioClock::new(),
//!     ))
//!     .registry(Arc::new(ChainRegistry::mainnet()))
//!     .build();
//!
//! let request = TransferRequest::builder()
//!     .source_chain(NamedChain::Arbitrum)
//!     .destination_chain(NamedChain::Base)
//!     .amount(U256::from(10_000_000u64))
//!     .generation(ProtocolGeneration::Fast)
//!     .sender(me)
//!     .recipient(me)
//!     .build();
//!
//! let session = orchestrator.run_full_transfer(&request).await;
//! if let Some(err) = session.error() {
//!     eprintln!("transfer stopped in {}: {err}", session.state());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Resuming
//!
//! [`ResumeOrchestrator::resume`] takes the burn transaction and its source
//! chain, reads the destination and recipient from the attested message and
//! mints there.
//!
//! ## Testing
//!
//! The orchestrators only see the [`ChainAdapter`], [`AttestationProvider`]
//! and [`Clock`] traits. [`testing`] has scriptable fakes for all three.

mod bridge;
pub mod chain;
mod config;
pub mod contracts;
mod error;
mod protocol;
pub mod providers;
pub mod spans;
pub mod testing;
pub mod traits;

pub use bridge::{
    format_usdc, AttestationPoller, LogEntry, MintRetryPolicy, PollingConfig, ResumeOrchestrator,
    ResumeSession, ResumeStep, Session, SessionStep, TransferOrchestrator, TransferRequest,
    TransferSession, TransferStep, BURN_CONFIRMATION_TIMEOUT, IRIS_API, USDC_DECIMALS,
};
pub use chain::{ChainConfig, ChainRegistry};
pub use config::BridgeConfig;
pub use error::{CctpError, Result};
pub use protocol::{
    Attestation, AttestationResponse, AttestationStatus, BurnCall, CrossChainMessage, DomainId,
    FastBurnAllowance, FastBurnFees, FastBurnParams, FinalityThreshold, ProtocolGeneration,
    V1Message, V1MessagesResponse, V2AttestationResponse, V2Message,
};
pub use traits::{AttestationProvider, ChainAdapter, Clock, TransactionOutcome};
