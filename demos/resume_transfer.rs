// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0
//! Resumes an interrupted transfer from its burn transaction
//!
//! The destination chain and recipient are read from the attested message.
//!
//! Environment variables (a `.env` file works too):
//! - PRIVATE_KEY: key of the account that sends `receiveMessage`
//! - BURN_TX: hash of the `depositForBurn` transaction
//! - SOURCE_CHAIN: chain the burn happened on, default `arbitrum`
//! - GENERATION: `fast` or `standard`, default `fast`
//!
//! Run with: `cargo run --example resume_transfer`

use alloy_chains::NamedChain;
use alloy_network::EthereumWallet;
use alloy_primitives::TxHash;
use alloy_signer_local::PrivateKeySigner;
use cctp_transfer::providers::{AlloyChainAdapter, IrisAttestationProvider, TokioClock};
use cctp_transfer::{
    AttestationPoller, BridgeConfig, CctpError, ChainRegistry, ProtocolGeneration,
    ResumeOrchestrator,
};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), CctpError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let signer: PrivateKeySigner = dotenvy::var("PRIVATE_KEY")
        .expect("PRIVATE_KEY must be set")
        .parse()
        .expect("Invalid PRIVATE_KEY format");
    let caller = signer.address();

    let burn_tx: TxHash = dotenvy::var("BURN_TX")
        .expect("BURN_TX must be set")
        .parse()
        .expect("Invalid BURN_TX hash");
    let source_chain: NamedChain = dotenvy::var("SOURCE_CHAIN")
        .unwrap_or_else(|_| "arbitrum".to_string())
        .parse()
        .expect("Unknown SOURCE_CHAIN");
    let generation: ProtocolGeneration = dotenvy::var("GENERATION")
        .unwrap_or_else(|_| "fast".to_string())
        .parse()?;

    println!("Resuming {burn_tx} from {source_chain} ({generation})\n");

    let config = BridgeConfig::from_env()?;
    let adapter = Arc::new(AlloyChainAdapter::from_config(
        &config,
        EthereumWallet::from(signer),
    ));

    let mut orchestrator = ResumeOrchestrator::builder()
        .adapter(adapter)
        .poller(
            AttestationPoller::new(IrisAttestationProvider::from_config(&config), TokioClock::new())
                .with_config(config.polling()),
        )
        .registry(Arc::new(ChainRegistry::mainnet()))
        .mint_retry(config.mint_retry())
        .caller(caller)
        .build();

    let session = orchestrator.resume(burn_tx, source_chain, generation).await;
    for line in session.logs() {
        println!("{line}");
    }

    match session.error() {
        Some(err) => println!("\nResume stopped in state {}: {err}", session.state()),
        None => println!("\nTransfer complete"),
    }

    Ok(())
}
