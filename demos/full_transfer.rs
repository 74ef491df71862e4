// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0
//! Full USDC transfer: approve, burn, attestation and mint
//!
//! Environment variables (a `.env` file works too):
//! - PRIVATE_KEY: sender key, also used as the recipient (must start with 0x)
//! - SOURCE_CHAIN / DESTINATION_CHAIN: chain names, default `arbitrum` → `base`
//! - AMOUNT: USDC base units, default 1000000 (1 USDC)
//! - GENERATION: `fast` or `standard`, default `fast`
//! - *_RPC / IRIS_API_URL: optional endpoint overrides, see `BridgeConfig`
//!
//! Run with: `cargo run --example full_transfer`

use alloy_chains::NamedChain;
use alloy_network::EthereumWallet;
use alloy_primitives::U256;
use alloy_signer_local::PrivateKeySigner;
use cctp_transfer::providers::{AlloyChainAdapter, IrisAttestationProvider, TokioClock};
use cctp_transfer::{
    format_usdc, AttestationPoller, BridgeConfig, CctpError, ChainRegistry, ProtocolGeneration,
    TransferOrchestrator, TransferRequest,
};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

fn env_or(key: &str, default: &str) -> String {
    dotenvy::var(key).unwrap_or_else(|_| default.to_string())
}

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
    let me = signer.address();

    let source_chain: NamedChain = env_or("SOURCE_CHAIN", "arbitrum")
        .parse()
        .expect("Unknown SOURCE_CHAIN");
    let destination_chain: NamedChain = env_or("DESTINATION_CHAIN", "base")
        .parse()
        .expect("Unknown DESTINATION_CHAIN");
    let amount: U256 = env_or("AMOUNT", "1000000").parse().expect("Invalid AMOUNT");
    let generation: ProtocolGeneration = env_or("GENERATION", "fast").parse()?;

    println!("CCTP transfer: {source_chain} → {destination_chain}");
    println!("   Wallet: {me}");
    println!("   Amount: {} USDC ({generation})\n", format_usdc(amount));

    let config = BridgeConfig::from_env()?;
    let adapter = Arc::new(AlloyChainAdapter::from_config(
        &config,
        EthereumWallet::from(signer),
    ));
    let poller = AttestationPoller::new(IrisAttestationProvider::from_config(&config), TokioClock::new())
        .with_config(config.polling());

    let mut orchestrator = TransferOrchestrator::builder()
        .adapter(Arc::clone(&adapter))
        .poller(poller)
        .registry(Arc::new(ChainRegistry::mainnet()))
        .mint_retry(config.mint_retry())
        .confirmation_timeout(config.confirmation_timeout())
        .build();

    let before = orchestrator.balance(destination_chain, me).await?;

    let request = TransferRequest::builder()
        .source_chain(source_chain)
        .destination_chain(destination_chain)
        .amount(amount)
        .generation(generation)
        .sender(me)
        .recipient(me)
        .build();

    let session = orchestrator.run_full_transfer(&request).await;
    for line in session.logs() {
        println!("{line}");
    }

    if let Some(err) = session.error() {
        println!("\nTransfer stopped in state {}: {err}", session.state());
        if let Some(burn_tx) = session.burn_tx_hash() {
            println!("   Burn already sent; finish it with the resume_transfer example:");
            println!("   BURN_TX={burn_tx} SOURCE_CHAIN={source_chain} GENERATION={generation}");
        }
        return Ok(());
    }

    let after = orchestrator.balance(destination_chain, me).await?;
    println!(
        "\nDestination balance: {} → {} USDC",
        format_usdc(before),
        format_usdc(after)
    );

    Ok(())
}
