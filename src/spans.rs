// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0
//! OpenTelemetry span helpers for transfer orchestration
//!
//! Static span names, structured attributes, and no business logic. The
//! orchestrators attach these spans with [`tracing::Instrument`]; they are
//! public for callers that want to wrap their own steps the same way.
//!
//! # Example
//!
//! ```rust,no_run
//! use cctp_transfer::{spans, ProtocolGeneration};
//! use alloy_primitives::TxHash;
//! use tracing::Instrument;
//!
//! # async fn example() {
//! let span = spans::poll_attestation(3, TxHash::ZERO, ProtocolGeneration::Fast, 5);
//! async {
//!     // Your custom attestation logic here
//! }
//! .instrument(span)
//! .await;
//! # }
//! ```

use alloy_chains::NamedChain;
use alloy_primitives::{Address, TxHash, U256};
use tracing::Span;
use url::Url;

use crate::error::CctpError;
use crate::protocol::ProtocolGeneration;

/// Create span for a complete send-side transfer.
///
/// Parent: None (root operation)
/// Children: approve, burn, await_burn_confirmation, poll_attestation, mint
#[inline]
pub fn run_full_transfer(
    source_chain: &NamedChain,
    destination_chain: &NamedChain,
    amount: &U256,
    generation: ProtocolGeneration,
) -> Span {
    tracing::info_span!(
        "cctp_transfer.run_full_transfer",
        source_chain = %source_chain,
        destination_chain = %destination_chain,
        amount = %amount,
        generation = %generation,
        error.type = tracing::field::Empty,
        error.message = tracing::field::Empty,
        error.source = tracing::field::Empty,
        otel.status_code = "OK",
    )
}

/// Create span for resuming a transfer from its burn transaction.
///
/// Parent: None (root operation)
/// Children: poll_attestation, mint
#[inline]
pub fn resume_transfer(
    burn_tx_hash: TxHash,
    source_chain: &NamedChain,
    generation: ProtocolGeneration,
) -> Span {
    tracing::info_span!(
        "cctp_transfer.resume_transfer",
        burn_tx_hash = %burn_tx_hash,
        source_chain = %source_chain,
        generation = %generation,
        destination_chain = tracing::field::Empty,
        error.type = tracing::field::Empty,
        error.message = tracing::field::Empty,
        error.source = tracing::field::Empty,
        otel.status_code = "OK",
    )
}

/// Create span for the allowance check and optional approval.
#[inline]
pub fn approve(chain: &NamedChain, owner: &Address, spender: &Address, required: &U256) -> Span {
    tracing::info_span!(
        "cctp_transfer.approve",
        chain = %chain,
        owner = %owner,
        spender = %spender,
        required_allowance = %required,
        error.type = tracing::field::Empty,
        error.message = tracing::field::Empty,
        error.source = tracing::field::Empty,
        otel.status_code = "OK",
    )
}

/// Create span for USDC deposit and burn.
#[inline]
pub fn burn(
    source_chain: &NamedChain,
    from_address: &Address,
    recipient: &Address,
    destination_domain: u32,
    amount: &U256,
    generation: ProtocolGeneration,
) -> Span {
    tracing::info_span!(
        "cctp_transfer.burn",
        source_chain = %source_chain,
        from_address = %from_address,
        recipient = %recipient,
        destination_domain = destination_domain,
        amount = %amount,
        generation = %generation,
        finality_threshold = generation.finality_threshold().as_u32(),
        error.type = tracing::field::Empty,
        error.message = tracing::field::Empty,
        error.source = tracing::field::Empty,
        otel.status_code = "OK",
    )
}

/// Create span for waiting for transaction confirmation.
#[inline]
pub fn wait_for_confirmation(tx_hash: TxHash, chain: &NamedChain, timeout_secs: u64) -> Span {
    tracing::debug_span!(
        "cctp_transfer.wait_for_confirmation",
        tx_hash = %tx_hash,
        chain = %chain,
        timeout_secs = timeout_secs,
    )
}

/// Create span for polling the attestation API until completion.
///
/// Parent: Top-level transfer or resume span
/// Children: cctp_transfer.poll_attempt (multiple attempts)
#[inline]
pub fn poll_attestation(
    source_domain: u32,
    tx_hash: TxHash,
    generation: ProtocolGeneration,
    poll_interval_secs: u64,
) -> Span {
    tracing::info_span!(
        "cctp_transfer.poll_attestation",
        source_domain = source_domain,
        tx_hash = %tx_hash,
        generation = %generation,
        poll_interval_secs = poll_interval_secs,
        attempts = tracing::field::Empty,
        error.type = tracing::field::Empty,
        error.message = tracing::field::Empty,
        error.source = tracing::field::Empty,
        otel.status_code = "OK",
    )
}

/// Create span for a single attestation poll attempt.
#[inline]
pub fn poll_attempt(attempt: u32) -> Span {
    tracing::debug_span!("cctp_transfer.poll_attempt", attempt = attempt)
}

/// Create span for receiving the message on the destination chain.
///
/// Parent: Top-level transfer or resume span
/// Children: Contract interaction spans, RPC calls
#[inline]
pub fn mint(
    destination_chain: &NamedChain,
    generation: ProtocolGeneration,
    message_length: usize,
    attestation_length: usize,
) -> Span {
    tracing::info_span!(
        "cctp_transfer.mint",
        destination_chain = %destination_chain,
        generation = %generation,
        message_length_bytes = message_length,
        attestation_length_bytes = attestation_length,
        retries = tracing::field::Empty,
        error.type = tracing::field::Empty,
        error.message = tracing::field::Empty,
        error.source = tracing::field::Empty,
        otel.status_code = "OK",
    )
}

/// Create span for HTTP request to Circle API.
///
/// Parent: poll_attempt or other API operation
/// Children: None (HTTP client handles internal spans)
#[inline]
pub fn http_request(method: &str, url: &Url) -> Span {
    tracing::trace_span!(
        "cctp_transfer.http_request",
        http.method = method,
        http.url = %url,
    )
}

/// Create span for a contract write sent through a provider.
#[inline]
pub fn send_transaction(method: &str, chain: &NamedChain, contract: &Address) -> Span {
    tracing::debug_span!(
        "cctp_transfer.send_transaction",
        rpc.method = method,
        rpc.chain = %chain,
        contract = %contract,
    )
}

/// Record error attributes on the current span.
///
/// Follows OpenTelemetry semantic conventions for error tracking:
/// - error.type: The error variant
/// - error.message: Human-readable error message
/// - error.source: The underlying cause, when there is one
pub fn record_error(error: &CctpError) {
    let current_span = tracing::Span::current();
    current_span.record("error.type", error.kind());
    current_span.record("error.message", error.to_string());
    current_span.record("otel.status_code", "ERROR");

    if let Some(source) = std::error::Error::source(error) {
        current_span.record("error.source", source.to_string());
    }
}

/// Record error attributes with custom context on the current span.
pub fn record_error_with_context(
    error_type: &str,
    error_message: &str,
    additional_context: Option<&str>,
) {
    let current_span = tracing::Span::current();
    current_span.record("error.type", error_type);
    current_span.record("error.message", error_message);
    current_span.record("otel.status_code", "ERROR");

    if let Some(context) = additional_context {
        current_span.record("error.source", context);
    }
}
