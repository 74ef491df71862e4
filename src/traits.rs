// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0
//! Core trait abstractions for transfer orchestration.
//!
//! The orchestrators never talk to a wallet, an RPC node, the Iris API or the
//! system clock directly. Each of those is injected through one of the traits
//! below, so the state machines can be driven by fakes in tests (see
//! [`crate::testing`]) and by the alloy / reqwest / tokio implementations in
//! [`crate::providers`] in production.

use alloy_chains::NamedChain;
use alloy_primitives::{Address, Bytes, FixedBytes, TxHash, U256};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::error::Result;
use crate::protocol::{
    AttestationResponse, BurnCall, FastBurnAllowance, FastBurnFees, ProtocolGeneration,
    V1MessagesResponse, V2AttestationResponse,
};

/// Result of waiting for a transaction receipt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransactionOutcome {
    pub tx_hash: TxHash,
    /// Receipt status; false means the transaction reverted
    pub success: bool,
    pub block_number: Option<u64>,
}

/// Wallet-backed access to the chains a transfer touches.
///
/// Adapters hold a single active chain at a time. Every contract read and
/// write targets the active chain, so callers must await
/// [`switch_chain`](ChainAdapter::switch_chain) before issuing them.
///
/// Write failures raised while a node executes the transaction must surface
/// as [`CctpError::TransactionExecution`](crate::CctpError::TransactionExecution)
/// (or an RPC error response) so the mint step can tell them apart from
/// transport failures.
///
/// # Test Scenarios
///
/// Implementing this trait with fakes enables testing:
/// - Sufficient and insufficient allowances
/// - Reverted burns and receipts
/// - Confirmations that never arrive
/// - Flaky mint execution
#[async_trait]
pub trait ChainAdapter: Send + Sync {
    /// Makes `chain` the target of subsequent reads and writes.
    async fn switch_chain(&self, chain: NamedChain) -> Result<()>;

    /// Currently active chain, if any.
    fn active_chain(&self) -> Option<NamedChain>;

    /// ERC20 `allowance(owner, spender)` on the active chain.
    async fn allowance(&self, token: Address, owner: Address, spender: Address) -> Result<U256>;

    /// ERC20 `balanceOf(owner)` on the active chain.
    async fn balance_of(&self, token: Address, owner: Address) -> Result<U256>;

    /// Sends ERC20 `approve(spender, amount)` from `from`.
    async fn approve(
        &self,
        token: Address,
        from: Address,
        spender: Address,
        amount: U256,
    ) -> Result<TxHash>;

    /// Sends `depositForBurn` on the token messenger from `from`.
    async fn deposit_for_burn(
        &self,
        token_messenger: Address,
        from: Address,
        call: &BurnCall,
    ) -> Result<TxHash>;

    /// Sends `receiveMessage(message, attestation)` on the message transmitter.
    async fn receive_message(
        &self,
        message_transmitter: Address,
        from: Address,
        message: Bytes,
        attestation: Bytes,
    ) -> Result<TxHash>;

    /// Waits until `tx_hash` is included on `chain` and returns its receipt status.
    ///
    /// This may wait forever; callers bound it with a timeout.
    async fn wait_for_confirmation(
        &self,
        chain: NamedChain,
        tx_hash: TxHash,
    ) -> Result<TransactionOutcome>;
}

/// Access to Circle's Iris attestation API.
///
/// A `404 Not Found` must be reported as
/// [`CctpError::AttestationNotFound`](crate::CctpError::AttestationNotFound);
/// the poller treats it as "not yet available".
///
/// # Test Scenarios
///
/// Implementing this trait with fakes enables testing:
/// - Messages that are not indexed yet (404)
/// - State transitions (Pending → PendingConfirmations → Complete)
/// - Server errors and rate limiting
#[async_trait]
pub trait AttestationProvider: Send + Sync {
    /// `GET /v2/messages/{source_domain}?transactionHash={tx_hash}`
    async fn get_v2_messages(
        &self,
        source_domain: u32,
        tx_hash: TxHash,
    ) -> Result<V2AttestationResponse>;

    /// `GET /v1/messages/{source_domain}/{tx_hash}`
    async fn get_v1_messages(&self, source_domain: u32, tx_hash: TxHash)
        -> Result<V1MessagesResponse>;

    /// `GET /v1/attestations/{message_hash}`
    async fn get_attestation(&self, message_hash: FixedBytes<32>) -> Result<AttestationResponse>;

    /// `GET /v2/fastBurn/USDC/allowance`
    async fn get_fast_burn_allowance(&self) -> Result<FastBurnAllowance>;

    /// `GET /v2/fastBurn/USDC/fees/{source_domain}/{destination_domain}`
    async fn get_fast_burn_fees(
        &self,
        source_domain: u32,
        destination_domain: u32,
    ) -> Result<FastBurnFees>;

    /// Where the messages of a burn are fetched from, for progress logs.
    ///
    /// Defaults to the path relative to the API root.
    fn messages_endpoint(
        &self,
        generation: ProtocolGeneration,
        source_domain: u32,
        tx_hash: TxHash,
    ) -> String {
        generation.messages_path(source_domain, tx_hash)
    }
}

/// Trait for time-based operations.
///
/// This trait abstracts sleep and time queries, enabling fast-forward testing
/// where tests can instantly advance through polling loops and retry backoff
/// without actually waiting.
#[async_trait]
pub trait Clock: Send + Sync {
    /// Asynchronously sleeps for the given duration.
    async fn sleep(&self, duration: Duration);

    /// Returns the current instant in time.
    fn now(&self) -> Instant;
}

#[async_trait]
impl<T: ChainAdapter + ?Sized> ChainAdapter for Arc<T> {
    async fn switch_chain(&self, chain: NamedChain) -> Result<()> {
        (**self).switch_chain(chain).await
    }

    fn active_chain(&self) -> Option<NamedChain> {
        (**self).active_chain()
    }

    async fn allowance(&self, token: Address, owner: Address, spender: Address) -> Result<U256> {
        (**self).allowance(token, owner, spender).await
    }

    async fn balance_of(&self, token: Address, owner: Address) -> Result<U256> {
        (**self).balance_of(token, owner).await
    }

    async fn approve(
        &self,
        token: Address,
        from: Address,
        spender: Address,
        amount: U256,
    ) -> Result<TxHash> {
        (**self).approve(token, from, spender, amount).await
    }

    async fn deposit_for_burn(
        &self,
        token_messenger: Address,
        from: Address,
        call: &BurnCall,
    ) -> Result<TxHash> {
        (**self).deposit_for_burn(token_messenger, from, call).await
    }

    async fn receive_message(
        &self,
        message_transmitter: Address,
        from: Address,
        message: Bytes,
        attestation: Bytes,
    ) -> Result<TxHash> {
        (**self)
            .receive_message(message_transmitter, from, message, attestation)
            .await
    }

    async fn wait_for_confirmation(
        &self,
        chain: NamedChain,
        tx_hash: TxHash,
    ) -> Result<TransactionOutcome> {
        (**self).wait_for_confirmation(chain, tx_hash).await
    }
}
