// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0
//! Fakes for driving the orchestrators without a chain, an API or a clock.
//!
//! - [`FakeChainAdapter`]: scripted allowances, write failures and
//!   confirmations, with a log of every call
//! - [`FakeAttestationProvider`]: scripted Iris response sequences per endpoint
//! - [`FakeClock`]: records sleeps and returns immediately
//!
//! All fakes are cheap to clone; clones share state, so a test can keep a
//! handle while the orchestrator owns another.

use alloy_chains::NamedChain;
use alloy_primitives::{Address, Bytes, FixedBytes, TxHash, U256};
use async_trait::async_trait;
use std::collections::{HashSet, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use crate::error::{CctpError, Result};
use crate::protocol::{
    AttestationResponse, AttestationStatus, BurnCall, FastBurnAllowance, FastBurnFees, V1Message,
    V1MessagesResponse, V2AttestationResponse, V2Message,
};
use crate::traits::{AttestationProvider, ChainAdapter, Clock, TransactionOutcome};

/// Hash returned by every [`FakeChainAdapter`] approval
pub const FAKE_APPROVE_TX: TxHash = TxHash::repeat_byte(0xa1);
/// Hash returned by every [`FakeChainAdapter`] burn
pub const FAKE_BURN_TX: TxHash = TxHash::repeat_byte(0xb1);
/// Hash returned by every successful [`FakeChainAdapter`] mint
pub const FAKE_MINT_TX: TxHash = TxHash::repeat_byte(0xc1);

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

// ============================================================================
// Fake Chain Adapter
// ============================================================================

/// Failure injected into a fake adapter write
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FakeFailure {
    /// The node rejected the transaction (revert, gas estimation)
    Execution(String),
    /// Transport or wallet trouble before the node saw the transaction
    Provider(String),
}

impl FakeFailure {
    fn into_error(self) -> CctpError {
        match self {
            Self::Execution(reason) => CctpError::TransactionExecution { reason },
            Self::Provider(reason) => CctpError::Provider(reason),
        }
    }
}

/// A call observed by [`FakeChainAdapter`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdapterCall {
    SwitchChain(NamedChain),
    Allowance {
        token: Address,
        owner: Address,
        spender: Address,
    },
    BalanceOf {
        token: Address,
        owner: Address,
    },
    Approve {
        chain: Option<NamedChain>,
        token: Address,
        from: Address,
        spender: Address,
        amount: U256,
    },
    DepositForBurn {
        chain: Option<NamedChain>,
        token_messenger: Address,
        from: Address,
        call: BurnCall,
    },
    ReceiveMessage {
        chain: Option<NamedChain>,
        message_transmitter: Address,
        from: Address,
    },
    WaitForConfirmation {
        chain: NamedChain,
        tx_hash: TxHash,
    },
}

#[derive(Debug, Default)]
struct AdapterState {
    active: Option<NamedChain>,
    calls: Vec<AdapterCall>,
    allowance: U256,
    balance: U256,
    approve_failure: Option<FakeFailure>,
    burn_failure: Option<FakeFailure>,
    mint_failures: VecDeque<FakeFailure>,
    switch_failures: HashSet<NamedChain>,
    unconfirmed: HashSet<TxHash>,
    reverted: HashSet<TxHash>,
}

/// Scriptable [`ChainAdapter`]
///
/// By default every write succeeds, every transaction confirms at block 1 and
/// the allowance is zero. An approval raises the allowance to the approved
/// amount.
#[derive(Clone, Debug, Default)]
pub struct FakeChainAdapter {
    state: Arc<Mutex<AdapterState>>,
}

impl FakeChainAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, AdapterState> {
        lock(&self.state)
    }

    pub fn set_allowance(&self, allowance: U256) {
        self.state().allowance = allowance;
    }

    pub fn set_balance(&self, balance: U256) {
        self.state().balance = balance;
    }

    pub fn fail_approve(&self, failure: FakeFailure) {
        self.state().approve_failure = Some(failure);
    }

    pub fn fail_burn(&self, failure: FakeFailure) {
        self.state().burn_failure = Some(failure);
    }

    /// Queues failures for the next mint attempts, one per attempt.
    /// Attempts after the queue drains succeed.
    pub fn push_mint_failures(&self, failures: impl IntoIterator<Item = FakeFailure>) {
        self.state().mint_failures.extend(failures);
    }

    pub fn fail_switch(&self, chain: NamedChain) {
        self.state().switch_failures.insert(chain);
    }

    /// Confirmation of `tx_hash` never arrives.
    pub fn never_confirm(&self, tx_hash: TxHash) {
        self.state().unconfirmed.insert(tx_hash);
    }

    /// `tx_hash` confirms with a reverted receipt.
    pub fn revert(&self, tx_hash: TxHash) {
        self.state().reverted.insert(tx_hash);
    }

    pub fn calls(&self) -> Vec<AdapterCall> {
        self.state().calls.clone()
    }

    pub fn switches(&self) -> Vec<NamedChain> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                AdapterCall::SwitchChain(chain) => Some(chain),
                _ => None,
            })
            .collect()
    }

    pub fn burns(&self) -> Vec<BurnCall> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                AdapterCall::DepositForBurn { call, .. } => Some(call),
                _ => None,
            })
            .collect()
    }

    pub fn approvals(&self) -> Vec<U256> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                AdapterCall::Approve { amount, .. } => Some(amount),
                _ => None,
            })
            .collect()
    }

    /// `(chain, sender)` of every `receiveMessage` attempt.
    pub fn mint_attempts(&self) -> Vec<(Option<NamedChain>, Address)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                AdapterCall::ReceiveMessage { chain, from, .. } => Some((chain, from)),
                _ => None,
            })
            .collect()
    }
}

#[async_trait]
impl ChainAdapter for FakeChainAdapter {
    async fn switch_chain(&self, chain: NamedChain) -> Result<()> {
        let mut state = self.state();
        state.calls.push(AdapterCall::SwitchChain(chain));
        if state.switch_failures.contains(&chain) {
            return Err(CctpError::Provider(format!("wallet refused to switch to {chain}")));
        }
        state.active = Some(chain);
        Ok(())
    }

    fn active_chain(&self) -> Option<NamedChain> {
        self.state().active
    }

    async fn allowance(&self, token: Address, owner: Address, spender: Address) -> Result<U256> {
        let mut state = self.state();
        state.calls.push(AdapterCall::Allowance {
            token,
            owner,
            spender,
        });
        Ok(state.allowance)
    }

    async fn balance_of(&self, token: Address, owner: Address) -> Result<U256> {
        let mut state = self.state();
        state.calls.push(AdapterCall::BalanceOf { token, owner });
        Ok(state.balance)
    }

    async fn approve(
        &self,
        token: Address,
        from: Address,
        spender: Address,
        amount: U256,
    ) -> Result<TxHash> {
        let mut state = self.state();
        let chain = state.active;
        state.calls.push(AdapterCall::Approve {
            chain,
            token,
            from,
            spender,
            amount,
        });
        if let Some(failure) = state.approve_failure.clone() {
            return Err(failure.into_error());
        }
        state.allowance = amount;
        Ok(FAKE_APPROVE_TX)
    }

    async fn deposit_for_burn(
        &self,
        token_messenger: Address,
        from: Address,
        call: &BurnCall,
    ) -> Result<TxHash> {
        let mut state = self.state();
        let chain = state.active;
        state.calls.push(AdapterCall::DepositForBurn {
            chain,
            token_messenger,
            from,
            call: call.clone(),
        });
        match state.burn_failure.clone() {
            Some(failure) => Err(failure.into_error()),
            None => Ok(FAKE_BURN_TX),
        }
    }

    async fn receive_message(
        &self,
        message_transmitter: Address,
        from: Address,
        _message: Bytes,
        _attestation: Bytes,
    ) -> Result<TxHash> {
        let mut state = self.state();
        let chain = state.active;
        state.calls.push(AdapterCall::ReceiveMessage {
            chain,
            message_transmitter,
            from,
        });
        match state.mint_failures.pop_front() {
            Some(failure) => Err(failure.into_error()),
            None => Ok(FAKE_MINT_TX),
        }
    }

    async fn wait_for_confirmation(
        &self,
        chain: NamedChain,
        tx_hash: TxHash,
    ) -> Result<TransactionOutcome> {
        let (hangs, success) = {
            let mut state = self.state();
            state
                .calls
                .push(AdapterCall::WaitForConfirmation { chain, tx_hash });
            (
                state.unconfirmed.contains(&tx_hash),
                !state.reverted.contains(&tx_hash),
            )
        };

        if hangs {
            std::future::pending::<()>().await;
        }

        Ok(TransactionOutcome {
            tx_hash,
            success,
            block_number: Some(1),
        })
    }
}

// ============================================================================
// Fake Attestation Provider
// ============================================================================

/// One scripted response of a [`FakeAttestationProvider`] endpoint
#[derive(Debug, Clone)]
pub enum Scripted<T> {
    Respond(T),
    /// HTTP 404
    NotFound,
    /// HTTP 429
    RateLimited,
    /// Any other failure, surfaced as a provider error
    Fail(String),
}

#[derive(Debug)]
struct Script<T> {
    entries: Vec<Scripted<T>>,
    calls: usize,
}

impl<T> Default for Script<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            calls: 0,
        }
    }
}

impl<T: Clone> Script<T> {
    /// Next entry; the last one repeats forever. Unscripted endpoints 404.
    fn next(&mut self) -> Result<T> {
        let index = self.calls.min(self.entries.len().saturating_sub(1));
        self.calls += 1;
        match self.entries.get(index).cloned() {
            Some(Scripted::Respond(value)) => Ok(value),
            Some(Scripted::RateLimited) => Err(CctpError::RateLimitExceeded {
                retry_after_seconds: 60,
            }),
            Some(Scripted::Fail(reason)) => Err(CctpError::Provider(reason)),
            Some(Scripted::NotFound) | None => Err(CctpError::AttestationNotFound),
        }
    }
}

#[derive(Debug, Default)]
struct ProviderState {
    v2_messages: Script<V2AttestationResponse>,
    v1_messages: Script<V1MessagesResponse>,
    attestations: Script<AttestationResponse>,
    fast_burn_allowance: Script<FastBurnAllowance>,
    fast_burn_fees: Script<FastBurnFees>,
    requested_message_hashes: Vec<FixedBytes<32>>,
}

/// Scriptable [`AttestationProvider`]
///
/// Each endpoint plays back its own sequence, repeating the last entry once
/// the sequence is exhausted.
#[derive(Clone, Debug, Default)]
pub struct FakeAttestationProvider {
    state: Arc<Mutex<ProviderState>>,
}

impl FakeAttestationProvider {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, ProviderState> {
        lock(&self.state)
    }

    pub fn set_v2_messages(&self, entries: Vec<Scripted<V2AttestationResponse>>) {
        self.state().v2_messages = Script {
            entries,
            calls: 0,
        };
    }

    pub fn set_v1_messages(&self, entries: Vec<Scripted<V1MessagesResponse>>) {
        self.state().v1_messages = Script {
            entries,
            calls: 0,
        };
    }

    pub fn set_attestations(&self, entries: Vec<Scripted<AttestationResponse>>) {
        self.state().attestations = Script {
            entries,
            calls: 0,
        };
    }

    pub fn set_fast_burn_allowance(&self, entries: Vec<Scripted<FastBurnAllowance>>) {
        self.state().fast_burn_allowance = Script {
            entries,
            calls: 0,
        };
    }

    pub fn set_fast_burn_fees(&self, entries: Vec<Scripted<FastBurnFees>>) {
        self.state().fast_burn_fees = Script {
            entries,
            calls: 0,
        };
    }

    pub fn v2_calls(&self) -> usize {
        self.state().v2_messages.calls
    }

    pub fn v1_calls(&self) -> usize {
        self.state().v1_messages.calls
    }

    pub fn attestation_calls(&self) -> usize {
        self.state().attestations.calls
    }

    /// Message hashes passed to `get_attestation`, in call order.
    pub fn requested_message_hashes(&self) -> Vec<FixedBytes<32>> {
        self.state().requested_message_hashes.clone()
    }
}

#[async_trait]
impl AttestationProvider for FakeAttestationProvider {
    async fn get_v2_messages(
        &self,
        _source_domain: u32,
        _tx_hash: TxHash,
    ) -> Result<V2AttestationResponse> {
        self.state().v2_messages.next()
    }

    async fn get_v1_messages(
        &self,
        _source_domain: u32,
        _tx_hash: TxHash,
    ) -> Result<V1MessagesResponse> {
        self.state().v1_messages.next()
    }

    async fn get_attestation(&self, message_hash: FixedBytes<32>) -> Result<AttestationResponse> {
        let mut state = self.state();
        state.requested_message_hashes.push(message_hash);
        state.attestations.next()
    }

    async fn get_fast_burn_allowance(&self) -> Result<FastBurnAllowance> {
        self.state().fast_burn_allowance.next()
    }

    async fn get_fast_burn_fees(
        &self,
        _source_domain: u32,
        _destination_domain: u32,
    ) -> Result<FastBurnFees> {
        self.state().fast_burn_fees.next()
    }
}

/// A fast messages response holding one message.
pub fn v2_response(
    status: AttestationStatus,
    message: Option<Bytes>,
    attestation: Option<Bytes>,
) -> V2AttestationResponse {
    V2AttestationResponse {
        messages: vec![V2Message {
            status,
            message,
            attestation,
        }],
    }
}

/// A standard messages response holding one message.
pub fn v1_response(message: Option<Bytes>, attestation: Option<Bytes>) -> V1MessagesResponse {
    V1MessagesResponse {
        messages: vec![V1Message {
            message,
            attestation,
        }],
    }
}

pub fn attestation_response(
    status: AttestationStatus,
    attestation: Option<Bytes>,
) -> AttestationResponse {
    AttestationResponse {
        status,
        attestation,
    }
}

// ============================================================================
// Fake Clock
// ============================================================================

/// A clock whose sleeps only advance a virtual time and yield to the runtime
#[derive(Clone, Debug)]
pub struct FakeClock {
    current_time: Arc<Mutex<Instant>>,
    sleep_log: Arc<Mutex<Vec<Duration>>>,
}

impl Default for FakeClock {
    fn default() -> Self {
        Self {
            current_time: Arc::new(Mutex::new(Instant::now())),
            sleep_log: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl FakeClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, duration: Duration) {
        *lock(&self.current_time) += duration;
    }

    /// Every requested sleep, in order.
    pub fn sleeps(&self) -> Vec<Duration> {
        lock(&self.sleep_log).clone()
    }

    pub fn total_sleep_time(&self) -> Duration {
        lock(&self.sleep_log).iter().sum()
    }

    pub fn sleep_count(&self) -> usize {
        lock(&self.sleep_log).len()
    }
}

#[async_trait]
impl Clock for FakeClock {
    async fn sleep(&self, duration: Duration) {
        lock(&self.sleep_log).push(duration);
        self.advance(duration);
        tokio::task::yield_now().await;
    }

    fn now(&self) -> Instant {
        *lock(&self.current_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fake_clock_tracks_sleep_calls() {
        let clock = FakeClock::new();
        let start = clock.now();

        clock.sleep(Duration::from_secs(2)).await;
        clock.sleep(Duration::from_secs(4)).await;

        assert_eq!(clock.sleep_count(), 2);
        assert_eq!(clock.total_sleep_time(), Duration::from_secs(6));
        assert_eq!(clock.now() - start, Duration::from_secs(6));
    }

    #[tokio::test]
    async fn test_script_repeats_last_entry() {
        let provider = FakeAttestationProvider::new();
        provider.set_attestations(vec![
            Scripted::NotFound,
            Scripted::Respond(attestation_response(AttestationStatus::Pending, None)),
        ]);

        let hash = FixedBytes::repeat_byte(1);
        assert!(matches!(
            provider.get_attestation(hash).await,
            Err(CctpError::AttestationNotFound)
        ));
        for _ in 0..3 {
            let response = provider.get_attestation(hash).await.unwrap();
            assert_eq!(response.status, AttestationStatus::Pending);
        }
        assert_eq!(provider.attestation_calls(), 4);
        assert_eq!(provider.requested_message_hashes(), vec![hash; 4]);
    }

    #[tokio::test]
    async fn test_unscripted_endpoint_is_not_found() {
        let provider = FakeAttestationProvider::new();
        let result = provider.get_v2_messages(0, TxHash::ZERO).await;
        assert!(matches!(result, Err(CctpError::AttestationNotFound)));
    }

    #[tokio::test]
    async fn test_fake_adapter_approval_raises_allowance() {
        let adapter = FakeChainAdapter::new();
        adapter.switch_chain(NamedChain::Base).await.unwrap();

        let token = Address::repeat_byte(1);
        let owner = Address::repeat_byte(2);
        let spender = Address::repeat_byte(3);
        assert_eq!(adapter.allowance(token, owner, spender).await.unwrap(), U256::ZERO);

        let tx = adapter
            .approve(token, owner, spender, U256::from(42u64))
            .await
            .unwrap();
        assert_eq!(tx, FAKE_APPROVE_TX);
        assert_eq!(
            adapter.allowance(token, owner, spender).await.unwrap(),
            U256::from(42u64)
        );
        assert_eq!(adapter.active_chain(), Some(NamedChain::Base));
    }

    #[tokio::test]
    async fn test_fake_adapter_mint_failures_drain() {
        let adapter = FakeChainAdapter::new();
        adapter.push_mint_failures([FakeFailure::Execution("nonce already used".into())]);

        let first = adapter
            .receive_message(Address::ZERO, Address::ZERO, Bytes::new(), Bytes::new())
            .await;
        assert!(first.unwrap_err().is_execution_error());

        let second = adapter
            .receive_message(Address::ZERO, Address::ZERO, Bytes::new(), Bytes::new())
            .await;
        assert_eq!(second.unwrap(), FAKE_MINT_TX);
        assert_eq!(adapter.mint_attempts().len(), 2);
    }

    #[tokio::test]
    async fn test_fake_adapter_reverted_receipt() {
        let adapter = FakeChainAdapter::new();
        adapter.revert(FAKE_BURN_TX);

        let outcome = adapter
            .wait_for_confirmation(NamedChain::Mainnet, FAKE_BURN_TX)
            .await
            .unwrap();
        assert!(!outcome.success);
    }
}
