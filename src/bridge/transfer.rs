// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0
//! Send-side transfer orchestration
//!
//! Drives a brand-new transfer through approve → burn → confirm →
//! attestation → mint, recording progress in a [`TransferSession`].

use alloy_chains::NamedChain;
use alloy_primitives::{Address, TxHash, U256};
use bon::Builder;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn, Instrument};

use super::config::{MintRetryPolicy, BURN_CONFIRMATION_TIMEOUT};
use super::mint::MintContext;
use super::params::{format_usdc, TransferRequest};
use super::poller::AttestationPoller;
use super::session::{TransferSession, TransferStep};
use crate::chain::ChainRegistry;
use crate::error::{CctpError, Result};
use crate::protocol::{Attestation, ProtocolGeneration};
use crate::spans;
use crate::traits::{AttestationProvider, ChainAdapter, Clock, TransactionOutcome};

/// Orchestrates a complete USDC transfer for one session
///
/// # Example
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use alloy_chains::NamedChain;
/// use alloy_primitives::{Address, U256};
/// use cctp_transfer::providers::{IrisAttestationProvider, TokioClock};
/// use cctp_transfer::{
///     AttestationPoller, ChainAdapter, ChainRegistry, ProtocolGeneration, TransferOrchestrator,
///     TransferRequest,
/// };
///
/// # async fn example<A: ChainAdapter>(adapter: A) {
/// let poller = AttestationPoller::new(IrisAttestationProvider::production(), TokioClock::new());
/// let mut orchestrator = TransferOrchestrator::builder()
///     .adapter(adapter)
///     .poller(poller)
///     .registry(Arc::new(ChainRegistry::mainnet()))
///     .build();
///
/// let request = TransferRequest::builder()
///     .source_chain(NamedChain::Mainnet)
///     .destination_chain(NamedChain::Base)
///     .amount(U256::from(5_000_000u64))
///     .generation(ProtocolGeneration::Standard)
///     .sender(Address::ZERO)
///     .recipient(Address::ZERO)
///     .build();
///
/// let session = orchestrator.run_full_transfer(&request).await;
/// for line in session.logs() {
///     println!("{line}");
/// }
/// # }
/// ```
#[derive(Builder)]
pub struct TransferOrchestrator<A, P, C> {
    adapter: A,
    poller: AttestationPoller<P, C>,
    registry: Arc<ChainRegistry>,
    #[builder(default)]
    mint_retry: MintRetryPolicy,
    /// Bound on waiting for approval and burn confirmations
    #[builder(default = BURN_CONFIRMATION_TIMEOUT)]
    confirmation_timeout: Duration,
    #[builder(skip)]
    session: TransferSession,
}

impl<A, P, C> TransferOrchestrator<A, P, C>
where
    A: ChainAdapter,
    P: AttestationProvider,
    C: Clock,
{
    pub fn session(&self) -> &TransferSession {
        &self.session
    }

    pub fn registry(&self) -> &ChainRegistry {
        &self.registry
    }

    /// Clears the session for a fresh run.
    pub fn reset(&mut self) {
        self.session.reset();
    }

    /// Runs every step of `request`, stopping at the first failure.
    ///
    /// Errors never escape: they move the session to `error`, are stored in
    /// [`TransferSession::error`] and appended to the log trail. A session
    /// that is not idle is left as is; call [`reset`](Self::reset) first.
    pub async fn run_full_transfer(&mut self, request: &TransferRequest) -> &TransferSession {
        if !self.session.is_idle() {
            let state = self.session.state();
            warn!(state = %state, event = "transfer_session_busy");
            self.session.log(format!(
                "Transfer session is {state}; reset before starting a new transfer"
            ));
            return &self.session;
        }

        let span = spans::run_full_transfer(
            &request.source_chain(),
            &request.destination_chain(),
            &request.amount(),
            request.generation(),
        );

        let result = async {
            self.execute_transfer(request)
                .await
                .inspect_err(spans::record_error)
        }
        .instrument(span)
        .await;

        if let Err(err) = result {
            error!(error = %err, event = "transfer_failed");
            self.session.fail(err);
        }

        &self.session
    }

    async fn execute_transfer(&mut self, request: &TransferRequest) -> Result<TxHash> {
        let generation = request.generation();
        info!(
            source_chain = %request.source_chain(),
            destination_chain = %request.destination_chain(),
            amount = %request.amount(),
            generation = %generation,
            event = "full_transfer_initiated"
        );

        if generation.is_fast() {
            self.log_fast_transfer_terms(request).await;
        }

        self.approve(request).await?;
        let burn_tx = self.burn(request).await?;
        self.await_burn_confirmation(request.source_chain(), burn_tx)
            .await?;

        let source_domain = self.registry.domain(request.source_chain(), generation)?;
        self.session.transition(TransferStep::WaitingAttestation)?;
        self.session.log("Retrieving attestation...");

        let attestation = self
            .poller
            .poll_with_log(&mut self.session, source_domain, burn_tx, generation)
            .await?;
        self.session.log("Attestation retrieved!");
        self.session.record_attestation(attestation.clone());
        info!(burn_tx = %burn_tx, event = "attestation_received");

        // Fast burns restrict the destination caller to the recipient.
        self.mint(
            request.destination_chain(),
            &attestation,
            generation,
            request.recipient(),
        )
        .await
    }

    /// Ensures the token messenger may pull `amount + fee` from the sender.
    ///
    /// Returns the approval transaction, or `None` when the current allowance
    /// already covers the transfer.
    ///
    /// # Errors
    ///
    /// [`CctpError::ApprovalFailed`] on any adapter error.
    pub async fn approve(&mut self, request: &TransferRequest) -> Result<Option<TxHash>> {
        let source = *self
            .registry
            .config(request.source_chain(), request.generation())?;
        let required = request.required_allowance();
        let span = spans::approve(
            &request.source_chain(),
            &request.sender(),
            &source.token_messenger,
            &required,
        );

        async {
            let result = self
                .ensure_allowance(request, source.stablecoin, source.token_messenger, required)
                .await;
            if let Err(err) = &result {
                spans::record_error(err);
                error!(error = %err, event = "approval_failed");
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn ensure_allowance(
        &mut self,
        request: &TransferRequest,
        token: Address,
        spender: Address,
        required: U256,
    ) -> Result<Option<TxHash>> {
        self.session.transition(TransferStep::Approving)?;
        self.session.log("Approving USDC transfer...");

        self.adapter
            .switch_chain(request.source_chain())
            .await
            .map_err(approval_failed)?;

        self.session.log(format!(
            "Approving {} USDC (amount: {}, fee: {})",
            format_usdc(required),
            format_usdc(request.amount()),
            format_usdc(request.fee())
        ));

        let current = self
            .adapter
            .allowance(token, request.sender(), spender)
            .await
            .map_err(approval_failed)?;

        if current >= required {
            info!(
                current_allowance = %current,
                required_allowance = %required,
                event = "allowance_sufficient"
            );
            self.session.log("Allowance is sufficient");
            return Ok(None);
        }

        let tx_hash = self
            .adapter
            .approve(token, request.sender(), spender, required)
            .await
            .map_err(approval_failed)?;
        self.session.log(format!("Approval Tx: {tx_hash}"));
        info!(tx_hash = %tx_hash, amount = %required, event = "approval_transaction_sent");

        self.wait_for_success(request.source_chain(), tx_hash)
            .await
            .map_err(|reason| CctpError::ApprovalFailed { reason })?;

        Ok(Some(tx_hash))
    }

    /// Sends `depositForBurn` on the source chain and returns its transaction hash.
    ///
    /// # Errors
    ///
    /// [`CctpError::BurnFailed`], carrying the underlying cause.
    pub async fn burn(&mut self, request: &TransferRequest) -> Result<TxHash> {
        let generation = request.generation();
        let source = *self.registry.config(request.source_chain(), generation)?;
        let destination_domain = self
            .registry
            .domain(request.destination_chain(), generation)?;
        let span = spans::burn(
            &request.source_chain(),
            &request.sender(),
            &request.recipient(),
            destination_domain,
            &request.amount(),
            generation,
        );

        async {
            self.send_burn(request, source.token_messenger, source.stablecoin, destination_domain)
                .await
                .inspect_err(spans::record_error)
        }
        .instrument(span)
        .await
    }

    async fn send_burn(
        &mut self,
        request: &TransferRequest,
        token_messenger: Address,
        burn_token: Address,
        destination_domain: u32,
    ) -> Result<TxHash> {
        let generation = request.generation();

        self.adapter
            .switch_chain(request.source_chain())
            .await
            .map_err(burn_failed)?;
        self.session.transition(TransferStep::Burning)?;
        self.session.log("Burning USDC...");

        let call = generation.burn_call(
            request.amount(),
            destination_domain,
            request.recipient(),
            burn_token,
        );
        info!(
            amount = %request.amount(),
            destination_domain = destination_domain,
            max_fee = %call.fast.as_ref().map(|fast| fast.max_fee).unwrap_or(U256::ZERO),
            finality_threshold = %generation.finality_threshold(),
            event = "burn_transaction_initiated"
        );

        let tx_hash = self
            .adapter
            .deposit_for_burn(token_messenger, request.sender(), &call)
            .await
            .map_err(burn_failed)?;

        self.session.record_burn(tx_hash);
        self.session.log(format!("Burn Tx: {tx_hash}"));
        info!(tx_hash = %tx_hash, event = "burn_transaction_sent");

        Ok(tx_hash)
    }

    /// Waits for the burn to reach one confirmation on `source_chain`.
    ///
    /// # Errors
    ///
    /// [`CctpError::BurnNotConfirmed`] on timeout, adapter error or a reverted receipt.
    pub async fn await_burn_confirmation(
        &mut self,
        source_chain: NamedChain,
        burn_tx_hash: TxHash,
    ) -> Result<TransactionOutcome> {
        self.session
            .log("Waiting for burn transaction to be confirmed...");

        let outcome = self
            .wait_for_success(source_chain, burn_tx_hash)
            .await
            .map_err(|reason| CctpError::BurnNotConfirmed { reason })
            .inspect_err(spans::record_error)?;

        self.session
            .log("Burn transaction confirmed with status: success");
        info!(
            tx_hash = %burn_tx_hash,
            block_number = outcome.block_number,
            event = "burn_transaction_confirmed"
        );
        Ok(outcome)
    }

    /// Mints on `destination_chain` with `caller` as the acting identity.
    ///
    /// See the shared mint step: execution errors are retried with linear
    /// backoff, anything else fails immediately with [`CctpError::MintFailed`].
    pub async fn mint(
        &mut self,
        destination_chain: NamedChain,
        attestation: &Attestation,
        generation: ProtocolGeneration,
        caller: Address,
    ) -> Result<TxHash> {
        MintContext {
            adapter: &self.adapter,
            clock: self.poller.clock(),
            registry: self.registry.as_ref(),
            policy: &self.mint_retry,
        }
        .mint(
            &mut self.session,
            destination_chain,
            attestation,
            generation,
            caller,
        )
        .await
    }

    /// USDC balance of `owner` on `chain`.
    pub async fn balance(&self, chain: NamedChain, owner: Address) -> Result<U256> {
        let token = self.registry.stablecoin(chain)?;
        self.adapter.switch_chain(chain).await?;
        self.adapter.balance_of(token, owner).await
    }

    /// Logs the fast transfer allowance and fee. Failures are informational only.
    async fn log_fast_transfer_terms(&mut self, request: &TransferRequest) {
        let provider = self.poller.provider();

        match provider.get_fast_burn_allowance().await {
            Ok(allowance) => {
                info!(allowance = allowance.allowance, event = "fast_burn_allowance_retrieved");
                self.session
                    .log(format!("Fast transfer allowance: {} USDC", allowance.allowance));
            }
            Err(err) => {
                warn!(error = %err, event = "fast_burn_allowance_unavailable");
                self.session
                    .log(format!("Failed to fetch fast transfer allowance: {err}"));
            }
        }

        let generation = request.generation();
        let (Ok(source_domain), Ok(destination_domain)) = (
            self.registry.domain(request.source_chain(), generation),
            self.registry.domain(request.destination_chain(), generation),
        ) else {
            return;
        };

        match provider
            .get_fast_burn_fees(source_domain, destination_domain)
            .await
        {
            Ok(fees) => {
                info!(minimum_fee_bps = fees.minimum_fee, event = "fast_burn_fees_retrieved");
                self.session
                    .log(format!("Fast transfer fee: {} bps", fees.minimum_fee));
            }
            Err(err) => {
                warn!(error = %err, event = "fast_burn_fees_unavailable");
                self.session
                    .log(format!("Failed to fetch fast transfer fees: {err}"));
            }
        }
    }

    /// Waits for a successful receipt, bounded by the confirmation timeout.
    async fn wait_for_success(
        &self,
        chain: NamedChain,
        tx_hash: TxHash,
    ) -> std::result::Result<TransactionOutcome, String> {
        let limit = self.confirmation_timeout;
        let waited = tokio::time::timeout(limit, self.adapter.wait_for_confirmation(chain, tx_hash))
            .instrument(spans::wait_for_confirmation(tx_hash, &chain, limit.as_secs()))
            .await;

        match waited {
            Err(_) => Err(format!(
                "no confirmation for {tx_hash} within {}s",
                limit.as_secs()
            )),
            Ok(Err(err)) => Err(err.to_string()),
            Ok(Ok(outcome)) if !outcome.success => Err(format!("transaction {tx_hash} reverted")),
            Ok(Ok(outcome)) => Ok(outcome),
        }
    }
}

fn approval_failed(err: CctpError) -> CctpError {
    CctpError::ApprovalFailed {
        reason: err.to_string(),
    }
}

fn burn_failed(err: CctpError) -> CctpError {
    CctpError::BurnFailed {
        reason: err.to_string(),
    }
}
