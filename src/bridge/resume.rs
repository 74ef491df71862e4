// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0
//! Receive-side recovery
//!
//! Completes a transfer whose burn already happened, given only the burn
//! transaction and its source chain. The destination chain and recipient are
//! read from the attested message itself.

use alloy_chains::NamedChain;
use alloy_primitives::{Address, TxHash};
use bon::Builder;
use std::sync::Arc;
use tracing::{error, info, warn, Instrument, Span};

use super::config::MintRetryPolicy;
use super::mint::MintContext;
use super::poller::AttestationPoller;
use super::session::{ResumeSession, ResumeStep};
use crate::chain::ChainRegistry;
use crate::error::Result;
use crate::protocol::{CrossChainMessage, DomainId, ProtocolGeneration};
use crate::spans;
use crate::traits::{AttestationProvider, ChainAdapter, Clock};

/// Resumes interrupted transfers from their burn transaction
#[derive(Builder)]
pub struct ResumeOrchestrator<A, P, C> {
    adapter: A,
    poller: AttestationPoller<P, C>,
    registry: Arc<ChainRegistry>,
    #[builder(default)]
    mint_retry: MintRetryPolicy,
    /// Identity that sends `receiveMessage`. Defaults to the decoded recipient.
    caller: Option<Address>,
    #[builder(skip)]
    session: ResumeSession,
}

impl<A, P, C> ResumeOrchestrator<A, P, C>
where
    A: ChainAdapter,
    P: AttestationProvider,
    C: Clock,
{
    pub fn session(&self) -> &ResumeSession {
        &self.session
    }

    pub fn reset(&mut self) {
        self.session.reset();
    }

    /// Waits for the attestation of `burn_tx_hash` and mints it.
    ///
    /// Like [`TransferOrchestrator::run_full_transfer`](super::TransferOrchestrator::run_full_transfer),
    /// failures land in the session instead of being returned.
    pub async fn resume(
        &mut self,
        burn_tx_hash: TxHash,
        source_chain: NamedChain,
        generation: ProtocolGeneration,
    ) -> &ResumeSession {
        if !self.session.is_idle() {
            let state = self.session.state();
            warn!(state = %state, event = "resume_session_busy");
            self.session.log(format!(
                "Resume session is {state}; reset before resuming another transfer"
            ));
            return &self.session;
        }

        let span = spans::resume_transfer(burn_tx_hash, &source_chain, generation);
        let result = async {
            self.execute_resume(burn_tx_hash, source_chain, generation)
                .await
                .inspect_err(spans::record_error)
        }
        .instrument(span)
        .await;

        if let Err(err) = result {
            error!(error = %err, burn_tx = %burn_tx_hash, event = "resume_failed");
            self.session.fail(err);
        }

        &self.session
    }

    async fn execute_resume(
        &mut self,
        burn_tx_hash: TxHash,
        source_chain: NamedChain,
        generation: ProtocolGeneration,
    ) -> Result<TxHash> {
        let source_domain = self.registry.domain(source_chain, generation)?;

        self.session.transition(ResumeStep::WaitingAttestation)?;
        self.session.record_burn(burn_tx_hash);
        self.session.log(format!(
            "Resuming transfer: {burn_tx_hash} on chain: {source_chain}"
        ));
        info!(
            burn_tx = %burn_tx_hash,
            source_chain = %source_chain,
            source_domain = source_domain,
            event = "resume_initiated"
        );

        self.session.log("Retrieving attestation...");
        let attestation = self
            .poller
            .poll_with_log(&mut self.session, source_domain, burn_tx_hash, generation)
            .await?;
        self.session.log("Attestation retrieved!");

        let message = CrossChainMessage::decode(&attestation.message)?;
        self.session
            .log(format!("Source Domain: {}", message.source_domain));
        self.session
            .log(format!("Destination Domain: {}", message.destination_domain));
        self.session
            .log(format!("Recipient Address: {}", message.recipient));

        if message.source_domain != source_domain {
            warn!(
                expected = source_domain,
                actual = message.source_domain,
                event = "message_source_domain_mismatch"
            );
        }

        let destination_chain = match self
            .registry
            .chain_for_domain(message.destination_domain, generation)
        {
            Ok(chain) => chain,
            Err(err) => {
                // A real CCTP domain that this generation does not route to
                if let Some(known) = DomainId::from_u32(message.destination_domain) {
                    self.session
                        .log(format!("{known} is not available for {generation} transfers"));
                }
                return Err(err);
            }
        };
        let destination_name = self.registry.config(destination_chain, generation)?.name;
        Span::current().record("destination_chain", destination_chain.to_string());
        self.session
            .log(format!("Destination chain: {destination_name}"));

        self.session.record_attestation(attestation.clone());

        let caller = self.caller.unwrap_or(message.recipient);
        MintContext {
            adapter: &self.adapter,
            clock: self.poller.clock(),
            registry: self.registry.as_ref(),
            policy: &self.mint_retry,
        }
        .mint(
            &mut self.session,
            destination_chain,
            &attestation,
            generation,
            caller,
        )
        .await
    }
}
