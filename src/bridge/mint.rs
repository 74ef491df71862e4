// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0
//! Mint step shared by the transfer and resume orchestrators

use alloy_chains::NamedChain;
use alloy_primitives::{Address, TxHash};
use tracing::{error, info, warn, Instrument, Span};

use super::config::MintRetryPolicy;
use super::session::{Session, SessionStep};
use crate::chain::ChainRegistry;
use crate::error::{CctpError, Result};
use crate::protocol::{Attestation, ProtocolGeneration};
use crate::spans;
use crate::traits::{ChainAdapter, Clock};

/// Collaborators the mint step borrows from its orchestrator
pub(crate) struct MintContext<'a, A, C> {
    pub adapter: &'a A,
    pub clock: &'a C,
    pub registry: &'a ChainRegistry,
    pub policy: &'a MintRetryPolicy,
}

impl<A: ChainAdapter, C: Clock> MintContext<'_, A, C> {
    /// Calls `receiveMessage` on the destination chain and completes `session`.
    ///
    /// Transaction-execution errors are retried with linear backoff up to
    /// `policy.max_retries` times; every other error fails at once.
    pub async fn mint<S: SessionStep>(
        &self,
        session: &mut Session<S>,
        destination_chain: NamedChain,
        attestation: &Attestation,
        generation: ProtocolGeneration,
        caller: Address,
    ) -> Result<TxHash> {
        let span = spans::mint(
            &destination_chain,
            generation,
            attestation.message.len(),
            attestation.attestation.len(),
        );

        async {
            self.mint_with_retry(session, destination_chain, attestation, generation, caller)
                .await
                .inspect_err(spans::record_error)
        }
        .instrument(span)
        .await
    }

    async fn mint_with_retry<S: SessionStep>(
        &self,
        session: &mut Session<S>,
        destination_chain: NamedChain,
        attestation: &Attestation,
        generation: ProtocolGeneration,
        caller: Address,
    ) -> Result<TxHash> {
        let message_transmitter = self
            .registry
            .config(destination_chain, generation)?
            .message_transmitter;

        session.transition(S::MINTING)?;
        session.log("Minting USDC...");

        self.adapter
            .switch_chain(destination_chain)
            .await
            .map_err(|e| CctpError::MintFailed {
                attempts: 0,
                reason: format!("could not switch to {destination_chain}: {e}"),
            })?;

        info!(
            destination_chain = %destination_chain,
            message_transmitter = %message_transmitter,
            caller = %caller,
            event = "mint_transaction_initiated"
        );

        let mut retry: u32 = 0;
        loop {
            let result = self
                .adapter
                .receive_message(
                    message_transmitter,
                    caller,
                    attestation.message.clone(),
                    attestation.attestation.clone(),
                )
                .await;

            match result {
                Ok(tx_hash) => {
                    Span::current().record("retries", retry);
                    info!(
                        tx_hash = %tx_hash,
                        retries = retry,
                        event = "mint_transaction_sent"
                    );
                    session.log(format!("Mint Tx: {tx_hash}"));
                    session.transition(S::COMPLETED)?;
                    return Ok(tx_hash);
                }
                Err(err) if err.is_execution_error() && retry < self.policy.max_retries => {
                    retry += 1;
                    session.record_retry(retry);
                    session.log(format!("Retry {retry}/{}...", self.policy.max_retries));

                    let backoff = self.policy.backoff(retry);
                    warn!(
                        retry = retry,
                        backoff_secs = backoff.as_secs(),
                        error = %err,
                        event = "mint_execution_failed_retrying"
                    );
                    self.clock.sleep(backoff).await;
                }
                Err(err) => {
                    Span::current().record("retries", retry);
                    error!(
                        retries = retry,
                        execution_error = err.is_execution_error(),
                        error = %err,
                        event = "mint_failed"
                    );
                    return Err(CctpError::MintFailed {
                        attempts: retry + 1,
                        reason: err.to_string(),
                    });
                }
            }
        }
    }
}
