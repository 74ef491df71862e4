// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0
//! Attestation polling
//!
//! The poller asks Iris for the burn's attestation until it is `complete`.
//! There is no attempt cap: a 404 or a non-complete status sleeps for the
//! poll interval and tries again, and any other error ends the poll. The poll
//! is an ordinary future, so dropping it cancels it; use
//! [`AttestationPoller::poll_with_timeout`] for an overall bound.
//! [`AttestationPoller::poll_with_log`] also writes the endpoint and every
//! retry into a session's log trail.

use alloy_primitives::{keccak256, TxHash};
use std::time::Duration;
use tracing::{debug, error, info, warn, Instrument, Span};

use super::config::PollingConfig;
use super::session::{Session, SessionStep};
use crate::error::{CctpError, Result};
use crate::protocol::{Attestation, AttestationStatus, ProtocolGeneration};
use crate::spans;
use crate::traits::{AttestationProvider, Clock};

/// Polls an [`AttestationProvider`] until a burn message is attested
#[derive(Debug, Clone)]
pub struct AttestationPoller<P, C> {
    provider: P,
    clock: C,
    config: PollingConfig,
}

impl<P: AttestationProvider, C: Clock> AttestationPoller<P, C> {
    pub fn new(provider: P, clock: C) -> Self {
        Self {
            provider,
            clock,
            config: PollingConfig::default(),
        }
    }

    pub fn with_config(mut self, config: PollingConfig) -> Self {
        self.config = config;
        self
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn config(&self) -> &PollingConfig {
        &self.config
    }

    /// Polls until the burn `tx_hash` emitted on `source_domain` is attested.
    ///
    /// # Errors
    ///
    /// [`CctpError::AttestationRetrievalFailed`] on any error other than a 404.
    pub async fn poll(
        &self,
        source_domain: u32,
        tx_hash: TxHash,
        generation: ProtocolGeneration,
    ) -> Result<Attestation> {
        let span = spans::poll_attestation(
            source_domain,
            tx_hash,
            generation,
            self.config.poll_interval_secs,
        );

        self.poll_until_complete(source_domain, tx_hash, generation, |_| {})
            .instrument(span)
            .await
    }

    /// Like [`poll`](Self::poll), appending progress to `session`'s log trail:
    /// the endpoint once, then one line per retry.
    pub async fn poll_with_log<S: SessionStep>(
        &self,
        session: &mut Session<S>,
        source_domain: u32,
        tx_hash: TxHash,
        generation: ProtocolGeneration,
    ) -> Result<Attestation> {
        let span = spans::poll_attestation(
            source_domain,
            tx_hash,
            generation,
            self.config.poll_interval_secs,
        );

        session.log(format!(
            "API URL: {}",
            self.provider
                .messages_endpoint(generation, source_domain, tx_hash)
        ));
        self.poll_until_complete(source_domain, tx_hash, generation, |line| {
            session.log(line)
        })
        .instrument(span)
        .await
    }

    /// Like [`poll`](Self::poll), giving up with
    /// [`CctpError::AttestationTimeout`] once `limit` has elapsed.
    pub async fn poll_with_timeout(
        &self,
        source_domain: u32,
        tx_hash: TxHash,
        generation: ProtocolGeneration,
        limit: Duration,
    ) -> Result<Attestation> {
        tokio::time::timeout(limit, self.poll(source_domain, tx_hash, generation))
            .await
            .map_err(|_| {
                warn!(limit_secs = limit.as_secs(), event = "attestation_timeout");
                CctpError::AttestationTimeout
            })?
    }

    async fn poll_until_complete(
        &self,
        source_domain: u32,
        tx_hash: TxHash,
        generation: ProtocolGeneration,
        mut progress: impl FnMut(&'static str),
    ) -> Result<Attestation> {
        info!(
            source_domain = source_domain,
            tx_hash = %tx_hash,
            path = %generation.messages_path(source_domain, tx_hash),
            event = "attestation_polling_started"
        );

        let started = self.clock.now();
        let mut attempt: u32 = 0;
        loop {
            attempt += 1;

            let outcome = self
                .fetch_once(source_domain, tx_hash, generation)
                .instrument(spans::poll_attempt(attempt))
                .await;

            match outcome {
                Ok(Some(attestation)) => {
                    Span::current().record("attempts", attempt);
                    info!(
                        attempt = attempt,
                        message_length_bytes = attestation.message.len(),
                        attestation_length_bytes = attestation.attestation.len(),
                        elapsed_secs = self.clock.now().saturating_duration_since(started).as_secs(),
                        event = "attestation_complete"
                    );
                    return Ok(attestation);
                }
                Ok(None) => {
                    debug!(attempt = attempt, event = "attestation_pending");
                    progress("Waiting for attestation...");
                }
                Err(CctpError::AttestationNotFound) => {
                    debug!(attempt = attempt, event = "attestation_not_found");
                    progress("Attestation not found yet, retrying...");
                }
                Err(err) => {
                    let err = match err {
                        err @ CctpError::AttestationRetrievalFailed { .. } => err,
                        other => CctpError::AttestationRetrievalFailed {
                            reason: other.to_string(),
                        },
                    };
                    spans::record_error(&err);
                    error!(attempt = attempt, error = %err, event = "attestation_retrieval_failed");
                    return Err(err);
                }
            }

            self.clock.sleep(self.config.poll_interval()).await;
        }
    }

    /// One round trip. `Ok(None)` means "not attested yet".
    async fn fetch_once(
        &self,
        source_domain: u32,
        tx_hash: TxHash,
        generation: ProtocolGeneration,
    ) -> Result<Option<Attestation>> {
        match generation {
            ProtocolGeneration::Fast => self.fetch_fast(source_domain, tx_hash).await,
            ProtocolGeneration::Standard => self.fetch_standard(source_domain, tx_hash).await,
        }
    }

    async fn fetch_fast(&self, source_domain: u32, tx_hash: TxHash) -> Result<Option<Attestation>> {
        let response = self.provider.get_v2_messages(source_domain, tx_hash).await?;
        let Some(first) = response.messages.into_iter().next() else {
            return Ok(None);
        };

        if first.status != AttestationStatus::Complete {
            log_incomplete(first.status);
            return Ok(None);
        }

        match (first.message, first.attestation) {
            (Some(message), Some(attestation)) => Ok(Some(Attestation {
                message,
                attestation,
                status: AttestationStatus::Complete,
            })),
            _ => Err(CctpError::AttestationRetrievalFailed {
                reason: "complete message is missing message or attestation bytes".to_string(),
            }),
        }
    }

    async fn fetch_standard(
        &self,
        source_domain: u32,
        tx_hash: TxHash,
    ) -> Result<Option<Attestation>> {
        let response = self.provider.get_v1_messages(source_domain, tx_hash).await?;
        let Some(first) = response.messages.into_iter().next() else {
            return Ok(None);
        };
        let Some(message) = first.message else {
            return Ok(None);
        };

        let message_hash = keccak256(&message);
        debug!(message_hash = %message_hash, event = "message_hash_computed");

        let status = self.provider.get_attestation(message_hash).await?;
        if status.status != AttestationStatus::Complete {
            log_incomplete(status.status);
            return Ok(None);
        }

        // The messages record may still say PENDING if it was read just before signing.
        let attestation = first.attestation.or(status.attestation).ok_or_else(|| {
            CctpError::AttestationRetrievalFailed {
                reason: format!("attestation bytes missing for message {message_hash}"),
            }
        })?;

        Ok(Some(Attestation {
            message,
            attestation,
            status: AttestationStatus::Complete,
        }))
    }
}

fn log_incomplete(status: AttestationStatus) {
    if status == AttestationStatus::Failed {
        warn!(status = ?status, event = "attestation_reported_failed");
    } else {
        debug!(status = ?status, event = "attestation_incomplete");
    }
}
