// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0
//! Transfer session state machines
//!
//! A session is the run-time record one orchestrator owns: the current step,
//! what has been produced so far (burn tx, attestation), the retry counter and
//! an append-only, timestamped log trail that is the user-facing diagnostic
//! surface. Steps only move forward along the happy path; `Error` is reachable
//! from any non-terminal step and only [`Session::reset`] leaves it.

use alloy_primitives::TxHash;
use chrono::{DateTime, Utc};
use std::fmt;
use tracing::{debug, warn};

use crate::error::{CctpError, Result};
use crate::protocol::Attestation;

/// A state of a session state machine
pub trait SessionStep: Copy + Eq + fmt::Debug + fmt::Display + Send + Sync + 'static {
    const IDLE: Self;
    const WAITING_ATTESTATION: Self;
    const MINTING: Self;
    const COMPLETED: Self;
    const ERROR: Self;

    /// Position along the happy path. `ERROR` sits outside the ordering.
    fn order(self) -> u8;

    fn as_str(self) -> &'static str;

    #[inline]
    fn is_terminal(self) -> bool {
        self == Self::COMPLETED || self == Self::ERROR
    }
}

/// Steps of a brand-new transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransferStep {
    Idle,
    Approving,
    Burning,
    WaitingAttestation,
    Minting,
    Completed,
    Error,
}

impl SessionStep for TransferStep {
    const IDLE: Self = Self::Idle;
    const WAITING_ATTESTATION: Self = Self::WaitingAttestation;
    const MINTING: Self = Self::Minting;
    const COMPLETED: Self = Self::Completed;
    const ERROR: Self = Self::Error;

    fn order(self) -> u8 {
        match self {
            Self::Idle => 0,
            Self::Approving => 1,
            Self::Burning => 2,
            Self::WaitingAttestation => 3,
            Self::Minting => 4,
            Self::Completed => 5,
            Self::Error => u8::MAX,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Approving => "approving",
            Self::Burning => "burning",
            Self::WaitingAttestation => "waiting-attestation",
            Self::Minting => "minting",
            Self::Completed => "completed",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for TransferStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Steps of a transfer resumed from its burn transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResumeStep {
    Idle,
    WaitingAttestation,
    Minting,
    Completed,
    Error,
}

impl SessionStep for ResumeStep {
    const IDLE: Self = Self::Idle;
    const WAITING_ATTESTATION: Self = Self::WaitingAttestation;
    const MINTING: Self = Self::Minting;
    const COMPLETED: Self = Self::Completed;
    const ERROR: Self = Self::Error;

    fn order(self) -> u8 {
        match self {
            Self::Idle => 0,
            Self::WaitingAttestation => 1,
            Self::Minting => 2,
            Self::Completed => 3,
            Self::Error => u8::MAX,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::WaitingAttestation => "waiting-attestation",
            Self::Minting => "minting",
            Self::Completed => "completed",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for ResumeStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One timestamped line of a session's log trail
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub message: String,
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.timestamp.format("%H:%M:%S"), self.message)
    }
}

/// Mutable record of one orchestration run
#[derive(Debug)]
pub struct Session<S> {
    state: S,
    burn_tx_hash: Option<TxHash>,
    attestation: Option<Attestation>,
    retry_count: u32,
    logs: Vec<LogEntry>,
    error: Option<CctpError>,
}

pub type TransferSession = Session<TransferStep>;
pub type ResumeSession = Session<ResumeStep>;

impl<S: SessionStep> Default for Session<S> {
    fn default() -> Self {
        Self {
            state: S::IDLE,
            burn_tx_hash: None,
            attestation: None,
            retry_count: 0,
            logs: Vec::new(),
            error: None,
        }
    }
}

impl<S: SessionStep> Session<S> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> S {
        self.state
    }

    pub fn burn_tx_hash(&self) -> Option<TxHash> {
        self.burn_tx_hash
    }

    pub fn attestation(&self) -> Option<&Attestation> {
        self.attestation.as_ref()
    }

    /// Mint retries performed so far
    pub fn retry_count(&self) -> u32 {
        self.retry_count
    }

    pub fn logs(&self) -> &[LogEntry] {
        &self.logs
    }

    /// The error that moved the session into the `error` state
    pub fn error(&self) -> Option<&CctpError> {
        self.error.as_ref()
    }

    pub fn is_idle(&self) -> bool {
        self.state == S::IDLE
    }

    pub fn is_completed(&self) -> bool {
        self.state == S::COMPLETED
    }

    pub fn is_failed(&self) -> bool {
        self.state == S::ERROR
    }

    /// Clears everything and returns to idle.
    ///
    /// Only session state is cleared; transactions already sent stay sent.
    pub fn reset(&mut self) {
        debug!(from = %self.state, event = "session_reset");
        *self = Self::default();
    }

    /// Moves forward along the happy path.
    ///
    /// Re-entering a step, moving backwards or leaving a terminal step is
    /// rejected. Use [`fail`](Self::fail) to enter the error state.
    pub(crate) fn transition(&mut self, to: S) -> Result<()> {
        if self.state.is_terminal() || to == S::ERROR || to.order() <= self.state.order() {
            return Err(CctpError::InvalidTransition {
                from: self.state.to_string(),
                to: to.to_string(),
            });
        }

        debug!(from = %self.state, to = %to, event = "session_transition");
        self.state = to;
        Ok(())
    }

    /// Appends a line to the log trail.
    pub(crate) fn log(&mut self, message: impl Into<String>) {
        let message = message.into();
        debug!(state = %self.state, message = %message, event = "session_log");
        self.logs.push(LogEntry {
            timestamp: Utc::now(),
            message,
        });
    }

    /// Records `error` and moves to the terminal error state.
    pub(crate) fn fail(&mut self, error: CctpError) {
        self.log(format!("Error: {error}"));
        if self.state == S::COMPLETED {
            warn!(error = %error, event = "error_after_completion");
        } else {
            self.state = S::ERROR;
        }
        self.error = Some(error);
    }

    pub(crate) fn record_burn(&mut self, tx_hash: TxHash) {
        self.burn_tx_hash = Some(tx_hash);
    }

    pub(crate) fn record_attestation(&mut self, attestation: Attestation) {
        self.attestation = Some(attestation);
    }

    pub(crate) fn record_retry(&mut self, retry: u32) {
        self.retry_count = retry;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transfer_happy_path_transitions() {
        let mut session = TransferSession::new();
        assert!(session.is_idle());

        for step in [
            TransferStep::Approving,
            TransferStep::Burning,
            TransferStep::WaitingAttestation,
            TransferStep::Minting,
            TransferStep::Completed,
        ] {
            session.transition(step).unwrap();
            assert_eq!(session.state(), step);
        }
        assert!(session.is_completed());
    }

    #[test]
    fn test_steps_may_be_skipped_forward() {
        let mut session = ResumeSession::new();
        session.transition(ResumeStep::Minting).unwrap();
        assert_eq!(session.state(), ResumeStep::Minting);
    }

    #[test]
    fn test_no_step_is_reentered() {
        let mut session = TransferSession::new();
        session.transition(TransferStep::Burning).unwrap();

        assert!(session.transition(TransferStep::Burning).is_err());
        assert!(session.transition(TransferStep::Approving).is_err());
        assert_eq!(session.state(), TransferStep::Burning);
    }

    #[test]
    fn test_terminal_states() {
        assert!(TransferStep::Completed.is_terminal());
        assert!(TransferStep::Error.is_terminal());
        assert!(!TransferStep::Minting.is_terminal());
        assert!(ResumeStep::Error.is_terminal());
        assert!(!ResumeStep::Idle.is_terminal());
    }

    #[test]
    fn test_error_is_terminal_until_reset() {
        let mut session = TransferSession::new();
        session.transition(TransferStep::Approving).unwrap();
        session.fail(CctpError::ApprovalFailed {
            reason: "user rejected".to_string(),
        });

        assert!(session.is_failed());
        assert!(matches!(
            session.error(),
            Some(CctpError::ApprovalFailed { .. })
        ));
        assert_eq!(
            session.logs().last().unwrap().message,
            "Error: Approval failed: user rejected"
        );
        assert!(session.transition(TransferStep::Burning).is_err());

        session.reset();
        assert!(session.is_idle());
        assert!(session.logs().is_empty());
        assert!(session.error().is_none());
        session.transition(TransferStep::Approving).unwrap();
    }

    #[test]
    fn test_error_cannot_be_entered_through_transition() {
        let mut session = TransferSession::new();
        assert!(session.transition(TransferStep::Error).is_err());
        assert!(session.is_idle());
    }

    #[test]
    fn test_reset_clears_run_data() {
        let mut session = ResumeSession::new();
        session.record_burn(TxHash::from([1u8; 32]));
        session.record_retry(2);
        session.log("Minting USDC...");

        session.reset();
        assert_eq!(session.burn_tx_hash(), None);
        assert_eq!(session.retry_count(), 0);
        assert!(session.logs().is_empty());
    }

    #[test]
    fn test_log_entry_display() {
        let entry = LogEntry {
            timestamp: DateTime::from_timestamp(3_723, 0).unwrap(),
            message: "Burning USDC...".to_string(),
        };
        assert_eq!(entry.to_string(), "[01:02:03] Burning USDC...");
    }

    #[test]
    fn test_step_display() {
        assert_eq!(
            TransferStep::WaitingAttestation.to_string(),
            "waiting-attestation"
        );
        assert_eq!(ResumeStep::Completed.to_string(), "completed");
    }
}
