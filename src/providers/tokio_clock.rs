// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0
//! Tokio-based clock

use async_trait::async_trait;
use std::time::{Duration, Instant};

use crate::traits::Clock;

/// Wall-clock [`Clock`] backed by `tokio::time`
///
/// Under a paused tokio runtime (`#[tokio::test(start_paused = true)]`)
/// sleeps auto-advance, so poll intervals and mint backoff cost nothing in tests.
///
/// # Examples
///
/// ```rust
/// use cctp_transfer::providers::TokioClock;
/// use cctp_transfer::{AttestationPoller, PollingConfig};
/// # use cctp_transfer::providers::IrisAttestationProvider;
///
/// let poller = AttestationPoller::new(IrisAttestationProvider::production(), TokioClock::new())
///     .with_config(PollingConfig::default().with_poll_interval_secs(10));
/// assert_eq!(poller.config().poll_interval_secs, 10);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioClock;

impl TokioClock {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Clock for TokioClock {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }

    fn now(&self) -> Instant {
        tokio::time::Instant::now().into_std()
    }
}
