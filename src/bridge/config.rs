// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0
use std::time::Duration;

/// Circle Iris API production URL
///
/// See <https://developers.circle.com/stablecoins/cctp-apis>
///
pub const IRIS_API: &str = "https://iris-api.circle.com";

/// CCTP v1 attestation API path
pub const ATTESTATION_PATH_V1: &str = "/v1/attestations/";

/// Fast transfer allowance path
pub const FAST_BURN_ALLOWANCE_PATH: &str = "/v2/fastBurn/USDC/allowance";

/// Fast transfer fee path prefix, followed by `{sourceDomain}/{destinationDomain}`
pub const FAST_BURN_FEES_PATH: &str = "/v2/fastBurn/USDC/fees/";

/// Upper bound on waiting for a burn to reach one confirmation.
pub const BURN_CONFIRMATION_TIMEOUT: Duration = Duration::from_secs(120);

/// Configuration for attestation polling behavior.
///
/// The poller has no attempt cap: it stops on success or on a fatal error.
/// Callers that need an overall bound wrap the poll in a timeout.
///
/// # Examples
///
/// ```rust
/// use cctp_transfer::PollingConfig;
///
/// let config = PollingConfig::default();
/// assert_eq!(config.poll_interval_secs, 5);
///
/// let config = PollingConfig::default().with_poll_interval_secs(30);
/// assert_eq!(config.poll_interval().as_secs(), 30);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollingConfig {
    /// Seconds to wait between polling attempts.
    pub poll_interval_secs: u64,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: 5,
        }
    }
}

impl PollingConfig {
    /// Sets the interval between polling attempts in seconds.
    pub fn with_poll_interval_secs(mut self, secs: u64) -> Self {
        self.poll_interval_secs = secs;
        self
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }
}

/// Retry behavior of the mint step on transaction-execution errors.
///
/// Backoff grows linearly: the n-th retry waits `n * backoff_step_secs`.
///
/// # Examples
///
/// ```rust
/// use cctp_transfer::MintRetryPolicy;
///
/// let policy = MintRetryPolicy::default();
/// assert_eq!(policy.max_retries, 3);
/// assert_eq!(policy.backoff(2).as_secs(), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MintRetryPolicy {
    /// Retries after the first attempt.
    pub max_retries: u32,
    pub backoff_step_secs: u64,
}

impl Default for MintRetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            backoff_step_secs: 2,
        }
    }
}

impl MintRetryPolicy {
    pub fn with_max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    pub fn with_backoff_step_secs(mut self, secs: u64) -> Self {
        self.backoff_step_secs = secs;
        self
    }

    /// Delay before retry number `retry` (1-based).
    pub fn backoff(&self, retry: u32) -> Duration {
        Duration::from_secs(self.backoff_step_secs * u64::from(retry))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_polling_config() {
        let config = PollingConfig::default();
        assert_eq!(config.poll_interval(), Duration::from_secs(5));
    }

    #[test]
    fn test_polling_builder() {
        let config = PollingConfig::default().with_poll_interval_secs(60);
        assert_eq!(config.poll_interval_secs, 60);
    }

    #[test]
    fn test_mint_backoff_is_linear() {
        let policy = MintRetryPolicy::default();
        assert_eq!(policy.backoff(1), Duration::from_secs(2));
        assert_eq!(policy.backoff(2), Duration::from_secs(4));
        assert_eq!(policy.backoff(3), Duration::from_secs(6));
    }

    #[test]
    fn test_mint_policy_builder() {
        let policy = MintRetryPolicy::default()
            .with_max_retries(1)
            .with_backoff_step_secs(10);
        assert_eq!(policy.max_retries, 1);
        assert_eq!(policy.backoff(1), Duration::from_secs(10));
    }
}
