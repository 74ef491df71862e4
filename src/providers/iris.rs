// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0
//! Circle Iris API attestation provider

use alloy_primitives::{hex, FixedBytes, TxHash};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, trace, Instrument};
use url::Url;

use crate::bridge::{ATTESTATION_PATH_V1, FAST_BURN_ALLOWANCE_PATH, FAST_BURN_FEES_PATH, IRIS_API};
use crate::config::BridgeConfig;
use crate::error::{CctpError, Result};
use crate::protocol::{
    AttestationResponse, FastBurnAllowance, FastBurnFees, ProtocolGeneration, V1MessagesResponse,
    V2AttestationResponse,
};
use crate::spans;
use crate::traits::AttestationProvider;

/// Seconds to back off when a 429 carries no usable `Retry-After`.
const DEFAULT_RETRY_AFTER_SECS: u64 = 300;

/// Attestation provider backed by Circle's Iris HTTP API
///
/// # Examples
///
/// ```rust,no_run
/// use cctp_transfer::providers::IrisAttestationProvider;
/// use cctp_transfer::AttestationProvider;
/// use alloy_primitives::TxHash;
///
/// # async fn example() -> Result<(), cctp_transfer::CctpError> {
/// let provider = IrisAttestationProvider::production();
/// let response = provider.get_v2_messages(3, TxHash::ZERO).await?;
/// println!("{} message(s)", response.messages.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct IrisAttestationProvider {
    base_url: String,
    client: Client,
}

impl IrisAttestationProvider {
    /// # Arguments
    ///
    /// * `base_url` - Iris API root, e.g. <https://iris-api-sandbox.circle.com>
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: Client::new(),
        }
    }

    /// Provider for `https://iris-api.circle.com`.
    pub fn production() -> Self {
        Self::new(IRIS_API)
    }

    pub fn from_config(config: &BridgeConfig) -> Self {
        Self::new(config.iris_api_url().as_str())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Appends `path_and_query` to the base URL, keeping any base path prefix.
    fn endpoint(&self, path_and_query: &str) -> Result<Url> {
        let raw = format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path_and_query.trim_start_matches('/')
        );
        Url::parse(&raw)
            .map_err(|e| CctpError::InvalidConfig(format!("invalid Iris URL {raw}: {e}")))
    }

    fn messages_url(
        &self,
        generation: ProtocolGeneration,
        source_domain: u32,
        tx_hash: TxHash,
    ) -> Result<Url> {
        self.endpoint(&generation.messages_path(source_domain, tx_hash))
    }

    fn attestation_url(&self, message_hash: FixedBytes<32>) -> Result<Url> {
        self.endpoint(&format!(
            "{ATTESTATION_PATH_V1}0x{}",
            hex::encode(message_hash)
        ))
    }

    fn fast_burn_allowance_url(&self) -> Result<Url> {
        self.endpoint(FAST_BURN_ALLOWANCE_PATH)
    }

    fn fast_burn_fees_url(&self, source_domain: u32, destination_domain: u32) -> Result<Url> {
        self.endpoint(&format!(
            "{FAST_BURN_FEES_PATH}{source_domain}/{destination_domain}"
        ))
    }

    /// GETs `url` and decodes the JSON body.
    ///
    /// 404 maps to [`CctpError::AttestationNotFound`], 429 to
    /// [`CctpError::RateLimitExceeded`]; other non-success statuses are errors.
    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        let span = spans::http_request("GET", &url);

        async {
            trace!(url = %url, event = "iris_request_sent");
            let response = self.client.get(url.clone()).send().await?;
            let status = response.status();
            trace!(status_code = %status, event = "iris_response_received");

            if status == StatusCode::NOT_FOUND {
                debug!(url = %url, event = "iris_not_found");
                return Err(CctpError::AttestationNotFound);
            }

            if status == StatusCode::TOO_MANY_REQUESTS {
                let retry_after = response
                    .headers()
                    .get(reqwest::header::RETRY_AFTER)
                    .and_then(|h| h.to_str().ok())
                    .and_then(|s| s.parse::<u64>().ok())
                    .unwrap_or(DEFAULT_RETRY_AFTER_SECS);
                debug!(retry_after_seconds = retry_after, event = "iris_rate_limited");
                spans::record_error_with_context(
                    "RateLimitExceeded",
                    "Iris API rate limit exceeded",
                    Some(url.as_str()),
                );
                return Err(CctpError::RateLimitExceeded {
                    retry_after_seconds: retry_after,
                });
            }

            response.error_for_status_ref()?;
            let body = response.text().await?;
            Ok(serde_json::from_str(&body)?)
        }
        .instrument(span)
        .await
    }
}

#[async_trait]
impl AttestationProvider for IrisAttestationProvider {
    async fn get_v2_messages(
        &self,
        source_domain: u32,
        tx_hash: TxHash,
    ) -> Result<V2AttestationResponse> {
        let url = self.messages_url(ProtocolGeneration::Fast, source_domain, tx_hash)?;
        self.get_json(url).await
    }

    async fn get_v1_messages(
        &self,
        source_domain: u32,
        tx_hash: TxHash,
    ) -> Result<V1MessagesResponse> {
        let url = self.messages_url(ProtocolGeneration::Standard, source_domain, tx_hash)?;
        self.get_json(url).await
    }

    async fn get_attestation(&self, message_hash: FixedBytes<32>) -> Result<AttestationResponse> {
        let url = self.attestation_url(message_hash)?;
        self.get_json(url).await
    }

    async fn get_fast_burn_allowance(&self) -> Result<FastBurnAllowance> {
        let url = self.fast_burn_allowance_url()?;
        self.get_json(url).await
    }

    async fn get_fast_burn_fees(
        &self,
        source_domain: u32,
        destination_domain: u32,
    ) -> Result<FastBurnFees> {
        let url = self.fast_burn_fees_url(source_domain, destination_domain)?;
        self.get_json(url).await
    }

    fn messages_endpoint(
        &self,
        generation: ProtocolGeneration,
        source_domain: u32,
        tx_hash: TxHash,
    ) -> String {
        self.messages_url(generation, source_domain, tx_hash)
            .map(String::from)
            .unwrap_or_else(|_| generation.messages_path(source_domain, tx_hash))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::b256;

    const BURN_TX: TxHash =
        b256!("0x7a3f1b7f4e1ab5c9f4a0b7f2d3c8e6a1b2c3d4e5f60718293a4b5c6d7e8f9012");

    #[test]
    fn test_fast_messages_url() {
        let provider = IrisAttestationProvider::production();
        let url = provider
            .messages_url(ProtocolGeneration::Fast, 3, BURN_TX)
            .unwrap();
        insta::assert_snapshot!(url.as_str(), @"https://iris-api.circle.com/v2/messages/3?transactionHash=0x7a3f1b7f4e1ab5c9f4a0b7f2d3c8e6a1b2c3d4e5f60718293a4b5c6d7e8f9012");
    }

    #[test]
    fn test_standard_messages_url() {
        let provider = IrisAttestationProvider::production();
        let url = provider
            .messages_url(ProtocolGeneration::Standard, 0, BURN_TX)
            .unwrap();
        insta::assert_snapshot!(url.as_str(), @"https://iris-api.circle.com/v1/messages/0/0x7a3f1b7f4e1ab5c9f4a0b7f2d3c8e6a1b2c3d4e5f60718293a4b5c6d7e8f9012");
    }

    #[test]
    fn test_attestation_url() {
        let provider = IrisAttestationProvider::production();
        let url = provider.attestation_url(FixedBytes::repeat_byte(0xab)).unwrap();
        insta::assert_snapshot!(url.as_str(), @"https://iris-api.circle.com/v1/attestations/0xabababababababababababababababababababababababababababababababab");
    }

    #[test]
    fn test_fast_burn_urls() {
        let provider = IrisAttestationProvider::production();
        insta::assert_snapshot!(provider.fast_burn_allowance_url().unwrap().as_str(), @"https://iris-api.circle.com/v2/fastBurn/USDC/allowance");
        insta::assert_snapshot!(provider.fast_burn_fees_url(0, 6).unwrap().as_str(), @"https://iris-api.circle.com/v2/fastBurn/USDC/fees/0/6");
    }

    #[test]
    fn test_sandbox_base_url() {
        let provider = IrisAttestationProvider::new("https://iris-api-sandbox.circle.com");
        let url = provider.fast_burn_allowance_url().unwrap();
        assert_eq!(url.host_str(), Some("iris-api-sandbox.circle.com"));
    }

    #[test]
    fn test_base_path_is_kept() {
        for base in ["https://proxy.example/iris", "https://proxy.example/iris/"] {
            let provider = IrisAttestationProvider::new(base);
            assert_eq!(
                provider.fast_burn_fees_url(3, 6).unwrap().as_str(),
                "https://proxy.example/iris/v2/fastBurn/USDC/fees/3/6"
            );
        }
    }

    #[test]
    fn test_messages_endpoint_is_absolute() {
        let provider = IrisAttestationProvider::new("https://iris-api-sandbox.circle.com/");
        insta::assert_snapshot!(
            provider.messages_endpoint(ProtocolGeneration::Standard, 3, BURN_TX),
            @"https://iris-api-sandbox.circle.com/v1/messages/3/0x7a3f1b7f4e1ab5c9f4a0b7f2d3c8e6a1b2c3d4e5f60718293a4b5c6d7e8f9012"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let provider = IrisAttestationProvider::new("not a url");
        let err = provider.fast_burn_allowance_url().unwrap_err();
        assert!(matches!(err, CctpError::InvalidConfig(_)));
    }
}
