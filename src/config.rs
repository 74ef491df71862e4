// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0
//! Runtime configuration
//!
//! RPC endpoints and the Iris base URL come from the environment (including a
//! `.env` file). Every variable is optional and falls back to a public endpoint.

use alloy_chains::NamedChain;
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::debug;
use url::Url;

use crate::bridge::{MintRetryPolicy, PollingConfig, BURN_CONFIRMATION_TIMEOUT, IRIS_API};
use crate::error::{CctpError, Result};

/// Environment variable holding the Iris API base URL.
pub const IRIS_API_URL_VAR: &str = "IRIS_API_URL";

/// Chain, RPC override variable and public fallback endpoint
const RPC_ENDPOINTS: [(NamedChain, &str, &str); 8] = [
    (NamedChain::Mainnet, "ETH_MAINNET_RPC", "https://ethereum-rpc.publicnode.com"),
    (NamedChain::Avalanche, "AVAX_MAINNET_RPC", "https://api.avax.network/ext/bc/C/rpc"),
    (NamedChain::Arbitrum, "ARBITRUM_ONE_RPC", "https://arb1.arbitrum.io/rpc"),
    (NamedChain::Base, "BASE_MAINNET_RPC", "https://mainnet.base.org"),
    (NamedChain::Linea, "LINEA_MAINNET_RPC", "https://rpc.linea.build"),
    (NamedChain::Optimism, "OPTIMISM_MAINNET_RPC", "https://mainnet.optimism.io"),
    (NamedChain::Polygon, "POLYGON_MAINNET_RPC", "https://polygon-rpc.com"),
    (NamedChain::Unichain, "UNICHAIN_MAINNET_RPC", "https://mainnet.unichain.org"),
];

/// Endpoints and tuning for a bridge deployment
///
/// # Example
///
/// ```rust,no_run
/// use alloy_chains::NamedChain;
/// use cctp_transfer::BridgeConfig;
///
/// let config = BridgeConfig::from_env()?;
/// let base_rpc = config.rpc_url(NamedChain::Base)?;
/// println!("Base RPC: {base_rpc}");
/// # Ok::<(), cctp_transfer::CctpError>(())
/// ```
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    rpc_urls: BTreeMap<NamedChain, Url>,
    iris_api_url: Url,
    polling: PollingConfig,
    mint_retry: MintRetryPolicy,
    confirmation_timeout: Duration,
}

impl BridgeConfig {
    /// Reads the configuration through [`dotenvy::var`].
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| dotenvy::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut rpc_urls = BTreeMap::new();
        for (chain, var, fallback) in RPC_ENDPOINTS {
            let raw = lookup(var);
            let from_env = raw.is_some();
            let url = parse_url(var, raw.as_deref().unwrap_or(fallback))?;
            debug!(chain = %chain, from_env = from_env, event = "rpc_url_configured");
            rpc_urls.insert(chain, url);
        }

        let iris_api_url = parse_url(
            IRIS_API_URL_VAR,
            lookup(IRIS_API_URL_VAR).as_deref().unwrap_or(IRIS_API),
        )?;

        Ok(Self {
            rpc_urls,
            iris_api_url,
            polling: PollingConfig::default(),
            mint_retry: MintRetryPolicy::default(),
            confirmation_timeout: BURN_CONFIRMATION_TIMEOUT,
        })
    }

    pub fn with_polling(mut self, polling: PollingConfig) -> Self {
        self.polling = polling;
        self
    }

    pub fn with_mint_retry(mut self, mint_retry: MintRetryPolicy) -> Self {
        self.mint_retry = mint_retry;
        self
    }

    pub fn with_confirmation_timeout(mut self, timeout: Duration) -> Self {
        self.confirmation_timeout = timeout;
        self
    }

    /// RPC endpoint for `chain`.
    pub fn rpc_url(&self, chain: NamedChain) -> Result<&Url> {
        self.rpc_urls
            .get(&chain)
            .ok_or_else(|| CctpError::InvalidConfig(format!("no RPC endpoint for {chain}")))
    }

    /// Every chain with an RPC endpoint, with its URL.
    pub fn rpc_urls(&self) -> impl Iterator<Item = (NamedChain, &Url)> {
        self.rpc_urls.iter().map(|(chain, url)| (*chain, url))
    }

    pub fn iris_api_url(&self) -> &Url {
        &self.iris_api_url
    }

    pub fn polling(&self) -> PollingConfig {
        self.polling
    }

    pub fn mint_retry(&self) -> MintRetryPolicy {
        self.mint_retry
    }

    pub fn confirmation_timeout(&self) -> Duration {
        self.confirmation_timeout
    }
}

fn parse_url(var: &str, raw: &str) -> Result<Url> {
    Url::parse(raw).map_err(|e| CctpError::InvalidConfig(format!("{var}: invalid URL {raw:?}: {e}")))
}
