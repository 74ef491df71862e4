// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0
//! Chain registry
//!
//! Static mapping from chain × protocol generation to the CCTP domain and the
//! contract addresses a transfer touches. The registry is read-only after
//! construction and is shared between sessions behind an `Arc`.

use alloy_chains::NamedChain;
use alloy_primitives::Address;
use std::collections::HashMap;

use super::addresses::*;
use crate::error::{CctpError, Result};
use crate::protocol::{DomainId, ProtocolGeneration};

/// Per-chain configuration for one protocol generation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainConfig {
    pub chain: NamedChain,
    /// Human readable chain name used in session logs
    pub name: &'static str,
    pub domain: DomainId,
    /// USDC token contract
    pub stablecoin: Address,
    pub token_messenger: Address,
    pub message_transmitter: Address,
}

const fn standard(
    chain: NamedChain,
    name: &'static str,
    domain: DomainId,
    stablecoin: Address,
    token_messenger: Address,
    message_transmitter: Address,
) -> (ProtocolGeneration, ChainConfig) {
    (
        ProtocolGeneration::Standard,
        ChainConfig {
            chain,
            name,
            domain,
            stablecoin,
            token_messenger,
            message_transmitter,
        },
    )
}

const fn fast(
    chain: NamedChain,
    name: &'static str,
    domain: DomainId,
    stablecoin: Address,
) -> (ProtocolGeneration, ChainConfig) {
    (
        ProtocolGeneration::Fast,
        ChainConfig {
            chain,
            name,
            domain,
            stablecoin,
            token_messenger: CCTP_V2_TOKEN_MESSENGER_MAINNET,
            message_transmitter: CCTP_V2_MESSAGE_TRANSMITTER_MAINNET,
        },
    )
}

const MAINNET_CHAINS: [(ProtocolGeneration, ChainConfig); 12] = [
    fast(NamedChain::Mainnet, "Ethereum Mainnet", DomainId::Ethereum, ETHEREUM_USDC),
    fast(NamedChain::Avalanche, "Avalanche Mainnet", DomainId::Avalanche, AVALANCHE_USDC),
    fast(NamedChain::Arbitrum, "Arbitrum One", DomainId::Arbitrum, ARBITRUM_USDC),
    fast(NamedChain::Base, "Base Mainnet", DomainId::Base, BASE_USDC),
    fast(NamedChain::Linea, "Linea Mainnet", DomainId::Linea, LINEA_USDC),
    standard(
        NamedChain::Mainnet,
        "Ethereum Mainnet",
        DomainId::Ethereum,
        ETHEREUM_USDC,
        ETHEREUM_TOKEN_MESSENGER_ADDRESS,
        ETHEREUM_MESSAGE_TRANSMITTER_ADDRESS,
    ),
    standard(
        NamedChain::Avalanche,
        "Avalanche Mainnet",
        DomainId::Avalanche,
        AVALANCHE_USDC,
        AVALANCHE_TOKEN_MESSENGER_ADDRESS,
        AVALANCHE_MESSAGE_TRANSMITTER_ADDRESS,
    ),
    standard(
        NamedChain::Optimism,
        "Optimism Mainnet",
        DomainId::Optimism,
        OPTIMISM_USDC,
        OPTIMISM_TOKEN_MESSENGER_ADDRESS,
        OPTIMISM_MESSAGE_TRANSMITTER_ADDRESS,
    ),
    standard(
        NamedChain::Arbitrum,
        "Arbitrum One",
        DomainId::Arbitrum,
        ARBITRUM_USDC,
        ARBITRUM_TOKEN_MESSENGER_ADDRESS,
        ARBITRUM_MESSAGE_TRANSMITTER_ADDRESS,
    ),
    standard(
        NamedChain::Base,
        "Base Mainnet",
        DomainId::Base,
        BASE_USDC,
        BASE_TOKEN_MESSENGER_ADDRESS,
        BASE_MESSAGE_TRANSMITTER_ADDRESS,
    ),
    standard(
        NamedChain::Polygon,
        "Polygon Mainnet",
        DomainId::Polygon,
        POLYGON_USDC,
        POLYGON_TOKEN_MESSENGER_ADDRESS,
        POLYGON_MESSAGE_TRANSMITTER_ADDRESS,
    ),
    standard(
        NamedChain::Unichain,
        "UniChain Mainnet",
        DomainId::Unichain,
        UNICHAIN_USDC,
        UNICHAIN_TOKEN_MESSENGER_ADDRESS,
        UNICHAIN_MESSAGE_TRANSMITTER_ADDRESS,
    ),
];

/// Lookup table of chain configurations keyed by chain and generation
///
/// # Example
///
/// ```rust
/// use alloy_chains::NamedChain;
/// use cctp_transfer::{ChainRegistry, ProtocolGeneration};
///
/// let registry = ChainRegistry::mainnet();
/// let base = registry.config(NamedChain::Base, ProtocolGeneration::Standard).unwrap();
/// assert_eq!(base.domain.as_u32(), 6);
///
/// // Linea only has fast transfer contracts
/// assert!(registry.config(NamedChain::Linea, ProtocolGeneration::Standard).is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ChainRegistry {
    entries: HashMap<(NamedChain, ProtocolGeneration), ChainConfig>,
}

impl ChainRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry of every mainnet chain with deployed CCTP contracts.
    pub fn mainnet() -> Self {
        MAINNET_CHAINS
            .into_iter()
            .fold(Self::new(), |registry, (generation, config)| {
                registry.with_chain(generation, config)
            })
    }

    /// Adds or replaces the entry for `config.chain` under `generation`.
    pub fn with_chain(mut self, generation: ProtocolGeneration, config: ChainConfig) -> Self {
        self.entries.insert((config.chain, generation), config);
        self
    }

    /// Returns the configuration for `chain`, or `ChainNotConfigured` on a miss.
    pub fn config(&self, chain: NamedChain, generation: ProtocolGeneration) -> Result<&ChainConfig> {
        self.entries
            .get(&(chain, generation))
            .ok_or(CctpError::ChainNotConfigured { chain, generation })
    }

    /// Domain id of `chain` under `generation`.
    pub fn domain(&self, chain: NamedChain, generation: ProtocolGeneration) -> Result<u32> {
        self.config(chain, generation)
            .map(|config| config.domain.as_u32())
    }

    /// Reverse lookup from a domain id to the configured chain.
    ///
    /// Only chains configured for `generation` are considered.
    pub fn chain_for_domain(&self, domain: u32, generation: ProtocolGeneration) -> Result<NamedChain> {
        self.entries
            .iter()
            .find(|((_, entry_generation), config)| {
                *entry_generation == generation && config.domain.as_u32() == domain
            })
            .map(|((chain, _), _)| *chain)
            .ok_or(CctpError::UnknownDestinationDomain { domain })
    }

    /// Chains configured for `generation`, ordered by domain id.
    pub fn supported_chains(&self, generation: ProtocolGeneration) -> Vec<NamedChain> {
        let mut configs: Vec<&ChainConfig> = self
            .entries
            .iter()
            .filter(|((_, entry_generation), _)| *entry_generation == generation)
            .map(|(_, config)| config)
            .collect();
        configs.sort_by_key(|config| config.domain);
        configs.into_iter().map(|config| config.chain).collect()
    }

    /// USDC address on `chain`, regardless of generation.
    pub fn stablecoin(&self, chain: NamedChain) -> Result<Address> {
        ProtocolGeneration::ALL
            .into_iter()
            .find_map(|generation| self.entries.get(&(chain, generation)))
            .map(|config| config.stablecoin)
            .ok_or_else(|| {
                CctpError::InvalidConfig(format!("no stablecoin configured for {chain}"))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(NamedChain::Mainnet, ProtocolGeneration::Fast, 0)]
    #[case(NamedChain::Avalanche, ProtocolGeneration::Fast, 1)]
    #[case(NamedChain::Arbitrum, ProtocolGeneration::Fast, 3)]
    #[case(NamedChain::Base, ProtocolGeneration::Fast, 6)]
    #[case(NamedChain::Linea, ProtocolGeneration::Fast, 11)]
    #[case(NamedChain::Mainnet, ProtocolGeneration::Standard, 0)]
    #[case(NamedChain::Avalanche, ProtocolGeneration::Standard, 1)]
    #[case(NamedChain::Optimism, ProtocolGeneration::Standard, 2)]
    #[case(NamedChain::Arbitrum, ProtocolGeneration::Standard, 3)]
    #[case(NamedChain::Base, ProtocolGeneration::Standard, 6)]
    #[case(NamedChain::Polygon, ProtocolGeneration::Standard, 7)]
    #[case(NamedChain::Unichain, ProtocolGeneration::Standard, 10)]
    fn test_domain_lookup_is_a_bijection(
        #[case] chain: NamedChain,
        #[case] generation: ProtocolGeneration,
        #[case] domain: u32,
    ) {
        let registry = ChainRegistry::mainnet();

        assert_eq!(registry.domain(chain, generation).unwrap(), domain);
        assert_eq!(registry.chain_for_domain(domain, generation).unwrap(), chain);
    }

    #[rstest]
    #[case(4, ProtocolGeneration::Standard)]
    #[case(11, ProtocolGeneration::Standard)]
    #[case(2, ProtocolGeneration::Fast)]
    #[case(7, ProtocolGeneration::Fast)]
    #[case(999, ProtocolGeneration::Fast)]
    fn test_unmapped_domain_is_unknown(#[case] domain: u32, #[case] generation: ProtocolGeneration) {
        let err = ChainRegistry::mainnet()
            .chain_for_domain(domain, generation)
            .unwrap_err();
        assert!(matches!(err, CctpError::UnknownDestinationDomain { domain: d } if d == domain));
    }

    #[test]
    fn test_lookup_miss_is_a_configuration_error() {
        let err = ChainRegistry::mainnet()
            .config(NamedChain::Polygon, ProtocolGeneration::Fast)
            .unwrap_err();
        assert!(matches!(
            err,
            CctpError::ChainNotConfigured {
                chain: NamedChain::Polygon,
                generation: ProtocolGeneration::Fast
            }
        ));
    }

    #[test]
    fn test_supported_chains_per_generation() {
        let registry = ChainRegistry::mainnet();

        assert_eq!(
            registry.supported_chains(ProtocolGeneration::Fast),
            vec![
                NamedChain::Mainnet,
                NamedChain::Avalanche,
                NamedChain::Arbitrum,
                NamedChain::Base,
                NamedChain::Linea,
            ]
        );
        assert_eq!(
            registry.supported_chains(ProtocolGeneration::Standard),
            vec![
                NamedChain::Mainnet,
                NamedChain::Avalanche,
                NamedChain::Optimism,
                NamedChain::Arbitrum,
                NamedChain::Base,
                NamedChain::Polygon,
                NamedChain::Unichain,
            ]
        );
    }

    #[test]
    fn test_fast_contracts_are_unified() {
        let registry = ChainRegistry::mainnet();
        for chain in registry.supported_chains(ProtocolGeneration::Fast) {
            let config = registry.config(chain, ProtocolGeneration::Fast).unwrap();
            assert_eq!(config.token_messenger, CCTP_V2_TOKEN_MESSENGER_MAINNET);
            assert_eq!(config.message_transmitter, CCTP_V2_MESSAGE_TRANSMITTER_MAINNET);
        }
    }

    #[test]
    fn test_stablecoin_lookup_spans_generations() {
        let registry = ChainRegistry::mainnet();
        assert_eq!(registry.stablecoin(NamedChain::Linea).unwrap(), LINEA_USDC);
        assert_eq!(registry.stablecoin(NamedChain::Polygon).unwrap(), POLYGON_USDC);
        assert!(registry.stablecoin(NamedChain::Sepolia).is_err());
    }

    #[test]
    fn test_with_chain_overrides_entry() {
        let custom = ChainConfig {
            chain: NamedChain::Base,
            name: "Base Fork",
            domain: DomainId::Base,
            stablecoin: Address::repeat_byte(1),
            token_messenger: Address::repeat_byte(2),
            message_transmitter: Address::repeat_byte(3),
        };
        let registry = ChainRegistry::mainnet().with_chain(ProtocolGeneration::Standard, custom);

        assert_eq!(
            registry
                .config(NamedChain::Base, ProtocolGeneration::Standard)
                .unwrap(),
            &custom
        );
    }
}
