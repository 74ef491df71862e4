// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0
//! Alloy-backed chain adapter

use alloy_chains::NamedChain;
use alloy_json_rpc::RpcError;
use alloy_network::{Ethereum, EthereumWallet, ReceiptResponse};
use alloy_primitives::{Address, Bytes, TxHash, U256};
use alloy_provider::{DynProvider, Provider, ProviderBuilder};
use alloy_rpc_types::TransactionRequest;
use alloy_transport::TransportErrorKind;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::{debug, info, Instrument};

use crate::config::BridgeConfig;
use crate::contracts::{Erc20Contract, MessageTransmitterContract, TokenMessengerContract};
use crate::error::{CctpError, Result};
use crate::protocol::BurnCall;
use crate::spans;
use crate::traits::{ChainAdapter, TransactionOutcome};

/// No chain selected yet. No supported chain has id 0.
const NO_CHAIN: u64 = 0;

const DEFAULT_RECEIPT_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// [`ChainAdapter`] over one Alloy provider per chain
///
/// Writes are sent through the provider's wallet filler, so every provider
/// must be built with a wallet holding the keys of the `from` addresses the
/// orchestrators use.
///
/// # Example
///
/// ```rust,no_run
/// use alloy_network::EthereumWallet;
/// use cctp_transfer::providers::AlloyChainAdapter;
/// use cctp_transfer::BridgeConfig;
///
/// # fn example(wallet: EthereumWallet) -> Result<(), cctp_transfer::CctpError> {
/// let config = BridgeConfig::from_env()?;
/// let adapter = AlloyChainAdapter::from_config(&config, wallet);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct AlloyChainAdapter<P> {
    providers: HashMap<NamedChain, P>,
    active: AtomicU64,
    receipt_poll_interval: Duration,
}

impl<P> Default for AlloyChainAdapter<P> {
    fn default() -> Self {
        Self {
            providers: HashMap::new(),
            active: AtomicU64::new(NO_CHAIN),
            receipt_poll_interval: DEFAULT_RECEIPT_POLL_INTERVAL,
        }
    }
}

impl AlloyChainAdapter<DynProvider> {
    /// Connects an HTTP provider with `wallet` for every RPC endpoint in `config`.
    pub fn from_config(config: &BridgeConfig, wallet: EthereumWallet) -> Self {
        config
            .rpc_urls()
            .fold(Self::default(), |adapter, (chain, url)| {
                let provider = ProviderBuilder::new()
                    .wallet(wallet.clone())
                    .connect_http(url.clone())
                    .erased();
                adapter.with_provider(chain, provider)
            })
    }
}

impl<P> AlloyChainAdapter<P>
where
    P: Provider<Ethereum> + Clone,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_provider(mut self, chain: NamedChain, provider: P) -> Self {
        self.providers.insert(chain, provider);
        self
    }

    pub fn with_receipt_poll_interval(mut self, interval: Duration) -> Self {
        self.receipt_poll_interval = interval;
        self
    }

    fn provider(&self, chain: NamedChain) -> Result<&P> {
        self.providers
            .get(&chain)
            .ok_or_else(|| CctpError::InvalidConfig(format!("no provider configured for {chain}")))
    }

    fn selected_chain(&self) -> Option<NamedChain> {
        NamedChain::try_from(self.active.load(Ordering::SeqCst)).ok()
    }

    fn active_provider(&self) -> Result<(NamedChain, &P)> {
        let chain = self
            .selected_chain()
            .ok_or_else(|| CctpError::Provider("no active chain; switch chains first".to_string()))?;
        Ok((chain, self.provider(chain)?))
    }

    async fn send(&self, method: &str, contract: Address, tx: TransactionRequest) -> Result<TxHash> {
        let (chain, provider) = self.active_provider()?;

        async {
            let pending = provider
                .send_transaction(tx)
                .await
                .map_err(classify_send_error)?;
            let tx_hash = *pending.tx_hash();
            debug!(tx_hash = %tx_hash, event = "transaction_sent");
            Ok(tx_hash)
        }
        .instrument(spans::send_transaction(method, &chain, &contract))
        .await
    }
}

#[async_trait]
impl<P> ChainAdapter for AlloyChainAdapter<P>
where
    P: Provider<Ethereum> + Clone + Send + Sync + 'static,
{
    async fn switch_chain(&self, chain: NamedChain) -> Result<()> {
        let provider = self.provider(chain)?;
        let chain_id = provider.get_chain_id().await?;
        if chain_id != chain as u64 {
            return Err(CctpError::InvalidConfig(format!(
                "RPC endpoint for {chain} reports chain id {chain_id}"
            )));
        }

        self.active.store(chain_id, Ordering::SeqCst);
        info!(chain = %chain, chain_id = chain_id, event = "chain_switched");
        Ok(())
    }

    fn active_chain(&self) -> Option<NamedChain> {
        self.selected_chain()
    }

    async fn allowance(&self, token: Address, owner: Address, spender: Address) -> Result<U256> {
        let (_, provider) = self.active_provider()?;
        Erc20Contract::new(token, provider.clone())
            .allowance(owner, spender)
            .await
            .map_err(|e| CctpError::ContractCall(e.to_string()))
    }

    async fn balance_of(&self, token: Address, owner: Address) -> Result<U256> {
        let (_, provider) = self.active_provider()?;
        Erc20Contract::new(token, provider.clone())
            .balance_of(owner)
            .await
            .map_err(|e| CctpError::ContractCall(e.to_string()))
    }

    async fn approve(
        &self,
        token: Address,
        from: Address,
        spender: Address,
        amount: U256,
    ) -> Result<TxHash> {
        let (_, provider) = self.active_provider()?;
        let tx = Erc20Contract::new(token, provider.clone()).approve_transaction(from, spender, amount);
        self.send("approve", token, tx).await
    }

    async fn deposit_for_burn(
        &self,
        token_messenger: Address,
        from: Address,
        call: &BurnCall,
    ) -> Result<TxHash> {
        let (_, provider) = self.active_provider()?;
        let tx = TokenMessengerContract::new(token_messenger, provider.clone())
            .deposit_for_burn_transaction(from, call);
        self.send("depositForBurn", token_messenger, tx).await
    }

    async fn receive_message(
        &self,
        message_transmitter: Address,
        from: Address,
        message: Bytes,
        attestation: Bytes,
    ) -> Result<TxHash> {
        let (_, provider) = self.active_provider()?;
        let tx = MessageTransmitterContract::new(message_transmitter, provider.clone())
            .receive_message_transaction(from, message, attestation);
        self.send("receiveMessage", message_transmitter, tx).await
    }

    async fn wait_for_confirmation(
        &self,
        chain: NamedChain,
        tx_hash: TxHash,
    ) -> Result<TransactionOutcome> {
        let provider = self.provider(chain)?;

        loop {
            if let Some(receipt) = provider.get_transaction_receipt(tx_hash).await? {
                let outcome = TransactionOutcome {
                    tx_hash,
                    success: receipt.status(),
                    block_number: receipt.block_number(),
                };
                debug!(
                    tx_hash = %tx_hash,
                    success = outcome.success,
                    block_number = outcome.block_number,
                    event = "transaction_receipt_found"
                );
                return Ok(outcome);
            }

            tokio::time::sleep(self.receipt_poll_interval).await;
        }
    }
}

/// Node-side rejections (reverts, failed gas estimation) are execution errors.
fn classify_send_error(err: RpcError<TransportErrorKind>) -> CctpError {
    match err {
        RpcError::ErrorResp(payload) => CctpError::TransactionExecution {
            reason: payload.to_string(),
        },
        other => CctpError::Rpc(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_json_rpc::ErrorPayload;

    fn adapter() -> AlloyChainAdapter<DynProvider> {
        let provider = ProviderBuilder::new()
            .connect_http("http://localhost:8545".parse().unwrap())
            .erased();
        AlloyChainAdapter::new().with_provider(NamedChain::Base, provider)
    }

    #[test]
    fn test_no_active_chain_initially() {
        assert_eq!(adapter().active_chain(), None);
    }

    #[tokio::test]
    async fn test_switch_to_unconfigured_chain_fails() {
        let err = adapter().switch_chain(NamedChain::Linea).await.unwrap_err();
        assert!(matches!(err, CctpError::InvalidConfig(_)));
    }

    #[tokio::test]
    async fn test_writes_require_active_chain() {
        let err = adapter()
            .approve(Address::ZERO, Address::ZERO, Address::ZERO, U256::from(1u64))
            .await
            .unwrap_err();
        assert!(matches!(err, CctpError::Provider(_)));
    }

    #[tokio::test]
    async fn test_failed_switch_leaves_reads_without_chain() {
        let adapter = adapter();
        assert!(adapter.switch_chain(NamedChain::Linea).await.is_err());

        let err = adapter
            .balance_of(Address::ZERO, Address::ZERO)
            .await
            .unwrap_err();
        assert!(matches!(err, CctpError::Provider(ref msg) if msg.contains("no active chain")));
        assert_eq!(adapter.selected_chain(), None);
    }

    #[test]
    fn test_error_responses_are_execution_errors() {
        let payload = ErrorPayload {
            code: 3,
            message: "execution reverted: Invalid attestation".into(),
            data: None,
        };
        let err = classify_send_error(RpcError::ErrorResp(payload));
        assert!(matches!(err, CctpError::TransactionExecution { .. }));
        assert!(err.is_execution_error());

        let err = classify_send_error(RpcError::NullResp);
        assert!(matches!(err, CctpError::Rpc(_)));
        assert!(!err.is_execution_error());
    }
}
