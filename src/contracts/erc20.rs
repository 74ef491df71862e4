// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0
//! USDC (ERC20) bindings for allowance, approval and balance checks

use alloy_network::Ethereum;
use alloy_primitives::{Address, U256};
use alloy_provider::Provider;
use alloy_rpc_types::TransactionRequest;
use alloy_sol_types::sol;
use tracing::debug;

use Erc20::Erc20Instance;

/// Stablecoin contract wrapper
///
/// # Example
///
/// ```rust,no_run
/// use cctp_transfer::contracts::Erc20Contract;
/// use cctp_transfer::chain::addresses::{CCTP_V2_TOKEN_MESSENGER_MAINNET, ETHEREUM_USDC};
/// use alloy_primitives::{address, U256};
/// use alloy_provider::ProviderBuilder;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let provider = ProviderBuilder::new().connect("http://localhost:8545").await?;
/// let usdc = Erc20Contract::new(ETHEREUM_USDC, provider);
///
/// let owner = address!("1234567890123456789012345678901234567890");
/// let allowance = usdc.allowance(owner, CCTP_V2_TOKEN_MESSENGER_MAINNET).await?;
/// if allowance < U256::from(1_000_100u64) {
///     let tx = usdc.approve_transaction(owner, CCTP_V2_TOKEN_MESSENGER_MAINNET, U256::from(1_000_100u64));
///     // hand `tx` to a wallet-backed provider
/// }
/// # Ok(())
/// # }
/// ```
pub struct Erc20Contract<P: Provider<Ethereum>> {
    instance: Erc20Instance<P>,
}

impl<P: Provider<Ethereum>> Erc20Contract<P> {
    pub fn new(address: Address, provider: P) -> Self {
        Self {
            instance: Erc20Instance::new(address, provider),
        }
    }

    /// Amount `spender` may pull from `owner`.
    pub async fn allowance(
        &self,
        owner: Address,
        spender: Address,
    ) -> Result<U256, alloy_contract::Error> {
        let allowance = self.instance.allowance(owner, spender).call().await?;

        debug!(
            owner = %owner,
            spender = %spender,
            allowance = %allowance,
            token = %self.instance.address(),
            event = "allowance_retrieved"
        );

        Ok(allowance)
    }

    /// Builds (but does not send) `approve(spender, amount)` from `owner`.
    pub fn approve_transaction(
        &self,
        owner: Address,
        spender: Address,
        amount: U256,
    ) -> TransactionRequest {
        self.instance
            .approve(spender, amount)
            .from(owner)
            .into_transaction_request()
    }

    pub async fn balance_of(&self, account: Address) -> Result<U256, alloy_contract::Error> {
        let balance = self.instance.balanceOf(account).call().await?;
        debug!(
            account = %account,
            balance = %balance,
            token = %self.instance.address(),
            event = "balance_retrieved"
        );
        Ok(balance)
    }

    pub fn address(&self) -> Address {
        *self.instance.address()
    }
}

sol!(
    #[allow(missing_docs)]
    #[sol(rpc)]
    contract Erc20 {
        function allowance(address owner, address spender) external view returns (uint256);
        function approve(address spender, uint256 amount) external returns (bool);
        function balanceOf(address account) external view returns (uint256);
    }
);
