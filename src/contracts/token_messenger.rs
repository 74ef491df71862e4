// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0
//! TokenMessenger bindings
//!
//! The standard contracts take the four-argument `depositForBurn`; the fast
//! contracts add the destination caller, fee cap and finality threshold.
//! [`TokenMessengerContract`] picks the overload from the [`BurnCall`] shape.

use alloy_network::Ethereum;
use alloy_primitives::Address;
use alloy_provider::Provider;
use alloy_rpc_types::TransactionRequest;
use alloy_sol_types::sol;
use tracing::{debug, info};

use crate::protocol::BurnCall;
use StandardTokenMessenger::StandardTokenMessengerInstance;
use FastTokenMessenger::FastTokenMessengerInstance;

/// Source-side contract that burns USDC and emits the cross-chain message
pub struct TokenMessengerContract<P: Provider<Ethereum>> {
    address: Address,
    provider: P,
}

impl<P: Provider<Ethereum> + Clone> TokenMessengerContract<P> {
    pub fn new(address: Address, provider: P) -> Self {
        debug!(
            contract_address = %address,
            event = "token_messenger_contract_initialized"
        );
        Self { address, provider }
    }

    /// Builds the `depositForBurn` transaction for `call`, sent by `from`.
    pub fn deposit_for_burn_transaction(&self, from: Address, call: &BurnCall) -> TransactionRequest {
        info!(
            from_address = %from,
            mint_recipient = %call.mint_recipient,
            destination_domain = call.destination_domain,
            token_address = %call.burn_token,
            amount = %call.amount,
            fast = call.fast.is_some(),
            contract_address = %self.address,
            event = "deposit_for_burn_transaction_created"
        );

        match &call.fast {
            None => StandardTokenMessengerInstance::new(self.address, self.provider.clone())
                .depositForBurn(
                    call.amount,
                    call.destination_domain,
                    call.mint_recipient,
                    call.burn_token,
                )
                .from(from)
                .into_transaction_request(),
            Some(fast) => FastTokenMessengerInstance::new(self.address, self.provider.clone())
                .depositForBurn(
                    call.amount,
                    call.destination_domain,
                    call.mint_recipient,
                    call.burn_token,
                    fast.destination_caller,
                    fast.max_fee,
                    fast.min_finality_threshold,
                )
                .from(from)
                .into_transaction_request(),
        }
    }

    pub fn address(&self) -> Address {
        self.address
    }
}

sol!(
    #[allow(missing_docs)]
    #[sol(rpc)]
    contract StandardTokenMessenger {
        function depositForBurn(
            uint256 amount,
            uint32 destinationDomain,
            bytes32 mintRecipient,
            address burnToken
        ) external returns (uint64 nonce);
    }
);

sol!(
    #[allow(clippy::too_many_arguments)]
    #[allow(missing_docs)]
    #[sol(rpc)]
    contract FastTokenMessenger {
        function depositForBurn(
            uint256 amount,
            uint32 destinationDomain,
            bytes32 mintRecipient,
            address burnToken,
            bytes32 destinationCaller,
            uint256 maxFee,
            uint32 minFinalityThreshold
        ) external;
    }
);

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{address, U256};
    use alloy_provider::ProviderBuilder;
    use alloy_sol_types::SolCall;

    use crate::protocol::ProtocolGeneration;

    const USDC: Address = address!("A0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48");
    const RECIPIENT: Address = address!("8fe6b999dc680ccfdd5bf7eb0974218be2542daa");

    fn calldata(request: &TransactionRequest) -> Vec<u8> {
        request
            .input
            .input()
            .map(|bytes| bytes.to_vec())
            .unwrap_or_default()
    }

    #[test]
    fn test_standard_burn_uses_four_argument_overload() {
        let provider = ProviderBuilder::new().connect_http("http://localhost:8545".parse().unwrap());
        let contract = TokenMessengerContract::new(Address::repeat_byte(9), provider);
        let call = ProtocolGeneration::Standard.burn_call(U256::from(5_000_000u64), 6, RECIPIENT, USDC);

        let request = contract.deposit_for_burn_transaction(RECIPIENT, &call);
        let data = calldata(&request);

        assert_eq!(&data[..4], StandardTokenMessenger::depositForBurnCall::SELECTOR.as_slice());
        assert_eq!(request.from, Some(RECIPIENT));
    }

    #[test]
    fn test_fast_burn_encodes_fee_and_finality() {
        let provider = ProviderBuilder::new().connect_http("http://localhost:8545".parse().unwrap());
        let contract = TokenMessengerContract::new(Address::repeat_byte(9), provider);
        let call = ProtocolGeneration::Fast.burn_call(U256::from(10_000_000u64), 11, RECIPIENT, USDC);

        let data = calldata(&contract.deposit_for_burn_transaction(RECIPIENT, &call));
        let decoded = FastTokenMessenger::depositForBurnCall::abi_decode(&data).unwrap();

        assert_eq!(decoded.maxFee, U256::from(1_000u64));
        assert_eq!(decoded.minFinalityThreshold, 1000);
        assert_eq!(decoded.destinationCaller, RECIPIENT.into_word());
        assert_eq!(decoded.destinationDomain, 11);
    }
}
