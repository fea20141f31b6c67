//! Poll Contract Binding
//!
//! Typed calls against the deployed poll contract. Reads go through
//! `eth_call`, writes through `eth_sendTransaction`; both are ABI-encoded with
//! the `IPollContract` interface.

use alloy_primitives::{hex, Address, TxHash, U256};
use alloy_sol_types::SolCall;
use std::rc::Rc;

use super::abi::IPollContract;
use super::error::{ChainError, ChainResult};
use super::wallet::WalletProvider;

/// Contract handle bound to a provider and a signing account
#[derive(Clone)]
pub struct PollContract {
    provider: Rc<dyn WalletProvider>,
    address: Address,
    signer: Address,
}

impl PollContract {
    pub fn new(provider: Rc<dyn WalletProvider>, address: Address, signer: Address) -> Self {
        Self {
            provider,
            address,
            signer,
        }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn signer(&self) -> Address {
        self.signer
    }

    /// Same contract, different signing account
    pub fn with_signer(&self, signer: Address) -> Self {
        Self {
            provider: Rc::clone(&self.provider),
            address: self.address,
            signer,
        }
    }

    fn call_object<C: SolCall>(&self, call: &C) -> serde_json::Value {
        serde_json::json!({
            "from": self.signer,
            "to": self.address,
            "data": hex::encode_prefixed(call.abi_encode()),
        })
    }

    /// Execute a read-only call and decode its return values
    async fn read<C: SolCall>(&self, call: C) -> ChainResult<C::Return> {
        tracing::debug!(function = C::SIGNATURE, "eth_call");

        let params = serde_json::json!([self.call_object(&call), "latest"]);
        let result = self
            .provider
            .request("eth_call", params)
            .await
            .map_err(ChainError::from_contract_call)?;

        let encoded = result.as_str().ok_or_else(|| {
            ChainError::ContractCallFailed(format!(
                "{} returned a non-string result",
                C::SIGNATURE
            ))
        })?;
        let bytes = hex::decode(encoded).map_err(|e| {
            ChainError::ContractCallFailed(format!("{} returned invalid hex: {}", C::SIGNATURE, e))
        })?;

        C::abi_decode_returns(&bytes).map_err(|e| {
            ChainError::ContractCallFailed(format!("could not decode {}: {}", C::SIGNATURE, e))
        })
    }

    /// Submit a state-changing call and return its transaction hash
    async fn send<C: SolCall>(&self, call: C) -> ChainResult<TxHash> {
        tracing::debug!(function = C::SIGNATURE, signer = %self.signer, "eth_sendTransaction");

        let params = serde_json::json!([self.call_object(&call)]);
        let result = self
            .provider
            .request("eth_sendTransaction", params)
            .await
            .map_err(ChainError::from_contract_call)?;

        serde_json::from_value(result).map_err(|e| {
            ChainError::ContractCallFailed(format!(
                "{} returned an invalid transaction hash: {}",
                C::SIGNATURE,
                e
            ))
        })
    }

    pub async fn get_all_polls(&self) -> ChainResult<IPollContract::getAllPollsReturn> {
        self.read(IPollContract::getAllPollsCall {}).await
    }

    pub async fn get_poll(&self, poll_id: U256) -> ChainResult<IPollContract::getPollReturn> {
        self.read(IPollContract::getPollCall { pollId: poll_id }).await
    }

    pub async fn get_poll_creator(&self, poll_id: U256) -> ChainResult<Address> {
        self.read(IPollContract::getPollCreatorCall { pollId: poll_id })
            .await
    }

    pub async fn create_poll(&self, title: &str, options: &[String]) -> ChainResult<TxHash> {
        self.send(IPollContract::createPollCall {
            title: title.to_string(),
            options: options.to_vec(),
        })
        .await
    }

    pub async fn vote(&self, poll_id: U256, option_index: U256) -> ChainResult<TxHash> {
        self.send(IPollContract::voteCall {
            pollId: poll_id,
            optionIndex: option_index,
        })
        .await
    }

    pub async fn end_poll(&self, poll_id: U256) -> ChainResult<TxHash> {
        self.send(IPollContract::endPollCall { pollId: poll_id })
            .await
    }
}
