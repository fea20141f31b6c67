//! Chain error types
//!
//! Errors raised while talking to the wallet provider and the poll contract.

use alloy_sol_types::{Revert, SolError};
use serde::Deserialize;
use thiserror::Error;

/// EIP-1193 code a wallet returns when the user declines a request
pub const USER_REJECTED_CODE: i64 = 4001;

/// Errors that can occur in the chain layer
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChainError {
    /// No wallet extension is injected into the page
    #[error("No wallet detected. Please install MetaMask or another Ethereum wallet")]
    WalletUnavailable,

    /// The user declined the connection or transaction request
    #[error("Request rejected in wallet")]
    UserRejected,

    /// An operation was attempted before a session exists
    #[error("Contract not initialized. Connect your wallet first")]
    ContractUnavailable,

    /// A read or transaction reverted, or the network call failed
    #[error("Contract call failed: {0}")]
    ContractCallFailed(String),

    /// The wallet provider failed outside of a contract call
    #[error("Wallet error: {0}")]
    Wallet(String),
}

impl ChainError {
    /// Classify a provider error raised while calling the contract.
    pub fn from_contract_call(err: RpcError) -> Self {
        if err.is_user_rejection() {
            return ChainError::UserRejected;
        }
        ChainError::ContractCallFailed(err.reason())
    }

    /// Classify a provider error raised during account access.
    pub fn from_wallet_request(err: RpcError) -> Self {
        if err.is_user_rejection() {
            return ChainError::UserRejected;
        }
        ChainError::Wallet(err.message)
    }

    /// Short human-readable message, used as the notification description
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

/// Raw error object returned by an EIP-1193 provider
#[derive(Error, Debug, Clone, PartialEq, Deserialize)]
#[error("RPC error {code}: {message}")]
pub struct RpcError {
    pub code: i64,
    pub message: String,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

impl RpcError {
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    /// Attach revert data (hex string) to the error
    pub fn with_data(mut self, data: impl Into<serde_json::Value>) -> Self {
        self.data = Some(data.into());
        self
    }

    pub fn is_user_rejection(&self) -> bool {
        self.code == USER_REJECTED_CODE
    }

    /// Revert reason decoded from `data`, falling back to the message.
    ///
    /// Wallets nest the revert payload differently: either `data` is the hex
    /// string itself or an object with a `data` field. An `Error(string)`
    /// payload yields the bare reason; panics and custom errors use alloy's
    /// generic rendering.
    pub fn reason(&self) -> String {
        let payload = match &self.data {
            Some(serde_json::Value::String(hex)) => Some(hex.as_str()),
            Some(serde_json::Value::Object(obj)) => obj.get("data").and_then(|v| v.as_str()),
            _ => None,
        };

        payload
            .and_then(|hex| alloy_primitives::hex::decode(hex).ok())
            .and_then(|bytes| {
                Revert::abi_decode(&bytes)
                    .map(|revert| revert.reason)
                    .ok()
                    .or_else(|| alloy_sol_types::decode_revert_reason(&bytes))
            })
            .unwrap_or_else(|| self.message.clone())
    }
}

/// Result type alias for chain operations
pub type ChainResult<T> = Result<T, ChainError>;
