//! Transaction handles
//!
//! A submitted transaction is identified by its hash; confirmation is a
//! separate awaitable step that polls the wallet for a receipt.

use alloy_primitives::{TxHash, U64};
use serde::Deserialize;
use std::rc::Rc;
use std::time::Duration;

use super::error::{ChainError, ChainResult};
use super::wallet::WalletProvider;

/// A transaction accepted by the wallet but not yet confirmed
pub struct PendingTransaction {
    hash: TxHash,
    provider: Rc<dyn WalletProvider>,
    poll_interval: Duration,
}

/// Outcome of a mined transaction
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionReceipt {
    pub transaction_hash: TxHash,
    pub block_number: Option<u64>,
    pub success: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawReceipt {
    transaction_hash: TxHash,
    #[serde(default)]
    block_number: Option<U64>,
    #[serde(default)]
    status: Option<U64>,
}

impl From<RawReceipt> for TransactionReceipt {
    fn from(raw: RawReceipt) -> Self {
        Self {
            transaction_hash: raw.transaction_hash,
            block_number: raw.block_number.map(|n| n.to::<u64>()),
            // Pre-Byzantium receipts have no status; treat them as successful
            success: raw.status.map_or(true, |status| status == U64::from(1)),
        }
    }
}

impl PendingTransaction {
    pub fn new(hash: TxHash, provider: Rc<dyn WalletProvider>, poll_interval: Duration) -> Self {
        Self {
            hash,
            provider,
            poll_interval,
        }
    }

    pub fn hash(&self) -> TxHash {
        self.hash
    }

    /// Wait until the transaction is mined.
    ///
    /// Polls `eth_getTransactionReceipt` until a receipt appears. A reverted
    /// transaction resolves to `ContractCallFailed`.
    pub async fn confirm(self) -> ChainResult<TransactionReceipt> {
        let params = serde_json::json!([self.hash]);

        loop {
            let value = self
                .provider
                .request("eth_getTransactionReceipt", params.clone())
                .await
                .map_err(ChainError::from_contract_call)?;

            if !value.is_null() {
                let raw: RawReceipt = serde_json::from_value(value).map_err(|e| {
                    ChainError::ContractCallFailed(format!("malformed receipt: {}", e))
                })?;
                let receipt = TransactionReceipt::from(raw);

                if !receipt.success {
                    tracing::warn!(tx = %self.hash, "Transaction reverted");
                    return Err(ChainError::ContractCallFailed(
                        "transaction reverted".to_string(),
                    ));
                }

                tracing::debug!(tx = %self.hash, block = ?receipt.block_number, "Transaction confirmed");
                return Ok(receipt);
            }

            self.provider.delay(self.poll_interval).await;
        }
    }
}

impl std::fmt::Debug for PendingTransaction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingTransaction")
            .field("hash", &self.hash)
            .finish()
    }
}
