//! Chain Access
//!
//! Everything that talks to the wallet and the poll contract:
//!
//! - **wallet**: EIP-1193 provider seam and change notifications
//! - **abi**: `IPollContract` interface declared with `sol!`
//! - **contract**: typed reads and writes over the provider
//! - **transaction**: submitted transactions and receipt polling
//! - **adapter**: connection lifecycle and normalized poll records
//! - **types** / **error**: shared data and error types
//!
//! # Flow
//!
//! ```text
//! ChainAdapter::get_poll(id)
//!   → PollContract::get_poll        (eth_call getPoll)
//!   → PollContract::get_poll_creator (eth_call getPollCreator)
//!   → narrow U256 → u64 → Poll
//! ```

pub mod abi;
pub mod adapter;
pub mod contract;
pub mod error;
pub mod transaction;
pub mod types;
pub mod wallet;

pub use adapter::{AdapterConfig, ChainAdapter, DEFAULT_CONTRACT_ADDRESS};
pub use contract::PollContract;
pub use error::{ChainError, ChainResult, RpcError};
pub use transaction::{PendingTransaction, TransactionReceipt};
pub use types::{short_address, Poll, PollId};
pub use wallet::{ListenerRegistry, WalletEvent, WalletListener, WalletProvider, WalletSubscription};
