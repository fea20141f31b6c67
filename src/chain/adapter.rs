//! Chain Adapter
//!
//! Single point of contact with the wallet provider and the poll contract.
//! The provider, signer, contract handle and account are held together as one
//! connection and are dropped together on disconnect.

use alloy_primitives::{address, Address, TxHash, U256};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use super::contract::PollContract;
use super::error::{ChainError, ChainResult};
use super::transaction::PendingTransaction;
use super::types::{narrow, Poll, PollId};
use super::wallet::{parse_accounts, WalletProvider};

/// The public PollVerse deployment
pub const DEFAULT_CONTRACT_ADDRESS: Address = address!("BD22783c0905fa1c829baf4f6D047e823D4bFC6A");

/// Settings the adapter needs from the application config
#[derive(Debug, Clone)]
pub struct AdapterConfig {
    /// Deployed poll contract
    pub contract_address: Address,
    /// Delay between receipt polls while confirming a transaction
    pub receipt_poll_interval: Duration,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            contract_address: DEFAULT_CONTRACT_ADDRESS,
            receipt_poll_interval: Duration::from_secs(1),
        }
    }
}

/// Handles established by a successful `connect`; the contract carries the
/// provider and the signer
struct Connection {
    account: Address,
    contract: PollContract,
}

/// Typed access to the poll contract through the browser wallet
pub struct ChainAdapter {
    provider: Option<Rc<dyn WalletProvider>>,
    config: AdapterConfig,
    connection: RefCell<Option<Connection>>,
}

impl ChainAdapter {
    /// Create an adapter; `provider` is `None` when no wallet is injected
    pub fn new(provider: Option<Rc<dyn WalletProvider>>, config: AdapterConfig) -> Self {
        Self {
            provider,
            config,
            connection: RefCell::new(None),
        }
    }

    /// The injected wallet, if any
    pub fn provider(&self) -> Option<Rc<dyn WalletProvider>> {
        self.provider.clone()
    }

    pub fn has_wallet(&self) -> bool {
        self.provider.is_some()
    }

    pub fn is_connected(&self) -> bool {
        self.connection.borrow().is_some()
    }

    /// Account of the current connection
    pub fn account(&self) -> Option<Address> {
        self.connection.borrow().as_ref().map(|c| c.account)
    }

    fn require_provider(&self) -> ChainResult<Rc<dyn WalletProvider>> {
        self.provider.clone().ok_or(ChainError::WalletUnavailable)
    }

    fn contract(&self) -> ChainResult<PollContract> {
        self.connection
            .borrow()
            .as_ref()
            .map(|c| c.contract.clone())
            .ok_or(ChainError::ContractUnavailable)
    }

    /// Request account access and bind the contract to the first account
    pub async fn connect(&self) -> ChainResult<Address> {
        let provider = self.require_provider()?;

        let value = provider
            .request("eth_requestAccounts", serde_json::json!([]))
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Error connecting to wallet");
                ChainError::from_wallet_request(e)
            })?;

        let accounts = parse_accounts(&value).map_err(ChainError::Wallet)?;
        let account = accounts.first().copied().ok_or(ChainError::UserRejected)?;

        let contract = PollContract::new(provider, self.config.contract_address, account);
        *self.connection.borrow_mut() = Some(Connection { account, contract });

        tracing::info!(account = %account, "Wallet connected");
        Ok(account)
    }

    /// Drop every held handle. Idempotent.
    pub fn disconnect(&self) {
        if self.connection.borrow_mut().take().is_some() {
            tracing::info!("Wallet disconnected");
        }
    }

    /// Accounts already authorized for this site, without prompting
    pub async fn authorized_accounts(&self) -> ChainResult<Vec<Address>> {
        let provider = self.require_provider()?;
        let value = provider
            .request("eth_accounts", serde_json::json!([]))
            .await
            .map_err(ChainError::from_wallet_request)?;
        parse_accounts(&value).map_err(ChainError::Wallet)
    }

    /// Rebind the signer after the wallet switched accounts
    pub fn switch_account(&self, account: Address) {
        if let Some(connection) = self.connection.borrow_mut().as_mut() {
            connection.contract = connection.contract.with_signer(account);
            connection.account = account;
            tracing::info!(account = %account, "Signer switched");
        }
    }

    /// Poll ids and titles; status and options are placeholders
    pub async fn list_polls(&self) -> ChainResult<Vec<Poll>> {
        let contract = self.contract()?;

        let listing = contract.get_all_polls().await.map_err(|e| {
            tracing::error!(error = %e, "Error getting all polls");
            e
        })?;

        if listing.pollIds.len() != listing.titles.len() {
            return Err(ChainError::ContractCallFailed(format!(
                "getAllPolls returned {} ids but {} titles",
                listing.pollIds.len(),
                listing.titles.len()
            )));
        }

        listing
            .pollIds
            .into_iter()
            .zip(listing.titles)
            .map(|(id, title)| Ok(Poll::summary(narrow(id, "poll id")?, title)))
            .collect()
    }

    /// Full poll record, including its creator
    pub async fn get_poll(&self, poll_id: PollId) -> ChainResult<Poll> {
        let contract = self.contract()?;
        Self::read_poll(&contract, poll_id).await.map_err(|e| {
            tracing::error!(poll_id, error = %e, "Error getting poll");
            e
        })
    }

    async fn read_poll(contract: &PollContract, poll_id: PollId) -> ChainResult<Poll> {
        let id = U256::from(poll_id);
        let detail = contract.get_poll(id).await?;
        // The poll tuple does not carry the creator; it is a second read
        let creator = contract.get_poll_creator(id).await?;

        if detail.optionNames.len() != detail.optionVotes.len() {
            return Err(ChainError::ContractCallFailed(format!(
                "poll {} has {} options but {} vote counts",
                poll_id,
                detail.optionNames.len(),
                detail.optionVotes.len()
            )));
        }

        let option_votes = detail
            .optionVotes
            .into_iter()
            .map(|votes| narrow(votes, "vote count"))
            .collect::<ChainResult<Vec<u64>>>()?;

        Ok(Poll {
            id: poll_id,
            title: detail.title,
            active: detail.active,
            option_names: detail.optionNames,
            option_votes,
            creator: Some(creator),
        })
    }

    pub async fn create_poll(&self, title: &str, options: &[String]) -> ChainResult<PendingTransaction> {
        let contract = self.contract()?;
        let hash = contract.create_poll(title, options).await.map_err(|e| {
            tracing::error!(error = %e, "Error creating poll");
            e
        })?;
        self.pending(hash)
    }

    pub async fn vote(&self, poll_id: PollId, option_index: usize) -> ChainResult<PendingTransaction> {
        let contract = self.contract()?;
        let hash = contract
            .vote(U256::from(poll_id), U256::from(option_index))
            .await
            .map_err(|e| {
                tracing::error!(poll_id, option_index, error = %e, "Error voting in poll");
                e
            })?;
        self.pending(hash)
    }

    pub async fn end_poll(&self, poll_id: PollId) -> ChainResult<PendingTransaction> {
        let contract = self.contract()?;
        let hash = contract.end_poll(U256::from(poll_id)).await.map_err(|e| {
            tracing::error!(poll_id, error = %e, "Error ending poll");
            e
        })?;
        self.pending(hash)
    }

    fn pending(&self, hash: TxHash) -> ChainResult<PendingTransaction> {
        let provider = self.require_provider()?;
        tracing::info!(tx = %hash, "Transaction submitted");
        Ok(PendingTransaction::new(
            hash,
            provider,
            self.config.receipt_poll_interval,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{adapter_config, MockWallet, ALICE, BOB};
    use std::collections::HashSet;

    fn adapter_with(wallet: &Rc<MockWallet>) -> ChainAdapter {
        ChainAdapter::new(Some(wallet.clone()), adapter_config())
    }

    #[tokio::test]
    async fn test_connect_without_wallet() {
        let adapter = ChainAdapter::new(None, adapter_config());
        assert_eq!(adapter.connect().await, Err(ChainError::WalletUnavailable));
        assert!(!adapter.is_connected());
    }

    #[tokio::test]
    async fn test_connect_rejected() {
        let wallet = Rc::new(MockWallet::with_accounts(vec![ALICE]));
        wallet.reject_connect(true);
        let adapter = adapter_with(&wallet);

        assert_eq!(adapter.connect().await, Err(ChainError::UserRejected));
        assert!(adapter.account().is_none());
    }

    #[tokio::test]
    async fn test_connect_and_disconnect() {
        let wallet = Rc::new(MockWallet::with_accounts(vec![ALICE, BOB]));
        let adapter = adapter_with(&wallet);

        assert_eq!(adapter.connect().await.unwrap(), ALICE);
        assert!(adapter.is_connected());

        adapter.disconnect();
        adapter.disconnect();
        assert!(!adapter.is_connected());
        assert!(adapter.account().is_none());
        assert_eq!(adapter.list_polls().await, Err(ChainError::ContractUnavailable));
    }

    #[tokio::test]
    async fn test_operations_before_connect() {
        let wallet = Rc::new(MockWallet::with_accounts(vec![ALICE]));
        let adapter = adapter_with(&wallet);

        assert_eq!(adapter.list_polls().await, Err(ChainError::ContractUnavailable));
        assert_eq!(adapter.get_poll(0).await, Err(ChainError::ContractUnavailable));
        assert!(matches!(
            adapter.vote(0, 0).await,
            Err(ChainError::ContractUnavailable)
        ));
        assert_eq!(wallet.call_count("eth_call"), 0);
    }

    #[tokio::test]
    async fn test_list_polls_returns_summaries() {
        let wallet = Rc::new(MockWallet::with_accounts(vec![ALICE]));
        wallet.seed_poll(ALICE, "Lunch?", &["Pizza", "Sushi"], true, &[2, 2]);
        wallet.seed_poll(BOB, "Standup time?", &["9:00", "9:30", "10:00"], false, &[1, 4, 0]);
        let adapter = adapter_with(&wallet);
        adapter.connect().await.unwrap();

        let polls = adapter.list_polls().await.unwrap();

        assert_eq!(polls.len(), 2);
        let ids: HashSet<_> = polls.iter().map(|p| p.id).collect();
        assert_eq!(ids.len(), polls.len());
        for poll in &polls {
            assert!(!poll.active);
            assert!(poll.option_names.is_empty());
            assert!(poll.option_votes.is_empty());
        }
        assert_eq!(polls[1].title, "Standup time?");
    }

    #[tokio::test]
    async fn test_get_poll_merges_creator() {
        let wallet = Rc::new(MockWallet::with_accounts(vec![ALICE]));
        for _ in 0..5 {
            wallet.seed_poll(BOB, "filler", &["a", "b"], false, &[0, 0]);
        }
        wallet.seed_poll(BOB, "Best language?", &["Rust", "Go"], true, &[3, 1]);
        let adapter = adapter_with(&wallet);
        adapter.connect().await.unwrap();

        let poll = adapter.get_poll(5).await.unwrap();

        assert_eq!(poll.title, "Best language?");
        assert!(poll.active);
        assert_eq!(poll.option_names, vec!["Rust", "Go"]);
        assert_eq!(poll.option_votes, vec![3, 1]);
        assert_eq!(poll.option_names.len(), poll.option_votes.len());
        assert_eq!(poll.creator, Some(BOB));
        assert_eq!(poll.total_votes(), 4);
        assert_eq!(poll.percentage(0), 75.0);
    }

    #[tokio::test]
    async fn test_vote_round_trip() {
        let wallet = Rc::new(MockWallet::with_accounts(vec![ALICE]));
        wallet.seed_poll(BOB, "Tabs or spaces?", &["Tabs", "Spaces"], true, &[4, 6]);
        let adapter = adapter_with(&wallet);
        adapter.connect().await.unwrap();

        let before = adapter.get_poll(0).await.unwrap();
        let receipt = adapter.vote(0, 0).await.unwrap().confirm().await.unwrap();
        let after = adapter.get_poll(0).await.unwrap();

        assert!(receipt.success);
        assert_eq!(after.option_votes[0], before.option_votes[0] + 1);
        assert_eq!(after.option_votes[1], before.option_votes[1]);
        assert_eq!(after.total_votes(), before.total_votes() + 1);
    }

    #[tokio::test]
    async fn test_end_poll_revert_is_surfaced() {
        let wallet = Rc::new(MockWallet::with_accounts(vec![ALICE]));
        wallet.seed_poll(BOB, "Not mine", &["a", "b"], true, &[0, 0]);
        let adapter = adapter_with(&wallet);
        adapter.connect().await.unwrap();

        let err = adapter.end_poll(0).await.unwrap_err();
        assert_eq!(
            err,
            ChainError::ContractCallFailed("Only the creator can end the poll".to_string())
        );
    }

    #[tokio::test]
    async fn test_switch_account_rebinds_signer() {
        let wallet = Rc::new(MockWallet::with_accounts(vec![ALICE]));
        wallet.seed_poll(BOB, "Bob's poll", &["a", "b"], true, &[0, 0]);
        let adapter = adapter_with(&wallet);
        adapter.connect().await.unwrap();

        adapter.switch_account(BOB);
        assert_eq!(adapter.account(), Some(BOB));

        adapter.end_poll(0).await.unwrap().confirm().await.unwrap();
        assert!(!adapter.get_poll(0).await.unwrap().active);
    }

    #[tokio::test]
    async fn test_create_poll_then_list() {
        let wallet = Rc::new(MockWallet::with_accounts(vec![ALICE]));
        let adapter = adapter_with(&wallet);
        adapter.connect().await.unwrap();

        let options = vec!["Red".to_string(), "Blue".to_string()];
        adapter
            .create_poll("Favourite colour?", &options)
            .await
            .unwrap()
            .confirm()
            .await
            .unwrap();

        let poll = adapter.get_poll(0).await.unwrap();
        assert_eq!(poll.title, "Favourite colour?");
        assert_eq!(poll.creator, Some(ALICE));
        assert_eq!(poll.option_votes, vec![0, 0]);
    }
}
