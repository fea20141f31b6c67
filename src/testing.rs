//! Test doubles shared by the unit tests.
//!
//! `MockWallet` answers the EIP-1193 methods the crate uses and hosts an
//! in-memory poll contract that decodes real ABI calldata.

use alloy_primitives::{address, hex, Address, TxHash, U256};
use alloy_sol_types::{Revert, SolError, SolInterface, SolValue};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::rc::Rc;
use std::time::Duration;

use crate::chain::abi::IPollContract::IPollContractCalls;
use crate::chain::{
    AdapterConfig, ListenerRegistry, RpcError, WalletEvent, WalletListener, WalletProvider,
    WalletSubscription, DEFAULT_CONTRACT_ADDRESS,
};
use crate::session::{Notification, Notifier};

pub const ALICE: Address = address!("00000000000000000000000000000000000000a1");
pub const BOB: Address = address!("00000000000000000000000000000000000000b0");
pub const CONTRACT: Address = DEFAULT_CONTRACT_ADDRESS;

pub fn adapter_config() -> AdapterConfig {
    AdapterConfig {
        contract_address: CONTRACT,
        receipt_poll_interval: Duration::from_millis(1),
    }
}

struct MockPoll {
    creator: Address,
    title: String,
    active: bool,
    options: Vec<String>,
    votes: Vec<u64>,
}

/// In-memory wallet plus poll contract
#[derive(Default)]
pub struct MockWallet {
    accounts: RefCell<Vec<Address>>,
    authorized: Cell<bool>,
    reject_connect: Cell<bool>,
    reject_transactions: Cell<bool>,
    polls: RefCell<Vec<MockPoll>>,
    broken_polls: RefCell<HashSet<u64>>,
    receipts: RefCell<HashMap<TxHash, Value>>,
    pending_polls: Cell<u32>,
    tx_counter: Cell<u64>,
    calls: RefCell<Vec<String>>,
    listeners: ListenerRegistry,
}

impl MockWallet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_accounts(accounts: Vec<Address>) -> Self {
        let wallet = Self::new();
        *wallet.accounts.borrow_mut() = accounts;
        wallet
    }

    /// Mark the site as already authorized, as after an earlier visit
    pub fn authorize(&self) {
        self.authorized.set(true);
    }

    pub fn reject_connect(&self, reject: bool) {
        self.reject_connect.set(reject);
    }

    pub fn reject_transactions(&self, reject: bool) {
        self.reject_transactions.set(reject);
    }

    /// Number of receipt lookups answered with `null` before the receipt shows up
    pub fn set_pending_polls(&self, polls: u32) {
        self.pending_polls.set(polls);
    }

    pub fn seed_poll(
        &self,
        creator: Address,
        title: &str,
        options: &[&str],
        active: bool,
        votes: &[u64],
    ) -> u64 {
        let mut polls = self.polls.borrow_mut();
        polls.push(MockPoll {
            creator,
            title: title.to_string(),
            active,
            options: options.iter().map(|o| o.to_string()).collect(),
            votes: votes.to_vec(),
        });
        (polls.len() - 1) as u64
    }

    /// Make `getPoll` revert for this id
    pub fn break_poll(&self, id: u64) {
        self.broken_polls.borrow_mut().insert(id);
    }

    pub fn poll_count(&self) -> usize {
        self.polls.borrow().len()
    }

    pub fn call_count(&self, method: &str) -> usize {
        self.calls.borrow().iter().filter(|m| *m == method).count()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Store a receipt for a fresh hash and return the hash
    pub fn queue_receipt(&self, success: bool) -> TxHash {
        let hash = self.next_hash();
        self.store_receipt(hash, success);
        hash
    }

    /// Change the exposed accounts and notify listeners
    pub fn set_accounts(&self, accounts: Vec<Address>) {
        *self.accounts.borrow_mut() = accounts.clone();
        self.listeners.emit(&WalletEvent::AccountsChanged(accounts));
    }

    pub fn switch_chain(&self, chain_id: &str) {
        self.listeners
            .emit(&WalletEvent::ChainChanged(chain_id.to_string()));
    }

    fn next_hash(&self) -> TxHash {
        let n = self.tx_counter.get() + 1;
        self.tx_counter.set(n);
        TxHash::left_padding_from(&n.to_be_bytes())
    }

    fn store_receipt(&self, hash: TxHash, success: bool) {
        let receipt = json!({
            "transactionHash": hash,
            "blockNumber": format!("{:#x}", 100 + self.tx_counter.get()),
            "status": if success { "0x1" } else { "0x0" },
        });
        self.receipts.borrow_mut().insert(hash, receipt);
    }

    fn revert(reason: &str) -> RpcError {
        let payload = SolError::abi_encode(&Revert {
            reason: reason.to_string(),
        });
        RpcError::new(3, "execution reverted").with_data(hex::encode_prefixed(payload))
    }

    fn decode_call(params: &Value) -> Result<(Option<Address>, IPollContractCalls), RpcError> {
        let tx = &params[0];
        let data = tx["data"]
            .as_str()
            .ok_or_else(|| RpcError::new(-32602, "missing data"))?;
        let bytes = hex::decode(data).map_err(|e| RpcError::new(-32602, e.to_string()))?;
        let call = IPollContractCalls::abi_decode(&bytes)
            .map_err(|e| RpcError::new(-32602, e.to_string()))?;
        let from = tx["from"].as_str().and_then(|s| s.parse().ok());
        Ok((from, call))
    }

    fn poll_index(&self, id: U256) -> Result<usize, RpcError> {
        u64::try_from(id)
            .ok()
            .map(|id| id as usize)
            .filter(|idx| *idx < self.polls.borrow().len())
            .ok_or_else(|| Self::revert("Poll does not exist"))
    }

    fn handle_call(&self, params: &Value) -> Result<Value, RpcError> {
        let (_, call) = Self::decode_call(params)?;
        let polls = self.polls.borrow();

        let encoded = match call {
            IPollContractCalls::getAllPolls(_) => {
                let ids: Vec<U256> = (0..polls.len() as u64).map(U256::from).collect();
                let titles: Vec<String> = polls.iter().map(|p| p.title.clone()).collect();
                (ids, titles).abi_encode_params()
            }
            IPollContractCalls::getPoll(c) => {
                let idx = self.poll_index(c.pollId)?;
                if self.broken_polls.borrow().contains(&(idx as u64)) {
                    return Err(RpcError::new(-32603, "Internal JSON-RPC error."));
                }
                let poll = &polls[idx];
                let votes: Vec<U256> = poll.votes.iter().map(|v| U256::from(*v)).collect();
                (poll.title.clone(), poll.active, poll.options.clone(), votes).abi_encode_params()
            }
            IPollContractCalls::getPollCreator(c) => {
                let idx = self.poll_index(c.pollId)?;
                polls[idx].creator.abi_encode()
            }
            _ => return Err(RpcError::new(-32602, "not a view function")),
        };

        Ok(json!(hex::encode_prefixed(encoded)))
    }

    fn handle_send(&self, params: &Value) -> Result<Value, RpcError> {
        if self.reject_transactions.get() {
            return Err(RpcError::new(4001, "User denied transaction signature."));
        }

        let (from, call) = Self::decode_call(params)?;
        let sender = from.ok_or_else(|| RpcError::new(-32602, "missing from"))?;

        match call {
            IPollContractCalls::createPoll(c) => {
                let votes = vec![0; c.options.len()];
                self.polls.borrow_mut().push(MockPoll {
                    creator: sender,
                    title: c.title,
                    active: true,
                    options: c.options,
                    votes,
                });
            }
            IPollContractCalls::vote(c) => {
                let idx = self.poll_index(c.pollId)?;
                let mut polls = self.polls.borrow_mut();
                let poll = &mut polls[idx];
                if !poll.active {
                    return Err(Self::revert("Poll is not active"));
                }
                let option = u64::try_from(c.optionIndex)
                    .ok()
                    .map(|o| o as usize)
                    .filter(|o| *o < poll.votes.len())
                    .ok_or_else(|| Self::revert("Invalid option"))?;
                poll.votes[option] += 1;
            }
            IPollContractCalls::endPoll(c) => {
                let idx = self.poll_index(c.pollId)?;
                let mut polls = self.polls.borrow_mut();
                let poll = &mut polls[idx];
                if poll.creator != sender {
                    return Err(Self::revert("Only the creator can end the poll"));
                }
                if !poll.active {
                    return Err(Self::revert("Poll is not active"));
                }
                poll.active = false;
            }
            _ => return Err(RpcError::new(-32602, "not a transaction")),
        }

        let hash = self.next_hash();
        self.store_receipt(hash, true);
        Ok(json!(hash))
    }

    fn handle_receipt(&self, params: &Value) -> Result<Value, RpcError> {
        let pending = self.pending_polls.get();
        if pending > 0 {
            self.pending_polls.set(pending - 1);
            return Ok(Value::Null);
        }

        let hash: TxHash = serde_json::from_value(params[0].clone())
            .map_err(|e| RpcError::new(-32602, e.to_string()))?;
        Ok(self
            .receipts
            .borrow()
            .get(&hash)
            .cloned()
            .unwrap_or(Value::Null))
    }
}

#[async_trait(?Send)]
impl WalletProvider for MockWallet {
    async fn request(&self, method: &str, params: Value) -> Result<Value, RpcError> {
        self.calls.borrow_mut().push(method.to_string());

        match method {
            "eth_requestAccounts" => {
                if self.reject_connect.get() {
                    return Err(RpcError::new(4001, "User rejected the request."));
                }
                self.authorized.set(true);
                Ok(json!(*self.accounts.borrow()))
            }
            "eth_accounts" => {
                if self.authorized.get() {
                    Ok(json!(*self.accounts.borrow()))
                } else {
                    Ok(json!([]))
                }
            }
            "eth_call" => self.handle_call(&params),
            "eth_sendTransaction" => self.handle_send(&params),
            "eth_getTransactionReceipt" => self.handle_receipt(&params),
            other => Err(RpcError::new(-32601, format!("method {} not supported", other))),
        }
    }

    fn subscribe(&self, listener: WalletListener) -> WalletSubscription {
        self.listeners.add(listener)
    }

    async fn delay(&self, _duration: Duration) {}
}

/// Notifier that keeps every notification for inspection
#[derive(Default)]
pub struct RecordingNotifier {
    seen: RefCell<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn titles(&self) -> Vec<String> {
        self.seen.borrow().iter().map(|n| n.title.clone()).collect()
    }

    pub fn last(&self) -> Option<Notification> {
        self.seen.borrow().last().cloned()
    }

    pub fn clear(&self) {
        self.seen.borrow_mut().clear();
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.seen.borrow_mut().push(notification);
    }
}

/// Shared handles for tests that need a session
pub struct Fixture {
    pub wallet: Rc<MockWallet>,
    pub notifier: Rc<RecordingNotifier>,
}

impl Fixture {
    pub fn new(accounts: Vec<Address>) -> Self {
        Self {
            wallet: Rc::new(MockWallet::with_accounts(accounts)),
            notifier: Rc::new(RecordingNotifier::new()),
        }
    }
}
