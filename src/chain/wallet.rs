//! Wallet Provider
//!
//! The EIP-1193 boundary: a JSON-RPC `request` method plus change
//! notifications for the account set and the selected network.

use alloy_primitives::Address;
use async_trait::async_trait;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use super::error::RpcError;

/// Notifications pushed by the wallet
#[derive(Debug, Clone, PartialEq)]
pub enum WalletEvent {
    /// The exposed account set changed; empty means the wallet locked or revoked access
    AccountsChanged(Vec<Address>),
    /// The wallet switched networks (hex chain id)
    ChainChanged(String),
}

/// Callback invoked for every wallet notification
pub type WalletListener = Rc<dyn Fn(&WalletEvent)>;

/// Browser wallet capability
///
/// Values crossing this boundary are single-threaded in the browser, so the
/// trait is `?Send`.
#[async_trait(?Send)]
pub trait WalletProvider {
    /// Issue a JSON-RPC request (`eth_requestAccounts`, `eth_call`, ...)
    async fn request(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> Result<serde_json::Value, RpcError>;

    /// Register for wallet notifications until the handle is dropped
    fn subscribe(&self, listener: WalletListener) -> WalletSubscription;

    /// Suspend for `duration` using the host's timer
    async fn delay(&self, duration: Duration);
}

/// Cancellation handle for a wallet subscription.
///
/// The listener stays registered until `unsubscribe` is called or the
/// handle is dropped.
#[must_use = "dropping the subscription removes the listener"]
pub struct WalletSubscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl WalletSubscription {
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// A handle with nothing to cancel
    pub fn detached() -> Self {
        Self { cancel: None }
    }

    pub fn unsubscribe(mut self) {
        self.cancel_now();
    }

    fn cancel_now(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for WalletSubscription {
    fn drop(&mut self) {
        self.cancel_now();
    }
}

impl std::fmt::Debug for WalletSubscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletSubscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}

/// Fan-out of wallet notifications to registered listeners
#[derive(Clone, Default)]
pub struct ListenerRegistry {
    listeners: Rc<RefCell<Vec<(u64, WalletListener)>>>,
    next_id: Rc<Cell<u64>>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener; the returned handle removes it
    pub fn add(&self, listener: WalletListener) -> WalletSubscription {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.listeners.borrow_mut().push((id, listener));

        let listeners = Rc::downgrade(&self.listeners);
        WalletSubscription::new(move || {
            if let Some(listeners) = listeners.upgrade() {
                listeners.borrow_mut().retain(|(existing, _)| *existing != id);
            }
        })
    }

    /// Deliver an event to every listener
    pub fn emit(&self, event: &WalletEvent) {
        // Snapshot so listeners may subscribe or unsubscribe while handling
        let snapshot: Vec<WalletListener> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();

        for listener in snapshot {
            listener(event);
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Parse the account list returned by `eth_accounts` / `eth_requestAccounts`
pub fn parse_accounts(value: &serde_json::Value) -> Result<Vec<Address>, String> {
    let entries = value
        .as_array()
        .ok_or_else(|| format!("expected an account list, got {}", value))?;

    entries
        .iter()
        .map(|entry| {
            entry
                .as_str()
                .ok_or_else(|| format!("invalid account entry {}", entry))?
                .parse::<Address>()
                .map_err(|e| format!("invalid account address: {}", e))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    #[test]
    fn test_registry_delivers_until_dropped() {
        let registry = ListenerRegistry::new();
        let seen = Rc::new(Cell::new(0));

        let counter = Rc::clone(&seen);
        let subscription = registry.add(Rc::new(move |_| counter.set(counter.get() + 1)));

        registry.emit(&WalletEvent::ChainChanged("0x1".to_string()));
        assert_eq!(seen.get(), 1);

        drop(subscription);
        assert!(registry.is_empty());

        registry.emit(&WalletEvent::ChainChanged("0x5".to_string()));
        assert_eq!(seen.get(), 1);
    }

    #[test]
    fn test_unsubscribe_only_removes_own_listener() {
        let registry = ListenerRegistry::new();
        let first = registry.add(Rc::new(|_| {}));
        let _second = registry.add(Rc::new(|_| {}));

        first.unsubscribe();
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_parse_accounts() {
        let value = serde_json::json!(["0x00000000000000000000000000000000000000aa"]);
        let accounts = parse_accounts(&value).unwrap();
        assert_eq!(
            accounts,
            vec![address!("00000000000000000000000000000000000000aa")]
        );

        assert!(parse_accounts(&serde_json::json!("nope")).is_err());
        assert!(parse_accounts(&serde_json::json!(["not-an-address"])).is_err());
    }
}
