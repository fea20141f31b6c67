//! Wallet Session
//!
//! Tracks the connection state on top of the chain adapter, reacts to wallet
//! notifications and re-exposes the adapter operations with user-visible
//! error reporting.

use alloy_primitives::Address;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

use super::notify::{Notification, Notifier};
use super::state::{ChainChangePolicy, SessionSnapshot, SessionState, WalletEventOutcome};
use crate::chain::{
    ChainAdapter, ChainResult, PendingTransaction, Poll, PollId, WalletEvent,
    WalletSubscription,
};

type SessionObserver = Rc<dyn Fn(&SessionSnapshot)>;

/// The application's wallet session
pub struct Session {
    adapter: Rc<ChainAdapter>,
    notifier: Rc<dyn Notifier>,
    chain_change: ChainChangePolicy,
    snapshot: RefCell<SessionSnapshot>,
    observers: RefCell<Vec<SessionObserver>>,
}

impl Session {
    pub fn new(
        adapter: Rc<ChainAdapter>,
        notifier: Rc<dyn Notifier>,
        chain_change: ChainChangePolicy,
    ) -> Self {
        Self {
            adapter,
            notifier,
            chain_change,
            snapshot: RefCell::new(SessionSnapshot::default()),
            observers: RefCell::new(Vec::new()),
        }
    }

    pub fn adapter(&self) -> &Rc<ChainAdapter> {
        &self.adapter
    }

    pub fn notifier(&self) -> &Rc<dyn Notifier> {
        &self.notifier
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.snapshot.borrow().clone()
    }

    pub fn state(&self) -> SessionState {
        self.snapshot.borrow().state
    }

    pub fn account(&self) -> Option<Address> {
        self.snapshot.borrow().account()
    }

    pub fn is_connected(&self) -> bool {
        self.snapshot.borrow().is_connected()
    }

    /// Register an observer called after every state change
    pub fn on_change(&self, observer: impl Fn(&SessionSnapshot) + 'static) {
        self.observers.borrow_mut().push(Rc::new(observer));
    }

    fn transition(&self, state: SessionState, error: Option<String>) {
        let snapshot = {
            let mut current = self.snapshot.borrow_mut();
            current.state = state;
            current.error = error;
            current.clone()
        };

        tracing::debug!(state = ?snapshot.state, "Session state changed");

        let observers: Vec<SessionObserver> = self.observers.borrow().iter().cloned().collect();
        for observer in observers {
            observer(&snapshot);
        }
    }

    /// Ask the wallet for access and connect
    pub async fn connect(&self) -> ChainResult<Address> {
        self.transition(SessionState::Connecting, None);

        match self.adapter.connect().await {
            Ok(account) => {
                self.transition(SessionState::Connected(account), None);
                self.notifier.notify(Notification::wallet_connected(&account));
                Ok(account)
            }
            Err(err) => {
                tracing::warn!(error = %err, "Wallet connection failed");
                self.transition(SessionState::Disconnected, Some(err.user_message()));
                self.notifier.notify(Notification::connection_error(&err));
                Err(err)
            }
        }
    }

    /// End the session and drop every adapter handle
    pub fn disconnect(&self) {
        self.adapter.disconnect();
        self.transition(SessionState::Disconnected, None);
        self.notifier.notify(Notification::wallet_disconnected());
    }

    /// Reconnect silently when the wallet already authorized this site.
    ///
    /// Returns the connected account, or `None` when there is no wallet, no
    /// authorized account, or the check failed.
    pub async fn restore(&self) -> Option<Address> {
        if !self.adapter.has_wallet() {
            return None;
        }

        match self.adapter.authorized_accounts().await {
            Ok(accounts) if !accounts.is_empty() => self.connect().await.ok(),
            Ok(_) => None,
            Err(err) => {
                tracing::warn!(error = %err, "Failed to check existing connection");
                None
            }
        }
    }

    /// Apply a wallet notification
    pub fn handle_wallet_event(&self, event: &WalletEvent) -> WalletEventOutcome {
        match event {
            WalletEvent::AccountsChanged(accounts) => {
                let current = self.state();
                match (accounts.first(), current) {
                    (None, SessionState::Connected(_)) => {
                        tracing::info!("Wallet reported no accounts");
                        self.disconnect();
                        WalletEventOutcome::Disconnected
                    }
                    (Some(next), SessionState::Connected(account)) if *next != account => {
                        self.adapter.switch_account(*next);
                        self.transition(SessionState::Connected(*next), None);
                        WalletEventOutcome::AccountSwitched(*next)
                    }
                    _ => WalletEventOutcome::Ignored,
                }
            }
            WalletEvent::ChainChanged(chain_id) => {
                tracing::info!(chain_id = %chain_id, policy = ?self.chain_change, "Wallet switched networks");
                match self.chain_change {
                    ChainChangePolicy::Reload => WalletEventOutcome::ReloadRequired,
                    ChainChangePolicy::Reconnect => {
                        self.adapter.disconnect();
                        self.transition(SessionState::Disconnected, None);
                        WalletEventOutcome::ReconnectRequired
                    }
                }
            }
        }
    }

    /// Subscribe to wallet notifications.
    ///
    /// Every event is applied to the session, then `on_outcome` receives the
    /// result so the host can reload or restore. The subscription lasts until
    /// the returned handle is dropped. `None` when no wallet is injected.
    pub fn watch_wallet(
        self: &Rc<Self>,
        on_outcome: impl Fn(WalletEventOutcome) + 'static,
    ) -> Option<WalletSubscription> {
        let provider = self.adapter.provider()?;
        let session: Weak<Session> = Rc::downgrade(self);

        Some(provider.subscribe(Rc::new(move |event: &WalletEvent| {
            if let Some(session) = session.upgrade() {
                let outcome = session.handle_wallet_event(event);
                if outcome != WalletEventOutcome::Ignored {
                    on_outcome(outcome);
                }
            }
        })))
    }

    fn report<T>(&self, result: ChainResult<T>) -> ChainResult<T> {
        if let Err(err) = &result {
            self.notifier.notify(Notification::error(err));
        }
        result
    }

    fn report_submission(
        &self,
        result: ChainResult<PendingTransaction>,
        description: &str,
    ) -> ChainResult<PendingTransaction> {
        if result.is_ok() {
            self.notifier.notify(Notification::transaction_sent(description));
        }
        self.report(result)
    }

    pub async fn list_polls(&self) -> ChainResult<Vec<Poll>> {
        self.report(self.adapter.list_polls().await)
    }

    pub async fn get_poll(&self, poll_id: PollId) -> ChainResult<Poll> {
        self.report(self.adapter.get_poll(poll_id).await)
    }

    pub async fn create_poll(&self, title: &str, options: &[String]) -> ChainResult<PendingTransaction> {
        let result = self.adapter.create_poll(title, options).await;
        self.report_submission(result, "Creating poll. Please wait for confirmation.")
    }

    pub async fn vote(&self, poll_id: PollId, option_index: usize) -> ChainResult<PendingTransaction> {
        let result = self.adapter.vote(poll_id, option_index).await;
        self.report_submission(result, "Submitting vote. Please wait for confirmation.")
    }

    pub async fn end_poll(&self, poll_id: PollId) -> ChainResult<PendingTransaction> {
        let result = self.adapter.end_poll(poll_id).await;
        self.report_submission(result, "Ending poll. Please wait for confirmation.")
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("snapshot", &*self.snapshot.borrow())
            .field("chain_change", &self.chain_change)
            .finish()
    }
}
