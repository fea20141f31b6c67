//! Global Application State
//!
//! The wallet session, the query cache and reactive signals mirrored from
//! them, provided to every component through context.

use leptos::*;
use std::cell::Cell;
use std::rc::Rc;

use pollverse::chain::{AdapterConfig, ChainAdapter, WalletProvider};
use pollverse::config::Config;
use pollverse::session::{Notification, Notifier, Session, SessionSnapshot};
use pollverse::storage::VotedPolls;
use pollverse::views::PollQueries;

use super::storage::LocalStore;
use super::wallet::BrowserWallet;

/// A toast currently on screen
#[derive(Clone, Debug, PartialEq)]
pub struct ToastEntry {
    pub id: u64,
    pub notification: Notification,
}

/// Notifier that renders notifications as toasts (auto-cleared after timeout)
pub struct ToastNotifier {
    toasts: RwSignal<Vec<ToastEntry>>,
    next_id: Cell<u64>,
}

impl Notifier for ToastNotifier {
    fn notify(&self, notification: Notification) {
        let id = self.next_id.get();
        self.next_id.set(id + 1);

        let timeout_ms = if notification.is_destructive() { 5000 } else { 3000 };
        self.toasts
            .update(|toasts| toasts.push(ToastEntry { id, notification }));

        let toasts = self.toasts;
        gloo_timers::callback::Timeout::new(timeout_ms, move || {
            toasts.update(|toasts| toasts.retain(|t| t.id != id));
        })
        .forget();
    }
}

/// Global application state provided to all components
#[derive(Clone)]
pub struct GlobalState {
    pub session: Rc<Session>,
    /// Polls voted in from this browser
    pub voted: VotedPolls,
    pub queries: Rc<PollQueries>,
    pub notifier: Rc<ToastNotifier>,
    /// Session state, updated on every transition
    pub snapshot: RwSignal<SessionSnapshot>,
    pub toasts: RwSignal<Vec<ToastEntry>>,
    /// When the poll list was last fetched from the chain
    pub last_refresh: RwSignal<Option<i64>>,
    pub auto_connect: bool,
}

/// Build the session and provide global state to the component tree
pub fn provide_global_state(config: &Config) -> GlobalState {
    let toasts = create_rw_signal(Vec::new());
    let notifier = Rc::new(ToastNotifier {
        toasts,
        next_id: Cell::new(0),
    });

    let adapter_config = config.adapter_config().unwrap_or_else(|e| {
        tracing::error!(error = %e, "Falling back to the default contract");
        AdapterConfig::default()
    });
    let wallet = BrowserWallet::detect().map(|w| w as Rc<dyn WalletProvider>);
    let adapter = Rc::new(ChainAdapter::new(wallet, adapter_config));
    let session = Rc::new(Session::new(
        adapter,
        notifier.clone(),
        config.session.chain_change,
    ));

    let snapshot = create_rw_signal(session.snapshot());
    session.on_change(move |s| snapshot.set(s.clone()));

    let state = GlobalState {
        session,
        voted: VotedPolls::new(Rc::new(LocalStore), config.storage.voted_polls_key.clone()),
        queries: Rc::new(PollQueries::new(config.cache_policy())),
        notifier,
        snapshot,
        toasts,
        last_refresh: create_rw_signal(None),
        auto_connect: config.session.auto_connect,
    };

    provide_context(state.clone());
    state
}

impl GlobalState {
    pub fn notify(&self, notification: Notification) {
        self.notifier.notify(notification);
    }

    pub fn dismiss(&self, id: u64) {
        self.toasts.update(|toasts| toasts.retain(|t| t.id != id));
    }

    /// Start a user-initiated connection; failures are reported by the session
    pub fn connect(&self) {
        let session = Rc::clone(&self.session);
        spawn_local(async move {
            let _ = session.connect().await;
        });
    }

    pub fn disconnect(&self) {
        self.session.disconnect();
        self.queries.clear();
    }

    pub fn mark_refreshed(&self) {
        self.last_refresh
            .set(Some(chrono::Utc::now().timestamp_millis()));
    }
}
