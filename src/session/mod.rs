//! Wallet Session
//!
//! Connection state machine over the chain adapter:
//!
//! ```text
//! Disconnected ──connect/restore──▶ Connecting ──ok──▶ Connected(account)
//!       ▲                              │                    │
//!       └──────────── failure ─────────┘                    │
//!       └──── disconnect / accounts [] ─────────────────────┘
//! ```
//!
//! Failures from every operation are reported through a [`Notifier`] and then
//! returned unchanged.

pub mod manager;
pub mod notify;
pub mod state;

pub use manager::Session;
pub use notify::{Notification, NotificationVariant, Notifier};
pub use state::{ChainChangePolicy, SessionSnapshot, SessionState, WalletEventOutcome};
