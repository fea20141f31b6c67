//! User-visible notifications
//!
//! The session and view controllers report outcomes through a `Notifier`;
//! the UI renders them as toasts.

use crate::chain::{short_address, ChainError};
use alloy_primitives::Address;

/// Visual weight of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationVariant {
    Default,
    Destructive,
}

/// A toast-style message
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub variant: NotificationVariant,
}

impl Notification {
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: NotificationVariant::Default,
        }
    }

    pub fn destructive(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: NotificationVariant::Destructive,
        }
    }

    pub fn is_destructive(&self) -> bool {
        self.variant == NotificationVariant::Destructive
    }

    pub(crate) fn wallet_connected(account: &Address) -> Self {
        Self::info(
            "Wallet Connected",
            format!("Connected to {}", short_address(account)),
        )
    }

    pub(crate) fn wallet_disconnected() -> Self {
        Self::info("Wallet Disconnected", "Your wallet has been disconnected")
    }

    pub(crate) fn connection_error(err: &ChainError) -> Self {
        Self::destructive("Connection Error", err.user_message())
    }

    pub(crate) fn transaction_sent(description: &str) -> Self {
        Self::info("Transaction Sent", description)
    }

    pub(crate) fn error(err: &ChainError) -> Self {
        Self::destructive("Error", err.user_message())
    }
}

/// Sink for user-visible notifications
pub trait Notifier {
    fn notify(&self, notification: Notification);
}
