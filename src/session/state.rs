//! Session state

use alloy_primitives::Address;
use serde::Deserialize;

/// Wallet connection state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Disconnected,
    Connecting,
    Connected(Address),
}

/// Point-in-time view of the session handed to observers
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SessionSnapshot {
    pub state: SessionState,
    /// Message of the last failed connection attempt
    pub error: Option<String>,
}

impl SessionSnapshot {
    pub fn is_connected(&self) -> bool {
        matches!(self.state, SessionState::Connected(_))
    }

    pub fn is_loading(&self) -> bool {
        self.state == SessionState::Connecting
    }

    pub fn account(&self) -> Option<Address> {
        match self.state {
            SessionState::Connected(account) => Some(account),
            _ => None,
        }
    }
}

/// What to do when the wallet switches networks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChainChangePolicy {
    /// Reload the hosting page; no in-memory state survives
    #[default]
    Reload,
    /// Drop the connection in place and restore it from the wallet
    Reconnect,
}

/// Result of applying a wallet notification to the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalletEventOutcome {
    /// Nothing changed
    Ignored,
    /// The connected account changed
    AccountSwitched(Address),
    /// The wallet exposed no accounts and the session ended
    Disconnected,
    /// The host must reload the page
    ReloadRequired,
    /// The session was reset; the host should call `Session::restore`
    ReconnectRequired,
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    #[test]
    fn test_snapshot_flags() {
        let account = address!("00000000000000000000000000000000000000a1");

        let snapshot = SessionSnapshot::default();
        assert!(!snapshot.is_connected());
        assert!(snapshot.account().is_none());

        let snapshot = SessionSnapshot {
            state: SessionState::Connecting,
            error: None,
        };
        assert!(snapshot.is_loading());

        let snapshot = SessionSnapshot {
            state: SessionState::Connected(account),
            error: None,
        };
        assert!(snapshot.is_connected());
        assert_eq!(snapshot.account(), Some(account));
    }

    #[test]
    fn test_chain_change_policy_parses() {
        #[derive(Deserialize)]
        struct Wrapper {
            policy: ChainChangePolicy,
        }

        let parsed: Wrapper = toml::from_str(r#"policy = "reconnect""#).unwrap();
        assert_eq!(parsed.policy, ChainChangePolicy::Reconnect);
        assert_eq!(ChainChangePolicy::default(), ChainChangePolicy::Reload);
    }
}
