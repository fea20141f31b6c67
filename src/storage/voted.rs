//! Voted-poll ledger
//!
//! Remembers which polls were voted in from this browser so the detail view
//! can hide the voting controls. Advisory only: the contract is the authority
//! and clearing browser storage simply re-enables the controls.

use std::rc::Rc;

use super::{KeyValueStore, StoreResult};
use crate::chain::PollId;

/// JSON array of poll ids stored under one key
#[derive(Clone)]
pub struct VotedPolls {
    store: Rc<dyn KeyValueStore>,
    key: String,
}

impl VotedPolls {
    pub fn new(store: Rc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// All recorded ids. Missing or malformed content reads as empty.
    pub fn ids(&self) -> Vec<PollId> {
        let Some(raw) = self.store.get(&self.key) else {
            return Vec::new();
        };

        match serde_json::from_str(&raw) {
            Ok(ids) => ids,
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "Ignoring malformed voted polls entry");
                Vec::new()
            }
        }
    }

    pub fn contains(&self, poll_id: PollId) -> bool {
        self.ids().contains(&poll_id)
    }

    /// Add an id; recording the same id twice keeps one entry
    pub fn record(&self, poll_id: PollId) -> StoreResult<()> {
        let mut ids = self.ids();
        if ids.contains(&poll_id) {
            return Ok(());
        }
        ids.push(poll_id);

        let raw = serde_json::to_string(&ids)?;
        self.store.set(&self.key, &raw)
    }
}

impl std::fmt::Debug for VotedPolls {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VotedPolls").field("key", &self.key).finish()
    }
}
