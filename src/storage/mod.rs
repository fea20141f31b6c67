//! Persisted Client State
//!
//! Small key-value persistence for advisory browser state:
//!
//! - **KeyValueStore**: string store seam (`localStorage` in the browser)
//! - **MemoryStore**: in-memory store for tests and non-browser hosts
//! - **voted**: ids of polls this browser has voted in
//! - **error**: Error types

pub mod error;
pub mod voted;

use std::cell::RefCell;
use std::collections::HashMap;

pub use error::{StoreError, StoreResult};
pub use voted::VotedPolls;

/// String key-value persistence
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: &str) -> StoreResult<()>;
}

/// Non-persistent store
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
