//! Stale-time query cache
//!
//! Keeps the last poll list and poll details with their fetch time so
//! revisiting a page within the freshness window skips the chain reads.
//! Callers pass the current time so tests control the clock.

use chrono::{DateTime, Duration, Utc};
use std::cell::RefCell;
use std::collections::HashMap;
use std::hash::Hash;

use crate::chain::{Poll, PollId};

/// Freshness windows for cached queries
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CachePolicy {
    pub list_stale: Duration,
    pub detail_stale: Duration,
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self {
            list_stale: Duration::seconds(60),
            detail_stale: Duration::seconds(300),
        }
    }
}

#[derive(Debug, Clone)]
struct Entry<V> {
    value: V,
    fetched_at: DateTime<Utc>,
}

/// Values keyed by query, fresh for a fixed window after they were stored
#[derive(Debug)]
pub struct QueryCache<K, V> {
    stale_after: Duration,
    entries: RefCell<HashMap<K, Entry<V>>>,
}

impl<K: Eq + Hash, V: Clone> QueryCache<K, V> {
    pub fn new(stale_after: Duration) -> Self {
        Self {
            stale_after,
            entries: RefCell::new(HashMap::new()),
        }
    }

    /// The cached value if it was stored less than the window ago
    pub fn get_fresh(&self, key: &K, now: DateTime<Utc>) -> Option<V> {
        let entries = self.entries.borrow();
        let entry = entries.get(key)?;
        if now - entry.fetched_at < self.stale_after {
            Some(entry.value.clone())
        } else {
            None
        }
    }

    pub fn insert(&self, key: K, value: V, now: DateTime<Utc>) {
        self.entries.borrow_mut().insert(
            key,
            Entry {
                value,
                fetched_at: now,
            },
        );
    }

    pub fn invalidate(&self, key: &K) {
        self.entries.borrow_mut().remove(key);
    }

    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }

    /// When the value under `key` was last stored
    pub fn fetched_at(&self, key: &K) -> Option<DateTime<Utc>> {
        self.entries.borrow().get(key).map(|e| e.fetched_at)
    }
}

/// The two poll queries the views issue
#[derive(Debug)]
pub struct PollQueries {
    list: QueryCache<(), Vec<Poll>>,
    details: QueryCache<PollId, Poll>,
}

impl PollQueries {
    pub fn new(policy: CachePolicy) -> Self {
        Self {
            list: QueryCache::new(policy.list_stale),
            details: QueryCache::new(policy.detail_stale),
        }
    }

    pub fn list(&self, now: DateTime<Utc>) -> Option<Vec<Poll>> {
        self.list.get_fresh(&(), now)
    }

    pub fn store_list(&self, polls: Vec<Poll>, now: DateTime<Utc>) {
        self.list.insert((), polls, now);
    }

    pub fn list_fetched_at(&self) -> Option<DateTime<Utc>> {
        self.list.fetched_at(&())
    }

    pub fn detail(&self, poll_id: PollId, now: DateTime<Utc>) -> Option<Poll> {
        self.details.get_fresh(&poll_id, now)
    }

    pub fn store_detail(&self, poll: Poll, now: DateTime<Utc>) {
        self.details.insert(poll.id, poll, now);
    }

    /// Drop a poll's detail and the list that summarizes it
    pub fn invalidate_poll(&self, poll_id: PollId) {
        self.details.invalidate(&poll_id);
        self.list.invalidate(&());
    }

    pub fn invalidate_list(&self) {
        self.list.invalidate(&());
    }

    /// Forget everything, e.g. after the wallet switched accounts
    pub fn clear(&self) {
        self.list.clear();
        self.details.clear();
    }
}

impl Default for PollQueries {
    fn default() -> Self {
        Self::new(CachePolicy::default())
    }
}
