//! Poll data types
//!
//! Application-side shapes of the contract's poll records.

use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

use super::error::{ChainError, ChainResult};

/// Contract-assigned poll identifier
pub type PollId = u64;

/// A poll as seen by the front-end
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Poll {
    pub id: PollId,
    pub title: String,
    pub active: bool,
    pub option_names: Vec<String>,
    pub option_votes: Vec<u64>,
    #[serde(default)]
    pub creator: Option<Address>,
}

impl Poll {
    /// Lightweight record from the poll listing.
    ///
    /// Status and options are unknown until the detail read, so the record
    /// reports `active = false` and carries no options.
    pub fn summary(id: PollId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            active: false,
            option_names: Vec::new(),
            option_votes: Vec::new(),
            creator: None,
        }
    }

    /// Whether the detail read has populated options
    pub fn is_hydrated(&self) -> bool {
        !self.option_names.is_empty()
    }

    pub fn total_votes(&self) -> u64 {
        self.option_votes
            .iter()
            .fold(0u64, |total, votes| total.saturating_add(*votes))
    }

    /// Vote count for an option, zero when the index is out of range
    pub fn votes_for(&self, index: usize) -> u64 {
        self.option_votes.get(index).copied().unwrap_or(0)
    }

    /// Share of the vote for an option in percent
    pub fn percentage(&self, index: usize) -> f64 {
        let total = self.total_votes();
        if total == 0 {
            return 0.0;
        }
        self.votes_for(index) as f64 / total as f64 * 100.0
    }

    /// Whether `account` created this poll
    pub fn is_created_by(&self, account: Option<Address>) -> bool {
        matches!((self.creator, account), (Some(creator), Some(account)) if creator == account)
    }
}

/// Narrow a contract integer to `u64`.
pub fn narrow(value: U256, what: &str) -> ChainResult<u64> {
    u64::try_from(value).map_err(|_| {
        ChainError::ContractCallFailed(format!("{} {} does not fit in 64 bits", what, value))
    })
}

/// Shorten an address for display, e.g. `0x1234...abcd`
pub fn short_address(address: &Address) -> String {
    let full = address.to_string();
    format!("{}...{}", &full[..6], &full[full.len() - 4..])
}
