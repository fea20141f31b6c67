//! View Controllers
//!
//! Framework-independent logic behind the three pages:
//!
//! - **list**: hydrated poll listing, search and status filter
//! - **detail**: tallies, vote and end-poll flows
//! - **create**: poll draft, validation and submission
//! - **cache**: stale-time cache for the list and detail queries

pub mod cache;
pub mod create;
pub mod detail;
pub mod list;

pub use cache::{CachePolicy, PollQueries, QueryCache};
pub use create::{submit_poll, DraftError, PollDraft, ValidPoll, ValidationErrors, MAX_OPTIONS, MIN_OPTIONS};
pub use detail::{tally, OptionTally, PollDetailController, VoteAvailability};
pub use list::{load_poll_list, status_label, CardPreview, EmptyState, ListQuery, PollFilter};
