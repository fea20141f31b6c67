//! Application pages

pub mod create;
pub mod index;
pub mod poll;

pub use create::CreatePollPage;
pub use index::IndexPage;
pub use poll::PollPage;
