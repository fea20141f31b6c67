//! # PollVerse
//!
//! Client core of a decentralized polling application. Polls, options, vote
//! tallies and poll status live in a deployed contract; this crate reaches it
//! through an EIP-1193 browser wallet and turns the results into view state.
//!
//! ## Modules
//!
//! - [`chain`]: wallet provider seam, contract binding and the chain adapter
//! - [`session`]: connection state machine and user notifications
//! - [`views`]: list, detail and creation controllers plus the query cache
//! - [`storage`]: persisted client state (polls voted in)
//! - [`config`]: TOML configuration
//!
//! The crate is host-agnostic: the browser front-end supplies the wallet,
//! the key-value store and the notifier.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pollverse::chain::{ChainAdapter, WalletProvider};
//! use pollverse::config::Config;
//! use pollverse::session::{Notifier, Session};
//! use std::rc::Rc;
//!
//! async fn show_polls(
//!     wallet: Rc<dyn WalletProvider>,
//!     notifier: Rc<dyn Notifier>,
//! ) -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::default();
//!     let adapter = Rc::new(ChainAdapter::new(Some(wallet), config.adapter_config()?));
//!     let session = Session::new(adapter, notifier, config.session.chain_change);
//!
//!     session.connect().await?;
//!     for poll in pollverse::views::load_poll_list(&session).await? {
//!         println!("#{} {} ({} votes)", poll.id, poll.title, poll.total_votes());
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod chain;
pub mod config;
pub mod session;
pub mod storage;
pub mod views;

#[cfg(test)]
mod testing;

pub use chain::{ChainAdapter, ChainError, ChainResult, Poll, PollId};
pub use config::Config;
pub use session::Session;
