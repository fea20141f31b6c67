//! State Management
//!
//! Global application state and the browser implementations of the core
//! seams (wallet, storage, notifications).

pub mod global;
pub mod storage;
pub mod wallet;

pub use global::{provide_global_state, GlobalState, ToastEntry};
