//! UI Components
//!
//! Reusable Leptos components shared by the pages.

pub mod header;
pub mod loading;
pub mod poll_card;
pub mod toast;
pub mod wallet_required;

pub use header::Header;
pub use loading::{CardSkeleton, DetailSkeleton};
pub use poll_card::PollCard;
pub use toast::Toast;
pub use wallet_required::WalletRequired;
