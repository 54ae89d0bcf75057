//! Persistent stores and client-side state for the auction marketplace.
//!
//! [`Storage`] owns a data directory of single-record JSON files.
//! [`AuthSession`] and [`Favorites`] are explicitly-owned state objects
//! wired over an [`auction_client::ApiClient`]: construct them at session
//! start, pass them by reference, drop them at teardown. Nothing here is a
//! process-global.

mod bidding;
mod error;
mod favorites;
mod session;
mod storage;

pub use bidding::{place_bid, BidError};
pub use error::StateError;
pub use favorites::Favorites;
pub use session::{AuthSession, SessionState};
pub use storage::{FileTokenStore, Storage};
