//! Rust SDK for the auction marketplace REST API.
//!
//! [`ApiClient`] is the request core: it resolves the base URL, attaches the
//! bearer token from the configured [`TokenStore`], and on a 401 performs a
//! bounded refresh-and-replay before surfacing the error. The `api` modules
//! add one typed method per REST operation and nothing else.

mod client;
mod config;
mod error;
mod token_store;

mod api;

pub use client::ApiClient;
pub use config::{BaseUrl, ClientConfig};
pub use error::{ApiError, ErrorBody};
pub use token_store::{MemoryTokenStore, TokenStore};
