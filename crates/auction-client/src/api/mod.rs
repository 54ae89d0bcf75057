//! Typed endpoint wrappers, one module per API domain.
//!
//! These methods shape payloads and paths; errors are whatever the request
//! core signals.

mod auth;
mod bets;
mod favorites;
mod lots;
