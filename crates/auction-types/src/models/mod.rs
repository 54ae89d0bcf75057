//! Data models.

pub mod bet;
pub mod favorite;
pub mod lot;
pub mod token;
pub mod user;
