//! Shared data models for the auction marketplace API.
//!
//! Pure serde types only; no I/O. Everything here mirrors the wire shapes
//! of the backend REST service.

pub mod models;

mod serde_util;

pub use models::bet::{Bet, CreateBetPayload};
pub use models::favorite::FavoriteAdded;
pub use models::lot::{CreateLotPayload, Lot, LotBet, UpdateLotPayload};
pub use models::token::TokenPair;
pub use models::user::{RegisterPayload, RegisterResponse, Role, SessionUser, TopUpPayload};
