//! Bet endpoints.

use auction_types::{Bet, CreateBetPayload};

use crate::client::ApiClient;
use crate::error::ApiError;

impl ApiClient {
    /// `GET /api/bets/` — the current user's bets (auth required).
    pub async fn list_bets(&self) -> Result<Vec<Bet>, ApiError> {
        self.get("/api/bets/").await
    }

    /// `POST /api/bets/` (auth required)
    pub async fn create_bet(&self, payload: &CreateBetPayload) -> Result<Bet, ApiError> {
        self.post("/api/bets/", payload).await
    }
}
