//! Lot (auction item) models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::bet::Bet;
use crate::serde_util::{lenient_f64, lenient_opt_f64};

/// An auction item as returned by `GET /api/lots/` and `GET /api/lots/:id/`.
///
/// Read-mostly: after a successful bid only `current_price` and `bets` are
/// updated locally, ahead of the next full fetch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Lot {
    pub id: i64,
    pub name: String,
    #[serde(deserialize_with = "lenient_f64")]
    pub starting_price: f64,
    /// Highest accepted bid; absent until the first bid lands
    #[serde(default, deserialize_with = "lenient_opt_f64")]
    pub current_price: Option<f64>,
    pub end_time: DateTime<Utc>,
    /// Server-computed seconds until close, when the endpoint provides it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_left: Option<f64>,
    #[serde(default)]
    pub images_urls: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winner_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seller_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bets: Option<Vec<LotBet>>,
}

impl Lot {
    /// The smallest value the next bid must reach: the current price, or the
    /// starting price while no bid has been accepted yet.
    pub fn minimum_bid(&self) -> f64 {
        self.current_price.unwrap_or(self.starting_price)
    }

    /// Record an accepted bid locally, pending the next full fetch.
    pub fn apply_bet(&mut self, bet: &Bet) {
        self.current_price = Some(bet.value);
        self.bets.get_or_insert_with(Vec::new).push(LotBet::from(bet));
    }
}

/// Bet as nested inside a lot (carries no `lot_id`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LotBet {
    pub id: i64,
    #[serde(deserialize_with = "lenient_f64")]
    pub value: f64,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
}

impl From<&Bet> for LotBet {
    fn from(bet: &Bet) -> Self {
        Self { id: bet.id, value: bet.value, user_id: bet.user_id, created_at: bet.created_at }
    }
}

/// Request body for `POST /api/lots/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateLotPayload {
    pub name: String,
    pub starting_price: f64,
    pub end_time: DateTime<Utc>,
    pub images_urls: Vec<String>,
}

/// Partial body for `PATCH /api/lots/:id/`; absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateLotPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub starting_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images_urls: Option<Vec<String>>,
}
