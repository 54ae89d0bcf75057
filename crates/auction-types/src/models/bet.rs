//! Bet (bid) models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::serde_util::lenient_f64;

/// A monetary offer against a lot, as returned by `GET /api/bets/` and
/// `POST /api/bets/`. Immutable once recorded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Bet {
    pub id: i64,
    #[serde(deserialize_with = "lenient_f64")]
    pub value: f64,
    pub user_id: i64,
    pub lot_id: i64,
    pub created_at: DateTime<Utc>,
}

/// Request body for `POST /api/bets/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBetPayload {
    pub lot_id: i64,
    pub value: f64,
}
