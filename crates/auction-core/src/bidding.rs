//! Bid placement with the client-side minimum guard.

use thiserror::Error;

use auction_client::{ApiClient, ApiError};
use auction_types::{Bet, CreateBetPayload, Lot};

/// Errors from [`place_bid`].
#[derive(Error, Debug)]
pub enum BidError {
    /// The offered value is below the lot's minimum; no request was made.
    #[error("minimum bid is {minimum}")]
    BelowMinimum { minimum: f64 },

    /// The server rejected the bid.
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Submit a bid against a lot.
///
/// Values below [`Lot::minimum_bid`] are rejected before any network call.
/// On success the lot is updated in place (`current_price` raised, bet
/// appended) ahead of the next full fetch.
pub async fn place_bid(client: &ApiClient, lot: &mut Lot, value: f64) -> Result<Bet, BidError> {
    let minimum = lot.minimum_bid();
    if !value.is_finite() || value < minimum {
        return Err(BidError::BelowMinimum { minimum });
    }

    let bet = client.create_bet(&CreateBetPayload { lot_id: lot.id, value }).await?;
    lot.apply_bet(&bet);
    Ok(bet)
}
