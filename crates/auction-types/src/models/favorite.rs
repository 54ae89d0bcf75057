//! Favorites wire models.
//!
//! `GET /api/favorites/` returns a bare array of lot IDs, so only the add
//! acknowledgement needs a struct of its own.

use serde::{Deserialize, Serialize};

/// Response from `POST /api/favorites/`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FavoriteAdded {
    pub lot_id: i64,
    pub added: bool,
}
