//! Favorites endpoints.

use serde_json::json;

use auction_types::FavoriteAdded;

use crate::client::ApiClient;
use crate::error::ApiError;

impl ApiClient {
    /// `GET /api/favorites/` — favorite lot IDs (auth required).
    pub async fn list_favorites(&self) -> Result<Vec<i64>, ApiError> {
        self.get("/api/favorites/").await
    }

    /// `POST /api/favorites/` (auth required)
    pub async fn add_favorite(&self, lot_id: i64) -> Result<FavoriteAdded, ApiError> {
        self.post("/api/favorites/", &json!({ "lot_id": lot_id })).await
    }

    /// `DELETE /api/favorites/:id/` (auth required)
    pub async fn remove_favorite(&self, lot_id: i64) -> Result<(), ApiError> {
        self.delete(&format!("/api/favorites/{}/", lot_id)).await
    }
}
