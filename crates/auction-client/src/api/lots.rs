//! Lot endpoints.

use url::form_urlencoded;

use auction_types::{CreateLotPayload, Lot, UpdateLotPayload};

use crate::client::ApiClient;
use crate::error::ApiError;

impl ApiClient {
    /// `GET /api/lots/` with an optional `?search=` query.
    pub async fn list_lots(&self, search: Option<&str>) -> Result<Vec<Lot>, ApiError> {
        let path = match search {
            Some(query) if !query.is_empty() => {
                let encoded: String =
                    form_urlencoded::Serializer::new(String::new())
                        .append_pair("search", query)
                        .finish();
                format!("/api/lots/?{}", encoded)
            },
            _ => "/api/lots/".to_string(),
        };
        self.get(&path).await
    }

    /// `GET /api/lots/:id/`
    pub async fn get_lot(&self, id: i64) -> Result<Lot, ApiError> {
        self.get(&format!("/api/lots/{}/", id)).await
    }

    /// `POST /api/lots/` (auth required)
    pub async fn create_lot(&self, payload: &CreateLotPayload) -> Result<Lot, ApiError> {
        self.post("/api/lots/", payload).await
    }

    /// `PATCH /api/lots/:id/` — partial update (auth required)
    pub async fn update_lot(&self, id: i64, payload: &UpdateLotPayload) -> Result<Lot, ApiError> {
        self.patch(&format!("/api/lots/{}/", id), payload).await
    }

    /// `POST /api/lots/:id/finish/` — close the auction early (auth required)
    pub async fn finish_lot(&self, id: i64) -> Result<Lot, ApiError> {
        self.post_no_body(&format!("/api/lots/{}/finish/", id)).await
    }

    /// `DELETE /api/lots/:id/` (auth required)
    pub async fn delete_lot(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("/api/lots/{}/", id)).await
    }
}
