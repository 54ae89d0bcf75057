//! Auth and profile endpoints.

use serde_json::json;

use auction_types::{RegisterPayload, RegisterResponse, SessionUser, TokenPair, TopUpPayload};

use crate::client::ApiClient;
use crate::error::ApiError;

impl ApiClient {
    /// `POST /api/auth/register/`
    pub async fn register(&self, payload: &RegisterPayload) -> Result<RegisterResponse, ApiError> {
        self.post("/api/auth/register/", payload).await
    }

    /// `POST /api/token/` — exchange credentials for a token pair.
    pub async fn login(&self, username: &str, password: &str) -> Result<TokenPair, ApiError> {
        self.post("/api/token/", &json!({ "username": username, "password": password })).await
    }

    /// `POST /api/token/refresh/` — exchange a refresh token for a new pair.
    ///
    /// The request core also calls this endpoint internally on a 401; this
    /// wrapper exists for callers that manage refresh themselves.
    pub async fn refresh_token(&self, refresh: &str) -> Result<TokenPair, ApiError> {
        self.post("/api/token/refresh/", &json!({ "refresh": refresh })).await
    }

    /// `GET /api/auth/me/` — authoritative profile (auth required).
    pub async fn me(&self) -> Result<SessionUser, ApiError> {
        self.get("/api/auth/me/").await
    }

    /// `POST /api/auth/balance/top-up/` — returns the updated profile
    /// (auth required).
    pub async fn top_up_balance(&self, amount: f64) -> Result<SessionUser, ApiError> {
        self.post("/api/auth/balance/top-up/", &TopUpPayload { amount }).await
    }
}
