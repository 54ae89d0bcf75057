//! HTTP request core.

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;

use auction_types::TokenPair;

use crate::config::ClientConfig;
use crate::error::{ApiError, ErrorBody};

/// Path of the dedicated refresh endpoint; called without an auth header.
const REFRESH_PATH: &str = "/api/token/refresh/";

/// Phase of a single logical request. A 401 on the first send moves through
/// `Refreshing` into `Replay` at most once; the replay outcome is final, so
/// the request can never loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Sent,
    Replay,
}

/// Typed client for the auction REST API.
///
/// Cheap to clone; clones share the connection pool and configuration.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    config: ClientConfig,
}

impl ApiClient {
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Join a path onto the configured base URL. Absolute URLs pass through.
    fn endpoint(&self, path: &str) -> String {
        if path.starts_with("http") {
            return path.to_string();
        }
        let base = self.config.base_url.resolve();
        let base = base.trim_end_matches('/');
        if path.starts_with('/') {
            format!("{}{}", base, path)
        } else {
            format!("{}/{}", base, path)
        }
    }

    fn stored_refresh_token(&self) -> Option<String> {
        self.config.token_store.as_ref().and_then(|s| s.refresh_token())
    }

    async fn send_once<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<Response, ApiError>
    where
        B: Serialize + ?Sized,
    {
        let mut request = self
            .http
            .request(method, self.endpoint(path))
            .header(CONTENT_TYPE, "application/json");
        if let Some(token) = self.config.token_store.as_ref().and_then(|s| s.access_token()) {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }
        Ok(request.send().await?)
    }

    /// Send with the bounded 401 handling: sent -> unauthorized -> refreshing
    /// -> replay, one transition at most. A refresh failure surfaces the
    /// original 401; a 401 on the replay is returned as-is.
    async fn send<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<Response, ApiError>
    where
        B: Serialize + ?Sized,
    {
        let mut phase = Phase::Sent;
        loop {
            let response = self.send_once(method.clone(), path, body).await?;
            if phase == Phase::Sent && response.status() == StatusCode::UNAUTHORIZED {
                if let Some(refresh) = self.stored_refresh_token() {
                    tracing::debug!("401 on {} {}, refreshing token", method, path);
                    if self.try_refresh(&refresh).await {
                        phase = Phase::Replay;
                        continue;
                    }
                }
            }
            return into_result(response).await;
        }
    }

    /// Call the refresh endpoint directly, bypassing the auth header, and
    /// persist the fresh pair on success. Failures are reported to the
    /// caller as `false` so the original 401 can propagate.
    async fn try_refresh(&self, refresh: &str) -> bool {
        let response = self
            .http
            .post(self.endpoint(REFRESH_PATH))
            .header(CONTENT_TYPE, "application/json")
            .json(&json!({ "refresh": refresh }))
            .send()
            .await;

        let response = match response {
            Ok(r) => r,
            Err(e) => {
                tracing::debug!("token refresh request failed: {}", e);
                return false;
            },
        };
        if !response.status().is_success() {
            tracing::debug!("token refresh rejected: {}", response.status());
            return false;
        }

        let pair: TokenPair = match response.json().await {
            Ok(pair) => pair,
            Err(e) => {
                tracing::debug!("token refresh returned invalid body: {}", e);
                return false;
            },
        };

        if let Some(store) = &self.config.token_store {
            store.set_tokens(&pair.access, &pair.refresh);
        }
        if let Some(callback) = &self.config.on_token_refresh {
            callback(&pair.access);
        }
        true
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.send::<()>(Method::GET, path, None).await?;
        decode(response).await
    }

    pub(crate) async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.send(Method::POST, path, Some(body)).await?;
        decode(response).await
    }

    pub(crate) async fn post_no_body<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<T, ApiError> {
        let response = self.send::<()>(Method::POST, path, None).await?;
        decode(response).await
    }

    pub(crate) async fn patch<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.send(Method::PATCH, path, Some(body)).await?;
        decode(response).await
    }

    /// DELETE; accepts 204 (or any 2xx) and discards the body.
    pub(crate) async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let _response = self.send::<()>(Method::DELETE, path, None).await?;
        Ok(())
    }
}

/// Map a response to the API error contract: non-2xx becomes
/// [`ApiError::Status`] with the body JSON-parsed when possible.
async fn into_result(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let text = response.text().await.unwrap_or_default();
    Err(ApiError::Status { status: status.as_u16(), body: ErrorBody::from_text(text) })
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    response
        .json()
        .await
        .map_err(|e| ApiError::InvalidResponse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> ApiClient {
        let config = ClientConfig { base_url: base.into(), ..ClientConfig::default() };
        ApiClient::new(config).expect("client should build")
    }

    #[test]
    fn test_endpoint_joins_base_and_path() {
        let c = client("http://api.example.com/");
        assert_eq!(c.endpoint("/api/lots/"), "http://api.example.com/api/lots/");
        assert_eq!(c.endpoint("api/lots/"), "http://api.example.com/api/lots/");
    }

    #[test]
    fn test_endpoint_passes_absolute_urls_through() {
        let c = client("http://api.example.com");
        assert_eq!(c.endpoint("https://other.example.com/x"), "https://other.example.com/x");
    }
}
