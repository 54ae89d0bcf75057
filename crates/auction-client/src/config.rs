//! Client configuration.

use std::fmt;
use std::sync::Arc;

use crate::token_store::TokenStore;

/// Default base URL for local development.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Base URL for the API: a fixed string, or a closure evaluated on every
/// request for deployments where the origin is only known at call time.
#[derive(Clone)]
pub enum BaseUrl {
    Static(String),
    Dynamic(Arc<dyn Fn() -> String + Send + Sync>),
}

impl BaseUrl {
    /// Resolve to a concrete URL string.
    pub fn resolve(&self) -> String {
        match self {
            Self::Static(url) => url.clone(),
            Self::Dynamic(f) => f(),
        }
    }
}

impl From<String> for BaseUrl {
    fn from(url: String) -> Self {
        Self::Static(url)
    }
}

impl From<&str> for BaseUrl {
    fn from(url: &str) -> Self {
        Self::Static(url.to_string())
    }
}

impl fmt::Debug for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static(url) => f.debug_tuple("Static").field(url).finish(),
            Self::Dynamic(_) => f.write_str("Dynamic(..)"),
        }
    }
}

/// Configuration for [`crate::ApiClient`].
#[derive(Clone)]
pub struct ClientConfig {
    pub base_url: BaseUrl,
    /// Token store consulted for the bearer token and updated on refresh.
    /// With no store configured the client only performs anonymous calls.
    pub token_store: Option<Arc<dyn TokenStore>>,
    /// Invoked with the new access token after a successful refresh.
    pub on_token_refresh: Option<Arc<dyn Fn(&str) + Send + Sync>>,
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: BaseUrl::Static(DEFAULT_BASE_URL.to_string()),
            token_store: None,
            on_token_refresh: None,
            timeout_secs: 30,
        }
    }
}

impl ClientConfig {
    /// Configuration with the base URL taken from `AUCTION_API_URL`,
    /// falling back to [`DEFAULT_BASE_URL`].
    pub fn from_env() -> Self {
        let base_url = std::env::var("AUCTION_API_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self { base_url: BaseUrl::Static(base_url), ..Self::default() }
    }

    /// Replace the token store.
    pub fn with_token_store(mut self, store: Arc<dyn TokenStore>) -> Self {
        self.token_store = Some(store);
        self
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("token_store", &self.token_store.is_some())
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}
