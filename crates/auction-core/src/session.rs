//! Authenticated session state.

use std::sync::Arc;

use auction_client::{ApiClient, ClientConfig, TokenStore};
use auction_types::{RegisterPayload, RegisterResponse, SessionUser};

use crate::error::StateError;
use crate::storage::{FileTokenStore, Storage, USER_FILE};

/// Lifecycle of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Uninitialized,
    Loading,
    Anonymous,
    Authenticated,
}

/// Holds the current user, seeded from the persisted cache and replaced
/// wholesale by authoritative profile fetches.
///
/// The session wires a [`FileTokenStore`] into the client it is given, so
/// token refreshes performed inside the request core and explicit
/// login/logout all land in the same record.
pub struct AuthSession {
    client: ApiClient,
    storage: Storage,
    tokens: Arc<FileTokenStore>,
    user: Option<SessionUser>,
    state: SessionState,
}

impl AuthSession {
    /// Build a session over the given storage. The config's token store is
    /// replaced with the file-backed one sharing `storage`.
    pub fn new(config: ClientConfig, storage: Storage) -> Result<Self, StateError> {
        let tokens = Arc::new(FileTokenStore::new(storage.clone()));
        let config = config.with_token_store(tokens.clone());
        let client = ApiClient::new(config)?;
        Ok(Self { client, storage, tokens, user: None, state: SessionState::Uninitialized })
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn user(&self) -> Option<&SessionUser> {
        self.user.as_ref()
    }

    /// Credential presence, not profile presence: true as soon as an access
    /// token is stored, even before the profile fetch completes.
    pub fn is_authenticated(&self) -> bool {
        self.tokens.access_token().is_some()
    }

    /// Settle the session from persisted state: trust the cached user record
    /// provisionally, but force anonymous when no access token is stored.
    pub fn initialize(&mut self) {
        self.state = SessionState::Loading;
        if self.tokens.access_token().is_some() {
            self.user = self.storage.load(USER_FILE);
            self.state = SessionState::Authenticated;
        } else {
            self.user = None;
            self.state = SessionState::Anonymous;
        }
    }

    /// Exchange credentials for a token pair, seed a minimal user, then fetch
    /// the authoritative profile. On failure the session stays anonymous.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<(), StateError> {
        let pair = self.client.login(username, password).await?;
        self.tokens.set_tokens(&pair.access, &pair.refresh);
        self.set_user(SessionUser::minimal(username));
        self.state = SessionState::Authenticated;
        self.refresh_user().await;
        Ok(())
    }

    /// Clear credentials and the cached user. Always succeeds.
    pub fn logout(&mut self) {
        self.tokens.clear();
        self.user = None;
        self.storage.remove(USER_FILE);
        self.state = SessionState::Anonymous;
    }

    /// Fetch the authoritative profile and replace the session user
    /// wholesale. A no-op without an access token; fetch failures leave the
    /// current user untouched rather than clearing it.
    pub async fn refresh_user(&mut self) {
        if self.tokens.access_token().is_none() {
            return;
        }
        match self.client.me().await {
            Ok(me) => self.set_user(me),
            Err(e) => {
                tracing::debug!("profile refresh failed, keeping cached user: {}", e);
            },
        }
    }

    /// `POST /api/auth/register/` pass-through; does not log in.
    pub async fn register(&self, payload: &RegisterPayload) -> Result<RegisterResponse, StateError> {
        Ok(self.client.register(payload).await?)
    }

    /// Top up the balance. The response is the authoritative profile and
    /// replaces the session user; failures propagate to the caller.
    pub async fn top_up(&mut self, amount: f64) -> Result<f64, StateError> {
        let me = self.client.top_up_balance(amount).await?;
        let balance = me.balance;
        self.set_user(me);
        Ok(balance)
    }

    fn set_user(&mut self, user: SessionUser) {
        if let Err(e) = self.storage.save(USER_FILE, &user) {
            tracing::warn!("failed to persist session user: {}", e);
        }
        self.user = Some(user);
    }
}
