//! Token storage abstraction.

use std::sync::RwLock;

use auction_types::TokenPair;

/// Process-wide holder for the bearer credential pair.
///
/// Implementations persist the pair as one record: `set_tokens` always
/// receives both halves, so access and refresh tokens cannot desynchronize.
/// Reads must degrade to `None` on missing or malformed data, never panic
/// or error.
pub trait TokenStore: Send + Sync {
    fn access_token(&self) -> Option<String>;
    fn refresh_token(&self) -> Option<String>;
    fn set_tokens(&self, access: &str, refresh: &str);
    fn clear(&self);
}

/// In-memory token store for tests and embedders that manage persistence
/// themselves.
#[derive(Default)]
pub struct MemoryTokenStore {
    pair: RwLock<Option<TokenPair>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with an existing pair.
    pub fn with_tokens(access: &str, refresh: &str) -> Self {
        let store = Self::new();
        store.set_tokens(access, refresh);
        store
    }
}

impl TokenStore for MemoryTokenStore {
    fn access_token(&self) -> Option<String> {
        self.pair.read().ok()?.as_ref().map(|p| p.access.clone())
    }

    fn refresh_token(&self) -> Option<String> {
        self.pair.read().ok()?.as_ref().map(|p| p.refresh.clone())
    }

    fn set_tokens(&self, access: &str, refresh: &str) {
        if let Ok(mut guard) = self.pair.write() {
            *guard = Some(TokenPair::new(access, refresh));
        }
    }

    fn clear(&self) {
        if let Ok(mut guard) = self.pair.write() {
            *guard = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_then_get_returns_exact_pair() {
        let store = MemoryTokenStore::new();
        store.set_tokens("acc-1", "ref-1");
        assert_eq!(store.access_token().as_deref(), Some("acc-1"));
        assert_eq!(store.refresh_token().as_deref(), Some("ref-1"));
    }

    #[test]
    fn test_clear_removes_both_tokens() {
        let store = MemoryTokenStore::with_tokens("a", "r");
        store.clear();
        assert_eq!(store.access_token(), None);
        assert_eq!(store.refresh_token(), None);
    }
}
