//! File-backed token store.

use auction_client::TokenStore;
use auction_types::TokenPair;

use super::{Storage, TOKENS_FILE};

/// [`TokenStore`] persisting the pair as one JSON record.
///
/// Both tokens are written in a single atomic save, so the stored record can
/// never hold an access token from one pair and a refresh token from
/// another. A corrupt or missing record reads as "no tokens".
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    storage: Storage,
}

impl FileTokenStore {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    fn load_pair(&self) -> Option<TokenPair> {
        self.storage.load(TOKENS_FILE)
    }
}

impl TokenStore for FileTokenStore {
    fn access_token(&self) -> Option<String> {
        self.load_pair().map(|p| p.access)
    }

    fn refresh_token(&self) -> Option<String> {
        self.load_pair().map(|p| p.refresh)
    }

    fn set_tokens(&self, access: &str, refresh: &str) {
        // Fire-and-forget per the persistence model; a failed write leaves
        // the previous record intact thanks to the atomic save.
        if let Err(e) = self.storage.save(TOKENS_FILE, &TokenPair::new(access, refresh)) {
            tracing::warn!("failed to persist token pair: {}", e);
        }
    }

    fn clear(&self) {
        self.storage.remove(TOKENS_FILE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> (tempfile::TempDir, FileTokenStore) {
        let dir = tempfile::tempdir().expect("tempdir");
        let storage = Storage::new(dir.path()).expect("storage should open");
        (dir, FileTokenStore::new(storage))
    }

    #[test]
    fn test_set_then_get_returns_exact_pair() {
        let (_guard, store) = temp_store();
        store.set_tokens("acc-1", "ref-1");
        assert_eq!(store.access_token().as_deref(), Some("acc-1"));
        assert_eq!(store.refresh_token().as_deref(), Some("ref-1"));
    }

    #[test]
    fn test_pair_survives_reopen() {
        let dir = tempfile::tempdir().expect("tempdir");
        {
            let storage = Storage::new(dir.path()).expect("storage");
            FileTokenStore::new(storage).set_tokens("a", "r");
        }
        let storage = Storage::new(dir.path()).expect("storage");
        let store = FileTokenStore::new(storage);
        assert_eq!(store.access_token().as_deref(), Some("a"));
    }

    #[test]
    fn test_corrupt_record_reads_as_no_tokens() {
        let (_guard, store) = temp_store();
        std::fs::write(store.storage.dir().join(TOKENS_FILE), "][").expect("write");
        assert_eq!(store.access_token(), None);
        assert_eq!(store.refresh_token(), None);
    }

    #[test]
    fn test_clear_removes_the_record() {
        let (_guard, store) = temp_store();
        store.set_tokens("a", "r");
        store.clear();
        assert_eq!(store.access_token(), None);
    }
}
