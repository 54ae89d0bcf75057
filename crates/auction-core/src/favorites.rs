//! Favorites state with local/remote reconciliation.

use std::collections::HashSet;

use auction_client::ApiClient;

use crate::error::StateError;
use crate::storage::{Storage, FAVORITES_FILE};

/// Set of favorite lot IDs, keyed on the session's authentication flag.
///
/// Anonymous: the persisted local list is the source of truth; mutations
/// apply to the in-memory set and are persisted immediately. Authenticated:
/// the server list is the source of truth; the local set is only mutated
/// after the server call succeeds, so a failed add/remove leaves the state
/// consistent with the server and no rollback is ever needed. The toggle
/// contract is identical in both modes.
pub struct Favorites {
    client: ApiClient,
    storage: Storage,
    ids: HashSet<i64>,
    authenticated: bool,
}

impl Favorites {
    /// Start in anonymous mode, seeded from the persisted local list.
    pub fn new(client: ApiClient, storage: Storage) -> Self {
        let ids = load_local(&storage);
        Self { client, storage, ids, authenticated: false }
    }

    /// Switch modes on an auth transition.
    ///
    /// Entering authenticated mode fetches the server list and replaces the
    /// in-memory set; favorites collected while anonymous are deliberately
    /// not merged into the server list. The persisted anonymous record is
    /// left as-is and becomes the working set again on the transition back.
    pub async fn set_authenticated(&mut self, authenticated: bool) -> Result<(), StateError> {
        if authenticated {
            let list = self.client.list_favorites().await?;
            self.ids = list.into_iter().collect();
        } else {
            self.ids = load_local(&self.storage);
        }
        self.authenticated = authenticated;
        Ok(())
    }

    pub fn is_favorite(&self, lot_id: i64) -> bool {
        self.ids.contains(&lot_id)
    }

    /// Current favorite IDs, sorted for stable presentation.
    pub fn ids(&self) -> Vec<i64> {
        let mut ids: Vec<i64> = self.ids.iter().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Add a lot to favorites; a no-op when already present.
    pub async fn add(&mut self, lot_id: i64) -> Result<(), StateError> {
        if self.ids.contains(&lot_id) {
            return Ok(());
        }
        if self.authenticated {
            self.client.add_favorite(lot_id).await?;
        }
        self.ids.insert(lot_id);
        self.persist_local();
        Ok(())
    }

    /// Remove a lot from favorites; a no-op when absent.
    pub async fn remove(&mut self, lot_id: i64) -> Result<(), StateError> {
        if !self.ids.contains(&lot_id) {
            return Ok(());
        }
        if self.authenticated {
            self.client.remove_favorite(lot_id).await?;
        }
        self.ids.remove(&lot_id);
        self.persist_local();
        Ok(())
    }

    /// Remove when present, add when absent. Returns the new membership.
    pub async fn toggle(&mut self, lot_id: i64) -> Result<bool, StateError> {
        if self.ids.contains(&lot_id) {
            self.remove(lot_id).await?;
            Ok(false)
        } else {
            self.add(lot_id).await?;
            Ok(true)
        }
    }

    /// Persist the anonymous working set. Authenticated mode never touches
    /// the local record; the server already holds the list.
    fn persist_local(&self) {
        if self.authenticated {
            return;
        }
        let ids = self.ids();
        if let Err(e) = self.storage.save(FAVORITES_FILE, &ids) {
            tracing::warn!("failed to persist favorites: {}", e);
        }
    }
}

fn load_local(storage: &Storage) -> HashSet<i64> {
    storage.load::<Vec<i64>>(FAVORITES_FILE).unwrap_or_default().into_iter().collect()
}
