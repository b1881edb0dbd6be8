//! Favorites and user exclusions
//!
//! Two independent sets of recipe ids. User exclusion only marks a recipe
//! for dimmed display; it never removes the recipe from eligibility
//! results, unlike dietary exclusion.

use super::{toggle_membership, LoadState};
use crate::kv::{self, keys};
use crate::persist::Persister;
use crate::Result;
use tracing::debug;

const STORE: &str = "favorites tracker";

pub struct FavoritesTracker {
    persister: Persister,
    state: LoadState,
    favorites: Vec<String>,
    excluded: Vec<String>,
}

impl FavoritesTracker {
    pub fn new(persister: Persister) -> Self {
        Self {
            persister,
            state: LoadState::NotReady,
            favorites: Vec::new(),
            excluded: Vec::new(),
        }
    }

    pub async fn load(persister: Persister) -> Self {
        let mut tracker = Self::new(persister);
        tracker.hydrate().await;
        tracker
    }

    /// Read both id sets; absent or malformed values start empty
    pub async fn hydrate(&mut self) {
        if self.state.is_ready() {
            return;
        }

        let store = self.persister.store();
        self.favorites = kv::get_json_or_log(store, keys::FAVORITES).await.unwrap_or_default();
        self.excluded = kv::get_json_or_log(store, keys::EXCLUDED).await.unwrap_or_default();
        self.state = LoadState::Ready;
        debug!(
            favorites = self.favorites.len(),
            excluded = self.excluded.len(),
            "Favorites tracker hydrated"
        );
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    /// Fails with `NotReady` until hydrated; gates display overlays
    pub(crate) fn ensure_ready(&self) -> Result<()> {
        self.state.ensure_ready(STORE)
    }

    pub fn favorites(&self) -> &[String] {
        &self.favorites
    }

    pub fn excluded(&self) -> &[String] {
        &self.excluded
    }

    pub fn is_favorite(&self, recipe_id: &str) -> bool {
        self.favorites.iter().any(|id| id == recipe_id)
    }

    pub fn is_excluded(&self, recipe_id: &str) -> bool {
        self.excluded.iter().any(|id| id == recipe_id)
    }

    /// Flip favorite status, returning whether the recipe is now a favorite
    pub fn toggle_favorite(&mut self, recipe_id: &str) -> Result<bool> {
        self.state.ensure_ready(STORE)?;
        let now = toggle_membership(&mut self.favorites, recipe_id);
        self.persister.set_json(keys::FAVORITES, &self.favorites);
        Ok(now)
    }

    /// Flip user exclusion, returning whether the recipe is now excluded
    pub fn toggle_excluded(&mut self, recipe_id: &str) -> Result<bool> {
        self.state.ensure_ready(STORE)?;
        let now = toggle_membership(&mut self.excluded, recipe_id);
        self.persister.set_json(keys::EXCLUDED, &self.excluded);
        Ok(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::{KeyValueStore, MemoryKvStore};
    use crate::Error;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_toggle_before_hydration_rejected() {
        let persister = Persister::spawn(Arc::new(MemoryKvStore::new()));
        let mut tracker = FavoritesTracker::new(persister);
        assert!(matches!(tracker.toggle_favorite("1"), Err(Error::NotReady(_))));
        assert!(matches!(tracker.toggle_excluded("1"), Err(Error::NotReady(_))));
        assert!(matches!(tracker.ensure_ready(), Err(Error::NotReady(_))));
    }

    #[tokio::test]
    async fn test_sets_are_independent() {
        let persister = Persister::spawn(Arc::new(MemoryKvStore::new()));
        let mut tracker = FavoritesTracker::load(persister).await;

        assert!(tracker.toggle_favorite("3").unwrap());
        assert!(tracker.toggle_excluded("3").unwrap());
        assert!(tracker.is_favorite("3"));
        assert!(tracker.is_excluded("3"));

        assert!(!tracker.toggle_favorite("3").unwrap());
        assert!(!tracker.is_favorite("3"));
        assert!(tracker.is_excluded("3"));
    }

    #[tokio::test]
    async fn test_persisted_and_rehydrated() {
        let backing = MemoryKvStore::new();
        let persister = Persister::spawn(Arc::new(backing.clone()));
        let mut tracker = FavoritesTracker::load(persister.clone()).await;

        tracker.toggle_favorite("1").unwrap();
        tracker.toggle_favorite("4").unwrap();
        tracker.toggle_excluded("7").unwrap();
        persister.flush().await;

        let reloaded = FavoritesTracker::load(Persister::spawn(Arc::new(backing))).await;
        assert_eq!(reloaded.favorites(), &["1".to_string(), "4".to_string()]);
        assert_eq!(reloaded.excluded(), &["7".to_string()]);
    }

    #[tokio::test]
    async fn test_malformed_json_degrades_to_empty() {
        let backing = MemoryKvStore::new();
        backing.set(keys::FAVORITES, "[\"1\",").await.unwrap();
        backing.set(keys::EXCLUDED, r#"["2"]"#).await.unwrap();

        let tracker = FavoritesTracker::load(Persister::spawn(Arc::new(backing))).await;
        assert!(tracker.favorites().is_empty());
        assert_eq!(tracker.excluded(), &["2".to_string()]);
        assert!(tracker.state().is_ready());
    }

    #[tokio::test]
    async fn test_storage_outage_degrades_to_empty() {
        let backing = MemoryKvStore::new();
        backing.set(keys::FAVORITES, r#"["1"]"#).await.unwrap();
        backing.set_failing(true);

        let mut tracker = FavoritesTracker::load(Persister::spawn(Arc::new(backing))).await;
        assert!(tracker.favorites().is_empty());

        // Still usable in memory for the rest of the session
        assert!(tracker.toggle_favorite("2").unwrap());
        assert!(tracker.is_favorite("2"));
    }
}
