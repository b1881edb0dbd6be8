//! Dietary preference store
//!
//! Owns the set of active diet ids. The excluded-ingredient list is derived:
//! it is recomputed from the catalog after every change and never persisted,
//! so it cannot drift from the catalog between releases.

use super::{toggle_membership, LoadState};
use crate::catalog::Catalog;
use crate::eligibility::IngredientNames;
use crate::kv::{self, keys};
use crate::persist::Persister;
use crate::Result;
use std::sync::Arc;
use tracing::debug;

const STORE: &str = "dietary store";

pub struct DietaryStore {
    persister: Persister,
    catalog: Arc<Catalog>,
    state: LoadState,
    active_diets: Vec<String>,
    excluded: Vec<String>,
}

/// Deduplicated union of the excluded ingredients of every active diet
///
/// Names keep first-seen order. Unknown diet ids contribute nothing.
pub fn derive_excluded(catalog: &Catalog, active_diets: &[String]) -> Vec<String> {
    let mut excluded: Vec<String> = Vec::new();
    for diet in active_diets.iter().filter_map(|id| catalog.diet(id)) {
        for name in &diet.excluded_ingredients {
            if !excluded.contains(name) {
                excluded.push(name.clone());
            }
        }
    }
    excluded
}

impl DietaryStore {
    pub fn new(persister: Persister, catalog: Arc<Catalog>) -> Self {
        Self {
            persister,
            catalog,
            state: LoadState::NotReady,
            active_diets: Vec::new(),
            excluded: Vec::new(),
        }
    }

    pub async fn load(persister: Persister, catalog: Arc<Catalog>) -> Self {
        let mut store = Self::new(persister, catalog);
        store.hydrate().await;
        store
    }

    /// Read active diets and derive exclusions, then become `Ready`
    pub async fn hydrate(&mut self) {
        if self.state.is_ready() {
            return;
        }

        self.active_diets = kv::get_json_or_log(self.persister.store(), keys::ACTIVE_DIETS)
            .await
            .unwrap_or_default();
        self.excluded = derive_excluded(&self.catalog, &self.active_diets);
        self.state = LoadState::Ready;
        debug!(
            diets = self.active_diets.len(),
            excluded = self.excluded.len(),
            "Dietary store hydrated"
        );
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn active_diets(&self) -> &[String] {
        &self.active_diets
    }

    pub fn is_active(&self, diet_id: &str) -> bool {
        self.active_diets.iter().any(|id| id == diet_id)
    }

    /// Excluded ingredient names; unavailable until hydrated
    pub fn excluded_ingredients(&self) -> Result<&[String]> {
        self.state.ensure_ready(STORE)?;
        Ok(&self.excluded)
    }

    /// Excluded names as a case-insensitive set, for recipe matching
    pub fn excluded_names(&self) -> Result<IngredientNames> {
        Ok(self.excluded_ingredients()?.iter().collect())
    }

    /// Flip a diet on or off and return the recomputed exclusions
    pub fn toggle_diet(&mut self, diet_id: &str) -> Result<&[String]> {
        self.state.ensure_ready(STORE)?;

        toggle_membership(&mut self.active_diets, diet_id);
        self.excluded = derive_excluded(&self.catalog, &self.active_diets);
        self.persister.set_json(keys::ACTIVE_DIETS, &self.active_diets);
        Ok(&self.excluded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::{KeyValueStore, MemoryKvStore};
    use crate::Error;
    use std::collections::BTreeSet;

    fn ids(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn expected_union(catalog: &Catalog, active: &[String]) -> BTreeSet<String> {
        active
            .iter()
            .filter_map(|id| catalog.diet(id))
            .flat_map(|d| d.excluded_ingredients.iter().cloned())
            .collect()
    }

    #[test]
    fn test_derive_excluded_dedups_in_order() {
        let catalog = Catalog::builtin();
        let active = ids(&["pescatarian", "dairy-free", "vegetarian"]);
        let excluded = derive_excluded(&catalog, &active);
        assert_eq!(
            excluded,
            ids(&["Chicken", "Beef", "Pork", "Milk", "Cheese", "Yogurt", "Butter", "Fish"])
        );
    }

    #[test]
    fn test_unknown_diet_contributes_nothing() {
        let catalog = Catalog::builtin();
        assert!(derive_excluded(&catalog, &ids(&["keto"])).is_empty());
    }

    #[tokio::test]
    async fn test_reads_before_hydration_rejected() {
        let persister = Persister::spawn(Arc::new(MemoryKvStore::new()));
        let mut store = DietaryStore::new(persister, Catalog::builtin());

        assert!(matches!(store.excluded_ingredients(), Err(Error::NotReady(_))));
        assert!(matches!(store.toggle_diet("vegan"), Err(Error::NotReady(_))));

        store.hydrate().await;
        assert_eq!(store.state(), LoadState::Ready);
        assert!(store.excluded_ingredients().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_toggle_returns_new_exclusions() {
        let persister = Persister::spawn(Arc::new(MemoryKvStore::new()));
        let mut store = DietaryStore::load(persister, Catalog::builtin()).await;

        let excluded = store.toggle_diet("vegetarian").unwrap().to_vec();
        assert_eq!(excluded, ids(&["Chicken", "Beef", "Pork", "Fish"]));
        assert!(store.is_active("vegetarian"));

        assert!(store.toggle_diet("vegetarian").unwrap().is_empty());
        assert!(!store.is_active("vegetarian"));
    }

    #[tokio::test]
    async fn test_derived_state_law_across_toggle_sequence_and_reload() {
        let catalog = Catalog::builtin();
        let backing = MemoryKvStore::new();
        let persister = Persister::spawn(Arc::new(backing.clone()));
        let mut store = DietaryStore::load(persister.clone(), Arc::clone(&catalog)).await;

        let sequence = [
            "vegan",
            "dairy-free",
            "vegan",
            "pescatarian",
            "keto",
            "vegetarian",
            "dairy-free",
        ];
        for id in sequence {
            store.toggle_diet(id).unwrap();
            let got: BTreeSet<String> =
                store.excluded_ingredients().unwrap().iter().cloned().collect();
            assert_eq!(got, expected_union(&catalog, store.active_diets()));
            assert_eq!(got.len(), store.excluded_ingredients().unwrap().len());
        }
        persister.flush().await;

        let reloaded =
            DietaryStore::load(Persister::spawn(Arc::new(backing)), Arc::clone(&catalog)).await;
        assert_eq!(reloaded.active_diets(), store.active_diets());
        assert_eq!(
            reloaded.excluded_ingredients().unwrap(),
            store.excluded_ingredients().unwrap()
        );
    }

    #[tokio::test]
    async fn test_only_active_diets_persisted() {
        let backing = MemoryKvStore::new();
        let persister = Persister::spawn(Arc::new(backing.clone()));
        let mut store = DietaryStore::load(persister.clone(), Catalog::builtin()).await;

        store.toggle_diet("vegan").unwrap();
        persister.flush().await;

        assert_eq!(
            backing.get(keys::ACTIVE_DIETS).await.unwrap().as_deref(),
            Some(r#"["vegan"]"#)
        );
        assert_eq!(backing.len().await, 1);
    }

    #[tokio::test]
    async fn test_malformed_stored_diets_start_empty() {
        let backing = MemoryKvStore::new();
        backing.set(keys::ACTIVE_DIETS, "vegan").await.unwrap();

        let persister = Persister::spawn(Arc::new(backing));
        let store = DietaryStore::load(persister, Catalog::builtin()).await;
        assert!(store.active_diets().is_empty());
        assert!(store.excluded_ingredients().unwrap().is_empty());
    }
}
