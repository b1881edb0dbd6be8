//! Pantry store
//!
//! Owns the user's pantry ingredients and the subset currently active for
//! recipe matching. Active ingredients are always a subset of the pantry by
//! id: removing a pantry ingredient also deactivates it.
//!
//! Every mutation enqueues writes of both lists under
//! `pantryIngredients` and `activeIngredients`. The two writes are
//! independent, not atomic.

use super::LoadState;
use crate::catalog::{Catalog, Ingredient};
use crate::eligibility::IngredientNames;
use crate::kv::{self, keys};
use crate::persist::Persister;
use crate::{ids, Error, Result};
use std::collections::HashSet;
use tracing::{debug, info, warn};

const STORE: &str = "pantry store";

pub struct PantryStore {
    persister: Persister,
    default_pantry: Vec<Ingredient>,
    state: LoadState,
    pantry: Vec<Ingredient>,
    active: Vec<Ingredient>,
}

impl PantryStore {
    /// Create an unhydrated store
    pub fn new(persister: Persister, catalog: &Catalog) -> Self {
        Self {
            persister,
            default_pantry: catalog.default_pantry().to_vec(),
            state: LoadState::NotReady,
            pantry: Vec::new(),
            active: Vec::new(),
        }
    }

    /// Create and hydrate in one step
    pub async fn load(persister: Persister, catalog: &Catalog) -> Self {
        let mut store = Self::new(persister, catalog);
        store.hydrate().await;
        store
    }

    /// Read both lists from storage and become `Ready`
    ///
    /// An absent pantry is replaced by the default seed list and written
    /// back. An unreadable pantry also falls back to the defaults, in memory
    /// only, so the stored value is left for a later session. An absent or
    /// unreadable active list starts empty. Repeated ids keep their first
    /// entry, and active entries missing from the pantry are dropped.
    pub async fn hydrate(&mut self) {
        if self.state.is_ready() {
            return;
        }

        let store = self.persister.store();
        let (pantry, seeded) =
            match kv::get_json::<Vec<Ingredient>>(store, keys::PANTRY_INGREDIENTS).await {
                Ok(Some(pantry)) => (pantry, false),
                Ok(None) => {
                    info!(
                        "No stored pantry, seeding {} default ingredients",
                        self.default_pantry.len()
                    );
                    (self.default_pantry.clone(), true)
                }
                Err(e) => {
                    warn!("Error loading stored pantry, using defaults: {}", e);
                    (self.default_pantry.clone(), false)
                }
            };
        let pantry = dedup_by_id(pantry);

        let stored_active: Vec<Ingredient> = kv::get_json_or_log(store, keys::ACTIVE_INGREDIENTS)
            .await
            .unwrap_or_default();
        let pantry_ids: HashSet<&str> = pantry.iter().map(|i| i.id.as_str()).collect();
        let before = stored_active.len();
        let active: Vec<Ingredient> = dedup_by_id(stored_active)
            .into_iter()
            .filter(|i| pantry_ids.contains(i.id.as_str()))
            .collect();
        if active.len() != before {
            debug!(
                "Dropped {} duplicate or orphaned active ingredients",
                before - active.len()
            );
        }

        self.pantry = pantry;
        self.active = active;
        self.state = LoadState::Ready;

        if seeded {
            self.persist();
        }
        debug!(
            pantry = self.pantry.len(),
            active = self.active.len(),
            "Pantry store hydrated"
        );
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn pantry_ingredients(&self) -> &[Ingredient] {
        &self.pantry
    }

    pub fn active_ingredients(&self) -> &[Ingredient] {
        &self.active
    }

    pub fn is_active(&self, id: &str) -> bool {
        self.active.iter().any(|i| i.id == id)
    }

    /// True when every pantry ingredient is active
    pub fn all_active(&self) -> bool {
        self.active.len() == self.pantry.len()
    }

    /// Names of the active ingredients, for recipe matching
    ///
    /// Unavailable until hydrated, so an unloaded pantry is never mistaken
    /// for an empty selection.
    pub fn active_names(&self) -> Result<IngredientNames> {
        self.state.ensure_ready(STORE)?;
        Ok(self.active.iter().map(|i| i.name.as_str()).collect())
    }

    /// Pantry grouped by category
    ///
    /// Categories appear in order of first occurrence; ingredients keep
    /// pantry order within their category.
    pub fn grouped_by_category(&self) -> Vec<(&str, Vec<&Ingredient>)> {
        let mut groups: Vec<(&str, Vec<&Ingredient>)> = Vec::new();
        for ingredient in &self.pantry {
            match groups.iter_mut().find(|(c, _)| *c == ingredient.category) {
                Some((_, members)) => members.push(ingredient),
                None => groups.push((ingredient.category.as_str(), vec![ingredient])),
            }
        }
        groups
    }

    /// Add a new ingredient with a fresh id
    pub fn add_ingredient(&mut self, name: &str, category: &str) -> Result<Ingredient> {
        self.state.ensure_ready(STORE)?;

        let name = name.trim();
        if name.is_empty() {
            return Err(Error::Validation("Please enter an ingredient name".to_string()));
        }

        let ingredient = Ingredient::new(ids::generate(), name, category);
        self.pantry.push(ingredient.clone());
        self.persist();
        Ok(ingredient)
    }

    /// Remove an ingredient from the pantry and from the active selection
    ///
    /// Returns false when no ingredient had that id.
    pub fn remove_ingredient(&mut self, id: &str) -> Result<bool> {
        self.state.ensure_ready(STORE)?;

        let before = self.pantry.len();
        self.pantry.retain(|i| i.id != id);
        if self.pantry.len() == before {
            return Ok(false);
        }
        self.active.retain(|i| i.id != id);
        self.persist();
        Ok(true)
    }

    /// Flip whether an ingredient is active, returning the new state
    ///
    /// The ingredient is looked up in the pantry by id and the pantry entry
    /// is what gets activated. Ids not in the pantry are `NotFound`.
    pub fn toggle_active(&mut self, ingredient: &Ingredient) -> Result<bool> {
        self.state.ensure_ready(STORE)?;

        let now_active = if self.is_active(&ingredient.id) {
            self.active.retain(|i| i.id != ingredient.id);
            false
        } else {
            let entry = self
                .pantry
                .iter()
                .find(|i| i.id == ingredient.id)
                .cloned()
                .ok_or_else(|| Error::NotFound(format!("pantry ingredient {}", ingredient.id)))?;
            self.active.push(entry);
            true
        };
        self.persist();
        Ok(now_active)
    }

    /// Deactivate everything if all are active, otherwise activate all
    pub fn toggle_all(&mut self) -> Result<()> {
        self.state.ensure_ready(STORE)?;

        if self.all_active() {
            self.active.clear();
        } else {
            self.active = self.pantry.clone();
        }
        self.persist();
        Ok(())
    }

    fn persist(&self) {
        self.persister.set_json(keys::PANTRY_INGREDIENTS, &self.pantry);
        self.persister.set_json(keys::ACTIVE_INGREDIENTS, &self.active);
    }
}

/// Keep the first entry for each id
fn dedup_by_id(items: Vec<Ingredient>) -> Vec<Ingredient> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|i| seen.insert(i.id.clone()))
        .collect()
}
