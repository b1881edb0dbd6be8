//! Profile screen summary

use crate::stores::{DietaryStore, FavoritesTracker, PantryStore};
use serde::Serialize;

/// Counts shown on the profile screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSummary {
    pub saved_recipes: usize,
    pub pantry_ingredients: usize,
    pub excluded_recipes: usize,
    pub active_diets: usize,
}

impl ProfileSummary {
    pub fn collect(
        pantry: &PantryStore,
        dietary: &DietaryStore,
        tracker: &FavoritesTracker,
    ) -> Self {
        Self {
            saved_recipes: tracker.favorites().len(),
            pantry_ingredients: pantry.pantry_ingredients().len(),
            excluded_recipes: tracker.excluded().len(),
            active_diets: dietary.active_diets().len(),
        }
    }
}
