//! Recipe eligibility engine
//!
//! A pure filter over the recipe catalog. For each recipe, in catalog order:
//! 1. No selected ingredients at all means no suggestions.
//! 2. Any ingredient in the excluded set disqualifies the recipe outright.
//! 3. Otherwise the recipe qualifies if at least one of its ingredients is
//!    selected.
//!
//! All name comparisons are case-insensitive. There is no ranking; output
//! keeps catalog order. Nothing is cached.

use crate::catalog::Recipe;
use crate::stores::FavoritesTracker;
use crate::Result;
use std::collections::HashSet;

/// Case-insensitive set of ingredient names
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngredientNames(HashSet<String>);

impl IngredientNames {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: &str) {
        self.0.insert(name.to_lowercase());
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(&name.to_lowercase())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl<S: AsRef<str>> FromIterator<S> for IngredientNames {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut names = Self::new();
        for name in iter {
            names.insert(name.as_ref());
        }
        names
    }
}

/// Recipes eligible under the current selection and exclusions
pub fn filter_recipes<'a>(
    selected: &IngredientNames,
    excluded: &IngredientNames,
    catalog: &'a [Recipe],
) -> Vec<&'a Recipe> {
    if selected.is_empty() {
        return Vec::new();
    }

    catalog
        .iter()
        .filter(|recipe| !recipe.ingredients.iter().any(|i| excluded.contains(i)))
        .filter(|recipe| recipe.ingredients.iter().any(|i| selected.contains(i)))
        .collect()
}

/// Eligible recipe with its display flags
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeCard<'a> {
    pub recipe: &'a Recipe,
    pub favorite: bool,
    /// Rendered dimmed; still part of the list
    pub excluded: bool,
}

/// Attach favorite/excluded flags without dropping any recipe
///
/// Fails with `NotReady` if the tracker has not been hydrated.
pub fn overlay<'a>(
    candidates: Vec<&'a Recipe>,
    tracker: &FavoritesTracker,
) -> Result<Vec<RecipeCard<'a>>> {
    tracker.ensure_ready()?;
    Ok(candidates
        .into_iter()
        .map(|recipe| RecipeCard {
            recipe,
            favorite: tracker.is_favorite(&recipe.id),
            excluded: tracker.is_excluded(&recipe.id),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::kv::MemoryKvStore;
    use crate::persist::Persister;
    use crate::Error;
    use std::sync::Arc;

    fn names(list: &[&str]) -> IngredientNames {
        list.iter().collect()
    }

    fn ids(recipes: &[&Recipe]) -> Vec<String> {
        recipes.iter().map(|r| r.id.clone()).collect()
    }

    #[test]
    fn test_ingredient_names_case_insensitive() {
        let set = names(&["Soy Sauce", "RICE"]);
        assert!(set.contains("soy sauce"));
        assert!(set.contains("Rice"));
        assert!(!set.contains("Eggs"));
        assert_eq!(names(&["Rice", "rice"]).len(), 1);
    }

    #[test]
    fn test_empty_selection_yields_nothing() {
        let catalog = Catalog::builtin();
        let none = IngredientNames::new();
        assert!(filter_recipes(&none, &none, catalog.recipes()).is_empty());
        assert!(filter_recipes(&none, &names(&["Chicken"]), catalog.recipes()).is_empty());
        assert!(filter_recipes(&names(&["Rice"]), &IngredientNames::new(), &[]).is_empty());
    }

    #[test]
    fn test_selection_matches_any_ingredient() {
        let catalog = Catalog::builtin();
        let result = filter_recipes(
            &names(&["seaweed"]),
            &IngredientNames::new(),
            catalog.recipes(),
        );
        assert_eq!(ids(&result), vec!["8"]);
    }

    #[test]
    fn test_chicken_rice_eggs_without_diets() {
        let catalog = Catalog::builtin();
        let result = filter_recipes(
            &names(&["Chicken", "Rice", "Eggs"]),
            &IngredientNames::new(),
            catalog.recipes(),
        );
        let got = ids(&result);
        assert!(got.contains(&"2".to_string()));
        assert!(got.contains(&"4".to_string()));
        // Every recipe uses at least one of the three
        assert_eq!(got.len(), 10);
    }

    #[test]
    fn test_vegetarian_excludes_paella_even_when_selected() {
        let catalog = Catalog::builtin();
        let excluded = names(&["Chicken", "Beef", "Pork", "Fish"]);
        let result = filter_recipes(&names(&["Chicken", "Rice"]), &excluded, catalog.recipes());
        let got = ids(&result);

        assert!(!got.contains(&"1".to_string()));
        assert_eq!(got, vec!["2", "8"]);
    }

    #[test]
    fn test_exclusion_is_case_insensitive() {
        let catalog = Catalog::builtin();
        let result = filter_recipes(
            &names(&["rice"]),
            &names(&["chicken", "EGGS"]),
            catalog.recipes(),
        );
        assert!(result.is_empty(), "every rice recipe contains chicken or eggs");
    }

    #[test]
    fn test_properties_hold_for_all_single_and_pair_selections() {
        let catalog = Catalog::builtin();
        let vocabulary: Vec<&str> = catalog
            .recipes()
            .iter()
            .flat_map(|r| r.ingredients.iter().map(String::as_str))
            .collect();
        let exclusion_sets = [
            IngredientNames::new(),
            names(&["Chicken", "Beef", "Pork", "Fish"]),
            names(&["milk", "cheese", "yogurt", "butter"]),
        ];

        for (i, a) in vocabulary.iter().enumerate() {
            for b in vocabulary.iter().skip(i).take(5) {
                let selected = names(&[*a, *b]);
                for excluded in &exclusion_sets {
                    let result = filter_recipes(&selected, excluded, catalog.recipes());
                    for recipe in &result {
                        assert!(recipe.ingredients.iter().all(|n| !excluded.contains(n)));
                        assert!(recipe.ingredients.iter().any(|n| selected.contains(n)));
                    }
                    // Catalog order preserved
                    let positions: Vec<usize> = result
                        .iter()
                        .map(|r| catalog.recipes().iter().position(|c| c.id == r.id).unwrap())
                        .collect();
                    assert!(positions.windows(2).all(|w| w[0] < w[1]));
                }
            }
        }
    }

    #[tokio::test]
    async fn test_overlay_flags_without_removing() {
        let catalog = Catalog::builtin();
        let persister = Persister::spawn(Arc::new(MemoryKvStore::new()));
        let mut tracker = FavoritesTracker::load(persister).await;
        tracker.toggle_excluded("3").unwrap();
        tracker.toggle_favorite("2").unwrap();

        let selected = names(&["Chicken", "Rice", "Eggs"]);
        let before = ids(&filter_recipes(&selected, &IngredientNames::new(), catalog.recipes()));
        let candidates = filter_recipes(&selected, &IngredientNames::new(), catalog.recipes());
        assert_eq!(ids(&candidates), before);
        assert!(before.contains(&"3".to_string()));

        let cards = overlay(candidates, &tracker).unwrap();
        assert_eq!(cards.len(), before.len());
        let three = cards.iter().find(|c| c.recipe.id == "3").unwrap();
        assert!(three.excluded);
        assert!(!three.favorite);
        let two = cards.iter().find(|c| c.recipe.id == "2").unwrap();
        assert!(two.favorite);
        assert!(!two.excluded);
    }

    #[tokio::test]
    async fn test_overlay_before_hydration_rejected() {
        let catalog = Catalog::builtin();
        let tracker = FavoritesTracker::new(Persister::spawn(Arc::new(MemoryKvStore::new())));
        let candidates =
            filter_recipes(&names(&["Rice"]), &IngredientNames::new(), catalog.recipes());

        assert!(!candidates.is_empty());
        assert!(matches!(overlay(candidates, &tracker), Err(Error::NotReady(_))));
    }
}
