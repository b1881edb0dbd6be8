//! Reference data: recipes, dietary preferences, default pantry
//!
//! The catalog is immutable once built. Recipe ingredient names are free
//! text and are matched against pantry ingredients by name only, never by
//! pantry id.

use crate::{Error, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Ingredient owned by the user's pantry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub id: String,
    pub name: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

impl Ingredient {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            active: None,
        }
    }
}

/// Recipe difficulty label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: String,
    pub name: String,
    pub description: String,
    pub image: String,
    /// Ingredient names in display order
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
    /// Human-readable duration, e.g. "45 mins"
    pub time: String,
    pub difficulty: Difficulty,
    pub servings: u32,
}

/// Named rule excluding a set of ingredient names
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DietaryPreference {
    pub id: String,
    pub name: String,
    pub excluded_ingredients: Vec<String>,
}

/// Categories offered when adding a pantry ingredient
pub const PANTRY_CATEGORIES: &[&str] = &[
    "vegetables",
    "fruits",
    "protein",
    "grains",
    "dairy",
    "seasonings",
    "oils",
];

/// Read-only table of recipes, diets and seed data
#[derive(Debug, Clone)]
pub struct Catalog {
    recipes: Vec<Recipe>,
    diets: Vec<DietaryPreference>,
    default_pantry: Vec<Ingredient>,
    suggestions: Vec<(String, Vec<String>)>,
}

static BUILTIN: Lazy<Arc<Catalog>> = Lazy::new(|| Arc::new(builtin_catalog()));

impl Catalog {
    pub fn new(
        recipes: Vec<Recipe>,
        diets: Vec<DietaryPreference>,
        default_pantry: Vec<Ingredient>,
        suggestions: Vec<(String, Vec<String>)>,
    ) -> Self {
        Self {
            recipes,
            diets,
            default_pantry,
            suggestions,
        }
    }

    /// Catalog shipped with the application
    pub fn builtin() -> Arc<Catalog> {
        Arc::clone(&BUILTIN)
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn diets(&self) -> &[DietaryPreference] {
        &self.diets
    }

    /// Pantry seeded on first run
    pub fn default_pantry(&self) -> &[Ingredient] {
        &self.default_pantry
    }

    pub fn recipe(&self, id: &str) -> Result<&Recipe> {
        self.recipes
            .iter()
            .find(|r| r.id == id)
            .ok_or_else(|| Error::NotFound(format!("recipe {}", id)))
    }

    pub fn diet(&self, id: &str) -> Option<&DietaryPreference> {
        self.diets.iter().find(|d| d.id == id)
    }

    /// Ingredient names matching a search query
    ///
    /// Case-insensitive substring match over the suggestion table, in table
    /// order. An empty query yields no suggestions.
    pub fn suggest_ingredients(&self, query: &str) -> Vec<&str> {
        if query.is_empty() {
            return Vec::new();
        }
        let needle = query.to_lowercase();
        self.suggestions
            .iter()
            .flat_map(|(_, names)| names.iter())
            .filter(|name| name.to_lowercase().contains(&needle))
            .map(String::as_str)
            .collect()
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[allow(clippy::too_many_arguments)]
fn recipe(
    id: &str,
    name: &str,
    description: &str,
    image: &str,
    ingredients: &[&str],
    steps: &[&str],
    time: &str,
    difficulty: Difficulty,
    servings: u32,
) -> Recipe {
    Recipe {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        image: image.to_string(),
        ingredients: strings(ingredients),
        steps: strings(steps),
        time: time.to_string(),
        difficulty,
        servings,
    }
}

fn diet(id: &str, name: &str, excluded: &[&str]) -> DietaryPreference {
    DietaryPreference {
        id: id.to_string(),
        name: name.to_string(),
        excluded_ingredients: strings(excluded),
    }
}

fn builtin_catalog() -> Catalog {
    let default_pantry = [
        ("1", "Onion", "vegetables"),
        ("2", "Garlic", "vegetables"),
        ("3", "Rice", "grains"),
        ("4", "Tomatoes", "vegetables"),
        ("5", "Olive Oil", "oils"),
        ("6", "Salt", "seasonings"),
        ("7", "Black Pepper", "seasonings"),
        ("8", "Chicken", "protein"),
        ("9", "Eggs", "protein"),
        ("10", "Soy Sauce", "seasonings"),
    ]
    .iter()
    .map(|(id, name, category)| Ingredient::new(*id, *name, *category))
    .collect();

    let diets = vec![
        diet("vegetarian", "Vegetarian", &["Chicken", "Beef", "Pork", "Fish"]),
        diet(
            "vegan",
            "Vegan",
            &[
                "Chicken", "Beef", "Pork", "Fish", "Eggs", "Milk", "Cheese", "Yogurt", "Butter",
            ],
        ),
        diet("pescatarian", "Pescatarian", &["Chicken", "Beef", "Pork"]),
        diet("dairy-free", "Dairy Free", &["Milk", "Cheese", "Yogurt", "Butter"]),
    ];

    let suggestions = vec![
        ("fruits".to_string(), strings(&["Apple", "Banana", "Orange", "Strawberry"])),
        ("vegetables".to_string(), strings(&["Carrot", "Tomato", "Lettuce", "Onion"])),
        ("dairy".to_string(), strings(&["Milk", "Cheese", "Yogurt", "Butter"])),
        ("meats".to_string(), strings(&["Chicken", "Beef", "Pork", "Fish"])),
    ];

    let recipes = vec![
        recipe(
            "1",
            "Spanish Paella",
            "Classic Spanish rice dish with saffron and mixed proteins",
            "https://picsum.photos/200",
            &[
                "Rice",
                "Chicken",
                "Onion",
                "Garlic",
                "Tomatoes",
                "Olive Oil",
                "Salt",
                "Black Pepper",
                "Saffron",
            ],
            &[
                "Heat olive oil in a large paella pan",
                "Sauté onions and garlic until translucent",
                "Add chicken and cook until browned",
                "Add rice and toast lightly",
                "Add tomatoes and saffron-infused broth",
                "Simmer until rice is cooked",
                "Let rest before serving",
            ],
            "45 mins",
            Difficulty::Medium,
            6,
        ),
        recipe(
            "2",
            "Chinese Fried Rice",
            "Quick and flavorful wok-fried rice with vegetables",
            "https://picsum.photos/201",
            &[
                "Rice",
                "Eggs",
                "Onion",
                "Garlic",
                "Soy Sauce",
                "Salt",
                "Black Pepper",
                "Carrots",
                "Peas",
            ],
            &[
                "Cook rice and let it cool",
                "Scramble eggs and set aside",
                "Stir-fry vegetables until tender",
                "Add rice and soy sauce",
                "Mix in scrambled eggs",
                "Season to taste",
                "Serve hot",
            ],
            "20 mins",
            Difficulty::Easy,
            4,
        ),
        recipe(
            "3",
            "Italian Chicken Cacciatore",
            "Rustic Italian chicken stew with tomatoes and herbs",
            "https://picsum.photos/202",
            &[
                "Chicken",
                "Tomatoes",
                "Onion",
                "Garlic",
                "Olive Oil",
                "Salt",
                "Black Pepper",
                "Herbs",
                "Wine",
            ],
            &[
                "Brown chicken pieces in olive oil",
                "Sauté onions and garlic",
                "Add tomatoes and wine",
                "Season with herbs and spices",
                "Simmer until chicken is tender",
                "Adjust seasoning",
                "Serve with pasta or bread",
            ],
            "60 mins",
            Difficulty::Medium,
            4,
        ),
        recipe(
            "4",
            "Japanese Oyakodon",
            "Comforting chicken and egg rice bowl",
            "https://picsum.photos/203",
            &[
                "Chicken",
                "Eggs",
                "Rice",
                "Onion",
                "Soy Sauce",
                "Salt",
                "Black Pepper",
                "Dashi",
                "Mirin",
            ],
            &[
                "Cook rice",
                "Simmer chicken in dashi and soy sauce",
                "Add onions and cook until tender",
                "Pour beaten eggs over the top",
                "Cover and cook until eggs are set",
                "Serve over hot rice",
                "Garnish with green onions",
            ],
            "25 mins",
            Difficulty::Easy,
            2,
        ),
        recipe(
            "5",
            "Indian Biryani",
            "Aromatic rice dish with spiced chicken",
            "https://picsum.photos/204",
            &[
                "Rice",
                "Chicken",
                "Onion",
                "Garlic",
                "Tomatoes",
                "Salt",
                "Black Pepper",
                "Yogurt",
                "Spices",
            ],
            &[
                "Marinate chicken in yogurt and spices",
                "Cook rice partially",
                "Layer rice and chicken mixture",
                "Add saffron milk",
                "Steam until fully cooked",
                "Let rest before serving",
                "Garnish with fried onions",
            ],
            "60 mins",
            Difficulty::Hard,
            6,
        ),
        recipe(
            "6",
            "Greek Souvlaki",
            "Grilled chicken skewers with Mediterranean flavors",
            "https://picsum.photos/205",
            &[
                "Chicken",
                "Olive Oil",
                "Garlic",
                "Salt",
                "Black Pepper",
                "Lemon",
                "Oregano",
                "Yogurt",
            ],
            &[
                "Marinate chicken in olive oil and herbs",
                "Thread onto skewers",
                "Preheat grill",
                "Grill until cooked through",
                "Make tzatziki sauce",
                "Warm pita bread",
                "Serve with salad",
            ],
            "40 mins",
            Difficulty::Easy,
            4,
        ),
        recipe(
            "7",
            "Mexican Rice Bowl",
            "Spicy rice bowl with chicken and fresh tomatoes",
            "https://picsum.photos/206",
            &[
                "Rice",
                "Chicken",
                "Tomatoes",
                "Onion",
                "Garlic",
                "Salt",
                "Black Pepper",
                "Cilantro",
                "Lime",
            ],
            &[
                "Cook rice with tomatoes and spices",
                "Grill seasoned chicken",
                "Prepare fresh salsa",
                "Slice chicken",
                "Assemble bowls",
                "Garnish with cilantro",
                "Serve with lime wedges",
            ],
            "35 mins",
            Difficulty::Easy,
            4,
        ),
        recipe(
            "8",
            "Korean Egg Rice",
            "Simple but delicious rice bowl with fried egg",
            "https://picsum.photos/207",
            &["Rice", "Eggs", "Soy Sauce", "Salt", "Black Pepper", "Sesame Oil", "Seaweed"],
            &[
                "Cook rice",
                "Fry eggs sunny side up",
                "Season with sesame oil",
                "Add soy sauce",
                "Top with seaweed",
                "Mix before eating",
                "Enjoy while hot",
            ],
            "15 mins",
            Difficulty::Easy,
            1,
        ),
        recipe(
            "9",
            "Middle Eastern Shakshuka",
            "Eggs poached in spiced tomato sauce",
            "https://picsum.photos/208",
            &[
                "Eggs",
                "Tomatoes",
                "Onion",
                "Garlic",
                "Olive Oil",
                "Salt",
                "Black Pepper",
                "Cumin",
                "Paprika",
            ],
            &[
                "Sauté onions and garlic",
                "Add tomatoes and spices",
                "Simmer sauce until thickened",
                "Create wells for eggs",
                "Crack eggs into wells",
                "Cover and cook eggs",
                "Serve with bread",
            ],
            "30 mins",
            Difficulty::Medium,
            4,
        ),
        recipe(
            "10",
            "Thai Basil Chicken",
            "Spicy stir-fried chicken with holy basil",
            "https://picsum.photos/209",
            &[
                "Chicken",
                "Garlic",
                "Soy Sauce",
                "Salt",
                "Black Pepper",
                "Thai Basil",
                "Chili",
                "Rice",
            ],
            &[
                "Mince chicken and garlic",
                "Heat wok until very hot",
                "Stir-fry garlic and chilies",
                "Add chicken and sauce",
                "Cook until done",
                "Stir in basil leaves",
                "Serve over rice",
            ],
            "20 mins",
            Difficulty::Medium,
            2,
        ),
    ];

    Catalog::new(recipes, diets, default_pantry, suggestions)
}
