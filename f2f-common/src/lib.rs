//! # fridge2fork Common Library
//!
//! Core of the fridge2fork recipe suggester, shared by every front end:
//! - Reference catalog (recipes, dietary preferences, default pantry)
//! - Key-value store abstraction with memory and SQLite backends
//! - Persistence queue mirroring store state to the key-value store
//! - Pantry, dietary and favorites/exclusion stores
//! - Recipe eligibility engine
//! - First-run seeding, login/logout and profile summary
//! - Configuration loading

pub mod catalog;
pub mod config;
pub mod eligibility;
pub mod error;
pub mod ids;
pub mod kv;
pub mod persist;
pub mod profile;
pub mod session;
pub mod stores;

pub use catalog::{Catalog, DietaryPreference, Difficulty, Ingredient, Recipe};
pub use eligibility::{filter_recipes, overlay, IngredientNames, RecipeCard};
pub use error::{Error, Result};
pub use kv::{KeyValueStore, MemoryKvStore};
pub use persist::Persister;
pub use stores::{DietaryStore, FavoritesTracker, LoadState, PantryStore};
