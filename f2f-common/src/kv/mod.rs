//! Persistent key-value store abstraction
//!
//! Values are plain strings; the stores keep JSON documents in them. There
//! are no transactions and no atomic multi-key writes.

use crate::Result;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::warn;

pub mod memory;
#[cfg(feature = "sqlx")]
pub mod sqlite;

pub use memory::MemoryKvStore;
#[cfg(feature = "sqlx")]
pub use sqlite::SqliteKvStore;

/// Well-known keys
pub mod keys {
    pub const PANTRY_INGREDIENTS: &str = "pantryIngredients";
    pub const ACTIVE_INGREDIENTS: &str = "activeIngredients";
    pub const ACTIVE_DIETS: &str = "activeDiets";
    pub const FAVORITES: &str = "favorites";
    pub const EXCLUDED: &str = "excluded";
    pub const IS_INITIALIZED: &str = "isInitialized";
    pub const USER_EMAIL: &str = "userEmail";
    pub const USER_PASSWORD: &str = "userPassword";
}

/// Durable string key-value store
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read a value (`None` when the key is absent)
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a value, replacing any previous one
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete keys; absent keys are ignored
    async fn remove(&self, keys: &[&str]) -> Result<()>;
}

/// Read and decode a JSON value
///
/// `Ok(None)` when the key is absent. Storage and parse failures are
/// returned so the caller can pick its own fallback.
pub async fn get_json<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>> {
    match store.get(key).await? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

/// Read a JSON value, degrading any failure to `None`
///
/// Failures are logged; this is the hydration boundary where storage and
/// parse errors must never reach the user.
pub async fn get_json_or_log<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Option<T> {
    match get_json(store, key).await {
        Ok(value) => value,
        Err(e) => {
            warn!("Discarding stored '{}': {}", key, e);
            None
        }
    }
}
