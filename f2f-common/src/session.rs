//! First-run seeding and the demo login flow
//!
//! Credentials are the single demo account and are stored in plain text,
//! matching the app this crate backs. None of this touches the stores'
//! in-memory state; run it before the stores are hydrated.

use crate::catalog::Catalog;
use crate::kv::{keys, KeyValueStore};
use crate::{Error, Result};
use tracing::info;

/// Accounts accepted by [`login`]
pub const DEMO_USERS: &[(&str, &str)] = &[("test", "test")];

/// Keys cleared on logout
///
/// Dietary preferences and the first-run marker survive a logout.
pub const LOGOUT_KEYS: &[&str] = &[
    keys::USER_EMAIL,
    keys::USER_PASSWORD,
    keys::PANTRY_INGREDIENTS,
    keys::ACTIVE_INGREDIENTS,
    keys::FAVORITES,
    keys::EXCLUDED,
];

/// Seed defaults the first time the app runs
///
/// Returns true when seeding happened. Keys are written one by one; the
/// `isInitialized` marker goes last so an interrupted seed is retried.
pub async fn initialize_first_run(store: &dyn KeyValueStore, catalog: &Catalog) -> Result<bool> {
    if store.get(keys::IS_INITIALIZED).await?.is_some() {
        return Ok(false);
    }

    let empty = serde_json::to_string(&Vec::<String>::new())?;
    store
        .set(keys::PANTRY_INGREDIENTS, &serde_json::to_string(catalog.default_pantry())?)
        .await?;
    store.set(keys::ACTIVE_INGREDIENTS, &empty).await?;
    store.set(keys::FAVORITES, &empty).await?;
    store.set(keys::EXCLUDED, &empty).await?;
    store.set(keys::IS_INITIALIZED, "true").await?;

    info!("First run: seeded default pantry");
    Ok(true)
}

/// Check credentials against the demo accounts and remember the user
pub async fn login(store: &dyn KeyValueStore, email: &str, password: &str) -> Result<()> {
    if !DEMO_USERS.iter().any(|(e, p)| *e == email && *p == password) {
        return Err(Error::InvalidCredentials);
    }
    store.set(keys::USER_EMAIL, email).await?;
    store.set(keys::USER_PASSWORD, password).await?;
    info!("Logged in as {}", email);
    Ok(())
}

/// Email of the logged-in user, if both credential keys are present
pub async fn current_user(store: &dyn KeyValueStore) -> Result<Option<String>> {
    let email = store.get(keys::USER_EMAIL).await?;
    let password = store.get(keys::USER_PASSWORD).await?;
    Ok(match (email, password) {
        (Some(email), Some(password)) if !email.is_empty() && !password.is_empty() => Some(email),
        _ => None,
    })
}

pub async fn is_logged_in(store: &dyn KeyValueStore) -> Result<bool> {
    Ok(current_user(store).await?.is_some())
}

/// Forget the user and their pantry, favorites and exclusions
pub async fn logout(store: &dyn KeyValueStore) -> Result<()> {
    store.remove(LOGOUT_KEYS).await?;
    info!("Logged out");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::MemoryKvStore;

    #[tokio::test]
    async fn test_first_run_seeds_once() {
        let store = MemoryKvStore::new();
        let catalog = Catalog::builtin();

        assert!(initialize_first_run(&store, &catalog).await.unwrap());
        assert_eq!(store.get(keys::IS_INITIALIZED).await.unwrap().as_deref(), Some("true"));
        assert_eq!(store.get(keys::FAVORITES).await.unwrap().as_deref(), Some("[]"));

        // User changes survive a second call
        store.set(keys::FAVORITES, r#"["2"]"#).await.unwrap();
        assert!(!initialize_first_run(&store, &catalog).await.unwrap());
        assert_eq!(store.get(keys::FAVORITES).await.unwrap().as_deref(), Some(r#"["2"]"#));
    }

    #[tokio::test]
    async fn test_login_accepts_demo_account() {
        let store = MemoryKvStore::new();
        assert!(!is_logged_in(&store).await.unwrap());

        login(&store, "test", "test").await.unwrap();
        assert!(is_logged_in(&store).await.unwrap());
        assert_eq!(current_user(&store).await.unwrap().as_deref(), Some("test"));
    }

    #[tokio::test]
    async fn test_login_rejects_bad_credentials() {
        let store = MemoryKvStore::new();
        assert!(matches!(login(&store, "test", "wrong").await, Err(Error::InvalidCredentials)));
        assert!(matches!(login(&store, "", "").await, Err(Error::InvalidCredentials)));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_half_stored_credentials_are_not_a_login() {
        let store = MemoryKvStore::new();
        store.set(keys::USER_EMAIL, "test").await.unwrap();
        assert!(!is_logged_in(&store).await.unwrap());
    }

    #[tokio::test]
    async fn test_logout_keeps_diets_and_marker() {
        let store = MemoryKvStore::new();
        initialize_first_run(&store, &Catalog::builtin()).await.unwrap();
        login(&store, "test", "test").await.unwrap();
        store.set(keys::ACTIVE_DIETS, r#"["vegan"]"#).await.unwrap();

        logout(&store).await.unwrap();

        assert!(!is_logged_in(&store).await.unwrap());
        for key in LOGOUT_KEYS {
            assert!(store.get(key).await.unwrap().is_none(), "{} should be cleared", key);
        }
        assert!(store.get(keys::ACTIVE_DIETS).await.unwrap().is_some());
        assert!(store.get(keys::IS_INITIALIZED).await.unwrap().is_some());
    }
}
