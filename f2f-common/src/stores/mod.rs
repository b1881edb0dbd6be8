//! Stateful stores mirrored to the key-value store
//!
//! Each store is explicitly constructed with a [`Persister`](crate::Persister)
//! and starts `NotReady`. `hydrate()` reads its keys once and moves it to
//! `Ready`; mutations before that are rejected with `Error::NotReady`.

pub mod dietary;
pub mod favorites;
pub mod pantry;

pub use dietary::DietaryStore;
pub use favorites::FavoritesTracker;
pub use pantry::PantryStore;

use crate::{Error, Result};
use tracing::warn;

/// Hydration state of a store (one-way: `NotReady` -> `Ready`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    NotReady,
    Ready,
}

impl LoadState {
    pub fn is_ready(self) -> bool {
        self == LoadState::Ready
    }

    fn ensure_ready(self, store: &'static str) -> Result<()> {
        if self.is_ready() {
            Ok(())
        } else {
            warn!("{} used before hydration completed", store);
            Err(Error::NotReady(store))
        }
    }
}

/// Flip membership of `id`, returning whether it is now present
fn toggle_membership(ids: &mut Vec<String>, id: &str) -> bool {
    if let Some(pos) = ids.iter().position(|existing| existing == id) {
        ids.remove(pos);
        false
    } else {
        ids.push(id.to_string());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_membership_adds_then_removes() {
        let mut ids = vec!["a".to_string()];
        assert!(toggle_membership(&mut ids, "b"));
        assert_eq!(ids, vec!["a", "b"]);
        assert!(!toggle_membership(&mut ids, "a"));
        assert_eq!(ids, vec!["b"]);
    }

    #[test]
    fn test_ensure_ready() {
        assert!(LoadState::Ready.ensure_ready("test").is_ok());
        assert!(matches!(
            LoadState::NotReady.ensure_ready("test"),
            Err(Error::NotReady("test"))
        ));
    }
}
