//! f2f library - command-line front end for fridge2fork
//!
//! Each subcommand plays the role of one app screen. All state lives in the
//! explicitly constructed [`App`]; nothing is global.

use std::sync::Arc;

use f2f_common::kv::KeyValueStore;
use f2f_common::{session, Catalog, DietaryStore, FavoritesTracker, PantryStore, Persister};
use tracing::{info, warn};

pub mod commands;
pub mod error;

pub use commands::{Command, DietAction, PantryAction};
pub use error::{CliError, Result};

/// Stores and collaborators for one invocation
pub struct App {
    catalog: Arc<Catalog>,
    kv: Arc<dyn KeyValueStore>,
    persister: Persister,
    pantry: PantryStore,
    dietary: DietaryStore,
    favorites: FavoritesTracker,
}

impl App {
    /// Seed first-run data if needed, then hydrate every store
    pub async fn open(kv: Arc<dyn KeyValueStore>, catalog: Arc<Catalog>) -> Self {
        match session::initialize_first_run(kv.as_ref(), &catalog).await {
            Ok(true) => info!("Initialized fresh data folder"),
            Ok(false) => {}
            Err(e) => warn!("First-run initialization failed: {}", e),
        }

        let persister = Persister::spawn(Arc::clone(&kv));
        let pantry = PantryStore::load(persister.clone(), &catalog).await;
        let dietary = DietaryStore::load(persister.clone(), Arc::clone(&catalog)).await;
        let favorites = FavoritesTracker::load(persister.clone()).await;

        Self {
            catalog,
            kv,
            persister,
            pantry,
            dietary,
            favorites,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn pantry(&self) -> &PantryStore {
        &self.pantry
    }

    pub fn dietary(&self) -> &DietaryStore {
        &self.dietary
    }

    pub fn favorites(&self) -> &FavoritesTracker {
        &self.favorites
    }

    /// Wait for queued writes to reach storage
    pub async fn shutdown(&self) {
        self.persister.flush().await;
    }
}
