pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod metrics;

// Domain data shapes shared across layers
pub mod domain;

// Application use case (the catalog editor) and its ports
pub mod app;
// Adapters for the ports: storage backends, session table
pub mod infra;

// HTTP surface
pub mod handlers;
pub mod models;
pub mod server;
pub mod state;

use crate::app::{CatalogStore, GuardedStore};
use crate::config::{StorageBackend, StorageConfig};
use crate::infra::{InMemoryCatalogStore, SqliteCatalogStore};
use std::sync::Arc;
use tracing::info;

/// Build the configured store, seeding it when it is empty and seeding is on.
pub async fn open_store(config: &StorageConfig) -> error::Result<GuardedStore> {
    let inner: Arc<dyn CatalogStore> = match config.backend {
        StorageBackend::Memory => {
            info!("Using in-memory catalog (changes are lost on exit)");
            Arc::new(InMemoryCatalogStore::new())
        }
        StorageBackend::Sqlite => Arc::new(SqliteCatalogStore::open(&config.path)?),
    };
    let store = GuardedStore::new(inner);
    if config.seed {
        store.seed_if_empty(&domain::seed_catalog()).await?;
    }
    Ok(store)
}
