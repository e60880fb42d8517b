//! Adapters implementing the application ports.

pub mod in_memory_store;
pub mod sqlite_store;
pub mod static_sessions;

pub use in_memory_store::InMemoryCatalogStore;
pub use sqlite_store::SqliteCatalogStore;
pub use static_sessions::StaticSessionResolver;
