//! Application layer: the catalog editor use case and the ports it depends on.

pub mod catalog_editor;
pub mod guarded_store;
pub mod ports;

pub use catalog_editor::{CatalogEditor, CommitOutcome, EditorState};
pub use guarded_store::GuardedStore;
pub use ports::{CatalogStore, SessionResolver};
