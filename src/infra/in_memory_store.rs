use crate::app::ports::CatalogStore;
use crate::domain::{Catalog, Category, ItemRef, MenuItem, MenuItemDraft};
use crate::error::{MenuError, Result};
use async_trait::async_trait;
use std::sync::{Mutex, MutexGuard};
use tracing::debug;
use uuid::Uuid;

/// In-memory storage implementation for development/testing.
/// Everything is lost when the process exits.
#[derive(Default)]
pub struct InMemoryCatalogStore {
    catalog: Mutex<Catalog>,
}

impl InMemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_catalog(catalog: Catalog) -> Self {
        Self {
            catalog: Mutex::new(catalog),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Catalog>> {
        self.catalog.lock().map_err(|_| MenuError::Storage {
            message: "in-memory catalog lock poisoned".to_string(),
        })
    }
}

#[async_trait]
impl CatalogStore for InMemoryCatalogStore {
    async fn read(&self, category: Category) -> Result<Vec<MenuItem>> {
        Ok(self.lock()?.items(category).to_vec())
    }

    async fn read_all(&self) -> Result<Catalog> {
        Ok(self.lock()?.clone())
    }

    async fn append(&self, category: Category, draft: MenuItemDraft) -> Result<MenuItem> {
        let item = MenuItem::from_draft(Uuid::new_v4(), draft);
        self.lock()?.push(category, item.clone());
        debug!("Appended {} to {}", item.id, category);
        Ok(item)
    }

    async fn replace(
        &self,
        category: Category,
        target: ItemRef,
        draft: MenuItemDraft,
    ) -> Result<MenuItem> {
        let mut catalog = self.lock()?;
        let id = catalog.get(category, target)?.id;
        let item = MenuItem::from_draft(id, draft);
        catalog.replace(category, ItemRef::Id(id), item.clone())?;
        debug!("Replaced {} in {}", id, category);
        Ok(item)
    }

    async fn remove(&self, category: Category, target: ItemRef) -> Result<MenuItem> {
        let removed = self.lock()?.remove(category, target)?;
        debug!("Removed {} from {}", removed.id, category);
        Ok(removed)
    }

    async fn replace_all(&self, catalog: &Catalog) -> Result<()> {
        *self.lock()? = catalog.clone();
        Ok(())
    }
}
