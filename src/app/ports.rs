use crate::domain::{Catalog, Category, ItemRef, MenuItem, MenuItemDraft, Session};
use crate::error::Result;
use async_trait::async_trait;

/// Persistence port for the carte.
///
/// Adapters perform no authorization or validation; wrap them in
/// [`crate::app::GuardedStore`] before handing them to callers.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Items of one category in display order.
    async fn read(&self, category: Category) -> Result<Vec<MenuItem>>;

    async fn read_all(&self) -> Result<Catalog> {
        let mut catalog = Catalog::new();
        for category in Category::ALL {
            catalog.set_items(category, self.read(category).await?);
        }
        Ok(catalog)
    }

    /// Store a new item at the end of `category`, assigning its id.
    async fn append(&self, category: Category, draft: MenuItemDraft) -> Result<MenuItem>;

    /// Overwrite the item in place, keeping its id and position.
    async fn replace(
        &self,
        category: Category,
        target: ItemRef,
        draft: MenuItemDraft,
    ) -> Result<MenuItem>;

    /// Remove the item; later items shift down by one.
    async fn remove(&self, category: Category, target: ItemRef) -> Result<MenuItem>;

    /// Overwrite the whole carte.
    async fn replace_all(&self, catalog: &Catalog) -> Result<()>;
}

/// Maps a bearer token to the session it stands for.
pub trait SessionResolver: Send + Sync {
    /// Unknown or missing tokens resolve to the anonymous session.
    fn resolve(&self, token: Option<&str>) -> Session;
}
