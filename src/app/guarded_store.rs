use super::ports::CatalogStore;
use crate::domain::{Catalog, Category, ItemRef, MenuItem, MenuItemDraft, Session};
use crate::error::{MenuError, Result};
use crate::metrics::{self, MutationKind};
use std::sync::Arc;
use tracing::{info, warn};

/// Data-access boundary: every write is checked against the caller's
/// session and every staged item is validated, whatever path it came from.
#[derive(Clone)]
pub struct GuardedStore {
    inner: Arc<dyn CatalogStore>,
}

impl GuardedStore {
    pub fn new(inner: Arc<dyn CatalogStore>) -> Self {
        Self { inner }
    }

    pub async fn read(&self, category: Category) -> Result<Vec<MenuItem>> {
        self.inner.read(category).await
    }

    pub async fn read_all(&self) -> Result<Catalog> {
        self.inner.read_all().await
    }

    pub async fn append(
        &self,
        session: &Session,
        category: Category,
        draft: MenuItemDraft,
    ) -> Result<MenuItem> {
        Self::authorize(session, "append")?;
        Self::validate(&draft)?;
        let item = self.inner.append(category, draft).await?;
        info!(category = %category, id = %item.id, name = %item.name, "Menu item added");
        metrics::mutation_committed(MutationKind::Add);
        Ok(item)
    }

    pub async fn replace(
        &self,
        session: &Session,
        category: Category,
        target: ItemRef,
        draft: MenuItemDraft,
    ) -> Result<MenuItem> {
        Self::authorize(session, "replace")?;
        Self::validate(&draft)?;
        let item = self.inner.replace(category, target, draft).await?;
        info!(category = %category, id = %item.id, name = %item.name, "Menu item updated");
        metrics::mutation_committed(MutationKind::Update);
        Ok(item)
    }

    pub async fn remove(
        &self,
        session: &Session,
        category: Category,
        target: ItemRef,
    ) -> Result<MenuItem> {
        Self::authorize(session, "remove")?;
        let item = self.inner.remove(category, target).await?;
        info!(category = %category, id = %item.id, name = %item.name, "Menu item removed");
        metrics::mutation_committed(MutationKind::Delete);
        Ok(item)
    }

    /// Overwrite the whole carte. Used by the `reset` command.
    pub async fn replace_all(&self, session: &Session, catalog: &Catalog) -> Result<()> {
        Self::authorize(session, "replace_all")?;
        self.inner.replace_all(catalog).await?;
        info!(items = catalog.total_items(), "Catalog replaced");
        Ok(())
    }

    /// Write `catalog` only when the store holds no item at all.
    /// Returns whether anything was written.
    pub async fn seed_if_empty(&self, catalog: &Catalog) -> Result<bool> {
        if !self.inner.read_all().await?.is_empty() {
            return Ok(false);
        }
        self.inner.replace_all(catalog).await?;
        info!(items = catalog.total_items(), "Seeded empty catalog");
        Ok(true)
    }

    fn authorize(session: &Session, operation: &str) -> Result<()> {
        if session.is_admin() {
            return Ok(());
        }
        warn!(operation, user = ?session.name(), "Rejected catalog write from non-admin session");
        let err = MenuError::unauthorized(operation);
        metrics::operation_rejected(&err);
        Err(err)
    }

    fn validate(draft: &MenuItemDraft) -> Result<()> {
        draft.validate().map_err(|err| {
            warn!("Rejected incomplete menu item: {}", err);
            metrics::operation_rejected(&err);
            err
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Role;
    use crate::infra::InMemoryCatalogStore;

    fn store() -> GuardedStore {
        GuardedStore::new(Arc::new(InMemoryCatalogStore::new()))
    }

    fn draft() -> MenuItemDraft {
        MenuItemDraft::new("Mojito", "Rhum, menthe", "11€", "/cocktails/mojito.jpg")
    }

    #[tokio::test]
    async fn test_non_admin_writes_are_rejected() {
        let store = store();
        let staff = Session::user("Marie", Role::Member);

        let err = store
            .append(&staff, Category::Boissons, draft())
            .await
            .unwrap_err();
        assert!(matches!(err, MenuError::Unauthorized { .. }));

        let err = store
            .remove(&Session::anonymous(), Category::Boissons, ItemRef::Position(0))
            .await
            .unwrap_err();
        assert!(matches!(err, MenuError::Unauthorized { .. }));

        assert!(store.read_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_draft_never_reaches_the_store() {
        let store = store();
        let admin = Session::admin("Chef");
        let mut bad = draft();
        bad.price.clear();

        let err = store.append(&admin, Category::Boissons, bad).await.unwrap_err();
        assert!(matches!(err, MenuError::Validation { .. }));
        assert!(store.read(Category::Boissons).await.unwrap().is_empty());
    }

    #[test]
    fn test_store_side_validation_is_counted() {
        let recorder = metrics_exporter_prometheus::PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();
        let runtime = tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap();

        ::metrics::with_local_recorder(&recorder, || {
            runtime.block_on(async {
                let store = store();
                let mut bad = draft();
                bad.description.clear();
                let err = store
                    .replace(
                        &Session::admin("Chef"),
                        Category::Boissons,
                        ItemRef::Position(0),
                        bad,
                    )
                    .await
                    .unwrap_err();
                assert!(matches!(err, MenuError::Validation { .. }));
            })
        });

        let rendered = handle.render();
        assert!(rendered.contains("tiki_menu_validation_failures_total 1"), "{rendered}");
    }

    #[tokio::test]
    async fn test_seed_only_when_empty() {
        let store = store();
        let admin = Session::admin("Chef");
        let seed = crate::domain::seed_catalog();

        assert!(store.seed_if_empty(&seed).await.unwrap());
        store.append(&admin, Category::Plats, draft()).await.unwrap();
        assert!(!store.seed_if_empty(&seed).await.unwrap());
        assert_eq!(store.read(Category::Plats).await.unwrap().len(), 2);
    }
}
