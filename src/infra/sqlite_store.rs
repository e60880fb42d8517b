use crate::app::ports::CatalogStore;
use crate::domain::{Catalog, Category, ItemRef, MenuItem, MenuItemDraft};
use crate::error::{MenuError, Result};
use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, info};
use uuid::Uuid;

const SCHEMA: &str = r#"
    PRAGMA journal_mode=WAL;
    CREATE TABLE IF NOT EXISTS menu_items (
        id          TEXT PRIMARY KEY,
        category    TEXT NOT NULL,
        position    INTEGER NOT NULL,
        name        TEXT NOT NULL,
        description TEXT NOT NULL,
        price       TEXT NOT NULL,
        image_path  TEXT NOT NULL
    );
    CREATE INDEX IF NOT EXISTS menu_items_by_category
        ON menu_items (category, position);
"#;

/// Catalog persisted in a local SQLite file. Positions are kept dense
/// (0..n) per category.
pub struct SqliteCatalogStore {
    conn: Mutex<Connection>,
}

impl SqliteCatalogStore {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        conn.execute_batch(SCHEMA)?;
        info!("Opened SQLite catalog at {}", path.display());
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| MenuError::Storage {
            message: "SQLite connection lock poisoned".to_string(),
        })
    }

    fn read_category(conn: &Connection, category: Category) -> Result<Vec<MenuItem>> {
        let mut stmt = conn.prepare(
            "SELECT id, name, description, price, image_path FROM menu_items
             WHERE category = ?1 ORDER BY position",
        )?;
        let rows = stmt.query_map(params![category.key()], row_to_parts)?;
        let mut items = Vec::new();
        for row in rows {
            items.push(parts_to_item(row?)?);
        }
        Ok(items)
    }

    /// Resolve `target` to `(id, position)` inside `category`.
    fn locate(conn: &Connection, category: Category, target: ItemRef) -> Result<(Uuid, i64)> {
        match target {
            ItemRef::Position(position) => {
                let id: Option<String> = conn
                    .query_row(
                        "SELECT id FROM menu_items WHERE category = ?1 AND position = ?2",
                        params![category.key(), position as i64],
                        |row| row.get(0),
                    )
                    .optional()?;
                match id {
                    Some(id) => Ok((parse_id(&id)?, position as i64)),
                    None => {
                        let len: i64 = conn.query_row(
                            "SELECT COUNT(*) FROM menu_items WHERE category = ?1",
                            params![category.key()],
                            |row| row.get(0),
                        )?;
                        Err(MenuError::InvalidPosition {
                            category,
                            position,
                            len: len as usize,
                        })
                    }
                }
            }
            ItemRef::Id(id) => conn
                .query_row(
                    "SELECT position FROM menu_items WHERE category = ?1 AND id = ?2",
                    params![category.key(), id.to_string()],
                    |row| row.get::<_, i64>(0),
                )
                .optional()?
                .map(|position| (id, position))
                .ok_or(MenuError::UnknownItem { category, id }),
        }
    }
}

type RowParts = (String, String, String, String, String);

fn row_to_parts(row: &Row<'_>) -> rusqlite::Result<RowParts> {
    Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?, row.get(4)?))
}

fn parts_to_item((id, name, description, price, image_path): RowParts) -> Result<MenuItem> {
    Ok(MenuItem {
        id: parse_id(&id)?,
        name,
        description,
        price,
        image_path,
    })
}

fn parse_id(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw).map_err(|e| MenuError::Storage {
        message: format!("corrupt item id '{raw}': {e}"),
    })
}

#[async_trait]
impl CatalogStore for SqliteCatalogStore {
    async fn read(&self, category: Category) -> Result<Vec<MenuItem>> {
        let conn = self.lock()?;
        Self::read_category(&conn, category)
    }

    async fn read_all(&self) -> Result<Catalog> {
        let conn = self.lock()?;
        let mut catalog = Catalog::new();
        for category in Category::ALL {
            catalog.set_items(category, Self::read_category(&conn, category)?);
        }
        Ok(catalog)
    }

    async fn append(&self, category: Category, draft: MenuItemDraft) -> Result<MenuItem> {
        let conn = self.lock()?;
        let item = MenuItem::from_draft(Uuid::new_v4(), draft);
        conn.execute(
            "INSERT INTO menu_items (id, category, position, name, description, price, image_path)
             VALUES (?1, ?2,
                     (SELECT COALESCE(MAX(position) + 1, 0) FROM menu_items WHERE category = ?2),
                     ?3, ?4, ?5, ?6)",
            params![
                item.id.to_string(),
                category.key(),
                item.name,
                item.description,
                item.price,
                item.image_path
            ],
        )?;
        debug!("Appended {} to {}", item.id, category);
        Ok(item)
    }

    async fn replace(
        &self,
        category: Category,
        target: ItemRef,
        draft: MenuItemDraft,
    ) -> Result<MenuItem> {
        let conn = self.lock()?;
        let (id, _) = Self::locate(&conn, category, target)?;
        let item = MenuItem::from_draft(id, draft);
        conn.execute(
            "UPDATE menu_items SET name = ?1, description = ?2, price = ?3, image_path = ?4
             WHERE id = ?5",
            params![
                item.name,
                item.description,
                item.price,
                item.image_path,
                id.to_string()
            ],
        )?;
        debug!("Replaced {} in {}", id, category);
        Ok(item)
    }

    async fn remove(&self, category: Category, target: ItemRef) -> Result<MenuItem> {
        let mut conn = self.lock()?;
        let (id, position) = Self::locate(&conn, category, target)?;
        let removed = conn.query_row(
            "SELECT id, name, description, price, image_path FROM menu_items WHERE id = ?1",
            params![id.to_string()],
            row_to_parts,
        )?;

        let tx = conn.transaction()?;
        tx.execute("DELETE FROM menu_items WHERE id = ?1", params![id.to_string()])?;
        tx.execute(
            "UPDATE menu_items SET position = position - 1 WHERE category = ?1 AND position > ?2",
            params![category.key(), position],
        )?;
        tx.commit()?;

        debug!("Removed {} from {}", id, category);
        parts_to_item(removed)
    }

    async fn replace_all(&self, catalog: &Catalog) -> Result<()> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM menu_items", [])?;
        for (category, items) in catalog.iter() {
            for (position, item) in items.iter().enumerate() {
                tx.execute(
                    "INSERT INTO menu_items (id, category, position, name, description, price, image_path)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                    params![
                        item.id.to_string(),
                        category.key(),
                        position as i64,
                        item.name,
                        item.description,
                        item.price,
                        item.image_path
                    ],
                )?;
            }
        }
        tx.commit()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::seed_catalog;

    #[tokio::test]
    async fn test_replace_all_then_read_back() {
        let store = SqliteCatalogStore::open_in_memory().unwrap();
        let seed = seed_catalog();
        store.replace_all(&seed).await.unwrap();
        assert_eq!(store.read_all().await.unwrap(), seed);
    }

    #[tokio::test]
    async fn test_append_goes_last() {
        let store = SqliteCatalogStore::open_in_memory().unwrap();
        store.replace_all(&seed_catalog()).await.unwrap();

        let added = store
            .append(
                Category::Entrees,
                MenuItemDraft::new("Accras", "Morue", "9€", "/entrees/accras.jpg"),
            )
            .await
            .unwrap();

        let items = store.read(Category::Entrees).await.unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[2], added);
    }

    #[tokio::test]
    async fn test_append_to_empty_category_starts_at_zero() {
        let store = SqliteCatalogStore::open_in_memory().unwrap();
        store
            .append(Category::Desserts, MenuItemDraft::new("Flan", "Coco", "7€", "/d/flan.jpg"))
            .await
            .unwrap();
        let found = SqliteCatalogStore::locate(
            &store.lock().unwrap(),
            Category::Desserts,
            ItemRef::Position(0),
        );
        assert!(found.is_ok());
    }

    #[tokio::test]
    async fn test_remove_shifts_positions() {
        let store = SqliteCatalogStore::open_in_memory().unwrap();
        store.replace_all(&seed_catalog()).await.unwrap();
        let before = store.read(Category::Entrees).await.unwrap();

        let removed = store
            .remove(Category::Entrees, ItemRef::Position(0))
            .await
            .unwrap();
        assert_eq!(removed, before[0]);

        let after = store.read(Category::Entrees).await.unwrap();
        assert_eq!(after, vec![before[1].clone()]);

        // The survivor now answers to position 0.
        let err = store
            .remove(Category::Entrees, ItemRef::Position(1))
            .await
            .unwrap_err();
        assert!(matches!(err, MenuError::InvalidPosition { len: 1, .. }));
    }
}
