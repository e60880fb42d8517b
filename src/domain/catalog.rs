use super::category::Category;
use super::menu_item::{ItemRef, MenuItem};
use crate::error::{MenuError, Result};
use serde::{Deserialize, Serialize};

/// Category → ordered items. Indexed by `Category`, so every key is always
/// present exactly once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "CatalogRecord", into = "CatalogRecord")]
pub struct Catalog {
    sections: [Vec<MenuItem>; 4],
}

/// Wire shape: one array per category key.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct CatalogRecord {
    #[serde(default)]
    entrees: Vec<MenuItem>,
    #[serde(default)]
    plats: Vec<MenuItem>,
    #[serde(default)]
    desserts: Vec<MenuItem>,
    #[serde(default)]
    boissons: Vec<MenuItem>,
}

impl From<CatalogRecord> for Catalog {
    fn from(r: CatalogRecord) -> Self {
        Self {
            sections: [r.entrees, r.plats, r.desserts, r.boissons],
        }
    }
}

impl From<Catalog> for CatalogRecord {
    fn from(c: Catalog) -> Self {
        let [entrees, plats, desserts, boissons] = c.sections;
        Self {
            entrees,
            plats,
            desserts,
            boissons,
        }
    }
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self, category: Category) -> &[MenuItem] {
        &self.sections[category.index()]
    }

    pub fn len(&self, category: Category) -> usize {
        self.items(category).len()
    }

    pub fn total_items(&self) -> usize {
        self.sections.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total_items() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, &[MenuItem])> + '_ {
        Category::ALL
            .into_iter()
            .map(move |c| (c, self.items(c)))
    }

    pub fn set_items(&mut self, category: Category, items: Vec<MenuItem>) {
        self.sections[category.index()] = items;
    }

    /// Resolve a reference to a position valid right now.
    pub fn resolve(&self, category: Category, target: ItemRef) -> Result<usize> {
        let items = self.items(category);
        match target {
            ItemRef::Position(position) if position < items.len() => Ok(position),
            ItemRef::Position(position) => Err(MenuError::InvalidPosition {
                category,
                position,
                len: items.len(),
            }),
            ItemRef::Id(id) => items
                .iter()
                .position(|item| item.id == id)
                .ok_or(MenuError::UnknownItem { category, id }),
        }
    }

    pub fn get(&self, category: Category, target: ItemRef) -> Result<&MenuItem> {
        let position = self.resolve(category, target)?;
        Ok(&self.items(category)[position])
    }

    pub fn push(&mut self, category: Category, item: MenuItem) {
        self.sections[category.index()].push(item);
    }

    /// Overwrite in place. Returns the previous item.
    pub fn replace(
        &mut self,
        category: Category,
        target: ItemRef,
        item: MenuItem,
    ) -> Result<MenuItem> {
        let position = self.resolve(category, target)?;
        Ok(std::mem::replace(
            &mut self.sections[category.index()][position],
            item,
        ))
    }

    /// Remove and shift every later item down by one.
    pub fn remove(&mut self, category: Category, target: ItemRef) -> Result<MenuItem> {
        let position = self.resolve(category, target)?;
        Ok(self.sections[category.index()].remove(position))
    }
}
