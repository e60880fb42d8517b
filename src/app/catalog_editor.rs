use super::guarded_store::GuardedStore;
use crate::domain::{
    Catalog, Category, ItemRef, MenuItem, MenuItemDraft, Session, StagingField,
};
use crate::error::{MenuError, Result};
use crate::metrics;
use serde::Serialize;
use tracing::{debug, warn};
use uuid::Uuid;

/// What the rendering surface needs to know: show the list, or the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum EditorState {
    Viewing,
    Adding,
    Editing { position: usize },
}

/// The staging buffer lives inside the mode, so at most one exists and
/// adding and editing can never overlap.
#[derive(Debug, Clone)]
enum Mode {
    Viewing,
    Adding {
        category: Category,
        draft: MenuItemDraft,
    },
    Editing {
        category: Category,
        item_id: Uuid,
        position: usize,
        draft: MenuItemDraft,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    /// Commit while viewing.
    Nothing,
    Added(MenuItem),
    Updated { position: usize, item: MenuItem },
}

/// One viewer's editing session over the carte.
pub struct CatalogEditor {
    store: GuardedStore,
    catalog: Catalog,
    active: Category,
    mode: Mode,
}

impl CatalogEditor {
    /// Load the current carte from the store.
    pub async fn open(store: GuardedStore) -> Result<Self> {
        let catalog = store.read_all().await?;
        Ok(Self::with_catalog(store, catalog))
    }

    pub fn with_catalog(store: GuardedStore, catalog: Catalog) -> Self {
        Self {
            store,
            catalog,
            active: Category::default(),
            mode: Mode::Viewing,
        }
    }

    pub fn active_category(&self) -> Category {
        self.active
    }

    /// Items of the active category in display order.
    pub fn items(&self) -> &[MenuItem] {
        self.catalog.items(self.active)
    }

    pub fn items_in(&self, category: Category) -> &[MenuItem] {
        self.catalog.items(category)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn state(&self) -> EditorState {
        match &self.mode {
            Mode::Viewing => EditorState::Viewing,
            Mode::Adding { .. } => EditorState::Adding,
            Mode::Editing { position, .. } => EditorState::Editing {
                position: *position,
            },
        }
    }

    pub fn staging(&self) -> Option<&MenuItemDraft> {
        match &self.mode {
            Mode::Viewing => None,
            Mode::Adding { draft, .. } | Mode::Editing { draft, .. } => Some(draft),
        }
    }

    /// Whether add/edit/delete controls should be shown to this viewer.
    pub fn can_edit(&self, session: &Session) -> bool {
        session.is_admin()
    }

    /// Switch by key. Unknown keys are ignored and return `false`.
    pub fn select_category(&mut self, key: &str) -> bool {
        match key.parse::<Category>() {
            Ok(category) => {
                self.select(category);
                true
            }
            Err(_) => {
                debug!(key, "Ignoring unknown category");
                false
            }
        }
    }

    /// Switching away mid-edit cancels the edit.
    pub fn select(&mut self, category: Category) {
        if category == self.active {
            return;
        }
        if !matches!(self.mode, Mode::Viewing) {
            debug!(from = %self.active, to = %category, "Category switch cancels in-progress edit");
            self.mode = Mode::Viewing;
        }
        self.active = category;
    }

    pub fn begin_add(&mut self, session: &Session) -> Result<()> {
        Self::require_admin(session, "begin_add")?;
        self.require_viewing()?;
        self.mode = Mode::Adding {
            category: self.active,
            draft: MenuItemDraft::default(),
        };
        debug!(category = %self.active, "Adding");
        Ok(())
    }

    pub fn begin_edit(&mut self, session: &Session, target: ItemRef) -> Result<()> {
        Self::require_admin(session, "begin_edit")?;
        self.require_viewing()?;
        let category = self.active;
        let position = self
            .catalog
            .resolve(category, target)
            .map_err(rejected)?;
        let item = &self.catalog.items(category)[position];
        self.mode = Mode::Editing {
            category,
            item_id: item.id,
            position,
            draft: item.to_draft(),
        };
        debug!(category = %category, position, "Editing");
        Ok(())
    }

    /// Returns `false` (and changes nothing) while viewing.
    pub fn update_staging_field(&mut self, field: StagingField, value: impl Into<String>) -> bool {
        match &mut self.mode {
            Mode::Viewing => false,
            Mode::Adding { draft, .. } | Mode::Editing { draft, .. } => {
                draft.set(field, value);
                true
            }
        }
    }

    /// Validate the staging buffer and write it through the store.
    /// On any error the editor stays where it was so the caller can retry.
    pub async fn commit(&mut self, session: &Session) -> Result<CommitOutcome> {
        let outcome = match &self.mode {
            Mode::Viewing => return Ok(CommitOutcome::Nothing),
            Mode::Adding { category, draft } => {
                draft.validate().map_err(rejected)?;
                let item = self.store.append(session, *category, draft.clone()).await?;
                self.catalog.push(*category, item.clone());
                CommitOutcome::Added(item)
            }
            Mode::Editing {
                category,
                item_id,
                position,
                draft,
            } => {
                draft.validate().map_err(rejected)?;
                let item = self
                    .store
                    .replace(session, *category, ItemRef::Id(*item_id), draft.clone())
                    .await?;
                if let Err(e) = self
                    .catalog
                    .replace(*category, ItemRef::Id(item.id), item.clone())
                {
                    warn!("Local view out of sync after update: {}", e);
                }
                CommitOutcome::Updated {
                    position: *position,
                    item,
                }
            }
        };
        self.mode = Mode::Viewing;
        debug!("Committed, back to viewing");
        Ok(outcome)
    }

    /// Drop the staging buffer. Returns whether there was one.
    pub fn cancel(&mut self) -> bool {
        let had_draft = !matches!(self.mode, Mode::Viewing);
        self.mode = Mode::Viewing;
        had_draft
    }

    /// Remove an item of the active category. Later items shift down by one.
    ///
    /// Deliberate extra precondition: the item under edit cannot be removed
    /// (`EditInProgress`), so the staging buffer never refers to a vanished
    /// item. Deleting any other item leaves the staging buffer untouched.
    pub async fn delete_item(&mut self, session: &Session, target: ItemRef) -> Result<MenuItem> {
        Self::require_admin(session, "delete_item")?;
        let category = self.active;
        let position = self
            .catalog
            .resolve(category, target)
            .map_err(rejected)?;
        let id = self.catalog.items(category)[position].id;
        if let Mode::Editing { item_id, .. } = &self.mode {
            if *item_id == id {
                return Err(rejected(MenuError::EditInProgress));
            }
        }

        let removed = self
            .store
            .remove(session, category, ItemRef::Id(id))
            .await?;
        if let Err(e) = self.catalog.remove(category, ItemRef::Id(id)) {
            warn!("Local view out of sync after delete: {}", e);
        }
        if let Mode::Editing {
            category: editing,
            position: editing_position,
            ..
        } = &mut self.mode
        {
            if *editing == category && *editing_position > position {
                *editing_position -= 1;
            }
        }
        Ok(removed)
    }

    /// Reload the view from the store. An edit whose item disappeared is cancelled.
    pub async fn refresh(&mut self) -> Result<()> {
        self.catalog = self.store.read_all().await?;
        let vanished = match &mut self.mode {
            Mode::Editing {
                category,
                item_id,
                position,
                ..
            } => match self.catalog.resolve(*category, ItemRef::Id(*item_id)) {
                Ok(p) => {
                    *position = p;
                    false
                }
                Err(_) => true,
            },
            _ => false,
        };
        if vanished {
            warn!("Item under edit was removed elsewhere, cancelling edit");
            self.mode = Mode::Viewing;
        }
        Ok(())
    }

    fn require_admin(session: &Session, operation: &str) -> Result<()> {
        if session.is_admin() {
            Ok(())
        } else {
            Err(rejected(MenuError::unauthorized(operation)))
        }
    }

    fn require_viewing(&self) -> Result<()> {
        if matches!(self.mode, Mode::Viewing) {
            Ok(())
        } else {
            Err(rejected(MenuError::EditInProgress))
        }
    }
}

fn rejected(err: MenuError) -> MenuError {
    warn!(kind = err.kind(), "Editor operation rejected: {}", err);
    metrics::operation_rejected(&err);
    err
}
