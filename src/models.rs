// JSON shapes exchanged with the website front end
use crate::app::{CatalogEditor, EditorState};
use crate::domain::{Category, MenuItem, MenuItemDraft, Role, Session, StagingField};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
pub struct CategoryView {
    pub id: &'static str,
    pub name: &'static str,
}

impl From<Category> for CategoryView {
    fn from(c: Category) -> Self {
        Self {
            id: c.key(),
            name: c.label(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub authenticated: bool,
    pub name: Option<String>,
    pub role: Option<Role>,
    pub can_edit: bool,
}

impl From<&Session> for SessionView {
    fn from(session: &Session) -> Self {
        Self {
            authenticated: session.is_authenticated(),
            name: session.name().map(str::to_string),
            role: session.user.as_ref().map(|u| u.role),
            can_edit: session.is_admin(),
        }
    }
}

/// Everything the menu page needs to render one editor.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorView {
    pub active_category: Category,
    pub state: EditorState,
    pub staging: Option<MenuItemDraft>,
    pub items: Vec<MenuItem>,
    pub can_edit: bool,
}

impl EditorView {
    pub fn new(editor: &CatalogEditor, session: &Session) -> Self {
        Self {
            active_category: editor.active_category(),
            state: editor.state(),
            staging: editor.staging().cloned(),
            items: editor.items().to_vec(),
            can_edit: editor.can_edit(session),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SelectCategoryRequest {
    pub category: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StagingUpdateRequest {
    pub field: String,
    #[serde(default)]
    pub value: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missing: Option<Vec<StagingField>>,
}
