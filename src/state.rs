use crate::app::{CatalogEditor, GuardedStore, SessionResolver};
use crate::error::Result;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

/// Shared by every request handler.
#[derive(Clone)]
pub struct AppState {
    pub store: GuardedStore,
    pub sessions: Arc<dyn SessionResolver>,
    pub editors: EditorRegistry,
}

impl AppState {
    pub fn new(store: GuardedStore, sessions: Arc<dyn SessionResolver>) -> Self {
        Self {
            store,
            sessions,
            editors: EditorRegistry::default(),
        }
    }
}

/// One editor per session token. Each editor sits behind its own lock, so
/// operations on it (commits included) never overlap.
#[derive(Clone, Default)]
pub struct EditorRegistry {
    editors: Arc<Mutex<HashMap<String, Arc<Mutex<CatalogEditor>>>>>,
}

impl EditorRegistry {
    pub async fn get_or_open(
        &self,
        token: &str,
        store: &GuardedStore,
    ) -> Result<Arc<Mutex<CatalogEditor>>> {
        let mut editors = self.editors.lock().await;
        if let Some(editor) = editors.get(token) {
            return Ok(editor.clone());
        }
        let editor = Arc::new(Mutex::new(CatalogEditor::open(store.clone()).await?));
        editors.insert(token.to_string(), editor.clone());
        debug!(open_editors = editors.len(), "Opened editor for new session");
        Ok(editor)
    }
}
