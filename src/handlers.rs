use axum::{
    extract::{Path, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::app::CatalogEditor;
use crate::domain::{Catalog, Category, ItemRef, MenuItem, Session, StagingField};
use crate::error::{MenuError, Result};
use crate::models::{
    CategoryView, EditorView, ErrorBody, SelectCategoryRequest, SessionView, StagingUpdateRequest,
};
use crate::state::AppState;

impl IntoResponse for MenuError {
    fn into_response(self) -> Response {
        let status = match &self {
            MenuError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            MenuError::Unauthorized { .. } => StatusCode::FORBIDDEN,
            MenuError::Unauthenticated => StatusCode::UNAUTHORIZED,
            MenuError::InvalidPosition { .. }
            | MenuError::UnknownItem { .. }
            | MenuError::UnknownCategory(_) => StatusCode::NOT_FOUND,
            MenuError::EditInProgress => StatusCode::CONFLICT,
            MenuError::UnknownField(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let missing = match &self {
            MenuError::Validation { missing } => Some(missing.clone()),
            _ => None,
        };
        let body = ErrorBody {
            error: self.to_string(),
            kind: self.kind(),
            missing,
        };
        (status, Json(body)).into_response()
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

fn session_of(state: &AppState, headers: &HeaderMap) -> Session {
    state.sessions.resolve(bearer_token(headers))
}

/// The caller's session and editor. Editors are only handed out to
/// authenticated sessions.
async fn editor_of(
    state: &AppState,
    headers: &HeaderMap,
) -> Result<(Session, Arc<Mutex<CatalogEditor>>)> {
    let token = bearer_token(headers);
    let session = state.sessions.resolve(token);
    let token = match token {
        Some(token) if session.is_authenticated() => token,
        _ => return Err(MenuError::Unauthenticated),
    };
    let editor = state.editors.get_or_open(token, &state.store).await?;
    Ok((session, editor))
}

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "tiki-menu",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

pub async fn list_categories() -> Json<Vec<CategoryView>> {
    Json(Category::ALL.into_iter().map(CategoryView::from).collect())
}

pub async fn get_menu(State(state): State<AppState>) -> Result<Json<Catalog>> {
    Ok(Json(state.store.read_all().await?))
}

pub async fn get_category(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<Vec<MenuItem>>> {
    let category: Category = key.parse()?;
    Ok(Json(state.store.read(category).await?))
}

pub async fn get_session(State(state): State<AppState>, headers: HeaderMap) -> Json<SessionView> {
    Json(SessionView::from(&session_of(&state, &headers)))
}

pub async fn get_editor(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<EditorView>> {
    let (session, editor) = editor_of(&state, &headers).await?;
    let editor = editor.lock().await;
    Ok(Json(EditorView::new(&editor, &session)))
}

pub async fn select_category(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<SelectCategoryRequest>,
) -> Result<Json<EditorView>> {
    let (session, editor) = editor_of(&state, &headers).await?;
    let mut editor = editor.lock().await;
    // Unknown keys leave the editor as it was.
    editor.select_category(&req.category);
    Ok(Json(EditorView::new(&editor, &session)))
}

pub async fn begin_add(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<EditorView>> {
    let (session, editor) = editor_of(&state, &headers).await?;
    let mut editor = editor.lock().await;
    editor.begin_add(&session)?;
    Ok(Json(EditorView::new(&editor, &session)))
}

pub async fn begin_edit(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(target): Json<ItemRef>,
) -> Result<Json<EditorView>> {
    let (session, editor) = editor_of(&state, &headers).await?;
    let mut editor = editor.lock().await;
    editor.begin_edit(&session, target)?;
    Ok(Json(EditorView::new(&editor, &session)))
}

pub async fn update_staging(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<StagingUpdateRequest>,
) -> Result<Json<EditorView>> {
    let (session, editor) = editor_of(&state, &headers).await?;
    let field: StagingField = req.field.parse()?;
    let mut editor = editor.lock().await;
    editor.update_staging_field(field, req.value);
    Ok(Json(EditorView::new(&editor, &session)))
}

pub async fn commit(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<EditorView>> {
    let (session, editor) = editor_of(&state, &headers).await?;
    let mut editor = editor.lock().await;
    editor.commit(&session).await?;
    Ok(Json(EditorView::new(&editor, &session)))
}

pub async fn cancel(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<EditorView>> {
    let (session, editor) = editor_of(&state, &headers).await?;
    let mut editor = editor.lock().await;
    editor.cancel();
    Ok(Json(EditorView::new(&editor, &session)))
}

pub async fn delete_item(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(target): Json<ItemRef>,
) -> Result<Json<EditorView>> {
    let (session, editor) = editor_of(&state, &headers).await?;
    let mut editor = editor.lock().await;
    editor.delete_item(&session, target).await?;
    Ok(Json(EditorView::new(&editor, &session)))
}

pub async fn refresh(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<EditorView>> {
    let (session, editor) = editor_of(&state, &headers).await?;
    let mut editor = editor.lock().await;
    editor.refresh().await?;
    Ok(Json(EditorView::new(&editor, &session)))
}
