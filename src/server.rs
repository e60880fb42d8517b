use crate::handlers;
use crate::state::AppState;
use axum::{
    http::Method,
    routing::{get, post, put},
    Router,
};
use hyper::Server;
use std::net::SocketAddr;
use std::path::Path;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tracing::info;

/// Create the HTTP server with all routes.
///
/// `assets_dir` is served under `/assets`; that is where menu `imagePath`s
/// resolve.
pub fn create_server(state: AppState, assets_dir: &Path) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health))
        .nest_service("/assets", ServeDir::new(assets_dir))
        // Public reads
        .route("/api/categories", get(handlers::list_categories))
        .route("/api/menu", get(handlers::get_menu))
        .route("/api/menu/:category", get(handlers::get_category))
        .route("/api/session", get(handlers::get_session))
        // Per-session editor
        .route("/api/editor", get(handlers::get_editor))
        .route("/api/editor/category", post(handlers::select_category))
        .route("/api/editor/add", post(handlers::begin_add))
        .route("/api/editor/edit", post(handlers::begin_edit))
        .route("/api/editor/staging", put(handlers::update_staging))
        .route("/api/editor/commit", post(handlers::commit))
        .route("/api/editor/cancel", post(handlers::cancel))
        .route("/api/editor/delete", post(handlers::delete_item))
        .route("/api/editor/refresh", post(handlers::refresh))
        .layer(ServiceBuilder::new().layer(cors))
        .with_state(state)
}

/// Start the HTTP server on the specified port
pub async fn start_server(state: AppState, assets_dir: &Path, port: u16) -> anyhow::Result<()> {
    let app = create_server(state, assets_dir);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    info!("HTTP server running on http://localhost:{port}");
    info!("Health check: http://localhost:{port}/health");
    info!("Menu:         http://localhost:{port}/api/menu");

    Server::bind(&addr).serve(app.into_make_service()).await?;

    Ok(())
}
