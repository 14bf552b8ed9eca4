use crate::AppState;
use axum::{Router, routing::get};
use std::path::Path;
use tower_http::services::ServeDir;

mod items;

async fn health() -> &'static str {
    "OK"
}

/// Builds the full route tree: the listings API plus read-only static serving
/// of the upload directory.
pub fn create_router<S: AppState>(upload_root: &Path) -> Router<S> {
    Router::new()
        .route("/health", get(health))
        .merge(items::create_items_router())
        .nest_service("/uploads", ServeDir::new(upload_root))
}
