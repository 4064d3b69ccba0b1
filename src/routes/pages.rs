use std::path::Path;

use axum::Router;
use tower_http::services::{ServeDir, ServeFile};

use crate::state::SharedState;

/// Wheel page at `/`, control page at `/control`, everything else looked up in `static_dir`.
pub fn router(static_dir: &Path) -> Router<SharedState> {
    Router::new()
        .route_service("/", ServeFile::new(static_dir.join("index.html")))
        .route_service("/control", ServeFile::new(static_dir.join("control.html")))
        .fallback_service(ServeDir::new(static_dir))
}
