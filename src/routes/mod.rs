use axum::Router;

use crate::state::SharedState;

/// Swagger UI and OpenAPI document.
pub mod docs;
/// Health check route.
pub mod health;
/// Static wheel and control pages.
pub mod pages;
/// Rig slot and spin log endpoints.
pub mod relay;

/// Compose all route trees, wiring in shared state, documentation and static pages.
pub fn router(state: SharedState) -> Router<()> {
    let api_router = health::router().merge(relay::router());

    let docs_router = docs::router();
    let pages_router = pages::router(state.config().static_dir());

    api_router
        .merge(docs_router)
        .merge(pages_router)
        .with_state(state)
}
