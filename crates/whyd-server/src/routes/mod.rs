//! HTTP routes: the consent page, visit stats and static assets.

pub mod consent;
pub mod stats;

use std::sync::Arc;

use axum::Router;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the main Axum router with all routes.
pub fn build_router(state: Arc<AppState>) -> Router {
    let public_dir = state.config.public_dir.clone();

    Router::new()
        .merge(consent::routes())
        .nest("/api", stats::routes())
        .nest_service("/css", ServeDir::new(public_dir.join("css")))
        .nest_service("/images", ServeDir::new(public_dir.join("images")))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
