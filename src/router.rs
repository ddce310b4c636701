use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::AppState;

/// Build the application router with all routes
pub fn build(state: Arc<AppState>, frontend_dir: &str) -> Router {
    Router::new()
        .route("/api/health", get(handlers::healthcheck))
        // Port details page hydration
        .route("/api/port-details/hydrate", post(handlers::port_details::hydrate_port_details))
        // Port cache routes (written by the switch listing page)
        .route("/api/port-cache/:switch_id", get(handlers::port_cache::list_port_cache_entries))
        .route(
            "/api/port-cache/:switch_id/:port_number",
            get(handlers::port_cache::get_port_cache_entry)
                .put(handlers::port_cache::put_port_cache_entry)
                .delete(handlers::port_cache::delete_port_cache_entry),
        )
        // Static files (frontend)
        .fallback_service(ServeDir::new(frontend_dir).fallback(
            tower_http::services::ServeFile::new(format!("{}/index.html", frontend_dir)),
        ))
        // Add state and middleware
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}
