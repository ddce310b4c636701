use axum::{extract::State, Json};
use std::sync::Arc;

use crate::hydrator::PortDetailHydrator;
use crate::models::*;
use crate::AppState;

use super::ApiError;

/// Resolve the port details page for the address it was opened with.
/// Returns either the render commands or the redirect the page must follow.
pub async fn hydrate_port_details(
    State(state): State<Arc<AppState>>,
    Json(req): Json<HydrateRequest>,
) -> Result<Json<HydrationOutcome>, ApiError> {
    let hydrator = PortDetailHydrator::new(&state.store, &state.config.app_base_path);
    let outcome = hydrator.hydrate_url(&req.url).await?;
    Ok(Json(outcome))
}
