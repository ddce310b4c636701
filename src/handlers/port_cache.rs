use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::models::*;
use crate::AppState;

use super::ApiError;

/// List cached ports for a switch
pub async fn list_port_cache_entries(
    State(state): State<Arc<AppState>>,
    Path(switch_id): Path<String>,
) -> Result<Json<Vec<PortCacheEntry>>, ApiError> {
    let entries = state.store.list_port_cache_entries(&switch_id).await?;
    Ok(Json(entries))
}

/// Get a single cached port entry
pub async fn get_port_cache_entry(
    State(state): State<Arc<AppState>>,
    Path((switch_id, port_number)): Path<(String, u32)>,
) -> Result<Json<PortCacheEntry>, ApiError> {
    let entry = state.store.get_port_cache_entry(&switch_id, port_number).await?;
    Ok(Json(entry))
}

/// Store the serialized record the listing page hands over before navigating.
/// The body is kept verbatim, as the browser store would.
pub async fn put_port_cache_entry(
    State(state): State<Arc<AppState>>,
    Path((switch_id, port_number)): Path<(String, u32)>,
    body: String,
) -> Result<Json<PortCacheEntry>, ApiError> {
    if switch_id.trim().is_empty() {
        return Err(ApiError::bad_request("switch_id is required"));
    }
    let entry = state
        .store
        .put_port_cache_entry(&switch_id, port_number, &body)
        .await?;
    tracing::debug!("Cached port details under {}", entry.key);
    Ok(Json(entry))
}

/// Delete a cached port entry
pub async fn delete_port_cache_entry(
    State(state): State<Arc<AppState>>,
    Path((switch_id, port_number)): Path<(String, u32)>,
) -> Result<StatusCode, ApiError> {
    state.store.delete_port_cache_entry(&switch_id, port_number).await?;
    Ok(StatusCode::NO_CONTENT)
}
