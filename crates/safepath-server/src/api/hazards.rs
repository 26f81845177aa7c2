//! Hazard zone API endpoints.
//!
//! CRUD operations for the active hazard set used by route computations.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use safepath_core::HazardZone;

use crate::api::routes::bad_request;
use crate::state::AppState;

/// List all current hazard zones.
pub async fn list_hazards(State(state): State<Arc<AppState>>) -> Json<Vec<HazardZone>> {
    Json(state.get_hazards())
}

/// Add a hazard zone. A zone with an existing id replaces it.
pub async fn create_hazard(
    State(state): State<Arc<AppState>>,
    Json(hazard): Json<HazardZone>,
) -> Result<(StatusCode, Json<HazardZone>), (StatusCode, Json<serde_json::Value>)> {
    if let Err(err) = hazard.validate() {
        return Err(bad_request(&err.to_string(), None));
    }

    let stored = state.add_hazard(hazard);
    tracing::info!(
        "Added hazard zone: {} (Level {})",
        stored.name,
        stored.level
    );
    Ok((StatusCode::CREATED, Json(stored)))
}

/// Get a hazard zone by id.
pub async fn get_hazard(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<HazardZone>, StatusCode> {
    state.get_hazard(&id).map(Json).ok_or(StatusCode::NOT_FOUND)
}

/// Delete a hazard zone by id.
pub async fn delete_hazard(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    if state.remove_hazard(&id) {
        tracing::info!("Deleted hazard zone {}", id);
        Ok(Json(serde_json::json!({
            "message": format!("Hazard zone {id} deleted")
        })))
    } else {
        Err(StatusCode::NOT_FOUND)
    }
}
