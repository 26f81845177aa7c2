//! REST API routes.

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use std::sync::Arc;

use crate::api::{hazards, routing};
use crate::state::AppState;

/// Create the API router.
pub fn create_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health_check))
        // Route computation
        .route("/v1/routes", post(routing::calculate_route))
        .route("/v1/routes/:route_id/stats", get(routing::get_route_stats))
        .route("/v1/routes/:route_id/map", get(routing::get_route_map))
        // Hazard zone CRUD
        .route(
            "/v1/hazards",
            get(hazards::list_hazards).post(hazards::create_hazard),
        )
        .route(
            "/v1/hazards/:id",
            get(hazards::get_hazard).delete(hazards::delete_hazard),
        )
}

async fn health_check(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": Utc::now().to_rfc3339(),
        "hazard_zones": state.hazard_count(),
        "cached_routes": state.cached_route_count(),
        "cached_graphs": state.cached_graph_count(),
    }))
}

/// Uniform error payload for validation failures.
pub fn bad_request(message: &str, field: Option<&str>) -> (StatusCode, Json<serde_json::Value>) {
    let mut payload = serde_json::json!({ "error": message });
    if let Some(field) = field {
        payload["field"] = serde_json::Value::String(field.to_string());
    }
    (StatusCode::BAD_REQUEST, Json(payload))
}
