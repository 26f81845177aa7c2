//! Route calculation API endpoints.
//!
//! Drives the classify -> prune -> search pipeline of `safepath-core` and
//! wires its typed failures to HTTP statuses: a blocked endpoint or unknown
//! region is the caller's to fix (400), a fully severed network is 404.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Html,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use uuid::Uuid;

use safepath_core::{
    classify, find_route_between, prune, snap_to_nearest, Coordinate, HazardZone, RouteError,
    TravelMode,
};

use crate::api::routes::bad_request;
use crate::graph::GraphError;
use crate::map::render_route_map;
use crate::state::{AppState, CachedRoute, RouteStats};

#[derive(Debug, Deserialize)]
pub struct RouteRequest {
    pub start: Coordinate,
    pub end: Coordinate,
    /// Region name; the configured default region when absent.
    pub region: Option<String>,
    #[serde(default)]
    pub mode: TravelMode,
    /// Hazards above this level block edges (1-10).
    pub danger_threshold: Option<u8>,
    /// Request-scoped hazards. When present they fully replace the active
    /// set for this computation; never merged.
    pub hazards: Option<Vec<HazardZone>>,
}

#[derive(Debug, Serialize)]
pub struct RouteResponse {
    pub route_id: String,
    pub status: String,
    pub distance_km: f64,
    pub duration_estimate_min: f64,
    pub waypoints: Vec<Coordinate>,
    pub hazards_avoided: Vec<String>,
    pub map_url: String,
}

type ApiError = (StatusCode, Json<serde_json::Value>);

/// Calculate a safe route between two points.
pub async fn calculate_route(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RouteRequest>,
) -> Result<Json<RouteResponse>, ApiError> {
    let started = Instant::now();
    let config = state.config();

    request
        .start
        .validate()
        .map_err(|err| bad_request(&err.to_string(), Some("start")))?;
    request
        .end
        .validate()
        .map_err(|err| bad_request(&err.to_string(), Some("end")))?;

    let threshold = request
        .danger_threshold
        .unwrap_or(config.default_danger_threshold);
    if !(1..=10).contains(&threshold) {
        return Err(bad_request(
            "danger_threshold out of range [1, 10]",
            Some("danger_threshold"),
        ));
    }

    let region = request
        .region
        .clone()
        .unwrap_or_else(|| config.default_region.clone());
    let graph = state
        .graph(&region, request.mode)
        .map_err(graph_error_response)?;

    // Request-scoped hazards fully replace the active set.
    let hazards = match request.hazards {
        Some(hazards) => {
            for hazard in &hazards {
                if let Err(err) = hazard.validate() {
                    return Err(bad_request(&err.to_string(), Some("hazards")));
                }
            }
            hazards
        }
        None => state.get_hazards(),
    };
    if hazards.is_empty() {
        tracing::warn!("No hazards defined, calculating normal route");
    }

    let classification = classify(&graph, &hazards, threshold);
    let (safe_graph, removed_count) = prune(&graph, &classification.dangerous_edges);

    // Snap on the full graph so a neighborhood walled off by pruning is
    // reported as a blocked endpoint rather than silently rerouted.
    let start_node =
        snap_to_nearest(&graph, request.start).ok_or_else(|| route_error_response(RouteError::BlockedEndpoint))?;
    let end_node =
        snap_to_nearest(&graph, request.end).ok_or_else(|| route_error_response(RouteError::BlockedEndpoint))?;

    let route =
        find_route_between(&safe_graph, start_node, end_node).map_err(route_error_response)?;

    let waypoints: Vec<Coordinate> = route
        .path
        .iter()
        .filter_map(|&node| graph.node(node))
        .collect();

    let distance_km = route.total_length_m / 1000.0;
    let duration_min = distance_km / request.mode.average_speed_kmh() * 60.0;

    let hazards_avoided: Vec<String> = hazards
        .iter()
        .filter(|hazard| hazard.level > threshold)
        .map(|hazard| hazard.name.clone())
        .collect();

    let map_html = render_route_map(&waypoints, request.start, request.end, &hazards);

    let route_id = Uuid::new_v4().to_string();
    let stats = RouteStats {
        total_edges: graph.edge_count(),
        dangerous_edges_removed: removed_count,
        hazard_zones_processed: classification.stats.hazards_considered,
        computation_time_sec: started.elapsed().as_secs_f64(),
    };
    state.cache_route(
        route_id.clone(),
        CachedRoute::new(waypoints.clone(), map_html, stats),
    );

    let response = RouteResponse {
        map_url: format!("/v1/routes/{route_id}/map"),
        route_id,
        status: "success".to_string(),
        distance_km: round2(distance_km),
        duration_estimate_min: round1(duration_min),
        waypoints,
        hazards_avoided,
    };
    tracing::info!(
        "Route calculated: {}km, avoided {} hazards",
        response.distance_km,
        response.hazards_avoided.len()
    );
    Ok(Json(response))
}

/// Detailed statistics for a calculated route.
pub async fn get_route_stats(
    State(state): State<Arc<AppState>>,
    Path(route_id): Path<String>,
) -> Result<Json<RouteStats>, StatusCode> {
    state
        .get_cached_route(&route_id)
        .map(|route| Json(route.stats))
        .ok_or(StatusCode::NOT_FOUND)
}

/// Interactive HTML map for a calculated route.
pub async fn get_route_map(
    State(state): State<Arc<AppState>>,
    Path(route_id): Path<String>,
) -> Result<Html<String>, StatusCode> {
    state
        .get_cached_route(&route_id)
        .map(|route| Html(route.map_html))
        .ok_or(StatusCode::NOT_FOUND)
}

fn route_error_response(err: RouteError) -> ApiError {
    let status = match err {
        RouteError::BlockedEndpoint => StatusCode::BAD_REQUEST,
        RouteError::NoPath => StatusCode::NOT_FOUND,
    };
    (status, Json(serde_json::json!({ "error": err.to_string() })))
}

fn graph_error_response(err: GraphError) -> ApiError {
    let status = match err {
        GraphError::UnknownRegion(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    tracing::error!("Failed to load road network: {}", err);
    (status, Json(serde_json::json!({ "error": err.to_string() })))
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
