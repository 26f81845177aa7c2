//! In-memory application state: hazard store, route cache, graph provider.
//!
//! All of this is explicit injected state owned by the server, not
//! process-wide singletons; handlers receive it through axum's `State`.

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use dashmap::DashMap;
use serde::Serialize;
use uuid::Uuid;

use safepath_core::{Coordinate, HazardZone, RoadGraph, TravelMode};

use crate::cache::{prune_cache, CacheEntry};
use crate::config::Config;
use crate::graph::{GraphError, GraphProvider};

/// Statistics for one route computation.
#[derive(Debug, Clone, Serialize)]
pub struct RouteStats {
    pub total_edges: usize,
    pub dangerous_edges_removed: usize,
    pub hazard_zones_processed: usize,
    pub computation_time_sec: f64,
}

/// Cached result of one route computation.
#[derive(Debug, Clone)]
pub struct CachedRoute {
    pub waypoints: Vec<Coordinate>,
    pub map_html: String,
    pub stats: RouteStats,
    created_at: Instant,
}

impl CachedRoute {
    pub fn new(waypoints: Vec<Coordinate>, map_html: String, stats: RouteStats) -> Self {
        Self {
            waypoints,
            map_html,
            stats,
            created_at: Instant::now(),
        }
    }
}

impl CacheEntry for CachedRoute {
    fn created_at(&self) -> Instant {
        self.created_at
    }
}

/// Application state shared across request handlers.
pub struct AppState {
    config: Config,
    hazards: DashMap<String, HazardZone>,
    routes: DashMap<String, CachedRoute>,
    graphs: GraphProvider,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let graphs = GraphProvider::new(config.graph_data_dir.clone());
        Self {
            config,
            hazards: DashMap::new(),
            routes: DashMap::new(),
            graphs,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    // === Hazard store ===

    /// Insert a hazard, assigning an id and creation timestamp when absent.
    /// A hazard with the same id replaces the existing one.
    pub fn add_hazard(&self, mut hazard: HazardZone) -> HazardZone {
        if hazard.id.is_none() {
            hazard.id = Some(Uuid::new_v4().to_string());
        }
        if hazard.created_at.is_none() {
            hazard.created_at = Some(Utc::now());
        }
        let id = hazard.id.clone().unwrap_or_default();
        self.hazards.insert(id, hazard.clone());
        hazard
    }

    /// Active hazard set, ordered by creation time then id so downstream
    /// consumers see a stable sequence.
    pub fn get_hazards(&self) -> Vec<HazardZone> {
        let mut hazards: Vec<HazardZone> =
            self.hazards.iter().map(|r| r.value().clone()).collect();
        hazards.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        hazards
    }

    pub fn get_hazard(&self, id: &str) -> Option<HazardZone> {
        self.hazards.get(id).map(|r| r.value().clone())
    }

    pub fn remove_hazard(&self, id: &str) -> bool {
        self.hazards.remove(id).is_some()
    }

    pub fn hazard_count(&self) -> usize {
        self.hazards.len()
    }

    /// A few demo zones around Chiang Mai, matching the default region.
    pub fn seed_demo_hazards(&self) {
        for (id, lat, lon, level, name, radius_m) in [
            ("hazard-1", 18.787, 98.9905, 5, "Red Danger Zone", 150.0),
            ("hazard-2", 18.7896, 98.9953, 5, "Dark Red Zone", 120.0),
            ("hazard-3", 18.7925, 99.0, 3, "Orange Zone", 100.0),
        ] {
            self.add_hazard(HazardZone {
                id: Some(id.to_string()),
                lat,
                lon,
                level,
                name: name.to_string(),
                radius_m,
                created_at: None,
            });
        }
    }

    // === Route cache ===

    pub fn cache_route(&self, route_id: String, route: CachedRoute) {
        self.routes.insert(route_id, route);
        prune_cache(
            &self.routes,
            self.config.route_cache_max_entries,
            Duration::from_secs(self.config.route_cache_ttl_s),
        );
    }

    pub fn get_cached_route(&self, route_id: &str) -> Option<CachedRoute> {
        self.routes.get(route_id).map(|r| r.value().clone())
    }

    pub fn cached_route_count(&self) -> usize {
        self.routes.len()
    }

    // === Graph provider ===

    pub fn graph(&self, region: &str, mode: TravelMode) -> Result<Arc<RoadGraph>, GraphError> {
        self.graphs.graph(region, mode)
    }

    pub fn cached_graph_count(&self) -> usize {
        self.graphs.cached_graph_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_state() -> AppState {
        let mut config = Config::from_env();
        config.route_cache_max_entries = 2;
        AppState::new(config)
    }

    fn hazard(id: Option<&str>, level: u8) -> HazardZone {
        HazardZone {
            id: id.map(|s| s.to_string()),
            lat: 18.787,
            lon: 98.9905,
            level,
            name: "Hazard Zone".to_string(),
            radius_m: 50.0,
            created_at: None,
        }
    }

    #[test]
    fn add_hazard_assigns_id_and_timestamp() {
        let state = test_state();
        let stored = state.add_hazard(hazard(None, 5));
        assert!(stored.id.is_some());
        assert!(stored.created_at.is_some());
        assert_eq!(state.hazard_count(), 1);
    }

    #[test]
    fn same_id_replaces_existing_hazard() {
        let state = test_state();
        state.add_hazard(hazard(Some("h-1"), 4));
        state.add_hazard(hazard(Some("h-1"), 9));
        assert_eq!(state.hazard_count(), 1);
        assert_eq!(state.get_hazard("h-1").unwrap().level, 9);
    }

    #[test]
    fn hazard_order_is_stable() {
        let state = test_state();
        state.add_hazard(hazard(Some("b"), 2));
        state.add_hazard(hazard(Some("a"), 3));
        let first: Vec<Option<String>> =
            state.get_hazards().into_iter().map(|h| h.id).collect();
        let second: Vec<Option<String>> =
            state.get_hazards().into_iter().map(|h| h.id).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn remove_hazard_reports_absence() {
        let state = test_state();
        state.add_hazard(hazard(Some("h-1"), 4));
        assert!(state.remove_hazard("h-1"));
        assert!(!state.remove_hazard("h-1"));
    }

    #[test]
    fn route_cache_respects_capacity() {
        let state = test_state();
        let stats = RouteStats {
            total_edges: 0,
            dangerous_edges_removed: 0,
            hazard_zones_processed: 0,
            computation_time_sec: 0.0,
        };
        for i in 0..4 {
            state.cache_route(
                format!("route-{i}"),
                CachedRoute::new(Vec::new(), String::new(), stats.clone()),
            );
        }
        assert!(state.cached_route_count() <= 2);
    }
}
