//! Server configuration from environment.

use std::env;

use safepath_core::TravelMode;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_port: u16,
    /// Directory holding road-network graph files, one per (region, mode).
    pub graph_data_dir: String,
    pub default_region: String,
    pub default_mode: TravelMode,
    /// Hazards above this level block edges unless the request overrides it.
    pub default_danger_threshold: u8,
    pub route_cache_max_entries: usize,
    pub route_cache_ttl_s: u64,
    /// Seed a few demo hazard zones on startup.
    pub seed_demo_hazards: bool,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            server_port: env::var("SAFEPATH_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(8000),
            graph_data_dir: env::var("SAFEPATH_GRAPH_DIR")
                .unwrap_or_else(|_| "data/graphs".to_string()),
            default_region: env::var("SAFEPATH_DEFAULT_REGION")
                .unwrap_or_else(|_| "Chiang Mai, Thailand".to_string()),
            default_mode: match env::var("SAFEPATH_DEFAULT_MODE").as_deref() {
                Ok("walk") => TravelMode::Walk,
                Ok("bike") => TravelMode::Bike,
                _ => TravelMode::Drive,
            },
            default_danger_threshold: env::var("SAFEPATH_DANGER_THRESHOLD")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(3),
            route_cache_max_entries: env::var("SAFEPATH_ROUTE_CACHE_MAX")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(256),
            route_cache_ttl_s: env::var("SAFEPATH_ROUTE_CACHE_TTL_S")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(3600),
            seed_demo_hazards: env::var("SAFEPATH_SEED_DEMO_HAZARDS")
                .map(|s| s == "1" || s.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
        }
    }
}
