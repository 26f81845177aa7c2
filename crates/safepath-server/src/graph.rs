//! Road-network graph provider.
//!
//! Graphs are loaded from JSON files under the configured data directory,
//! one file per (region, travel mode), and cached as shared immutable
//! instances. Nothing mutates a graph after it is published to the cache;
//! route computations clone before pruning.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use dashmap::DashMap;
use serde::Deserialize;
use thiserror::Error;

use safepath_core::{haversine_distance, Coordinate, RoadGraph, TravelMode};

#[derive(Debug, Error)]
pub enum GraphError {
    #[error("no road network available for region '{0}'")]
    UnknownRegion(String),
    #[error("failed to read graph file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("malformed graph file {path}: {source}")]
    Malformed {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("graph file {path} references unknown node {node}")]
    UnknownNode { path: PathBuf, node: u64 },
}

/// On-disk graph description.
#[derive(Debug, Deserialize)]
struct GraphFile {
    nodes: Vec<GraphFileNode>,
    edges: Vec<GraphFileEdge>,
}

#[derive(Debug, Deserialize)]
struct GraphFileNode {
    id: u64,
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct GraphFileEdge {
    from: u64,
    to: u64,
    /// Traversal length in meters; defaults to the great-circle distance
    /// between the endpoints.
    #[serde(default)]
    length_m: Option<f64>,
    /// One-way segments stay directed; everything else is expanded into
    /// edges in both directions, since route search needs directed
    /// traversal semantics.
    #[serde(default)]
    oneway: bool,
}

/// Loads and caches road graphs per (region, mode).
pub struct GraphProvider {
    data_dir: PathBuf,
    graphs: DashMap<(String, TravelMode), Arc<RoadGraph>>,
}

impl GraphProvider {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            graphs: DashMap::new(),
        }
    }

    pub fn cached_graph_count(&self) -> usize {
        self.graphs.len()
    }

    /// Fetch the graph for a region and travel mode, loading it on first use.
    pub fn graph(&self, region: &str, mode: TravelMode) -> Result<Arc<RoadGraph>, GraphError> {
        let key = (region_slug(region), mode);
        if let Some(graph) = self.graphs.get(&key) {
            tracing::debug!("Using cached graph for {}/{}", key.0, mode.as_str());
            return Ok(graph.clone());
        }

        let path = self.resolve_path(&key.0, mode)?;
        tracing::info!("Loading road network for {} ({})", region, mode.as_str());
        let graph = Arc::new(load_graph_file(&path)?);
        self.graphs.insert(key, graph.clone());
        Ok(graph)
    }

    fn resolve_path(&self, slug: &str, mode: TravelMode) -> Result<PathBuf, GraphError> {
        // Prefer a mode-specific network, fall back to a mode-agnostic one.
        let per_mode = self.data_dir.join(format!("{}.{}.json", slug, mode.as_str()));
        if per_mode.is_file() {
            return Ok(per_mode);
        }
        let shared = self.data_dir.join(format!("{}.json", slug));
        if shared.is_file() {
            return Ok(shared);
        }
        Err(GraphError::UnknownRegion(slug.to_string()))
    }
}

/// Normalize a human region name ("Chiang Mai, Thailand") to a file slug
/// ("chiang-mai-thailand").
pub fn region_slug(region: &str) -> String {
    let mut slug = String::with_capacity(region.len());
    let mut last_dash = true;
    for ch in region.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
            last_dash = false;
        } else if !last_dash {
            slug.push('-');
            last_dash = true;
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

fn load_graph_file(path: &Path) -> Result<RoadGraph, GraphError> {
    let raw = fs::read_to_string(path).map_err(|source| GraphError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let file: GraphFile = serde_json::from_str(&raw).map_err(|source| GraphError::Malformed {
        path: path.to_path_buf(),
        source,
    })?;

    let mut graph = RoadGraph::new();
    for node in &file.nodes {
        graph.add_node(
            node.id,
            Coordinate {
                lat: node.lat,
                lon: node.lon,
            },
        );
    }

    for edge in &file.edges {
        let from = graph.node(edge.from).ok_or(GraphError::UnknownNode {
            path: path.to_path_buf(),
            node: edge.from,
        })?;
        let to = graph.node(edge.to).ok_or(GraphError::UnknownNode {
            path: path.to_path_buf(),
            node: edge.to,
        })?;
        let length_m = edge
            .length_m
            .unwrap_or_else(|| haversine_distance(from, to));
        graph.add_edge(edge.from, edge.to, length_m);
        if !edge.oneway {
            graph.add_edge(edge.to, edge.from, length_m);
        }
    }

    tracing::debug!(
        "Loaded graph from {}: {} nodes, {} edges",
        path.display(),
        graph.node_count(),
        graph.edge_count()
    );
    Ok(graph)
}
