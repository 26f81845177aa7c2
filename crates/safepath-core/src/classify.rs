//! Hazard classification: which edges intersect which hazard zones.

use std::collections::{HashMap, HashSet};

use crate::geo::{haversine_distance, midpoint};
use crate::graph::{EdgeId, RoadGraph};
use crate::models::HazardZone;

/// Result of scanning a graph against a set of hazard zones.
#[derive(Debug, Clone, Default)]
pub struct Classification {
    /// Edges intersecting at least one hazard above the threshold.
    pub dangerous_edges: HashSet<EdgeId>,
    /// Highest hazard level touching each dangerous edge.
    pub edge_levels: HashMap<EdgeId, u8>,
    pub stats: ClassifyStats,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassifyStats {
    pub edges_checked: usize,
    pub hazards_considered: usize,
}

/// Classify every directed edge of `graph` against `hazards`.
///
/// Hazards with level at or below `threshold` are skipped entirely and do
/// not contribute to `edge_levels`. An edge intersects a hazard when the
/// minimum of the distances from the hazard center to the edge's source,
/// destination, and arithmetic midpoint is within the hazard radius.
///
/// The scan is O(hazards x edges). That is fine for interactive use at
/// city-district scale; a spatial index would be needed before pointing
/// this at a national-scale graph.
pub fn classify(graph: &RoadGraph, hazards: &[HazardZone], threshold: u8) -> Classification {
    let mut result = Classification::default();

    for hazard in hazards {
        if hazard.level <= threshold {
            continue;
        }
        result.stats.hazards_considered += 1;
        let center = hazard.center();

        for (edge_id, _) in graph.edges() {
            result.stats.edges_checked += 1;

            // Nodes referenced by an edge always exist in the graph.
            let (Some(from), Some(to)) = (graph.node(edge_id.from), graph.node(edge_id.to)) else {
                continue;
            };

            let dist_to_from = haversine_distance(center, from);
            let dist_to_to = haversine_distance(center, to);
            let dist_to_mid = haversine_distance(center, midpoint(from, to));
            let min_distance = dist_to_from.min(dist_to_to).min(dist_to_mid);

            if min_distance <= hazard.radius_m {
                // Multiple overlapping hazards: keep the highest level seen.
                let level = result.edge_levels.entry(edge_id).or_insert(0);
                *level = (*level).max(hazard.level);
                result.dangerous_edges.insert(edge_id);
            }
        }
    }

    result
}
