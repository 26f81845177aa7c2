//! Safe-subgraph construction: drop dangerous edges, then stranded vertices.

use std::collections::HashSet;

use crate::graph::{EdgeId, RoadGraph};

/// Build the safe subgraph by removing every edge in `dangerous_edges`.
///
/// Operates on a private copy; the caller's graph is never mutated and may
/// be shared read-only across concurrent route computations. Identifiers
/// absent from the graph are ignored, so applying the same set twice
/// removes nothing the second time. Vertices left with no incident edge in
/// either direction are removed so route search cannot snap to or pass
/// through a stranded vertex.
///
/// Returns the pruned graph and the count of edges actually removed, which
/// may be less than `dangerous_edges.len()` when identifiers are stale.
pub fn prune(graph: &RoadGraph, dangerous_edges: &HashSet<EdgeId>) -> (RoadGraph, usize) {
    let mut safe_graph = graph.clone();

    let mut removed_count = 0;
    for &edge_id in dangerous_edges {
        if safe_graph.remove_edge(edge_id) {
            removed_count += 1;
        }
    }

    safe_graph.remove_isolated_nodes();
    (safe_graph, removed_count)
}
