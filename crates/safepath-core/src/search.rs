//! Heuristic-guided shortest-path search on the (pruned) road graph.

use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashMap, HashSet};

use crate::error::RouteError;
use crate::geo::haversine_distance;
use crate::graph::{NodeId, RoadGraph};
use crate::models::Coordinate;

/// An ordered vertex path plus its traversed length.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pub path: Vec<NodeId>,
    pub total_length_m: f64,
}

#[derive(Debug, Clone, Copy)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct OpenNode {
    node: NodeId,
    g_score: FloatOrd,
    f_score: FloatOrd,
}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenNode {
    fn cmp(&self, other: &Self) -> Ordering {
        self.f_score
            .cmp(&other.f_score)
            .then_with(|| self.g_score.cmp(&other.g_score))
            .then_with(|| self.node.cmp(&other.node))
    }
}

/// Snap a coordinate to the nearest graph vertex by great-circle distance.
/// Ties break to the lowest node id. `None` only for an empty graph.
pub fn snap_to_nearest(graph: &RoadGraph, point: Coordinate) -> Option<NodeId> {
    graph.nearest_node(point)
}

/// Find the shortest path between two coordinates on `graph`.
///
/// Each endpoint is snapped independently to its nearest vertex. An empty
/// graph (everything pruned away) yields `BlockedEndpoint`.
pub fn find_route(graph: &RoadGraph, start: Coordinate, end: Coordinate) -> Result<Route, RouteError> {
    let start_node = snap_to_nearest(graph, start).ok_or(RouteError::BlockedEndpoint)?;
    let end_node = snap_to_nearest(graph, end).ok_or(RouteError::BlockedEndpoint)?;
    find_route_between(graph, start_node, end_node)
}

/// A* from `start_node` to `end_node` over directed edges, weighted by edge
/// length in meters, with the great-circle distance to the goal as the
/// heuristic. Straight-line distance never exceeds any real road path, so
/// the heuristic is admissible and the result is a shortest path.
///
/// Fails with `BlockedEndpoint` when either vertex is absent from the
/// graph (pruning isolated that endpoint's neighborhood) and `NoPath` when
/// no connecting path remains.
pub fn find_route_between(
    graph: &RoadGraph,
    start_node: NodeId,
    end_node: NodeId,
) -> Result<Route, RouteError> {
    if !graph.has_node(start_node) || !graph.has_node(end_node) {
        return Err(RouteError::BlockedEndpoint);
    }

    // Nodes are known to exist at this point.
    let goal = graph.node(end_node).ok_or(RouteError::BlockedEndpoint)?;
    let heuristic = |node: NodeId| -> f64 {
        graph
            .node(node)
            .map(|pos| haversine_distance(pos, goal))
            .unwrap_or(0.0)
    };

    let mut open_set: BinaryHeap<Reverse<OpenNode>> = BinaryHeap::new();
    let mut g_score: HashMap<NodeId, f64> = HashMap::new();
    let mut came_from: HashMap<NodeId, NodeId> = HashMap::new();
    let mut closed_set: HashSet<NodeId> = HashSet::new();

    g_score.insert(start_node, 0.0);
    open_set.push(Reverse(OpenNode {
        node: start_node,
        g_score: FloatOrd(0.0),
        f_score: FloatOrd(heuristic(start_node)),
    }));

    let mut found = false;
    while let Some(Reverse(current)) = open_set.pop() {
        if closed_set.contains(&current.node) {
            continue;
        }
        let best_g = g_score.get(&current.node).copied().unwrap_or(f64::INFINITY);
        if current.g_score.0 > best_g {
            continue; // stale heap entry
        }

        if current.node == end_node {
            found = true;
            break;
        }
        closed_set.insert(current.node);

        for edge in graph.neighbors(current.node) {
            if closed_set.contains(&edge.to) {
                continue;
            }
            let tentative_g = best_g + edge.length_m;
            if tentative_g < g_score.get(&edge.to).copied().unwrap_or(f64::INFINITY) {
                came_from.insert(edge.to, current.node);
                g_score.insert(edge.to, tentative_g);
                open_set.push(Reverse(OpenNode {
                    node: edge.to,
                    g_score: FloatOrd(tentative_g),
                    f_score: FloatOrd(tentative_g + heuristic(edge.to)),
                }));
            }
        }
    }

    if !found {
        return Err(RouteError::NoPath);
    }

    let mut path = vec![end_node];
    let mut current = end_node;
    while let Some(&previous) = came_from.get(&current) {
        path.push(previous);
        current = previous;
    }
    path.reverse();

    Ok(Route {
        total_length_m: path_length(graph, &path),
        path,
    })
}

/// Sum the stored length of each consecutive vertex pair along `path`,
/// using the first parallel edge between a pair.
fn path_length(graph: &RoadGraph, path: &[NodeId]) -> f64 {
    path.windows(2)
        .filter_map(|pair| graph.first_edge_length(pair[0], pair[1]))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify;
    use crate::models::HazardZone;
    use crate::prune::prune;

    fn coord(lat: f64, lon: f64) -> Coordinate {
        Coordinate { lat, lon }
    }

    /// P1(0,0) - P2(0,0.001) - P3(0,0.002) connected in a line, both ways.
    fn line_graph() -> RoadGraph {
        let mut graph = RoadGraph::new();
        graph.add_node(1, coord(0.0, 0.0));
        graph.add_node(2, coord(0.0, 0.001));
        graph.add_node(3, coord(0.0, 0.002));
        graph.add_edge(1, 2, 111.0);
        graph.add_edge(2, 1, 111.0);
        graph.add_edge(2, 3, 111.0);
        graph.add_edge(3, 2, 111.0);
        graph
    }

    fn hazard_at_p2(level: u8) -> HazardZone {
        HazardZone {
            id: None,
            lat: 0.0,
            lon: 0.001,
            level,
            name: "Hazard Zone".to_string(),
            radius_m: 10.0,
            created_at: None,
        }
    }

    #[test]
    fn route_along_the_line() {
        let graph = line_graph();
        let route = find_route(&graph, coord(0.0, 0.0), coord(0.0, 0.002)).unwrap();
        assert_eq!(route.path, vec![1, 2, 3]);
        assert_eq!(route.total_length_m, 222.0);
    }

    /// A five-vertex chain; the outer segments keep the endpoints alive
    /// when the middle vertex is pruned away.
    fn chain_graph() -> RoadGraph {
        let mut graph = RoadGraph::new();
        for i in 0..5u64 {
            graph.add_node(i, coord(0.0, i as f64 * 0.001));
        }
        for i in 0..4u64 {
            graph.add_edge(i, i + 1, 111.0);
            graph.add_edge(i + 1, i, 111.0);
        }
        graph
    }

    #[test]
    fn high_level_hazard_severs_the_route() {
        // Level 6 hazard on the middle vertex, threshold 3: both incident
        // segments are pruned, isolating the middle vertex, and the two
        // remaining components are disconnected.
        let graph = chain_graph();
        let hazard = HazardZone {
            lon: 0.002,
            ..hazard_at_p2(6)
        };
        let result = classify(&graph, &[hazard], 3);
        assert_eq!(result.dangerous_edges.len(), 4);

        let (safe_graph, _) = prune(&graph, &result.dangerous_edges);
        assert!(!safe_graph.has_node(2));
        assert!(safe_graph.has_node(1));
        assert!(safe_graph.has_node(3));

        let err = find_route(&safe_graph, coord(0.0, 0.001), coord(0.0, 0.003)).unwrap_err();
        assert_eq!(err, RouteError::NoPath);
    }

    #[test]
    fn fully_pruned_neighborhood_blocks_the_endpoint() {
        // In the minimal line graph the same hazard strands every vertex,
        // so there is nothing left to snap to.
        let graph = line_graph();
        let result = classify(&graph, &[hazard_at_p2(6)], 3);
        let (safe_graph, _) = prune(&graph, &result.dangerous_edges);
        assert_eq!(safe_graph.node_count(), 0);

        let err = find_route(&safe_graph, coord(0.0, 0.0), coord(0.0, 0.002)).unwrap_err();
        assert_eq!(err, RouteError::BlockedEndpoint);
    }

    #[test]
    fn low_level_hazard_leaves_route_intact() {
        // Level 2 hazard at threshold 3 flags nothing; route runs P1-P2-P3.
        let graph = line_graph();
        let result = classify(&graph, &[hazard_at_p2(2)], 3);
        assert!(result.dangerous_edges.is_empty());

        let (safe_graph, removed) = prune(&graph, &result.dangerous_edges);
        assert_eq!(removed, 0);

        let route = find_route(&safe_graph, coord(0.0, 0.0), coord(0.0, 0.002)).unwrap();
        assert_eq!(route.path, vec![1, 2, 3]);
        assert_eq!(route.total_length_m, 222.0);
    }

    #[test]
    fn far_away_start_still_snaps() {
        let graph = line_graph();
        let route = find_route(&graph, coord(10.0, 10.0), coord(0.0, 0.0)).unwrap();
        // 10,10 is nearest to P3; the route runs back along the line.
        assert_eq!(route.path, vec![3, 2, 1]);
    }

    #[test]
    fn missing_endpoint_is_blocked() {
        let graph = line_graph();
        let err = find_route_between(&graph, 1, 99).unwrap_err();
        assert_eq!(err, RouteError::BlockedEndpoint);
    }

    #[test]
    fn empty_graph_is_blocked() {
        let graph = RoadGraph::new();
        let err = find_route(&graph, coord(0.0, 0.0), coord(0.0, 0.002)).unwrap_err();
        assert_eq!(err, RouteError::BlockedEndpoint);
    }

    #[test]
    fn start_equals_end() {
        let graph = line_graph();
        let route = find_route_between(&graph, 2, 2).unwrap();
        assert_eq!(route.path, vec![2]);
        assert_eq!(route.total_length_m, 0.0);
    }

    #[test]
    fn one_way_edges_are_respected() {
        let mut graph = RoadGraph::new();
        graph.add_node(1, coord(0.0, 0.0));
        graph.add_node(2, coord(0.0, 0.001));
        graph.add_edge(1, 2, 111.0);

        assert!(find_route_between(&graph, 1, 2).is_ok());
        assert_eq!(
            find_route_between(&graph, 2, 1).unwrap_err(),
            RouteError::NoPath
        );
    }

    #[test]
    fn search_takes_the_shorter_branch() {
        // Diamond: 1 -> 2 -> 4 is shorter than 1 -> 3 -> 4.
        let mut graph = RoadGraph::new();
        graph.add_node(1, coord(0.0, 0.0));
        graph.add_node(2, coord(0.001, 0.001));
        graph.add_node(3, coord(-0.001, 0.001));
        graph.add_node(4, coord(0.0, 0.002));
        graph.add_edge(1, 2, 160.0);
        graph.add_edge(2, 4, 160.0);
        graph.add_edge(1, 3, 200.0);
        graph.add_edge(3, 4, 200.0);

        let route = find_route_between(&graph, 1, 4).unwrap();
        assert_eq!(route.path, vec![1, 2, 4]);
        assert_eq!(route.total_length_m, 320.0);
    }

    #[test]
    fn reported_length_matches_summed_edges() {
        let graph = line_graph();
        let route = find_route_between(&graph, 1, 3).unwrap();
        let summed: f64 = route
            .path
            .windows(2)
            .map(|pair| graph.first_edge_length(pair[0], pair[1]).unwrap())
            .sum();
        assert_eq!(route.total_length_m, summed);
    }
}
