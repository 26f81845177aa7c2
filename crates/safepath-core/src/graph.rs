//! Directed multigraph representation of a road network.
//!
//! Vertices carry coordinates; edges carry a traversal length in meters and
//! a numeric key distinguishing parallel edges between the same vertex pair.
//! The core never mutates a caller's graph: pruning clones first.

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::geo::haversine_distance;
use crate::models::Coordinate;

pub type NodeId = u64;

/// Uniquely addresses one directed edge instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId {
    pub from: NodeId,
    pub to: NodeId,
    pub key: u32,
}

/// Outgoing edge as stored in the adjacency list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoadEdge {
    pub to: NodeId,
    pub key: u32,
    pub length_m: f64,
}

/// A directed multigraph of road segments.
#[derive(Debug, Clone, Default)]
pub struct RoadGraph {
    // BTreeMap keeps node iteration in ascending id order, which makes the
    // nearest-node tie-break deterministic (lowest id wins).
    nodes: BTreeMap<NodeId, Coordinate>,
    adjacency: HashMap<NodeId, Vec<RoadEdge>>,
    edge_count: usize,
}

impl RoadGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(&mut self, id: NodeId, position: Coordinate) {
        self.nodes.insert(id, position);
        self.adjacency.entry(id).or_default();
    }

    /// Add a directed edge. The multi-edge key is assigned as the number of
    /// parallel edges already present between the pair.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId, length_m: f64) -> EdgeId {
        let edges = self.adjacency.entry(from).or_default();
        let key = edges.iter().filter(|edge| edge.to == to).count() as u32;
        edges.push(RoadEdge { to, key, length_m });
        self.edge_count += 1;
        EdgeId { from, to, key }
    }

    pub fn has_node(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn node(&self, id: NodeId) -> Option<Coordinate> {
        self.nodes.get(&id).copied()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn has_edge(&self, id: EdgeId) -> bool {
        self.adjacency
            .get(&id.from)
            .is_some_and(|edges| edges.iter().any(|e| e.to == id.to && e.key == id.key))
    }

    /// Remove one directed edge instance. Removing an absent identifier is a
    /// no-op; returns whether anything was removed.
    pub fn remove_edge(&mut self, id: EdgeId) -> bool {
        let Some(edges) = self.adjacency.get_mut(&id.from) else {
            return false;
        };
        let before = edges.len();
        edges.retain(|edge| !(edge.to == id.to && edge.key == id.key));
        let removed = before - edges.len();
        self.edge_count -= removed;
        removed > 0
    }

    /// Remove every vertex with no incident edge in either direction.
    /// Returns the number of vertices removed.
    pub fn remove_isolated_nodes(&mut self) -> usize {
        let mut connected: HashSet<NodeId> = HashSet::new();
        for (&from, edges) in &self.adjacency {
            if !edges.is_empty() {
                connected.insert(from);
                connected.extend(edges.iter().map(|edge| edge.to));
            }
        }

        let isolated: Vec<NodeId> = self
            .nodes
            .keys()
            .copied()
            .filter(|id| !connected.contains(id))
            .collect();
        for id in &isolated {
            self.nodes.remove(id);
            self.adjacency.remove(id);
        }
        isolated.len()
    }

    /// Outgoing edges of a vertex.
    pub fn neighbors(&self, id: NodeId) -> &[RoadEdge] {
        self.adjacency
            .get(&id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Iterate every directed edge instance with its coordinates resolved.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, f64)> + '_ {
        self.adjacency.iter().flat_map(|(&from, edges)| {
            edges.iter().map(move |edge| {
                (
                    EdgeId {
                        from,
                        to: edge.to,
                        key: edge.key,
                    },
                    edge.length_m,
                )
            })
        })
    }

    /// Iterate vertices in ascending id order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, Coordinate)> + '_ {
        self.nodes.iter().map(|(&id, &pos)| (id, pos))
    }

    /// Length of the first parallel edge from `from` to `to`, if any.
    ///
    /// Route search does not optimize edge choice between parallel edges;
    /// path lengths are summed over whichever edge is stored first.
    pub fn first_edge_length(&self, from: NodeId, to: NodeId) -> Option<f64> {
        self.adjacency
            .get(&from)?
            .iter()
            .find(|edge| edge.to == to)
            .map(|edge| edge.length_m)
    }

    /// Nearest vertex to a coordinate by great-circle distance.
    ///
    /// Ties are broken deterministically: the lowest node id wins. Returns
    /// `None` only when the graph has no vertices.
    pub fn nearest_node(&self, point: Coordinate) -> Option<NodeId> {
        let mut best: Option<(NodeId, f64)> = None;
        for (&id, &position) in &self.nodes {
            let dist = haversine_distance(point, position);
            match best {
                Some((_, best_dist)) if dist >= best_dist => {}
                _ => best = Some((id, dist)),
            }
        }
        best.map(|(id, _)| id)
    }
}
