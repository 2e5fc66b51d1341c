use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::types::{BBox, NodeId};

/// One geographic unit: a polygon summary plus passthrough attributes.
///
/// Geometry fields are written once at ingest and never touched again;
/// the only field that changes afterwards is `district`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    /// Flattened boundary vertices as (lon, lat); `None` marks a ring
    /// break in multi-part geometries.
    pub vertices: Vec<Option<[f64; 2]>>,
    pub bbox: BBox,
    /// Mean (lon, lat) of the valid vertices.
    pub centroid: [f64; 2],
    /// Attributes copied verbatim from the source record.
    pub properties: BTreeMap<String, serde_json::Value>,
    /// District label in `1..=D`, set by the partitioner.
    pub district: Option<u32>,
}

/// An undirected graph of precinct nodes keyed by id.
///
/// Edges are unordered, unique, and never self-loops; removing a node
/// removes its incident edges. Node and neighbor sets are ordered so
/// iteration (and therefore any seeded run of the randomized stages)
/// is reproducible.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    pub(super) nodes: BTreeMap<NodeId, Node>,
    pub(super) adj: BTreeMap<NodeId, BTreeSet<NodeId>>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes currently in the graph.
    #[inline] pub fn node_count(&self) -> usize { self.nodes.len() }

    /// Number of undirected edges currently in the graph.
    pub fn edge_count(&self) -> usize {
        self.adj.values().map(|set| set.len()).sum::<usize>() / 2
    }

    /// Insert a node with no edges. Replaces any node with the same id.
    pub fn add_node(&mut self, node: Node) {
        self.adj.entry(node.id.clone()).or_default();
        self.nodes.insert(node.id.clone(), node);
    }

    /// Remove a node and every edge incident to it.
    pub fn remove_node(&mut self, id: &NodeId) -> Option<Node> {
        let node = self.nodes.remove(id)?;
        if let Some(neighbors) = self.adj.remove(id) {
            for neighbor in &neighbors {
                if let Some(set) = self.adj.get_mut(neighbor) {
                    set.remove(id);
                }
            }
        }
        Some(node)
    }

    /// Insert an undirected edge. Returns false for duplicates and
    /// self-loops, which are silently ignored.
    pub fn add_edge(&mut self, a: &NodeId, b: &NodeId) -> bool {
        assert!(self.nodes.contains_key(a), "unknown node {a}");
        assert!(self.nodes.contains_key(b), "unknown node {b}");
        if a == b {
            return false;
        }
        let inserted = self.adj.entry(a.clone()).or_default().insert(b.clone());
        self.adj.entry(b.clone()).or_default().insert(a.clone());
        inserted
    }

    /// Whether an edge between `a` and `b` exists (in either order).
    pub fn has_edge(&self, a: &NodeId, b: &NodeId) -> bool {
        self.adj.get(a).is_some_and(|set| set.contains(b))
    }

    #[inline]
    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    #[inline]
    pub fn node_mut(&mut self, id: &NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id)
    }

    /// Node ids in sorted order.
    pub fn node_ids(&self) -> impl Iterator<Item = &NodeId> {
        self.nodes.keys()
    }

    /// Nodes in id order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Neighbors of `id` in sorted order; empty for unknown ids.
    pub fn neighbors(&self, id: &NodeId) -> impl Iterator<Item = &NodeId> {
        self.adj.get(id).into_iter().flatten()
    }

    /// Degree of `id`; zero for unknown ids.
    pub fn degree(&self, id: &NodeId) -> usize {
        self.adj.get(id).map_or(0, |set| set.len())
    }

    /// Every undirected edge exactly once, as ordered (low, high) pairs.
    pub fn edges(&self) -> impl Iterator<Item = (&NodeId, &NodeId)> {
        self.adj.iter().flat_map(|(a, neighbors)| {
            neighbors.iter().filter(move |b| a < *b).map(move |b| (a, b))
        })
    }
}
