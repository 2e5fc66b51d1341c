use serde::{Deserialize, Serialize};

use crate::graph::Graph;
use crate::types::NodeId;

/// Per-node view handed to the downstream simulation/visualization
/// collaborator. The centroid is (lat, lon), per that contract, the
/// reverse of the (lon, lat) order stored on the node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeView {
    pub id: NodeId,
    pub centroid: [f64; 2],
    pub district: Option<u32>,
}

/// Read-only snapshot of the finished graph: node views plus the full
/// edge list. The core accepts no mutations back through this surface;
/// further district moves belong to the downstream engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphView {
    pub nodes: Vec<NodeView>,
    pub edges: Vec<(NodeId, NodeId)>,
}

impl GraphView {
    pub fn from_graph(graph: &Graph) -> Self {
        Self {
            nodes: graph
                .nodes()
                .map(|node| NodeView {
                    id: node.id.clone(),
                    centroid: [node.centroid[1], node.centroid[0]],
                    district: node.district,
                })
                .collect(),
            edges: graph.edges().map(|(a, b)| (a.clone(), b.clone())).collect(),
        }
    }
}
