use rand::Rng;
use rand::seq::SliceRandom;

use crate::pipeline::Diagnostics;
use crate::types::NodeId;

use super::Graph;

impl Graph {
    /// Shrink the graph to `pieces` nodes by star contraction: a
    /// dropped node's neighbors all become neighbors of one uniformly
    /// chosen consuming neighbor, then the node and its edges are
    /// removed. Each successful drop reduces the node count by exactly
    /// one and keeps the dropped node's former neighbors mutually
    /// reachable through the consumer.
    ///
    /// A candidate with no edges cannot be merged anywhere; it is
    /// skipped (and counted) and another candidate is drawn, so the
    /// target is still met whenever enough mergeable nodes remain.
    /// No-op when `pieces` is zero or not below the current node count.
    pub fn drop_nodes(&mut self, pieces: usize, rng: &mut impl Rng, diag: &mut Diagnostics) {
        if pieces == 0 || pieces >= self.node_count() {
            return;
        }
        let drop_count = self.node_count() - pieces;

        let mut queue: Vec<NodeId> = self.nodes.keys().cloned().collect();
        queue.shuffle(rng);

        let mut merged = 0;
        while merged < drop_count {
            let Some(drop) = queue.pop() else { break };

            let neighbors: Vec<NodeId> = self.neighbors(&drop).cloned().collect();
            if neighbors.is_empty() {
                diag.unmergeable_skipped += 1;
                continue;
            }

            // The consuming node inherits edges to every other
            // neighbor the dropped node had.
            let consuming = neighbors[rng.random_range(0..neighbors.len())].clone();
            for other in &neighbors {
                if *other != consuming {
                    self.add_edge(&consuming, other);
                }
            }

            self.remove_node(&drop);
            merged += 1;
        }
    }
}
