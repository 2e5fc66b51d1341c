use geo::MultiPolygon;
use rayon::prelude::*;

use crate::geometry;
use crate::pipeline::Diagnostics;
use crate::types::NodeId;

use super::Graph;

impl Graph {
    /// Compute the "borders" edge set over the current nodes.
    ///
    /// Every unordered pair is first screened with the loose
    /// bounding-box test (overlap on either axis keeps the pair), then
    /// surviving candidates are settled with exact polygon predicates.
    /// Edge membership does not depend on evaluation order, so the
    /// candidate pairs are scored in parallel and merged afterwards.
    ///
    /// Re-running on an unchanged node set reproduces the same edge
    /// set: insertion is duplicate-safe and the predicates are pure.
    pub fn connect_nodes(&mut self, diag: &mut Diagnostics) {
        let ids: Vec<NodeId> = self.nodes.keys().cloned().collect();

        // Build (and repair, where needed) each node's polygon once up
        // front instead of once per surviving pair.
        let mut polygons: Vec<MultiPolygon<f64>> = Vec::with_capacity(ids.len());
        for id in &ids {
            let (polygon, repaired) = geometry::polygons_from_vertices(&self.nodes[id].vertices);
            if repaired {
                diag.repaired_polygons += 1;
            }
            polygons.push(polygon);
        }

        let mut candidates: Vec<(usize, usize)> = Vec::new();
        for i in 0..ids.len() {
            let a = self.nodes[&ids[i]].bbox;
            for j in (i + 1)..ids.len() {
                if a.may_border(&self.nodes[&ids[j]].bbox) {
                    candidates.push((i, j));
                } else {
                    diag.pruned_pairs += 1;
                }
            }
        }
        diag.candidate_pairs += candidates.len();

        let bordering: Vec<(usize, usize)> = candidates
            .par_iter()
            .filter(|&&(i, j)| geometry::borders(&polygons[i], &polygons[j]))
            .copied()
            .collect();

        for (i, j) in bordering {
            if self.add_edge(&ids[i], &ids[j]) {
                diag.border_edges += 1;
            }
        }
    }
}
