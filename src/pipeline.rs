use anyhow::Result;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::graph::Graph;
use crate::ingest::{self, Record};

/// Pipeline knobs, owned by the outer CLI/config layer.
#[derive(Debug, Clone, Copy)]
pub struct PipelineConfig {
    /// Coarsening target node count; 0 disables coarsening.
    pub pieces: usize,
    /// Number of districts to grow (at least 1).
    pub districts: u32,
    /// Seed for the single run-wide RNG. A fixed seed with fixed input
    /// and fixed (pieces, districts) reproduces the output graph
    /// byte for byte.
    pub seed: u64,
}

/// Counters reported even when the run succeeds: a repaired polygon or
/// a stall-pruned node is a quiet degradation the caller must see.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Diagnostics {
    /// Records dropped at ingest for having no valid vertices.
    pub dropped_records: usize,
    /// Self-intersecting polygons fixed before predicate evaluation.
    pub repaired_polygons: usize,
    /// Pairs that survived the bounding-box prune.
    pub candidate_pairs: usize,
    /// Pairs discarded by the bounding-box prune.
    pub pruned_pairs: usize,
    /// Edges inserted by the adjacency stage.
    pub border_edges: usize,
    /// Zero-edge coarsening candidates that had to be skipped.
    pub unmergeable_skipped: usize,
    /// Nodes removed because no district could reach them.
    pub unreachable_removed: usize,
    /// Growth passes completed by the partitioner.
    pub passes: usize,
}

impl Diagnostics {
    /// Share (percent) of all pairs that survived the prune.
    pub fn candidate_rate(&self) -> f64 {
        let total = self.candidate_pairs + self.pruned_pairs;
        if total == 0 {
            0.0
        } else {
            self.candidate_pairs as f64 * 100.0 / total as f64
        }
    }
}

/// Run the full pipeline: ingest, adjacency, optional coarsening, and
/// partitioning. Each stage consumes the graph the previous stage
/// produced; nothing re-reads the raw records.
pub fn build(records: &[Record], config: &PipelineConfig, verbose: u8) -> Result<(Graph, Diagnostics)> {
    let mut diag = Diagnostics::default();
    let mut rng = StdRng::seed_from_u64(config.seed);

    let mut graph = ingest::load_records(records, &mut diag)?;
    if verbose > 0 {
        eprintln!(
            "[ingest] {} nodes ({} records dropped)",
            graph.node_count(),
            diag.dropped_records
        );
    }

    graph.connect_nodes(&mut diag);
    if verbose > 0 {
        eprintln!(
            "[adjacency] {} edges from {} candidate pairs ({:.2}% of total), {} polygons repaired",
            graph.edge_count(),
            diag.candidate_pairs,
            diag.candidate_rate(),
            diag.repaired_polygons
        );
    }

    graph.drop_nodes(config.pieces, &mut rng, &mut diag);
    if verbose > 0 && config.pieces > 0 {
        eprintln!(
            "[coarsen] {} nodes remain ({} unmergeable candidates skipped)",
            graph.node_count(),
            diag.unmergeable_skipped
        );
    }

    let outcome = graph.split_into_districts(config.districts, &mut rng, &mut diag)?;
    if verbose > 0 {
        eprintln!(
            "[partition] {} districts in {} passes ({} unreachable nodes removed)",
            config.districts,
            outcome.passes,
            outcome.removed.len()
        );
    }

    Ok((graph, diag))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn candidate_rate_handles_empty_runs() {
        assert_eq!(Diagnostics::default().candidate_rate(), 0.0);

        let diag = Diagnostics { candidate_pairs: 1, pruned_pairs: 3, ..Default::default() };
        assert_eq!(diag.candidate_rate(), 25.0);
    }
}
