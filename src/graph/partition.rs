use ahash::AHashSet;
use anyhow::{Result, ensure};
use rand::Rng;
use rand::seq::SliceRandom;

use crate::pipeline::Diagnostics;
use crate::types::NodeId;

use super::Graph;

/// What the growth loop ended with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionOutcome {
    /// Pooled nodes no district could reach; removed from the graph.
    pub removed: Vec<NodeId>,
    /// Completed growth passes.
    pub passes: usize,
}

impl Graph {
    /// Assign every reachable node a district label in `1..=districts`
    /// by balanced flood fill.
    ///
    /// One seed node is drawn per district from a shuffled pool, then
    /// districts grow in passes: smallest district first, each district
    /// claims at most one pooled neighbor per pass. The one-claim
    /// throttle is the balance mechanism; it trades raw fill speed for
    /// even growth rates.
    ///
    /// A pass that claims nothing means the remaining pool is
    /// unreachable from every seed. Those nodes (and their edges) are
    /// removed and the partition is returned partial, not failed.
    pub fn split_into_districts(
        &mut self,
        districts: u32,
        rng: &mut impl Rng,
        diag: &mut Diagnostics,
    ) -> Result<PartitionOutcome> {
        ensure!(districts >= 1, "district count must be at least 1");
        ensure!(
            self.node_count() >= districts as usize,
            "cannot split {} nodes into {districts} districts",
            self.node_count(),
        );

        let mut pool: Vec<NodeId> = self.nodes.keys().cloned().collect();
        pool.shuffle(rng);

        // Seed one node per district, in label order, each counting as
        // size one from the start.
        let mut members: Vec<Vec<NodeId>> = Vec::with_capacity(districts as usize);
        for district in 1..=districts {
            let seed = pool.pop().unwrap();
            self.nodes.get_mut(&seed).unwrap().district = Some(district);
            members.push(vec![seed]);
        }

        let mut pooled: AHashSet<NodeId> = pool.into_iter().collect();
        let mut passes = 0;

        while !pooled.is_empty() {
            // Smallest districts grow first; ties break toward the
            // lower label so equal-seed runs stay identical.
            let mut order: Vec<usize> = (0..members.len()).collect();
            order.sort_by_key(|&d| (members[d].len(), d));

            let before = pooled.len();
            for d in order {
                let claim = members[d].iter().find_map(|id| {
                    self.neighbors(id).find(|n| pooled.contains(*n)).cloned()
                });
                if let Some(claimed) = claim {
                    pooled.remove(&claimed);
                    self.nodes.get_mut(&claimed).unwrap().district = Some(d as u32 + 1);
                    members[d].push(claimed);
                }
            }
            passes += 1;

            if pooled.len() == before {
                break; // stalled: nothing left is reachable
            }
        }

        let mut removed: Vec<NodeId> = pooled.into_iter().collect();
        removed.sort();
        for id in &removed {
            self.remove_node(id);
        }
        diag.unreachable_removed += removed.len();
        diag.passes += passes;

        Ok(PartitionOutcome { removed, passes })
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::graph::testutil::graph_of;

    fn ring() -> Graph {
        graph_of(
            &["a", "b", "c", "d"],
            &[("a", "b"), ("b", "c"), ("c", "d"), ("d", "a")],
        )
    }

    fn district_sizes(graph: &Graph, districts: u32) -> Vec<usize> {
        (1..=districts)
            .map(|d| graph.nodes().filter(|n| n.district == Some(d)).count())
            .collect()
    }

    #[test]
    fn every_surviving_node_gets_a_district_in_range() {
        for seed in 0..16 {
            let mut graph = ring();
            let mut rng = StdRng::seed_from_u64(seed);
            let outcome = graph
                .split_into_districts(2, &mut rng, &mut Diagnostics::default())
                .unwrap();

            assert!(outcome.removed.is_empty());
            for node in graph.nodes() {
                let district = node.district.expect("node left unassigned");
                assert!((1..=2).contains(&district));
            }
        }
    }

    #[test]
    fn ring_splits_into_two_balanced_districts() {
        for seed in 0..16 {
            let mut graph = ring();
            let mut rng = StdRng::seed_from_u64(seed);
            graph
                .split_into_districts(2, &mut rng, &mut Diagnostics::default())
                .unwrap();

            let sizes = district_sizes(&graph, 2);
            assert_eq!(sizes, vec![2, 2], "seed {seed} gave sizes {sizes:?}");
        }
    }

    #[test]
    fn unreachable_nodes_are_pruned_on_stall() {
        // Three isolated nodes and two districts: whichever node is
        // not drawn as a seed can never be claimed.
        for seed in 0..16 {
            let mut graph = graph_of(&["a", "b", "c"], &[]);
            let mut diag = Diagnostics::default();
            let mut rng = StdRng::seed_from_u64(seed);
            let outcome = graph.split_into_districts(2, &mut rng, &mut diag).unwrap();

            assert_eq!(outcome.removed.len(), 1);
            assert_eq!(graph.node_count(), 2);
            assert_eq!(diag.unreachable_removed, 1);
            assert_eq!(district_sizes(&graph, 2), vec![1, 1]);
        }
    }

    #[test]
    fn removed_count_is_bounded_by_nodes_minus_districts() {
        let mut graph = graph_of(&["a", "b", "c", "d", "e"], &[("a", "b")]);
        let mut rng = StdRng::seed_from_u64(3);
        let outcome = graph
            .split_into_districts(2, &mut rng, &mut Diagnostics::default())
            .unwrap();
        assert!(outcome.removed.len() <= 5 - 2);
    }

    #[test]
    fn single_district_claims_everything_reachable() {
        let mut graph = ring();
        let mut rng = StdRng::seed_from_u64(9);
        let outcome = graph
            .split_into_districts(1, &mut rng, &mut Diagnostics::default())
            .unwrap();

        assert!(outcome.removed.is_empty());
        assert_eq!(district_sizes(&graph, 1), vec![4]);
        // One claim per pass for the three non-seed nodes.
        assert_eq!(outcome.passes, 3);
    }

    #[test]
    fn more_districts_than_nodes_is_an_error() {
        let mut graph = graph_of(&["a"], &[]);
        let mut rng = StdRng::seed_from_u64(0);
        assert!(
            graph
                .split_into_districts(2, &mut rng, &mut Diagnostics::default())
                .is_err()
        );
    }

    #[test]
    fn same_seed_gives_identical_assignments() {
        let run = |seed: u64| {
            let mut graph = ring();
            let mut rng = StdRng::seed_from_u64(seed);
            graph
                .split_into_districts(2, &mut rng, &mut Diagnostics::default())
                .unwrap();
            graph
        };
        assert_eq!(run(1234), run(1234));
    }
}
