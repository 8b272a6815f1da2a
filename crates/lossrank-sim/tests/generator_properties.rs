//! Property tests for random edge generation.
//!
//! For arbitrary node counts, weight bounds, and seeds:
//!
//! - the same seed reproduces the same edge list,
//! - every weight lies within the inclusive bounds,
//! - no edge is a self-loop and no ordered pair repeats,
//! - the edge list always builds a valid graph over the node list.

use std::collections::HashSet;

use proptest::prelude::*;

use lossrank_core::{WeightBounds, WeightedGraph};
use lossrank_sim::EdgeGenerator;

fn arb_bounds() -> impl Strategy<Value = WeightBounds> {
    (0u32..50, 0u32..50).prop_map(|(a, b)| WeightBounds {
        min: a.min(b),
        max: a.max(b),
    })
}

fn nodes(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("p{i}")).collect()
}

proptest! {
    #[test]
    fn same_seed_reproduces_edges(n in 0usize..15, bounds in arb_bounds(), seed in any::<u64>()) {
        let nodes = nodes(n);
        let first = EdgeGenerator::seeded(seed).generate(&nodes, bounds).expect("generate");
        let second = EdgeGenerator::seeded(seed).generate(&nodes, bounds).expect("generate");
        prop_assert_eq!(first, second);
    }

    #[test]
    fn weights_within_bounds(n in 0usize..15, bounds in arb_bounds(), seed in any::<u64>()) {
        let edges = EdgeGenerator::seeded(seed).generate(&nodes(n), bounds).expect("generate");
        for edge in &edges {
            prop_assert!(bounds.contains(edge.weight), "weight {} outside {:?}", edge.weight, bounds);
        }
    }

    #[test]
    fn no_self_loops_or_repeated_pairs(n in 0usize..15, seed in any::<u64>()) {
        let edges = EdgeGenerator::seeded(seed)
            .generate(&nodes(n), WeightBounds::default())
            .expect("generate");
        let mut pairs = HashSet::new();
        for edge in &edges {
            prop_assert_ne!(&edge.source, &edge.target);
            prop_assert!(pairs.insert((edge.source.clone(), edge.target.clone())));
        }
        prop_assert!(edges.len() <= n * n.saturating_sub(1));
    }

    #[test]
    fn generated_edges_build_a_graph(n in 0usize..15, bounds in arb_bounds(), seed in any::<u64>()) {
        let nodes = nodes(n);
        let edges = EdgeGenerator::seeded(seed).generate(&nodes, bounds).expect("generate");
        let graph = WeightedGraph::from_edges(&nodes, &edges).expect("valid graph");
        prop_assert_eq!(graph.node_count(), n);
        prop_assert_eq!(graph.edge_count(), edges.len());
    }
}
