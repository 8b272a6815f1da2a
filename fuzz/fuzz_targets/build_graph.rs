#![no_main]

use libfuzzer_sys::fuzz_target;
use lossrank_core::{RankingConfig, WeightedEdge, WeightedGraph};
use lossrank_metrics::compute_ranking;

const NODES: [&str; 8] = ["A", "B", "C", "D", "E", "F", "G", "H"];

/// Map a byte to a weight, reserving a few values for invalid inputs.
fn weight(byte: u8) -> f64 {
    match byte {
        255 => f64::NAN,
        254 => f64::INFINITY,
        253 => -1.0,
        b => f64::from(b) / 4.0,
    }
}

fuzz_target!(|data: &[u8]| {
    // Each 3-byte chunk is (source, target, weight); indices past the node
    // list exercise the unknown-endpoint path.
    let edges: Vec<WeightedEdge> = data
        .chunks_exact(3)
        .map(|c| {
            let name = |b: u8| NODES.get(usize::from(b % 10)).copied().unwrap_or("?");
            WeightedEdge::new(name(c[0]), name(c[1]), weight(c[2]))
        })
        .collect();

    let Ok(graph) = WeightedGraph::from_edges(&NODES, &edges) else {
        return;
    };

    assert_eq!(graph.node_count(), NODES.len());
    assert!(graph.edge_count() <= NODES.len() * (NODES.len() - 1));
    for (source, target, w) in graph.edges() {
        assert_ne!(source, target);
        assert!(w.is_finite() && w >= 0.0);
    }

    let ranking = compute_ranking(&graph, &RankingConfig::default()).expect("valid config");
    assert_eq!(ranking.len(), NODES.len());
    assert!(ranking.iter().all(|e| e.score.is_finite() && e.score >= 0.0));
});
