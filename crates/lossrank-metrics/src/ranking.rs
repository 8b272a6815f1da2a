//! Inverse-incoming-weight ranking.
//!
//! # Algorithm
//!
//! 1. For every node `v`, `incoming(v)` is the sum of weights of edges ending
//!    at `v` (zero when nothing points at it).
//! 2. For every node `u`:
//!
//!    ```text
//!    score(u) = Σ over u → v with weight w of  w * (1 / (incoming(v) + ε))
//!    ```
//!
//!    A node sends weight to its targets, and each unit counts for more when
//!    the target receives little weight overall. `ε` sits in the denominator
//!    so a target whose total incoming weight is zero (possible with
//!    zero-weight edges) does not divide by zero. A node with no outgoing
//!    edges scores exactly `0.0`.
//! 3. Nodes are sorted by score, descending. The sort is stable, so equal
//!    scores keep the graph's node order.
//!
//! # Example
//!
//! A 3-cycle `A → B → C → A` with weight 10 on every edge gives every node
//! `incoming = 10` and `score = 10 / (10 + ε) ≈ 1.0`; the three-way tie stays
//! in `A, B, C` order.

use std::collections::HashMap;

use lossrank_core::{GraphError, RankingConfig, WeightedGraph};
use petgraph::{Direction, visit::EdgeRef};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// One node and its score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedNode {
    pub node: String,
    pub score: f64,
}

impl RankedNode {
    #[must_use]
    pub fn new(node: impl Into<String>, score: f64) -> Self {
        Self {
            node: node.into(),
            score,
        }
    }
}

/// Nodes ordered by score, highest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ranking {
    entries: Vec<RankedNode>,
}

impl Ranking {
    /// Stable-sort `entries` by score descending.
    #[must_use]
    pub fn from_entries(mut entries: Vec<RankedNode>) -> Self {
        entries.sort_by(|a, b| b.score.total_cmp(&a.score));
        Self { entries }
    }

    /// Entries in rank order.
    #[must_use]
    pub fn entries(&self) -> &[RankedNode] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RankedNode> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Node labels in rank order.
    pub fn nodes(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|e| e.node.as_str())
    }

    /// Node → score mapping.
    #[must_use]
    pub fn scores(&self) -> HashMap<String, f64> {
        self.entries
            .iter()
            .map(|e| (e.node.clone(), e.score))
            .collect()
    }

    /// Score for one node.
    #[must_use]
    pub fn score(&self, node: &str) -> Option<f64> {
        self.entries.iter().find(|e| e.node == node).map(|e| e.score)
    }

    /// Zero-based rank position of `node`.
    #[must_use]
    pub fn position(&self, node: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.node == node)
    }
}

impl<'a> IntoIterator for &'a Ranking {
    type Item = &'a RankedNode;
    type IntoIter = std::slice::Iter<'a, RankedNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Sum of incoming edge weight per node. Every node is present; nodes with
/// no incoming edges map to `0.0`.
#[must_use]
pub fn incoming_totals(graph: &WeightedGraph) -> HashMap<String, f64> {
    let g = graph.digraph();
    let totals = incoming_by_index(graph);
    g.node_indices()
        .map(|idx| (g[idx].clone(), totals[idx.index()]))
        .collect()
}

/// Compute the ranking for `graph`.
///
/// # Errors
///
/// Returns [`GraphError::InvalidParameter`] if `config.epsilon` is not a
/// finite positive number.
#[instrument(skip(graph, config), fields(nodes = graph.node_count(), edges = graph.edge_count()))]
pub fn compute_ranking(
    graph: &WeightedGraph,
    config: &RankingConfig,
) -> Result<Ranking, GraphError> {
    config.validate()?;

    let g = graph.digraph();
    let incoming = incoming_by_index(graph);
    let epsilon = config.epsilon;

    let entries: Vec<RankedNode> = g
        .node_indices()
        .map(|u| {
            // fold from +0.0: an empty `sum()` would yield -0.0.
            let score = g
                .edges_directed(u, Direction::Outgoing)
                .map(|e| *e.weight() * (1.0 / (incoming[e.target().index()] + epsilon)))
                .fold(0.0, |acc, contribution| acc + contribution);
            RankedNode::new(g[u].clone(), score)
        })
        .collect();

    let ranking = Ranking::from_entries(entries);
    debug!(
        top = ranking.entries().first().map(|e| e.node.as_str()),
        "computed ranking"
    );
    Ok(ranking)
}

fn incoming_by_index(graph: &WeightedGraph) -> Vec<f64> {
    let g = graph.digraph();
    let mut totals = vec![0.0_f64; g.node_count()];
    for edge in g.edge_references() {
        totals[edge.target().index()] += *edge.weight();
    }
    totals
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
