//! Directed, edge-weighted graph over a fixed node set.
//!
//! # Overview
//!
//! [`WeightedGraph`] wraps a [`petgraph`] `DiGraph<String, f64>` together with
//! a label → `NodeIndex` map. It exposes the narrow capability surface the
//! ranking code consumes:
//!
//! - enumerate nodes in insertion order ([`WeightedGraph::nodes`]),
//! - enumerate every `(source, target, weight)` edge ([`WeightedGraph::edges`]),
//! - enumerate `(neighbor, weight)` pairs leaving one node
//!   ([`WeightedGraph::outgoing`]).
//!
//! ## Construction
//!
//! The node set is fixed first and edges are added through a
//! [`GraphBuilder`]. Every edge is validated on the way in: self-loops,
//! negative or non-finite weights, and endpoints outside the node set are
//! rejected. Adding the same ordered pair twice overwrites the weight, so
//! there is never more than one edge per `(source, target)`.
//!
//! Once [`GraphBuilder::build`] returns, the graph is immutable.
//!
//! ## Fingerprint
//!
//! [`WeightedGraph::content_hash`] is a BLAKE3 hash of the node list and the
//! sorted edge set. Two graphs with the same nodes (in the same order) and the
//! same weighted edges share a fingerprint regardless of insertion order.

#![allow(clippy::module_name_repetitions)]

use std::collections::HashMap;

use petgraph::{
    Direction,
    graph::{DiGraph, NodeIndex},
    visit::EdgeRef,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::GraphError;

// ---------------------------------------------------------------------------
// Edge
// ---------------------------------------------------------------------------

/// A directed edge `source → target` carrying a non-negative weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedEdge {
    pub source: String,
    pub target: String,
    pub weight: f64,
}

impl WeightedEdge {
    #[must_use]
    pub fn new(source: impl Into<String>, target: impl Into<String>, weight: f64) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            weight,
        }
    }

    /// Check the edge on its own, without reference to any node set.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::SelfLoop`], [`GraphError::NonFiniteWeight`], or
    /// [`GraphError::NegativeWeight`].
    pub fn validate(&self) -> Result<(), GraphError> {
        if self.source == self.target {
            return Err(GraphError::SelfLoop(self.source.clone()));
        }
        if !self.weight.is_finite() {
            return Err(GraphError::NonFiniteWeight {
                from: self.source.clone(),
                to: self.target.clone(),
                weight: self.weight,
            });
        }
        if self.weight < 0.0 {
            return Err(GraphError::NegativeWeight {
                from: self.source.clone(),
                to: self.target.clone(),
                weight: self.weight,
            });
        }
        Ok(())
    }
}

impl<S: Into<String>, T: Into<String>> From<(S, T, f64)> for WeightedEdge {
    fn from((source, target, weight): (S, T, f64)) -> Self {
        Self::new(source, target, weight)
    }
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Accumulates validated edges over a fixed node set.
#[derive(Debug)]
pub struct GraphBuilder {
    graph: DiGraph<String, f64>,
    node_map: HashMap<String, NodeIndex>,
}

impl GraphBuilder {
    /// Start a graph over `nodes`, in the given order.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::DuplicateNode`] if a label appears twice.
    pub fn new<I, S>(nodes: I) -> Result<Self, GraphError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut graph = DiGraph::<String, f64>::new();
        let mut node_map = HashMap::new();

        for label in nodes {
            let label = label.into();
            if node_map.contains_key(&label) {
                return Err(GraphError::DuplicateNode(label));
            }
            let idx = graph.add_node(label.clone());
            node_map.insert(label, idx);
        }

        Ok(Self { graph, node_map })
    }

    /// Add (or overwrite) the edge `source → target`.
    ///
    /// # Errors
    ///
    /// Returns an error if the edge fails [`WeightedEdge::validate`] or if
    /// either endpoint is not in the node set.
    pub fn add_edge(&mut self, edge: &WeightedEdge) -> Result<&mut Self, GraphError> {
        edge.validate()?;

        let lookup = |label: &str| {
            self.node_map
                .get(label)
                .copied()
                .ok_or_else(|| GraphError::UnknownNode {
                    from: edge.source.clone(),
                    to: edge.target.clone(),
                    missing: label.to_string(),
                })
        };
        let a = lookup(&edge.source)?;
        let b = lookup(&edge.target)?;

        // `update_edge` replaces the weight when the pair already exists.
        self.graph.update_edge(a, b, edge.weight);
        Ok(self)
    }

    /// Freeze the graph and compute its fingerprint.
    #[must_use]
    pub fn build(self) -> WeightedGraph {
        let content_hash = compute_content_hash(&self.graph);
        WeightedGraph {
            graph: self.graph,
            node_map: self.node_map,
            content_hash,
        }
    }
}

// ---------------------------------------------------------------------------
// WeightedGraph
// ---------------------------------------------------------------------------

/// An immutable directed graph with `f64` edge weights.
///
/// Node labels are unique strings; node order is the order they were given
/// to [`GraphBuilder::new`].
#[derive(Debug, Clone)]
pub struct WeightedGraph {
    graph: DiGraph<String, f64>,
    node_map: HashMap<String, NodeIndex>,
    content_hash: String,
}

impl WeightedGraph {
    /// Build a graph over `nodes` from a list of edges.
    ///
    /// # Errors
    ///
    /// Returns the first validation error encountered; see
    /// [`GraphBuilder::new`] and [`GraphBuilder::add_edge`].
    #[instrument(skip_all, fields(nodes = nodes.len(), edges = edges.len()))]
    pub fn from_edges<S: AsRef<str>>(
        nodes: &[S],
        edges: &[WeightedEdge],
    ) -> Result<Self, GraphError> {
        let mut builder = GraphBuilder::new(nodes.iter().map(|n| n.as_ref().to_string()))?;
        for edge in edges {
            builder.add_edge(edge)?;
        }
        let graph = builder.build();
        debug!(
            edge_count = graph.edge_count(),
            hash = %graph.content_hash,
            "built weighted graph"
        );
        Ok(graph)
    }

    /// Build a graph whose node set is every endpoint in `edges`, in order of
    /// first appearance.
    ///
    /// Nodes with no incident edges cannot be expressed this way; use
    /// [`WeightedGraph::from_edges`] when the node set is known up front.
    ///
    /// # Errors
    ///
    /// Returns an error if any edge fails [`WeightedEdge::validate`].
    pub fn from_edge_list(edges: &[WeightedEdge]) -> Result<Self, GraphError> {
        let mut nodes: Vec<&str> = Vec::new();
        for edge in edges {
            for label in [edge.source.as_str(), edge.target.as_str()] {
                if !nodes.contains(&label) {
                    nodes.push(label);
                }
            }
        }
        Self::from_edges(&nodes, edges)
    }

    /// Return the number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Return the number of edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// BLAKE3 fingerprint of the node list and edge set.
    #[must_use]
    pub fn content_hash(&self) -> &str {
        &self.content_hash
    }

    /// Node labels in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &str> + '_ {
        self.graph.node_weights().map(String::as_str)
    }

    /// Every edge as `(source, target, weight)`.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str, f64)> + '_ {
        self.graph.edge_references().map(|e| {
            (
                self.graph[e.source()].as_str(),
                self.graph[e.target()].as_str(),
                *e.weight(),
            )
        })
    }

    /// `(neighbor, weight)` pairs for edges leaving `node`, or `None` if the
    /// node is not in the graph.
    #[must_use]
    pub fn outgoing<'a>(
        &'a self,
        node: &str,
    ) -> Option<impl Iterator<Item = (&'a str, f64)> + use<'a>> {
        let idx = self.node_index(node)?;
        Some(
            self.graph
                .edges_directed(idx, Direction::Outgoing)
                .map(|e| (self.graph[e.target()].as_str(), *e.weight())),
        )
    }

    /// Weight of the edge `source → target`, if present.
    #[must_use]
    pub fn edge_weight(&self, source: &str, target: &str) -> Option<f64> {
        let a = self.node_index(source)?;
        let b = self.node_index(target)?;
        let edge = self.graph.find_edge(a, b)?;
        self.graph.edge_weight(edge).copied()
    }

    /// Whether `node` belongs to the graph.
    #[must_use]
    pub fn contains_node(&self, node: &str) -> bool {
        self.node_map.contains_key(node)
    }

    /// Look up the `NodeIndex` for a label.
    #[must_use]
    pub fn node_index(&self, node: &str) -> Option<NodeIndex> {
        self.node_map.get(node).copied()
    }

    /// Return the label for a node index.
    #[must_use]
    pub fn label(&self, idx: NodeIndex) -> Option<&str> {
        self.graph.node_weight(idx).map(String::as_str)
    }

    /// Borrow the underlying petgraph graph for index-based algorithms.
    #[must_use]
    pub const fn digraph(&self) -> &DiGraph<String, f64> {
        &self.graph
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// BLAKE3 over the node list followed by the edge set sorted by endpoints.
fn compute_content_hash(graph: &DiGraph<String, f64>) -> String {
    let mut edges: Vec<(&str, &str, f64)> = graph
        .edge_references()
        .map(|e| {
            (
                graph[e.source()].as_str(),
                graph[e.target()].as_str(),
                *e.weight(),
            )
        })
        .collect();
    edges.sort_by(|a, b| (a.0, a.1).cmp(&(b.0, b.1)));

    let mut hasher = blake3::Hasher::new();
    for label in graph.node_weights() {
        hasher.update(label.as_bytes());
        hasher.update(b"\x00");
    }
    hasher.update(b"\x01");
    for (source, target, weight) in edges {
        hasher.update(source.as_bytes());
        hasher.update(b"\x00");
        hasher.update(target.as_bytes());
        hasher.update(b"\x00");
        hasher.update(&weight.to_bits().to_le_bytes());
    }
    format!("blake3:{}", hasher.finalize())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn edge(a: &str, b: &str, w: f64) -> WeightedEdge {
        WeightedEdge::new(a, b, w)
    }

    #[test]
    fn empty_node_set_produces_empty_graph() {
        let graph = WeightedGraph::from_edges::<&str>(&[], &[]).expect("build graph");
        assert_eq!(graph.node_count(), 0);
        assert_eq!(graph.edge_count(), 0);
        assert!(graph.content_hash().starts_with("blake3:"));
    }

    #[test]
    fn nodes_without_edges_are_kept() {
        let graph = WeightedGraph::from_edges(&["A", "B", "C"], &[]).expect("build graph");
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.nodes().collect::<Vec<_>>(), vec!["A", "B", "C"]);
    }

    #[test]
    fn edge_direction_and_weight() {
        let graph =
            WeightedGraph::from_edges(&["A", "B"], &[edge("A", "B", 5.0)]).expect("build graph");
        assert_eq!(graph.edge_weight("A", "B"), Some(5.0));
        assert_eq!(graph.edge_weight("B", "A"), None);

        let out: Vec<_> = graph.outgoing("A").expect("A exists").collect();
        assert_eq!(out, vec![("B", 5.0)]);
        assert_eq!(graph.outgoing("B").expect("B exists").count(), 0);
        assert!(graph.outgoing("Z").is_none());
    }

    #[test]
    fn readding_edge_overwrites_weight() {
        let graph = WeightedGraph::from_edges(
            &["A", "B"],
            &[edge("A", "B", 5.0), edge("A", "B", 7.0)],
        )
        .expect("build graph");
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.edge_weight("A", "B"), Some(7.0));
    }

    #[test]
    fn self_loop_rejected() {
        let err = WeightedGraph::from_edges(&["A"], &[edge("A", "A", 1.0)]).unwrap_err();
        assert_eq!(err, GraphError::SelfLoop("A".to_string()));
    }

    #[test]
    fn negative_weight_rejected() {
        let err = WeightedGraph::from_edges(&["A", "B"], &[edge("A", "B", -1.0)]).unwrap_err();
        assert!(matches!(err, GraphError::NegativeWeight { .. }));
    }

    #[test]
    fn nan_weight_rejected() {
        let err =
            WeightedGraph::from_edges(&["A", "B"], &[edge("A", "B", f64::NAN)]).unwrap_err();
        assert!(matches!(err, GraphError::NonFiniteWeight { .. }));
    }

    #[test]
    fn zero_weight_accepted() {
        let graph =
            WeightedGraph::from_edges(&["A", "B"], &[edge("A", "B", 0.0)]).expect("build graph");
        assert_eq!(graph.edge_weight("A", "B"), Some(0.0));
    }

    #[test]
    fn unknown_endpoint_rejected() {
        let err = WeightedGraph::from_edges(&["A"], &[edge("A", "B", 1.0)]).unwrap_err();
        assert_eq!(
            err,
            GraphError::UnknownNode {
                from: "A".to_string(),
                to: "B".to_string(),
                missing: "B".to_string(),
            }
        );
    }

    #[test]
    fn duplicate_node_rejected() {
        let err = WeightedGraph::from_edges(&["A", "B", "A"], &[]).unwrap_err();
        assert_eq!(err, GraphError::DuplicateNode("A".to_string()));
    }

    #[test]
    fn edge_list_nodes_follow_first_appearance() {
        let graph = WeightedGraph::from_edge_list(&[
            edge("C", "A", 1.0),
            edge("B", "C", 2.0),
            edge("A", "D", 3.0),
        ])
        .expect("build graph");
        assert_eq!(graph.nodes().collect::<Vec<_>>(), vec!["C", "A", "B", "D"]);
        assert_eq!(graph.edge_count(), 3);
    }

    #[test]
    fn content_hash_ignores_insertion_order() {
        let nodes = ["A", "B", "C"];
        let g1 = WeightedGraph::from_edges(&nodes, &[edge("A", "B", 1.0), edge("B", "C", 2.0)])
            .expect("build graph");
        let g2 = WeightedGraph::from_edges(&nodes, &[edge("B", "C", 2.0), edge("A", "B", 1.0)])
            .expect("build graph");
        assert_eq!(g1.content_hash(), g2.content_hash());
    }

    #[test]
    fn content_hash_changes_with_weight() {
        let nodes = ["A", "B"];
        let g1 = WeightedGraph::from_edges(&nodes, &[edge("A", "B", 1.0)]).expect("build graph");
        let g2 = WeightedGraph::from_edges(&nodes, &[edge("A", "B", 2.0)]).expect("build graph");
        assert_ne!(g1.content_hash(), g2.content_hash());
    }
}
