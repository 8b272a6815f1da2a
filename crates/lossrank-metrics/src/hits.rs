//! Weighted HITS (Hyperlink-Induced Topic Search).
//!
//! # Overview
//!
//! HITS computes two scores for each node:
//!
//! - **Hub score**: how much weight a node sends to good authorities.
//! - **Authority score**: how much weight a node receives from good hubs.
//!
//! # Algorithm
//!
//! Iterative power method (Kleinberg, 1999) on the weighted adjacency matrix:
//!
//! 1. Initialize all hub and authority scores to 1.0.
//! 2. Authority update: `auth(v) = Σ w(u → v) · hub(u)`.
//! 3. Hub update: `hub(u) = Σ w(u → v) · auth(v)`.
//! 4. Normalize both vectors to unit length (L2 norm).
//! 5. Repeat until the L2 change in authority scores drops below the
//!    tolerance, or `max_iter` is reached.
//!
//! # Output
//!
//! Both score vectors are rescaled to sum to 1 before they are returned, so
//! every score is a non-negative share. Nodes with no incident edges score
//! 0. A graph with no edges at all yields all-zero mappings.

use std::collections::HashMap;

use lossrank_core::{HitsConfig, WeightedGraph};
use petgraph::{Direction, visit::EdgeRef};
use tracing::{instrument, warn};

/// Result of the HITS algorithm.
#[derive(Debug, Clone)]
pub struct HitsResult {
    /// Hub scores: node → hub score.
    pub hubs: HashMap<String, f64>,
    /// Authority scores: node → authority score.
    pub authorities: HashMap<String, f64>,
    /// Number of iterations performed.
    pub iterations: usize,
    /// Whether the algorithm converged within `max_iter`.
    pub converged: bool,
}

/// Compute weighted HITS hub and authority scores.
///
/// `config` is assumed valid; see [`HitsConfig::validate`]. A zero
/// `max_iter` returns the rescaled initial scores with `converged = false`.
#[must_use]
#[instrument(skip(graph, config), fields(nodes = graph.node_count(), max_iter = config.max_iter))]
pub fn hits(graph: &WeightedGraph, config: &HitsConfig) -> HitsResult {
    let g = graph.digraph();
    let n = g.node_count();

    if n == 0 {
        return HitsResult {
            hubs: HashMap::new(),
            authorities: HashMap::new(),
            iterations: 0,
            converged: true,
        };
    }

    let mut hub: Vec<f64> = vec![1.0; n];
    let mut auth: Vec<f64> = vec![1.0; n];

    let mut converged = false;
    let mut iterations = 0;

    for iter in 0..config.max_iter {
        iterations = iter + 1;

        // Authority update: auth(v) = Σ w(u → v) · hub(u)
        let mut new_auth = vec![0.0; n];
        for v in g.node_indices() {
            for e in g.edges_directed(v, Direction::Incoming) {
                new_auth[v.index()] += *e.weight() * hub[e.source().index()];
            }
        }

        // Hub update: hub(u) = Σ w(u → v) · auth(v)
        let mut new_hub = vec![0.0; n];
        for u in g.node_indices() {
            for e in g.edges_directed(u, Direction::Outgoing) {
                new_hub[u.index()] += *e.weight() * new_auth[e.target().index()];
            }
        }

        normalize_l2(&mut new_auth);
        normalize_l2(&mut new_hub);

        // Check convergence: L2 norm of (new_auth - auth).
        let diff: f64 = auth
            .iter()
            .zip(new_auth.iter())
            .map(|(a, b)| (a - b).powi(2))
            .sum::<f64>()
            .sqrt();

        auth = new_auth;
        hub = new_hub;

        if diff < config.tolerance {
            converged = true;
            break;
        }
    }

    if !converged {
        warn!(
            iterations,
            tolerance = config.tolerance,
            "HITS did not converge; using last iterate"
        );
    }

    normalize_sum(&mut hub);
    normalize_sum(&mut auth);

    let mut hubs_map = HashMap::with_capacity(n);
    let mut auth_map = HashMap::with_capacity(n);
    for idx in g.node_indices() {
        let label = g[idx].clone();
        hubs_map.insert(label.clone(), hub[idx.index()]);
        auth_map.insert(label, auth[idx.index()]);
    }

    HitsResult {
        hubs: hubs_map,
        authorities: auth_map,
        iterations,
        converged,
    }
}

/// Normalize a vector to unit L2 norm. If the norm is zero, leave as-is.
fn normalize_l2(v: &mut [f64]) {
    let norm: f64 = v.iter().map(|x| x * x).sum::<f64>().sqrt();
    if norm > 0.0 {
        for x in v.iter_mut() {
            *x /= norm;
        }
    }
}

/// Rescale a vector to sum to 1. If the sum is zero, leave as-is.
fn normalize_sum(v: &mut [f64]) {
    let total: f64 = v.iter().sum();
    if total > 0.0 {
        for x in v.iter_mut() {
            *x /= total;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
