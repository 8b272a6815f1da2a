//! Random edge generation.
//!
//! For every ordered pair `(i, j)` with `i != j` over the node list, visited
//! row-major (`i` outer, `j` inner), the generator flips a fair coin. On heads
//! it emits `nodes[i] → nodes[j]` with an integer weight drawn uniformly from
//! the inclusive [`WeightBounds`]. Self-loops are never produced, and an
//! empty result is a valid (degenerate) graph.
//!
//! The draw order is part of the contract: with the same seed, node list, and
//! bounds the output is identical from run to run.

use std::collections::HashSet;

use lossrank_core::{GeneratorConfig, GraphError, WeightBounds, WeightedEdge, WeightedGraph};
use rand::{Rng, SeedableRng, rngs::StdRng};
use tracing::{debug, instrument};

/// Owns the random source used for edge generation.
#[derive(Debug, Clone)]
pub struct EdgeGenerator {
    rng: StdRng,
    seed: Option<u64>,
}

impl EdgeGenerator {
    /// Create a generator; `None` seeds from OS entropy.
    #[must_use]
    pub fn new(seed: Option<u64>) -> Self {
        let rng = seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
        Self { rng, seed }
    }

    /// Create a generator with a fixed seed.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::new(Some(seed))
    }

    /// The seed this generator was created with, if any.
    #[must_use]
    pub const fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Draw a random edge set over `nodes`.
    ///
    /// Consecutive calls on the same generator continue the random stream.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::InvalidWeightBounds`] if `bounds.min > bounds.max`
    /// and [`GraphError::DuplicateNode`] if a node label repeats.
    #[instrument(skip(self, nodes), fields(nodes = nodes.len(), seed = ?self.seed))]
    pub fn generate<S: AsRef<str>>(
        &mut self,
        nodes: &[S],
        bounds: WeightBounds,
    ) -> Result<Vec<WeightedEdge>, GraphError> {
        bounds.validate()?;
        ensure_unique(nodes)?;

        let mut edges = Vec::new();
        for (i, source) in nodes.iter().enumerate() {
            for (j, target) in nodes.iter().enumerate() {
                if i == j {
                    continue;
                }
                if self.rng.gen_bool(0.5) {
                    let weight = self.rng.gen_range(bounds.min..=bounds.max);
                    edges.push(WeightedEdge::new(
                        source.as_ref(),
                        target.as_ref(),
                        f64::from(weight),
                    ));
                }
            }
        }

        debug!(edges = edges.len(), "generated random edges");
        Ok(edges)
    }
}

/// Generate edges for `config` with a fresh generator.
///
/// # Errors
///
/// Returns an error if `config` fails validation.
pub fn generate_random_edges(config: &GeneratorConfig) -> Result<Vec<WeightedEdge>, GraphError> {
    config.validate()?;
    EdgeGenerator::new(config.seed).generate(&config.nodes, config.bounds)
}

/// Generate edges for `config` and build the graph over the full node list,
/// so nodes that drew no edges are still present.
///
/// # Errors
///
/// Returns an error if `config` fails validation.
pub fn generate_graph(config: &GeneratorConfig) -> Result<WeightedGraph, GraphError> {
    let edges = generate_random_edges(config)?;
    WeightedGraph::from_edges(&config.nodes, &edges)
}

fn ensure_unique<S: AsRef<str>>(nodes: &[S]) -> Result<(), GraphError> {
    let mut seen = HashSet::with_capacity(nodes.len());
    for node in nodes {
        if !seen.insert(node.as_ref()) {
            return Err(GraphError::DuplicateNode(node.as_ref().to_string()));
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
