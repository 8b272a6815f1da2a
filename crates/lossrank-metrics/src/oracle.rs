//! Reference ranking oracles.
//!
//! The comparator treats the reference centrality as a black box: any
//! [`ReferenceRanker`] that maps every node of the graph to a non-negative
//! hub score and authority score will do. [`HitsOracle`] is the built-in
//! implementation.

use std::collections::HashMap;

use lossrank_core::{GraphError, HitsConfig, ReferenceKind, WeightedGraph};
use serde::Serialize;
use tracing::debug;

use crate::hits::{HitsResult, hits};

/// Hub and authority mappings over a graph's node set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReferenceScores {
    pub hubs: HashMap<String, f64>,
    pub authorities: HashMap<String, f64>,
    pub iterations: usize,
    pub converged: bool,
}

impl ReferenceScores {
    /// The mapping selected by `kind`.
    #[must_use]
    pub const fn select(&self, kind: ReferenceKind) -> &HashMap<String, f64> {
        match kind {
            ReferenceKind::Hubs => &self.hubs,
            ReferenceKind::Authorities => &self.authorities,
        }
    }
}

impl From<HitsResult> for ReferenceScores {
    fn from(result: HitsResult) -> Self {
        Self {
            hubs: result.hubs,
            authorities: result.authorities,
            iterations: result.iterations,
            converged: result.converged,
        }
    }
}

/// An independent centrality measure used as ground truth.
pub trait ReferenceRanker {
    /// Short identifier used in reports.
    fn name(&self) -> &'static str;

    /// Score every node of `graph`.
    ///
    /// # Errors
    ///
    /// Returns an error if the oracle's parameters are invalid.
    fn rank(&self, graph: &WeightedGraph) -> Result<ReferenceScores, GraphError>;
}

/// Weighted HITS as a [`ReferenceRanker`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HitsOracle {
    config: HitsConfig,
}

impl HitsOracle {
    #[must_use]
    pub const fn new(config: HitsConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &HitsConfig {
        &self.config
    }
}

impl ReferenceRanker for HitsOracle {
    fn name(&self) -> &'static str {
        "hits"
    }

    fn rank(&self, graph: &WeightedGraph) -> Result<ReferenceScores, GraphError> {
        self.config.validate()?;
        let result = hits(graph, &self.config);
        debug!(
            iterations = result.iterations,
            converged = result.converged,
            "reference scores computed"
        );
        Ok(result.into())
    }
}
