//! Side-by-side comparison of the core ranking against a reference ranking.
//!
//! # Alignment
//!
//! Both score mappings are read out in one canonical node order (normally
//! the graph's node order) so the two sequences correlate element for
//! element. Neither ranking's own sort order is used for alignment.
//!
//! A node missing from either mapping, or a mapping entry for a node outside
//! the canonical order, is a [`CompareError::NodeSetMismatch`]. Missing
//! scores are never filled with a default. The canonical order itself must
//! list each node once.
//!
//! # Classification
//!
//! The Spearman coefficient is bucketed with strict thresholds:
//!
//! | coefficient | bucket |
//! |---|---|
//! | `> 0.9` | extremely similar |
//! | `> 0.7` | very similar |
//! | `> 0.5` | moderately similar |
//! | otherwise | not very similar |
//!
//! so a coefficient of exactly `0.9` is "very similar".

use std::collections::{HashMap, HashSet};
use std::fmt;

use lossrank_core::{GraphError, RankingConfig, ReferenceKind, WeightedGraph};
use serde::Serialize;
use tracing::{info, instrument};

use crate::correlation::{Correlation, spearman};
use crate::error::CompareError;
use crate::oracle::{ReferenceRanker, ReferenceScores};
use crate::ranking::{RankedNode, Ranking, compute_ranking};

// ---------------------------------------------------------------------------
// Similarity
// ---------------------------------------------------------------------------

/// Discrete similarity bucket for a rank-correlation coefficient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Similarity {
    ExtremelySimilar,
    VerySimilar,
    ModeratelySimilar,
    NotVerySimilar,
}

impl Similarity {
    /// Bucket `coefficient` using strict `>` thresholds at 0.9, 0.7 and 0.5.
    #[must_use]
    pub fn classify(coefficient: f64) -> Self {
        if coefficient > 0.9 {
            Self::ExtremelySimilar
        } else if coefficient > 0.7 {
            Self::VerySimilar
        } else if coefficient > 0.5 {
            Self::ModeratelySimilar
        } else {
            Self::NotVerySimilar
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::ExtremelySimilar => "extremely similar",
            Self::VerySimilar => "very similar",
            Self::ModeratelySimilar => "moderately similar",
            Self::NotVerySimilar => "not very similar",
        }
    }

    /// Report sentence, e.g. `The rankings are very similar.`
    #[must_use]
    pub fn sentence(self) -> String {
        format!("The rankings are {}.", self.label())
    }
}

impl fmt::Display for Similarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Comparison
// ---------------------------------------------------------------------------

/// One line of the side-by-side table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRow {
    /// 1-based rank.
    pub rank: usize,
    pub core: RankedNode,
    pub reference: RankedNode,
}

/// Result of comparing two rankings over the same node set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    pub correlation: Correlation,
    pub similarity: Similarity,
    pub core: Ranking,
    pub reference: Ranking,
}

impl Comparison {
    /// Pair the two rankings position by position.
    #[must_use]
    pub fn rows(&self) -> Vec<ComparisonRow> {
        self.core
            .iter()
            .zip(self.reference.iter())
            .enumerate()
            .map(|(i, (core, reference))| ComparisonRow {
                rank: i + 1,
                core: core.clone(),
                reference: reference.clone(),
            })
            .collect()
    }
}

/// Read `scores` out in `order`, failing unless the key set equals the
/// order's node set exactly.
///
/// # Errors
///
/// Returns [`GraphError::DuplicateNode`] (as [`CompareError::Graph`]) if
/// `order` repeats a node, and [`CompareError::NodeSetMismatch`] naming
/// `ranking` and the offending nodes otherwise.
pub fn align_scores<S: AsRef<str>>(
    ranking: &'static str,
    order: &[S],
    scores: &HashMap<String, f64>,
) -> Result<Vec<f64>, CompareError> {
    let mut aligned = Vec::with_capacity(order.len());
    let mut missing = Vec::new();
    let mut known: HashSet<&str> = HashSet::with_capacity(order.len());
    for node in order {
        let node = node.as_ref();
        if !known.insert(node) {
            return Err(GraphError::DuplicateNode(node.to_string()).into());
        }
        match scores.get(node) {
            Some(&score) => aligned.push(score),
            None => missing.push(node.to_string()),
        }
    }

    let mut unexpected: Vec<String> = scores
        .keys()
        .filter(|k| !known.contains(k.as_str()))
        .cloned()
        .collect();
    unexpected.sort();

    if missing.is_empty() && unexpected.is_empty() {
        Ok(aligned)
    } else {
        Err(CompareError::NodeSetMismatch {
            ranking,
            missing,
            unexpected,
        })
    }
}

/// Compare two score mappings aligned on `order`.
///
/// # Errors
///
/// Returns [`CompareError::NodeSetMismatch`] if either mapping does not
/// cover exactly the nodes in `order`, and propagates [`spearman`] errors.
#[instrument(skip_all, fields(nodes = order.len()))]
pub fn compare_scores<S: AsRef<str>>(
    order: &[S],
    core: &HashMap<String, f64>,
    reference: &HashMap<String, f64>,
) -> Result<Comparison, CompareError> {
    let core_aligned = align_scores("core", order, core)?;
    let reference_aligned = align_scores("reference", order, reference)?;

    let correlation = spearman(&core_aligned, &reference_aligned)?;
    let similarity = Similarity::classify(correlation.coefficient);

    let entries = |values: Vec<f64>| {
        order
            .iter()
            .zip(values)
            .map(|(node, score)| RankedNode::new(node.as_ref(), score))
            .collect::<Vec<_>>()
    };

    Ok(Comparison {
        correlation,
        similarity,
        core: Ranking::from_entries(entries(core_aligned)),
        reference: Ranking::from_entries(entries(reference_aligned)),
    })
}

/// Compare two rankings aligned on `order`.
///
/// # Errors
///
/// See [`compare_scores`].
pub fn compare_rankings<S: AsRef<str>>(
    order: &[S],
    core: &Ranking,
    reference: &Ranking,
) -> Result<Comparison, CompareError> {
    compare_scores(order, &core.scores(), &reference.scores())
}

// ---------------------------------------------------------------------------
// End-to-end
// ---------------------------------------------------------------------------

/// Core ranking, reference scores, and their comparison for one graph.
#[derive(Debug, Clone, Serialize)]
pub struct ReferenceComparison {
    pub oracle: &'static str,
    pub reference_kind: ReferenceKind,
    pub reference_scores: ReferenceScores,
    pub comparison: Comparison,
}

/// Rank `graph`, score it with `oracle`, and compare the core ranking with
/// the `kind` mapping, aligned on the graph's node order.
///
/// # Errors
///
/// Returns parameter errors from the ranking or the oracle, and any
/// [`compare_scores`] error.
#[instrument(skip_all, fields(oracle = oracle.name(), reference = %kind))]
pub fn compare_with_reference(
    graph: &WeightedGraph,
    ranking_config: &RankingConfig,
    oracle: &dyn ReferenceRanker,
    kind: ReferenceKind,
) -> Result<ReferenceComparison, CompareError> {
    let core = compute_ranking(graph, ranking_config)?;
    let reference_scores = oracle.rank(graph)?;

    let order: Vec<&str> = graph.nodes().collect();
    let comparison = compare_scores(&order, &core.scores(), reference_scores.select(kind))?;

    info!(
        coefficient = comparison.correlation.coefficient,
        similarity = %comparison.similarity,
        "rankings compared"
    );

    Ok(ReferenceComparison {
        oracle: oracle.name(),
        reference_kind: kind,
        reference_scores,
        comparison,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
