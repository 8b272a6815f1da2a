#![forbid(unsafe_code)]
//! lossrank-metrics library.
//!
//! - [`ranking`]: the inverse-incoming-weight ranking engine.
//! - [`hits`] and [`oracle`]: weighted HITS behind the [`ReferenceRanker`]
//!   trait, used as the reference centrality.
//! - [`correlation`]: Spearman's ρ with a two-sided p-value.
//! - [`compare`]: aligns two score mappings, correlates them, and buckets the
//!   result into a [`Similarity`].
//!
//! # Conventions
//!
//! - **Errors**: [`CompareError`] for comparison failures, wrapping
//!   [`lossrank_core::GraphError`] for parameter problems.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod compare;
pub mod correlation;
pub mod error;
pub mod hits;
pub mod oracle;
pub mod ranking;

pub use compare::{
    Comparison, ComparisonRow, ReferenceComparison, Similarity, align_scores, compare_rankings,
    compare_scores, compare_with_reference,
};
pub use correlation::{Correlation, average_ranks, spearman};
pub use error::CompareError;
pub use hits::{HitsResult, hits};
pub use oracle::{HitsOracle, ReferenceRanker, ReferenceScores};
pub use ranking::{RankedNode, Ranking, compute_ranking, incoming_totals};
