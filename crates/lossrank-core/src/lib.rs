#![forbid(unsafe_code)]
//! lossrank-core library.
//!
//! Shared building blocks for the lossrank workspace: the weighted digraph
//! model ([`graph`]), typed run parameters ([`config`]), and the error types
//! with their machine-readable codes ([`error`]).
//!
//! # Conventions
//!
//! - **Errors**: library errors are `thiserror` enums carrying an [`ErrorCode`];
//!   binaries wrap them in `anyhow::Result`.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod config;
pub mod error;
pub mod graph;

pub use config::{
    DEFAULT_EPSILON, DEFAULT_HITS_MAX_ITER, DEFAULT_HITS_TOLERANCE, ExperimentConfig,
    GeneratorConfig, HitsConfig, RankingConfig, ReferenceKind, WeightBounds, default_nodes,
};
pub use error::{ErrorCode, GraphError};
pub use graph::{GraphBuilder, WeightedEdge, WeightedGraph};
