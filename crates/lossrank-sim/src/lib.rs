#![forbid(unsafe_code)]
//! lossrank-sim library.
//!
//! Generates random directed weighted edge sets over a fixed node list. The
//! random source is owned by each [`EdgeGenerator`], so two generators never
//! share state and a seeded generator always replays the same stream.
//!
//! # Conventions
//!
//! - **Errors**: [`lossrank_core::GraphError`] for parameter problems.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod generate;

pub use generate::{EdgeGenerator, generate_graph, generate_random_edges};
