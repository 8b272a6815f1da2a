pub mod compare;
pub mod rank;

use anyhow::{Context, Result};
use clap::Args;
use lossrank_core::{
    DEFAULT_EPSILON, GeneratorConfig, RankingConfig, WeightBounds, WeightedGraph, default_nodes,
};
use serde::Serialize;
use tracing::info;

/// Graph-generation flags shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct GraphArgs {
    /// Comma-separated node identifiers, in iteration order [default: A..Z].
    #[arg(long, value_delimiter = ',')]
    pub nodes: Option<Vec<String>>,

    /// Smallest edge weight (inclusive).
    #[arg(long, default_value = "0")]
    pub min_weight: u32,

    /// Largest edge weight (inclusive).
    #[arg(long, default_value = "20")]
    pub max_weight: u32,

    /// Seed for reproducible graphs; omit to draw from OS entropy.
    #[arg(long)]
    pub seed: Option<u64>,
}

impl GraphArgs {
    /// Resolve into a generator configuration.
    pub fn generator_config(&self) -> GeneratorConfig {
        GeneratorConfig {
            nodes: self.nodes.clone().unwrap_or_else(default_nodes),
            bounds: WeightBounds {
                min: self.min_weight,
                max: self.max_weight,
            },
            seed: self.seed,
        }
    }
}

/// Ranking-engine flags.
#[derive(Args, Debug, Clone, Copy)]
pub struct RankingArgs {
    /// Added to every incoming-weight total before inverting.
    #[arg(long, default_value_t = DEFAULT_EPSILON)]
    pub epsilon: f64,
}

impl RankingArgs {
    pub const fn ranking_config(self) -> RankingConfig {
        RankingConfig {
            epsilon: self.epsilon,
        }
    }
}

/// Identity of the graph a report was computed on.
#[derive(Debug, Serialize)]
pub struct GraphSummary {
    pub nodes: usize,
    pub edges: usize,
    pub content_hash: String,
}

impl From<&WeightedGraph> for GraphSummary {
    fn from(graph: &WeightedGraph) -> Self {
        Self {
            nodes: graph.node_count(),
            edges: graph.edge_count(),
            content_hash: graph.content_hash().to_string(),
        }
    }
}

/// Validate `config` and generate its graph.
pub fn build_graph(config: &GeneratorConfig) -> Result<WeightedGraph> {
    config
        .validate()
        .context("invalid generator configuration")?;
    let graph = lossrank_sim::generate_graph(config).context("failed to generate graph")?;
    info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        hash = graph.content_hash(),
        "graph generated"
    );
    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generator_config_defaults_to_alphabet() {
        let args = GraphArgs {
            nodes: None,
            min_weight: 0,
            max_weight: 20,
            seed: Some(1),
        };
        let config = args.generator_config();
        assert_eq!(config.nodes, default_nodes());
        assert_eq!(config.bounds, WeightBounds { min: 0, max: 20 });
        assert_eq!(config.seed, Some(1));
    }

    #[test]
    fn inverted_bounds_fail_before_generation() {
        let args = GraphArgs {
            nodes: None,
            min_weight: 9,
            max_weight: 3,
            seed: Some(1),
        };
        let err = build_graph(&args.generator_config()).expect_err("inverted bounds");
        assert!(err.to_string().contains("invalid generator configuration"));
    }

    #[test]
    fn seeded_graphs_match() {
        let args = GraphArgs {
            nodes: Some(vec!["x".into(), "y".into(), "z".into()]),
            min_weight: 1,
            max_weight: 5,
            seed: Some(99),
        };
        let a = build_graph(&args.generator_config()).expect("graph");
        let b = build_graph(&args.generator_config()).expect("graph");
        assert_eq!(a.content_hash(), b.content_hash());
        assert_eq!(a.node_count(), 3);
    }
}
