//! `lossrank compare`: rank a random graph and measure how well the ranking
//! agrees with a HITS reference.

use std::io::Write;

use anyhow::{Context, Result};
use clap::Args;
use lossrank_core::{
    DEFAULT_HITS_MAX_ITER, DEFAULT_HITS_TOLERANCE, ExperimentConfig, HitsConfig, ReferenceKind,
};
use lossrank_metrics::{
    ComparisonRow, Correlation, HitsOracle, Similarity, compare_with_reference,
};
use serde::Serialize;

use crate::cmd::{GraphArgs, GraphSummary, RankingArgs, build_graph};
use crate::output::{OutputMode, render, rule};

/// Arguments for `lossrank compare`.
#[derive(Args, Debug)]
pub struct CompareArgs {
    #[command(flatten)]
    pub graph: GraphArgs,

    #[command(flatten)]
    pub ranking: RankingArgs,

    /// HITS iteration cap.
    #[arg(long, default_value_t = DEFAULT_HITS_MAX_ITER)]
    pub max_iter: usize,

    /// HITS convergence tolerance on the authority vector.
    #[arg(long, default_value_t = DEFAULT_HITS_TOLERANCE)]
    pub tolerance: f64,

    /// Which HITS mapping to compare against (hubs or authorities).
    #[arg(long, default_value = "hubs")]
    pub reference: ReferenceKind,
}

impl CompareArgs {
    fn experiment_config(&self) -> ExperimentConfig {
        ExperimentConfig {
            generator: self.graph.generator_config(),
            ranking: self.ranking.ranking_config(),
            hits: HitsConfig {
                max_iter: self.max_iter,
                tolerance: self.tolerance,
            },
            reference: self.reference,
        }
    }
}

/// JSON output for `lossrank compare`.
#[derive(Debug, Serialize)]
struct CompareOutput {
    config: ExperimentConfig,
    graph: GraphSummary,
    oracle: &'static str,
    reference: ReferenceKind,
    iterations: usize,
    converged: bool,
    correlation: Correlation,
    similarity: Similarity,
    verdict: String,
    rows: Vec<ComparisonRow>,
}

fn write_report(out: &CompareOutput, w: &mut dyn Write) -> std::io::Result<()> {
    let reference = format!("{} {}", out.oracle, out.reference);
    writeln!(w, "{:>4}  {:<20}  {}", "Rank", "Core", reference)?;
    rule(w)?;
    for row in &out.rows {
        let core = format!("{}: {:.3}", row.core.node, row.core.score);
        writeln!(
            w,
            "{:>4}  {:<20}  {}: {:.3}",
            row.rank, core, row.reference.node, row.reference.score
        )?;
    }
    rule(w)?;

    write!(w, "Spearman correlation: {:.4}", out.correlation.coefficient)?;
    match out.correlation.p_value {
        Some(p) => writeln!(w, " (p = {p:.4})")?,
        None => writeln!(w, " (p = n/a)")?,
    }
    writeln!(w, "{}", out.verdict)
}

/// Execute `lossrank compare`.
pub fn run_compare(args: &CompareArgs, output: OutputMode) -> Result<()> {
    let config = args.experiment_config();
    config
        .validate()
        .context("invalid experiment configuration")?;

    let graph = build_graph(&config.generator)?;
    let oracle = HitsOracle::new(config.hits);
    let result = compare_with_reference(&graph, &config.ranking, &oracle, config.reference)
        .context("comparison failed")?;

    let comparison = result.comparison;
    let out = CompareOutput {
        graph: GraphSummary::from(&graph),
        oracle: result.oracle,
        reference: result.reference_kind,
        iterations: result.reference_scores.iterations,
        converged: result.reference_scores.converged,
        correlation: comparison.correlation,
        similarity: comparison.similarity,
        verdict: comparison.similarity.sentence(),
        rows: comparison.rows(),
        config,
    };
    render(output, &out, write_report)
}
