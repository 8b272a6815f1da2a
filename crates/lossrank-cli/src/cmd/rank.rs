//! `lossrank rank`: generate a random graph and print its ranking.

use std::io::Write;

use anyhow::{Context, Result};
use clap::Args;
use lossrank_core::{GeneratorConfig, RankingConfig};
use lossrank_metrics::{Ranking, compute_ranking};
use serde::Serialize;

use crate::cmd::{GraphArgs, GraphSummary, RankingArgs, build_graph};
use crate::output::{OutputMode, render};

/// Arguments for `lossrank rank`.
#[derive(Args, Debug)]
pub struct RankArgs {
    #[command(flatten)]
    pub graph: GraphArgs,

    #[command(flatten)]
    pub ranking: RankingArgs,
}

/// JSON output for `lossrank rank`.
#[derive(Debug, Serialize)]
struct RankOutput {
    generator: GeneratorConfig,
    ranking_config: RankingConfig,
    graph: GraphSummary,
    ranking: Ranking,
}

/// Write one `"<node>: <score>"` line per ranked node, 3 decimals.
pub fn write_ranking(w: &mut dyn Write, ranking: &Ranking) -> std::io::Result<()> {
    for entry in ranking {
        writeln!(w, "{}: {:.3}", entry.node, entry.score)?;
    }
    Ok(())
}

/// Execute `lossrank rank`.
pub fn run_rank(args: &RankArgs, output: OutputMode) -> Result<()> {
    let generator = args.graph.generator_config();
    let ranking_config = args.ranking.ranking_config();

    let graph = build_graph(&generator)?;
    let ranking = compute_ranking(&graph, &ranking_config).context("failed to rank graph")?;

    let out = RankOutput {
        generator,
        ranking_config,
        graph: GraphSummary::from(&graph),
        ranking,
    };
    render(output, &out, |out, w| write_ranking(w, &out.ranking))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lossrank_metrics::RankedNode;

    #[test]
    fn lines_use_three_decimals() {
        let ranking = Ranking::from_entries(vec![
            RankedNode::new("B", 0.0),
            RankedNode::new("A", 1.0),
            RankedNode::new("C", 0.123_456),
        ]);
        let mut buf = Vec::new();
        write_ranking(&mut buf, &ranking).expect("write");
        assert_eq!(
            String::from_utf8(buf).expect("utf8"),
            "A: 1.000\nC: 0.123\nB: 0.000\n"
        );
    }
}
