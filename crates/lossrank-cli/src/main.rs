#![forbid(unsafe_code)]

mod cmd;
mod output;

use clap::{Parser, Subcommand};
use output::{CliError, OutputMode, render_error};
use std::env;
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "lossrank: inverse-incoming-weight ranking of random weighted digraphs",
    long_about = None
)]
struct Cli {
    /// Enable debug logging (ignored when LOSSRANK_LOG is set).
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON output instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Derive the output mode from flags.
    const fn output_mode(&self) -> OutputMode {
        if self.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        about = "Rank the nodes of a random graph",
        long_about = "Generate a random weighted digraph and rank its nodes by outgoing weight, \
                      each edge discounted by the total weight its target receives.",
        after_help = "EXAMPLES:\n    # Rank a reproducible 26-node graph\n    lossrank rank --seed 42\n\n    \
                      # Custom node set and weights\n    lossrank rank --nodes a,b,c,d --min-weight 1 --max-weight 5\n\n    \
                      # Emit machine-readable output\n    lossrank rank --seed 42 --json"
    )]
    Rank(cmd::rank::RankArgs),

    #[command(
        about = "Compare the ranking with HITS",
        long_about = "Generate a random weighted digraph, rank it, score it with weighted HITS, \
                      and report the Spearman rank correlation between the two.",
        after_help = "EXAMPLES:\n    # Compare against HITS hub scores\n    lossrank compare --seed 42\n\n    \
                      # Compare against authorities instead\n    lossrank compare --seed 42 --reference authorities\n\n    \
                      # Emit machine-readable output\n    lossrank compare --seed 42 --json"
    )]
    Compare(cmd::compare::CompareArgs),
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("LOSSRANK_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose || env::var("DEBUG").is_ok() {
            "lossrank=debug,info"
        } else {
            "lossrank=info,warn"
        })
    });

    let format = env::var("LOSSRANK_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let output = cli.output_mode();
    debug!(?output, "starting");

    let command_result = match cli.command {
        Commands::Rank(ref args) => cmd::rank::run_rank(args, output),
        Commands::Compare(ref args) => cmd::compare::run_compare(args, output),
    };

    if let Err(err) = command_result {
        render_error(output, &CliError::from_anyhow(&err))?;
        std::process::exit(1);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lossrank_core::ReferenceKind;

    #[test]
    fn json_flag_sets_output_mode() {
        let cli = Cli::parse_from(["lossrank", "--json", "rank"]);
        assert!(cli.output_mode().is_json());
    }

    #[test]
    fn json_flag_after_subcommand() {
        let cli = Cli::parse_from(["lossrank", "compare", "--json"]);
        assert!(cli.output_mode().is_json());
    }

    #[test]
    fn default_output_is_human() {
        let cli = Cli::parse_from(["lossrank", "rank"]);
        assert_eq!(cli.output_mode(), OutputMode::Human);
    }

    #[test]
    fn rank_flags_parse() {
        let cli = Cli::parse_from([
            "lossrank",
            "rank",
            "--nodes",
            "a,b,c",
            "--min-weight",
            "2",
            "--max-weight",
            "4",
            "--seed",
            "7",
            "--epsilon",
            "1e-6",
        ]);
        let Commands::Rank(args) = cli.command else {
            panic!("expected rank");
        };
        assert_eq!(
            args.graph.nodes,
            Some(vec!["a".to_string(), "b".to_string(), "c".to_string()])
        );
        assert_eq!(args.graph.min_weight, 2);
        assert_eq!(args.graph.max_weight, 4);
        assert_eq!(args.graph.seed, Some(7));
        assert!((args.ranking.epsilon - 1e-6).abs() < f64::EPSILON);
    }

    #[test]
    fn rank_defaults() {
        let cli = Cli::parse_from(["lossrank", "rank"]);
        let Commands::Rank(args) = cli.command else {
            panic!("expected rank");
        };
        assert_eq!(args.graph.nodes, None);
        assert_eq!(args.graph.min_weight, 0);
        assert_eq!(args.graph.max_weight, 20);
        assert_eq!(args.graph.seed, None);
    }

    #[test]
    fn reference_kind_parses() {
        let cli = Cli::parse_from(["lossrank", "compare", "--reference", "authorities"]);
        let Commands::Compare(args) = cli.command else {
            panic!("expected compare");
        };
        assert_eq!(args.reference, ReferenceKind::Authorities);

        let cli = Cli::parse_from(["lossrank", "compare"]);
        let Commands::Compare(args) = cli.command else {
            panic!("expected compare");
        };
        assert_eq!(args.reference, ReferenceKind::Hubs);
    }

    #[test]
    fn unknown_reference_is_rejected() {
        assert!(Cli::try_parse_from(["lossrank", "compare", "--reference", "pagerank"]).is_err());
    }
}
