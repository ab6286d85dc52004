//! cliquesat CLI - find cliques in DIMACS graphs with an external SAT solver.

mod commands;
mod config;

use anyhow::Context;
use clap::Parser;
use cliquesat_format::DimacsGraph;
use std::fs::File;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "cliquesat")]
#[command(author, version, about = "Encode and solve the k-clique / max-clique problem via SAT", long_about = None)]
struct Cli {
    /// Log verbosity (-v, -vv, -vvv); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Graph instance file in DIMACS edge format
    #[arg(short, long, default_value = "graph.clq")]
    input: PathBuf,

    /// Output file for the DIMACS CNF formula (with --dump-cnf-only)
    #[arg(short, long, default_value = "formula.cnf")]
    output: PathBuf,

    /// Solve only for a clique of this size; omit to search for a maximum clique
    #[arg(short, long = "kclique", value_name = "K",
          value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..))]
    k: Option<usize>,

    /// Only construct and write the CNF; do not call the SAT solver
    #[arg(long)]
    dump_cnf_only: bool,

    /// Echo the solver's raw terminal output
    #[arg(long)]
    print_solver_output: bool,

    /// Also write a JSON run report to this file
    #[arg(long, value_name = "PATH")]
    report: Option<PathBuf>,

    #[command(flatten)]
    solver: config::SolverArgs,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Loading graph from {:?}", cli.input);
    let file = File::open(&cli.input)
        .with_context(|| format!("cannot open graph file {}", cli.input.display()))?;
    let parsed = DimacsGraph::from_reader(file)
        .with_context(|| format!("cannot read graph file {}", cli.input.display()))?;
    let graph = parsed.graph;
    tracing::info!(
        "Graph: {} vertices, {} edges",
        graph.num_vertices(),
        graph.num_edges()
    );

    if cli.dump_cnf_only {
        return commands::dump::run(&graph, cli.k, &cli.output);
    }

    let options = commands::solve::SolveOptions {
        input: cli.input,
        k: cli.k,
        print_solver_output: cli.print_solver_output,
        report: cli.report,
        work_dir: cli.solver.work_dir.clone(),
        solver: cli.solver.to_solver_config(),
    };
    commands::solve::run(&graph, options)
}
