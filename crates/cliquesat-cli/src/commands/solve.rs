//! Fixed-k decision and maximum-clique search with an external solver.

use crate::commands::report::RunReport;
use anyhow::Context;
use cliquesat_base::Graph;
use cliquesat_kit::{CliqueSearch, DecisionResult, ExternalSolver, SearchOutcome, SolverConfig};
use std::path::PathBuf;

const RULE: &str = "====================================================";

pub struct SolveOptions {
    pub input: PathBuf,
    pub k: Option<usize>,
    pub print_solver_output: bool,
    pub report: Option<PathBuf>,
    pub work_dir: Option<PathBuf>,
    pub solver: SolverConfig,
}

pub fn run(graph: &Graph, options: SolveOptions) -> anyhow::Result<()> {
    if let Some(k) = options.k {
        cliquesat_kit::validate_k(graph, k)?;
    }

    let solver = ExternalSolver::new(options.solver.clone())
        .context("cannot set up the SAT solver")?;
    tracing::info!("Solver: {}", solver.binary().display());

    let mut search = CliqueSearch::new(graph, solver);
    if let Some(dir) = &options.work_dir {
        search = search.with_work_dir(dir);
    }

    match options.k {
        Some(k) => {
            let step = search
                .solve_fixed(k)
                .with_context(|| format!("solving for a clique of size {k} failed"))?;
            print!("{}", render_fixed(&step, options.print_solver_output));
            if let Some(path) = &options.report {
                RunReport::fixed(&options.input, graph, &step).write_to(path)?;
            }
        }
        None => {
            let print_raw = options.print_solver_output;
            let report = search
                .solve_max_with(|step| print!("{}", render_step(step, print_raw)))
                .context("maximum clique search failed")?;
            print!("{}", render_final(&report.outcome));
            if let Some(path) = &options.report {
                RunReport::max(&options.input, graph, &report.steps, &report.outcome)
                    .write_to(path)?;
            }
        }
    }

    Ok(())
}

/// Fixed-k result as printed to stdout.
pub fn render_fixed(step: &DecisionResult, print_raw: bool) -> String {
    let mut out = String::new();
    if print_raw {
        push_raw_output(&mut out, step);
    }
    match &step.clique {
        Some(clique) => {
            out.push_str(&format!("SAT: clique of size {} found.\n", step.k));
            out.push_str(&format!("Vertices in the clique: {clique}\n"));
            push_stats(&mut out, step);
        }
        None => out.push_str(&format!("UNSAT: no clique of size {}.\n", step.k)),
    }
    out
}

/// One step of the incremental search.
pub fn render_step(step: &DecisionResult, print_raw: bool) -> String {
    let mut out = format!("{RULE}\nTrying clique size k = {}\n{RULE}\n", step.k);
    if print_raw {
        push_raw_output(&mut out, step);
    }
    match &step.clique {
        Some(clique) => {
            out.push_str(&format!(
                "SAT: clique of size {} found. Vertices: {clique}\n",
                step.k
            ));
            push_stats(&mut out, step);
        }
        None => out.push_str(&format!(
            "No clique of size {}. Maximum clique size is {}.\n",
            step.k,
            step.k - 1
        )),
    }
    out
}

/// Summary after the incremental search ends.
pub fn render_final(outcome: &SearchOutcome) -> String {
    let vertices = outcome
        .clique()
        .map_or_else(|| "[]".to_string(), ToString::to_string);
    format!(
        "\nMaximum clique size: {}\nVertices in a maximum clique: {vertices}\n",
        outcome.omega()
    )
}

fn push_raw_output(out: &mut String, step: &DecisionResult) {
    out.push_str("========== Solver raw output ==========\n");
    for line in step.raw_output.lines() {
        out.push_str(line);
        out.push('\n');
    }
    out.push_str("=======================================\n");
}

fn push_stats(out: &mut String, step: &DecisionResult) {
    if step.stats.is_empty() {
        return;
    }
    out.push_str("---------- Solver statistics ----------\n");
    for line in &step.stats {
        out.push_str(line);
        out.push('\n');
    }
    out.push_str("---------------------------------------\n");
}
