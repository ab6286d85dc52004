//! `--dump-cnf-only`: write formulas without calling a solver.

use anyhow::Context;
use cliquesat_base::Graph;
use cliquesat_format::write_cnf;
use cliquesat_kit::{encode_k_clique, per_k_path};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// Writes the CNF for `k` to `output`, or one file per `k = 1..=n` next to
/// `output` when no `k` is given.
pub fn run(graph: &Graph, k: Option<usize>, output: &Path) -> anyhow::Result<()> {
    match k {
        Some(k) => {
            write_formula(graph, k, output)?;
            println!("CNF for k={k} written to {}. (solver not called)", output.display());
        }
        None => {
            for path in write_all(graph, output)? {
                println!("(dump-only) CNF written to {}", path.display());
            }
        }
    }
    Ok(())
}

/// Writes every per-k formula and returns their paths in order of `k`.
pub fn write_all(graph: &Graph, output: &Path) -> anyhow::Result<Vec<PathBuf>> {
    (1..=graph.num_vertices())
        .map(|k| {
            let path = per_k_path(output, k);
            write_formula(graph, k, &path)?;
            Ok(path)
        })
        .collect()
}

fn write_formula(graph: &Graph, k: usize, path: &Path) -> anyhow::Result<()> {
    let cnf = encode_k_clique(graph, k)?;
    let file = File::create(path)
        .with_context(|| format!("cannot create CNF file {}", path.display()))?;
    write_cnf(&cnf, BufWriter::new(file))
        .with_context(|| format!("cannot write CNF file {}", path.display()))?;
    tracing::info!(
        "Wrote k = {} formula ({} vars, {} clauses) to {}",
        k,
        cnf.num_vars(),
        cnf.num_clauses(),
        path.display()
    );
    Ok(())
}
