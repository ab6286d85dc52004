//! Fixed-k decision and incremental maximum-clique search.

use crate::decoder::decode_clique;
use crate::encoder::{encode_k_clique, validate_k};
use crate::result::{Clique, DecisionResult, MaxCliqueResult, SearchOutcome, SearchReport};
use crate::solver::{CnfArtifact, SatBackend, SolverOutcome};
use cliquesat_base::{Graph, Result};
use cliquesat_format::write_cnf;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tempfile::{Builder, NamedTempFile};
use tracing::{debug, info};

/// Where the incremental search stands.
///
/// The search tries `k = 1, 2, ...`; the first UNSAT ends it with the best
/// clique seen so far, and a SAT at `k = n` ends it with `omega = n`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchState {
    Trying {
        k: usize,
        best: Option<MaxCliqueResult>,
    },
    Done(SearchOutcome),
}

impl SearchState {
    #[must_use]
    pub fn start() -> Self {
        Self::Trying { k: 1, best: None }
    }

    /// Next state after the attempt at the current `k` returned `found`.
    #[must_use]
    pub fn advance(self, num_vertices: usize, found: Option<Clique>) -> Self {
        let (k, best) = match self {
            Self::Trying { k, best } => (k, best),
            done @ Self::Done(_) => return done,
        };
        match found {
            Some(clique) => {
                let best = MaxCliqueResult {
                    omega: k,
                    example_clique: clique,
                };
                if k >= num_vertices {
                    Self::Done(SearchOutcome::Exhausted(best))
                } else {
                    Self::Trying {
                        k: k + 1,
                        best: Some(best),
                    }
                }
            }
            None => Self::Done(best.map_or(SearchOutcome::NoClique, SearchOutcome::Exhausted)),
        }
    }
}

/// Drives encode → serialize → solve → decode over one graph.
pub struct CliqueSearch<'g, B> {
    graph: &'g Graph,
    backend: B,
    work_dir: Option<PathBuf>,
}

impl<'g, B: SatBackend> CliqueSearch<'g, B> {
    pub fn new(graph: &'g Graph, backend: B) -> Self {
        Self {
            graph,
            backend,
            work_dir: None,
        }
    }

    /// Creates per-k CNF artifacts in `dir` instead of the system temp dir.
    #[must_use]
    pub fn with_work_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.work_dir = Some(dir.into());
        self
    }

    /// Decides whether the graph has a clique of exactly `k` vertices.
    ///
    /// `k` outside `[1, n]` is rejected before any file is written or any
    /// solver is started. A SAT verdict is decoded and re-checked; a model
    /// that does not describe a clique fails the whole call. Every error
    /// names `k`.
    pub fn try_k(&mut self, k: usize) -> Result<DecisionResult> {
        validate_k(self.graph, k)?;
        self.run_k(k).map_err(|e| e.for_k(k))
    }

    fn run_k(&mut self, k: usize) -> Result<DecisionResult> {
        let cnf = encode_k_clique(self.graph, k)?;

        let file = self.artifact_file(k)?;
        write_cnf(&cnf, BufWriter::new(file.as_file()))?;
        let artifact = CnfArtifact {
            path: file.path().to_path_buf(),
            num_vars: cnf.num_vars(),
            num_clauses: cnf.num_clauses(),
        };
        debug!("Wrote k = {} formula to {}", k, artifact.path.display());

        let run = self.backend.run(&artifact)?;
        let clique = match &run.outcome {
            SolverOutcome::Satisfiable(assignment) => {
                Some(decode_clique(self.graph, assignment, k)?)
            }
            SolverOutcome::Unsatisfiable => None,
        };
        file.close()?;

        match &clique {
            Some(c) => info!("k = {}: SAT in {:?}, clique {}", k, run.elapsed, c),
            None => info!("k = {}: UNSAT in {:?}", k, run.elapsed),
        }

        Ok(DecisionResult {
            k,
            clique,
            stats: run.stats,
            raw_output: run.raw_output,
            elapsed: run.elapsed,
        })
    }

    /// Fixed-k mode.
    pub fn solve_fixed(&mut self, k: usize) -> Result<DecisionResult> {
        self.try_k(k)
    }

    /// Finds the clique number by trying `k = 1, 2, ...`.
    pub fn solve_max(&mut self) -> Result<SearchReport> {
        self.solve_max_with(|_| {})
    }

    /// Like [`CliqueSearch::solve_max`], calling `on_step` after every attempt.
    ///
    /// Any error aborts the search; no partial result is returned.
    pub fn solve_max_with(
        &mut self,
        mut on_step: impl FnMut(&DecisionResult),
    ) -> Result<SearchReport> {
        let n = self.graph.num_vertices();
        let mut steps = Vec::new();
        let mut state = SearchState::start();

        loop {
            match state {
                SearchState::Done(outcome) => {
                    info!("Search finished: omega = {}", outcome.omega());
                    return Ok(SearchReport { outcome, steps });
                }
                SearchState::Trying { k, .. } => {
                    let step = self.try_k(k)?;
                    on_step(&step);
                    let found = step.clique.clone();
                    steps.push(step);
                    state = state.advance(n, found);
                }
            }
        }
    }

    fn artifact_file(&self, k: usize) -> Result<NamedTempFile> {
        let prefix = format!("cliquesat-k{k}-");
        let mut builder = Builder::new();
        builder.prefix(&prefix).suffix(".cnf");
        let file = match self.work_dir.as_deref() {
            Some(dir) => builder.tempfile_in(dir)?,
            None => builder.tempfile()?,
        };
        Ok(file)
    }
}

/// Path of the per-k artifact derived from `base`: `formula.cnf` becomes
/// `formula.k3.cnf`.
#[must_use]
pub fn per_k_path(base: &Path, k: usize) -> PathBuf {
    let stem = base
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match base.extension() {
        Some(ext) => format!("{stem}.k{k}.{}", ext.to_string_lossy()),
        None => format!("{stem}.k{k}"),
    };
    base.with_file_name(name)
}
