//! Shared test scaffolding: an in-process backend and a few graphs.

#![allow(dead_code)]

use cliquesat_base::{CnfFormula, Graph};
use cliquesat_format::read_cnf;
use cliquesat_kit::{Assignment, CnfArtifact, Result, SatBackend, SolverOutcome, SolverRun};
use std::fs::File;
use std::time::{Duration, Instant};

/// Reads the artifact back from disk and decides it with a small DPLL.
#[derive(Debug, Default)]
pub struct DpllBackend {
    pub calls: Vec<usize>,
}

impl SatBackend for DpllBackend {
    fn run(&mut self, artifact: &CnfArtifact) -> Result<SolverRun> {
        let start = Instant::now();
        let cnf = read_cnf(File::open(&artifact.path)?)?;
        assert_eq!(cnf.num_vars(), artifact.num_vars);
        assert_eq!(cnf.num_clauses(), artifact.num_clauses);
        self.calls.push(artifact.num_vars);

        let outcome = match solve(&cnf) {
            Some(values) => {
                assert!(cnf.is_satisfied_by(|v| values[(v - 1) as usize]));
                SolverOutcome::Satisfiable(Assignment::from_values(values))
            }
            None => SolverOutcome::Unsatisfiable,
        };
        Ok(SolverRun {
            outcome,
            stats: vec!["c decisions : dpll".to_string()],
            raw_output: String::new(),
            elapsed: start.elapsed(),
        })
    }
}

/// Always answers SAT with a fixed model, whatever it is asked.
pub struct FixedModelBackend {
    pub model: Vec<bool>,
}

impl SatBackend for FixedModelBackend {
    fn run(&mut self, _artifact: &CnfArtifact) -> Result<SolverRun> {
        Ok(SolverRun {
            outcome: SolverOutcome::Satisfiable(Assignment::from_values(self.model.clone())),
            stats: Vec::new(),
            raw_output: String::new(),
            elapsed: Duration::ZERO,
        })
    }
}

/// Counts calls and fails the test if it is ever used.
#[derive(Default)]
pub struct ForbiddenBackend;

impl SatBackend for ForbiddenBackend {
    fn run(&mut self, artifact: &CnfArtifact) -> Result<SolverRun> {
        panic!("solver must not be called, got {}", artifact.path.display());
    }
}

pub fn solve(cnf: &CnfFormula) -> Option<Vec<bool>> {
    let mut values: Vec<Option<bool>> = vec![None; cnf.num_vars()];
    if dpll(cnf, &mut values) {
        Some(values.into_iter().map(|v| v.unwrap_or(false)).collect())
    } else {
        None
    }
}

fn dpll(cnf: &CnfFormula, values: &mut Vec<Option<bool>>) -> bool {
    let saved = values.clone();

    // unit propagation
    loop {
        let mut changed = false;
        for clause in cnf.clauses() {
            let mut unassigned = None;
            let mut open = 0;
            let mut satisfied = false;
            for lit in clause.literals() {
                match values[(lit.var() - 1) as usize] {
                    Some(b) if b != lit.is_negated() => {
                        satisfied = true;
                        break;
                    }
                    Some(_) => {}
                    None => {
                        open += 1;
                        unassigned = Some(*lit);
                    }
                }
            }
            if satisfied {
                continue;
            }
            match (open, unassigned) {
                (0, _) => {
                    *values = saved;
                    return false;
                }
                (1, Some(lit)) => {
                    values[(lit.var() - 1) as usize] = Some(!lit.is_negated());
                    changed = true;
                }
                _ => {}
            }
        }
        if !changed {
            break;
        }
    }

    let Some(branch) = values.iter().position(Option::is_none) else {
        return true;
    };
    for choice in [true, false] {
        values[branch] = Some(choice);
        if dpll(cnf, values) {
            return true;
        }
        values[branch] = None;
    }
    *values = saved;
    false
}

/// Triangle {1, 2, 3} plus the isolated vertex 4.
pub fn triangle_plus_isolated() -> Graph {
    Graph::new(4, [(1, 2), (2, 3), (1, 3)]).unwrap()
}

/// The 4-cycle 1-2-3-4-1.
pub fn four_cycle() -> Graph {
    Graph::new(4, [(1, 2), (2, 3), (3, 4), (1, 4)]).unwrap()
}
