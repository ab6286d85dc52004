//! SAT-competition style solver output.
//!
//! Recognizes `s <STATUS>` verdict lines, `v <lits> ... 0` model lines and
//! the `c ...` statistics lines printed by Glucose-family solvers.

use cliquesat_base::{Error, Result};

/// Exit code reported by a solver that found the instance satisfiable.
pub const EXIT_SATISFIABLE: i32 = 10;
/// Exit code reported by a solver that proved the instance unsatisfiable.
pub const EXIT_UNSATISFIABLE: i32 = 20;

const STAT_KEYWORDS: [&str; 4] = ["conflicts", "decisions", "propagations", "CPU time"];

/// A solver's verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Satisfiable,
    Unsatisfiable,
    Unknown,
}

impl Verdict {
    /// Maps the conventional exit codes 10/20; anything else is `None`.
    #[must_use]
    pub fn from_exit_code(code: i32) -> Option<Self> {
        match code {
            EXIT_SATISFIABLE => Some(Self::Satisfiable),
            EXIT_UNSATISFIABLE => Some(Self::Unsatisfiable),
            _ => None,
        }
    }

    fn from_status(status: &str) -> Option<Self> {
        match status {
            "SATISFIABLE" => Some(Self::Satisfiable),
            "UNSATISFIABLE" => Some(Self::Unsatisfiable),
            "UNKNOWN" | "INDETERMINATE" => Some(Self::Unknown),
            _ => None,
        }
    }
}

/// Everything extracted from one solver run's standard output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SolverOutput {
    /// Verdict from the `s` line, if one was printed.
    pub verdict: Option<Verdict>,
    /// Model literals from all `v` lines, in order, without the final `0`.
    pub model: Vec<i64>,
    /// Whether the model was closed by a `0`.
    pub model_terminated: bool,
    /// Statistics lines (conflicts, decisions, ...), trimmed.
    pub stats: Vec<String>,
}

impl SolverOutput {
    /// Parses the terminal output of a solver.
    pub fn parse(text: &str) -> Result<Self> {
        let mut out = Self::default();

        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            if let Some(status) = line.strip_prefix("s ") {
                let verdict = Verdict::from_status(status.trim()).ok_or_else(|| {
                    Error::SolverOutputParse(format!("unrecognized status line {line:?}"))
                })?;
                if out.verdict.is_some_and(|v| v != verdict) {
                    return Err(Error::SolverOutputParse(
                        "solver printed conflicting status lines".to_string(),
                    ));
                }
                out.verdict = Some(verdict);
            } else if line == "v" || line.starts_with("v ") {
                out.push_model_line(&line[1..])?;
            } else if is_stats_line(line) {
                out.stats.push(line.to_string());
            }
        }

        Ok(out)
    }

    fn push_model_line(&mut self, body: &str) -> Result<()> {
        for token in body.split_whitespace() {
            let lit: i64 = token.parse().map_err(|_| {
                Error::SolverOutputParse(format!("invalid model literal {token:?}"))
            })?;
            if self.model_terminated {
                return Err(Error::SolverOutputParse(
                    "model literal after terminating 0".to_string(),
                ));
            }
            if lit == 0 {
                self.model_terminated = true;
            } else {
                self.model.push(lit);
            }
        }
        Ok(())
    }
}

fn is_stats_line(line: &str) -> bool {
    (line.starts_with("c ") || line.starts_with("c|"))
        && STAT_KEYWORDS.iter().any(|key| line.contains(key))
}
