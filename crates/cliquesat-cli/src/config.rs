//! Solver configuration from the command line and environment.

use clap::Args;
use cliquesat_kit::SolverConfig;
use std::path::PathBuf;
use std::time::Duration;

/// Options that control how the external solver is run.
#[derive(Args, Debug, Clone)]
pub struct SolverArgs {
    /// SAT solver binary (path, or a name looked up in the working directory and on PATH)
    #[arg(short, long, env = "CLIQUESAT_SOLVER", default_value = "glucose-syrup")]
    pub solver: PathBuf,

    /// Verbosity of the SAT solver, passed as -verb=<N>
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=1))]
    pub verb: u8,

    /// Timeout in seconds for each solver call
    #[arg(long, env = "CLIQUESAT_TIMEOUT", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Extra argument passed to the solver before the CNF path (repeatable)
    #[arg(long = "solver-arg", value_name = "ARG", allow_hyphen_values = true)]
    pub solver_args: Vec<String>,

    /// Directory for the temporary per-k CNF files
    #[arg(long, env = "CLIQUESAT_WORK_DIR")]
    pub work_dir: Option<PathBuf>,
}

impl SolverArgs {
    /// Builds the gateway configuration.
    pub fn to_solver_config(&self) -> SolverConfig {
        SolverConfig {
            solver_path: self.solver.clone(),
            verbosity: self.verb,
            timeout: self.timeout.map(Duration::from_secs),
            extra_args: self.solver_args.clone(),
        }
    }
}
