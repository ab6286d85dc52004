//! Solver gateway.
//!
//! The search only talks to a [`SatBackend`]. The production backend,
//! [`ExternalSolver`], runs a Glucose-compatible binary on a DIMACS file:
//!
//! ```text
//! <solver> -model -verb=<v> [extra args] <cnf-path>
//! ```
//!
//! and reads the verdict from the exit code (10 = SAT, 20 = UNSAT) and the
//! `s` status line, the model from the `v` lines.

use crate::result::Assignment;
use cliquesat_base::{Error, Result};
use cliquesat_format::solver_output::{SolverOutput, Verdict};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::debug;
use wait_timeout::ChildExt;

/// A DIMACS CNF file on disk together with its header counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CnfArtifact {
    pub path: PathBuf,
    pub num_vars: usize,
    pub num_clauses: usize,
}

/// What a backend concluded about one artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolverOutcome {
    Unsatisfiable,
    Satisfiable(Assignment),
}

/// One completed solver call.
#[derive(Debug, Clone)]
pub struct SolverRun {
    pub outcome: SolverOutcome,
    /// Statistics lines reported by the solver.
    pub stats: Vec<String>,
    /// Everything the solver wrote to stdout.
    pub raw_output: String,
    pub elapsed: Duration,
}

/// Decides satisfiability of a serialized CNF formula.
///
/// Implementations must return [`SolverOutcome::Satisfiable`] only with a
/// complete assignment over `1..=artifact.num_vars`.
pub trait SatBackend {
    fn run(&mut self, artifact: &CnfArtifact) -> Result<SolverRun>;
}

impl<B: SatBackend + ?Sized> SatBackend for &mut B {
    fn run(&mut self, artifact: &CnfArtifact) -> Result<SolverRun> {
        (**self).run(artifact)
    }
}

impl<B: SatBackend + ?Sized> SatBackend for Box<B> {
    fn run(&mut self, artifact: &CnfArtifact) -> Result<SolverRun> {
        (**self).run(artifact)
    }
}

/// External solver configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverConfig {
    /// Solver binary: a path, or a name looked up in the working directory
    /// and then on `PATH`.
    pub solver_path: PathBuf,
    /// Passed as `-verb=<n>`.
    pub verbosity: u8,
    /// Per-call wall-clock limit; the process is killed when it expires.
    pub timeout: Option<Duration>,
    /// Inserted between `-verb=<n>` and the CNF path.
    pub extra_args: Vec<String>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            solver_path: PathBuf::from("glucose-syrup"),
            verbosity: 0,
            timeout: None,
            extra_args: Vec::new(),
        }
    }
}

/// A Glucose-compatible solver run as a child process.
#[derive(Debug, Clone)]
pub struct ExternalSolver {
    binary: PathBuf,
    config: SolverConfig,
}

impl ExternalSolver {
    /// Resolves the solver binary. Fails with [`Error::SolverInvocation`]
    /// if it cannot be found or is not executable.
    pub fn new(config: SolverConfig) -> Result<Self> {
        let binary = resolve_binary(&config.solver_path)?;
        debug!("Using solver binary {}", binary.display());
        Ok(Self { binary, config })
    }

    /// The resolved binary path.
    #[must_use]
    pub fn binary(&self) -> &Path {
        &self.binary
    }

    fn command(&self, cnf_path: &Path) -> Command {
        let mut cmd = Command::new(&self.binary);
        cmd.arg("-model")
            .arg(format!("-verb={}", self.config.verbosity))
            .args(&self.config.extra_args)
            .arg(cnf_path)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        cmd
    }
}

impl SatBackend for ExternalSolver {
    fn run(&mut self, artifact: &CnfArtifact) -> Result<SolverRun> {
        let mut cmd = self.command(&artifact.path);
        debug!("Running solver: {:?}", cmd);

        let start = Instant::now();
        let mut child = cmd.spawn().map_err(|e| {
            Error::SolverInvocation(format!("failed to start {}: {e}", self.binary.display()))
        })?;
        let stdout = spawn_reader(child.stdout.take());
        let stderr = spawn_reader(child.stderr.take());

        let status = match self.config.timeout {
            Some(limit) => wait_with_timeout(&mut child, limit)?,
            None => child.wait()?,
        };
        let elapsed = start.elapsed();

        let stdout = join_reader(stdout)?;
        let stderr = join_reader(stderr)?;
        debug!("Solver exited with {} after {:?}", status, elapsed);
        debug!("Solver stdout:\n{}", stdout);
        if !stderr.is_empty() {
            debug!("Solver stderr:\n{}", stderr);
        }

        let (outcome, stats) = interpret(status.code(), &stdout, &stderr, artifact.num_vars)?;
        Ok(SolverRun {
            outcome,
            stats,
            raw_output: stdout,
            elapsed,
        })
    }
}

/// Turns an exit code and the solver's terminal output into an outcome plus
/// statistics lines. `exit_code` is `None` when the process was killed by a
/// signal.
pub fn interpret(
    exit_code: Option<i32>,
    stdout: &str,
    stderr: &str,
    num_vars: usize,
) -> Result<(SolverOutcome, Vec<String>)> {
    let from_code = match exit_code {
        None => {
            return Err(Error::SolverInvocation(with_stderr(
                "solver was terminated by a signal".to_string(),
                stderr,
            )));
        }
        Some(0) => None,
        Some(code) => match Verdict::from_exit_code(code) {
            Some(verdict) => Some(verdict),
            None => {
                return Err(Error::SolverInvocation(with_stderr(
                    format!("solver exited with unexpected status {code}"),
                    stderr,
                )));
            }
        },
    };

    let output = SolverOutput::parse(stdout)?;
    let verdict = match (from_code, output.verdict) {
        (Some(a), Some(b)) if a != b => {
            return Err(Error::SolverOutputParse(format!(
                "exit status says {a:?} but status line says {b:?}"
            )));
        }
        (Some(v), _) | (None, Some(v)) => v,
        (None, None) => {
            return Err(Error::SolverOutputParse(
                "solver reported no verdict".to_string(),
            ));
        }
    };

    let outcome = match verdict {
        Verdict::Unknown => {
            return Err(Error::SolverInvocation(
                "solver gave up with an UNKNOWN verdict".to_string(),
            ));
        }
        Verdict::Unsatisfiable => SolverOutcome::Unsatisfiable,
        Verdict::Satisfiable => {
            if output.model.is_empty() {
                return Err(Error::SolverOutputParse(
                    "SAT verdict without a model; was -model passed?".to_string(),
                ));
            }
            SolverOutcome::Satisfiable(Assignment::from_dimacs(&output.model, num_vars)?)
        }
    };

    Ok((outcome, output.stats))
}

fn with_stderr(msg: String, stderr: &str) -> String {
    match stderr.lines().map(str::trim).find(|l| !l.is_empty()) {
        Some(first) => format!("{msg}: {first}"),
        None => msg,
    }
}

fn resolve_binary(requested: &Path) -> Result<PathBuf> {
    let is_bare_name = requested.components().count() == 1 && requested.is_relative();

    let found = if requested.is_file() {
        if is_bare_name {
            Path::new(".").join(requested)
        } else {
            requested.to_path_buf()
        }
    } else if is_bare_name {
        which::which(requested).map_err(|e| {
            Error::SolverInvocation(format!(
                "solver {:?} not found in the working directory or on PATH: {e}",
                requested.display().to_string()
            ))
        })?
    } else {
        return Err(Error::SolverInvocation(format!(
            "solver binary {} does not exist",
            requested.display()
        )));
    };

    check_executable(&found)?;
    Ok(found)
}

#[cfg(unix)]
fn check_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mode = std::fs::metadata(path)?.permissions().mode();
    if mode & 0o111 == 0 {
        return Err(Error::SolverInvocation(format!(
            "solver binary {} is not executable",
            path.display()
        )));
    }
    Ok(())
}

#[cfg(not(unix))]
fn check_executable(_path: &Path) -> Result<()> {
    Ok(())
}

fn spawn_reader<R>(pipe: Option<R>) -> Option<JoinHandle<std::io::Result<Vec<u8>>>>
where
    R: Read + Send + 'static,
{
    pipe.map(|mut pipe| {
        thread::spawn(move || {
            let mut buf = Vec::new();
            pipe.read_to_end(&mut buf)?;
            Ok(buf)
        })
    })
}

fn join_reader(handle: Option<JoinHandle<std::io::Result<Vec<u8>>>>) -> Result<String> {
    let Some(handle) = handle else {
        return Ok(String::new());
    };
    let bytes = handle
        .join()
        .map_err(|_| Error::SolverInvocation("solver output reader panicked".to_string()))??;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

// The reader threads are left running on timeout: a grandchild may still
// hold the pipes open.
fn wait_with_timeout(child: &mut Child, limit: Duration) -> Result<ExitStatus> {
    match child.wait_timeout(limit)? {
        Some(status) => Ok(status),
        None => {
            let _ = child.kill();
            let _ = child.wait();
            Err(Error::SolverInvocation(format!(
                "solver timed out after {limit:?}"
            )))
        }
    }
}
