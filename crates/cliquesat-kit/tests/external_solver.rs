//! The external solver gateway, driven by small shell scripts that behave
//! like Glucose.

#![cfg(unix)]

mod common;

use cliquesat_base::Error;
use cliquesat_kit::{CliqueSearch, ExternalSolver, SolverConfig};
use common::{four_cycle, triangle_plus_isolated};
use serial_test::serial;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::TempDir;

const TRIANGLE_MODEL: &str = "v 1 -2 -3 -4 -5 6 -7 -8 -9 -10 11 -12 0";

fn fake_solver(dir: &TempDir, name: &str, body: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

fn solver_at(path: &Path) -> ExternalSolver {
    ExternalSolver::new(SolverConfig {
        solver_path: path.to_path_buf(),
        ..SolverConfig::default()
    })
    .unwrap()
}

#[test]
#[serial]
fn test_sat_with_model() {
    let dir = TempDir::new().unwrap();
    let script = fake_solver(
        &dir,
        "glucose",
        &format!(
            "echo 'c conflicts : 0'\necho 'c CPU time : 0.01 s'\necho 's SATISFIABLE'\necho '{TRIANGLE_MODEL}'\nexit 10"
        ),
    );
    let g = triangle_plus_isolated();
    let mut search = CliqueSearch::new(&g, solver_at(&script));
    let result = search.solve_fixed(3).unwrap();
    assert_eq!(result.clique.unwrap().vertices(), &[1, 2, 3]);
    assert_eq!(result.stats.len(), 2);
    assert!(result.raw_output.contains("s SATISFIABLE"));
}

#[test]
#[serial]
fn test_unsat_exit_code() {
    let dir = TempDir::new().unwrap();
    let script = fake_solver(&dir, "glucose", "echo 's UNSATISFIABLE'\nexit 20");
    let g = four_cycle();
    let result = CliqueSearch::new(&g, solver_at(&script)).solve_fixed(3).unwrap();
    assert!(!result.is_satisfiable());
}

#[test]
#[serial]
fn test_zero_exit_uses_status_line() {
    let dir = TempDir::new().unwrap();
    let script = fake_solver(&dir, "minisat", "echo 's UNSATISFIABLE'\nexit 0");
    let g = four_cycle();
    let result = CliqueSearch::new(&g, solver_at(&script)).solve_fixed(3).unwrap();
    assert!(!result.is_satisfiable());
}

#[test]
#[serial]
fn test_arguments_and_artifact() {
    let dir = TempDir::new().unwrap();
    let script = fake_solver(
        &dir,
        "glucose",
        r#"[ "$1" = "-model" ] || exit 3
[ "$2" = "-verb=1" ] || exit 4
[ "$3" = "-rnd-seed=7" ] || exit 5
[ "$(head -n 1 "$4")" = "p cnf 12 51" ] || exit 6
echo 's SATISFIABLE'
echo 'v 1 -2 -3 -4 -5 6 -7 -8 -9 -10 11 -12 0'
exit 10"#,
    );
    let solver = ExternalSolver::new(SolverConfig {
        solver_path: script,
        verbosity: 1,
        timeout: None,
        extra_args: vec!["-rnd-seed=7".to_string()],
    })
    .unwrap();
    let g = triangle_plus_isolated();
    let result = CliqueSearch::new(&g, solver).solve_fixed(3).unwrap();
    assert!(result.is_satisfiable());
}

#[test]
#[serial]
fn test_crash_is_invocation_error() {
    let dir = TempDir::new().unwrap();
    let script = fake_solver(&dir, "glucose", "echo 'PARSE ERROR! Unexpected char' >&2\nexit 1");
    let g = four_cycle();
    let err = CliqueSearch::new(&g, solver_at(&script)).solve_fixed(2).unwrap_err();
    assert!(matches!(err, Error::SolverInvocation(_)), "{err}");
    assert!(err.to_string().contains("PARSE ERROR"), "{err}");
}

#[test]
#[serial]
fn test_sat_without_model() {
    let dir = TempDir::new().unwrap();
    let script = fake_solver(&dir, "glucose", "echo 's SATISFIABLE'\nexit 10");
    let g = four_cycle();
    let err = CliqueSearch::new(&g, solver_at(&script)).solve_fixed(2).unwrap_err();
    assert!(matches!(err, Error::SolverOutputParse(_)), "{err}");
}

#[test]
#[serial]
fn test_incomplete_model() {
    let dir = TempDir::new().unwrap();
    let script = fake_solver(&dir, "glucose", "echo 's SATISFIABLE'\necho 'v 1 -2 0'\nexit 10");
    let g = four_cycle();
    let err = CliqueSearch::new(&g, solver_at(&script)).solve_fixed(2).unwrap_err();
    assert!(matches!(err, Error::SolverOutputParse(_)), "{err}");
}

#[test]
#[serial]
fn test_lying_model_is_caught() {
    let dir = TempDir::new().unwrap();
    // puts vertices 1, 2 and 4 in the clique
    let script = fake_solver(
        &dir,
        "glucose",
        "echo 's SATISFIABLE'\necho 'v 1 -2 -3 -4 -5 6 -7 -8 -9 -10 -11 12 0'\nexit 10",
    );
    let g = triangle_plus_isolated();
    let err = CliqueSearch::new(&g, solver_at(&script)).solve_fixed(3).unwrap_err();
    assert!(matches!(err, Error::DecodeInconsistency { k: 3, .. }), "{err}");
}

#[test]
#[serial]
fn test_timeout_kills_solver() {
    let dir = TempDir::new().unwrap();
    let script = fake_solver(&dir, "glucose", "exec sleep 5");
    let solver = ExternalSolver::new(SolverConfig {
        solver_path: script,
        timeout: Some(Duration::from_millis(200)),
        ..SolverConfig::default()
    })
    .unwrap();
    let g = four_cycle();
    let started = std::time::Instant::now();
    let err = CliqueSearch::new(&g, solver).solve_fixed(2).unwrap_err();
    assert!(err.to_string().contains("timed out"), "{err}");
    assert!(started.elapsed() < Duration::from_secs(4));
}

#[test]
#[serial]
fn test_unresolvable_binaries() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing-solver");
    let err = ExternalSolver::new(SolverConfig {
        solver_path: missing,
        ..SolverConfig::default()
    })
    .unwrap_err();
    assert!(matches!(err, Error::SolverInvocation(_)));

    let plain = dir.path().join("not-executable");
    fs::write(&plain, "#!/bin/sh\nexit 10\n").unwrap();
    fs::set_permissions(&plain, fs::Permissions::from_mode(0o644)).unwrap();
    let err = ExternalSolver::new(SolverConfig {
        solver_path: plain,
        ..SolverConfig::default()
    })
    .unwrap_err();
    assert!(err.to_string().contains("not executable"), "{err}");
}

#[test]
#[serial]
fn test_max_search_with_scripted_verdicts() {
    let dir = TempDir::new().unwrap();
    // SAT with {1} for k = 1, UNSAT afterwards
    let script = fake_solver(
        &dir,
        "glucose",
        r#"if [ "$(head -n 1 "$3")" = "p cnf 4 7" ]; then
  echo 's SATISFIABLE'
  echo 'v 1 -2 -3 -4 0'
  exit 10
fi
echo 's UNSATISFIABLE'
exit 20"#,
    );
    let g = cliquesat_base::Graph::new(4, []).unwrap();
    let report = CliqueSearch::new(&g, solver_at(&script)).solve_max().unwrap();
    assert_eq!(report.outcome.omega(), 1);
    assert_eq!(report.outcome.clique().unwrap().vertices(), &[1]);
    assert_eq!(report.steps.len(), 2);
}

#[test]
#[serial]
fn test_search_failure_names_k() {
    let dir = TempDir::new().unwrap();
    // SAT with {1} for k = 1, crashes for k = 2
    let script = fake_solver(
        &dir,
        "glucose",
        r#"if [ "$(head -n 1 "$3")" = "p cnf 3 4" ]; then
  echo 's SATISFIABLE'
  echo 'v 1 -2 -3 0'
  exit 10
fi
echo 'boom' >&2
exit 1"#,
    );
    let g = cliquesat_base::Graph::complete(3).unwrap();
    let mut steps = Vec::new();
    let err = CliqueSearch::new(&g, solver_at(&script))
        .solve_max_with(|step| steps.push(step.k))
        .unwrap_err();
    assert!(matches!(err, Error::SolverInvocation(_)), "{err}");
    assert!(err.to_string().contains("k = 2"), "{err}");
    assert!(err.to_string().contains("boom"), "{err}");
    assert_eq!(steps, vec![1]);
}
