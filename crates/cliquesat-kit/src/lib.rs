//! # cliquesat-kit
//!
//! The clique-finding pipeline for cliquesat.
//!
//! This crate provides:
//! - The k-clique to CNF reduction
//! - A gateway to external SAT solvers behind the [`SatBackend`] trait
//! - Model decoding with an independent clique check
//! - Fixed-k decisions and the incremental maximum-clique search
//!
//! # Example
//!
//! ```ignore
//! use cliquesat_kit::*;
//!
//! let graph = Graph::new(4, [(1, 2), (2, 3), (1, 3)])?;
//! let solver = ExternalSolver::new(SolverConfig::default())?;
//! let mut search = CliqueSearch::new(&graph, solver);
//!
//! match search.solve_max()?.outcome {
//!     SearchOutcome::Exhausted(best) => println!("omega = {}", best.omega),
//!     SearchOutcome::NoClique => println!("no clique"),
//! }
//! ```

pub mod decoder;
pub mod encoder;
pub mod result;
pub mod search;
pub mod solver;

// Re-export core types
pub use cliquesat_base::{Error, Graph, Result, Vertex};

pub use decoder::decode_clique;
pub use encoder::{encode_k_clique, validate_k, ClauseCounts};
pub use result::{Assignment, Clique, DecisionResult, MaxCliqueResult, SearchOutcome, SearchReport};
pub use search::{per_k_path, CliqueSearch, SearchState};
pub use solver::{CnfArtifact, ExternalSolver, SatBackend, SolverConfig, SolverOutcome, SolverRun};
