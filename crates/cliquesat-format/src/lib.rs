//! # cliquesat-format
//!
//! File format parsing and serialization for cliquesat.
//!
//! Supports:
//! - **DIMACS edge**: input graphs (`p edge n m` / `e u v`)
//! - **DIMACS CNF**: SAT instances handed to the solver
//! - **Solver output**: SAT-competition verdict, model and statistics lines

pub mod dimacs;
pub mod edge;
pub mod solver_output;

pub use dimacs::{cnf_from_str, read_cnf, to_dimacs, write_cnf};
pub use edge::DimacsGraph;
pub use solver_output::{SolverOutput, Verdict};
