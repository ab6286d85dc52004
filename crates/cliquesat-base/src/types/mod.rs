//! Value types shared by every cliquesat stage.
//!
//! - [`Graph`]: the immutable input graph
//! - [`VarMap`]: `(vertex, position) <-> variable` bijection
//! - [`Literal`], [`Clause`], [`CnfFormula`]: the SAT instance

mod cnf;
mod graph;
mod var_map;

pub use cnf::{Clause, CnfFormula, Literal};
pub use graph::Graph;
pub use var_map::VarMap;

/// A graph vertex, numbered from 1.
pub type Vertex = usize;

/// A clique slot, numbered from 0.
pub type Position = usize;

/// A DIMACS variable id, numbered from 1.
pub type VarId = u64;
