//! # cliquesat-base
//!
//! Core types and utilities for cliquesat.
//!
//! This crate provides the foundational building blocks used across all other
//! cliquesat crates, including:
//!
//! - **Graph Model**: simple undirected graphs with symmetric adjacency
//! - **Variable Encoder**: the `At(v, p)` variable layout
//! - **CNF Types**: literals, clauses and formulas
//! - **Error Types**: unified error handling across the pipeline

pub mod error;
pub mod types;
pub mod utils;

pub use error::{Error, Result};
pub use types::{Clause, CnfFormula, Graph, Literal, Position, VarId, VarMap, Vertex};
