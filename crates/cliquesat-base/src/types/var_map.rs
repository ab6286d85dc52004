//! Bijection between (vertex, position) pairs and SAT variables.

use crate::error::{Error, Result};

use super::{Position, VarId, Vertex};

/// Maps `At(v, p)`, "vertex `v` sits at clique position `p`", to a DIMACS
/// variable and back, for a fixed vertex count `n` and clique size `k`.
///
/// Variables are laid out row by row over a `k x n` table:
/// `id(v, p) = p * n + v`, so ids cover exactly `1..=n * k`.
///
/// Both the CNF encoder and the model decoder go through this one type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VarMap {
    num_vertices: usize,
    k: usize,
}

impl VarMap {
    /// Creates the map for `n` vertices and clique size `k`; both must be at least 1.
    pub fn new(num_vertices: usize, k: usize) -> Result<Self> {
        if num_vertices < 1 {
            return Err(Error::validation("variable map needs at least one vertex"));
        }
        if k < 1 {
            return Err(Error::validation("variable map needs at least one position"));
        }
        if num_vertices.checked_mul(k).is_none() {
            return Err(Error::validation(format!(
                "{num_vertices} vertices x {k} positions overflows the variable space"
            )));
        }
        Ok(Self { num_vertices, k })
    }

    /// Vertex count `n`.
    #[must_use]
    pub const fn num_vertices(&self) -> usize {
        self.num_vertices
    }

    /// Number of positions `k`.
    #[must_use]
    pub const fn k(&self) -> usize {
        self.k
    }

    /// Total number of variables, `n * k`.
    #[must_use]
    pub const fn num_vars(&self) -> usize {
        self.num_vertices * self.k
    }

    /// Variable id of `At(v, p)`. Requires `1 <= v <= n` and `p < k`.
    pub fn encode(&self, v: Vertex, p: Position) -> Result<VarId> {
        if !(1..=self.num_vertices).contains(&v) {
            return Err(Error::validation(format!(
                "vertex {v} is out of range [1, {}]",
                self.num_vertices
            )));
        }
        if p >= self.k {
            return Err(Error::validation(format!(
                "position {p} is out of range [0, {})",
                self.k
            )));
        }
        Ok((p * self.num_vertices + v) as VarId)
    }

    /// Inverse of [`VarMap::encode`]. Requires `1 <= id <= n * k`.
    pub fn decode(&self, id: VarId) -> Result<(Vertex, Position)> {
        if id < 1 || id > self.num_vars() as VarId {
            return Err(Error::validation(format!(
                "variable {id} is out of range [1, {}]",
                self.num_vars()
            )));
        }
        let offset = (id - 1) as usize;
        Ok((offset % self.num_vertices + 1, offset / self.num_vertices))
    }
}
