//! Reduction of "G has a clique of exactly k vertices" to CNF.
//!
//! Variables are `At(v, p)` from [`VarMap`]. Four clause groups are emitted,
//! always in this order:
//!
//! 1. **position coverage**: every position holds some vertex
//! 2. **position uniqueness**: no position holds two vertices
//! 3. **vertex uniqueness**: no vertex holds two positions
//! 4. **non-edge exclusion**: two non-adjacent vertices never both appear
//!
//! Groups 1–3 select exactly `k` distinct vertices; group 4 forces them to be
//! pairwise adjacent.

use cliquesat_base::utils::{choose2, pairs};
use cliquesat_base::{Clause, CnfFormula, Error, Graph, Literal, Position, Result, VarMap, Vertex};

/// Number of clauses in each group for a given instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClauseCounts {
    pub position_coverage: usize,
    pub position_uniqueness: usize,
    pub vertex_uniqueness: usize,
    pub non_edge_exclusion: usize,
}

impl ClauseCounts {
    /// Closed-form clause counts for `graph` and `k`.
    #[must_use]
    pub fn expected(graph: &Graph, k: usize) -> Self {
        let n = graph.num_vertices();
        Self {
            position_coverage: k,
            position_uniqueness: k * choose2(n),
            vertex_uniqueness: n * choose2(k),
            non_edge_exclusion: 2 * graph.num_non_edges() * choose2(k),
        }
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.position_coverage
            + self.position_uniqueness
            + self.vertex_uniqueness
            + self.non_edge_exclusion
    }
}

/// Rejects clique sizes outside `[1, n]` before any encoding work.
pub fn validate_k(graph: &Graph, k: usize) -> Result<()> {
    let n = graph.num_vertices();
    if !(1..=n).contains(&k) {
        return Err(Error::validation(format!(
            "clique size k = {k} is out of range [1, {n}]"
        )));
    }
    Ok(())
}

/// Encodes "`graph` has a clique of exactly `k` vertices".
///
/// The result declares `n * k` variables and contains exactly
/// [`ClauseCounts::expected`]`(graph, k).total()` clauses.
pub fn encode_k_clique(graph: &Graph, k: usize) -> Result<CnfFormula> {
    validate_k(graph, k)?;
    let map = VarMap::new(graph.num_vertices(), k)?;
    let at = |v: Vertex, p: Position| map.encode(v, p);

    let vertices: Vec<Vertex> = graph.vertices().collect();
    let positions: Vec<Position> = (0..k).collect();
    let mut cnf = CnfFormula::new(map.num_vars());

    for &p in &positions {
        let lits = vertices
            .iter()
            .map(|&v| at(v, p).map(Literal::pos))
            .collect::<Result<Vec<_>>>()?;
        cnf.add_clause(Clause::new(lits)?)?;
    }

    for &p in &positions {
        for (u, v) in pairs(&vertices) {
            cnf.add_clause(Clause::binary(Literal::neg(at(u, p)?), Literal::neg(at(v, p)?)))?;
        }
    }

    for &v in &vertices {
        for (p1, p2) in pairs(&positions) {
            cnf.add_clause(Clause::binary(Literal::neg(at(v, p1)?), Literal::neg(at(v, p2)?)))?;
        }
    }

    for (u, v) in graph.non_edges() {
        for (p1, p2) in pairs(&positions) {
            cnf.add_clause(Clause::binary(Literal::neg(at(u, p1)?), Literal::neg(at(v, p2)?)))?;
            cnf.add_clause(Clause::binary(Literal::neg(at(v, p1)?), Literal::neg(at(u, p2)?)))?;
        }
    }

    let counts = ClauseCounts::expected(graph, k);
    debug_assert_eq!(cnf.num_clauses(), counts.total());
    tracing::debug!(
        "Encoded k = {}: {} vars, {} clauses (coverage {}, position {}, vertex {}, non-edge {})",
        k,
        cnf.num_vars(),
        cnf.num_clauses(),
        counts.position_coverage,
        counts.position_uniqueness,
        counts.vertex_uniqueness,
        counts.non_edge_exclusion
    );

    Ok(cnf)
}

/// The assignment that places `members[i]` at position `i`.
///
/// For a clique of size `k` this satisfies [`encode_k_clique`]`(graph, k)`.
pub fn placement_assignment(graph: &Graph, members: &[Vertex]) -> Result<Vec<bool>> {
    let map = VarMap::new(graph.num_vertices(), members.len())?;
    let mut values = vec![false; map.num_vars()];
    for (p, &v) in members.iter().enumerate() {
        values[(map.encode(v, p)? - 1) as usize] = true;
    }
    Ok(values)
}
