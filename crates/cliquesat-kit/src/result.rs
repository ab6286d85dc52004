//! Solver results, assignments and cliques.

use cliquesat_base::{Error, Result, VarId, Vertex};
use std::fmt;
use std::time::Duration;

/// A total truth assignment over the variables `1..=num_vars`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    /// `values[var - 1]` is the value of `var`.
    values: Vec<bool>,
}

impl Assignment {
    /// Creates an assignment from per-variable values, variable 1 first.
    #[must_use]
    pub fn from_values(values: Vec<bool>) -> Self {
        Self { values }
    }

    /// Builds an assignment from a DIMACS-style literal list.
    ///
    /// The list must mention every variable in `1..=num_vars` exactly once.
    pub fn from_dimacs(literals: &[i64], num_vars: usize) -> Result<Self> {
        let mut values: Vec<Option<bool>> = vec![None; num_vars];

        for &lit in literals {
            let var = lit.unsigned_abs();
            if lit == 0 || var > num_vars as u64 {
                return Err(Error::SolverOutputParse(format!(
                    "model literal {lit} is outside [1, {num_vars}]"
                )));
            }
            let slot = &mut values[(var - 1) as usize];
            if slot.is_some() {
                return Err(Error::SolverOutputParse(format!(
                    "model assigns variable {var} more than once"
                )));
            }
            *slot = Some(lit > 0);
        }

        let assigned = values.iter().flatten().count();
        if assigned != num_vars {
            return Err(Error::SolverOutputParse(format!(
                "model covers {assigned} of {num_vars} variables"
            )));
        }

        Ok(Self {
            values: values.into_iter().flatten().collect(),
        })
    }

    /// Gets the value of a variable.
    #[must_use]
    pub fn value(&self, var: VarId) -> Option<bool> {
        var.checked_sub(1)
            .and_then(|i| self.values.get(i as usize))
            .copied()
    }

    /// Variables assigned true, in increasing order.
    pub fn true_vars(&self) -> impl Iterator<Item = VarId> + '_ {
        self.values
            .iter()
            .enumerate()
            .filter(|(_, v)| **v)
            .map(|(i, _)| i as VarId + 1)
    }

    /// Returns the number of assigned variables.
    #[must_use]
    pub fn num_vars(&self) -> usize {
        self.values.len()
    }

    /// Signed-literal form, variable 1 first.
    #[must_use]
    pub fn to_dimacs(&self) -> Vec<i64> {
        self.values
            .iter()
            .enumerate()
            .map(|(i, &v)| if v { i as i64 + 1 } else { -(i as i64 + 1) })
            .collect()
    }
}

/// A set of pairwise adjacent vertices, kept sorted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Clique(Vec<Vertex>);

impl Clique {
    /// Wraps a vertex list; the caller has checked the clique property.
    #[must_use]
    pub fn new(mut vertices: Vec<Vertex>) -> Self {
        vertices.sort_unstable();
        Self(vertices)
    }

    /// Members in increasing order.
    #[must_use]
    pub fn vertices(&self) -> &[Vertex] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn contains(&self, v: Vertex) -> bool {
        self.0.binary_search(&v).is_ok()
    }
}

impl fmt::Display for Clique {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, v) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{v}")?;
        }
        write!(f, "]")
    }
}

/// Outcome of one encode → solve → decode cycle for a fixed `k`.
#[derive(Debug, Clone)]
pub struct DecisionResult {
    /// Requested clique size.
    pub k: usize,
    /// The decoded clique; present iff the instance was satisfiable.
    pub clique: Option<Clique>,
    /// Statistics lines reported by the solver.
    pub stats: Vec<String>,
    /// Raw solver terminal output.
    pub raw_output: String,
    /// Wall time spent in the solver.
    pub elapsed: Duration,
}

impl DecisionResult {
    #[must_use]
    pub fn is_satisfiable(&self) -> bool {
        self.clique.is_some()
    }
}

/// The maximum clique found by the incremental search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaxCliqueResult {
    /// The clique number ω(G).
    pub omega: usize,
    /// A clique of size `omega`.
    pub example_clique: Clique,
}

/// Terminal state of the incremental search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Search stopped at the first UNSAT (or at k = n) with a best clique.
    Exhausted(MaxCliqueResult),
    /// Not even k = 1 was satisfiable.
    NoClique,
}

impl SearchOutcome {
    /// ω(G), or 0 for [`SearchOutcome::NoClique`].
    #[must_use]
    pub fn omega(&self) -> usize {
        match self {
            Self::Exhausted(best) => best.omega,
            Self::NoClique => 0,
        }
    }

    /// The example clique, if any.
    #[must_use]
    pub fn clique(&self) -> Option<&Clique> {
        match self {
            Self::Exhausted(best) => Some(&best.example_clique),
            Self::NoClique => None,
        }
    }
}

/// A finished incremental search and the per-k steps that led to it.
#[derive(Debug, Clone)]
pub struct SearchReport {
    pub outcome: SearchOutcome,
    pub steps: Vec<DecisionResult>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_dimacs_complete() {
        let a = Assignment::from_dimacs(&[-3, 1, 2], 3).unwrap();
        assert_eq!(a.value(1), Some(true));
        assert_eq!(a.value(3), Some(false));
        assert_eq!(a.value(0), None);
        assert_eq!(a.value(4), None);
        assert_eq!(a.true_vars().collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(a.to_dimacs(), vec![1, 2, -3]);
    }

    #[test]
    fn test_from_dimacs_rejects_bad_models() {
        // missing variable
        assert!(matches!(
            Assignment::from_dimacs(&[1, 2], 3),
            Err(Error::SolverOutputParse(_))
        ));
        // duplicate
        assert!(Assignment::from_dimacs(&[1, -1, 2], 2).is_err());
        // out of range
        assert!(Assignment::from_dimacs(&[1, 2, 3], 2).is_err());
        assert!(Assignment::from_dimacs(&[0, 1], 1).is_err());
    }

    #[test]
    fn test_clique_is_sorted_and_displays() {
        let c = Clique::new(vec![3, 1, 2]);
        assert_eq!(c.vertices(), &[1, 2, 3]);
        assert!(c.contains(2));
        assert!(!c.contains(4));
        assert_eq!(c.to_string(), "[1, 2, 3]");
        assert_eq!(Clique::default().to_string(), "[]");
    }

    #[test]
    fn test_search_outcome_accessors() {
        let found = SearchOutcome::Exhausted(MaxCliqueResult {
            omega: 2,
            example_clique: Clique::new(vec![4, 5]),
        });
        assert_eq!(found.omega(), 2);
        assert_eq!(found.clique().map(Clique::len), Some(2));
        assert_eq!(SearchOutcome::NoClique.omega(), 0);
        assert!(SearchOutcome::NoClique.clique().is_none());
    }
}
