//! Literals, clauses and CNF formulas.

use std::fmt;

use crate::error::{Error, Result};

use super::VarId;

/// A literal is a variable with optional negation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Literal {
    var: VarId,
    negated: bool,
}

impl Literal {
    /// The asserted literal of `var`.
    #[must_use]
    pub const fn pos(var: VarId) -> Self {
        Self { var, negated: false }
    }

    /// The negated literal of `var`.
    #[must_use]
    pub const fn neg(var: VarId) -> Self {
        Self { var, negated: true }
    }

    /// The underlying variable.
    #[must_use]
    pub const fn var(&self) -> VarId {
        self.var
    }

    /// Whether this literal is negated.
    #[must_use]
    pub const fn is_negated(&self) -> bool {
        self.negated
    }

    /// Negates this literal.
    #[must_use]
    pub const fn negate(&self) -> Self {
        Self {
            var: self.var,
            negated: !self.negated,
        }
    }

    /// Converts to DIMACS format (`v` or `-v`).
    #[must_use]
    pub fn to_dimacs(&self) -> i64 {
        let base = self.var as i64;
        if self.negated { -base } else { base }
    }

    /// Parses a non-zero DIMACS integer.
    #[must_use]
    pub fn from_dimacs(lit: i64) -> Option<Self> {
        match lit {
            0 => None,
            l if l > 0 => Some(Self::pos(l as VarId)),
            l => Some(Self::neg(l.unsigned_abs())),
        }
    }

    /// Truth value of this literal under `value_of(var)`.
    pub fn eval(&self, value_of: impl Fn(VarId) -> bool) -> bool {
        value_of(self.var) != self.negated
    }
}

impl std::ops::Not for Literal {
    type Output = Literal;

    fn not(self) -> Self::Output {
        self.negate()
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_dimacs())
    }
}

/// A non-empty disjunction of literals. Literal order is kept as given.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Clause {
    literals: Vec<Literal>,
}

impl Clause {
    /// Creates a clause; fails on an empty literal list.
    pub fn new(literals: Vec<Literal>) -> Result<Self> {
        if literals.is_empty() {
            return Err(Error::validation("a clause needs at least one literal"));
        }
        Ok(Self { literals })
    }

    /// The clause `a OR b`.
    #[must_use]
    pub fn binary(a: Literal, b: Literal) -> Self {
        Self {
            literals: vec![a, b],
        }
    }

    /// Literals in insertion order.
    #[must_use]
    pub fn literals(&self) -> &[Literal] {
        &self.literals
    }

    /// Number of literals.
    #[must_use]
    pub fn len(&self) -> usize {
        self.literals.len()
    }

    /// Whether the clause has no literals.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    /// Whether at least one literal is true under `value_of`.
    pub fn is_satisfied_by(&self, value_of: impl Fn(VarId) -> bool) -> bool {
        self.literals.iter().any(|l| l.eval(&value_of))
    }
}

/// A CNF formula over the variables `1..=num_vars`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CnfFormula {
    num_vars: usize,
    clauses: Vec<Clause>,
}

impl CnfFormula {
    /// An empty formula declaring `num_vars` variables.
    #[must_use]
    pub fn new(num_vars: usize) -> Self {
        Self {
            num_vars,
            clauses: Vec::new(),
        }
    }

    /// Appends a clause, checking that every literal is within `1..=num_vars`.
    pub fn add_clause(&mut self, clause: Clause) -> Result<()> {
        if let Some(bad) = clause
            .literals()
            .iter()
            .find(|l| l.var() < 1 || l.var() > self.num_vars as VarId)
        {
            return Err(Error::validation(format!(
                "literal {bad} is outside the declared {} variables",
                self.num_vars
            )));
        }
        self.clauses.push(clause);
        Ok(())
    }

    /// Declared variable count.
    #[must_use]
    pub fn num_vars(&self) -> usize {
        self.num_vars
    }

    /// Number of clauses.
    #[must_use]
    pub fn num_clauses(&self) -> usize {
        self.clauses.len()
    }

    /// Clauses in insertion order.
    #[must_use]
    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// Index of the first clause falsified under `value_of`, if any.
    pub fn first_violated(&self, value_of: impl Fn(VarId) -> bool) -> Option<usize> {
        self.clauses
            .iter()
            .position(|c| !c.is_satisfied_by(&value_of))
    }

    /// Whether every clause is satisfied under `value_of`.
    pub fn is_satisfied_by(&self, value_of: impl Fn(VarId) -> bool) -> bool {
        self.first_violated(value_of).is_none()
    }
}
