//! Unified error types for cliquesat.

use thiserror::Error;

/// The main error type for cliquesat operations.
///
/// Every stage of the encode → serialize → solve → decode pipeline returns
/// this type, so callers can tell a fatal configuration problem apart from a
/// plain UNSAT verdict (which is a value, not an error).
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed graph input, out-of-range k, vertex, position or variable.
    #[error("Validation error: {0}")]
    Validation(String),

    /// I/O error while reading or writing an artifact.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The external solver could not be run to completion.
    #[error("Solver invocation failed: {0}")]
    SolverInvocation(String),

    /// The solver finished but its output could not be understood.
    #[error("Solver output parse error: {0}")]
    SolverOutputParse(String),

    /// A decoded model does not describe a clique of the requested size.
    #[error("Decoded model is inconsistent for k = {k}: {reason}")]
    DecodeInconsistency {
        /// Clique size of the offending instance.
        k: usize,
        /// What the post-check found.
        reason: String,
    },
}

impl Error {
    /// Shorthand for building a [`Error::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Returns `true` for errors raised before any solver interaction.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Prefixes I/O and solver errors with the clique size they were
    /// raised for. Other variants already name it or need no `k`.
    #[must_use]
    pub fn for_k(self, k: usize) -> Self {
        match self {
            Self::Io(e) => Self::Io(std::io::Error::new(e.kind(), format!("k = {k}: {e}"))),
            Self::SolverInvocation(msg) => Self::SolverInvocation(format!("k = {k}: {msg}")),
            Self::SolverOutputParse(msg) => Self::SolverOutputParse(format!("k = {k}: {msg}")),
            other => other,
        }
    }
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, Error>;
