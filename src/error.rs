use std::time::Duration;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors from reading input or running the solver. An unsatisfiable formula is
/// an answer, not an error.
#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed formula text, at a byte offset into the input.
    #[error("parse error at offset {offset}: {message}")]
    Parse { offset: usize, message: String },

    #[error("DIMACS error: {0}")]
    Dimacs(String),

    /// A clause that is neither a literal nor a disjunction of literals.
    #[error("clause {index} is not a disjunction of literals: {clause}")]
    MalformedClause { index: usize, clause: String },

    #[error("search gave up after {0:?}")]
    Timeout(Duration),
}
