//! Graph-specific error types.
//!
//! Two distinct families: [`BuildError`] means construction was rejected and
//! no graph exists; [`QueryError`] means one query failed while the graph
//! remains usable. Internal-invariant violations are reported through
//! [`QueryError::Invariant`] so callers never mistake a bug for bad input.

use crate::labels::Label;
use thiserror::Error;
use wf_core::Real;

pub type BuildResult<T> = Result<T, BuildError>;
pub type QueryResult<T> = Result<T, QueryError>;

/// Errors rejecting a distance matrix or label sequence at construction.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BuildError {
    #[error("distance matrix of order {order} exceeds the addressable index space")]
    TooLarge { order: usize },

    #[error(
        "row {row} has {len} entries, inconsistent with a square or triangular matrix of order {order}"
    )]
    BadShape { order: usize, row: usize, len: usize },

    #[error("invalid weight {value} at row {row}, column {col}: weights must be finite and non-negative")]
    InvalidElement { row: usize, col: usize, value: Real },

    #[error("expected {expected} vertex labels, got {found}")]
    LabelCountMismatch { expected: usize, found: usize },

    #[error("vertex label {label} appears more than once")]
    DuplicateLabel { label: Label },
}

/// Errors failing a single query against an otherwise usable graph.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QueryError {
    #[error("unknown vertex label {label}")]
    UnknownLabel { label: Label },

    #[error("vertex {vertex} out of range for a graph of order {order}")]
    VertexOutOfRange { vertex: usize, order: usize },

    #[error("no route from {from} to {to}")]
    Unreachable { from: Label, to: Label },

    #[error("internal invariant violated: {what}")]
    Invariant { what: &'static str },
}
