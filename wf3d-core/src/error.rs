//! Error types for the geometry pipeline.

use thiserror::Error;

use crate::matrix::MatrixKind;

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the matrix engine, generators, stack and interpreter.
#[derive(Error, Debug)]
pub enum Error {
    /// Left operand of a multiply is not 4 columns wide.
    #[error("dimension mismatch: left operand has {left} columns but right operand has {right} rows")]
    DimensionMismatch { left: usize, right: usize },

    /// A matrix carrying the wrong semantic tag was handed to an operation.
    #[error("expected {expected} matrix, found {found} matrix")]
    KindMismatch {
        expected: MatrixKind,
        found: MatrixKind,
    },

    /// Active width does not fit the matrix's tag.
    #[error("{kind} matrix has {width} columns, expected a multiple of {stride}")]
    RaggedMatrix {
        kind: MatrixKind,
        width: usize,
        stride: usize,
    },

    /// Angular step outside 1..=360 degrees.
    #[error("angular step must be between 1 and 360 degrees, got {0}")]
    InvalidStep(u32),

    /// Push beyond the bounded depth of the transform stack.
    #[error("transform stack overflow (max depth {0})")]
    StackOverflow(usize),

    /// Pop of the base coordinate frame.
    #[error("cannot pop the base coordinate frame")]
    StackUnderflow,

    /// Scene script could not be parsed.
    #[error("script error on line {line}: {message}")]
    Script { line: usize, message: String },

    /// Display or save collaborator failed.
    #[error("frame output failed: {0}")]
    Sink(#[source] Box<dyn std::error::Error + Send + Sync>),
}
