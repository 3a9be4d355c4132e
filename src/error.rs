//! Error types and handling for sequence pipelines
//!
//! Every failure is surfaced to the caller of the operation that triggered
//! it. Pipelines never retry and carry no recovery logic.

use thiserror::Error;

/// Main error type for pipeline operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PipelineError {
    /// A required function was never supplied to a collector builder
    #[error("missing required function `{0}`")]
    MissingFunction(&'static str),
    /// A terminal operation was invoked on an already-consumed pipeline
    #[error("pipeline was already consumed by a terminal operation")]
    Reused,
    /// `sorted` was invoked on a source known to be unbounded
    #[error("cannot sort an unbounded sequence")]
    UnboundedSort,
    /// Two elements produced the same key in a mapping collector
    #[error("duplicate key `{key}` in mapping collector")]
    DuplicateKey { key: String },
    /// I/O failure in a resource-backed source
    #[error("IO error: {0}")]
    Io(String),
}

impl From<std::io::Error> for PipelineError {
    fn from(err: std::io::Error) -> Self {
        PipelineError::Io(err.to_string())
    }
}

/// Result type for pipeline operations
pub type PipelineResult<T> = Result<T, PipelineError>;
