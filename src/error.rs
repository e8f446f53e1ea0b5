//! Error types for pivot queries.
//!
//! Specification-time errors are raised before any call into the backing
//! index. Backend errors are carried through unchanged, tagged with the
//! measure alias that triggered them.
use crate::spec::Role;
use thiserror::Error;

/// Failures reported by a `TupleEnumerator` or `AggregateEvaluator`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BackendError {
    #[error("Unsupported aggregate function '{function}'")]
    UnsupportedAggregate { function: String },
    #[error("Aggregate '{function}' expects {expected} reference(s), got {actual}")]
    ReferenceArityMismatch { function: String, expected: usize, actual: usize },
    #[error("Aggregate '{function}' requires a numeric reference, '{reference}' is not numeric")]
    NonNumericReference { function: String, reference: String },
    #[error("Backend unavailable: {0}")]
    Unavailable(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum QueryError {
    #[error("Invalid specification: {0}")]
    InvalidSpecification(String),
    #[error("Query requires at least one {role} dimension")]
    MissingDimensionRole { role: Role },
    #[error("Measure '{alias}': aggregate '{function}' expects {expected} reference(s), got {actual}")]
    ReferenceArityMismatch { alias: String, function: String, expected: usize, actual: usize },
    #[error("Duplicate alias '{0}' in keyed output")]
    DuplicateAlias(String),
    #[error("Invalid option '{option}': {reason}")]
    InvalidOption { option: String, reason: String },
    #[error("Measure '{alias}' failed: {source}")]
    Aggregate { alias: String, #[source] source: BackendError },
    #[error("Tuple enumeration failed: {source}")]
    Enumeration { #[source] source: BackendError },
}

impl QueryError {
    /// The backend error underneath, if this failure came from a collaborator.
    pub fn backend_error(&self) -> Option<&BackendError> {
        match self {
            QueryError::Aggregate { source, .. } | QueryError::Enumeration { source } => Some(source),
            _ => None,
        }
    }
}
