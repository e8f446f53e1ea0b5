//! Validation rule for measure reference counts.
//!
//! `compute` already enforces this, but definitions deserialized from JSON
//! never pass through the builder.

use crate::error::QueryError;
use crate::spec::{aggregate, MeasureSpec};

pub(crate) fn validate_arity(measure: &MeasureSpec) -> Option<QueryError> {
    if measure.function.trim().is_empty() {
        return Some(QueryError::InvalidSpecification(format!(
            "measure '{}' has no aggregate function",
            measure.alias
        )));
    }
    let expected = aggregate::arity(&measure.function);
    if measure.references.len() != expected {
        return Some(QueryError::ReferenceArityMismatch {
            alias: measure.alias.clone(),
            function: measure.function.clone(),
            expected,
            actual: measure.references.len(),
        });
    }
    None
}
