//! Constructors for dimension and measure specifications.
use super::aggregate;
use super::reference::ReferenceSpec;
use super::types::{DimensionSpec, MeasureSpec, Role};
use crate::error::QueryError;

fn check_alias(alias: &str) -> Result<(), QueryError> {
    if alias.trim().is_empty() {
        return Err(QueryError::InvalidSpecification("alias must not be empty".into()));
    }
    Ok(())
}

fn dimension(alias: &str, reference: ReferenceSpec, role: Role) -> Result<DimensionSpec, QueryError> {
    check_alias(alias)?;
    Ok(DimensionSpec { alias: alias.to_string(), reference, role })
}

/// A dimension that partitions the output rows.
pub fn row(alias: &str, reference: ReferenceSpec) -> Result<DimensionSpec, QueryError> {
    dimension(alias, reference, Role::Row)
}

/// A dimension whose values are nested under each row.
pub fn column(alias: &str, reference: ReferenceSpec) -> Result<DimensionSpec, QueryError> {
    dimension(alias, reference, Role::Column)
}

/// An aggregate measure. An omitted alias defaults to the function name.
///
/// The reference count is checked against the function's arity here, so
/// arity mistakes surface before any backend call. Whether the function is
/// actually supported is left to the evaluator.
pub fn compute(
    alias: Option<&str>,
    function: &str,
    references: Vec<ReferenceSpec>,
    options: Vec<String>,
) -> Result<MeasureSpec, QueryError> {
    if function.trim().is_empty() {
        return Err(QueryError::InvalidSpecification("aggregate function must not be empty".into()));
    }
    let (alias, alias_defaulted) = match alias {
        Some(a) => {
            check_alias(a)?;
            (a.to_string(), false)
        }
        None => (function.to_string(), true),
    };

    let expected = aggregate::arity(function);
    if references.len() != expected {
        return Err(QueryError::ReferenceArityMismatch {
            alias,
            function: function.to_string(),
            expected,
            actual: references.len(),
        });
    }

    Ok(MeasureSpec {
        alias,
        function: function.to_string(),
        references,
        options,
        alias_defaulted,
    })
}
