//! Validation rule for the dimension roles an output shape needs.

use crate::error::QueryError;
use crate::spec::{PartitionedDefs, Role};

/// Cross-product and cube output need at least one row and one column dimension.
pub(crate) fn validate_roles(defs: &PartitionedDefs, required: &[Role]) -> Option<QueryError> {
    required
        .iter()
        .find(|role| !defs.has_role(**role))
        .map(|role| QueryError::MissingDimensionRole { role: *role })
}

/// Group-by is role-agnostic but still needs something to group on.
pub(crate) fn validate_has_dimensions(defs: &PartitionedDefs) -> Option<QueryError> {
    if defs.dimensions.is_empty() {
        Some(QueryError::InvalidSpecification("at least one dimension is required".into()))
    } else {
        None
    }
}
