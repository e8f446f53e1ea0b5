//! The central validator that runs every specification rule before a query executes.
use super::rules::{aliases, arity, roles};
use crate::error::QueryError;
use crate::spec::{PartitionedDefs, Role, TypeDef};

/// The output topology a definition is validated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    GroupBy,
    CrossProduct,
    Cube,
}

/// Runs all specification rules against an authored definition.
///
/// Like a linter, it collects every problem instead of stopping at the first,
/// so nothing reaches the backing index until the definition is clean.
pub struct Validator<'a> {
    type_defs: &'a [TypeDef],
}

impl<'a> Validator<'a> {
    pub fn new(type_defs: &'a [TypeDef]) -> Self {
        Self { type_defs }
    }

    /// # Returns
    /// - `Ok(PartitionedDefs)` with dimensions and measures split in declaration order.
    /// - `Err(Vec<QueryError>)` containing every problem found.
    pub fn validate(&self, shape: Shape) -> Result<PartitionedDefs, Vec<QueryError>> {
        let mut errors = aliases::validate_aliases(self.type_defs);
        let defs = PartitionedDefs::new(self.type_defs);

        for measure in &defs.measures {
            if let Some(err) = arity::validate_arity(measure) {
                errors.push(err);
            }
        }

        let shape_error = match shape {
            Shape::GroupBy => roles::validate_has_dimensions(&defs),
            Shape::CrossProduct | Shape::Cube => roles::validate_roles(&defs, &[Role::Row, Role::Column]),
        };
        errors.extend(shape_error);

        if errors.is_empty() {
            Ok(defs)
        } else {
            Err(errors)
        }
    }

    /// Same as `validate`, reporting only the first problem.
    pub fn check(&self, shape: Shape) -> Result<PartitionedDefs, QueryError> {
        self.validate(shape).map_err(|errors| {
            for extra in errors.iter().skip(1) {
                log::debug!("additional specification error: {}", extra);
            }
            errors
                .into_iter()
                .next()
                .unwrap_or_else(|| QueryError::InvalidSpecification("invalid definition".into()))
        })
    }
}
