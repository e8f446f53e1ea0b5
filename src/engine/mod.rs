//! Orchestrates tuple enumeration and aggregate evaluation into pivot shapes.
//!
//! Each engine only composes constraints and calls the backend. Constraints
//! are never mutated, so independent branches can run on the rayon pool
//! when the context asks for it; output order is the same either way.
pub mod cross_product;
pub mod cube;
pub mod group_by;
pub mod result;

pub use cross_product::CrossProductEngine;
pub use cube::CubeEngine;
pub use group_by::GroupByEngine;
pub use result::{ColumnGroup, CubeChildren, CubeNode, ResultNode};

use crate::backend::Backend;
use crate::constraint::Constraint;
use crate::error::QueryError;
use crate::spec::{sequence, DimensionSpec, MeasureSpec};
use crate::value::{Tuple, Value};
use rayon::prelude::*;

/// What every engine needs for one invocation.
pub struct ExecutionContext<'a, B: ?Sized> {
    pub backend: &'a B,
    /// Options forwarded verbatim to every enumeration call.
    pub options: &'a [String],
    pub parallel: bool,
}

impl<B: ?Sized> Clone for ExecutionContext<'_, B> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<B: ?Sized> Copy for ExecutionContext<'_, B> {}

impl<'a, B: Backend + ?Sized> ExecutionContext<'a, B> {
    pub fn new(backend: &'a B, options: &'a [String]) -> Self {
        Self { backend, options, parallel: false }
    }

    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub(crate) fn enumerate(&self, dimensions: &[DimensionSpec], constraint: &Constraint) -> Result<Vec<Tuple>, QueryError> {
        let references = sequence::references(dimensions);
        log::trace!("enumerate {:?} under {} predicate(s)", sequence::aliases(dimensions), constraint.predicates().len());
        self.backend
            .enumerate(&references, constraint, self.options)
            .map_err(|source| QueryError::Enumeration { source })
    }

    /// Evaluates every measure, in declaration order, under one constraint.
    pub(crate) fn evaluate_all(&self, measures: &[MeasureSpec], constraint: &Constraint) -> Result<Vec<Value>, QueryError> {
        measures
            .iter()
            .map(|m| {
                self.backend
                    .evaluate(&m.function, &m.references, constraint, &m.options)
                    .map_err(|source| QueryError::Aggregate { alias: m.alias.clone(), source })
            })
            .collect()
    }

    /// Maps `f` over `items`, on the rayon pool when parallel. Order is preserved
    /// and the first error aborts the whole map.
    pub(crate) fn map_ordered<T, R, F>(&self, items: Vec<T>, f: F) -> Result<Vec<R>, QueryError>
    where
        T: Send,
        R: Send,
        F: Fn(T) -> Result<R, QueryError> + Sync + Send,
    {
        if self.parallel {
            items.into_par_iter().map(f).collect()
        } else {
            items.into_iter().map(f).collect()
        }
    }
}
