//! Contracts for the backing indexed-search engine.
//!
//! The planner never computes tuples or aggregates itself. It composes
//! constraints and calls into these two collaborators. Both must be
//! reentrant (`Sync`) so independent branches may be evaluated in parallel.
pub mod memory;

use crate::constraint::Constraint;
use crate::error::BackendError;
use crate::spec::ReferenceSpec;
use crate::value::{Tuple, Value};

/// Enumerates distinct co-occurring value tuples across one or more references.
pub trait TupleEnumerator: Sync {
    /// Each returned tuple is positionally aligned to `references`. Tuples are
    /// distinct; the order is whatever the backend emits.
    fn enumerate(
        &self,
        references: &[ReferenceSpec],
        constraint: &Constraint,
        options: &[String],
    ) -> Result<Vec<Tuple>, BackendError>;
}

/// Evaluates a named aggregate over one or two references.
pub trait AggregateEvaluator: Sync {
    fn evaluate(
        &self,
        function: &str,
        references: &[ReferenceSpec],
        constraint: &Constraint,
        options: &[String],
    ) -> Result<Value, BackendError>;
}

/// A backend that provides both primitives.
pub trait Backend: TupleEnumerator + AggregateEvaluator {}

impl<T: TupleEnumerator + AggregateEvaluator> Backend for T {}

pub use memory::MemoryIndex;
