//! Pivot-table query planning over an external indexed-search engine.
//!
//! The backing engine supplies two primitives: enumerating distinct value
//! tuples under a constraint, and evaluating an aggregate under a
//! constraint. This crate composes those calls into three result shapes:
//! flat group-by rows, row-constrained cross-products, and recursive cubes.
//!
//! Layers:
//! - `spec`: dimensions, measures and the references they point at (WHAT to compute)
//! - `validation`: eager checks before any backend call
//! - `constraint`: immutable, structurally shared conjunctions
//! - `backend`: collaborator traits, plus an in-memory index
//! - `engine`: the group-by, cross-product and cube algorithms (HOW we compute)
//! - `display`: array or keyed JSON rendering (WHAT callers receive)
//! - `query`: the `Planner` entry points

pub mod backend;
pub mod constraint;
pub mod display;
pub mod engine;
pub mod error;
pub mod options;
pub mod query;
pub mod spec;
pub mod validation;
pub mod value;

pub use backend::{AggregateEvaluator, Backend, MemoryIndex, TupleEnumerator};
pub use constraint::{Constraint, ConstraintBuilder, Predicate};
pub use engine::{ColumnGroup, CubeChildren, CubeNode, ResultNode};
pub use error::{BackendError, QueryError};
pub use options::{Format, QueryOptions};
pub use query::{Planner, PlannerConfig};
pub use spec::{column, compute, row, DimensionSpec, MeasureSpec, ReferenceKind, ReferenceSpec, Role, ScalarType, TypeDef};
pub use validation::Shape;
pub use value::{Tuple, Value};
