//! The declarative pivot specification: references, dimensions and measures.
pub mod aggregate;
pub mod builder;
pub mod reference;
pub mod sequence;
pub mod types;

pub use builder::{column, compute, row};
pub use reference::{ReferenceKind, ReferenceSpec, ScalarType};
pub use sequence::PartitionedDefs;
pub use types::{DimensionSpec, MeasureSpec, Role, TypeDef};
