//! Stable partition of an authored definition into dimensions and measures.
use super::reference::ReferenceSpec;
use super::types::{DimensionSpec, MeasureSpec, Role, TypeDef};

/// Dimensions and measures in declaration order, regardless of how they were interleaved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartitionedDefs {
    pub dimensions: Vec<DimensionSpec>,
    pub measures: Vec<MeasureSpec>,
}

impl PartitionedDefs {
    pub fn new(type_defs: &[TypeDef]) -> Self {
        let mut defs = Self::default();
        for def in type_defs {
            match def {
                TypeDef::Dimension(d) => defs.dimensions.push(d.clone()),
                TypeDef::Measure(m) => defs.measures.push(m.clone()),
            }
        }
        defs
    }

    pub fn with_role(&self, role: Role) -> Vec<DimensionSpec> {
        self.dimensions.iter().filter(|d| d.role == role).cloned().collect()
    }

    pub fn rows(&self) -> Vec<DimensionSpec> {
        self.with_role(Role::Row)
    }

    pub fn columns(&self) -> Vec<DimensionSpec> {
        self.with_role(Role::Column)
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.dimensions.iter().any(|d| d.role == role)
    }
}

pub fn references(dimensions: &[DimensionSpec]) -> Vec<ReferenceSpec> {
    dimensions.iter().map(|d| d.reference.clone()).collect()
}

pub fn aliases(dimensions: &[DimensionSpec]) -> Vec<String> {
    dimensions.iter().map(|d| d.alias.clone()).collect()
}
