use super::reference::ReferenceSpec;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Row,
    Column,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Row => write!(f, "row"),
            Role::Column => write!(f, "column"),
        }
    }
}

/// A named, role-tagged reference used to partition data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionSpec {
    pub alias: String,
    pub reference: ReferenceSpec,
    pub role: Role,
}

/// A named aggregate computation over one or two references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeasureSpec {
    pub alias: String,
    pub function: String,
    pub references: Vec<ReferenceSpec>,
    #[serde(default)]
    pub options: Vec<String>,
    /// Set when the alias was not authored and fell back to the function name.
    #[serde(default)]
    pub alias_defaulted: bool,
}

/// One entry of an authored pivot definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TypeDef {
    Dimension(DimensionSpec),
    Measure(MeasureSpec),
}

impl TypeDef {
    pub fn alias(&self) -> &str {
        match self {
            TypeDef::Dimension(d) => &d.alias,
            TypeDef::Measure(m) => &m.alias,
        }
    }
}

impl From<DimensionSpec> for TypeDef {
    fn from(d: DimensionSpec) -> Self {
        TypeDef::Dimension(d)
    }
}

impl From<MeasureSpec> for TypeDef {
    fn from(m: MeasureSpec) -> Self {
        TypeDef::Measure(m)
    }
}
