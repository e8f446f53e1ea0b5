//! The typed output of the three engines, before assembly into JSON.
use crate::value::{Tuple, Value};
use serde::Serialize;

/// One column tuple with the measures evaluated under its row and column equalities.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnGroup {
    pub columns: Tuple,
    pub measures: Vec<Value>,
}

/// What hangs below a cube node: the next row level, or once the row
/// dimensions run out, the terminal cross-product of the column dimensions.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CubeChildren {
    Nodes(Vec<CubeNode>),
    Terminal(Vec<ColumnGroup>),
}

impl Default for CubeChildren {
    fn default() -> Self {
        CubeChildren::Nodes(Vec::new())
    }
}

impl CubeChildren {
    pub fn nodes(&self) -> &[CubeNode] {
        match self {
            CubeChildren::Nodes(nodes) => nodes,
            CubeChildren::Terminal(_) => &[],
        }
    }

    pub fn terminal(&self) -> Option<&[ColumnGroup]> {
        match self {
            CubeChildren::Terminal(groups) => Some(groups),
            CubeChildren::Nodes(_) => None,
        }
    }
}

/// One value of a row dimension in a cube.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CubeNode {
    pub value: Value,
    /// Measures constrained by ancestor row equalities only, never by columns.
    pub measures: Vec<Value>,
    /// Column cross-product under the accumulated row constraint.
    pub columns: Vec<ColumnGroup>,
    pub children: CubeChildren,
}

impl CubeNode {
    /// Number of row levels in the subtree rooted here, counting this node.
    pub fn depth(&self) -> usize {
        1 + self.children.nodes().iter().map(CubeNode::depth).max().unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ResultNode {
    Flat { dimensions: Tuple, measures: Vec<Value> },
    Nested { rows: Tuple, columns: Vec<ColumnGroup> },
    Cube(CubeNode),
}
