//! Renders engine output as ordered arrays or alias-keyed objects.
use crate::engine::{ColumnGroup, CubeChildren, CubeNode, ResultNode};
use crate::error::QueryError;
use crate::options::{Format, QueryOptions};
use crate::spec::{sequence, DimensionSpec, PartitionedDefs, Role};
use crate::validation::Shape;
use crate::value::Value;
use serde_json::{json, Map, Value as Json};
use std::collections::HashSet;

/// Key holding the nested column groups in keyed output.
pub const COLUMNS_KEY: &str = "columns";
/// Key holding the child cube nodes, or the terminal column groups, in keyed output.
pub const CHILDREN_KEY: &str = "children";

pub struct ResultAssembler<'a> {
    defs: &'a PartitionedDefs,
    rows: Vec<DimensionSpec>,
    columns: Vec<DimensionSpec>,
    measure_aliases: Vec<String>,
    headers: bool,
    format: Format,
}

fn check_unique<'k>(keys: impl IntoIterator<Item = &'k str>) -> Result<(), QueryError> {
    let mut seen = HashSet::new();
    for key in keys {
        if !seen.insert(key) {
            return Err(QueryError::DuplicateAlias(key.to_string()));
        }
    }
    Ok(())
}

fn values(values: &[Value]) -> impl Iterator<Item = Json> + '_ {
    values.iter().cloned().map(Json::from)
}

fn strings(names: &[String]) -> impl Iterator<Item = Json> + '_ {
    names.iter().map(|n| Json::String(n.clone()))
}

impl<'a> ResultAssembler<'a> {
    pub fn new(defs: &'a PartitionedDefs, options: &QueryOptions) -> Self {
        Self {
            defs,
            rows: defs.rows(),
            columns: defs.columns(),
            measure_aliases: defs.measures.iter().map(|m| m.alias.clone()).collect(),
            headers: options.headers,
            format: options.format,
        }
    }

    pub fn assemble(&self, shape: Shape, nodes: &[ResultNode]) -> Result<Json, QueryError> {
        self.check_map_keys(shape)?;

        let mut out = Vec::with_capacity(nodes.len() + 1);
        if self.headers {
            out.push(self.header(shape));
        }
        for node in nodes {
            out.push(match self.format {
                Format::Array => self.node_array(node),
                Format::Map => self.node_map(node),
            });
        }
        Ok(Json::Array(out))
    }

    /// Keys that would land in the same object must be distinct. Only keyed
    /// output has keys, so array format always passes.
    pub(crate) fn check_map_keys(&self, shape: Shape) -> Result<(), QueryError> {
        if self.format != Format::Map {
            return Ok(());
        }
        let measures = self.measure_aliases.iter().map(String::as_str);
        let column_keys = || self.columns.iter().map(|d| d.alias.as_str()).chain(measures.clone());
        match shape {
            Shape::GroupBy => check_unique(self.defs.dimensions.iter().map(|d| d.alias.as_str()).chain(measures.clone())),
            Shape::CrossProduct => {
                check_unique(self.rows.iter().map(|d| d.alias.as_str()).chain([COLUMNS_KEY]))?;
                check_unique(column_keys())
            }
            Shape::Cube => {
                for row in &self.rows {
                    check_unique([row.alias.as_str(), COLUMNS_KEY, CHILDREN_KEY].into_iter().chain(measures.clone()))?;
                }
                check_unique(column_keys())
            }
        }
    }

    // --- Headers ---

    fn header(&self, shape: Shape) -> Json {
        match self.format {
            Format::Array => match shape {
                Shape::GroupBy => {
                    let dims = sequence::aliases(&self.defs.dimensions);
                    Json::Array(strings(&dims).chain(strings(&self.measure_aliases)).collect())
                }
                Shape::CrossProduct => {
                    let mut header: Vec<Json> = strings(&sequence::aliases(&self.rows)).collect();
                    header.push(self.column_header());
                    Json::Array(header)
                }
                Shape::Cube => self.cube_header(0),
            },
            Format::Map => {
                let mut header = Map::new();
                for d in &self.defs.dimensions {
                    let role = match d.role {
                        Role::Row => "row",
                        Role::Column => "column",
                    };
                    header.insert(d.alias.clone(), json!(role));
                }
                for m in &self.defs.measures {
                    header.insert(m.alias.clone(), json!(m.function));
                }
                Json::Object(header)
            }
        }
    }

    fn column_header(&self) -> Json {
        let cols = sequence::aliases(&self.columns);
        Json::Array(strings(&cols).chain(strings(&self.measure_aliases)).collect())
    }

    fn cube_header(&self, depth: usize) -> Json {
        // The deepest level's children are the terminal column groups.
        let child = if depth + 1 < self.rows.len() {
            self.cube_header(depth + 1)
        } else {
            self.column_header()
        };
        let alias = self.rows.get(depth).map_or("value", |d| d.alias.as_str());
        json!([
            alias,
            Json::Array(strings(&self.measure_aliases).collect()),
            [self.column_header()],
            [child],
        ])
    }

    // --- Array format ---

    fn node_array(&self, node: &ResultNode) -> Json {
        match node {
            ResultNode::Flat { dimensions, measures } => {
                Json::Array(values(dimensions).chain(values(measures)).collect())
            }
            ResultNode::Nested { rows, columns } => {
                let mut out: Vec<Json> = values(rows).collect();
                out.push(Json::Array(columns.iter().map(Self::group_array).collect()));
                Json::Array(out)
            }
            ResultNode::Cube(cube) => Self::cube_array(cube),
        }
    }

    fn group_array(group: &ColumnGroup) -> Json {
        Json::Array(values(&group.columns).chain(values(&group.measures)).collect())
    }

    fn cube_array(node: &CubeNode) -> Json {
        let children: Vec<Json> = match &node.children {
            CubeChildren::Nodes(nodes) => nodes.iter().map(Self::cube_array).collect(),
            CubeChildren::Terminal(groups) => groups.iter().map(Self::group_array).collect(),
        };
        json!([
            Json::from(node.value.clone()),
            Json::Array(values(&node.measures).collect()),
            Json::Array(node.columns.iter().map(Self::group_array).collect()),
            children,
        ])
    }

    // --- Map format ---

    fn insert_all(map: &mut Map<String, Json>, keys: &[String], vals: &[Value]) {
        for (k, v) in keys.iter().zip(vals) {
            map.insert(k.clone(), Json::from(v.clone()));
        }
    }

    fn node_map(&self, node: &ResultNode) -> Json {
        match node {
            ResultNode::Flat { dimensions, measures } => {
                let mut map = Map::new();
                Self::insert_all(&mut map, &sequence::aliases(&self.defs.dimensions), dimensions);
                Self::insert_all(&mut map, &self.measure_aliases, measures);
                Json::Object(map)
            }
            ResultNode::Nested { rows, columns } => {
                let mut map = Map::new();
                Self::insert_all(&mut map, &sequence::aliases(&self.rows), rows);
                map.insert(COLUMNS_KEY.into(), self.groups_map(columns));
                Json::Object(map)
            }
            ResultNode::Cube(cube) => self.cube_map(cube, 0),
        }
    }

    fn groups_map(&self, groups: &[ColumnGroup]) -> Json {
        let cols = sequence::aliases(&self.columns);
        Json::Array(
            groups
                .iter()
                .map(|g| {
                    let mut map = Map::new();
                    Self::insert_all(&mut map, &cols, &g.columns);
                    Self::insert_all(&mut map, &self.measure_aliases, &g.measures);
                    Json::Object(map)
                })
                .collect(),
        )
    }

    fn cube_map(&self, node: &CubeNode, depth: usize) -> Json {
        let mut map = Map::new();
        let alias = self.rows.get(depth).map_or("value", |d| d.alias.as_str());
        map.insert(alias.to_string(), Json::from(node.value.clone()));
        Self::insert_all(&mut map, &self.measure_aliases, &node.measures);
        map.insert(COLUMNS_KEY.into(), self.groups_map(&node.columns));
        let children = match &node.children {
            CubeChildren::Nodes(nodes) => Json::Array(nodes.iter().map(|c| self.cube_map(c, depth + 1)).collect()),
            CubeChildren::Terminal(groups) => self.groups_map(groups),
        };
        map.insert(CHILDREN_KEY.into(), children);
        Json::Object(map)
    }
}
