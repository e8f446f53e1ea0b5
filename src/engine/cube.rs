//! Recursive nesting of cross-products across a chain of row dimensions.
//!
//! Built with an explicit frame stack instead of call recursion, so the
//! number of row dimensions never bounds the native stack.
use super::{CrossProductEngine, CubeChildren, CubeNode, ExecutionContext, ResultNode};
use crate::backend::Backend;
use crate::constraint::{Constraint, ConstraintBuilder};
use crate::error::QueryError;
use crate::spec::{PartitionedDefs, Role};
use crate::value::Value;
use std::mem;

/// Pending work: expand row dimension `depth` under `constraint`, attaching
/// the resulting nodes to the arena slot `parent`.
struct Frame {
    depth: usize,
    constraint: Constraint,
    parent: Option<usize>,
}

/// A node whose children are still being expanded.
struct Slot {
    node: CubeNode,
    parent: Option<usize>,
}

pub struct CubeEngine<'a, B: ?Sized> {
    ctx: ExecutionContext<'a, B>,
}

impl<'a, B: Backend + ?Sized> CubeEngine<'a, B> {
    pub fn new(ctx: ExecutionContext<'a, B>) -> Self {
        Self { ctx }
    }

    pub fn run(&self, defs: &PartitionedDefs, base: &Constraint) -> Result<Vec<ResultNode>, QueryError> {
        let rows = defs.rows();
        let columns = defs.columns();
        if rows.is_empty() {
            return Err(QueryError::MissingDimensionRole { role: Role::Row });
        }
        if columns.is_empty() {
            return Err(QueryError::MissingDimensionRole { role: Role::Column });
        }

        let cross = CrossProductEngine::new(self.ctx);
        let mut arena: Vec<Slot> = Vec::new();
        let mut stack = vec![Frame { depth: 0, constraint: base.clone(), parent: None }];

        // 1. Expand frames. A child slot is always pushed after its parent,
        //    so arena indices are topologically ordered.
        while let Some(frame) = stack.pop() {
            let dimension = &rows[frame.depth];
            let values = self.ctx.enumerate(std::slice::from_ref(dimension), &frame.constraint)?;
            let has_next = frame.depth + 1 < rows.len();

            let expanded = self.ctx.map_ordered(values, |tuple| {
                let value = tuple.into_iter().next().unwrap_or(Value::Null);
                let qv = ConstraintBuilder::extend(&frame.constraint, dimension, &value);
                let measures = self.ctx.evaluate_all(&defs.measures, &qv)?;
                let groups = cross.column_groups(&columns, &defs.measures, &qv)?;
                // Out of row dimensions: the child is the cross-product under the
                // same accumulated constraint, which is exactly `groups`.
                let children = if has_next {
                    CubeChildren::default()
                } else {
                    CubeChildren::Terminal(groups.clone())
                };
                Ok((CubeNode { value, measures, columns: groups, children }, qv))
            })?;

            for (node, qv) in expanded {
                let index = arena.len();
                arena.push(Slot { node, parent: frame.parent });
                if has_next {
                    stack.push(Frame { depth: frame.depth + 1, constraint: qv, parent: Some(index) });
                }
            }
        }
        log::debug!("cube: {} node(s) over {} row dimension(s)", arena.len(), rows.len());

        // 2. Fold the arena bottom-up. Walking indices in reverse visits every
        //    child before its parent; siblings arrive reversed and are flipped.
        let mut children: Vec<Vec<CubeNode>> = (0..arena.len()).map(|_| Vec::new()).collect();
        let mut roots = Vec::new();
        for (index, slot) in arena.into_iter().enumerate().rev() {
            let mut node = slot.node;
            if let CubeChildren::Nodes(nodes) = &mut node.children {
                *nodes = mem::take(&mut children[index]);
                nodes.reverse();
            }
            match slot.parent {
                Some(parent) => children[parent].push(node),
                None => roots.push(node),
            }
        }
        roots.reverse();

        Ok(roots.into_iter().map(ResultNode::Cube).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryIndex;
    use crate::engine::GroupByEngine;
    use crate::spec::{column, compute, row, ReferenceSpec, ScalarType, TypeDef};

    fn index() -> MemoryIndex {
        MemoryIndex::from_json(
            r#"[
                {"region": "EU", "position": "Engineer", "company": "Acme", "salary": 100},
                {"region": "EU", "position": "Manager", "company": "Globex", "salary": 140},
                {"region": "US", "position": "Engineer", "company": "Acme", "salary": 120},
                {"region": "US", "position": "Engineer", "company": "Initech", "salary": 90}
            ]"#,
        )
        .unwrap()
    }

    fn string_ref(name: &str) -> ReferenceSpec {
        ReferenceSpec::element(name, ScalarType::String)
    }

    fn salary() -> ReferenceSpec {
        ReferenceSpec::element("salary", ScalarType::Int)
    }

    fn definition() -> Vec<TypeDef> {
        vec![
            row("region", string_ref("region")).unwrap().into(),
            column("company", string_ref("company")).unwrap().into(),
            row("position", string_ref("position")).unwrap().into(),
            compute(None, "sum", vec![salary()], vec![]).unwrap().into(),
        ]
    }

    fn cube_nodes(nodes: Vec<ResultNode>) -> Vec<CubeNode> {
        nodes
            .into_iter()
            .map(|n| match n {
                ResultNode::Cube(c) => c,
                other => panic!("unexpected node {:?}", other),
            })
            .collect()
    }

    #[test]
    fn test_nesting_follows_row_order() {
        let idx = index();
        let engine = CubeEngine::new(ExecutionContext::new(&idx, &[]));
        let cube = cube_nodes(engine.run(&PartitionedDefs::new(&definition()), &Constraint::all()).unwrap());

        assert_eq!(cube.len(), 2);
        let us = &cube[1];
        assert_eq!(us.value, Value::from("US"));
        assert_eq!(us.measures, vec![Value::Float(210.0)]);
        assert_eq!(us.columns.len(), 2);
        assert_eq!(us.depth(), 2);

        let eu_children: Vec<_> = cube[0].children.nodes().iter().map(|c| c.value.clone()).collect();
        assert_eq!(eu_children, vec![Value::from("Engineer"), Value::from("Manager")]);
        assert_eq!(cube[0].children.terminal(), None);

        let us_engineer = &us.children.nodes()[0];
        assert_eq!(us_engineer.measures, vec![Value::Float(210.0)]);
        assert_eq!(us_engineer.columns.len(), 2);
        assert_eq!(us_engineer.columns[1].columns[0], Value::from("Initech"));
        assert_eq!(us_engineer.columns[1].measures, vec![Value::Float(90.0)]);
        assert_eq!(us_engineer.children.terminal(), Some(us_engineer.columns.as_slice()));
    }

    #[test]
    fn test_terminal_cross_product_matches_engine() {
        let idx = index();
        let ctx = ExecutionContext::new(&idx, &[]);
        let defs = PartitionedDefs::new(&definition());
        let cube = cube_nodes(CubeEngine::new(ctx).run(&defs, &Constraint::all()).unwrap());

        let columns = defs.columns();
        for region in &cube {
            for position in region.children.nodes() {
                let qv = ConstraintBuilder::extend_all(
                    &Constraint::all(),
                    &defs.rows(),
                    &[region.value.clone(), position.value.clone()],
                );
                let expected = CrossProductEngine::new(ctx).column_groups(&columns, &defs.measures, &qv).unwrap();
                assert_eq!(position.children.terminal(), Some(expected.as_slice()));
            }
        }
    }

    fn group_by_sum(ctx: ExecutionContext<'_, MemoryIndex>, dimension: &str, base: &Constraint) -> Vec<Value> {
        let single: Vec<TypeDef> = vec![
            row(dimension, string_ref(dimension)).unwrap().into(),
            compute(None, "sum", vec![salary()], vec![]).unwrap().into(),
        ];
        match &GroupByEngine::new(ctx).run(&PartitionedDefs::new(&single), base).unwrap()[0] {
            ResultNode::Flat { measures, .. } => measures.clone(),
            other => panic!("unexpected node {:?}", other),
        }
    }

    #[test]
    fn test_row_measures_match_group_by() {
        let idx = index();
        let ctx = ExecutionContext::new(&idx, &[]);
        let cube = cube_nodes(CubeEngine::new(ctx).run(&PartitionedDefs::new(&definition()), &Constraint::all()).unwrap());

        let mut checked = 0;
        for region in &cube {
            let by_region = Constraint::equals(string_ref("region"), region.value.clone());
            assert_eq!(group_by_sum(ctx, "region", &by_region), region.measures);

            for position in region.children.nodes() {
                let by_position = ConstraintBuilder::extend(
                    &by_region,
                    &row("position", string_ref("position")).unwrap(),
                    &position.value,
                );
                assert_eq!(group_by_sum(ctx, "position", &by_position), position.measures);
                checked += 1;
            }
        }
        // EU: Engineer, Manager. US: Engineer.
        assert_eq!(checked, 3);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let idx = index();
        let defs = PartitionedDefs::new(&definition());
        let sequential = CubeEngine::new(ExecutionContext::new(&idx, &[])).run(&defs, &Constraint::all()).unwrap();
        let parallel = CubeEngine::new(ExecutionContext::new(&idx, &[]).parallel(true))
            .run(&defs, &Constraint::all())
            .unwrap();
        assert_eq!(sequential, parallel);
    }
}
