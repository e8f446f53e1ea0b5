//! Flat grouped rows: one row per distinct tuple across all dimensions.
use super::{ExecutionContext, ResultNode};
use crate::backend::Backend;
use crate::constraint::{Constraint, ConstraintBuilder};
use crate::error::QueryError;
use crate::spec::PartitionedDefs;

pub struct GroupByEngine<'a, B: ?Sized> {
    ctx: ExecutionContext<'a, B>,
}

impl<'a, B: Backend + ?Sized> GroupByEngine<'a, B> {
    pub fn new(ctx: ExecutionContext<'a, B>) -> Self {
        Self { ctx }
    }

    /// Rows and columns are treated alike here. Each tuple is pinned by the
    /// full conjunction of its dimension equalities before measures run.
    pub fn run(&self, defs: &PartitionedDefs, base: &Constraint) -> Result<Vec<ResultNode>, QueryError> {
        let tuples = self.ctx.enumerate(&defs.dimensions, base)?;
        log::debug!("group-by: {} tuple(s), {} measure(s)", tuples.len(), defs.measures.len());

        self.ctx.map_ordered(tuples, |tuple| {
            let qt = ConstraintBuilder::extend_all(base, &defs.dimensions, &tuple);
            let measures = self.ctx.evaluate_all(&defs.measures, &qt)?;
            Ok(ResultNode::Flat { dimensions: tuple, measures })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryIndex;
    use crate::error::BackendError;
    use crate::spec::{column, compute, row, ReferenceSpec, ScalarType, TypeDef};
    use crate::value::Value;

    fn index() -> MemoryIndex {
        MemoryIndex::from_json(
            r#"[
                {"position": "Engineer", "company": "Acme", "salary": 100},
                {"position": "Engineer", "company": "Globex", "salary": 140},
                {"position": "Manager", "company": "Acme", "salary": 200}
            ]"#,
        )
        .unwrap()
    }

    fn string_ref(name: &str) -> ReferenceSpec {
        ReferenceSpec::element(name, ScalarType::String)
    }

    #[test]
    fn test_one_row_per_tuple() {
        let defs: Vec<TypeDef> = vec![
            row("position", string_ref("position")).unwrap().into(),
            column("company", string_ref("company")).unwrap().into(),
            compute(None, "sum", vec![ReferenceSpec::element("salary", ScalarType::Int)], vec![]).unwrap().into(),
        ];
        let idx = index();
        let engine = GroupByEngine::new(ExecutionContext::new(&idx, &[]));
        let rows = engine.run(&PartitionedDefs::new(&defs), &Constraint::all()).unwrap();

        assert_eq!(rows.len(), 3);
        match &rows[1] {
            ResultNode::Flat { dimensions, measures } => {
                assert_eq!(dimensions.as_slice(), &[Value::from("Engineer"), Value::from("Globex")]);
                assert_eq!(measures, &vec![Value::Float(140.0)]);
            }
            other => panic!("unexpected node {:?}", other),
        }
    }

    #[test]
    fn test_backend_error_carries_alias() {
        let defs: Vec<TypeDef> = vec![
            row("position", string_ref("position")).unwrap().into(),
            compute(Some("bad"), "avg", vec![string_ref("company")], vec![]).unwrap().into(),
        ];
        let idx = index();
        let engine = GroupByEngine::new(ExecutionContext::new(&idx, &[]));
        let err = engine.run(&PartitionedDefs::new(&defs), &Constraint::all()).unwrap_err();

        match err {
            QueryError::Aggregate { alias, source } => {
                assert_eq!(alias, "bad");
                assert!(matches!(source, BackendError::NonNumericReference { .. }));
            }
            other => panic!("unexpected error {:?}", other),
        }
    }
}
