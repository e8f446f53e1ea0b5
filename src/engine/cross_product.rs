//! Row tuples paired with the column tuples that co-occur with them.
use super::{ColumnGroup, ExecutionContext, ResultNode};
use crate::backend::Backend;
use crate::constraint::{Constraint, ConstraintBuilder};
use crate::error::QueryError;
use crate::spec::{DimensionSpec, MeasureSpec, PartitionedDefs, Role};

pub struct CrossProductEngine<'a, B: ?Sized> {
    ctx: ExecutionContext<'a, B>,
}

impl<'a, B: Backend + ?Sized> CrossProductEngine<'a, B> {
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

        let row_tuples = self.ctx.enumerate(&rows, base)?;
        log::debug!("cross-product: {} row tuple(s)", row_tuples.len());

        self.ctx.map_ordered(row_tuples, |rt| {
            let qr = ConstraintBuilder::extend_all(base, &rows, &rt);
            let groups = self.column_groups(&columns, &defs.measures, &qr)?;
            Ok(ResultNode::Nested { rows: rt, columns: groups })
        })
    }

    /// The column cross-product under `constraint`: every column tuple that
    /// co-occurs with it, with measures pinned to both.
    pub fn column_groups(
        &self,
        columns: &[DimensionSpec],
        measures: &[MeasureSpec],
        constraint: &Constraint,
    ) -> Result<Vec<ColumnGroup>, QueryError> {
        let col_tuples = self.ctx.enumerate(columns, constraint)?;
        col_tuples
            .into_iter()
            .map(|ct| {
                let qc = ConstraintBuilder::extend_all(constraint, columns, &ct);
                let values = self.ctx.evaluate_all(measures, &qc)?;
                Ok(ColumnGroup { columns: ct, measures: values })
            })
            .collect()
    }
}
