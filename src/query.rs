//! Entry points: group-by, cross-product and cube over a backend.
use crate::backend::Backend;
use crate::constraint::Constraint;
use crate::display::ResultAssembler;
use crate::engine::{CrossProductEngine, CubeEngine, ExecutionContext, GroupByEngine, ResultNode};
use crate::error::QueryError;
use crate::options::QueryOptions;
use crate::spec::{PartitionedDefs, TypeDef};
use crate::validation::{Shape, Validator};
use serde::{Deserialize, Serialize};

/// Engine-level settings shared by every query a planner runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Evaluate independent row branches on the rayon pool.
    pub parallel: bool,
}

pub struct Planner<'a, B: ?Sized> {
    backend: &'a B,
    config: PlannerConfig,
}

impl<'a, B: Backend + ?Sized> Planner<'a, B> {
    pub fn new(backend: &'a B) -> Self {
        Self { backend, config: PlannerConfig::default() }
    }

    pub fn with_config(backend: &'a B, config: PlannerConfig) -> Self {
        Self { backend, config }
    }

    pub fn group_by<S: AsRef<str>>(&self, type_defs: &[TypeDef], options: &[S], query: Option<&Constraint>) -> Result<serde_json::Value, QueryError> {
        self.execute(Shape::GroupBy, type_defs, options, query)
    }

    pub fn cross_product<S: AsRef<str>>(&self, type_defs: &[TypeDef], options: &[S], query: Option<&Constraint>) -> Result<serde_json::Value, QueryError> {
        self.execute(Shape::CrossProduct, type_defs, options, query)
    }

    pub fn cube<S: AsRef<str>>(&self, type_defs: &[TypeDef], options: &[S], query: Option<&Constraint>) -> Result<serde_json::Value, QueryError> {
        self.execute(Shape::Cube, type_defs, options, query)
    }

    /// Runs an engine and returns its typed output without JSON assembly.
    pub fn run<S: AsRef<str>>(&self, shape: Shape, type_defs: &[TypeDef], options: &[S], query: Option<&Constraint>) -> Result<Vec<ResultNode>, QueryError> {
        let (defs, opts) = self.prepare(shape, type_defs, options)?;
        self.run_engine(shape, &defs, &opts, query)
    }

    fn execute<S: AsRef<str>>(&self, shape: Shape, type_defs: &[TypeDef], options: &[S], query: Option<&Constraint>) -> Result<serde_json::Value, QueryError> {
        let (defs, opts) = self.prepare(shape, type_defs, options)?;
        let assembler = ResultAssembler::new(&defs, &opts);
        // Keyed output can only be rendered with distinct keys; find out before querying.
        assembler.check_map_keys(shape)?;
        let nodes = self.run_engine(shape, &defs, &opts, query)?;
        assembler.assemble(shape, &nodes)
    }

    /// Everything that can be rejected without touching the backend.
    fn prepare<S: AsRef<str>>(&self, shape: Shape, type_defs: &[TypeDef], options: &[S]) -> Result<(PartitionedDefs, QueryOptions), QueryError> {
        let opts = QueryOptions::parse(options)?;
        let defs = Validator::new(type_defs).check(shape)?;
        Ok((defs, opts))
    }

    fn run_engine(&self, shape: Shape, defs: &PartitionedDefs, opts: &QueryOptions, query: Option<&Constraint>) -> Result<Vec<ResultNode>, QueryError> {
        let base = query.cloned().unwrap_or_default();
        let ctx = ExecutionContext::new(self.backend, &opts.forwarded).parallel(self.config.parallel);
        log::debug!(
            "{:?}: {} dimension(s), {} measure(s), parallel={}",
            shape,
            defs.dimensions.len(),
            defs.measures.len(),
            self.config.parallel
        );
        match shape {
            Shape::GroupBy => GroupByEngine::new(ctx).run(defs, &base),
            Shape::CrossProduct => CrossProductEngine::new(ctx).run(defs, &base),
            Shape::Cube => CubeEngine::new(ctx).run(defs, &base),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_json() {
        let config: PlannerConfig = serde_json::from_str(r#"{"parallel": true}"#).unwrap();
        assert!(config.parallel);
        let config: PlannerConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, PlannerConfig::default());
    }
}
