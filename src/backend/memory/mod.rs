//! An in-memory stand-in for the backing index.
//!
//! Documents are flat maps from reference name to a single value. Tuples
//! come back distinct and in ascending order, the way a range index returns
//! them. Useful for tests and for embedding the planner without a server.
pub mod kernel;

use super::{AggregateEvaluator, TupleEnumerator};
use crate::constraint::{Constraint, Predicate};
use crate::error::BackendError;
use crate::spec::{aggregate, ReferenceSpec};
use crate::value::{Tuple, Value};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;

pub type Document = BTreeMap<String, Value>;

/// A user-defined aggregate registered under `native/<plugin>/<function>`.
pub type NativeFn = fn(&[f64]) -> Option<f64>;

#[derive(Clone, Default)]
pub struct MemoryIndex {
    documents: Vec<Document>,
    natives: HashMap<String, NativeFn>,
}

impl fmt::Debug for MemoryIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryIndex")
            .field("documents", &self.documents.len())
            .field("natives", &self.natives.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl MemoryIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads documents from a JSON array of flat objects.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let documents: Vec<Document> = serde_json::from_str(json)?;
        Ok(Self { documents, ..Self::default() })
    }

    pub fn insert(&mut self, document: Document) {
        self.documents.push(document);
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn with_native(mut self, plugin: &str, function: &str, f: NativeFn) -> Self {
        self.natives.insert(format!("native/{}/{}", plugin, function), f);
        self
    }

    fn matching<'a>(&'a self, constraint: &Constraint) -> Result<Vec<&'a Document>, BackendError> {
        let mut equalities = Vec::new();
        for predicate in constraint.predicates() {
            match predicate {
                Predicate::Equals { reference, value } => equalities.push((reference, value)),
                Predicate::Native(q) => {
                    return Err(BackendError::Unavailable(format!(
                        "native constraint '{}' is not supported in memory",
                        q
                    )))
                }
            }
        }
        Ok(self
            .documents
            .iter()
            .filter(|doc| equalities.iter().all(|(r, v)| doc.get(&r.name) == Some(*v)))
            .collect())
    }
}

#[derive(Debug, Default)]
struct EnumerateOptions {
    descending: bool,
    limit: Option<usize>,
}

impl EnumerateOptions {
    fn parse(options: &[String]) -> Result<Self, BackendError> {
        let mut parsed = Self::default();
        for option in options {
            match option.split_once('=') {
                None if option == "descending" => parsed.descending = true,
                None if option == "ascending" => parsed.descending = false,
                Some(("limit", n)) => {
                    let limit = n
                        .parse()
                        .map_err(|_| BackendError::Unavailable(format!("invalid limit '{}'", n)))?;
                    parsed.limit = Some(limit);
                }
                // Unknown options are ignored like any index would ignore foreign hints.
                _ => {}
            }
        }
        Ok(parsed)
    }
}

impl TupleEnumerator for MemoryIndex {
    fn enumerate(
        &self,
        references: &[ReferenceSpec],
        constraint: &Constraint,
        options: &[String],
    ) -> Result<Vec<Tuple>, BackendError> {
        let opts = EnumerateOptions::parse(options)?;
        let mut distinct = BTreeSet::new();
        for doc in self.matching(constraint)? {
            let tuple: Option<Tuple> = references.iter().map(|r| doc.get(&r.name).cloned()).collect();
            if let Some(tuple) = tuple {
                distinct.insert(tuple);
            }
        }

        let mut tuples: Vec<Tuple> = distinct.into_iter().collect();
        if opts.descending {
            tuples.reverse();
        }
        if let Some(limit) = opts.limit {
            tuples.truncate(limit);
        }
        Ok(tuples)
    }
}

impl AggregateEvaluator for MemoryIndex {
    fn evaluate(
        &self,
        function: &str,
        references: &[ReferenceSpec],
        constraint: &Constraint,
        _options: &[String],
    ) -> Result<Value, BackendError> {
        // 1. Function name and arity
        if !aggregate::is_supported(function) {
            return Err(BackendError::UnsupportedAggregate { function: function.to_string() });
        }
        let expected = aggregate::arity(function);
        if references.len() != expected {
            return Err(BackendError::ReferenceArityMismatch {
                function: function.to_string(),
                expected,
                actual: references.len(),
            });
        }

        // 2. Type check
        if aggregate::requires_numeric(function) {
            if let Some(r) = references.iter().find(|r| !r.is_numeric()) {
                return Err(BackendError::NonNumericReference {
                    function: function.to_string(),
                    reference: r.name.clone(),
                });
            }
        }

        // 3. Gather and reduce
        let docs = self.matching(constraint)?;
        if function == "count" {
            let n = docs.iter().filter(|d| d.contains_key(&references[0].name)).count();
            return Ok(Value::Int(n as i64));
        }

        let column = |r: &ReferenceSpec| -> Vec<f64> {
            docs.iter().filter_map(|d| d.get(&r.name).and_then(Value::as_f64)).collect()
        };

        if expected == 2 {
            let (x, y) = (&references[0].name, &references[1].name);
            let pairs: Vec<(f64, f64)> = docs
                .iter()
                .filter_map(|d| Some((d.get(x)?.as_f64()?, d.get(y)?.as_f64()?)))
                .collect();
            return kernel::execute_pair(function, &pairs)
                .ok_or_else(|| BackendError::UnsupportedAggregate { function: function.to_string() });
        }

        let xs = column(&references[0]);
        if let Some(native) = self.natives.get(function) {
            return Ok(native(&xs).map_or(Value::Null, Value::Float));
        }
        if aggregate::parse_native(function).is_some() {
            return Err(BackendError::Unavailable(format!("no plugin registered for '{}'", function)));
        }
        kernel::execute_single(function, &xs)
            .ok_or_else(|| BackendError::UnsupportedAggregate { function: function.to_string() })
    }
}
