#![allow(dead_code)]

use pivot_query_core::{
    AggregateEvaluator, BackendError, Constraint, MemoryIndex, ReferenceSpec, ScalarType, Tuple, TupleEnumerator, Value,
};
use std::sync::atomic::{AtomicUsize, Ordering};

/// 2 positions x 2 companies, numeric salary and bonus.
pub fn employees() -> MemoryIndex {
    MemoryIndex::from_json(
        r#"[
            {"position": "Engineer", "company": "Acme",   "salary": 100, "bonus": 10, "region": "EU"},
            {"position": "Engineer", "company": "Acme",   "salary": 120, "bonus": 20, "region": "EU"},
            {"position": "Engineer", "company": "Globex", "salary": 130, "bonus": 5,  "region": "US"},
            {"position": "Manager",  "company": "Acme",   "salary": 200, "bonus": 50, "region": "EU"},
            {"position": "Manager",  "company": "Globex", "salary": 180, "bonus": 30, "region": "US"},
            {"position": "Manager",  "company": "Globex", "salary": 220, "bonus": 40, "region": "US"}
        ]"#,
    )
    .expect("fixture parses")
}

pub fn position() -> ReferenceSpec {
    ReferenceSpec::element("position", ScalarType::String)
}

pub fn company() -> ReferenceSpec {
    ReferenceSpec::element("company", ScalarType::String)
}

pub fn region() -> ReferenceSpec {
    ReferenceSpec::element("region", ScalarType::String)
}

pub fn salary() -> ReferenceSpec {
    ReferenceSpec::element("salary", ScalarType::Double)
}

pub fn bonus() -> ReferenceSpec {
    ReferenceSpec::element("bonus", ScalarType::Double)
}

/// Wraps an index and counts every collaborator call.
pub struct CountingBackend {
    pub inner: MemoryIndex,
    pub enumerations: AtomicUsize,
    pub evaluations: AtomicUsize,
}

impl CountingBackend {
    pub fn new(inner: MemoryIndex) -> Self {
        Self { inner, enumerations: AtomicUsize::new(0), evaluations: AtomicUsize::new(0) }
    }

    pub fn calls(&self) -> usize {
        self.enumerations.load(Ordering::SeqCst) + self.evaluations.load(Ordering::SeqCst)
    }
}

impl TupleEnumerator for CountingBackend {
    fn enumerate(&self, references: &[ReferenceSpec], constraint: &Constraint, options: &[String]) -> Result<Vec<Tuple>, BackendError> {
        self.enumerations.fetch_add(1, Ordering::SeqCst);
        self.inner.enumerate(references, constraint, options)
    }
}

impl AggregateEvaluator for CountingBackend {
    fn evaluate(&self, function: &str, references: &[ReferenceSpec], constraint: &Constraint, options: &[String]) -> Result<Value, BackendError> {
        self.evaluations.fetch_add(1, Ordering::SeqCst);
        self.inner.evaluate(function, references, constraint, options)
    }
}
