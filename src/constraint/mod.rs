//! Composable, immutable query constraints.
//!
//! A `Constraint` is a shared tree: extending it allocates one new node that
//! points at the existing one, so recursive branches share every ancestor
//! predicate without copying.
pub mod builder;

pub use builder::ConstraintBuilder;

use crate::spec::ReferenceSpec;
use crate::value::Value;
use serde::Serialize;
use std::sync::Arc;

/// A single leaf of a conjunction.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Predicate {
    /// An engine-native query supplied by the caller, passed through untouched.
    Native(String),
    /// `reference == value`
    Equals { reference: ReferenceSpec, value: Value },
}

#[derive(Debug)]
enum Node {
    Leaf(Predicate),
    And(Constraint, Constraint),
}

/// A conjunction of predicates. The default constraint matches everything.
#[derive(Debug, Clone, Default)]
pub struct Constraint {
    root: Option<Arc<Node>>,
}

impl Constraint {
    /// Matches every record.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn native(query: impl Into<String>) -> Self {
        Self::leaf(Predicate::Native(query.into()))
    }

    pub fn equals(reference: ReferenceSpec, value: Value) -> Self {
        Self::leaf(Predicate::Equals { reference, value })
    }

    fn leaf(predicate: Predicate) -> Self {
        Self { root: Some(Arc::new(Node::Leaf(predicate))) }
    }

    pub(crate) fn and(&self, other: &Constraint) -> Self {
        match (&self.root, &other.root) {
            (None, _) => other.clone(),
            (_, None) => self.clone(),
            _ => Self { root: Some(Arc::new(Node::And(self.clone(), other.clone()))) },
        }
    }

    pub fn is_all(&self) -> bool {
        self.root.is_none()
    }

    /// All leaves of the conjunction, in the order they were added.
    pub fn predicates(&self) -> Vec<&Predicate> {
        let mut out = Vec::new();
        let mut stack: Vec<&Constraint> = vec![self];
        while let Some(c) = stack.pop() {
            match c.root.as_deref() {
                None => {}
                Some(Node::Leaf(p)) => out.push(p),
                Some(Node::And(lhs, rhs)) => {
                    // Right first so the left side is visited first.
                    stack.push(rhs);
                    stack.push(lhs);
                }
            }
        }
        out
    }

    /// The canonical form: sorted, de-duplicated leaves. Logical equality of
    /// two conjunctions is equality of their canonical forms.
    pub fn canonical(&self) -> Vec<Predicate> {
        let mut leaves: Vec<Predicate> = self.predicates().into_iter().cloned().collect();
        leaves.sort();
        leaves.dedup();
        leaves
    }

    /// Equality predicates only, as `(reference, value)` pairs.
    pub fn equalities(&self) -> impl Iterator<Item = (&ReferenceSpec, &Value)> {
        self.predicates().into_iter().filter_map(|p| match p {
            Predicate::Equals { reference, value } => Some((reference, value)),
            Predicate::Native(_) => None,
        })
    }

    /// Whether this constraint shares its root node with `other`.
    pub fn shares_root(&self, other: &Constraint) -> bool {
        match (&self.root, &other.root) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }
}

impl PartialEq for Constraint {
    fn eq(&self, other: &Self) -> bool {
        self.canonical() == other.canonical()
    }
}

impl Eq for Constraint {}

impl Serialize for Constraint {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.canonical().serialize(serializer)
    }
}
