//! Builds conjunctions of equality predicates over a base constraint.
use super::Constraint;
use crate::spec::DimensionSpec;
use crate::value::Value;

pub struct ConstraintBuilder;

impl ConstraintBuilder {
    /// `base AND dimension.reference == value`
    pub fn extend(base: &Constraint, dimension: &DimensionSpec, value: &Value) -> Constraint {
        base.and(&Constraint::equals(dimension.reference.clone(), value.clone()))
    }

    /// Adds one equality per dimension, positionally aligned with `values`.
    pub fn extend_all(base: &Constraint, dimensions: &[DimensionSpec], values: &[Value]) -> Constraint {
        debug_assert_eq!(dimensions.len(), values.len());
        dimensions
            .iter()
            .zip(values)
            .fold(base.clone(), |acc, (d, v)| Self::extend(&acc, d, v))
    }

    /// `c1 AND c2`
    pub fn combine(c1: &Constraint, c2: &Constraint) -> Constraint {
        c1.and(c2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraint::Predicate;
    use crate::spec::{column, row, ReferenceSpec, ScalarType};

    fn position() -> DimensionSpec {
        row("position", ReferenceSpec::element("position", ScalarType::String)).unwrap()
    }

    fn company() -> DimensionSpec {
        column("company", ReferenceSpec::element("company", ScalarType::String)).unwrap()
    }

    #[test]
    fn test_extend_does_not_mutate_base() {
        let base = Constraint::native("cts:collection-query('employees')");
        let extended = ConstraintBuilder::extend(&base, &position(), &Value::from("Engineer"));

        assert_eq!(base.predicates().len(), 1);
        assert_eq!(extended.predicates().len(), 2);
        assert_eq!(extended.equalities().count(), 1);
    }

    #[test]
    fn test_predicate_order_is_unobservable() {
        let base = Constraint::all();
        let a = ConstraintBuilder::extend_all(
            &base,
            &[position(), company()],
            &[Value::from("Engineer"), Value::from("Acme")],
        );
        let b = ConstraintBuilder::extend_all(
            &base,
            &[company(), position()],
            &[Value::from("Acme"), Value::from("Engineer")],
        );
        assert_eq!(a, b);
    }

    #[test]
    fn test_combine_is_associative_and_commutative() {
        let p = Constraint::equals(position().reference, Value::from("Engineer"));
        let c = Constraint::equals(company().reference, Value::from("Acme"));
        let n = Constraint::native("q");

        let left = ConstraintBuilder::combine(&ConstraintBuilder::combine(&p, &c), &n);
        let right = ConstraintBuilder::combine(&n, &ConstraintBuilder::combine(&c, &p));
        assert_eq!(left, right);
    }

    #[test]
    fn test_match_all_is_identity() {
        let p = Constraint::equals(position().reference, Value::from("Engineer"));
        let combined = ConstraintBuilder::combine(&Constraint::all(), &p);
        assert!(combined.shares_root(&p));
        assert!(Constraint::all().is_all());
        assert!(Constraint::all().predicates().is_empty());
    }

    #[test]
    fn test_branches_share_ancestors() {
        let base = ConstraintBuilder::extend(&Constraint::all(), &position(), &Value::from("Engineer"));
        let left = ConstraintBuilder::extend(&base, &company(), &Value::from("Acme"));
        let right = ConstraintBuilder::extend(&base, &company(), &Value::from("Globex"));

        assert_ne!(left, right);
        let leaves = left.predicates();
        assert_eq!(
            leaves[0],
            &Predicate::Equals { reference: position().reference, value: Value::from("Engineer") }
        );
    }
}
