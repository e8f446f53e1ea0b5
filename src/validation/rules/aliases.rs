//! Validation rule for alias naming and uniqueness.

use crate::error::QueryError;
use crate::spec::TypeDef;
use std::collections::HashSet;

fn is_defaulted(def: &TypeDef) -> bool {
    matches!(def, TypeDef::Measure(m) if m.alias_defaulted)
}

/// Every entry needs a non-empty alias, and authored aliases must be unique.
///
/// A measure whose alias fell back to its function name may share that name
/// with any other entry. The entries stay positionally distinct in array
/// output and are only rejected when keyed output is requested.
pub(crate) fn validate_aliases(type_defs: &[TypeDef]) -> Vec<QueryError> {
    let mut errors = Vec::new();
    let mut authored: HashSet<&str> = HashSet::new();
    let mut defaulted: HashSet<&str> = HashSet::new();

    for def in type_defs {
        let alias = def.alias();
        if alias.trim().is_empty() {
            errors.push(QueryError::InvalidSpecification("alias must not be empty".into()));
            continue;
        }
        if is_defaulted(def) {
            if authored.contains(alias) || !defaulted.insert(alias) {
                log::warn!("defaulted alias '{}' is shared with another entry", alias);
            }
        } else if !authored.insert(alias) {
            errors.push(QueryError::InvalidSpecification(format!(
                "alias '{}' is declared more than once",
                alias
            )));
        } else if defaulted.contains(alias) {
            log::warn!("defaulted alias '{}' is shared with another entry", alias);
        }
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::{column, compute, row, ReferenceSpec, ScalarType};

    fn reference(name: &str) -> ReferenceSpec {
        ReferenceSpec::element(name, ScalarType::Double)
    }

    #[test]
    fn test_authored_duplicate_rejected() {
        let defs: Vec<TypeDef> = vec![
            row("x", reference("a")).unwrap().into(),
            column("x", reference("b")).unwrap().into(),
        ];
        let errors = validate_aliases(&defs);
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0], QueryError::InvalidSpecification(_)));
    }

    #[test]
    fn test_defaulted_alias_may_shadow_authored() {
        let defs: Vec<TypeDef> = vec![
            compute(Some("avg"), "max", vec![reference("a")], vec![]).unwrap().into(),
            compute(None, "avg", vec![reference("a")], vec![]).unwrap().into(),
            row("sum", reference("b")).unwrap().into(),
            compute(None, "sum", vec![reference("a")], vec![]).unwrap().into(),
        ];
        assert!(validate_aliases(&defs).is_empty());
    }

    #[test]
    fn test_authored_duplicate_behind_default_rejected() {
        let defs: Vec<TypeDef> = vec![
            compute(None, "avg", vec![reference("a")], vec![]).unwrap().into(),
            row("avg", reference("b")).unwrap().into(),
            column("avg", reference("c")).unwrap().into(),
        ];
        assert_eq!(validate_aliases(&defs).len(), 1);
    }

    #[test]
    fn test_defaulted_duplicates_tolerated() {
        let defs: Vec<TypeDef> = vec![
            compute(None, "avg", vec![reference("a")], vec![]).unwrap().into(),
            compute(None, "avg", vec![reference("b")], vec![]).unwrap().into(),
        ];
        assert!(validate_aliases(&defs).is_empty());
    }
}
