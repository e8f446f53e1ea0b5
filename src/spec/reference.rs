//! Opaque handles to attribute domains in the backing index.
//!
//! A `ReferenceSpec` is created by the embedding application and never
//! resolved here. It only carries enough metadata for the arity and
//! numeric-type checks that guard aggregate evaluation.
use serde::{Deserialize, Serialize};

/// The lexicon kind a reference points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReferenceKind {
    Collection,
    Uri,
    Element,
    ElementAttribute,
    Field,
    Path,
    GeospatialElement,
    GeospatialElementChild,
    GeospatialElementPair,
    GeospatialAttributePair,
    GeospatialPath,
}

impl ReferenceKind {
    pub fn is_geospatial(&self) -> bool {
        matches!(
            self,
            ReferenceKind::GeospatialElement
                | ReferenceKind::GeospatialElementChild
                | ReferenceKind::GeospatialElementPair
                | ReferenceKind::GeospatialAttributePair
                | ReferenceKind::GeospatialPath
        )
    }
}

/// The scalar type of the values stored under a reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScalarType {
    String,
    AnyUri,
    Int,
    UnsignedInt,
    Long,
    UnsignedLong,
    Float,
    Double,
    Decimal,
    Date,
    DateTime,
    Time,
    Duration,
    Point,
}

impl ScalarType {
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            ScalarType::Int
                | ScalarType::UnsignedInt
                | ScalarType::Long
                | ScalarType::UnsignedLong
                | ScalarType::Float
                | ScalarType::Double
                | ScalarType::Decimal
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ReferenceSpec {
    /// Identifier of the attribute domain (element QName, field name, path expression, ...).
    pub name: String,
    pub kind: ReferenceKind,
    pub scalar_type: ScalarType,
}

impl ReferenceSpec {
    pub fn new(name: impl Into<String>, kind: ReferenceKind, scalar_type: ScalarType) -> Self {
        Self { name: name.into(), kind, scalar_type }
    }

    pub fn element(name: impl Into<String>, scalar_type: ScalarType) -> Self {
        Self::new(name, ReferenceKind::Element, scalar_type)
    }

    pub fn field(name: impl Into<String>, scalar_type: ScalarType) -> Self {
        Self::new(name, ReferenceKind::Field, scalar_type)
    }

    pub fn path(expr: impl Into<String>, scalar_type: ScalarType) -> Self {
        Self::new(expr, ReferenceKind::Path, scalar_type)
    }

    pub fn collection() -> Self {
        Self::new("collection", ReferenceKind::Collection, ScalarType::String)
    }

    pub fn uri() -> Self {
        Self::new("uri", ReferenceKind::Uri, ScalarType::String)
    }

    pub fn is_numeric(&self) -> bool {
        self.scalar_type.is_numeric()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(ScalarType::Int, true)]
    #[case(ScalarType::Double, true)]
    #[case(ScalarType::Decimal, true)]
    #[case(ScalarType::String, false)]
    #[case(ScalarType::Date, false)]
    #[case(ScalarType::Point, false)]
    fn test_numeric_flag(#[case] scalar_type: ScalarType, #[case] numeric: bool) {
        let reference = ReferenceSpec::element("salary", scalar_type);
        assert_eq!(reference.is_numeric(), numeric);
    }

    #[test]
    fn test_collection_and_uri_lexicons_are_strings() {
        assert!(!ReferenceSpec::collection().is_numeric());
        assert!(!ReferenceSpec::uri().is_numeric());
        assert!(!ReferenceSpec::uri().kind.is_geospatial());
    }
}
