//! Property definition validation errors.

use std::fmt;

use crate::PropertyKind;

/// Result type for schema operations.
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Errors that can occur when building or validating a property set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// Property names must be non-empty.
    EmptyName,

    /// Duplicate property name in a set.
    DuplicateProperty { name: String },

    /// A declared default does not match the declared kind.
    DefaultKindMismatch {
        name: String,
        expected: PropertyKind,
        found: PropertyKind,
    },
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "property name is empty"),
            Self::DuplicateProperty { name } => write!(f, "duplicate property {name:?}"),
            Self::DefaultKindMismatch {
                name,
                expected,
                found,
            } => write!(
                f,
                "default for {name:?} is a {} but the property is a {}",
                found.name(),
                expected.name()
            ),
        }
    }
}

impl std::error::Error for SchemaError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_mentions_property() {
        let err = SchemaError::DuplicateProperty {
            name: "font".to_owned(),
        };
        assert!(err.to_string().contains("font"));
    }

    #[test]
    fn display_kind_mismatch() {
        let err = SchemaError::DefaultKindMismatch {
            name: "enabled".to_owned(),
            expected: PropertyKind::Bool,
            found: PropertyKind::Int,
        };
        let msg = err.to_string();
        assert!(msg.contains("bool"));
        assert!(msg.contains("int"));
    }
}
