//! Data Object Error Types
//!
//! Errors raised by entities, nodes, typed getters and the inventory.
//!
//! Two families are distinguished:
//!
//! - **Assertion errors** signal programming mistakes: empty attribute names,
//!   changing an attribute from scalar to list (or back), reading a value as a
//!   type it can never be coerced to, registering a type twice.
//! - **Format errors** ([`DataObjectError::InvalidFormat`]) signal text that
//!   does not parse into the requested type (dates, UUIDs, locale tags).
//!
//! Missing attributes and null values are never errors; they surface as `None`
//! or as an empty list.

use crate::models::NodeKind;
use thiserror::Error;

/// Errors raised by the data object model
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DataObjectError {
    /// Attribute names must be non-empty
    #[error("Attribute name must not be empty")]
    InvalidAttributeName,

    /// An attribute established as one node kind cannot be re-put as another
    #[error("Attribute '{name}' is a {existing} node and cannot be changed to a {requested} node")]
    NodeKindChange {
        name: String,
        existing: NodeKind,
        requested: NodeKind,
    },

    /// A node of a specific kind was requested but the attribute holds another kind
    #[error("Attribute '{name}' is a {actual} node, expected a {expected} node")]
    NodeKindMismatch {
        name: String,
        expected: NodeKind,
        actual: NodeKind,
    },

    /// A node was required to exist
    #[error("Attribute '{name}' does not exist")]
    MissingNode { name: String },

    /// Stored value is not assignable or coercible to the requested type
    #[error("Attribute '{name}' holds a value of type {actual} which cannot be read as {expected}")]
    TypeMismatch {
        name: String,
        expected: &'static str,
        actual: &'static str,
    },

    /// Text value could not be parsed into the requested type
    #[error("Attribute '{name}' value '{value}' is not a valid {expected}: {reason}")]
    InvalidFormat {
        name: String,
        expected: &'static str,
        value: String,
        reason: String,
    },

    /// List index outside `0..len`
    #[error("Index {index} out of bounds for list of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// The same data object type was registered twice
    #[error("{type_path} was already registered, register each type only once")]
    DuplicateRegistration { type_path: String },

    /// Two data object types declare the same type name
    #[error("{type_path} and {existing} have the same type name '{type_name}', use a unique type name")]
    DuplicateTypeName {
        type_name: String,
        type_path: String,
        existing: String,
    },
}

impl DataObjectError {
    /// Create a type mismatch error
    pub fn type_mismatch(name: impl Into<String>, expected: &'static str, actual: &'static str) -> Self {
        Self::TypeMismatch {
            name: name.into(),
            expected,
            actual,
        }
    }

    /// Create an invalid format error
    pub fn invalid_format(
        name: impl Into<String>,
        expected: &'static str,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidFormat {
            name: name.into(),
            expected,
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a missing node error
    pub fn missing_node(name: impl Into<String>) -> Self {
        Self::MissingNode { name: name.into() }
    }

    /// Whether this error belongs to the assertion family (programming error)
    ///
    /// Everything except [`DataObjectError::InvalidFormat`] and
    /// [`DataObjectError::IndexOutOfBounds`] is an assertion error.
    pub fn is_assertion(&self) -> bool {
        !matches!(self, Self::InvalidFormat { .. } | Self::IndexOutOfBounds { .. })
    }
}

pub type Result<T> = std::result::Result<T, DataObjectError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_families() {
        assert!(DataObjectError::InvalidAttributeName.is_assertion());
        assert!(DataObjectError::type_mismatch("a", "String", "Integer").is_assertion());
        assert!(!DataObjectError::invalid_format("a", "UUID", "x", "bad").is_assertion());
        assert!(!DataObjectError::IndexOutOfBounds { index: 3, len: 1 }.is_assertion());
    }

    #[test]
    fn test_error_messages() {
        let err = DataObjectError::NodeKindChange {
            name: "foo".to_string(),
            existing: NodeKind::List,
            requested: NodeKind::Value,
        };
        assert_eq!(
            err.to_string(),
            "Attribute 'foo' is a list node and cannot be changed to a value node"
        );

        let err = DataObjectError::type_mismatch("bar", "String", "Integer");
        assert_eq!(
            err.to_string(),
            "Attribute 'bar' holds a value of type Integer which cannot be read as String"
        );
    }
}
