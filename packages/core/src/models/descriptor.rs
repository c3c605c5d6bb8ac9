//! Attribute Descriptors
//!
//! Declarative metadata about the attributes of a typed data object: the
//! attribute name, node kind, value type, the accessor that exposes it and an
//! optional value format pattern (for example a date pattern).
//!
//! Descriptors are returned by [`DataObject::attribute_descriptors`] and
//! collected (with the parent chain) by the inventory.
//!
//! [`DataObject::attribute_descriptors`]: crate::models::DataObject::attribute_descriptors

use crate::models::{DataObject, DataObjectType, FromValue, NodeKind};
use std::fmt;

/// Classification of attribute values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// Untyped value (lists, maps, any value)
    Object,
    String,
    Boolean,
    Integer,
    Double,
    BigInteger,
    Decimal,
    Date,
    Uuid,
    Locale,
    /// Nested data object of the given type
    Entity(DataObjectType),
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueKind::Object => f.write_str("Object"),
            ValueKind::String => f.write_str("String"),
            ValueKind::Boolean => f.write_str("Boolean"),
            ValueKind::Integer => f.write_str("Integer"),
            ValueKind::Double => f.write_str("Double"),
            ValueKind::BigInteger => f.write_str("BigInteger"),
            ValueKind::Decimal => f.write_str("Decimal"),
            ValueKind::Date => f.write_str("Date"),
            ValueKind::Uuid => f.write_str("UUID"),
            ValueKind::Locale => f.write_str("Locale"),
            ValueKind::Entity(ty) => f.write_str(ty.simple_name()),
        }
    }
}

/// Metadata of one declared attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeDescriptor {
    name: String,
    node_kind: NodeKind,
    value_kind: ValueKind,
    accessor: &'static str,
    format_pattern: Option<String>,
}

impl AttributeDescriptor {
    fn new(accessor: &'static str, node_kind: NodeKind, value_kind: ValueKind) -> Self {
        Self {
            name: accessor.to_string(),
            node_kind,
            value_kind,
            accessor,
            format_pattern: None,
        }
    }

    /// Scalar attribute exposed by `accessor`, named after it
    pub fn value<T: FromValue>(accessor: &'static str) -> Self {
        Self::new(accessor, NodeKind::Value, T::value_kind())
    }

    /// List attribute with elements of type `T`
    pub fn list<T: FromValue>(accessor: &'static str) -> Self {
        Self::new(accessor, NodeKind::List, T::value_kind())
    }

    /// Nested data object attribute
    pub fn entity<T: DataObject>(accessor: &'static str) -> Self {
        Self::new(accessor, NodeKind::Value, ValueKind::Entity(DataObjectType::of::<T>()))
    }

    /// List of nested data objects
    pub fn entity_list<T: DataObject>(accessor: &'static str) -> Self {
        Self::new(accessor, NodeKind::List, ValueKind::Entity(DataObjectType::of::<T>()))
    }

    /// Override the attribute name (defaults to the accessor name)
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Attach a value format pattern
    pub fn with_format(mut self, pattern: impl Into<String>) -> Self {
        self.format_pattern = Some(pattern.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn node_kind(&self) -> NodeKind {
        self.node_kind
    }

    pub fn value_kind(&self) -> ValueKind {
        self.value_kind
    }

    pub fn accessor(&self) -> &'static str {
        self.accessor
    }

    pub fn format_pattern(&self) -> Option<&str> {
        self.format_pattern.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DoEntity;
    use chrono::NaiveDateTime;

    #[test]
    fn test_name_defaults_to_accessor() {
        let descriptor = AttributeDescriptor::value::<String>("title");
        assert_eq!(descriptor.name(), "title");
        assert_eq!(descriptor.accessor(), "title");
        assert_eq!(descriptor.node_kind(), NodeKind::Value);
        assert_eq!(descriptor.value_kind(), ValueKind::String);
        assert_eq!(descriptor.format_pattern(), None);
    }

    #[test]
    fn test_name_override_and_format() {
        let descriptor = AttributeDescriptor::value::<NaiveDateTime>("due_date")
            .with_name("dueDate")
            .with_format("%Y-%m-%d");
        assert_eq!(descriptor.name(), "dueDate");
        assert_eq!(descriptor.accessor(), "due_date");
        assert_eq!(descriptor.value_kind(), ValueKind::Date);
        assert_eq!(descriptor.format_pattern(), Some("%Y-%m-%d"));
    }

    #[test]
    fn test_entity_descriptors() {
        let single = AttributeDescriptor::entity::<DoEntity>("owner");
        assert_eq!(single.node_kind(), NodeKind::Value);
        assert_eq!(single.value_kind().to_string(), "DoEntity");

        let many = AttributeDescriptor::entity_list::<DoEntity>("members");
        assert_eq!(many.node_kind(), NodeKind::List);
        assert_eq!(many.value_kind(), ValueKind::Entity(DataObjectType::of::<DoEntity>()));
    }
}
