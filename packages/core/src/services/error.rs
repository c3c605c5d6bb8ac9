//! Service Layer Error Types
//!
//! This module defines error types for mapper and helper operations,
//! wrapping JSON failures and data object model errors.

use crate::models::DataObjectError;
use thiserror::Error;

/// Mapper operation errors
#[derive(Error, Debug)]
pub enum MapperError {
    /// JSON parsing or writing failed
    #[error("JSON processing failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Data object model rejected an operation
    #[error("Data object error: {0}")]
    DataObject(#[from] DataObjectError),

    /// Document root is not a JSON object
    #[error("Expected a JSON object, found {found}")]
    NotAnObject { found: &'static str },

    /// Type name is not registered in the inventory
    #[error("Unknown type name: {type_name}")]
    UnknownTypeName { type_name: String },

    /// Resolved type is not the requested type or a descendant of it
    #[error("Type '{type_name}' ({actual}) is not assignable to {expected}")]
    UnexpectedType {
        type_name: String,
        actual: String,
        expected: String,
    },

    /// NaN and infinite doubles have no JSON representation
    #[error("Attribute '{attribute}' holds non-finite number {value}")]
    NonFiniteNumber { attribute: String, value: f64 },

    /// Mapper configuration is invalid
    #[error("Invalid mapper configuration: {0}")]
    InvalidConfig(String),
}

impl MapperError {
    /// Create an unknown type name error
    pub fn unknown_type_name(type_name: impl Into<String>) -> Self {
        Self::UnknownTypeName {
            type_name: type_name.into(),
        }
    }

    /// Create a not-an-object error from the offending JSON value
    pub fn not_an_object(value: &serde_json::Value) -> Self {
        let found = match value {
            serde_json::Value::Null => "null",
            serde_json::Value::Bool(_) => "boolean",
            serde_json::Value::Number(_) => "number",
            serde_json::Value::String(_) => "string",
            serde_json::Value::Array(_) => "array",
            serde_json::Value::Object(_) => "object",
        };
        Self::NotAnObject { found }
    }
}
