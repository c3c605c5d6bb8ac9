//! Mapper Configuration
//!
//! Settings for the JSON data object mapper, loadable through serde with
//! defaults for every missing field.

use crate::models::format::DEFAULT_DATE_PATTERN;
use serde::{Deserialize, Serialize};

/// Default name of the JSON attribute carrying the type name
pub const DEFAULT_TYPE_ATTRIBUTE_NAME: &str = "_type";

/// Configuration for [`JsonDataObjectMapper`](crate::services::JsonDataObjectMapper)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapperConfig {
    /// JSON attribute holding the type name of typed data objects
    pub type_attribute_name: String,

    /// chrono pattern used to write dates as text
    pub date_pattern: String,

    /// Emit indented JSON
    pub pretty_print: bool,
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self {
            type_attribute_name: DEFAULT_TYPE_ATTRIBUTE_NAME.to_string(),
            date_pattern: DEFAULT_DATE_PATTERN.to_string(),
            pretty_print: false,
        }
    }
}

impl MapperConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.type_attribute_name.is_empty() {
            return Err("type_attribute_name cannot be empty".to_string());
        }

        if self.date_pattern.trim().is_empty() {
            return Err("date_pattern cannot be empty".to_string());
        }

        Ok(())
    }
}
