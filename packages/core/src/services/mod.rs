//! Data Object Services
//!
//! This module contains the services built on the data object model:
//!
//! - `DataObjectInventory` - Type name registry and attribute descriptions
//! - `DataObjectMapper` - Serialization contract
//! - `JsonDataObjectMapper` - serde_json implementation of the mapper
//! - `DataObjectHelper` - Attribute accessors, cloning and rendering
//!
//! Services never own entities; they read from or produce `DoEntity` values.

pub mod error;
pub mod helper;
pub mod inventory;
pub mod mapper;

pub use error::MapperError;
pub use helper::DataObjectHelper;
pub use inventory::{AttributeDescriptions, DataObjectInventory};
pub use mapper::{DataObjectMapper, JsonDataObjectMapper};
