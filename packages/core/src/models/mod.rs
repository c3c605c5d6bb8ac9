//! Data Models
//!
//! This module contains the data object model:
//!
//! - `Value` - Dynamically typed attribute payload
//! - `DoValue` / `DoList` / `DoNode` - Attribute nodes with creation state
//! - `DoEntity` - Universal ordered attribute container
//! - `DataObject` - Typed wrappers built on the entity foundation
//! - `AttributeDescriptor` - Declared attribute metadata for the inventory
//!
//! Typed data objects never own storage of their own; every attribute lives in
//! the wrapped `DoEntity`.

mod builder;
mod coerce;
mod data_object;
mod descriptor;
mod entity;
mod error;
pub mod format;
mod locale;
mod node;
mod value;

pub use builder::DoEntityBuilder;
pub use data_object::{DataObject, DataObjectType};
pub use descriptor::{AttributeDescriptor, ValueKind};
pub use entity::{DoEntity, ListAttribute, ValueAttribute};
pub use error::DataObjectError;
pub use locale::{Locale, LocaleParseError};
pub use node::{DoList, DoNode, DoValue, NodeKind};
pub use value::{FromValue, Value};
