//! Data Object Core
//!
//! This crate provides a dynamic data object model: self-describing property
//! containers for loosely structured business entities.
//!
//! # Architecture
//!
//! - **Universal Entity**: every data object is a `DoEntity`, an ordered map of
//!   attribute name to value or list node
//! - **Typed Wrappers**: typed data objects wrap an entity and expose named
//!   attribute handles
//! - **Inventory**: type names map to data object types and back, parent chains
//!   supply inherited names and attributes
//! - **Pluggable Mapping**: serialization goes through the `DataObjectMapper`
//!   trait, with a serde_json implementation included
//!
//! # Modules
//!
//! - [`models`] - Values, nodes, entities, builder and type descriptors
//! - [`services`] - Inventory, mapper and helper
//! - [`config`] - Mapper configuration

pub mod config;
pub mod models;
pub mod services;

// Re-export commonly used types
pub use config::MapperConfig;
pub use models::*;
pub use services::*;
