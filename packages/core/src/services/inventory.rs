//! Data Object Inventory
//!
//! Registry of typed data objects: maps type names to data object types and
//! back, and describes the attributes each type declares.
//!
//! ## Architecture
//!
//! - **Explicit Registration**: types are registered once, at startup, through
//!   `&mut self`; afterwards the inventory is shared read-only
//! - **Type Name Derivation**: a type without its own name inherits the nearest
//!   name of its parent chain, falling back to the Rust type name
//! - **Attribute Discovery**: descriptors are merged along the parent chain
//!   (parents first, children override) and cached per type
//!
//! ## Example Usage
//!
//! ```rust
//! # use dataobject_core::models::{DataObject, DataObjectType, DoEntity};
//! # use dataobject_core::services::DataObjectInventory;
//! #[derive(Debug, Default)]
//! struct FooDo(DoEntity);
//!
//! impl DataObject for FooDo {
//!     const TYPE_NAME: Option<&'static str> = Some("Foo");
//!     fn from_entity(entity: DoEntity) -> Self { Self(entity) }
//!     fn as_entity(&self) -> &DoEntity { &self.0 }
//!     fn as_entity_mut(&mut self) -> &mut DoEntity { &mut self.0 }
//!     fn into_entity(self) -> DoEntity { self.0 }
//! }
//!
//! let mut inventory = DataObjectInventory::new();
//! inventory.register::<FooDo>()?;
//!
//! let foo = DataObjectType::of::<FooDo>();
//! assert_eq!(inventory.to_type_name(Some(&foo)), Some("Foo".to_string()));
//! assert_eq!(inventory.from_type_name("Foo"), Some(foo));
//! assert_eq!(inventory.from_type_name("bar"), None);
//! # Ok::<(), dataobject_core::models::DataObjectError>(())
//! ```

use crate::models::{AttributeDescriptor, DataObject, DataObjectError, DataObjectType};
use indexmap::IndexMap;
use parking_lot::RwLock;
use std::any::TypeId;
use std::collections::HashMap;
use std::sync::Arc;

/// Attribute descriptors of one type keyed by attribute name
pub type AttributeDescriptions = Arc<IndexMap<String, AttributeDescriptor>>;

/// Registry of data object types and their type names
#[derive(Debug, Default)]
pub struct DataObjectInventory {
    /// Every registered type
    registered: HashMap<TypeId, DataObjectType>,
    /// Type name → type
    type_name_to_class: HashMap<String, DataObjectType>,
    /// Type → its own registered type name
    class_to_type_name: HashMap<TypeId, String>,
    /// Merged attribute descriptors, filled on first lookup
    attribute_cache: RwLock<HashMap<TypeId, AttributeDescriptions>>,
}

impl DataObjectInventory {
    /// Create an empty inventory
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the data object type `T`
    pub fn register<T: DataObject>(&mut self) -> Result<(), DataObjectError> {
        self.register_class(DataObjectType::of::<T>())
    }

    /// Register a data object type
    ///
    /// Registering a type twice, or two types with the same type name, is an
    /// error. A declared but empty type name is skipped with a warning; the type
    /// itself is still registered.
    pub fn register_class(&mut self, ty: DataObjectType) -> Result<(), DataObjectError> {
        if self.registered.contains_key(&ty.type_id()) {
            return Err(DataObjectError::DuplicateRegistration {
                type_path: ty.type_path().to_string(),
            });
        }

        match ty.declared_type_name() {
            Some("") => {
                tracing::warn!(
                    "{} declares an empty type name, type name registration skipped",
                    ty.type_path()
                );
            }
            Some(type_name) => {
                if let Some(existing) = self.type_name_to_class.get(type_name) {
                    return Err(DataObjectError::DuplicateTypeName {
                        type_name: type_name.to_string(),
                        type_path: ty.type_path().to_string(),
                        existing: existing.type_path().to_string(),
                    });
                }
                self.type_name_to_class.insert(type_name.to_string(), ty);
                self.class_to_type_name
                    .insert(ty.type_id(), type_name.to_string());
                tracing::debug!(
                    "Registered type name '{}' for {}",
                    type_name,
                    ty.type_path()
                );
            }
            None => {}
        }

        self.registered.insert(ty.type_id(), ty);
        tracing::debug!("Registered data object type {}", ty.type_path());
        Ok(())
    }

    pub fn is_registered(&self, ty: &DataObjectType) -> bool {
        self.registered.contains_key(&ty.type_id())
    }

    /// Type name for `ty`, `None` only when no type is given
    ///
    /// Unregistered types still get a name: the nearest declared name of the
    /// parent chain, else the simple Rust type name (see [`Self::type_name`]).
    pub fn to_type_name(&self, ty: Option<&DataObjectType>) -> Option<String> {
        ty.map(|ty| self.type_name(ty))
    }

    /// Type name for `ty`
    ///
    /// Walks the parent chain for a registered or declared type name and falls
    /// back to the simple Rust type name.
    pub fn type_name(&self, ty: &DataObjectType) -> String {
        self.declared_type_name(ty)
            .unwrap_or_else(|| ty.simple_name())
            .to_string()
    }

    /// Nearest type name declared along the parent chain of `ty`, without fallback
    pub fn declared_type_name(&self, ty: &DataObjectType) -> Option<&str> {
        ty.ancestors().find_map(|ancestor| {
            self.class_to_type_name
                .get(&ancestor.type_id())
                .map(String::as_str)
                .or_else(|| ancestor.declared_type_name().filter(|name| !name.is_empty()))
        })
    }

    /// Registered type for a type name
    pub fn from_type_name(&self, type_name: &str) -> Option<DataObjectType> {
        self.type_name_to_class.get(type_name).copied()
    }

    /// All registered type names
    pub fn type_name_to_class_map(&self) -> &HashMap<String, DataObjectType> {
        &self.type_name_to_class
    }

    /// All attributes of `ty`, including inherited ones, in declaration order
    pub fn attributes_description(&self, ty: &DataObjectType) -> AttributeDescriptions {
        if let Some(cached) = self.attribute_cache.read().get(&ty.type_id()) {
            return Arc::clone(cached);
        }

        let chain: Vec<DataObjectType> = ty.ancestors().collect();
        let mut attributes = IndexMap::new();
        for ancestor in chain.iter().rev() {
            for descriptor in ancestor.declared_attributes() {
                attributes.insert(descriptor.name().to_string(), descriptor);
            }
        }
        tracing::debug!(
            "Discovered {} attributes for {}",
            attributes.len(),
            ty.type_path()
        );

        let mut cache = self.attribute_cache.write();
        Arc::clone(
            cache
                .entry(ty.type_id())
                .or_insert_with(|| Arc::new(attributes)),
        )
    }

    /// Descriptor of a single attribute of `ty`
    pub fn attribute_description(
        &self,
        ty: &DataObjectType,
        attribute_name: &str,
    ) -> Option<AttributeDescriptor> {
        self.attributes_description(ty).get(attribute_name).cloned()
    }

    /// Whether any type has been registered
    pub fn is_populated(&self) -> bool {
        !self.registered.is_empty()
    }

    /// Number of registered types
    pub fn len(&self) -> usize {
        self.registered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registered.is_empty()
    }
}

#[cfg(test)]
#[path = "inventory_test.rs"]
mod inventory_test;
