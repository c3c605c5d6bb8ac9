//! Typed Data Objects
//!
//! A typed data object is a thin wrapper around a [`DoEntity`] exposing named
//! accessors for its attributes, while the underlying storage stays the
//! universal entity.
//!
//! Types describe themselves through the [`DataObject`] trait:
//!
//! - `TYPE_NAME` - optional declared type name (wire/schema identity)
//! - `parent_type()` - the data object type this one extends, if any
//! - `attribute_descriptors()` - the declared attributes
//!
//! [`DataObjectType`] is the runtime handle built from that trait; the
//! inventory keys its registry by it.
//!
//! # Examples
//!
//! ```rust
//! use dataobject_core::models::{
//!     AttributeDescriptor, DataObject, DataObjectType, DoEntity, ValueAttribute,
//! };
//!
//! #[derive(Debug, Clone, Default)]
//! pub struct ProjectDo(DoEntity);
//!
//! impl ProjectDo {
//!     pub fn name(&mut self) -> ValueAttribute<'_, String> {
//!         self.0.do_value("name")
//!     }
//! }
//!
//! impl DataObject for ProjectDo {
//!     const TYPE_NAME: Option<&'static str> = Some("Project");
//!
//!     fn attribute_descriptors() -> Vec<AttributeDescriptor> {
//!         vec![AttributeDescriptor::value::<String>("name")]
//!     }
//!
//!     fn from_entity(entity: DoEntity) -> Self { Self(entity) }
//!     fn as_entity(&self) -> &DoEntity { &self.0 }
//!     fn as_entity_mut(&mut self) -> &mut DoEntity { &mut self.0 }
//!     fn into_entity(self) -> DoEntity { self.0 }
//! }
//!
//! let mut project = ProjectDo::default();
//! project.name().set("Apollo".to_string())?;
//! assert_eq!(project.name().get()?, Some("Apollo".to_string()));
//! assert_eq!(DataObjectType::of::<ProjectDo>().declared_type_name(), Some("Project"));
//! # Ok::<(), dataobject_core::models::DataObjectError>(())
//! ```

use crate::models::{AttributeDescriptor, DoEntity};
use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A typed view over a [`DoEntity`]
pub trait DataObject: Sized + 'static {
    /// Declared type name, `None` if the type does not declare one
    const TYPE_NAME: Option<&'static str> = None;

    /// The data object type this type extends
    fn parent_type() -> Option<DataObjectType> {
        None
    }

    /// Attributes declared by this type (not including the parent's)
    fn attribute_descriptors() -> Vec<AttributeDescriptor> {
        Vec::new()
    }

    fn from_entity(entity: DoEntity) -> Self;

    fn as_entity(&self) -> &DoEntity;

    fn as_entity_mut(&mut self) -> &mut DoEntity;

    fn into_entity(self) -> DoEntity;
}

impl DataObject for DoEntity {
    fn from_entity(entity: DoEntity) -> Self {
        entity
    }

    fn as_entity(&self) -> &DoEntity {
        self
    }

    fn as_entity_mut(&mut self) -> &mut DoEntity {
        self
    }

    fn into_entity(self) -> DoEntity {
        self
    }
}

/// Runtime descriptor of a [`DataObject`] type
///
/// Equality and hashing use the Rust type identity only.
#[derive(Clone, Copy)]
pub struct DataObjectType {
    type_id: TypeId,
    type_path: &'static str,
    declared_type_name: Option<&'static str>,
    parent: fn() -> Option<DataObjectType>,
    attributes: fn() -> Vec<AttributeDescriptor>,
}

impl DataObjectType {
    /// Descriptor for `T`
    pub fn of<T: DataObject>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_path: std::any::type_name::<T>(),
            declared_type_name: T::TYPE_NAME,
            parent: T::parent_type,
            attributes: T::attribute_descriptors,
        }
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Fully qualified Rust type path
    pub fn type_path(&self) -> &'static str {
        self.type_path
    }

    /// Rust type name without module path or generic arguments
    pub fn simple_name(&self) -> &'static str {
        let without_generics = self
            .type_path
            .split_once('<')
            .map_or(self.type_path, |(head, _)| head);
        without_generics
            .rsplit("::")
            .next()
            .unwrap_or(without_generics)
    }

    /// Type name declared by this type itself (the parent chain is not consulted)
    pub fn declared_type_name(&self) -> Option<&'static str> {
        self.declared_type_name
    }

    pub fn parent(&self) -> Option<DataObjectType> {
        (self.parent)()
    }

    /// Attributes declared by this type itself
    pub fn declared_attributes(&self) -> Vec<AttributeDescriptor> {
        (self.attributes)()
    }

    /// This type followed by its parent chain, nearest first
    pub fn ancestors(&self) -> impl Iterator<Item = DataObjectType> {
        std::iter::successors(Some(*self), DataObjectType::parent)
    }

    /// Whether `self` is `other` or extends it
    ///
    /// Every data object type is assignable to [`DoEntity`].
    pub fn is_assignable_to(&self, other: &DataObjectType) -> bool {
        other.is::<DoEntity>() || self.ancestors().any(|ty| ty == *other)
    }

    pub fn is<T: DataObject>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }
}

impl PartialEq for DataObjectType {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for DataObjectType {}

impl Hash for DataObjectType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_id.hash(state);
    }
}

impl fmt::Debug for DataObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataObjectType")
            .field("type_path", &self.type_path)
            .field("declared_type_name", &self.declared_type_name)
            .finish()
    }
}

impl fmt::Display for DataObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct BaseDo(DoEntity);

    impl DataObject for BaseDo {
        const TYPE_NAME: Option<&'static str> = Some("Base");

        fn from_entity(entity: DoEntity) -> Self {
            Self(entity)
        }
        fn as_entity(&self) -> &DoEntity {
            &self.0
        }
        fn as_entity_mut(&mut self) -> &mut DoEntity {
            &mut self.0
        }
        fn into_entity(self) -> DoEntity {
            self.0
        }
    }

    #[derive(Debug, Default)]
    struct DerivedDo(DoEntity);

    impl DataObject for DerivedDo {
        fn parent_type() -> Option<DataObjectType> {
            Some(DataObjectType::of::<BaseDo>())
        }
        fn from_entity(entity: DoEntity) -> Self {
            Self(entity)
        }
        fn as_entity(&self) -> &DoEntity {
            &self.0
        }
        fn as_entity_mut(&mut self) -> &mut DoEntity {
            &mut self.0
        }
        fn into_entity(self) -> DoEntity {
            self.0
        }
    }

    #[test]
    fn test_simple_name_strips_path() {
        assert_eq!(DataObjectType::of::<BaseDo>().simple_name(), "BaseDo");
        assert_eq!(DataObjectType::of::<DoEntity>().simple_name(), "DoEntity");
    }

    #[test]
    fn test_ancestors_walk_parent_chain() {
        let derived = DataObjectType::of::<DerivedDo>();
        let chain: Vec<&str> = derived.ancestors().map(|t| t.simple_name()).collect();
        assert_eq!(chain, vec!["DerivedDo", "BaseDo"]);
        assert!(derived.is_assignable_to(&DataObjectType::of::<BaseDo>()));
        assert!(!DataObjectType::of::<BaseDo>().is_assignable_to(&derived));
        assert!(derived.is_assignable_to(&DataObjectType::of::<DoEntity>()));
    }

    #[test]
    fn test_identity_by_type() {
        assert_eq!(DataObjectType::of::<BaseDo>(), DataObjectType::of::<BaseDo>());
        assert_ne!(DataObjectType::of::<BaseDo>(), DataObjectType::of::<DerivedDo>());
        assert!(DataObjectType::of::<BaseDo>().is::<BaseDo>());
        assert_eq!(DataObjectType::of::<DerivedDo>().declared_type_name(), None);
    }
}
