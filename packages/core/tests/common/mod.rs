//! Shared fixtures for integration tests
//!
//! Typed data objects used across the integration suites plus a tracing
//! subscriber setup honouring `RUST_LOG`.

#![allow(dead_code)]

use dataobject_core::{
    AttributeDescriptor, DataObject, DataObjectError, DataObjectInventory, DataObjectType,
    DoEntity, ListAttribute, ValueAttribute,
};
use std::sync::Arc;

/// Install a fmt subscriber once per test binary
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}

macro_rules! entity_wrapper {
    ($name:ident) => {
        impl $name {
            pub fn new() -> Self {
                Self(DoEntity::new())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }
    };
}

/// Address value object, declared as `Address`
#[derive(Debug, Clone, PartialEq)]
pub struct AddressDo(DoEntity);
entity_wrapper!(AddressDo);

impl AddressDo {
    pub fn city(&mut self) -> ValueAttribute<'_, String> {
        self.0.do_value("city")
    }

    pub fn zip(&mut self) -> ValueAttribute<'_, String> {
        self.0.do_value("zip")
    }
}

impl DataObject for AddressDo {
    const TYPE_NAME: Option<&'static str> = Some("Address");

    fn attribute_descriptors() -> Vec<AttributeDescriptor> {
        vec![
            AttributeDescriptor::value::<String>("city"),
            AttributeDescriptor::value::<String>("zip"),
        ]
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

/// Person, declared as `Person`
#[derive(Debug, Clone, PartialEq)]
pub struct PersonDo(DoEntity);
entity_wrapper!(PersonDo);

impl PersonDo {
    pub fn name(&mut self) -> ValueAttribute<'_, String> {
        self.0.do_value("name")
    }

    pub fn age(&mut self) -> ValueAttribute<'_, i64> {
        self.0.do_value("age")
    }

    pub fn nicknames(&mut self) -> ListAttribute<'_, String> {
        self.0.do_list("nicknames")
    }

    pub fn address(&mut self) -> ValueAttribute<'_, DoEntity> {
        self.0.do_value("address")
    }
}

impl DataObject for PersonDo {
    const TYPE_NAME: Option<&'static str> = Some("Person");

    fn attribute_descriptors() -> Vec<AttributeDescriptor> {
        vec![
            AttributeDescriptor::value::<String>("name"),
            AttributeDescriptor::value::<i64>("age"),
            AttributeDescriptor::list::<String>("nicknames"),
            AttributeDescriptor::entity::<AddressDo>("address"),
        ]
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

/// Employee extends Person and declares its own name
#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeDo(DoEntity);
entity_wrapper!(EmployeeDo);

impl EmployeeDo {
    pub fn name(&mut self) -> ValueAttribute<'_, String> {
        self.0.do_value("name")
    }

    pub fn employee_number(&mut self) -> ValueAttribute<'_, i64> {
        self.0.do_value("employeeNumber")
    }
}

impl DataObject for EmployeeDo {
    const TYPE_NAME: Option<&'static str> = Some("Employee");

    fn parent_type() -> Option<DataObjectType> {
        Some(DataObjectType::of::<PersonDo>())
    }

    fn attribute_descriptors() -> Vec<AttributeDescriptor> {
        vec![AttributeDescriptor::value::<i64>("employee_number").with_name("employeeNumber")]
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

/// Contractor extends Person without declaring a type name
#[derive(Debug, Clone, PartialEq)]
pub struct ContractorDo(DoEntity);
entity_wrapper!(ContractorDo);

impl DataObject for ContractorDo {
    fn parent_type() -> Option<DataObjectType> {
        Some(DataObjectType::of::<PersonDo>())
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

/// Inventory with every fixture registered
pub fn inventory() -> Result<Arc<DataObjectInventory>, DataObjectError> {
    let mut inventory = DataObjectInventory::new();
    inventory.register::<AddressDo>()?;
    inventory.register::<PersonDo>()?;
    inventory.register::<EmployeeDo>()?;
    inventory.register::<ContractorDo>()?;
    Ok(Arc::new(inventory))
}
