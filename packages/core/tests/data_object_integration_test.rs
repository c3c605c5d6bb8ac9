//! Integration tests for the data object model
//!
//! Tests cover:
//! - Typed data objects backed by entities
//! - Inventory registration, name resolution and attribute descriptions
//! - JSON mapping of typed and untyped objects
//! - Helper cloning and rendering through the JSON mapper

mod common;

use anyhow::Result;
use common::{AddressDo, ContractorDo, EmployeeDo, PersonDo};
use dataobject_core::{
    DataObject, DataObjectError, DataObjectHelper, DataObjectMapper, DataObjectType, DoEntity,
    JsonDataObjectMapper, MapperConfig, MapperError, NodeKind, Value, ValueKind,
};

fn mapper() -> Result<JsonDataObjectMapper> {
    common::init_tracing();
    Ok(JsonDataObjectMapper::new(common::inventory()?))
}

fn ada() -> Result<PersonDo> {
    let mut address = AddressDo::new();
    address.city().set("London")?;
    address.zip().set("W1")?;

    let mut person = PersonDo::new();
    person.name().set("Ada")?;
    person.age().set(36)?;
    person.nicknames().add("Countess")?;
    person.address().set(address.into_entity())?;
    Ok(person)
}

// =========================================================================
// Typed Data Object Tests
// =========================================================================

#[test]
fn test_typed_accessors_share_entity_storage() -> Result<()> {
    let mut person = ada()?;

    assert_eq!(person.name().get()?, Some("Ada".to_string()));
    assert_eq!(person.as_entity().get_integer("age")?, Some(36));
    assert_eq!(person.as_entity().get_string_list("nicknames")?, vec![Some("Countess".to_string())]);

    let address = person.as_entity().get_entity("address")?;
    assert_eq!(address.map(|a| a.get_string("city")), Some(Ok(Some("London"))));
    Ok(())
}

#[test]
fn test_attribute_handles_create_lazily() -> Result<()> {
    let mut person = PersonDo::new();
    assert!(!person.name().exists());
    assert_eq!(person.name().to_optional()?, None);
    assert!(!person.as_entity().has("name"));

    assert_eq!(person.name().get()?, None);
    assert!(person.as_entity().has("name"));
    assert_eq!(person.as_entity().get_node("name").map(|n| n.kind()), Some(NodeKind::Value));
    Ok(())
}

#[test]
fn test_wrong_kind_through_handle_is_rejected() -> Result<()> {
    let mut person = PersonDo::new();
    person.as_entity_mut().put("nicknames", "single")?;

    let err = person.nicknames().add("two").unwrap_err();
    assert!(matches!(err, DataObjectError::NodeKindChange { .. }));
    assert!(err.is_assertion());
    Ok(())
}

// =========================================================================
// Inventory Tests
// =========================================================================

#[test]
fn test_inventory_resolves_names_both_ways() -> Result<()> {
    let inventory = common::inventory()?;
    let employee = DataObjectType::of::<EmployeeDo>();

    assert_eq!(inventory.len(), 4);
    assert_eq!(inventory.to_type_name(Some(&employee)), Some("Employee".to_string()));
    assert_eq!(inventory.from_type_name("Person"), Some(DataObjectType::of::<PersonDo>()));
    assert_eq!(inventory.from_type_name("Missing"), None);
    assert_eq!(inventory.to_type_name(None), None);
    Ok(())
}

#[test]
fn test_inventory_inherits_name_from_parent() -> Result<()> {
    let inventory = common::inventory()?;
    let contractor = DataObjectType::of::<ContractorDo>();

    assert_eq!(inventory.type_name(&contractor), "Person");
    assert_eq!(inventory.declared_type_name(&contractor), Some("Person"));
    Ok(())
}

#[test]
fn test_inventory_merges_attribute_descriptions() -> Result<()> {
    let inventory = common::inventory()?;
    let attributes = inventory.attributes_description(&DataObjectType::of::<EmployeeDo>());

    let names: Vec<&str> = attributes.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["name", "age", "nicknames", "address", "employeeNumber"]);

    let address = inventory
        .attribute_description(&DataObjectType::of::<EmployeeDo>(), "address")
        .expect("inherited address attribute");
    assert_eq!(address.value_kind(), ValueKind::Entity(DataObjectType::of::<AddressDo>()));

    let number = &attributes["employeeNumber"];
    assert_eq!(number.accessor(), "employee_number");
    assert_eq!(number.node_kind(), NodeKind::Value);
    Ok(())
}

// =========================================================================
// Mapper Tests
// =========================================================================

#[test]
fn test_write_typed_object() -> Result<()> {
    let mapper = mapper()?;
    let json = mapper.write_object(&ada()?)?;

    assert_eq!(
        json,
        r#"{"_type":"Person","name":"Ada","age":36,"nicknames":["Countess"],"address":{"city":"London","zip":"W1"}}"#
    );
    Ok(())
}

#[test]
fn test_typed_round_trip() -> Result<()> {
    let mapper = mapper()?;
    let person = ada()?;

    let json = mapper.write_object(&person)?;
    let read: PersonDo = mapper.read_object(&json)?;
    assert_eq!(read, person);
    assert!(!read.as_entity().has("_type"));
    Ok(())
}

#[test]
fn test_read_subtype_as_parent() -> Result<()> {
    let mapper = mapper()?;
    let mut employee = EmployeeDo::new();
    employee.name().set("Grace")?;
    employee.employee_number().set(7)?;

    let json = mapper.write_object(&employee)?;
    assert!(json.starts_with(r#"{"_type":"Employee""#));
    assert_eq!(mapper.resolve_type(&json)?, Some(DataObjectType::of::<EmployeeDo>()));

    let mut person: PersonDo = mapper.read_object(&json)?;
    assert_eq!(person.name().get()?, Some("Grace".to_string()));
    assert_eq!(person.as_entity().get_integer("employeeNumber")?, Some(7));
    Ok(())
}

#[test]
fn test_read_parent_as_subtype_is_rejected() -> Result<()> {
    let mapper = mapper()?;
    let json = mapper.write_object(&ada()?)?;

    let err = mapper.read_object::<EmployeeDo>(&json).unwrap_err();
    assert!(matches!(err, MapperError::UnexpectedType { ref type_name, .. } if type_name == "Person"));
    Ok(())
}

#[test]
fn test_read_unknown_type_name_is_rejected() -> Result<()> {
    let mapper = mapper()?;
    let err = mapper.read_object::<PersonDo>(r#"{"_type":"Robot"}"#).unwrap_err();
    assert!(matches!(err, MapperError::UnknownTypeName { .. }));
    Ok(())
}

#[test]
fn test_untyped_read_keeps_type_attribute() -> Result<()> {
    let mapper = mapper()?;
    let entity = mapper.read_value(r#"{"_type":"Person","name":"Ada"}"#)?;

    assert_eq!(entity.get("_type"), Value::from("Person"));
    assert_eq!(entity.get_string("name")?, Some("Ada"));
    Ok(())
}

#[test]
fn test_custom_type_attribute() -> Result<()> {
    common::init_tracing();
    let config = MapperConfig {
        type_attribute_name: "@type".to_string(),
        ..MapperConfig::default()
    };
    let mapper = JsonDataObjectMapper::with_config(config, common::inventory()?)?;

    let mut address = AddressDo::new();
    address.city().set("Zurich")?;
    let json = mapper.write_object(&address)?;
    assert_eq!(json, r#"{"@type":"Address","city":"Zurich"}"#);

    let read: AddressDo = mapper.read_object(&json)?;
    assert_eq!(read, address);
    Ok(())
}

// =========================================================================
// Helper Tests
// =========================================================================

#[test]
fn test_helper_clone_is_deep_and_equal() -> Result<()> {
    let helper = DataObjectHelper::new(mapper()?);
    let original = ada()?.into_entity();

    let mut copy = helper.clone(Some(&original))?.expect("clone of an entity");
    assert_eq!(copy, original);

    copy.put("name", "Lovelace")?;
    assert_ne!(copy, original);
    assert_eq!(original.get_string("name")?, Some("Ada"));
    Ok(())
}

#[test]
fn test_helper_to_string() -> Result<()> {
    let helper = DataObjectHelper::new(mapper()?);
    let entity = DoEntity::builder().put("a", 1).put_list("b", vec![true]).build()?;

    assert_eq!(helper.to_string(Some(&entity))?, r#"{"a":1,"b":[true]}"#);
    assert_eq!(helper.to_string(None)?, "null");
    Ok(())
}

#[test]
fn test_helper_typed_getters_after_round_trip() -> Result<()> {
    let helper = DataObjectHelper::new(mapper()?);
    let id = uuid::Uuid::new_v4();
    let entity = DoEntity::builder()
        .put("id", id)
        .put("locale", "fr-CA")
        .put("big", 12)
        .build()?;

    let copy = helper.clone(Some(&entity))?.expect("clone of an entity");
    assert_eq!(helper.get_uuid_attribute(&copy, "id")?, Some(id));
    assert_eq!(
        helper.get_locale_attribute(&copy, "locale")?.map(|l| l.to_string()),
        Some("fr-CA".to_string())
    );
    assert_eq!(helper.get_big_integer_attribute(&copy, "big")?, Some(12.into()));
    Ok(())
}
