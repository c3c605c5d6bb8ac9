//! Data Object Mapper
//!
//! Serialization seam of the data object model. [`DataObjectMapper`] is the
//! contract the helper depends on; [`JsonDataObjectMapper`] is the serde_json
//! implementation.
//!
//! # JSON representation
//!
//! - Entities become JSON objects keyed by attribute name, in attribute order
//! - List nodes and list values become arrays, nested entities become objects
//! - Dates are written as text using the configured pattern; UUIDs and locales
//!   are written as strings
//! - Decimals are written with their exact digits and scale
//! - Big integers outside the JSON integer range are written as strings
//! - NaN and infinite doubles are rejected
//!
//! Reading maps integers to `Integer` (or `BigInteger` above `i64::MAX`),
//! fractional numbers to `Decimal` from their literal text (`Double` only
//! when the literal does not fit a decimal), objects to nested entities and
//! arrays to list nodes. Strings stay strings; the typed entity getters parse
//! them on access.
//!
//! # Typed objects
//!
//! `write_object` prepends the type attribute (`_type` by default) when the
//! type or one of its parents has a type name. `read_object` resolves the type
//! attribute through the inventory and rejects unknown names and types that
//! are not assignable to the requested type.

use crate::config::MapperConfig;
use crate::models::format::format_date;
use crate::models::{DataObject, DataObjectType, DoEntity, DoNode, Value};
use crate::services::{DataObjectInventory, MapperError};
use num_bigint::BigInt;
use rust_decimal::Decimal;
use serde_json::{Map, Number};
use std::str::FromStr;
use std::sync::Arc;

/// Serializer contract used by [`DataObjectHelper`](crate::services::DataObjectHelper)
pub trait DataObjectMapper {
    /// Serialize an entity
    fn write_value(&self, entity: &DoEntity) -> Result<String, MapperError>;

    /// Deserialize an entity
    fn read_value(&self, text: &str) -> Result<DoEntity, MapperError>;
}

/// JSON mapper backed by serde_json
#[derive(Debug, Clone)]
pub struct JsonDataObjectMapper {
    config: MapperConfig,
    inventory: Arc<DataObjectInventory>,
}

impl JsonDataObjectMapper {
    /// Mapper with the default configuration
    pub fn new(inventory: Arc<DataObjectInventory>) -> Self {
        Self {
            config: MapperConfig::default(),
            inventory,
        }
    }

    /// Mapper with a validated configuration
    pub fn with_config(
        config: MapperConfig,
        inventory: Arc<DataObjectInventory>,
    ) -> Result<Self, MapperError> {
        config.validate().map_err(MapperError::InvalidConfig)?;
        Ok(Self { config, inventory })
    }

    pub fn config(&self) -> &MapperConfig {
        &self.config
    }

    pub fn inventory(&self) -> &DataObjectInventory {
        &self.inventory
    }

    // ========================================================================
    // Entity ↔ JSON tree
    // ========================================================================

    /// Convert an entity into a JSON object
    pub fn to_json(&self, entity: &DoEntity) -> Result<serde_json::Value, MapperError> {
        self.encode_entity(entity).map(serde_json::Value::Object)
    }

    /// Convert a JSON object into an entity
    pub fn from_json(&self, json: serde_json::Value) -> Result<DoEntity, MapperError> {
        match json {
            serde_json::Value::Object(object) => self.decode_entity(object),
            other => Err(MapperError::not_an_object(&other)),
        }
    }

    fn encode_entity(&self, entity: &DoEntity) -> Result<Map<String, serde_json::Value>, MapperError> {
        let mut object = Map::new();
        for (name, node) in entity.all_nodes() {
            let encoded = match node {
                DoNode::Value(node) => match node.to_optional() {
                    Some(value) => self.encode_value(name, value)?,
                    None => serde_json::Value::Null,
                },
                DoNode::List(node) => serde_json::Value::Array(
                    node.iter()
                        .map(|item| self.encode_value(name, item))
                        .collect::<Result<_, _>>()?,
                ),
            };
            object.insert(name.clone(), encoded);
        }
        Ok(object)
    }

    fn encode_value(&self, name: &str, value: &Value) -> Result<serde_json::Value, MapperError> {
        let encoded = match value {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Integer(i) => serde_json::Value::from(*i),
            Value::Double(d) => Number::from_f64(*d)
                .map(serde_json::Value::Number)
                .ok_or_else(|| MapperError::NonFiniteNumber {
                    attribute: name.to_string(),
                    value: *d,
                })?,
            Value::BigInteger(b) => encode_big_integer(b),
            Value::Decimal(d) => serde_json::Value::Number(serde_json::from_str(&d.to_string())?),
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Date(date) => serde_json::Value::String(format_date(date, &self.config.date_pattern)),
            Value::Uuid(u) => serde_json::Value::String(u.to_string()),
            Value::Locale(l) => serde_json::Value::String(l.to_string()),
            Value::Entity(entity) => serde_json::Value::Object(self.encode_entity(entity)?),
            Value::List(items) => serde_json::Value::Array(
                items
                    .iter()
                    .map(|item| self.encode_value(name, item))
                    .collect::<Result<_, _>>()?,
            ),
            Value::Map(map) => {
                let mut object = Map::new();
                for (key, item) in map {
                    object.insert(key.clone(), self.encode_value(name, item)?);
                }
                serde_json::Value::Object(object)
            }
        };
        Ok(encoded)
    }

    fn decode_entity(&self, object: Map<String, serde_json::Value>) -> Result<DoEntity, MapperError> {
        let mut entity = DoEntity::new();
        for (name, json) in object {
            match json {
                serde_json::Value::Array(items) => {
                    let items: Vec<Value> = items
                        .into_iter()
                        .map(|item| self.decode_value(item))
                        .collect::<Result<_, _>>()?;
                    entity.put_list(&name, items)?;
                }
                other => entity.put(&name, self.decode_value(other)?)?,
            }
        }
        Ok(entity)
    }

    fn decode_value(&self, json: serde_json::Value) -> Result<Value, MapperError> {
        let value = match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => decode_number(&n),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => Value::List(
                items
                    .into_iter()
                    .map(|item| self.decode_value(item))
                    .collect::<Result<_, _>>()?,
            ),
            serde_json::Value::Object(object) => Value::from(self.decode_entity(object)?),
        };
        Ok(value)
    }

    fn render(&self, json: &serde_json::Value) -> Result<String, MapperError> {
        let text = if self.config.pretty_print {
            serde_json::to_string_pretty(json)?
        } else {
            serde_json::to_string(json)?
        };
        Ok(text)
    }

    // ========================================================================
    // Typed objects
    // ========================================================================

    /// Serialize a typed data object, including its type name
    pub fn write_object<T: DataObject>(&self, object: &T) -> Result<String, MapperError> {
        let mut body = self.encode_entity(object.as_entity())?;
        let ty = DataObjectType::of::<T>();
        let Some(type_name) = self.inventory.declared_type_name(&ty) else {
            return self.render(&serde_json::Value::Object(body));
        };

        let type_attribute = &self.config.type_attribute_name;
        body.shift_remove(type_attribute);
        let mut object = Map::new();
        object.insert(
            type_attribute.clone(),
            serde_json::Value::String(type_name.to_string()),
        );
        object.extend(body);
        self.render(&serde_json::Value::Object(object))
    }

    /// Deserialize a typed data object
    ///
    /// A type attribute, when present, must name a registered type assignable to
    /// `T`. The type attribute is not kept as an entity attribute.
    pub fn read_object<T: DataObject>(&self, text: &str) -> Result<T, MapperError> {
        let mut object = parse_object(text)?;
        let expected = DataObjectType::of::<T>();
        if let Some(resolved) = self.take_type(&mut object)? {
            if !resolved.is_assignable_to(&expected) {
                return Err(MapperError::UnexpectedType {
                    type_name: self.inventory.type_name(&resolved),
                    actual: resolved.type_path().to_string(),
                    expected: expected.type_path().to_string(),
                });
            }
        }
        let entity = self.decode_entity(object)?;
        Ok(T::from_entity(entity))
    }

    /// Registered type named by the type attribute of a document
    pub fn resolve_type(&self, text: &str) -> Result<Option<DataObjectType>, MapperError> {
        let mut object = parse_object(text)?;
        self.take_type(&mut object)
    }

    fn take_type(
        &self,
        object: &mut Map<String, serde_json::Value>,
    ) -> Result<Option<DataObjectType>, MapperError> {
        let Some(type_value) = object.shift_remove(&self.config.type_attribute_name) else {
            return Ok(None);
        };
        let type_name = match type_value {
            serde_json::Value::String(name) => name,
            other => return Err(MapperError::unknown_type_name(other.to_string())),
        };
        match self.inventory.from_type_name(&type_name) {
            Some(ty) => {
                tracing::debug!("Resolved type name '{}' to {}", type_name, ty.type_path());
                Ok(Some(ty))
            }
            None => {
                tracing::warn!("Type name '{}' is not registered", type_name);
                Err(MapperError::unknown_type_name(type_name))
            }
        }
    }
}

impl DataObjectMapper for JsonDataObjectMapper {
    fn write_value(&self, entity: &DoEntity) -> Result<String, MapperError> {
        let json = self.to_json(entity)?;
        self.render(&json)
    }

    fn read_value(&self, text: &str) -> Result<DoEntity, MapperError> {
        let object = parse_object(text)?;
        self.decode_entity(object)
    }
}

fn parse_object(text: &str) -> Result<Map<String, serde_json::Value>, MapperError> {
    let json: serde_json::Value = serde_json::from_str(text)?;
    match json {
        serde_json::Value::Object(object) => Ok(object),
        other => Err(MapperError::not_an_object(&other)),
    }
}

fn encode_big_integer(value: &BigInt) -> serde_json::Value {
    if let Ok(i) = i64::try_from(value) {
        return serde_json::Value::from(i);
    }
    if let Ok(u) = u64::try_from(value) {
        return serde_json::Value::from(u);
    }
    serde_json::Value::String(value.to_string())
}

/// Numbers keep their literal text, so precision beyond `f64` survives a read
fn decode_number(number: &Number) -> Value {
    if let Some(i) = number.as_i64() {
        return Value::Integer(i);
    }
    let text = number.to_string();
    if !text.contains(['.', 'e', 'E']) {
        if let Ok(big) = BigInt::from_str(&text) {
            return Value::BigInteger(big);
        }
    }
    match Decimal::from_str(&text).or_else(|_| Decimal::from_scientific(&text)) {
        Ok(decimal) => Value::Decimal(decimal),
        Err(_) => Value::Double(number.as_f64().unwrap_or(f64::NAN)),
    }
}

#[cfg(test)]
#[path = "mapper_test.rs"]
mod mapper_test;
