//! Data Object Entity
//!
//! [`DoEntity`] is the universal property container: an insertion-ordered map
//! from attribute name to [`DoNode`]. Typed data objects wrap an entity and
//! expose named accessors through [`ValueAttribute`] and [`ListAttribute`]
//! handles.
//!
//! # Architecture
//!
//! - **Nodes are stable**: re-putting an attribute updates the existing node in
//!   place, keeping its position in the attribute order
//! - **Kinds are fixed**: once an attribute is a value node it cannot become a
//!   list node, and vice versa
//! - **Absence is not an error**: missing attributes and null values read as
//!   `None`, list getters return an empty list
//! - **Equality ignores order**: two entities are equal when they hold the same
//!   attribute names with equal node contents
//!
//! # Examples
//!
//! ```rust
//! use dataobject_core::models::{DoEntity, Value};
//! use rust_decimal::Decimal;
//!
//! let mut entity = DoEntity::new();
//! entity.put("id", "foo")?;
//! entity.put("amount", 42)?;
//! entity.put_list("tags", vec!["a", "b"])?;
//!
//! assert!(entity.has("id"));
//! assert_eq!(entity.get_string("id")?, Some("foo"));
//! assert_eq!(entity.get_decimal("amount")?, Some(Decimal::from(42)));
//! assert_eq!(entity.get_string_list("tags")?, vec![Some("a".to_string()), Some("b".to_string())]);
//! assert!(entity.get_string_list("missing")?.is_empty());
//!
//! // A list attribute cannot be re-put as a scalar
//! assert!(entity.put("tags", "x").is_err());
//! assert_eq!(entity.get("tags"), Value::from(vec!["a", "b"]));
//! # Ok::<(), dataobject_core::models::DataObjectError>(())
//! ```

use crate::models::coerce::{self, CoerceError};
use crate::models::error::Result;
use crate::models::format::DEFAULT_DATE_PATTERN;
use crate::models::node::extract;
use crate::models::value::item_hash;
use crate::models::{
    DataObjectError, DoEntityBuilder, DoList, DoNode, DoValue, FromValue, Locale, NodeKind, Value,
};
use chrono::NaiveDateTime;
use indexmap::IndexMap;
use num_bigint::BigInt;
use rust_decimal::Decimal;
use std::borrow::Cow;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use uuid::Uuid;

static NULL: Value = Value::Null;

/// Universal data object: ordered attribute name to node mapping
#[derive(Debug, Clone, Default)]
pub struct DoEntity {
    nodes: IndexMap<String, DoNode>,
}

impl DoEntity {
    /// Empty entity
    pub fn new() -> Self {
        Self::default()
    }

    /// Fluent builder collecting attributes into a new entity
    pub fn builder() -> DoEntityBuilder {
        DoEntityBuilder::new()
    }

    fn check_name(name: &str) -> Result<()> {
        if name.is_empty() {
            return Err(DataObjectError::InvalidAttributeName);
        }
        Ok(())
    }

    // ========================================================================
    // Node access
    // ========================================================================

    /// Node stored under `name`
    pub fn get_node(&self, name: &str) -> Option<&DoNode> {
        self.nodes.get(name)
    }

    /// Whether an attribute with this name exists
    pub fn has(&self, name: &str) -> bool {
        self.nodes.get(name).is_some_and(DoNode::exists)
    }

    /// Value node of an attribute that must exist
    pub fn get_value_node(&self, name: &str) -> Result<&DoValue> {
        match self.nodes.get(name) {
            Some(DoNode::Value(node)) => Ok(node),
            Some(DoNode::List(_)) => Err(DataObjectError::NodeKindMismatch {
                name: name.to_string(),
                expected: NodeKind::Value,
                actual: NodeKind::List,
            }),
            None => Err(DataObjectError::missing_node(name)),
        }
    }

    /// List node of an attribute that must exist
    pub fn get_list_node(&self, name: &str) -> Result<&DoList> {
        match self.nodes.get(name) {
            Some(DoNode::List(node)) => Ok(node),
            Some(DoNode::Value(_)) => Err(DataObjectError::NodeKindMismatch {
                name: name.to_string(),
                expected: NodeKind::List,
                actual: NodeKind::Value,
            }),
            None => Err(DataObjectError::missing_node(name)),
        }
    }

    /// Existing value node, or a freshly inserted created one
    fn value_node_mut(&mut self, name: &str) -> Result<&mut DoValue> {
        Self::check_name(name)?;
        let node = self.nodes.entry(name.to_string()).or_insert_with(|| {
            let mut node = DoValue::new();
            node.set_attribute_name(Some(name.to_string()));
            node.create();
            DoNode::Value(node)
        });
        match node {
            DoNode::Value(node) => Ok(node),
            DoNode::List(_) => Err(DataObjectError::NodeKindChange {
                name: name.to_string(),
                existing: NodeKind::List,
                requested: NodeKind::Value,
            }),
        }
    }

    /// Existing list node, or a freshly inserted created one
    fn list_node_mut(&mut self, name: &str) -> Result<&mut DoList> {
        Self::check_name(name)?;
        let node = self.nodes.entry(name.to_string()).or_insert_with(|| {
            let mut node = DoList::new();
            node.set_attribute_name(Some(name.to_string()));
            node.create();
            DoNode::List(node)
        });
        match node {
            DoNode::List(node) => Ok(node),
            DoNode::Value(_) => Err(DataObjectError::NodeKindChange {
                name: name.to_string(),
                existing: NodeKind::Value,
                requested: NodeKind::List,
            }),
        }
    }

    // ========================================================================
    // Put
    // ========================================================================

    /// Set a scalar attribute, updating the existing node in place
    pub fn put(&mut self, name: &str, value: impl Into<Value>) -> Result<()> {
        self.value_node_mut(name)?.set(value);
        Ok(())
    }

    /// Set a scalar attribute if `predicate` accepts the value
    pub fn put_if<P>(&mut self, name: &str, value: impl Into<Value>, predicate: P) -> Result<()>
    where
        P: FnOnce(&Value) -> bool,
    {
        let value = value.into();
        if predicate(&value) {
            self.put(name, value)?;
        }
        Ok(())
    }

    /// Set a list attribute, `None` stores an empty list
    pub fn put_list<T: Into<Value>>(
        &mut self,
        name: &str,
        items: impl Into<Option<Vec<T>>>,
    ) -> Result<()> {
        self.list_node_mut(name)?.set(items);
        Ok(())
    }

    /// Set a list attribute if `predicate` accepts the items
    pub fn put_list_if<T, P>(
        &mut self,
        name: &str,
        items: impl Into<Option<Vec<T>>>,
        predicate: P,
    ) -> Result<()>
    where
        T: Into<Value>,
        P: FnOnce(&[Value]) -> bool,
    {
        let items: Vec<Value> = items
            .into()
            .map(|items| items.into_iter().map(Into::into).collect())
            .unwrap_or_default();
        if predicate(&items) {
            self.put_list(name, items)?;
        }
        Ok(())
    }

    /// Store `node` under `name`, replacing any existing node of either kind
    pub fn put_node(&mut self, name: &str, node: impl Into<DoNode>) -> Result<()> {
        Self::check_name(name)?;
        let mut node = node.into();
        node.set_attribute_name(Some(name.to_string()));
        node.create();
        self.nodes.insert(name.to_string(), node);
        Ok(())
    }

    // ========================================================================
    // Untyped get
    // ========================================================================

    /// Attribute value, [`Value::Null`] if absent; list nodes yield [`Value::List`]
    pub fn get(&self, name: &str) -> Value {
        self.nodes.get(name).map(DoNode::value).unwrap_or_default()
    }

    fn value_ref(&self, name: &str) -> Option<Cow<'_, Value>> {
        self.nodes.get(name).map(|node| match node {
            DoNode::Value(node) => Cow::Borrowed(node.peek().unwrap_or(&NULL)),
            DoNode::List(node) => Cow::Owned(Value::List(node.iter().cloned().collect())),
        })
    }

    /// Attribute read as `T` without coercion
    pub fn get_as<T: FromValue>(&self, name: &str) -> Result<Option<T>> {
        match self.value_ref(name) {
            Some(value) => extract(name, &value),
            None => Ok(None),
        }
    }

    /// Apply `mapper` to a present, non-null attribute value
    pub fn get_with<R, F>(&self, name: &str, mapper: F) -> Option<R>
    where
        F: FnOnce(&Value) -> R,
    {
        self.value_ref(name)
            .filter(|value| !value.is_null())
            .map(|value| mapper(&value))
    }

    /// Items of a list attribute
    ///
    /// Accepts list nodes and value nodes holding a [`Value::List`]. Absent and
    /// null attributes yield an empty slice.
    pub fn get_list(&self, name: &str) -> Result<&[Value]> {
        match self.nodes.get(name) {
            None => Ok(&[]),
            Some(DoNode::List(node)) => Ok(node.to_optional().unwrap_or_default()),
            Some(DoNode::Value(node)) => match node.peek() {
                None | Some(Value::Null) => Ok(&[]),
                Some(Value::List(items)) => Ok(items),
                Some(other) => Err(DataObjectError::type_mismatch(name, "List", other.type_name())),
            },
        }
    }

    /// List items read as `T` without coercion, null items become `None`
    pub fn get_list_as<T: FromValue>(&self, name: &str) -> Result<Vec<Option<T>>> {
        self.get_list(name)?
            .iter()
            .map(|item| extract(name, item))
            .collect()
    }

    /// Apply `mapper` to every non-null list item
    pub fn get_list_with<R, F>(&self, name: &str, mut mapper: F) -> Result<Vec<Option<R>>>
    where
        F: FnMut(&Value) -> R,
    {
        Ok(self
            .get_list(name)?
            .iter()
            .map(|item| (!item.is_null()).then(|| mapper(item)))
            .collect())
    }

    /// Items of a list attribute, `None` if absent or not a list
    pub fn opt_list(&self, name: &str) -> Option<&[Value]> {
        match self.nodes.get(name)? {
            DoNode::List(node) => node.to_optional(),
            DoNode::Value(node) => node.peek().and_then(Value::as_list),
        }
    }

    // ========================================================================
    // Typed getters
    // ========================================================================

    fn coerced<T, F>(&self, name: &str, convert: F) -> Result<Option<T>>
    where
        F: FnOnce(&Value) -> std::result::Result<T, CoerceError>,
    {
        match self.value_ref(name) {
            Some(value) if !value.is_null() => convert(&value)
                .map(Some)
                .map_err(|err| err.at(name, &value)),
            _ => Ok(None),
        }
    }

    fn coerced_list<T, F>(&self, name: &str, convert: F) -> Result<Vec<Option<T>>>
    where
        F: Fn(&Value) -> std::result::Result<T, CoerceError>,
    {
        self.get_list(name)?
            .iter()
            .map(|item| {
                if item.is_null() {
                    return Ok(None);
                }
                convert(item).map(Some).map_err(|err| err.at(name, item))
            })
            .collect()
    }

    /// String attribute; other value types are not converted
    pub fn get_string(&self, name: &str) -> Result<Option<&str>> {
        match self.nodes.get(name) {
            None => Ok(None),
            Some(DoNode::List(_)) => Err(DataObjectError::type_mismatch(name, "String", "List")),
            Some(DoNode::Value(node)) => match node.peek() {
                None | Some(Value::Null) => Ok(None),
                Some(value) => coerce::string(value)
                    .map(Some)
                    .map_err(|err| err.at(name, value)),
            },
        }
    }

    /// Boolean attribute; text such as `"false"` is rejected
    pub fn get_boolean(&self, name: &str) -> Result<Option<bool>> {
        self.coerced(name, coerce::boolean)
    }

    /// Decimal attribute, accepting any numeric value
    pub fn get_decimal(&self, name: &str) -> Result<Option<Decimal>> {
        self.coerced(name, coerce::decimal)
    }

    /// Integer attribute; whole doubles and decimals are narrowed
    pub fn get_integer(&self, name: &str) -> Result<Option<i64>> {
        self.coerced(name, coerce::integer)
    }

    /// Double attribute, accepting any numeric value
    pub fn get_double(&self, name: &str) -> Result<Option<f64>> {
        self.coerced(name, coerce::double)
    }

    /// Big integer attribute; integral numbers and numeric text are accepted
    pub fn get_big_integer(&self, name: &str) -> Result<Option<BigInt>> {
        self.coerced(name, coerce::big_integer)
    }

    /// Date attribute; text is parsed with the default date pattern
    pub fn get_date(&self, name: &str) -> Result<Option<NaiveDateTime>> {
        self.get_date_with_pattern(name, DEFAULT_DATE_PATTERN)
    }

    /// Date attribute; text is parsed with `pattern`
    pub fn get_date_with_pattern(&self, name: &str, pattern: &str) -> Result<Option<NaiveDateTime>> {
        self.coerced(name, |value| coerce::date(value, pattern))
    }

    /// UUID attribute; text must be a hyphenated UUID
    pub fn get_uuid(&self, name: &str) -> Result<Option<Uuid>> {
        self.coerced(name, coerce::uuid)
    }

    /// Locale attribute; text is parsed as a language tag
    pub fn get_locale(&self, name: &str) -> Result<Option<Locale>> {
        self.coerced(name, coerce::locale)
    }

    /// Nested entity attribute
    pub fn get_entity(&self, name: &str) -> Result<Option<&DoEntity>> {
        match self.nodes.get(name) {
            None => Ok(None),
            Some(DoNode::List(_)) => Err(DataObjectError::type_mismatch(name, "Entity", "List")),
            Some(DoNode::Value(node)) => match node.peek() {
                None | Some(Value::Null) => Ok(None),
                Some(Value::Entity(entity)) => Ok(Some(entity)),
                Some(other) => Err(DataObjectError::type_mismatch(name, "Entity", other.type_name())),
            },
        }
    }

    /// String list items; null items become `None`
    pub fn get_string_list(&self, name: &str) -> Result<Vec<Option<String>>> {
        self.coerced_list(name, |value| coerce::string(value).map(str::to_string))
    }

    /// Boolean list items; null items become `None`
    pub fn get_boolean_list(&self, name: &str) -> Result<Vec<Option<bool>>> {
        self.coerced_list(name, coerce::boolean)
    }

    /// Decimal list items, accepting any numeric item
    pub fn get_decimal_list(&self, name: &str) -> Result<Vec<Option<Decimal>>> {
        self.coerced_list(name, coerce::decimal)
    }

    // ========================================================================
    // Remove
    // ========================================================================

    /// Remove an attribute, returns whether it existed
    pub fn remove(&mut self, name: &str) -> bool {
        self.nodes.shift_remove(name).is_some()
    }

    /// Remove `node` if it is stored under its attribute name with equal content
    pub fn remove_node(&mut self, node: &DoNode) -> bool {
        let Some(name) = node.attribute_name() else {
            return false;
        };
        if self.nodes.get(name) != Some(node) {
            return false;
        }
        self.remove(name)
    }

    /// Remove the node returned by `supplier`
    pub fn remove_by<F>(&mut self, supplier: F) -> bool
    where
        F: FnOnce(&Self) -> Option<&DoNode>,
    {
        let name = supplier(&*self)
            .and_then(DoNode::attribute_name)
            .map(str::to_string);
        match name {
            Some(name) => self.remove(&name),
            None => false,
        }
    }

    /// Remove every node matching `predicate`, keeping the order of the rest
    pub fn remove_if<P>(&mut self, mut predicate: P) -> bool
    where
        P: FnMut(&DoNode) -> bool,
    {
        let before = self.nodes.len();
        self.nodes.retain(|_, node| !predicate(node));
        self.nodes.len() != before
    }

    // ========================================================================
    // Bulk access
    // ========================================================================

    /// All nodes in attribute order
    pub fn all_nodes(&self) -> &IndexMap<String, DoNode> {
        &self.nodes
    }

    /// Snapshot of all attribute values in insertion order
    pub fn all(&self) -> IndexMap<String, Value> {
        self.nodes
            .iter()
            .map(|(name, node)| (name.clone(), node.value()))
            .collect()
    }

    /// All attribute values passed through `mapper`
    pub fn all_with<R, F>(&self, mut mapper: F) -> IndexMap<String, R>
    where
        F: FnMut(&Value) -> R,
    {
        self.nodes
            .iter()
            .map(|(name, node)| (name.clone(), mapper(&node.value())))
            .collect()
    }

    /// Whether the entity has no attributes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of attributes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    // ========================================================================
    // Attribute handles
    // ========================================================================

    /// Typed handle on a scalar attribute; the node is created on first write or read
    pub fn do_value<V: FromValue>(&mut self, name: &str) -> ValueAttribute<'_, V> {
        ValueAttribute {
            entity: self,
            name: name.to_string(),
            _marker: PhantomData,
        }
    }

    /// Typed handle on a list attribute; the node is created on first write or read
    pub fn do_list<E: FromValue>(&mut self, name: &str) -> ListAttribute<'_, E> {
        ListAttribute {
            entity: self,
            name: name.to_string(),
            _marker: PhantomData,
        }
    }
}

impl PartialEq for DoEntity {
    fn eq(&self, other: &Self) -> bool {
        self.nodes.len() == other.nodes.len()
            && self
                .nodes
                .iter()
                .all(|(name, node)| other.nodes.get(name) == Some(node))
    }
}

impl Eq for DoEntity {}

impl Hash for DoEntity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let combined = self
            .nodes
            .iter()
            .fold(0u64, |acc, entry| acc.wrapping_add(item_hash(&entry)));
        state.write_u64(combined);
    }
}

// ============================================================================
// Attribute handles
// ============================================================================

/// Typed accessor for a scalar attribute of an entity
pub struct ValueAttribute<'a, V> {
    entity: &'a mut DoEntity,
    name: String,
    _marker: PhantomData<V>,
}

impl<V: FromValue> ValueAttribute<'_, V> {
    /// Attribute name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the attribute exists
    pub fn exists(&self) -> bool {
        self.entity.has(&self.name)
    }

    /// Create the attribute with a null value
    pub fn create(&mut self) -> Result<()> {
        self.entity.value_node_mut(&self.name).map(|_| ())
    }

    /// Current value, creating the attribute first
    pub fn get(&mut self) -> Result<Option<V>> {
        let node = self.entity.value_node_mut(&self.name)?;
        extract(&self.name, node.get())
    }

    /// Set the value, creating the attribute
    pub fn set(&mut self, value: impl Into<Value>) -> Result<()> {
        self.entity.put(&self.name, value)
    }

    /// Current value without creating the attribute
    pub fn to_optional(&self) -> Result<Option<V>> {
        match self.entity.get_node(&self.name) {
            None => Ok(None),
            Some(DoNode::Value(node)) => node.get_as(),
            Some(DoNode::List(_)) => Err(DataObjectError::NodeKindMismatch {
                name: self.name.clone(),
                expected: NodeKind::Value,
                actual: NodeKind::List,
            }),
        }
    }

    /// Underlying value node, if present
    pub fn node(&self) -> Option<&DoValue> {
        self.entity.get_node(&self.name).and_then(DoNode::as_value)
    }
}

/// Typed accessor for a list attribute of an entity
pub struct ListAttribute<'a, E> {
    entity: &'a mut DoEntity,
    name: String,
    _marker: PhantomData<E>,
}

impl<E: FromValue> ListAttribute<'_, E> {
    /// Attribute name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the attribute exists
    pub fn exists(&self) -> bool {
        self.entity.has(&self.name)
    }

    /// Create the attribute as an empty list
    pub fn create(&mut self) -> Result<()> {
        self.entity.list_node_mut(&self.name).map(|_| ())
    }

    /// Items, creating the attribute first
    pub fn get(&mut self) -> Result<Vec<Option<E>>> {
        self.entity.list_node_mut(&self.name)?.get_as_list()
    }

    /// Replace the items, `None` stores an empty list
    pub fn set<T: Into<Value>>(&mut self, items: impl Into<Option<Vec<T>>>) -> Result<()> {
        self.entity.put_list(&self.name, items)
    }

    /// Append an item, creating the attribute
    pub fn add(&mut self, item: impl Into<Value>) -> Result<()> {
        self.entity.list_node_mut(&self.name)?.add(item);
        Ok(())
    }

    /// Items without creating the attribute
    pub fn to_optional(&self) -> Result<Option<Vec<Option<E>>>> {
        match self.entity.get_node(&self.name) {
            None => Ok(None),
            Some(DoNode::List(node)) => node.get_as_list().map(Some),
            Some(DoNode::Value(_)) => Err(DataObjectError::NodeKindMismatch {
                name: self.name.clone(),
                expected: NodeKind::List,
                actual: NodeKind::Value,
            }),
        }
    }

    /// Underlying list node, creating the attribute first
    pub fn node_mut(&mut self) -> Result<&mut DoList> {
        self.entity.list_node_mut(&self.name)
    }
}

#[cfg(test)]
#[path = "entity_test.rs"]
mod entity_test;
