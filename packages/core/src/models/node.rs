//! Attribute Nodes
//!
//! Every attribute of a [`DoEntity`](crate::models::DoEntity) is wrapped in a
//! node that knows whether it has been created and under which attribute name
//! it lives.
//!
//! # Architecture
//!
//! - **DoValue**: scalar node holding a single [`Value`] (possibly null)
//! - **DoList**: list node holding an ordered sequence of values, never null
//!   once created
//! - **DoNode**: the closed union of both, stored by the entity
//!
//! A node is either *absent* (declared but not created) or *created*.
//! Creation is idempotent; reading through `get` creates the node, while
//! `to_optional` and the `&self` accessors never do.
//!
//! # Examples
//!
//! ```rust
//! use dataobject_core::models::{DoList, DoValue, Value};
//!
//! let mut value = DoValue::new();
//! assert!(!value.exists());
//! assert!(value.to_optional().is_none());
//! value.set("foo");
//! assert_eq!(value.to_optional(), Some(&Value::from("foo")));
//!
//! let mut list = DoList::new();
//! list.add("foo");
//! list.add("bar");
//! assert_eq!(list.remove_at(0)?, Value::from("foo"));
//! assert_eq!(list.get(), &vec![Value::from("bar")]);
//! # Ok::<(), dataobject_core::models::DataObjectError>(())
//! ```

use crate::models::error::Result;
use crate::models::value::hash_list;
use crate::models::{DataObjectError, FromValue, Value};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Kind of an attribute node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Value,
    List,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Value => f.write_str("value"),
            NodeKind::List => f.write_str("list"),
        }
    }
}

/// Strict typed extraction shared by value and list nodes
pub(crate) fn extract<T: FromValue>(name: &str, value: &Value) -> Result<Option<T>> {
    if value.is_null() {
        return Ok(None);
    }
    T::from_value(value)
        .map(Some)
        .ok_or_else(|| DataObjectError::type_mismatch(name, T::type_label(), value.type_name()))
}

// ============================================================================
// DoValue
// ============================================================================

/// Scalar attribute node
#[derive(Debug, Clone, Default)]
pub struct DoValue {
    value: Option<Value>,
    attribute_name: Option<String>,
}

impl DoValue {
    /// Node that has not been created yet
    pub fn new() -> Self {
        Self::default()
    }

    /// Created node holding `value`, not yet attached to an entity
    pub fn of(value: impl Into<Value>) -> Self {
        Self {
            value: Some(value.into()),
            attribute_name: None,
        }
    }

    /// Whether the node has been created
    pub fn exists(&self) -> bool {
        self.value.is_some()
    }

    /// Create the node with a null value, no-op when already created
    pub fn create(&mut self) {
        if self.value.is_none() {
            self.value = Some(Value::Null);
        }
    }

    /// Current value, creating the node first
    pub fn get(&mut self) -> &Value {
        self.value.get_or_insert(Value::Null)
    }

    /// Set the value, creating the node
    pub fn set(&mut self, value: impl Into<Value>) {
        self.value = Some(value.into());
    }

    /// Value if the node exists and is not null
    pub fn to_optional(&self) -> Option<&Value> {
        self.value.as_ref().filter(|v| !v.is_null())
    }

    /// Value read as `T` without coercion, `None` when absent or null
    pub fn get_as<T: FromValue>(&self) -> Result<Option<T>> {
        match &self.value {
            Some(value) => extract(self.attribute_name().unwrap_or_default(), value),
            None => Ok(None),
        }
    }

    /// Name of the attribute this node is stored under
    pub fn attribute_name(&self) -> Option<&str> {
        self.attribute_name.as_deref()
    }

    /// Attach the node to an attribute name
    pub fn set_attribute_name(&mut self, name: Option<String>) {
        self.attribute_name = name;
    }

    /// Stored value without creating the node
    pub(crate) fn peek(&self) -> Option<&Value> {
        self.value.as_ref()
    }
}

impl PartialEq for DoValue {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for DoValue {}

impl Hash for DoValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        NodeContent::of_value(self).hash(state);
    }
}

// ============================================================================
// DoList
// ============================================================================

/// List attribute node
///
/// Reading accessors taking `&self` treat a not yet created list as empty.
/// Mutating accessors create the list first.
#[derive(Debug, Clone, Default)]
pub struct DoList {
    items: Option<Vec<Value>>,
    attribute_name: Option<String>,
}

impl DoList {
    /// List that has not been created yet
    pub fn new() -> Self {
        Self::default()
    }

    /// Created list holding `items`, not yet attached to an entity
    pub fn of<T: Into<Value>>(items: Vec<T>) -> Self {
        Self {
            items: Some(items.into_iter().map(Into::into).collect()),
            attribute_name: None,
        }
    }

    /// Whether the list has been created
    pub fn exists(&self) -> bool {
        self.items.is_some()
    }

    /// Create the node with an empty list, no-op when already created
    pub fn create(&mut self) {
        if self.items.is_none() {
            self.items = Some(Vec::new());
        }
    }

    /// Items, creating the node first
    pub fn get(&mut self) -> &Vec<Value> {
        self.items.get_or_insert_with(Vec::new)
    }

    /// Mutable items, creating the node first
    pub fn get_mut(&mut self) -> &mut Vec<Value> {
        self.items.get_or_insert_with(Vec::new)
    }

    /// Replace the items, `None` clears the list
    pub fn set<T: Into<Value>>(&mut self, items: impl Into<Option<Vec<T>>>) {
        let items = items
            .into()
            .map(|items| items.into_iter().map(Into::into).collect())
            .unwrap_or_default();
        self.items = Some(items);
    }

    /// Items if the node was created
    pub fn to_optional(&self) -> Option<&[Value]> {
        self.items.as_deref()
    }

    /// Name of the attribute this node is stored under
    pub fn attribute_name(&self) -> Option<&str> {
        self.attribute_name.as_deref()
    }

    /// Attach the node to an attribute name
    pub fn set_attribute_name(&mut self, name: Option<String>) {
        self.attribute_name = name;
    }

    fn items(&self) -> &[Value] {
        self.items.as_deref().unwrap_or_default()
    }

    /// Append an item
    pub fn add(&mut self, item: impl Into<Value>) {
        self.get_mut().push(item.into());
    }

    /// Append every item of `items`
    pub fn add_all<I>(&mut self, items: I)
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.get_mut().extend(items.into_iter().map(Into::into));
    }

    /// Remove the first item equal to `item`
    pub fn remove(&mut self, item: &Value) -> bool {
        let items = self.get_mut();
        match items.iter().position(|candidate| candidate == item) {
            Some(index) => {
                items.remove(index);
                true
            }
            None => false,
        }
    }

    /// Remove and return the item at `index`
    pub fn remove_at(&mut self, index: usize) -> Result<Value> {
        let items = self.get_mut();
        if index >= items.len() {
            return Err(DataObjectError::IndexOutOfBounds {
                index,
                len: items.len(),
            });
        }
        Ok(items.remove(index))
    }

    /// Remove every occurrence of each of `items`
    pub fn remove_all<'a, I>(&mut self, items: I) -> bool
    where
        I: IntoIterator<Item = &'a Value>,
    {
        let doomed: Vec<&Value> = items.into_iter().collect();
        let list = self.get_mut();
        let before = list.len();
        list.retain(|item| !doomed.contains(&item));
        list.len() != before
    }

    /// Remove all items, keeping the node created
    pub fn clear(&mut self) {
        self.get_mut().clear();
    }

    /// First item, `None` when empty
    pub fn first(&self) -> Option<&Value> {
        self.items().first()
    }

    /// Last item, `None` when empty
    pub fn last(&self) -> Option<&Value> {
        self.items().last()
    }

    /// Number of items
    pub fn len(&self) -> usize {
        self.items().len()
    }

    /// Whether the list has no items
    pub fn is_empty(&self) -> bool {
        self.items().is_empty()
    }

    /// Item at `index`, out of bounds is an error
    pub fn get_index(&self, index: usize) -> Result<&Value> {
        let items = self.items();
        items.get(index).ok_or(DataObjectError::IndexOutOfBounds {
            index,
            len: items.len(),
        })
    }

    /// Stable sort
    pub fn sort_by<F>(&mut self, compare: F)
    where
        F: FnMut(&Value, &Value) -> Ordering,
    {
        self.get_mut().sort_by(compare);
    }

    /// First item matching `predicate`
    pub fn find_first<P>(&self, mut predicate: P) -> Option<&Value>
    where
        P: FnMut(&Value) -> bool,
    {
        self.items().iter().find(|item| predicate(item))
    }

    /// Every item matching `predicate`, in list order
    pub fn find<P>(&self, mut predicate: P) -> Vec<&Value>
    where
        P: FnMut(&Value) -> bool,
    {
        self.items().iter().filter(|item| predicate(item)).collect()
    }

    /// First item whose `accessor` result equals `key`
    pub fn find_first_by<K, F>(&self, accessor: F, key: &K) -> Option<&Value>
    where
        K: PartialEq,
        F: Fn(&Value) -> K,
    {
        self.items().iter().find(|item| accessor(item) == *key)
    }

    /// Every item whose `accessor` result equals `key`
    pub fn find_by<K, F>(&self, accessor: F, key: &K) -> Vec<&Value>
    where
        K: PartialEq,
        F: Fn(&Value) -> K,
    {
        self.items()
            .iter()
            .filter(|item| accessor(item) == *key)
            .collect()
    }

    /// Items in order; the iterator is double-ended
    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.items().iter()
    }

    /// Mutable items in order, creating the node first
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Value> {
        self.get_mut().iter_mut()
    }

    #[cfg(feature = "parallel")]
    pub fn par_iter(&self) -> rayon::slice::Iter<'_, Value> {
        self.items().par_iter()
    }

    /// Items read as `T` without coercion, null items become `None`
    pub fn get_as_list<T: FromValue>(&self) -> Result<Vec<Option<T>>> {
        let name = self.attribute_name().unwrap_or_default();
        self.items()
            .iter()
            .map(|item| extract(name, item))
            .collect()
    }
}

impl PartialEq for DoList {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl Eq for DoList {}

impl Hash for DoList {
    fn hash<H: Hasher>(&self, state: &mut H) {
        NodeContent::of_list(self).hash(state);
    }
}

impl<'a> IntoIterator for &'a DoList {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ============================================================================
// DoNode
// ============================================================================

/// Attribute node stored by an entity
#[derive(Debug, Clone)]
pub enum DoNode {
    Value(DoValue),
    List(DoList),
}

impl DoNode {
    /// Whether this is a value or a list node
    pub fn kind(&self) -> NodeKind {
        match self {
            DoNode::Value(_) => NodeKind::Value,
            DoNode::List(_) => NodeKind::List,
        }
    }

    /// Name of the attribute this node is stored under
    pub fn attribute_name(&self) -> Option<&str> {
        match self {
            DoNode::Value(node) => node.attribute_name(),
            DoNode::List(node) => node.attribute_name(),
        }
    }

    /// Attach the node to an attribute name
    pub fn set_attribute_name(&mut self, name: Option<String>) {
        match self {
            DoNode::Value(node) => node.set_attribute_name(name),
            DoNode::List(node) => node.set_attribute_name(name),
        }
    }

    /// Whether the node has been created
    pub fn exists(&self) -> bool {
        match self {
            DoNode::Value(node) => node.exists(),
            DoNode::List(node) => node.exists(),
        }
    }

    /// Create the node, no-op when already created
    pub fn create(&mut self) {
        match self {
            DoNode::Value(node) => node.create(),
            DoNode::List(node) => node.create(),
        }
    }

    /// Snapshot of the node content, lists become [`Value::List`]
    pub fn value(&self) -> Value {
        match self {
            DoNode::Value(node) => node.peek().cloned().unwrap_or_default(),
            DoNode::List(node) => Value::List(node.items().to_vec()),
        }
    }

    /// The value node, `None` for a list node
    pub fn as_value(&self) -> Option<&DoValue> {
        match self {
            DoNode::Value(node) => Some(node),
            DoNode::List(_) => None,
        }
    }

    /// The value node, mutably
    pub fn as_value_mut(&mut self) -> Option<&mut DoValue> {
        match self {
            DoNode::Value(node) => Some(node),
            DoNode::List(_) => None,
        }
    }

    /// The list node, `None` for a value node
    pub fn as_list(&self) -> Option<&DoList> {
        match self {
            DoNode::List(node) => Some(node),
            DoNode::Value(_) => None,
        }
    }

    /// The list node, mutably
    pub fn as_list_mut(&mut self) -> Option<&mut DoList> {
        match self {
            DoNode::List(node) => Some(node),
            DoNode::Value(_) => None,
        }
    }

    fn content(&self) -> NodeContent<'_> {
        match self {
            DoNode::Value(node) => NodeContent::of_value(node),
            DoNode::List(node) => NodeContent::of_list(node),
        }
    }
}

impl From<DoValue> for DoNode {
    fn from(node: DoValue) -> Self {
        DoNode::Value(node)
    }
}

impl From<DoList> for DoNode {
    fn from(node: DoList) -> Self {
        DoNode::List(node)
    }
}

/// A value node holding a list equals a list node with the same items
impl PartialEq for DoNode {
    fn eq(&self, other: &Self) -> bool {
        self.content() == other.content()
    }
}

impl Eq for DoNode {}

impl Hash for DoNode {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.content().hash(state);
    }
}

/// Node content normalized for comparison
#[derive(PartialEq)]
enum NodeContent<'a> {
    Absent,
    Scalar(&'a Value),
    Items(&'a [Value]),
}

impl<'a> NodeContent<'a> {
    fn of_value(node: &'a DoValue) -> Self {
        match node.peek() {
            None => NodeContent::Absent,
            Some(Value::List(items)) => NodeContent::Items(items),
            Some(value) => NodeContent::Scalar(value),
        }
    }

    fn of_list(node: &'a DoList) -> Self {
        match node.to_optional() {
            None => NodeContent::Absent,
            Some(items) => NodeContent::Items(items),
        }
    }
}

impl Hash for NodeContent<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            NodeContent::Absent => state.write_u8(0),
            NodeContent::Scalar(value) => value.hash(state),
            NodeContent::Items(items) => hash_list(items, state),
        }
    }
}

#[cfg(test)]
#[path = "node_test.rs"]
mod node_test;
