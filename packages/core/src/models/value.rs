//! Attribute Values
//!
//! [`Value`] is the dynamically typed payload carried by value and list nodes.
//! It covers the scalar types business entities commonly use (text, numbers,
//! dates, UUIDs, locales), nested entities and untyped lists and maps.
//!
//! # Equality
//!
//! - Doubles compare by bit pattern, so `NaN == NaN` and `0.0 != -0.0`
//! - Decimals compare numerically (`42.0 == 42`)
//! - Maps and nested entities compare independent of insertion order
//!
//! `Hash` is consistent with this equality, which makes values (and entities)
//! usable as map keys.
//!
//! # Examples
//!
//! ```rust
//! use dataobject_core::models::Value;
//!
//! let v = Value::from("foo");
//! assert_eq!(v.type_name(), "String");
//! assert_eq!(v.as_str(), Some("foo"));
//!
//! let absent: Option<i64> = None;
//! assert!(Value::from(absent).is_null());
//! ```

use crate::models::{DataObjectType, DoEntity, Locale, ValueKind};
use chrono::NaiveDateTime;
use indexmap::IndexMap;
use num_bigint::BigInt;
use rust_decimal::Decimal;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use uuid::Uuid;

/// Dynamically typed attribute value
#[derive(Debug, Clone, Default)]
pub enum Value {
    /// Explicit null (attribute exists without a value)
    #[default]
    Null,
    Bool(bool),
    Integer(i64),
    Double(f64),
    BigInteger(BigInt),
    Decimal(Decimal),
    String(String),
    Date(NaiveDateTime),
    Uuid(Uuid),
    Locale(Locale),
    /// Nested entity
    Entity(Box<DoEntity>),
    /// Untyped list stored inside a value node
    List(Vec<Value>),
    /// Untyped string keyed map
    Map(IndexMap<String, Value>),
}

impl Value {
    /// Human-readable type name used in error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "Null",
            Value::Bool(_) => "Boolean",
            Value::Integer(_) => "Integer",
            Value::Double(_) => "Double",
            Value::BigInteger(_) => "BigInteger",
            Value::Decimal(_) => "Decimal",
            Value::String(_) => "String",
            Value::Date(_) => "Date",
            Value::Uuid(_) => "UUID",
            Value::Locale(_) => "Locale",
            Value::Entity(_) => "Entity",
            Value::List(_) => "List",
            Value::Map(_) => "Map",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_entity(&self) -> Option<&DoEntity> {
        match self {
            Value::Entity(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Whether the value is one of the numeric variants
    pub fn is_number(&self) -> bool {
        matches!(
            self,
            Value::Integer(_) | Value::Double(_) | Value::BigInteger(_) | Value::Decimal(_)
        )
    }

    /// Textual rendering used by string mappers
    ///
    /// Doubles keep their fractional part (`42.0`), dates use the default
    /// pattern and null renders as `null`.
    pub fn to_display_string(&self) -> String {
        match self {
            Value::Null => "null".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Integer(i) => i.to_string(),
            Value::Double(d) => format!("{:?}", d),
            Value::BigInteger(b) => b.to_string(),
            Value::Decimal(d) => d.to_string(),
            Value::String(s) => s.clone(),
            Value::Date(d) => crate::models::format::format_date(d, crate::models::format::DEFAULT_DATE_PATTERN),
            Value::Uuid(u) => u.to_string(),
            Value::Locale(l) => l.to_string(),
            Value::Entity(e) => format!("{:?}", e),
            Value::List(items) => {
                let parts: Vec<String> = items.iter().map(Value::to_display_string).collect();
                format!("[{}]", parts.join(", "))
            }
            Value::Map(map) => {
                let parts: Vec<String> = map
                    .iter()
                    .map(|(k, v)| format!("{}={}", k, v.to_display_string()))
                    .collect();
                format!("{{{}}}", parts.join(", "))
            }
        }
    }
}

// ============================================================================
// Equality and hashing
// ============================================================================

fn canonical_double_bits(d: f64) -> u64 {
    if d.is_nan() {
        f64::NAN.to_bits()
    } else {
        d.to_bits()
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Double(a), Value::Double(b)) => {
                canonical_double_bits(*a) == canonical_double_bits(*b)
            }
            (Value::BigInteger(a), Value::BigInteger(b)) => a == b,
            (Value::Decimal(a), Value::Decimal(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Date(a), Value::Date(b)) => a == b,
            (Value::Uuid(a), Value::Uuid(b)) => a == b,
            (Value::Locale(a), Value::Locale(b)) => a == b,
            (Value::Entity(a), Value::Entity(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

/// Hash of a single item, used for order-independent combination
pub(crate) fn item_hash<T: Hash + ?Sized>(item: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    item.hash(&mut hasher);
    hasher.finish()
}

/// Hash a list the same way `Value::List` hashes
pub(crate) fn hash_list<H: Hasher>(items: &[Value], state: &mut H) {
    std::mem::discriminant(&Value::List(Vec::new())).hash(state);
    items.hash(state);
}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        if let Value::List(items) = self {
            hash_list(items, state);
            return;
        }
        std::mem::discriminant(self).hash(state);
        match self {
            Value::Null | Value::List(_) => {}
            Value::Bool(b) => b.hash(state),
            Value::Integer(i) => i.hash(state),
            Value::Double(d) => canonical_double_bits(*d).hash(state),
            Value::BigInteger(b) => b.hash(state),
            Value::Decimal(d) => d.hash(state),
            Value::String(s) => s.hash(state),
            Value::Date(d) => d.hash(state),
            Value::Uuid(u) => u.hash(state),
            Value::Locale(l) => l.hash(state),
            Value::Entity(e) => e.hash(state),
            Value::Map(map) => {
                let combined = map
                    .iter()
                    .fold(0u64, |acc, entry| acc.wrapping_add(item_hash(&entry)));
                state.write_u64(combined);
            }
        }
    }
}

// ============================================================================
// Conversions into Value
// ============================================================================

macro_rules! impl_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant(v.into())
                }
            }
        )*
    };
}

impl_from! {
    bool => Bool,
    i8 => Integer,
    i16 => Integer,
    i32 => Integer,
    i64 => Integer,
    u8 => Integer,
    u16 => Integer,
    u32 => Integer,
    f32 => Double,
    f64 => Double,
    BigInt => BigInteger,
    Decimal => Decimal,
    String => String,
    &str => String,
    NaiveDateTime => Date,
    Uuid => Uuid,
    Locale => Locale,
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        match i64::try_from(v) {
            Ok(i) => Value::Integer(i),
            Err(_) => Value::BigInteger(BigInt::from(v)),
        }
    }
}

impl From<DoEntity> for Value {
    fn from(entity: DoEntity) -> Self {
        Value::Entity(Box::new(entity))
    }
}

impl From<IndexMap<String, Value>> for Value {
    fn from(map: IndexMap<String, Value>) -> Self {
        Value::Map(map)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

// ============================================================================
// Strict extraction
// ============================================================================

/// Strict (non-coercing) extraction of a Rust type from a [`Value`]
///
/// Used by typed node access and [`DoEntity::get_as`]: a value converts only
/// if it already is of the requested type. Coercing reads (parsing strings
/// into dates, widening numbers into decimals) are provided by the named
/// entity getters instead.
pub trait FromValue: Sized {
    /// Type name used in mismatch errors
    fn type_label() -> &'static str;

    /// Classification used by attribute descriptors
    fn value_kind() -> ValueKind;

    /// Extract from a non-null value, `None` if the value has another type
    fn from_value(value: &Value) -> Option<Self>;
}

macro_rules! impl_from_value {
    ($ty:ty, $label:expr, $kind:expr, $pat:pat => $out:expr) => {
        impl FromValue for $ty {
            fn type_label() -> &'static str {
                $label
            }

            fn value_kind() -> ValueKind {
                $kind
            }

            fn from_value(value: &Value) -> Option<Self> {
                match value {
                    $pat => Some($out),
                    _ => None,
                }
            }
        }
    };
}

impl_from_value!(String, "String", ValueKind::String, Value::String(s) => s.clone());
impl_from_value!(bool, "Boolean", ValueKind::Boolean, Value::Bool(b) => *b);
impl_from_value!(i64, "Integer", ValueKind::Integer, Value::Integer(i) => *i);
impl_from_value!(f64, "Double", ValueKind::Double, Value::Double(d) => *d);
impl_from_value!(BigInt, "BigInteger", ValueKind::BigInteger, Value::BigInteger(b) => b.clone());
impl_from_value!(Decimal, "Decimal", ValueKind::Decimal, Value::Decimal(d) => *d);
impl_from_value!(NaiveDateTime, "Date", ValueKind::Date, Value::Date(d) => *d);
impl_from_value!(Uuid, "UUID", ValueKind::Uuid, Value::Uuid(u) => *u);
impl_from_value!(Locale, "Locale", ValueKind::Locale, Value::Locale(l) => l.clone());
impl_from_value!(Vec<Value>, "List", ValueKind::Object, Value::List(items) => items.clone());
impl_from_value!(
    IndexMap<String, Value>,
    "Map",
    ValueKind::Object,
    Value::Map(map) => map.clone()
);

impl FromValue for DoEntity {
    fn type_label() -> &'static str {
        "Entity"
    }

    fn value_kind() -> ValueKind {
        ValueKind::Entity(DataObjectType::of::<DoEntity>())
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Entity(e) => Some(e.as_ref().clone()),
            _ => None,
        }
    }
}

impl FromValue for Value {
    fn type_label() -> &'static str {
        "Object"
    }

    fn value_kind() -> ValueKind {
        ValueKind::Object
    }

    fn from_value(value: &Value) -> Option<Self> {
        Some(value.clone())
    }
}

#[cfg(test)]
#[path = "value_test.rs"]
mod value_test;
