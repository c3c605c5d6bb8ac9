//! Typed read coercions
//!
//! Rules applied by the named entity getters (`get_decimal`, `get_date`, ...).
//! Every function receives a non-null value and either converts it, reports
//! an incompatible type, or reports malformed text.

use crate::models::format::parse_date;
use crate::models::{DataObjectError, Locale, Value};
use chrono::NaiveDateTime;
use num_bigint::BigInt;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use std::str::FromStr;
use uuid::Uuid;

/// Why a coercion failed, before the attribute name is known
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum CoerceError {
    /// The value's type can never be read as the target type
    Incompatible { expected: &'static str },
    /// The value has a convertible type but its content is malformed
    Malformed { expected: &'static str, reason: String },
}

impl CoerceError {
    /// Attach attribute context
    pub(crate) fn at(self, name: &str, value: &Value) -> DataObjectError {
        match self {
            CoerceError::Incompatible { expected } => {
                DataObjectError::type_mismatch(name, expected, value.type_name())
            }
            CoerceError::Malformed { expected, reason } => {
                DataObjectError::invalid_format(name, expected, value.to_display_string(), reason)
            }
        }
    }
}

type Coerced<T> = Result<T, CoerceError>;

fn incompatible<T>(expected: &'static str) -> Coerced<T> {
    Err(CoerceError::Incompatible { expected })
}

fn malformed<T>(expected: &'static str, reason: impl ToString) -> Coerced<T> {
    Err(CoerceError::Malformed {
        expected,
        reason: reason.to_string(),
    })
}

pub(crate) fn string(value: &Value) -> Coerced<&str> {
    match value {
        Value::String(s) => Ok(s),
        _ => incompatible("String"),
    }
}

pub(crate) fn boolean(value: &Value) -> Coerced<bool> {
    match value {
        Value::Bool(b) => Ok(*b),
        _ => incompatible("Boolean"),
    }
}

/// Convert a double through its shortest round-trip text, so `42.0` keeps scale 1
fn decimal_from_double(d: f64) -> Coerced<Decimal> {
    if !d.is_finite() {
        return malformed("Decimal", format!("{} has no decimal representation", d));
    }
    let text = format!("{:?}", d);
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .or_else(|_| Decimal::from_f64(d).ok_or(rust_decimal::Error::ExceedsMaximumPossibleValue))
        .or_else(|err| malformed("Decimal", err))
}

pub(crate) fn decimal(value: &Value) -> Coerced<Decimal> {
    match value {
        Value::Decimal(d) => Ok(*d),
        Value::Integer(i) => Ok(Decimal::from(*i)),
        Value::Double(d) => decimal_from_double(*d),
        Value::BigInteger(b) => {
            Decimal::from_str(&b.to_string()).or_else(|err| malformed("Decimal", err))
        }
        _ => incompatible("Decimal"),
    }
}

pub(crate) fn integer(value: &Value) -> Coerced<i64> {
    match value {
        Value::Integer(i) => Ok(*i),
        Value::BigInteger(b) => {
            i64::try_from(b).or_else(|_| malformed("Integer", "value exceeds 64-bit range"))
        }
        Value::Double(d) if d.fract() == 0.0 && d.is_finite() => {
            d.to_i64().map_or_else(|| malformed("Integer", "value exceeds 64-bit range"), Ok)
        }
        Value::Double(_) => malformed("Integer", "value has a fractional part"),
        Value::Decimal(d) if d.fract().is_zero() => {
            d.to_i64().map_or_else(|| malformed("Integer", "value exceeds 64-bit range"), Ok)
        }
        Value::Decimal(_) => malformed("Integer", "value has a fractional part"),
        _ => incompatible("Integer"),
    }
}

pub(crate) fn double(value: &Value) -> Coerced<f64> {
    match value {
        Value::Double(d) => Ok(*d),
        Value::Integer(i) => Ok(*i as f64),
        Value::BigInteger(b) => b
            .to_f64()
            .map_or_else(|| malformed("Double", "value exceeds double range"), Ok),
        Value::Decimal(d) => d
            .to_f64()
            .map_or_else(|| malformed("Double", "value exceeds double range"), Ok),
        _ => incompatible("Double"),
    }
}

pub(crate) fn big_integer(value: &Value) -> Coerced<BigInt> {
    match value {
        Value::BigInteger(b) => Ok(b.clone()),
        Value::Integer(i) => Ok(BigInt::from(*i)),
        Value::Decimal(d) if d.fract().is_zero() => {
            BigInt::from_str(&d.trunc().normalize().to_string())
                .or_else(|err| malformed("BigInteger", err))
        }
        Value::Double(d) if d.fract() == 0.0 && d.is_finite() => {
            decimal_from_double(*d).and_then(|dec| big_integer(&Value::Decimal(dec)))
        }
        Value::Decimal(_) | Value::Double(_) => malformed("BigInteger", "value has a fractional part"),
        Value::String(s) => BigInt::from_str(s).or_else(|err| malformed("BigInteger", err)),
        _ => incompatible("BigInteger"),
    }
}

pub(crate) fn date(value: &Value, pattern: &str) -> Coerced<NaiveDateTime> {
    match value {
        Value::Date(d) => Ok(*d),
        Value::String(s) => parse_date(s, pattern).or_else(|err| malformed("Date", err)),
        _ => incompatible("Date"),
    }
}

pub(crate) fn uuid(value: &Value) -> Coerced<Uuid> {
    match value {
        Value::Uuid(u) => Ok(*u),
        Value::String(s) => Uuid::parse_str(s).or_else(|err| malformed("UUID", err)),
        _ => incompatible("UUID"),
    }
}

pub(crate) fn locale(value: &Value) -> Coerced<Locale> {
    match value {
        Value::Locale(l) => Ok(l.clone()),
        Value::String(s) => Locale::parse(s).or_else(|err| malformed("Locale", err.reason)),
        _ => incompatible("Locale"),
    }
}
