//! Raw category values and their canonical string form.
//!
//! Category values reach a domain as whatever the upstream fit produced:
//! numbers, strings, booleans and the occasional null. Every value that ends
//! up in an exported document goes through [`format_value`], so a category
//! declared on a feature and the same category listed in its statistics are
//! always the exact same string.
//!
//! # Formatting rules
//! ```text
//! Str("red")   -> "red"
//! Int(1)       -> "1"
//! Float(1.0)   -> "1"        (same as Int(1))
//! Float(0.25)  -> "0.25"
//! Float(-0.0)  -> "0"
//! Float(NaN)   -> "NaN"
//! Float(inf)   -> "INF"
//! Bool(true)   -> "true"
//! Null         -> TypeMismatch
//! ```

use crate::error::{DomainError, Result};
use crate::schema::DataType;
use serde::{Deserialize, Serialize};

/// A raw value as found in fitted state.
///
/// Deserializes untagged, so the JSON array `[null, true, 1, 1.5, "a"]` maps
/// onto `Null`, `Bool`, `Int`, `Float` and `Str` respectively.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl Value {
    /// Short name of the variant, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v as i64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(v as f64)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

/// Format a single value into its canonical string form.
///
/// # Errors
/// Returns [`DomainError::TypeMismatch`] for [`Value::Null`].
pub fn format_value(value: &Value) -> Result<String> {
    match value {
        Value::Null => Err(DomainError::type_mismatch(
            "value formatting",
            "null values have no category label",
        )),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Int(i) => Ok(i.to_string()),
        Value::Float(f) => Ok(format_float(*f)),
        Value::Str(s) => Ok(s.clone()),
    }
}

fn format_float(f: f64) -> String {
    if f.is_nan() {
        "NaN".to_string()
    } else if f.is_infinite() {
        let text = if f > 0.0 { "INF" } else { "-INF" };
        text.to_string()
    } else if f == 0.0 {
        // covers -0.0
        "0".to_string()
    } else {
        // Display is locale independent, never uses an exponent and prints
        // integral values without a fractional part.
        f.to_string()
    }
}

/// Format every value, preserving order.
///
/// Fails on the first value that cannot be formatted.
pub fn format_values(values: &[Value]) -> Result<Vec<String>> {
    values.iter().map(format_value).collect()
}

/// Coerce a count-like value to an integer.
///
/// Integral floats are accepted; fractional, non-finite or out of range floats
/// and all non-numeric values are rejected.
pub fn as_integer(value: &Value) -> Result<i64> {
    match value {
        Value::Int(i) => Ok(*i),
        Value::Float(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < 9.2e18 => Ok(*f as i64),
        other => Err(DomainError::type_mismatch(
            "integer coercion",
            format!("expected an integer, got {} {:?}", other.type_name(), other),
        )),
    }
}

/// Coerce a numeric value to `f64`.
pub fn as_number(value: &Value) -> Result<f64> {
    match value {
        Value::Int(i) => Ok(*i as f64),
        Value::Float(f) => Ok(*f),
        other => Err(DomainError::type_mismatch(
            "number coercion",
            format!("expected a number, got {} {:?}", other.type_name(), other),
        )),
    }
}

/// Infer the declared data type of a collection of values.
///
/// Nulls are skipped. Integers mixed with floats widen to `Double`; any other
/// mix, or an empty collection, yields `default`.
pub fn infer_data_type(values: &[Value], default: DataType) -> DataType {
    let mut inferred: Option<DataType> = None;

    for value in values {
        let current = match value {
            Value::Null => continue,
            Value::Bool(_) => DataType::Boolean,
            Value::Int(_) => DataType::Integer,
            Value::Float(_) => DataType::Double,
            Value::Str(_) => DataType::String,
        };

        inferred = match (inferred, current) {
            (None, t) => Some(t),
            (Some(a), b) if a == b => Some(a),
            (Some(DataType::Integer), DataType::Double)
            | (Some(DataType::Double), DataType::Integer) => Some(DataType::Double),
            _ => return default,
        };
    }

    inferred.unwrap_or(default)
}
