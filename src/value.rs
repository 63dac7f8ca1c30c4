//! Helpers over the [`serde_json::Value`] data model.
//!
//! `Value::Array` plays the ordered sequence, `Value::Object` the key/value
//! mapping. Mappings keep insertion order (`preserve_order`).

use serde_json::{Number, Value};

use crate::define::{MAX_SAFE_INTEGER, RAW_COMMA};

/// A key/value mapping in insertion order.
pub type Object = serde_json::Map<String, Value>;

/// Returns the name of the variant of `value`, as used in error messages.
pub const fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "sequence",
        Value::Object(_) => "mapping",
    }
}

/// Builds a number value, keeping integral results as integers.
///
/// Non-finite numbers have no JSON representation and become `null`.
///
/// ```rust
/// use kollect::value::number;
/// use serde_json::json;
///
/// assert_eq!(number(6.0), json!(6));
/// assert_eq!(number(0.5), json!(0.5));
/// assert_eq!(number(f64::NAN), json!(null));
/// ```
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn number(value: f64) -> Value {
    if value.is_finite() && value.fract() == 0.0 && value.abs() <= MAX_SAFE_INTEGER as f64 {
        Value::from(value as i64)
    } else {
        Number::from_f64(value).map_or(Value::Null, Value::Number)
    }
}

/// Renders a value the way a joined text shows it.
///
/// Strings render raw, `null` renders empty, integral numbers drop their
/// fraction, sequences join their items with `,`, and mappings render as
/// JSON.
pub fn to_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(raw) => number_text(raw),
        Value::String(text) => text.clone(),
        Value::Array(items) => items.iter().map(to_text).collect::<Vec<_>>().join(RAW_COMMA),
        Value::Object(_) => value.to_string(),
    }
}

fn number_text(raw: &Number) -> String {
    match raw.as_f64() {
        Some(float) if raw.is_f64() => match number(float) {
            Value::Number(normalised) if !normalised.is_f64() => normalised.to_string(),
            _ => float.to_string(),
        },
        _ => raw.to_string(),
    }
}
