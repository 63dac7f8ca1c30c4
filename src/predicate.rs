//! Runtime value predicates.
//!
//! Every predicate is a total function: it never fails and never panics,
//! whatever the value it is handed.
//!
//! ```rust
//! use kollect::predicate::{is_collect, is_useful};
//! use serde_json::json;
//!
//! assert!(is_collect(&json!({ "a": 1 })));
//! assert!(!is_collect(&json!("text")));
//! assert!(is_useful(&json!(0)));
//! assert!(!is_useful(&json!([])));
//! ```

use serde_json::Value;

use crate::collect::Collection;
use crate::define::{RGX_EMAIL, RGX_WHITESPACE};

/// Returns `true` for an ordered sequence.
pub const fn is_array(value: &Value) -> bool {
    matches!(value, Value::Array(_))
}

/// Returns `true` for a key/value mapping.
pub const fn is_object(value: &Value) -> bool {
    matches!(value, Value::Object(_))
}

/// Returns `true` for either container variant.
pub const fn is_collect(value: &Value) -> bool {
    matches!(value, Value::Array(_) | Value::Object(_))
}

/// Returns `true` for values with a length: sequences and strings.
pub const fn is_array_like(value: &Value) -> bool {
    matches!(value, Value::Array(_) | Value::String(_))
}

/// Returns `true` for numbers.
pub const fn is_number(value: &Value) -> bool {
    matches!(value, Value::Number(_))
}

/// Returns `true` for numbers without a fractional part.
pub fn is_integer(value: &Value) -> bool {
    match value {
        Value::Number(number) => {
            number.is_i64() || number.is_u64() || number.as_f64().is_some_and(|n| n.fract() == 0.0)
        }
        _ => false,
    }
}

/// Returns `true` for strings.
pub const fn is_string(value: &Value) -> bool {
    matches!(value, Value::String(_))
}

/// Returns `true` for booleans.
pub const fn is_boolean(value: &Value) -> bool {
    matches!(value, Value::Bool(_))
}

/// Returns `true` for `null`.
pub const fn is_null(value: &Value) -> bool {
    matches!(value, Value::Null)
}

/// Returns `true` for anything that is not a container.
pub const fn is_primitive(value: &Value) -> bool {
    !is_collect(value)
}

/// Returns `true` when no value is present.
pub const fn is_undefined(value: Option<&Value>) -> bool {
    value.is_none()
}

/// Returns `true` when a value is present, `null` included.
pub const fn is_defined(value: Option<&Value>) -> bool {
    value.is_some()
}

/// Returns `true` for `null`, the empty string and empty containers.
pub fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(text) => text.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(object) => object.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

/// The rule `filter()` keeps values by when no callback is given.
///
/// `0` and `false` are useful; `null`, `""`, `[]` and `{}` are not.
pub fn is_useful(value: &Value) -> bool {
    !is_empty(value)
}

/// Returns `true` when `value` is a number divisible by `divisor`.
///
/// A zero divisor divides nothing.
pub fn is_divisible(value: &Value, divisor: f64) -> bool {
    value
        .as_f64()
        .is_some_and(|dividend| divisor != 0.0 && dividend % divisor == 0.0)
}

/// Returns `true` for strings shaped like an e-mail address.
pub fn is_email(value: &Value) -> bool {
    value.as_str().is_some_and(|text| RGX_EMAIL.is_match(text))
}

/// Returns `true` for strings made only of whitespace, the empty one included.
pub fn is_blank(value: &Value) -> bool {
    value.as_str().is_some_and(|text| RGX_WHITESPACE.is_match(text))
}

/// Returns `true` when `container` is a deferred value.
///
/// ```rust
/// use kollect::Deferred;
/// use kollect::predicate::is_deferred;
/// use serde_json::json;
///
/// assert!(is_deferred(&Deferred::pure(json!([]))));
/// assert!(!is_deferred(&json!([])));
/// ```
pub const fn is_deferred<C: Collection>(_container: &C) -> bool {
    C::DEFERRED
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_container_predicates() {
        assert!(is_array(&json!([])));
        assert!(!is_array(&json!({})));
        assert!(is_object(&json!({})));
        assert!(is_array_like(&json!("abc")));
        assert!(!is_array_like(&json!({})));
        assert!(is_primitive(&json!(1)));
    }

    #[test]
    fn test_null() {
        assert!(is_null(&Value::Null));
        assert!(!is_null(&json!(false)));
        assert!(!is_null(&json!([])));
    }

    #[test]
    fn test_integer() {
        assert!(is_integer(&json!(3)));
        assert!(is_integer(&json!(3.0)));
        assert!(!is_integer(&json!(3.5)));
        assert!(!is_integer(&json!("3")));
    }

    #[test]
    fn test_useful_values() {
        for kept in [json!(0), json!(false), json!("a"), json!([0]), json!({ "a": null })] {
            assert!(is_useful(&kept), "{kept} should be kept");
        }
        for dropped in [json!(null), json!(""), json!([]), json!({})] {
            assert!(!is_useful(&dropped), "{dropped} should be dropped");
        }
    }

    #[test]
    fn test_divisible() {
        assert!(is_divisible(&json!(9), 3.0));
        assert!(!is_divisible(&json!(10), 3.0));
        assert!(!is_divisible(&json!(10), 0.0));
        assert!(!is_divisible(&json!("9"), 3.0));
    }

    #[test]
    fn test_text_predicates() {
        assert!(is_email(&json!("john@example.com")));
        assert!(!is_email(&json!("john")));
        assert!(is_blank(&json!("  ")));
        assert!(!is_blank(&json!(" x ")));
        assert!(!is_blank(&json!(null)));
    }

    #[test]
    fn test_undefined() {
        assert!(is_undefined(None));
        assert!(is_defined(Some(&json!(null))));
    }
}
