//! Numeric helpers built on the collection engine.
//!
//! Aggregates are computed in `f64` and rounded to
//! [`PRECISION`](crate::define::PRECISION) significant digits, which keeps
//! results such as `0.1 + 0.2` at `0.3`.
//!
//! ```rust
//! use kollect::collect::Operation;
//! use kollect::math::{avg, sum};
//! use serde_json::json;
//!
//! assert_eq!(sum().apply(json!([0.1, 0.2])), Ok(0.3));
//! assert_eq!(avg().key("age").apply(json!([{ "age": 30 }, { "age": 40 }])), Ok(35.0));
//! ```

use std::sync::Arc;

use serde_json::Value;

use crate::collect::{Filter, Key, Map, Operation, Pluck, filter, map, pluck, reduce, values};
use crate::define::PRECISION;
use crate::effect::{Error, Result};
use crate::path::Path;
use crate::predicate::{is_collect, is_divisible};
use crate::value::number;

const SEQUENCE_OR_MAPPING: &str = "sequence or mapping";

/// Adds two values: numbers add, strings concatenate.
///
/// Returns `None` for any other pairing.
pub fn plus(left: &Value, right: &Value) -> Option<Value> {
    match (left, right) {
        (Value::Number(_), Value::Number(_)) => {
            match (left.as_i64(), right.as_i64()) {
                (Some(left), Some(right)) => left.checked_add(right).map(Value::from),
                _ => None,
            }
            .or_else(|| Some(number(left.as_f64()? + right.as_f64()?)))
        }
        (Value::String(left), Value::String(right)) => Some(Value::String(format!("{left}{right}"))),
        _ => None,
    }
}

/// Rounds to [`PRECISION`] significant digits.
pub fn round_precision(value: f64) -> f64 {
    format!("{value:.*e}", PRECISION - 1)
        .parse()
        .unwrap_or(value)
}

// =============================================================================
// add
// =============================================================================

/// Adds a bound operand. Built by [`add`].
#[derive(Debug, Clone)]
pub struct Add {
    operand: Arc<Value>,
}

/// Builds an [`Add`] of `operand`.
///
/// A number adds to a number, a string concatenates in front of a string,
/// and a container adds the operand to each of its values.
///
/// ```rust
/// use kollect::collect::Operation;
/// use kollect::math::add;
/// use serde_json::json;
///
/// assert_eq!(add(2).apply(json!(3)), Ok(json!(5)));
/// assert_eq!(add("a").apply(json!("b")), Ok(json!("ab")));
/// assert_eq!(add(10).apply(json!([1, 2])), Ok(json!([11, 12])));
/// ```
pub fn add(operand: impl Into<Value>) -> Add {
    Add {
        operand: Arc::new(operand.into()),
    }
}

impl Add {
    fn single(&self, value: &Value) -> Result<Value> {
        plus(&self.operand, value)
            .ok_or_else(|| Error::type_kind(Self::NAME, "a value of the operand's variant", value))
    }
}

impl Operation for Add {
    const NAME: &'static str = "add";
    type Output = Value;

    fn run(&self, container: &Value) -> Result<Value> {
        match container {
            Value::Array(items) => items.iter().map(|item| self.single(item)).collect(),
            Value::Object(object) => object
                .iter()
                .map(|(name, value)| Ok((name.clone(), self.single(value)?)))
                .collect::<Result<_>>()
                .map(Value::Object),
            single => self.single(single),
        }
    }
}

// =============================================================================
// sum / avg
// =============================================================================

#[derive(Clone, Default)]
enum Summand {
    #[default]
    Value,
    Key(Pluck),
    By(Map),
}

impl Summand {
    /// The summed terms as a sequence.
    fn terms(&self, operation: &'static str, container: &Value) -> Result<Value> {
        if !is_collect(container) {
            return Err(Error::type_kind(operation, SEQUENCE_OR_MAPPING, container));
        }
        match self {
            Self::Value => values().run(container),
            Self::Key(pluck) => pluck.run(&values().run(container)?),
            Self::By(map) => values().run(&map.run(container)?),
        }
    }

    fn total(&self, operation: &'static str, container: &Value) -> Result<f64> {
        let terms = self.terms(operation, container)?;
        if let Some(term) = terms
            .as_array()
            .into_iter()
            .flatten()
            .find(|term| !term.is_number())
        {
            return Err(Error::type_kind(operation, "numbers", term));
        }
        let total = reduce(|total: Value, term: &Value| plus(&total, term).unwrap_or(total))
            .seed(0)
            .run(&terms)?;
        Ok(round_precision(total.as_f64().unwrap_or_default()))
    }
}

/// Sums the values of a container. Built by [`sum`].
#[derive(Clone, Default)]
pub struct Sum {
    summand: Summand,
}

/// Builds a [`Sum`]. An empty container sums to `0`.
///
/// # Errors
///
/// Applying it fails with [`Error::TypeKind`] when a summed value is not a
/// number.
pub fn sum() -> Sum {
    Sum::default()
}

/// Sums the values at a path, or of a function, instead of the values
/// themselves.
macro_rules! summand_builders {
    ($name:ident) => {
        impl $name {
            /// Uses the value at `path` of every entry; entries missing it
            /// are skipped.
            #[must_use]
            pub fn key(mut self, path: impl Into<Path>) -> Self {
                self.summand = Summand::Key(pluck(path));
                self
            }

            /// Uses `function(value, key)` of every entry.
            #[must_use]
            pub fn by<R, F>(mut self, function: F) -> Self
            where
                R: Into<Value>,
                F: Fn(&Value, Key<'_>) -> R + Send + Sync + 'static,
            {
                self.summand = Summand::By(map(function));
                self
            }
        }
    };
}

summand_builders!(Sum);
summand_builders!(Avg);

impl Operation for Sum {
    const NAME: &'static str = "sum";
    type Output = f64;

    fn run(&self, container: &Value) -> Result<f64> {
        self.summand.total(Self::NAME, container)
    }
}

/// Averages the values of a container. Built by [`avg`].
#[derive(Clone, Default)]
pub struct Avg {
    summand: Summand,
}

/// Builds an [`Avg`]: the sum divided by the [`size`] of the container.
///
/// An empty container averages to `NaN`.
///
/// ```rust
/// use kollect::collect::Operation;
/// use kollect::math::avg;
/// use serde_json::{json, Value};
///
/// let doubled = avg().by(|value: &Value, _| value.as_f64().unwrap_or_default() * 2.0);
/// assert_eq!(doubled.apply(json!([1, 2, 3])), Ok(4.0));
/// assert!(avg().apply(json!([])).unwrap().is_nan());
/// ```
pub fn avg() -> Avg {
    Avg::default()
}

impl Operation for Avg {
    const NAME: &'static str = "avg";
    type Output = f64;

    #[allow(clippy::cast_precision_loss)]
    fn run(&self, container: &Value) -> Result<f64> {
        let total = self.summand.total(Self::NAME, container)?;
        Ok(total / size_of(container) as f64)
    }
}

// =============================================================================
// divisible
// =============================================================================

/// Keeps the numbers divisible by every bound divisor. Built by
/// [`divisible`] and [`divisible_all`].
#[derive(Clone)]
pub struct Divisible {
    filter: Filter,
}

/// Keeps the values divisible by `divisor`.
///
/// ```rust
/// use kollect::collect::Operation;
/// use kollect::math::{divisible, divisible_all};
/// use serde_json::json;
///
/// assert_eq!(divisible(2.0).apply(json!([1, 2, 3, 4])), Ok(json!([2, 4])));
/// assert_eq!(divisible_all([2.0, 3.0]).apply(json!([2, 3, 6, 12])), Ok(json!([6, 12])));
/// ```
pub fn divisible(divisor: f64) -> Divisible {
    divisible_all([divisor])
}

/// Keeps the values divisible by every one of `divisors`.
pub fn divisible_all(divisors: impl IntoIterator<Item = f64>) -> Divisible {
    let divisors: Arc<[f64]> = divisors.into_iter().collect();
    Divisible {
        filter: filter().by(move |value: &Value, _| {
            divisors.iter().all(|divisor| is_divisible(value, *divisor))
        }),
    }
}

impl Operation for Divisible {
    const NAME: &'static str = "divisible";
    type Output = Value;

    fn run(&self, container: &Value) -> Result<Value> {
        self.filter.run(container)
    }
}

// =============================================================================
// size / length
// =============================================================================

fn size_of(value: &Value) -> usize {
    match value {
        Value::Array(items) => items.len(),
        Value::String(text) => text.chars().count(),
        Value::Object(object) => object.len(),
        _ => 0,
    }
}

/// The number of entries or characters. Built by [`size`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Size;

/// Builds a [`Size`]: sequence length, string character count or mapping
/// key count; `0` for anything else.
///
/// ```rust
/// use kollect::collect::Operation;
/// use kollect::math::size;
/// use serde_json::json;
///
/// assert_eq!(size().apply(json!({ "a": 1, "b": 2 })), Ok(2));
/// assert_eq!(size().apply(json!("çay")), Ok(3));
/// assert_eq!(size().apply(json!(42)), Ok(0));
/// ```
pub const fn size() -> Size {
    Size
}

impl Operation for Size {
    const NAME: &'static str = "size";
    type Output = usize;

    fn run(&self, container: &Value) -> Result<usize> {
        Ok(size_of(container))
    }
}

/// The length of a sequence or string. Built by [`length`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Length;

/// Builds a [`Length`].
pub const fn length() -> Length {
    Length
}

impl Operation for Length {
    const NAME: &'static str = "length";
    type Output = usize;

    fn run(&self, container: &Value) -> Result<usize> {
        match container {
            Value::Array(_) | Value::String(_) => Ok(size_of(container)),
            other => Err(Error::type_kind(Self::NAME, "sequence or string", other)),
        }
    }
}
