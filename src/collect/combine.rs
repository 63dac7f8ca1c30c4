//! Operations combining a container with a bound argument, or its entries
//! with each other.

use std::sync::Arc;

use serde_json::Value;

use super::dispatch::Operation;
use super::{CONTAINER, members};
use crate::define::RAW_COMMA;
use crate::effect::{Error, Result};
use crate::path::Path;
use crate::value::{Object, to_text};

// =============================================================================
// merge / diff
// =============================================================================

/// Appends or overlays a bound container. Built by [`merge`].
#[derive(Debug, Clone)]
pub struct Merge {
    seed: Arc<Value>,
}

/// Builds a [`Merge`] of `seed` into the container.
///
/// Sequences are concatenated, container first. Mappings are overlaid by
/// `seed`, whose entries win on conflicting keys.
///
/// ```rust
/// use kollect::collect::{merge, Operation};
/// use serde_json::json;
///
/// assert_eq!(merge(json!(["orange"])).apply(json!(["apple"])), Ok(json!(["apple", "orange"])));
/// assert_eq!(
///     merge(json!({ "name": "Nikola" })).apply(json!({ "age": 32 })),
///     Ok(json!({ "age": 32, "name": "Nikola" }))
/// );
/// ```
pub fn merge(seed: impl Into<Value>) -> Merge {
    Merge {
        seed: Arc::new(seed.into()),
    }
}

impl Operation for Merge {
    const NAME: &'static str = "merge";
    type Output = Value;

    fn run(&self, container: &Value) -> Result<Value> {
        match (container, &*self.seed) {
            (Value::Array(items), Value::Array(seed)) => {
                Ok(Value::Array(items.iter().chain(seed).cloned().collect()))
            }
            (Value::Object(object), Value::Object(seed)) => {
                let mut merged = object.clone();
                for (name, value) in seed {
                    merged.insert(name.clone(), value.clone());
                }
                Ok(Value::Object(merged))
            }
            (Value::Array(_), seed) => Err(Error::type_kind(Self::NAME, "sequence", seed)),
            (Value::Object(_), seed) => Err(Error::type_kind(Self::NAME, "mapping", seed)),
            (other, _) => Err(Error::type_kind(Self::NAME, CONTAINER, other)),
        }
    }
}

/// What a container has that a bound one lacks. Built by [`diff`].
#[derive(Debug, Clone)]
pub struct Diff {
    base: Arc<Value>,
}

/// Builds a [`Diff`] against `base`.
///
/// For sequences, the items of the container equal to no item of `base`, in
/// container order and with duplicates. For mappings, the entries whose key
/// is missing from `base` or whose value differs.
///
/// ```rust
/// use kollect::collect::{diff, Operation};
/// use serde_json::json;
///
/// let compare = diff(json!([1, 2, 3, 4, 7]));
///
/// assert_eq!(compare.apply(json!([1, 2, 3, 4, 5, 6, 7])), Ok(json!([5, 6])));
/// assert_eq!(compare.apply(json!([1, 2, 3, 4, 12, 15])), Ok(json!([12, 15])));
/// ```
pub fn diff(base: impl Into<Value>) -> Diff {
    Diff {
        base: Arc::new(base.into()),
    }
}

impl Operation for Diff {
    const NAME: &'static str = "diff";
    type Output = Value;

    fn run(&self, container: &Value) -> Result<Value> {
        match (&*self.base, container) {
            (Value::Array(base), Value::Array(items)) => Ok(items
                .iter()
                .filter(|item| !base.contains(item))
                .cloned()
                .collect()),
            (Value::Object(base), Value::Object(object)) => Ok(Value::Object(
                object
                    .iter()
                    .filter(|&(name, value)| base.get(name) != Some(value))
                    .map(|(name, value)| (name.clone(), value.clone()))
                    .collect(),
            )),
            (Value::Array(_), other) => Err(Error::type_kind(Self::NAME, "sequence", other)),
            (Value::Object(_), other) => Err(Error::type_kind(Self::NAME, "mapping", other)),
            (base, _) => Err(Error::type_kind(Self::NAME, CONTAINER, base)),
        }
    }
}

// =============================================================================
// join / implode
// =============================================================================

/// Renders the values of a container as one string. Built by [`join`].
#[derive(Debug, Clone)]
pub struct Join {
    separator: String,
    last: Option<String>,
}

/// Builds a [`Join`] with `separator` between values.
///
/// ```rust
/// use kollect::collect::{join, Operation};
/// use serde_json::json;
///
/// assert_eq!(join(", ").apply(json!(["a", "b", "c"])), Ok(json!("a, b, c")));
/// assert_eq!(join(", ").last(", and ").apply(json!(["a", "b", "c"])), Ok(json!("a, b, and c")));
/// assert_eq!(join(" ").apply(json!({ "name": "Marie", "last": "Curie" })), Ok(json!("Marie Curie")));
/// ```
pub fn join(separator: impl Into<String>) -> Join {
    Join {
        separator: separator.into(),
        last: None,
    }
}

/// Joins with [`RAW_COMMA`], as in `"a,b,c"`.
impl Default for Join {
    fn default() -> Self {
        join(RAW_COMMA)
    }
}

impl Join {
    /// Uses `last` in front of the final value instead of the separator.
    #[must_use]
    pub fn last(mut self, last: impl Into<String>) -> Self {
        self.last = Some(last.into());
        self
    }

    fn render(&self, texts: &[String]) -> String {
        match (texts.split_last(), &self.last) {
            (Some((final_text, leading)), Some(last)) if !leading.is_empty() => {
                format!("{}{last}{final_text}", leading.join(self.separator.as_str()))
            }
            _ => texts.join(self.separator.as_str()),
        }
    }
}

impl Operation for Join {
    const NAME: &'static str = "join";
    type Output = Value;

    fn run(&self, container: &Value) -> Result<Value> {
        let texts: Vec<String> = members(Self::NAME, container)?.map(to_text).collect();
        Ok(Value::String(self.render(&texts)))
    }
}

/// Joins the values, or the values at a path, of a container.
/// Built by [`implode`].
#[derive(Debug, Clone)]
pub struct Implode {
    join: Join,
    key: Option<Path>,
}

/// Builds an [`Implode`] with `separator` between values.
///
/// ```rust
/// use kollect::collect::{implode, Operation};
/// use serde_json::json;
///
/// let products = json!([
///     { "product": "ChromeOS", "company": "Google" },
///     { "product": "VS Code", "company": "Microsoft" },
/// ]);
///
/// assert_eq!(implode("-").apply(json!([1, 2, 3])), Ok(json!("1-2-3")));
/// assert_eq!(implode(", ").key("product").apply(products), Ok(json!("ChromeOS, VS Code")));
/// ```
pub fn implode(separator: impl Into<String>) -> Implode {
    Implode {
        join: join(separator),
        key: None,
    }
}

impl Implode {
    /// Joins the values at `key` instead. Items missing it are skipped.
    #[must_use]
    pub fn key(mut self, key: impl Into<Path>) -> Self {
        self.key = Some(key.into());
        self
    }
}

impl Operation for Implode {
    const NAME: &'static str = "implode";
    type Output = Value;

    fn run(&self, container: &Value) -> Result<Value> {
        let items = members(Self::NAME, container)?;
        let texts: Vec<String> = match &self.key {
            Some(key) => items
                .filter_map(|item| key.resolve(item))
                .map(|value| to_text(&value))
                .collect(),
            None => items.map(to_text).collect(),
        };
        Ok(Value::String(self.join.render(&texts)))
    }
}

// =============================================================================
// prepend
// =============================================================================

#[derive(Debug, Clone)]
enum Head {
    Item(Arc<Value>),
    Entry(String, Arc<Value>),
}

/// Puts something in front of a container. Built by [`prepend`] and
/// [`prepend_entry`].
#[derive(Debug, Clone)]
pub struct Prepend {
    head: Head,
}

/// Puts `item` in front of a sequence, or in front of a string as text.
///
/// A sequence `item` is spread.
///
/// ```rust
/// use kollect::collect::{prepend, Operation};
/// use serde_json::json;
///
/// assert_eq!(prepend(0).apply(json!([1, 2])), Ok(json!([0, 1, 2])));
/// assert_eq!(prepend(json!([0, 14])).apply(json!([1])), Ok(json!([0, 14, 1])));
/// assert_eq!(prepend("?").apply(json!("book=5")), Ok(json!("?book=5")));
/// ```
pub fn prepend(item: impl Into<Value>) -> Prepend {
    Prepend {
        head: Head::Item(Arc::new(item.into())),
    }
}

/// Puts the entry `key: value` first in a mapping, replacing any entry
/// already under `key`.
pub fn prepend_entry(key: impl Into<String>, value: impl Into<Value>) -> Prepend {
    Prepend {
        head: Head::Entry(key.into(), Arc::new(value.into())),
    }
}

impl Operation for Prepend {
    const NAME: &'static str = "prepend";
    type Output = Value;

    fn run(&self, container: &Value) -> Result<Value> {
        match (&self.head, container) {
            (Head::Item(item), Value::Array(items)) => {
                let head = match &**item {
                    Value::Array(spread) => spread.as_slice(),
                    single => std::slice::from_ref(single),
                };
                Ok(Value::Array(head.iter().chain(items).cloned().collect()))
            }
            (Head::Item(item), Value::String(text)) => {
                Ok(Value::String(format!("{}{text}", to_text(item))))
            }
            (Head::Item(_), other) => {
                Err(Error::type_kind(Self::NAME, "sequence or string", other))
            }
            (Head::Entry(key, value), Value::Object(object)) => {
                let mut prepended = Object::new();
                prepended.insert(key.clone(), Value::clone(value));
                for (name, existing) in object {
                    if name != key {
                        prepended.insert(name.clone(), existing.clone());
                    }
                }
                Ok(Value::Object(prepended))
            }
            (Head::Entry(..), other) => Err(Error::type_kind(Self::NAME, "mapping", other)),
        }
    }
}
