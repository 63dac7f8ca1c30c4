//! Reading parts of a container: keys, values, single entries and paths.

use serde_json::Value;

use super::dispatch::Operation;
use super::key::{Callback, Key, callback};
use super::{CONTAINER, members};
use crate::effect::{Error, Result};
use crate::path::Path;
use crate::value::{Object, to_text};

// =============================================================================
// keys / values / entries
// =============================================================================

/// The keys of a mapping, or the indices of a sequence. Built by [`keys`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Keys;

/// Builds a [`Keys`].
///
/// ```rust
/// use kollect::collect::{keys, Operation};
/// use serde_json::json;
///
/// let club = json!({ "club": "Liverpool", "nickname": "The Reds" });
/// assert_eq!(keys().apply(club), Ok(json!(["club", "nickname"])));
/// ```
pub const fn keys() -> Keys {
    Keys
}

impl Operation for Keys {
    const NAME: &'static str = "keys";
    type Output = Value;

    fn run(&self, container: &Value) -> Result<Value> {
        match container {
            Value::Array(items) => Ok((0..items.len()).collect()),
            Value::Object(object) => Ok(object.keys().cloned().collect()),
            other => Err(Error::type_kind(Self::NAME, CONTAINER, other)),
        }
    }
}

/// The values of a container as a sequence. Built by [`values`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Values;

/// Builds a [`Values`].
pub const fn values() -> Values {
    Values
}

impl Operation for Values {
    const NAME: &'static str = "values";
    type Output = Value;

    fn run(&self, container: &Value) -> Result<Value> {
        Ok(members(Self::NAME, container)?.cloned().collect())
    }
}

/// `[key, value]` pairs in container order. Built by [`entries`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Entries;

/// Builds an [`Entries`].
///
/// ```rust
/// use kollect::collect::{entries, Operation};
/// use serde_json::json;
///
/// assert_eq!(
///     entries().apply(json!({ "a": 1, "b": "2" })),
///     Ok(json!([["a", 1], ["b", "2"]]))
/// );
/// ```
pub const fn entries() -> Entries {
    Entries
}

impl Operation for Entries {
    const NAME: &'static str = "entries";
    type Output = Value;

    fn run(&self, container: &Value) -> Result<Value> {
        match container {
            Value::Array(items) => Ok(items
                .iter()
                .enumerate()
                .map(|(index, item)| Value::Array(vec![Value::from(index), item.clone()]))
                .collect()),
            Value::Object(object) => Ok(object
                .iter()
                .map(|(name, value)| Value::Array(vec![Value::from(name.as_str()), value.clone()]))
                .collect()),
            other => Err(Error::type_kind(Self::NAME, CONTAINER, other)),
        }
    }
}

// =============================================================================
// last
// =============================================================================

/// The last value, optionally the last one matching a predicate.
/// Built by [`last`].
#[derive(Clone, Default)]
pub struct Last {
    predicate: Option<Callback<bool>>,
}

/// Builds a [`Last`]. An empty container, or no match, yields `None`.
///
/// ```rust
/// use kollect::collect::{last, Operation};
/// use serde_json::{json, Value};
///
/// assert_eq!(last().apply(json!([1, 2, 3])), Ok(Some(json!(3))));
/// assert_eq!(
///     last().by(|item: &Value, _| item.as_i64() < Some(2)).apply(json!([1, 2, 3])),
///     Ok(Some(json!(1)))
/// );
/// ```
pub fn last() -> Last {
    Last::default()
}

impl Last {
    /// Yields the last value for which `predicate(value, key)` holds.
    #[must_use]
    pub fn by<F>(self, predicate: F) -> Self
    where
        F: Fn(&Value, Key<'_>) -> bool + Send + Sync + 'static,
    {
        Self {
            predicate: Some(callback(predicate)),
        }
    }
}

impl Operation for Last {
    const NAME: &'static str = "last";
    type Output = Option<Value>;

    fn run(&self, container: &Value) -> Result<Option<Value>> {
        let Some(predicate) = &self.predicate else {
            return Ok(members(Self::NAME, container)?.last().cloned());
        };
        match container {
            Value::Array(items) => Ok(items
                .iter()
                .enumerate()
                .rev()
                .find(|&(index, item)| predicate(item, Key::Index(index)))
                .map(|(_, item)| item.clone())),
            Value::Object(object) => Ok(object
                .iter()
                .rev()
                .find(|&(name, value)| predicate(value, Key::from(name.as_str())))
                .map(|(_, value)| value.clone())),
            other => Err(Error::type_kind(Self::NAME, CONTAINER, other)),
        }
    }
}

// =============================================================================
// has
// =============================================================================

/// Membership test. Built by [`has`].
#[derive(Debug, Clone)]
pub struct Has {
    needle: Value,
}

/// Builds a [`Has`]: a substring of a string, an element of a sequence, or
/// a key of a mapping.
///
/// ```rust
/// use kollect::collect::{has, Operation};
/// use serde_json::json;
///
/// assert_eq!(has("c").apply(json!("abcd")), Ok(true));
/// assert_eq!(has(3).apply(json!([1, 2, 3])), Ok(true));
/// assert_eq!(has("last").apply(json!({ "name": "Farabi" })), Ok(false));
/// ```
pub fn has(needle: impl Into<Value>) -> Has {
    Has {
        needle: needle.into(),
    }
}

impl Operation for Has {
    const NAME: &'static str = "has";
    type Output = bool;

    fn run(&self, container: &Value) -> Result<bool> {
        match container {
            Value::String(text) => Ok(text.contains(to_text(&self.needle).as_str())),
            Value::Array(items) => Ok(items.contains(&self.needle)),
            Value::Object(object) => Ok(object.contains_key(&to_text(&self.needle))),
            other => Err(Error::type_kind(
                Self::NAME,
                "string, sequence or mapping",
                other,
            )),
        }
    }
}

// =============================================================================
// value
// =============================================================================

/// The value at a path. Built by [`value`].
#[derive(Debug, Clone)]
pub struct ValueAt {
    path: Path,
}

/// Builds a [`ValueAt`].
///
/// A sequence resolves the path against each of its items; anything else
/// resolves it once. Missing values become `null`.
///
/// ```rust
/// use kollect::collect::{value, Operation};
/// use serde_json::json;
///
/// let scholar = json!({ "name": "Cahit", "roles": [{ "name": "Editor" }, { "name": "Admin" }] });
///
/// assert_eq!(value("roles.1.name").apply(&scholar), Ok(json!("Admin")));
/// assert_eq!(value("type").apply(json!([{ "type": "text" }, {}])), Ok(json!(["text", null])));
/// ```
pub fn value(path: impl Into<Path>) -> ValueAt {
    ValueAt { path: path.into() }
}

impl Operation for ValueAt {
    const NAME: &'static str = "value";
    type Output = Value;

    fn run(&self, container: &Value) -> Result<Value> {
        match container {
            Value::Array(items) => Ok(items
                .iter()
                .map(|item| self.path.resolve(item).unwrap_or(Value::Null))
                .collect()),
            other => Ok(self.path.resolve(other).unwrap_or(Value::Null)),
        }
    }
}

// =============================================================================
// pluck
// =============================================================================

/// Values at a path across the items of a container. Built by [`pluck`].
#[derive(Debug, Clone)]
pub struct Pluck {
    path: Path,
    key: Option<Path>,
}

/// Builds a [`Pluck`].
///
/// A mapping container counts as a single item. Items missing the path are
/// skipped; a `*` segment yields one nested sequence per item.
///
/// ```rust
/// use kollect::collect::{pluck, Operation};
/// use serde_json::json;
///
/// let staff = json!([
///     { "id": 1, "roles": [{ "name": "Editor" }, { "name": "Admin" }] },
///     { "id": 2, "roles": [{ "name": "Writer" }] },
/// ]);
///
/// assert_eq!(pluck("roles.0.name").apply(&staff), Ok(json!(["Editor", "Writer"])));
/// assert_eq!(
///     pluck("roles.*.name").apply(&staff),
///     Ok(json!([["Editor", "Admin"], ["Writer"]]))
/// );
/// ```
pub fn pluck(path: impl Into<Path>) -> Pluck {
    Pluck {
        path: path.into(),
        key: None,
    }
}

impl Pluck {
    /// Builds a mapping instead, keyed by the value at `key`.
    ///
    /// Items missing the key are skipped; items missing the plucked value
    /// map to `null`.
    #[must_use]
    pub fn key_by(mut self, key: impl Into<Path>) -> Self {
        self.key = Some(key.into());
        self
    }
}

impl Operation for Pluck {
    const NAME: &'static str = "pluck";
    type Output = Value;

    fn run(&self, container: &Value) -> Result<Value> {
        let items = match container {
            Value::Array(items) => items.as_slice(),
            Value::Object(_) => std::slice::from_ref(container),
            other => return Err(Error::type_kind(Self::NAME, CONTAINER, other)),
        };
        match &self.key {
            None => Ok(items
                .iter()
                .filter_map(|item| self.path.resolve(item))
                .collect()),
            Some(key) => Ok(Value::Object(
                items
                    .iter()
                    .filter_map(|item| {
                        let name = key.resolve(item)?;
                        let value = self.path.resolve(item).unwrap_or(Value::Null);
                        Some((to_text(&name), value))
                    })
                    .collect::<Object>(),
            )),
        }
    }
}
