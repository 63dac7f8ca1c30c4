//! Operations that reshape a container: chunking, flattening, slicing.

use serde_json::Value;

use super::dispatch::Operation;
use super::key::{Callback, Key, callback};
use super::{CONTAINER, members};
use crate::effect::{Error, Result};
use crate::path::join;
use crate::value::Object;

// =============================================================================
// chunk / split
// =============================================================================

/// Splits a container into pieces of a fixed size. Built by [`chunk`].
#[derive(Debug, Clone, Copy)]
pub struct Chunk {
    size: usize,
}

/// Builds a [`Chunk`] of `size` entries per piece; the last piece may be
/// shorter. Mappings are chunked into sub-mappings in key order.
///
/// ```rust
/// use kollect::collect::{chunk, Operation};
/// use serde_json::json;
///
/// assert_eq!(chunk(2).apply(json!([1, 2, 3])), Ok(json!([[1, 2], [3]])));
/// assert_eq!(
///     chunk(2).apply(json!({ "name": "Albert", "last": "Einstein", "age": 76 })),
///     Ok(json!([{ "name": "Albert", "last": "Einstein" }, { "age": 76 }]))
/// );
/// assert!(chunk(0).apply(json!([1])).is_err());
/// ```
pub const fn chunk(size: usize) -> Chunk {
    Chunk { size }
}

impl Operation for Chunk {
    const NAME: &'static str = "chunk";
    type Output = Value;

    fn run(&self, container: &Value) -> Result<Value> {
        chunked(Self::NAME, container, self.size)
    }
}

fn chunked(operation: &'static str, container: &Value, size: usize) -> Result<Value> {
    if size == 0 {
        return Err(Error::invalid_argument(operation, "size must be at least 1"));
    }
    match container {
        Value::Array(items) => Ok(items
            .chunks(size)
            .map(|piece| Value::Array(piece.to_vec()))
            .collect()),
        Value::Object(object) => {
            let entries: Vec<(&String, &Value)> = object.iter().collect();
            Ok(entries
                .chunks(size)
                .map(|piece| {
                    Value::Object(
                        piece
                            .iter()
                            .map(|&(name, value)| (name.clone(), value.clone()))
                            .collect(),
                    )
                })
                .collect())
        }
        other => Err(Error::type_kind(operation, CONTAINER, other)),
    }
}

/// What [`split`] splits by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Separator {
    /// Splits a string around every occurrence of the text.
    Text(String),
    /// Splits a container into this many pieces of equal size, the last one
    /// possibly shorter.
    Parts(usize),
}

impl From<&str> for Separator {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<String> for Separator {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<usize> for Separator {
    fn from(parts: usize) -> Self {
        Self::Parts(parts)
    }
}

/// Splits a string by text, or a container into parts. Built by [`split`].
#[derive(Debug, Clone)]
pub struct Split {
    separator: Separator,
}

/// Builds a [`Split`].
///
/// ```rust
/// use kollect::collect::{split, Operation};
/// use serde_json::json;
///
/// assert_eq!(split("&").apply(json!("id=1&book=5")), Ok(json!(["id=1", "book=5"])));
/// assert_eq!(split(3).apply(json!([1, 2, 3, 4, 5])), Ok(json!([[1, 2], [3, 4], [5]])));
/// ```
pub fn split(separator: impl Into<Separator>) -> Split {
    Split {
        separator: separator.into(),
    }
}

impl Operation for Split {
    const NAME: &'static str = "split";
    type Output = Value;

    fn run(&self, container: &Value) -> Result<Value> {
        match (&self.separator, container) {
            (Separator::Text(separator), Value::String(text)) => {
                Ok(text.split(separator.as_str()).collect())
            }
            (Separator::Text(_), other) => Err(Error::type_kind(Self::NAME, "string", other)),
            (Separator::Parts(0), _) => Err(Error::invalid_argument(
                Self::NAME,
                "part count must be at least 1",
            )),
            (Separator::Parts(parts), other) => {
                let length = match other {
                    Value::Array(items) => items.len(),
                    Value::Object(object) => object.len(),
                    _ => return Err(Error::type_kind(Self::NAME, CONTAINER, other)),
                };
                chunked(Self::NAME, other, length.div_ceil(*parts).max(1))
            }
        }
    }
}

// =============================================================================
// flat
// =============================================================================

/// How many levels [`flat`] flattens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Depth {
    /// At most this many levels.
    Levels(usize),
    /// Every level.
    Infinite,
}

impl Depth {
    const fn lower(self) -> Option<Self> {
        match self {
            Self::Levels(0) => None,
            Self::Levels(levels) => Some(Self::Levels(levels - 1)),
            Self::Infinite => Some(Self::Infinite),
        }
    }
}

impl Default for Depth {
    fn default() -> Self {
        Self::Levels(1)
    }
}

impl From<usize> for Depth {
    fn from(levels: usize) -> Self {
        Self::Levels(levels)
    }
}

/// Flattens nested sequences. Built by [`flat`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Flat {
    depth: Depth,
}

/// Builds a [`Flat`] flattening one level.
///
/// A mapping flattens its values, dropping the keys.
///
/// ```rust
/// use kollect::collect::{flat, Depth, Operation};
/// use serde_json::json;
///
/// let nested = json!([0, 1, [2, [3, [4, 5]]]]);
///
/// assert_eq!(flat().apply(&nested), Ok(json!([0, 1, 2, [3, [4, 5]]])));
/// assert_eq!(flat().depth(2).apply(&nested), Ok(json!([0, 1, 2, 3, [4, 5]])));
/// assert_eq!(flat().depth(Depth::Infinite).apply(&nested), Ok(json!([0, 1, 2, 3, 4, 5])));
/// ```
pub fn flat() -> Flat {
    Flat::default()
}

impl Flat {
    /// Sets how many levels to flatten.
    #[must_use]
    pub fn depth(mut self, depth: impl Into<Depth>) -> Self {
        self.depth = depth.into();
        self
    }
}

impl Operation for Flat {
    const NAME: &'static str = "flat";
    type Output = Value;

    fn run(&self, container: &Value) -> Result<Value> {
        let mut flattened = Vec::new();
        flatten_into(members(Self::NAME, container)?, self.depth, &mut flattened);
        Ok(Value::Array(flattened))
    }
}

fn flatten_into<'a, I>(items: I, depth: Depth, flattened: &mut Vec<Value>)
where
    I: Iterator<Item = &'a Value>,
{
    for item in items {
        match (item, depth.lower()) {
            (Value::Array(inner), Some(deeper)) => flatten_into(inner.iter(), deeper, flattened),
            _ => flattened.push(item.clone()),
        }
    }
}

// =============================================================================
// take / take_until
// =============================================================================

/// The first or last entries of a container. Built by [`take`].
#[derive(Debug, Clone, Copy)]
pub struct Take {
    count: i64,
}

/// Builds a [`Take`]: the first `count` entries, or the last `-count` when
/// `count` is negative.
///
/// ```rust
/// use kollect::collect::{take, Operation};
/// use serde_json::json;
///
/// assert_eq!(take(3).apply(json!([1, 2, 3, 4, 5])), Ok(json!([1, 2, 3])));
/// assert_eq!(take(-1).apply(json!({ "name": "Isaac", "last": "Newton" })), Ok(json!({ "last": "Newton" })));
/// ```
pub const fn take(count: i64) -> Take {
    Take { count }
}

impl Take {
    fn window(self, length: usize) -> std::ops::Range<usize> {
        let count = usize::try_from(self.count.unsigned_abs()).unwrap_or(usize::MAX);
        if self.count < 0 {
            length.saturating_sub(count)..length
        } else {
            0..count.min(length)
        }
    }
}

impl Operation for Take {
    const NAME: &'static str = "take";
    type Output = Value;

    fn run(&self, container: &Value) -> Result<Value> {
        match container {
            Value::Array(items) => Ok(Value::Array(items[self.window(items.len())].to_vec())),
            Value::Object(object) => {
                let window = self.window(object.len());
                Ok(Value::Object(
                    object
                        .iter()
                        .skip(window.start)
                        .take(window.len())
                        .map(|(name, value)| (name.clone(), value.clone()))
                        .collect(),
                ))
            }
            other => Err(Error::type_kind(Self::NAME, CONTAINER, other)),
        }
    }
}

#[derive(Clone)]
enum Stop {
    At(Value),
    When(Callback<bool>),
}

impl Stop {
    fn matches(&self, value: &Value, key: Key<'_>) -> bool {
        match self {
            Self::At(needle) => value == needle,
            Self::When(predicate) => predicate(value, key),
        }
    }
}

/// The leading entries before a stop condition. Built by [`take_until`] and
/// [`take_until_by`].
#[derive(Clone)]
pub struct TakeUntil {
    stop: Stop,
}

/// Takes entries until one equals `needle`.
///
/// ```rust
/// use kollect::collect::{take_until, Operation};
/// use serde_json::json;
///
/// assert_eq!(take_until(3).apply(json!([1, 2, 3, 4])), Ok(json!([1, 2])));
/// ```
pub fn take_until(needle: impl Into<Value>) -> TakeUntil {
    TakeUntil {
        stop: Stop::At(needle.into()),
    }
}

/// Takes entries until `predicate(value, key)` holds.
pub fn take_until_by<F>(predicate: F) -> TakeUntil
where
    F: Fn(&Value, Key<'_>) -> bool + Send + Sync + 'static,
{
    TakeUntil {
        stop: Stop::When(callback(predicate)),
    }
}

impl Operation for TakeUntil {
    const NAME: &'static str = "take_until";
    type Output = Value;

    fn run(&self, container: &Value) -> Result<Value> {
        match container {
            Value::Array(items) => Ok(items
                .iter()
                .enumerate()
                .take_while(|&(index, item)| !self.stop.matches(item, Key::Index(index)))
                .map(|(_, item)| item.clone())
                .collect()),
            Value::Object(object) => Ok(Value::Object(
                object
                    .iter()
                    .take_while(|&(name, value)| !self.stop.matches(value, Key::from(name.as_str())))
                    .map(|(name, value)| (name.clone(), value.clone()))
                    .collect(),
            )),
            other => Err(Error::type_kind(Self::NAME, CONTAINER, other)),
        }
    }
}

// =============================================================================
// slice
// =============================================================================

/// A strided window over a sequence, string or mapping. Built by [`slice`].
#[derive(Debug, Clone, Copy)]
pub struct Slice {
    start: i64,
    length: Option<usize>,
    step: usize,
}

/// Builds a [`Slice`] from `start` to the end. A negative `start` counts
/// from the end.
///
/// ```rust
/// use kollect::collect::{slice, Operation};
/// use serde_json::json;
///
/// let data = json!([1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);
///
/// assert_eq!(slice(4).apply(&data), Ok(json!([5, 6, 7, 8, 9, 10])));
/// assert_eq!(slice(4).length(2).step(1).apply(&data), Ok(json!([5, 6])));
/// assert_eq!(slice(0).length(3).step(2).apply(&data), Ok(json!([1, 3])));
/// assert_eq!(slice(-2).apply(json!("abcd")), Ok(json!("cd")));
/// ```
pub const fn slice(start: i64) -> Slice {
    Slice {
        start,
        length: None,
        step: 1,
    }
}

impl Slice {
    /// Keeps at most `length` entries.
    #[must_use]
    pub const fn length(mut self, length: usize) -> Self {
        self.length = Some(length);
        self
    }

    /// Keeps every `step`-th entry of the window.
    #[must_use]
    pub const fn step(mut self, step: usize) -> Self {
        self.step = step;
        self
    }

    fn indices(&self, total: usize) -> impl Iterator<Item = usize> {
        let start = offset(self.start, total);
        let end = self
            .length
            .map_or(total, |length| start.saturating_add(length).min(total));
        (start..end).step_by(self.step)
    }
}

/// Resolves a possibly negative start against `total`, clamped to it.
pub(crate) fn offset(start: i64, total: usize) -> usize {
    let magnitude = usize::try_from(start.unsigned_abs()).unwrap_or(usize::MAX);
    if start < 0 {
        total.saturating_sub(magnitude)
    } else {
        magnitude.min(total)
    }
}

impl Operation for Slice {
    const NAME: &'static str = "slice";
    type Output = Value;

    fn run(&self, container: &Value) -> Result<Value> {
        if self.step == 0 {
            return Err(Error::invalid_argument(Self::NAME, "step must be at least 1"));
        }
        match container {
            Value::Array(items) => Ok(self
                .indices(items.len())
                .map(|index| items[index].clone())
                .collect()),
            Value::String(text) => {
                let characters: Vec<char> = text.chars().collect();
                Ok(Value::String(
                    self.indices(characters.len())
                        .map(|index| characters[index])
                        .collect(),
                ))
            }
            Value::Object(object) => {
                let entries: Vec<(&String, &Value)> = object.iter().collect();
                Ok(Value::Object(
                    self.indices(entries.len())
                        .map(|index| (entries[index].0.clone(), entries[index].1.clone()))
                        .collect(),
                ))
            }
            other => Err(Error::type_kind(
                Self::NAME,
                "sequence, string or mapping",
                other,
            )),
        }
    }
}

// =============================================================================
// reverse
// =============================================================================

/// Reverses the order of entries. Built by [`reverse`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Reverse;

/// Builds a [`Reverse`]. Strings are reversed by character.
pub const fn reverse() -> Reverse {
    Reverse
}

impl Operation for Reverse {
    const NAME: &'static str = "reverse";
    type Output = Value;

    fn run(&self, container: &Value) -> Result<Value> {
        match container {
            Value::Array(items) => Ok(items.iter().rev().cloned().collect()),
            Value::String(text) => Ok(Value::String(text.chars().rev().collect())),
            Value::Object(object) => Ok(Value::Object(
                object
                    .iter()
                    .rev()
                    .map(|(name, value)| (name.clone(), value.clone()))
                    .collect(),
            )),
            other => Err(Error::type_kind(
                Self::NAME,
                "sequence, string or mapping",
                other,
            )),
        }
    }
}

// =============================================================================
// key_map
// =============================================================================

/// Every dotted path of a nested container mapped to its value.
/// Built by [`key_map`].
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyMap;

/// Builds a [`KeyMap`].
///
/// Intermediate containers get an entry of their own, ahead of their
/// children. The root does not.
///
/// ```rust
/// use kollect::collect::{key_map, Operation};
/// use serde_json::json;
///
/// assert_eq!(
///     key_map().apply(json!({ "a": { "b": 1 } })),
///     Ok(json!({ "a": { "b": 1 }, "a.b": 1 }))
/// );
/// ```
pub const fn key_map() -> KeyMap {
    KeyMap
}

impl Operation for KeyMap {
    const NAME: &'static str = "key_map";
    type Output = Value;

    fn run(&self, container: &Value) -> Result<Value> {
        if !matches!(container, Value::Array(_) | Value::Object(_)) {
            return Err(Error::type_kind(Self::NAME, CONTAINER, container));
        }
        let mut paths = Object::new();
        collect_paths(None, container, &mut paths);
        Ok(Value::Object(paths))
    }
}

fn collect_paths(prefix: Option<&str>, container: &Value, paths: &mut Object) {
    let mut visit = |segment: &str, child: &Value| {
        let path = join(prefix, segment);
        paths.insert(path.clone(), child.clone());
        collect_paths(Some(path.as_str()), child, paths);
    };
    match container {
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                visit(&index.to_string(), item);
            }
        }
        Value::Object(object) => {
            for (name, value) in object {
                visit(name, value);
            }
        }
        _ => {}
    }
}
