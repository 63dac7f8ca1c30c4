//! In-place operations.
//!
//! These are the only operations that change their container. They are
//! applied through [`OperationMut`], so a shared `&Value` is rejected at
//! compile time:
//!
//! ```rust
//! use kollect::collect::{push, OperationMut};
//! use serde_json::json;
//!
//! let mut data = json!([1, 2, 3]);
//! push(4).apply(&mut data).unwrap();
//! assert_eq!(data, json!([1, 2, 3, 4]));
//! ```
//!
//! ```compile_fail
//! use kollect::collect::{push, OperationMut};
//! use serde_json::json;
//!
//! let data = json!([1, 2, 3]);
//! push(4).apply(&data).unwrap();
//! ```

use std::sync::Arc;

use serde_json::Value;

use super::CONTAINER;
use super::dispatch::OperationMut;
use super::shape::offset;
use crate::effect::{Error, Result};
use crate::value::{Object, to_text};

// =============================================================================
// push
// =============================================================================

#[derive(Debug, Clone)]
enum Tail {
    Item { item: Arc<Value>, spread: bool },
    Entry(String, Arc<Value>),
}

/// Appends to a container. Built by [`push`] and [`push_entry`].
///
/// Applying it yields the updated container.
#[derive(Debug, Clone)]
pub struct Push {
    tail: Tail,
}

/// Appends `item` to a sequence.
///
/// ```rust
/// use kollect::collect::{push, OperationMut};
/// use serde_json::json;
///
/// let mut data = json!([1, 2, 3]);
/// push(json!([4, 5])).spread().apply(&mut data).unwrap();
/// assert_eq!(data, json!([1, 2, 3, 4, 5]));
/// ```
pub fn push(item: impl Into<Value>) -> Push {
    Push {
        tail: Tail::Item {
            item: Arc::new(item.into()),
            spread: false,
        },
    }
}

/// Sets `key` to `value` in a mapping.
pub fn push_entry(key: impl Into<String>, value: impl Into<Value>) -> Push {
    Push {
        tail: Tail::Entry(key.into(), Arc::new(value.into())),
    }
}

impl Push {
    /// Appends the items of a sequence one by one instead of as one item.
    #[must_use]
    pub fn spread(mut self) -> Self {
        if let Tail::Item { spread, .. } = &mut self.tail {
            *spread = true;
        }
        self
    }
}

impl OperationMut for Push {
    const NAME: &'static str = "push";
    type Output = Value;

    fn run_mut(&self, container: &mut Value) -> Result<Value> {
        match (&self.tail, &mut *container) {
            (Tail::Item { item, spread }, Value::Array(items)) => match &**item {
                Value::Array(spread_items) if *spread => items.extend(spread_items.iter().cloned()),
                single => items.push(single.clone()),
            },
            (Tail::Entry(key, value), Value::Object(object)) => {
                object.insert(key.clone(), Value::clone(value));
            }
            (Tail::Item { .. }, other) => {
                return Err(Error::type_kind(Self::NAME, "sequence", other));
            }
            (Tail::Entry(..), other) => {
                return Err(Error::type_kind(Self::NAME, "mapping", other));
            }
        }
        Ok(container.clone())
    }
}

// =============================================================================
// pop / shift
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum End {
    Front,
    Back,
}

fn take_end(
    operation: &'static str,
    container: &mut Value,
    end: End,
    count: Option<usize>,
) -> Result<Value> {
    let amount = count.unwrap_or(1);
    let removed: Vec<(Option<String>, Value)> = match container {
        Value::Array(items) => {
            let amount = amount.min(items.len());
            let range = match end {
                End::Front => 0..amount,
                End::Back => items.len() - amount..items.len(),
            };
            items.drain(range).map(|item| (None, item)).collect()
        }
        Value::Object(object) => {
            let names: Vec<String> = match end {
                End::Front => object.keys().take(amount).cloned().collect(),
                End::Back => {
                    let skip = object.len().saturating_sub(amount);
                    object.keys().skip(skip).cloned().collect()
                }
            };
            names
                .into_iter()
                .filter_map(|name| {
                    let value = object.shift_remove(&name)?;
                    Some((Some(name), value))
                })
                .collect()
        }
        other => return Err(Error::type_kind(operation, CONTAINER, other)),
    };
    let is_mapping = container.is_object();
    Ok(match count {
        None => removed
            .into_iter()
            .next()
            .map_or(Value::Null, |(_, value)| value),
        Some(_) if is_mapping => Value::Object(
            removed
                .into_iter()
                .filter_map(|(name, value)| Some((name?, value)))
                .collect::<Object>(),
        ),
        Some(_) => removed.into_iter().map(|(_, value)| value).collect(),
    })
}

/// Removes the last entry, or the last few. Built by [`pop`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Pop {
    count: Option<usize>,
}

/// Builds a [`Pop`] yielding the removed value, or `null` when the container
/// is empty.
///
/// ```rust
/// use kollect::collect::{pop, OperationMut};
/// use serde_json::json;
///
/// let mut data = json!([1, 2, 3, 4, 5]);
/// assert_eq!(pop().apply(&mut data), Ok(json!(5)));
/// assert_eq!(pop().count(2).apply(&mut data), Ok(json!([3, 4])));
/// assert_eq!(data, json!([1, 2]));
/// ```
pub fn pop() -> Pop {
    Pop::default()
}

impl Pop {
    /// Removes the last `count` entries, yielded in container order and in
    /// the container's variant.
    #[must_use]
    pub const fn count(mut self, count: usize) -> Self {
        self.count = Some(count);
        self
    }
}

impl OperationMut for Pop {
    const NAME: &'static str = "pop";
    type Output = Value;

    fn run_mut(&self, container: &mut Value) -> Result<Value> {
        take_end(Self::NAME, container, End::Back, self.count)
    }
}

/// Removes the first entry, or the first few. Built by [`shift`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Shift {
    count: Option<usize>,
}

/// Builds a [`Shift`] yielding the removed value, or `null` when the
/// container is empty.
pub fn shift() -> Shift {
    Shift::default()
}

impl Shift {
    /// Removes the first `count` entries.
    #[must_use]
    pub const fn count(mut self, count: usize) -> Self {
        self.count = Some(count);
        self
    }
}

impl OperationMut for Shift {
    const NAME: &'static str = "shift";
    type Output = Value;

    fn run_mut(&self, container: &mut Value) -> Result<Value> {
        take_end(Self::NAME, container, End::Front, self.count)
    }
}

// =============================================================================
// splice
// =============================================================================

/// Removes a range of a sequence, optionally inserting items in its place.
/// Built by [`splice`].
#[derive(Debug, Clone)]
pub struct Splice {
    start: i64,
    delete: Option<usize>,
    insert: Arc<Vec<Value>>,
}

/// Builds a [`Splice`] removing everything from `start` on. A negative
/// `start` counts from the end.
///
/// Applying it yields the removed items.
///
/// ```rust
/// use kollect::collect::{splice, OperationMut};
/// use serde_json::json;
///
/// let mut data = json!([1, 2, 3, 4, 5]);
/// let removed = splice(2).delete(1).insert(vec![json!(10), json!(11)]).apply(&mut data);
///
/// assert_eq!(removed, Ok(json!([3])));
/// assert_eq!(data, json!([1, 2, 10, 11, 4, 5]));
/// ```
pub fn splice(start: i64) -> Splice {
    Splice {
        start,
        delete: None,
        insert: Arc::default(),
    }
}

impl Splice {
    /// Removes at most `count` items.
    #[must_use]
    pub const fn delete(mut self, count: usize) -> Self {
        self.delete = Some(count);
        self
    }

    /// Inserts `items` where the removed ones were.
    #[must_use]
    pub fn insert(mut self, items: impl IntoIterator<Item = Value>) -> Self {
        self.insert = Arc::new(items.into_iter().collect());
        self
    }
}

impl OperationMut for Splice {
    const NAME: &'static str = "splice";
    type Output = Value;

    fn run_mut(&self, container: &mut Value) -> Result<Value> {
        let items = match container {
            Value::Array(items) => items,
            other => return Err(Error::type_kind(Self::NAME, "sequence", other)),
        };
        let start = offset(self.start, items.len());
        let end = self
            .delete
            .map_or(items.len(), |count| start.saturating_add(count).min(items.len()));
        let removed: Vec<Value> = items
            .splice(start..end, self.insert.iter().cloned())
            .collect();
        Ok(Value::Array(removed))
    }
}

// =============================================================================
// remove
// =============================================================================

/// Deletes entries by index or key. Built by [`remove`].
///
/// Sequence indices are replaced by `null` so the other items keep their
/// positions; mapping keys are deleted. Applying it yields the updated
/// container.
#[derive(Debug, Clone)]
pub struct Remove {
    targets: Arc<Vec<Value>>,
}

/// Builds a [`Remove`] of one target, or of every item of a sequence
/// target.
///
/// ```rust
/// use kollect::collect::{remove, OperationMut};
/// use serde_json::json;
///
/// assert_eq!(remove(json!([0, 1])).apply(json!([1, 2, 3, 4])), Ok(json!([null, null, 3, 4])));
/// assert_eq!(
///     remove("date").apply(json!({ "name": "Piri", "date": 1553 })),
///     Ok(json!({ "name": "Piri" }))
/// );
/// ```
pub fn remove(target: impl Into<Value>) -> Remove {
    let targets = match target.into() {
        Value::Array(targets) => targets,
        single => vec![single],
    };
    Remove {
        targets: Arc::new(targets),
    }
}

impl OperationMut for Remove {
    const NAME: &'static str = "remove";
    type Output = Value;

    fn run_mut(&self, container: &mut Value) -> Result<Value> {
        match container {
            Value::Array(items) => {
                let indices = self
                    .targets
                    .iter()
                    .filter_map(Value::as_u64)
                    .filter_map(|index| usize::try_from(index).ok());
                for index in indices {
                    if let Some(item) = items.get_mut(index) {
                        *item = Value::Null;
                    }
                }
            }
            Value::Object(object) => {
                for target in self.targets.iter() {
                    object.shift_remove(&to_text(target));
                }
            }
            other => return Err(Error::type_kind(Self::NAME, CONTAINER, other)),
        }
        Ok(container.clone())
    }
}
