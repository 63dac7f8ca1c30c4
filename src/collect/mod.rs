//! The collection engine.
//!
//! Every operation works on both container variants of [`serde_json::Value`]:
//! ordered sequences (`Value::Array`) and key/value mappings
//! (`Value::Object`). An operation is built from its leading arguments and
//! applied to the container later, any number of times:
//!
//! ```rust
//! use kollect::collect::{map, Operation};
//! use serde_json::{json, Value};
//!
//! let add_ten = map(|item: &Value, _| item.as_i64().unwrap_or_default() + 10);
//!
//! assert_eq!(add_ten.apply(json!([1, 2, 3, 4])), Ok(json!([11, 12, 13, 14])));
//! assert_eq!(add_ten.apply(json!([5, 6, 7, 8])), Ok(json!([15, 16, 17, 18])));
//! ```
//!
//! # Operations
//!
//! | Group | Operations |
//! |-------|------------|
//! | transform | [`map`], [`filter`], [`reduce`], [`each`], [`each_async`], [`apply`], [`every`], [`some`], [`some_by`], [`some_entry`], [`then`] |
//! | access | [`keys`], [`values`], [`entries`], [`last`], [`has`], [`value`], [`pluck`] |
//! | shape | [`chunk`], [`split`], [`flat`], [`take`], [`take_until`], [`take_until_by`], [`slice`], [`reverse`], [`key_map`] |
//! | combine | [`merge`], [`diff`], [`join`], [`implode`], [`prepend`], [`prepend_entry`] |
//! | in place | [`push`], [`push_entry`], [`pop`], [`shift`], [`splice`], [`remove`] |
//!
//! In-place operations implement [`OperationMut`]; everything else
//! implements [`Operation`] and never touches its input.
//!
//! # Deferred containers
//!
//! Any operation also accepts a [`Deferred`](crate::Deferred) container and
//! then returns a `Deferred` result. See [`dispatch`] for how the container
//! forms are told apart.

use serde_json::Value;

use crate::effect::{Error, Result};

pub mod dispatch;
mod key;

mod access;
mod combine;
mod mutate;
mod shape;
mod transform;

pub use access::{
    Entries, Has, Keys, Last, Pluck, ValueAt, Values, entries, has, keys, last, pluck, value,
    values,
};
pub use combine::{
    Diff, Implode, Join, Merge, Prepend, diff, implode, join, merge, prepend, prepend_entry,
};
pub use dispatch::{Collection, CollectionMut, Operation, OperationMut};
pub use key::Key;
pub use mutate::{Pop, Push, Remove, Shift, Splice, pop, push, push_entry, remove, shift, splice};
pub use shape::{
    Chunk, Depth, Flat, KeyMap, Reverse, Separator, Slice, Split, Take, TakeUntil, chunk, flat,
    key_map, reverse, slice, split, take, take_until, take_until_by,
};
pub use transform::{
    Any, Apply, Each, EachAsync, Every, Filter, Map, Reduce, Then, apply, each, each_async, every,
    filter, map, reduce, some, some_by, some_entry, then,
};

/// Expected variants of operations accepting either container.
pub(crate) const CONTAINER: &str = "sequence or mapping";

/// The values of a container: the items of a sequence or the values of a
/// mapping, in order.
pub(crate) fn members<'a>(
    operation: &'static str,
    container: &'a Value,
) -> Result<Box<dyn Iterator<Item = &'a Value> + 'a>> {
    match container {
        Value::Array(items) => Ok(Box::new(items.iter())),
        Value::Object(object) => Ok(Box::new(object.values())),
        other => Err(Error::type_kind(operation, CONTAINER, other)),
    }
}

static_assertions::assert_impl_all!(Map: Operation, Send, Sync, Clone);
static_assertions::assert_impl_all!(Filter: Operation, Send, Sync);
static_assertions::assert_impl_all!(Reduce: Operation, Send, Sync);
static_assertions::assert_impl_all!(Pluck: Operation, Send, Sync);
static_assertions::assert_impl_all!(Splice: OperationMut, Send, Sync);
static_assertions::assert_impl_all!(EachAsync: Send, Sync, Clone);
