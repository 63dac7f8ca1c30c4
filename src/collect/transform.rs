//! Traversal, transformation and aggregation over both container variants.

use std::sync::Arc;

use serde_json::Value;

use super::dispatch::{Collection, Operation};
use super::key::{Callback, Key, callback, for_each_entry};
use super::{CONTAINER, members};
use crate::effect::{Deferred, Error, Result};
use crate::predicate::is_useful;

// =============================================================================
// map
// =============================================================================

/// Transforms every value, keeping indices or keys. Built by [`map`].
#[derive(Clone)]
pub struct Map {
    function: Callback<Value>,
}

/// Builds a [`Map`] applying `function(value, key)` to every entry.
///
/// ```rust
/// use kollect::collect::{map, Operation};
/// use serde_json::{json, Value};
///
/// let add_ten = map(|item: &Value, _| item.as_i64().unwrap_or_default() + 10);
///
/// assert_eq!(add_ten.apply(json!([1, 2])), Ok(json!([11, 12])));
/// assert_eq!(add_ten.apply(json!({ "apple": 5 })), Ok(json!({ "apple": 15 })));
/// ```
pub fn map<R, F>(function: F) -> Map
where
    R: Into<Value>,
    F: Fn(&Value, Key<'_>) -> R + Send + Sync + 'static,
{
    Map {
        function: callback(move |value: &Value, key: Key<'_>| function(value, key).into()),
    }
}

impl Operation for Map {
    const NAME: &'static str = "map";
    type Output = Value;

    fn run(&self, container: &Value) -> Result<Value> {
        match container {
            Value::Array(items) => Ok(Value::Array(
                items
                    .iter()
                    .enumerate()
                    .map(|(index, item)| (self.function)(item, Key::Index(index)))
                    .collect(),
            )),
            Value::Object(object) => Ok(Value::Object(
                object
                    .iter()
                    .map(|(name, value)| {
                        (name.clone(), (self.function)(value, Key::from(name.as_str())))
                    })
                    .collect(),
            )),
            other => Err(Error::type_kind(Self::NAME, CONTAINER, other)),
        }
    }
}

// =============================================================================
// filter
// =============================================================================

/// Keeps the entries a predicate accepts. Built by [`filter`].
#[derive(Clone, Default)]
pub struct Filter {
    predicate: Option<Callback<bool>>,
}

/// Builds a [`Filter`] keeping useful values.
///
/// Without [`Filter::by`], `null`, `""`, `[]` and `{}` are dropped; `0` and
/// `false` are kept.
///
/// ```rust
/// use kollect::collect::{filter, Operation};
/// use serde_json::json;
///
/// assert_eq!(filter().apply(json!([0, null, "", false, [], 1])), Ok(json!([0, false, 1])));
/// ```
pub fn filter() -> Filter {
    Filter::default()
}

impl Filter {
    /// Keeps the entries for which `predicate(value, key)` holds.
    #[must_use]
    pub fn by<F>(self, predicate: F) -> Self
    where
        F: Fn(&Value, Key<'_>) -> bool + Send + Sync + 'static,
    {
        Self {
            predicate: Some(callback(predicate)),
        }
    }

    fn keeps(&self, value: &Value, key: Key<'_>) -> bool {
        self.predicate
            .as_ref()
            .map_or_else(|| is_useful(value), |predicate| predicate(value, key))
    }
}

impl Operation for Filter {
    const NAME: &'static str = "filter";
    type Output = Value;

    fn run(&self, container: &Value) -> Result<Value> {
        match container {
            Value::Array(items) => Ok(Value::Array(
                items
                    .iter()
                    .enumerate()
                    .filter(|(index, item)| self.keeps(item, Key::Index(*index)))
                    .map(|(_, item)| item.clone())
                    .collect(),
            )),
            Value::Object(object) => Ok(Value::Object(
                object
                    .iter()
                    .filter(|(name, value)| self.keeps(value, Key::from(name.as_str())))
                    .map(|(name, value)| (name.clone(), value.clone()))
                    .collect(),
            )),
            other => Err(Error::type_kind(Self::NAME, CONTAINER, other)),
        }
    }
}

// =============================================================================
// reduce
// =============================================================================

type Fold = Arc<dyn Fn(Value, &Value) -> Value + Send + Sync>;

/// Left fold over the values of a container. Built by [`reduce`].
#[derive(Clone)]
pub struct Reduce {
    function: Fold,
    seed: Option<Arc<Value>>,
}

/// Builds a [`Reduce`] folding with `function(accumulator, item)`.
///
/// Without a seed the first value starts the fold, and an empty container
/// is an error.
///
/// ```rust
/// use kollect::collect::{reduce, Operation};
/// use serde_json::{json, Value};
///
/// let total = reduce(|sum: Value, item: &Value| {
///     sum.as_i64().unwrap_or_default() + item.as_i64().unwrap_or_default()
/// });
///
/// assert_eq!(total.apply(json!({ "wood": 150, "stone": 50 })), Ok(json!(200)));
/// assert_eq!(total.clone().seed(10).apply(json!([1, 2])), Ok(json!(13)));
/// assert!(total.apply(json!([])).is_err());
/// ```
pub fn reduce<R, F>(function: F) -> Reduce
where
    R: Into<Value>,
    F: Fn(Value, &Value) -> R + Send + Sync + 'static,
{
    let function: Fold = Arc::new(move |accumulator: Value, item: &Value| {
        function(accumulator, item).into()
    });
    Reduce {
        function,
        seed: None,
    }
}

impl Reduce {
    /// Starts the fold from `seed`.
    #[must_use]
    pub fn seed(mut self, seed: impl Into<Value>) -> Self {
        self.seed = Some(Arc::new(seed.into()));
        self
    }
}

impl Operation for Reduce {
    const NAME: &'static str = "reduce";
    type Output = Value;

    fn run(&self, container: &Value) -> Result<Value> {
        let mut items = members(Self::NAME, container)?;
        let initial = match &self.seed {
            Some(seed) => Value::clone(seed),
            None => items.next().cloned().ok_or_else(|| Error::empty(Self::NAME))?,
        };
        Ok(items.fold(initial, |accumulator, item| {
            (self.function)(accumulator, item)
        }))
    }
}

// =============================================================================
// each / each_async
// =============================================================================

/// Visits every entry for its side effects. Built by [`each`].
#[derive(Clone)]
pub struct Each {
    function: Callback<()>,
}

/// Builds an [`Each`] calling `function(value, key)` in container order.
///
/// Applying it yields the container itself, so it can sit in the middle of a
/// pipeline.
pub fn each<F>(function: F) -> Each
where
    F: Fn(&Value, Key<'_>) + Send + Sync + 'static,
{
    Each {
        function: callback(function),
    }
}

impl Operation for Each {
    const NAME: &'static str = "each";
    type Output = Value;

    fn run(&self, container: &Value) -> Result<Value> {
        if for_each_entry(container, |key, value| (self.function)(value, key)) {
            Ok(container.clone())
        } else {
            Err(Error::type_kind(Self::NAME, CONTAINER, container))
        }
    }
}

type Visit = Arc<dyn Fn(Value, Key<'static>) -> Deferred<()> + Send + Sync>;

/// Visits every entry with a deferred callback. Built by [`each_async`].
#[derive(Clone)]
pub struct EachAsync {
    function: Visit,
}

/// Builds an [`EachAsync`].
///
/// Each callback is awaited before the next entry is visited. The first
/// failing callback fails the whole traversal.
///
/// ```rust
/// use std::sync::{Arc, Mutex};
///
/// use kollect::Deferred;
/// use kollect::collect::each_async;
/// use serde_json::json;
///
/// # futures::executor::block_on(async {
/// let seen = Arc::new(Mutex::new(Vec::new()));
/// let sink = Arc::clone(&seen);
/// let visit = each_async(move |item, _| {
///     sink.lock().unwrap().push(item);
///     Deferred::pure(())
/// });
///
/// assert_eq!(visit.apply(json!([1, 2])).await, Ok(json!([1, 2])));
/// assert_eq!(*seen.lock().unwrap(), vec![json!(1), json!(2)]);
/// # });
/// ```
pub fn each_async<F>(function: F) -> EachAsync
where
    F: Fn(Value, Key<'static>) -> Deferred<()> + Send + Sync + 'static,
{
    EachAsync {
        function: Arc::new(function),
    }
}

impl EachAsync {
    const NAME: &'static str = "each_async";

    /// Visits `container`, settling with it once every callback settled.
    ///
    /// The result is deferred whatever form the container takes.
    pub fn apply<C: Collection>(&self, container: C) -> Deferred<Value> {
        let function = Arc::clone(&self.function);
        container
            .defer()
            .flat_map(move |container| Deferred::from_future(visit(function, container)))
    }
}

async fn visit(function: Visit, container: Value) -> Result<Value> {
    let entries: Vec<(Key<'static>, Value)> = match &container {
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(index, item)| (Key::Index(index), item.clone()))
            .collect(),
        Value::Object(object) => object
            .iter()
            .map(|(name, value)| (Key::from(name.clone()), value.clone()))
            .collect(),
        other => return Err(Error::type_kind(EachAsync::NAME, CONTAINER, other)),
    };
    tracing::trace!(entries = entries.len(), "visiting entries in order");
    for (key, value) in entries {
        function(value, key).await?;
    }
    Ok(container)
}

// =============================================================================
// apply
// =============================================================================

type Spread = Arc<dyn Fn(&[Value]) -> Value + Send + Sync>;

/// Calls a function with the values of a container as its arguments.
/// Built by [`apply`].
#[derive(Clone)]
pub struct Apply {
    function: Spread,
}

/// Builds an [`Apply`] spreading the container into `function`.
///
/// ```rust
/// use kollect::collect::{apply, Operation};
/// use serde_json::{json, Value};
///
/// let greet = apply(|arguments: &[Value]| {
///     format!("{} {}!", arguments[1].as_str().unwrap_or(""), arguments[0].as_str().unwrap_or(""))
/// });
///
/// assert_eq!(greet.apply(json!(["John", "Hello"])), Ok(json!("Hello John!")));
/// ```
pub fn apply<R, F>(function: F) -> Apply
where
    R: Into<Value>,
    F: Fn(&[Value]) -> R + Send + Sync + 'static,
{
    let function: Spread = Arc::new(move |arguments: &[Value]| function(arguments).into());
    Apply { function }
}

impl Operation for Apply {
    const NAME: &'static str = "apply";
    type Output = Value;

    fn run(&self, container: &Value) -> Result<Value> {
        match container {
            Value::Array(items) => Ok((self.function)(items)),
            Value::Object(object) => {
                let arguments: Vec<Value> = object.values().cloned().collect();
                Ok((self.function)(&arguments))
            }
            other => Err(Error::type_kind(Self::NAME, CONTAINER, other)),
        }
    }
}

// =============================================================================
// every / some
// =============================================================================

/// Checks that a predicate holds for every entry. Built by [`every`].
#[derive(Clone)]
pub struct Every {
    predicate: Callback<bool>,
}

/// Builds an [`Every`]. An empty container satisfies it.
pub fn every<F>(predicate: F) -> Every
where
    F: Fn(&Value, Key<'_>) -> bool + Send + Sync + 'static,
{
    Every {
        predicate: callback(predicate),
    }
}

impl Operation for Every {
    const NAME: &'static str = "every";
    type Output = bool;

    fn run(&self, container: &Value) -> Result<bool> {
        match container {
            Value::Array(items) => Ok(items
                .iter()
                .enumerate()
                .all(|(index, item)| (self.predicate)(item, Key::Index(index)))),
            Value::Object(object) => Ok(object
                .iter()
                .all(|(name, value)| (self.predicate)(value, Key::from(name.as_str())))),
            other => Err(Error::type_kind(Self::NAME, CONTAINER, other)),
        }
    }
}

#[derive(Clone)]
enum Probe {
    Needle(Arc<Value>),
    Predicate(Callback<bool>),
    Entry(String, Arc<Value>),
}

/// Checks whether some entry matches. Built by [`some`], [`some_by`] and
/// [`some_entry`].
#[derive(Clone)]
pub struct Any {
    probe: Probe,
}

/// Matches a sequence containing `needle`, or a mapping with `needle` as a
/// key or as a value.
///
/// ```rust
/// use kollect::collect::{some, Operation};
/// use serde_json::json;
///
/// let platon = json!({ "name": "Aristokles", "last": "Platon" });
///
/// assert_eq!(some("name").apply(&platon), Ok(true));
/// assert_eq!(some("Platon").apply(&platon), Ok(true));
/// assert_eq!(some(3).apply(json!([1, 2])), Ok(false));
/// ```
pub fn some(needle: impl Into<Value>) -> Any {
    Any {
        probe: Probe::Needle(Arc::new(needle.into())),
    }
}

/// Matches when `predicate(value, key)` holds for at least one entry.
pub fn some_by<F>(predicate: F) -> Any
where
    F: Fn(&Value, Key<'_>) -> bool + Send + Sync + 'static,
{
    Any {
        probe: Probe::Predicate(callback(predicate)),
    }
}

/// Matches a mapping whose `key` holds `value`.
pub fn some_entry(key: impl Into<String>, value: impl Into<Value>) -> Any {
    Any {
        probe: Probe::Entry(key.into(), Arc::new(value.into())),
    }
}

impl Operation for Any {
    const NAME: &'static str = "some";
    type Output = bool;

    fn run(&self, container: &Value) -> Result<bool> {
        match (&self.probe, container) {
            (Probe::Needle(needle), Value::Array(items)) => Ok(items.contains(&**needle)),
            (Probe::Needle(needle), Value::Object(object)) => Ok(needle
                .as_str()
                .is_some_and(|name| object.contains_key(name))
                || object.values().any(|value| value == &**needle)),
            (Probe::Predicate(predicate), Value::Array(items)) => Ok(items
                .iter()
                .enumerate()
                .any(|(index, item)| predicate(item, Key::Index(index)))),
            (Probe::Predicate(predicate), Value::Object(object)) => Ok(object
                .iter()
                .any(|(name, value)| predicate(value, Key::from(name.as_str())))),
            (Probe::Entry(key, expected), Value::Object(object)) => {
                Ok(object.get(key) == Some(&**expected))
            }
            (Probe::Entry(..), other) => Err(Error::type_kind(Self::NAME, "mapping", other)),
            (_, other) => Err(Error::type_kind(Self::NAME, CONTAINER, other)),
        }
    }
}

// =============================================================================
// then
// =============================================================================

/// Any fallible function lifted into a pipeline stage. Built by [`then`].
pub struct Then<R> {
    function: Arc<dyn Fn(&Value) -> Result<R> + Send + Sync>,
}

impl<R> Clone for Then<R> {
    fn clone(&self) -> Self {
        Self {
            function: Arc::clone(&self.function),
        }
    }
}

/// Lifts `function` into an operation, so it composes with the others and
/// accepts deferred containers.
///
/// ```rust
/// use kollect::collect::{then, Operation};
/// use serde_json::{json, Value};
///
/// let count = then(|value: &Value| Ok(value.as_array().map_or(0, Vec::len)));
/// assert_eq!(count.apply(json!([1, 2, 3])), Ok(3));
/// ```
pub fn then<R, F>(function: F) -> Then<R>
where
    R: Send + 'static,
    F: Fn(&Value) -> Result<R> + Send + Sync + 'static,
{
    Then {
        function: Arc::new(function),
    }
}

impl<R: Send + 'static> Operation for Then<R> {
    const NAME: &'static str = "then";
    type Output = R;

    fn run(&self, container: &Value) -> Result<R> {
        (self.function)(container)
    }
}
