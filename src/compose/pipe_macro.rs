//! The `pipe!` macro for left-to-right application of operations.
//!
//! This module provides the [`pipe!`] macro which threads a container through
//! a list of operations, following the data flow style of programming.

/// Pipes a container through a series of operations from left to right.
///
/// `pipe!(x, f, g, h)` is equivalent to `h.apply(g.apply(f.apply(x)))`.
///
/// Each stage is anything with an `apply` method: a read-only
/// [`Operation`](crate::collect::Operation), an in-place
/// [`OperationMut`](crate::collect::OperationMut), or a value with an
/// inherent `apply` such as [`each_async`](crate::collect::each_async).
/// Plain functions become stages through [`then`](crate::collect::then).
///
/// # Syntax
///
/// - `pipe!(x)` - Returns `x` unchanged
/// - `pipe!(x, f)` - Returns `f.apply(x)`
/// - `pipe!(x, f, g)` - Returns `g.apply(f.apply(x))`
/// - `pipe!(x, f, g, h, ...)` - Returns `...h.apply(g.apply(f.apply(x)))`
///
/// # Failures and deferred values
///
/// A synchronous pipeline yields a [`Result`](crate::Result); the first
/// failing stage short-circuits the rest. A pipeline starting from a
/// [`Deferred`](crate::Deferred) yields a `Deferred` and nothing runs until
/// it is awaited.
///
/// # Examples
///
/// ## Basic pipeline
///
/// ```
/// use kollect::collect::{filter, map};
/// use kollect::pipe;
/// use serde_json::{json, Value};
///
/// let result = pipe!(
///     json!([1, null, 3]),
///     filter(),
///     map(|item: &Value, _| item.as_i64().unwrap_or_default() * 2)
/// );
/// assert_eq!(result, Ok(json!([2, 6])));
/// ```
///
/// ## Shape-changing stages
///
/// ```
/// use kollect::collect::{chunk, flat, join};
/// use kollect::pipe;
/// use serde_json::json;
///
/// let result = pipe!(json!([[1, 2], [3]]), flat(), chunk(2), flat(), join("-"));
/// assert_eq!(result, Ok(json!("1-2-3")));
/// ```
///
/// ## Deferred pipeline
///
/// ```
/// use kollect::collect::{diff, merge};
/// use kollect::{pipe, Deferred};
/// use serde_json::json;
///
/// # futures::executor::block_on(async {
/// let pending = pipe!(
///     Deferred::pure(json!([1, 2, 3])),
///     merge(json!([4, 5])),
///     diff(json!([1, 2]))
/// );
/// assert_eq!(pending.await, Ok(json!([3, 4, 5])));
/// # });
/// ```
#[macro_export]
macro_rules! pipe {
    // Value only: return as is
    ($value:expr) => {
        $value
    };

    // Single stage: apply it
    ($value:expr, $stage:expr $(,)?) => {{
        #[allow(unused_imports)]
        use $crate::collect::{Operation as _, OperationMut as _};
        ($stage).apply($value)
    }};

    // Multiple stages: apply left to right recursively
    ($value:expr, $stage:expr, $($remaining_stages:expr),+ $(,)?) => {
        $crate::pipe!($crate::pipe!($value, $stage), $($remaining_stages),+)
    };
}
