//! `Deferred` - a value that becomes available later, exactly once.
//!
//! A [`Deferred<A>`] wraps a boxed future resolving to `Result<A, Error>`.
//! Nothing runs until the deferred value is awaited: combinators such as
//! [`Deferred::fmap`] and [`Deferred::flat_map`] only register continuations
//! and return a new `Deferred` immediately.
//!
//! Every collection operation accepts a `Deferred` where it expects a
//! container and answers with a `Deferred` of its result, so deferred values
//! flow through [`pipe!`](crate::pipe) unchanged.
//!
//! # Examples
//!
//! ```rust
//! use kollect::collect::{map, Operation};
//! use kollect::Deferred;
//! use serde_json::{json, Value};
//!
//! # futures::executor::block_on(async {
//! let source = Deferred::pure(json!([1, 2, 3]));
//! let doubled = map(|value: &Value, _| value.as_i64().unwrap_or(0) * 2).apply(source);
//!
//! assert_eq!(doubled.await, Ok(json!([2, 4, 6])));
//! # });
//! ```
//!
//! # Failure propagation
//!
//! ```rust
//! use kollect::collect::{filter, Operation};
//! use kollect::{Deferred, Error};
//! use serde_json::Value;
//!
//! # futures::executor::block_on(async {
//! let source: Deferred<Value> = Deferred::fail(Error::rejected("offline"));
//! let result = filter().apply(source).await;
//!
//! assert_eq!(result, Err(Error::rejected("offline")));
//! # });
//! ```

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::FutureExt;
use futures::future::BoxFuture;

use super::error::{Error, Result};

/// A single-resolution eventual value.
///
/// `Deferred<A>` settles once, either fulfilled with an `A` or failed with an
/// [`Error`]. It is consumed by awaiting it, so it cannot settle twice.
///
/// # Monad Laws
///
/// 1. **Left Identity**: `Deferred::pure(a).flat_map(f) == f(a)`
/// 2. **Right Identity**: `m.flat_map(Deferred::pure) == m`
/// 3. **Associativity**: `m.flat_map(f).flat_map(g) == m.flat_map(|x| f(x).flat_map(g))`
pub struct Deferred<A> {
    future: BoxFuture<'static, Result<A>>,
}

// =============================================================================
// Constructors
// =============================================================================

impl<A: Send + 'static> Deferred<A> {
    /// Wraps an already available value.
    pub fn pure(value: A) -> Self {
        Self::from_future(async move { Ok(value) })
    }

    /// Alias for [`Deferred::pure`].
    pub fn of(value: A) -> Self {
        Self::pure(value)
    }

    /// Creates a deferred value that fails with `error`.
    pub fn fail(error: Error) -> Self {
        Self::from_future(async move { Err(error) })
    }

    /// Lifts a synchronous result.
    pub fn from_result(result: Result<A>) -> Self {
        Self::from_future(async move { result })
    }

    /// Creates a `Deferred` from a future that has not been polled yet.
    pub fn from_future<Fut>(future: Fut) -> Self
    where
        Fut: Future<Output = Result<A>> + Send + 'static,
    {
        Self {
            future: future.boxed(),
        }
    }

    /// Creates a `Deferred` from a closure producing the future.
    ///
    /// The closure runs on the first poll, not here.
    pub fn new<F, Fut>(action: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<A>> + Send + 'static,
    {
        Self::from_future(async move { action().await })
    }
}

// =============================================================================
// Combinators
// =============================================================================

impl<A: Send + 'static> Deferred<A> {
    /// Transforms the fulfilled value.
    ///
    /// ```rust
    /// use kollect::Deferred;
    ///
    /// # futures::executor::block_on(async {
    /// assert_eq!(Deferred::pure(21).fmap(|x| x * 2).await, Ok(42));
    /// # });
    /// ```
    pub fn fmap<B, F>(self, function: F) -> Deferred<B>
    where
        B: Send + 'static,
        F: FnOnce(A) -> B + Send + 'static,
    {
        Deferred::from_future(async move { self.await.map(function) })
    }

    /// Transforms the fulfilled value with a fallible function.
    ///
    /// This is the continuation every collection operation registers on a
    /// deferred container.
    pub fn try_map<B, F>(self, function: F) -> Deferred<B>
    where
        B: Send + 'static,
        F: FnOnce(A) -> Result<B> + Send + 'static,
    {
        Deferred::from_future(async move {
            match self.await {
                Ok(value) => {
                    tracing::trace!("deferred source settled");
                    function(value)
                }
                Err(error) => {
                    tracing::debug!(%error, "propagating deferred failure");
                    Err(error)
                }
            }
        })
    }

    /// Chains a computation producing another deferred value.
    ///
    /// ```rust
    /// use kollect::Deferred;
    ///
    /// # futures::executor::block_on(async {
    /// let chained = Deferred::pure(10).flat_map(|x| Deferred::pure(x + 5));
    /// assert_eq!(chained.await, Ok(15));
    /// # });
    /// ```
    pub fn flat_map<B, F>(self, function: F) -> Deferred<B>
    where
        B: Send + 'static,
        F: FnOnce(A) -> Deferred<B> + Send + 'static,
    {
        Deferred::from_future(async move {
            let value = self.await?;
            function(value).await
        })
    }

    /// Alias for [`Deferred::flat_map`].
    pub fn and_then<B, F>(self, function: F) -> Deferred<B>
    where
        B: Send + 'static,
        F: FnOnce(A) -> Deferred<B> + Send + 'static,
    {
        self.flat_map(function)
    }

    /// Waits for both values, this one first.
    pub fn zip<B>(self, other: Deferred<B>) -> Deferred<(A, B)>
    where
        B: Send + 'static,
    {
        Deferred::from_future(async move {
            let first = self.await?;
            let second = other.await?;
            Ok((first, second))
        })
    }

    /// Handles a failure by switching to another deferred value.
    pub fn or_else<F>(self, handler: F) -> Self
    where
        F: FnOnce(Error) -> Self + Send + 'static,
    {
        Self::from_future(async move {
            match self.await {
                Ok(value) => Ok(value),
                Err(error) => handler(error).await,
            }
        })
    }
}

// =============================================================================
// Future Implementation
// =============================================================================

impl<A> Future for Deferred<A> {
    type Output = Result<A>;

    fn poll(self: Pin<&mut Self>, context: &mut Context<'_>) -> Poll<Self::Output> {
        self.get_mut().future.as_mut().poll(context)
    }
}

impl<A: Send + 'static> From<Result<A>> for Deferred<A> {
    fn from(result: Result<A>) -> Self {
        Self::from_result(result)
    }
}

impl<A> fmt::Display for Deferred<A> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "<Deferred>")
    }
}

impl<A> fmt::Debug for Deferred<A> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_struct("Deferred").finish_non_exhaustive()
    }
}

static_assertions::assert_impl_all!(Deferred<serde_json::Value>: Send, Unpin);

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    #[test]
    fn test_display_deferred() {
        let deferred = Deferred::pure(42);
        assert_eq!(format!("{deferred}"), "<Deferred>");
    }

    #[tokio::test]
    async fn test_pure_resolves() {
        assert_eq!(Deferred::pure(42).await, Ok(42));
    }

    #[tokio::test]
    async fn test_fail_rejects() {
        let deferred: Deferred<i32> = Deferred::fail(Error::rejected("boom"));
        assert_eq!(deferred.await, Err(Error::rejected("boom")));
    }

    #[tokio::test]
    async fn test_new_is_lazy() {
        let executed = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&executed);
        let deferred = Deferred::new(move || async move {
            flag.store(true, Ordering::SeqCst);
            Ok(7)
        });

        assert!(!executed.load(Ordering::SeqCst));
        assert_eq!(deferred.await, Ok(7));
        assert!(executed.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_try_map_skips_on_failure() {
        let called = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&called);
        let deferred: Deferred<i32> = Deferred::fail(Error::rejected("no"));
        let mapped = deferred.try_map(move |value| {
            flag.store(true, Ordering::SeqCst);
            Ok(value + 1)
        });

        assert_eq!(mapped.await, Err(Error::rejected("no")));
        assert!(!called.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_zip_and_or_else() {
        let zipped = Deferred::pure(1).zip(Deferred::pure("a"));
        assert_eq!(zipped.await, Ok((1, "a")));

        let recovered = Deferred::<i32>::fail(Error::rejected("x")).or_else(|_| Deferred::pure(0));
        assert_eq!(recovered.await, Ok(0));
    }
}
