//! Container dispatch shared by every operation.
//!
//! An operation is a value holding its leading arguments. Applying it to a
//! container goes through one of two traits:
//!
//! - [`Collection`] for read-only operations ([`Operation`]),
//! - [`CollectionMut`] for in-place operations ([`OperationMut`]).
//!
//! Both traits are implemented for the synchronous forms (`Value`,
//! references, the `Result` of a previous stage) and for [`Deferred`]. The
//! output type follows the input: a synchronous container yields a
//! `Result`, a deferred one yields a `Deferred`, and the operation body is
//! written once against `&Value` / `&mut Value`.
//!
//! ```rust
//! use kollect::collect::{filter, Operation};
//! use kollect::Deferred;
//! use serde_json::json;
//!
//! let keep = filter();
//!
//! // Synchronous container.
//! assert_eq!(keep.apply(json!([0, null, 1])), Ok(json!([0, 1])));
//!
//! // Deferred container: the same operation, a deferred result.
//! # futures::executor::block_on(async {
//! let pending = keep.apply(Deferred::pure(json!([0, null, 1])));
//! assert_eq!(pending.await, Ok(json!([0, 1])));
//! # });
//! ```

use serde_json::Value;

use crate::effect::{Deferred, Result};

// =============================================================================
// Containers
// =============================================================================

/// A container a read-only operation can be applied to.
pub trait Collection: Sized {
    /// What applying an operation producing `T` returns.
    type Output<T>;

    /// Whether the container is a not yet settled [`Deferred`].
    const DEFERRED: bool = false;

    /// Runs `operation` against the container, now or once it settles.
    fn resolve<T, F>(self, operation: F) -> Self::Output<T>
    where
        T: Send + 'static,
        F: FnOnce(&Value) -> Result<T> + Send + 'static;

    /// Converts the container into a deferred value.
    fn defer(self) -> Deferred<Value>;
}

impl Collection for Value {
    type Output<T> = Result<T>;

    fn resolve<T, F>(self, operation: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&Value) -> Result<T> + Send + 'static,
    {
        operation(&self)
    }

    fn defer(self) -> Deferred<Value> {
        Deferred::pure(self)
    }
}

impl Collection for &Value {
    type Output<T> = Result<T>;

    fn resolve<T, F>(self, operation: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&Value) -> Result<T> + Send + 'static,
    {
        operation(self)
    }

    fn defer(self) -> Deferred<Value> {
        Deferred::pure(self.clone())
    }
}

impl<V: Into<Value>> Collection for Result<V> {
    type Output<T> = Result<T>;

    fn resolve<T, F>(self, operation: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&Value) -> Result<T> + Send + 'static,
    {
        self.and_then(|value| operation(&value.into()))
    }

    fn defer(self) -> Deferred<Value> {
        Deferred::from_result(self.map(Into::into))
    }
}

impl<V: Into<Value> + Send + 'static> Collection for Deferred<V> {
    type Output<T> = Deferred<T>;

    const DEFERRED: bool = true;

    fn resolve<T, F>(self, operation: F) -> Deferred<T>
    where
        T: Send + 'static,
        F: FnOnce(&Value) -> Result<T> + Send + 'static,
    {
        self.try_map(move |value| operation(&value.into()))
    }

    fn defer(self) -> Deferred<Value> {
        self.fmap(Into::into)
    }
}

/// A container an in-place operation can be applied to.
///
/// Only `&mut Value` makes the mutation visible to the caller; the owned
/// forms mutate a container nobody else holds, which is what a pipeline
/// stage wants.
pub trait CollectionMut: Sized {
    /// What applying an operation producing `T` returns.
    type Output<T>;

    /// Runs `operation` against the container, now or once it settles.
    fn resolve_mut<T, F>(self, operation: F) -> Self::Output<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Value) -> Result<T> + Send + 'static;
}

impl CollectionMut for Value {
    type Output<T> = Result<T>;

    fn resolve_mut<T, F>(mut self, operation: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Value) -> Result<T> + Send + 'static,
    {
        operation(&mut self)
    }
}

impl CollectionMut for &mut Value {
    type Output<T> = Result<T>;

    fn resolve_mut<T, F>(self, operation: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Value) -> Result<T> + Send + 'static,
    {
        operation(self)
    }
}

impl<V: Into<Value>> CollectionMut for Result<V> {
    type Output<T> = Result<T>;

    fn resolve_mut<T, F>(self, operation: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Value) -> Result<T> + Send + 'static,
    {
        self.and_then(|value| operation(&mut value.into()))
    }
}

impl<V: Into<Value> + Send + 'static> CollectionMut for Deferred<V> {
    type Output<T> = Deferred<T>;

    fn resolve_mut<T, F>(self, operation: F) -> Deferred<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Value) -> Result<T> + Send + 'static,
    {
        self.try_map(move |value| operation(&mut value.into()))
    }
}

// =============================================================================
// Operations
// =============================================================================

/// A read-only collection operation with its leading arguments bound.
///
/// Implementors only provide [`Operation::run`]; [`Operation::apply`] takes
/// care of every container form.
pub trait Operation: Clone + Send + Sync + 'static {
    /// Name used in errors and logs.
    const NAME: &'static str;

    /// The result of the operation.
    type Output: Send + 'static;

    /// Runs the operation against a settled container.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeKind`](crate::Error::TypeKind) for unsupported
    /// container variants and whatever the operation documents besides.
    fn run(&self, container: &Value) -> Result<Self::Output>;

    /// Completes the partial application.
    fn apply<C: Collection>(&self, container: C) -> C::Output<Self::Output> {
        if C::DEFERRED {
            tracing::trace!(operation = Self::NAME, "waiting on deferred container");
        }
        let operation = self.clone();
        container.resolve(move |value| operation.run(value))
    }
}

/// An in-place collection operation with its leading arguments bound.
pub trait OperationMut: Clone + Send + Sync + 'static {
    /// Name used in errors and logs.
    const NAME: &'static str;

    /// The result of the operation.
    type Output: Send + 'static;

    /// Runs the operation against a settled container, mutating it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeKind`](crate::Error::TypeKind) for unsupported
    /// container variants.
    fn run_mut(&self, container: &mut Value) -> Result<Self::Output>;

    /// Completes the partial application.
    fn apply<C: CollectionMut>(&self, container: C) -> C::Output<Self::Output> {
        let operation = self.clone();
        container.resolve_mut(move |value| operation.run_mut(value))
    }
}
