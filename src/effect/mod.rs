//! Failure and deferral.
//!
//! This module provides the two effects every operation of the library can
//! carry besides its plain result:
//!
//! - [`Error`]: why an operation could not produce a value
//! - [`Deferred`]: a value that settles later, exactly once
//!
//! # Deferred values
//!
//! A [`Deferred`] represents a computation whose value is not available
//! yet. It is a [`Future`](std::future::Future), so it is consumed with
//! `.await`:
//!
//! ```rust
//! use kollect::effect::Deferred;
//!
//! # futures::executor::block_on(async {
//! let deferred = Deferred::pure(10)
//!     .fmap(|x| x * 2)
//!     .flat_map(|x| Deferred::pure(x + 1));
//!
//! assert_eq!(deferred.await, Ok(21));
//! # });
//! ```
//!
//! # Errors
//!
//! Synchronous operations return [`Result`]. A deferred chain keeps the
//! first failure and hands it to whoever awaits it:
//!
//! ```rust
//! use kollect::effect::{Deferred, Error};
//!
//! # futures::executor::block_on(async {
//! let failed = Deferred::<i32>::fail(Error::rejected("offline")).fmap(|x| x + 1);
//! assert_eq!(failed.await, Err(Error::rejected("offline")));
//! # });
//! ```

mod deferred;
mod error;

pub use deferred::Deferred;
pub use error::{Error, Result};
