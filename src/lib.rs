//! # kollect
//!
//! Partially applicable collection, math and string helpers over
//! [`serde_json::Value`], with transparent unwrapping of deferred values.
//!
//! ## Overview
//!
//! Every helper is built from its leading arguments first and applied to the
//! container last, so helpers read naturally in a pipeline:
//!
//! - **Collection engine**: `map`, `filter`, `reduce`, `chunk`, `merge`,
//!   `splice` and friends over sequences and mappings ([`collect`])
//! - **Composition**: the [`pipe!`] macro and [`times`](compose::times)
//! - **Deferred values**: any operation accepts a [`Deferred`] container and
//!   returns a `Deferred` result ([`effect`])
//! - **Paths**: dotted paths with `*` broadcast ([`path`])
//! - **Predicates**: type and shape checks ([`predicate`])
//! - **Math**: `add`, `sum`, `avg`, `divisible`, `size`, `length`
//! - **Strings**: case mapping, `supplant`, `words`, `validate`
//!
//! ## Feature Flags
//!
//! - `math`: Numeric helpers (enabled by default)
//! - `string`: String helpers (enabled by default)
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use kollect::prelude::*;
//! use serde_json::{json, Value};
//!
//! let names = pipe!(
//!     json!([{ "name": "ada" }, { "name": null }, { "name": "grace" }]),
//!     pluck("name"),
//!     filter(),
//!     map(|name: &Value, _| name.as_str().unwrap_or_default().to_uppercase()),
//!     join(", ").last(" and ")
//! );
//! assert_eq!(names, Ok(json!("ADA and GRACE")));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
// Note: Disabling redundant_closure_for_method_calls due to clippy 0.1.92 panic bug
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// Re-exports the operations, the dispatch traits and the composition
/// helpers.
///
/// # Usage
///
/// ```rust
/// use kollect::prelude::*;
/// ```
pub mod prelude {
    pub use crate::collect::*;

    pub use crate::compose::*;

    pub use crate::effect::*;

    pub use crate::predicate::*;

    #[cfg(feature = "math")]
    pub use crate::math::*;

    #[cfg(feature = "string")]
    pub use crate::string::*;
}

pub mod collect;

pub mod compose;

pub mod define;

pub mod effect;

pub mod path;

pub mod predicate;

pub mod value;

#[cfg(feature = "math")]
pub mod math;

#[cfg(feature = "string")]
pub mod string;

pub use effect::{Deferred, Error, Result};
