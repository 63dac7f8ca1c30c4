//! Composition utilities.
//!
//! This module provides the tools for chaining collection operations in a
//! data flow style.
//!
//! # Overview
//!
//! - [`pipe!`]: Apply operations left-to-right to a container
//! - [`times`]: Run a callback a fixed number of times
//!
//! # Examples
//!
//! ## Pipeline (left-to-right)
//!
//! ```
//! use kollect::collect::{pluck, join};
//! use kollect::pipe;
//! use serde_json::json;
//!
//! let people = json!([{ "name": "Ada" }, { "name": "Alan" }]);
//!
//! // pipe!(x, f, g) = g.apply(f.apply(x))
//! let names = pipe!(people, pluck("name"), join(" & "));
//! assert_eq!(names, Ok(json!("Ada & Alan")));
//! ```
//!
//! # Background
//!
//! A pipeline reads left-to-right:
//!
//! ```text
//! x |> f |> g |> h = h(g(f(x)))
//! ```
//!
//! Every stage is a partial application: an operation that already holds
//! its leading arguments and only waits for the container. Since the output
//! of one stage is accepted as the container of the next, whether it is a
//! `Result` or a `Deferred`, stages compose without unwrapping.

mod pipe_macro;
mod utils;

pub use utils::times;

// Re-export macros (they are already at crate root via #[macro_export])
pub use crate::pipe;
