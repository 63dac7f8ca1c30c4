//! Dotted path addressing into nested containers.
//!
//! A path such as `"roles.0.name"` walks mappings by key and sequences by
//! numeric index. The segment `*` broadcasts: the rest of the path is
//! resolved against every element of the sequence at that position and the
//! results are collected into a new sequence.
//!
//! Resolution never fails and never builds missing containers; an absent
//! segment simply yields `None`.
//!
//! # Examples
//!
//! ```rust
//! use kollect::path::resolve;
//! use serde_json::json;
//!
//! let user = json!({ "name": "John", "roles": [{ "name": "Editor" }, { "name": "Admin" }] });
//!
//! assert_eq!(resolve("roles.1.name", &user), Some(json!("Admin")));
//! assert_eq!(resolve("roles.*.name", &user), Some(json!(["Editor", "Admin"])));
//! assert_eq!(resolve("roles.7.name", &user), None);
//! ```

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde_json::Value;
use smallvec::SmallVec;

use crate::define::{RAW_DOT, RAW_WILDCARD};

/// Inline capacity for path segments; deeper paths spill to the heap.
const INLINE_SEGMENTS: usize = 4;

/// One step of a [`Path`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// A mapping key, or a sequence index when it parses as one.
    Key(String),
    /// `*`: every element of the sequence at this position.
    Wildcard,
}

impl Segment {
    fn child<'a>(&self, value: &'a Value) -> Option<&'a Value> {
        match (self, value) {
            (Self::Key(key), Value::Object(object)) => object.get(key),
            (Self::Key(key), Value::Array(items)) => index(key).and_then(|index| items.get(index)),
            _ => None,
        }
    }
}

/// Parses a canonical decimal index: digits only, no leading zero.
fn index(key: &str) -> Option<usize> {
    let canonical = !key.is_empty()
        && key.bytes().all(|byte| byte.is_ascii_digit())
        && (key == "0" || !key.starts_with('0'));
    if canonical { key.parse().ok() } else { None }
}

impl fmt::Display for Segment {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => formatter.write_str(key),
            Self::Wildcard => formatter.write_str(RAW_WILDCARD),
        }
    }
}

/// A parsed dotted path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Path {
    segments: SmallVec<[Segment; INLINE_SEGMENTS]>,
}

impl Path {
    /// Parses `path`. The empty string addresses the value itself.
    pub fn parse(path: &str) -> Self {
        if path.is_empty() {
            return Self::default();
        }
        let segments = path
            .split(RAW_DOT)
            .map(|segment| {
                if segment == RAW_WILDCARD {
                    Segment::Wildcard
                } else {
                    Segment::Key(segment.to_owned())
                }
            })
            .collect();
        Self { segments }
    }

    /// The segments of this path.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Returns `true` when the path contains a `*` segment.
    pub fn is_broadcast(&self) -> bool {
        self.segments.contains(&Segment::Wildcard)
    }

    /// Resolves the path against `value`.
    pub fn resolve(&self, value: &Value) -> Option<Value> {
        if self.is_broadcast() {
            walk(&self.segments, value)
        } else {
            self.lookup(value).cloned()
        }
    }

    /// Borrows the addressed value. Broadcasting paths always yield `None`.
    pub fn lookup<'a>(&self, value: &'a Value) -> Option<&'a Value> {
        self.segments
            .iter()
            .try_fold(value, |current, segment| segment.child(current))
    }
}

fn walk(segments: &[Segment], value: &Value) -> Option<Value> {
    match segments.split_first() {
        None => Some(value.clone()),
        Some((Segment::Wildcard, rest)) => match value {
            Value::Array(items) => Some(Value::Array(
                items.iter().filter_map(|item| walk(rest, item)).collect(),
            )),
            _ => None,
        },
        Some((segment, rest)) => segment.child(value).and_then(|child| walk(rest, child)),
    }
}

impl FromStr for Path {
    type Err = Infallible;

    fn from_str(path: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(path))
    }
}

impl From<&str> for Path {
    fn from(path: &str) -> Self {
        Self::parse(path)
    }
}

impl From<String> for Path {
    fn from(path: String) -> Self {
        Self::parse(&path)
    }
}

impl From<&String> for Path {
    fn from(path: &String) -> Self {
        Self::parse(path)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, segment) in self.segments.iter().enumerate() {
            if index > 0 {
                formatter.write_str(RAW_DOT)?;
            }
            write!(formatter, "{segment}")?;
        }
        Ok(())
    }
}

/// Resolves `path` against `value`.
pub fn resolve(path: &str, value: &Value) -> Option<Value> {
    Path::parse(path).resolve(value)
}

/// Appends `segment` to `prefix`; a root segment has no prefix.
pub fn join(prefix: Option<&str>, segment: &str) -> String {
    match prefix {
        Some(prefix) => format!("{prefix}{RAW_DOT}{segment}"),
        None => segment.to_owned(),
    }
}
