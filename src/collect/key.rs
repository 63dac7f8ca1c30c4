//! Keys handed to collection callbacks.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

/// The position of an entry: an index in a sequence, a name in a mapping.
///
/// # Examples
///
/// ```rust
/// use kollect::collect::Key;
///
/// assert_eq!(Key::from(2).to_string(), "2");
/// assert_eq!(Key::from("name").as_name(), Some("name"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key<'a> {
    /// Position in an ordered sequence.
    Index(usize),
    /// Key in a mapping.
    Name(Cow<'a, str>),
}

impl Key<'_> {
    /// Returns the index of a sequence entry.
    pub const fn as_index(&self) -> Option<usize> {
        match self {
            Self::Index(index) => Some(*index),
            Self::Name(_) => None,
        }
    }

    /// Returns the name of a mapping entry.
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Self::Index(_) => None,
            Self::Name(name) => Some(name),
        }
    }

    /// Detaches the key from the container it was borrowed from.
    pub fn into_owned(self) -> Key<'static> {
        match self {
            Self::Index(index) => Key::Index(index),
            Self::Name(name) => Key::Name(Cow::Owned(name.into_owned())),
        }
    }

    /// The key as a value: a number for an index, a string for a name.
    pub fn to_value(&self) -> Value {
        match self {
            Self::Index(index) => Value::from(*index),
            Self::Name(name) => Value::from(name.as_ref()),
        }
    }
}

impl fmt::Display for Key<'_> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(index) => write!(formatter, "{index}"),
            Self::Name(name) => formatter.write_str(name),
        }
    }
}

impl From<usize> for Key<'_> {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl<'a> From<&'a str> for Key<'a> {
    fn from(name: &'a str) -> Self {
        Self::Name(Cow::Borrowed(name))
    }
}

impl From<String> for Key<'_> {
    fn from(name: String) -> Self {
        Self::Name(Cow::Owned(name))
    }
}

/// A shared callback over `(value, key)`.
pub(crate) type Callback<R> = Arc<dyn Fn(&Value, Key<'_>) -> R + Send + Sync>;

pub(crate) fn callback<R, F>(function: F) -> Callback<R>
where
    F: Fn(&Value, Key<'_>) -> R + Send + Sync + 'static,
{
    Arc::new(function)
}

/// Calls `function` for every entry of a container in order.
///
/// Returns `false`, without calling anything, when `container` is not a
/// container.
pub(crate) fn for_each_entry<F>(container: &Value, mut function: F) -> bool
where
    F: FnMut(Key<'_>, &Value),
{
    match container {
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                function(Key::Index(index), item);
            }
            true
        }
        Value::Object(object) => {
            for (name, value) in object {
                function(Key::from(name.as_str()), value);
            }
            true
        }
        _ => false,
    }
}
