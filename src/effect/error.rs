//! Error types shared by every operation.
//!
//! Operations never swallow a failure: a synchronous call returns it in a
//! [`Result`], and a deferred chain carries it unchanged to whoever awaits
//! the final [`Deferred`](super::Deferred).

use serde_json::Value;

use crate::value::kind;

/// Errors raised by collection, math and string operations.
///
/// # Examples
///
/// ```rust
/// use kollect::Error;
/// use serde_json::json;
///
/// let error = Error::type_kind("reduce", "sequence or mapping", &json!(42));
/// assert_eq!(
///     format!("{error}"),
///     "reduce: expected sequence or mapping, found number"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The container is of a variant the operation does not support.
    #[error("{operation}: expected {expected}, found {found}")]
    TypeKind {
        /// The operation that rejected the container.
        operation: &'static str,
        /// The variants the operation accepts.
        expected: &'static str,
        /// The variant it received.
        found: &'static str,
    },

    /// A leading argument is outside the range the operation accepts.
    #[error("{operation}: invalid argument: {reason}")]
    InvalidArgument {
        /// The operation that rejected the argument.
        operation: &'static str,
        /// Why the argument was rejected.
        reason: String,
    },

    /// A deferred source settled with a failure.
    #[error("deferred value rejected: {reason}")]
    Rejected {
        /// The failure reported by the source.
        reason: String,
    },
}

impl Error {
    /// Builds a [`Error::TypeKind`] for `found`.
    pub fn type_kind(operation: &'static str, expected: &'static str, found: &Value) -> Self {
        let found = kind(found);
        tracing::debug!(operation, expected, found, "unsupported container variant");
        Self::TypeKind {
            operation,
            expected,
            found,
        }
    }

    /// Builds a [`Error::TypeKind`] for an empty container.
    pub fn empty(operation: &'static str) -> Self {
        tracing::debug!(operation, "empty container without a seed");
        Self::TypeKind {
            operation,
            expected: "a seed or a non-empty container",
            found: "empty container",
        }
    }

    /// Builds a [`Error::InvalidArgument`].
    pub fn invalid_argument(operation: &'static str, reason: impl Into<String>) -> Self {
        let reason = reason.into();
        tracing::debug!(operation, reason = %reason, "invalid argument");
        Self::InvalidArgument { operation, reason }
    }

    /// Builds a [`Error::Rejected`], the failure of a deferred source.
    pub fn rejected(reason: impl Into<String>) -> Self {
        Self::Rejected {
            reason: reason.into(),
        }
    }
}

/// Result alias used across the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;
