//! Constant values used throughout the crate.
//!
//! Everything here is immutable for the lifetime of the process. Regular
//! expressions are compiled on first use and shared afterwards.

use std::sync::LazyLock;

use regex::Regex;

/// The largest integer a double represents exactly (`2^53 - 1`).
pub const MAX_SAFE_INTEGER: i64 = 9_007_199_254_740_991;

/// Significant digits kept when rounding numeric aggregates.
pub const PRECISION: usize = 12;

/// The empty string.
pub const RAW_EMPTY: &str = "";

/// A single space.
pub const RAW_WHITESPACE: &str = " ";

/// A comma, the separator of a default `Join`.
pub const RAW_COMMA: &str = ",";

/// A dot, the separator of path segments.
pub const RAW_DOT: &str = ".";

/// The path segment broadcasting over every element of a sequence.
pub const RAW_WILDCARD: &str = "*";

/// Matches e-mail addresses.
pub static RGX_EMAIL: LazyLock<Regex> = LazyLock::new(|| compile(r"^[\w.-]+@([\w-]+\.)+[\w-]{2,4}$"));

/// Matches runs of non-whitespace characters.
pub static RGX_NON_WHITESPACE: LazyLock<Regex> = LazyLock::new(|| compile(r"\S+"));

/// Matches strings made only of whitespace.
pub static RGX_WHITESPACE: LazyLock<Regex> = LazyLock::new(|| compile(r"^\s*$"));

/// Matches general and supplemental punctuation plus ASCII symbols.
pub static RGX_PUNCTUATION: LazyLock<Regex> = LazyLock::new(|| {
    compile(r##"[\x{2000}-\x{206F}\x{2E00}-\x{2E7F}\\'!"#$%&()*+,\-./:;<=>?@\[\]^_`{|}~]"##)
});

/// Matches `{placeholder}` occurrences.
pub static RGX_PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| compile(r"\{(.*?)\}"));

/// Matches lowercase letters.
pub static RGX_LOWERCASE: LazyLock<Regex> = LazyLock::new(|| compile(r"\p{Ll}"));

/// Matches uppercase letters.
pub static RGX_UPPERCASE: LazyLock<Regex> = LazyLock::new(|| compile(r"\p{Lu}"));

/// Matches punctuation, the "special" characters of a password.
pub static RGX_SPECIAL: LazyLock<Regex> = LazyLock::new(|| compile(r"\p{P}"));

/// Matches numeric characters.
pub static RGX_NUMBER: LazyLock<Regex> = LazyLock::new(|| compile(r"\p{N}"));

#[allow(clippy::expect_used)]
fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("built-in pattern is valid")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_pattern() {
        assert!(RGX_EMAIL.is_match("ada@example.org"));
        assert!(!RGX_EMAIL.is_match("ada@example"));
    }

    #[test]
    fn test_punctuation_pattern() {
        assert_eq!(RGX_PUNCTUATION.replace_all("a,b.c!", ""), "abc");
    }

    #[test]
    fn test_whitespace_pattern() {
        assert!(RGX_WHITESPACE.is_match(" \t\n"));
        assert!(!RGX_WHITESPACE.is_match(" a "));
        assert_eq!(RGX_NON_WHITESPACE.find_iter("a  b\tc").count(), 3);
    }

    #[test]
    fn test_placeholder_pattern() {
        let captures: Vec<_> = RGX_PLACEHOLDER
            .captures_iter("{a} and {b.c}")
            .map(|capture| capture[1].to_string())
            .collect();
        assert_eq!(captures, vec!["a", "b.c"]);
    }
}
