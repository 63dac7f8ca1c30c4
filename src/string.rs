//! String helpers built on the collection engine.
//!
//! Every helper takes a `Value::String` container and fails with
//! [`Error::TypeKind`] on anything else, except [`supplant`], whose
//! container is the data the template reads from.
//!
//! ```rust
//! use kollect::collect::Operation;
//! use kollect::string::{supplant, ucwords};
//! use serde_json::json;
//!
//! assert_eq!(ucwords().apply(json!("hELLO wORLD")), Ok(json!("Hello World")));
//! assert_eq!(
//!     supplant("{user.name} is {age}").apply(json!({ "user": { "name": "Ada" }, "age": 36 })),
//!     Ok(json!("Ada is 36"))
//! );
//! ```

use std::fmt;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::collect::{Operation, join, map};
use crate::define::{
    RAW_EMPTY, RAW_WHITESPACE, RGX_LOWERCASE, RGX_NON_WHITESPACE, RGX_NUMBER, RGX_PLACEHOLDER,
    RGX_PUNCTUATION, RGX_SPECIAL, RGX_UPPERCASE,
};
use crate::effect::{Error, Result};
use crate::path;
use crate::value::to_text;

fn text<'a>(operation: &'static str, container: &'a Value) -> Result<&'a str> {
    container
        .as_str()
        .ok_or_else(|| Error::type_kind(operation, "string", container))
}

// =============================================================================
// Locale
// =============================================================================

/// Case mapping rules.
///
/// Only the Turkic languages deviate from the default Unicode mapping: their
/// dotted and dotless `i` are distinct letters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    /// Default Unicode case mapping.
    #[default]
    Default,
    /// Turkish and Azerbaijani mapping of `i`, `İ`, `ı` and `I`.
    Turkic,
}

impl Locale {
    /// Picks the rules for a BCP 47 tag such as `"tr"` or `"az-AZ"`.
    ///
    /// ```rust
    /// use kollect::string::Locale;
    ///
    /// assert_eq!(Locale::from_tag("tr-TR"), Locale::Turkic);
    /// assert_eq!(Locale::from_tag("en"), Locale::Default);
    /// ```
    pub fn from_tag(tag: &str) -> Self {
        let language = tag.split(['-', '_']).next().unwrap_or_default();
        if language.eq_ignore_ascii_case("tr") || language.eq_ignore_ascii_case("az") {
            Self::Turkic
        } else {
            Self::Default
        }
    }

    /// Lowercases `text`.
    pub fn lower(self, text: &str) -> String {
        match self {
            Self::Default => text.to_lowercase(),
            Self::Turkic => text
                .chars()
                .map(|character| match character {
                    'I' => "ı".to_string(),
                    'İ' => "i".to_string(),
                    other => other.to_lowercase().to_string(),
                })
                .collect(),
        }
    }

    /// Uppercases `text`.
    pub fn upper(self, text: &str) -> String {
        match self {
            Self::Default => text.to_uppercase(),
            Self::Turkic => text
                .chars()
                .map(|character| match character {
                    'i' => "İ".to_string(),
                    other => other.to_uppercase().to_string(),
                })
                .collect(),
        }
    }

    fn capitalise(self, text: &str) -> String {
        let mut characters = text.chars();
        characters.next().map_or_else(String::new, |first| {
            let mut capitalised = self.upper(first.encode_utf8(&mut [0; 4]));
            capitalised.push_str(characters.as_str());
            capitalised
        })
    }
}

macro_rules! locale_builder {
    ($($name:ident),+) => {
        $(
            impl $name {
                /// Uses the case mapping rules of the language `tag`.
                #[must_use]
                pub fn locale(mut self, tag: &str) -> Self {
                    self.locale = Locale::from_tag(tag);
                    self
                }
            }
        )+
    };
}

locale_builder!(Lower, Upper, Ucfirst, Ucwords);

// =============================================================================
// lower / upper / ucfirst / ucwords
// =============================================================================

/// Lowercases a string. Built by [`lower`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Lower {
    locale: Locale,
}

/// Builds a [`Lower`].
///
/// ```rust
/// use kollect::collect::Operation;
/// use kollect::string::lower;
/// use serde_json::json;
///
/// assert_eq!(lower().apply(json!("LOREM")), Ok(json!("lorem")));
/// assert_eq!(lower().locale("tr").apply(json!("DİYARBAKIR")), Ok(json!("diyarbakır")));
/// ```
pub fn lower() -> Lower {
    Lower::default()
}

impl Operation for Lower {
    const NAME: &'static str = "lower";
    type Output = Value;

    fn run(&self, container: &Value) -> Result<Value> {
        Ok(Value::String(self.locale.lower(text(Self::NAME, container)?)))
    }
}

/// Uppercases a string. Built by [`upper`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Upper {
    locale: Locale,
}

/// Builds an [`Upper`].
pub fn upper() -> Upper {
    Upper::default()
}

impl Operation for Upper {
    const NAME: &'static str = "upper";
    type Output = Value;

    fn run(&self, container: &Value) -> Result<Value> {
        Ok(Value::String(self.locale.upper(text(Self::NAME, container)?)))
    }
}

/// Uppercases the first character of a string. Built by [`ucfirst`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Ucfirst {
    locale: Locale,
}

/// Builds an [`Ucfirst`]. The rest of the string is left as is.
pub fn ucfirst() -> Ucfirst {
    Ucfirst::default()
}

impl Operation for Ucfirst {
    const NAME: &'static str = "ucfirst";
    type Output = Value;

    fn run(&self, container: &Value) -> Result<Value> {
        Ok(Value::String(self.locale.capitalise(text(Self::NAME, container)?)))
    }
}

/// Capitalises every word of a string. Built by [`ucwords`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Ucwords {
    locale: Locale,
}

/// Builds an [`Ucwords`]: the string is lowercased, split on whitespace and
/// every word capitalised, then joined with single spaces.
pub fn ucwords() -> Ucwords {
    Ucwords::default()
}

impl Operation for Ucwords {
    const NAME: &'static str = "ucwords";
    type Output = Value;

    fn run(&self, container: &Value) -> Result<Value> {
        let locale = self.locale;
        crate::pipe!(
            container,
            lower().locale_of(locale),
            words(),
            map(move |word: &Value, _| locale.capitalise(word.as_str().unwrap_or_default())),
            join(RAW_WHITESPACE)
        )
    }
}

impl Lower {
    const fn locale_of(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }
}

// =============================================================================
// remove_punct / words / sub
// =============================================================================

/// Strips punctuation. Built by [`remove_punct`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RemovePunct;

/// Builds a [`RemovePunct`], removing general and supplemental punctuation
/// plus ASCII symbols.
///
/// ```rust
/// use kollect::collect::Operation;
/// use kollect::string::remove_punct;
/// use serde_json::json;
///
/// assert_eq!(remove_punct().apply(json!("Hello, world!")), Ok(json!("Hello world")));
/// ```
pub const fn remove_punct() -> RemovePunct {
    RemovePunct
}

impl Operation for RemovePunct {
    const NAME: &'static str = "remove_punct";
    type Output = Value;

    fn run(&self, container: &Value) -> Result<Value> {
        let stripped = RGX_PUNCTUATION.replace_all(text(Self::NAME, container)?, RAW_EMPTY);
        Ok(Value::String(stripped.into_owned()))
    }
}

/// Splits a string into words. Built by [`words`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Words {
    strip_punct: bool,
}

/// Builds a [`Words`], splitting on runs of whitespace.
///
/// ```rust
/// use kollect::collect::Operation;
/// use kollect::string::words;
/// use serde_json::json;
///
/// let sentence = json!("Lorem ipsum\ndolor sit amet.");
/// assert_eq!(words().apply(&sentence), Ok(json!(["Lorem", "ipsum", "dolor", "sit", "amet."])));
/// assert_eq!(
///     words().strip_punct().apply(&sentence),
///     Ok(json!(["Lorem", "ipsum", "dolor", "sit", "amet"]))
/// );
/// ```
pub fn words() -> Words {
    Words::default()
}

impl Words {
    /// Removes punctuation before splitting.
    #[must_use]
    pub const fn strip_punct(mut self) -> Self {
        self.strip_punct = true;
        self
    }
}

impl Operation for Words {
    const NAME: &'static str = "words";
    type Output = Value;

    fn run(&self, container: &Value) -> Result<Value> {
        let source = text(Self::NAME, container)?;
        let source = if self.strip_punct {
            RGX_PUNCTUATION.replace_all(source, RAW_EMPTY)
        } else {
            source.into()
        };
        Ok(RGX_NON_WHITESPACE
            .find_iter(&source)
            .map(|word| Value::from(word.as_str()))
            .collect())
    }
}

/// Extracts a range of characters. Built by [`sub`].
#[derive(Debug, Clone, Copy)]
pub struct Sub {
    start: usize,
    end: usize,
}

/// Builds a [`Sub`] from character `start` to the end of the string.
///
/// Bounds are clamped to the string, and swapped when `start` is past
/// [`end`](Sub::end). An end of `0` means the end of the string.
///
/// ```rust
/// use kollect::collect::Operation;
/// use kollect::string::sub;
/// use serde_json::json;
///
/// assert_eq!(sub(1).apply(json!("Lorem")), Ok(json!("orem")));
/// assert_eq!(sub(0).end(1).apply(json!("Lorem")), Ok(json!("L")));
/// assert_eq!(sub(4).end(1).apply(json!("Lorem")), Ok(json!("ore")));
/// ```
pub const fn sub(start: usize) -> Sub {
    Sub { start, end: 0 }
}

impl Sub {
    /// Stops before character `end`.
    #[must_use]
    pub const fn end(mut self, end: usize) -> Self {
        self.end = end;
        self
    }
}

impl Operation for Sub {
    const NAME: &'static str = "sub";
    type Output = Value;

    fn run(&self, container: &Value) -> Result<Value> {
        let source = text(Self::NAME, container)?;
        let total = source.chars().count();
        let end = if self.end == 0 { total } else { self.end.min(total) };
        let start = self.start.min(total);
        let (from, to) = if start > end { (end, start) } else { (start, end) };
        Ok(Value::String(source.chars().skip(from).take(to - from).collect()))
    }
}

// =============================================================================
// supplant
// =============================================================================

/// Fills the placeholders of a template from a container. Built by
/// [`supplant`].
#[derive(Debug, Clone)]
pub struct Supplant {
    template: String,
    holders: Option<(String, String)>,
}

/// Builds a [`Supplant`] of `template`.
///
/// Each `{path}` is replaced by the value at `path` in the container; missing
/// and `null` values become the empty string.
///
/// ```rust
/// use kollect::collect::Operation;
/// use kollect::string::supplant;
/// use serde_json::json;
///
/// let greeting = supplant("Hello <<name>>!").holders("<<", ">>");
/// assert_eq!(greeting.apply(json!({ "name": "Grace" })), Ok(json!("Hello Grace!")));
/// assert_eq!(greeting.apply(json!({})), Ok(json!("Hello !")));
/// ```
pub fn supplant(template: impl Into<String>) -> Supplant {
    Supplant {
        template: template.into(),
        holders: None,
    }
}

impl Supplant {
    /// Uses `open` and `close` around placeholders instead of braces.
    #[must_use]
    pub fn holders(mut self, open: impl Into<String>, close: impl Into<String>) -> Self {
        self.holders = Some((open.into(), close.into()));
        self
    }

    fn fill(&self, pattern: &Regex, data: &Value) -> String {
        pattern
            .replace_all(&self.template, |captures: &regex::Captures<'_>| {
                path::resolve(&captures[1], data)
                    .map(|value| to_text(&value))
                    .unwrap_or_default()
            })
            .into_owned()
    }
}

impl Operation for Supplant {
    const NAME: &'static str = "supplant";
    type Output = Value;

    fn run(&self, container: &Value) -> Result<Value> {
        let filled = match &self.holders {
            None => self.fill(&RGX_PLACEHOLDER, container),
            Some((open, close)) => {
                let pattern = format!("{}(.*?){}", regex::escape(open), regex::escape(close));
                let pattern = Regex::new(&pattern)
                    .map_err(|error| Error::invalid_argument(Self::NAME, error.to_string()))?;
                self.fill(&pattern, container)
            }
        };
        Ok(Value::String(filled))
    }
}

// =============================================================================
// validate
// =============================================================================

/// A named check [`validate`] reports as satisfied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Criterion {
    /// At least [`Criteria::minimum`] characters.
    Minimum,
    /// At most [`Criteria::maximum`] characters.
    Maximum,
    /// Enough lowercase letters.
    Lowercase,
    /// Enough uppercase letters.
    Uppercase,
    /// Enough punctuation characters.
    Special,
    /// Enough numeric characters.
    Number,
    /// One of the required words occurs.
    Require,
    /// One of the disabled words occurs.
    Disable,
}

impl Criterion {
    /// The lowercase name of the criterion.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Minimum => "minimum",
            Self::Maximum => "maximum",
            Self::Lowercase => "lowercase",
            Self::Uppercase => "uppercase",
            Self::Special => "special",
            Self::Number => "number",
            Self::Require => "require",
            Self::Disable => "disable",
        }
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl From<Criterion> for Value {
    fn from(criterion: Criterion) -> Self {
        Self::from(criterion.as_str())
    }
}

/// Thresholds for [`validate`].
///
/// Counting criteria set to `0` and word lists left empty are not checked.
/// Deserialises from a JSON object; absent fields take their defaults.
///
/// ```rust
/// use kollect::string::Criteria;
/// use serde_json::json;
///
/// let criteria: Criteria = serde_json::from_value(json!({ "minimum": 8, "number": 2 })).unwrap();
/// assert_eq!(criteria.minimum, 8);
/// assert_eq!(criteria.maximum, None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Criteria {
    /// Minimum number of characters.
    pub minimum: usize,
    /// Maximum number of characters; unbounded when `None`.
    pub maximum: Option<usize>,
    /// Minimum number of lowercase letters.
    pub lowercase: usize,
    /// Minimum number of uppercase letters.
    pub uppercase: usize,
    /// Minimum number of punctuation characters.
    pub special: usize,
    /// Minimum number of numeric characters.
    pub number: usize,
    /// Words of which at least one must occur.
    pub require: Vec<String>,
    /// Words none of which should occur.
    pub disable: Vec<String>,
}

/// Checks a string against [`Criteria`]. Built by [`validate`].
#[derive(Debug, Clone)]
pub struct Validate {
    criteria: Criteria,
}

/// Builds a [`Validate`] reporting every satisfied [`Criterion`], always in
/// the order the enum declares them.
///
/// ```rust
/// use kollect::collect::Operation;
/// use kollect::string::{validate, Criteria, Criterion};
/// use serde_json::json;
///
/// let criteria = Criteria { minimum: 8, lowercase: 2, uppercase: 2, special: 2, number: 2, ..Criteria::default() };
/// assert_eq!(
///     validate(criteria).apply(json!("Password123!")),
///     Ok(vec![Criterion::Minimum, Criterion::Maximum, Criterion::Lowercase, Criterion::Number])
/// );
/// ```
pub const fn validate(criteria: Criteria) -> Validate {
    Validate { criteria }
}

fn occurs(words: &[String], lowered: &str) -> bool {
    words
        .iter()
        .any(|word| lowered.contains(word.to_lowercase().as_str()))
}

impl Operation for Validate {
    const NAME: &'static str = "validate";
    type Output = Vec<Criterion>;

    fn run(&self, container: &Value) -> Result<Vec<Criterion>> {
        let source = text(Self::NAME, container)?;
        let criteria = &self.criteria;
        let length = source.chars().count();
        let at_least = |pattern: &Regex, count: usize| {
            count > 0 && pattern.find_iter(source).count() >= count
        };
        let lowered = source.to_lowercase();

        let checks = [
            (Criterion::Minimum, length >= criteria.minimum),
            (
                Criterion::Maximum,
                criteria.maximum.is_none_or(|maximum| length <= maximum),
            ),
            (Criterion::Lowercase, at_least(&*RGX_LOWERCASE, criteria.lowercase)),
            (Criterion::Uppercase, at_least(&*RGX_UPPERCASE, criteria.uppercase)),
            (Criterion::Special, at_least(&*RGX_SPECIAL, criteria.special)),
            (Criterion::Number, at_least(&*RGX_NUMBER, criteria.number)),
            (Criterion::Require, occurs(&criteria.require, &lowered)),
            (Criterion::Disable, occurs(&criteria.disable, &lowered)),
        ];
        let satisfied: Vec<Criterion> = checks
            .into_iter()
            .filter_map(|(criterion, passed)| passed.then_some(criterion))
            .collect();
        tracing::trace!(satisfied = satisfied.len(), "validated text");
        Ok(satisfied)
    }
}
