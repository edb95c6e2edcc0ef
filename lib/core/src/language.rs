//! Language codes derived from platform locale tags.
//!
//! The platform sends BCP-47 style tags such as `en-US` or `de-DE`. Only the
//! primary subtag selects a text table, so `en-GB` and `en-US` share `en`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Locale assumed when a request carries none.
pub const DEFAULT_LOCALE: &str = "en-US";

/// Error returned when a locale tag has no usable primary subtag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseLanguageError {
    /// The rejected input.
    pub input: String,
    /// The reason for the parse failure.
    pub reason: &'static str,
}

impl fmt::Display for ParseLanguageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid locale '{}': {}", self.input, self.reason)
    }
}

impl std::error::Error for ParseLanguageError {}

/// A lower-case primary language subtag such as `en` or `de`.
///
/// Only ASCII letters are accepted, which also keeps the value safe to use
/// as a file stem.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LanguageCode(String);

impl LanguageCode {
    /// Derives the language code from an optional locale tag.
    ///
    /// Missing, empty or malformed tags fall back to [`DEFAULT_LOCALE`].
    #[must_use]
    pub fn from_locale(locale: Option<&str>) -> Self {
        locale
            .filter(|tag| !tag.trim().is_empty())
            .and_then(|tag| tag.parse().ok())
            .unwrap_or_else(Self::default_language)
    }

    /// The language of [`DEFAULT_LOCALE`].
    #[must_use]
    pub fn default_language() -> Self {
        Self("en".to_string())
    }

    /// Returns the code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for LanguageCode {
    fn default() -> Self {
        Self::default_language()
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for LanguageCode {
    type Err = ParseLanguageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let primary = s.trim().split(['-', '_']).next().unwrap_or_default();

        if primary.is_empty() {
            return Err(ParseLanguageError {
                input: s.to_string(),
                reason: "empty primary subtag",
            });
        }
        if !primary.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ParseLanguageError {
                input: s.to_string(),
                reason: "primary subtag must be ASCII letters",
            });
        }

        Ok(Self(primary.to_ascii_lowercase()))
    }
}

impl TryFrom<String> for LanguageCode {
    type Error = ParseLanguageError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<LanguageCode> for String {
    fn from(code: LanguageCode) -> Self {
        code.0
    }
}
