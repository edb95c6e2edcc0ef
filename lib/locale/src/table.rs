//! Typed access to a loaded language file.

use crate::error::LocaleError;
use serde_json::{Map, Value as JsonValue};
use voxgpt_core::{LanguageCode, Result};

/// Key holding the intent name to query prefix mapping.
const INTENT_PREFIXES: &str = "intent_prefixes";

/// An immutable mapping of text keys to strings, string lists or nested maps.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextTable {
    language: Option<LanguageCode>,
    entries: Map<String, JsonValue>,
}

impl TextTable {
    /// Creates a table from parsed entries.
    #[must_use]
    pub fn new(language: LanguageCode, entries: Map<String, JsonValue>) -> Self {
        Self {
            language: Some(language),
            entries,
        }
    }

    /// Creates a table with no entries and no language.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a table from a JSON object.
    ///
    /// # Errors
    ///
    /// Returns [`LocaleError::Malformed`] if `value` is not an object.
    pub fn from_json(language: LanguageCode, value: JsonValue) -> Result<Self, LocaleError> {
        match value {
            JsonValue::Object(entries) => Ok(Self::new(language, entries)),
            other => Err(LocaleError::Malformed {
                path: format!("<{language}>").into(),
                reason: format!("expected a JSON object, found {}", kind(&other)),
            }
            .into()),
        }
    }

    /// The language the entries were loaded for, if any.
    #[must_use]
    pub fn language(&self) -> Option<&LanguageCode> {
        self.language.as_ref()
    }

    /// Returns a required string entry.
    ///
    /// # Errors
    ///
    /// Returns [`LocaleError::MissingKey`] or [`LocaleError::WrongType`].
    pub fn text(&self, key: &str) -> Result<&str, LocaleError> {
        match self.entries.get(key) {
            Some(JsonValue::String(s)) => Ok(s.as_str()),
            Some(_) => Err(LocaleError::WrongType {
                key: key.to_string(),
                expected: "a string",
            }
            .into()),
            None => Err(LocaleError::MissingKey {
                key: key.to_string(),
            }
            .into()),
        }
    }

    /// Returns an optional string entry, or `default` when absent or not a string.
    #[must_use]
    pub fn text_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.entries
            .get(key)
            .and_then(JsonValue::as_str)
            .unwrap_or(default)
    }

    /// Returns a required list of strings.
    ///
    /// # Errors
    ///
    /// Returns [`LocaleError::MissingKey`] or [`LocaleError::WrongType`].
    pub fn list(&self, key: &str) -> Result<Vec<&str>, LocaleError> {
        let wrong_type = || LocaleError::WrongType {
            key: key.to_string(),
            expected: "a list of strings",
        };

        let items = match self.entries.get(key) {
            Some(JsonValue::Array(items)) => items,
            Some(_) => return Err(wrong_type().into()),
            None => {
                return Err(LocaleError::MissingKey {
                    key: key.to_string(),
                }
                .into());
            }
        };

        items
            .iter()
            .map(|item| item.as_str().ok_or_else(wrong_type))
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Into::into)
    }

    /// Returns the query prefix configured for an intent, if any.
    #[must_use]
    pub fn intent_prefix(&self, intent: &str) -> Option<&str> {
        self.entries
            .get(INTENT_PREFIXES)
            .and_then(|prefixes| prefixes.get(intent))
            .and_then(JsonValue::as_str)
            .map(str::trim)
            .filter(|prefix| !prefix.is_empty())
    }

    /// Returns the number of top-level entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}
