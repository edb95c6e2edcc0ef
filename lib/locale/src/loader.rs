//! Language file loading with default-language fallback.

use crate::error::LocaleError;
use crate::table::TextTable;
use std::path::{Path, PathBuf};
use voxgpt_core::{LanguageCode, Result};

/// Loads `<dir>/<code>.json` text tables.
///
/// Files are read on every call; nothing is cached.
#[derive(Debug, Clone)]
pub struct LocaleLoader {
    dir: PathBuf,
    default_language: LanguageCode,
}

impl LocaleLoader {
    /// Creates a loader over `dir` with the given fallback language.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>, default_language: LanguageCode) -> Self {
        Self {
            dir: dir.into(),
            default_language,
        }
    }

    /// The directory holding the language files.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The language used when a requested one has no file.
    #[must_use]
    pub fn default_language(&self) -> &LanguageCode {
        &self.default_language
    }

    fn path_for(&self, language: &LanguageCode) -> PathBuf {
        self.dir.join(format!("{language}.json"))
    }

    /// Resolves the file to read: the requested language if present,
    /// otherwise the default language.
    fn resolve(&self, language: &LanguageCode) -> (LanguageCode, PathBuf) {
        let path = self.path_for(language);
        if path.is_file() {
            (language.clone(), path)
        } else {
            (
                self.default_language.clone(),
                self.path_for(&self.default_language),
            )
        }
    }

    /// Loads the table for `language`, falling back to the default language.
    ///
    /// # Errors
    ///
    /// Returns [`LocaleError::Unreadable`] or [`LocaleError::Malformed`] for
    /// the file that was finally chosen.
    pub fn try_load(&self, language: &LanguageCode) -> Result<TextTable, LocaleError> {
        let (resolved, path) = self.resolve(language);

        let raw = std::fs::read_to_string(&path).map_err(|e| LocaleError::Unreadable {
            path: path.clone(),
            reason: e.to_string(),
        })?;

        let entries = match serde_json::from_str(&raw) {
            Ok(serde_json::Value::Object(entries)) => entries,
            Ok(_) => {
                return Err(LocaleError::Malformed {
                    path,
                    reason: "top-level value is not an object".to_string(),
                }
                .into());
            }
            Err(e) => {
                return Err(LocaleError::Malformed {
                    path,
                    reason: e.to_string(),
                }
                .into());
            }
        };

        if &resolved != language {
            tracing::debug!(
                requested = %language,
                resolved = %resolved,
                "No language file for requested language, using default"
            );
        }

        Ok(TextTable::new(resolved, entries))
    }

    /// Loads the table for `language`, returning an empty table if nothing
    /// can be read.
    #[must_use]
    pub fn load(&self, language: &LanguageCode) -> TextTable {
        match self.try_load(language) {
            Ok(table) => table,
            Err(report) => {
                tracing::warn!(
                    language = %language,
                    error = %report,
                    "Unable to load language file"
                );
                TextTable::empty()
            }
        }
    }
}
