//! Error types for the locale crate.

use std::fmt;
use std::path::PathBuf;

/// Errors from loading or reading text tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocaleError {
    /// The language file could not be read.
    Unreadable { path: PathBuf, reason: String },
    /// The language file is not a JSON object.
    Malformed { path: PathBuf, reason: String },
    /// A required key is absent from the table.
    MissingKey { key: String },
    /// A key holds a value of the wrong shape.
    WrongType { key: String, expected: &'static str },
}

impl fmt::Display for LocaleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unreadable { path, reason } => {
                write!(f, "unable to read language file '{}': {reason}", path.display())
            }
            Self::Malformed { path, reason } => {
                write!(f, "malformed language file '{}': {reason}", path.display())
            }
            Self::MissingKey { key } => write!(f, "missing text key '{key}'"),
            Self::WrongType { key, expected } => {
                write!(f, "text key '{key}' is not {expected}")
            }
        }
    }
}

impl std::error::Error for LocaleError {}
