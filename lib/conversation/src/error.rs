//! Error types for the conversation crate.
//!
//! Errors are designed for layered context using rootcause:
//! - `SessionError`: session attributes could not be decoded or encoded
//! - `PatternError`: a follow-up pattern is not a valid regular expression

use std::fmt;

/// Errors from session state operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// The platform sent attributes that do not decode into session state.
    InvalidAttributes { reason: String },
    /// Session state could not be encoded back into attributes.
    EncodeFailed { reason: String },
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidAttributes { reason } => {
                write!(f, "invalid session attributes: {reason}")
            }
            Self::EncodeFailed { reason } => {
                write!(f, "failed to encode session attributes: {reason}")
            }
        }
    }
}

impl std::error::Error for SessionError {}

/// Errors from follow-up pattern compilation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    /// Pattern failed to compile.
    InvalidPattern { pattern: String, reason: String },
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPattern { pattern, reason } => {
                write!(f, "invalid follow-up pattern '{pattern}': {reason}")
            }
        }
    }
}

impl std::error::Error for PatternError {}
