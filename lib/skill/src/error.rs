//! Error types for the skill crate.
//!
//! Errors are designed for layered context using rootcause:
//! - `SkillError::Text` and `SkillError::SessionAttributes` wrap reports
//!   from the locale and conversation crates
//! - `SkillError::NoHandler` is raised by dispatch itself
//! - `SkillError::SkillIdMismatch` rejects a request before dispatch

use std::fmt;

/// Errors raised while processing a skill request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkillError {
    /// A text table lookup failed (use as context wrapper).
    Text { key: String },
    /// Session attributes could not be decoded (use as context wrapper).
    SessionAttributes,
    /// No registered handler accepts the request.
    NoHandler {
        request_type: String,
        intent: Option<String>,
    },
    /// The request was addressed to a different skill.
    SkillIdMismatch {
        expected: String,
        actual: Option<String>,
    },
}

impl fmt::Display for SkillError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text { key } => write!(f, "failed to look up text '{key}'"),
            Self::SessionAttributes => write!(f, "failed to decode session attributes"),
            Self::NoHandler {
                request_type,
                intent,
            } => match intent {
                Some(intent) => {
                    write!(f, "no handler for {request_type} with intent '{intent}'")
                }
                None => write!(f, "no handler for {request_type}"),
            },
            Self::SkillIdMismatch { expected, actual } => match actual {
                Some(actual) => {
                    write!(f, "request for skill '{actual}', expected '{expected}'")
                }
                None => write!(f, "request carries no skill id, expected '{expected}'"),
            },
        }
    }
}

impl std::error::Error for SkillError {}
