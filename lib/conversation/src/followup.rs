//! Follow-up question detection.
//!
//! Each locale supplies regular expressions for phrasings such as "tell me
//! more" or "what about". A question matching any of them is treated as
//! referring to the previous answer.

use crate::error::PatternError;
use regex::Regex;

/// Matches questions against a locale's follow-up patterns.
#[derive(Debug, Clone, Default)]
pub struct FollowUpClassifier {
    patterns: Vec<Regex>,
}

impl FollowUpClassifier {
    /// Compiles the valid patterns and skips the rest with a warning.
    #[must_use]
    pub fn from_patterns<S: AsRef<str>>(patterns: &[S]) -> Self {
        let patterns = patterns
            .iter()
            .filter_map(|p| match compile(p.as_ref()) {
                Ok(regex) => Some(regex),
                Err(e) => {
                    tracing::warn!(error = %e, "Skipping follow-up pattern");
                    None
                }
            })
            .collect();
        Self { patterns }
    }

    /// Returns whether the lower-cased question matches any pattern.
    #[must_use]
    pub fn is_follow_up(&self, question: &str) -> bool {
        let lowered = question.to_lowercase();
        self.patterns.iter().any(|p| p.is_match(&lowered))
    }

    /// Returns the number of usable patterns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Returns whether no patterns are loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

fn compile(pattern: &str) -> Result<Regex, PatternError> {
    Regex::new(pattern).map_err(|e| PatternError::InvalidPattern {
        pattern: pattern.to_string(),
        reason: e.to_string(),
    })
}
