//! History windowing.
//!
//! Only the most recent exchanges accompany a new question, which bounds the
//! size of every completion request. Follow-up questions get a narrower
//! window because they concern the latest answer.

use crate::message::Turn;
use serde::{Deserialize, Serialize};

/// How many past exchanges are sent with a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryWindow {
    /// Window for ordinary questions.
    #[serde(default = "default_standard")]
    pub standard: usize,
    /// Window for questions classified as follow-ups.
    #[serde(default = "default_follow_up")]
    pub follow_up: usize,
}

fn default_standard() -> usize {
    10
}

fn default_follow_up() -> usize {
    5
}

impl Default for HistoryWindow {
    fn default() -> Self {
        Self {
            standard: default_standard(),
            follow_up: default_follow_up(),
        }
    }
}

impl HistoryWindow {
    /// Returns the window size for a question.
    #[must_use]
    pub fn limit(&self, is_follow_up: bool) -> usize {
        if is_follow_up {
            self.follow_up
        } else {
            self.standard
        }
    }

    /// Returns the most recent turns that fit the window, oldest first.
    #[must_use]
    pub fn select<'a>(&self, history: &'a [Turn], is_follow_up: bool) -> &'a [Turn] {
        let limit = self.limit(is_follow_up);
        &history[history.len().saturating_sub(limit)..]
    }
}
