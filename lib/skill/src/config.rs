//! Skill configuration.
//!
//! Deserialized from the `SKILL__*` environment variables by the server,
//! with every field defaulted.

use serde::Deserialize;
use std::path::PathBuf;
use voxgpt_ai::SamplingParams;
use voxgpt_conversation::HistoryWindow;
use voxgpt_core::LanguageCode;

/// Behaviour switches and tuning for the skill.
#[derive(Debug, Clone, Deserialize)]
pub struct SkillConfig {
    /// Whether answers are followed by suggested follow-up questions.
    #[serde(default = "default_enable_followup_suggestions")]
    pub enable_followup_suggestions: bool,

    /// How many follow-up questions to offer.
    #[serde(default = "default_followup_count")]
    pub followup_count: usize,

    /// Directory holding `<language>.json` text tables.
    #[serde(default = "default_locales_dir")]
    pub locales_dir: PathBuf,

    /// Language used when a request's language has no text table.
    #[serde(default)]
    pub default_language: LanguageCode,

    /// Accept only this intent as a query instead of the standard set.
    #[serde(default)]
    pub single_query_intent: Option<String>,

    /// Reject requests addressed to any other skill id.
    #[serde(default)]
    pub skill_id: Option<String>,

    /// Past exchanges sent with an ordinary question.
    #[serde(default = "default_history_window")]
    pub history_window: usize,

    /// Past exchanges sent with a follow-up question.
    #[serde(default = "default_followup_history_window")]
    pub followup_history_window: usize,

    /// Sampling for the answer call.
    #[serde(default = "SamplingParams::answer")]
    pub answer: SamplingParams,

    /// Sampling for the follow-up suggestion call.
    #[serde(default = "SamplingParams::suggestion")]
    pub suggestion: SamplingParams,
}

fn default_enable_followup_suggestions() -> bool {
    true
}

fn default_followup_count() -> usize {
    2
}

fn default_locales_dir() -> PathBuf {
    PathBuf::from("langs")
}

fn default_history_window() -> usize {
    HistoryWindow::default().standard
}

fn default_followup_history_window() -> usize {
    HistoryWindow::default().follow_up
}

impl Default for SkillConfig {
    fn default() -> Self {
        Self {
            enable_followup_suggestions: default_enable_followup_suggestions(),
            followup_count: default_followup_count(),
            locales_dir: default_locales_dir(),
            default_language: LanguageCode::default(),
            single_query_intent: None,
            skill_id: None,
            history_window: default_history_window(),
            followup_history_window: default_followup_history_window(),
            answer: SamplingParams::answer(),
            suggestion: SamplingParams::suggestion(),
        }
    }
}

impl SkillConfig {
    /// Returns the history window settings.
    #[must_use]
    pub fn history(&self) -> HistoryWindow {
        HistoryWindow {
            standard: self.history_window,
            follow_up: self.followup_history_window,
        }
    }
}
