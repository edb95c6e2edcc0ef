//! Follow-up question suggestions.

use crate::error::SkillError;
use crate::handler::HandlerInput;
use std::sync::Arc;
use voxgpt_ai::{LlmBackend, LlmCall, SamplingParams};
use voxgpt_conversation::Turn;
use voxgpt_core::Result;

/// Candidates longer than this many words are discarded.
const MAX_SUGGESTION_WORDS: usize = 4;

/// Suggestions produced for one answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FollowUps {
    /// Parsed from the model's reply.
    Generated(Vec<String>),
    /// The localized fallback pair, used when the reply had too few candidates.
    Fallback(Vec<String>),
    /// The suggestion call failed; nothing is offered.
    Unavailable,
}

impl FollowUps {
    /// The questions to offer, in order.
    #[must_use]
    pub fn questions(&self) -> &[String] {
        match self {
            Self::Generated(questions) | Self::Fallback(questions) => questions,
            Self::Unavailable => &[],
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions().is_empty()
    }
}

/// Asks the backend for short follow-up questions.
#[derive(Clone)]
pub struct FollowUpSuggester {
    backend: Arc<dyn LlmBackend>,
    params: SamplingParams,
    count: usize,
}

impl FollowUpSuggester {
    #[must_use]
    pub fn new(backend: Arc<dyn LlmBackend>, params: SamplingParams, count: usize) -> Self {
        Self {
            backend,
            params,
            count,
        }
    }

    /// Builds the suggestion prompt.
    ///
    /// `previous` is the exchange before the current one, if any.
    ///
    /// # Errors
    ///
    /// Returns [`SkillError::Text`] if a prompt text is missing.
    pub fn build_call(
        &self,
        input: &HandlerInput,
        previous: Option<&Turn>,
        question: &str,
        answer: &str,
    ) -> Result<LlmCall, SkillError> {
        let mut call = LlmCall::new(self.params)
            .system(input.text("followup_system_prompt")?)
            .user(input.text("followup_user_prompt")?);

        if let Some(turn) = previous {
            call = call
                .user(format!(
                    "{}{}",
                    input.text("previous_question_prefix")?,
                    turn.question
                ))
                .assistant(&turn.answer);
        }

        Ok(call
            .user(format!("{}{question}", input.text("current_question_prefix")?))
            .assistant(answer)
            .user(input.text("followup_questions_prompt")?))
    }

    /// Suggests follow-up questions for `question` and its `answer`.
    ///
    /// Never fails: any problem is logged and yields [`FollowUps::Unavailable`].
    pub async fn suggest(
        &self,
        input: &HandlerInput,
        previous: Option<&Turn>,
        question: &str,
        answer: &str,
    ) -> FollowUps {
        let call = match self.build_call(input, previous, question, answer) {
            Ok(call) => call,
            Err(report) => {
                tracing::warn!(error = %report, "Unable to build follow-up prompt");
                return FollowUps::Unavailable;
            }
        };

        let raw = match call.execute(self.backend.as_ref()).await {
            Ok(result) => result.content,
            Err(e) => {
                tracing::warn!(error = %e, "Error generating follow-up questions");
                return FollowUps::Unavailable;
            }
        };

        let questions = parse_suggestions(&raw, self.count);
        if questions.len() >= self.count {
            tracing::info!(?questions, "Generated follow-up questions");
            return FollowUps::Generated(questions);
        }

        tracing::debug!(raw = %raw, "Too few usable follow-up questions, using fallback");
        match fallback(input, self.count) {
            Ok(questions) => FollowUps::Fallback(questions),
            Err(report) => {
                tracing::warn!(error = %report, "Fallback follow-up questions missing");
                FollowUps::Unavailable
            }
        }
    }
}

/// Splits a `|`-separated reply into at most `count` short questions.
#[must_use]
pub fn parse_suggestions(raw: &str, count: usize) -> Vec<String> {
    raw.split('|')
        .map(|candidate| candidate.trim().trim_end_matches('?').trim_end())
        .filter(|candidate| {
            !candidate.is_empty() && candidate.split_whitespace().count() <= MAX_SUGGESTION_WORDS
        })
        .take(count)
        .map(str::to_string)
        .collect()
}

fn fallback(input: &HandlerInput, count: usize) -> Result<Vec<String>, SkillError> {
    let pair = [
        input.text("fallback_followup_1")?.to_string(),
        input.text("fallback_followup_2")?.to_string(),
    ];
    Ok(pair.into_iter().take(count).collect())
}
