//! Answering a question with the chat-completion backend.

use crate::error::SkillError;
use crate::handler::HandlerInput;
use std::sync::Arc;
use voxgpt_ai::{FailureCategory, LlmBackend, LlmCall, LlmError, SamplingParams};
use voxgpt_conversation::{HistoryWindow, Turn};
use voxgpt_core::Result;

/// Outcome of the answer call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    /// The model's answer text.
    Generated(String),
    /// The call failed; only the category is kept for the spoken reason.
    Failed(FailureCategory),
}

/// Builds the answer prompt and runs it against the backend.
#[derive(Clone)]
pub struct AnswerGenerator {
    backend: Arc<dyn LlmBackend>,
    window: HistoryWindow,
    params: SamplingParams,
}

impl AnswerGenerator {
    #[must_use]
    pub fn new(backend: Arc<dyn LlmBackend>, window: HistoryWindow, params: SamplingParams) -> Self {
        Self {
            backend,
            window,
            params,
        }
    }

    /// Assembles the system prompt, the windowed history and the question.
    ///
    /// # Errors
    ///
    /// Returns [`SkillError::Text`] if a prompt text is missing.
    pub fn build_call(
        &self,
        input: &HandlerInput,
        question: &str,
        is_follow_up: bool,
    ) -> Result<LlmCall, SkillError> {
        let mut system = input.text("response_system_prompt")?.to_string();
        if is_follow_up {
            system.push_str(input.text("followup_system_prompt_suffix")?);
        }

        let history: &[Turn] = self.window.select(&input.session.chat_history, is_follow_up);
        let call = history
            .iter()
            .fold(LlmCall::new(self.params).system(system), |call, turn| {
                call.user(&turn.question).assistant(&turn.answer)
            })
            .user(question);

        Ok(call)
    }

    /// Asks the backend for an answer.
    ///
    /// Backend failures are logged and returned as [`Answer::Failed`].
    ///
    /// # Errors
    ///
    /// Returns [`SkillError::Text`] if a prompt text is missing.
    pub async fn answer(
        &self,
        input: &HandlerInput,
        question: &str,
        is_follow_up: bool,
    ) -> Result<Answer, SkillError> {
        let call = self.build_call(input, question, is_follow_up)?;

        let outcome = call.execute(self.backend.as_ref()).await.and_then(|result| {
            let text = result.content.trim();
            if text.is_empty() {
                return Err(LlmError::ResponseParseFailed {
                    reason: "empty answer".to_string(),
                });
            }
            Ok(text.to_string())
        });

        match outcome {
            Ok(text) => Ok(Answer::Generated(text)),
            Err(e) => {
                let category = e.category();
                tracing::error!(error = %e, ?category, "Error generating response");
                Ok(Answer::Failed(category))
            }
        }
    }
}

/// The spoken explanation for a failed answer call.
///
/// # Errors
///
/// Returns [`SkillError::Text`] if the prefix or reason text is missing.
pub fn failure_speech(input: &HandlerInput, category: FailureCategory) -> Result<String, SkillError> {
    let reason_key = match category {
        FailureCategory::Configuration => "error_configuration",
        FailureCategory::Timeout => "error_timeout",
        FailureCategory::Unavailable => "error_unavailable",
    };
    Ok(format!(
        "{}{}",
        input.text("response_error_prefix")?,
        input.text(reason_key)?
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{self, ScriptedBackend};
    use serde_json::json;
    use voxgpt_ai::MessageRole;

    fn generator(backend: Arc<ScriptedBackend>) -> AnswerGenerator {
        AnswerGenerator::new(backend, HistoryWindow::default(), SamplingParams::answer())
    }

    fn input_with_history(turns: usize) -> HandlerInput {
        let history: Vec<_> = (1..=turns)
            .map(|i| json!([format!("Q{i}"), format!("A{i}")]))
            .collect();
        testing::input(testing::intent_request_with(
            "AIWhoIntent",
            &[("query", "Einstein")],
            json!({"chat_history": history}),
        ))
    }

    #[test]
    fn call_without_history_is_system_then_user() {
        let generator = generator(Arc::new(ScriptedBackend::default()));
        let call = generator
            .build_call(&input_with_history(0), "who is Einstein", false)
            .expect("call");

        let messages = call.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, MessageRole::System);
        assert_eq!(messages[0].content, "You are a helpful voice assistant.");
        assert_eq!(messages[1].role, MessageRole::User);
        assert_eq!(messages[1].content, "who is Einstein");
    }

    #[test]
    fn ordinary_question_sends_last_ten_turns() {
        let generator = generator(Arc::new(ScriptedBackend::default()));
        let call = generator
            .build_call(&input_with_history(12), "who is Curie", false)
            .expect("call");

        let messages = call.messages();
        assert_eq!(messages.len(), 1 + 2 * 10 + 1);
        assert_eq!(messages[1].content, "Q3");
        assert_eq!(messages[2].content, "A3");
        assert_eq!(messages[20].content, "A12");
    }

    #[test]
    fn follow_up_sends_last_five_turns_and_suffix() {
        let generator = generator(Arc::new(ScriptedBackend::default()));
        let call = generator
            .build_call(&input_with_history(12), "tell me more", true)
            .expect("call");

        let messages = call.messages();
        assert_eq!(messages.len(), 1 + 2 * 5 + 1);
        assert_eq!(
            messages[0].content,
            "You are a helpful voice assistant. This may be a follow-up."
        );
        assert_eq!(messages[1].content, "Q8");
    }

    #[tokio::test]
    async fn answer_uses_answer_sampling() {
        let backend = Arc::new(ScriptedBackend::new(vec![Ok(
            "  Albert Einstein was a physicist.  ".to_string(),
        )]));
        let generator = generator(Arc::clone(&backend));

        let answer = generator
            .answer(&input_with_history(0), "who is Einstein", false)
            .await
            .expect("answer");

        assert_eq!(
            answer,
            Answer::Generated("Albert Einstein was a physicist.".to_string())
        );
        let request = &backend.requests()[0];
        assert_eq!(request.max_tokens, Some(300));
        assert_eq!(request.temperature, Some(0.2));
    }

    #[tokio::test]
    async fn backend_failure_is_categorized() {
        let backend = Arc::new(ScriptedBackend::new(vec![Err(LlmError::Timeout)]));
        let generator = generator(backend);

        let answer = generator
            .answer(&input_with_history(0), "who is Einstein", false)
            .await
            .expect("answer");

        assert_eq!(answer, Answer::Failed(FailureCategory::Timeout));
    }

    #[tokio::test]
    async fn blank_completion_is_a_failure() {
        let backend = Arc::new(ScriptedBackend::new(vec![Ok(" \n ".to_string())]));
        let generator = generator(backend);

        let answer = generator
            .answer(&input_with_history(0), "who is Einstein", false)
            .await
            .expect("answer");

        assert_eq!(answer, Answer::Failed(FailureCategory::Unavailable));
    }

    #[test]
    fn failure_speech_never_includes_error_detail() {
        let input = input_with_history(0);
        assert_eq!(
            failure_speech(&input, FailureCategory::Timeout).expect("speech"),
            "Sorry, that took too long."
        );
        assert_eq!(
            failure_speech(&input, FailureCategory::Configuration).expect("speech"),
            "Sorry, the assistant is not set up."
        );
    }

    #[test]
    fn missing_prompt_text_is_an_error() {
        let generator = generator(Arc::new(ScriptedBackend::default()));
        let mut input = input_with_history(0);
        input.texts = voxgpt_locale::TextTable::empty();

        assert!(generator.build_call(&input, "who is Einstein", false).is_err());
    }
}
