//! Shared fixtures for the skill crate's tests.

use crate::envelope::RequestEnvelope;
use crate::handler::HandlerInput;
use async_trait::async_trait;
use serde_json::{Value as JsonValue, json};
use std::collections::VecDeque;
use std::sync::Mutex;
use voxgpt_ai::{LlmBackend, LlmError, LlmProvider, LlmRequest, LlmResponse, TokenUsage};
use voxgpt_conversation::SessionState;
use voxgpt_core::LanguageCode;
use voxgpt_locale::TextTable;

pub fn english_texts() -> JsonValue {
    json!({
        "launch_activated": "Hi, ask me anything.",
        "stop_message": "Goodbye!",
        "clear_context_message": "Context cleared.",
        "help_message": "Ask any question.",
        "generic_error": "Something went wrong.",
        "reprompt_default": "Anything else?",
        "reprompt_with_suggestions": "Want to ask one of those?",
        "response_error_prefix": "Sorry, ",
        "error_timeout": "that took too long.",
        "error_unavailable": "the assistant is unavailable.",
        "error_configuration": "the assistant is not set up.",
        "response_system_prompt": "You are a helpful voice assistant.",
        "followup_system_prompt_suffix": " This may be a follow-up.",
        "followup_system_prompt": "Suggest short follow-up questions.",
        "followup_user_prompt": "Separate questions with |.",
        "previous_question_prefix": "Previous question: ",
        "current_question_prefix": "Current question: ",
        "followup_questions_prompt": "Now suggest the questions.",
        "fallback_followup_1": "tell me more",
        "fallback_followup_2": "give an example",
        "suggestions_intro": "You could ask: ",
        "suggestions_closer": ".",
        "followup_patterns": ["^tell me more", "^what about", "^and "],
        "intent_prefixes": {
            "AIWhoIntent": "who is",
            "AIWhatIntent": "what is"
        }
    })
}

pub fn texts() -> TextTable {
    TextTable::from_json(LanguageCode::default_language(), english_texts()).expect("texts")
}

pub fn envelope(value: JsonValue) -> RequestEnvelope {
    serde_json::from_value(value).expect("envelope")
}

pub fn launch_request() -> RequestEnvelope {
    envelope(json!({
        "session": {"new": true, "sessionId": "s-1", "attributes": {}},
        "request": {"type": "LaunchRequest", "requestId": "r-1", "locale": "en-US"}
    }))
}

pub fn intent_request(name: &str, slots: &[(&str, &str)]) -> RequestEnvelope {
    intent_request_with(name, slots, json!({}))
}

pub fn intent_request_with(
    name: &str,
    slots: &[(&str, &str)],
    attributes: JsonValue,
) -> RequestEnvelope {
    let slots: serde_json::Map<String, JsonValue> = slots
        .iter()
        .map(|(slot, value)| ((*slot).to_string(), json!({"name": slot, "value": value})))
        .collect();
    envelope(json!({
        "session": {"new": false, "sessionId": "s-1", "attributes": attributes},
        "request": {
            "type": "IntentRequest",
            "requestId": "r-2",
            "locale": "en-US",
            "intent": {"name": name, "slots": slots}
        }
    }))
}

pub fn input(envelope: RequestEnvelope) -> HandlerInput {
    let session = envelope
        .attributes()
        .map(|attributes| SessionState::from_attributes(attributes).expect("session"))
        .unwrap_or_default();
    HandlerInput::new(envelope, LanguageCode::default_language(), texts(), session)
}

/// Answers from a queue of canned replies and records every request.
#[derive(Default)]
pub struct ScriptedBackend {
    replies: Mutex<VecDeque<Result<String, LlmError>>>,
    requests: Mutex<Vec<LlmRequest>>,
}

impl ScriptedBackend {
    pub fn new(replies: Vec<Result<String, LlmError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<LlmRequest> {
        self.requests.lock().expect("lock").clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().expect("lock").len()
    }
}

#[async_trait]
impl LlmBackend for ScriptedBackend {
    async fn generate(&self, request: &LlmRequest) -> Result<LlmResponse, LlmError> {
        self.requests.lock().expect("lock").push(request.clone());
        let reply = self
            .replies
            .lock()
            .expect("lock")
            .pop_front()
            .unwrap_or_else(|| {
                Err(LlmError::RequestFailed {
                    reason: "no scripted reply".to_string(),
                })
            })?;
        Ok(LlmResponse {
            content: reply,
            usage: TokenUsage::default(),
            model: "scripted".to_string(),
        })
    }

    fn provider(&self) -> LlmProvider {
        LlmProvider::OpenAiCompatible
    }

    fn model(&self) -> &str {
        "scripted"
    }
}
