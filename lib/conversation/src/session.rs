//! Per-conversation session state.
//!
//! The platform owns persistence: it sends the session attributes with every
//! request and stores whatever the response returns. [`SessionState`] is the
//! typed view of those attributes for the lifetime of one request.

use crate::error::SessionError;
use crate::message::{LastContext, Turn};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use voxgpt_core::Result;

/// Session attributes map as carried by the request and response envelopes.
pub type Attributes = Map<String, JsonValue>;

/// Conversation state for one voice session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    /// Completed exchanges, oldest first.
    #[serde(default)]
    pub chat_history: Vec<Turn>,
    /// The most recent exchange.
    #[serde(default)]
    pub last_context: Option<LastContext>,
    /// Suggestions offered with the most recent answer.
    #[serde(default)]
    pub followup_questions: Vec<String>,
    /// Attributes written by someone else, passed back untouched.
    #[serde(flatten)]
    pub extra: Attributes,
}

impl SessionState {
    /// Decodes session state from platform attributes.
    ///
    /// Missing keys decode as empty state.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InvalidAttributes`] if a known key has the wrong shape.
    pub fn from_attributes(attributes: &Attributes) -> Result<Self, SessionError> {
        serde_json::from_value(JsonValue::Object(attributes.clone())).map_err(|e| {
            SessionError::InvalidAttributes {
                reason: e.to_string(),
            }
            .into()
        })
    }

    /// Encodes session state into platform attributes.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::EncodeFailed`] if serialization fails.
    pub fn to_attributes(&self) -> Result<Attributes, SessionError> {
        match serde_json::to_value(self) {
            Ok(JsonValue::Object(map)) => Ok(map),
            Ok(other) => Err(SessionError::EncodeFailed {
                reason: format!("expected an object, got {other}"),
            }
            .into()),
            Err(e) => Err(SessionError::EncodeFailed {
                reason: e.to_string(),
            }
            .into()),
        }
    }

    /// Empties the chat history, keeping the last context.
    pub fn reset_history(&mut self) {
        self.chat_history.clear();
    }

    /// Forgets everything the conversation has accumulated.
    pub fn clear_context(&mut self) {
        self.chat_history.clear();
        self.last_context = None;
        self.followup_questions.clear();
    }

    /// Appends a completed exchange and makes it the last context.
    pub fn record_turn(&mut self, turn: Turn) {
        self.last_context = Some(LastContext::from(&turn));
        self.chat_history.push(turn);
    }

    /// Returns the most recent exchange in the history.
    #[must_use]
    pub fn last_turn(&self) -> Option<&Turn> {
        self.chat_history.last()
    }

    /// Returns the number of recorded exchanges.
    #[must_use]
    pub fn turn_count(&self) -> usize {
        self.chat_history.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn attributes(value: JsonValue) -> Attributes {
        match value {
            JsonValue::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn empty_attributes_decode_as_empty_state() {
        let state = SessionState::from_attributes(&Attributes::new()).expect("decode");
        assert_eq!(state, SessionState::default());
    }

    #[test]
    fn attributes_decode_history_and_context() {
        let state = SessionState::from_attributes(&attributes(json!({
            "chat_history": [["who is Einstein", "A physicist."]],
            "last_context": {"question": "who is Einstein", "response": "A physicist."},
            "followup_questions": ["his theories"]
        })))
        .expect("decode");

        assert_eq!(state.turn_count(), 1);
        assert_eq!(state.last_turn().unwrap().answer, "A physicist.");
        assert_eq!(state.last_context.unwrap().question, "who is Einstein");
        assert_eq!(state.followup_questions, vec!["his theories"]);
    }

    #[test]
    fn null_last_context_is_accepted() {
        let state = SessionState::from_attributes(&attributes(json!({
            "chat_history": [],
            "last_context": null
        })))
        .expect("decode");
        assert!(state.last_context.is_none());
    }

    #[test]
    fn malformed_history_is_rejected() {
        let result = SessionState::from_attributes(&attributes(json!({
            "chat_history": "not a list"
        })));
        assert!(result.is_err());
    }

    #[test]
    fn unknown_attributes_survive_a_round_trip() {
        let state = SessionState::from_attributes(&attributes(json!({
            "chat_history": [],
            "visits": 3
        })))
        .expect("decode");

        let encoded = state.to_attributes().expect("encode");
        assert_eq!(encoded["visits"], json!(3));
        assert_eq!(encoded["chat_history"], json!([]));
    }

    #[test]
    fn record_turn_appends_and_sets_last_context() {
        let mut state = SessionState::default();
        state.record_turn(Turn::new("q1", "a1"));
        state.record_turn(Turn::new("q2", "a2"));

        assert_eq!(state.turn_count(), 2);
        assert_eq!(state.chat_history[0].question, "q1");
        assert_eq!(
            state.last_context,
            Some(LastContext {
                question: "q2".to_string(),
                response: "a2".to_string()
            })
        );
    }

    #[test]
    fn reset_history_keeps_last_context() {
        let mut state = SessionState::default();
        state.record_turn(Turn::new("q", "a"));
        state.reset_history();

        assert_eq!(state.turn_count(), 0);
        assert!(state.last_context.is_some());
    }

    #[test]
    fn clear_context_empties_everything() {
        let mut state = SessionState::default();
        state.record_turn(Turn::new("q", "a"));
        state.followup_questions = vec!["more".to_string()];
        state.clear_context();

        assert!(state.chat_history.is_empty());
        assert!(state.last_context.is_none());
        assert!(state.followup_questions.is_empty());
    }
}
