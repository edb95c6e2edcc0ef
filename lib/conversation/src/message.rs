//! Question/answer pairs kept in the session.

use serde::{Deserialize, Serialize};

/// One completed exchange: the question sent to the model and its answer.
///
/// Stored in session attributes as a two-element `[question, answer]` array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(String, String)", into = "(String, String)")]
pub struct Turn {
    /// The processed question, including any intent prefix.
    pub question: String,
    /// The model's answer, without follow-up suggestions.
    pub answer: String,
}

impl Turn {
    /// Creates a turn.
    #[must_use]
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

impl From<(String, String)> for Turn {
    fn from((question, answer): (String, String)) -> Self {
        Self { question, answer }
    }
}

impl From<Turn> for (String, String) {
    fn from(turn: Turn) -> Self {
        (turn.question, turn.answer)
    }
}

/// The most recent exchange, kept separately for follow-up resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastContext {
    /// The question of the last exchange.
    pub question: String,
    /// The answer of the last exchange.
    pub response: String,
}

impl From<&Turn> for LastContext {
    fn from(turn: &Turn) -> Self {
        Self {
            question: turn.question.clone(),
            response: turn.answer.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn turn_is_stored_as_pair() {
        let json = serde_json::to_value(Turn::new("who is Einstein", "A physicist."))
            .expect("serialize");
        assert_eq!(json, serde_json::json!(["who is Einstein", "A physicist."]));
    }

    #[test]
    fn turn_reads_pair() {
        let turn: Turn =
            serde_json::from_str(r#"["what is rust", "A language."]"#).expect("deserialize");
        assert_eq!(turn.question, "what is rust");
        assert_eq!(turn.answer, "A language.");
    }

    #[test]
    fn last_context_uses_response_key() {
        let context = LastContext::from(&Turn::new("q", "a"));
        let json = serde_json::to_value(&context).expect("serialize");
        assert_eq!(json, serde_json::json!({"question": "q", "response": "a"}));
    }
}
