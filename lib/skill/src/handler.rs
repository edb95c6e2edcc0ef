//! Handler traits and the per-request input they share.

use crate::envelope::RequestEnvelope;
use crate::error::SkillError;
use crate::response::Response;
use async_trait::async_trait;
use rootcause::Report;
use voxgpt_conversation::SessionState;
use voxgpt_core::{LanguageCode, Result};
use voxgpt_locale::TextTable;

/// Everything a handler sees for one request.
///
/// Handlers mutate `session`; whatever it holds after dispatch is written
/// back to the response's session attributes.
#[derive(Debug, Clone)]
pub struct HandlerInput {
    pub envelope: RequestEnvelope,
    pub language: LanguageCode,
    pub texts: TextTable,
    pub session: SessionState,
}

impl HandlerInput {
    #[must_use]
    pub fn new(
        envelope: RequestEnvelope,
        language: LanguageCode,
        texts: TextTable,
        session: SessionState,
    ) -> Self {
        Self {
            envelope,
            language,
            texts,
            session,
        }
    }

    #[must_use]
    pub fn request_type(&self) -> &str {
        &self.envelope.request.request_type
    }

    #[must_use]
    pub fn is_request_type(&self, request_type: &str) -> bool {
        self.request_type() == request_type
    }

    /// The intent name, for intent requests.
    #[must_use]
    pub fn intent_name(&self) -> Option<&str> {
        self.envelope
            .request
            .intent
            .as_ref()
            .map(|intent| intent.name.as_str())
    }

    #[must_use]
    pub fn is_intent_name(&self, name: &str) -> bool {
        self.intent_name() == Some(name)
    }

    /// The value of a filled slot.
    #[must_use]
    pub fn slot_value(&self, name: &str) -> Option<&str> {
        self.envelope
            .request
            .intent
            .as_ref()
            .and_then(|intent| intent.slots.get(name))
            .and_then(|slot| slot.value.as_deref())
    }

    /// Looks up a required text for this request's language.
    ///
    /// # Errors
    ///
    /// Returns [`SkillError::Text`] wrapping the lookup failure.
    pub fn text(&self, key: &str) -> Result<&str, SkillError> {
        self.texts.text(key).map_err(|report| {
            report.context(SkillError::Text {
                key: key.to_string(),
            })
        })
    }
}

/// Handles one kind of request.
#[async_trait]
pub trait RequestHandler: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    fn can_handle(&self, input: &HandlerInput) -> bool;

    /// Produces the response, updating `input.session` as needed.
    async fn handle(&self, input: &mut HandlerInput) -> Result<Response, SkillError>;
}

/// Turns a failed request into a spoken response.
///
/// Exception handlers cannot fail.
#[async_trait]
pub trait ExceptionHandler: Send + Sync {
    fn can_handle(&self, input: &HandlerInput, error: &Report<SkillError>) -> bool;

    async fn handle(&self, input: &HandlerInput, error: &Report<SkillError>) -> Response;
}

#[cfg(test)]
mod tests {
    use crate::testing;

    #[test]
    fn reads_intent_and_slots() {
        let input = testing::input(testing::intent_request(
            "AIWhoIntent",
            &[("query", "Einstein")],
        ));

        assert!(input.is_request_type("IntentRequest"));
        assert!(input.is_intent_name("AIWhoIntent"));
        assert_eq!(input.slot_value("query"), Some("Einstein"));
        assert_eq!(input.slot_value("searchquery"), None);
    }

    #[test]
    fn launch_request_has_no_intent() {
        let input = testing::input(testing::launch_request());
        assert!(input.intent_name().is_none());
        assert!(input.slot_value("query").is_none());
    }

    #[test]
    fn missing_text_names_the_key() {
        let input = testing::input(testing::launch_request());
        let report = input.text("no_such_key").expect_err("should fail");
        assert!(report.to_string().contains("no_such_key"));
    }
}
