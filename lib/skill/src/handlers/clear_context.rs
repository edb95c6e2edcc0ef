use crate::error::SkillError;
use crate::handler::{HandlerInput, RequestHandler};
use crate::response::{Response, ResponseBuilder};
use async_trait::async_trait;
use voxgpt_core::Result;

const CLEAR_CONTEXT_INTENT: &str = "ClearContextIntent";

/// Forgets the conversation so far.
pub struct ClearContextIntentHandler;

#[async_trait]
impl RequestHandler for ClearContextIntentHandler {
    fn name(&self) -> &'static str {
        "clear_context"
    }

    fn can_handle(&self, input: &HandlerInput) -> bool {
        input.is_intent_name(CLEAR_CONTEXT_INTENT)
    }

    async fn handle(&self, input: &mut HandlerInput) -> Result<Response, SkillError> {
        let speech = input.text("clear_context_message")?.to_string();
        input.session.clear_context();
        tracing::debug!("Conversation context cleared");

        Ok(ResponseBuilder::new()
            .speak(speech.as_str())
            .ask(speech.as_str())
            .build())
    }
}
