use crate::error::SkillError;
use crate::handler::{HandlerInput, RequestHandler};
use crate::response::{Response, ResponseBuilder};
use async_trait::async_trait;
use voxgpt_core::Result;

const CANCEL_INTENT: &str = "AMAZON.CancelIntent";
const STOP_INTENT: &str = "AMAZON.StopIntent";

/// Says goodbye and ends the session.
pub struct CancelOrStopIntentHandler;

#[async_trait]
impl RequestHandler for CancelOrStopIntentHandler {
    fn name(&self) -> &'static str {
        "cancel_or_stop"
    }

    fn can_handle(&self, input: &HandlerInput) -> bool {
        input.is_intent_name(CANCEL_INTENT) || input.is_intent_name(STOP_INTENT)
    }

    async fn handle(&self, input: &mut HandlerInput) -> Result<Response, SkillError> {
        Ok(ResponseBuilder::new()
            .speak(input.text("stop_message")?)
            .build())
    }
}
