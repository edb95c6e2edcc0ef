use crate::error::SkillError;
use crate::handler::{HandlerInput, RequestHandler};
use crate::response::{Response, ResponseBuilder};
use async_trait::async_trait;
use voxgpt_core::Result;

const HELP_INTENT: &str = "AMAZON.HelpIntent";

pub struct HelpIntentHandler;

#[async_trait]
impl RequestHandler for HelpIntentHandler {
    fn name(&self) -> &'static str {
        "help"
    }

    fn can_handle(&self, input: &HandlerInput) -> bool {
        input.is_intent_name(HELP_INTENT)
    }

    async fn handle(&self, input: &mut HandlerInput) -> Result<Response, SkillError> {
        let speech = input.text("help_message")?;
        Ok(ResponseBuilder::new().speak(speech).ask(speech).build())
    }
}
