use crate::envelope::LAUNCH_REQUEST;
use crate::error::SkillError;
use crate::handler::{HandlerInput, RequestHandler};
use crate::response::{Response, ResponseBuilder};
use async_trait::async_trait;
use voxgpt_core::Result;

/// Greets the user and starts a fresh history.
pub struct LaunchRequestHandler;

#[async_trait]
impl RequestHandler for LaunchRequestHandler {
    fn name(&self) -> &'static str {
        "launch"
    }

    fn can_handle(&self, input: &HandlerInput) -> bool {
        input.is_request_type(LAUNCH_REQUEST)
    }

    async fn handle(&self, input: &mut HandlerInput) -> Result<Response, SkillError> {
        let speech = input.text("launch_activated")?.to_string();
        input.session.reset_history();

        Ok(ResponseBuilder::new()
            .speak(speech.as_str())
            .ask(speech.as_str())
            .build())
    }
}
