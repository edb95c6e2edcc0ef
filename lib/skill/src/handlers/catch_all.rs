use crate::error::SkillError;
use crate::handler::{ExceptionHandler, HandlerInput};
use crate::response::{Response, ResponseBuilder};
use async_trait::async_trait;
use rootcause::Report;

/// Spoken when the text table has no `generic_error` either.
const BUILT_IN_ERROR_SPEECH: &str = "Sorry, something went wrong. Please try again.";

/// Handles every error by apologising and keeping the session open.
pub struct CatchAllExceptionHandler;

#[async_trait]
impl ExceptionHandler for CatchAllExceptionHandler {
    fn can_handle(&self, _input: &HandlerInput, _error: &Report<SkillError>) -> bool {
        true
    }

    async fn handle(&self, input: &HandlerInput, error: &Report<SkillError>) -> Response {
        tracing::error!(
            error = %error,
            request_type = input.request_type(),
            intent = input.intent_name(),
            "Request failed"
        );

        let speech = input.texts.text_or("generic_error", BUILT_IN_ERROR_SPEECH);
        ResponseBuilder::new().speak(speech).ask(speech).build()
    }
}
