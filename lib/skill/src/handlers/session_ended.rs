use crate::envelope::SESSION_ENDED_REQUEST;
use crate::error::SkillError;
use crate::handler::{HandlerInput, RequestHandler};
use crate::response::Response;
use async_trait::async_trait;
use voxgpt_core::Result;

/// Acknowledges the end of a session. Nothing can be spoken at this point.
pub struct SessionEndedRequestHandler;

#[async_trait]
impl RequestHandler for SessionEndedRequestHandler {
    fn name(&self) -> &'static str {
        "session_ended"
    }

    fn can_handle(&self, input: &HandlerInput) -> bool {
        input.is_request_type(SESSION_ENDED_REQUEST)
    }

    async fn handle(&self, input: &mut HandlerInput) -> Result<Response, SkillError> {
        tracing::info!(
            reason = input.envelope.request.reason.as_deref().unwrap_or("unknown"),
            turns = input.session.turn_count(),
            "Session ended"
        );
        Ok(Response::empty())
    }
}
