//! Request dispatch.

use crate::answer::AnswerGenerator;
use crate::config::SkillConfig;
use crate::envelope::{RequestEnvelope, ResponseEnvelope};
use crate::error::SkillError;
use crate::handler::{ExceptionHandler, HandlerInput, RequestHandler};
use crate::handlers::{
    CancelOrStopIntentHandler, CatchAllExceptionHandler, ClearContextIntentHandler,
    HelpIntentHandler, LaunchRequestHandler, QueryIntentHandler, QueryIntents,
    SessionEndedRequestHandler,
};
use crate::response::Response;
use crate::suggest::FollowUpSuggester;
use rootcause::Report;
use std::sync::Arc;
use tracing::instrument;
use voxgpt_ai::LlmBackend;
use voxgpt_conversation::SessionState;
use voxgpt_core::{LanguageCode, Result};
use voxgpt_locale::LocaleLoader;

/// Assembles a [`SkillApp`].
pub struct SkillBuilder {
    locales: LocaleLoader,
    skill_id: Option<String>,
    request_handlers: Vec<Box<dyn RequestHandler>>,
    exception_handlers: Vec<Box<dyn ExceptionHandler>>,
}

impl SkillBuilder {
    /// An empty builder reading text tables through `locales`.
    #[must_use]
    pub fn new(locales: LocaleLoader) -> Self {
        tracing::info!(
            dir = %locales.dir().display(),
            default_language = %locales.default_language(),
            "Reading language files"
        );
        Self {
            locales,
            skill_id: None,
            request_handlers: Vec::new(),
            exception_handlers: Vec::new(),
        }
    }

    /// A builder with the standard handlers registered, in dispatch order.
    #[must_use]
    pub fn standard(config: &SkillConfig, backend: Arc<dyn LlmBackend>) -> Self {
        let answers = AnswerGenerator::new(Arc::clone(&backend), config.history(), config.answer);
        let suggester = config.enable_followup_suggestions.then(|| {
            FollowUpSuggester::new(backend, config.suggestion, config.followup_count)
        });
        let intents = QueryIntents::from_config(config.single_query_intent.as_deref());

        Self::new(LocaleLoader::new(
            &config.locales_dir,
            config.default_language.clone(),
        ))
        .skill_id(config.skill_id.clone())
        .add_request_handler(LaunchRequestHandler)
        .add_request_handler(QueryIntentHandler::new(intents, answers, suggester))
        .add_request_handler(ClearContextIntentHandler)
        .add_request_handler(CancelOrStopIntentHandler)
        .add_request_handler(HelpIntentHandler)
        .add_request_handler(SessionEndedRequestHandler)
    }

    /// Rejects requests addressed to any other skill id.
    #[must_use]
    pub fn skill_id(mut self, skill_id: Option<String>) -> Self {
        self.skill_id = skill_id.filter(|id| !id.trim().is_empty());
        self
    }

    #[must_use]
    pub fn add_request_handler(mut self, handler: impl RequestHandler + 'static) -> Self {
        self.request_handlers.push(Box::new(handler));
        self
    }

    /// Registers an exception handler, consulted before the catch-all.
    #[must_use]
    pub fn add_exception_handler(mut self, handler: impl ExceptionHandler + 'static) -> Self {
        self.exception_handlers.push(Box::new(handler));
        self
    }

    #[must_use]
    pub fn build(mut self) -> SkillApp {
        self.exception_handlers.push(Box::new(CatchAllExceptionHandler));
        SkillApp {
            locales: self.locales,
            skill_id: self.skill_id,
            request_handlers: self.request_handlers,
            exception_handlers: self.exception_handlers,
        }
    }
}

/// Turns request envelopes into response envelopes.
///
/// Shared between requests; all per-request state lives in [`HandlerInput`].
pub struct SkillApp {
    locales: LocaleLoader,
    skill_id: Option<String>,
    request_handlers: Vec<Box<dyn RequestHandler>>,
    exception_handlers: Vec<Box<dyn ExceptionHandler>>,
}

impl SkillApp {
    /// Processes one request.
    ///
    /// Handler failures never surface here: they are turned into a spoken
    /// response by the exception handlers.
    ///
    /// # Errors
    ///
    /// Returns [`SkillError::SkillIdMismatch`] when the request is addressed
    /// to a different skill.
    #[instrument(
        skip(self, envelope),
        fields(
            request_id = %envelope.request.request_id,
            request_type = %envelope.request.request_type,
        )
    )]
    pub async fn process(&self, envelope: RequestEnvelope) -> Result<ResponseEnvelope, SkillError> {
        self.verify_skill_id(&envelope)?;

        let language = LanguageCode::from_locale(envelope.request.locale.as_deref());
        let texts = self.locales.load(&language);
        let (session, decode_error) = match decode_session(&envelope) {
            Ok(session) => (session, None),
            Err(report) => (SessionState::default(), Some(report)),
        };
        let mut input = HandlerInput::new(envelope, language, texts, session);

        let response = match decode_error {
            None => self.dispatch(&mut input).await,
            Some(report) => Err(report),
        };
        let response = match response {
            Ok(response) => response,
            Err(report) => self.handle_error(&input, &report).await,
        };

        let attributes = match input.session.to_attributes() {
            Ok(attributes) => attributes,
            Err(report) => {
                tracing::error!(error = %report, "Unable to encode session attributes");
                input.envelope.attributes().cloned().unwrap_or_default()
            }
        };

        Ok(ResponseEnvelope::new(&response, attributes))
    }

    /// Checks the request is addressed to this skill, when a skill id is set.
    fn verify_skill_id(&self, envelope: &RequestEnvelope) -> Result<(), SkillError> {
        let Some(expected) = &self.skill_id else {
            return Ok(());
        };
        let actual = envelope.application_id();
        if actual == Some(expected.as_str()) {
            return Ok(());
        }

        tracing::warn!(expected = %expected, actual, "Rejecting request for another skill");
        Err(SkillError::SkillIdMismatch {
            expected: expected.clone(),
            actual: actual.map(str::to_string),
        }
        .into())
    }

    async fn dispatch(&self, input: &mut HandlerInput) -> Result<Response, SkillError> {
        let Some(handler) = self.request_handlers.iter().find(|h| h.can_handle(input)) else {
            return Err(SkillError::NoHandler {
                request_type: input.request_type().to_string(),
                intent: input.intent_name().map(str::to_string),
            }
            .into());
        };

        tracing::debug!(handler = handler.name(), "Dispatching request");
        handler.handle(input).await
    }

    async fn handle_error(&self, input: &HandlerInput, error: &Report<SkillError>) -> Response {
        match self
            .exception_handlers
            .iter()
            .find(|h| h.can_handle(input, error))
        {
            Some(handler) => handler.handle(input, error).await,
            None => CatchAllExceptionHandler.handle(input, error).await,
        }
    }
}

fn decode_session(envelope: &RequestEnvelope) -> Result<SessionState, SkillError> {
    match envelope.attributes() {
        Some(attributes) => SessionState::from_attributes(attributes)
            .map_err(|report| report.context(SkillError::SessionAttributes)),
        None => Ok(SessionState::default()),
    }
}
