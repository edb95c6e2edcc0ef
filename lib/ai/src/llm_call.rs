//! LLM Call primitive.
//!
//! A single chat completion: an ordered message list plus the sampling
//! parameters it should run with. The skill issues two kinds of calls (the
//! answer and the follow-up suggestions) which differ only in their
//! [`SamplingParams`].

use crate::backend::{LlmBackend, LlmMessage, LlmRequest, LlmResponse, TokenUsage};
use crate::error::LlmError;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Sampling parameters for one kind of call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplingParams {
    /// Temperature for sampling.
    pub temperature: f32,
    /// Maximum tokens to generate.
    pub max_tokens: u32,
    /// Timeout for the whole HTTP exchange, in seconds.
    pub timeout_secs: u64,
}

impl SamplingParams {
    /// Low temperature, room for a spoken paragraph.
    #[must_use]
    pub const fn answer() -> Self {
        Self {
            temperature: 0.2,
            max_tokens: 300,
            timeout_secs: 10,
        }
    }

    /// Higher temperature, a handful of words, short timeout.
    #[must_use]
    pub const fn suggestion() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: 50,
            timeout_secs: 5,
        }
    }

    /// Returns the timeout as a [`Duration`].
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// The result of an LLM Call.
#[derive(Debug, Clone, PartialEq)]
pub struct LlmCallResult {
    /// The raw text output.
    pub content: String,
    /// Token usage statistics.
    pub usage: TokenUsage,
    /// Model that generated the response.
    pub model: String,
    /// Latency in milliseconds.
    pub latency_ms: u64,
}

impl LlmCallResult {
    /// Creates a result from an LLM response.
    #[must_use]
    pub fn from_response(response: LlmResponse, latency_ms: u64) -> Self {
        Self {
            content: response.content,
            usage: response.usage,
            model: response.model,
            latency_ms,
        }
    }
}

/// An LLM Call executor.
///
/// Messages are appended in the order they should be sent.
#[derive(Debug, Clone)]
pub struct LlmCall {
    messages: Vec<LlmMessage>,
    params: SamplingParams,
}

impl LlmCall {
    /// Creates an empty call with the given sampling parameters.
    #[must_use]
    pub fn new(params: SamplingParams) -> Self {
        Self {
            messages: Vec::new(),
            params,
        }
    }

    /// Appends a system message.
    #[must_use]
    pub fn system(self, content: impl Into<String>) -> Self {
        self.message(LlmMessage::system(content))
    }

    /// Appends a user message.
    #[must_use]
    pub fn user(self, content: impl Into<String>) -> Self {
        self.message(LlmMessage::user(content))
    }

    /// Appends an assistant message.
    #[must_use]
    pub fn assistant(self, content: impl Into<String>) -> Self {
        self.message(LlmMessage::assistant(content))
    }

    /// Appends an arbitrary message.
    #[must_use]
    pub fn message(mut self, message: LlmMessage) -> Self {
        self.messages.push(message);
        self
    }

    /// Returns the messages assembled so far.
    #[must_use]
    pub fn messages(&self) -> &[LlmMessage] {
        &self.messages
    }

    /// Builds an LLM request from this call.
    #[must_use]
    pub fn build_request(&self) -> LlmRequest {
        LlmRequest::new(self.messages.clone())
            .with_temperature(self.params.temperature)
            .with_max_tokens(self.params.max_tokens)
            .with_timeout(self.params.timeout())
    }

    /// Sends the call to `backend`.
    ///
    /// # Errors
    ///
    /// Returns the backend's error unchanged.
    pub async fn execute(&self, backend: &dyn LlmBackend) -> Result<LlmCallResult, LlmError> {
        let request = self.build_request();
        let started = Instant::now();
        let response = match backend.generate(&request).await {
            Ok(response) => response,
            Err(e) => {
                tracing::debug!(
                    provider = backend.provider().as_str(),
                    model = backend.model(),
                    error = %e,
                    "LLM call failed"
                );
                return Err(e);
            }
        };
        let latency_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        tracing::debug!(
            provider = backend.provider().as_str(),
            model = %response.model,
            latency_ms,
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            "LLM call completed"
        );

        Ok(LlmCallResult::from_response(response, latency_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{LlmProvider, MessageRole};
    use async_trait::async_trait;

    struct EchoBackend;

    #[async_trait]
    impl LlmBackend for EchoBackend {
        async fn generate(&self, request: &LlmRequest) -> Result<LlmResponse, LlmError> {
            let last = request
                .messages
                .last()
                .map(|m| m.content.clone())
                .unwrap_or_default();
            Ok(LlmResponse {
                content: format!("echo: {last}"),
                usage: TokenUsage {
                    input_tokens: 3,
                    output_tokens: 2,
                },
                model: "echo".to_string(),
            })
        }

        fn provider(&self) -> LlmProvider {
            LlmProvider::OpenAiCompatible
        }

        fn model(&self) -> &str {
            "echo"
        }
    }

    #[test]
    fn llm_call_builder_keeps_message_order() {
        let call = LlmCall::new(SamplingParams::answer())
            .system("Answer briefly.")
            .user("What is rust?")
            .assistant("A metal oxide.")
            .user("The language?");

        let roles: Vec<MessageRole> = call.messages().iter().map(|m| m.role).collect();
        assert_eq!(
            roles,
            vec![
                MessageRole::System,
                MessageRole::User,
                MessageRole::Assistant,
                MessageRole::User
            ]
        );
    }

    #[test]
    fn request_carries_sampling_params() {
        let request = LlmCall::new(SamplingParams::suggestion())
            .user("Suggest")
            .build_request();

        assert_eq!(request.temperature, Some(0.7));
        assert_eq!(request.max_tokens, Some(50));
        assert_eq!(request.timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn answer_preset_values() {
        let params = SamplingParams::answer();
        assert_eq!(params.temperature, 0.2);
        assert_eq!(params.max_tokens, 300);
        assert_eq!(params.timeout(), Duration::from_secs(10));
    }

    #[tokio::test]
    async fn execute_returns_backend_content() {
        let result = LlmCall::new(SamplingParams::answer())
            .user("ping")
            .execute(&EchoBackend)
            .await
            .expect("call should succeed");

        assert_eq!(result.content, "echo: ping");
        assert_eq!(result.model, "echo");
        assert_eq!(result.usage.total(), 5);
    }
}
