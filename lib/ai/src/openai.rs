//! Chat completion backend for OpenAI and OpenAI-compatible APIs.

use crate::backend::{
    LlmBackend, LlmBackendConfig, LlmMessage, LlmProvider, LlmRequest, LlmResponse, TokenUsage,
};
use crate::error::LlmError;
use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::RETRY_AFTER;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Request body for `POST /chat/completions`.
#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [LlmMessage],
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    #[serde(default)]
    prompt_tokens: u32,
    #[serde(default)]
    completion_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Chat completion client over reqwest.
#[derive(Debug, Clone)]
pub struct OpenAiChatBackend {
    client: reqwest::Client,
    config: LlmBackendConfig,
}

impl OpenAiChatBackend {
    /// Creates a backend with its own connection pool.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::InvalidConfig`] if the HTTP client cannot be built.
    pub fn new(config: LlmBackendConfig) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| LlmError::InvalidConfig {
                reason: e.to_string(),
            })?;
        Ok(Self::with_client(client, config))
    }

    /// Creates a backend sharing an existing client.
    #[must_use]
    pub fn with_client(client: reqwest::Client, config: LlmBackendConfig) -> Self {
        Self { client, config }
    }

    fn completions_url(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }

    fn transport_error(&self, error: &reqwest::Error) -> LlmError {
        if error.is_timeout() {
            LlmError::Timeout
        } else if error.is_connect() {
            LlmError::ProviderUnavailable {
                provider: self.config.provider.as_str().to_string(),
                reason: error.to_string(),
            }
        } else {
            LlmError::RequestFailed {
                reason: error.to_string(),
            }
        }
    }
}

#[async_trait]
impl LlmBackend for OpenAiChatBackend {
    #[instrument(
        skip(self, request),
        fields(model = %self.config.model, messages = request.messages.len())
    )]
    async fn generate(&self, request: &LlmRequest) -> Result<LlmResponse, LlmError> {
        let api_key = self.config.api_key();
        if api_key.is_none() && self.config.provider.requires_api_key() {
            return Err(LlmError::MissingCredential {
                provider: self.config.provider.as_str().to_string(),
            });
        }

        let url = self.completions_url();
        let body = ChatCompletionRequest {
            model: &self.config.model,
            messages: &request.messages,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        };

        let mut http_request = self.client.post(&url).json(&body);
        if let Some(key) = api_key {
            http_request = http_request.bearer_auth(key);
        }
        if let Some(timeout) = request.timeout {
            http_request = http_request.timeout(timeout);
        }

        let response = http_request.send().await.map_err(|e| {
            tracing::warn!(error = %e, endpoint = %url, "Chat completion request failed");
            self.transport_error(&e)
        })?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after_secs = response
                .headers()
                .get(RETRY_AFTER)
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.trim().parse().ok());
            return Err(LlmError::RateLimited { retry_after_secs });
        }

        let text = response.text().await.map_err(|e| self.transport_error(&e))?;

        if !status.is_success() {
            tracing::warn!(
                endpoint = %url,
                status = %status,
                body = %text,
                "Chat completion endpoint returned error"
            );
            return Err(LlmError::Api {
                status: status.as_u16(),
                message: api_error_message(&text),
            });
        }

        parse_completion(&text, &self.config.model)
    }

    fn provider(&self) -> LlmProvider {
        self.config.provider
    }

    fn model(&self) -> &str {
        &self.config.model
    }
}

/// Extracts `error.message` from an error body, falling back to the raw text.
fn api_error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => envelope.error.message,
        Err(_) if body.trim().is_empty() => "empty response body".to_string(),
        Err(_) => body.trim().to_string(),
    }
}

fn parse_completion(body: &str, requested_model: &str) -> Result<LlmResponse, LlmError> {
    let parsed: ChatCompletionResponse =
        serde_json::from_str(body).map_err(|e| LlmError::ResponseParseFailed {
            reason: e.to_string(),
        })?;

    let content = parsed
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| LlmError::ResponseParseFailed {
            reason: "response has no message content".to_string(),
        })?;

    let usage = parsed
        .usage
        .map(|u| TokenUsage {
            input_tokens: u.prompt_tokens,
            output_tokens: u.completion_tokens,
        })
        .unwrap_or_default();

    Ok(LlmResponse {
        content,
        usage,
        model: parsed
            .model
            .unwrap_or_else(|| requested_model.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::State;
    use axum::http::{HeaderMap, StatusCode as AxumStatus};
    use axum::response::IntoResponse;
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::{Value as JsonValue, json};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    #[derive(Clone, Default)]
    struct Captured {
        bodies: Arc<Mutex<Vec<JsonValue>>>,
        auth: Arc<Mutex<Vec<String>>>,
    }

    async fn spawn_stub(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind stub");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("stub server");
        });
        format!("http://{addr}/v1")
    }

    fn backend(base_url: String, api_key: Option<&str>) -> OpenAiChatBackend {
        let mut config = LlmBackendConfig::open_ai_compatible(base_url, "test-model");
        if let Some(key) = api_key {
            config.provider = LlmProvider::OpenAi;
            config.api_key = Some(key.to_string());
        }
        OpenAiChatBackend::new(config).expect("client")
    }

    fn request() -> LlmRequest {
        LlmRequest::new(vec![
            LlmMessage::system("Be brief."),
            LlmMessage::user("Who was Einstein?"),
        ])
        .with_temperature(0.2)
        .with_max_tokens(300)
        .with_timeout(Duration::from_secs(2))
    }

    #[tokio::test]
    async fn successful_completion_returns_content() {
        async fn handler(
            State(captured): State<Captured>,
            headers: HeaderMap,
            Json(body): Json<JsonValue>,
        ) -> Json<JsonValue> {
            captured.bodies.lock().unwrap().push(body);
            if let Some(auth) = headers.get("authorization") {
                captured
                    .auth
                    .lock()
                    .unwrap()
                    .push(auth.to_str().unwrap().to_string());
            }
            Json(json!({
                "model": "test-model-0613",
                "choices": [{"message": {"role": "assistant", "content": "He was a physicist."}}],
                "usage": {"prompt_tokens": 12, "completion_tokens": 5}
            }))
        }

        let captured = Captured::default();
        let router = Router::new()
            .route("/v1/chat/completions", post(handler))
            .with_state(captured.clone());
        let base_url = spawn_stub(router).await;

        let response = backend(base_url, Some("sk-test"))
            .generate(&request())
            .await
            .expect("completion should succeed");

        assert_eq!(response.content, "He was a physicist.");
        assert_eq!(response.model, "test-model-0613");
        assert_eq!(response.usage.total(), 17);

        let bodies = captured.bodies.lock().unwrap();
        assert_eq!(bodies[0]["model"], "test-model");
        assert_eq!(bodies[0]["max_tokens"], 300);
        assert_eq!(bodies[0]["messages"][0]["role"], "system");
        assert_eq!(bodies[0]["messages"][1]["content"], "Who was Einstein?");
        assert_eq!(captured.auth.lock().unwrap()[0], "Bearer sk-test");
    }

    #[tokio::test]
    async fn error_status_surfaces_embedded_message() {
        async fn handler() -> impl IntoResponse {
            (
                AxumStatus::BAD_REQUEST,
                Json(json!({"error": {"message": "maximum context length exceeded"}})),
            )
        }

        let router = Router::new().route("/v1/chat/completions", post(handler));
        let base_url = spawn_stub(router).await;

        let err = backend(base_url, None)
            .generate(&request())
            .await
            .expect_err("should fail");

        assert_eq!(
            err,
            LlmError::Api {
                status: 400,
                message: "maximum context length exceeded".to_string()
            }
        );
    }

    #[tokio::test]
    async fn too_many_requests_reads_retry_after() {
        async fn handler() -> impl IntoResponse {
            (
                AxumStatus::TOO_MANY_REQUESTS,
                [("retry-after", "7")],
                "slow down",
            )
        }

        let router = Router::new().route("/v1/chat/completions", post(handler));
        let base_url = spawn_stub(router).await;

        let err = backend(base_url, None)
            .generate(&request())
            .await
            .expect_err("should fail");

        assert_eq!(
            err,
            LlmError::RateLimited {
                retry_after_secs: Some(7)
            }
        );
    }

    #[tokio::test]
    async fn slow_endpoint_times_out() {
        async fn handler() -> Json<JsonValue> {
            tokio::time::sleep(Duration::from_secs(2)).await;
            Json(json!({"choices": []}))
        }

        let router = Router::new().route("/v1/chat/completions", post(handler));
        let base_url = spawn_stub(router).await;

        let err = backend(base_url, None)
            .generate(&request().with_timeout(Duration::from_millis(100)))
            .await
            .expect_err("should time out");

        assert_eq!(err, LlmError::Timeout);
    }

    #[tokio::test]
    async fn missing_key_fails_before_sending() {
        let config = LlmBackendConfig {
            base_url: "http://127.0.0.1:9/v1".to_string(),
            ..LlmBackendConfig::default()
        };
        let err = OpenAiChatBackend::new(config)
            .expect("client")
            .generate(&request())
            .await
            .expect_err("should fail");

        assert_eq!(
            err,
            LlmError::MissingCredential {
                provider: "open_ai".to_string()
            }
        );
    }

    #[test]
    fn completion_without_choices_is_a_parse_failure() {
        let err = parse_completion(r#"{"choices": []}"#, "m").expect_err("should fail");
        assert!(matches!(err, LlmError::ResponseParseFailed { .. }));
    }

    #[test]
    fn non_json_completion_is_a_parse_failure() {
        let err = parse_completion("<html>bad gateway</html>", "m").expect_err("should fail");
        assert!(matches!(err, LlmError::ResponseParseFailed { .. }));
    }

    #[test]
    fn missing_model_falls_back_to_requested() {
        let response = parse_completion(
            r#"{"choices": [{"message": {"content": "hi"}}]}"#,
            "requested",
        )
        .expect("should parse");
        assert_eq!(response.model, "requested");
        assert_eq!(response.usage, TokenUsage::default());
    }

    #[test]
    fn error_message_falls_back_to_body() {
        assert_eq!(api_error_message("upstream exploded"), "upstream exploded");
        assert_eq!(api_error_message("  "), "empty response body");
        assert_eq!(
            api_error_message(r#"{"error": {"message": "bad key", "type": "auth"}}"#),
            "bad key"
        );
    }

    #[test]
    fn completions_url_tolerates_trailing_slash() {
        let backend = backend("http://localhost:8000/v1/".to_string(), None);
        assert_eq!(
            backend.completions_url(),
            "http://localhost:8000/v1/chat/completions"
        );
    }
}
