use std::fmt;
use std::time::Duration;

use pipegen_logging::{pipegen_debug, pipegen_info, pipegen_warn};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::types::{NETWORK_ERROR_MESSAGE, REMOTE_ERROR_FALLBACK};
use crate::{FailureKind, GenerationError};

pub const DEFAULT_ENDPOINT: &str = "https://openrouter.ai/api/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "mistralai/mistral-7b-instruct";

#[derive(Clone)]
pub struct GeneratorSettings {
    pub endpoint: String,
    pub model: String,
    /// Bearer credential. `None` or blank short-circuits every call.
    pub api_key: Option<String>,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(60),
        }
    }
}

impl fmt::Debug for GeneratorSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeneratorSettings")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("connect_timeout", &self.connect_timeout)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

#[async_trait::async_trait]
pub trait Generator: Send + Sync {
    /// Turns a prompt into pipeline text. Never retries.
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct CompletionBody {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Chat-completions client speaking the OpenAI-compatible wire format.
#[derive(Debug, Clone)]
pub struct ReqwestGenerator {
    settings: GeneratorSettings,
}

impl ReqwestGenerator {
    pub fn new(settings: GeneratorSettings) -> Self {
        Self { settings }
    }

    fn credential(&self) -> Option<&str> {
        self.settings
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    fn build_client(&self) -> Result<reqwest::Client, GenerationError> {
        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.request_timeout)
            .build()
            .map_err(|err| {
                pipegen_warn!("Failed to build HTTP client: {}", err);
                GenerationError::new(FailureKind::Network, NETWORK_ERROR_MESSAGE)
            })
    }
}

#[async_trait::async_trait]
impl Generator for ReqwestGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let Some(credential) = self.credential() else {
            return Err(GenerationError::new(
                FailureKind::MissingCredential,
                "Missing API key. Set OPENROUTER_API_KEY or add it to your .env file.",
            ));
        };

        let client = self.build_client()?;
        let body = ChatRequest {
            model: &self.settings.model,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        pipegen_info!(
            "POST {} model={} prompt_len={}",
            self.settings.endpoint,
            self.settings.model,
            prompt.len()
        );
        let response = client
            .post(&self.settings.endpoint)
            .bearer_auth(credential)
            .json(&body)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let text = response.text().await.map_err(map_transport_error)?;
        pipegen_debug!("Generation service responded {}: {}", status, text);

        decode_completion(status, &text)
    }
}

/// Interprets a chat-completions response.
///
/// Any status other than 200, or a body with an `error` field, is a remote
/// error carrying `error.message` when present. A 200 body without
/// `choices[0].message.content` is reported as malformed.
pub fn decode_completion(status: StatusCode, body: &str) -> Result<String, GenerationError> {
    let value = serde_json::from_str::<serde_json::Value>(body);

    // `error` is read on its own so a malformed sibling field cannot hide it.
    if let Some(error) = value
        .as_ref()
        .ok()
        .and_then(|value| value.get("error"))
        .filter(|error| !error.is_null())
    {
        let message = remote_error_message(error).unwrap_or(REMOTE_ERROR_FALLBACK);
        return Err(GenerationError::new(FailureKind::Remote, message));
    }
    if status != StatusCode::OK {
        return Err(GenerationError::new(
            FailureKind::Remote,
            REMOTE_ERROR_FALLBACK,
        ));
    }

    let parsed = value
        .and_then(serde_json::from_value::<CompletionBody>)
        .map_err(|err| {
            GenerationError::new(
                FailureKind::Remote,
                format!("Malformed response from the generation service: {err}"),
            )
        })?;

    parsed
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message)
        .and_then(|message| message.content)
        .ok_or_else(|| {
            GenerationError::new(
                FailureKind::Remote,
                "Malformed response from the generation service: no completion text",
            )
        })
}

fn remote_error_message(error: &serde_json::Value) -> Option<&str> {
    match error {
        serde_json::Value::String(message) => Some(message.as_str()),
        other => other.get("message").and_then(serde_json::Value::as_str),
    }
    .filter(|message| !message.trim().is_empty())
}

fn map_transport_error(err: reqwest::Error) -> GenerationError {
    pipegen_warn!("Generation request failed: {}", err);
    GenerationError::new(FailureKind::Network, NETWORK_ERROR_MESSAGE)
}
