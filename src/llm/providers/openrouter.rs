//! OpenRouter provider implementation.
//!
//! OpenRouter exposes an OpenAI-compatible chat-completion endpoint in front
//! of many hosted models. This provider makes exactly one request per call;
//! callers decide what to do when it fails.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::AppConfig;
use crate::error::LlmError;
use crate::llm::{Choice, GenerationRequest, GenerationResponse, LlmProvider, Message, Usage};

/// Default OpenRouter API endpoint.
pub const OPENROUTER_BASE_URL: &str = "https://openrouter.ai/api/v1";

/// Default model to use if none specified.
pub const DEFAULT_MODEL: &str = "deepseek/deepseek-r1:free";

/// Default request timeout in seconds.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// OpenRouter provider for LLM requests.
pub struct OpenRouterProvider {
    /// HTTP client for making API requests.
    client: Client,
    /// API key for OpenRouter authentication, if configured.
    api_key: Option<String>,
    /// Base URL for the OpenRouter API.
    base_url: String,
    /// Default model to use when none is specified.
    default_model: String,
    /// Per-request timeout applied by the HTTP client.
    timeout: Duration,
}

impl OpenRouterProvider {
    /// Create a provider with the default base URL, model and timeout.
    pub fn new(api_key: Option<String>) -> Result<Self, LlmError> {
        Self::with_custom_url(
            api_key,
            OPENROUTER_BASE_URL.to_string(),
            DEFAULT_MODEL.to_string(),
            Duration::from_secs(REQUEST_TIMEOUT_SECS),
        )
    }

    /// Create a provider against a custom base URL.
    ///
    /// Useful for testing or for OpenRouter-compatible proxies.
    pub fn with_custom_url(
        api_key: Option<String>,
        base_url: String,
        model: String,
        timeout: Duration,
    ) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LlmError::RequestFailed(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            base_url: base_url.trim_end_matches('/').to_string(),
            default_model: model,
            timeout,
        })
    }

    /// Create a provider from the application configuration.
    pub fn from_config(config: &AppConfig) -> Result<Self, LlmError> {
        Self::with_custom_url(
            config.api_key.clone(),
            config.api_base.clone(),
            config.model.clone(),
            config.request_timeout,
        )
    }

    /// Get the API key (for logging, returns masked value).
    pub fn api_key_masked(&self) -> String {
        match &self.api_key {
            None => "<unset>".to_string(),
            Some(key) if key.chars().count() <= 8 => "*".repeat(key.chars().count()),
            Some(key) => {
                let chars: Vec<char> = key.chars().collect();
                let head: String = chars[..4].iter().collect();
                let tail: String = chars[chars.len() - 4..].iter().collect();
                format!("{}...{}", head, tail)
            }
        }
    }

    /// Whether an API key is configured.
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the default model.
    pub fn default_model(&self) -> &str {
        &self.default_model
    }

    /// Get the request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Execute a single request. There is no retry loop.
    async fn execute_request(&self, request: &ApiRequest) -> Result<GenerationResponse, LlmError> {
        let url = format!("{}/chat/completions", self.base_url);

        let mut http_request = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .header("HTTP-Referer", "https://debate-coach.local")
            .header("X-Title", "debate-coach");

        if let Some(ref api_key) = self.api_key {
            http_request = http_request.header("Authorization", format!("Bearer {}", api_key));
        }

        let http_response = http_request
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LlmError::RequestFailed(format!(
                        "Request timed out after {}s",
                        self.timeout.as_secs()
                    ))
                } else {
                    LlmError::RequestFailed(e.to_string())
                }
            })?;

        let status = http_response.status();
        tracing::debug!(status = status.as_u16(), "OpenRouter responded");

        if status != StatusCode::OK {
            let error_text = http_response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error response".to_string());
            return Err(classify_error_response(status.as_u16(), &error_text));
        }

        let body = http_response
            .text()
            .await
            .map_err(|e| LlmError::RequestFailed(format!("Failed to read response body: {}", e)))?;

        parse_response_body(&body)
    }
}

/// Map a non-200 response to the matching error variant.
fn classify_error_response(status_code: u16, error_text: &str) -> LlmError {
    let message = serde_json::from_str::<ApiErrorResponse>(error_text)
        .map(|r| r.error.message)
        .unwrap_or_else(|_| error_text.to_string());

    if status_code == 429 {
        LlmError::RateLimited(message)
    } else {
        LlmError::ApiError {
            code: status_code,
            message,
        }
    }
}

/// Parse a 200 response body into a `GenerationResponse`.
///
/// The only hard requirement is `choices[*].message.content` as a string;
/// OpenRouter omits `usage` and `id` for some upstream models.
pub(crate) fn parse_response_body(body: &str) -> Result<GenerationResponse, LlmError> {
    let api_response: ApiResponse = serde_json::from_str(body)
        .map_err(|e| LlmError::ParseError(format!("Failed to parse API response: {}", e)))?;

    let choices = api_response
        .choices
        .into_iter()
        .map(|choice| Choice {
            index: choice.index,
            message: Message {
                role: choice.message.role,
                content: choice.message.content,
            },
            finish_reason: choice.finish_reason.unwrap_or_else(|| "stop".to_string()),
        })
        .collect();

    Ok(GenerationResponse {
        id: api_response.id,
        model: api_response.model,
        choices,
        usage: api_response.usage.map(|u| Usage {
            prompt_tokens: u.prompt_tokens,
            completion_tokens: u.completion_tokens,
            total_tokens: u.total_tokens,
        }),
    })
}

#[async_trait]
impl LlmProvider for OpenRouterProvider {
    async fn generate(&self, request: GenerationRequest) -> Result<GenerationResponse, LlmError> {
        let model = if request.model.is_empty() {
            self.default_model.clone()
        } else {
            request.model
        };

        let api_request = ApiRequest {
            model,
            messages: request.messages,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        self.execute_request(&api_request).await
    }
}

/// Internal request structure for the OpenRouter API.
#[derive(Debug, Clone, Serialize)]
struct ApiRequest {
    model: String,
    messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    id: String,
    #[serde(default)]
    model: String,
    choices: Vec<ApiChoice>,
    #[serde(default)]
    usage: Option<ApiUsage>,
}

#[derive(Debug, Deserialize)]
struct ApiChoice {
    #[serde(default)]
    index: u32,
    message: ApiMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiMessage {
    #[serde(default = "default_role")]
    role: String,
    content: String,
}

fn default_role() -> String {
    "assistant".to_string()
}

#[derive(Debug, Deserialize)]
struct ApiUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}
