//! OpenRouter Provider Implementation
//!
//! Talks to any OpenAI-compatible `chat/completions` endpoint. OpenRouter is
//! the default target, but the base URL is configurable so a local gateway
//! or another compatible service works the same way.
//!
//! # Features
//!
//! - Async HTTP communication via reqwest
//! - Configurable endpoint, model, sampling and timeout
//! - Bearer authentication when a key is supplied
//! - Retry with exponential backoff for transient failures
//! - JSON response mode for structured generation
//!
//! # Examples
//!
//! ```no_run
//! use claimscope_llm::OpenRouterProvider;
//!
//! let provider = OpenRouterProvider::new(
//!     "https://openrouter.ai/api/v1",
//!     "kwaipilot/kat-coder-pro:free",
//! )
//! .unwrap()
//! .with_api_key(std::env::var("OPENROUTER_API_KEY").ok());
//! ```

use crate::LlmError;
use claimscope_domain::LlmProvider;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Default OpenRouter API endpoint
pub const DEFAULT_API_BASE: &str = "https://openrouter.ai/api/v1";

/// Default model identifier
pub const DEFAULT_MODEL: &str = "kwaipilot/kat-coder-pro:free";

/// Default timeout for LLM requests (60 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Default number of attempts per request
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Upper bound on the delay between two attempts
pub const MAX_RETRY_BACKOFF: Duration = Duration::from_secs(60);

/// OpenAI-compatible chat completions provider
#[derive(Debug, Clone)]
pub struct OpenRouterProvider {
    api_base: String,
    model: String,
    api_key: Option<String>,
    client: reqwest::Client,
    max_retries: u32,
    retry_backoff: Duration,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
    json_mode: bool,
    referer: Option<String>,
    title: Option<String>,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
    #[serde(default)]
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    #[serde(default)]
    message: String,
    #[serde(default)]
    code: Option<serde_json::Value>,
}

/// Outcome of a single HTTP attempt
enum Attempt {
    Done(Result<String, LlmError>),
    Retry(LlmError),
}

impl OpenRouterProvider {
    /// Create a new provider
    ///
    /// # Parameters
    ///
    /// - `api_base`: Base URL without the `/chat/completions` suffix
    /// - `model`: Model identifier understood by the endpoint
    ///
    /// # Errors
    ///
    /// Returns `LlmError::Other` if the HTTP client cannot be built.
    pub fn new(api_base: impl Into<String>, model: impl Into<String>) -> Result<Self, LlmError> {
        let client = build_client(Duration::from_secs(DEFAULT_TIMEOUT_SECS))?;

        Ok(Self {
            api_base: api_base.into().trim_end_matches('/').to_string(),
            model: model.into(),
            api_key: None,
            client,
            max_retries: DEFAULT_MAX_RETRIES,
            retry_backoff: Duration::from_secs(1),
            temperature: None,
            max_tokens: None,
            json_mode: true,
            referer: None,
            title: None,
        })
    }

    /// Create a provider for the default OpenRouter endpoint
    pub fn default_endpoint(model: impl Into<String>) -> Result<Self, LlmError> {
        Self::new(DEFAULT_API_BASE, model)
    }

    /// Set the bearer credential
    ///
    /// `None` sends requests without an `Authorization` header; the
    /// endpoint's rejection then surfaces as `LlmError::Unauthorized`.
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key.filter(|k| !k.is_empty());
        self
    }

    /// Set the total number of attempts per request (minimum 1)
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries.max(1);
        self
    }

    /// Set the base delay between attempts; doubles after each failure
    pub fn with_retry_backoff(mut self, backoff: Duration) -> Self {
        self.retry_backoff = backoff;
        self
    }

    /// Set the per-request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, LlmError> {
        self.client = build_client(timeout)?;
        Ok(self)
    }

    /// Set the sampling temperature
    pub fn with_temperature(mut self, temperature: Option<f32>) -> Self {
        self.temperature = temperature;
        self
    }

    /// Cap the completion length
    pub fn with_max_tokens(mut self, max_tokens: Option<u32>) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Request `response_format: json_object` for structured calls
    pub fn with_json_mode(mut self, enabled: bool) -> Self {
        self.json_mode = enabled;
        self
    }

    /// Set OpenRouter's `HTTP-Referer` attribution header
    pub fn with_referer(mut self, referer: impl Into<String>) -> Self {
        self.referer = Some(referer.into());
        self
    }

    /// Set OpenRouter's `X-Title` attribution header
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Base URL requests are sent to
    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Whether a credential is configured
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Send one chat completion, retrying transient failures
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The endpoint rejects the credential (`Unauthorized`)
    /// - The model is unknown (`ModelNotAvailable`)
    /// - Every attempt fails with a transient error
    /// - The response body has no message content (`InvalidResponse`)
    pub async fn complete(&self, system: Option<&str>, prompt: &str, json: bool) -> Result<String, LlmError> {
        let url = format!("{}/chat/completions", self.api_base);

        let mut messages = Vec::with_capacity(2);
        if let Some(system) = system {
            messages.push(ChatMessage {
                role: "system",
                content: system,
            });
        }
        messages.push(ChatMessage {
            role: "user",
            content: prompt,
        });

        let request_body = ChatRequest {
            model: &self.model,
            messages,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            response_format: (json && self.json_mode).then_some(ResponseFormat {
                kind: "json_object",
            }),
        };

        let mut attempts = 0;
        let mut last_error = None;

        while attempts < self.max_retries {
            match self.attempt(&url, &request_body).await {
                Attempt::Done(result) => return result,
                Attempt::Retry(e) => {
                    warn!(
                        "Request to {} failed (attempt {}/{}): {}",
                        url,
                        attempts + 1,
                        self.max_retries,
                        e
                    );
                    last_error = Some(e);
                }
            }

            attempts += 1;
            if attempts < self.max_retries {
                tokio::time::sleep(self.backoff_delay(attempts)).await;
            }
        }

        Err(last_error.unwrap_or_else(|| LlmError::Communication("Max retries exceeded".to_string())))
    }

    /// Delay after the `failed`-th failed attempt: base, 2x base, 4x base, ...
    ///
    /// Saturates instead of overflowing and never exceeds `MAX_RETRY_BACKOFF`.
    fn backoff_delay(&self, failed: u32) -> Duration {
        let factor = 2u32.checked_pow(failed.saturating_sub(1)).unwrap_or(u32::MAX);
        self.retry_backoff.saturating_mul(factor).min(MAX_RETRY_BACKOFF)
    }

    async fn attempt(&self, url: &str, body: &ChatRequest<'_>) -> Attempt {
        let mut request = self.client.post(url).json(body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }
        if let Some(referer) = &self.referer {
            request = request.header("HTTP-Referer", referer);
        }
        if let Some(title) = &self.title {
            request = request.header("X-Title", title);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => return Attempt::Retry(LlmError::Communication(format!("Request failed: {}", e))),
        };

        let status = response.status();
        if status.is_success() {
            return Attempt::Done(match response.json::<ChatResponse>().await {
                Ok(body) => self.extract_content(body),
                Err(e) => Err(LlmError::InvalidResponse(format!("Failed to parse response: {}", e))),
            });
        }

        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());

        match status {
            StatusCode::NOT_FOUND => Attempt::Done(Err(LlmError::ModelNotAvailable(self.model.clone()))),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Attempt::Done(Err(LlmError::Unauthorized(format!("HTTP {}: {}", status, error_text))))
            }
            StatusCode::TOO_MANY_REQUESTS => Attempt::Retry(LlmError::RateLimitExceeded),
            s if s.is_server_error() => {
                Attempt::Retry(LlmError::Communication(format!("HTTP {}: {}", status, error_text)))
            }
            _ => Attempt::Done(Err(LlmError::Communication(format!("HTTP {}: {}", status, error_text)))),
        }
    }

    fn extract_content(&self, body: ChatResponse) -> Result<String, LlmError> {
        if let Some(error) = body.error {
            let code = error.code.map(|c| c.to_string()).unwrap_or_default();
            return Err(LlmError::Other(format!("Provider error {}: {}", code, error.message)));
        }

        let content = body
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| LlmError::InvalidResponse("Response contained no message content".to_string()))?;

        debug!("Completion from {}: {} chars", self.model, content.len());
        Ok(content)
    }
}

fn build_client(timeout: Duration) -> Result<reqwest::Client, LlmError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| LlmError::Other(format!("Failed to build HTTP client: {}", e)))
}

impl LlmProvider for OpenRouterProvider {
    type Error = LlmError;

    async fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        self.complete(None, prompt, false).await
    }

    async fn generate_structured(&self, prompt: &str, schema: &str) -> Result<String, Self::Error> {
        let system = format!(
            "Respond with a single JSON object that conforms to this JSON schema. \
             Do not wrap it in markdown.\n{}",
            schema
        );
        self.complete(Some(&system), prompt, true).await
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
