//! Claimscope LLM Provider Layer
//!
//! Pluggable LLM provider implementations.
//!
//! # Architecture
//!
//! This crate provides implementations of the `LlmProvider` trait from
//! `claimscope-domain`. Every stage of the analyzer receives a provider
//! handle explicitly, so swapping the mock for a network provider is a
//! constructor argument, not a global setting.
//!
//! # Providers
//!
//! - `MockProvider`: Scripted, recording mock for testing
//! - `OpenRouterProvider`: OpenAI-compatible chat completions over HTTP
//!
//! # Examples
//!
//! ```
//! use claimscope_llm::MockProvider;
//! use claimscope_domain::LlmProvider;
//!
//! # tokio_test::block_on(async {
//! let provider = MockProvider::new("Hello from LLM!");
//! let result = provider.generate("test prompt").await.unwrap();
//! assert_eq!(result, "Hello from LLM!");
//! # });
//! ```

#![warn(missing_docs)]

pub mod openrouter;

use claimscope_domain::LlmProvider;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;

pub use openrouter::OpenRouterProvider;

/// Errors that can occur during LLM operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Invalid response from LLM
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Credential missing or rejected by the provider
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

/// A prompt received by [`MockProvider`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    /// Prompt text
    pub prompt: String,

    /// Schema, when the call was structured
    pub schema: Option<String>,
}

#[derive(Debug, Default)]
struct MockState {
    script: VecDeque<Result<String, String>>,
    calls: Vec<RecordedCall>,
}

/// Mock LLM provider for deterministic testing
///
/// Responses are scripted in call order; once the script runs dry every
/// call gets the default response. Every call is recorded so tests can
/// assert on the exact prompts a pipeline produced.
///
/// # Examples
///
/// ```
/// use claimscope_llm::MockProvider;
/// use claimscope_domain::LlmProvider;
///
/// # tokio_test::block_on(async {
/// let provider = MockProvider::new("fallback");
/// provider.push_response("first");
/// provider.push_response("second");
///
/// assert_eq!(provider.generate("a").await.unwrap(), "first");
/// assert_eq!(provider.generate("b").await.unwrap(), "second");
/// assert_eq!(provider.generate("c").await.unwrap(), "fallback");
/// assert_eq!(provider.call_count(), 3);
/// # });
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: String,
    model: String,
    state: Arc<Mutex<MockState>>,
}

impl MockProvider {
    /// Create a new MockProvider with a fixed response for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            model: "mock".to_string(),
            state: Arc::new(Mutex::new(MockState::default())),
        }
    }

    /// Create a MockProvider that answers with `responses` in order
    pub fn scripted<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let provider = Self::default();
        for response in responses {
            provider.push_response(response);
        }
        provider
    }

    /// Report a different model name
    pub fn with_model_name(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Queue a response for the next unanswered call
    pub fn push_response(&self, response: impl Into<String>) {
        self.lock().script.push_back(Ok(response.into()));
    }

    /// Queue a failure for the next unanswered call
    pub fn push_error(&self, message: impl Into<String>) {
        self.lock().script.push_back(Err(message.into()));
    }

    /// Get the number of times the provider was called
    pub fn call_count(&self) -> usize {
        self.lock().calls.len()
    }

    /// All calls received so far, oldest first
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.lock().calls.clone()
    }

    /// Prompt of the most recent call
    pub fn last_prompt(&self) -> Option<String> {
        self.lock().calls.last().map(|c| c.prompt.clone())
    }

    /// Forget recorded calls
    pub fn reset_call_count(&self) {
        self.lock().calls.clear();
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn respond(&self, prompt: &str, schema: Option<&str>) -> Result<String, LlmError> {
        let mut state = self.lock();
        state.calls.push(RecordedCall {
            prompt: prompt.to_string(),
            schema: schema.map(str::to_string),
        });

        match state.script.pop_front() {
            Some(Ok(response)) => Ok(response),
            Some(Err(message)) => Err(LlmError::Other(message)),
            None => Ok(self.default_response.clone()),
        }
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

impl LlmProvider for MockProvider {
    type Error = LlmError;

    async fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        self.respond(prompt, None)
    }

    async fn generate_structured(&self, prompt: &str, schema: &str) -> Result<String, Self::Error> {
        self.respond(prompt, Some(schema))
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_provider_default() {
        let provider = MockProvider::new("Test response");
        let result = provider.generate("any prompt").await;
        assert_eq!(result.unwrap(), "Test response");
    }

    #[tokio::test]
    async fn test_mock_provider_scripted_order() {
        let provider = MockProvider::scripted(["one", "two"]);

        assert_eq!(provider.generate("p1").await.unwrap(), "one");
        assert_eq!(provider.generate("p2").await.unwrap(), "two");
        assert_eq!(provider.generate("p3").await.unwrap(), "Default mock response");
    }

    #[tokio::test]
    async fn test_mock_provider_call_count() {
        let provider = MockProvider::new("test");
        assert_eq!(provider.call_count(), 0);

        provider.generate("prompt1").await.unwrap();
        assert_eq!(provider.call_count(), 1);

        provider.generate("prompt2").await.unwrap();
        assert_eq!(provider.call_count(), 2);

        provider.reset_call_count();
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_mock_provider_error() {
        let provider = MockProvider::default();
        provider.push_error("boom");

        let result = provider.generate("bad prompt").await;
        assert!(matches!(result, Err(LlmError::Other(ref m)) if m == "boom"));

        // Error is consumed; next call falls back to the default.
        assert!(provider.generate("again").await.is_ok());
    }

    #[tokio::test]
    async fn test_mock_provider_records_schema() {
        let provider = MockProvider::new("{}");
        provider.generate_structured("prompt", "{\"type\":\"object\"}").await.unwrap();
        provider.generate("plain").await.unwrap();

        let calls = provider.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].schema.as_deref(), Some("{\"type\":\"object\"}"));
        assert_eq!(calls[1].schema, None);
        assert_eq!(provider.last_prompt().as_deref(), Some("plain"));
    }

    #[tokio::test]
    async fn test_mock_provider_clone_shares_state() {
        let provider1 = MockProvider::new("test");
        let provider2 = provider1.clone();

        provider1.generate("test").await.unwrap();

        assert_eq!(provider1.call_count(), 1);
        assert_eq!(provider2.call_count(), 1);
    }

    #[test]
    fn test_model_name() {
        let provider = MockProvider::default().with_model_name("mock-7b");
        assert_eq!(provider.model_name(), "mock-7b");
    }
}
