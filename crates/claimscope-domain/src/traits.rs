//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Infrastructure implementations live in other crates.

use std::future::Future;

/// Trait for LLM provider operations
///
/// Implemented by the infrastructure layer (claimscope-llm). A provider
/// handle is injected into every stage that needs one; there is no
/// process-wide model configuration.
pub trait LlmProvider {
    /// Error type for LLM operations
    type Error;

    /// Generate a free-form text completion
    fn generate(&self, prompt: &str) -> impl Future<Output = Result<String, Self::Error>> + Send;

    /// Generate a completion constrained to the given JSON schema
    ///
    /// `schema` is a JSON document describing the expected object. Providers
    /// that cannot enforce it should still return the model's raw text.
    fn generate_structured(
        &self,
        prompt: &str,
        schema: &str,
    ) -> impl Future<Output = Result<String, Self::Error>> + Send;

    /// Identifier of the model behind this provider, for logging
    fn model_name(&self) -> &str {
        "llm"
    }
}
