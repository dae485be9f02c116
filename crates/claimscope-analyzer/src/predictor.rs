//! Generic structured model call, one per stage

use crate::config::AnalyzerConfig;
use crate::error::AnalyzerError;
use crate::parser::parse_structured;
use crate::prompt::PromptBuilder;
use crate::signature::{output_schema, Signature};
use crate::types::Rationale;
use claimscope_domain::LlmProvider;
use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::debug;

/// One step of the pipeline
///
/// The analyzer only depends on this trait, so any stage can be replaced
/// by a fake in tests or by a different strategy in production.
pub trait Stage<S: Signature> {
    /// Run the stage on one input
    fn run(&self, input: S::Input) -> impl Future<Output = Result<S::Output, AnalyzerError>> + Send;
}

/// Runs signature `S` against an injected model provider
pub struct Predictor<S, L> {
    llm: Arc<L>,
    config: AnalyzerConfig,
    _signature: PhantomData<fn() -> S>,
}

impl<S, L> Predictor<S, L>
where
    S: Signature,
    L: LlmProvider + Send + Sync,
    L::Error: std::fmt::Display,
{
    /// Create a predictor using `llm` for every call
    pub fn new(llm: Arc<L>, config: AnalyzerConfig) -> Self {
        Self {
            llm,
            config,
            _signature: PhantomData,
        }
    }

    /// Build the prompt, call the model with the output schema, decode
    pub async fn call(&self, input: &S::Input) -> Result<S::Output, AnalyzerError> {
        let cot = self.config.chain_of_thought;
        let prompt = PromptBuilder::<S>::new(input)?.with_chain_of_thought(cot).build();
        let schema = output_schema::<S>(cot).to_string();

        debug!("[{}] prompt length: {} chars", S::NAME, prompt.len());

        let response = self
            .llm
            .generate_structured(&prompt, &schema)
            .await
            .map_err(|e| AnalyzerError::Llm(e.to_string()))?;

        debug!("[{}] response length: {} chars", S::NAME, response.len());

        let mut output: S::Output = parse_structured(&response)?;
        if !cot {
            output.set_rationale(None);
        }
        Ok(output)
    }
}

impl<S, L> Clone for Predictor<S, L> {
    fn clone(&self) -> Self {
        Self {
            llm: Arc::clone(&self.llm),
            config: self.config.clone(),
            _signature: PhantomData,
        }
    }
}

impl<S, L> Stage<S> for Predictor<S, L>
where
    S: Signature,
    L: LlmProvider + Send + Sync,
    L::Error: std::fmt::Display,
{
    async fn run(&self, input: S::Input) -> Result<S::Output, AnalyzerError> {
        self.call(&input).await
    }
}
