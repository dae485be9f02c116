//! LLM prompt construction for structured stage calls

use crate::error::AnalyzerError;
use crate::signature::{output_fields, Signature};
use claimscope_domain::{FieldKind, FieldSpec};
use serde_json::Value;
use std::marker::PhantomData;

/// Builds the prompt for one call of signature `S`
pub struct PromptBuilder<S> {
    inputs: Value,
    chain_of_thought: bool,
    _signature: PhantomData<fn() -> S>,
}

impl<S: Signature> PromptBuilder<S> {
    /// Create a prompt builder for the given input
    pub fn new(input: &S::Input) -> Result<Self, AnalyzerError> {
        Ok(Self {
            inputs: serde_json::to_value(input)?,
            chain_of_thought: false,
            _signature: PhantomData,
        })
    }

    /// Ask for a `rationale` field ahead of the declared outputs
    pub fn with_chain_of_thought(mut self, enabled: bool) -> Self {
        self.chain_of_thought = enabled;
        self
    }

    /// Build the complete prompt
    pub fn build(&self) -> String {
        let mut prompt = String::new();

        // 1. Task
        prompt.push_str(S::INSTRUCTIONS);
        prompt.push_str(".\n\n");

        // 2. Output contract
        prompt.push_str("Produce a JSON object with these fields:\n");
        for field in output_fields::<S>(self.chain_of_thought) {
            prompt.push_str(&describe_field(&field));
        }
        prompt.push('\n');

        // 3. Inputs
        prompt.push_str("Inputs:\n");
        for field in S::INPUTS {
            prompt.push_str(&format!("{}:\n", field.name));
            prompt.push_str("---\n");
            prompt.push_str(&self.render_input(field));
            prompt.push_str("\n---\n");
        }
        prompt.push('\n');

        // 4. Output format reminder
        prompt.push_str(OUTPUT_FORMAT_REMINDER);

        prompt
    }

    fn render_input(&self, field: &FieldSpec) -> String {
        match self.inputs.get(field.name) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        }
    }
}

fn describe_field(field: &FieldSpec) -> String {
    let mut line = format!("- \"{}\" ({})", field.name, field.kind.json_type());
    if let Some(description) = field.description {
        line.push_str(": ");
        line.push_str(description);
    }
    if field.kind == FieldKind::Integer {
        line.push_str(" [a bare integer, not a string]");
    }
    line.push('\n');
    line
}

const OUTPUT_FORMAT_REMINDER: &str = "Output format: a single JSON object containing exactly the fields above.

Remember: Return ONLY valid JSON, no markdown code blocks, no explanations.";
