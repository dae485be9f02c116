//! Static stage signatures
//!
//! A signature names a stage, states its task, and declares the typed
//! fields it consumes and produces. The declarations drive both the prompt
//! and the JSON schema sent with every structured model call.

use crate::types::{
    AssessNoveltyInput, ClaimsResult, ExtractClaimsInput, GenerateSummaryInput, NoveltyResult, Rationale,
    SummaryResult,
};
use claimscope_domain::{FieldKind, FieldSpec};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Map, Value};

/// Name of the chain-of-thought field prepended to every output contract
pub const RATIONALE_FIELD: FieldSpec = FieldSpec::new("rationale", FieldKind::Text)
    .with_description("Think step by step about the inputs before producing the other fields");

/// Statically declared contract of one stage
pub trait Signature {
    /// Typed input; serializes to an object whose keys match `INPUTS`
    type Input: Serialize + Send + Sync;

    /// Typed output; decodes from an object whose keys match `OUTPUTS`
    type Output: DeserializeOwned + Rationale + Send;

    /// Stage name used in logs and errors
    const NAME: &'static str;

    /// Task description given to the model
    const INSTRUCTIONS: &'static str;

    /// Declared input fields
    const INPUTS: &'static [FieldSpec];

    /// Declared output fields
    const OUTPUTS: &'static [FieldSpec];
}

/// Output fields the model is asked for, rationale first when enabled
pub fn output_fields<S: Signature>(chain_of_thought: bool) -> Vec<FieldSpec> {
    let mut fields = Vec::with_capacity(S::OUTPUTS.len() + 1);
    if chain_of_thought {
        fields.push(RATIONALE_FIELD);
    }
    fields.extend_from_slice(S::OUTPUTS);
    fields
}

/// JSON schema of the stage's structured output
pub fn output_schema<S: Signature>(chain_of_thought: bool) -> Value {
    let fields = output_fields::<S>(chain_of_thought);

    let mut properties = Map::new();
    for field in &fields {
        let mut property = match field.kind {
            FieldKind::Text => json!({ "type": "string" }),
            FieldKind::Integer => json!({ "type": "integer" }),
            FieldKind::TextList => json!({ "type": "array", "items": { "type": "string" } }),
        };
        if let Some(description) = field.description {
            property["description"] = Value::String(description.to_string());
        }
        properties.insert(field.name.to_string(), property);
    }

    json!({
        "title": S::NAME,
        "type": "object",
        "properties": properties,
        "required": fields.iter().map(|f| f.name).collect::<Vec<_>>(),
    })
}

/// Stage 1: pull the main claims out of a paper
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtractClaims;

impl Signature for ExtractClaims {
    type Input = ExtractClaimsInput;
    type Output = ClaimsResult;

    const NAME: &'static str = "extract_claims";
    const INSTRUCTIONS: &'static str = "Extract main claims from research text";
    const INPUTS: &'static [FieldSpec] =
        &[FieldSpec::new("paper_text", FieldKind::Text).with_description("Research paper content")];
    const OUTPUTS: &'static [FieldSpec] =
        &[FieldSpec::new("claims", FieldKind::TextList).with_description("Key claims made")];
}

/// Stage 2: judge how novel the claims are
#[derive(Debug, Clone, Copy, Default)]
pub struct AssessNovelty;

impl Signature for AssessNovelty {
    type Input = AssessNoveltyInput;
    type Output = NoveltyResult;

    const NAME: &'static str = "assess_novelty";
    const INSTRUCTIONS: &'static str = "Assess if claims are novel";
    const INPUTS: &'static [FieldSpec] = &[FieldSpec::new("claims", FieldKind::TextList)];
    const OUTPUTS: &'static [FieldSpec] = &[
        FieldSpec::new("novelty_score", FieldKind::Integer).with_description("Score from 1-10"),
        FieldSpec::new("reasoning", FieldKind::Text),
    ];
}

/// Stage 3: write the final summary
#[derive(Debug, Clone, Copy, Default)]
pub struct GenerateSummary;

impl Signature for GenerateSummary {
    type Input = GenerateSummaryInput;
    type Output = SummaryResult;

    const NAME: &'static str = "generate_summary";
    const INSTRUCTIONS: &'static str = "Generate final summary";
    const INPUTS: &'static [FieldSpec] = &[
        FieldSpec::new("claims", FieldKind::TextList),
        FieldSpec::new("novelty_score", FieldKind::Integer),
    ];
    const OUTPUTS: &'static [FieldSpec] =
        &[FieldSpec::new("summary", FieldKind::Text).with_description("2-3 sentence summary")];
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input_keys<S: Signature>(input: &S::Input) -> Vec<String> {
        let mut keys: Vec<_> = serde_json::to_value(input)
            .unwrap()
            .as_object()
            .unwrap()
            .keys()
            .cloned()
            .collect();
        keys.sort();
        keys
    }

    fn declared<S: Signature>() -> Vec<String> {
        let mut names: Vec<_> = S::INPUTS.iter().map(|f| f.name.to_string()).collect();
        names.sort();
        names
    }

    #[test]
    fn test_input_structs_match_declarations() {
        let extract = ExtractClaimsInput {
            paper_text: "p".to_string(),
        };
        assert_eq!(input_keys::<ExtractClaims>(&extract), declared::<ExtractClaims>());

        let assess = AssessNoveltyInput { claims: vec![] };
        assert_eq!(input_keys::<AssessNovelty>(&assess), declared::<AssessNovelty>());

        let summarize = GenerateSummaryInput {
            claims: vec![],
            novelty_score: 1,
        };
        assert_eq!(input_keys::<GenerateSummary>(&summarize), declared::<GenerateSummary>());
    }

    #[test]
    fn test_schema_without_rationale() {
        let schema = output_schema::<AssessNovelty>(false);
        assert_eq!(schema["type"], "object");
        assert_eq!(schema["properties"]["novelty_score"]["type"], "integer");
        assert_eq!(schema["properties"]["novelty_score"]["description"], "Score from 1-10");
        assert_eq!(schema["properties"]["reasoning"]["type"], "string");
        assert_eq!(schema["required"], json!(["novelty_score", "reasoning"]));
        assert!(schema["properties"].get("rationale").is_none());
    }

    #[test]
    fn test_schema_with_rationale_first() {
        let schema = output_schema::<ExtractClaims>(true);
        assert_eq!(schema["required"], json!(["rationale", "claims"]));
        assert_eq!(schema["properties"]["claims"]["type"], "array");
        assert_eq!(schema["properties"]["claims"]["items"]["type"], "string");
    }

    #[test]
    fn test_output_field_order() {
        let names: Vec<_> = output_fields::<GenerateSummary>(true).iter().map(|f| f.name).collect();
        assert_eq!(names, vec!["rationale", "summary"]);
    }
}
