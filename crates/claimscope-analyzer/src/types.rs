//! Request and response types for each stage

use crate::parser::{lenient_integer, string_list};
use claimscope_domain::PredictionBundle;
use serde::{Deserialize, Serialize};

/// Access to the optional chain-of-thought trace of a stage output
pub trait Rationale {
    /// Reasoning the model produced before answering, if requested
    fn rationale(&self) -> Option<&str>;

    /// Replace the trace
    fn set_rationale(&mut self, rationale: Option<String>);
}

macro_rules! impl_rationale {
    ($($ty:ty),+) => {
        $(impl Rationale for $ty {
            fn rationale(&self) -> Option<&str> {
                self.rationale.as_deref()
            }

            fn set_rationale(&mut self, rationale: Option<String>) {
                self.rationale = rationale;
            }
        })+
    };
}

/// Input of the claim extraction stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractClaimsInput {
    /// Research paper content
    pub paper_text: String,
}

/// Output of the claim extraction stage
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ClaimsResult {
    /// Chain-of-thought trace
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rationale: Option<String>,

    /// Key claims made, in the order the model listed them
    #[serde(deserialize_with = "string_list")]
    pub claims: Vec<String>,
}

/// Input of the novelty assessment stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssessNoveltyInput {
    /// Claims to assess
    pub claims: Vec<String>,
}

/// Output of the novelty assessment stage
///
/// `novelty_score` is whatever integer the model returned; values outside
/// 1-10 are passed through.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NoveltyResult {
    /// Chain-of-thought trace
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rationale: Option<String>,

    /// Score from 1-10
    #[serde(deserialize_with = "lenient_integer")]
    pub novelty_score: i64,

    /// Justification for the score
    pub reasoning: String,
}

/// Input of the summary stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerateSummaryInput {
    /// Claims extracted from the paper
    pub claims: Vec<String>,

    /// Score assigned by the novelty stage
    pub novelty_score: i64,
}

/// Output of the summary stage
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SummaryResult {
    /// Chain-of-thought trace
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rationale: Option<String>,

    /// 2-3 sentence summary
    pub summary: String,
}

impl_rationale!(ClaimsResult, NoveltyResult, SummaryResult);

/// Every stage output of one run, kept together
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisTrace {
    /// Stage 1 output
    pub claims: ClaimsResult,

    /// Stage 2 output
    pub novelty: NoveltyResult,

    /// Stage 3 output
    pub summary: SummaryResult,
}

impl AnalysisTrace {
    /// Assemble the terminal bundle; fields are moved, never transformed
    pub fn into_bundle(self) -> PredictionBundle {
        PredictionBundle {
            claims: self.claims.claims,
            novelty_score: self.novelty.novelty_score,
            reasoning: self.novelty.reasoning,
            summary: self.summary.summary,
        }
    }

    /// Chain-of-thought traces keyed by stage name, skipping absent ones
    pub fn rationales(&self) -> Vec<(&'static str, &str)> {
        [
            ("extract_claims", self.claims.rationale()),
            ("assess_novelty", self.novelty.rationale()),
            ("generate_summary", self.summary.rationale()),
        ]
        .into_iter()
        .filter_map(|(stage, r)| r.map(|r| (stage, r)))
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundle_copies_fields_verbatim() {
        let trace = AnalysisTrace {
            claims: ClaimsResult {
                rationale: None,
                claims: vec!["A".to_string(), "B".to_string()],
            },
            novelty: NoveltyResult {
                rationale: Some("thinking".to_string()),
                novelty_score: 42,
                reasoning: "x".to_string(),
            },
            summary: SummaryResult {
                rationale: None,
                summary: "s".to_string(),
            },
        };

        let bundle = trace.into_bundle();
        assert_eq!(bundle.claims, vec!["A", "B"]);
        assert_eq!(bundle.novelty_score, 42);
        assert_eq!(bundle.reasoning, "x");
        assert_eq!(bundle.summary, "s");
    }

    #[test]
    fn test_rationales_skip_missing() {
        let trace = AnalysisTrace {
            claims: ClaimsResult::default(),
            novelty: NoveltyResult {
                rationale: Some("because".to_string()),
                ..Default::default()
            },
            summary: SummaryResult::default(),
        };
        assert_eq!(trace.rationales(), vec![("assess_novelty", "because")]);
    }

    #[test]
    fn test_rationale_accessors() {
        let mut result = SummaryResult::default();
        assert!(result.rationale().is_none());
        result.set_rationale(Some("r".to_string()));
        assert_eq!(result.rationale(), Some("r"));
    }

    #[test]
    fn test_rationale_not_serialized_when_absent() {
        let json = serde_json::to_value(ClaimsResult::default()).unwrap();
        assert!(json.get("rationale").is_none());
    }
}
