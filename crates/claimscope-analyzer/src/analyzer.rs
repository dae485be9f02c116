//! Core pipeline driver

use crate::config::AnalyzerConfig;
use crate::error::AnalyzerError;
use crate::predictor::{Predictor, Stage};
use crate::signature::{AssessNovelty, ExtractClaims, GenerateSummary};
use crate::types::{AnalysisTrace, AssessNoveltyInput, ExtractClaimsInput, GenerateSummaryInput};
use claimscope_domain::{score_in_nominal_range, LlmProvider, PaperText, PredictionBundle};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

/// The analyzer runs claim extraction, novelty assessment and summary
/// generation in that order, each stage feeding the next
pub struct PaperAnalyzer<E, A, Z> {
    extract: E,
    assess: A,
    summarize: Z,
}

/// Analyzer whose three stages all call the same provider
pub type ModelAnalyzer<L> =
    PaperAnalyzer<Predictor<ExtractClaims, L>, Predictor<AssessNovelty, L>, Predictor<GenerateSummary, L>>;

impl<L> ModelAnalyzer<L>
where
    L: LlmProvider + Send + Sync,
    L::Error: std::fmt::Display,
{
    /// Create an analyzer whose stages share one provider handle
    pub fn new(llm: Arc<L>, config: AnalyzerConfig) -> Self {
        Self {
            extract: Predictor::new(Arc::clone(&llm), config.clone()),
            assess: Predictor::new(Arc::clone(&llm), config.clone()),
            summarize: Predictor::new(llm, config),
        }
    }
}

impl<E, A, Z> PaperAnalyzer<E, A, Z>
where
    E: Stage<ExtractClaims>,
    A: Stage<AssessNovelty>,
    Z: Stage<GenerateSummary>,
{
    /// Assemble an analyzer from explicit stages
    pub fn from_stages(extract: E, assess: A, summarize: Z) -> Self {
        Self {
            extract,
            assess,
            summarize,
        }
    }

    /// Run all three stages and return the terminal bundle
    pub async fn analyze(&self, paper: &PaperText) -> Result<PredictionBundle, AnalyzerError> {
        Ok(self.trace(paper).await?.into_bundle())
    }

    /// Run all three stages and keep every stage output
    ///
    /// A failing stage stops the run; later stages are never invoked.
    pub async fn trace(&self, paper: &PaperText) -> Result<AnalysisTrace, AnalyzerError> {
        let start_time = Instant::now();

        info!("Starting analysis, paper length {}", paper.len());

        // Step 1: Extract claims
        let claims = self
            .extract
            .run(ExtractClaimsInput {
                paper_text: paper.as_str().to_string(),
            })
            .await?;
        info!("Extracted {} claims", claims.claims.len());

        // Step 2: Assess novelty
        let novelty = self
            .assess
            .run(AssessNoveltyInput {
                claims: claims.claims.clone(),
            })
            .await?;
        if !score_in_nominal_range(novelty.novelty_score) {
            warn!("Novelty score {} is outside 1-10; passing it through", novelty.novelty_score);
        }
        info!("Novelty score: {}", novelty.novelty_score);

        // Step 3: Generate summary
        let summary = self
            .summarize
            .run(GenerateSummaryInput {
                claims: claims.claims.clone(),
                novelty_score: novelty.novelty_score,
            })
            .await?;

        info!(
            "Analysis complete in {} ms, summary length {}",
            start_time.elapsed().as_millis(),
            summary.summary.len()
        );

        Ok(AnalysisTrace {
            claims,
            novelty,
            summary,
        })
    }
}
