//! Claimscope Analyzer
//!
//! Runs a research paper through three LLM-backed stages: claim extraction,
//! novelty assessment and summary generation.
//!
//! # Overview
//!
//! Each stage is described by a [`Signature`]: a name, an instruction and a
//! statically declared set of typed input and output fields. A generic
//! [`Predictor`] turns a signature and an input value into one structured
//! model call and decodes the reply into the stage's output struct. The
//! [`PaperAnalyzer`] chains the three stages, handing each output to the
//! next stage by value.
//!
//! # Architecture
//!
//! ```text
//! PaperText → ExtractClaims → AssessNovelty → GenerateSummary → PredictionBundle
//! ```
//!
//! # Key Features
//!
//! - **Static Signatures**: field names and types fixed at compile time
//! - **Explicit Chain-of-Thought**: optional `rationale` on every stage output
//! - **Injected Provider**: every stage receives its model handle explicitly
//! - **Replaceable Stages**: the driver only depends on the [`Stage`] trait
//!
//! # Example Usage
//!
//! ```no_run
//! use claimscope_analyzer::{AnalyzerConfig, PaperAnalyzer};
//! use claimscope_domain::PaperText;
//! use claimscope_llm::MockProvider;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let llm = Arc::new(MockProvider::new("{}"));
//! let analyzer = PaperAnalyzer::new(llm, AnalyzerConfig::default());
//!
//! let bundle = analyzer.analyze(&PaperText::sample()).await?;
//!
//! println!("Claims: {:?}", bundle.claims);
//! println!("Novelty: {}/10", bundle.novelty_score);
//! println!("Summary: {}", bundle.summary);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod analyzer;
mod config;
mod error;
mod parser;
mod predictor;
mod prompt;
mod signature;
mod types;

#[cfg(test)]
mod tests;

pub use analyzer::{ModelAnalyzer, PaperAnalyzer};
pub use config::AnalyzerConfig;
pub use error::AnalyzerError;
pub use predictor::{Predictor, Stage};
pub use prompt::PromptBuilder;
pub use signature::{
    output_fields, output_schema, AssessNovelty, ExtractClaims, GenerateSummary, Signature, RATIONALE_FIELD,
};
pub use types::{
    AnalysisTrace, AssessNoveltyInput, ClaimsResult, ExtractClaimsInput, GenerateSummaryInput, NoveltyResult,
    Rationale, SummaryResult,
};
