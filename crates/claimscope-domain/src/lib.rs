//! Claimscope Domain Layer
//!
//! Core records and trait seams for the paper analysis pipeline. Like every
//! domain crate in this workspace it carries no external dependencies: it
//! describes what flows between the stages, not how a model is reached.
//!
//! ## Key Concepts
//!
//! - **PaperText**: the single document a run analyzes
//! - **PredictionBundle**: the terminal record assembled after the last stage
//! - **FieldSpec**: a statically declared, typed field of a structured model call
//! - **LlmProvider**: the boundary to whatever executes inference
//!
//! ## Architecture
//!
//! - No external crate dependencies
//! - Provider implementations live in `claimscope-llm`
//! - Stage logic lives in `claimscope-analyzer`

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bundle;
pub mod paper;
pub mod schema;
pub mod traits;

// Re-exports for convenience
pub use bundle::{score_in_nominal_range, PredictionBundle, MAX_NOVELTY_SCORE};
pub use paper::{PaperText, SAMPLE_PAPER};
pub use schema::{FieldKind, FieldSpec};
pub use traits::LlmProvider;
