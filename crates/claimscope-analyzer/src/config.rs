//! Configuration for the Analyzer

use serde::{Deserialize, Serialize};

/// Configuration shared by every stage of the pipeline
///
/// Call timing belongs to the provider (request timeout and retry budget);
/// the pipeline awaits each call until the provider answers or gives up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Ask each stage for a `rationale` before its answer
    pub chain_of_thought: bool,
}

impl AnalyzerConfig {
    /// Same configuration with chain-of-thought turned off
    pub fn without_chain_of_thought(mut self) -> Self {
        self.chain_of_thought = false;
        self
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self { chain_of_thought: true }
    }
}
