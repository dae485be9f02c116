//! CLI argument parsing.

use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Claimscope - extract claims from a research paper, rate their novelty and summarize it.
///
/// With no arguments the built-in sample abstract is analyzed with the
/// default model. The API key is read from OPENROUTER_API_KEY unless the
/// configuration names another variable.
#[derive(Debug, Parser)]
#[command(name = "claimscope")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "CLAIMSCOPE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Paper text file to analyze ('-' reads stdin)
    #[arg(short, long)]
    pub paper: Option<String>,

    /// Model identifier
    #[arg(short, long, env = "CLAIMSCOPE_MODEL")]
    pub model: Option<String>,

    /// Base URL of the OpenAI-compatible API
    #[arg(long, env = "CLAIMSCOPE_API_BASE")]
    pub api_base: Option<String>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<CliFormat>,

    /// Also print the novelty reasoning
    #[arg(long)]
    pub show_reasoning: bool,

    /// Do not ask the model for a rationale before each answer
    #[arg(long)]
    pub no_cot: bool,

    /// Disable colored error output
    #[arg(long)]
    pub no_color: bool,

    /// Increase log verbosity on stderr (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Result lines (default)
    Text,
    /// JSON document
    Json,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Text => crate::config::OutputFormat::Text,
            CliFormat::Json => crate::config::OutputFormat::Json,
        }
    }
}

impl Cli {
    /// Default log filter for the requested verbosity
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_arguments() {
        let cli = Cli::parse_from(["claimscope"]);
        assert!(cli.paper.is_none());
        assert!(cli.format.is_none());
        assert!(!cli.show_reasoning);
        assert_eq!(cli.log_level(), "warn");
    }

    #[test]
    fn test_paper_and_verbosity() {
        let cli = Cli::parse_from(["claimscope", "--paper", "-", "-vv"]);
        assert_eq!(cli.paper.as_deref(), Some("-"));
        assert_eq!(cli.log_level(), "debug");
    }

    #[test]
    fn test_invalid_format_is_rejected() {
        let result = Cli::try_parse_from(["claimscope", "--format", "table"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_format_conversion() {
        let format: crate::config::OutputFormat = CliFormat::Json.into();
        assert_eq!(format, crate::config::OutputFormat::Json);
    }
}
