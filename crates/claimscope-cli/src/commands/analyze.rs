//! Analyze command implementation.

use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use claimscope_analyzer::{AnalyzerConfig, ModelAnalyzer};
use claimscope_domain::{LlmProvider, PaperText};
use claimscope_llm::OpenRouterProvider;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Read the paper to analyze.
///
/// `None` selects the built-in sample abstract and `-` reads stdin.
pub fn read_paper(source: Option<&str>) -> Result<PaperText> {
    let paper = match source {
        None => {
            debug!("No paper given, using the sample abstract");
            PaperText::sample()
        }
        Some("-") => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            PaperText::new(text)
        }
        Some(path) => {
            let text = std::fs::read_to_string(Path::new(path))
                .map_err(|e| CliError::InvalidInput(format!("Cannot read paper {}: {}", path, e)))?;
            PaperText::new(text)
        }
    };

    if paper.is_blank() {
        warn!("Paper text is blank; the model will see an empty input");
    }
    Ok(paper)
}

/// Build the OpenRouter provider described by the configuration.
pub fn build_provider(config: &Config) -> Result<OpenRouterProvider> {
    let settings = &config.provider;
    let api_key = config.api_key();
    if api_key.is_none() {
        debug!("{} is not set, sending requests without credentials", settings.api_key_env);
    }

    let mut provider = OpenRouterProvider::new(settings.api_base.as_str(), settings.model.as_str())?
        .with_api_key(api_key)
        .with_max_retries(settings.max_retries)
        .with_temperature(settings.temperature)
        .with_max_tokens(settings.max_tokens)
        .with_json_mode(settings.json_mode)
        .with_timeout(Duration::from_secs(settings.timeout_secs))?;

    if let Some(referer) = &settings.referer {
        provider = provider.with_referer(referer.as_str());
    }
    if let Some(title) = &settings.title {
        provider = provider.with_title(title.as_str());
    }
    Ok(provider)
}

/// Run the pipeline against any provider and format the result.
pub async fn run_analysis<L>(
    llm: Arc<L>,
    paper: &PaperText,
    config: AnalyzerConfig,
    formatter: &Formatter,
) -> Result<String>
where
    L: LlmProvider + Send + Sync,
    L::Error: std::fmt::Display,
{
    let analyzer = ModelAnalyzer::new(llm, config);
    let trace = analyzer.trace(paper).await?;
    formatter.format_trace(&trace)
}

/// Execute the analyze command and print the result.
pub async fn execute_analyze(paper: Option<&str>, config: &Config, formatter: &Formatter) -> Result<()> {
    let paper = read_paper(paper)?;
    let provider = build_provider(config)?;
    debug!("Using model {} at {}", config.provider.model, provider.api_base());

    let output = run_analysis(Arc::new(provider), &paper, config.analyzer.clone(), formatter).await?;
    println!("{}", output);
    Ok(())
}
