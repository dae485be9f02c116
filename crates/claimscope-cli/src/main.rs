//! Claimscope CLI - analyze a research paper with a three-stage model pipeline.

use claimscope_cli::commands;
use claimscope_cli::{Cli, Config, Formatter};
use clap::Parser;
use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let color_enabled = !cli.no_color && std::io::stderr().is_terminal();
    if !color_enabled {
        colored::control::set_override(false);
    }

    init_tracing(cli.log_level());

    let formatter = Formatter::new(Default::default(), false, color_enabled);
    if let Err(e) = run(cli, color_enabled).await {
        eprintln!("{}", formatter.error(&e.to_string()));
        std::process::exit(1);
    }
}

fn init_tracing(default_level: &str) {
    // Initialize tracing (log to stderr so stdout carries only results)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

async fn run(cli: Cli, color_enabled: bool) -> claimscope_cli::Result<()> {
    let mut config = Config::load(cli.config.as_deref())?;
    config.apply_overrides(&cli);
    config.validate()?;

    let formatter = Formatter::new(config.output.format, config.output.show_reasoning, color_enabled);
    commands::execute_analyze(cli.paper.as_deref(), &config, &formatter).await
}
