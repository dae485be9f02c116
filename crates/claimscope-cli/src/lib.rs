//! Claimscope CLI library.
//!
//! Configuration loading, paper input, provider construction and output
//! formatting for the `claimscope` binary.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;

pub use cli::Cli;
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;
