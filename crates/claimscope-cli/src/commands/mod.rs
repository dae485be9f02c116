//! Command implementations.

pub mod analyze;

pub use self::analyze::{build_provider, execute_analyze, read_paper, run_analysis};
