//! go-perf: Preventive performance analysis for Go
//!
//! Finds performance anti-patterns in Go source files. Each file is
//! analyzed structurally from its syntax tree; files that do not parse
//! are scanned line by line with heuristic patterns instead, so no file
//! is ever dropped for containing a syntax error.

pub mod config;
pub mod discovery;
pub mod engine;
pub mod error;
pub mod logging;
pub mod patterns;
pub mod reporter;
pub mod rules;

pub use config::Config;
pub use engine::{AnalysisResult, DetectionMode, Engine, FailurePolicy};
pub use error::{Error, Result};
pub use patterns::{default_patterns, Pattern, PatternRegistry};
pub use rules::{Category, Impact, Issue, Rule};

/// Analyze a single Go file with the built-in rules and patterns
pub fn analyze_file(path: &std::path::Path) -> Result<AnalysisResult> {
    Engine::new().analyze_file(path)
}
