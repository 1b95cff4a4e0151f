//! Analysis engine - drives the dual-mode detection for each file.

mod context;
mod file_analyzer;
pub(crate) mod parser;

pub use context::AnalysisContext;
pub use file_analyzer::{detect_issues, detect_issues_in_bytes, read_file_secure, DetectionMode};
pub use parser::ParseError;

use crate::discovery::{discover_go_files, DiscoveryOptions};
use crate::error::Result;
use crate::patterns::PatternRegistry;
use crate::rules::{registry, Issue, Rule};
use rayon::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// The issues found in one file.
///
/// Issues keep detection order; they are not sorted by line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisResult {
    pub file_path: PathBuf,
    pub mode: DetectionMode,
    pub issues: Vec<Issue>,
}

/// What a directory run does when one file cannot be analyzed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Log the failure, leave the file out and keep going.
    #[default]
    Isolate,
    /// Abort the whole run with the first error.
    FailFast,
}

pub struct Engine {
    rules: Vec<Box<dyn Rule>>,
    patterns: PatternRegistry,
    discovery: DiscoveryOptions,
    failure_policy: FailurePolicy,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// An engine with the built-in structural rules and heuristic patterns.
    pub fn new() -> Self {
        Self::with_patterns(PatternRegistry::default())
    }

    /// An engine whose fallback path runs `patterns` instead of the defaults.
    pub fn with_patterns(patterns: PatternRegistry) -> Self {
        Self {
            rules: registry::all_rules(),
            patterns,
            discovery: DiscoveryOptions::default(),
            failure_policy: FailurePolicy::default(),
        }
    }

    pub fn failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    pub fn discovery_options(mut self, options: DiscoveryOptions) -> Self {
        self.discovery = options;
        self
    }

    pub fn patterns(&self) -> &PatternRegistry {
        &self.patterns
    }

    /// Analyze in-memory source as if it had been read from `file_path`.
    pub fn analyze_source(&self, file_path: &Path, source: &str) -> AnalysisResult {
        let (mode, issues) = detect_issues(file_path, source, &self.rules, &self.patterns);
        AnalysisResult {
            file_path: file_path.to_path_buf(),
            mode,
            issues,
        }
    }

    /// Analyze one Go source file.
    ///
    /// # Errors
    ///
    /// Fails only when the file cannot be read. A file that does not parse,
    /// including one that is not valid UTF-8, is not an error: it is
    /// analyzed with the heuristic patterns.
    pub fn analyze_file(&self, file_path: &Path) -> Result<AnalysisResult> {
        let content = read_file_secure(file_path)?;
        let (mode, issues) =
            detect_issues_in_bytes(file_path, &content, &self.rules, &self.patterns);
        Ok(AnalysisResult {
            file_path: file_path.to_path_buf(),
            mode,
            issues,
        })
    }

    /// Analyze a single file, or every Go file below a directory.
    ///
    /// Files are analyzed in parallel; results are returned in discovery
    /// (sorted path) order. How per-file read failures are handled depends
    /// on the configured [`FailurePolicy`].
    pub fn analyze_path(&self, path: &Path) -> Result<Vec<AnalysisResult>> {
        if !path.is_dir() {
            return Ok(vec![self.analyze_file(path)?]);
        }

        let files = discover_go_files(path, &self.discovery);
        tracing::info!(root = %path.display(), files = files.len(), "analyzing directory");

        let outcomes: Vec<(PathBuf, Result<AnalysisResult>)> = files
            .into_par_iter()
            .map(|file| {
                let outcome = self.analyze_file(&file);
                (file, outcome)
            })
            .collect();

        let mut results = Vec::with_capacity(outcomes.len());
        for (file, outcome) in outcomes {
            match outcome {
                Ok(result) => results.push(result),
                Err(e) if self.failure_policy == FailurePolicy::FailFast => return Err(e),
                Err(e) => {
                    tracing::warn!(path = %file.display(), error = %e, "failed to analyze file");
                }
            }
        }

        Ok(results)
    }
}
