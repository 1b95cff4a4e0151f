//! Per-file analysis: secure reading and the dual-mode detection pipeline.

use crate::discovery::MAX_FILE_SIZE;
use crate::engine::context::AnalysisContext;
use crate::engine::parser;
use crate::error::{Error, Result};
use crate::patterns::PatternRegistry;
use crate::rules::visitor::walk_tree;
use crate::rules::{Issue, Rule};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Which detector produced a file's issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetectionMode {
    /// The file parsed; issues come from the structural rules only.
    Structural,
    /// The file did not parse; issues come from the heuristic patterns only.
    Heuristic,
}

/// Read a file with TOCTOU-safe handling.
///
/// Opens the file, validates metadata from the file descriptor,
/// and returns the raw bytes. This prevents race conditions
/// where the file could be replaced between check and read.
/// Decoding is left to [`detect_issues_in_bytes`].
pub fn read_file_secure(file_path: &Path) -> Result<Vec<u8>> {
    // SECURITY: Open once, verify via fd metadata, then read from same fd
    let mut file = File::open(file_path).map_err(|e| Error::io(file_path, e))?;
    let metadata = file.metadata().map_err(|e| Error::io(file_path, e))?;

    if !metadata.is_file() {
        return Err(Error::io(
            file_path,
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "not a regular file"),
        ));
    }

    if metadata.len() > MAX_FILE_SIZE {
        return Err(Error::io(
            file_path,
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!(
                    "file too large: {} bytes (max: {} bytes)",
                    metadata.len(),
                    MAX_FILE_SIZE
                ),
            ),
        ));
    }

    let mut content = Vec::with_capacity(metadata.len() as usize);
    file.read_to_end(&mut content)
        .map_err(|e| Error::io(file_path, e))?;

    Ok(content)
}

/// Run the dual-mode pipeline over raw file content.
///
/// Go source must be UTF-8, so content that is not counts as a failed
/// parse: invalid sequences are replaced with U+FFFD and the text goes
/// straight to the heuristic patterns.
pub fn detect_issues_in_bytes(
    file_path: &Path,
    content: &[u8],
    rules: &[Box<dyn Rule>],
    patterns: &PatternRegistry,
) -> (DetectionMode, Vec<Issue>) {
    match std::str::from_utf8(content) {
        Ok(source) => detect_issues(file_path, source, rules, patterns),
        Err(e) => {
            tracing::debug!(
                path = %file_path.display(),
                reason = %e,
                "source is not valid UTF-8, falling back to heuristic scan"
            );
            let source = String::from_utf8_lossy(content);
            (DetectionMode::Heuristic, patterns.detect(&source))
        }
    }
}

/// Run the dual-mode pipeline over in-memory source.
///
/// Prefers the structural rules; when the source does not parse, runs
/// every heuristic pattern instead. The two modes never mix for one file.
pub fn detect_issues(
    file_path: &Path,
    source: &str,
    rules: &[Box<dyn Rule>],
    patterns: &PatternRegistry,
) -> (DetectionMode, Vec<Issue>) {
    match parser::parse_file(source) {
        Ok(tree) => {
            let ctx = AnalysisContext::new(source);
            let issues = walk_tree(tree.root_node(), rules, &ctx);
            tracing::debug!(
                path = %file_path.display(),
                issues = issues.len(),
                "structural analysis complete"
            );
            (DetectionMode::Structural, issues)
        }
        Err(parse_error) => {
            tracing::debug!(
                path = %file_path.display(),
                reason = %parse_error,
                "structural parse failed, falling back to heuristic scan"
            );
            (DetectionMode::Heuristic, patterns.detect(source))
        }
    }
}
