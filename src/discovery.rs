//! File discovery utilities for go-perf.
//!
//! Directory walking lives outside the detection engine: the engine only
//! ever sees one file at a time.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Maximum file size to analyze (10 MB).
///
/// Files larger than this are skipped to prevent memory exhaustion attacks.
pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Directory names never descended into.
const EXCLUDED_DIRS: &[&str] = &["vendor", "testdata", "node_modules"];

/// Options for file discovery.
#[derive(Clone, Debug, Default)]
pub struct DiscoveryOptions {
    /// Additional directory names to skip.
    pub extra_excludes: Vec<String>,
}

impl DiscoveryOptions {
    pub fn with_excludes(extra_excludes: Vec<String>) -> Self {
        Self { extra_excludes }
    }
}

/// Discover all Go source files at the given path.
///
/// This function walks the directory tree, filtering out:
/// - Hidden directories (starting with `.`)
/// - `vendor`, `testdata` and `node_modules`, plus any `extra_excludes`
/// - Symlinks and other non-regular files
/// - Files larger than [`MAX_FILE_SIZE`]
///
/// The result is sorted so that runs are reproducible regardless of the
/// order the filesystem returns entries in.
pub fn discover_go_files(path: &Path, options: &DiscoveryOptions) -> Vec<PathBuf> {
    let mut files = Vec::new();

    // SECURITY: Disable symlink following within the tree
    for entry in WalkDir::new(path)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_excluded_dir(e, options))
        .filter_map(|e| e.ok())
    {
        if !entry.file_type().is_file() {
            continue;
        }

        let file_path = entry.path();
        if !file_path.extension().is_some_and(|ext| ext == "go") {
            continue;
        }

        match std::fs::symlink_metadata(file_path) {
            Ok(meta) if meta.is_file() => {
                if meta.len() > MAX_FILE_SIZE {
                    tracing::warn!(
                        path = %file_path.display(),
                        size = meta.len(),
                        max = MAX_FILE_SIZE,
                        "skipping file: too large"
                    );
                    continue;
                }
                files.push(file_path.to_path_buf());
            }
            Ok(_) => continue,
            Err(e) => {
                tracing::warn!(
                    path = %file_path.display(),
                    error = %e,
                    "skipping file: cannot read metadata"
                );
            }
        }
    }

    files.sort();
    files
}

/// Check if a directory entry should be excluded from traversal.
///
/// Note: The root directory (depth 0) is never excluded, even if it starts with `.`.
pub fn is_excluded_dir(entry: &walkdir::DirEntry, options: &DiscoveryOptions) -> bool {
    if !entry.file_type().is_dir() || entry.depth() == 0 {
        return false;
    }

    let name = entry.file_name().to_string_lossy();

    if name.starts_with('.') {
        return true;
    }

    EXCLUDED_DIRS.contains(&name.as_ref())
        || options.extra_excludes.iter().any(|ex| ex == name.as_ref())
}
