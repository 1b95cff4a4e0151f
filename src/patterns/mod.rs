//! Heuristic patterns - line-based detectors that need no syntax tree.
//!
//! These run only when a file cannot be parsed. Each pattern is a pure
//! function from source text to issues; patterns share no state and may
//! run in any order.
//!
//! # Adding a Pattern
//!
//! Write a `fn(&str) -> Vec<Issue>` detector and append a [`Pattern`] to
//! [`default_patterns`] (or to a custom [`PatternRegistry`] via
//! [`PatternRegistry::with_pattern`]). The engine needs no change.

pub mod heuristics;

use crate::rules::{Category, Impact, Issue};

/// Signature every heuristic detector implements.
pub type Detector = fn(&str) -> Vec<Issue>;

/// A named heuristic rule.
#[derive(Clone, Copy)]
pub struct Pattern {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub impact: Impact,
    pub category: Category,
    pub detector: Detector,
}

impl Pattern {
    /// Run this pattern's detector over raw source text
    pub fn detect(&self, source: &str) -> Vec<Issue> {
        (self.detector)(source)
    }
}

impl std::fmt::Debug for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pattern")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("impact", &self.impact)
            .field("category", &self.category)
            .finish_non_exhaustive()
    }
}

/// The built-in heuristic patterns, in registration order.
pub fn default_patterns() -> Vec<Pattern> {
    vec![
        Pattern {
            id: "string-concat-loop",
            name: "String Concatenation in Loop",
            description: "String concatenation with += in loops is inefficient",
            impact: Impact::High,
            category: Category::Allocation,
            detector: heuristics::detect_string_concatenation,
        },
        Pattern {
            id: "slice-no-capacity",
            name: "Empty Slice Allocation",
            description: "Slice allocated without capacity hint",
            impact: Impact::Medium,
            category: Category::Allocation,
            detector: heuristics::detect_slice_allocation,
        },
    ]
}

/// An immutable, ordered set of heuristic patterns.
#[derive(Debug, Clone)]
pub struct PatternRegistry {
    patterns: Vec<Pattern>,
}

impl Default for PatternRegistry {
    fn default() -> Self {
        Self::new(default_patterns())
    }
}

impl PatternRegistry {
    pub fn new(patterns: Vec<Pattern>) -> Self {
        Self { patterns }
    }

    /// Return a registry with `pattern` appended after the existing ones.
    pub fn with_pattern(mut self, pattern: Pattern) -> Self {
        self.patterns.push(pattern);
        self
    }

    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    pub fn get(&self, id: &str) -> Option<&Pattern> {
        self.patterns.iter().find(|p| p.id == id)
    }

    /// Run every pattern in registration order and concatenate their issues.
    pub fn detect(&self, source: &str) -> Vec<Issue> {
        self.patterns
            .iter()
            .flat_map(|pattern| pattern.detect(source))
            .collect()
    }
}
