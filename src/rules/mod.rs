pub mod allocation_rules;
pub mod goroutine_rules;
pub mod registry;
pub mod visitor;

use crate::engine::AnalysisContext;
use serde::{Deserialize, Serialize};
use tree_sitter::Node;

/// Impact levels for issues, ordered from least to most severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    #[default]
    Low,
    Medium,
    High,
}

impl Impact {
    pub fn as_str(&self) -> &'static str {
        match self {
            Impact::Low => "low",
            Impact::Medium => "medium",
            Impact::High => "high",
        }
    }
}

impl std::fmt::Display for Impact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Impact {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Impact::Low),
            "medium" | "med" => Ok(Impact::Medium),
            "high" => Ok(Impact::High),
            _ => Err(format!("Unknown impact: {}", s)),
        }
    }
}

#[cfg(feature = "cli")]
impl clap::ValueEnum for Impact {
    fn value_variants<'a>() -> &'a [Self] {
        &[Impact::Low, Impact::Medium, Impact::High]
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        Some(clap::builder::PossibleValue::new(self.as_str()))
    }
}

/// The resource or behavior class an issue pertains to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Allocation,
    Goroutine,
    Loop,
    Io,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Allocation => "allocation",
            Category::Goroutine => "goroutine",
            Category::Loop => "loop",
            Category::Io => "io",
        }
    }

    /// Human-readable heading used by reporters
    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Allocation => "Memory Allocation",
            Category::Goroutine => "Concurrency Issue",
            Category::Loop => "Loop Optimization",
            Category::Io => "I/O Efficiency",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single performance issue found in a source file.
///
/// Both detection modes produce this exact shape; a reader cannot tell
/// from an `Issue` alone whether it came from the syntax tree or from
/// the line scanner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// 1-based source line
    pub line: usize,
    pub title: String,
    pub description: String,
    /// Remediation advice, empty when none applies
    pub suggestion: String,
    pub impact: Impact,
    pub category: Category,
}

impl Issue {
    pub fn new(
        line: usize,
        title: impl Into<String>,
        description: impl Into<String>,
        suggestion: impl Into<String>,
        impact: Impact,
        category: Category,
    ) -> Self {
        Self {
            line,
            title: title.into(),
            description: description.into(),
            suggestion: suggestion.into(),
            impact,
            category,
        }
    }
}

/// A structural check evaluated at every node of the syntax tree.
///
/// Rules are independent: none may depend on another's findings, and a
/// match never stops the walk from descending into the node's subtree.
pub trait Rule: Send + Sync {
    /// Unique identifier for this rule (e.g., "slice-no-capacity")
    fn id(&self) -> &'static str;

    /// Human-readable name
    fn name(&self) -> &'static str;

    /// Description of what this rule checks
    fn description(&self) -> &'static str;

    fn impact(&self) -> Impact;

    fn category(&self) -> Category;

    /// Inspect a single node and return any issues anchored on it
    fn check_node(&self, node: Node<'_>, ctx: &AnalysisContext) -> Vec<Issue>;
}
