//! Line-oriented detectors used when a file cannot be parsed.
//!
//! They look at one physical line at a time and never build expressions,
//! so statements spread over several lines can be missed or misreported.

use crate::rules::{Category, Impact, Issue};

/// Whether the scanner believes it is inside a loop body.
///
/// The state is a single flag, not a stack: a nested loop's closing
/// brace ends the outer loop too, and any line that is exactly `}`
/// (a closing `if`, for instance) also ends it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoopState {
    #[default]
    NotInLoop,
    InLoop,
}

impl LoopState {
    /// Advance the state for the start of a line.
    pub fn enter_if_loop_header(self, trimmed: &str) -> Self {
        if is_loop_header(trimmed) {
            LoopState::InLoop
        } else {
            self
        }
    }

    /// Advance the state for the end of a line.
    pub fn exit_if_block_close(self, trimmed: &str) -> Self {
        if self == LoopState::InLoop && trimmed == "}" {
            LoopState::NotInLoop
        } else {
            self
        }
    }
}

fn is_loop_header(trimmed: &str) -> bool {
    trimmed.starts_with("for ") || trimmed.starts_with("for{") || trimmed.contains(" for ")
}

/// Flag lines inside a loop that append (`+=`) something quoted.
pub fn detect_string_concatenation(source: &str) -> Vec<Issue> {
    let mut issues = Vec::new();
    let mut state = LoopState::NotInLoop;

    for (idx, line) in source.lines().enumerate() {
        let trimmed = line.trim();
        state = state.enter_if_loop_header(trimmed);

        if state == LoopState::InLoop && line.contains("+=") && line.contains('"') {
            issues.push(Issue::new(
                idx + 1,
                "String concatenation in loop",
                "Using += for string concatenation in loops is inefficient",
                "Use strings.Builder for better performance",
                Impact::High,
                Category::Allocation,
            ));
        }

        state = state.exit_if_block_close(trimmed);
    }

    issues
}

/// Flag `make([]T)` calls that pass no length or capacity.
///
/// A line without any comma is taken to mean the call has only its type argument.
pub fn detect_slice_allocation(source: &str) -> Vec<Issue> {
    source
        .lines()
        .enumerate()
        .filter(|(_, line)| {
            let trimmed = line.trim();
            trimmed.contains("make([]") && trimmed.contains(')') && !trimmed.contains(',')
        })
        .map(|(idx, _)| {
            Issue::new(
                idx + 1,
                "Slice allocated without capacity",
                "Consider providing capacity hint to avoid reallocations",
                "Use make([]Type, 0, capacity) if you know the expected size",
                Impact::Medium,
                Category::Allocation,
            )
        })
        .collect()
}
