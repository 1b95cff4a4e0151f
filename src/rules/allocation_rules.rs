//! Rules for detecting allocation anti-patterns.

use super::visitor::for_each_descendant;
use super::{Category, Impact, Issue, Rule};
use crate::engine::AnalysisContext;
use tree_sitter::Node;

/// Node kinds that introduce an assignment the rules care about.
/// `x := ...` is its own node kind in the Go grammar.
const ASSIGNMENT_KINDS: &[&str] = &["assignment_statement", "short_var_declaration"];

/// Detects `s += ...` on a string-like operand inside a `for` loop
pub struct StringConcatLoopRule;

impl Rule for StringConcatLoopRule {
    fn id(&self) -> &'static str {
        "string-concat-loop"
    }

    fn name(&self) -> &'static str {
        "String Concatenation in Loop"
    }

    fn description(&self) -> &'static str {
        "Detects += string concatenation inside loops; use strings.Builder instead"
    }

    fn impact(&self) -> Impact {
        Impact::High
    }

    fn category(&self) -> Category {
        Category::Allocation
    }

    fn check_node(&self, node: Node<'_>, ctx: &AnalysisContext) -> Vec<Issue> {
        if node.kind() != "for_statement" {
            return Vec::new();
        }
        let Some(body) = node.child_by_field_name("body") else {
            return Vec::new();
        };

        let mut issues = Vec::new();
        // Every enclosing loop scans its whole body, so an assignment nested
        // in N loops is reported N times.
        for_each_descendant(body, |n| {
            if n.kind() == "assignment_statement"
                && is_add_assign(n)
                && rhs_contains_string_operation(n)
            {
                issues.push(Issue::new(
                    ctx.line_of(n),
                    "String concatenation in loop",
                    "Using += for string concatenation in loops creates many temporary strings",
                    "Use strings.Builder for 3x better performance: \
                     var b strings.Builder; b.WriteString(...)",
                    self.impact(),
                    self.category(),
                ));
            }
        });
        issues
    }
}

fn is_add_assign(assignment: Node<'_>) -> bool {
    if let Some(op) = assignment.child_by_field_name("operator") {
        return op.kind() == "+=";
    }
    let mut cursor = assignment.walk();
    let found = assignment
        .children(&mut cursor)
        .any(|child| !child.is_named() && child.kind() == "+=");
    found
}

/// True when any right-hand operand looks like a string operation.
///
/// Any bare identifier counts, so `total += n` on an int is also flagged.
/// This over-approximation is deliberate: without type information the
/// rule prefers a false positive to a missed concatenation.
fn rhs_contains_string_operation(assignment: Node<'_>) -> bool {
    let Some(right) = assignment.child_by_field_name("right") else {
        return false;
    };
    let mut cursor = right.walk();
    let found = right
        .named_children(&mut cursor)
        .any(|operand| is_string_like(operand));
    found
}

fn is_string_like(expr: Node<'_>) -> bool {
    match expr.kind() {
        "interpreted_string_literal" | "raw_string_literal" | "identifier" => true,
        "binary_expression" => expr
            .child_by_field_name("operator")
            .is_some_and(|op| op.kind() == "+"),
        _ => false,
    }
}

/// Detects `make([]T)` with neither a length nor a capacity argument
pub struct SliceNoCapacityRule;

impl Rule for SliceNoCapacityRule {
    fn id(&self) -> &'static str {
        "slice-no-capacity"
    }

    fn name(&self) -> &'static str {
        "Slice Without Capacity"
    }

    fn description(&self) -> &'static str {
        "Detects make([]T) called with the type only; pass a capacity hint instead"
    }

    fn impact(&self) -> Impact {
        Impact::Medium
    }

    fn category(&self) -> Category {
        Category::Allocation
    }

    fn check_node(&self, node: Node<'_>, ctx: &AnalysisContext) -> Vec<Issue> {
        if !ASSIGNMENT_KINDS.contains(&node.kind()) {
            return Vec::new();
        }
        let Some(right) = node.child_by_field_name("right") else {
            return Vec::new();
        };

        let mut cursor = right.walk();
        let calls: Vec<Node<'_>> = right
            .named_children(&mut cursor)
            .filter(|expr| is_make_slice_without_size(*expr, ctx))
            .collect();

        calls
            .into_iter()
            .map(|call| {
                Issue::new(
                    ctx.line_of(call),
                    "Slice allocated without capacity hint",
                    "Slice will be reallocated and copied as it grows",
                    "If you know expected size, use: make([]Type, 0, expectedCapacity)",
                    self.impact(),
                    self.category(),
                )
            })
            .collect()
    }
}

/// Check if an expression is `make(<slice type>)` with exactly one argument
fn is_make_slice_without_size(expr: Node<'_>, ctx: &AnalysisContext) -> bool {
    if expr.kind() != "call_expression" {
        return false;
    }
    let is_make = expr
        .child_by_field_name("function")
        .is_some_and(|f| f.kind() == "identifier" && ctx.text_of(f) == "make");
    if !is_make {
        return false;
    }
    let Some(arguments) = expr.child_by_field_name("arguments") else {
        return false;
    };

    let mut cursor = arguments.walk();
    let args: Vec<Node<'_>> = arguments
        .named_children(&mut cursor)
        .filter(|arg| arg.kind() != "comment")
        .collect();

    // `[N]T` is an array_type and `[...]T` has its own kind; only `[]T` is a slice
    args.len() == 1 && args[0].kind() == "slice_type"
}
