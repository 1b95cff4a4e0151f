use super::visitor::for_each_descendant;
use super::{Category, Impact, Issue, Rule};
use crate::engine::AnalysisContext;
use tree_sitter::Node;

/// Detects `go func() { for { ... } }()` with no channel send in the body.
///
/// This is a syntactic proxy: a goroutine that exits via a timer, a
/// context, or a receive-driven `select` is still reported if it never
/// sends on a channel.
pub struct GoroutineLeakRule;

impl Rule for GoroutineLeakRule {
    fn id(&self) -> &'static str {
        "goroutine-leak"
    }

    fn name(&self) -> &'static str {
        "Potential Goroutine Leak"
    }

    fn description(&self) -> &'static str {
        "Detects goroutines running an unconditional loop with no channel communication"
    }

    fn impact(&self) -> Impact {
        Impact::Medium
    }

    fn category(&self) -> Category {
        Category::Goroutine
    }

    fn check_node(&self, node: Node<'_>, ctx: &AnalysisContext) -> Vec<Issue> {
        if node.kind() != "go_statement" {
            return Vec::new();
        }
        let Some(body) = spawned_literal_body(node) else {
            return Vec::new();
        };

        let mut has_infinite_loop = false;
        let mut has_channel_send = false;
        for_each_descendant(body, |n| match n.kind() {
            "for_statement" if is_unconditional_loop(n) => has_infinite_loop = true,
            "send_statement" => has_channel_send = true,
            _ => {}
        });

        if !has_infinite_loop || has_channel_send {
            return Vec::new();
        }

        vec![Issue::new(
            ctx.line_of(node),
            "Potential goroutine leaks",
            "Goroutine with infinite loop and no channel communication may leak",
            "Add proper exit condition or context cancellation",
            self.impact(),
            self.category(),
        )]
    }
}

/// Body of the function literal spawned by a `go` statement, if the
/// spawned call is an inline `func(...) { ... }(...)`.
fn spawned_literal_body(go_stmt: Node<'_>) -> Option<Node<'_>> {
    let mut cursor = go_stmt.walk();
    let call = go_stmt
        .named_children(&mut cursor)
        .find(|child| child.kind() != "comment")?;
    if call.kind() != "call_expression" {
        return None;
    }
    let function = call.child_by_field_name("function")?;
    if function.kind() != "func_literal" {
        return None;
    }
    function.child_by_field_name("body")
}

/// True for `for { }` and `for init; ; post { }`; false for conditional
/// and range loops.
fn is_unconditional_loop(for_stmt: Node<'_>) -> bool {
    let mut cursor = for_stmt.walk();
    let header = for_stmt
        .named_children(&mut cursor)
        .find(|child| child.kind() != "block" && child.kind() != "comment");

    match header {
        None => true,
        Some(h) if h.kind() == "for_clause" => h.child_by_field_name("condition").is_none(),
        Some(_) => false,
    }
}
