//! Shared traversal utilities for structural rules.
//!
//! Provides the single depth-first walk that drives every rule, plus a
//! subtree scanner rules use to look inside loop and closure bodies.
//! Both walk with an explicit cursor or stack, so nesting depth is bounded
//! only by the tree itself.

use super::{Issue, Rule};
use crate::engine::AnalysisContext;
use tree_sitter::Node;

/// Visit every node under `root` (root included) in pre-order and run
/// each rule on it, in the order given.
///
/// Issues are collected in visit order. A rule firing on a node never
/// prevents the walk from entering that node's children.
pub fn walk_tree(root: Node<'_>, rules: &[Box<dyn Rule>], ctx: &AnalysisContext) -> Vec<Issue> {
    let mut issues = Vec::new();
    let mut cursor = root.walk();

    loop {
        let node = cursor.node();
        for rule in rules {
            issues.extend(rule.check_node(node, ctx));
        }

        if cursor.goto_first_child() {
            continue;
        }

        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return issues;
            }
        }
    }
}

/// Call `visit` on every named descendant of `node` (excluding `node`
/// itself) in pre-order.
pub fn for_each_descendant<'tree, F>(node: Node<'tree>, mut visit: F)
where
    F: FnMut(Node<'tree>),
{
    let mut cursor = node.walk();
    let mut stack: Vec<Node<'tree>> = node.named_children(&mut cursor).collect();
    stack.reverse();

    while let Some(current) = stack.pop() {
        visit(current);
        let children: Vec<_> = current.named_children(&mut cursor).collect();
        stack.extend(children.into_iter().rev());
    }
}
