//! Go source parser for go-perf.
//!
//! This module provides a thin wrapper around tree-sitter's Go grammar,
//! turning its error-tolerant output into a strict success/failure signal.

use tree_sitter::{Parser, Tree};

/// Why a structural parse was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The Go grammar could not be loaded into the parser.
    Language(String),
    /// The parser produced no tree at all.
    NoTree,
    /// The tree contains error or missing nodes; the first is reported.
    Syntax { line: usize, column: usize },
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::Language(msg) => write!(f, "cannot load Go grammar: {}", msg),
            ParseError::NoTree => write!(f, "parser returned no tree"),
            ParseError::Syntax { line, column } => {
                write!(f, "syntax error at {}:{}", line, column)
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// Parse Go source into a syntax tree.
///
/// tree-sitter always recovers from syntax errors, so a tree that
/// contains any `ERROR` or missing node is treated as a failed parse.
pub fn parse_file(source: &str) -> Result<Tree, ParseError> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_go::language())
        .map_err(|e| ParseError::Language(e.to_string()))?;

    let tree = parser.parse(source, None).ok_or(ParseError::NoTree)?;

    let root = tree.root_node();
    if root.has_error() {
        let (line, column) = first_error_position(root).unwrap_or((1, 1));
        return Err(ParseError::Syntax { line, column });
    }

    Ok(tree)
}

/// Locate the first error or missing node in document order.
fn first_error_position(root: tree_sitter::Node<'_>) -> Option<(usize, usize)> {
    let mut cursor = root.walk();
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if node.is_error() || node.is_missing() {
            let pos = node.start_position();
            return Some((pos.row + 1, pos.column + 1));
        }
        if !node.has_error() {
            continue;
        }
        let children: Vec<_> = node.children(&mut cursor).collect();
        stack.extend(children.into_iter().rev());
    }
    None
}
