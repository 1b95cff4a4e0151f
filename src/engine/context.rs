use tree_sitter::Node;

/// Context passed to structural rules during analysis
pub struct AnalysisContext<'a> {
    pub source: &'a str,
}

impl<'a> AnalysisContext<'a> {
    pub fn new(source: &'a str) -> Self {
        Self { source }
    }

    /// 1-based line on which a node starts
    pub fn line_of(&self, node: Node<'_>) -> usize {
        node.start_position().row + 1
    }

    /// Source text covered by a node
    pub fn text_of(&self, node: Node<'_>) -> &'a str {
        node.utf8_text(self.source.as_bytes()).unwrap_or("")
    }
}
