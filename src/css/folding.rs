//! Folding ranges for stylesheets
//!
//! Every block folds from the line of its `{` to the line before its `}`, so the closing brace
//! stays visible. Multi-line comments fold as comments.

use tower_lsp::lsp_types::{FoldingRange, FoldingRangeKind};
use tree_sitter::{Node, Tree};

use crate::language::tree_utils::{byte_to_position, walk_tree};

pub struct CssFoldingProvider;

impl CssFoldingProvider {
    pub fn new() -> Self {
        Self
    }

    pub fn folding_ranges(&self, tree: &Tree, content: &str) -> Vec<FoldingRange> {
        let mut ranges = Vec::new();
        walk_tree(tree.root_node(), &mut |node| {
            let range = match node.kind() {
                "block" | "keyframe_block_list" => self.block_range(node, content),
                "comment" => self.comment_range(node, content),
                _ => None,
            };
            ranges.extend(range);
        });
        ranges
    }

    fn block_range(&self, node: Node, content: &str) -> Option<FoldingRange> {
        let open = byte_to_position(node.start_byte(), content);
        let close = byte_to_position(node.end_byte(), content);
        if close.line <= open.line + 1 {
            return None;
        }

        Some(FoldingRange {
            start_line: open.line,
            start_character: Some(open.character),
            end_line: close.line - 1,
            ..Default::default()
        })
    }

    fn comment_range(&self, node: Node, content: &str) -> Option<FoldingRange> {
        let start = byte_to_position(node.start_byte(), content);
        let end = byte_to_position(node.end_byte(), content);
        if end.line <= start.line {
            return None;
        }

        Some(FoldingRange {
            start_line: start.line,
            end_line: end.line,
            kind: Some(FoldingRangeKind::Comment),
            ..Default::default()
        })
    }
}

impl Default for CssFoldingProvider {
    fn default() -> Self {
        Self::new()
    }
}
