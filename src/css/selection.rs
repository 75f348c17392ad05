//! Selection ranges for stylesheets
//!
//! Expands from the token under each position outwards through its enclosing syntax nodes.

use tower_lsp::lsp_types::{Position, Range, SelectionRange};
use tree_sitter::Tree;

use crate::language::document::position_to_byte;
use crate::language::tree_utils::node_to_range;

pub struct CssSelectionProvider;

impl CssSelectionProvider {
    pub fn new() -> Self {
        Self
    }

    /// One selection range chain per position, in the same order
    pub fn selection_ranges(
        &self,
        tree: &Tree,
        content: &str,
        positions: &[Position],
    ) -> Vec<SelectionRange> {
        positions
            .iter()
            .map(|position| self.selection_range(tree, content, *position))
            .collect()
    }

    fn selection_range(&self, tree: &Tree, content: &str, position: Position) -> SelectionRange {
        let byte = position_to_byte(content, position);

        // Innermost first, duplicates of the same extent collapsed
        let mut ranges: Vec<Range> = Vec::new();
        let mut current = tree.root_node().descendant_for_byte_range(byte, byte);
        while let Some(node) = current {
            let range = node_to_range(node, content);
            if ranges.last() != Some(&range) {
                ranges.push(range);
            }
            current = node.parent();
        }

        if ranges.is_empty() {
            ranges.push(Range::new(position, position));
        }

        ranges
            .into_iter()
            .rev()
            .fold(None, |parent, range| {
                Some(SelectionRange {
                    range,
                    parent: parent.map(Box::new),
                })
            })
            .unwrap_or(SelectionRange {
                range: Range::new(position, position),
                parent: None,
            })
    }
}

impl Default for CssSelectionProvider {
    fn default() -> Self {
        Self::new()
    }
}
