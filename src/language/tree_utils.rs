use tower_lsp::lsp_types::{Position, Range};
use tree_sitter::Node;

use crate::language::document::position_to_byte;

/// Convert tree-sitter node to LSP range
pub(crate) fn node_to_range(node: Node, content: &str) -> Range {
    let start_position = byte_to_position(node.start_byte(), content);
    let end_position = byte_to_position(node.end_byte(), content);

    Range {
        start: start_position,
        end: end_position,
    }
}

/// Convert byte offset to LSP position
pub(crate) fn byte_to_position(byte_offset: usize, content: &str) -> Position {
    let mut line = 0;
    let mut character = 0;

    for (i, ch) in content.char_indices() {
        if i >= byte_offset {
            break;
        }

        if ch == '\n' {
            line += 1;
            character = 0;
        } else {
            character += 1;
        }
    }

    Position {
        line: line as u32,
        character: character as u32,
    }
}

/// Text of a node, empty if the node is out of bounds
pub(crate) fn node_text<'a>(node: Node, content: &'a str) -> &'a str {
    node.utf8_text(content.as_bytes()).unwrap_or("")
}

/// Deepest named node covering the position
///
/// A position right after a token (the usual cursor spot while typing) resolves to that
/// token rather than to whatever follows it.
pub(crate) fn find_node_at_position<'a>(
    root: Node<'a>,
    content: &str,
    position: Position,
) -> Option<Node<'a>> {
    let byte = position_to_byte(content, position);
    let node = root.named_descendant_for_byte_range(byte, byte)?;

    if byte > 0 && (node.start_byte() == byte || !is_word_like(node.kind())) {
        if let Some(before) = root.named_descendant_for_byte_range(byte - 1, byte - 1) {
            if before.end_byte() == byte && is_word_like(before.kind()) {
                return Some(before);
            }
        }
    }

    Some(node)
}

fn is_word_like(kind: &str) -> bool {
    matches!(
        kind,
        "property_name"
            | "plain_value"
            | "identifier"
            | "class_name"
            | "id_name"
            | "tag_name"
            | "color_value"
            | "function_name"
    )
}

/// Helper function to find a direct child by its kind
pub(crate) fn find_child_by_kind<'a>(node: Node<'a>, kind: &str) -> Option<Node<'a>> {
    let mut cursor = node.walk();
    let found = node.children(&mut cursor).find(|child| child.kind() == kind);
    found
}

/// Visit every node depth-first, parents before children
pub(crate) fn walk_tree<'a>(node: Node<'a>, visit: &mut impl FnMut(Node<'a>)) {
    visit(node);
    for i in 0..node.child_count() {
        if let Some(child) = node.child(i) {
            walk_tree(child, visit);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::css::parser::CssParser;

    #[test]
    fn test_byte_to_position_counts_characters() {
        let content = "a { content: 'é'; }\nb";
        assert_eq!(byte_to_position(0, content), Position::new(0, 0));
        assert_eq!(byte_to_position(16, content), Position::new(0, 15));
        assert_eq!(byte_to_position(content.len(), content), Position::new(1, 1));
    }

    #[test]
    fn test_node_at_cursor_after_word() {
        let content = "a { color: red; }";
        let mut parser = CssParser::new().unwrap();
        let tree = parser.parse(content).unwrap();

        let inside = find_node_at_position(tree.root_node(), content, Position::new(0, 6)).unwrap();
        assert_eq!(inside.kind(), "property_name");

        // Cursor right after "red", before ';'
        let after = find_node_at_position(tree.root_node(), content, Position::new(0, 14)).unwrap();
        assert_eq!(node_text(after, content), "red");
    }
}
