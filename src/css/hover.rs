//! CSS Hover Provider
//!
//! Provides hover information for property names:
//! - descriptions of known properties
//! - the declared value of custom properties, both at the declaration and at `var()` uses

use tower_lsp::lsp_types::{Hover, HoverContents, MarkupContent, MarkupKind, Position};
use tree_sitter::{Node, Tree};

use crate::css::property_data::find_property;
use crate::language::tree_utils::{find_node_at_position, node_text, node_to_range, walk_tree};

/// Provides hover information for CSS properties
pub struct CssHoverProvider;

impl CssHoverProvider {
    /// Creates a new CSS hover provider
    pub fn new() -> Self {
        Self
    }

    /// Provides hover information for a position in CSS code
    pub fn hover(&self, tree: &Tree, content: &str, position: Position) -> Option<Hover> {
        let node = find_node_at_position(tree.root_node(), content, position)?;
        let name = node_text(node, content);

        match node.kind() {
            "property_name" if name.starts_with("--") => {
                self.custom_property_hover(tree, content, node, name)
            }
            "plain_value" if name.starts_with("--") => {
                self.custom_property_hover(tree, content, node, name)
            }
            "property_name" => {
                let property = find_property(name)?;
                Some(self.markdown(
                    format!("**{}**\n\n{}", property.name, property.description),
                    node,
                    content,
                ))
            }
            _ => None,
        }
    }

    fn custom_property_hover(
        &self,
        tree: &Tree,
        content: &str,
        node: Node,
        name: &str,
    ) -> Option<Hover> {
        let value = declared_value(tree, content, name)?;
        Some(self.markdown(
            format!("```css\n{}: {}\n```", name, value),
            node,
            content,
        ))
    }

    fn markdown(&self, value: String, node: Node, content: &str) -> Hover {
        Hover {
            contents: HoverContents::Markup(MarkupContent {
                kind: MarkupKind::Markdown,
                value,
            }),
            range: Some(node_to_range(node, content)),
        }
    }
}

impl Default for CssHoverProvider {
    fn default() -> Self {
        Self::new()
    }
}

/// Value text of the first declaration of `name`, without the trailing semicolon
fn declared_value(tree: &Tree, content: &str, name: &str) -> Option<String> {
    let mut value = None;
    walk_tree(tree.root_node(), &mut |node| {
        if value.is_some() || node.kind() != "declaration" {
            return;
        }
        let Some(property) = node.child(0) else { return };
        if property.kind() != "property_name" || node_text(property, content) != name {
            return;
        }

        let declaration = node_text(node, content);
        let start = property.end_byte() - node.start_byte();
        let text = declaration[start..]
            .trim_start()
            .trim_start_matches(':')
            .trim()
            .trim_end_matches(';')
            .trim();
        value = Some(text.to_string());
    });
    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::css::parser::CssParser;

    fn hover_at(content: &str, position: Position) -> Option<Hover> {
        let mut parser = CssParser::new().unwrap();
        let tree = parser.parse(content).unwrap();
        CssHoverProvider::new().hover(&tree, content, position)
    }

    fn markdown(hover: &Hover) -> &str {
        match &hover.contents {
            HoverContents::Markup(markup) => &markup.value,
            _ => panic!("expected markdown"),
        }
    }

    #[test]
    fn test_hover_on_known_property() {
        let hover = hover_at("a {\n  color: red;\n}", Position::new(1, 4)).unwrap();
        assert!(markdown(&hover).starts_with("**color**"));
        let range = hover.range.unwrap();
        assert_eq!(range.start, Position::new(1, 2));
        assert_eq!(range.end, Position::new(1, 7));
    }

    #[test]
    fn test_no_hover_on_unknown_property_or_value() {
        assert!(hover_at("a { colour: red; }", Position::new(0, 6)).is_none());
        assert!(hover_at("a { color: red; }", Position::new(0, 12)).is_none());
    }

    #[test]
    fn test_hover_on_custom_property_shows_value() {
        let hover = hover_at("a { --accent: #ff0000; }", Position::new(0, 6)).unwrap();
        assert!(markdown(&hover).contains("--accent: #ff0000"));
    }
}
