//! CSS Color Provider Module
//!
//! Provides color information so the editor can show color decorations and pickers.

use tower_lsp::lsp_types::{Color as LspColor, ColorInformation, ColorPresentation, Range, TextEdit};
use tree_sitter::{Node, Tree};

use crate::css::color::Color;
use crate::css::property_data::named_color;
use crate::language::tree_utils::{find_child_by_kind, node_text, node_to_range};

/// CSS color information provider
pub struct CssColorProvider;

impl CssColorProvider {
    /// Create a new CSS color provider
    pub fn new() -> Self {
        Self
    }

    /// Extract color information from a CSS document
    pub fn provide_document_colors(&self, tree: &Tree, content: &str) -> Vec<ColorInformation> {
        let mut colors = Vec::new();
        self.walk_node_for_colors(tree.root_node(), content, &mut colors);
        colors
    }

    /// Recursively walk the syntax tree to find color values
    fn walk_node_for_colors(&self, node: Node, content: &str, colors: &mut Vec<ColorInformation>) {
        match node.kind() {
            "color_value" | "plain_value" | "call_expression" if self.is_in_value(node) => {
                if let Some(color) = self.extract_color(node, content) {
                    colors.push(ColorInformation {
                        range: node_to_range(node, content),
                        color: color.to_lsp(),
                    });
                    return;
                }
            }
            _ => {}
        }

        for i in 0..node.child_count() {
            if let Some(child) = node.child(i) {
                self.walk_node_for_colors(child, content, colors);
            }
        }
    }

    /// Colors only appear in declaration values, never in selectors or property names
    fn is_in_value(&self, node: Node) -> bool {
        let mut current = node.parent();
        while let Some(parent) = current {
            match parent.kind() {
                "declaration" => return true,
                "selectors" | "rule_set" | "block" => return false,
                _ => current = parent.parent(),
            }
        }
        false
    }

    fn extract_color(&self, node: Node, content: &str) -> Option<Color> {
        if node.has_error() {
            return None;
        }

        let text = node_text(node, content);
        match node.kind() {
            "color_value" => Color::from_hex(text),
            "plain_value" => named_color(text).map(|(r, g, b)| Color::new_rgb(r, g, b)),
            "call_expression" => {
                let name = find_child_by_kind(node, "function_name")?;
                let arguments = find_child_by_kind(node, "arguments")?;
                Color::from_function(node_text(name, content), node_text(arguments, content))
            }
            _ => None,
        }
    }

    /// Provide color presentations for a given color
    pub fn provide_color_presentations(
        &self,
        color: &LspColor,
        range: Range,
    ) -> Vec<ColorPresentation> {
        let color = Color::from_lsp(color);
        let opaque = color.a == 1.0;

        let hex = if opaque { color.to_hex() } else { color.to_hex_with_alpha() };
        let (h, s, l) = color.to_hsl();
        let hsl = if opaque {
            format!("hsl({}, {}%, {}%)", h, s, l)
        } else {
            format!("hsla({}, {}%, {}%, {})", h, s, l, color.a)
        };

        [hex, color.to_string(), hsl]
            .into_iter()
            .map(|label| ColorPresentation {
                text_edit: Some(TextEdit {
                    range,
                    new_text: label.clone(),
                }),
                label,
                additional_text_edits: None,
            })
            .collect()
    }
}

impl Default for CssColorProvider {
    fn default() -> Self {
        Self::new()
    }
}
