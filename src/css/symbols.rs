//! Document symbols for stylesheets
//!
//! Rule sets become class symbols named after their selectors, custom property declarations
//! become variables, and at-rules become modules. Nested rules are reported as children.

use tower_lsp::lsp_types::{DocumentSymbol, Range, SymbolKind};
use tree_sitter::{Node, Tree};

use crate::language::tree_utils::{find_child_by_kind, node_text, node_to_range};

pub struct CssSymbolProvider;

impl CssSymbolProvider {
    pub fn new() -> Self {
        Self
    }

    pub fn document_symbols(&self, tree: &Tree, content: &str) -> Vec<DocumentSymbol> {
        self.symbols_in(tree.root_node(), content)
    }

    fn symbols_in(&self, node: Node, content: &str) -> Vec<DocumentSymbol> {
        let mut symbols = Vec::new();
        for i in 0..node.named_child_count() {
            let Some(child) = node.named_child(i) else {
                continue;
            };
            match self.symbol_for(child, content) {
                Some(symbol) => symbols.push(symbol),
                None if child.kind() != "declaration" => {
                    symbols.extend(self.symbols_in(child, content))
                }
                None => {}
            }
        }
        symbols
    }

    fn symbol_for(&self, node: Node, content: &str) -> Option<DocumentSymbol> {
        match node.kind() {
            "rule_set" => {
                let selectors = find_child_by_kind(node, "selectors")?;
                Some(self.symbol(
                    collapse_whitespace(node_text(selectors, content)),
                    SymbolKind::CLASS,
                    node_to_range(node, content),
                    node_to_range(selectors, content),
                    self.children(node, content),
                ))
            }
            "declaration" => {
                let property = node.child(0).filter(|child| child.kind() == "property_name")?;
                let name = node_text(property, content);
                if !name.starts_with("--") {
                    return None;
                }
                Some(self.symbol(
                    name.to_string(),
                    SymbolKind::VARIABLE,
                    node_to_range(node, content),
                    node_to_range(property, content),
                    Vec::new(),
                ))
            }
            "media_statement" | "supports_statement" | "keyframes_statement" | "at_rule"
            | "import_statement" | "charset_statement" | "namespace_statement" => {
                let kind = if node.kind() == "keyframes_statement" {
                    SymbolKind::FUNCTION
                } else {
                    SymbolKind::MODULE
                };
                Some(self.symbol(
                    at_rule_header(node, content),
                    kind,
                    node_to_range(node, content),
                    at_keyword_range(node, content),
                    self.children(node, content),
                ))
            }
            _ => None,
        }
    }

    fn children(&self, node: Node, content: &str) -> Vec<DocumentSymbol> {
        find_child_by_kind(node, "block")
            .map(|block| self.symbols_in(block, content))
            .unwrap_or_default()
    }

    #[allow(deprecated)]
    fn symbol(
        &self,
        name: String,
        kind: SymbolKind,
        range: Range,
        selection_range: Range,
        children: Vec<DocumentSymbol>,
    ) -> DocumentSymbol {
        DocumentSymbol {
            name,
            detail: None,
            kind,
            tags: None,
            deprecated: None,
            range,
            selection_range,
            children: if children.is_empty() { None } else { Some(children) },
        }
    }
}

impl Default for CssSymbolProvider {
    fn default() -> Self {
        Self::new()
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// At-rule text up to its block or terminating semicolon
fn at_rule_header(node: Node, content: &str) -> String {
    let text = node_text(node, content);
    let end = text.find(['{', ';']).unwrap_or(text.len());
    collapse_whitespace(&text[..end])
}

/// Range of the `@keyword` token
fn at_keyword_range(node: Node, content: &str) -> Range {
    let range = node_to_range(node, content);
    match node.child(0) {
        Some(keyword) if node_text(keyword, content).starts_with('@') => {
            node_to_range(keyword, content)
        }
        _ => range,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::css::parser::CssParser;
    use tower_lsp::lsp_types::Position;

    fn symbols_of(content: &str) -> Vec<DocumentSymbol> {
        let mut parser = CssParser::new().unwrap();
        let tree = parser.parse(content).unwrap();
        CssSymbolProvider::new().document_symbols(&tree, content)
    }

    #[test]
    fn test_rule_set_symbols() {
        let symbols = symbols_of(".a,\n.b { color: red; }\n#main { }");
        assert_eq!(symbols.len(), 2);
        assert_eq!(symbols[0].name, ".a, .b");
        assert_eq!(symbols[0].kind, SymbolKind::CLASS);
        assert_eq!(symbols[0].range.start, Position::new(0, 0));
        assert_eq!(symbols[1].name, "#main");
        assert!(symbols[0].children.is_none());
    }

    #[test]
    fn test_custom_properties_are_variables() {
        let symbols = symbols_of(":root { --accent: red; color: blue; }");
        assert_eq!(symbols.len(), 1);
        let children = symbols[0].children.as_ref().unwrap();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].name, "--accent");
        assert_eq!(children[0].kind, SymbolKind::VARIABLE);
    }

    #[test]
    fn test_nested_rules_become_children() {
        let symbols = symbols_of(":host {\n  div {\n    color: blue;\n  }\n}");
        assert_eq!(symbols.len(), 1);
        assert_eq!(symbols[0].name, ":host");
        let children = symbols[0].children.as_ref().unwrap();
        assert_eq!(children[0].name, "div");
        assert_eq!(children[0].range.start, Position::new(1, 2));
    }

    #[test]
    fn test_media_statement_symbol() {
        let symbols = symbols_of("@media screen {\n  a { color: red; }\n}");
        assert_eq!(symbols.len(), 1);
        assert_eq!(symbols[0].name, "@media screen");
        assert_eq!(symbols[0].kind, SymbolKind::MODULE);
        assert_eq!(symbols[0].children.as_ref().unwrap()[0].name, "a");
    }

    #[test]
    fn test_empty_document_has_no_symbols() {
        assert!(symbols_of("").is_empty());
    }
}
