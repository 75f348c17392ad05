//! CSS Completion Provider
//!
//! Provides auto-completion for property names and property values.
//! The context is read from the text before the cursor rather than from the tree, since the
//! text being typed is usually not valid yet.

use std::collections::BTreeSet;
use tower_lsp::lsp_types::*;
use tree_sitter::Tree;

use crate::css::property_data::{find_property, global_keywords, PROPERTIES, NAMED_COLORS};
use crate::language::document::position_to_byte;
use crate::language::tree_utils::{node_text, walk_tree};

/// Context for completion
#[derive(Debug, Clone, PartialEq)]
pub(super) enum CompletionContext {
    /// Completing a property name at the start of a declaration
    Property,
    /// Completing property values after ':'
    PropertyValue { property_name: String },
    /// Completing the argument of `var(`
    VariableReference,
}

/// CSS completion provider
pub struct CssCompletionProvider;

impl CssCompletionProvider {
    /// Create a new CSS completion provider
    pub fn new() -> Self {
        Self
    }

    /// Provide completion items for the given position
    pub fn complete(&self, tree: &Tree, content: &str, position: Position) -> CompletionList {
        let cursor = position_to_byte(content, position);
        let word_start = word_start(content, cursor);
        let typed = &content[word_start..cursor];
        let replace = Range::new(
            Position::new(position.line, position.character - typed.chars().count() as u32),
            position,
        );

        let context = completion_context(content, word_start);
        log::debug!("Completion context: {:?}, typed '{}'", context, typed);

        let items = match context {
            CompletionContext::Property => self.complete_property_names(replace),
            CompletionContext::PropertyValue { property_name } => {
                self.complete_property_value(&property_name, tree, content, replace)
            }
            CompletionContext::VariableReference => custom_properties(tree, content)
                .into_iter()
                .map(|name| CompletionItem {
                    label: name.clone(),
                    kind: Some(CompletionItemKind::VARIABLE),
                    text_edit: Some(CompletionTextEdit::Edit(TextEdit {
                        range: replace,
                        new_text: name,
                    })),
                    ..Default::default()
                })
                .collect(),
        };

        CompletionList {
            is_incomplete: false,
            items,
        }
    }

    fn complete_property_names(&self, replace: Range) -> Vec<CompletionItem> {
        PROPERTIES
            .iter()
            .map(|property| CompletionItem {
                label: property.name.to_string(),
                kind: Some(CompletionItemKind::PROPERTY),
                documentation: Some(Documentation::String(property.description.to_string())),
                text_edit: Some(CompletionTextEdit::Edit(TextEdit {
                    range: replace,
                    new_text: format!("{}: ", property.name),
                })),
                // Re-trigger so values are offered right after the name is accepted
                command: Some(Command {
                    title: "Suggest values".to_string(),
                    command: "editor.action.triggerSuggest".to_string(),
                    arguments: None,
                }),
                ..Default::default()
            })
            .collect()
    }

    fn complete_property_value(
        &self,
        property_name: &str,
        tree: &Tree,
        content: &str,
        replace: Range,
    ) -> Vec<CompletionItem> {
        let value_item = |label: &str, kind: CompletionItemKind| CompletionItem {
            label: label.to_string(),
            kind: Some(kind),
            text_edit: Some(CompletionTextEdit::Edit(TextEdit {
                range: replace,
                new_text: label.to_string(),
            })),
            ..Default::default()
        };

        let mut items = Vec::new();
        let property = find_property(property_name);
        let is_custom = property_name.starts_with("--");

        if let Some(property) = property {
            items.extend(
                property
                    .keywords
                    .iter()
                    .map(|keyword| value_item(*keyword, CompletionItemKind::VALUE)),
            );
        }

        if property.map(|p| p.accepts_color).unwrap_or(is_custom) {
            items.extend(NAMED_COLORS.iter().map(|(name, (r, g, b))| CompletionItem {
                documentation: Some(Documentation::String(format!(
                    "#{:02x}{:02x}{:02x}",
                    r, g, b
                ))),
                ..value_item(*name, CompletionItemKind::COLOR)
            }));
        }

        items.extend(
            global_keywords()
                .iter()
                .map(|keyword| value_item(*keyword, CompletionItemKind::KEYWORD)),
        );

        items.extend(
            custom_properties(tree, content)
                .iter()
                .map(|name| value_item(&format!("var({})", name), CompletionItemKind::VARIABLE)),
        );

        items
    }
}

impl Default for CssCompletionProvider {
    fn default() -> Self {
        Self::new()
    }
}

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '-' || ch == '_'
}

/// Byte offset where the identifier ending at `cursor` starts
fn word_start(content: &str, cursor: usize) -> usize {
    content[..cursor]
        .char_indices()
        .rev()
        .take_while(|(_, ch)| is_word_char(*ch))
        .last()
        .map(|(i, _)| i)
        .unwrap_or(cursor)
}

/// Decide what is being typed from the text before the current word
pub(super) fn completion_context(content: &str, word_start: usize) -> CompletionContext {
    let before = &content[..word_start];

    if before.ends_with("var(") {
        return CompletionContext::VariableReference;
    }

    let boundary = before.rfind(|ch| matches!(ch, '{' | '}' | ';' | ':'));
    match boundary {
        Some(colon) if before[colon..].starts_with(':') => {
            let name_end = before[..colon].trim_end();
            let name_start = word_start_of(name_end);
            let property_name = &name_end[name_start..];
            if property_name.is_empty() {
                CompletionContext::Property
            } else {
                CompletionContext::PropertyValue {
                    property_name: property_name.to_ascii_lowercase(),
                }
            }
        }
        _ => CompletionContext::Property,
    }
}

fn word_start_of(text: &str) -> usize {
    word_start(text, text.len())
}

/// Custom property names (`--name`) declared anywhere in the document, sorted
pub(crate) fn custom_properties(tree: &Tree, content: &str) -> Vec<String> {
    let mut names = BTreeSet::new();
    walk_tree(tree.root_node(), &mut |node| {
        if node.kind() == "property_name" {
            let name = node_text(node, content);
            if name.starts_with("--") {
                names.insert(name.to_string());
            }
        }
    });
    names.into_iter().collect()
}
