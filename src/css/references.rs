//! CSS symbol references
//!
//! Finds every occurrence of the symbol under the cursor. Two families of symbols are
//! tracked: custom properties (`--name` declarations and `var(--name)` uses) and class / id
//! selectors. Highlights, references, definitions and renames are all built from the same
//! occurrence list.

use std::collections::HashMap;
use tower_lsp::lsp_types::*;
use tree_sitter::{Node, Tree};

use crate::language::tree_utils::{
    find_child_by_kind, find_node_at_position, node_text, node_to_range, walk_tree,
};

/// A renameable symbol
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SymbolTarget {
    /// Custom property, stored with its leading `--`
    CustomProperty(String),
    /// Class selector name without the leading `.`
    Class(String),
    /// Id selector name without the leading `#`
    Id(String),
}

/// One occurrence of a symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occurrence {
    pub range: Range,
    /// A custom property declaration, as opposed to a `var()` use
    pub is_definition: bool,
}

/// Reference provider for custom properties and selectors
pub struct CssReferenceProvider;

impl CssReferenceProvider {
    pub fn new() -> Self {
        Self
    }

    /// Symbol under the cursor and the node naming it
    pub fn target_at<'a>(
        &self,
        tree: &'a Tree,
        content: &str,
        position: Position,
    ) -> Option<(SymbolTarget, Node<'a>)> {
        let node = find_node_at_position(tree.root_node(), content, position)?;
        self.target_of(node, content).map(|target| (target, node))
    }

    fn target_of(&self, node: Node, content: &str) -> Option<SymbolTarget> {
        let text = node_text(node, content);
        match node.kind() {
            "property_name" | "plain_value" if text.starts_with("--") => {
                Some(SymbolTarget::CustomProperty(text.to_string()))
            }
            "class_name" => Some(SymbolTarget::Class(text.to_string())),
            "identifier" if node.parent().map(|p| p.kind()) == Some("class_name") => {
                Some(SymbolTarget::Class(text.to_string()))
            }
            "id_name" => Some(SymbolTarget::Id(text.to_string())),
            _ => None,
        }
    }

    /// All occurrences of `target`, in document order
    pub fn occurrences(
        &self,
        tree: &Tree,
        content: &str,
        target: &SymbolTarget,
    ) -> Vec<Occurrence> {
        let mut occurrences = Vec::new();

        walk_tree(tree.root_node(), &mut |node| {
            let text = node_text(node, content);
            let occurrence = match (target, node.kind()) {
                (SymbolTarget::CustomProperty(name), "property_name") if text == name => {
                    Some(Occurrence {
                        range: node_to_range(node, content),
                        is_definition: true,
                    })
                }
                (SymbolTarget::CustomProperty(name), "plain_value") if text == name => {
                    Some(Occurrence {
                        range: node_to_range(node, content),
                        is_definition: false,
                    })
                }
                (SymbolTarget::Class(name), "class_name") => {
                    // Newer grammars nest the name in an identifier
                    let name_node = find_child_by_kind(node, "identifier").unwrap_or(node);
                    (node_text(name_node, content) == name).then(|| Occurrence {
                        range: node_to_range(name_node, content),
                        is_definition: false,
                    })
                }
                (SymbolTarget::Id(name), "id_name") if text == name => Some(Occurrence {
                    range: node_to_range(node, content),
                    is_definition: false,
                }),
                _ => None,
            };
            occurrences.extend(occurrence);
        });

        occurrences
    }

    pub fn document_highlights(
        &self,
        tree: &Tree,
        content: &str,
        position: Position,
    ) -> Vec<DocumentHighlight> {
        let Some((target, _)) = self.target_at(tree, content, position) else {
            return Vec::new();
        };

        let kind_of = |occurrence: &Occurrence| match target {
            SymbolTarget::CustomProperty(_) if occurrence.is_definition => {
                DocumentHighlightKind::WRITE
            }
            SymbolTarget::CustomProperty(_) => DocumentHighlightKind::READ,
            _ => DocumentHighlightKind::TEXT,
        };

        self.occurrences(tree, content, &target)
            .iter()
            .map(|occurrence| DocumentHighlight {
                range: occurrence.range,
                kind: Some(kind_of(occurrence)),
            })
            .collect()
    }

    /// Every occurrence of the symbol under the cursor, declarations only when asked for
    pub fn references(
        &self,
        tree: &Tree,
        content: &str,
        uri: &Url,
        position: Position,
        include_declaration: bool,
    ) -> Vec<Location> {
        let Some((target, _)) = self.target_at(tree, content, position) else {
            return Vec::new();
        };

        self.occurrences(tree, content, &target)
            .into_iter()
            .filter(|occurrence| include_declaration || !occurrence.is_definition)
            .map(|occurrence| Location {
                uri: uri.clone(),
                range: occurrence.range,
            })
            .collect()
    }

    /// Declaration of the custom property under the cursor
    pub fn definition(
        &self,
        tree: &Tree,
        content: &str,
        uri: &Url,
        position: Position,
    ) -> Option<Location> {
        let (target, _) = self.target_at(tree, content, position)?;
        if !matches!(target, SymbolTarget::CustomProperty(_)) {
            return None;
        }

        self.occurrences(tree, content, &target)
            .into_iter()
            .find(|occurrence| occurrence.is_definition)
            .map(|occurrence| Location {
                uri: uri.clone(),
                range: occurrence.range,
            })
    }

    /// Range of the symbol a rename at `position` would change
    pub fn prepare_rename(&self, tree: &Tree, content: &str, position: Position) -> Option<Range> {
        let (target, node) = self.target_at(tree, content, position)?;
        match target {
            SymbolTarget::Class(_) => {
                let name_node = find_child_by_kind(node, "identifier").unwrap_or(node);
                Some(node_to_range(name_node, content))
            }
            _ => Some(node_to_range(node, content)),
        }
    }

    /// Generate workspace edit for renaming the symbol under the cursor
    pub fn rename(
        &self,
        tree: &Tree,
        content: &str,
        uri: &Url,
        position: Position,
        new_name: &str,
    ) -> Option<WorkspaceEdit> {
        let (target, _) = self.target_at(tree, content, position)?;
        let new_text = match target {
            SymbolTarget::CustomProperty(_) if !new_name.starts_with("--") => {
                format!("--{}", new_name)
            }
            _ => new_name.to_string(),
        };

        let text_edits: Vec<TextEdit> = self
            .occurrences(tree, content, &target)
            .into_iter()
            .map(|occurrence| TextEdit {
                range: occurrence.range,
                new_text: new_text.clone(),
            })
            .collect();

        if text_edits.is_empty() {
            return None;
        }

        let mut changes = HashMap::new();
        changes.insert(uri.clone(), text_edits);

        Some(WorkspaceEdit {
            changes: Some(changes),
            document_changes: None,
            change_annotations: None,
        })
    }
}

impl Default for CssReferenceProvider {
    fn default() -> Self {
        Self::new()
    }
}
