//! CSS Diagnostics
//!
//! Provides validation and error reporting for stylesheets.
//! Malformed input never fails here, it is reported as syntax errors.

use tower_lsp::lsp_types::*;
use tree_sitter::{Node, Tree};

use crate::css::color::Color;
use crate::css::property_data::{find_property, is_unchecked_property};
use crate::language::tree_utils::{node_text, node_to_range};

/// Source label attached to every diagnostic
pub const DIAGNOSTIC_SOURCE: &str = "css";

/// Lint rules that can be tuned by settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LintOptions {
    /// Severity for properties missing from the property table, `None` turns the check off
    pub unknown_properties: Option<DiagnosticSeverity>,
}

impl Default for LintOptions {
    fn default() -> Self {
        Self {
            unknown_properties: Some(DiagnosticSeverity::WARNING),
        }
    }
}

/// CSS diagnostic analyzer
pub struct CssDiagnostics {
    options: LintOptions,
}

impl CssDiagnostics {
    /// Create a new diagnostics analyzer
    pub fn new(options: LintOptions) -> Self {
        Self { options }
    }

    /// Analyze the syntax tree and generate diagnostics
    pub fn analyze(&self, tree: &Tree, content: &str) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        self.walk_node(tree.root_node(), content, &mut diagnostics);
        diagnostics
    }

    /// Recursively walk the syntax tree and validate nodes
    fn walk_node(&self, node: Node, content: &str, diagnostics: &mut Vec<Diagnostic>) {
        // Only report for ERROR nodes directly, not for nodes that contain errors
        if node.kind() == "ERROR" {
            self.add_syntax_error(node, content, diagnostics);
            return;
        }

        if node.is_missing() {
            diagnostics.push(Diagnostic {
                range: node_to_range(node, content),
                severity: Some(DiagnosticSeverity::ERROR),
                code: Some(NumberOrString::String("syntax-error".to_string())),
                source: Some(DIAGNOSTIC_SOURCE.to_string()),
                message: format!("'{}' expected", node.kind()),
                ..Default::default()
            });
            return;
        }

        let initial_diagnostic_count = diagnostics.len();

        for i in 0..node.child_count() {
            if let Some(child) = node.child(i) {
                self.walk_node(child, content, diagnostics);
            }
        }

        // A declaration that already has a syntax error inside is not linted further
        let child_diagnostics_added = diagnostics.len() > initial_diagnostic_count;

        match node.kind() {
            "declaration" if !child_diagnostics_added => {
                self.validate_declaration(node, content, diagnostics)
            }
            "color_value" => self.validate_color_value(node, content, diagnostics),
            _ => {}
        }
    }

    /// Add syntax error diagnostic
    fn add_syntax_error(&self, node: Node, content: &str, diagnostics: &mut Vec<Diagnostic>) {
        let range = self.single_line_range(node, content);
        let text = node_text(node, content);
        let text = text.lines().next().unwrap_or("").trim();

        diagnostics.push(Diagnostic {
            range,
            severity: Some(DiagnosticSeverity::ERROR),
            code: Some(NumberOrString::String("syntax-error".to_string())),
            source: Some(DIAGNOSTIC_SOURCE.to_string()),
            message: if text.is_empty() {
                "Syntax error".to_string()
            } else {
                format!("Syntax error: {}", text)
            },
            ..Default::default()
        });
    }

    /// Limit a node range to its first line
    fn single_line_range(&self, node: Node, content: &str) -> Range {
        let range = node_to_range(node, content);
        if range.end.line > range.start.line {
            Range {
                start: range.start,
                end: self.find_line_end_position(range.start.line, content),
            }
        } else {
            range
        }
    }

    /// Find the end position of a given line
    fn find_line_end_position(&self, line_number: u32, content: &str) -> Position {
        let line = content.split('\n').nth(line_number as usize).unwrap_or("");
        Position {
            line: line_number,
            character: line.trim_end_matches('\r').chars().count() as u32,
        }
    }

    /// Validate declaration (property-value pair)
    fn validate_declaration(&self, node: Node, content: &str, diagnostics: &mut Vec<Diagnostic>) {
        let Some(severity) = self.options.unknown_properties else {
            return;
        };
        let property_node = node.child(0).filter(|child| child.kind() == "property_name");
        let Some(property_node) = property_node else {
            return;
        };

        let property_name = node_text(property_node, content);
        if is_unchecked_property(property_name) || find_property(property_name).is_some() {
            return;
        }

        diagnostics.push(Diagnostic {
            range: node_to_range(property_node, content),
            severity: Some(severity),
            code: Some(NumberOrString::String("unknown-property".to_string())),
            source: Some(DIAGNOSTIC_SOURCE.to_string()),
            message: format!("Unknown property: '{}'", property_name),
            ..Default::default()
        });
    }

    fn validate_color_value(&self, node: Node, content: &str, diagnostics: &mut Vec<Diagnostic>) {
        let text = node_text(node, content);
        if Color::from_hex(text).is_none() {
            diagnostics.push(Diagnostic {
                range: node_to_range(node, content),
                severity: Some(DiagnosticSeverity::ERROR),
                code: Some(NumberOrString::String("invalid-color".to_string())),
                source: Some(DIAGNOSTIC_SOURCE.to_string()),
                message: format!("Invalid hex color: '{}'", text),
                ..Default::default()
            });
        }
    }
}

impl Default for CssDiagnostics {
    fn default() -> Self {
        Self::new(LintOptions::default())
    }
}
