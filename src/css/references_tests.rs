//! Tests for custom property and selector references

use super::parser::CssParser;
use super::references::{CssReferenceProvider, SymbolTarget};
use tower_lsp::lsp_types::{DocumentHighlightKind, Position, Range, Url};
use tree_sitter::Tree;

const CUSTOM_PROPERTIES: &str = "a { --accent: red; }\nb { color: var(--accent); }";
const SELECTORS: &str = ".btn { }\n.btn:hover { }\ndiv .btn { }\n#main { }\n#main > a { }";

fn parse(content: &str) -> Tree {
    let mut parser = CssParser::new().unwrap();
    parser.parse(content).unwrap()
}

fn uri() -> Url {
    Url::parse("file:///test/button.styled.ts").unwrap()
}

#[test]
fn test_target_detection() {
    let provider = CssReferenceProvider::new();
    let tree = parse(CUSTOM_PROPERTIES);
    let (target, _) = provider
        .target_at(&tree, CUSTOM_PROPERTIES, Position::new(1, 18))
        .unwrap();
    assert_eq!(target, SymbolTarget::CustomProperty("--accent".to_string()));

    let tree = parse(SELECTORS);
    let (target, _) = provider.target_at(&tree, SELECTORS, Position::new(0, 2)).unwrap();
    assert_eq!(target, SymbolTarget::Class("btn".to_string()));
    let (target, _) = provider.target_at(&tree, SELECTORS, Position::new(3, 2)).unwrap();
    assert_eq!(target, SymbolTarget::Id("main".to_string()));
}

#[test]
fn test_custom_property_highlights() {
    let tree = parse(CUSTOM_PROPERTIES);
    let highlights =
        CssReferenceProvider::new().document_highlights(
            &tree,
            CUSTOM_PROPERTIES,
            Position::new(0, 6),
        );

    assert_eq!(highlights.len(), 2);
    assert_eq!(highlights[0].kind, Some(DocumentHighlightKind::WRITE));
    assert_eq!(highlights[0].range, Range::new(Position::new(0, 4), Position::new(0, 12)));
    assert_eq!(highlights[1].kind, Some(DocumentHighlightKind::READ));
    assert_eq!(highlights[1].range, Range::new(Position::new(1, 15), Position::new(1, 23)));
}

#[test]
fn test_definition_from_var_use() {
    let tree = parse(CUSTOM_PROPERTIES);
    let location = CssReferenceProvider::new()
        .definition(&tree, CUSTOM_PROPERTIES, &uri(), Position::new(1, 18))
        .unwrap();

    assert_eq!(location.uri, uri());
    assert_eq!(location.range, Range::new(Position::new(0, 4), Position::new(0, 12)));
}

#[test]
fn test_selectors_have_no_definition() {
    let tree = parse(SELECTORS);
    let location =
        CssReferenceProvider::new().definition(&tree, SELECTORS, &uri(), Position::new(0, 2));
    assert!(location.is_none());
}

#[test]
fn test_class_references() {
    let tree = parse(SELECTORS);
    let references = CssReferenceProvider::new().references(
        &tree,
        SELECTORS,
        &uri(),
        Position::new(2, 6),
        true,
    );

    assert_eq!(references.len(), 3);
    assert_eq!(references[0].range, Range::new(Position::new(0, 1), Position::new(0, 4)));
    assert_eq!(references[1].range.start, Position::new(1, 1));
    assert_eq!(references[2].range.start, Position::new(2, 5));
}

#[test]
fn test_references_skip_every_declaration_when_asked() {
    let content = "a { --gap: 1px; }\nb { --gap: 2px; margin: var(--gap); }";
    let tree = parse(content);
    let provider = CssReferenceProvider::new();
    let cursor = Position::new(1, 30);

    assert_eq!(provider.references(&tree, content, &uri(), cursor, true).len(), 3);

    let uses = provider.references(&tree, content, &uri(), cursor, false);
    assert_eq!(uses.len(), 1);
    assert_eq!(uses[0].range, Range::new(Position::new(1, 28), Position::new(1, 33)));
}

#[test]
fn test_id_references() {
    let tree = parse(SELECTORS);
    let references = CssReferenceProvider::new().references(
        &tree,
        SELECTORS,
        &uri(),
        Position::new(4, 3),
        true,
    );
    assert_eq!(references.len(), 2);
}

#[test]
fn test_rename_class() {
    let tree = parse(SELECTORS);
    let edit = CssReferenceProvider::new()
        .rename(&tree, SELECTORS, &uri(), Position::new(0, 2), "button")
        .unwrap();

    let edits = &edit.changes.unwrap()[&uri()];
    assert_eq!(edits.len(), 3);
    assert!(edits.iter().all(|e| e.new_text == "button"));
}

#[test]
fn test_rename_custom_property_keeps_dashes() {
    let tree = parse(CUSTOM_PROPERTIES);
    let edit = CssReferenceProvider::new()
        .rename(&tree, CUSTOM_PROPERTIES, &uri(), Position::new(0, 6), "primary")
        .unwrap();

    let edits = &edit.changes.unwrap()[&uri()];
    assert_eq!(edits.len(), 2);
    assert!(edits.iter().all(|e| e.new_text == "--primary"));
}

#[test]
fn test_prepare_rename_range() {
    let tree = parse(SELECTORS);
    let range = CssReferenceProvider::new()
        .prepare_rename(&tree, SELECTORS, Position::new(3, 3))
        .unwrap();
    assert_eq!(range, Range::new(Position::new(3, 1), Position::new(3, 5)));
}

#[test]
fn test_plain_properties_are_not_renameable() {
    let provider = CssReferenceProvider::new();
    let tree = parse(CUSTOM_PROPERTIES);
    assert!(provider
        .document_highlights(&tree, CUSTOM_PROPERTIES, Position::new(1, 6))
        .is_empty());
    assert!(provider
        .rename(&tree, CUSTOM_PROPERTIES, &uri(), Position::new(1, 6), "x")
        .is_none());
}
