//! Tests for the styled language service
//!
//! `EchoAnalyzer` reports fixed wrapped-space results and records the positions it receives,
//! which pins the translation behavior independently of the CSS analyzer.

use std::sync::{Arc, Mutex};
use tower_lsp::lsp_types::*;

use super::position::{CallerPosition, CallerRange};
use super::service::StyledLanguageService;
use super::wrapper::WrapFormat;
use crate::css::analyzer::{CssAnalyzer, FoldingOptions, StylesheetAnalyzer};
use crate::error::StyledResult;
use crate::language::document::{DocumentSnapshot, TextDocument};

const FRAGMENT: &str = "background: red;\n\ndiv {\n color: blue;\n}";

#[derive(Default)]
struct EchoAnalyzer {
    diagnostics: Vec<Diagnostic>,
    folding: Vec<FoldingRange>,
    seen: Mutex<Vec<Position>>,
}

impl EchoAnalyzer {
    fn record(&self, position: Position) {
        self.seen.lock().unwrap().push(position);
    }

    fn seen(&self) -> Vec<Position> {
        self.seen.lock().unwrap().clone()
    }
}

impl StylesheetAnalyzer for EchoAnalyzer {
    type Stylesheet = String;

    fn parse(&self, document: &TextDocument) -> StyledResult<String> {
        Ok(document.text().to_string())
    }

    fn validate(&self, _document: &TextDocument, stylesheet: &String) -> Vec<Diagnostic> {
        self.diagnostics
            .iter()
            .cloned()
            .map(|mut diagnostic| {
                diagnostic.message = stylesheet.clone();
                diagnostic
            })
            .collect()
    }

    fn complete(
        &self,
        _document: &TextDocument,
        position: Position,
        _stylesheet: &String,
    ) -> CompletionList {
        self.record(position);
        CompletionList {
            is_incomplete: false,
            items: vec![CompletionItem {
                label: "color".to_string(),
                text_edit: Some(CompletionTextEdit::Edit(TextEdit::new(
                    Range::new(position, position),
                    "color: ".to_string(),
                ))),
                ..Default::default()
            }],
        }
    }

    fn hover(
        &self,
        _document: &TextDocument,
        position: Position,
        _stylesheet: &String,
    ) -> Option<Hover> {
        self.record(position);
        Some(Hover {
            contents: HoverContents::Scalar(MarkedString::String("echo".to_string())),
            range: Some(Range::new(position, position)),
        })
    }

    fn find_definition(
        &self,
        document: &TextDocument,
        position: Position,
        _stylesheet: &String,
    ) -> Option<Location> {
        self.record(position);
        Some(Location::new(document.uri().clone(), Range::new(position, position)))
    }

    fn get_folding_ranges(
        &self,
        _document: &TextDocument,
        _options: &FoldingOptions,
    ) -> Vec<FoldingRange> {
        self.folding.clone()
    }
}

fn snapshot(text: &str) -> DocumentSnapshot {
    DocumentSnapshot::new(Url::parse("file:///src/Button.styles.ts").unwrap(), 1, text)
}

fn css_service() -> StyledLanguageService<CssAnalyzer> {
    StyledLanguageService::new(CssAnalyzer::default())
}

fn range(start: (u32, u32), end: (u32, u32)) -> Range {
    Range::new(Position::new(start.0, start.1), Position::new(end.0, end.1))
}

#[test]
fn test_diagnostic_offset_law() {
    let analyzer = EchoAnalyzer {
        diagnostics: vec![Diagnostic {
            range: range((3, 0), (3, 5)),
            ..Default::default()
        }],
        ..Default::default()
    };
    let service = StyledLanguageService::new(analyzer);

    let diagnostics = service.validate(&snapshot(FRAGMENT)).unwrap();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].range, range((2, 0), (2, 5)));
}

#[test]
fn test_positions_reach_the_analyzer_in_wrapped_space() {
    let service = StyledLanguageService::new(EchoAnalyzer::default());
    let position = CallerPosition::new(0, 4);

    let list = service.complete(&snapshot(FRAGMENT), position).unwrap();
    let hover = service.hover(&snapshot(FRAGMENT), position).unwrap().unwrap();
    let definition = service.definition(&snapshot(FRAGMENT), position).unwrap().unwrap();

    assert_eq!(service.analyzer().seen(), vec![Position::new(1, 4); 3]);
    match &list.items[0].text_edit {
        Some(CompletionTextEdit::Edit(edit)) => assert_eq!(edit.range, range((0, 4), (0, 4))),
        other => panic!("expected a mapped edit, got {:?}", other),
    }
    assert_eq!(hover.range, Some(range((0, 4), (0, 4))));
    assert_eq!(definition.range, range((0, 4), (0, 4)));
}

#[test]
fn test_same_line_prefix_shifts_first_line_columns() {
    let service =
        StyledLanguageService::with_format(EchoAnalyzer::default(), WrapFormat::new(":host { "));

    let hover = service
        .hover(&snapshot(FRAGMENT), CallerPosition::new(0, 2))
        .unwrap()
        .unwrap();
    service.hover(&snapshot(FRAGMENT), CallerPosition::new(3, 2)).unwrap();

    assert_eq!(
        service.analyzer().seen(),
        vec![Position::new(0, 10), Position::new(3, 2)]
    );
    assert_eq!(hover.range, Some(range((0, 2), (0, 2))));
}

#[test]
fn test_folding_range_line_law() {
    let analyzer = EchoAnalyzer {
        folding: vec![
            FoldingRange {
                start_line: 0,
                start_character: Some(6),
                end_line: 5,
                ..Default::default()
            },
            FoldingRange {
                start_line: 3,
                end_line: 4,
                ..Default::default()
            },
        ],
        ..Default::default()
    };
    let service = StyledLanguageService::new(analyzer);

    let folds = service
        .folding_ranges(&snapshot(FRAGMENT), &FoldingOptions::default())
        .unwrap();
    assert_eq!(folds.len(), 1);
    assert_eq!((folds[0].start_line, folds[0].end_line), (2, 3));
}

#[test]
fn test_concurrent_requests_see_their_own_snapshot() {
    let analyzer = EchoAnalyzer {
        diagnostics: vec![Diagnostic {
            range: range((1, 0), (1, 1)),
            ..Default::default()
        }],
        ..Default::default()
    };
    let service = Arc::new(StyledLanguageService::new(analyzer));
    let uri = Url::parse("file:///src/Button.styles.ts").unwrap();

    std::thread::scope(|scope| {
        for version in 1..=8 {
            let service = Arc::clone(&service);
            let uri = uri.clone();
            scope.spawn(move || {
                let text = format!("width: {}px;", version);
                let snapshot = DocumentSnapshot::new(uri, version, text.as_str());
                for _ in 0..20 {
                    let diagnostics = service.validate(&snapshot).unwrap();
                    assert_eq!(diagnostics[0].message, format!(":host {{\n{}\n}}", text));
                }
            });
        }
    });
}

#[test]
fn test_concurrent_css_validation_versions() {
    let service = Arc::new(css_service());
    let uri = Url::parse("file:///src/Button.styles.ts").unwrap();
    let broken = DocumentSnapshot::new(uri.clone(), 1, "colr: red;");
    let fixed = DocumentSnapshot::new(uri, 2, "color: red;");

    std::thread::scope(|scope| {
        let first = scope.spawn(|| service.validate(&broken).unwrap());
        let second = scope.spawn(|| service.validate(&fixed).unwrap());
        assert_eq!(first.join().unwrap().len(), 1);
        assert!(second.join().unwrap().is_empty());
    });
}

#[test]
fn test_empty_document() {
    let service = css_service();
    let empty = snapshot("");

    assert!(service.validate(&empty).unwrap().is_empty());
    assert!(service.document_symbols(&empty).unwrap().is_empty());
    assert!(service.document_colors(&empty).unwrap().is_empty());
    assert!(service
        .folding_ranges(&empty, &FoldingOptions::default())
        .unwrap()
        .is_empty());
    let list = service.complete(&empty, CallerPosition::new(0, 0)).unwrap();
    assert!(list.items.is_empty());
    assert!(!list.is_incomplete);
    assert!(service.hover(&empty, CallerPosition::new(0, 0)).unwrap().is_none());
}

#[test]
fn test_css_fragment_validates_cleanly() {
    let service = css_service();
    assert!(service.validate(&snapshot(FRAGMENT)).unwrap().is_empty());
}

#[test]
fn test_css_unknown_property_in_caller_space() {
    let service = css_service();
    let diagnostics = service.validate(&snapshot("color: red;\ncolr: blue;")).unwrap();

    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].range, range((1, 0), (1, 4)));
}

#[test]
fn test_css_unclosed_rule_is_reported_inside_content() {
    let service = css_service();
    let text = "color: red;\ndiv {";
    let diagnostics = service.validate(&snapshot(text)).unwrap();

    assert!(!diagnostics.is_empty());
    let content_end = Position::new(1, 5);
    assert!(diagnostics.iter().all(|d| d.range.end <= content_end));
}

#[test]
fn test_css_stray_brace_is_reported_where_it_is() {
    let service = css_service();
    let text = "color: red;\n}\nmargin: 0;";
    let diagnostics = service.validate(&snapshot(text)).unwrap();

    let brace = diagnostics
        .iter()
        .find(|d| d.range == range((1, 0), (1, 1)))
        .expect("brace diagnostic");
    assert_eq!(brace.severity, Some(DiagnosticSeverity::ERROR));
    assert!(diagnostics.iter().all(|d| d.range.start != Position::new(2, 10)));
}

#[test]
fn test_css_symbols_and_folding() {
    let service = css_service();

    let symbols = service.document_symbols(&snapshot(FRAGMENT)).unwrap();
    assert_eq!(symbols.len(), 1);
    assert_eq!(symbols[0].name, "div");
    assert_eq!(symbols[0].range, range((2, 0), (4, 1)));

    let folds = service
        .folding_ranges(&snapshot(FRAGMENT), &FoldingOptions::default())
        .unwrap();
    assert_eq!(folds.len(), 1);
    assert_eq!((folds[0].start_line, folds[0].end_line), (2, 3));
}

#[test]
fn test_css_folding_range_limit_counts_caller_ranges() {
    let service = css_service();
    let text = "a {\n  color: red;\n}\nb {\n  color: blue;\n}";
    let folds = service
        .folding_ranges(&snapshot(text), &FoldingOptions { range_limit: Some(1) })
        .unwrap();

    assert_eq!(folds.len(), 1);
    assert_eq!(folds[0].start_line, 0);
}

#[test]
fn test_css_colors_in_caller_space() {
    let service = css_service();
    let colors = service.document_colors(&snapshot(FRAGMENT)).unwrap();

    let ranges: Vec<_> = colors.iter().map(|c| c.range).collect();
    assert_eq!(ranges, vec![range((0, 12), (0, 15)), range((3, 8), (3, 12))]);

    let presentations = service
        .color_presentations(
            &snapshot(FRAGMENT),
            &colors[0].color,
            CallerRange::from_lsp(colors[0].range),
        )
        .unwrap();
    assert_eq!(presentations[0].label, "#ff0000");
    assert_eq!(
        presentations[0].text_edit.as_ref().map(|e| e.range),
        Some(range((0, 12), (0, 15)))
    );
}

#[test]
fn test_css_hover_and_completion_in_caller_space() {
    let service = css_service();

    let hover = service
        .hover(&snapshot(FRAGMENT), CallerPosition::new(3, 3))
        .unwrap()
        .unwrap();
    assert_eq!(hover.range, Some(range((3, 1), (3, 6))));

    let list = service
        .complete(&snapshot("colo"), CallerPosition::new(0, 4))
        .unwrap();
    let color = list.items.iter().find(|item| item.label == "color").unwrap();
    match &color.text_edit {
        Some(CompletionTextEdit::Edit(edit)) => assert_eq!(edit.range, range((0, 0), (0, 4))),
        other => panic!("expected a mapped edit, got {:?}", other),
    }
}

#[test]
fn test_css_rename_and_references_in_caller_space() {
    let service = css_service();
    let text = "--accent: red;\ncolor: var(--accent);";

    let references = service
        .references(&snapshot(text), CallerPosition::new(1, 13), true)
        .unwrap();
    let ranges: Vec<_> = references.iter().map(|l| l.range).collect();
    assert_eq!(ranges, vec![range((0, 0), (0, 8)), range((1, 11), (1, 19))]);

    let highlights = service
        .document_highlights(&snapshot(text), CallerPosition::new(0, 3))
        .unwrap();
    assert_eq!(highlights.len(), 2);

    let definition = service
        .definition(&snapshot(text), CallerPosition::new(1, 13))
        .unwrap()
        .unwrap();
    assert_eq!(definition.range, range((0, 0), (0, 8)));

    let prepared = service
        .prepare_rename(&snapshot(text), CallerPosition::new(0, 3))
        .unwrap()
        .unwrap();
    assert_eq!(prepared.into_lsp(), range((0, 0), (0, 8)));

    let edit = service
        .rename(&snapshot(text), CallerPosition::new(0, 3), "--primary")
        .unwrap()
        .unwrap();
    let changes = edit.changes.unwrap();
    let edits = changes.values().next().unwrap();
    assert_eq!(edits.len(), 2);
    assert_eq!(edits[1].range, range((1, 11), (1, 19)));
}

#[test]
fn test_css_references_without_declarations() {
    let service = css_service();
    let text = "--gap: 1px;\ndiv {\n  --gap: 2px;\n  margin: var(--gap);\n}";

    let all = service
        .references(&snapshot(text), CallerPosition::new(3, 16), true)
        .unwrap();
    let ranges: Vec<_> = all.iter().map(|l| l.range).collect();
    assert_eq!(
        ranges,
        vec![range((0, 0), (0, 5)), range((2, 2), (2, 7)), range((3, 14), (3, 19))]
    );

    let uses = service
        .references(&snapshot(text), CallerPosition::new(3, 16), false)
        .unwrap();
    let ranges: Vec<_> = uses.iter().map(|l| l.range).collect();
    assert_eq!(ranges, vec![range((3, 14), (3, 19))]);
}

#[test]
fn test_css_selection_ranges_stay_in_content() {
    let service = css_service();
    let positions = [CallerPosition::new(3, 9), CallerPosition::new(0, 0)];
    let ranges = service.selection_ranges(&snapshot(FRAGMENT), &positions).unwrap();

    assert_eq!(ranges.len(), 2);
    let mut current = Some(&ranges[0]);
    while let Some(selection) = current {
        assert!(selection.range.end <= Position::new(4, 1));
        current = selection.parent.as_deref();
    }
}
