//! Language features over styled fragments
//!
//! Every operation follows the same steps: wrap the snapshot, map input coordinates into
//! wrapped space, parse, run the analyzer, map the result back into caller space. Nothing is
//! cached between calls, so each request only ever sees the snapshot it was given.

use std::time::Instant;
use tower_lsp::lsp_types::{
    Color, ColorInformation, ColorPresentation, CompletionList, Diagnostic, DiagnosticSeverity,
    DocumentHighlight, DocumentSymbol, FoldingRange, Hover, Location, NumberOrString,
    SelectionRange, WorkspaceEdit,
};

use crate::css::analyzer::{FoldingOptions, StylesheetAnalyzer};
use crate::error::StyledResult;
use crate::language::document::DocumentSnapshot;
use crate::styled::position::{CallerPosition, CallerRange, WrappedPosition, WrappedRange};
use crate::styled::translator::Placement;
use crate::styled::wrapper::{WrapFormat, WrappedDocument};

/// Source of diagnostics raised by the wrapping itself
pub const WRAPPER_SOURCE: &str = "css-in-js";

fn stray_brace_diagnostic(brace: CallerPosition) -> Diagnostic {
    let end = CallerPosition::new(brace.line(), brace.character() + 1);
    Diagnostic {
        range: CallerRange::new(brace, end).into_lsp(),
        severity: Some(DiagnosticSeverity::ERROR),
        code: Some(NumberOrString::String("syntax-error".to_string())),
        source: Some(WRAPPER_SOURCE.to_string()),
        message: "Unexpected '}': no open block to close".to_string(),
        ..Default::default()
    }
}

/// Runs a stylesheet analyzer over CSS-in-JS fragments
pub struct StyledLanguageService<A> {
    analyzer: A,
    format: WrapFormat,
}

impl<A: StylesheetAnalyzer> StyledLanguageService<A> {
    pub fn new(analyzer: A) -> Self {
        Self::with_format(analyzer, WrapFormat::default())
    }

    pub fn with_format(analyzer: A, format: WrapFormat) -> Self {
        Self { analyzer, format }
    }

    pub fn analyzer(&self) -> &A {
        &self.analyzer
    }

    pub fn format(&self) -> &WrapFormat {
        &self.format
    }

    pub fn wrap(&self, snapshot: &DocumentSnapshot) -> WrappedDocument {
        WrappedDocument::new(&snapshot.uri, snapshot.version, &snapshot.text, &self.format)
    }

    /// Wrap and parse one snapshot
    pub fn parse(
        &self,
        snapshot: &DocumentSnapshot) -> StyledResult<(WrappedDocument,
        A::Stylesheet,
    )> {
        let start = Instant::now();
        let wrapped = self.wrap(snapshot);
        let stylesheet = self.analyzer.parse(wrapped.document())?;
        log::debug!(
            "Parsed {} (version {}) in {:?}",
            snapshot.uri,
            snapshot.version,
            start.elapsed()
        );
        Ok((wrapped, stylesheet))
    }

    pub fn validate(&self, snapshot: &DocumentSnapshot) -> StyledResult<Vec<Diagnostic>> {
        let (wrapped, stylesheet) = self.parse(snapshot)?;
        let translator = wrapped.translator();
        let mut diagnostics = self.analyzer.validate(wrapped.document(), &stylesheet);

        let Some(brace) = wrapped.stray_closing_brace() else {
            return Ok(translator.diagnostics(&snapshot.uri, diagnostics));
        };

        // The suffix is left without a rule to close, errors there are this brace's fault
        diagnostics.retain(|diagnostic| {
            translator.locate(WrappedPosition::from_analyzer(diagnostic.range.start))
                != Placement::AfterContent
        });
        let mut diagnostics = translator.diagnostics(&snapshot.uri, diagnostics);
        diagnostics.push(stray_brace_diagnostic(brace));
        diagnostics.sort_by_key(|diagnostic| diagnostic.range.start);
        Ok(diagnostics)
    }

    /// Nothing is offered for an empty document
    pub fn complete(
        &self,
        snapshot: &DocumentSnapshot,
        position: CallerPosition,
    ) -> StyledResult<CompletionList> {
        if snapshot.text.is_empty() {
            return Ok(CompletionList {
                is_incomplete: false,
                items: Vec::new(),
            });
        }

        let (wrapped, stylesheet) = self.parse(snapshot)?;
        let translator = wrapped.translator();
        let list = self.analyzer.complete(
            wrapped.document(),
            translator.to_wrapped(position).as_lsp(),
            &stylesheet,
        );
        Ok(translator.completion_list(list))
    }

    pub fn hover(
        &self,
        snapshot: &DocumentSnapshot,
        position: CallerPosition,
    ) -> StyledResult<Option<Hover>> {
        let (wrapped, stylesheet) = self.parse(snapshot)?;
        let translator = wrapped.translator();
        let hover = self.analyzer.hover(
            wrapped.document(),
            translator.to_wrapped(position).as_lsp(),
            &stylesheet,
        );
        Ok(hover.map(|hover| translator.hover(hover)))
    }

    pub fn document_highlights(
        &self,
        snapshot: &DocumentSnapshot,
        position: CallerPosition,
    ) -> StyledResult<Vec<DocumentHighlight>> {
        let (wrapped, stylesheet) = self.parse(snapshot)?;
        let translator = wrapped.translator();
        let highlights = self.analyzer.find_document_highlights(
            wrapped.document(),
            translator.to_wrapped(position).as_lsp(),
            &stylesheet,
        );
        Ok(translator.highlights(highlights))
    }

    pub fn definition(
        &self,
        snapshot: &DocumentSnapshot,
        position: CallerPosition,
    ) -> StyledResult<Option<Location>> {
        let (wrapped, stylesheet) = self.parse(snapshot)?;
        let translator = wrapped.translator();
        let location = self.analyzer.find_definition(
            wrapped.document(),
            translator.to_wrapped(position).as_lsp(),
            &stylesheet,
        );
        Ok(location.and_then(|location| translator.location(&snapshot.uri, location)))
    }

    pub fn references(
        &self,
        snapshot: &DocumentSnapshot,
        position: CallerPosition,
        include_declaration: bool,
    ) -> StyledResult<Vec<Location>> {
        let (wrapped, stylesheet) = self.parse(snapshot)?;
        let translator = wrapped.translator();
        let locations = self.analyzer.find_references(
            wrapped.document(),
            translator.to_wrapped(position).as_lsp(),
            include_declaration,
            &stylesheet,
        );
        Ok(translator.locations(&snapshot.uri, locations))
    }

    /// Caller range a rename at `position` would replace
    pub fn prepare_rename(
        &self,
        snapshot: &DocumentSnapshot,
        position: CallerPosition,
    ) -> StyledResult<Option<CallerRange>> {
        let (wrapped, stylesheet) = self.parse(snapshot)?;
        let translator = wrapped.translator();
        let range = self.analyzer.prepare_rename(
            wrapped.document(),
            translator.to_wrapped(position).as_lsp(),
            &stylesheet,
        );
        Ok(range.and_then(|range| translator.to_caller_range(WrappedRange::from_analyzer(range))))
    }

    pub fn rename(
        &self,
        snapshot: &DocumentSnapshot,
        position: CallerPosition,
        new_name: &str,
    ) -> StyledResult<Option<WorkspaceEdit>> {
        let (wrapped, stylesheet) = self.parse(snapshot)?;
        let translator = wrapped.translator();
        let edit = self.analyzer.rename(
            wrapped.document(),
            translator.to_wrapped(position).as_lsp(),
            new_name,
            &stylesheet,
        );
        Ok(edit.map(|edit| translator.workspace_edit(&snapshot.uri, edit)))
    }

    pub fn document_symbols(
        &self,
        snapshot: &DocumentSnapshot,
    ) -> StyledResult<Vec<DocumentSymbol>> {
        let (wrapped, stylesheet) = self.parse(snapshot)?;
        let symbols = self
            .analyzer
            .find_document_symbols(wrapped.document(), &stylesheet);
        Ok(wrapped.translator().document_symbols(symbols))
    }

    pub fn document_colors(
        &self,
        snapshot: &DocumentSnapshot,
    ) -> StyledResult<Vec<ColorInformation>> {
        let (wrapped, stylesheet) = self.parse(snapshot)?;
        let colors = self
            .analyzer
            .find_document_colors(wrapped.document(), &stylesheet);
        Ok(wrapped.translator().colors(colors))
    }

    pub fn color_presentations(
        &self,
        snapshot: &DocumentSnapshot,
        color: &Color,
        range: CallerRange,
    ) -> StyledResult<Vec<ColorPresentation>> {
        let (wrapped, stylesheet) = self.parse(snapshot)?;
        let translator = wrapped.translator();
        let presentations = self.analyzer.get_color_presentations(
            wrapped.document(),
            &stylesheet,
            color,
            translator.to_wrapped_range(range).as_lsp(),
        );
        Ok(translator.color_presentations(presentations))
    }

    /// The range limit counts ranges the caller actually receives
    pub fn folding_ranges(
        &self,
        snapshot: &DocumentSnapshot,
        options: &FoldingOptions,
    ) -> StyledResult<Vec<FoldingRange>> {
        let wrapped = self.wrap(snapshot);
        let ranges = self
            .analyzer
            .get_folding_ranges(wrapped.document(), &FoldingOptions { range_limit: None });

        let mut ranges = wrapped.translator().folding_ranges(ranges);
        if let Some(limit) = options.range_limit {
            ranges.truncate(limit);
        }
        Ok(ranges)
    }

    pub fn selection_ranges(
        &self,
        snapshot: &DocumentSnapshot,
        positions: &[CallerPosition],
    ) -> StyledResult<Vec<SelectionRange>> {
        let (wrapped, stylesheet) = self.parse(snapshot)?;
        let translator = wrapped.translator();
        let wrapped_positions: Vec<_> = positions
            .iter()
            .map(|position| translator.to_wrapped(*position).as_lsp())
            .collect();
        let ranges = self
            .analyzer
            .get_selection_ranges(wrapped.document(), &wrapped_positions, &stylesheet);
        Ok(translator.selection_ranges(positions, ranges))
    }
}
