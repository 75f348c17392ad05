//! The stylesheet analyzer boundary
//!
//! `StylesheetAnalyzer` is everything the styled-fragment service needs from a stylesheet
//! language service. Every position crossing this boundary is in the coordinate space of the
//! document handed to the analyzer. `CssAnalyzer` is the tree-sitter backed implementation.

use tower_lsp::lsp_types::{
    Color, ColorInformation, ColorPresentation, CompletionList, Diagnostic, DocumentHighlight,
    DocumentSymbol, FoldingRange, Hover, Location, Position, Range, SelectionRange, WorkspaceEdit,
};
use tree_sitter::Tree;

use crate::css::color_provider::CssColorProvider;
use crate::css::completion::CssCompletionProvider;
use crate::css::diagnostics::{CssDiagnostics, LintOptions};
use crate::css::folding::CssFoldingProvider;
use crate::css::hover::CssHoverProvider;
use crate::css::parser::CssParser;
use crate::css::references::CssReferenceProvider;
use crate::css::selection::CssSelectionProvider;
use crate::css::symbols::CssSymbolProvider;
use crate::error::{StyledError, StyledResult};
use crate::language::document::TextDocument;

/// Options for folding range computation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FoldingOptions {
    /// Maximum number of ranges the client wants
    pub range_limit: Option<usize>,
}

/// A stylesheet language service
///
/// Malformed input is reported through `validate`, never as an error from `parse`. Absence of a
/// result is an empty list or `None`.
pub trait StylesheetAnalyzer: Send + Sync {
    /// Parsed form of one document version
    type Stylesheet;

    fn parse(&self, document: &TextDocument) -> StyledResult<Self::Stylesheet>;

    fn validate(&self, document: &TextDocument, stylesheet: &Self::Stylesheet) -> Vec<Diagnostic>;

    fn complete(
        &self,
        document: &TextDocument,
        position: Position,
        stylesheet: &Self::Stylesheet,
    ) -> CompletionList {
        let _ = (document, position, stylesheet);
        CompletionList {
            is_incomplete: false,
            items: Vec::new(),
        }
    }

    fn hover(
        &self,
        document: &TextDocument,
        position: Position,
        stylesheet: &Self::Stylesheet,
    ) -> Option<Hover> {
        let _ = (document, position, stylesheet);
        None
    }

    fn find_document_highlights(
        &self,
        document: &TextDocument,
        position: Position,
        stylesheet: &Self::Stylesheet,
    ) -> Vec<DocumentHighlight> {
        let _ = (document, position, stylesheet);
        Vec::new()
    }

    fn find_definition(
        &self,
        document: &TextDocument,
        position: Position,
        stylesheet: &Self::Stylesheet,
    ) -> Option<Location> {
        let _ = (document, position, stylesheet);
        None
    }

    /// Declarations are left out unless `include_declaration` is set
    fn find_references(
        &self,
        document: &TextDocument,
        position: Position,
        include_declaration: bool,
        stylesheet: &Self::Stylesheet,
    ) -> Vec<Location> {
        let _ = (document, position, include_declaration, stylesheet);
        Vec::new()
    }

    fn prepare_rename(
        &self,
        document: &TextDocument,
        position: Position,
        stylesheet: &Self::Stylesheet,
    ) -> Option<Range> {
        let _ = (document, position, stylesheet);
        None
    }

    fn rename(
        &self,
        document: &TextDocument,
        position: Position,
        new_name: &str,
        stylesheet: &Self::Stylesheet,
    ) -> Option<WorkspaceEdit> {
        let _ = (document, position, new_name, stylesheet);
        None
    }

    fn find_document_symbols(
        &self,
        document: &TextDocument,
        stylesheet: &Self::Stylesheet,
    ) -> Vec<DocumentSymbol> {
        let _ = (document, stylesheet);
        Vec::new()
    }

    fn find_document_colors(
        &self,
        document: &TextDocument,
        stylesheet: &Self::Stylesheet,
    ) -> Vec<ColorInformation> {
        let _ = (document, stylesheet);
        Vec::new()
    }

    fn get_color_presentations(
        &self,
        document: &TextDocument,
        stylesheet: &Self::Stylesheet,
        color: &Color,
        range: Range,
    ) -> Vec<ColorPresentation> {
        let _ = (document, stylesheet, color, range);
        Vec::new()
    }

    /// Folding works from the text alone, the analyzer parses as it needs
    fn get_folding_ranges(
        &self,
        document: &TextDocument,
        options: &FoldingOptions,
    ) -> Vec<FoldingRange> {
        let _ = (document, options);
        Vec::new()
    }

    /// One result per position, in order
    fn get_selection_ranges(
        &self,
        document: &TextDocument,
        positions: &[Position],
        stylesheet: &Self::Stylesheet,
    ) -> Vec<SelectionRange> {
        let _ = (document, stylesheet);
        positions
            .iter()
            .map(|position| SelectionRange {
                range: Range::new(*position, *position),
                parent: None,
            })
            .collect()
    }
}

/// Parsed CSS document
pub struct CssStylesheet {
    tree: Tree,
}

impl CssStylesheet {
    pub fn tree(&self) -> &Tree {
        &self.tree
    }
}

/// Tree-sitter backed CSS analyzer
pub struct CssAnalyzer {
    diagnostics: CssDiagnostics,
    completion: CssCompletionProvider,
    hover: CssHoverProvider,
    references: CssReferenceProvider,
    symbols: CssSymbolProvider,
    colors: CssColorProvider,
    folding: CssFoldingProvider,
    selection: CssSelectionProvider,
}

impl CssAnalyzer {
    pub fn new(lint: LintOptions) -> Self {
        Self {
            diagnostics: CssDiagnostics::new(lint),
            completion: CssCompletionProvider::new(),
            hover: CssHoverProvider::new(),
            references: CssReferenceProvider::new(),
            symbols: CssSymbolProvider::new(),
            colors: CssColorProvider::new(),
            folding: CssFoldingProvider::new(),
            selection: CssSelectionProvider::new(),
        }
    }
}

impl Default for CssAnalyzer {
    fn default() -> Self {
        Self::new(LintOptions::default())
    }
}

impl StylesheetAnalyzer for CssAnalyzer {
    type Stylesheet = CssStylesheet;

    fn parse(&self, document: &TextDocument) -> StyledResult<CssStylesheet> {
        // Parsers are not shared so concurrent requests never touch the same one
        let mut parser = CssParser::new()?;
        let tree = parser.parse(document.text()).ok_or_else(|| StyledError::Parse {
            uri: document.uri().clone(),
            version: document.version(),
        })?;
        Ok(CssStylesheet { tree })
    }

    fn validate(&self, document: &TextDocument, stylesheet: &CssStylesheet) -> Vec<Diagnostic> {
        self.diagnostics.analyze(&stylesheet.tree, document.text())
    }

    fn complete(
        &self,
        document: &TextDocument,
        position: Position,
        stylesheet: &CssStylesheet,
    ) -> CompletionList {
        self.completion.complete(&stylesheet.tree, document.text(), position)
    }

    fn hover(
        &self,
        document: &TextDocument,
        position: Position,
        stylesheet: &CssStylesheet,
    ) -> Option<Hover> {
        self.hover.hover(&stylesheet.tree, document.text(), position)
    }

    fn find_document_highlights(
        &self,
        document: &TextDocument,
        position: Position,
        stylesheet: &CssStylesheet,
    ) -> Vec<DocumentHighlight> {
        self.references
            .document_highlights(&stylesheet.tree, document.text(), position)
    }

    fn find_definition(
        &self,
        document: &TextDocument,
        position: Position,
        stylesheet: &CssStylesheet,
    ) -> Option<Location> {
        self.references
            .definition(&stylesheet.tree, document.text(), document.uri(), position)
    }

    fn find_references(
        &self,
        document: &TextDocument,
        position: Position,
        include_declaration: bool,
        stylesheet: &CssStylesheet,
    ) -> Vec<Location> {
        self.references.references(
            &stylesheet.tree,
            document.text(),
            document.uri(),
            position,
            include_declaration,
        )
    }

    fn prepare_rename(
        &self,
        document: &TextDocument,
        position: Position,
        stylesheet: &CssStylesheet,
    ) -> Option<Range> {
        self.references
            .prepare_rename(&stylesheet.tree, document.text(), position)
    }

    fn rename(
        &self,
        document: &TextDocument,
        position: Position,
        new_name: &str,
        stylesheet: &CssStylesheet,
    ) -> Option<WorkspaceEdit> {
        self.references
            .rename(&stylesheet.tree, document.text(), document.uri(), position, new_name)
    }

    fn find_document_symbols(
        &self,
        document: &TextDocument,
        stylesheet: &CssStylesheet,
    ) -> Vec<DocumentSymbol> {
        self.symbols.document_symbols(&stylesheet.tree, document.text())
    }

    fn find_document_colors(
        &self,
        document: &TextDocument,
        stylesheet: &CssStylesheet,
    ) -> Vec<ColorInformation> {
        self.colors
            .provide_document_colors(&stylesheet.tree, document.text())
    }

    fn get_color_presentations(
        &self,
        _document: &TextDocument,
        _stylesheet: &CssStylesheet,
        color: &Color,
        range: Range,
    ) -> Vec<ColorPresentation> {
        self.colors.provide_color_presentations(color, range)
    }

    fn get_folding_ranges(
        &self,
        document: &TextDocument,
        options: &FoldingOptions,
    ) -> Vec<FoldingRange> {
        let stylesheet = match self.parse(document) {
            Ok(stylesheet) => stylesheet,
            Err(e) => {
                log::warn!("Folding skipped for {}: {}", document.uri(), e);
                return Vec::new();
            }
        };

        let mut ranges = self.folding.folding_ranges(&stylesheet.tree, document.text());
        if let Some(limit) = options.range_limit {
            ranges.truncate(limit);
        }
        ranges
    }

    fn get_selection_ranges(
        &self,
        document: &TextDocument,
        positions: &[Position],
        stylesheet: &CssStylesheet,
    ) -> Vec<SelectionRange> {
        self.selection
            .selection_ranges(&stylesheet.tree, document.text(), positions)
    }
}
