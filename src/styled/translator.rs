//! Coordinate translation between caller space and wrapped space
//!
//! Forward mapping shifts caller coordinates into the wrapped document before a request
//! reaches the analyzer. Backward mapping shifts every coordinate inside an analyzer result
//! back out again. Each result type has its own backward routine here so that no
//! coordinate-bearing field is left in wrapped space.
//!
//! Wrapped coordinates fall into one of three regions: the synthetic prefix, the caller's
//! content, or the synthetic suffix. Results that only make sense inside the content
//! (symbols, locations, edits...) are dropped when they reach into the prefix or suffix.
//! Diagnostics are clamped instead, since a parse error the caller caused can surface on
//! the synthetic closing brace.

use std::collections::HashMap;
use tower_lsp::lsp_types::{
    ColorInformation, ColorPresentation, CompletionItem, CompletionList, CompletionTextEdit,
    Diagnostic, DocumentChangeOperation, DocumentChanges, DocumentHighlight, DocumentSymbol,
    FoldingRange, Hover, InsertReplaceEdit, Location, OneOf, Range, SelectionRange,
    TextDocumentEdit, TextEdit, Url, WorkspaceEdit,
};

use crate::styled::position::{CallerPosition, CallerRange, WrappedPosition, WrappedRange};

/// Where a wrapped coordinate lands relative to the caller's content
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Inside the synthetic prefix
    BeforeContent,
    /// Inside the caller's text
    Content(CallerPosition),
    /// Inside the synthetic suffix
    AfterContent,
}

/// Maps coordinates for one wrapped document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Translator {
    line_offset: u32,
    column_offset: u32,
    content_end: CallerPosition,
}

impl Translator {
    pub(crate) fn new(line_offset: u32, column_offset: u32, content_end: CallerPosition) -> Self {
        Self {
            line_offset,
            column_offset,
            content_end,
        }
    }

    /// Caller to wrapped. Positions past the end of the content are clamped to it.
    pub fn to_wrapped(&self, position: CallerPosition) -> WrappedPosition {
        let position = position.min(self.content_end);
        if position.line() == 0 {
            WrappedPosition::new(self.line_offset, position.character() + self.column_offset)
        } else {
            WrappedPosition::new(position.line() + self.line_offset, position.character())
        }
    }

    pub fn to_wrapped_range(&self, range: CallerRange) -> WrappedRange {
        WrappedRange {
            start: self.to_wrapped(range.start),
            end: self.to_wrapped(range.end),
        }
    }

    pub fn locate(&self, position: WrappedPosition) -> Placement {
        let line = position.line();
        let character = position.character();

        if line < self.line_offset {
            return Placement::BeforeContent;
        }

        let caller = if line == self.line_offset {
            if character < self.column_offset {
                return Placement::BeforeContent;
            }
            CallerPosition::new(0, character - self.column_offset)
        } else {
            CallerPosition::new(line - self.line_offset, character)
        };

        if caller > self.content_end {
            Placement::AfterContent
        } else {
            Placement::Content(caller)
        }
    }

    /// Wrapped to caller, `None` when the position is synthetic text
    pub fn to_caller(&self, position: WrappedPosition) -> Option<CallerPosition> {
        match self.locate(position) {
            Placement::Content(caller) => Some(caller),
            _ => None,
        }
    }

    /// Wrapped to caller, `None` unless both ends are inside the content
    pub fn to_caller_range(&self, range: WrappedRange) -> Option<CallerRange> {
        let start = self.to_caller(range.start)?;
        let end = self.to_caller(range.end)?;
        Some(CallerRange::new(start, end))
    }

    /// Wrapped to caller, trimming the parts that cover synthetic text
    ///
    /// `None` only when the whole range sits in the prefix.
    pub fn clamp_to_caller_range(&self, range: WrappedRange) -> Option<CallerRange> {
        let start = match self.locate(range.start) {
            Placement::BeforeContent => CallerPosition::new(0, 0),
            Placement::Content(caller) => caller,
            Placement::AfterContent => self.content_end,
        };
        let end = match self.locate(range.end) {
            Placement::BeforeContent => return None,
            Placement::Content(caller) => caller,
            Placement::AfterContent => self.content_end,
        };
        Some(CallerRange::new(start, end))
    }

    /// Wrapped line to caller line, `None` outside the content lines
    pub fn to_caller_line(&self, line: u32) -> Option<u32> {
        let caller = line.checked_sub(self.line_offset)?;
        (caller <= self.content_end.line()).then_some(caller)
    }

    fn range(&self, range: Range) -> Option<Range> {
        self.to_caller_range(WrappedRange::from_analyzer(range))
            .map(CallerRange::into_lsp)
    }

    fn text_edit(&self, edit: TextEdit) -> Option<TextEdit> {
        Some(TextEdit {
            range: self.range(edit.range)?,
            new_text: edit.new_text,
        })
    }

    /// Caller-space diagnostics
    pub fn diagnostics(&self, uri: &Url, diagnostics: Vec<Diagnostic>) -> Vec<Diagnostic> {
        diagnostics
            .into_iter()
            .filter_map(|mut diagnostic| {
                diagnostic.range = self
                    .clamp_to_caller_range(WrappedRange::from_analyzer(diagnostic.range))?
                    .into_lsp();
                diagnostic.related_information = diagnostic.related_information.map(|related| {
                    related
                        .into_iter()
                        .filter_map(|mut info| {
                            if &info.location.uri == uri {
                                info.location.range = self
                                    .clamp_to_caller_range(WrappedRange::from_analyzer(
                                        info.location.range,
                                    ))?
                                    .into_lsp();
                            }
                            Some(info)
                        })
                        .collect()
                });
                Some(diagnostic)
            })
            .collect()
    }

    pub fn completion_list(&self, mut list: CompletionList) -> CompletionList {
        list.items = std::mem::take(&mut list.items)
            .into_iter()
            .map(|item| self.completion_item(item))
            .collect();
        list
    }

    /// An item whose edit cannot be mapped keeps its text as a plain insertion
    fn completion_item(&self, mut item: CompletionItem) -> CompletionItem {
        match item.text_edit.take() {
            Some(CompletionTextEdit::Edit(edit)) => {
                let new_text = edit.new_text.clone();
                match self.text_edit(edit) {
                    Some(edit) => item.text_edit = Some(CompletionTextEdit::Edit(edit)),
                    None => {
                        item.insert_text.get_or_insert(new_text);
                    }
                }
            }
            Some(CompletionTextEdit::InsertAndReplace(edit)) => {
                match (self.range(edit.insert), self.range(edit.replace)) {
                    (Some(insert), Some(replace)) => {
                        item.text_edit =
                            Some(CompletionTextEdit::InsertAndReplace(InsertReplaceEdit {
                                new_text: edit.new_text,
                                insert,
                                replace,
                            }));
                    }
                    _ => {
                        item.insert_text.get_or_insert(edit.new_text);
                    }
                }
            }
            None => {}
        }

        item.additional_text_edits = item.additional_text_edits.map(|edits| {
            edits
                .into_iter()
                .filter_map(|edit| self.text_edit(edit))
                .collect()
        });

        item
    }

    pub fn hover(&self, hover: Hover) -> Hover {
        Hover {
            contents: hover.contents,
            range: hover.range.and_then(|range| self.range(range)),
        }
    }

    pub fn highlights(&self, highlights: Vec<DocumentHighlight>) -> Vec<DocumentHighlight> {
        highlights
            .into_iter()
            .filter_map(|highlight| {
                Some(DocumentHighlight {
                    range: self.range(highlight.range)?,
                    kind: highlight.kind,
                })
            })
            .collect()
    }

    /// Locations in `uri` are mapped, locations in other documents pass through
    pub fn location(&self, uri: &Url, location: Location) -> Option<Location> {
        if &location.uri != uri {
            return Some(location);
        }
        Some(Location {
            range: self.range(location.range)?,
            uri: location.uri,
        })
    }

    pub fn locations(&self, uri: &Url, locations: Vec<Location>) -> Vec<Location> {
        locations
            .into_iter()
            .filter_map(|location| self.location(uri, location))
            .collect()
    }

    pub fn workspace_edit(&self, uri: &Url, edit: WorkspaceEdit) -> WorkspaceEdit {
        let changes = edit.changes.map(|changes| {
            changes
                .into_iter()
                .map(|(target, edits)| {
                    let edits = if &target == uri {
                        edits.into_iter().filter_map(|e| self.text_edit(e)).collect()
                    } else {
                        edits
                    };
                    (target, edits)
                })
                .collect::<HashMap<_, _>>()
        });

        let document_changes = edit.document_changes.map(|document_changes| match document_changes {
            DocumentChanges::Edits(edits) => DocumentChanges::Edits(
                edits
                    .into_iter()
                    .map(|edit| self.text_document_edit(uri, edit))
                    .collect(),
            ),
            DocumentChanges::Operations(operations) => DocumentChanges::Operations(
                operations
                    .into_iter()
                    .map(|operation| match operation {
                        DocumentChangeOperation::Edit(edit) => {
                            DocumentChangeOperation::Edit(self.text_document_edit(uri, edit))
                        }
                        other => other,
                    })
                    .collect(),
            ),
        });

        WorkspaceEdit {
            changes,
            document_changes,
            change_annotations: edit.change_annotations,
        }
    }

    fn text_document_edit(&self, uri: &Url, edit: TextDocumentEdit) -> TextDocumentEdit {
        if &edit.text_document.uri != uri {
            return edit;
        }

        let edits = edit
            .edits
            .into_iter()
            .filter_map(|edit| match edit {
                OneOf::Left(edit) => self.text_edit(edit).map(OneOf::Left),
                OneOf::Right(mut annotated) => {
                    annotated.text_edit = self.text_edit(annotated.text_edit)?;
                    Some(OneOf::Right(annotated))
                }
            })
            .collect();

        TextDocumentEdit {
            text_document: edit.text_document,
            edits,
        }
    }

    /// Symbols outside the content are removed, their children take their place
    #[allow(deprecated)]
    pub fn document_symbols(&self, symbols: Vec<DocumentSymbol>) -> Vec<DocumentSymbol> {
        let mut mapped = Vec::new();

        for symbol in symbols {
            let children = symbol
                .children
                .map(|children| self.document_symbols(children));

            match (self.range(symbol.range), self.range(symbol.selection_range)) {
                (Some(range), Some(selection_range)) => mapped.push(DocumentSymbol {
                    name: symbol.name,
                    detail: symbol.detail,
                    kind: symbol.kind,
                    tags: symbol.tags,
                    deprecated: symbol.deprecated,
                    range,
                    selection_range,
                    children,
                }),
                _ => mapped.extend(children.unwrap_or_default()),
            }
        }

        mapped
    }

    pub fn colors(&self, colors: Vec<ColorInformation>) -> Vec<ColorInformation> {
        colors
            .into_iter()
            .filter_map(|info| {
                Some(ColorInformation {
                    range: self.range(info.range)?,
                    color: info.color,
                })
            })
            .collect()
    }

    pub fn color_presentations(
        &self,
        presentations: Vec<ColorPresentation>,
    ) -> Vec<ColorPresentation> {
        presentations
            .into_iter()
            .map(|presentation| ColorPresentation {
                label: presentation.label,
                text_edit: presentation.text_edit.and_then(|edit| self.text_edit(edit)),
                additional_text_edits: presentation.additional_text_edits.map(|edits| {
                    edits
                        .into_iter()
                        .filter_map(|edit| self.text_edit(edit))
                        .collect()
                }),
            })
            .collect()
    }

    /// Line-shifted folding ranges
    ///
    /// When the analyzer reports a start character, the start is checked as a position so a
    /// fold opened by the synthetic prefix is dropped even if it shares a line with content.
    pub fn folding_ranges(&self, ranges: Vec<FoldingRange>) -> Vec<FoldingRange> {
        ranges
            .into_iter()
            .filter_map(|mut range| {
                let (start_line, start_character) = match range.start_character {
                    Some(character) => {
                        let start =
                            self.to_caller(WrappedPosition::new(range.start_line, character))?;
                        (start.line(), Some(start.character()))
                    }
                    None => (self.to_caller_line(range.start_line)?, None),
                };
                let (end_line, end_character) = match range.end_character {
                    Some(character) => {
                        let end =
                            self.to_caller(WrappedPosition::new(range.end_line, character))?;
                        (end.line(), Some(end.character()))
                    }
                    None => (self.to_caller_line(range.end_line)?, None),
                };
                if end_line <= start_line {
                    return None;
                }

                range.start_line = start_line;
                range.start_character = start_character;
                range.end_line = end_line;
                range.end_character = end_character;
                Some(range)
            })
            .collect()
    }

    /// One selection range per requested position, with the parent chain cut where it
    /// leaves the content
    pub fn selection_ranges(
        &self,
        positions: &[CallerPosition],
        ranges: Vec<SelectionRange>,
    ) -> Vec<SelectionRange> {
        positions
            .iter()
            .zip(ranges)
            .map(|(position, range)| {
                self.selection_range(range).unwrap_or_else(|| SelectionRange {
                    range: CallerRange::new(*position, *position).into_lsp(),
                    parent: None,
                })
            })
            .collect()
    }

    fn selection_range(&self, range: SelectionRange) -> Option<SelectionRange> {
        let mapped = self.range(range.range)?;
        let parent = range
            .parent
            .and_then(|parent| self.selection_range(*parent))
            .map(Box::new);
        Some(SelectionRange {
            range: mapped,
            parent,
        })
    }
}
