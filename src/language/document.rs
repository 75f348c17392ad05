use std::sync::Arc;
use tower_lsp::lsp_types::{Position, Range, TextDocumentContentChangeEvent, Url};

/// A read-only text document: identity, version and content
///
/// This is the shape the analyzer consumes. For a wrapped document, the text is the
/// wrapped text and positions refer to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextDocument {
    uri: Url,
    version: i32,
    text: String,
}

impl TextDocument {
    pub fn new(uri: Url, version: i32, text: String) -> Self {
        Self { uri, version, text }
    }

    pub fn uri(&self) -> &Url {
        &self.uri
    }

    pub fn version(&self) -> i32 {
        self.version
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Immutable snapshot of a document as the client last reported it
///
/// Cloning is cheap, so every request can hold its own snapshot while edits keep arriving.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentSnapshot {
    pub uri: Url,
    pub version: i32,
    pub text: Arc<str>,
}

impl DocumentSnapshot {
    pub fn new(uri: Url, version: i32, text: impl Into<Arc<str>>) -> Self {
        Self {
            uri,
            version,
            text: text.into(),
        }
    }

    /// A new snapshot with the client's changes applied in order
    pub fn apply_changes(
        &self,
        changes: Vec<TextDocumentContentChangeEvent>,
        version: i32,
    ) -> Self {
        let mut text = self.text.to_string();

        for change in changes {
            match change.range {
                Some(range) => {
                    let start_byte = position_to_byte(&text, range.start);
                    let end_byte = position_to_byte(&text, range.end).max(start_byte);
                    text.replace_range(start_byte..end_byte, &change.text);
                }
                // Full document change
                None => text = change.text,
            }
        }

        Self::new(self.uri.clone(), version, text)
    }
}

/// Convert LSP position to byte offset, clamping past-the-end positions
pub(crate) fn position_to_byte(content: &str, position: Position) -> usize {
    let mut line_start_byte = 0;
    for _ in 0..position.line {
        match content[line_start_byte..].find('\n') {
            Some(newline) => line_start_byte += newline + 1,
            None => return content.len(),
        }
    }

    let line_end_byte = content[line_start_byte..]
        .find('\n')
        .map(|newline| line_start_byte + newline)
        .unwrap_or(content.len());
    let line_content = &content[line_start_byte..line_end_byte];

    // Convert character position to byte position within the line
    line_content
        .char_indices()
        .nth(position.character as usize)
        .map(|(byte_offset, _)| line_start_byte + byte_offset)
        .unwrap_or(line_end_byte)
}
