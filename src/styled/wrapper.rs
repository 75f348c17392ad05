//! Document wrapping
//!
//! CSS-in-JS fragments are bare declarations (`color: red;`) and nested rules with no
//! enclosing selector. A stylesheet grammar rejects that at the top level, so every
//! fragment is bracketed in a synthetic rule before it reaches the analyzer:
//!
//! ```text
//! :host {
//! <caller text, byte for byte>
//! }
//! ```
//!
//! Wrapping is unconditional. Text that is already a valid stylesheet still gets the
//! synthetic rule, the nested rules inside it parse fine.

use tower_lsp::lsp_types::Url;

use crate::language::document::TextDocument;
use crate::styled::position::CallerPosition;
use crate::styled::translator::Translator;

/// Opening text of the default synthetic rule
pub const DEFAULT_PREFIX: &str = ":host {\n";

/// Closing text of every synthetic rule, always on its own line
pub const WRAP_SUFFIX: &str = "\n}";

/// Describes the synthetic text placed around caller content
///
/// The translation arithmetic is derived from the prefix, so a prefix that ends in a
/// newline only shifts lines, while a prefix that shares its last line with the caller's
/// first line also shifts columns on that line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrapFormat {
    prefix: String,
    line_offset: u32,
    first_line_column_offset: u32,
}

impl WrapFormat {
    pub fn new(prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        let line_offset = prefix.matches('\n').count() as u32;
        let last_line = prefix.rsplit('\n').next().unwrap_or("");
        let first_line_column_offset = last_line.chars().count() as u32;

        Self {
            prefix,
            line_offset,
            first_line_column_offset,
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn suffix(&self) -> &str {
        WRAP_SUFFIX
    }

    /// Lines inserted before the caller's first line
    pub fn line_offset(&self) -> u32 {
        self.line_offset
    }

    /// Columns inserted before the caller's first character on caller line 0
    pub fn first_line_column_offset(&self) -> u32 {
        self.first_line_column_offset
    }
}

impl Default for WrapFormat {
    fn default() -> Self {
        Self::new(DEFAULT_PREFIX)
    }
}

/// A caller snapshot bracketed in the synthetic rule
///
/// Built fresh for every request and dropped when the request finishes.
#[derive(Debug, Clone)]
pub struct WrappedDocument {
    document: TextDocument,
    format: WrapFormat,
    content_end: CallerPosition,
}

impl WrappedDocument {
    /// Wrap `raw` (the caller's text for `uri` at `version`)
    pub fn new(uri: &Url, version: i32, raw: &str, format: &WrapFormat) -> Self {
        let mut text =
            String::with_capacity(format.prefix().len() + raw.len() + format.suffix().len());
        text.push_str(format.prefix());
        text.push_str(raw);
        text.push_str(format.suffix());

        Self {
            document: TextDocument::new(uri.clone(), version, text),
            format: format.clone(),
            content_end: end_of(raw),
        }
    }

    /// The wrapped text as a document the analyzer can consume
    pub fn document(&self) -> &TextDocument {
        &self.document
    }

    pub fn text(&self) -> &str {
        self.document.text()
    }

    pub fn format(&self) -> &WrapFormat {
        &self.format
    }

    /// Position just past the caller's last character
    pub fn content_end(&self) -> CallerPosition {
        self.content_end
    }

    /// The caller's text, sliced back out of the wrapped text
    pub fn content(&self) -> &str {
        let text = self.document.text();
        &text[self.format.prefix().len()..text.len() - self.format.suffix().len()]
    }

    /// A caller `}` that would close the synthetic rule early
    ///
    /// Everything after it parses outside the rule, so errors the analyzer reports there
    /// belong to this brace rather than to the synthetic suffix.
    pub fn stray_closing_brace(&self) -> Option<CallerPosition> {
        unmatched_closing_brace(self.content())
    }

    /// Coordinate translator for this wrapping
    pub fn translator(&self) -> Translator {
        Translator::new(
            self.format.line_offset(),
            self.format.first_line_column_offset(),
            self.content_end,
        )
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Scan {
    Code,
    Comment,
    Quoted(char),
}

/// First `}` in `text` with no matching `{`, skipping comments and strings
fn unmatched_closing_brace(text: &str) -> Option<CallerPosition> {
    let mut scan = Scan::Code;
    let mut depth = 0u32;
    let mut prev = '\0';
    let (mut line, mut character) = (0u32, 0u32);

    for ch in text.chars() {
        let at = CallerPosition::new(line, character);
        if ch == '\n' {
            line += 1;
            character = 0;
        } else {
            character += 1;
        }

        match scan {
            Scan::Code => match ch {
                '*' if prev == '/' => {
                    scan = Scan::Comment;
                    // the opening `*` cannot also close the comment
                    prev = '\0';
                    continue;
                }
                '"' | '\'' => scan = Scan::Quoted(ch),
                '{' => depth += 1,
                '}' if depth == 0 => return Some(at),
                '}' => depth -= 1,
                _ => {}
            },
            Scan::Comment => {
                if ch == '/' && prev == '*' {
                    scan = Scan::Code;
                }
            }
            Scan::Quoted(quote) => {
                if (ch == quote && prev != '\\') || ch == '\n' {
                    scan = Scan::Code;
                }
            }
        }
        prev = ch;
    }

    None
}

fn end_of(text: &str) -> CallerPosition {
    let mut line = 0;
    let mut character = 0;

    for ch in text.chars() {
        if ch == '\n' {
            line += 1;
            character = 0;
        } else {
            character += 1;
        }
    }

    CallerPosition::new(line, character)
}
