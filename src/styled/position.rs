//! Tagged coordinate types
//!
//! Every position flowing through the service lives in exactly one of two spaces:
//! - caller space, matching the document exactly as the editor presents it
//! - wrapped space, matching the synthetic stylesheet handed to the analyzer
//!
//! Both wrap a plain LSP [`Position`], but they are distinct types so a caller
//! coordinate can never reach the analyzer (or the other way around) without going
//! through [`crate::styled::translator::Translator`]. Caller coordinates can be built
//! by anyone. Wrapped coordinates can only be built inside this crate.

use std::fmt;
use tower_lsp::lsp_types::{Position, Range};

/// A zero-based line/character position in the caller's document
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct CallerPosition(Position);

impl CallerPosition {
    pub fn new(line: u32, character: u32) -> Self {
        Self(Position::new(line, character))
    }

    pub fn from_lsp(position: Position) -> Self {
        Self(position)
    }

    pub fn line(&self) -> u32 {
        self.0.line
    }

    pub fn character(&self) -> u32 {
        self.0.character
    }

    pub fn into_lsp(self) -> Position {
        self.0
    }
}

impl fmt::Display for CallerPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.0.line, self.0.character)
    }
}

/// A half-open range in the caller's document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallerRange {
    pub start: CallerPosition,
    pub end: CallerPosition,
}

impl CallerRange {
    pub fn new(start: CallerPosition, end: CallerPosition) -> Self {
        Self { start, end }
    }

    pub fn from_lsp(range: Range) -> Self {
        Self {
            start: CallerPosition::from_lsp(range.start),
            end: CallerPosition::from_lsp(range.end),
        }
    }

    pub fn into_lsp(self) -> Range {
        Range::new(self.start.into_lsp(), self.end.into_lsp())
    }
}

/// A zero-based line/character position in the wrapped document
///
/// Only the translator creates these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct WrappedPosition(Position);

impl WrappedPosition {
    pub(crate) fn new(line: u32, character: u32) -> Self {
        Self(Position::new(line, character))
    }

    /// Tags a position reported by the analyzer
    pub(crate) fn from_analyzer(position: Position) -> Self {
        Self(position)
    }

    pub fn line(&self) -> u32 {
        self.0.line
    }

    pub fn character(&self) -> u32 {
        self.0.character
    }

    /// The plain position to hand to the analyzer
    pub fn as_lsp(&self) -> Position {
        self.0
    }
}

impl fmt::Display for WrappedPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "wrapped {}:{}", self.0.line, self.0.character)
    }
}

/// A half-open range in the wrapped document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WrappedRange {
    pub start: WrappedPosition,
    pub end: WrappedPosition,
}

impl WrappedRange {
    pub(crate) fn from_analyzer(range: Range) -> Self {
        Self {
            start: WrappedPosition::from_analyzer(range.start),
            end: WrappedPosition::from_analyzer(range.end),
        }
    }

    pub fn as_lsp(&self) -> Range {
        Range::new(self.start.as_lsp(), self.end.as_lsp())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_caller_position_round_trips_through_lsp() {
        let lsp = Position::new(4, 7);
        let caller = CallerPosition::from_lsp(lsp);
        assert_eq!(caller.line(), 4);
        assert_eq!(caller.character(), 7);
        assert_eq!(caller.into_lsp(), lsp);
    }

    #[test]
    fn test_positions_order_by_line_then_character() {
        assert!(CallerPosition::new(0, 10) < CallerPosition::new(1, 0));
        assert!(CallerPosition::new(2, 3) < CallerPosition::new(2, 4));
        assert!(WrappedPosition::new(1, 9) < WrappedPosition::new(2, 0));
    }

    #[test]
    fn test_display_marks_the_space() {
        assert_eq!(CallerPosition::new(3, 1).to_string(), "3:1");
        assert_eq!(WrappedPosition::new(3, 1).to_string(), "wrapped 3:1");
    }
}
