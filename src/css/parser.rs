//! tree-sitter-css front end. Wrapped fragments are plain CSS, so the stock grammar is enough.

use tree_sitter::{Parser, Tree};

use crate::error::StyledResult;

/// Owns a tree-sitter parser configured for CSS
pub struct CssParser {
    parser: Parser,
}

impl CssParser {
    /// Create a new CSS parser
    pub fn new() -> StyledResult<Self> {
        let mut parser = Parser::new();
        parser.set_language(&tree_sitter_css::LANGUAGE.into())?;

        Ok(Self { parser })
    }

    /// Full parse; fragments are small, so no incremental reuse
    pub fn parse(&mut self, content: &str) -> Option<Tree> {
        self.parser.parse(content, None)
    }
}
