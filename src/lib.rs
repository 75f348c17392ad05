//! CSS-in-JS Language Server Library
//!
//! Stylesheet language features for CSS-in-JS fragments: bare declarations and nested rules
//! written without an enclosing selector. Fragments are wrapped in a synthetic rule before
//! analysis and every result is translated back to the fragment's own coordinates.

pub mod config;
pub mod css;
pub mod error;
pub mod language;
pub mod logging;
pub mod lsp;
pub mod styled;
