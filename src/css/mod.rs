//! CSS analyzer
//!
//! A stylesheet language service built on tree-sitter-css:
//! - diagnostics for syntax errors, unknown properties and malformed colors
//! - completion, hover and color information for declarations
//! - symbols, references and renames for custom properties and selectors
//! - folding and selection ranges

pub mod analyzer;
pub mod color;
pub mod color_provider;
pub mod completion;
pub mod diagnostics;
pub mod folding;
pub mod hover;
pub mod parser;
pub mod property_data;
pub mod references;
pub mod selection;
pub mod symbols;

#[cfg(test)]
mod references_tests;
