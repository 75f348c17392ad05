//! Error types for the language service
//!
//! Malformed stylesheet text is never an error here: it becomes diagnostics. These errors
//! cover the analyzer failing to run at all.

use thiserror::Error;
use tower_lsp::lsp_types::Url;

/// Main error type for service operations
#[derive(Error, Debug)]
pub enum StyledError {
    /// Tree-sitter language setup errors
    #[error("Failed to set up tree-sitter language: {message}")]
    TreeSitterLanguage { message: String },

    /// The parser produced no tree (cancelled or timed out)
    #[error("Failed to parse {uri} at version {version}")]
    Parse { uri: Url, version: i32 },

    /// Settings sent by the client could not be read
    #[error("Invalid settings: {message}")]
    InvalidSettings {
        message: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Result type alias for service operations
pub type StyledResult<T> = Result<T, StyledError>;

impl From<tree_sitter::LanguageError> for StyledError {
    fn from(err: tree_sitter::LanguageError) -> Self {
        StyledError::TreeSitterLanguage {
            message: err.to_string(),
        }
    }
}
