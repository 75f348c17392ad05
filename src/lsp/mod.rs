//! Language Server Protocol host
//!
//! Document lifecycle, marker publication, debounced validation and the lifecycle of the
//! analysis service, wired into a tower-lsp server.

pub mod document_manager;
pub mod host;
pub mod server;
pub mod validation;
pub mod worker;
