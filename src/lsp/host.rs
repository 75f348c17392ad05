//! Marker publication
//!
//! The only thing validation needs from the editor is a place to put markers. Any LSP client
//! satisfies this through `textDocument/publishDiagnostics`.

use tower_lsp::Client;
use tower_lsp::lsp_types::{Diagnostic, Url};

#[tower_lsp::async_trait]
pub trait MarkerHost: Send + Sync + 'static {
    /// Replace the markers shown for `uri`
    async fn set_markers(&self, uri: Url, markers: Vec<Diagnostic>, version: Option<i32>);

    /// Remove every marker shown for `uri`
    async fn clear_markers(&self, uri: Url);
}

#[tower_lsp::async_trait]
impl MarkerHost for Client {
    async fn set_markers(&self, uri: Url, markers: Vec<Diagnostic>, version: Option<i32>) {
        self.publish_diagnostics(uri, markers, version).await;
    }

    async fn clear_markers(&self, uri: Url) {
        self.publish_diagnostics(uri, Vec::new(), None).await;
    }
}
