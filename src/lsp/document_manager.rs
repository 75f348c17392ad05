//! Open document store
//!
//! Holds the latest snapshot of every open document. Requests clone a snapshot out and work
//! on it without holding the store lock.

use std::collections::HashMap;
use tower_lsp::lsp_types::{TextDocumentContentChangeEvent, Url};

use crate::language::document::DocumentSnapshot;

#[derive(Debug, Default)]
pub struct DocumentStore {
    documents: HashMap<Url, DocumentSnapshot>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a new document, replacing any previous one with the same uri
    pub fn open_document(&mut self, uri: Url, text: String, version: i32) -> DocumentSnapshot {
        let snapshot = DocumentSnapshot::new(uri.clone(), version, text);
        self.documents.insert(uri, snapshot.clone());
        snapshot
    }

    /// Apply client edits, `None` if the document is not open
    pub fn update_document(
        &mut self,
        uri: &Url,
        changes: Vec<TextDocumentContentChangeEvent>,
        version: i32,
    ) -> Option<DocumentSnapshot> {
        let document = self.documents.get_mut(uri)?;
        if version <= document.version {
            log::warn!(
                "Version of {} went from {} to {}",
                uri,
                document.version,
                version
            );
        }
        *document = document.apply_changes(changes, version);
        Some(document.clone())
    }

    /// Close a document, returns whether it was open
    pub fn close_document(&mut self, uri: &Url) -> bool {
        self.documents.remove(uri).is_some()
    }

    /// Current snapshot of a document
    pub fn get_document(&self, uri: &Url) -> Option<DocumentSnapshot> {
        self.documents.get(uri).cloned()
    }

    pub fn is_open(&self, uri: &Url) -> bool {
        self.documents.contains_key(uri)
    }

    pub fn document_uris(&self) -> impl Iterator<Item = &Url> {
        self.documents.keys()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tower_lsp::lsp_types::{Position, Range};

    fn uri() -> Url {
        Url::parse("file:///src/Card.styles.ts").unwrap()
    }

    #[test]
    fn test_open_update_close() {
        let mut store = DocumentStore::new();
        store.open_document(uri(), "color: red;".to_string(), 1);

        let updated = store
            .update_document(
                &uri(),
                vec![TextDocumentContentChangeEvent {
                    range: Some(Range::new(Position::new(0, 7), Position::new(0, 10))),
                    range_length: None,
                    text: "blue".to_string(),
                }],
                2,
            )
            .unwrap();
        assert_eq!(&*updated.text, "color: blue;");
        assert_eq!(updated.version, 2);
        assert_eq!(store.get_document(&uri()).unwrap().version, 2);

        assert!(store.close_document(&uri()));
        assert!(!store.close_document(&uri()));
        assert!(store.get_document(&uri()).is_none());
    }

    #[test]
    fn test_snapshots_are_independent_of_later_edits() {
        let mut store = DocumentStore::new();
        let first = store.open_document(uri(), "a".to_string(), 1);
        store.update_document(
            &uri(),
            vec![TextDocumentContentChangeEvent {
                range: None,
                range_length: None,
                text: "b".to_string(),
            }],
            2,
        );

        assert_eq!(&*first.text, "a");
        assert_eq!(&*store.get_document(&uri()).unwrap().text, "b");
    }

    #[test]
    fn test_update_of_unknown_document() {
        let mut store = DocumentStore::new();
        assert!(store.update_document(&uri(), Vec::new(), 1).is_none());
        assert!(!store.is_open(&uri()));
    }
}
