//! Debounced validation
//!
//! Every edit schedules a validation that fires after a fixed quiet period. A newer schedule
//! for the same document supersedes older ones, so a burst of edits validates only once,
//! against the snapshot current when the timer fires.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tower_lsp::lsp_types::Url;

use crate::css::analyzer::StylesheetAnalyzer;
use crate::lsp::document_manager::DocumentStore;
use crate::lsp::host::MarkerHost;
use crate::lsp::worker::ServiceWorker;

/// Quiet period between the last edit and validation
pub const VALIDATION_DELAY: Duration = Duration::from_millis(500);

pub struct ValidationScheduler<H, A> {
    host: Arc<H>,
    documents: Arc<Mutex<DocumentStore>>,
    worker: Arc<ServiceWorker<A>>,
    /// Generation of the latest schedule per document
    pending: Arc<Mutex<HashMap<Url, u64>>>,
    next_generation: Arc<AtomicU64>,
    enabled: Arc<AtomicBool>,
}

impl<H, A> Clone for ValidationScheduler<H, A> {
    fn clone(&self) -> Self {
        Self {
            host: Arc::clone(&self.host),
            documents: Arc::clone(&self.documents),
            worker: Arc::clone(&self.worker),
            pending: Arc::clone(&self.pending),
            next_generation: Arc::clone(&self.next_generation),
            enabled: Arc::clone(&self.enabled),
        }
    }
}

impl<H: MarkerHost, A: StylesheetAnalyzer + 'static> ValidationScheduler<H, A> {
    pub fn new(
        host: Arc<H>,
        documents: Arc<Mutex<DocumentStore>>,
        worker: Arc<ServiceWorker<A>>,
    ) -> Self {
        Self {
            host,
            documents,
            worker,
            pending: Arc::new(Mutex::new(HashMap::new())),
            next_generation: Arc::new(AtomicU64::new(0)),
            enabled: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::SeqCst);
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    /// Validate `uri` once no newer schedule arrives within the quiet period
    pub fn schedule(&self, uri: Url) {
        let generation = self.next_generation.fetch_add(1, Ordering::SeqCst) + 1;
        if let Ok(mut pending) = self.pending.lock() {
            pending.insert(uri.clone(), generation);
        }

        let scheduler = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(VALIDATION_DELAY).await;
            if scheduler.take_if_current(&uri, generation) {
                scheduler.validate_now(&uri).await;
            } else {
                log::debug!("Validation of {} superseded", uri);
            }
        });
    }

    /// Drop pending validations of `uri`
    pub fn cancel(&self, uri: &Url) {
        if let Ok(mut pending) = self.pending.lock() {
            pending.remove(uri);
        }
    }

    fn take_if_current(&self, uri: &Url, generation: u64) -> bool {
        let Ok(mut pending) = self.pending.lock() else {
            return false;
        };
        if pending.get(uri) == Some(&generation) {
            pending.remove(uri);
            true
        } else {
            false
        }
    }

    /// Validate the current snapshot of `uri` and publish the markers
    ///
    /// A document that is no longer open is skipped. Failures are logged, never retried.
    pub async fn validate_now(&self, uri: &Url) {
        let snapshot = match self.documents.lock() {
            Ok(documents) => documents.get_document(uri),
            Err(_) => {
                log::error!("Failed to acquire document lock for validation");
                return;
            }
        };
        let Some(snapshot) = snapshot else {
            log::debug!("Skipping validation of closed document {}", uri);
            return;
        };

        if !self.is_enabled() {
            self.host.clear_markers(uri.clone()).await;
            return;
        }

        let service = self.worker.acquire();
        let diagnostics = match service.validate(&snapshot) {
            Ok(diagnostics) => diagnostics,
            Err(e) => {
                log::error!("Validation of {} failed: {}", uri, e);
                return;
            }
        };

        let still_open = self
            .documents
            .lock()
            .map(|documents| documents.is_open(uri))
            .unwrap_or(false);
        if !still_open {
            log::debug!("Dropping markers for closed document {}", uri);
            return;
        }

        log::debug!(
            "Publishing {} markers for {} (version {})",
            diagnostics.len(),
            uri,
            snapshot.version
        );
        self.host
            .set_markers(uri.clone(), diagnostics, Some(snapshot.version))
            .await;
    }
}
