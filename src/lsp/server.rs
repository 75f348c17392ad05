//! CSS-in-JS Language Server Implementation
//!
//! Provides Language Server Protocol features for styled fragments using tower-lsp. Every
//! request works on its own document snapshot. Service failures are logged and answered with
//! an empty result, they never reach the client as errors.

use std::sync::{Arc, Mutex};
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer, LspService, Server};
use url::Url;

use crate::config::Settings;
use crate::css::analyzer::{CssAnalyzer, FoldingOptions};
use crate::error::StyledResult;
use crate::language::document::DocumentSnapshot;
use crate::lsp::document_manager::DocumentStore;
use crate::lsp::host::MarkerHost;
use crate::lsp::validation::ValidationScheduler;
use crate::lsp::worker::ServiceWorker;
use crate::styled::position::{CallerPosition, CallerRange};
use crate::styled::service::StyledLanguageService;

type Service = StyledLanguageService<CssAnalyzer>;

/// CSS-in-JS Language Server
pub struct StyledLanguageServer {
    client: Client,
    documents: Arc<Mutex<DocumentStore>>,
    worker: Arc<ServiceWorker<CssAnalyzer>>,
    validation: ValidationScheduler<Client, CssAnalyzer>,
    settings: Mutex<Settings>,
    folding_options: Mutex<FoldingOptions>,
}

impl StyledLanguageServer {
    pub fn new(client: Client) -> Self {
        let settings = Settings::default();
        let lint = settings.lint_options();
        let documents = Arc::new(Mutex::new(DocumentStore::new()));
        let worker = Arc::new(ServiceWorker::new(
            move || CssAnalyzer::new(lint),
            settings.worker_idle_timeout(),
        ));
        let validation = ValidationScheduler::new(
            Arc::new(client.clone()),
            Arc::clone(&documents),
            Arc::clone(&worker),
        );

        Self {
            client,
            documents,
            worker,
            validation,
            settings: Mutex::new(settings),
            folding_options: Mutex::new(FoldingOptions::default()),
        }
    }

    fn snapshot(&self, uri: &Url) -> Option<DocumentSnapshot> {
        match self.documents.lock() {
            Ok(documents) => documents.get_document(uri),
            Err(_) => {
                log::error!("Failed to acquire document lock");
                None
            }
        }
    }

    /// Run one service operation against the current snapshot of `uri`
    ///
    /// `None` when the document is not open or the operation failed.
    fn with_service<T>(
        &self,
        uri: &Url,
        operation: &str,
        run: impl FnOnce(&Service, &DocumentSnapshot) -> StyledResult<T>,
    ) -> Option<T> {
        let Some(snapshot) = self.snapshot(uri) else {
            log::warn!("[{}] Document not found: {}", operation, uri);
            return None;
        };

        let service = self.worker.acquire();
        match run(&service, &snapshot) {
            Ok(result) => Some(result),
            Err(e) => {
                log::warn!(
                    "[{}] Failed for {} (version {}): {}",
                    operation,
                    uri,
                    snapshot.version,
                    e
                );
                None
            }
        }
    }

    /// Apply new settings: rebuild the analyzer and revalidate open documents
    fn apply_settings(&self, settings: Settings) {
        let lint = settings.lint_options();
        self.worker
            .restart(move || CssAnalyzer::new(lint), settings.worker_idle_timeout());
        self.validation.set_enabled(settings.validate);

        if let Ok(mut current) = self.settings.lock() {
            if *current == settings {
                log::debug!("Settings unchanged: {:?}", settings);
            } else {
                log::info!("Settings changed from {:?} to {:?}", *current, settings);
            }
            *current = settings;
        }

        let open: Vec<Url> = match self.documents.lock() {
            Ok(documents) => documents.document_uris().cloned().collect(),
            Err(_) => Vec::new(),
        };
        for uri in open {
            self.validation.schedule(uri);
        }
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for StyledLanguageServer {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        if let Some(options) = params.initialization_options.as_ref() {
            match Settings::from_value(options) {
                Ok(settings) => self.apply_settings(settings),
                Err(e) => log::warn!("Ignoring initialization options: {}", e),
            }
        }

        let range_limit = params
            .capabilities
            .text_document
            .as_ref()
            .and_then(|text_document| text_document.folding_range.as_ref())
            .and_then(|folding| folding.range_limit);
        if let Ok(mut options) = self.folding_options.lock() {
            options.range_limit = range_limit.map(|limit| limit as usize);
        }

        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Kind(
                    TextDocumentSyncKind::INCREMENTAL,
                )),
                completion_provider: Some(CompletionOptions {
                    resolve_provider: Some(false),
                    trigger_characters: Some(vec![
                        ":".to_string(), // property values
                        "-".to_string(), // custom properties
                        "(".to_string(), // var( arguments
                    ]),
                    all_commit_characters: None,
                    work_done_progress_options: WorkDoneProgressOptions::default(),
                    completion_item: None,
                }),
                hover_provider: Some(HoverProviderCapability::Simple(true)),
                document_highlight_provider: Some(OneOf::Left(true)),
                definition_provider: Some(OneOf::Left(true)),
                references_provider: Some(OneOf::Left(true)),
                rename_provider: Some(OneOf::Right(RenameOptions {
                    prepare_provider: Some(true),
                    work_done_progress_options: WorkDoneProgressOptions::default(),
                })),
                document_symbol_provider: Some(OneOf::Left(true)),
                color_provider: Some(ColorProviderCapability::Simple(true)),
                folding_range_provider: Some(FoldingRangeProviderCapability::Simple(true)),
                selection_range_provider: Some(SelectionRangeProviderCapability::Simple(true)),
                ..Default::default()
            },
            server_info: Some(ServerInfo {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        self.worker.spawn_reaper();
        self.client
            .log_message(MessageType::INFO, "CSS-in-JS Language Server initialized")
            .await;
    }

    async fn shutdown(&self) -> Result<()> {
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let uri = params.text_document.uri;
        if let Ok(mut documents) = self.documents.lock() {
            documents.open_document(
                uri.clone(),
                params.text_document.text,
                params.text_document.version,
            );
        } else {
            log::error!("[did_open] Failed to acquire document lock");
            return;
        }

        log::info!("Opened document: {}", uri);
        self.validation.schedule(uri);
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = params.text_document.uri;
        let updated = match self.documents.lock() {
            Ok(mut documents) => documents
                .update_document(&uri, params.content_changes, params.text_document.version)
                .is_some(),
            Err(_) => {
                log::error!("[did_change] Failed to acquire document lock");
                false
            }
        };

        if updated {
            self.validation.schedule(uri);
        } else {
            log::warn!("[did_change] Change for unknown document: {}", uri);
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let uri = params.text_document.uri;
        if let Ok(mut documents) = self.documents.lock() {
            documents.close_document(&uri);
        }
        self.validation.cancel(&uri);
        self.client.clear_markers(uri.clone()).await;

        log::info!("Closed document: {}", uri);
    }

    async fn did_change_configuration(&self, params: DidChangeConfigurationParams) {
        match Settings::from_value(&params.settings) {
            Ok(settings) => self.apply_settings(settings),
            Err(e) => log::warn!("Keeping previous settings: {}", e),
        }
    }

    async fn completion(&self, params: CompletionParams) -> Result<Option<CompletionResponse>> {
        let uri = params.text_document_position.text_document.uri;
        let position = CallerPosition::from_lsp(params.text_document_position.position);

        let list = self.with_service(&uri, "completion", |service, snapshot| {
            service.complete(snapshot, position)
        });
        log::debug!(
            "Completion at {} in {}: {} items",
            position,
            uri,
            list.as_ref().map(|l| l.items.len()).unwrap_or(0)
        );

        Ok(list
            .filter(|list| !list.items.is_empty())
            .map(CompletionResponse::List))
    }

    async fn hover(&self, params: HoverParams) -> Result<Option<Hover>> {
        let uri = params.text_document_position_params.text_document.uri;
        let position = CallerPosition::from_lsp(params.text_document_position_params.position);

        Ok(self
            .with_service(&uri, "hover", |service, snapshot| service.hover(snapshot, position))
            .flatten())
    }

    async fn document_highlight(
        &self,
        params: DocumentHighlightParams,
    ) -> Result<Option<Vec<DocumentHighlight>>> {
        let uri = params.text_document_position_params.text_document.uri;
        let position = CallerPosition::from_lsp(params.text_document_position_params.position);

        Ok(self
            .with_service(&uri, "document_highlight", |service, snapshot| {
                service.document_highlights(snapshot, position)
            })
            .filter(|highlights| !highlights.is_empty()))
    }

    async fn goto_definition(
        &self,
        params: GotoDefinitionParams,
    ) -> Result<Option<GotoDefinitionResponse>> {
        let uri = params.text_document_position_params.text_document.uri;
        let position = CallerPosition::from_lsp(params.text_document_position_params.position);

        Ok(self
            .with_service(&uri, "goto_definition", |service, snapshot| {
                service.definition(snapshot, position)
            })
            .flatten()
            .map(GotoDefinitionResponse::Scalar))
    }

    async fn references(&self, params: ReferenceParams) -> Result<Option<Vec<Location>>> {
        let uri = params.text_document_position.text_document.uri;
        let position = CallerPosition::from_lsp(params.text_document_position.position);
        let include_declaration = params.context.include_declaration;

        Ok(self
            .with_service(&uri, "references", |service, snapshot| {
                service.references(snapshot, position, include_declaration)
            })
            .filter(|locations| !locations.is_empty()))
    }

    async fn prepare_rename(
        &self,
        params: TextDocumentPositionParams,
    ) -> Result<Option<PrepareRenameResponse>> {
        let uri = params.text_document.uri;
        let position = CallerPosition::from_lsp(params.position);

        Ok(self
            .with_service(&uri, "prepare_rename", |service, snapshot| {
                service.prepare_rename(snapshot, position)
            })
            .flatten()
            .map(|range| PrepareRenameResponse::Range(range.into_lsp())))
    }

    async fn rename(&self, params: RenameParams) -> Result<Option<WorkspaceEdit>> {
        let uri = params.text_document_position.text_document.uri;
        let position = CallerPosition::from_lsp(params.text_document_position.position);
        let new_name = params.new_name;

        Ok(self
            .with_service(&uri, "rename", |service, snapshot| {
                service.rename(snapshot, position, &new_name)
            })
            .flatten())
    }

    async fn document_symbol(
        &self,
        params: DocumentSymbolParams,
    ) -> Result<Option<DocumentSymbolResponse>> {
        let uri = params.text_document.uri;

        Ok(self
            .with_service(&uri, "document_symbol", |service, snapshot| {
                service.document_symbols(snapshot)
            })
            .map(DocumentSymbolResponse::Nested))
    }

    async fn document_color(&self, params: DocumentColorParams) -> Result<Vec<ColorInformation>> {
        let uri = params.text_document.uri;

        Ok(self
            .with_service(&uri, "document_color", |service, snapshot| {
                service.document_colors(snapshot)
            })
            .unwrap_or_default())
    }

    async fn color_presentation(
        &self,
        params: ColorPresentationParams,
    ) -> Result<Vec<ColorPresentation>> {
        let uri = params.text_document.uri;
        let range = CallerRange::from_lsp(params.range);

        Ok(self
            .with_service(&uri, "color_presentation", |service, snapshot| {
                service.color_presentations(snapshot, &params.color, range)
            })
            .unwrap_or_default())
    }

    async fn folding_range(&self, params: FoldingRangeParams) -> Result<Option<Vec<FoldingRange>>> {
        let uri = params.text_document.uri;
        let options = self
            .folding_options
            .lock()
            .map(|options| *options)
            .unwrap_or_default();

        Ok(self.with_service(&uri, "folding_range", |service, snapshot| {
            service.folding_ranges(snapshot, &options)
        }))
    }

    async fn selection_range(
        &self,
        params: SelectionRangeParams,
    ) -> Result<Option<Vec<SelectionRange>>> {
        let uri = params.text_document.uri;
        let positions: Vec<CallerPosition> = params
            .positions
            .into_iter()
            .map(CallerPosition::from_lsp)
            .collect();

        Ok(self.with_service(&uri, "selection_range", |service, snapshot| {
            service.selection_ranges(snapshot, &positions)
        }))
    }
}

/// Create and start the language server on stdio
pub async fn start_language_server() {
    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) = LspService::new(StyledLanguageServer::new);
    Server::new(stdin, stdout, socket).serve(service).await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_configuration_change_is_stored_and_applied() {
        let (service, _socket) = LspService::new(StyledLanguageServer::new);
        let server = service.inner();
        assert!(server.settings.lock().unwrap().validate);

        server
            .did_change_configuration(DidChangeConfigurationParams {
                settings: json!({ "cssInJs": { "validate": false, "workerIdleTimeoutSecs": 30 } }),
            })
            .await;

        let stored = server.settings.lock().unwrap().clone();
        assert!(!stored.validate);
        assert_eq!(stored.worker_idle_timeout_secs, 30);
        assert!(!server.validation.is_enabled());
    }

    #[tokio::test]
    async fn test_invalid_configuration_keeps_previous_settings() {
        let (service, _socket) = LspService::new(StyledLanguageServer::new);
        let server = service.inner();

        server
            .did_change_configuration(DidChangeConfigurationParams {
                settings: json!({ "cssInJs": { "validate": "sometimes" } }),
            })
            .await;

        assert_eq!(*server.settings.lock().unwrap(), Settings::default());
        assert!(server.validation.is_enabled());
    }
}
