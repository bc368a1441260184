use std::sync::Arc;

use djt_conf::Settings;
use djt_ide::parent_template;
use djt_ide::DocumentRequest;
use djt_ide::FormattingRequest;
use djt_ide::Providers;
use djt_workspace::negotiate_position_encoding;
use tokio::sync::RwLock;
use tower_lsp_server::jsonrpc::Error;
use tower_lsp_server::jsonrpc::Result as LspResult;
use tower_lsp_server::ls_types;
use tower_lsp_server::LanguageServer;
use tracing_appender::non_blocking::WorkerGuard;

use crate::client;
use crate::commands;
use crate::session::Session;
use crate::workspace;

const SERVER_NAME: &str = "Django Template Server";
const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

pub struct DjangoTemplateServer {
    session: Arc<RwLock<Session>>,
    providers: Providers<'static>,
    _log_guard: WorkerGuard,
}

impl DjangoTemplateServer {
    #[must_use]
    pub fn new(log_guard: WorkerGuard) -> Self {
        Self {
            session: Arc::new(RwLock::new(Session::default())),
            providers: Providers::builtin(),
            _log_guard: log_guard,
        }
    }

    pub async fn with_session<R>(&self, f: impl FnOnce(&Session) -> R) -> R {
        let session = self.session.read().await;
        f(&session)
    }

    pub async fn with_session_mut<R>(&self, f: impl FnOnce(&mut Session) -> R) -> R {
        let mut session = self.session.write().await;
        f(&mut session)
    }

    /// Run `f` against a template document at `position`.
    ///
    /// Documents that are not open, or whose language id the settings do
    /// not cover, yield `None`.
    async fn with_document_request<R>(
        &self,
        uri: &ls_types::Uri,
        position: ls_types::Position,
        f: impl FnOnce(&DocumentRequest<'_>) -> R,
    ) -> Option<R> {
        self.with_session(|session| {
            let document = session.template(uri)?;
            let request = DocumentRequest {
                document,
                position,
                encoding: session.encoding(),
                supports_snippets: session.supports_snippets(),
            };
            Some(f(&request))
        })
        .await
    }

    async fn format(
        &self,
        uri: &ls_types::Uri,
        range: Option<ls_types::Range>,
    ) -> Option<Vec<ls_types::TextEdit>> {
        self.with_session(|session| {
            let document = session.template(uri)?;
            Some(self.providers.format(&FormattingRequest {
                document,
                range,
                encoding: session.encoding(),
            }))
        })
        .await
    }

    async fn show_template_hierarchy(
        &self,
        arguments: &[serde_json::Value],
    ) -> LspResult<Option<serde_json::Value>> {
        let Some(uri) = commands::uri_argument(arguments) else {
            return Err(Error::invalid_params(format!(
                "{} expects a document URI argument",
                commands::SHOW_TEMPLATE_HIERARCHY
            )));
        };

        let open = self
            .with_session(|session| session.document(&uri).map(|doc| doc.content().to_string()))
            .await;

        // Fall back to the file on disk for documents the client has not opened
        let text = match open {
            Some(text) => text,
            None => {
                let Some(path) = workspace::uri_to_path(&uri) else {
                    tracing::warn!("Cannot inspect unopened document {}", uri.as_str());
                    return Ok(None);
                };
                match tokio::fs::read_to_string(&path).await {
                    Ok(text) => text,
                    Err(err) => {
                        tracing::warn!("Cannot read {}: {err}", path.display());
                        return Ok(None);
                    }
                }
            }
        };

        let Some(parent) = parent_template(&text) else {
            tracing::debug!("{} extends no template", uri.as_str());
            return Ok(None);
        };

        client::show_message(
            ls_types::MessageType::INFO,
            format!("Template extends: {parent}"),
        );
        Ok(Some(serde_json::Value::String(parent.to_string())))
    }
}

impl LanguageServer for DjangoTemplateServer {
    async fn initialize(
        &self,
        params: ls_types::InitializeParams,
    ) -> LspResult<ls_types::InitializeResult> {
        tracing::info!("Initializing server...");

        let encoding = negotiate_position_encoding(&params);
        let project_root = workspace::project_root(&params);
        let settings = project_root
            .as_deref()
            .map(Settings::load_or_default)
            .unwrap_or_default();
        let format_on_range = settings.format_on_range;

        self.with_session_mut(|session| {
            session.set_client_capabilities(params.capabilities);
            session.set_encoding(encoding);
            session.set_project_root(project_root);
            session.set_settings(settings);
        })
        .await;

        Ok(ls_types::InitializeResult {
            capabilities: ls_types::ServerCapabilities {
                position_encoding: Some(encoding.to_lsp()),
                text_document_sync: Some(ls_types::TextDocumentSyncCapability::Options(
                    ls_types::TextDocumentSyncOptions {
                        open_close: Some(true),
                        change: Some(ls_types::TextDocumentSyncKind::INCREMENTAL),
                        ..Default::default()
                    },
                )),
                completion_provider: Some(ls_types::CompletionOptions {
                    resolve_provider: Some(false),
                    trigger_characters: Some(self.providers.trigger_characters()),
                    ..Default::default()
                }),
                hover_provider: Some(ls_types::HoverProviderCapability::Simple(true)),
                document_formatting_provider: Some(ls_types::OneOf::Left(true)),
                document_range_formatting_provider: Some(ls_types::OneOf::Left(
                    format_on_range,
                )),
                execute_command_provider: Some(ls_types::ExecuteCommandOptions {
                    commands: commands::COMMANDS
                        .iter()
                        .map(ToString::to_string)
                        .collect(),
                    ..Default::default()
                }),
                ..Default::default()
            },
            server_info: Some(ls_types::ServerInfo {
                name: SERVER_NAME.to_string(),
                version: Some(SERVER_VERSION.to_string()),
            }),
            ..Default::default()
        })
    }

    async fn initialized(&self, _params: ls_types::InitializedParams) {
        let (encoding, debug_enabled) = self
            .with_session(|session| (session.encoding(), session.settings().debug))
            .await;
        tracing::info!("Django template support is now active");
        tracing::debug!(?encoding, debug_enabled, "session ready");
    }

    async fn shutdown(&self) -> LspResult<()> {
        tracing::info!("Shutting down");
        Ok(())
    }

    async fn did_open(&self, params: ls_types::DidOpenTextDocumentParams) {
        tracing::debug!("Opened document: {}", params.text_document.uri.as_str());
        self.with_session_mut(|session| session.open_document(params.text_document))
            .await;
    }

    async fn did_change(&self, params: ls_types::DidChangeTextDocumentParams) {
        let uri = params.text_document.uri;
        let version = params.text_document.version;

        let result = self
            .with_session_mut(|session| {
                session.update_document(&uri, params.content_changes, version)
            })
            .await;

        match result {
            Ok(true) => tracing::trace!("Changed document: {}", uri.as_str()),
            Ok(false) => tracing::warn!("Change for unknown document {}", uri.as_str()),
            Err(err) => tracing::error!("Failed to apply change to {}: {err}", uri.as_str()),
        }
    }

    async fn did_close(&self, params: ls_types::DidCloseTextDocumentParams) {
        let uri = params.text_document.uri;
        if self
            .with_session_mut(|session| session.close_document(&uri))
            .await
            .is_none()
        {
            tracing::warn!("Close for unknown document {}", uri.as_str());
        }
    }

    async fn completion(
        &self,
        params: ls_types::CompletionParams,
    ) -> LspResult<Option<ls_types::CompletionResponse>> {
        let position = params.text_document_position;
        let trigger = params
            .context
            .and_then(|context| context.trigger_character);

        let items = self
            .with_document_request(&position.text_document.uri, position.position, |request| {
                self.providers.complete(request, trigger.as_deref())
            })
            .await
            .unwrap_or_default();

        Ok(Some(ls_types::CompletionResponse::Array(items)))
    }

    async fn hover(&self, params: ls_types::HoverParams) -> LspResult<Option<ls_types::Hover>> {
        let position = params.text_document_position_params;
        Ok(self
            .with_document_request(&position.text_document.uri, position.position, |request| {
                self.providers.hover(request)
            })
            .await
            .flatten())
    }

    async fn formatting(
        &self,
        params: ls_types::DocumentFormattingParams,
    ) -> LspResult<Option<Vec<ls_types::TextEdit>>> {
        Ok(self.format(&params.text_document.uri, None).await)
    }

    async fn range_formatting(
        &self,
        params: ls_types::DocumentRangeFormattingParams,
    ) -> LspResult<Option<Vec<ls_types::TextEdit>>> {
        let enabled = self
            .with_session(|session| session.settings().format_on_range)
            .await;
        if !enabled {
            return Ok(None);
        }
        Ok(self
            .format(&params.text_document.uri, Some(params.range))
            .await)
    }

    async fn execute_command(
        &self,
        params: ls_types::ExecuteCommandParams,
    ) -> LspResult<Option<serde_json::Value>> {
        match params.command.as_str() {
            commands::SHOW_TEMPLATE_HIERARCHY => {
                self.show_template_hierarchy(&params.arguments).await
            }
            other => Err(Error::invalid_params(format!("Unknown command: {other}"))),
        }
    }

    async fn did_change_configuration(&self, _params: ls_types::DidChangeConfigurationParams) {
        tracing::info!("Configuration changed, reloading settings");

        self.with_session_mut(|session| {
            if let Some(root) = session.project_root() {
                let settings = Settings::load_or_default(root);
                session.set_settings(settings);
            }
        })
        .await;
    }
}
