use std::path::PathBuf;

use djt_conf::Settings;
use djt_workspace::DocumentError;
use djt_workspace::PositionEncoding;
use djt_workspace::TextDocument;
use rustc_hash::FxHashMap;
use tower_lsp_server::ls_types;

/// Per-connection state: what the client told us and the open documents.
#[derive(Default)]
pub struct Session {
    client_capabilities: Option<ls_types::ClientCapabilities>,
    project_root: Option<PathBuf>,
    settings: Settings,
    encoding: PositionEncoding,
    documents: FxHashMap<ls_types::Uri, TextDocument>,
}

impl Session {
    pub fn set_client_capabilities(&mut self, capabilities: ls_types::ClientCapabilities) {
        self.client_capabilities = Some(capabilities);
    }

    /// Whether completion text may use snippet syntax.
    pub fn supports_snippets(&self) -> bool {
        self.client_capabilities
            .as_ref()
            .and_then(|caps| caps.text_document.as_ref())
            .and_then(|text_document| text_document.completion.as_ref())
            .and_then(|completion| completion.completion_item.as_ref())
            .and_then(|item| item.snippet_support)
            .unwrap_or(false)
    }

    pub fn project_root(&self) -> Option<&PathBuf> {
        self.project_root.as_ref()
    }

    pub fn set_project_root(&mut self, root: Option<PathBuf>) {
        self.project_root = root;
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: Settings) {
        self.settings = settings;
    }

    pub fn encoding(&self) -> PositionEncoding {
        self.encoding
    }

    pub fn set_encoding(&mut self, encoding: PositionEncoding) {
        self.encoding = encoding;
    }

    pub fn open_document(&mut self, item: ls_types::TextDocumentItem) {
        let document = TextDocument::new(item.text, item.version, item.language_id);
        self.documents.insert(item.uri, document);
    }

    /// Apply content changes to an open document.
    ///
    /// Returns `Ok(false)` for documents that are not open.
    pub fn update_document(
        &mut self,
        uri: &ls_types::Uri,
        changes: Vec<ls_types::TextDocumentContentChangeEvent>,
        version: i32,
    ) -> Result<bool, DocumentError> {
        let encoding = self.encoding;
        match self.documents.get_mut(uri) {
            Some(document) => document.update(changes, version, encoding).map(|()| true),
            None => Ok(false),
        }
    }

    pub fn close_document(&mut self, uri: &ls_types::Uri) -> Option<TextDocument> {
        self.documents.remove(uri)
    }

    pub fn document(&self, uri: &ls_types::Uri) -> Option<&TextDocument> {
        self.documents.get(uri)
    }

    /// An open document whose language id the settings cover.
    pub fn template(&self, uri: &ls_types::Uri) -> Option<&TextDocument> {
        let Some(document) = self.documents.get(uri) else {
            tracing::warn!("Request for unknown document {}", uri.as_str());
            return None;
        };

        if self.settings.applies_to(document.language_id()) {
            Some(document)
        } else {
            tracing::trace!(
                language_id = document.language_id(),
                "skipping non-template document"
            );
            None
        }
    }
}
