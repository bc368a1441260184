//! One minimal trait per responder kind and the bundle the server wires up.

use djt_catalog::builtin_catalog;
use djt_catalog::Catalog;
use djt_workspace::PositionEncoding;
use djt_workspace::TextDocument;
use tower_lsp_server::ls_types;

use crate::completions::FilterCompletions;
use crate::completions::TagCompletions;
use crate::formatting::DelimiterFormatter;
use crate::hover::CatalogHover;

/// A position-based request against an open document.
#[derive(Debug, Clone, Copy)]
pub struct DocumentRequest<'a> {
    pub document: &'a TextDocument,
    pub position: ls_types::Position,
    pub encoding: PositionEncoding,
    /// Whether the client accepts snippet syntax in completion text.
    pub supports_snippets: bool,
}

/// A formatting request; `range: None` formats the whole document.
#[derive(Debug, Clone, Copy)]
pub struct FormattingRequest<'a> {
    pub document: &'a TextDocument,
    pub range: Option<ls_types::Range>,
    pub encoding: PositionEncoding,
}

pub trait CompletionProvider {
    /// Characters whose typing routes a completion request to this provider.
    fn trigger_characters(&self) -> &'static [char];

    fn provide(&self, request: &DocumentRequest<'_>) -> Vec<ls_types::CompletionItem>;
}

pub trait HoverProvider {
    fn provide(&self, request: &DocumentRequest<'_>) -> Option<ls_types::Hover>;
}

pub trait FormattingProvider {
    fn provide(&self, request: &FormattingRequest<'_>) -> Vec<ls_types::TextEdit>;
}

/// Every responder, sharing one read-only catalog.
pub struct Providers<'a> {
    completions: Vec<Box<dyn CompletionProvider + Send + Sync + 'a>>,
    hover: CatalogHover<'a>,
    formatter: DelimiterFormatter,
}

impl Providers<'static> {
    /// Providers over the built-in catalog.
    #[must_use]
    pub fn builtin() -> Self {
        Self::new(builtin_catalog())
    }
}

impl<'a> Providers<'a> {
    #[must_use]
    pub fn new(catalog: &'a Catalog) -> Self {
        Self {
            completions: vec![
                Box::new(TagCompletions::new(catalog)),
                Box::new(FilterCompletions::new(catalog)),
            ],
            hover: CatalogHover::new(catalog),
            formatter: DelimiterFormatter,
        }
    }

    /// Union of all completion trigger characters, in registration order.
    #[must_use]
    pub fn trigger_characters(&self) -> Vec<String> {
        let mut characters: Vec<String> = Vec::new();
        for ch in self
            .completions
            .iter()
            .flat_map(|provider| provider.trigger_characters())
        {
            let ch = ch.to_string();
            if !characters.contains(&ch) {
                characters.push(ch);
            }
        }
        characters
    }

    /// Dispatch a completion request.
    ///
    /// A request caused by typing a trigger character only reaches providers
    /// registered for that character; any other request reaches all of them.
    #[must_use]
    pub fn complete(
        &self,
        request: &DocumentRequest<'_>,
        trigger_character: Option<&str>,
    ) -> Vec<ls_types::CompletionItem> {
        let trigger = trigger_character.and_then(|text| text.chars().next());

        self.completions
            .iter()
            .filter(|provider| {
                trigger.is_none_or(|ch| provider.trigger_characters().contains(&ch))
            })
            .flat_map(|provider| provider.provide(request))
            .collect()
    }

    #[must_use]
    pub fn hover(&self, request: &DocumentRequest<'_>) -> Option<ls_types::Hover> {
        self.hover.provide(request)
    }

    #[must_use]
    pub fn format(&self, request: &FormattingRequest<'_>) -> Vec<ls_types::TextEdit> {
        self.formatter.provide(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(document: &TextDocument, line: u32, character: u32) -> DocumentRequest<'_> {
        DocumentRequest {
            document,
            position: ls_types::Position::new(line, character),
            encoding: PositionEncoding::Utf16,
            supports_snippets: true,
        }
    }

    #[test]
    fn test_trigger_characters_are_merged() {
        assert_eq!(Providers::builtin().trigger_characters(), vec!["{", "%", "|"]);
    }

    #[test]
    fn test_pipe_trigger_only_reaches_filter_provider() {
        let providers = Providers::builtin();
        // The line opens a tag, so the tag predicate holds too
        let document = TextDocument::new("{% filter value|".to_string(), 1, "django-html");
        let items = providers.complete(&request(&document, 0, 16), Some("|"));

        let catalog = builtin_catalog();
        assert_eq!(items.len(), catalog.filters().len());
        assert_eq!(items[0].label, "add");
    }

    #[test]
    fn test_invoked_request_reaches_all_providers() {
        let providers = Providers::builtin();
        let document = TextDocument::new("{% filter value|".to_string(), 1, "django-html");
        let items = providers.complete(&request(&document, 0, 16), None);

        let catalog = builtin_catalog();
        assert_eq!(items.len(), catalog.tags().len() + catalog.filters().len());
    }

    #[test]
    fn test_percent_trigger_reaches_tag_provider() {
        let providers = Providers::builtin();
        let document = TextDocument::new("<p>{%".to_string(), 1, "django-html");
        let items = providers.complete(&request(&document, 0, 5), Some("%"));
        assert_eq!(items.len(), builtin_catalog().tags().len());
    }

    #[test]
    fn test_no_context_gives_empty_list() {
        let providers = Providers::builtin();
        let document = TextDocument::new("<p>hello</p>".to_string(), 1, "django-html");
        assert!(providers.complete(&request(&document, 0, 8), None).is_empty());
        assert!(providers.complete(&request(&document, 0, 0), Some("{")).is_empty());
    }
}
