//! Completion responders for tags and filters.
//!
//! Candidates always follow catalog declaration order; `sort_text` carries the
//! zero-padded declaration index so clients do not re-sort alphabetically.

use djt_catalog::Catalog;
use djt_catalog::FilterEntry;
use djt_catalog::TagEntry;
use tower_lsp_server::ls_types;

use crate::providers::CompletionProvider;
use crate::providers::DocumentRequest;
use crate::snippets::snippet_to_plain_text;
use crate::trigger::is_filter_context;
use crate::trigger::is_tag_context;
use crate::trigger::open_tag_start;
use crate::trigger::FILTER_TRIGGER_CHARACTERS;
use crate::trigger::TAG_TRIGGER_CHARACTERS;

/// Offers every catalog tag once the line is in tag context.
pub struct TagCompletions<'a> {
    catalog: &'a Catalog,
}

impl<'a> TagCompletions<'a> {
    #[must_use]
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }
}

impl CompletionProvider for TagCompletions<'_> {
    fn trigger_characters(&self) -> &'static [char] {
        TAG_TRIGGER_CHARACTERS
    }

    fn provide(&self, request: &DocumentRequest<'_>) -> Vec<ls_types::CompletionItem> {
        let Some(prefix) = request.document.line_prefix(request.position, request.encoding) else {
            return Vec::new();
        };

        if !is_tag_context(prefix) {
            return Vec::new();
        }

        // Replace an opener the user is still typing so the snippet's own
        // `{%` is not doubled
        let replace = open_tag_start(prefix).map(|index| {
            let line_start = request
                .document
                .line_index()
                .line_start(request.position.line)
                .unwrap_or(0);
            let start = line_start + u32::try_from(index).unwrap_or(0);
            ls_types::Range::new(
                request.document.position(start, request.encoding),
                request.position,
            )
        });

        tag_completions(self.catalog, replace, request.supports_snippets)
    }
}

/// Offers every catalog filter right after a `|`.
pub struct FilterCompletions<'a> {
    catalog: &'a Catalog,
}

impl<'a> FilterCompletions<'a> {
    #[must_use]
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }
}

impl CompletionProvider for FilterCompletions<'_> {
    fn trigger_characters(&self) -> &'static [char] {
        FILTER_TRIGGER_CHARACTERS
    }

    fn provide(&self, request: &DocumentRequest<'_>) -> Vec<ls_types::CompletionItem> {
        match request.document.line_prefix(request.position, request.encoding) {
            Some(prefix) if is_filter_context(prefix) => filter_completions(self.catalog),
            _ => Vec::new(),
        }
    }
}

/// One candidate per tag.
///
/// With `replace` set, each candidate carries a text edit over that range;
/// otherwise the snippet is inserted at the cursor.
#[must_use]
pub fn tag_completions(
    catalog: &Catalog,
    replace: Option<ls_types::Range>,
    supports_snippets: bool,
) -> Vec<ls_types::CompletionItem> {
    catalog
        .tags()
        .iter()
        .enumerate()
        .map(|(index, tag)| tag_item(index, tag, replace, supports_snippets))
        .collect()
}

/// One candidate per filter, inserting the bare name.
#[must_use]
pub fn filter_completions(catalog: &Catalog) -> Vec<ls_types::CompletionItem> {
    catalog
        .filters()
        .iter()
        .enumerate()
        .map(|(index, filter)| filter_item(index, filter))
        .collect()
}

fn tag_item(
    index: usize,
    tag: &TagEntry,
    replace: Option<ls_types::Range>,
    supports_snippets: bool,
) -> ls_types::CompletionItem {
    let (text, format) = if supports_snippets {
        (tag.snippet().to_string(), ls_types::InsertTextFormat::SNIPPET)
    } else {
        (
            snippet_to_plain_text(tag.snippet()),
            ls_types::InsertTextFormat::PLAIN_TEXT,
        )
    };

    let kind = if tag.is_block() {
        ls_types::CompletionItemKind::SNIPPET
    } else {
        ls_types::CompletionItemKind::KEYWORD
    };

    let (insert_text, text_edit, filter_text) = match replace {
        Some(range) => (
            None,
            Some(ls_types::CompletionTextEdit::Edit(ls_types::TextEdit::new(
                range, text,
            ))),
            // Clients match the replaced text, which still holds the opener
            Some(format!("{{% {}", tag.name())),
        ),
        None => (Some(text), None, None),
    };

    ls_types::CompletionItem {
        label: tag.name().to_string(),
        kind: Some(kind),
        detail: Some("Django template tag".to_string()),
        documentation: Some(markdown(tag.documentation())),
        insert_text,
        insert_text_format: Some(format),
        text_edit,
        filter_text,
        sort_text: Some(format!("{index:04}")),
        ..Default::default()
    }
}

fn filter_item(index: usize, filter: &FilterEntry) -> ls_types::CompletionItem {
    ls_types::CompletionItem {
        label: filter.name().to_string(),
        kind: Some(ls_types::CompletionItemKind::FUNCTION),
        detail: Some("Django template filter".to_string()),
        documentation: Some(markdown(filter.documentation())),
        insert_text: Some(filter.name().to_string()),
        insert_text_format: Some(ls_types::InsertTextFormat::PLAIN_TEXT),
        sort_text: Some(format!("{index:04}")),
        ..Default::default()
    }
}

fn markdown(value: String) -> ls_types::Documentation {
    ls_types::Documentation::MarkupContent(ls_types::MarkupContent {
        kind: ls_types::MarkupKind::Markdown,
        value,
    })
}
