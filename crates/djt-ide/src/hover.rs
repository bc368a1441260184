use djt_catalog::Catalog;
use tower_lsp_server::ls_types;

use crate::providers::DocumentRequest;
use crate::providers::HoverProvider;

/// Documentation for the tag or filter name under the cursor.
pub struct CatalogHover<'a> {
    catalog: &'a Catalog,
}

impl<'a> CatalogHover<'a> {
    #[must_use]
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }
}

impl HoverProvider for CatalogHover<'_> {
    fn provide(&self, request: &DocumentRequest<'_>) -> Option<ls_types::Hover> {
        let (word, range) = request.document.word_at(request.position, request.encoding)?;
        let construct = self.catalog.lookup(word)?;

        tracing::trace!(name = construct.name(), "hover hit");

        Some(ls_types::Hover {
            contents: ls_types::HoverContents::Markup(ls_types::MarkupContent {
                kind: ls_types::MarkupKind::Markdown,
                value: construct.documentation(),
            }),
            range: Some(range),
        })
    }
}

#[cfg(test)]
mod tests {
    use djt_catalog::builtin_catalog;
    use djt_catalog::FilterEntry;
    use djt_catalog::TagEntry;
    use djt_workspace::PositionEncoding;
    use djt_workspace::TextDocument;

    use super::*;

    fn hover_with(catalog: &Catalog, text: &str, line: u32, character: u32) -> Option<String> {
        let document = TextDocument::new(text.to_string(), 1, "django-html");
        let request = DocumentRequest {
            document: &document,
            position: ls_types::Position::new(line, character),
            encoding: PositionEncoding::Utf16,
            supports_snippets: true,
        };
        let hover = CatalogHover::new(catalog).provide(&request)?;
        match hover.contents {
            ls_types::HoverContents::Markup(content) => Some(content.value),
            _ => None,
        }
    }

    fn hover(text: &str, line: u32, character: u32) -> Option<String> {
        hover_with(builtin_catalog(), text, line, character)
    }

    #[test]
    fn test_hover_on_tag_shows_description() {
        let doc = hover("<main>\n{% for item in items %}", 1, 4).unwrap();
        let tag = builtin_catalog().lookup_tag("for").unwrap();
        assert!(doc.contains(tag.description()));
        assert!(doc.starts_with("**for**"));
    }

    #[test]
    fn test_hover_on_filter_links_reference() {
        let doc = hover("{{ value|truncatewords:3 }}", 0, 12).unwrap();
        insta::assert_snapshot!(doc, @r"
        **truncatewords**

        [Documentation](https://docs.djangoproject.com/en/stable/ref/templates/builtins/#truncatewords)
        ");
    }

    #[test]
    fn test_hover_range_covers_word() {
        let document = TextDocument::new("{% extends 'base.html' %}".to_string(), 1, "django-html");
        let request = DocumentRequest {
            document: &document,
            position: ls_types::Position::new(0, 4),
            encoding: PositionEncoding::Utf16,
            supports_snippets: true,
        };
        let hover = CatalogHover::new(builtin_catalog()).provide(&request).unwrap();
        assert_eq!(
            hover.range,
            Some(ls_types::Range::new(
                ls_types::Position::new(0, 3),
                ls_types::Position::new(0, 10)
            ))
        );
    }

    #[test]
    fn test_no_hover_on_unknown_word() {
        assert!(hover("{{ username }}", 0, 5).is_none());
    }

    #[test]
    fn test_no_hover_without_word() {
        assert!(hover("{%  %}", 0, 3).is_none());
        assert!(hover("", 0, 0).is_none());
        assert!(hover("{% if %}", 4, 0).is_none());
    }

    #[test]
    fn test_tag_wins_over_filter_with_same_name() {
        let catalog = Catalog::new(
            vec![TagEntry::new("shared", "{% shared %}", "The tag.", None)],
            vec![FilterEntry::new("shared")],
        );
        let doc = hover_with(&catalog, "shared", 0, 2).unwrap();
        assert_eq!(doc, "**shared**\n\nThe tag.");
    }
}
