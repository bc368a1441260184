//! Whitespace normalisation inside template delimiters.
//!
//! Purely textual: there is no tokenizer, so delimiter-like text inside a
//! quoted string (`"{%   x"`) is rewritten as well.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;
use tower_lsp_server::ls_types;

use crate::providers::FormattingProvider;
use crate::providers::FormattingRequest;

/// Applied in order; each rule sees the output of the previous one.
static RULES: LazyLock<[(Regex, &'static str); 4]> = LazyLock::new(|| {
    [
        (rule(r"\{%\s+"), "{% "),
        (rule(r"\s+%\}"), " %}"),
        (rule(r"\{\{\s+"), "{{ "),
        (rule(r"\s+\}\}"), " }}"),
    ]
});

fn rule(pattern: &str) -> Regex {
    Regex::new(pattern).expect("formatting pattern is valid")
}

/// Collapse whitespace runs after `{%`/`{{` and before `%}`/`}}` to one space.
///
/// Borrows the input when nothing changes.
#[must_use]
pub fn format_delimiters(text: &str) -> Cow<'_, str> {
    let formatted = RULES
        .iter()
        .fold(text.to_string(), |acc, (pattern, replacement)| {
            pattern.replace_all(&acc, *replacement).into_owned()
        });

    // A match may rewrite a single space to itself
    if formatted == text {
        Cow::Borrowed(text)
    } else {
        Cow::Owned(formatted)
    }
}

/// Formats a range, or the whole document, with [`format_delimiters`].
pub struct DelimiterFormatter;

impl FormattingProvider for DelimiterFormatter {
    fn provide(&self, request: &FormattingRequest<'_>) -> Vec<ls_types::TextEdit> {
        let range = request
            .range
            .unwrap_or_else(|| request.document.full_range(request.encoding));

        let text = match request.document.text_in_range(range, request.encoding) {
            Ok(text) => text,
            Err(err) => {
                tracing::warn!(%err, "cannot format range");
                return Vec::new();
            }
        };

        match format_delimiters(text) {
            Cow::Borrowed(_) => Vec::new(),
            Cow::Owned(formatted) => vec![ls_types::TextEdit::new(range, formatted)],
        }
    }
}
