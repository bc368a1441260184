//! Predicates deciding whether the text before the cursor asks for tags or
//! filters.
//!
//! Both take the line text from the line start up to the cursor.

/// Marker opening a template tag.
pub const TAG_OPEN: &str = "{%";

/// Marker applying a filter to a value.
pub const FILTER_PIPE: char = '|';

/// Characters whose typing should request tag completions.
pub const TAG_TRIGGER_CHARACTERS: &[char] = &['{', '%'];

/// Characters whose typing should request filter completions.
pub const FILTER_TRIGGER_CHARACTERS: &[char] = &[FILTER_PIPE];

/// True when the line opens a tag or the cursor sits right after `{%`.
#[must_use]
pub fn is_tag_context(prefix: &str) -> bool {
    prefix.trim_start().starts_with(TAG_OPEN) || prefix.ends_with(TAG_OPEN)
}

/// True when the cursor sits right after `|`.
#[must_use]
pub fn is_filter_context(prefix: &str) -> bool {
    prefix.ends_with(FILTER_PIPE)
}

/// Byte index of an unfinished `{%` opener the cursor is still typing in.
///
/// Matches `{%` followed only by optional whitespace and an optional partial
/// tag name, e.g. `{%`, `{% `, `{% en`.
#[must_use]
pub fn open_tag_start(prefix: &str) -> Option<usize> {
    let rest = prefix.trim_end_matches(|ch: char| ch.is_ascii_alphanumeric() || ch == '_');
    let rest = rest.trim_end();
    rest.strip_suffix(TAG_OPEN).map(str::len)
}
