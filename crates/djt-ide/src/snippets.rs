use std::sync::LazyLock;

use regex::Captures;
use regex::Regex;
use rustc_hash::FxHashMap;

/// `${N:default}`, `${N|first,second|}`, `${N}` and `$N` tab stops.
static TAB_STOP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{(\d+):([^}]*)\}|\$\{(\d+)\|([^,|}]*)[^}]*\}|\$\{(\d+)\}|\$(\d+)")
        .expect("tab stop pattern is valid")
});

/// Reduce an LSP snippet to the plain text a client without snippet support
/// should insert.
///
/// Placeholders become their default text (the first choice for choice
/// placeholders); bare tab stops take the default of the placeholder with the
/// same index, or vanish when there is none.
#[must_use]
pub fn snippet_to_plain_text(snippet: &str) -> String {
    let mut defaults: FxHashMap<&str, &str> = FxHashMap::default();
    for caps in TAB_STOP.captures_iter(snippet) {
        if let (Some(index), Some(default)) = (caps.get(1), caps.get(2)) {
            defaults.entry(index.as_str()).or_insert(default.as_str());
        } else if let (Some(index), Some(choice)) = (caps.get(3), caps.get(4)) {
            defaults.entry(index.as_str()).or_insert(choice.as_str());
        }
    }

    TAB_STOP
        .replace_all(snippet, |caps: &Captures<'_>| {
            if let Some(default) = caps.get(2).or_else(|| caps.get(4)) {
                return default.as_str().to_string();
            }
            caps.get(5)
                .or_else(|| caps.get(6))
                .and_then(|index| defaults.get(index.as_str()))
                .map(ToString::to_string)
                .unwrap_or_default()
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_defaults() {
        assert_eq!(
            snippet_to_plain_text("{% for ${1:item} in ${2:items} %}"),
            "{% for item in items %}"
        );
    }

    #[test]
    fn test_bare_tab_stops_are_dropped() {
        assert_eq!(
            snippet_to_plain_text("{% if ${1:condition} %}\n\t$0\n{% endif %}"),
            "{% if condition %}\n\t\n{% endif %}"
        );
        assert_eq!(snippet_to_plain_text("{% now $1 %}"), "{% now  %}");
    }

    #[test]
    fn test_mirrored_tab_stop_reuses_default() {
        assert_eq!(
            snippet_to_plain_text("{% block ${1:name} %}\n\t$0\n{% endblock ${1} %}"),
            "{% block name %}\n\t\n{% endblock name %}"
        );
    }

    #[test]
    fn test_choice_uses_first_option() {
        assert_eq!(
            snippet_to_plain_text("{% autoescape ${1|on,off|} %}"),
            "{% autoescape on %}"
        );
    }

    #[test]
    fn test_plain_text_is_unchanged() {
        assert_eq!(snippet_to_plain_text("{% csrf_token %}"), "{% csrf_token %}");
    }
}
