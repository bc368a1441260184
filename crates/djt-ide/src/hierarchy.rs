use std::sync::LazyLock;

use regex::Regex;

static EXTENDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\{%\s*extends\s+(?:"([^"]*)"|'([^']*)')\s*%\}"#)
        .expect("extends pattern is valid")
});

/// Name of the template this one extends, from the first literal
/// `{% extends "..." %}` in the text.
///
/// Variable parents (`{% extends base %}`) are not resolved.
#[must_use]
pub fn parent_template(text: &str) -> Option<&str> {
    let caps = EXTENDS.captures(text)?;
    caps.get(1).or_else(|| caps.get(2)).map(|name| name.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_double_quoted_parent() {
        assert_eq!(
            parent_template("{% extends \"base.html\" %}\n{% block content %}{% endblock %}"),
            Some("base.html")
        );
    }

    #[test]
    fn test_single_quoted_parent() {
        assert_eq!(
            parent_template("{%extends 'layouts/app.html'%}"),
            Some("layouts/app.html")
        );
    }

    #[test]
    fn test_first_declaration_wins() {
        let text = "{% extends 'a.html' %}\n{% extends 'b.html' %}";
        assert_eq!(parent_template(text), Some("a.html"));
    }

    #[test]
    fn test_no_parent() {
        assert_eq!(parent_template("<p>{{ title }}</p>"), None);
        assert_eq!(parent_template("{% extends base_template %}"), None);
        assert_eq!(parent_template(""), None);
    }

    #[test]
    fn test_mismatched_quotes_do_not_match() {
        assert_eq!(parent_template("{% extends \"base.html' %}"), None);
    }
}
