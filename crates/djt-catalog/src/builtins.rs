//! Built-in Django template tags and filters.
//!
//! Declaration order here is the order completions are offered in.

use std::sync::LazyLock;

use crate::catalog::Catalog;
use crate::docs::BUILTINS_DOCS_URL;
use crate::entry::FilterEntry;
use crate::entry::TagEntry;

/// The process-wide built-in catalog, built on first access.
#[must_use]
pub fn builtin_catalog() -> &'static Catalog {
    &BUILTIN_CATALOG
}

static BUILTIN_CATALOG: LazyLock<Catalog> = LazyLock::new(|| {
    let tags = vec![
        // Control flow
        tag(
            "if",
            "{% if ${1:condition} %}\n\t$0\n{% endif %}",
            "Evaluates a condition and renders the block when it is true.",
        ),
        tag(
            "elif",
            "{% elif ${1:condition} %}",
            "Adds another condition to an `if` block.",
        ),
        tag(
            "else",
            "{% else %}",
            "Renders when no preceding branch of an `if` or `ifchanged` block matched.",
        ),
        closing("endif", "if"),
        tag(
            "for",
            "{% for ${1:item} in ${2:items} %}\n\t$0\n{% endfor %}",
            "Loops over each item in a sequence.",
        ),
        tag(
            "empty",
            "{% empty %}",
            "Renders inside a `for` block when the sequence is empty or missing.",
        ),
        closing("endfor", "for"),
        tag(
            "block",
            "{% block ${1:name} %}\n\t$0\n{% endblock ${1} %}",
            "Defines a block that child templates can override.",
        ),
        closing("endblock", "block"),
        tag(
            "extends",
            "{% extends \"${1:base.html}\" %}",
            "Signals that this template extends a parent template.",
        ),
        tag(
            "include",
            "{% include \"${1:template.html}\" %}",
            "Loads a template and renders it with the current context.",
        ),
        tag(
            "with",
            "{% with ${1:name}=${2:value} %}\n\t$0\n{% endwith %}",
            "Caches a complex variable under a simpler name for the block.",
        ),
        closing("endwith", "with"),
        // Libraries and URLs
        tag(
            "load",
            "{% load ${1:library} %}",
            "Loads a custom template tag set.",
        ),
        tag(
            "url",
            "{% url '${1:view_name}' %}",
            "Returns an absolute path reference matching a given view and optional parameters.",
        ),
        tag(
            "static",
            "{% static '${1:path}' %}",
            "Links to a static file stored in `STATIC_ROOT`.",
        ),
        tag(
            "csrf_token",
            "{% csrf_token %}",
            "Provides protection against cross-site request forgeries.",
        ),
        // Output control
        tag(
            "comment",
            "{% comment %}\n\t$0\n{% endcomment %}",
            "Ignores everything between `comment` and `endcomment`.",
        ),
        closing("endcomment", "comment"),
        tag(
            "autoescape",
            "{% autoescape ${1|on,off|} %}\n\t$0\n{% endautoescape %}",
            "Controls the current auto-escaping behavior.",
        ),
        closing("endautoescape", "autoescape"),
        tag(
            "cycle",
            "{% cycle ${1:'odd'} ${2:'even'} %}",
            "Produces one of its arguments each time this tag is encountered.",
        ),
        tag(
            "resetcycle",
            "{% resetcycle %}",
            "Resets a previous cycle so that it restarts from its first item.",
        ),
        tag(
            "filter",
            "{% filter ${1:lower} %}\n\t$0\n{% endfilter %}",
            "Filters the contents of the block through one or more filters.",
        ),
        closing("endfilter", "filter"),
        tag(
            "firstof",
            "{% firstof ${1:var1} ${2:var2} %}",
            "Outputs the first argument variable that is not false.",
        ),
        tag(
            "ifchanged",
            "{% ifchanged %}\n\t$0\n{% endifchanged %}",
            "Checks if a value has changed from the last iteration of a loop.",
        ),
        closing("endifchanged", "ifchanged"),
        tag(
            "lorem",
            "{% lorem ${1:1} ${2|p,w,b|} %}",
            "Displays random lorem ipsum Latin text.",
        ),
        tag(
            "now",
            "{% now \"${1:jS F Y H:i}\" %}",
            "Displays the current date and/or time, using a format string.",
        ),
        tag(
            "regroup",
            "{% regroup ${1:list} by ${2:attribute} as ${3:grouped} %}",
            "Regroups a list of alike objects by a common attribute.",
        ),
        tag(
            "spaceless",
            "{% spaceless %}\n\t$0\n{% endspaceless %}",
            "Removes whitespace between HTML tags.",
        ),
        closing("endspaceless", "spaceless"),
        tag(
            "templatetag",
            "{% templatetag ${1|openblock,closeblock,openvariable,closevariable,openbrace,closebrace,opencomment,closecomment|} %}",
            "Outputs one of the syntax characters used to compose template tags.",
        ),
        tag(
            "verbatim",
            "{% verbatim %}\n\t$0\n{% endverbatim %}",
            "Stops the template engine from rendering the contents of the block.",
        ),
        closing("endverbatim", "verbatim"),
        tag(
            "widthratio",
            "{% widthratio ${1:value} ${2:max_value} ${3:max_width} %}",
            "Calculates the ratio of a given value to a maximum value.",
        ),
        tag(
            "debug",
            "{% debug %}",
            "Outputs a whole load of debugging information.",
        ),
    ];

    let filters = [
        "add",
        "addslashes",
        "capfirst",
        "center",
        "cut",
        "date",
        "default",
        "default_if_none",
        "dictsort",
        "dictsortreversed",
        "divisibleby",
        "escape",
        "escapejs",
        "escapeseq",
        "filesizeformat",
        "first",
        "floatformat",
        "force_escape",
        "get_digit",
        "iriencode",
        "join",
        "json_script",
        "last",
        "length",
        "linebreaks",
        "linebreaksbr",
        "linenumbers",
        "ljust",
        "lower",
        "make_list",
        "phone2numeric",
        "pluralize",
        "pprint",
        "random",
        "rjust",
        "safe",
        "safeseq",
        "slice",
        "slugify",
        "stringformat",
        "striptags",
        "time",
        "timesince",
        "timeuntil",
        "title",
        "truncatechars",
        "truncatechars_html",
        "truncatewords",
        "truncatewords_html",
        "unordered_list",
        "upper",
        "urlencode",
        "urlize",
        "urlizetrunc",
        "wordcount",
        "wordwrap",
        "yesno",
    ]
    .into_iter()
    .map(FilterEntry::new)
    .collect();

    Catalog::new(tags, filters)
});

fn tag(name: &'static str, snippet: &'static str, description: &'static str) -> TagEntry {
    TagEntry::new(
        name,
        snippet,
        description,
        Some(format!("{BUILTINS_DOCS_URL}#{name}")),
    )
}

/// A closing tag. These have no reference section of their own.
fn closing(name: &'static str, opener: &'static str) -> TagEntry {
    TagEntry::new(
        name,
        format!("{{% {name} %}}"),
        format!("Closes a `{opener}` block."),
        None,
    )
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_every_tag_is_found_by_its_name() {
        let catalog = builtin_catalog();
        for tag in catalog.tags() {
            assert_eq!(catalog.lookup_tag(tag.name()), Some(tag));
        }
        assert!(catalog.lookup_tag("endfoo").is_none());
    }

    #[test]
    fn test_every_filter_is_found_by_its_name() {
        let catalog = builtin_catalog();
        for filter in catalog.filters() {
            assert_eq!(catalog.lookup_filter(filter.name()), Some(filter));
        }
        assert!(catalog.lookup_filter("frobnicate").is_none());
    }

    #[test]
    fn test_names_are_unique_and_disjoint() {
        let catalog = builtin_catalog();
        let tags: HashSet<&str> = catalog.tags().iter().map(TagEntry::name).collect();
        let filters: HashSet<&str> = catalog.filters().iter().map(FilterEntry::name).collect();

        assert_eq!(tags.len(), catalog.tags().len());
        assert_eq!(filters.len(), catalog.filters().len());
        assert!(tags.is_disjoint(&filters));
    }

    #[test]
    fn test_original_tags_are_present() {
        let catalog = builtin_catalog();
        for name in [
            "if", "else", "elif", "endif", "for", "endfor", "block", "endblock", "extends",
            "include", "with", "endwith",
        ] {
            assert!(catalog.lookup_tag(name).is_some(), "missing tag {name}");
        }
    }

    #[test]
    fn test_declaration_order_is_preserved() {
        let names: Vec<&str> = builtin_catalog()
            .tags()
            .iter()
            .take(4)
            .map(TagEntry::name)
            .collect();
        assert_eq!(names, vec!["if", "elif", "else", "endif"]);

        let first_filter = builtin_catalog().filters().first().map(FilterEntry::name);
        assert_eq!(first_filter, Some("add"));
    }

    #[test]
    fn test_snippets_are_delimited_tags() {
        for tag in builtin_catalog().tags() {
            assert!(tag.snippet().starts_with("{% "), "{}", tag.name());
            assert!(tag.snippet().ends_with(" %}"), "{}", tag.name());
        }
    }

    #[test]
    fn test_closing_tags_have_no_reference_link() {
        let catalog = builtin_catalog();
        let endif = catalog.lookup_tag("endif").unwrap();
        assert_eq!(endif.snippet(), "{% endif %}");
        assert!(endif.documentation_url().is_none());

        let extends = catalog.lookup_tag("extends").unwrap();
        assert_eq!(
            extends.documentation_url(),
            Some("https://docs.djangoproject.com/en/stable/ref/templates/builtins/#extends")
        );
    }

    #[test]
    fn test_block_snippet_mirrors_name() {
        let block = builtin_catalog().lookup_tag("block").unwrap();
        assert_eq!(
            block.snippet(),
            "{% block ${1:name} %}\n\t$0\n{% endblock ${1} %}"
        );
        assert!(block.is_block());
    }
}
