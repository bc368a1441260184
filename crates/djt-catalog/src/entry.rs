/// A template tag known to the catalog.
///
/// The snippet is emitted verbatim as completion text, including its
/// placeholder markers (`$1`, `${1:name}`, `$0`). Stepping between
/// placeholders is left to the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagEntry {
    name: String,
    snippet: String,
    description: String,
    documentation_url: Option<String>,
}

impl TagEntry {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        snippet: impl Into<String>,
        description: impl Into<String>,
        documentation_url: Option<String>,
    ) -> Self {
        Self {
            name: name.into(),
            snippet: snippet.into(),
            description: description.into(),
            documentation_url,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn snippet(&self) -> &str {
        &self.snippet
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn documentation_url(&self) -> Option<&str> {
        self.documentation_url.as_deref()
    }

    /// Whether the snippet spans several lines (an opener with its closing tag).
    #[must_use]
    pub fn is_block(&self) -> bool {
        self.snippet.contains('\n')
    }
}

/// A template filter known to the catalog.
///
/// Filters are inserted as bare identifiers, so only the name is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterEntry {
    name: String,
}

impl FilterEntry {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}
