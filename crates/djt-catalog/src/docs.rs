//! Markdown documentation shown alongside completions and hovers.

use crate::entry::FilterEntry;
use crate::entry::TagEntry;

/// Reference page for Django's built-in tags and filters.
pub const BUILTINS_DOCS_URL: &str = "https://docs.djangoproject.com/en/stable/ref/templates/builtins/";

impl TagEntry {
    /// Bold name, description, then a link to the reference when one exists.
    #[must_use]
    pub fn documentation(&self) -> String {
        let mut doc = format!("**{}**\n\n{}", self.name(), self.description());
        if let Some(url) = self.documentation_url() {
            doc.push_str("\n\n[Documentation](");
            doc.push_str(url);
            doc.push(')');
        }
        doc
    }
}

impl FilterEntry {
    #[must_use]
    pub fn documentation_url(&self) -> String {
        format!("{BUILTINS_DOCS_URL}#{}", self.name())
    }

    #[must_use]
    pub fn documentation(&self) -> String {
        format!(
            "**{}**\n\n[Documentation]({})",
            self.name(),
            self.documentation_url()
        )
    }
}
