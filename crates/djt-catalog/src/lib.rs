//! Static knowledge base of Django template constructs.
//!
//! The [`Catalog`] holds every built-in tag (with an insertable snippet) and
//! every built-in filter, in declaration order, along with the markdown
//! documentation rendered for completions and hovers.

mod builtins;
mod catalog;
mod docs;
mod entry;

pub use builtins::builtin_catalog;
pub use catalog::Catalog;
pub use catalog::Construct;
pub use docs::BUILTINS_DOCS_URL;
pub use entry::FilterEntry;
pub use entry::TagEntry;
