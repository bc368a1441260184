//! IDE features for Django templates.
//!
//! Completion, hover and formatting responders over the static catalog, plus
//! the trigger predicates and the `extends` lookup they rely on. Each
//! responder kind sits behind a one-method provider trait so the server only
//! has to wire requests to [`Providers`].

pub mod completions;
pub mod formatting;
pub mod hierarchy;
pub mod hover;
pub mod providers;
pub mod snippets;
pub mod trigger;

pub use completions::FilterCompletions;
pub use completions::TagCompletions;
pub use formatting::format_delimiters;
pub use formatting::DelimiterFormatter;
pub use hierarchy::parent_template;
pub use hover::CatalogHover;
pub use providers::CompletionProvider;
pub use providers::DocumentRequest;
pub use providers::FormattingProvider;
pub use providers::FormattingRequest;
pub use providers::HoverProvider;
pub use providers::Providers;
pub use trigger::is_filter_context;
pub use trigger::is_tag_context;
