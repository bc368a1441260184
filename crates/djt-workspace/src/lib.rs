//! In-memory text documents for the language server.
//!
//! Documents are addressed with LSP positions whose column unit depends on the
//! negotiated [`PositionEncoding`]; everything here converts between those
//! positions and byte offsets into the UTF-8 content.

mod document;
mod encoding;
mod line_index;

pub use document::DocumentError;
pub use document::TextDocument;
pub use encoding::negotiate_position_encoding;
pub use encoding::PositionEncoding;
pub use line_index::LineIndex;
