//! LSP text document representation with line indexing.

use thiserror::Error;
use tower_lsp_server::ls_types::Position;
use tower_lsp_server::ls_types::Range;
use tower_lsp_server::ls_types::TextDocumentContentChangeEvent;

use crate::encoding::PositionEncoding;
use crate::line_index::LineIndex;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DocumentError {
    #[error("position {line}:{character} is outside the document")]
    InvalidPosition { line: u32, character: u32 },
    #[error("range start {start} is after range end {end}")]
    InvertedRange { start: u32, end: u32 },
}

impl DocumentError {
    fn invalid(position: Position) -> Self {
        Self::InvalidPosition {
            line: position.line,
            character: position.character,
        }
    }
}

/// In-memory representation of an open document.
///
/// Combines content with the version and language id reported by the client
/// and a line index kept in step with every edit.
#[derive(Clone, Debug)]
pub struct TextDocument {
    content: String,
    version: i32,
    language_id: String,
    line_index: LineIndex,
}

impl TextDocument {
    #[must_use]
    pub fn new(content: String, version: i32, language_id: impl Into<String>) -> Self {
        let line_index = LineIndex::new(&content);
        Self {
            content,
            version,
            language_id: language_id.into(),
            line_index,
        }
    }

    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    #[must_use]
    pub fn version(&self) -> i32 {
        self.version
    }

    /// Language identifier as sent by the client (`django-html`, `html`, ...).
    #[must_use]
    pub fn language_id(&self) -> &str {
        &self.language_id
    }

    #[must_use]
    pub fn line_index(&self) -> &LineIndex {
        &self.line_index
    }

    /// Text of `line` without its line ending.
    #[must_use]
    pub fn line(&self, line: u32) -> Option<&str> {
        let start = self.line_index.line_start(line)?;
        let end = self.line_index.line_end(line, &self.content)?;
        self.content.get(start as usize..end as usize)
    }

    /// Text from the start of the cursor's line up to the cursor.
    #[must_use]
    pub fn line_prefix(&self, position: Position, encoding: PositionEncoding) -> Option<&str> {
        let start = self.line_index.line_start(position.line)?;
        let cursor = self.offset(position, encoding)?;
        self.content.get(start as usize..cursor as usize)
    }

    /// The identifier-like word touching the cursor and its range.
    ///
    /// A word is a maximal run of ASCII alphanumerics and underscores that
    /// contains the character at the cursor or the one just before it.
    #[must_use]
    pub fn word_at(&self, position: Position, encoding: PositionEncoding) -> Option<(&str, Range)> {
        let line_start = self.line_index.line_start(position.line)? as usize;
        let line = self.line(position.line)?;
        let cursor = self.offset(position, encoding)? as usize - line_start;

        let is_word = |ch: char| ch.is_ascii_alphanumeric() || ch == '_';

        let start = line[..cursor]
            .char_indices()
            .rev()
            .take_while(|&(_, ch)| is_word(ch))
            .last()
            .map_or(cursor, |(index, _)| index);
        let end = line[cursor..]
            .char_indices()
            .find(|&(_, ch)| !is_word(ch))
            .map_or(line.len(), |(index, _)| cursor + index);

        if start == end {
            return None;
        }

        let range = Range::new(
            self.position(offset_u32(line_start + start), encoding),
            self.position(offset_u32(line_start + end), encoding),
        );
        Some((&line[start..end], range))
    }

    /// Text covered by `range`.
    pub fn text_in_range(&self, range: Range, encoding: PositionEncoding) -> Result<&str, DocumentError> {
        let (start, end) = self.byte_range(range, encoding)?;
        Ok(&self.content[start..end])
    }

    /// Range spanning the whole document.
    #[must_use]
    pub fn full_range(&self, encoding: PositionEncoding) -> Range {
        let end = self.position(offset_u32(self.content.len()), encoding);
        Range::new(Position::new(0, 0), end)
    }

    #[must_use]
    pub fn offset(&self, position: Position, encoding: PositionEncoding) -> Option<u32> {
        self.line_index.offset(position, &self.content, encoding)
    }

    #[must_use]
    pub fn position(&self, offset: u32, encoding: PositionEncoding) -> Position {
        self.line_index.position(offset, &self.content, encoding)
    }

    /// Apply client edits in order, then record the new version.
    ///
    /// Each ranged change is resolved against the text produced by the
    /// previous one; a change without a range replaces the whole content.
    /// The batch is all or nothing: on error the document is left untouched.
    pub fn update(
        &mut self,
        changes: Vec<TextDocumentContentChangeEvent>,
        version: i32,
        encoding: PositionEncoding,
    ) -> Result<(), DocumentError> {
        let mut content = self.content.clone();
        let mut line_index = self.line_index.clone();

        for change in changes {
            match change.range {
                Some(range) => {
                    let (start, end) = byte_range(&line_index, &content, range, encoding)?;
                    content.replace_range(start..end, &change.text);
                }
                None => content = change.text,
            }
            line_index = LineIndex::new(&content);
        }

        self.content = content;
        self.line_index = line_index;
        self.version = version;
        Ok(())
    }

    fn byte_range(&self, range: Range, encoding: PositionEncoding) -> Result<(usize, usize), DocumentError> {
        byte_range(&self.line_index, &self.content, range, encoding)
    }
}

fn byte_range(
    line_index: &LineIndex,
    content: &str,
    range: Range,
    encoding: PositionEncoding,
) -> Result<(usize, usize), DocumentError> {
    let start = line_index
        .offset(range.start, content, encoding)
        .ok_or_else(|| DocumentError::invalid(range.start))?;
    let end = line_index
        .offset(range.end, content, encoding)
        .ok_or_else(|| DocumentError::invalid(range.end))?;
    if start > end {
        return Err(DocumentError::InvertedRange { start, end });
    }
    Ok((start as usize, end as usize))
}

fn offset_u32(offset: usize) -> u32 {
    u32::try_from(offset).unwrap_or(u32::MAX)
}
