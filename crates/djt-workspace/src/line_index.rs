use tower_lsp_server::ls_types::Position;

use crate::encoding::PositionEncoding;

/// Pre-computed line start offsets for position/offset conversion.
///
/// Line starts are byte offsets into the UTF-8 text. Column conversion walks
/// a single line, so lookups cost O(log n) for the line plus the line length.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineIndex {
    line_starts: Vec<u32>,
    length: u32,
}

impl LineIndex {
    #[must_use]
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![0];
        for (offset, byte) in text.bytes().enumerate() {
            if byte == b'\n' {
                line_starts.push(u32::try_from(offset + 1).unwrap_or(u32::MAX));
            }
        }

        Self {
            line_starts,
            length: u32::try_from(text.len()).unwrap_or(u32::MAX),
        }
    }

    #[must_use]
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    #[must_use]
    pub fn line_start(&self, line: u32) -> Option<u32> {
        self.line_starts.get(line as usize).copied()
    }

    /// Byte offset just past the content of `line`, excluding its line ending.
    #[must_use]
    pub fn line_end(&self, line: u32, text: &str) -> Option<u32> {
        let start = self.line_start(line)?;
        let next = self
            .line_starts
            .get(line as usize + 1)
            .copied()
            .unwrap_or(self.length);
        let raw = text.get(start as usize..next as usize)?;
        let content = raw.trim_end_matches(['\n', '\r']);
        Some(start + u32::try_from(content.len()).unwrap_or(0))
    }

    /// Convert an LSP position to a byte offset.
    ///
    /// Columns past the end of the line clamp to the line end. Returns `None`
    /// only for lines beyond the document.
    #[must_use]
    pub fn offset(&self, position: Position, text: &str, encoding: PositionEncoding) -> Option<u32> {
        let start = self.line_start(position.line)?;
        let end = self.line_end(position.line, text)?;
        let line = text.get(start as usize..end as usize)?;

        let mut units = 0;
        let mut bytes = 0;
        for ch in line.chars() {
            if units >= position.character {
                break;
            }
            units += encoding.char_len(ch);
            bytes += u32::try_from(ch.len_utf8()).unwrap_or(0);
        }

        Some(start + bytes)
    }

    /// Convert a byte offset to an LSP position.
    #[must_use]
    pub fn position(&self, offset: u32, text: &str, encoding: PositionEncoding) -> Position {
        let offset = offset.min(self.length);
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(line) => line.saturating_sub(1),
        };

        let line_start = self.line_starts[line];
        let character = text
            .get(line_start as usize..offset as usize)
            .map_or(0, |prefix| prefix.chars().map(|ch| encoding.char_len(ch)).sum());

        Position::new(u32::try_from(line).unwrap_or(0), character)
    }
}
