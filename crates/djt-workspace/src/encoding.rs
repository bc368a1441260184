use tower_lsp_server::ls_types;

/// Unit in which LSP positions count columns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PositionEncoding {
    Utf8,
    #[default]
    Utf16,
    Utf32,
}

impl PositionEncoding {
    #[must_use]
    pub fn to_lsp(self) -> ls_types::PositionEncodingKind {
        match self {
            PositionEncoding::Utf8 => ls_types::PositionEncodingKind::new("utf-8"),
            PositionEncoding::Utf16 => ls_types::PositionEncodingKind::new("utf-16"),
            PositionEncoding::Utf32 => ls_types::PositionEncodingKind::new("utf-32"),
        }
    }

    #[must_use]
    pub fn from_lsp(kind: &ls_types::PositionEncodingKind) -> Option<Self> {
        match kind.as_str() {
            "utf-8" => Some(PositionEncoding::Utf8),
            "utf-16" => Some(PositionEncoding::Utf16),
            "utf-32" => Some(PositionEncoding::Utf32),
            _ => None,
        }
    }

    /// Number of column units `ch` occupies.
    #[must_use]
    pub fn char_len(self, ch: char) -> u32 {
        let len = match self {
            PositionEncoding::Utf8 => ch.len_utf8(),
            PositionEncoding::Utf16 => ch.len_utf16(),
            PositionEncoding::Utf32 => 1,
        };
        u32::try_from(len).unwrap_or(1)
    }
}

/// Negotiate the best encoding with the client based on their capabilities.
/// Prefers UTF-8 > UTF-32 > UTF-16.
#[must_use]
pub fn negotiate_position_encoding(params: &ls_types::InitializeParams) -> PositionEncoding {
    let client_encodings: &[ls_types::PositionEncodingKind] = params
        .capabilities
        .general
        .as_ref()
        .and_then(|general| general.position_encodings.as_ref())
        .map_or(&[], |encodings| encodings.as_slice());

    for preferred in [
        PositionEncoding::Utf8,
        PositionEncoding::Utf32,
        PositionEncoding::Utf16,
    ] {
        if client_encodings
            .iter()
            .any(|kind| PositionEncoding::from_lsp(kind) == Some(preferred))
        {
            return preferred;
        }
    }

    // Clients that say nothing speak UTF-16
    PositionEncoding::Utf16
}

#[cfg(test)]
mod tests {
    use tower_lsp_server::ls_types::ClientCapabilities;
    use tower_lsp_server::ls_types::GeneralClientCapabilities;

    use super::*;

    fn params_with(encodings: Option<Vec<&'static str>>) -> ls_types::InitializeParams {
        ls_types::InitializeParams {
            capabilities: ClientCapabilities {
                general: Some(GeneralClientCapabilities {
                    position_encodings: encodings.map(|kinds| {
                        kinds
                            .into_iter()
                            .map(ls_types::PositionEncodingKind::new)
                            .collect()
                    }),
                    ..Default::default()
                }),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_lsp_type_conversions() {
        for encoding in [
            PositionEncoding::Utf8,
            PositionEncoding::Utf16,
            PositionEncoding::Utf32,
        ] {
            assert_eq!(PositionEncoding::from_lsp(&encoding.to_lsp()), Some(encoding));
        }
        assert_eq!(
            PositionEncoding::from_lsp(&ls_types::PositionEncodingKind::new("unknown")),
            None
        );
    }

    #[test]
    fn test_negotiate_prefers_utf8_when_all_available() {
        let params = params_with(Some(vec!["utf-16", "utf-8", "utf-32"]));
        assert_eq!(negotiate_position_encoding(&params), PositionEncoding::Utf8);
    }

    #[test]
    fn test_negotiate_prefers_utf32_over_utf16() {
        let params = params_with(Some(vec!["utf-16", "utf-32"]));
        assert_eq!(negotiate_position_encoding(&params), PositionEncoding::Utf32);
    }

    #[test]
    fn test_negotiate_fallback_without_capabilities() {
        assert_eq!(
            negotiate_position_encoding(&params_with(None)),
            PositionEncoding::Utf16
        );
        assert_eq!(
            negotiate_position_encoding(&ls_types::InitializeParams::default()),
            PositionEncoding::Utf16
        );
    }

    #[test]
    fn test_char_len_per_encoding() {
        assert_eq!(PositionEncoding::Utf8.char_len('€'), 3);
        assert_eq!(PositionEncoding::Utf16.char_len('€'), 1);
        assert_eq!(PositionEncoding::Utf16.char_len('🎉'), 2);
        assert_eq!(PositionEncoding::Utf32.char_len('🎉'), 1);
    }
}
