use encoding_rs::WINDOWS_1252;

/// Decode statement bytes into text.
///
/// Recent SG exports are UTF-8; older ones are Windows-1252. Undecodable
/// bytes in the legacy path are replaced, never rejected.
pub fn decode_text_lossy(bytes: &[u8]) -> String {
    // UTF-8 BOM
    let bytes = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]).unwrap_or(bytes);

    if let Ok(s) = std::str::from_utf8(bytes) {
        return s.to_string();
    }

    let (decoded, _, _) = WINDOWS_1252.decode(bytes);
    decoded.into_owned()
}

/// Comparison key for header matching: lowercased, accent-folded,
/// whitespace-collapsed, punctuation-stripped. Idempotent.
///
/// Keeps only alphanumerics, single spaces, `-`, `_` and `'`, so that
/// "Libellé", "LIBELLE" and a mojibake "Libell\u{FFFD}" all collapse to
/// the same key.
pub fn normalize_key(raw: &str) -> String {
    let mut folded = String::with_capacity(raw.len());
    for c in raw.trim().to_lowercase().chars() {
        match c {
            'é' | 'è' | 'ê' | 'ë' => folded.push('e'),
            'à' | 'â' | 'ä' => folded.push('a'),
            'î' | 'ï' => folded.push('i'),
            'ô' | 'ö' => folded.push('o'),
            'ù' | 'û' | 'ü' => folded.push('u'),
            'ç' => folded.push('c'),
            'œ' => folded.push_str("oe"),
            // A lossy legacy decode turns "é" (by far the most common
            // accented letter in these headers) into U+FFFD.
            '\u{FFFD}' => folded.push('e'),
            '\u{2018}' | '\u{2019}' => folded.push('\''),
            _ => folded.push(c),
        }
    }

    let mut out = String::with_capacity(folded.len());
    let mut pending_space = false;
    for c in folded.chars() {
        if c.is_whitespace() {
            pending_space = !out.is_empty();
        } else if c.is_alphanumeric() || c == '-' || c == '_' || c == '\'' {
            if pending_space {
                out.push(' ');
                pending_space = false;
            }
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_utf8() {
        assert_eq!(decode_text_lossy("Libellé".as_bytes()), "Libellé");
    }

    #[test]
    fn test_decode_strips_bom() {
        assert_eq!(decode_text_lossy(b"\xEF\xBB\xBFDate"), "Date");
    }

    #[test]
    fn test_decode_windows_1252_fallback() {
        // "Libellé" encoded as Windows-1252: é = 0xE9, invalid as UTF-8.
        assert_eq!(decode_text_lossy(b"Libell\xE9"), "Libellé");
        assert_eq!(decode_text_lossy(b"D\xE9bit;Cr\xE9dit"), "Débit;Crédit");
    }

    #[test]
    fn test_decode_never_fails_on_arbitrary_bytes() {
        let samples: &[&[u8]] = &[
            b"",
            b"\x00",
            b"\xFF\xFE\xFD",
            b"\x80\x81\x8D\x8F\x90\x9D",
            b"ok\xC3text",
            &[0u8; 64],
        ];
        for bytes in samples {
            // Total function: any byte sequence yields a String.
            let _ = decode_text_lossy(bytes);
        }
    }

    #[test]
    fn test_normalize_accent_and_case_insensitive() {
        assert_eq!(normalize_key("Libellé"), normalize_key("LIBELLE"));
        assert_eq!(normalize_key("Date opération"), "date operation");
        assert_eq!(normalize_key("Détail de l'écriture"), "detail de l'ecriture");
    }

    #[test]
    fn test_normalize_curly_apostrophe() {
        assert_eq!(
            normalize_key("Date de l\u{2019}opération"),
            "date de l'operation"
        );
    }

    #[test]
    fn test_normalize_mojibake_replacement_char() {
        assert_eq!(normalize_key("Libell\u{FFFD}"), "libelle");
    }

    #[test]
    fn test_normalize_collapses_whitespace_and_strips_punctuation() {
        assert_eq!(normalize_key("  Montant   de  l'opération ;"), "montant de l'operation");
        assert_eq!(normalize_key("Crédit (€)"), "credit");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for s in ["Libellé", "  Date   opération ; ", "n/a", "œuvre", "\u{FFFD}x"] {
            let once = normalize_key(s);
            assert_eq!(normalize_key(&once), once);
        }
    }
}
