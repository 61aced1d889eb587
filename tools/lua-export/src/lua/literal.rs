//! String literal forms
//!
//! Short strings are double-quoted with escapes so that any text survives a
//! reload. Raw payloads use long brackets (`[==[ ... ]==]`), which take bytes
//! verbatim; the bracket level is raised until the closing delimiter cannot
//! be confused with payload bytes.

/// Escape `bytes` as a double-quoted literal
pub fn quote(bytes: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(bytes.len() + 2);
    out.push(b'"');
    for &b in bytes {
        match b {
            b'"' => out.extend_from_slice(b"\\\""),
            b'\\' => out.extend_from_slice(b"\\\\"),
            b'\n' => out.extend_from_slice(b"\\n"),
            b'\r' => out.extend_from_slice(b"\\r"),
            b'\t' => out.extend_from_slice(b"\\t"),
            // Always three digits so a following digit is not absorbed
            0x00..=0x1f | 0x7f => out.extend_from_slice(format!("\\{b:03}").as_bytes()),
            _ => out.push(b),
        }
    }
    out.push(b'"');
    out
}

/// Long-bracket delimiters for one payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LongBracket {
    pub level: usize,
}

impl LongBracket {
    /// Pick the lowest level `>= min_level` whose closing delimiter does not
    /// occur in `payload`, including across the payload/delimiter boundary.
    pub fn for_payload(payload: &[u8], min_level: usize) -> Self {
        let mut level = min_level;
        loop {
            let bracket = Self { level };
            if !bracket.collides(payload) {
                return bracket;
            }
            level += 1;
        }
    }

    pub fn open(&self) -> Vec<u8> {
        self.delimiter(b'[')
    }

    pub fn close(&self) -> Vec<u8> {
        self.delimiter(b']')
    }

    fn delimiter(&self, bracket: u8) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.level + 2);
        out.push(bracket);
        out.resize(self.level + 1, b'=');
        out.push(bracket);
        out
    }

    fn collides(&self, payload: &[u8]) -> bool {
        let close = self.close();
        if payload.windows(close.len()).any(|w| w == close.as_slice()) {
            return true;
        }
        // "]==" at the very end would be completed by the closing "]"
        payload.ends_with(&close[..close.len() - 1])
    }

    /// Bytes to insert after the opening delimiter.
    ///
    /// A reader drops one line break directly after the opening bracket, so a
    /// payload starting with one gets that byte doubled. Doubling the same
    /// byte keeps the pair from being read as a single "\r\n" break.
    pub fn leading_padding(payload: &[u8]) -> &'static [u8] {
        match payload.first() {
            Some(b'\n') => b"\n",
            Some(b'\r') => b"\r",
            _ => b"",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_plain_and_special() {
        assert_eq!(quote(b"diffuseColor"), b"\"diffuseColor\"");
        assert_eq!(quote(b"a\"b\\c"), b"\"a\\\"b\\\\c\"");
        assert_eq!(quote(b"line\nnext\r\t"), b"\"line\\nnext\\r\\t\"");
        assert_eq!(quote(b"\x001"), b"\"\\0001\"");
        assert_eq!(quote(b"\x7f"), b"\"\\127\"");
    }

    #[test]
    fn test_quote_passes_utf8_through() {
        let text = "Knochen_Ä_骨";
        let mut expected = b"\"".to_vec();
        expected.extend_from_slice(text.as_bytes());
        expected.push(b'"');
        assert_eq!(quote(text.as_bytes()), expected);
    }

    #[test]
    fn test_default_level_when_no_collision() {
        let bracket = LongBracket::for_payload(b"\x89PNG\r\n]]", 8);
        assert_eq!(bracket.level, 8);
        assert_eq!(bracket.open(), b"[========[");
        assert_eq!(bracket.close(), b"]========]");
    }

    #[test]
    fn test_level_raised_past_embedded_delimiter() {
        let payload = b"abc]========]def]=========]";
        let bracket = LongBracket::for_payload(payload, 8);
        assert_eq!(bracket.level, 10);
    }

    #[test]
    fn test_level_raised_for_trailing_partial_delimiter() {
        let bracket = LongBracket::for_payload(b"xyz]========", 8);
        assert_eq!(bracket.level, 9);

        // A shorter run of '=' cannot be completed by the closing bracket
        let bracket = LongBracket::for_payload(b"xyz]=======", 8);
        assert_eq!(bracket.level, 8);
    }

    #[test]
    fn test_leading_padding() {
        assert_eq!(LongBracket::leading_padding(b"\nabc"), b"\n");
        assert_eq!(LongBracket::leading_padding(b"\r\nabc"), b"\r");
        assert_eq!(LongBracket::leading_padding(b"abc"), b"");
        assert_eq!(LongBracket::leading_padding(b""), b"");
    }
}
