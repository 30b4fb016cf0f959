//! UTF-8 plausibility by round trip.
//!
//! Bytes are decoded as UTF-8 with replacement, re-encoded, and the
//! re-encoded length compared to the original. A malformed sequence is
//! replaced by U+FFFD (three bytes), which almost always changes the length.
//!
//! This is a heuristic: a truncated three-byte prefix of a four-byte
//! sequence is replaced by a single three-byte U+FFFD and slips through.

use std::borrow::Cow;

/// Decode `bytes` as UTF-8, returning the text only if the round trip
/// preserves the byte length.
pub fn round_trip(bytes: &[u8]) -> Option<Cow<'_, str>> {
    let text = String::from_utf8_lossy(bytes);
    (text.len() == bytes.len()).then_some(text)
}

/// True when `bytes` survive a UTF-8 round trip.
pub fn is_valid_utf8(bytes: &[u8]) -> bool {
    round_trip(bytes).is_some()
}

/// True when `text` survives a UTF-8 round trip with its character count intact.
///
/// A `&str` is always valid UTF-8, so this holds for every input; text that
/// reaches this check without a usable declaration is therefore UTF-8.
pub fn is_utf8_text(text: &str) -> bool {
    String::from_utf8_lossy(text.as_bytes()).chars().count() == text.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_sequences() {
        let cases: &[&[u8]] = &[
            b"",
            b"plain ASCII text, no declaration",
            "h\u{e9}llo".as_bytes(),
            "\u{65e5}\u{672c}\u{8a9e}".as_bytes(),
            "\u{1f600}".as_bytes(),
        ];
        for bytes in cases {
            assert!(is_valid_utf8(bytes), "{bytes:?}");
        }
    }

    #[test]
    fn test_invalid_sequences() {
        let cases: &[(&[u8], &str)] = &[
            (b"caf\xe9", "latin-1 e-acute"),
            (b"\xc3\x28", "invalid continuation byte"),
            (b"\xc0\xaf", "overlong slash"),
            (b"\xed\xa0\x80", "encoded surrogate"),
            (b"\x80abc", "lone continuation byte"),
            (b"abc\xff", "0xFF is never valid"),
        ];
        for &(bytes, desc) in cases {
            assert!(!is_valid_utf8(bytes), "{desc}");
        }
    }

    #[test]
    fn test_round_trip_returns_text() {
        assert_eq!(round_trip("h\u{e9}llo".as_bytes()).as_deref(), Some("h\u{e9}llo"));
        assert_eq!(round_trip(b"h\xe9llo"), None);
    }

    #[test]
    fn test_text_round_trip() {
        assert!(is_utf8_text(""));
        assert!(is_utf8_text("caf\u{e9} \u{20ac}"));
    }
}
