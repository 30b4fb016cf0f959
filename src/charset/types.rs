//! Charset values and the charset registry lookup.

use std::borrow::Cow;
use std::fmt;

use encoding_rs::Encoding;
use serde::{Serialize, Serializer};
use thiserror::Error;

/// Errors raised by charset lookup and strict decoding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CharsetError {
    /// The label does not name a charset known to the registry.
    #[error("unsupported charset: {0}")]
    Unsupported(String),

    /// The bytes are not valid under the named charset.
    #[error("input is not valid {0}")]
    Malformed(&'static str),

    /// The charset is registered but has no decoder that yields text.
    #[error("charset {0} cannot decode content")]
    Undecodable(&'static str),
}

/// Result type for charset operations.
pub type CharsetResult<T> = Result<T, CharsetError>;

/// Labels that name ISO-8859-1 proper rather than its WHATWG windows-1252 alias.
const LATIN1_LABELS: &[&str] = &[
    "iso-8859-1",
    "iso8859-1",
    "iso88591",
    "iso_8859-1",
    "iso_8859-1:1987",
    "iso-ir-100",
    "latin1",
    "l1",
    "csisolatin1",
    "cp819",
    "ibm819",
];

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
enum Kind {
    Latin1,
    Registry(&'static Encoding),
}

/// A named text encoding.
///
/// Either the reference encoding ([`Charset::ISO_8859_1`], which maps every
/// byte to exactly one character and back) or an encoding from the WHATWG
/// registry.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Charset {
    kind: Kind,
}

impl Charset {
    /// ISO-8859-1. Decoding cannot fail and re-encoding reproduces the input.
    pub const ISO_8859_1: Charset = Charset { kind: Kind::Latin1 };

    /// UTF-8.
    pub const UTF_8: Charset = Charset {
        kind: Kind::Registry(encoding_rs::UTF_8),
    };

    /// Look up a charset by name or alias.
    ///
    /// Surrounding whitespace is ignored and matching is case-insensitive.
    pub fn for_label(label: &str) -> CharsetResult<Charset> {
        let normalized = label.trim().to_ascii_lowercase();
        if LATIN1_LABELS.contains(&normalized.as_str()) {
            return Ok(Self::ISO_8859_1);
        }
        Encoding::for_label(normalized.as_bytes())
            .map(Charset::from)
            .ok_or_else(|| CharsetError::Unsupported(label.to_string()))
    }

    /// Canonical name of the charset.
    pub fn name(&self) -> &'static str {
        match self.kind {
            Kind::Latin1 => "ISO-8859-1",
            Kind::Registry(encoding) => encoding.name(),
        }
    }

    /// Decode `bytes`, substituting U+FFFD for malformed sequences.
    pub fn decode<'a>(&self, bytes: &'a [u8]) -> Cow<'a, str> {
        match self.kind {
            Kind::Latin1 => encoding_rs::mem::decode_latin1(bytes),
            Kind::Registry(encoding) => encoding.decode_without_bom_handling(bytes).0,
        }
    }

    /// Decode `bytes`, failing on the first malformed sequence.
    pub fn decode_strict<'a>(&self, bytes: &'a [u8]) -> CharsetResult<Cow<'a, str>> {
        match self.kind {
            Kind::Latin1 => Ok(encoding_rs::mem::decode_latin1(bytes)),
            Kind::Registry(encoding) => encoding
                .decode_without_bom_handling_and_without_replacement(bytes)
                .ok_or(CharsetError::Malformed(encoding.name())),
        }
    }

    /// Decode `bytes` under a declared charset, substituting U+FFFD for
    /// malformed sequences.
    ///
    /// Fails only for the WHATWG `replacement` encoding (labels such as
    /// `iso-2022-kr` and `hz-gb-2312`), which turns any non-empty input
    /// into a single U+FFFD.
    pub fn decode_declared<'a>(&self, bytes: &'a [u8]) -> CharsetResult<Cow<'a, str>> {
        match self.kind {
            Kind::Registry(encoding) if encoding == encoding_rs::REPLACEMENT && !bytes.is_empty() => {
                Err(CharsetError::Undecodable(encoding.name()))
            }
            _ => Ok(self.decode(bytes)),
        }
    }

    /// Encode `text`.
    ///
    /// Characters the charset cannot represent are written as HTML numeric
    /// character references (`&#NNNN;`).
    pub fn encode<'a>(&self, text: &'a str) -> Cow<'a, [u8]> {
        match self.kind {
            Kind::Latin1 => encode_latin1(text),
            Kind::Registry(encoding) => encoding.encode(text).0,
        }
    }

    /// True when all 256 byte values decode and re-encode to themselves.
    pub fn is_lossless_single_byte(&self) -> bool {
        match self.kind {
            Kind::Latin1 => true,
            Kind::Registry(encoding) => {
                if !encoding.is_single_byte() {
                    return false;
                }
                let all: Vec<u8> = (0..=u8::MAX).collect();
                match self.decode_strict(&all) {
                    Ok(text) => self.encode(&text).as_ref() == all.as_slice(),
                    Err(_) => false,
                }
            }
        }
    }
}

fn encode_latin1(text: &str) -> Cow<'_, [u8]> {
    if text.is_ascii() {
        return Cow::Borrowed(text.as_bytes());
    }
    let mut out = Vec::with_capacity(text.len());
    for c in text.chars() {
        match u8::try_from(u32::from(c)) {
            Ok(b) => out.push(b),
            Err(_) => out.extend_from_slice(format!("&#{};", u32::from(c)).as_bytes()),
        }
    }
    Cow::Owned(out)
}

impl From<&'static Encoding> for Charset {
    fn from(encoding: &'static Encoding) -> Self {
        Self {
            kind: Kind::Registry(encoding),
        }
    }
}

impl fmt::Debug for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Charset").field(&self.name()).finish()
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Charset {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_label_table() {
        let cases: &[(&str, &str)] = &[
            ("utf-8", "UTF-8"),
            ("UTF8", "UTF-8"),
            ("  utf-8  ", "UTF-8"),
            ("ISO-8859-1", "ISO-8859-1"),
            ("latin1", "ISO-8859-1"),
            ("windows-1252", "windows-1252"),
            ("us-ascii", "windows-1252"),
            ("shift_jis", "Shift_JIS"),
            ("koi8-r", "KOI8-R"),
        ];
        for &(label, expected) in cases {
            let charset = Charset::for_label(label).unwrap_or_else(|e| panic!("{label}: {e}"));
            assert_eq!(charset.name(), expected, "{label}");
        }
    }

    #[test]
    fn test_for_label_unsupported() {
        assert_eq!(
            Charset::for_label("bogus-charset-name"),
            Err(CharsetError::Unsupported("bogus-charset-name".to_string()))
        );
        assert!(Charset::for_label("").is_err());
    }

    #[test]
    fn test_latin1_is_exactly_reversible() {
        let all: Vec<u8> = (0..=u8::MAX).collect();
        let text = Charset::ISO_8859_1.decode(&all);
        assert_eq!(text.chars().count(), 256);
        assert_eq!(Charset::ISO_8859_1.encode(&text).as_ref(), all.as_slice());
    }

    #[test]
    fn test_latin1_encode_unmappable() {
        let bytes = Charset::ISO_8859_1.encode("caf\u{e9} \u{20ac}");
        assert_eq!(bytes.as_ref(), b"caf\xe9 &#8364;");
    }

    #[test]
    fn test_decode_strict_rejects_malformed() {
        assert_eq!(
            Charset::UTF_8.decode_strict(b"ab\xffcd"),
            Err(CharsetError::Malformed("UTF-8"))
        );
        assert_eq!(Charset::UTF_8.decode(b"ab\xffcd"), "ab\u{fffd}cd");
    }

    #[test]
    fn test_decode_declared_replaces_malformed() {
        assert_eq!(
            Charset::UTF_8.decode_declared(b"caf\xe9").unwrap(),
            "caf\u{fffd}"
        );
        let euc_kr = Charset::for_label("euc-kr").unwrap();
        assert!(euc_kr.decode_declared("\u{65e5}".as_bytes()).is_ok());
    }

    #[test]
    fn test_decode_declared_rejects_replacement_encoding() {
        let replacement = Charset::for_label("iso-2022-kr").unwrap();
        assert_eq!(replacement.name(), "replacement");
        assert_eq!(
            replacement.decode_declared(b"hello"),
            Err(CharsetError::Undecodable("replacement"))
        );
        assert_eq!(replacement.decode_declared(b"").unwrap(), "");
    }

    #[test]
    fn test_lossless_single_byte() {
        assert!(Charset::ISO_8859_1.is_lossless_single_byte());
        assert!(Charset::for_label("windows-1252").unwrap().is_lossless_single_byte());
        assert!(!Charset::UTF_8.is_lossless_single_byte());
        assert!(!Charset::for_label("iso-8859-8").unwrap().is_lossless_single_byte());
    }

    #[test]
    fn test_display_and_debug() {
        assert_eq!(Charset::UTF_8.to_string(), "UTF-8");
        assert_eq!(format!("{:?}", Charset::ISO_8859_1), "Charset(\"ISO-8859-1\")");
    }
}
