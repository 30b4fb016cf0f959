//! In-document charset declarations.
//!
//! # Responsibilities
//! - Find the first `<meta ... charset=NAME ...>` tag in markup text
//! - Accept unquoted, single-quoted and double-quoted names
//! - Accept self-closing tags and `http-equiv` content declarations
//!
//! # Design Decisions
//! - The `regex` crate matches in linear time, so hostile bodies cannot
//!   trigger backtracking blowups
//! - A search, not a parse: malformed markup simply yields `None`

use std::sync::OnceLock;

use regex::Regex;

/// Whitespace is spelled out as HTML whitespace: `\s` would also match
/// U+0085 and U+00A0, which appear when a body is scanned through the
/// ISO-8859-1 reference decode.
const META_CHARSET_PATTERN: &str = r#"(?i)<meta[ \t\r\n\x0C]+[^>]*?charset[ \t\r\n\x0C]*=[ \t\r\n\x0C]*['"]?([^ \t\r\n\x0C>'";/]+)['"]?[ \t\r\n\x0C]*/?>"#;

fn meta_charset_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(META_CHARSET_PATTERN).expect("meta charset pattern compiles"))
}

/// Return the charset name declared by the first matching meta tag in `text`.
///
/// ```text
/// <meta charset="UTF-8">                                              -> Some("UTF-8")
/// <META CHARSET=iso-8859-1 />                                         -> Some("iso-8859-1")
/// <meta http-equiv="Content-Type" content="text/html; charset=koi8-r"> -> Some("koi8-r")
/// <p>charset=utf-8</p>                                                -> None
/// ```
pub fn find_declared_charset(text: &str) -> Option<&str> {
    meta_charset_regex()
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}
