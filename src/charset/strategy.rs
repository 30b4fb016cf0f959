//! Pluggable charset resolution.

use std::fmt;

use serde::Serialize;

use crate::charset::diagnostics::{Diagnostics, Event};
use crate::charset::types::Charset;

/// Outcome of [`CharsetStrategy::detect`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Detection {
    /// The charset the text claims or appears to be in.
    pub charset: Option<Charset>,
    /// Steps taken to get there.
    pub diagnostics: Diagnostics,
}

/// Outcome of [`CharsetStrategy::resolve`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    /// The body as text. Always present, even when nothing was resolved.
    pub text: String,
    /// The charset that produced `text`, if one was resolved.
    pub charset: Option<Charset>,
    /// Steps taken to get there.
    pub diagnostics: Diagnostics,
}

/// How a body without an explicit charset finds one.
pub trait CharsetStrategy: Send + Sync + fmt::Debug {
    /// Learn the charset of text that is already decoded.
    fn detect(&self, text: &str) -> Detection;

    /// Resolve the charset of raw `bytes` and decode them.
    ///
    /// Must never fail: when nothing resolves, `bytes` are decoded with
    /// `default`.
    fn resolve(&self, bytes: &[u8], default: Charset) -> Resolution;
}

/// Strategy for bodies with no content sniffing: nothing is detected and
/// bytes are decoded with the default charset.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultStrategy;

impl CharsetStrategy for DefaultStrategy {
    fn detect(&self, _text: &str) -> Detection {
        Detection {
            charset: None,
            diagnostics: Diagnostics::new(),
        }
    }

    fn resolve(&self, bytes: &[u8], default: Charset) -> Resolution {
        let mut diagnostics = Diagnostics::new();
        diagnostics.push(Event::FellBackToDefault { charset: default });
        Resolution {
            text: default.decode(bytes).into_owned(),
            charset: None,
            diagnostics,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_strategy_detects_nothing() {
        let detection = DefaultStrategy.detect("<meta charset=\"utf-8\">");
        assert_eq!(detection.charset, None);
        assert!(detection.diagnostics.is_empty());
    }

    #[test]
    fn test_default_strategy_decodes_with_default() {
        let resolution = DefaultStrategy.resolve(b"caf\xe9", Charset::ISO_8859_1);
        assert_eq!(resolution.text, "caf\u{e9}");
        assert_eq!(resolution.charset, None);
        assert_eq!(
            resolution.diagnostics.events(),
            &[Event::FellBackToDefault { charset: Charset::ISO_8859_1 }]
        );
    }
}
