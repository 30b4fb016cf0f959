//! In-memory HTTP message body.

use std::fmt;
use std::sync::Arc;

use arc_swap::ArcSwapOption;

use crate::body::{materialize, ByteBody};
use crate::charset::{Charset, CharsetResult, CharsetStrategy, MetaCharsetStrategy, Resolution};
use crate::config::ResolutionConfig;
use crate::http::content_type;
use crate::observability::logging;

/// An HTTP message body with lazy, cached charset resolution.
///
/// The charset used to turn bytes into text is, in order: the explicit
/// charset (set from a header or by the caller), the charset resolved by
/// an earlier [`text()`](Self::text) call, or whatever the body's
/// [`CharsetStrategy`] resolves now.
///
/// # Example
///
/// ```rust
/// use body_charset::{Charset, HttpBody};
///
/// let body = HttpBody::from_bytes(b"<meta charset=ISO-8859-1>caf\xe9".to_vec());
/// assert_eq!(body.text(), "<meta charset=ISO-8859-1>caf\u{e9}");
/// assert_eq!(body.charset(), Some(Charset::ISO_8859_1));
/// ```
pub struct HttpBody {
    bytes: Vec<u8>,
    explicit: Option<Charset>,
    resolved: ArcSwapOption<Charset>,
    default_charset: Charset,
    strategy: Arc<dyn CharsetStrategy>,
}

impl HttpBody {
    /// Create an empty body using [`MetaCharsetStrategy`] and ISO-8859-1.
    pub fn new() -> Self {
        Self {
            bytes: Vec::new(),
            explicit: None,
            resolved: ArcSwapOption::empty(),
            default_charset: Charset::ISO_8859_1,
            strategy: Arc::new(MetaCharsetStrategy::new()),
        }
    }

    /// Create a body holding `bytes`.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
            ..Self::new()
        }
    }

    /// Create a body holding `text`, encoded as described in [`set_text`](Self::set_text).
    pub fn from_text(text: &str) -> Self {
        let mut body = Self::new();
        body.set_text(text);
        body
    }

    /// Create an empty body with the strategy and default charset from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`CharsetError::Unsupported`](crate::charset::CharsetError::Unsupported)
    /// if `config.default_charset` is not a known charset.
    pub fn configured(config: &ResolutionConfig) -> CharsetResult<Self> {
        let default_charset = Charset::for_label(&config.default_charset)?;
        Ok(Self::new()
            .with_strategy(Arc::new(MetaCharsetStrategy::from_config(config)))
            .with_default_charset(default_charset))
    }

    /// Replace the resolution strategy.
    pub fn with_strategy(mut self, strategy: Arc<dyn CharsetStrategy>) -> Self {
        self.strategy = strategy;
        self.resolved.store(None);
        self
    }

    /// Replace the fallback charset. It should be lossless single-byte.
    pub fn with_default_charset(mut self, charset: Charset) -> Self {
        self.default_charset = charset;
        self
    }

    /// The raw body bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Body length in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// True when the body has no content.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Replace the body bytes. Forgets any resolved charset.
    pub fn set_bytes(&mut self, bytes: impl Into<Vec<u8>>) {
        self.bytes = bytes.into();
        self.resolved.store(None);
    }

    /// Append bytes to the body. Forgets any resolved charset.
    pub fn append(&mut self, bytes: &[u8]) {
        self.bytes.extend_from_slice(bytes);
        self.resolved.store(None);
    }

    /// Replace the body with `text`.
    ///
    /// The text is encoded with the explicit charset if there is one;
    /// otherwise with the charset the strategy detects in the text (which
    /// is then remembered), falling back to the default charset.
    pub fn set_text(&mut self, text: &str) {
        let charset = match self.explicit {
            Some(charset) => charset,
            None => {
                let detection = self.strategy.detect(text);
                logging::report(&detection.diagnostics);
                self.resolved.store(detection.charset.map(Arc::new));
                detection.charset.unwrap_or(self.default_charset)
            }
        };
        self.bytes = charset.encode(text).into_owned();
    }

    /// The body as text. Never fails.
    pub fn text(&self) -> String {
        self.resolve().text
    }

    /// The body as text, with the charset used and the resolution steps taken.
    ///
    /// When the charset is already known the diagnostics are empty.
    pub fn resolve(&self) -> Resolution {
        materialize(self, self.strategy.as_ref())
    }

    /// The charset in effect: explicit, else previously resolved.
    pub fn charset(&self) -> Option<Charset> {
        self.explicit.or_else(|| ByteBody::resolved_charset(self))
    }

    /// Set the explicit charset by name.
    ///
    /// An unknown name is logged and ignored. A blank name clears the
    /// explicit charset.
    pub fn set_charset(&mut self, label: &str) {
        if label.trim().is_empty() {
            self.explicit = None;
            return;
        }
        match Charset::for_label(label) {
            Ok(charset) => self.explicit = Some(charset),
            Err(error) => {
                tracing::warn!(%label, %error, "Ignoring unsupported charset");
            }
        }
    }

    /// Set or clear the explicit charset.
    pub fn set_explicit_charset(&mut self, charset: Option<Charset>) {
        self.explicit = charset;
    }

    /// Take the explicit charset from a `Content-Type` header value.
    ///
    /// Does nothing when the header carries no charset parameter.
    pub fn set_charset_from_content_type(&mut self, content_type: &str) {
        if let Some(label) = content_type::charset_param(content_type) {
            self.set_charset(label);
        }
    }
}

impl ByteBody for HttpBody {
    fn raw_bytes(&self) -> &[u8] {
        &self.bytes
    }

    fn explicit_charset(&self) -> Option<Charset> {
        self.explicit
    }

    fn set_resolved_charset(&self, charset: Charset) {
        self.resolved.store(Some(Arc::new(charset)));
    }

    fn resolved_charset(&self) -> Option<Charset> {
        self.resolved.load_full().map(|charset| *charset)
    }

    fn default_charset(&self) -> Charset {
        self.default_charset
    }
}

impl Default for HttpBody {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for HttpBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpBody")
            .field("length", &self.bytes.len())
            .field("explicit", &self.explicit)
            .field("resolved", &ByteBody::resolved_charset(self))
            .field("default_charset", &self.default_charset)
            .field("strategy", &self.strategy)
            .finish()
    }
}

impl From<Vec<u8>> for HttpBody {
    fn from(bytes: Vec<u8>) -> Self {
        Self::from_bytes(bytes)
    }
}

impl From<&str> for HttpBody {
    fn from(text: &str) -> Self {
        Self::from_text(text)
    }
}
