//! Charset resolution for markup bodies.
//!
//! # Resolution order
//! ```text
//! raw bytes
//!     → ISO-8859-1 reference decode (cannot fail, reversible)
//!     → meta.rs scans the reference text for a declaration
//!         → known charset                         → resolved (malformed
//!                                                    sequences become U+FFFD)
//!         → known charset without a decoder       → default charset, unresolved
//!         → unknown charset                       → continue
//!     → utf8.rs round trip
//!         → lengths match                         → resolved as UTF-8
//!     → default charset decode, unresolved
//! ```
//!
//! # Design Decisions
//! - Declarations win over UTF-8: a document that names its charset is
//!   believed even when it also happens to be valid UTF-8
//! - Every branch ends in text; failures only show up in [`Diagnostics`]

use std::borrow::Cow;

use crate::charset::diagnostics::{Diagnostics, Event};
use crate::charset::meta;
use crate::charset::strategy::{CharsetStrategy, Detection, Resolution};
use crate::charset::types::Charset;
use crate::charset::utf8;
use crate::config::ResolutionConfig;

/// Resolves charsets from `<meta>` declarations, then UTF-8 plausibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetaCharsetStrategy {
    meta_detection: bool,
    utf8_detection: bool,
}

impl MetaCharsetStrategy {
    /// Create a strategy with every detection stage enabled.
    pub fn new() -> Self {
        Self {
            meta_detection: true,
            utf8_detection: true,
        }
    }

    /// Create a strategy with the stages enabled in `config`.
    pub fn from_config(config: &ResolutionConfig) -> Self {
        Self {
            meta_detection: config.meta_detection,
            utf8_detection: config.utf8_detection,
        }
    }

    /// Look up a declared label, recording the outcome.
    fn lookup(label: &str, diagnostics: &mut Diagnostics) -> Option<Charset> {
        diagnostics.push(Event::DeclarationFound {
            label: label.to_string(),
        });
        match Charset::for_label(label) {
            Ok(charset) => Some(charset),
            Err(error) => {
                diagnostics.push(Event::UnsupportedDeclaration {
                    label: label.to_string(),
                    error,
                });
                None
            }
        }
    }
}

impl Default for MetaCharsetStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl CharsetStrategy for MetaCharsetStrategy {
    fn detect(&self, text: &str) -> Detection {
        let mut diagnostics = Diagnostics::new();

        if self.meta_detection {
            if let Some(label) = meta::find_declared_charset(text) {
                if let Some(charset) = Self::lookup(label, &mut diagnostics) {
                    return Detection {
                        charset: Some(charset),
                        diagnostics,
                    };
                }
            }
        }

        if self.utf8_detection {
            if utf8::is_utf8_text(text) {
                diagnostics.push(Event::Utf8Accepted);
                return Detection {
                    charset: Some(Charset::UTF_8),
                    diagnostics,
                };
            }
            diagnostics.push(Event::Utf8Rejected);
        }

        Detection {
            charset: None,
            diagnostics,
        }
    }

    fn resolve(&self, bytes: &[u8], default: Charset) -> Resolution {
        let mut diagnostics = Diagnostics::new();
        let reference = Charset::ISO_8859_1.decode(bytes);

        let declared = if self.meta_detection {
            meta::find_declared_charset(&reference)
                .and_then(|label| Self::lookup(label, &mut diagnostics))
        } else {
            None
        };

        if let Some(charset) = declared {
            match charset.decode_declared(bytes) {
                Ok(text) => {
                    return Resolution {
                        text: text.into_owned(),
                        charset: Some(charset),
                        diagnostics,
                    };
                }
                Err(error) => {
                    diagnostics.push(Event::DecodeFailed { charset, error });
                    diagnostics.push(Event::FellBackToDefault { charset: default });
                    return Resolution {
                        text: fallback_text(bytes, reference, default),
                        charset: None,
                        diagnostics,
                    };
                }
            }
        }

        if self.utf8_detection {
            if let Some(text) = utf8::round_trip(bytes) {
                diagnostics.push(Event::Utf8Accepted);
                return Resolution {
                    text: text.into_owned(),
                    charset: Some(Charset::UTF_8),
                    diagnostics,
                };
            }
            diagnostics.push(Event::Utf8Rejected);
        }

        diagnostics.push(Event::FellBackToDefault { charset: default });
        Resolution {
            text: fallback_text(bytes, reference, default),
            charset: None,
            diagnostics,
        }
    }
}

/// Text under the default charset, reusing the reference decode when they agree.
fn fallback_text(bytes: &[u8], reference: Cow<'_, str>, default: Charset) -> String {
    if default == Charset::ISO_8859_1 {
        reference.into_owned()
    } else {
        default.decode(bytes).into_owned()
    }
}
