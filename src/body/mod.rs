//! Message bodies and text materialization.
//!
//! # Data Flow
//! ```text
//! ByteBody::raw_bytes
//!     → explicit charset (e.g. from Content-Type)?  decode, done
//!     → previously resolved charset?               decode, done
//!     → CharsetStrategy::resolve
//!         → diagnostics reported through observability::logging
//!         → resolved charset written back via set_resolved_charset
//! ```
//!
//! # Concurrency
//! The resolved-charset cell is the only shared mutable state. Two threads
//! materializing the same body at once both run the (idempotent) pipeline
//! and store the same charset; the cell is swapped atomically.

pub mod http_body;

pub use http_body::HttpBody;

use crate::charset::{Charset, CharsetStrategy, Diagnostics, Resolution};
use crate::observability::logging;

/// The body contract consumed by charset resolution.
pub trait ByteBody {
    /// The full body content.
    fn raw_bytes(&self) -> &[u8];

    /// A charset known from outside the body, such as a transport header.
    fn explicit_charset(&self) -> Option<Charset>;

    /// Remember a charset discovered by resolution.
    fn set_resolved_charset(&self, charset: Charset);

    /// A charset discovered earlier, if the body keeps one.
    fn resolved_charset(&self) -> Option<Charset> {
        None
    }

    /// Lossless single-byte charset used when nothing resolves.
    fn default_charset(&self) -> Charset {
        Charset::ISO_8859_1
    }
}

/// Turn `body` into text, resolving its charset with `strategy` if needed.
///
/// Never fails. Diagnostics are logged and also returned to the caller.
pub fn materialize<B>(body: &B, strategy: &dyn CharsetStrategy) -> Resolution
where
    B: ByteBody + ?Sized,
{
    let known = body
        .explicit_charset()
        .or_else(|| body.resolved_charset());

    if let Some(charset) = known {
        return Resolution {
            text: charset.decode(body.raw_bytes()).into_owned(),
            charset: Some(charset),
            diagnostics: Diagnostics::new(),
        };
    }

    let resolution = strategy.resolve(body.raw_bytes(), body.default_charset());
    logging::report(&resolution.diagnostics);
    if let Some(charset) = resolution.charset {
        tracing::debug!(%charset, len = body.raw_bytes().len(), "Resolved body charset");
        body.set_resolved_charset(charset);
    }
    resolution
}
