//! Charset resolution for HTTP message bodies.
//!
//! Turns body bytes into text when no usable `Content-Type; charset=` was
//! sent: an in-document `<meta charset>` declaration is believed first,
//! then UTF-8 is assumed if the bytes round-trip, and otherwise the bytes
//! are decoded as ISO-8859-1, which never fails and never loses data.

pub mod body;
pub mod charset;
pub mod config;
pub mod http;
pub mod observability;

pub use body::{ByteBody, HttpBody};
pub use charset::{
    Charset, CharsetError, CharsetStrategy, DefaultStrategy, Diagnostics, MetaCharsetStrategy,
    Resolution,
};
pub use config::ResolverConfig;
