//! HTTP protocol helpers.
//!
//! # Data Flow
//! ```text
//! response headers
//!     → content_type.rs (charset parameter)
//!     → HttpBody::set_charset_from_content_type (explicit charset)
//!     → charset resolution skipped for that body
//! ```

pub mod content_type;

pub use content_type::charset_param;
