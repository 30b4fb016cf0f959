//! Charset resolution subsystem.
//!
//! # Data Flow
//! ```text
//! body bytes, no explicit charset
//!     → strategy.rs (CharsetStrategy chosen by the body)
//!     → pipeline.rs (meta declaration → UTF-8 round trip → default)
//!         uses meta.rs (declaration scanner)
//!         uses utf8.rs (round-trip validator)
//!         uses types.rs (charset registry)
//!     → Resolution { text, charset, diagnostics }
//!     → diagnostics.rs events logged by observability::logging
//! ```
//!
//! # Design Decisions
//! - Resolution is pure: it never logs and never mutates the body
//! - Text materialization cannot fail; the ISO-8859-1 reference decode
//!   covers every byte value

pub mod diagnostics;
pub mod meta;
pub mod pipeline;
pub mod strategy;
pub mod types;
pub mod utf8;

pub use diagnostics::{Diagnostics, Event};
pub use pipeline::MetaCharsetStrategy;
pub use strategy::{CharsetStrategy, DefaultStrategy, Detection, Resolution};
pub use types::{Charset, CharsetError, CharsetResult};
