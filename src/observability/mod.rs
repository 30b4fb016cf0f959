//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! charset resolution produces:
//!     → Diagnostics (pure record of what was tried)
//!
//! body.rs hands them to:
//!     → logging.rs (structured log events via tracing)
//! ```
//!
//! # Design Decisions
//! - Resolution code never calls the logging framework directly
//! - Structured fields (label, charset, error) for machine parsing

pub mod logging;
