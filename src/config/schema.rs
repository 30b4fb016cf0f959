//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from TOML files.

use serde::{Deserialize, Serialize};

/// Root configuration for charset resolution.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ResolverConfig {
    /// Detection stages and fallback charset.
    pub resolution: ResolutionConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Resolution pipeline configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct ResolutionConfig {
    /// Honour `<meta charset=...>` declarations found in the body.
    pub meta_detection: bool,

    /// Assume UTF-8 when the body survives a UTF-8 round trip.
    pub utf8_detection: bool,

    /// Charset used when nothing resolves. Must be lossless single-byte.
    pub default_charset: String,
}

impl Default for ResolutionConfig {
    fn default() -> Self {
        Self {
            meta_detection: true,
            utf8_detection: true,
            default_charset: "ISO-8859-1".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error, off).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
