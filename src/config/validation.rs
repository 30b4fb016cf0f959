//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check the fallback charset exists and cannot lose bytes
//! - Check the log level is one the subscriber understands
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ResolverConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use thiserror::Error;

use crate::charset::Charset;
use crate::config::schema::ResolverConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// `resolution.default_charset` is not a known charset.
    #[error("resolution.default_charset: unknown charset {0:?}")]
    UnknownDefaultCharset(String),

    /// `resolution.default_charset` cannot represent every byte value.
    #[error("resolution.default_charset: {0} is not a lossless single-byte charset")]
    LossyDefaultCharset(String),

    /// `observability.log_level` is not a known level.
    #[error("observability.log_level: unknown level {0:?}")]
    UnknownLogLevel(String),
}

/// Validate `config`, collecting every problem found.
pub fn validate_config(config: &ResolverConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let label = &config.resolution.default_charset;
    match Charset::for_label(label) {
        Ok(charset) if !charset.is_lossless_single_byte() => {
            errors.push(ValidationError::LossyDefaultCharset(charset.name().to_string()));
        }
        Ok(_) => {}
        Err(_) => errors.push(ValidationError::UnknownDefaultCharset(label.clone())),
    }

    let level = config.observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::UnknownLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(validate_config(&ResolverConfig::default()), Ok(()));
    }

    #[test]
    fn test_windows_1252_default_is_valid() {
        let mut config = ResolverConfig::default();
        config.resolution.default_charset = "windows-1252".into();
        config.observability.log_level = "DEBUG".into();
        assert_eq!(validate_config(&config), Ok(()));
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = ResolverConfig::default();
        config.resolution.default_charset = "utf-8".into();
        config.observability.log_level = "loud".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::LossyDefaultCharset("UTF-8".into()),
                ValidationError::UnknownLogLevel("loud".into()),
            ]
        );
    }

    #[test]
    fn test_unknown_default_charset() {
        let mut config = ResolverConfig::default();
        config.resolution.default_charset = "no-such-charset".into();
        assert_eq!(
            validate_config(&config),
            Err(vec![ValidationError::UnknownDefaultCharset("no-such-charset".into())])
        );
    }
}
