//! Structured logging.
//!
//! # Responsibilities
//! - Initialize logging subsystem
//! - Translate resolution [`Diagnostics`] into log events
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - Log level configurable via config and environment (`RUST_LOG` wins)
//! - Logs go to stderr so decoded text on stdout stays clean

use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::charset::{Diagnostics, Event};
use crate::config::ObservabilityConfig;

/// Install the global tracing subscriber.
pub fn init_logging(config: &ObservabilityConfig) -> Result<(), TryInitError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "body_charset={}",
            config.log_level.to_ascii_lowercase()
        ))
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
}

/// Emit one log event per resolution step.
///
/// Unsupported declarations are warnings; a failed decode is an error
/// followed by an informational note naming the charset used instead.
pub fn report(diagnostics: &Diagnostics) {
    let mut decode_failed = false;

    for event in diagnostics.events() {
        match event {
            Event::DeclarationFound { label } => {
                tracing::debug!(%label, "Found (X)HTML meta charset declaration");
            }
            Event::UnsupportedDeclaration { label, error } => {
                tracing::warn!(
                    %label,
                    %error,
                    "Unable to determine (valid) charset with the (X)HTML meta charset"
                );
            }
            Event::DecodeFailed { charset, error } => {
                decode_failed = true;
                tracing::error!(
                    %charset,
                    %error,
                    "Unable to decode with the (X)HTML meta charset"
                );
            }
            Event::Utf8Accepted => tracing::debug!("Body round-trips as UTF-8"),
            Event::Utf8Rejected => tracing::debug!("Body is not valid UTF-8"),
            Event::FellBackToDefault { charset } if decode_failed => {
                tracing::info!(%charset, "Using default charset");
            }
            Event::FellBackToDefault { charset } => {
                tracing::debug!(%charset, "No charset resolved, decoding with default charset");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charset::{Charset, CharsetError};
    use std::io;
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::fmt::MakeWriter;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Captured {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for Captured {
        type Writer = Captured;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    fn capture(diagnostics: &Diagnostics) -> String {
        let captured = Captured::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(captured.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::INFO)
            .finish();
        tracing::subscriber::with_default(subscriber, || report(diagnostics));
        captured.contents()
    }

    #[test]
    fn test_unsupported_declaration_is_a_warning() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.push(Event::DeclarationFound { label: "bogus".into() });
        diagnostics.push(Event::UnsupportedDeclaration {
            label: "bogus".into(),
            error: CharsetError::Unsupported("bogus".into()),
        });
        diagnostics.push(Event::Utf8Accepted);

        let output = capture(&diagnostics);
        assert!(output.contains("WARN"), "{output}");
        assert!(output.contains("Unable to determine (valid) charset"), "{output}");
        assert!(output.contains("label=bogus"), "{output}");
        assert!(!output.contains("DEBUG"), "{output}");
    }

    #[test]
    fn test_decode_failure_is_an_error_with_fallback_note() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.push(Event::DecodeFailed {
            charset: Charset::for_label("iso-2022-kr").unwrap(),
            error: CharsetError::Undecodable("replacement"),
        });
        diagnostics.push(Event::FellBackToDefault { charset: Charset::ISO_8859_1 });

        let output = capture(&diagnostics);
        assert!(output.contains("ERROR"), "{output}");
        assert!(output.contains("INFO"), "{output}");
        assert!(output.contains("Using default charset"), "{output}");
        assert!(output.contains("charset=ISO-8859-1"), "{output}");
    }

    #[test]
    fn test_plain_fallback_is_quiet_at_info() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.push(Event::Utf8Rejected);
        diagnostics.push(Event::FellBackToDefault { charset: Charset::ISO_8859_1 });
        assert_eq!(capture(&diagnostics), "");
    }
}
