//! What a resolution tried and why it moved on.
//!
//! Resolution code records [`Event`]s instead of logging; the logging
//! adapter in [`crate::observability::logging`] turns them into log lines.

use serde::Serialize;

use crate::charset::types::{Charset, CharsetError};

/// A single step taken while resolving a charset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    /// A meta declaration naming `label` was found.
    DeclarationFound { label: String },

    /// The declared label is not a known charset.
    UnsupportedDeclaration {
        label: String,
        #[serde(serialize_with = "serialize_error")]
        error: CharsetError,
    },

    /// The bytes could not be decoded under the declared charset.
    DecodeFailed {
        charset: Charset,
        #[serde(serialize_with = "serialize_error")]
        error: CharsetError,
    },

    /// The content passed the UTF-8 round trip.
    Utf8Accepted,

    /// The content failed the UTF-8 round trip.
    Utf8Rejected,

    /// Nothing was resolved; the text came from the default charset.
    FellBackToDefault { charset: Charset },
}

fn serialize_error<S: serde::Serializer>(error: &CharsetError, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(error)
}

/// Ordered record of the events of one resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Diagnostics {
    events: Vec<Event>,
}

impl Diagnostics {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event.
    pub fn push(&mut self, event: Event) {
        self.events.push(event);
    }

    /// The recorded events, oldest first.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// True when no events were recorded.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// True when any step failed and was recovered from.
    pub fn has_failures(&self) -> bool {
        self.events.iter().any(|e| {
            matches!(
                e,
                Event::UnsupportedDeclaration { .. } | Event::DecodeFailed { .. }
            )
        })
    }
}
