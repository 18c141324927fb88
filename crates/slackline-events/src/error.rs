//! Error types for slackline-events

use crate::envelope::UNMARSHALLING_ERROR;
use thiserror::Error;

/// Events API parsing error
#[derive(Debug, Error)]
pub enum Error {
    /// The payload (outer envelope or inner event) did not match the shape it
    /// was decoded against
    #[error("unmarshalling error: {0}")]
    Unmarshal(#[from] serde_json::Error),

    /// The inner event discriminator is not present in any registry
    #[error("Inner Event does not exist! {0}")]
    UnknownInnerEvent(String),

    /// Failure while decoding the inner event of a callback envelope
    #[error("EventsAPI Error parsing inner event: {event_type}, {source}")]
    InnerEvent {
        /// Inner event type, or `unmarshalling_error` when it could not be read
        event_type: String,
        /// Underlying decode or lookup failure
        #[source]
        source: Box<Error>,
    },

    /// Verification token was rejected, or no verifier was configured
    #[error("token verification failed")]
    Unauthorized,

    /// Request signature verification failed
    #[error("signature verification failed: {0}")]
    Signature(String),
}

impl Error {
    /// Inner event type carried by this error, if any.
    ///
    /// Lets callers log unrecognized event types without matching on the
    /// nested structure.
    #[must_use]
    pub fn inner_event_type(&self) -> Option<&str> {
        match self {
            Self::UnknownInnerEvent(t) => Some(t),
            Self::InnerEvent { event_type, source } => source
                .inner_event_type()
                .or(Some(event_type.as_str()).filter(|t| *t != UNMARSHALLING_ERROR)),
            _ => None,
        }
    }

    /// Whether this error came from a JSON shape mismatch
    #[must_use]
    pub fn is_unmarshal(&self) -> bool {
        match self {
            Self::Unmarshal(_) => true,
            Self::InnerEvent { source, .. } => source.is_unmarshal(),
            _ => false,
        }
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
