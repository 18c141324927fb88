//! Outer envelope types and classification
//!
//! Every Events API request body is one of two envelopes, selected by its
//! `type` field: `event_callback` carries a nested inner event, anything else
//! is decoded as a `url_verification` handshake.

use crate::error::Result;
use crate::inner::EventsApiInnerEvent;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::value::RawValue;
use tracing::debug;

/// `type` of a callback envelope
pub const CALLBACK_EVENT: &str = "event_callback";

/// `type` of a URL verification handshake
pub const URL_VERIFICATION: &str = "url_verification";

/// `type` reported for payloads that could not be decoded
pub const UNMARSHALLING_ERROR: &str = "unmarshalling_error";

/// Read a string field, treating JSON `null` like an absent field
pub(crate) fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Minimal outer shape: just enough to pick the envelope variant
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct OuterDiscriminator {
    #[serde(deserialize_with = "null_as_empty")]
    pub(crate) token: String,
    #[serde(rename = "type", deserialize_with = "null_as_empty")]
    pub(crate) event_type: String,
}

/// `event_callback` envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventsApiCallbackEvent {
    /// Envelope discriminator (`event_callback`)
    #[serde(rename = "type")]
    pub event_type: String,
    /// Legacy verification token
    #[serde(default)]
    pub token: String,
    /// Workspace the event happened in
    #[serde(default)]
    pub team_id: String,
    /// App the event is delivered to
    #[serde(default)]
    pub api_app_id: String,
    /// Inner event, decoded separately
    #[serde(rename = "event")]
    pub inner_event: Box<RawValue>,
    /// Users the event is visible to
    #[serde(default)]
    pub authed_users: Vec<String>,
    /// Unique event ID
    #[serde(default)]
    pub event_id: String,
    /// Epoch seconds the event was dispatched
    #[serde(default)]
    pub event_time: i64,
}

/// `url_verification` handshake
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventsApiUrlVerificationEvent {
    /// Envelope discriminator
    #[serde(rename = "type", default, deserialize_with = "null_as_empty")]
    pub event_type: String,
    /// Legacy verification token
    #[serde(default, deserialize_with = "null_as_empty")]
    pub token: String,
    /// Value to echo back to complete the handshake; empty when absent
    #[serde(default, deserialize_with = "null_as_empty")]
    pub challenge: String,
}

/// Body answering a [`EventsApiUrlVerificationEvent`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeResponse {
    /// Echoed challenge
    pub challenge: String,
}

impl From<&EventsApiUrlVerificationEvent> for ChallengeResponse {
    fn from(event: &EventsApiUrlVerificationEvent) -> Self {
        Self {
            challenge: event.challenge.clone(),
        }
    }
}

/// Decode failure marker carried in an [`EventsApiEvent`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnmarshallingErrorEvent {
    /// Rendered cause
    pub error: String,
}

/// Outer payload of an [`EventsApiEvent`]
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum EventData {
    /// `event_callback` envelope
    Callback(Box<EventsApiCallbackEvent>),
    /// `url_verification` handshake
    UrlVerification(EventsApiUrlVerificationEvent),
    /// Payload that did not match any envelope shape
    UnmarshallingError(UnmarshallingErrorEvent),
}

impl EventData {
    /// Callback envelope, if this is one
    #[must_use]
    pub fn as_callback(&self) -> Option<&EventsApiCallbackEvent> {
        match self {
            Self::Callback(cb) => Some(cb),
            _ => None,
        }
    }

    /// URL verification handshake, if this is one
    #[must_use]
    pub fn as_url_verification(&self) -> Option<&EventsApiUrlVerificationEvent> {
        match self {
            Self::UrlVerification(v) => Some(v),
            _ => None,
        }
    }
}

/// A parsed Events API request
#[derive(Debug, Clone, Serialize)]
pub struct EventsApiEvent {
    /// Verification token from the envelope
    pub token: String,
    /// Envelope `type`
    #[serde(rename = "type")]
    pub event_type: String,
    /// Outer payload
    pub data: EventData,
    /// Decoded inner event; empty unless this is a callback
    pub inner_event: EventsApiInnerEvent,
}

impl EventsApiEvent {
    /// An `unmarshalling_error` result describing `err`.
    ///
    /// [`parse_event`](crate::parse_event) reports failures through its
    /// `Err` value; this builds the equivalent tagged result for callers that
    /// forward parse outcomes as events.
    #[must_use]
    pub fn unmarshalling_error(err: &crate::Error) -> Self {
        Self {
            token: String::new(),
            event_type: UNMARSHALLING_ERROR.to_string(),
            data: EventData::UnmarshallingError(UnmarshallingErrorEvent {
                error: err.to_string(),
            }),
            inner_event: EventsApiInnerEvent::default(),
        }
    }

    /// Whether this is a `url_verification` handshake
    #[must_use]
    pub fn is_url_verification(&self) -> bool {
        matches!(self.data, EventData::UrlVerification(_))
    }

    /// Whether this is an `event_callback` envelope
    #[must_use]
    pub fn is_callback(&self) -> bool {
        matches!(self.data, EventData::Callback(_))
    }
}

/// Classify and decode the outer envelope.
///
/// `event_callback` is decoded as a callback; every other `type` is decoded as
/// a URL verification handshake, so an unrecognized type surfaces as that
/// decode's error.
pub fn parse_outer_event(raw: &str) -> Result<EventsApiEvent> {
    let outer: OuterDiscriminator = serde_json::from_str(raw)?;

    if outer.event_type == CALLBACK_EVENT {
        let callback: EventsApiCallbackEvent = serde_json::from_str(raw)?;
        debug!(event_id = %callback.event_id, team_id = %callback.team_id, "Callback envelope");
        return Ok(EventsApiEvent {
            token: outer.token,
            event_type: outer.event_type,
            data: EventData::Callback(Box::new(callback)),
            inner_event: EventsApiInnerEvent::default(),
        });
    }

    if outer.event_type != URL_VERIFICATION {
        debug!(event_type = %outer.event_type, "Unexpected envelope type, trying url_verification");
    }

    let verification: EventsApiUrlVerificationEvent = serde_json::from_str(raw)?;
    Ok(EventsApiEvent {
        token: outer.token,
        event_type: outer.event_type,
        data: EventData::UrlVerification(verification),
        inner_event: EventsApiInnerEvent::default(),
    })
}
