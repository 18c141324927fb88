//! Inner event decoding for callback envelopes

use crate::envelope::{null_as_empty, EventsApiCallbackEvent};
use crate::error::{Error, Result};
use crate::registry;
use crate::types::InnerEventData;
use serde::{Deserialize, Serialize};

/// Inner event of a callback envelope
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EventsApiInnerEvent {
    /// Inner event `type`
    #[serde(rename = "type")]
    pub event_type: String,
    /// Decoded payload
    pub data: Option<InnerEventData>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct InnerDiscriminator {
    #[serde(rename = "type", deserialize_with = "null_as_empty")]
    event_type: String,
}

/// Decode the inner event of a callback envelope.
///
/// Reads the inner `type`, resolves it through [`registry::lookup`] and decodes
/// the raw event into the matched shape. An unregistered type yields
/// [`Error::UnknownInnerEvent`] carrying the type.
pub fn parse_inner_event(callback: &EventsApiCallbackEvent) -> Result<EventsApiInnerEvent> {
    let raw = &callback.inner_event;
    let discriminator: InnerDiscriminator = serde_json::from_str(raw.get())?;
    let event_type = discriminator.event_type;

    let Some(found) = registry::lookup(&event_type) else {
        return Err(Error::UnknownInnerEvent(event_type));
    };

    let data = found.decode(raw)?;
    Ok(EventsApiInnerEvent {
        event_type,
        data: Some(data),
    })
}
