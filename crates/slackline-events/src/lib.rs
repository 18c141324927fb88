//! Slackline Events - Events API parsing
//!
//! Turns raw Events API request bodies into typed events:
//! - classifies the outer envelope (`event_callback` or `url_verification`)
//! - checks the envelope's verification token, failing closed
//! - decodes callback inner events through a static type registry
//!
//! Request signatures can be checked separately with [`SecretsVerifier`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod envelope;
pub mod error;
pub mod inner;
pub mod parser;
pub mod registry;
pub mod signature;
pub mod types;
pub mod verify;

pub use error::{Error, Result};

pub use envelope::{
    parse_outer_event, ChallengeResponse, EventData, EventsApiCallbackEvent, EventsApiEvent,
    EventsApiUrlVerificationEvent, UnmarshallingErrorEvent, CALLBACK_EVENT, UNMARSHALLING_ERROR,
    URL_VERIFICATION,
};
pub use inner::{parse_inner_event, EventsApiInnerEvent};
pub use parser::{parse_event, parse_event_slice};
pub use registry::{lookup, RegistrySource, EVENTS_API_REGISTRY, RTM_REGISTRY};
pub use signature::SecretsVerifier;
pub use types::InnerEventData;
pub use verify::{
    no_verify_token, verify_token, ParseOption, TokenComparator, VerificationConfig, Verifier,
};
