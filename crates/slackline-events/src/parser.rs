//! Events API request parsing

use crate::envelope::{
    parse_outer_event, EventData, EventsApiEvent, EventsApiUrlVerificationEvent,
    UNMARSHALLING_ERROR,
};
use crate::error::{Error, Result};
use crate::inner::{parse_inner_event, EventsApiInnerEvent};
use crate::verify::{ParseOption, VerificationConfig};
use tracing::{debug, warn};

/// Parse an Events API request body.
///
/// Decodes the outer envelope, checks its token against `options`, then either
/// decodes the inner event of a callback or re-reads the body as a URL
/// verification handshake. Without an option that marks the token verified,
/// this returns [`Error::Unauthorized`].
///
/// # Example
///
/// ```
/// use slackline_events::{parse_event, verify_token, TokenComparator};
///
/// let body = r#"{"token":"T","type":"url_verification","challenge":"C123"}"#;
/// let event = parse_event(body, &[verify_token(TokenComparator::new("T"))]).unwrap();
///
/// assert_eq!(event.data.as_url_verification().unwrap().challenge, "C123");
/// ```
pub fn parse_event(raw: &str, options: &[ParseOption]) -> Result<EventsApiEvent> {
    let event = parse_outer_event(raw)?;

    let cfg = VerificationConfig::new(event.token.as_str()).apply(options);
    if !cfg.token_verified {
        warn!(event_type = %event.event_type, "Rejecting unverified Events API request");
        return Err(Error::Unauthorized);
    }

    if let EventData::Callback(callback) = &event.data {
        let inner_event = parse_inner_event(callback).map_err(|e| {
            let event_type = match &e {
                Error::UnknownInnerEvent(t) => t.clone(),
                _ => UNMARSHALLING_ERROR.to_string(),
            };
            Error::InnerEvent {
                event_type,
                source: Box::new(e),
            }
        })?;

        debug!(
            event_id = %callback.event_id,
            inner_type = %inner_event.event_type,
            "Parsed Events API callback"
        );

        return Ok(EventsApiEvent {
            inner_event,
            ..event
        });
    }

    let verification: EventsApiUrlVerificationEvent = serde_json::from_str(raw)?;
    Ok(EventsApiEvent {
        token: event.token,
        event_type: event.event_type,
        data: EventData::UrlVerification(verification),
        inner_event: EventsApiInnerEvent::default(),
    })
}

/// [`parse_event`] over a raw request body
pub fn parse_event_slice(raw: &[u8], options: &[ParseOption]) -> Result<EventsApiEvent> {
    let raw = std::str::from_utf8(raw).map_err(|e| {
        Error::Unmarshal(serde::de::Error::custom(format!("body is not UTF-8: {e}")))
    })?;
    parse_event(raw, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::InnerEventData;
    use crate::verify::{no_verify_token, verify_token, TokenComparator};

    fn verified(token: &str) -> Vec<ParseOption> {
        vec![verify_token(TokenComparator::new(token))]
    }

    #[test]
    fn test_url_verification_round_trip() {
        let event = parse_event(
            r#"{"token":"T","type":"url_verification","challenge":"C123"}"#,
            &verified("T"),
        )
        .unwrap();

        assert_eq!(event.token, "T");
        assert_eq!(event.event_type, "url_verification");
        assert_eq!(event.data.as_url_verification().unwrap().challenge, "C123");
        assert_eq!(event.inner_event, EventsApiInnerEvent::default());
    }

    #[test]
    fn test_callback_message() {
        let event = parse_event(
            r#"{"token":"T","type":"event_callback","event":{"type":"message","text":"hi"},"event_id":"E1"}"#,
            &verified("T"),
        )
        .unwrap();

        assert!(event.is_callback());
        assert_eq!(event.inner_event.event_type, "message");
        match event.inner_event.data {
            Some(InnerEventData::Message(msg)) => assert_eq!(msg.text, "hi"),
            other => panic!("unexpected payload: {other:?}"),
        }
    }

    #[test]
    fn test_no_options_fails_closed() {
        let err = parse_event(
            r#"{"token":"T","type":"url_verification","challenge":"C123"}"#,
            &[],
        )
        .unwrap_err();
        assert!(matches!(err, Error::Unauthorized));
        assert_eq!(err.to_string(), "token verification failed");
    }

    #[test]
    fn test_wrong_token_rejected() {
        let err = parse_event(
            r#"{"token":"T","type":"url_verification","challenge":"C123"}"#,
            &verified("other"),
        )
        .unwrap_err();
        assert!(matches!(err, Error::Unauthorized));
    }

    #[test]
    fn test_decode_error_precedes_verification() {
        let err = parse_event("not json", &[]).unwrap_err();
        assert!(matches!(err, Error::Unmarshal(_)));
    }

    #[test]
    fn test_unknown_inner_event_is_wrapped() {
        let err = parse_event(
            r#"{"token":"T","type":"event_callback","event":{"type":"star_added"}}"#,
            &verified("T"),
        )
        .unwrap_err();

        assert_eq!(
            err.to_string(),
            "EventsAPI Error parsing inner event: star_added, Inner Event does not exist! star_added"
        );
        assert_eq!(err.inner_event_type(), Some("star_added"));
    }

    #[test]
    fn test_inner_decode_error_is_wrapped() {
        let err = parse_event(
            r#"{"token":"T","type":"event_callback","event":{"type":"link_shared","links":7}}"#,
            &[no_verify_token()],
        )
        .unwrap_err();

        assert!(err
            .to_string()
            .starts_with("EventsAPI Error parsing inner event: unmarshalling_error, "));
        assert!(err.is_unmarshal());
    }

    #[test]
    fn test_parse_event_slice_rejects_invalid_utf8() {
        let err = parse_event_slice(&[0x7b, 0xff, 0x7d], &[no_verify_token()]).unwrap_err();
        assert!(matches!(err, Error::Unmarshal(_)));
    }

    #[test]
    fn test_result_serializes() {
        let event = parse_event(
            r#"{"token":"T","type":"event_callback","event":{"type":"reaction_added","user":"U1","reaction":"eyes","item":{"type":"message","channel":"C1","ts":"1.0"}}}"#,
            &verified("T"),
        )
        .unwrap();

        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["type"], "event_callback");
        assert_eq!(value["inner_event"]["type"], "reaction_added");
        assert_eq!(value["inner_event"]["data"]["reaction"], "eyes");
        assert_eq!(value["data"]["event"]["item"]["channel"], "C1");
    }
}
