//! Slack Events API webhook
//!
//! `POST /slack/events` checks the request signature (when a signing secret
//! is configured), parses the envelope, answers URL verification handshakes
//! and acknowledges callbacks.

use crate::server::config::SlackSettings;
use crate::util::mask_for_logging;
use axum::{
    extract::Extension,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use slackline_events::{
    no_verify_token, parse_event, verify_token, ChallengeResponse, Error, EventData,
    EventsApiEvent, InnerEventData, ParseOption, SecretsVerifier, TokenComparator,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Shared state of the events endpoint
pub struct EventsState {
    options: Vec<ParseOption>,
    signature: Option<SecretsVerifier>,
}

impl EventsState {
    /// Build from explicit parse options and an optional signature check
    pub fn new(options: Vec<ParseOption>, signature: Option<SecretsVerifier>) -> Self {
        Self { options, signature }
    }

    /// Build from configured credentials.
    ///
    /// A verification token is checked when set. Without one, a signing
    /// secret alone authenticates requests. With neither, every event is
    /// rejected.
    pub fn from_settings(settings: &SlackSettings) -> Self {
        let signature = (!settings.signing_secret.is_empty())
            .then(|| SecretsVerifier::new(settings.signing_secret.clone()));

        let options = if !settings.verification_token.is_empty() {
            vec![verify_token(TokenComparator::new(
                settings.verification_token.clone(),
            ))]
        } else if signature.is_some() {
            vec![no_verify_token()]
        } else {
            Vec::new()
        };

        Self::new(options, signature)
    }
}

impl std::fmt::Debug for EventsState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventsState")
            .field("options", &self.options.len())
            .field("signature", &self.signature.is_some())
            .finish()
    }
}

fn header_pairs(headers: &HeaderMap) -> Vec<(String, String)> {
    headers
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_string(), v.to_string()))
        })
        .collect()
}

/// Map a parse failure to a response status
fn error_status(err: &Error) -> StatusCode {
    match err {
        Error::Unauthorized | Error::Signature(_) => StatusCode::UNAUTHORIZED,
        _ if err.is_unmarshal() => StatusCode::BAD_REQUEST,
        // Unknown inner types are acknowledged so Slack does not retry them.
        _ if err.inner_event_type().is_some() => StatusCode::OK,
        _ => StatusCode::BAD_REQUEST,
    }
}

fn log_callback(event: &EventsApiEvent) {
    let EventData::Callback(callback) = &event.data else {
        return;
    };

    let inner_type = event.inner_event.event_type.as_str();
    match &event.inner_event.data {
        Some(InnerEventData::Message(message)) => info!(
            event_id = %callback.event_id,
            team_id = %callback.team_id,
            channel = %message.channel,
            user = %message.user,
            text = %mask_for_logging(&message.text),
            "Received Slack message event"
        ),
        Some(InnerEventData::AppMention(mention)) => info!(
            event_id = %callback.event_id,
            team_id = %callback.team_id,
            channel = %mention.channel,
            text = %mask_for_logging(&mention.text),
            "Received Slack app_mention event"
        ),
        _ => info!(
            event_id = %callback.event_id,
            team_id = %callback.team_id,
            inner_type = %inner_type,
            "Received Slack event"
        ),
    }
}

/// Handle an Events API request (POST)
async fn slack_events(
    Extension(state): Extension<Arc<EventsState>>,
    headers: HeaderMap,
    body: String,
) -> Response {
    if let Some(verifier) = &state.signature {
        if let Err(e) = verifier.verify_headers(&header_pairs(&headers), &body) {
            warn!(error = %e, "Rejected Slack request");
            return (StatusCode::UNAUTHORIZED, e.to_string()).into_response();
        }
    }

    match parse_event(&body, &state.options) {
        Ok(event) => match &event.data {
            EventData::UrlVerification(verification) => {
                info!("Answering Slack URL verification");
                Json(ChallengeResponse::from(verification)).into_response()
            }
            _ => {
                log_callback(&event);
                StatusCode::OK.into_response()
            }
        },
        Err(e) => {
            let status = error_status(&e);
            match e.inner_event_type() {
                Some(event_type) if status == StatusCode::OK => {
                    warn!(event_type = %event_type, "Ignoring unsupported Slack event");
                }
                _ => debug!(error = %e, status = %status, "Failed to parse Slack event"),
            }
            (status, e.to_string()).into_response()
        }
    }
}

/// Create events routes
pub fn events_routes(state: Arc<EventsState>) -> Router {
    Router::new()
        .route("/slack/events", post(slack_events))
        .layer(Extension(state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use slackline_events::signature::{SIGNATURE_HEADER, TIMESTAMP_HEADER};
    use std::time::{SystemTime, UNIX_EPOCH};
    use tower::ServiceExt;

    const TOKEN: &str = "T";
    const SECRET: &str = "8f742231b10e8888abcd99yyyzzz85a5";

    fn token_router() -> Router {
        events_routes(Arc::new(EventsState::new(
            vec![verify_token(TokenComparator::new(TOKEN))],
            None,
        )))
    }

    async fn post_events(router: Router, request: Request<Body>) -> (StatusCode, String) {
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    fn request(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/slack/events")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    // ========================================================================
    // Token verification
    // ========================================================================

    #[tokio::test]
    async fn test_url_verification_answers_challenge() {
        let (status, body) = post_events(
            token_router(),
            request(r#"{"token":"T","type":"url_verification","challenge":"C123"}"#),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["challenge"], "C123");
    }

    #[tokio::test]
    async fn test_callback_acknowledged() {
        let (status, _) = post_events(
            token_router(),
            request(
                r#"{"token":"T","type":"event_callback","event":{"type":"message","text":"hi"},"event_id":"E1"}"#,
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_wrong_token_is_unauthorized() {
        let (status, body) = post_events(
            token_router(),
            request(r#"{"token":"X","type":"url_verification","challenge":"C123"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, "token verification failed");
    }

    #[tokio::test]
    async fn test_no_credentials_rejects_everything() {
        let router = events_routes(Arc::new(EventsState::from_settings(
            &SlackSettings::default(),
        )));
        let (status, _) = post_events(
            router,
            request(r#"{"token":"T","type":"url_verification","challenge":"C123"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_rate_limited_envelope_acknowledged() {
        let (status, body) = post_events(
            token_router(),
            request(r#"{"token":"T","type":"app_rate_limited","team_id":"T1","minute_rate_limited":1518467820,"api_app_id":"A1"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, r#"{"challenge":""}"#);
    }

    #[tokio::test]
    async fn test_invalid_json_is_bad_request() {
        let (status, _) = post_events(token_router(), request("{not json")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unknown_inner_event_acknowledged() {
        let (status, body) = post_events(
            token_router(),
            request(r#"{"token":"T","type":"event_callback","event":{"type":"no_such_event"}}"#),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("no_such_event"));
    }

    #[tokio::test]
    async fn test_malformed_inner_event_is_bad_request() {
        let (status, _) = post_events(
            token_router(),
            request(r#"{"token":"T","type":"event_callback","event":{"type":"message","text":7}}"#),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    // ========================================================================
    // Signature verification
    // ========================================================================

    fn signed_request(body: &str, signature: Option<&str>) -> Request<Body> {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs()
            .to_string();
        let signature = match signature {
            Some(s) => s.to_string(),
            None => SecretsVerifier::new(SECRET).sign(&timestamp, body).unwrap(),
        };

        Request::builder()
            .method("POST")
            .uri("/slack/events")
            .header(TIMESTAMP_HEADER, timestamp)
            .header(SIGNATURE_HEADER, signature)
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn signing_router() -> Router {
        let settings = SlackSettings {
            signing_secret: SECRET.to_string(),
            ..SlackSettings::default()
        };
        events_routes(Arc::new(EventsState::from_settings(&settings)))
    }

    #[tokio::test]
    async fn test_signed_request_accepted_without_token() {
        let body = r#"{"token":"anything","type":"url_verification","challenge":"C9"}"#;
        let (status, response) = post_events(signing_router(), signed_request(body, None)).await;

        assert_eq!(status, StatusCode::OK);
        assert!(response.contains("C9"));
    }

    #[tokio::test]
    async fn test_bad_signature_rejected() {
        let body = r#"{"token":"T","type":"url_verification","challenge":"C9"}"#;
        let (status, _) =
            post_events(signing_router(), signed_request(body, Some("v0=deadbeef"))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_missing_signature_headers_rejected() {
        let (status, _) = post_events(
            signing_router(),
            request(r#"{"token":"T","type":"url_verification","challenge":"C9"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_error_status_mapping() {
        assert_eq!(error_status(&Error::Unauthorized), StatusCode::UNAUTHORIZED);
        assert_eq!(
            error_status(&Error::Signature("bad".into())),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            error_status(&Error::UnknownInnerEvent("x".into())),
            StatusCode::OK
        );
    }
}
