//! Web API client tests against a mock Slack server

use serde_json::json;
use slackline_api::{Error, OAuthClient, OAuthRequest, PostMessageParameters, SlackClient};
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn setup_mock_client() -> (MockServer, SlackClient) {
    let mock_server = MockServer::start().await;
    let client = SlackClient::new("xoxb-test")
        .unwrap()
        .with_base_url(mock_server.uri());
    (mock_server, client)
}

const OAUTH_REQUEST: OAuthRequest<'static> = OAuthRequest {
    client_id: "123.456",
    client_secret: "secret",
    code: "temp-code",
    redirect_uri: "https://example.com/oauth",
};

#[tokio::test]
async fn test_get_channels_follows_cursor() {
    let (mock_server, client) = setup_mock_client().await;

    Mock::given(method("GET"))
        .and(path("/conversations.list"))
        .and(query_param("cursor", "page2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": true,
            "channels": [{"id": "C2", "name": "random"}],
            "response_metadata": {"next_cursor": ""}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/conversations.list"))
        .and(header("authorization", "Bearer xoxb-test"))
        .and(query_param("exclude_archived", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": true,
            "channels": [{"id": "C1", "name": "general", "is_general": true}],
            "response_metadata": {"next_cursor": "page2"}
        })))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;

    let channels = client.get_channels(true).await.unwrap();
    let names: Vec<_> = channels.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["general", "random"]);
    assert!(channels[0].is_general);
}

#[tokio::test]
async fn test_api_error_code_is_surfaced() {
    let (mock_server, client) = setup_mock_client().await;

    Mock::given(method("GET"))
        .and(path("/conversations.list"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"ok": false, "error": "invalid_auth"})),
        )
        .mount(&mock_server)
        .await;

    let err = client.get_channels(false).await.unwrap_err();
    assert!(matches!(err, Error::Api(_)));
    assert_eq!(err.api_code(), Some("invalid_auth"));
}

#[tokio::test]
async fn test_post_message() {
    let (mock_server, client) = setup_mock_client().await;

    Mock::given(method("POST"))
        .and(path("/chat.postMessage"))
        .and(body_string_contains("channel=D123"))
        .and(body_string_contains("text=Hello+World%21"))
        .and(body_string_contains("thread_ts=1700000000.000100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": true,
            "channel": "D123",
            "ts": "1700000000.000200"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let params = PostMessageParameters::text("Hello World!").in_thread("1700000000.000100");
    let (channel, ts) = client.post_message("D123", &params).await.unwrap();
    assert_eq!(channel, "D123");
    assert_eq!(ts, "1700000000.000200");
}

#[tokio::test]
async fn test_open_im_channel() {
    let (mock_server, client) = setup_mock_client().await;

    Mock::given(method("POST"))
        .and(path("/conversations.open"))
        .and(body_string_contains("users=U123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": true,
            "already_open": true,
            "channel": {"id": "D123"}
        })))
        .mount(&mock_server)
        .await;

    let (no_op, already_open, channel) = client.open_im_channel("U123").await.unwrap();
    assert!(!no_op);
    assert!(already_open);
    assert_eq!(channel, "D123");
}

#[tokio::test]
async fn test_oauth_access() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth.access"))
        .and(body_string_contains("client_id=123.456"))
        .and(body_string_contains("code=temp-code"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": true,
            "access_token": "xoxp-1",
            "scope": "read,post",
            "team_name": "Acme",
            "team_id": "T1",
            "bot": {"bot_user_id": "B1", "bot_access_token": "xoxb-1"}
        })))
        .mount(&mock_server)
        .await;

    let client = OAuthClient::new().unwrap().with_base_url(mock_server.uri());

    let response = client.get_oauth_response(&OAUTH_REQUEST).await.unwrap();
    assert_eq!(response.team_name, "Acme");
    assert_eq!(response.bot.bot_access_token, "xoxb-1");

    let (token, scope) = client.get_oauth_token(&OAUTH_REQUEST).await.unwrap();
    assert_eq!(token, "xoxp-1");
    assert_eq!(scope, "read,post");
}

#[tokio::test]
async fn test_oauth_v2_access() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth.v2.access"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": true,
            "access_token": "xoxb-2",
            "token_type": "bot",
            "scope": "chat:write",
            "bot_user_id": "B2",
            "app_id": "A1",
            "team": {"id": "T1", "name": "Acme"},
            "authed_user": {"id": "U1", "scope": "", "access_token": "", "token_type": ""}
        })))
        .mount(&mock_server)
        .await;

    let client = OAuthClient::new().unwrap().with_base_url(mock_server.uri());
    let response = client.get_oauth_v2_response(&OAUTH_REQUEST).await.unwrap();
    assert_eq!(response.team.id, "T1");
    assert_eq!(response.authed_user.id, "U1");
}

#[tokio::test]
async fn test_oauth_v2_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth.v2.access"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"ok": false, "error": "invalid_code"})),
        )
        .mount(&mock_server)
        .await;

    let client = OAuthClient::new().unwrap().with_base_url(mock_server.uri());
    let err = client
        .get_oauth_v2_response(&OAUTH_REQUEST)
        .await
        .unwrap_err();
    assert_eq!(err.api_code(), Some("invalid_code"));
}
