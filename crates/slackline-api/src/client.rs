//! Slack Web API client.
//!
//! Thin request/response wrappers over `reqwest`. Each call is a single
//! attempt; Slack's `{ok, error}` envelope is checked before decoding.

use crate::error::{Error, Result};
use crate::types::{
    Channel, ConversationsListResponse, OpenConversationResponse, PostMessageParameters,
    PostMessageResponse,
};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, instrument};

/// Default Web API base URL
pub const DEFAULT_BASE_URL: &str = "https://slack.com/api";

/// Page size requested from paginated methods
const PAGE_LIMIT: u32 = 200;

/// Build the HTTP client shared by [`SlackClient`] and
/// [`OAuthClient`](crate::OAuthClient)
pub(crate) fn http_client() -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .map_err(Error::Network)
}

/// Send a request and decode its payload after checking `ok`
pub(crate) async fn send<T: DeserializeOwned>(method: &str, request: RequestBuilder) -> Result<T> {
    let body: serde_json::Value = request.send().await?.error_for_status()?.json().await?;

    if !body["ok"].as_bool().unwrap_or(false) {
        let code = body["error"].as_str().unwrap_or("unknown_error").to_string();
        debug!(method = %method, error = %code, "Slack API call failed");
        return Err(Error::Api(code));
    }

    if let Some(warning) = body["warning"].as_str() {
        debug!(method = %method, warning = %warning, "Slack API warning");
    }

    Ok(serde_json::from_value(body)?)
}

/// Authenticated Web API client
#[derive(Clone)]
pub struct SlackClient {
    token: String,
    client: Client,
    base_url: String,
}

impl std::fmt::Debug for SlackClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlackClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl SlackClient {
    /// Create a client for a bot or user token.
    ///
    /// # Errors
    /// Returns an error if the HTTP client fails to build.
    pub fn new(token: impl Into<String>) -> Result<Self> {
        Ok(Self {
            token: token.into(),
            client: http_client()?,
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Set a custom base URL (for testing).
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    fn api_url(&self, method: &str) -> String {
        format!("{}/{}", self.base_url, method)
    }

    async fn get<T, Q>(&self, method: &str, query: &Q) -> Result<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let request = self
            .client
            .get(self.api_url(method))
            .bearer_auth(&self.token)
            .query(query);
        send(method, request).await
    }

    async fn post_form<T, F>(&self, method: &str, form: &F) -> Result<T>
    where
        T: DeserializeOwned,
        F: Serialize + ?Sized,
    {
        let request = self
            .client
            .post(self.api_url(method))
            .bearer_auth(&self.token)
            .form(form);
        send(method, request).await
    }

    /// List public and private channels visible to the token.
    ///
    /// Follows `next_cursor` until every page has been read.
    #[instrument(skip(self))]
    pub async fn get_channels(&self, exclude_archived: bool) -> Result<Vec<Channel>> {
        let mut channels = Vec::new();
        let mut cursor = String::new();

        loop {
            let mut query = vec![
                ("types", "public_channel,private_channel".to_string()),
                ("exclude_archived", exclude_archived.to_string()),
                ("limit", PAGE_LIMIT.to_string()),
            ];
            if !cursor.is_empty() {
                query.push(("cursor", cursor.clone()));
            }

            let page: ConversationsListResponse = self.get("conversations.list", &query).await?;
            channels.extend(page.channels);

            cursor = page.response_metadata.next_cursor;
            if cursor.is_empty() {
                break;
            }
        }

        debug!(count = channels.len(), "Fetched channels");
        Ok(channels)
    }

    /// Post a message, returning `(channel, ts)` of the new message
    #[instrument(skip(self, params), fields(thread = ?params.thread_ts))]
    pub async fn post_message(
        &self,
        channel: &str,
        params: &PostMessageParameters,
    ) -> Result<(String, String)> {
        #[derive(Serialize)]
        struct Form<'a> {
            channel: &'a str,
            #[serde(flatten)]
            params: &'a PostMessageParameters,
        }

        let response: PostMessageResponse = self
            .post_form("chat.postMessage", &Form { channel, params })
            .await?;
        Ok((response.channel, response.ts))
    }

    /// Open (or find) the direct message channel with a user.
    ///
    /// Returns `(no_op, already_open, channel_id)`.
    #[instrument(skip(self))]
    pub async fn open_im_channel(&self, user: &str) -> Result<(bool, bool, String)> {
        let response: OpenConversationResponse = self
            .post_form("conversations.open", &[("users", user)])
            .await?;
        Ok((response.no_op, response.already_open, response.channel.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_url() {
        let client = SlackClient::new("xoxb-test")
            .unwrap()
            .with_base_url("http://localhost:1234/api/");
        assert_eq!(
            client.api_url("chat.postMessage"),
            "http://localhost:1234/api/chat.postMessage"
        );
    }

    #[test]
    fn test_debug_hides_token() {
        let client = SlackClient::new("xoxb-secret").unwrap();
        assert!(!format!("{client:?}").contains("xoxb-secret"));
    }
}
