//! Web API request and response types

use serde::{Deserialize, Serialize};

/// Topic or purpose of a channel
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Topic {
    /// Text
    pub value: String,
    /// User who set it
    pub creator: String,
    /// Epoch seconds it was last set
    pub last_set: i64,
}

/// A conversation as returned by `conversations.list`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Channel {
    /// Channel ID
    pub id: String,
    /// Channel name without the leading `#`
    pub name: String,
    /// Public channel
    pub is_channel: bool,
    /// Private channel (legacy group)
    pub is_group: bool,
    /// Direct message
    pub is_im: bool,
    /// Private
    pub is_private: bool,
    /// Archived
    pub is_archived: bool,
    /// The workspace's `#general`
    pub is_general: bool,
    /// Calling user is a member
    pub is_member: bool,
    /// Epoch seconds the channel was created
    pub created: i64,
    /// Creating user
    pub creator: String,
    /// Member count, when reported
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_members: Option<u32>,
    /// Channel topic
    pub topic: Topic,
    /// Channel purpose
    pub purpose: Topic,
}

/// Optional arguments of `chat.postMessage`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PostMessageParameters {
    /// Message text
    pub text: String,
    /// Post as the authed user instead of the bot
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub as_user: bool,
    /// Bot username override
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Emoji icon override
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_emoji: Option<String>,
    /// Image icon override
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
    /// Reply in this thread
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thread_ts: Option<String>,
    /// Also post a thread reply to the channel
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub reply_broadcast: bool,
    /// Unfurl text links
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unfurl_links: Option<bool>,
    /// Unfurl media links
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unfurl_media: Option<bool>,
    /// Find and link channel names and usernames
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub link_names: bool,
}

impl PostMessageParameters {
    /// Plain text message
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Reply in a thread
    #[must_use]
    pub fn in_thread(mut self, thread_ts: impl Into<String>) -> Self {
        self.thread_ts = Some(thread_ts.into());
        self
    }

    /// Post as the authed user
    #[must_use]
    pub fn as_user(mut self, as_user: bool) -> Self {
        self.as_user = as_user;
        self
    }
}

/// Result of `chat.postMessage`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PostMessageResponse {
    /// Channel the message was posted to
    pub channel: String,
    /// Message timestamp (its ID)
    pub ts: String,
}

/// Result of `conversations.open`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct OpenConversationResponse {
    /// Nothing changed
    pub no_op: bool,
    /// The conversation was already open
    pub already_open: bool,
    /// Opened conversation
    pub channel: ConversationRef,
}

/// Conversation identifier
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ConversationRef {
    /// Conversation ID
    pub id: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ResponseMetadata {
    pub(crate) next_cursor: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ConversationsListResponse {
    pub(crate) channels: Vec<Channel>,
    pub(crate) response_metadata: ResponseMetadata,
}

/// Incoming webhook installed by an OAuth flow
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OAuthResponseIncomingWebhook {
    /// Webhook URL
    pub url: String,
    /// Channel name
    pub channel: String,
    /// Channel ID
    #[serde(skip_serializing_if = "String::is_empty")]
    pub channel_id: String,
    /// Settings URL
    pub configuration_url: String,
}

/// Bot user installed by an OAuth v1 flow
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OAuthResponseBot {
    /// Bot user ID
    pub bot_user_id: String,
    /// Bot token
    pub bot_access_token: String,
}

/// `oauth.access` response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OAuthResponse {
    /// User token
    pub access_token: String,
    /// Granted scopes, comma separated
    pub scope: String,
    /// Workspace name
    pub team_name: String,
    /// Workspace ID
    pub team_id: String,
    /// Installed incoming webhook
    pub incoming_webhook: OAuthResponseIncomingWebhook,
    /// Installed bot
    pub bot: OAuthResponseBot,
    /// Authorizing user
    #[serde(skip_serializing_if = "String::is_empty")]
    pub user_id: String,
}

/// Workspace of an `oauth.v2.access` response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OAuthV2ResponseTeam {
    /// Workspace ID
    pub id: String,
    /// Workspace name
    pub name: String,
}

/// Enterprise grid of an `oauth.v2.access` response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OAuthV2ResponseEnterprise {
    /// Enterprise ID
    pub id: String,
    /// Enterprise name
    pub name: String,
}

/// User half of an `oauth.v2.access` response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OAuthV2ResponseAuthedUser {
    /// User ID
    pub id: String,
    /// User scopes
    pub scope: String,
    /// User token, when user scopes were requested
    pub access_token: String,
    /// Token type
    pub token_type: String,
}

/// `oauth.v2.access` response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OAuthV2Response {
    /// Bot token
    pub access_token: String,
    /// `bot`
    pub token_type: String,
    /// Bot scopes
    pub scope: String,
    /// Bot user ID
    pub bot_user_id: String,
    /// App ID
    pub app_id: String,
    /// Installing workspace
    pub team: OAuthV2ResponseTeam,
    /// Installed incoming webhook
    pub incoming_webhook: OAuthResponseIncomingWebhook,
    /// Enterprise grid, if any
    pub enterprise: OAuthV2ResponseEnterprise,
    /// Authorizing user
    pub authed_user: OAuthV2ResponseAuthedUser,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_message_parameters_form() {
        let params = PostMessageParameters::text("Hello World!").in_thread("1.2");
        let value = serde_json::to_value(&params).unwrap();

        assert_eq!(value["text"], "Hello World!");
        assert_eq!(value["thread_ts"], "1.2");
        assert!(value.get("as_user").is_none());
        assert!(value.get("unfurl_links").is_none());
    }

    #[test]
    fn test_oauth_v2_response_defaults_missing_sections() {
        let resp: OAuthV2Response = serde_json::from_value(serde_json::json!({
            "access_token": "xoxb-1",
            "token_type": "bot",
            "team": {"id": "T1", "name": "Acme"}
        }))
        .unwrap();

        assert_eq!(resp.team.name, "Acme");
        assert!(resp.enterprise.id.is_empty());
        assert!(resp.authed_user.access_token.is_empty());
    }
}
