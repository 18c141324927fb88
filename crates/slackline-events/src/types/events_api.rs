//! Events API inner event payloads
//!
//! Shapes delivered inside the `event` field of an `event_callback` envelope.
//! Missing fields decode to their zero value.

use serde::{Deserialize, Serialize};

/// `app_mention`: the app was mentioned in a channel it belongs to
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppMentionEvent {
    /// Event discriminator
    #[serde(rename = "type")]
    pub event_type: String,
    /// Mentioning user
    pub user: String,
    /// Message text including the mention
    pub text: String,
    /// Message timestamp
    pub ts: String,
    /// Channel the mention happened in
    pub channel: String,
    /// Event timestamp
    pub event_ts: String,
    /// Parent thread timestamp, when the mention is a thread reply
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thread_ts: Option<String>,
}

/// `app_home_opened`: a user opened the app's home tab
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppHomeOpenedEvent {
    /// Event discriminator
    #[serde(rename = "type")]
    pub event_type: String,
    /// User who opened the tab
    pub user: String,
    /// App home channel
    pub channel: String,
    /// Tab name (`home` or `messages`)
    pub tab: String,
    /// Event timestamp
    pub event_ts: String,
}

/// `app_uninstalled`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppUninstalledEvent {
    /// Event discriminator
    #[serde(rename = "type")]
    pub event_type: String,
}

/// `grid_migration_started` / `grid_migration_finished`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridMigrationEvent {
    /// Event discriminator
    #[serde(rename = "type")]
    pub event_type: String,
    /// Enterprise grid being migrated into
    pub enterprise_id: String,
}

/// A link attached to a [`LinkSharedEvent`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SharedLink {
    /// Registered domain that matched
    pub domain: String,
    /// Full URL
    pub url: String,
}

/// `link_shared`: a message contains a link on a domain the app registered
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkSharedEvent {
    /// Event discriminator
    #[serde(rename = "type")]
    pub event_type: String,
    /// Posting user
    pub user: String,
    /// Event timestamp
    #[serde(rename = "ts")]
    pub time_stamp: String,
    /// Channel the link was posted in
    pub channel: String,
    /// Timestamp of the message carrying the link
    pub message_ts: String,
    /// Parent thread timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thread_ts: Option<String>,
    /// Matched links
    pub links: Vec<SharedLink>,
}

/// Edit marker on a message
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Edited {
    /// Editing user
    pub user: String,
    /// Edit timestamp
    pub ts: String,
}

/// `message`: a message was posted to a channel the app can see
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageEvent {
    /// Event discriminator
    #[serde(rename = "type")]
    pub event_type: String,
    /// Posting user
    pub user: String,
    /// Message text
    pub text: String,
    /// Parent thread timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thread_ts: Option<String>,
    /// Message timestamp
    #[serde(rename = "ts")]
    pub time_stamp: String,
    /// Event timestamp
    #[serde(rename = "event_ts")]
    pub event_time_stamp: String,
    /// Channel ID
    pub channel: String,
    /// `channel`, `group`, `im` or `mpim`
    pub channel_type: String,
    /// Bot that posted the message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bot_id: Option<String>,
    /// Message subtype (`message_changed`, `bot_message`, ...)
    #[serde(rename = "subtype", skip_serializing_if = "Option::is_none")]
    pub sub_type: Option<String>,
    /// Hidden from the channel history
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub hidden: bool,
    /// Edit marker
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edited: Option<Edited>,
    /// Updated message for `message_changed`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<Box<MessageEvent>>,
    /// Previous version for `message_changed`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_message: Option<Box<MessageEvent>>,
}

/// `member_joined_channel`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemberJoinedChannelEvent {
    /// Event discriminator
    #[serde(rename = "type")]
    pub event_type: String,
    /// Joining user
    pub user: String,
    /// Channel joined
    pub channel: String,
    /// `C` for public, `G` for private channels
    pub channel_type: String,
    /// Team of the joining user
    pub team: String,
    /// Inviting user, when the join came from an invite
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inviter: Option<String>,
}

/// `member_left_channel`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemberLeftChannelEvent {
    /// Event discriminator
    #[serde(rename = "type")]
    pub event_type: String,
    /// Leaving user
    pub user: String,
    /// Channel left
    pub channel: String,
    /// `C` for public, `G` for private channels
    pub channel_type: String,
    /// Team of the leaving user
    pub team: String,
}

/// `pin_added` / `pin_removed`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PinEvent {
    /// Event discriminator
    #[serde(rename = "type")]
    pub event_type: String,
    /// Pinning user
    pub user: String,
    /// Channel the pin belongs to
    pub channel: String,
    /// Pinned item, kept as raw JSON
    pub item: serde_json::Value,
    /// Event timestamp
    pub event_ts: String,
    /// Whether the channel still has pins
    pub has_pins: bool,
}

/// Item a reaction was attached to
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReactionItem {
    /// `message`, `file` or `file_comment`
    #[serde(rename = "type")]
    pub item_type: String,
    /// Channel of a message item
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
    /// Timestamp of a message item
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ts: Option<String>,
    /// File ID of a file item
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    /// Comment ID of a file comment item
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_comment: Option<String>,
}

/// `reaction_added` / `reaction_removed`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReactionEvent {
    /// Event discriminator
    #[serde(rename = "type")]
    pub event_type: String,
    /// Reacting user
    pub user: String,
    /// Emoji name without colons
    pub reaction: String,
    /// Author of the reacted item
    pub item_user: String,
    /// Reacted item
    pub item: ReactionItem,
    /// Event timestamp
    pub event_ts: String,
}

/// Tokens listed in a [`TokensRevokedEvent`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevokedTokens {
    /// User IDs whose OAuth tokens were revoked
    pub oauth: Vec<String>,
    /// User IDs whose bot tokens were revoked
    pub bot: Vec<String>,
}

/// `tokens_revoked`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokensRevokedEvent {
    /// Event discriminator
    #[serde(rename = "type")]
    pub event_type: String,
    /// Revoked tokens
    pub tokens: RevokedTokens,
    /// Event timestamp
    pub event_ts: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_message_changed_nests_messages() {
        let raw = json!({
            "type": "message",
            "subtype": "message_changed",
            "hidden": true,
            "channel": "C123",
            "ts": "1700000000.000200",
            "message": {"type": "message", "user": "U1", "text": "edited", "ts": "1700000000.000100"},
            "previous_message": {"type": "message", "user": "U1", "text": "original", "ts": "1700000000.000100"}
        });

        let event: MessageEvent = serde_json::from_value(raw).unwrap();
        assert_eq!(event.sub_type.as_deref(), Some("message_changed"));
        assert!(event.hidden);
        assert_eq!(event.message.as_ref().unwrap().text, "edited");
        assert_eq!(event.previous_message.as_ref().unwrap().text, "original");
    }

    #[test]
    fn test_message_serialization_skips_empty_optionals() {
        let event = MessageEvent {
            event_type: "message".to_string(),
            text: "hi".to_string(),
            ..MessageEvent::default()
        };
        let value = serde_json::to_value(&event).unwrap();
        assert!(value.get("subtype").is_none());
        assert!(value.get("hidden").is_none());
        assert_eq!(value["text"], "hi");
    }

    #[test]
    fn test_tokens_revoked() {
        let raw = json!({
            "type": "tokens_revoked",
            "tokens": {"oauth": ["U1"], "bot": ["B1", "B2"]},
            "event_ts": "1700000000.1"
        });

        let event: TokensRevokedEvent = serde_json::from_value(raw).unwrap();
        assert_eq!(event.tokens.oauth, vec!["U1".to_string()]);
        assert_eq!(event.tokens.bot.len(), 2);
    }

    #[test]
    fn test_reaction_item_file() {
        let raw = json!({
            "type": "reaction_added",
            "user": "U1",
            "reaction": "thumbsup",
            "item": {"type": "file", "file": "F1"}
        });

        let event: ReactionEvent = serde_json::from_value(raw).unwrap();
        assert_eq!(event.item.item_type, "file");
        assert_eq!(event.item.file.as_deref(), Some("F1"));
        assert!(event.item.channel.is_none());
    }
}
