//! Real-time messaging event payloads
//!
//! These shapes also appear as inner events on legacy apps, so they are
//! registered as a fallback behind the Events API shapes.

use serde::{Deserialize, Serialize};

/// `hello`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HelloEvent {
    #[serde(rename = "type")]
    pub event_type: String,
}

/// RTM `message`. Differs from the Events API shape: carries `team` and
/// `reply_to` and no `channel_type`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    pub channel: String,
    pub user: String,
    pub text: String,
    pub ts: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thread_ts: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtype: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub hidden: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bot_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<i64>,
}

/// `presence_change`: `user` for a single change, `users` for batched ones
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PresenceChangeEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    pub presence: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub user: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub users: Vec<String>,
}

/// `user_typing`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserTypingEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    pub channel: String,
    pub user: String,
}

/// Channel summary embedded in channel lifecycle events
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelSummary {
    pub id: String,
    pub name: String,
    pub created: i64,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub creator: String,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_channel: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_archived: bool,
}

/// `channel_created` / `channel_joined` / `channel_rename` / `im_created`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelCreatedEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    pub channel: ChannelSummary,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub user: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub event_ts: String,
}

/// `channel_left` / `channel_deleted` / `channel_archive` / `channel_unarchive`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelInfoEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    pub channel: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub user: String,
    #[serde(rename = "ts", skip_serializing_if = "String::is_empty")]
    pub timestamp: String,
    #[serde(rename = "event_ts", skip_serializing_if = "String::is_empty")]
    pub event_timestamp: String,
}

/// `im_open` / `im_close`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    pub user: String,
    pub channel: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub event_ts: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserSummary {
    pub id: String,
    pub team_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub real_name: String,
    pub deleted: bool,
    pub is_bot: bool,
}

/// `team_join`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TeamJoinEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    pub user: UserSummary,
}

/// `emoji_changed`: `subtype` is `add` (with `name`/`value`) or `remove`
/// (with `names`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmojiChangedEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    pub subtype: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub names: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    pub event_ts: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReactedItem {
    #[serde(rename = "type")]
    pub item_type: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub channel: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub timestamp: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub file: String,
}

/// RTM `reaction_added` / `reaction_removed`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReactionEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    pub user: String,
    pub item_user: String,
    pub item: ReactedItem,
    pub reaction: String,
    pub event_ts: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_presence_change_batched() {
        let raw = json!({"type": "presence_change", "presence": "away", "users": ["U1", "U2"]});
        let event: PresenceChangeEvent = serde_json::from_value(raw).unwrap();
        assert!(event.user.is_empty());
        assert_eq!(event.users, vec!["U1".to_string(), "U2".to_string()]);
    }

    #[test]
    fn test_channel_created() {
        let raw = json!({
            "type": "channel_created",
            "channel": {"id": "C024BE91L", "name": "fun", "created": 1360782804, "creator": "U024BE7LH"}
        });
        let event: ChannelCreatedEvent = serde_json::from_value(raw).unwrap();
        assert_eq!(event.channel.name, "fun");
        assert_eq!(event.channel.created, 1360782804);
    }
}
