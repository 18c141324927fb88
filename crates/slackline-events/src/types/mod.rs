//! Inner event payload shapes
//!
//! [`InnerEventData`] is the closed set of shapes the registries can decode
//! into. Each variant wraps one leaf struct from [`events_api`] or [`rtm`].

use serde::Serialize;

pub mod events_api;
#[allow(missing_docs)]
pub mod rtm;

macro_rules! inner_event_data {
    ($($(#[$doc:meta])* $variant:ident($shape:ty),)+) => {
        /// A decoded inner event
        #[derive(Debug, Clone, PartialEq, Serialize)]
        #[serde(untagged)]
        pub enum InnerEventData {
            $($(#[$doc])* $variant($shape),)+
        }

        impl InnerEventData {
            /// The `type` field carried by the decoded payload
            #[must_use]
            pub fn event_type(&self) -> &str {
                match self {
                    $(Self::$variant(e) => &e.event_type,)+
                }
            }
        }
    };
}

inner_event_data! {
    /// Events API `app_mention`
    AppMention(events_api::AppMentionEvent),
    /// Events API `app_home_opened`
    AppHomeOpened(events_api::AppHomeOpenedEvent),
    /// Events API `app_uninstalled`
    AppUninstalled(events_api::AppUninstalledEvent),
    /// Events API `grid_migration_finished`
    GridMigrationFinished(events_api::GridMigrationEvent),
    /// Events API `grid_migration_started`
    GridMigrationStarted(events_api::GridMigrationEvent),
    /// Events API `link_shared`
    LinkShared(events_api::LinkSharedEvent),
    /// Events API `message`
    Message(events_api::MessageEvent),
    /// Events API `member_joined_channel`
    MemberJoinedChannel(events_api::MemberJoinedChannelEvent),
    /// Events API `member_left_channel`
    MemberLeftChannel(events_api::MemberLeftChannelEvent),
    /// Events API `pin_added`
    PinAdded(events_api::PinEvent),
    /// Events API `pin_removed`
    PinRemoved(events_api::PinEvent),
    /// Events API `reaction_added`
    ReactionAdded(events_api::ReactionEvent),
    /// Events API `reaction_removed`
    ReactionRemoved(events_api::ReactionEvent),
    /// Events API `tokens_revoked`
    TokensRevoked(events_api::TokensRevokedEvent),
    /// RTM `hello`
    Hello(rtm::HelloEvent),
    /// RTM `message`
    RtmMessage(rtm::MessageEvent),
    /// RTM `presence_change`
    PresenceChange(rtm::PresenceChangeEvent),
    /// RTM `user_typing`
    UserTyping(rtm::UserTypingEvent),
    /// RTM `channel_created`
    ChannelCreated(rtm::ChannelCreatedEvent),
    /// RTM `channel_joined`
    ChannelJoined(rtm::ChannelCreatedEvent),
    /// RTM `channel_left`
    ChannelLeft(rtm::ChannelInfoEvent),
    /// RTM `channel_deleted`
    ChannelDeleted(rtm::ChannelInfoEvent),
    /// RTM `channel_rename`
    ChannelRename(rtm::ChannelCreatedEvent),
    /// RTM `channel_archive`
    ChannelArchive(rtm::ChannelInfoEvent),
    /// RTM `channel_unarchive`
    ChannelUnarchive(rtm::ChannelInfoEvent),
    /// RTM `im_created`
    ImCreated(rtm::ChannelCreatedEvent),
    /// RTM `im_open`
    ImOpen(rtm::ImEvent),
    /// RTM `im_close`
    ImClose(rtm::ImEvent),
    /// RTM `team_join`
    TeamJoin(rtm::TeamJoinEvent),
    /// RTM `emoji_changed`
    EmojiChanged(rtm::EmojiChangedEvent),
    /// RTM `reaction_added`
    RtmReactionAdded(rtm::ReactionEvent),
    /// RTM `reaction_removed`
    RtmReactionRemoved(rtm::ReactionEvent),
}
