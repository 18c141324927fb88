//! Registry - inner event type lookup
//!
//! Two read-only tables map an inner event `type` to the function that decodes
//! it: one for Events API shapes and one for real-time messaging shapes. Both
//! are built once on first use and never mutated.
//!
//! The tables overlap (`message`, `reaction_added`, `reaction_removed`) with
//! different shapes. [`lookup`] always prefers the Events API table.

use crate::types::InnerEventData;
use serde_json::value::RawValue;
use std::collections::HashMap;
use std::sync::LazyLock;
use tracing::debug;

/// Decodes a raw inner event into its registered shape
pub type DecodeFn = fn(&RawValue) -> serde_json::Result<InnerEventData>;

/// Which table a lookup was resolved from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegistrySource {
    /// Events API inner events
    EventsApi,
    /// Real-time messaging events
    Rtm,
}

impl RegistrySource {
    /// Returns the string representation
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EventsApi => "events_api",
            Self::Rtm => "rtm",
        }
    }
}

impl std::fmt::Display for RegistrySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A static table of event decoders keyed by discriminator
pub struct Registry {
    source: RegistrySource,
    decoders: HashMap<&'static str, DecodeFn>,
}

impl Registry {
    fn new(source: RegistrySource, entries: &[(&'static str, DecodeFn)]) -> Self {
        let decoders: HashMap<_, _> = entries.iter().copied().collect();
        debug_assert_eq!(decoders.len(), entries.len(), "duplicate event type");
        Self { source, decoders }
    }

    /// Table this registry represents
    #[must_use]
    pub fn source(&self) -> RegistrySource {
        self.source
    }

    /// Get the decoder for an event type
    #[must_use]
    pub fn get(&self, event_type: &str) -> Option<DecodeFn> {
        self.decoders.get(event_type).copied()
    }

    /// Check if an event type is registered
    #[must_use]
    pub fn contains(&self, event_type: &str) -> bool {
        self.decoders.contains_key(event_type)
    }

    /// Registered event types, sorted
    #[must_use]
    pub fn event_types(&self) -> Vec<&'static str> {
        let mut types: Vec<_> = self.decoders.keys().copied().collect();
        types.sort_unstable();
        types
    }

    /// Number of registered event types
    #[must_use]
    pub fn len(&self) -> usize {
        self.decoders.len()
    }

    /// Whether the registry has no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.decoders.is_empty()
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("source", &self.source)
            .field("event_types", &self.event_types())
            .finish()
    }
}

macro_rules! decoder {
    ($variant:ident) => {
        (|raw: &RawValue| serde_json::from_str(raw.get()).map(InnerEventData::$variant)) as DecodeFn
    };
}

/// Events API inner event table
pub static EVENTS_API_REGISTRY: LazyLock<Registry> = LazyLock::new(|| {
    Registry::new(
        RegistrySource::EventsApi,
        &[
            ("app_mention", decoder!(AppMention)),
            ("app_home_opened", decoder!(AppHomeOpened)),
            ("app_uninstalled", decoder!(AppUninstalled)),
            ("grid_migration_finished", decoder!(GridMigrationFinished)),
            ("grid_migration_started", decoder!(GridMigrationStarted)),
            ("link_shared", decoder!(LinkShared)),
            ("message", decoder!(Message)),
            ("member_joined_channel", decoder!(MemberJoinedChannel)),
            ("member_left_channel", decoder!(MemberLeftChannel)),
            ("pin_added", decoder!(PinAdded)),
            ("pin_removed", decoder!(PinRemoved)),
            ("reaction_added", decoder!(ReactionAdded)),
            ("reaction_removed", decoder!(ReactionRemoved)),
            ("tokens_revoked", decoder!(TokensRevoked)),
        ],
    )
});

/// Real-time messaging event table
pub static RTM_REGISTRY: LazyLock<Registry> = LazyLock::new(|| {
    Registry::new(
        RegistrySource::Rtm,
        &[
            ("hello", decoder!(Hello)),
            ("message", decoder!(RtmMessage)),
            ("presence_change", decoder!(PresenceChange)),
            ("user_typing", decoder!(UserTyping)),
            ("channel_created", decoder!(ChannelCreated)),
            ("channel_joined", decoder!(ChannelJoined)),
            ("channel_left", decoder!(ChannelLeft)),
            ("channel_deleted", decoder!(ChannelDeleted)),
            ("channel_rename", decoder!(ChannelRename)),
            ("channel_archive", decoder!(ChannelArchive)),
            ("channel_unarchive", decoder!(ChannelUnarchive)),
            ("im_created", decoder!(ImCreated)),
            ("im_open", decoder!(ImOpen)),
            ("im_close", decoder!(ImClose)),
            ("team_join", decoder!(TeamJoin)),
            ("emoji_changed", decoder!(EmojiChanged)),
            ("reaction_added", decoder!(RtmReactionAdded)),
            ("reaction_removed", decoder!(RtmReactionRemoved)),
        ],
    )
});

/// A successful registry lookup
#[derive(Debug, Clone, Copy)]
pub struct RegistryMatch {
    /// Table the event type was found in
    pub source: RegistrySource,
    /// Decoder for the event type
    pub decoder: DecodeFn,
}

impl RegistryMatch {
    /// Decode a raw inner event with the matched shape
    pub fn decode(&self, raw: &RawValue) -> serde_json::Result<InnerEventData> {
        (self.decoder)(raw)
    }
}

/// Look up an inner event type.
///
/// The Events API table is consulted before the RTM table, so a type present in
/// both always decodes into the Events API shape. Returns `None` on a miss.
#[must_use]
pub fn lookup(event_type: &str) -> Option<RegistryMatch> {
    let found = [&*EVENTS_API_REGISTRY, &*RTM_REGISTRY]
        .into_iter()
        .find_map(|registry| {
            registry.get(event_type).map(|decoder| RegistryMatch {
                source: registry.source(),
                decoder,
            })
        });

    if let Some(m) = &found {
        debug!(event_type = %event_type, source = %m.source, "Inner event type resolved");
    }

    found
}
