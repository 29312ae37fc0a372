//! Change notifications produced by the diff engine.
//!
//! Every notification-worthy change becomes one [`Notification`]. Its
//! [`Display`](std::fmt::Display) form is the line posted to the chat
//! webhook.

use std::fmt;

use serde::Serialize;
use utoipa::ToSchema;

/// One detected roster change.
///
/// Character names are already resolved to their display form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(tag = "category", rename_all = "snake_case")]
pub enum Notification {
    /// First sighting of a player with no persisted records.
    PlayerJoined {
        /// Player display name.
        player_name: String,
    },

    /// A known player owns a character that was not persisted before.
    CharacterUnlocked {
        /// Player display name.
        player_name: String,
        /// Resolved character display name.
        character_name: String,
        /// Star rarity at unlock.
        star_level: i32,
        /// Gear tier at unlock.
        gear_level: i32,
        /// Zeta count at unlock.
        zeta_count: i32,
    },

    /// Gear tier changed and passed the gear threshold.
    GearUpgraded {
        /// Player display name.
        player_name: String,
        /// Resolved character display name.
        character_name: String,
        /// New gear tier.
        gear_level: i32,
    },

    /// Star rarity changed and passed the star threshold.
    StarUpgraded {
        /// Player display name.
        player_name: String,
        /// Resolved character display name.
        character_name: String,
        /// New star rarity.
        star_level: i32,
    },

    /// Zeta count changed.
    ZetaAdded {
        /// Player display name.
        player_name: String,
        /// Resolved character display name.
        character_name: String,
    },
}

impl Notification {
    /// Returns the category as a static string slice.
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self {
            Self::PlayerJoined { .. } => "player_joined",
            Self::CharacterUnlocked { .. } => "character_unlocked",
            Self::GearUpgraded { .. } => "gear_upgraded",
            Self::StarUpgraded { .. } => "star_upgraded",
            Self::ZetaAdded { .. } => "zeta_added",
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PlayerJoined { player_name } => {
                write!(f, "{player_name} has joined the guild")
            }
            Self::CharacterUnlocked {
                player_name,
                character_name,
                star_level,
                gear_level,
                zeta_count,
            } => write!(
                f,
                "{player_name} has unlocked {character_name} at {star_level}* \
                 with Gear Level {gear_level} and {zeta_count} zetas"
            ),
            Self::GearUpgraded {
                player_name,
                character_name,
                gear_level,
            } => write!(
                f,
                "{player_name} has upgraded {character_name} to Gear Level {gear_level}"
            ),
            Self::StarUpgraded {
                player_name,
                character_name,
                star_level,
            } => write!(
                f,
                "{player_name} has upgraded {character_name} to {star_level} stars"
            ),
            Self::ZetaAdded {
                player_name,
                character_name,
            } => write!(f, "{player_name} has added a zeta to {character_name}"),
        }
    }
}
