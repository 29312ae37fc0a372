//! Freshly fetched guild and player state.
//!
//! These types are the comparison input for the diff engine. They live only
//! for the duration of one scan and are never persisted as-is.

use serde::Serialize;

use super::{AllyCode, CharacterRecord};
use crate::error::WatchError;

/// Guild display name used when the provider returns no guild entry.
pub const UNKNOWN_GUILD_NAME: &str = "Unknown Guild";

/// Snapshot of one character as reported by the stats provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FetchedCharacterStat {
    /// Canonical uppercase character code.
    pub character_id: String,
    /// Owning player.
    pub ally_code: AllyCode,
    /// Owning player's display name.
    pub player_name: String,
    /// Current gear tier.
    pub gear_level: i32,
    /// Current star rarity.
    pub star_level: i32,
    /// Number of zeta abilities currently unlocked.
    pub zeta_count: i32,
}

impl FetchedCharacterStat {
    /// Converts the snapshot into the record that should be persisted.
    #[must_use]
    pub fn to_record(&self) -> CharacterRecord {
        CharacterRecord {
            ally_code: self.ally_code.clone(),
            character_id: self.character_id.clone(),
            gear_level: self.gear_level,
            star_level: self.star_level,
            zeta_count: self.zeta_count,
        }
    }
}

/// All fetched characters belonging to one player.
///
/// `characters` is ordered by character code so evaluation is reproducible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerRoster {
    /// Player identifier.
    pub ally_code: AllyCode,
    /// Player display name.
    pub player_name: String,
    /// One snapshot per owned character.
    pub characters: Vec<FetchedCharacterStat>,
}

/// Guild membership as returned by the roster lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GuildRoster {
    /// Guild display name.
    pub guild_name: String,
    /// Members' ally codes in provider order.
    pub members: Vec<AllyCode>,
}

impl GuildRoster {
    /// Collapses the provider's guild list into a single roster.
    ///
    /// The name comes from the first entry, falling back to
    /// [`UNKNOWN_GUILD_NAME`]. Members of every entry are kept, first
    /// occurrence wins.
    #[must_use]
    pub fn merge(guilds: Vec<Self>) -> Self {
        let guild_name = guilds
            .first()
            .map_or_else(|| UNKNOWN_GUILD_NAME.to_string(), |g| g.guild_name.clone());

        let mut members: Vec<AllyCode> = Vec::new();
        for member in guilds.into_iter().flat_map(|g| g.members) {
            if !members.contains(&member) {
                members.push(member);
            }
        }

        Self {
            guild_name,
            members,
        }
    }
}

/// A player object the provider sent but that could not be converted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedPlayer {
    /// Owner of the object, when its first unit carries a readable ally
    /// code.
    pub ally_code: Option<AllyCode>,
    /// Why the object was rejected.
    pub error: WatchError,
}

/// Result of one bulk character-stats request.
///
/// Malformed player objects are set aside in `rejected` so the rest of the
/// batch can still be evaluated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RosterBatch {
    /// Players that converted cleanly, in response order.
    pub players: Vec<PlayerRoster>,
    /// Player objects that did not.
    pub rejected: Vec<RejectedPlayer>,
}

impl From<Vec<PlayerRoster>> for RosterBatch {
    fn from(players: Vec<PlayerRoster>) -> Self {
        Self {
            players,
            rejected: Vec::new(),
        }
    }
}
