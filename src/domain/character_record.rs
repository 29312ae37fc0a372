//! Persisted per-player character state.

use serde::{Deserialize, Serialize};

use super::AllyCode;

/// Last-known state of one character owned by one player.
///
/// At most one record exists per `(ally_code, character_id)` pair. Records
/// are created on first sighting and fully overwritten whenever any tracked
/// field changes; they are never deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterRecord {
    /// Partition key: the owning player.
    pub ally_code: AllyCode,
    /// Canonical uppercase character code (e.g. `"DARTHREVAN"`).
    pub character_id: String,
    /// Gear tier.
    pub gear_level: i32,
    /// Star rarity, 1 through 7.
    pub star_level: i32,
    /// Number of zeta abilities unlocked.
    pub zeta_count: i32,
}

impl CharacterRecord {
    /// Returns `true` if any tracked field differs from `other`.
    #[must_use]
    pub fn differs_from(&self, other: &Self) -> bool {
        self.gear_level != other.gear_level
            || self.star_level != other.star_level
            || self.zeta_count != other.zeta_count
    }
}
