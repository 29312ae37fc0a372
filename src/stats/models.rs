//! Wire types for the swgoh.help API and their conversion to domain types.
//!
//! Fields the scan depends on are required: a payload missing one fails
//! deserialization and surfaces as [`WatchError::DataShape`] rather than
//! silently dropping a character.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{
    AllyCode, FetchedCharacterStat, GuildRoster, PlayerRoster, RejectedPlayer, RosterBatch,
};
use crate::error::WatchError;

/// Sign-in response.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    /// Bearer token.
    pub access_token: String,
}

/// One guild entry from `/swgoh/guilds`.
#[derive(Debug, Deserialize)]
pub struct GuildDto {
    /// Guild display name.
    pub name: String,
    /// Guild members.
    pub roster: Vec<GuildMemberDto>,
}

/// One guild member.
#[derive(Debug, Deserialize)]
pub struct GuildMemberDto {
    /// Member ally code.
    #[serde(rename = "allyCode")]
    pub ally_code: AllyCode,
}

impl From<GuildDto> for GuildRoster {
    fn from(dto: GuildDto) -> Self {
        Self {
            guild_name: dto.name,
            members: dto.roster.into_iter().map(|m| m.ally_code).collect(),
        }
    }
}

/// Body of a `/swgoh/roster` request.
#[derive(Debug, Serialize)]
pub struct RosterRequest {
    /// Players to fetch, in numeric form.
    pub allycodes: Vec<u64>,
    /// Field projection; keeps the response small.
    pub project: RosterProjection,
}

impl RosterRequest {
    /// Builds a request for `ally_codes` with the standard projection.
    #[must_use]
    pub fn new(ally_codes: &[AllyCode]) -> Self {
        Self {
            allycodes: ally_codes.iter().map(AllyCode::as_number).collect(),
            project: RosterProjection::default(),
        }
    }
}

/// Field projection sent with a roster request. `1` selects a field.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterProjection {
    /// Unit name.
    pub name: u8,
    /// Owning player's ally code.
    pub ally_code: u8,
    /// Star rarity.
    pub star_level: u8,
    /// Gear tier.
    pub gear_level: u8,
    /// Zeta abilities.
    pub zetas: u8,
    /// Owning player's name.
    pub player: u8,
}

impl Default for RosterProjection {
    fn default() -> Self {
        Self {
            name: 1,
            ally_code: 1,
            star_level: 1,
            gear_level: 1,
            zetas: 1,
            player: 1,
        }
    }
}

/// One unit as owned by one player.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitDto {
    /// Owning player's ally code.
    pub ally_code: AllyCode,
    /// Owning player's name.
    pub player: String,
    /// Gear tier.
    pub gear_level: i32,
    /// Star rarity.
    pub star_level: i32,
    /// Unlocked zeta abilities; only the count matters.
    pub zetas: Vec<serde_json::Value>,
}

/// A player's roster: character code to the list of owned copies.
///
/// The provider wraps each unit in a single-element list.
pub type PlayerDto = BTreeMap<String, Vec<UnitDto>>;

/// Parses a `/swgoh/roster` response body.
///
/// Each player object is converted on its own: a malformed one lands in
/// [`RosterBatch::rejected`] and the others are kept.
///
/// # Errors
///
/// Returns [`WatchError::DataShape`] if the body is not a JSON list.
pub fn parse_roster_response(body: &str) -> Result<RosterBatch, WatchError> {
    let objects: Vec<serde_json::Value> =
        serde_json::from_str(body).map_err(|e| WatchError::DataShape(e.to_string()))?;

    let mut batch = RosterBatch::default();
    for object in objects {
        let ally_code = first_unit_ally_code(&object);
        let converted = serde_json::from_value::<PlayerDto>(object)
            .map_err(|e| WatchError::DataShape(e.to_string()))
            .and_then(player_from_dto);
        match converted {
            Ok(Some(player)) => batch.players.push(player),
            Ok(None) => {}
            Err(error) => batch.rejected.push(RejectedPlayer { ally_code, error }),
        }
    }
    Ok(batch)
}

/// Reads the owner of a raw player object from its first unit, if any.
fn first_unit_ally_code(object: &serde_json::Value) -> Option<AllyCode> {
    object
        .as_object()?
        .values()
        .find_map(|units| units.as_array()?.first()?.get("allyCode"))
        .and_then(|raw| AllyCode::deserialize(raw).ok())
}

/// Parses a `/swgoh/guilds` response body.
///
/// # Errors
///
/// Returns [`WatchError::DataShape`] if the body is not a list of guilds.
pub fn parse_guild_response(body: &str) -> Result<Vec<GuildRoster>, WatchError> {
    let guilds: Vec<GuildDto> =
        serde_json::from_str(body).map_err(|e| WatchError::DataShape(e.to_string()))?;
    Ok(guilds.into_iter().map(GuildRoster::from).collect())
}

/// Converts one player object. An object with no characters yields `None`.
///
/// # Errors
///
/// Returns [`WatchError::DataShape`] if a character has no unit entry or
/// the units disagree about which player owns them.
pub fn player_from_dto(player: PlayerDto) -> Result<Option<PlayerRoster>, WatchError> {
    let mut owner: Option<(AllyCode, String)> = None;
    let mut characters = Vec::with_capacity(player.len());

    for (character_id, units) in player {
        let Some(unit) = units.into_iter().next() else {
            return Err(WatchError::DataShape(format!(
                "character {character_id} has no unit entry"
            )));
        };

        if let Some((ally_code, _)) = &owner
            && *ally_code != unit.ally_code
        {
            return Err(WatchError::DataShape(format!(
                "character {character_id} belongs to {} inside roster of {ally_code}",
                unit.ally_code
            )));
        }
        if owner.is_none() {
            owner = Some((unit.ally_code.clone(), unit.player.clone()));
        }

        let zeta_count = i32::try_from(unit.zetas.len())
            .map_err(|_| WatchError::DataShape(format!("zeta count overflow on {character_id}")))?;

        characters.push(FetchedCharacterStat {
            character_id,
            ally_code: unit.ally_code,
            player_name: unit.player,
            gear_level: unit.gear_level,
            star_level: unit.star_level,
            zeta_count,
        });
    }

    Ok(owner.map(|(ally_code, player_name)| PlayerRoster {
        ally_code,
        player_name,
        characters,
    }))
}
