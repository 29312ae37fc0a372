//! Fixed-size batching of bulk character-stat requests.
//!
//! Batches are cut on ally-code boundaries, so a player's characters always
//! arrive in exactly one response.

use super::{AccessToken, StatsClient};
use crate::domain::{AllyCode, PlayerRoster, RosterBatch};
use crate::error::WatchError;

/// Splits `members` into request batches of at most `batch_size` ally
/// codes. A `batch_size` of zero is treated as one.
pub fn batches(members: &[AllyCode], batch_size: usize) -> std::slice::Chunks<'_, AllyCode> {
    members.chunks(batch_size.max(1))
}

/// Fetches one batch and keeps only players that were requested in it.
///
/// A player the provider returns twice is kept once (first occurrence).
/// Rejected player objects are passed through untouched.
///
/// # Errors
///
/// Propagates the client's [`WatchError::Fetch`] or
/// [`WatchError::DataShape`].
pub async fn fetch_batch<C>(
    client: &C,
    token: &AccessToken,
    batch: &[AllyCode],
) -> Result<RosterBatch, WatchError>
where
    C: StatsClient + ?Sized,
{
    let RosterBatch { players, rejected } = client.fetch_character_stats(token, batch).await?;

    let mut kept: Vec<PlayerRoster> = Vec::with_capacity(players.len());
    for player in players {
        if !batch.contains(&player.ally_code) {
            tracing::warn!(ally_code = %player.ally_code, "provider returned unrequested player, ignoring");
            continue;
        }
        if kept.iter().any(|p| p.ally_code == player.ally_code) {
            tracing::warn!(ally_code = %player.ally_code, "provider returned player twice, keeping first");
            continue;
        }
        kept.push(player);
    }
    Ok(RosterBatch {
        players: kept,
        rejected,
    })
}
