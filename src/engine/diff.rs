//! Diff-and-notify engine.
//!
//! [`DiffEngine::evaluate`] compares one player's freshly fetched characters
//! against the records persisted for that player and decides, character by
//! character, what to write back and what to broadcast. It performs no I/O:
//! the orchestrator applies the writes and releases each character's
//! notifications once its write is confirmed.

use std::collections::HashMap;
use std::sync::Arc;

use super::NotifyPolicy;
use crate::domain::{CharacterNames, CharacterRecord, FetchedCharacterStat, Notification, PlayerRoster};

/// How a fetched character relates to its persisted record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    /// No record existed for this character.
    Created,
    /// A record existed and at least one tracked field changed.
    Updated,
}

/// One record to upsert, with the notifications that depend on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterChange {
    /// Whether the record is new or an overwrite.
    pub kind: ChangeKind,
    /// Full record to persist.
    pub record: CharacterRecord,
    /// Notifications to release once `record` is persisted. May be empty
    /// when every changed field stayed under its threshold.
    pub notifications: Vec<Notification>,
}

/// Result of evaluating one player.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Evaluation {
    /// "Joined the guild" notification for first-time players.
    pub player_notification: Option<Notification>,
    /// Changed characters in fetch order.
    pub changes: Vec<CharacterChange>,
}

impl Evaluation {
    /// Records to upsert, in fetch order.
    pub fn upserts(&self) -> impl Iterator<Item = &CharacterRecord> {
        self.changes.iter().map(|c| &c.record)
    }

    /// All notifications, assuming every write succeeds.
    #[must_use]
    pub fn notifications(&self) -> Vec<Notification> {
        self.player_notification
            .iter()
            .chain(self.changes.iter().flat_map(|c| c.notifications.iter()))
            .cloned()
            .collect()
    }

    /// Returns `true` if nothing needs writing or broadcasting.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.player_notification.is_none() && self.changes.is_empty()
    }
}

/// Stateless comparison of fetched stats against persisted records.
#[derive(Debug, Clone)]
pub struct DiffEngine {
    policy: NotifyPolicy,
    names: Arc<CharacterNames>,
}

impl DiffEngine {
    /// Creates an engine with the given thresholds and name table.
    #[must_use]
    pub fn new(policy: NotifyPolicy, names: Arc<CharacterNames>) -> Self {
        Self { policy, names }
    }

    /// Returns the active notification policy.
    #[must_use]
    pub fn policy(&self) -> NotifyPolicy {
        self.policy
    }

    /// Compares `player` against `existing` records for the same ally code.
    ///
    /// When `is_new_signup` is set, a single "joined" notification replaces
    /// every per-character "unlocked" notification, but every character is
    /// still returned for persisting.
    #[must_use]
    pub fn evaluate(
        &self,
        player: &PlayerRoster,
        existing: &[CharacterRecord],
        is_new_signup: bool,
    ) -> Evaluation {
        let persisted: HashMap<&str, &CharacterRecord> = existing
            .iter()
            .map(|r| (r.character_id.as_str(), r))
            .collect();

        let player_notification = is_new_signup.then(|| Notification::PlayerJoined {
            player_name: player.player_name.clone(),
        });

        let changes = player
            .characters
            .iter()
            .filter_map(|stat| {
                let previous = persisted.get(stat.character_id.as_str()).copied();
                self.compare(stat, previous, is_new_signup)
            })
            .collect();

        Evaluation {
            player_notification,
            changes,
        }
    }

    /// Classifies one character. `None` means unchanged.
    fn compare(
        &self,
        stat: &FetchedCharacterStat,
        previous: Option<&CharacterRecord>,
        is_new_signup: bool,
    ) -> Option<CharacterChange> {
        let record = stat.to_record();
        let character_name = self.names.resolve(&stat.character_id).to_string();

        let Some(previous) = previous else {
            let mut notifications = Vec::new();
            if !is_new_signup {
                notifications.push(Notification::CharacterUnlocked {
                    player_name: stat.player_name.clone(),
                    character_name,
                    star_level: stat.star_level,
                    gear_level: stat.gear_level,
                    zeta_count: stat.zeta_count,
                });
            }
            return Some(CharacterChange {
                kind: ChangeKind::Created,
                record,
                notifications,
            });
        };

        if !record.differs_from(previous) {
            return None;
        }

        let mut notifications = Vec::new();
        if record.gear_level != previous.gear_level && self.policy.gear_worthy(record.gear_level) {
            notifications.push(Notification::GearUpgraded {
                player_name: stat.player_name.clone(),
                character_name: character_name.clone(),
                gear_level: record.gear_level,
            });
        }
        if record.star_level != previous.star_level && self.policy.star_worthy(record.star_level) {
            notifications.push(Notification::StarUpgraded {
                player_name: stat.player_name.clone(),
                character_name: character_name.clone(),
                star_level: record.star_level,
            });
        }
        if record.zeta_count != previous.zeta_count {
            notifications.push(Notification::ZetaAdded {
                player_name: stat.player_name.clone(),
                character_name,
            });
        }

        Some(CharacterChange {
            kind: ChangeKind::Updated,
            record,
            notifications,
        })
    }
}
