//! Per-run scan results.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use super::Notification;
use crate::error::WatchError;

/// Notifications collected for one guild, in emission order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct GuildNotifications {
    /// Guild display name.
    pub guild_name: String,
    /// Notifications in the order they were produced.
    pub notifications: Vec<Notification>,
}

/// Guild name to notification list, in scan order.
///
/// A scanned guild is always present, even with no notifications, so
/// delivery can skip it explicitly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct GuildScanResult {
    /// One entry per scanned guild.
    pub guilds: Vec<GuildNotifications>,
}

impl GuildScanResult {
    /// Creates an empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `guild_name` with an empty notification list if it has
    /// not been seen yet.
    pub fn ensure_guild(&mut self, guild_name: &str) {
        if self.guilds.iter().any(|g| g.guild_name == guild_name) {
            return;
        }
        self.guilds.push(GuildNotifications {
            guild_name: guild_name.to_string(),
            notifications: Vec::new(),
        });
    }

    /// Appends `notifications` to the list for `guild_name`.
    pub fn extend<I>(&mut self, guild_name: &str, notifications: I)
    where
        I: IntoIterator<Item = Notification>,
    {
        if let Some(guild) = self.guilds.iter_mut().find(|g| g.guild_name == guild_name) {
            guild.notifications.extend(notifications);
            return;
        }
        self.guilds.push(GuildNotifications {
            guild_name: guild_name.to_string(),
            notifications: notifications.into_iter().collect(),
        });
    }

    /// Returns the notifications recorded for `guild_name`.
    #[must_use]
    pub fn get(&self, guild_name: &str) -> Option<&[Notification]> {
        self.guilds
            .iter()
            .find(|g| g.guild_name == guild_name)
            .map(|g| g.notifications.as_slice())
    }

    /// Total notifications across all guilds.
    #[must_use]
    pub fn notification_count(&self) -> usize {
        self.guilds.iter().map(|g| g.notifications.len()).sum()
    }
}

/// Which part of the scan a skipped failure belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(tag = "scope", rename_all = "snake_case")]
pub enum FailureScope {
    /// A whole guild could not be resolved.
    Guild {
        /// Seed ally code of the guild.
        seed: String,
    },
    /// A batch of players could not be fetched.
    Batch {
        /// Ally codes in the failed batch.
        ally_codes: Vec<String>,
    },
    /// One player's evaluation was aborted.
    Player {
        /// Ally code of the player.
        ally_code: String,
    },
    /// One webhook message could not be delivered.
    Delivery {
        /// Guild the message belonged to.
        guild_name: String,
    },
}

/// A fault that was logged and skipped instead of aborting the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ScanFailure {
    /// Where the fault happened.
    #[serde(flatten)]
    pub scope: FailureScope,
    /// Error category (see [`WatchError::kind`]).
    pub kind: String,
    /// Error message.
    pub message: String,
}

impl ScanFailure {
    /// Records `error` against `scope`.
    #[must_use]
    pub fn new(scope: FailureScope, error: &WatchError) -> Self {
        Self {
            scope,
            kind: error.kind().to_string(),
            message: error.to_string(),
        }
    }
}

/// Outcome of delivering notifications to the webhook.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct DeliveryReport {
    /// Messages accepted by the sink.
    pub messages_sent: usize,
    /// Messages the sink rejected.
    pub messages_failed: usize,
}

/// Summary of one complete scan run.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ScanReport {
    /// Run identifier.
    pub run_id: Uuid,
    /// What triggered the run (e.g. `"http"`, `"schedule"`).
    pub trigger: String,
    /// Run start time.
    pub started_at: DateTime<Utc>,
    /// Run end time.
    pub finished_at: DateTime<Utc>,
    /// Guilds whose roster was resolved.
    pub guilds_scanned: usize,
    /// Players whose evaluation completed.
    pub players_scanned: usize,
    /// Character records written.
    pub records_written: usize,
    /// Notifications produced, grouped by guild.
    pub result: GuildScanResult,
    /// Webhook delivery outcome.
    pub delivery: DeliveryReport,
    /// Faults that were skipped.
    pub failures: Vec<ScanFailure>,
}
