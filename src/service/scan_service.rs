//! Scan orchestration: authenticate, walk every seeded guild, diff each
//! player against the store, persist, then deliver.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use crate::domain::{
    AllyCode, DeliveryReport, FailureScope, GuildRoster, GuildScanResult, PlayerRoster,
    ScanFailure, ScanReport,
};
use crate::engine::{ChangeKind, DiffEngine};
use crate::error::WatchError;
use crate::notify::NotificationDispatcher;
use crate::stats::{AccessToken, Credentials, StatsClient, batches, fetch_batch};
use crate::store::CharacterRecordStore;

/// Running totals for one scan.
#[derive(Debug, Default)]
struct ScanProgress {
    result: GuildScanResult,
    failures: Vec<ScanFailure>,
    guilds_scanned: usize,
    players_scanned: usize,
    records_written: usize,
}

/// Coordinates one full scan across all seeded guilds.
///
/// At most one scan runs at a time; a second trigger while one is in
/// flight is refused with [`WatchError::ScanInProgress`]. The report of
/// the last completed scan is kept for the API.
pub struct ScanService {
    stats: Arc<dyn StatsClient>,
    store: Arc<dyn CharacterRecordStore>,
    engine: DiffEngine,
    dispatcher: NotificationDispatcher,
    credentials: Credentials,
    seeds: Vec<AllyCode>,
    batch_size: usize,
    running: Mutex<()>,
    last_report: RwLock<Option<ScanReport>>,
}

impl std::fmt::Debug for ScanService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScanService")
            .field("engine", &self.engine)
            .field("dispatcher", &self.dispatcher)
            .field("seeds", &self.seeds)
            .field("batch_size", &self.batch_size)
            .finish_non_exhaustive()
    }
}

impl ScanService {
    /// Wires a scan service from its collaborators.
    #[must_use]
    pub fn new(
        stats: Arc<dyn StatsClient>,
        store: Arc<dyn CharacterRecordStore>,
        engine: DiffEngine,
        dispatcher: NotificationDispatcher,
        credentials: Credentials,
        seeds: Vec<AllyCode>,
        batch_size: usize,
    ) -> Self {
        Self {
            stats,
            store,
            engine,
            dispatcher,
            credentials,
            seeds,
            batch_size: batch_size.max(1),
            running: Mutex::new(()),
            last_report: RwLock::new(None),
        }
    }

    /// Seed ally codes, in scan order.
    #[must_use]
    pub fn seeds(&self) -> &[AllyCode] {
        &self.seeds
    }

    /// Report of the most recent completed scan.
    pub async fn last_report(&self) -> Option<ScanReport> {
        self.last_report.read().await.clone()
    }

    /// Runs one complete scan and delivers its notifications.
    ///
    /// Guild, batch, player, and delivery faults are logged, recorded in
    /// the report, and skipped.
    ///
    /// # Errors
    ///
    /// Returns [`WatchError::ScanInProgress`] if another scan holds the
    /// guard, or [`WatchError::Auth`] if sign-in fails. Nothing is fetched,
    /// written, or sent in either case.
    pub async fn run(&self, trigger: &str) -> Result<ScanReport, WatchError> {
        let Ok(_guard) = self.running.try_lock() else {
            tracing::warn!(trigger, "scan requested while another is running");
            return Err(WatchError::ScanInProgress);
        };

        let run_id = Uuid::new_v4();
        let started_at = Utc::now();
        tracing::info!(%run_id, trigger, seeds = self.seeds.len(), "scan started");

        let token = self
            .stats
            .authenticate(&self.credentials)
            .await
            .inspect_err(|e| {
                tracing::error!(%run_id, error = %e, "stats provider sign-in failed, aborting scan");
            })?;

        let mut progress = ScanProgress::default();
        for seed in &self.seeds {
            self.scan_guild(&token, seed, &mut progress).await;
        }

        let (delivery, delivery_failures) = self.dispatcher.deliver_all(&progress.result).await;
        progress.failures.extend(delivery_failures);

        let report = ScanReport {
            run_id,
            trigger: trigger.to_string(),
            started_at,
            finished_at: Utc::now(),
            guilds_scanned: progress.guilds_scanned,
            players_scanned: progress.players_scanned,
            records_written: progress.records_written,
            result: progress.result,
            delivery,
            failures: progress.failures,
        };
        log_report(&report);

        *self.last_report.write().await = Some(report.clone());
        Ok(report)
    }

    async fn scan_guild(&self, token: &AccessToken, seed: &AllyCode, progress: &mut ScanProgress) {
        let roster = match self.stats.fetch_guild_roster(token, seed).await {
            Ok(guilds) => GuildRoster::merge(guilds),
            Err(e) => {
                tracing::error!(%seed, error = %e, "guild roster lookup failed, skipping guild");
                progress.failures.push(ScanFailure::new(
                    FailureScope::Guild {
                        seed: seed.to_string(),
                    },
                    &e,
                ));
                return;
            }
        };

        tracing::info!(
            %seed,
            guild = %roster.guild_name,
            members = roster.members.len(),
            "guild roster resolved"
        );
        progress.result.ensure_guild(&roster.guild_name);
        progress.guilds_scanned += 1;

        for batch in batches(&roster.members, self.batch_size) {
            match fetch_batch(self.stats.as_ref(), token, batch).await {
                Ok(fetched) => {
                    for rejected in fetched.rejected {
                        tracing::error!(
                            guild = %roster.guild_name,
                            ally_code = ?rejected.ally_code,
                            error = %rejected.error,
                            "player roster unreadable, skipping player"
                        );
                        let scope = match rejected.ally_code {
                            Some(ally_code) => FailureScope::Player {
                                ally_code: ally_code.to_string(),
                            },
                            None => FailureScope::Batch {
                                ally_codes: batch.iter().map(ToString::to_string).collect(),
                            },
                        };
                        progress.failures.push(ScanFailure::new(scope, &rejected.error));
                    }
                    for player in &fetched.players {
                        self.scan_player(&roster.guild_name, player, progress).await;
                    }
                }
                Err(e) => {
                    tracing::error!(
                        guild = %roster.guild_name,
                        size = batch.len(),
                        error = %e,
                        "character stats batch failed, skipping batch"
                    );
                    progress.failures.push(ScanFailure::new(
                        FailureScope::Batch {
                            ally_codes: batch.iter().map(ToString::to_string).collect(),
                        },
                        &e,
                    ));
                }
            }
        }
    }

    /// Evaluates one player and persists the changes.
    ///
    /// A character's notifications are released only once its record is
    /// written. For a known player the first write failure stops the
    /// player. A new signup attempts every write, and its "joined" line is
    /// released once at least one record landed, since the next scan will
    /// no longer treat it as new.
    async fn scan_player(&self, guild_name: &str, player: &PlayerRoster, progress: &mut ScanProgress) {
        let existing = match self.store.query_by_ally_code(&player.ally_code).await {
            Ok(records) => records,
            Err(e) => {
                tracing::error!(
                    ally_code = %player.ally_code,
                    error = %e,
                    "record lookup failed, skipping player"
                );
                progress.failures.push(ScanFailure::new(
                    FailureScope::Player {
                        ally_code: player.ally_code.to_string(),
                    },
                    &e,
                ));
                return;
            }
        };

        let is_new_signup = existing.is_empty();
        let evaluation = self.engine.evaluate(player, &existing, is_new_signup);

        let created = evaluation
            .changes
            .iter()
            .filter(|c| c.kind == ChangeKind::Created)
            .count();
        let updated = evaluation.changes.len() - created;

        let mut released = Vec::new();
        let mut written = 0_usize;
        let mut failed = false;
        for change in evaluation.changes {
            if let Err(e) = self.store.upsert(&change.record).await {
                tracing::error!(
                    ally_code = %player.ally_code,
                    character = %change.record.character_id,
                    error = %e,
                    "record write failed"
                );
                progress.failures.push(ScanFailure::new(
                    FailureScope::Player {
                        ally_code: player.ally_code.to_string(),
                    },
                    &e,
                ));
                failed = true;
                if is_new_signup {
                    continue;
                }
                break;
            }
            written += 1;
            released.extend(change.notifications);
        }
        progress.records_written += written;

        if (!failed || written > 0)
            && let Some(joined) = evaluation.player_notification
        {
            released.insert(0, joined);
        }
        tracing::debug!(
            ally_code = %player.ally_code,
            new_signup = is_new_signup,
            created,
            updated,
            written,
            notifications = released.len(),
            "player evaluated"
        );
        progress.result.extend(guild_name, released);
        if !failed {
            progress.players_scanned += 1;
        }
    }
}

fn log_report(report: &ScanReport) {
    let DeliveryReport {
        messages_sent,
        messages_failed,
    } = report.delivery;
    tracing::info!(
        run_id = %report.run_id,
        guilds = report.guilds_scanned,
        players = report.players_scanned,
        records_written = report.records_written,
        notifications = report.result.notification_count(),
        messages_sent,
        messages_failed,
        failures = report.failures.len(),
        "scan complete"
    );
}
