//! Fixed-interval scan trigger.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::{MissedTickBehavior, interval};

use super::ScanService;
use crate::error::WatchError;

/// Trigger label recorded on scheduled runs.
pub const SCHEDULE_TRIGGER: &str = "schedule";

/// Runs a scan every `period`, first one after one full period.
///
/// Ticks missed while a scan was running are skipped rather than
/// replayed.
#[derive(Debug)]
pub struct ScanScheduler {
    service: Arc<ScanService>,
    period: Duration,
}

impl ScanScheduler {
    /// Creates a scheduler for `service`.
    #[must_use]
    pub fn new(service: Arc<ScanService>, period: Duration) -> Self {
        Self { service, period }
    }

    /// Loops forever. Failed scans are logged and the next tick proceeds.
    pub async fn run(self) {
        tracing::info!(period_secs = self.period.as_secs(), "scan scheduler started");

        let mut tick = interval(self.period);
        tick.set_missed_tick_behavior(MissedTickBehavior::Skip);
        tick.tick().await;

        loop {
            tick.tick().await;
            match self.service.run(SCHEDULE_TRIGGER).await {
                Ok(report) => {
                    tracing::debug!(run_id = %report.run_id, "scheduled scan finished");
                }
                Err(WatchError::ScanInProgress) => {
                    tracing::info!("scheduled scan skipped, previous scan still running");
                }
                Err(e) => {
                    tracing::error!(error = %e, "scheduled scan failed");
                }
            }
        }
    }
}
