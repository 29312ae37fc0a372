//! Chunked, rate-limited delivery of grouped notifications.

use std::sync::Arc;
use std::time::Duration;

use super::NotificationSink;
use crate::domain::{DeliveryReport, FailureScope, GuildScanResult, Notification, ScanFailure};

/// Default number of notification lines per chat message.
pub const DEFAULT_CHUNK_SIZE: usize = 20;

/// Default pause between two consecutive chat messages.
pub const DEFAULT_DELIVERY_DELAY: Duration = Duration::from_secs(2);

/// Splits notifications into messages of at most `chunk_size` lines.
///
/// Lines keep their order and each appears in exactly one message. A
/// `chunk_size` of zero is treated as one.
#[must_use]
pub fn chunk_messages(notifications: &[Notification], chunk_size: usize) -> Vec<String> {
    notifications
        .chunks(chunk_size.max(1))
        .map(|chunk| {
            chunk
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("\n")
        })
        .collect()
}

/// Sends each guild's notifications through a [`NotificationSink`].
#[derive(Clone)]
pub struct NotificationDispatcher {
    sink: Arc<dyn NotificationSink>,
    chunk_size: usize,
    delay: Duration,
}

impl std::fmt::Debug for NotificationDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationDispatcher")
            .field("chunk_size", &self.chunk_size)
            .field("delay", &self.delay)
            .finish_non_exhaustive()
    }
}

impl NotificationDispatcher {
    /// Creates a dispatcher sending `chunk_size` lines per message and
    /// waiting `delay` between messages.
    #[must_use]
    pub fn new(sink: Arc<dyn NotificationSink>, chunk_size: usize, delay: Duration) -> Self {
        Self {
            sink,
            chunk_size: chunk_size.max(1),
            delay,
        }
    }

    /// Delivers every non-empty guild's notifications, in guild order.
    ///
    /// Messages are sent one at a time with `delay` between consecutive
    /// sends and none after the last. A failed message is recorded and
    /// the remaining ones are still attempted.
    pub async fn deliver_all(
        &self,
        result: &GuildScanResult,
    ) -> (DeliveryReport, Vec<ScanFailure>) {
        let mut report = DeliveryReport::default();
        let mut failures = Vec::new();
        let mut first = true;

        for guild in &result.guilds {
            if guild.notifications.is_empty() {
                tracing::debug!(guild = %guild.guild_name, "no notifications, skipping delivery");
                continue;
            }

            let messages = chunk_messages(&guild.notifications, self.chunk_size);
            let total = messages.len();
            for (index, message) in messages.iter().enumerate() {
                if !first {
                    tokio::time::sleep(self.delay).await;
                }
                first = false;

                match self.sink.deliver(&guild.guild_name, message).await {
                    Ok(()) => {
                        report.messages_sent += 1;
                        tracing::info!(
                            guild = %guild.guild_name,
                            chunk = index + 1,
                            of = total,
                            "notification message delivered"
                        );
                    }
                    Err(e) => {
                        report.messages_failed += 1;
                        tracing::error!(
                            guild = %guild.guild_name,
                            chunk = index + 1,
                            of = total,
                            error = %e,
                            "notification message failed, continuing"
                        );
                        failures.push(ScanFailure::new(
                            FailureScope::Delivery {
                                guild_name: guild.guild_name.clone(),
                            },
                            &e,
                        ));
                    }
                }
            }
        }

        (report, failures)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use async_trait::async_trait;
    use tokio::sync::Mutex;
    use tokio::time::Instant;

    use super::*;
    use crate::error::WatchError;
    use crate::notify::MockNotificationSink;

    /// Records every delivered message with the time it arrived.
    #[derive(Debug, Default)]
    struct RecordingSink {
        sent: Mutex<Vec<(String, String, Instant)>>,
    }

    #[async_trait]
    impl NotificationSink for RecordingSink {
        async fn deliver(&self, guild_name: &str, message: &str) -> Result<(), WatchError> {
            self.sent
                .lock()
                .await
                .push((guild_name.to_string(), message.to_string(), Instant::now()));
            Ok(())
        }
    }

    fn zeta(n: usize) -> Notification {
        Notification::ZetaAdded {
            player_name: format!("p{n}"),
            character_name: "Rey".to_string(),
        }
    }

    fn result_with(guilds: &[(&str, usize)]) -> GuildScanResult {
        let mut result = GuildScanResult::new();
        for (name, count) in guilds {
            result.ensure_guild(name);
            result.extend(name, (0..*count).map(zeta));
        }
        result
    }

    #[test]
    fn chunks_cover_every_line_once() {
        let notifications: Vec<Notification> = (0..45).map(zeta).collect();
        for size in [1, 2, 7, 20, 45, 100] {
            let messages = chunk_messages(&notifications, size);
            assert_eq!(messages.len(), notifications.len().div_ceil(size));
            let lines: Vec<String> = messages
                .iter()
                .flat_map(|m| m.split('\n').map(str::to_string))
                .collect();
            let expected: Vec<String> = notifications.iter().map(ToString::to_string).collect();
            assert_eq!(lines, expected, "chunk size {size}");
        }
    }

    #[test]
    fn empty_list_has_no_chunks() {
        assert!(chunk_messages(&[], 20).is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn delays_between_sends_only() {
        let sink = Arc::new(RecordingSink::default());
        let delay = Duration::from_secs(2);
        let shared: Arc<dyn NotificationSink> = Arc::clone(&sink) as _;
        let dispatcher = NotificationDispatcher::new(shared, 20, delay);

        let start = Instant::now();
        let (report, failures) = dispatcher
            .deliver_all(&result_with(&[("Empire", 45), ("Quiet", 0), ("Rebels", 3)]))
            .await;
        let elapsed = start.elapsed();

        assert_eq!(report.messages_sent, 4);
        assert_eq!(report.messages_failed, 0);
        assert!(failures.is_empty());

        let sent = sink.sent.lock().await;
        let guilds: Vec<&str> = sent.iter().map(|(g, _, _)| g.as_str()).collect();
        assert_eq!(guilds, vec!["Empire", "Empire", "Empire", "Rebels"]);

        let Some((_, _, first_at)) = sent.first() else {
            panic!("nothing sent");
        };
        assert_eq!(*first_at, start);
        for pair in sent.windows(2) {
            let [(_, _, a), (_, _, b)] = pair else {
                panic!("window of two");
            };
            assert_eq!(b.duration_since(*a), delay);
        }
        assert_eq!(elapsed, delay * 3);
    }

    #[tokio::test(start_paused = true)]
    async fn single_message_has_no_delay() {
        let sink = Arc::new(RecordingSink::default());
        let shared: Arc<dyn NotificationSink> = Arc::clone(&sink) as _;
        let dispatcher = NotificationDispatcher::new(shared, 20, Duration::from_secs(2));

        let start = Instant::now();
        let (report, _) = dispatcher.deliver_all(&result_with(&[("Empire", 5)])).await;

        assert_eq!(report.messages_sent, 1);
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn failed_chunk_does_not_stop_the_rest() {
        let mut sink = MockNotificationSink::new();
        let mut calls = 0;
        sink.expect_deliver().times(3).returning(move |_, _| {
            calls += 1;
            if calls == 2 {
                Err(WatchError::Delivery("HTTP 429".to_string()))
            } else {
                Ok(())
            }
        });
        let dispatcher = NotificationDispatcher::new(Arc::new(sink), 1, Duration::from_secs(2));

        let (report, failures) = dispatcher.deliver_all(&result_with(&[("Empire", 3)])).await;

        assert_eq!(report.messages_sent, 2);
        assert_eq!(report.messages_failed, 1);
        assert_eq!(failures.len(), 1);
        let Some(failure) = failures.first() else {
            panic!("one failure");
        };
        assert_eq!(failure.kind, "delivery");
    }

    #[tokio::test]
    async fn nothing_to_send_means_no_calls() {
        let mut sink = MockNotificationSink::new();
        sink.expect_deliver().never();
        let dispatcher = NotificationDispatcher::new(Arc::new(sink), 20, Duration::ZERO);

        let (report, failures) = dispatcher
            .deliver_all(&result_with(&[("Empire", 0), ("Rebels", 0)]))
            .await;

        assert_eq!(report, DeliveryReport::default());
        assert!(failures.is_empty());
    }
}
