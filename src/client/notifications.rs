use chrono::{DateTime, Local};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

use crate::client::api::AlertSource;
use crate::features::alerts::models::Alert;
use crate::shared::constants::RECENT_ALERTS_SHOWN;

/// What the panel currently knows about the alert feed
#[derive(Debug, Clone, Default)]
pub struct FeedSnapshot {
    /// Last successfully fetched list, newest first
    pub alerts: Vec<Alert>,
    /// Time of the last poll attempt, successful or not
    pub last_poll: Option<DateTime<Local>>,
    pub last_error: Option<String>,
}

/// Background poller for `GET /api/alerts`. Polling stops when the panel is
/// stopped or dropped.
pub struct NotificationsPanel {
    snapshot: watch::Receiver<FeedSnapshot>,
    task: JoinHandle<()>,
}

impl NotificationsPanel {
    pub fn start(source: Arc<dyn AlertSource>, poll_interval: Duration) -> Self {
        let (tx, snapshot) = watch::channel(FeedSnapshot::default());
        let task = tokio::spawn(poll_loop(source, poll_interval, tx));
        Self { snapshot, task }
    }

    pub fn subscribe(&self) -> watch::Receiver<FeedSnapshot> {
        self.snapshot.clone()
    }

    pub fn snapshot(&self) -> FeedSnapshot {
        self.snapshot.borrow().clone()
    }

    pub fn stop(self) {
        drop(self);
    }
}

impl Drop for NotificationsPanel {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn poll_loop(
    source: Arc<dyn AlertSource>,
    poll_interval: Duration,
    tx: watch::Sender<FeedSnapshot>,
) {
    // first tick fires immediately
    let mut ticker = interval(poll_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;

        let result = source.fetch_alerts().await;
        tx.send_modify(|snapshot| {
            match result {
                Ok(alerts) => {
                    snapshot.alerts = alerts;
                    snapshot.last_error = None;
                }
                Err(e) => {
                    tracing::debug!("Alert poll failed, keeping last list: {}", e);
                    snapshot.last_error = Some(e.to_string());
                }
            }
            snapshot.last_poll = Some(Local::now());
        });
    }
}

/// Text rendering of the panel: the most recent alerts, or the empty state
pub fn render_lines(snapshot: &FeedSnapshot) -> Vec<String> {
    if snapshot.alerts.is_empty() {
        let checked = snapshot
            .last_poll
            .map(|t| t.format("%H:%M:%S").to_string())
            .unwrap_or_else(|| "never".to_string());
        return vec![
            "No active phone alerts".to_string(),
            format!("Last checked: {}", checked),
        ];
    }

    snapshot
        .alerts
        .iter()
        .take(RECENT_ALERTS_SHOWN)
        .map(|alert| {
            format!(
                "[{:<4}] {}  {}  {}",
                alert.severity.badge(),
                alert.id,
                alert.address,
                alert.timestamp.with_timezone(&Local).format("%H:%M:%S")
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::api::ClientError;
    use crate::features::alerts::models::NewAlert;
    use crate::shared::severity::Severity;
    use async_trait::async_trait;
    use chrono::Utc;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    const POLL: Duration = Duration::from_secs(5);

    fn alert(id: &str, severity: Severity) -> Alert {
        NewAlert {
            latitude: 26.3927,
            longitude: 50.0132,
            accuracy: None,
            severity,
            address: "Dammam".to_string(),
        }
        .into_alert(id.to_string(), Utc::now())
    }

    /// Replays scripted responses, then keeps failing
    struct ScriptedSource {
        responses: Mutex<VecDeque<Result<Vec<Alert>, ClientError>>>,
        calls: AtomicUsize,
    }

    impl ScriptedSource {
        fn new(responses: Vec<Result<Vec<Alert>, ClientError>>) -> Arc<Self> {
            Arc::new(Self {
                responses: Mutex::new(responses.into()),
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl AlertSource for ScriptedSource {
        async fn fetch_alerts(&self) -> Result<Vec<Alert>, ClientError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| {
                    Err(ClientError::Status {
                        status: 503,
                        body: String::new(),
                    })
                })
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_polls_immediately_and_keeps_list_on_failure() {
        let source = ScriptedSource::new(vec![Ok(vec![alert("ALR-2", Severity::Low)])]);
        let panel = NotificationsPanel::start(source.clone(), POLL);
        let mut feed = panel.subscribe();

        feed.changed().await.unwrap();
        let first = feed.borrow_and_update().clone();
        assert_eq!(first.alerts.len(), 1);
        assert!(first.last_poll.is_some());

        feed.changed().await.unwrap();
        let second = feed.borrow_and_update().clone();
        assert_eq!(second.alerts[0].id, "ALR-2");
        assert!(second.last_error.is_some());
        assert!(second.last_poll >= first.last_poll);
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_panel_stops_polling() {
        let source = ScriptedSource::new(vec![Ok(vec![])]);
        let panel = NotificationsPanel::start(source.clone(), POLL);
        let mut feed = panel.subscribe();
        feed.changed().await.unwrap();

        panel.stop();
        let calls = source.calls.load(Ordering::SeqCst);
        tokio::time::sleep(POLL * 4).await;
        assert_eq!(source.calls.load(Ordering::SeqCst), calls);
    }

    #[test]
    fn test_render_caps_at_five() {
        let snapshot = FeedSnapshot {
            alerts: (0..7).map(|i| alert(&format!("ALR-{}", i), Severity::High)).collect(),
            last_poll: Some(Local::now()),
            last_error: None,
        };
        let lines = render_lines(&snapshot);
        assert_eq!(lines.len(), 5);
        assert!(lines[0].starts_with("[HIGH] ALR-0  Dammam"));
    }

    #[test]
    fn test_render_pads_short_badges() {
        let snapshot = FeedSnapshot {
            alerts: vec![alert("ALR-1", Severity::Moderate), alert("ALR-2", Severity::Low)],
            last_poll: None,
            last_error: None,
        };
        let lines = render_lines(&snapshot);
        assert!(lines[0].starts_with("[MOD ] ALR-1  "));
        assert!(lines[1].starts_with("[LOW ] ALR-2  "));
    }

    #[test]
    fn test_render_empty_state() {
        let lines = render_lines(&FeedSnapshot::default());
        assert_eq!(lines, vec!["No active phone alerts", "Last checked: never"]);
    }
}
