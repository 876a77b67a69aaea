use chrono::{DateTime, Utc};
use std::collections::VecDeque;
use tokio::sync::RwLock;

use crate::features::alerts::models::{alert_id_for_millis, Alert, NewAlert};

struct StoreState {
    /// Newest first
    alerts: VecDeque<Alert>,
    /// Millisecond value behind the last issued id
    last_issued_ms: i64,
}

/// Bounded, process-local list of recent alerts.
///
/// Id assignment, insertion and eviction happen under a single write lock, so
/// concurrent submissions can neither exceed the capacity nor share an id.
/// Contents are lost on restart.
pub struct AlertStore {
    state: RwLock<StoreState>,
    capacity: usize,
}

impl AlertStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            state: RwLock::new(StoreState {
                alerts: VecDeque::with_capacity(capacity.max(1)),
                last_issued_ms: i64::MIN,
            }),
            capacity: capacity.max(1),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub async fn push(&self, draft: NewAlert) -> Alert {
        self.push_at(draft, Utc::now()).await
    }

    pub(crate) async fn push_at(&self, draft: NewAlert, now: DateTime<Utc>) -> Alert {
        let mut state = self.state.write().await;

        // ids must stay unique and increasing even within one millisecond
        let millis = now.timestamp_millis().max(state.last_issued_ms.saturating_add(1));
        state.last_issued_ms = millis;

        let alert = draft.into_alert(alert_id_for_millis(millis), now);
        state.alerts.push_front(alert.clone());

        if state.alerts.len() > self.capacity {
            let evicted = state.alerts.len() - self.capacity;
            state.alerts.truncate(self.capacity);
            tracing::debug!("Evicted {} alert(s) beyond capacity {}", evicted, self.capacity);
        }

        alert
    }

    /// All retained alerts, newest first
    pub async fn snapshot(&self) -> Vec<Alert> {
        self.state.read().await.alerts.iter().cloned().collect()
    }

    pub async fn len(&self) -> usize {
        self.state.read().await.alerts.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
