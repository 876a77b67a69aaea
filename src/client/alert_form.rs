use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::client::api::AlertSubmitter;
use crate::client::location::LocationData;
use crate::features::alerts::dtos::CreateAlertDto;
use crate::shared::severity::Severity;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertPhase {
    Idle,
    Confirming,
    Sending,
    Sent,
}

/// SOS button flow: press, confirm or cancel, send, then reset after a delay.
///
/// Submission failures are logged and otherwise treated like successes; the
/// form always reaches `Sent`.
pub struct AlertForm {
    phase: Arc<watch::Sender<AlertPhase>>,
    severity: Severity,
    location: LocationData,
    submitter: Arc<dyn AlertSubmitter>,
    reset_delay: Duration,
    reset_task: Option<JoinHandle<()>>,
}

impl AlertForm {
    pub fn new(submitter: Arc<dyn AlertSubmitter>, reset_delay: Duration) -> Self {
        let (phase, _) = watch::channel(AlertPhase::Idle);
        Self {
            phase: Arc::new(phase),
            severity: Severity::default(),
            location: LocationData::detecting(),
            submitter,
            reset_delay,
            reset_task: None,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<AlertPhase> {
        self.phase.subscribe()
    }

    pub fn phase(&self) -> AlertPhase {
        *self.phase.borrow()
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn location(&self) -> &LocationData {
        &self.location
    }

    pub fn set_location(&mut self, location: LocationData) {
        self.location = location;
    }

    /// Only possible while idle. Returns whether the selection was applied.
    pub fn select_severity(&mut self, severity: Severity) -> bool {
        if self.phase() != AlertPhase::Idle {
            return false;
        }
        self.severity = severity;
        true
    }

    pub fn press_sos(&self) -> bool {
        self.transition(AlertPhase::Idle, AlertPhase::Confirming)
    }

    pub fn cancel(&self) -> bool {
        self.transition(AlertPhase::Confirming, AlertPhase::Idle)
    }

    /// Sends the alert and schedules the reset. Returns `false` when the form
    /// was not waiting for confirmation.
    pub async fn confirm(&mut self) -> bool {
        if !self.transition(AlertPhase::Confirming, AlertPhase::Sending) {
            return false;
        }

        match self.submitter.submit(&self.payload()).await {
            Ok(alert) => tracing::info!(alert_id = %alert.id, "Alert sent"),
            Err(e) => tracing::error!("Failed to send alert: {}", e),
        }

        self.transition(AlertPhase::Sending, AlertPhase::Sent);
        self.schedule_reset();
        true
    }

    fn payload(&self) -> CreateAlertDto {
        CreateAlertDto {
            latitude: self.location.latitude,
            longitude: self.location.longitude,
            accuracy: self.location.accuracy,
            severity: Some(self.severity.to_string()),
            address: Some(self.location.address.clone()),
        }
    }

    fn transition(&self, from: AlertPhase, to: AlertPhase) -> bool {
        self.phase.send_if_modified(|phase| {
            if *phase != from {
                return false;
            }
            *phase = to;
            true
        })
    }

    fn schedule_reset(&mut self) {
        if let Some(previous) = self.reset_task.take() {
            previous.abort();
        }

        let phase = Arc::clone(&self.phase);
        let delay = self.reset_delay;
        self.reset_task = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            phase.send_if_modified(|current| {
                if *current != AlertPhase::Sent {
                    return false;
                }
                *current = AlertPhase::Idle;
                true
            });
        }));
    }
}

impl Drop for AlertForm {
    fn drop(&mut self) {
        if let Some(task) = self.reset_task.take() {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::api::ClientError;
    use crate::features::alerts::models::Alert;
    use crate::features::alerts::services::AlertService;
    use async_trait::async_trait;
    use std::sync::Mutex;

    const RESET: Duration = Duration::from_secs(5);

    /// Records every payload and the phase the form was in while sending
    #[derive(Default)]
    struct RecordingSubmitter {
        fail: bool,
        calls: Mutex<Vec<CreateAlertDto>>,
        probe: Mutex<Option<watch::Receiver<AlertPhase>>>,
        phase_during_send: Mutex<Option<AlertPhase>>,
    }

    impl RecordingSubmitter {
        fn failing() -> Self {
            Self {
                fail: true,
                ..Default::default()
            }
        }

        fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl AlertSubmitter for RecordingSubmitter {
        async fn submit(&self, alert: &CreateAlertDto) -> Result<Alert, ClientError> {
            self.calls.lock().unwrap().push(alert.clone());
            if let Some(probe) = self.probe.lock().unwrap().as_ref() {
                *self.phase_during_send.lock().unwrap() = Some(*probe.borrow());
            }

            if self.fail {
                return Err(ClientError::Status {
                    status: 500,
                    body: "Failed to process alert".to_string(),
                });
            }

            let draft = AlertService::build_draft(alert.clone()).unwrap();
            Ok(draft.into_alert("ALR-TEST".to_string(), chrono::Utc::now()))
        }
    }

    fn form_with(submitter: &Arc<RecordingSubmitter>) -> AlertForm {
        let form = AlertForm::new(Arc::clone(submitter) as Arc<dyn AlertSubmitter>, RESET);
        *submitter.probe.lock().unwrap() = Some(form.subscribe());
        form
    }

    async fn run_full_cycle(submitter: Arc<RecordingSubmitter>) {
        let mut form = form_with(&submitter);
        assert_eq!(form.phase(), AlertPhase::Idle);

        assert!(form.press_sos());
        assert_eq!(form.phase(), AlertPhase::Confirming);

        assert!(form.confirm().await);
        assert_eq!(*submitter.phase_during_send.lock().unwrap(), Some(AlertPhase::Sending));
        assert_eq!(form.phase(), AlertPhase::Sent);

        tokio::time::sleep(RESET + Duration::from_millis(1)).await;
        assert_eq!(form.phase(), AlertPhase::Idle);
        assert_eq!(submitter.call_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_successful_send_cycle() {
        run_full_cycle(Arc::new(RecordingSubmitter::default())).await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_send_still_reaches_sent() {
        run_full_cycle(Arc::new(RecordingSubmitter::failing())).await;
    }

    #[tokio::test]
    async fn test_cancel_makes_no_call() {
        let submitter = Arc::new(RecordingSubmitter::default());
        let form = form_with(&submitter);

        form.press_sos();
        assert!(form.cancel());
        assert_eq!(form.phase(), AlertPhase::Idle);
        assert_eq!(submitter.call_count(), 0);
    }

    #[tokio::test]
    async fn test_confirm_outside_confirming_is_ignored() {
        let submitter = Arc::new(RecordingSubmitter::default());
        let mut form = form_with(&submitter);

        assert!(!form.confirm().await);
        assert!(!form.cancel());
        assert_eq!(submitter.call_count(), 0);
    }

    #[tokio::test]
    async fn test_severity_locked_outside_idle() {
        let submitter = Arc::new(RecordingSubmitter::default());
        let mut form = form_with(&submitter);

        assert!(form.select_severity(Severity::Low));
        form.press_sos();
        assert!(!form.select_severity(Severity::Moderate));
        assert_eq!(form.severity(), Severity::Low);
    }

    #[tokio::test(start_paused = true)]
    async fn test_payload_carries_location_and_severity() {
        let submitter = Arc::new(RecordingSubmitter::default());
        let mut form = form_with(&submitter);
        form.set_location(LocationData::fallback());
        form.select_severity(Severity::Moderate);

        form.press_sos();
        form.confirm().await;

        let sent = submitter.calls.lock().unwrap()[0].clone();
        assert_eq!(sent.latitude, Some(26.3927));
        assert_eq!(sent.severity.as_deref(), Some("Moderate"));
        assert_eq!(sent.address.as_deref(), Some("26.3927°N, 50.0132°E (Default)"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_form_cancels_reset() {
        let submitter = Arc::new(RecordingSubmitter::default());
        let mut form = form_with(&submitter);
        let observer = form.subscribe();

        form.press_sos();
        form.confirm().await;
        drop(form);

        tokio::time::sleep(RESET * 2).await;
        assert_eq!(*observer.borrow(), AlertPhase::Sent);
    }
}
