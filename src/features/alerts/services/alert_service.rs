use serde::Serialize;
use std::sync::Arc;

use crate::core::error::AppError;
use crate::features::alerts::dtos::CreateAlertDto;
use crate::features::alerts::error::AlertRejection;
use crate::features::alerts::models::{Alert, AlertStatus, NewAlert};
use crate::features::alerts::services::AlertStore;
use crate::modules::supabase::SupabaseClient;
use crate::shared::constants::{FALLBACK_LATITUDE, FALLBACK_LONGITUDE, UNKNOWN_ADDRESS};
use crate::shared::severity::Severity;

/// Result of an accepted submission
#[derive(Debug, Clone)]
pub enum SubmissionOutcome {
    /// Stored in memory and written to the backend table
    Accepted(Alert),
    /// Stored in memory only; the backend write was skipped or failed
    AcceptedLocalOnly { alert: Alert, reason: String },
}

impl SubmissionOutcome {
    pub fn alert(&self) -> &Alert {
        match self {
            SubmissionOutcome::Accepted(alert) => alert,
            SubmissionOutcome::AcceptedLocalOnly { alert, .. } => alert,
        }
    }

    pub fn into_alert(self) -> Alert {
        match self {
            SubmissionOutcome::Accepted(alert) => alert,
            SubmissionOutcome::AcceptedLocalOnly { alert, .. } => alert,
        }
    }

    pub fn is_persisted_remotely(&self) -> bool {
        matches!(self, SubmissionOutcome::Accepted(_))
    }
}

/// Row written to the backend alerts table
#[derive(Debug, Serialize)]
struct PhoneAlertRow<'a> {
    alert_id: &'a str,
    latitude: f64,
    longitude: f64,
    accuracy: Option<f64>,
    severity: Severity,
    address: &'a str,
    status: AlertStatus,
}

impl<'a> From<&'a Alert> for PhoneAlertRow<'a> {
    fn from(alert: &'a Alert) -> Self {
        Self {
            alert_id: &alert.id,
            latitude: alert.latitude,
            longitude: alert.longitude,
            accuracy: alert.accuracy,
            severity: alert.severity,
            address: &alert.address,
            status: alert.status,
        }
    }
}

/// Accepts SOS alerts into the in-memory store and mirrors them to the backend
pub struct AlertService {
    store: Arc<AlertStore>,
    backend: Arc<SupabaseClient>,
}

impl AlertService {
    pub fn new(store: Arc<AlertStore>, backend: Arc<SupabaseClient>) -> Self {
        Self { store, backend }
    }

    /// Parses a raw request body. Any content type is accepted as long as the
    /// bytes are a JSON object.
    pub fn parse_body(body: &[u8]) -> Result<CreateAlertDto, AlertRejection> {
        Ok(serde_json::from_slice(body)?)
    }

    /// Applies the submission defaults
    pub fn build_draft(dto: CreateAlertDto) -> Result<NewAlert, AlertRejection> {
        let severity = match dto.severity.as_deref() {
            None | Some("") => Severity::default(),
            Some(value) => value.parse()?,
        };

        let address = dto
            .address
            .filter(|a| !a.is_empty())
            .unwrap_or_else(|| UNKNOWN_ADDRESS.to_string());

        Ok(NewAlert {
            latitude: dto.latitude.unwrap_or(FALLBACK_LATITUDE),
            longitude: dto.longitude.unwrap_or(FALLBACK_LONGITUDE),
            accuracy: dto.accuracy,
            severity,
            address,
        })
    }

    pub async fn submit(&self, dto: CreateAlertDto) -> Result<SubmissionOutcome, AlertRejection> {
        let draft = Self::build_draft(dto)?;
        let alert = self.store.push(draft).await;

        tracing::info!(
            alert_id = %alert.id,
            severity = %alert.severity,
            "Alert received at {:.4}, {:.4}",
            alert.latitude,
            alert.longitude
        );

        let outcome = match self.persist_remote(&alert).await {
            Ok(()) => SubmissionOutcome::Accepted(alert),
            Err(e) => SubmissionOutcome::AcceptedLocalOnly {
                alert,
                reason: e.to_string(),
            },
        };

        if let SubmissionOutcome::AcceptedLocalOnly { alert, reason } = &outcome {
            tracing::warn!(alert_id = %alert.id, "Alert kept in memory only: {}", reason);
        }

        Ok(outcome)
    }

    /// Current alerts, newest first
    pub async fn list(&self) -> Vec<Alert> {
        self.store.snapshot().await
    }

    pub async fn active_count(&self) -> usize {
        self.store.len().await
    }

    async fn persist_remote(&self, alert: &Alert) -> Result<(), AppError> {
        if !self.backend.is_configured() {
            return Err(AppError::BackendUnavailable(
                "Backend is not configured".to_string(),
            ));
        }

        let table = &self.backend.config().alerts_table;
        self.backend
            .insert(table, &PhoneAlertRow::from(alert))
            .await
    }
}
