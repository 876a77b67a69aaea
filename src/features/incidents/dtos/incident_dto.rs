use serde::Deserialize;
use utoipa::IntoParams;

use crate::features::incidents::models::{Incident, IncidentStatus};
use crate::shared::severity::Severity;

/// Optional filters for the incident table
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct IncidentQuery {
    /// Only incidents with this severity
    pub severity: Option<Severity>,
    /// Only incidents with this status
    pub status: Option<IncidentStatus>,
}

impl IncidentQuery {
    pub fn matches(&self, incident: &Incident) -> bool {
        self.severity.is_none_or(|s| incident.severity == s)
            && self.status.is_none_or(|s| incident.status == s)
    }
}
