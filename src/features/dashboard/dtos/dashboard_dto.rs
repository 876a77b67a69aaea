use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::incidents::models::IncidentStatus;
use crate::shared::severity::Severity;

// ============================================================================
// Summary
// ============================================================================

/// Header stats and chart data for the dashboard
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DashboardSummaryDto {
    pub total_incidents: usize,
    pub active_incidents: usize,
    pub resolved_incidents: usize,
    pub pending_incidents: usize,
    /// `"{date} {time}"` of the newest incident
    pub last_update: Option<String>,
    pub severity_distribution: Vec<SeverityShareDto>,
    pub regions: Vec<RegionSummaryDto>,
    /// Phone alerts currently held in memory
    pub active_alerts: usize,
}

/// One slice of the severity pie chart
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SeverityShareDto {
    pub severity: Severity,
    pub count: usize,
    /// Share of all incidents, one decimal place
    pub percent: f64,
    pub color: String,
}

/// Per-region bar chart row
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct RegionSummaryDto {
    pub region: String,
    pub high: usize,
    pub moderate: usize,
    pub low: usize,
    pub total: usize,
}

impl RegionSummaryDto {
    pub fn record(&mut self, severity: Severity) {
        match severity {
            Severity::High => self.high += 1,
            Severity::Moderate => self.moderate += 1,
            Severity::Low => self.low += 1,
        }
        self.total += 1;
    }
}

// ============================================================================
// Map
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MarkerKind {
    Active,
    Reported,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MapMarkerDto {
    pub display_id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub kind: MarkerKind,
    pub severity: Severity,
    pub status: IncidentStatus,
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DashboardMapDto {
    pub center_latitude: f64,
    pub center_longitude: f64,
    pub markers: Vec<MapMarkerDto>,
}
