use std::collections::BTreeMap;
use std::sync::Arc;

use crate::core::error::Result;
use crate::features::alerts::AlertService;
use crate::features::dashboard::dtos::*;
use crate::features::incidents::models::{Incident, IncidentStatus};
use crate::features::incidents::IncidentService;
use crate::shared::constants::MAP_CENTER;
use crate::shared::severity::Severity;

/// Aggregates incidents and live alerts for the dashboard views
pub struct DashboardService {
    incidents: Arc<IncidentService>,
    alerts: Arc<AlertService>,
}

impl DashboardService {
    pub fn new(incidents: Arc<IncidentService>, alerts: Arc<AlertService>) -> Self {
        Self { incidents, alerts }
    }

    pub async fn get_summary(&self) -> Result<DashboardSummaryDto> {
        let incidents = self.incidents.all().await?;
        let active_alerts = self.alerts.active_count().await;
        Ok(summarize(&incidents, active_alerts))
    }

    pub async fn get_map(&self) -> Result<DashboardMapDto> {
        let incidents = self.incidents.all().await?;
        let (center_latitude, center_longitude) = MAP_CENTER;
        Ok(DashboardMapDto {
            center_latitude,
            center_longitude,
            markers: map_markers(&incidents),
        })
    }
}

/// Builds the summary from incidents ordered newest first
pub fn summarize(incidents: &[Incident], active_alerts: usize) -> DashboardSummaryDto {
    let count_status = |status| incidents.iter().filter(|i| i.status == status).count();
    let total = incidents.len();

    let severity_distribution = Severity::ALL
        .iter()
        .map(|&severity| {
            let count = incidents.iter().filter(|i| i.severity == severity).count();
            SeverityShareDto {
                severity,
                count,
                percent: percent_of(count, total),
                color: severity.color().to_string(),
            }
        })
        .collect();

    let mut regions: BTreeMap<String, RegionSummaryDto> = BTreeMap::new();
    for incident in incidents {
        let region = incident.region();
        regions
            .entry(region.to_string())
            .or_insert_with(|| RegionSummaryDto {
                region: region.to_string(),
                ..Default::default()
            })
            .record(incident.severity);
    }

    DashboardSummaryDto {
        total_incidents: total,
        active_incidents: count_status(IncidentStatus::Active),
        resolved_incidents: count_status(IncidentStatus::Resolved),
        pending_incidents: count_status(IncidentStatus::Pending),
        last_update: incidents.first().map(|i| format!("{} {}", i.date, i.time)),
        severity_distribution,
        regions: regions.into_values().collect(),
        active_alerts,
    }
}

pub fn map_markers(incidents: &[Incident]) -> Vec<MapMarkerDto> {
    incidents
        .iter()
        .filter_map(|incident| {
            let (latitude, longitude) = incident.coordinates()?;
            let (kind, label) = if incident.is_active() {
                (MarkerKind::Active, "Active Incident")
            } else {
                (MarkerKind::Reported, "Reported")
            };
            Some(MapMarkerDto {
                display_id: incident.display_id.clone(),
                latitude,
                longitude,
                kind,
                severity: incident.severity,
                status: incident.status,
                title: format!("{} - {}", label, incident.location),
            })
        })
        .collect()
}

fn percent_of(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (count as f64 * 1000.0 / total as f64).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::incidents::demo::demo_incidents;

    #[test]
    fn test_summary_of_demo_incidents() {
        let summary = summarize(&demo_incidents(), 2);

        assert_eq!(summary.total_incidents, 7);
        assert_eq!(summary.active_incidents, 3);
        assert_eq!(summary.resolved_incidents, 4);
        assert_eq!(summary.pending_incidents, 0);
        assert_eq!(summary.active_alerts, 2);
        assert_eq!(summary.last_update.as_deref(), Some("Nov 29, 2025 14:32"));

        let high = &summary.severity_distribution[0];
        assert_eq!(high.severity, Severity::High);
        assert_eq!(high.count, 3);
        assert_eq!(high.percent, 42.9);
        assert_eq!(high.color, "#ef4444");

        let regions: Vec<_> = summary.regions.iter().map(|r| r.region.as_str()).collect();
        assert_eq!(regions, vec!["AlDhahran", "AlKhobar", "Dammam"]);
        let dammam = &summary.regions[2];
        assert_eq!((dammam.high, dammam.moderate, dammam.low), (2, 0, 1));
    }

    #[test]
    fn test_empty_summary() {
        let summary = summarize(&[], 0);
        assert_eq!(summary.total_incidents, 0);
        assert!(summary.last_update.is_none());
        assert!(summary.regions.is_empty());
        assert!(summary.severity_distribution.iter().all(|s| s.percent == 0.0));
    }

    #[test]
    fn test_markers_skip_incidents_without_coordinates() {
        let markers = map_markers(&demo_incidents());
        assert_eq!(markers.len(), 5);
        assert_eq!(markers[0].kind, MarkerKind::Active);
        assert_eq!(markers[0].title, "Active Incident - Dammam, King Fahd Rd");
        assert_eq!(markers[2].kind, MarkerKind::Reported);
    }
}
