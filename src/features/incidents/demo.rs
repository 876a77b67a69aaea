//! Built-in incidents served when no backend is configured.

use crate::features::incidents::models::{Incident, IncidentStatus};
use crate::shared::severity::Severity;

/// display id, date, time, location, severity, confidence, status, map point
type DemoRow = (
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    Severity,
    f64,
    IncidentStatus,
    Option<(f64, f64)>,
);

#[rustfmt::skip]
const DEMO_ROWS: [DemoRow; 7] = [
    ("INC-2024-001", "Nov 29, 2025", "14:32", "Dammam, King Fahd Rd",       Severity::High,     94.5, IncidentStatus::Active,   Some((26.3927, 50.0132))),
    ("INC-2024-002", "Nov 29, 2025", "13:15", "AlKhobar, Dhahran St",       Severity::Moderate, 87.2, IncidentStatus::Active,   Some((26.4207, 50.0888))),
    ("INC-2024-003", "Nov 29, 2025", "12:48", "AlDhahran, KFUPM Area",      Severity::Low,      78.9, IncidentStatus::Resolved, Some((26.2867, 50.1142))),
    ("INC-2024-004", "Nov 29, 2025", "11:22", "Dammam, Corniche Rd",        Severity::High,     92.8, IncidentStatus::Active,   Some((26.4344, 50.1033))),
    ("INC-2024-005", "Nov 29, 2025", "10:05", "AlKhobar, King Abdullah St", Severity::Moderate, 85.6, IncidentStatus::Resolved, Some((26.3627, 50.0432))),
    ("INC-2024-006", "Nov 28, 2025", "16:45", "Dammam, Prince Mohammed Rd", Severity::Low,      76.3, IncidentStatus::Resolved, None),
    ("INC-2024-007", "Nov 28, 2025", "15:20", "AlDhahran, University Blvd", Severity::High,     96.1, IncidentStatus::Resolved, None),
];

/// Demo incidents, newest first
pub fn demo_incidents() -> Vec<Incident> {
    DEMO_ROWS
        .iter()
        .enumerate()
        .map(
            |(n, &(display_id, date, time, location, severity, confidence, status, coords))| Incident {
                id: format!("demo-{}", n + 1),
                display_id: display_id.to_string(),
                date: date.to_string(),
                time: time.to_string(),
                location: location.to_string(),
                severity,
                confidence,
                status,
                video_url: coords.map(|_| format!("/videos/{}.mp4", display_id.to_lowercase())),
                latitude: coords.map(|(lat, _)| lat),
                longitude: coords.map(|(_, lng)| lng),
            },
        )
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_set_shape() {
        let incidents = demo_incidents();
        assert_eq!(incidents.len(), 7);
        assert_eq!(incidents[0].display_id, "INC-2024-001");
        assert_eq!(incidents.iter().filter(|i| i.is_active()).count(), 3);
        assert_eq!(incidents.iter().filter(|i| i.coordinates().is_some()).count(), 5);
    }
}
