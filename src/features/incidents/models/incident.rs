use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::shared::severity::Severity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum IncidentStatus {
    Active,
    Resolved,
    Pending,
}

/// A detected incident as shown in the dashboard table
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Incident {
    /// Backend row id (uuid or integer), kept as text
    #[serde(default, deserialize_with = "id_as_text")]
    pub id: String,
    /// Human-facing id, e.g. `INC-2024-001`
    pub display_id: String,
    /// Display date, e.g. `Nov 29, 2025`
    pub date: String,
    /// Display time, `HH:MM`
    pub time: String,
    /// `"{Region}, {Street}"`
    pub location: String,
    pub severity: Severity,
    /// Detection confidence in percent
    pub confidence: f64,
    pub status: IncidentStatus,
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

fn id_as_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(id) => id,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

impl Incident {
    /// Text before the first comma of the location, trimmed
    pub fn region(&self) -> &str {
        self.location
            .split(',')
            .next()
            .map(str::trim)
            .unwrap_or_default()
    }

    pub fn coordinates(&self) -> Option<(f64, f64)> {
        self.latitude.zip(self.longitude)
    }

    pub fn is_active(&self) -> bool {
        self.status == IncidentStatus::Active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn incident(location: &str) -> Incident {
        Incident {
            id: "1".to_string(),
            display_id: "INC-1".to_string(),
            date: "Nov 29, 2025".to_string(),
            time: "14:32".to_string(),
            location: location.to_string(),
            severity: Severity::High,
            confidence: 90.0,
            status: IncidentStatus::Active,
            video_url: None,
            latitude: None,
            longitude: None,
        }
    }

    #[test]
    fn test_region_is_text_before_first_comma() {
        assert_eq!(incident("Dammam, King Fahd Rd").region(), "Dammam");
        assert_eq!(incident("AlKhobar").region(), "AlKhobar");
        assert_eq!(incident("").region(), "");
    }

    #[test]
    fn test_backend_row_with_extra_columns() {
        let row = serde_json::json!({
            "id": 12,
            "created_at": "2025-11-29T14:32:00Z",
            "display_id": "INC-2024-010",
            "date": "Nov 29, 2025",
            "time": "14:32",
            "location": "Dammam, Corniche Rd",
            "severity": "Moderate",
            "confidence": 88.0,
            "status": "Pending"
        });
        let parsed: Incident = serde_json::from_value(row).unwrap();
        assert_eq!(parsed.id, "12");
        assert_eq!(parsed.status, IncidentStatus::Pending);
        assert!(parsed.coordinates().is_none());
    }
}
