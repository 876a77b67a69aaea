use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::shared::constants::ALERT_ID_PREFIX;
use crate::shared::severity::Severity;

/// Alert status. Every alert is created `Active` and nothing moves it on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum AlertStatus {
    #[default]
    Active,
}

/// Emergency alert as stored in memory and returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Alert {
    /// `ALR-` followed by the submission time in base 36
    #[schema(example = "ALR-MIK2W9QF")]
    pub id: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Horizontal accuracy reported by the device, in meters
    pub accuracy: Option<f64>,
    pub severity: Severity,
    pub address: String,
    #[serde(with = "iso_millis")]
    #[schema(value_type = String, format = DateTime)]
    pub timestamp: DateTime<Utc>,
    pub status: AlertStatus,
}

/// Alert fields after defaulting, before an id and timestamp are assigned
#[derive(Debug, Clone, PartialEq)]
pub struct NewAlert {
    pub latitude: f64,
    pub longitude: f64,
    pub accuracy: Option<f64>,
    pub severity: Severity,
    pub address: String,
}

impl NewAlert {
    pub fn into_alert(self, id: String, timestamp: DateTime<Utc>) -> Alert {
        Alert {
            id,
            latitude: self.latitude,
            longitude: self.longitude,
            accuracy: self.accuracy,
            severity: self.severity,
            address: self.address,
            timestamp,
            status: AlertStatus::Active,
        }
    }
}

pub fn alert_id_for_millis(millis: i64) -> String {
    format!("{}{}", ALERT_ID_PREFIX, to_base36(millis.max(0) as u64))
}

fn to_base36(mut value: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

    if value == 0 {
        return "0".to_string();
    }

    let mut buf = Vec::new();
    while value > 0 {
        buf.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    buf.reverse();
    String::from_utf8(buf).unwrap_or_default()
}

/// ISO-8601 with millisecond precision and a `Z` suffix
mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        DateTime::<Utc>::deserialize(deserializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_base36() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "Z");
        assert_eq!(to_base36(36), "10");
        assert_eq!(to_base36(1_700_000_000_000), "LOYW3V28");
    }

    #[test]
    fn test_alert_id() {
        assert_eq!(alert_id_for_millis(36 * 36), "ALR-100");
        assert_eq!(alert_id_for_millis(-5), "ALR-0");
    }

    #[test]
    fn test_alert_json_shape() {
        let alert = NewAlert {
            latitude: 26.3927,
            longitude: 50.0132,
            accuracy: None,
            severity: Severity::High,
            address: "Unknown".to_string(),
        }
        .into_alert(
            "ALR-1".to_string(),
            Utc.with_ymd_and_hms(2025, 11, 29, 14, 32, 0).unwrap(),
        );

        let json = serde_json::to_value(&alert).unwrap();
        assert_eq!(json["timestamp"], "2025-11-29T14:32:00.000Z");
        assert_eq!(json["status"], "Active");
        assert_eq!(json["severity"], "High");
        assert!(json["accuracy"].is_null());

        let back: Alert = serde_json::from_value(json).unwrap();
        assert_eq!(back, alert);
    }
}
