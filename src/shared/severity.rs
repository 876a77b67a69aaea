use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use utoipa::ToSchema;

/// Priority of an alert or incident
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
pub enum Severity {
    #[default]
    High,
    Moderate,
    Low,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown severity '{0}', expected High, Moderate or Low")]
pub struct ParseSeverityError(pub String);

impl Severity {
    pub const ALL: [Severity; 3] = [Severity::High, Severity::Moderate, Severity::Low];

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::High => "High",
            Severity::Moderate => "Moderate",
            Severity::Low => "Low",
        }
    }

    /// Chart and badge color used by the dashboard
    pub fn color(&self) -> &'static str {
        match self {
            Severity::High => "#ef4444",
            Severity::Moderate => "#fb923c",
            Severity::Low => "#2dd4bf",
        }
    }

    /// Short label for terminal badges
    pub fn badge(&self) -> &'static str {
        match self {
            Severity::High => "HIGH",
            Severity::Moderate => "MOD",
            Severity::Low => "LOW",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = ParseSeverityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "High" => Ok(Severity::High),
            "Moderate" => Ok(Severity::Moderate),
            "Low" => Ok(Severity::Low),
            other => Err(ParseSeverityError(other.to_string())),
        }
    }
}
