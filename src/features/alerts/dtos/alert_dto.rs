use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::alerts::models::Alert;

/// Body of `POST /api/alerts`. Every field is optional; missing values are
/// replaced by defaults instead of being rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CreateAlertDto {
    #[schema(example = 26.4207)]
    pub latitude: Option<f64>,
    #[schema(example = 50.0888)]
    pub longitude: Option<f64>,
    pub accuracy: Option<f64>,
    /// "High", "Moderate" or "Low" (defaults to "High")
    #[schema(example = "High")]
    pub severity: Option<String>,
    #[schema(example = "26.4207°N, 50.0888°E")]
    pub address: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateAlertResponseDto {
    pub success: bool,
    pub alert: Alert,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AlertListResponseDto {
    pub alerts: Vec<Alert>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AlertErrorResponseDto {
    pub success: bool,
    pub error: String,
}
