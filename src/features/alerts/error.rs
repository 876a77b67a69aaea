use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::features::alerts::dtos::AlertErrorResponseDto;
use crate::shared::severity::ParseSeverityError;

/// Reasons an alert submission is refused
#[derive(Debug, Error)]
pub enum AlertRejection {
    #[error("Malformed alert body: {0}")]
    MalformedBody(#[from] serde_json::Error),

    #[error(transparent)]
    InvalidSeverity(#[from] ParseSeverityError),
}

impl IntoResponse for AlertRejection {
    fn into_response(self) -> Response {
        tracing::warn!("Alert rejected: {}", self);

        let body = Json(AlertErrorResponseDto {
            success: false,
            error: "Failed to process alert".to_string(),
        });

        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}
