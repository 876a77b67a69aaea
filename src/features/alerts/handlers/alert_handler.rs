use axum::{body::Bytes, extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::features::alerts::dtos::{
    AlertErrorResponseDto, AlertListResponseDto, CreateAlertDto, CreateAlertResponseDto,
};
use crate::features::alerts::error::AlertRejection;
use crate::features::alerts::services::AlertService;

/// Submit an SOS alert
///
/// Missing fields are filled with defaults. The alert is returned even when the
/// backend copy could not be written.
#[utoipa::path(
    post,
    path = "/api/alerts",
    request_body = CreateAlertDto,
    responses(
        (status = 201, description = "Alert accepted", body = CreateAlertResponseDto),
        (status = 500, description = "Alert could not be processed", body = AlertErrorResponseDto)
    ),
    tag = "alerts"
)]
pub async fn create_alert(
    State(service): State<Arc<AlertService>>,
    body: Bytes,
) -> Result<(StatusCode, Json<CreateAlertResponseDto>), AlertRejection> {
    let dto = AlertService::parse_body(&body)?;
    let outcome = service.submit(dto).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateAlertResponseDto {
            success: true,
            alert: outcome.into_alert(),
        }),
    ))
}

/// List alerts currently held in memory, newest first
#[utoipa::path(
    get,
    path = "/api/alerts",
    responses(
        (status = 200, description = "Current alerts", body = AlertListResponseDto)
    ),
    tag = "alerts"
)]
pub async fn list_alerts(State(service): State<Arc<AlertService>>) -> Json<AlertListResponseDto> {
    Json(AlertListResponseDto {
        alerts: service.list().await,
    })
}
