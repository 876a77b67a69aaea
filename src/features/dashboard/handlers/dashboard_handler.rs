use axum::{extract::State, Json};
use std::sync::Arc;

use crate::core::error::AppError;
use crate::features::dashboard::dtos::*;
use crate::features::dashboard::services::DashboardService;
use crate::shared::types::ApiResponse;

/// Get dashboard summary stats and chart data
#[utoipa::path(
    get,
    path = "/api/dashboard/summary",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Dashboard summary", body = ApiResponse<DashboardSummaryDto>),
        (status = 401, description = "Unauthorized"),
        (status = 502, description = "Backend query failed")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_summary(
    State(service): State<Arc<DashboardService>>,
) -> Result<Json<ApiResponse<DashboardSummaryDto>>, AppError> {
    let summary = service.get_summary().await?;
    Ok(Json(ApiResponse::success(Some(summary), None, None)))
}

/// Get map center and incident markers
#[utoipa::path(
    get,
    path = "/api/dashboard/map",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Map markers", body = ApiResponse<DashboardMapDto>),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_map(
    State(service): State<Arc<DashboardService>>,
) -> Result<Json<ApiResponse<DashboardMapDto>>, AppError> {
    let data = service.get_map().await?;
    Ok(Json(ApiResponse::success(Some(data), None, None)))
}
