use axum::{
    extract::{Path, Query, State},
    Json,
};
use std::sync::Arc;

use crate::core::error::Result;
use crate::features::incidents::dtos::IncidentQuery;
use crate::features::incidents::models::Incident;
use crate::features::incidents::services::IncidentService;
use crate::shared::types::{ApiResponse, Meta};

/// List incidents, optionally filtered by severity and status
#[utoipa::path(
    get,
    path = "/api/incidents",
    params(IncidentQuery),
    responses(
        (status = 200, description = "Incidents, newest first", body = ApiResponse<Vec<Incident>>),
        (status = 401, description = "Unauthorized"),
        (status = 502, description = "Backend query failed")
    ),
    tag = "incidents",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_incidents(
    State(service): State<Arc<IncidentService>>,
    Query(query): Query<IncidentQuery>,
) -> Result<Json<ApiResponse<Vec<Incident>>>> {
    let incidents = service.list(&query).await?;
    let meta = Meta {
        total: incidents.len() as i64,
    };
    Ok(Json(ApiResponse::success(Some(incidents), None, Some(meta))))
}

#[utoipa::path(
    get,
    path = "/api/incidents/{display_id}",
    params(
        ("display_id" = String, Path, description = "Incident display id, e.g. INC-2024-001")
    ),
    responses(
        (status = 200, description = "Incident details", body = ApiResponse<Incident>),
        (status = 404, description = "Incident not found")
    ),
    tag = "incidents",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_incident(
    State(service): State<Arc<IncidentService>>,
    Path(display_id): Path<String>,
) -> Result<Json<ApiResponse<Incident>>> {
    let incident = service.get(&display_id).await?;
    Ok(Json(ApiResponse::success(Some(incident), None, None)))
}
