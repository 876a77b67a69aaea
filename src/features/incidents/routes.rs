use axum::{routing::get, Router};
use std::sync::Arc;

use crate::features::incidents::handlers;
use crate::features::incidents::services::IncidentService;

/// Incident routes (dashboard, bearer protected)
pub fn routes(service: Arc<IncidentService>) -> Router {
    Router::new()
        .route("/api/incidents", get(handlers::list_incidents))
        .route("/api/incidents/{display_id}", get(handlers::get_incident))
        .with_state(service)
}
