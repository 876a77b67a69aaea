use crate::features::alerts::handlers;
use crate::features::alerts::services::AlertService;
use axum::{routing::get, Router};
use std::sync::Arc;

/// Public alert routes (the SOS form is used without an account)
pub fn routes(service: Arc<AlertService>) -> Router {
    Router::new()
        .route(
            "/api/alerts",
            get(handlers::list_alerts).post(handlers::create_alert),
        )
        .with_state(service)
}
