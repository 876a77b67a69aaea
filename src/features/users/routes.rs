use crate::features::users::handlers;
use crate::features::users::services::ProfileService;
use axum::{routing::get, Router};
use std::sync::Arc;

pub fn routes(service: Arc<ProfileService>) -> Router {
    Router::new()
        .route(
            "/api/users/me/profile",
            get(handlers::get_profile).put(handlers::update_profile),
        )
        .with_state(service)
}
