use crate::features::auth::handlers;
use crate::features::auth::services::AuthService;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

/// Public auth routes (no authentication required)
pub fn public_routes(service: Arc<AuthService>) -> Router {
    Router::new()
        .route("/api/auth/login", post(handlers::login))
        .route("/api/auth/signup", post(handlers::signup))
        .route("/api/auth/refresh", post(handlers::refresh_token))
        .route("/api/auth/forgot-password", post(handlers::forgot_password))
        .route("/api/auth/verify-otp", post(handlers::verify_otp))
        .with_state(service)
}

/// Auth routes that need a bearer token
pub fn protected_routes(service: Arc<AuthService>) -> Router {
    Router::new()
        .route("/api/auth/me", get(handlers::get_me))
        .route("/api/auth/reset-password", post(handlers::reset_password))
        .with_state(service)
}
