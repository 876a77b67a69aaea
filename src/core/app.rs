//! Service wiring and router assembly, shared by the binary and the
//! integration tests.

use axum::extract::DefaultBodyLimit;
use axum::middleware::{from_fn, from_fn_with_state};
use axum::{http::StatusCode, routing::get, Router};
use std::sync::Arc;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::core::config::{AlertConfig, Config, SwaggerConfig};
use crate::core::middleware;
use crate::core::openapi::{ApiDoc, SwaggerInfoModifier};
use crate::features::alerts::{self, AlertService, AlertStore};
use crate::features::auth::{self, AuthService};
use crate::features::dashboard::{self, DashboardService};
use crate::features::incidents::{self, IncidentService};
use crate::features::users::{self, ProfileService};
use crate::modules::supabase::SupabaseClient;

/// Every feature service, built once at start-up
#[derive(Clone)]
pub struct AppServices {
    pub backend: Arc<SupabaseClient>,
    pub alerts: Arc<AlertService>,
    pub auth: Arc<AuthService>,
    pub profiles: Arc<ProfileService>,
    pub incidents: Arc<IncidentService>,
    pub dashboard: Arc<DashboardService>,
}

impl AppServices {
    pub fn new(backend: Arc<SupabaseClient>, alert_config: &AlertConfig) -> Self {
        let store = Arc::new(AlertStore::new(alert_config.store_capacity));
        let alerts = Arc::new(AlertService::new(store, Arc::clone(&backend)));
        let profiles = Arc::new(ProfileService::new(Arc::clone(&backend)));
        let auth = Arc::new(AuthService::new(Arc::clone(&backend), Arc::clone(&profiles)));
        let incidents = Arc::new(IncidentService::new(Arc::clone(&backend)));
        let dashboard = Arc::new(DashboardService::new(
            Arc::clone(&incidents),
            Arc::clone(&alerts),
        ));

        Self {
            backend,
            alerts,
            auth,
            profiles,
            incidents,
            dashboard,
        }
    }
}

async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// API routes without Swagger or the HTTP layers.
///
/// Without a backend there is nobody to resolve bearer tokens, so the
/// incident and dashboard views are served openly from the demo set.
pub fn api_router(services: &AppServices) -> Router {
    let dashboard_routes = Router::new()
        .merge(incidents::routes(Arc::clone(&services.incidents)))
        .merge(dashboard::routes(Arc::clone(&services.dashboard)));

    let demo_mode = !services.backend.is_configured();
    if demo_mode {
        tracing::warn!("Dashboard routes are public: no backend to check bearer tokens");
    }

    // Protected routes (require a bearer token the auth provider accepts)
    let mut protected_routes = Router::new()
        .merge(auth::routes::protected_routes(Arc::clone(&services.auth)))
        .merge(users::routes(Arc::clone(&services.profiles)));
    if !demo_mode {
        protected_routes = protected_routes.merge(dashboard_routes.clone());
    }
    let protected_routes = protected_routes.route_layer(from_fn_with_state(
        Arc::clone(&services.backend),
        middleware::auth_middleware,
    ));

    let mut public_routes = Router::new()
        .merge(alerts::routes(Arc::clone(&services.alerts)))
        .merge(auth::routes::public_routes(Arc::clone(&services.auth)));
    if demo_mode {
        public_routes = public_routes.merge(dashboard_routes);
    }

    Router::new()
        .merge(protected_routes)
        .merge(public_routes)
        .route("/health", get(health_check))
}

fn swagger_router(swagger: &SwaggerConfig) -> Router {
    let mut openapi = ApiDoc::openapi();
    SwaggerInfoModifier {
        title: swagger.title.clone(),
        version: swagger.version.clone(),
        description: swagger.description.clone(),
    }
    .modify(&mut openapi);

    let ui = Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi));

    match swagger.credentials() {
        Some(credentials) => {
            tracing::info!("Swagger UI basic auth enabled");
            ui.layer(from_fn(middleware::basic_auth_middleware(Arc::new(credentials))))
        }
        None => {
            tracing::info!("Swagger UI basic auth disabled (no credentials configured)");
            ui
        }
    }
}

/// Full application: API, Swagger UI, body limit, CORS, request ids and tracing
pub fn build_app(config: &Config, services: &AppServices) -> Router {
    Router::new()
        .merge(swagger_router(&config.swagger))
        .merge(api_router(services))
        .layer(DefaultBodyLimit::max(config.app.max_request_body_size))
        .layer(middleware::cors_layer(config.app.cors_allowed_origins.clone()))
        // Propagate X-Request-Id to response headers
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(middleware::MakeSpanWithRequestId)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Generate X-Request-Id using UUID v7 (or use client-provided one)
        .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid))
}
