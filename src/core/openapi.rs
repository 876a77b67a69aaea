use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::alerts::{dtos as alerts_dtos, handlers as alerts_handlers, models as alerts_models};
use crate::features::auth;
use crate::features::dashboard::{dtos as dashboard_dtos, handlers as dashboard_handlers};
use crate::features::incidents::{handlers as incidents_handlers, models as incidents_models};
use crate::features::users::{dtos as users_dtos, handlers::profile_handler};
use crate::shared::severity::Severity;
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Alerts (public)
        alerts_handlers::create_alert,
        alerts_handlers::list_alerts,
        // Auth
        auth::handlers::login,
        auth::handlers::signup,
        auth::handlers::refresh_token,
        auth::handlers::forgot_password,
        auth::handlers::verify_otp,
        auth::handlers::reset_password,
        auth::handlers::get_me,
        // Users
        profile_handler::get_profile,
        profile_handler::update_profile,
        // Incidents
        incidents_handlers::list_incidents,
        incidents_handlers::get_incident,
        // Dashboard
        dashboard_handlers::dashboard_handler::get_summary,
        dashboard_handlers::dashboard_handler::get_map,
    ),
    components(
        schemas(
            // Shared
            Meta,
            Severity,
            // Alerts
            alerts_models::Alert,
            alerts_models::AlertStatus,
            alerts_dtos::CreateAlertDto,
            alerts_dtos::CreateAlertResponseDto,
            alerts_dtos::AlertListResponseDto,
            alerts_dtos::AlertErrorResponseDto,
            // Auth
            auth::model::AuthenticatedUser,
            auth::dtos::LoginRequestDto,
            auth::dtos::SignUpRequestDto,
            auth::dtos::RefreshTokenRequestDto,
            auth::dtos::ForgotPasswordRequestDto,
            auth::dtos::VerifyOtpRequestDto,
            auth::dtos::ResetPasswordRequestDto,
            auth::dtos::AuthResponseDto,
            auth::dtos::AuthUserDto,
            auth::dtos::SignUpResponseDto,
            ApiResponse<auth::dtos::AuthResponseDto>,
            ApiResponse<auth::dtos::AuthUserDto>,
            ApiResponse<auth::dtos::SignUpResponseDto>,
            // Users
            users_dtos::UpdateProfileDto,
            users_dtos::ProfileResponseDto,
            ApiResponse<users_dtos::ProfileResponseDto>,
            // Incidents
            incidents_models::Incident,
            incidents_models::IncidentStatus,
            ApiResponse<incidents_models::Incident>,
            ApiResponse<Vec<incidents_models::Incident>>,
            // Dashboard
            dashboard_dtos::DashboardSummaryDto,
            dashboard_dtos::SeverityShareDto,
            dashboard_dtos::RegionSummaryDto,
            dashboard_dtos::DashboardMapDto,
            dashboard_dtos::MapMarkerDto,
            dashboard_dtos::MarkerKind,
            ApiResponse<dashboard_dtos::DashboardSummaryDto>,
            ApiResponse<dashboard_dtos::DashboardMapDto>,
        )
    ),
    tags(
        (name = "alerts", description = "Phone SOS alerts (public)"),
        (name = "auth", description = "Authentication endpoints"),
        (name = "users", description = "User profile management"),
        (name = "incidents", description = "Detected incidents"),
        (name = "Dashboard", description = "Dashboard aggregates and map markers"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Najm Dispatch API",
        version = "0.1.0",
        description = "API documentation for Najm Dispatch",
    )
)]
pub struct ApiDoc;

/// Adds Bearer security scheme to OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_route_documented() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/alerts",
            "/api/auth/signup",
            "/api/users/me/profile",
            "/api/incidents/{display_id}",
            "/api/dashboard/map",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }
    }

    #[test]
    fn test_info_override() {
        let mut doc = ApiDoc::openapi();
        SwaggerInfoModifier {
            title: "Dispatch".to_string(),
            version: "9.9.9".to_string(),
            description: "staging".to_string(),
        }
        .modify(&mut doc);
        assert_eq!(doc.info.title, "Dispatch");
        assert_eq!(doc.info.description.as_deref(), Some("staging"));
    }
}
