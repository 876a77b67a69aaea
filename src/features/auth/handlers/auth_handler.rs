use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::dtos::{
    AuthResponseDto, AuthUserDto, ForgotPasswordRequestDto, LoginRequestDto,
    RefreshTokenRequestDto, ResetPasswordRequestDto, SignUpRequestDto, SignUpResponseDto,
    VerifyOtpRequestDto,
};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::auth::services::AuthService;
use crate::shared::types::ApiResponse;
use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;
use validator::Validate;

/// Login with email and password
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequestDto,
    responses(
        (status = 200, description = "Login successful", body = ApiResponse<AuthResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Rejected by the auth provider")
    ),
    tag = "auth"
)]
pub async fn login(
    State(service): State<Arc<AuthService>>,
    AppJson(dto): AppJson<LoginRequestDto>,
) -> Result<Json<ApiResponse<AuthResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let auth_response = service.login(dto).await?;
    Ok(Json(ApiResponse::success(Some(auth_response), None, None)))
}

/// Create an account
#[utoipa::path(
    post,
    path = "/api/auth/signup",
    request_body = SignUpRequestDto,
    responses(
        (status = 201, description = "Account created", body = ApiResponse<SignUpResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Rejected by the auth provider")
    ),
    tag = "auth"
)]
pub async fn signup(
    State(service): State<Arc<AuthService>>,
    AppJson(dto): AppJson<SignUpRequestDto>,
) -> Result<(StatusCode, Json<ApiResponse<SignUpResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let response = service.signup(dto).await?;
    let message = response
        .email_confirmation_required
        .then(|| "Check your email to confirm your account".to_string());

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(response), message, None)),
    ))
}

/// Refresh access token using refresh token
#[utoipa::path(
    post,
    path = "/api/auth/refresh",
    request_body = RefreshTokenRequestDto,
    responses(
        (status = 200, description = "Token refreshed successfully", body = ApiResponse<AuthResponseDto>),
        (status = 401, description = "Invalid or expired refresh token")
    ),
    tag = "auth"
)]
pub async fn refresh_token(
    State(service): State<Arc<AuthService>>,
    AppJson(dto): AppJson<RefreshTokenRequestDto>,
) -> Result<Json<ApiResponse<AuthResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let response = service.refresh_token(dto).await?;
    Ok(Json(ApiResponse::success(Some(response), None, None)))
}

/// Email a password recovery code
#[utoipa::path(
    post,
    path = "/api/auth/forgot-password",
    request_body = ForgotPasswordRequestDto,
    responses(
        (status = 200, description = "Recovery code sent"),
        (status = 400, description = "Validation error")
    ),
    tag = "auth"
)]
pub async fn forgot_password(
    State(service): State<Arc<AuthService>>,
    AppJson(dto): AppJson<ForgotPasswordRequestDto>,
) -> Result<Json<ApiResponse<()>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    service.forgot_password(dto).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("A verification code has been sent to your email".to_string()),
        None,
    )))
}

/// Verify the emailed recovery code
#[utoipa::path(
    post,
    path = "/api/auth/verify-otp",
    request_body = VerifyOtpRequestDto,
    responses(
        (status = 200, description = "Code accepted, session issued", body = ApiResponse<AuthResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid or expired code")
    ),
    tag = "auth"
)]
pub async fn verify_otp(
    State(service): State<Arc<AuthService>>,
    AppJson(dto): AppJson<VerifyOtpRequestDto>,
) -> Result<Json<ApiResponse<AuthResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let response = service.verify_otp(dto).await?;
    Ok(Json(ApiResponse::success(Some(response), None, None)))
}

/// Set a new password for the signed-in user
#[utoipa::path(
    post,
    path = "/api/auth/reset-password",
    request_body = ResetPasswordRequestDto,
    responses(
        (status = 200, description = "Password updated", body = ApiResponse<AuthUserDto>),
        (status = 400, description = "Password does not meet the rules"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "auth",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn reset_password(
    user: AuthenticatedUser,
    State(service): State<Arc<AuthService>>,
    AppJson(dto): AppJson<ResetPasswordRequestDto>,
) -> Result<Json<ApiResponse<AuthUserDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let updated = service.reset_password(&user, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(updated),
        Some("Password updated successfully".to_string()),
        None,
    )))
}

/// Get current authenticated user info
#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Current user retrieved successfully", body = ApiResponse<AuthUserDto>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "auth",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_me(
    user: AuthenticatedUser,
    State(service): State<Arc<AuthService>>,
) -> Result<Json<ApiResponse<AuthUserDto>>> {
    let user_data = service.get_current_user(&user).await?;
    Ok(Json(ApiResponse::success(Some(user_data), None, None)))
}

#[cfg(test)]
mod tests {
    use crate::features::auth::routes;
    use crate::features::auth::AuthService;
    use crate::features::users::services::ProfileService;
    use crate::shared::test_helpers::{unconfigured_backend, with_test_user};
    use axum::http::StatusCode;
    use axum::Router;
    use axum_test::TestServer;
    use serde_json::{json, Value};
    use std::sync::Arc;

    fn server() -> TestServer {
        let backend = unconfigured_backend();
        let profiles = Arc::new(ProfileService::new(Arc::clone(&backend)));
        let service = Arc::new(AuthService::new(backend, profiles));

        let app = Router::new()
            .merge(routes::public_routes(Arc::clone(&service)))
            .merge(with_test_user(routes::protected_routes(service)));
        TestServer::new(app).unwrap()
    }

    #[tokio::test]
    async fn test_signup_rejects_weak_password_before_calling_backend() {
        let response = server()
            .post("/api/auth/signup")
            .json(&json!({
                "full_name": "Fahad",
                "email": "fahad@najm.sa",
                "password": "abc123",
                "confirm_password": "abc123"
            }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["success"], false);
        assert!(body["message"].as_str().unwrap().contains("capital letter"));
    }

    #[tokio::test]
    async fn test_reset_password_mismatch_is_rejected() {
        let response = server()
            .post("/api/auth/reset-password")
            .json(&json!({
                "new_password": "Abc123",
                "confirm_password": "Abc999"
            }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_login_invalid_email_is_rejected() {
        let response = server()
            .post("/api/auth/login")
            .json(&json!({ "email": "not-an-email", "password": "x" }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_valid_login_without_backend_is_unavailable() {
        let response = server()
            .post("/api/auth/login")
            .json(&json!({ "email": "admin@najm.sa", "password": "Abc123" }))
            .await;

        response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    }
}
