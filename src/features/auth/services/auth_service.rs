use crate::core::error::Result;
use crate::features::auth::dtos::{
    AuthResponseDto, AuthUserDto, ForgotPasswordRequestDto, LoginRequestDto,
    RefreshTokenRequestDto, ResetPasswordRequestDto, SignUpRequestDto, SignUpResponseDto,
    VerifyOtpRequestDto,
};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::users::services::ProfileService;
use crate::modules::supabase::{SignUpOutcome, SupabaseClient};
use std::sync::Arc;

/// Forwards account operations to the auth provider
pub struct AuthService {
    backend: Arc<SupabaseClient>,
    profile_service: Arc<ProfileService>,
}

impl AuthService {
    pub fn new(backend: Arc<SupabaseClient>, profile_service: Arc<ProfileService>) -> Self {
        Self {
            backend,
            profile_service,
        }
    }

    pub async fn login(&self, dto: LoginRequestDto) -> Result<AuthResponseDto> {
        let session = self
            .backend
            .sign_in_with_password(&dto.email, &dto.password)
            .await?;

        tracing::info!("User signed in: {}", session.user.id);
        Ok(session.into())
    }

    /// Create the account, then seed its profile row.
    ///
    /// The profile write is best-effort: the account already exists at that
    /// point and the settings screen can create the row later.
    pub async fn signup(&self, dto: SignUpRequestDto) -> Result<SignUpResponseDto> {
        let outcome = self
            .backend
            .sign_up(&dto.email, &dto.password, &dto.full_name)
            .await?;

        let user_id = outcome.user().id.clone();
        tracing::info!("User signed up: {}", user_id);

        if let Err(e) = self
            .profile_service
            .create_initial_profile(&user_id, &dto.email, &dto.full_name)
            .await
        {
            tracing::warn!("Failed to create profile for {}: {}", user_id, e);
        }

        Ok(match outcome {
            SignUpOutcome::Session(session) => SignUpResponseDto {
                user: session.user.clone().into(),
                email_confirmation_required: false,
                session: Some(session.into()),
            },
            SignUpOutcome::PendingConfirmation(user) => SignUpResponseDto {
                user: user.into(),
                email_confirmation_required: true,
                session: None,
            },
        })
    }

    pub async fn refresh_token(&self, dto: RefreshTokenRequestDto) -> Result<AuthResponseDto> {
        let session = self.backend.refresh_session(&dto.refresh_token).await?;
        Ok(session.into())
    }

    pub async fn forgot_password(&self, dto: ForgotPasswordRequestDto) -> Result<()> {
        self.backend.send_password_reset(&dto.email).await
    }

    pub async fn verify_otp(&self, dto: VerifyOtpRequestDto) -> Result<AuthResponseDto> {
        let session = self
            .backend
            .verify_recovery_otp(&dto.email, &dto.token)
            .await?;

        tracing::info!("Recovery code verified for user: {}", session.user.id);
        Ok(session.into())
    }

    pub async fn reset_password(
        &self,
        user: &AuthenticatedUser,
        dto: ResetPasswordRequestDto,
    ) -> Result<AuthUserDto> {
        let updated = self
            .backend
            .update_password(&user.access_token, &dto.new_password)
            .await?;

        tracing::info!("Password updated for user: {}", updated.id);
        Ok(updated.into())
    }

    /// The middleware already resolved the token, so this is a fresh lookup
    /// only to return the full user record
    pub async fn get_current_user(&self, user: &AuthenticatedUser) -> Result<AuthUserDto> {
        let auth_user = self.backend.get_user(&user.access_token).await?;
        Ok(auth_user.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::AppError;
    use crate::shared::test_helpers::unconfigured_backend;

    fn service() -> AuthService {
        let backend = unconfigured_backend();
        let profiles = Arc::new(ProfileService::new(Arc::clone(&backend)));
        AuthService::new(backend, profiles)
    }

    #[tokio::test]
    async fn test_login_without_backend_is_unavailable() {
        let result = service()
            .login(LoginRequestDto {
                email: "admin@najm.sa".to_string(),
                password: "Abc123".to_string(),
            })
            .await;
        assert!(matches!(result, Err(AppError::BackendUnavailable(_))));
    }

    #[tokio::test]
    async fn test_forgot_password_without_backend_is_unavailable() {
        let result = service()
            .forgot_password(ForgotPasswordRequestDto {
                email: "admin@najm.sa".to_string(),
            })
            .await;
        assert!(matches!(result, Err(AppError::BackendUnavailable(_))));
    }
}
