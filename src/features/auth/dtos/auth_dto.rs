use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::modules::supabase::{AuthSession, AuthUser};
use crate::shared::validation::validate_password_strength;

/// Request DTO for user login
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct LoginRequestDto {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Request DTO for account creation
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct SignUpRequestDto {
    #[validate(length(min = 1, max = 100, message = "Full name must be 1-100 characters"))]
    pub full_name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(custom(function = "validate_password_strength"))]
    pub password: String,

    #[validate(must_match(other = "password", message = "Passwords do not match"))]
    pub confirm_password: String,
}

/// Request DTO for token refresh
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct RefreshTokenRequestDto {
    #[validate(length(min = 1, message = "Refresh token is required"))]
    pub refresh_token: String,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct ForgotPasswordRequestDto {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
}

/// Recovery code sent by email after a forgot-password request
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct VerifyOtpRequestDto {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 6, max = 10, message = "Verification code must be 6-10 characters"))]
    pub token: String,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct ResetPasswordRequestDto {
    #[validate(custom(function = "validate_password_strength"))]
    pub new_password: String,

    #[validate(must_match(other = "new_password", message = "Passwords do not match"))]
    pub confirm_password: String,
}

/// Session returned by login, refresh and code verification
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthResponseDto {
    pub access_token: String,
    /// Token type (always "bearer")
    pub token_type: String,
    /// Token expiry time in seconds
    pub expires_in: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    pub user: AuthUserDto,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthUserDto {
    pub id: String,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub email_verified: bool,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SignUpResponseDto {
    pub user: AuthUserDto,
    /// True when the provider waits for the email link before issuing a session
    pub email_confirmation_required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session: Option<AuthResponseDto>,
}

impl From<AuthUser> for AuthUserDto {
    fn from(user: AuthUser) -> Self {
        Self {
            full_name: user.full_name(),
            email_verified: user.email_confirmed_at.is_some(),
            id: user.id,
            email: user.email,
        }
    }
}

impl From<AuthSession> for AuthResponseDto {
    fn from(session: AuthSession) -> Self {
        Self {
            access_token: session.access_token,
            token_type: session.token_type,
            expires_in: session.expires_in,
            refresh_token: session.refresh_token,
            user: session.user.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signup(password: &str, confirm: &str) -> SignUpRequestDto {
        SignUpRequestDto {
            full_name: "Noura Al-Harbi".to_string(),
            email: "noura@najm.sa".to_string(),
            password: password.to_string(),
            confirm_password: confirm.to_string(),
        }
    }

    #[test]
    fn test_signup_accepts_strong_matching_password() {
        assert!(signup("Abc123", "Abc123").validate().is_ok());
    }

    #[test]
    fn test_signup_rejects_missing_capital() {
        let errors = signup("abc123", "abc123").validate().unwrap_err();
        assert!(errors.field_errors().contains_key("password"));
    }

    #[test]
    fn test_signup_rejects_mismatch() {
        let errors = signup("Abc123", "Abc124").validate().unwrap_err();
        assert!(errors.field_errors().contains_key("confirm_password"));
    }

    #[test]
    fn test_reset_password_rules() {
        let dto = ResetPasswordRequestDto {
            new_password: "Secure9".to_string(),
            confirm_password: "Secure9".to_string(),
        };
        assert!(dto.validate().is_ok());

        let dto = ResetPasswordRequestDto {
            new_password: "short".to_string(),
            confirm_password: "short".to_string(),
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_verify_otp_length() {
        let dto = VerifyOtpRequestDto {
            email: "noura@najm.sa".to_string(),
            token: "123".to_string(),
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_generated_signups_validate() {
        use fake::faker::internet::en::SafeEmail;
        use fake::faker::name::en::Name;
        use fake::Fake;

        for _ in 0..20 {
            let dto = SignUpRequestDto {
                full_name: Name().fake(),
                email: SafeEmail().fake(),
                password: "Dispatch7".to_string(),
                confirm_password: "Dispatch7".to_string(),
            };
            assert!(dto.validate().is_ok(), "{:?}", dto);
        }
    }
}
