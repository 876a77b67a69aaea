use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::client::SupabaseClient;
use crate::core::error::AppError;

/// User record as returned by the auth API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user_metadata: Value,
    #[serde(default)]
    pub email_confirmed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl AuthUser {
    pub fn full_name(&self) -> Option<String> {
        self.user_metadata
            .get("full_name")
            .and_then(Value::as_str)
            .map(String::from)
    }
}

/// Session issued by the auth API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSession {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    #[serde(default)]
    pub refresh_token: Option<String>,
    pub user: AuthUser,
}

/// Sign-up returns a session when email confirmation is disabled, a bare user otherwise
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SignUpOutcome {
    Session(AuthSession),
    PendingConfirmation(AuthUser),
}

impl SignUpOutcome {
    pub fn user(&self) -> &AuthUser {
        match self {
            SignUpOutcome::Session(session) => &session.user,
            SignUpOutcome::PendingConfirmation(user) => user,
        }
    }
}

impl SupabaseClient {
    pub async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, AppError> {
        self.ensure_configured()?;
        tracing::debug!("Signing in user: {}", email);

        let request = self
            .auth_request(Method::POST, "/auth/v1/token?grant_type=password")
            .json(&json!({ "email": email, "password": password }));

        self.expect_auth_json(request, "sign in").await
    }

    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        full_name: &str,
    ) -> Result<SignUpOutcome, AppError> {
        self.ensure_configured()?;
        tracing::debug!("Signing up user: {}", email);

        let request = self.auth_request(Method::POST, "/auth/v1/signup").json(&json!({
            "email": email,
            "password": password,
            "data": { "full_name": full_name },
        }));

        self.expect_auth_json(request, "sign up").await
    }

    pub async fn refresh_session(&self, refresh_token: &str) -> Result<AuthSession, AppError> {
        self.ensure_configured()?;

        let request = self
            .auth_request(Method::POST, "/auth/v1/token?grant_type=refresh_token")
            .json(&json!({ "refresh_token": refresh_token }));

        self.expect_auth_json(request, "refresh session").await
    }

    /// Asks the provider to email a recovery code to `email`
    pub async fn send_password_reset(&self, email: &str) -> Result<(), AppError> {
        self.ensure_configured()?;
        tracing::debug!("Requesting password reset for: {}", email);

        let request = self
            .auth_request(Method::POST, "/auth/v1/recover")
            .json(&json!({ "email": email }));

        let response = self.send(request, "send password reset").await?;
        if response.status().is_success() {
            return Ok(());
        }
        Err(self
            .error_from_response(response, "send password reset", true)
            .await)
    }

    /// Exchanges an emailed recovery code for a session
    pub async fn verify_recovery_otp(
        &self,
        email: &str,
        token: &str,
    ) -> Result<AuthSession, AppError> {
        self.ensure_configured()?;

        let request = self.auth_request(Method::POST, "/auth/v1/verify").json(&json!({
            "type": "recovery",
            "email": email,
            "token": token,
        }));

        self.expect_auth_json(request, "verify code").await
    }

    pub async fn update_password(
        &self,
        access_token: &str,
        password: &str,
    ) -> Result<AuthUser, AppError> {
        self.ensure_configured()?;

        let request = self
            .auth_request(Method::PUT, "/auth/v1/user")
            .bearer_auth(access_token)
            .json(&json!({ "password": password }));

        self.expect_auth_json(request, "update password").await
    }

    /// Resolves an access token to its user
    pub async fn get_user(&self, access_token: &str) -> Result<AuthUser, AppError> {
        self.ensure_configured()?;

        let request = self
            .auth_request(Method::GET, "/auth/v1/user")
            .bearer_auth(access_token);

        self.expect_auth_json(request, "look up user").await
    }

    async fn expect_auth_json<T: serde::de::DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        operation: &str,
    ) -> Result<T, AppError> {
        let response = self.send(request, operation).await?;

        if !response.status().is_success() {
            return Err(self.error_from_response(response, operation, true).await);
        }

        response.json::<T>().await.map_err(|e| {
            tracing::error!("Failed to parse auth response ({}): {}", operation, e);
            AppError::ExternalServiceError(format!("Failed to parse auth response: {}", e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_up_outcome_session() {
        let body = r#"{
            "access_token": "jwt",
            "token_type": "bearer",
            "expires_in": 3600,
            "refresh_token": "r1",
            "user": {"id": "u1", "email": "admin@najm.sa", "user_metadata": {"full_name": "Sara"}}
        }"#;
        let outcome: SignUpOutcome = serde_json::from_str(body).unwrap();
        assert!(matches!(outcome, SignUpOutcome::Session(_)));
        assert_eq!(outcome.user().full_name().as_deref(), Some("Sara"));
    }

    #[test]
    fn test_sign_up_outcome_pending_confirmation() {
        let body = r#"{"id": "u2", "email": "new@najm.sa", "created_at": "2025-11-29T14:32:00Z"}"#;
        let outcome: SignUpOutcome = serde_json::from_str(body).unwrap();
        assert!(matches!(outcome, SignUpOutcome::PendingConfirmation(_)));
        assert_eq!(outcome.user().id, "u2");
        assert!(outcome.user().full_name().is_none());
    }
}
