use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Deserialize;

use crate::core::config::SupabaseConfig;
use crate::core::error::AppError;

/// Error body shapes returned by GoTrue and PostgREST
#[derive(Debug, Default, Deserialize)]
struct BackendErrorBody {
    #[serde(default)]
    error_description: Option<String>,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// HTTP client for the hosted backend
pub struct SupabaseClient {
    config: SupabaseConfig,
    http_client: Client,
}

impl SupabaseClient {
    pub fn new(config: SupabaseConfig) -> Result<Self, AppError> {
        let http_client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            config,
            http_client,
        })
    }

    pub fn config(&self) -> &SupabaseConfig {
        &self.config
    }

    pub fn is_configured(&self) -> bool {
        self.config.is_configured()
    }

    pub(super) fn ensure_configured(&self) -> Result<(), AppError> {
        if self.is_configured() {
            Ok(())
        } else {
            Err(AppError::BackendUnavailable(
                "Backend is not configured".to_string(),
            ))
        }
    }

    pub(super) fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.url, path)
    }

    /// Request against the auth API, keyed with the anon key
    pub(super) fn auth_request(&self, method: reqwest::Method, path: &str) -> RequestBuilder {
        self.http_client
            .request(method, self.url(path))
            .header("apikey", &self.config.anon_key)
    }

    /// Request against the table API, keyed with the service role key when available
    pub(super) fn rest_request(&self, method: reqwest::Method, table: &str) -> RequestBuilder {
        let key = self.config.data_key();
        self.http_client
            .request(method, self.url(&format!("/rest/v1/{}", table)))
            .header("apikey", key)
            .bearer_auth(key)
    }

    pub(super) async fn send(
        &self,
        request: RequestBuilder,
        operation: &str,
    ) -> Result<Response, AppError> {
        request.send().await.map_err(|e| {
            tracing::error!("Backend request failed ({}): {}", operation, e);
            AppError::ExternalServiceError(format!("Failed to {}: {}", operation, e))
        })
    }

    /// Turns a non-success response into an error.
    ///
    /// Client errors from the auth API keep the provider's message so it can be
    /// shown to the user unchanged.
    pub(super) async fn error_from_response(
        &self,
        response: Response,
        operation: &str,
        surface_client_errors: bool,
    ) -> AppError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let message = extract_error_message(&body);

        if surface_client_errors && status.is_client_error() {
            let message = message.unwrap_or_else(|| default_message(status));
            tracing::debug!("Auth provider rejected {}: {}", operation, message);
            return AppError::Auth(message);
        }

        tracing::error!(
            "Backend error during {}: HTTP {} - {}",
            operation,
            status,
            body
        );
        match status {
            StatusCode::NOT_FOUND => AppError::NotFound(
                message.unwrap_or_else(|| format!("Backend resource not found ({})", operation)),
            ),
            _ => AppError::ExternalServiceError(format!(
                "Backend error during {}: HTTP {}",
                operation, status
            )),
        }
    }
}

fn default_message(status: StatusCode) -> String {
    status
        .canonical_reason()
        .unwrap_or("Request rejected")
        .to_string()
}

/// Picks the most descriptive message out of a backend error body
pub(super) fn extract_error_message(body: &str) -> Option<String> {
    let parsed: BackendErrorBody = serde_json::from_str(body).ok()?;
    parsed
        .error_description
        .or(parsed.msg)
        .or(parsed.message)
        .or(parsed.error)
        .filter(|m| !m.trim().is_empty())
}
