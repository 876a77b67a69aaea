use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

use crate::features::alerts::dtos::{AlertListResponseDto, CreateAlertDto, CreateAlertResponseDto};
use crate::features::alerts::models::Alert;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server responded with {status}: {body}")]
    Status { status: u16, body: String },
}

/// Sends one SOS alert
#[async_trait]
pub trait AlertSubmitter: Send + Sync {
    async fn submit(&self, alert: &CreateAlertDto) -> Result<Alert, ClientError>;
}

/// Fetches the current alert list
#[async_trait]
pub trait AlertSource: Send + Sync {
    async fn fetch_alerts(&self) -> Result<Vec<Alert>, ClientError>;
}

/// HTTP client for the alert endpoints of a running dispatch service
#[derive(Clone)]
pub struct DispatchApiClient {
    base_url: String,
    http_client: Client,
}

impl DispatchApiClient {
    const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let http_client = Client::builder().timeout(Self::REQUEST_TIMEOUT).build()?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http_client,
        })
    }

    fn alerts_url(&self) -> String {
        format!("{}/api/alerts", self.base_url)
    }

    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(ClientError::Status {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl AlertSubmitter for DispatchApiClient {
    async fn submit(&self, alert: &CreateAlertDto) -> Result<Alert, ClientError> {
        let response = self
            .http_client
            .post(self.alerts_url())
            .json(alert)
            .send()
            .await?;

        let created: CreateAlertResponseDto = Self::ensure_success(response).await?.json().await?;
        Ok(created.alert)
    }
}

#[async_trait]
impl AlertSource for DispatchApiClient {
    async fn fetch_alerts(&self) -> Result<Vec<Alert>, ClientError> {
        let response = self.http_client.get(self.alerts_url()).send().await?;
        let list: AlertListResponseDto = Self::ensure_success(response).await?.json().await?;
        Ok(list.alerts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash() {
        let client = DispatchApiClient::new("http://127.0.0.1:3000/").unwrap();
        assert_eq!(client.alerts_url(), "http://127.0.0.1:3000/api/alerts");
    }

    #[tokio::test]
    async fn test_unreachable_server_is_an_error() {
        let client = DispatchApiClient::new("http://127.0.0.1:9").unwrap();
        let result = client.fetch_alerts().await;
        assert!(matches!(result, Err(ClientError::Http(_))));
    }
}
