use async_trait::async_trait;
use serde::Serialize;
use std::env;
use std::time::Duration;
use thiserror::Error;

use crate::shared::constants::{FALLBACK_LATITUDE, FALLBACK_LONGITUDE};

pub const DETECTING_ADDRESS: &str = "Detecting location...";
pub const UNAVAILABLE_ADDRESS: &str = "Location unavailable";

/// Position reported by a provider
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
    pub accuracy: Option<f64>,
}

#[derive(Debug, Error)]
pub enum LocationError {
    #[error("Geolocation not supported")]
    Unsupported,

    #[error("Location permission denied")]
    PermissionDenied,

    #[error("Position unavailable: {0}")]
    Unavailable(String),
}

/// Source of the device position
#[async_trait]
pub trait LocationProvider: Send + Sync {
    async fn current_position(&self) -> Result<Position, LocationError>;
}

/// Where the alert form thinks the device is
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationData {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub accuracy: Option<f64>,
    pub address: String,
    pub loading: bool,
    pub error: Option<String>,
}

impl LocationData {
    pub fn detecting() -> Self {
        Self {
            latitude: None,
            longitude: None,
            accuracy: None,
            address: DETECTING_ADDRESS.to_string(),
            loading: true,
            error: None,
        }
    }

    pub fn from_position(position: Position) -> Self {
        Self {
            latitude: Some(position.latitude),
            longitude: Some(position.longitude),
            accuracy: position.accuracy,
            address: format_coordinates(position.latitude, position.longitude),
            loading: false,
            error: None,
        }
    }

    /// Default dispatch point used when the provider fails or times out
    pub fn fallback() -> Self {
        Self {
            latitude: Some(FALLBACK_LATITUDE),
            longitude: Some(FALLBACK_LONGITUDE),
            accuracy: None,
            address: format!(
                "{} (Default)",
                format_coordinates(FALLBACK_LATITUDE, FALLBACK_LONGITUDE)
            ),
            loading: false,
            error: None,
        }
    }

    pub fn unsupported() -> Self {
        Self {
            latitude: None,
            longitude: None,
            accuracy: None,
            address: UNAVAILABLE_ADDRESS.to_string(),
            loading: false,
            error: Some(LocationError::Unsupported.to_string()),
        }
    }

    pub fn coordinates(&self) -> Option<(f64, f64)> {
        self.latitude.zip(self.longitude)
    }
}

impl Default for LocationData {
    fn default() -> Self {
        Self::detecting()
    }
}

pub fn format_coordinates(latitude: f64, longitude: f64) -> String {
    format!("{:.4}°N, {:.4}°E", latitude, longitude)
}

/// Requests a single position. Denial, failure and timeout all resolve to
/// the fallback point; only a missing provider is reported as unsupported.
pub async fn acquire_location(
    provider: Option<&dyn LocationProvider>,
    timeout: Duration,
) -> LocationData {
    let Some(provider) = provider else {
        return LocationData::unsupported();
    };

    match tokio::time::timeout(timeout, provider.current_position()).await {
        Ok(Ok(position)) => LocationData::from_position(position),
        Ok(Err(LocationError::Unsupported)) => LocationData::unsupported(),
        Ok(Err(e)) => {
            tracing::warn!("Location request failed, using default: {}", e);
            LocationData::fallback()
        }
        Err(_) => {
            tracing::warn!("Location request timed out after {:?}, using default", timeout);
            LocationData::fallback()
        }
    }
}

/// Reads a fixed position from `DISPATCH_LATITUDE` / `DISPATCH_LONGITUDE`
/// and optionally `DISPATCH_ACCURACY`
#[derive(Debug, Clone, Default)]
pub struct EnvLocationProvider;

impl EnvLocationProvider {
    fn read(name: &str) -> Result<Option<f64>, LocationError> {
        match env::var(name) {
            Ok(raw) => raw
                .trim()
                .parse::<f64>()
                .map(Some)
                .map_err(|_| LocationError::Unavailable(format!("{} is not a number", name))),
            Err(_) => Ok(None),
        }
    }
}

#[async_trait]
impl LocationProvider for EnvLocationProvider {
    async fn current_position(&self) -> Result<Position, LocationError> {
        let latitude = Self::read("DISPATCH_LATITUDE")?;
        let longitude = Self::read("DISPATCH_LONGITUDE")?;

        match (latitude, longitude) {
            (Some(latitude), Some(longitude)) => Ok(Position {
                latitude,
                longitude,
                accuracy: Self::read("DISPATCH_ACCURACY")?,
            }),
            (None, None) => Err(LocationError::Unsupported),
            _ => Err(LocationError::Unavailable(
                "both DISPATCH_LATITUDE and DISPATCH_LONGITUDE are required".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedProvider(Result<Position, fn() -> LocationError>);

    #[async_trait]
    impl LocationProvider for FixedProvider {
        async fn current_position(&self) -> Result<Position, LocationError> {
            self.0.map_err(|make| make())
        }
    }

    struct HangingProvider;

    #[async_trait]
    impl LocationProvider for HangingProvider {
        async fn current_position(&self) -> Result<Position, LocationError> {
            std::future::pending().await
        }
    }

    #[tokio::test]
    async fn test_fix_formats_address() {
        let provider = FixedProvider(Ok(Position {
            latitude: 26.42071,
            longitude: 50.08882,
            accuracy: Some(12.0),
        }));
        let location = acquire_location(Some(&provider), Duration::from_secs(10)).await;

        assert_eq!(location.address, "26.4207°N, 50.0888°E");
        assert_eq!(location.accuracy, Some(12.0));
        assert!(!location.loading);
    }

    #[tokio::test]
    async fn test_denied_uses_default_point() {
        let provider = FixedProvider(Err(|| LocationError::PermissionDenied));
        let location = acquire_location(Some(&provider), Duration::from_secs(10)).await;

        assert_eq!(location, LocationData::fallback());
        assert_eq!(location.address, "26.3927°N, 50.0132°E (Default)");
        assert!(location.error.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_uses_default_point() {
        let location = acquire_location(Some(&HangingProvider), Duration::from_secs(10)).await;
        assert_eq!(location.coordinates(), Some((26.3927, 50.0132)));
    }

    #[tokio::test]
    async fn test_no_provider_is_unsupported() {
        let location = acquire_location(None, Duration::from_secs(10)).await;
        assert_eq!(location.address, "Location unavailable");
        assert_eq!(location.error.as_deref(), Some("Geolocation not supported"));
        assert!(location.coordinates().is_none());
    }
}
