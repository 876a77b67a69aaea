use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub supabase: SupabaseConfig,
    pub alerts: AlertConfig,
    pub swagger: SwaggerConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
    pub max_request_body_size: usize,
}

/// Connection settings for the hosted backend (PostgREST tables + GoTrue auth).
///
/// Every field degrades to an empty string when unset so the service can still
/// start and serve the in-memory alert list without a backend.
#[derive(Debug, Clone)]
pub struct SupabaseConfig {
    pub url: String,
    pub anon_key: String,
    pub service_role_key: String,
    pub request_timeout: Duration,
    pub alerts_table: String,
    pub incidents_table: String,
    pub profiles_table: String,
}

#[derive(Debug, Clone)]
pub struct AlertConfig {
    /// Number of alerts kept in memory, oldest evicted first
    pub store_capacity: usize,
}

#[derive(Debug, Clone)]
pub struct SwaggerConfig {
    pub username: Option<String>,
    pub password: Option<String>,
    pub title: String,
    pub version: String,
    pub description: String,
}

/// Settings for the `sos` and `watch` client commands
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_url: String,
    pub reset_delay: Duration,
    pub poll_interval: Duration,
    pub geolocation_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if exists, ignore if not found (optional for production)
        if let Err(e) = dotenvy::dotenv() {
            if !e.to_string().contains("not found") {
                eprintln!("Warning: Error loading .env file: {}", e);
            }
        }

        Ok(Config {
            app: AppConfig::from_env()?,
            supabase: SupabaseConfig::from_env()?,
            alerts: AlertConfig::from_env()?,
            swagger: SwaggerConfig::from_env()?,
        })
    }
}

impl AppConfig {
    const DEFAULT_MAX_REQUEST_BODY_SIZE: usize = 1024 * 1024; // 1MB

    pub fn from_env() -> Result<Self, String> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|e| format!("Invalid PORT: {}", e))?;

        // Parse CORS allowed origins from comma-separated string
        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let max_request_body_size = env::var("MAX_REQUEST_BODY_SIZE")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_REQUEST_BODY_SIZE.to_string())
            .parse::<usize>()
            .map_err(|_| "MAX_REQUEST_BODY_SIZE must be a valid number".to_string())?;

        Ok(Self {
            host,
            port,
            cors_allowed_origins,
            max_request_body_size,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl SupabaseConfig {
    const DEFAULT_TIMEOUT_SECS: u64 = 10;

    pub fn from_env() -> Result<Self, String> {
        let url = env_with_public_fallback("SUPABASE_URL")
            .trim_end_matches('/')
            .to_string();
        let anon_key = env_with_public_fallback("SUPABASE_ANON_KEY");
        let service_role_key = env_with_public_fallback("SUPABASE_SERVICE_ROLE_KEY");

        if url.is_empty() {
            eprintln!("Warning: SUPABASE_URL is not set, backend calls are disabled");
        }

        let timeout_secs = env::var("SUPABASE_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "SUPABASE_TIMEOUT_SECS must be a valid number".to_string())?;

        Ok(Self {
            url,
            anon_key,
            service_role_key,
            request_timeout: Duration::from_secs(timeout_secs),
            alerts_table: env::var("ALERTS_TABLE").unwrap_or_else(|_| "phone_alerts".to_string()),
            incidents_table: env::var("INCIDENTS_TABLE")
                .unwrap_or_else(|_| "incidents".to_string()),
            profiles_table: env::var("PROFILES_TABLE").unwrap_or_else(|_| "profiles".to_string()),
        })
    }

    /// Configuration with no backend, used when none is available
    pub fn disabled() -> Self {
        Self {
            url: String::new(),
            anon_key: String::new(),
            service_role_key: String::new(),
            request_timeout: Duration::from_secs(Self::DEFAULT_TIMEOUT_SECS),
            alerts_table: "phone_alerts".to_string(),
            incidents_table: "incidents".to_string(),
            profiles_table: "profiles".to_string(),
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.url.is_empty()
    }

    /// Key used for table access: the service role key when present, the anon key otherwise
    pub fn data_key(&self) -> &str {
        if self.service_role_key.is_empty() {
            &self.anon_key
        } else {
            &self.service_role_key
        }
    }
}

impl AlertConfig {
    pub const DEFAULT_STORE_CAPACITY: usize = 50;

    pub fn from_env() -> Result<Self, String> {
        let store_capacity = env::var("ALERT_STORE_CAPACITY")
            .unwrap_or_else(|_| Self::DEFAULT_STORE_CAPACITY.to_string())
            .parse::<usize>()
            .map_err(|_| "ALERT_STORE_CAPACITY must be a valid number".to_string())?;

        if store_capacity == 0 {
            return Err("ALERT_STORE_CAPACITY must be greater than zero".to_string());
        }

        Ok(Self { store_capacity })
    }
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            store_capacity: Self::DEFAULT_STORE_CAPACITY,
        }
    }
}

impl SwaggerConfig {
    pub fn from_env() -> Result<Self, String> {
        // Only use credentials if they are non-empty
        let username = env::var("SWAGGER_USERNAME").ok().filter(|s| !s.is_empty());
        let password = env::var("SWAGGER_PASSWORD").ok().filter(|s| !s.is_empty());
        let title = env::var("SWAGGER_TITLE").unwrap_or_else(|_| "Najm Dispatch API".to_string());
        let version = env::var("SWAGGER_VERSION").unwrap_or_else(|_| "0.1.0".to_string());
        let description = env::var("SWAGGER_DESCRIPTION")
            .unwrap_or_else(|_| "Emergency alerts and incident dashboard API".to_string());

        Ok(Self {
            username,
            password,
            title,
            version,
            description,
        })
    }

    /// Returns credentials in "username:password" format if auth is enabled
    pub fn credentials(&self) -> Option<String> {
        match (&self.username, &self.password) {
            (Some(user), Some(pass)) => Some(format!("{}:{}", user, pass)),
            _ => None,
        }
    }
}

impl ClientConfig {
    const DEFAULT_RESET_SECS: u64 = 5;
    const DEFAULT_POLL_SECS: u64 = 5;
    const DEFAULT_GEOLOCATION_TIMEOUT_SECS: u64 = 10;

    pub fn from_env() -> Result<Self, String> {
        let api_url = env::var("DISPATCH_API_URL")
            .unwrap_or_else(|_| "http://127.0.0.1:3000".to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            api_url,
            reset_delay: secs_from_env("ALERT_RESET_SECS", Self::DEFAULT_RESET_SECS)?,
            poll_interval: secs_from_env("ALERT_POLL_SECS", Self::DEFAULT_POLL_SECS)?,
            geolocation_timeout: secs_from_env(
                "GEOLOCATION_TIMEOUT_SECS",
                Self::DEFAULT_GEOLOCATION_TIMEOUT_SECS,
            )?,
        })
    }
}

fn env_with_public_fallback(name: &str) -> String {
    env::var(name)
        .or_else(|_| env::var(format!("NEXT_PUBLIC_{}", name)))
        .unwrap_or_default()
}

fn secs_from_env(name: &str, default: u64) -> Result<Duration, String> {
    env::var(name)
        .unwrap_or_else(|_| default.to_string())
        .parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|_| format!("{} must be a valid number", name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_supabase_is_not_configured() {
        let config = SupabaseConfig::disabled();
        assert!(!config.is_configured());
        assert_eq!(config.data_key(), "");
        assert_eq!(config.alerts_table, "phone_alerts");
    }

    #[test]
    fn test_data_key_prefers_service_role() {
        let mut config = SupabaseConfig::disabled();
        config.anon_key = "anon".to_string();
        assert_eq!(config.data_key(), "anon");

        config.service_role_key = "service".to_string();
        assert_eq!(config.data_key(), "service");
    }

    #[test]
    fn test_swagger_credentials() {
        let config = SwaggerConfig {
            username: Some("admin".to_string()),
            password: None,
            title: String::new(),
            version: String::new(),
            description: String::new(),
        };
        assert!(config.credentials().is_none());

        let config = SwaggerConfig {
            password: Some("secret".to_string()),
            ..config
        };
        assert_eq!(config.credentials().as_deref(), Some("admin:secret"));
    }
}
