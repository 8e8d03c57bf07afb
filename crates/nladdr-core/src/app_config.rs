use std::net::SocketAddr;
use std::path::PathBuf;

use crate::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    /// Unset is valid for provider-only use (address lookup, place search).
    pub database_url: Option<String>,
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_acquire_timeout_secs: u64,
    pub provider_timeout_secs: u64,
    pub user_agent: String,
    pub postcode_tech_url: String,
    pub postcode_tech_api_key: Option<String>,
    pub openpostcode_url: String,
    pub nominatim_url: String,
    pub pdok_url: String,
    pub places_path: Option<PathBuf>,
    pub job_secret: Option<String>,
    pub geocode_page_size: i64,
    pub geocode_delay_ms: u64,
    pub geocode_cron: String,
}

impl AppConfig {
    /// The database URL for commands that need the record store.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnvVar`] when `DATABASE_URL` is unset.
    pub fn require_database_url(&self) -> Result<&str, ConfigError> {
        self.database_url
            .as_deref()
            .ok_or_else(|| ConfigError::MissingEnvVar("DATABASE_URL".to_string()))
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field(
                "database_url",
                &self.database_url.as_ref().map(|_| "[redacted]"),
            )
            .field("db_max_connections", &self.db_max_connections)
            .field("db_min_connections", &self.db_min_connections)
            .field("db_acquire_timeout_secs", &self.db_acquire_timeout_secs)
            .field("provider_timeout_secs", &self.provider_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("postcode_tech_url", &self.postcode_tech_url)
            .field(
                "postcode_tech_api_key",
                &self.postcode_tech_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("openpostcode_url", &self.openpostcode_url)
            .field("nominatim_url", &self.nominatim_url)
            .field("pdok_url", &self.pdok_url)
            .field("places_path", &self.places_path)
            .field(
                "job_secret",
                &self.job_secret.as_ref().map(|_| "[redacted]"),
            )
            .field("geocode_page_size", &self.geocode_page_size)
            .field("geocode_delay_ms", &self.geocode_delay_ms)
            .field("geocode_cron", &self.geocode_cron)
            .finish()
    }
}
