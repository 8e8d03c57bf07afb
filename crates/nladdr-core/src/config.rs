use thiserror::Error;

use crate::app_config::{AppConfig, Environment};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read places file {path}: {source}")]
    PlacesFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse places file: {0}")]
    PlacesFileParse(#[source] serde_yaml::Error),

    #[error("invalid configuration: {0}")]
    Validation(String),
}

pub const DEFAULT_USER_AGENT: &str = "nladdr/0.1 (address-resolution)";
pub const DEFAULT_POSTCODE_TECH_URL: &str = "https://postcode.tech/api";
pub const DEFAULT_OPENPOSTCODE_URL: &str = "https://openpostcode.nl";
pub const DEFAULT_NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";
pub const DEFAULT_PDOK_URL: &str = "https://api.pdok.nl";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    // Set-but-blank counts as unset for optional secrets, paths and the
    // database URL.
    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    // Only database-backed paths need it; see `AppConfig::require_database_url`.
    let database_url = optional("DATABASE_URL");

    let env = parse_environment(&or_default("NLADDR_ENV", "development"))?;

    let bind_addr = parse_addr("NLADDR_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("NLADDR_LOG_LEVEL", "info");

    let db_max_connections = parse_u32("NLADDR_DB_MAX_CONNECTIONS", "10")?;
    let db_min_connections = parse_u32("NLADDR_DB_MIN_CONNECTIONS", "1")?;
    let db_acquire_timeout_secs = parse_u64("NLADDR_DB_ACQUIRE_TIMEOUT_SECS", "10")?;

    let provider_timeout_secs = parse_u64("NLADDR_PROVIDER_TIMEOUT_SECS", "8")?;
    if provider_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "NLADDR_PROVIDER_TIMEOUT_SECS".to_string(),
            reason: "timeout must be at least 1 second".to_string(),
        });
    }
    let user_agent = or_default("NLADDR_USER_AGENT", DEFAULT_USER_AGENT);

    let postcode_tech_url = or_default("NLADDR_POSTCODE_TECH_URL", DEFAULT_POSTCODE_TECH_URL);
    let postcode_tech_api_key = optional("NLADDR_POSTCODE_TECH_API_KEY");
    let openpostcode_url = or_default("NLADDR_OPENPOSTCODE_URL", DEFAULT_OPENPOSTCODE_URL);
    let nominatim_url = or_default("NLADDR_NOMINATIM_URL", DEFAULT_NOMINATIM_URL);
    let pdok_url = or_default("NLADDR_PDOK_URL", DEFAULT_PDOK_URL);
    let places_path = optional("NLADDR_PLACES_PATH").map(PathBuf::from);

    let job_secret = optional("NLADDR_JOB_SECRET");
    let geocode_page_size = parse_page_size(&or_default("NLADDR_GEOCODE_PAGE_SIZE", "50"))?;
    let geocode_delay_ms = parse_u64("NLADDR_GEOCODE_DELAY_MS", "1100")?;
    let geocode_cron = or_default("NLADDR_GEOCODE_CRON", "0 */15 * * * *");

    Ok(AppConfig {
        database_url,
        env,
        bind_addr,
        log_level,
        db_max_connections,
        db_min_connections,
        db_acquire_timeout_secs,
        provider_timeout_secs,
        user_agent,
        postcode_tech_url,
        postcode_tech_api_key,
        openpostcode_url,
        nominatim_url,
        pdok_url,
        places_path,
        job_secret,
        geocode_page_size,
        geocode_delay_ms,
        geocode_cron,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "NLADDR_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

fn parse_page_size(raw: &str) -> Result<i64, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidEnvVar {
        var: "NLADDR_GEOCODE_PAGE_SIZE".to_string(),
        reason,
    };
    let value = raw.parse::<i64>().map_err(|e| invalid(e.to_string()))?;
    if !(1..=1_000).contains(&value) {
        return Err(invalid(format!("{value} is outside 1..=1000")));
    }
    Ok(value)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
