//! Service configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `STORE_DECISION_HOST` - Bind address (default: 127.0.0.1)
//! - `STORE_DECISION_PORT` - Listen port (default: 3000)
//! - `STORE_DECISION_BASE_URL` - Public URL (default: <http://localhost:3000>)
//! - `STORE_DECISION_DATABASE_URL` / `DATABASE_URL` - `PostgreSQL` connection
//!   string; without it sessions and order metadata are kept in memory
//! - `STORE_UTC_OFFSET` - Store-local UTC offset (default: -03:00)
//! - `ZONE_TABLE_PATH` - JSON postcode zone table
//! - `ZONE_SERVICE_URL` - Remote zone matching endpoint
//! - `ZONE_SERVICE_TOKEN` - Bearer token for the zone service
//! - `ZONE_LOOKUP_TIMEOUT_MS` - Zone lookup timeout (default: 3000)
//! - `ZONE_CACHE_TTL_SECS` - Zone service cache TTL (default: 300)
//! - `PAYMENT_WEEKDAY_RESTRICTION` - Enable the weekday payment whitelist
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Trace sample rate (default: 1.0)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use chrono::FixedOffset;
use secrecy::SecretString;
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Store decision service configuration.
#[derive(Debug, Clone)]
pub struct StoreDecisionConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL, decides whether cookies are marked secure
    pub base_url: String,
    /// `PostgreSQL` connection URL (contains password)
    pub database_url: Option<SecretString>,
    /// Offset of the stores' local calendar
    pub store_offset: FixedOffset,
    /// Where CEPs are matched to zones
    pub zones: ZoneSource,
    /// Upper bound on a single zone lookup
    pub zone_lookup_timeout: Duration,
    /// Weekday payment whitelist flag
    pub payment_weekday_restriction: bool,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate
    pub sentry_sample_rate: f32,
    /// Sentry trace sample rate
    pub sentry_traces_sample_rate: f32,
}

/// Source of CEP to zone matching.
#[derive(Debug, Clone)]
pub enum ZoneSource {
    /// Local JSON postcode table.
    Table(PathBuf),
    /// Remote zone matching service.
    Service(ZoneServiceConfig),
    /// No matcher configured; every CEP resolves to Central.
    None,
}

/// Remote zone matching service configuration.
///
/// Implements `Debug` manually to redact the token.
#[derive(Clone)]
pub struct ZoneServiceConfig {
    /// Endpoint queried with `postcode`, `country` and `state`
    pub url: String,
    /// Optional bearer token
    pub token: Option<SecretString>,
    /// How long a matched zone is cached
    pub cache_ttl: Duration,
}

impl std::fmt::Debug for ZoneServiceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZoneServiceConfig")
            .field("url", &self.url)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("cache_ttl", &self.cache_ttl)
            .finish()
    }
}

impl StoreDecisionConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("STORE_DECISION_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STORE_DECISION_HOST".to_string(), e.to_string())
            })?;
        let port = get_env_or_default("STORE_DECISION_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STORE_DECISION_PORT".to_string(), e.to_string())
            })?;
        let base_url = get_env_or_default("STORE_DECISION_BASE_URL", "http://localhost:3000");
        let database_url = get_database_url("STORE_DECISION_DATABASE_URL");
        let store_offset = store_offset_from_env()?;
        let zones = ZoneSource::from_env()?;
        let zone_lookup_timeout =
            Duration::from_millis(get_parsed_or_default("ZONE_LOOKUP_TIMEOUT_MS", 3000)?);
        let payment_weekday_restriction = payment_weekday_restriction_from_env();

        let sentry_dsn = get_optional_env("SENTRY_DSN");
        let sentry_environment = get_optional_env("SENTRY_ENVIRONMENT");
        let sentry_sample_rate = get_optional_env("SENTRY_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);
        let sentry_traces_sample_rate = get_optional_env("SENTRY_TRACES_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);

        Ok(Self {
            host,
            port,
            base_url,
            database_url,
            store_offset,
            zones,
            zone_lookup_timeout,
            payment_weekday_restriction,
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
            sentry_traces_sample_rate,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether the service is reached over HTTPS.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

impl ZoneSource {
    /// A service URL takes precedence over a table path.
    fn from_env() -> Result<Self, ConfigError> {
        if let Some(url) = get_optional_env("ZONE_SERVICE_URL") {
            url::Url::parse(&url).map_err(|e| {
                ConfigError::InvalidEnvVar("ZONE_SERVICE_URL".to_string(), e.to_string())
            })?;
            return Ok(Self::Service(ZoneServiceConfig {
                url,
                token: get_optional_env("ZONE_SERVICE_TOKEN").map(SecretString::from),
                cache_ttl: Duration::from_secs(get_parsed_or_default("ZONE_CACHE_TTL_SECS", 300)?),
            }));
        }
        Ok(get_optional_env("ZONE_TABLE_PATH").map_or(Self::None, |path| Self::Table(path.into())))
    }
}

/// Parse a signed `+HH:MM` / `-HHMM` offset.
#[must_use]
pub fn parse_utc_offset(raw: &str) -> Option<FixedOffset> {
    raw.trim().parse().ok()
}

/// Store-local UTC offset from `STORE_UTC_OFFSET`, `-03:00` when unset.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidEnvVar`] if the value is not a signed offset.
pub fn store_offset_from_env() -> Result<FixedOffset, ConfigError> {
    parse_utc_offset(&get_env_or_default("STORE_UTC_OFFSET", "-03:00")).ok_or_else(|| {
        ConfigError::InvalidEnvVar(
            "STORE_UTC_OFFSET".to_string(),
            "expected an offset like -03:00".to_string(),
        )
    })
}

/// Whether `PAYMENT_WEEKDAY_RESTRICTION` switches the weekday whitelist on.
#[must_use]
pub fn payment_weekday_restriction_from_env() -> bool {
    get_optional_env("PAYMENT_WEEKDAY_RESTRICTION").is_some_and(|value| parse_flag(&value))
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get database URL with fallback to generic `DATABASE_URL` (used by Fly.io postgres attach).
fn get_database_url(primary_key: &str) -> Option<SecretString> {
    get_optional_env(primary_key)
        .or_else(|| get_optional_env("DATABASE_URL"))
        .map(SecretString::from)
}

/// Get an optional environment variable. Empty values count as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}

/// Get a numeric environment variable with a default value.
fn get_parsed_or_default(key: &str, default: u64) -> Result<u64, ConfigError> {
    get_optional_env(key).map_or(Ok(default), |value| {
        value
            .trim()
            .parse()
            .map_err(|e: std::num::ParseIntError| {
                ConfigError::InvalidEnvVar(key.to_string(), e.to_string())
            })
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_utc_offset() {
        assert_eq!(
            parse_utc_offset("-03:00"),
            FixedOffset::west_opt(3 * 3600)
        );
        assert_eq!(parse_utc_offset("+05:30"), FixedOffset::east_opt(5 * 3600 + 1800));
        assert_eq!(parse_utc_offset(" +00:00 "), FixedOffset::east_opt(0));
        assert_eq!(parse_utc_offset("-0300"), FixedOffset::west_opt(3 * 3600));
        assert_eq!(parse_utc_offset("-25:00"), None);
        assert_eq!(parse_utc_offset("brt"), None);
        assert_eq!(parse_utc_offset(""), None);
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("true"));
        assert!(parse_flag(" ON "));
        assert!(parse_flag("1"));
        assert!(!parse_flag("false"));
        assert!(!parse_flag("0"));
    }

    #[test]
    fn test_socket_addr() {
        let config = StoreDecisionConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            base_url: "https://checkout.example.com".to_string(),
            database_url: None,
            store_offset: parse_utc_offset("-03:00").unwrap(),
            zones: ZoneSource::None,
            zone_lookup_timeout: Duration::from_secs(3),
            payment_weekday_restriction: false,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 1.0,
        };

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
        assert!(config.is_secure());
    }

    #[test]
    fn test_zone_service_config_debug_redacts_token() {
        let config = ZoneServiceConfig {
            url: "https://zones.example.com/match".to_string(),
            token: Some(SecretString::from("super_secret_token")),
            cache_ttl: Duration::from_secs(300),
        };

        let debug_output = format!("{config:?}");
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super_secret_token"));
        assert!(debug_output.contains("zones.example.com"));
    }
}
