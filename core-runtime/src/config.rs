//! # Service Configuration Module
//!
//! Provides configuration management for the song catalog service.
//!
//! ## Overview
//!
//! The configuration system uses a builder pattern to construct a
//! `ServiceConfig` holding every setting the catalog needs: HTTP bind address,
//! database pool, cache sizing and budgets, the enrichment endpoint and logging.
//! `build()` validates fail-fast so a misconfigured process never starts.
//!
//! ## Usage
//!
//! ### From the environment
//!
//! ```ignore
//! use core_runtime::config::ServiceConfig;
//!
//! dotenvy::dotenv().ok();
//! let config = ServiceConfig::from_env()?;
//! ```
//!
//! ### Programmatic
//!
//! ```
//! use core_runtime::config::ServiceConfig;
//! use std::time::Duration;
//!
//! let config = ServiceConfig::builder()
//!     .database_url("sqlite::memory:")
//!     .port(3000)
//!     .cache_ttl(Duration::from_secs(60))
//!     .build()
//!     .unwrap();
//! assert_eq!(config.http.port, 3000);
//! ```
//!
//! ## Environment variables
//!
//! | variable | default |
//! |---|---|
//! | `API_HOST` | `0.0.0.0` |
//! | `API_PORT` | `8080` |
//! | `DATABASE_URL` | `sqlite:songs.db` |
//! | `DB_MAX_CONNECTIONS` | `5` |
//! | `DB_ACQUIRE_TIMEOUT_SECS` | `30` |
//! | `STORE_TIMEOUT_MS` | `5000` |
//! | `EXTERNAL_API_URL` | unset |
//! | `EXTERNAL_API_TIMEOUT_SECS` | `10` |
//! | `CACHE_ENABLED` | `true` |
//! | `CACHE_CAPACITY` | `1024` |
//! | `CACHE_TTL_SECS` | `600` |
//! | `CACHE_TIMEOUT_MS` | `250` |
//! | `REQUEST_TIMEOUT_SECS` | `30` |
//! | `LOG_LEVEL` | `info` |
//! | `LOG_FORMAT` | `pretty` in debug builds, `json` in release |
//! | `RUST_LOG` | unset |

use crate::error::{Error, Result};
use crate::logging::{LogFormat, LoggingConfig};
use bridge_traits::LogLevel;
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_DATABASE_URL: &str = "sqlite:songs.db";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_millis(5000);
pub const DEFAULT_ENRICHMENT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_CACHE_CAPACITY: usize = 1024;
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(600);
pub const DEFAULT_CACHE_TIMEOUT: Duration = Duration::from_millis(250);
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP listener settings
#[derive(Debug, Clone, PartialEq)]
pub struct HttpConfig {
    pub host: String,
    pub port: u16,
    /// Upper bound applied to every request by the server's timeout layer
    pub request_timeout: Duration,
}

impl HttpConfig {
    /// `host:port` suitable for `TcpListener::bind`
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

/// Connection pool settings for the song store
#[derive(Debug, Clone, PartialEq)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: DEFAULT_DATABASE_URL.to_string(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            acquire_timeout: DEFAULT_ACQUIRE_TIMEOUT,
        }
    }
}

/// Song cache settings
#[derive(Debug, Clone, PartialEq)]
pub struct CacheConfig {
    /// When false the service runs against a cache that is always unavailable
    pub enabled: bool,
    /// Maximum number of cached songs
    pub capacity: usize,
    /// Time-to-live of each cached song
    pub ttl: Duration,
    /// Budget for a single cache call; exceeding it counts as unavailable
    pub operation_timeout: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            capacity: DEFAULT_CACHE_CAPACITY,
            ttl: DEFAULT_CACHE_TTL,
            operation_timeout: DEFAULT_CACHE_TIMEOUT,
        }
    }
}

/// External song-detail API settings
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichmentConfig {
    /// Base URL queried with `?group=..&song=..`. Unset disables adding songs.
    pub base_url: Option<String>,
    pub timeout: Duration,
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout: DEFAULT_ENRICHMENT_TIMEOUT,
        }
    }
}

/// Complete service configuration
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub http: HttpConfig,
    pub database: DatabaseSettings,
    /// Budget for a single store call
    pub store_timeout: Duration,
    pub cache: CacheConfig,
    pub enrichment: EnrichmentConfig,
    pub logging: LoggingConfig,
}

impl ServiceConfig {
    /// Creates a new builder with every setting at its default.
    pub fn builder() -> ServiceConfigBuilder {
        ServiceConfigBuilder::default()
    }

    /// Reads the configuration from the process environment.
    ///
    /// Call `dotenvy::dotenv()` first to pick up a `.env` file.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads the configuration through an arbitrary variable lookup.
    ///
    /// Blank values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let mut builder = Self::builder();

        if let Some(host) = get("API_HOST") {
            builder = builder.host(host);
        }
        if let Some(port) = parse_var::<u16>(&get, "API_PORT")? {
            builder = builder.port(port);
        }
        if let Some(secs) = parse_var::<u64>(&get, "REQUEST_TIMEOUT_SECS")? {
            builder = builder.request_timeout(Duration::from_secs(secs));
        }
        if let Some(url) = get("DATABASE_URL") {
            builder = builder.database_url(url);
        }
        if let Some(max) = parse_var::<u32>(&get, "DB_MAX_CONNECTIONS")? {
            builder = builder.max_connections(max);
        }
        if let Some(secs) = parse_var::<u64>(&get, "DB_ACQUIRE_TIMEOUT_SECS")? {
            builder = builder.acquire_timeout(Duration::from_secs(secs));
        }
        if let Some(ms) = parse_var::<u64>(&get, "STORE_TIMEOUT_MS")? {
            builder = builder.store_timeout(Duration::from_millis(ms));
        }
        if let Some(url) = get("EXTERNAL_API_URL") {
            builder = builder.enrichment_url(url);
        }
        if let Some(secs) = parse_var::<u64>(&get, "EXTERNAL_API_TIMEOUT_SECS")? {
            builder = builder.enrichment_timeout(Duration::from_secs(secs));
        }
        if let Some(raw) = get("CACHE_ENABLED") {
            builder = builder.cache_enabled(parse_bool("CACHE_ENABLED", &raw)?);
        }
        if let Some(capacity) = parse_var::<usize>(&get, "CACHE_CAPACITY")? {
            builder = builder.cache_capacity(capacity);
        }
        if let Some(secs) = parse_var::<u64>(&get, "CACHE_TTL_SECS")? {
            builder = builder.cache_ttl(Duration::from_secs(secs));
        }
        if let Some(ms) = parse_var::<u64>(&get, "CACHE_TIMEOUT_MS")? {
            builder = builder.cache_timeout(Duration::from_millis(ms));
        }
        if let Some(level) = parse_var::<LogLevel>(&get, "LOG_LEVEL")? {
            builder = builder.log_level(level);
        }
        if let Some(format) = parse_var::<LogFormat>(&get, "LOG_FORMAT")? {
            builder = builder.log_format(format);
        }
        if let Some(filter) = get("RUST_LOG") {
            builder = builder.log_filter(filter);
        }

        builder.build()
    }

    /// Validates the configuration and returns an error if invalid.
    ///
    /// This checks:
    /// - Database URL is not empty
    /// - Port, pool size and every timeout are non-zero
    /// - Cache capacity and TTL are non-zero when the cache is enabled
    /// - The enrichment URL, when set, is an http(s) URL
    pub fn validate(&self) -> Result<()> {
        if self.http.host.trim().is_empty() {
            return Err(Error::Config("API_HOST cannot be empty".to_string()));
        }
        if self.http.port == 0 {
            return Err(Error::Config(
                "API_PORT must be greater than 0".to_string(),
            ));
        }
        if self.http.request_timeout.is_zero() {
            return Err(Error::Config(
                "REQUEST_TIMEOUT_SECS must be greater than 0".to_string(),
            ));
        }

        if self.database.url.trim().is_empty() {
            return Err(Error::Config("DATABASE_URL cannot be empty".to_string()));
        }
        if self.database.max_connections == 0 {
            return Err(Error::Config(
                "DB_MAX_CONNECTIONS must be greater than 0".to_string(),
            ));
        }
        if self.database.acquire_timeout.is_zero() {
            return Err(Error::Config(
                "DB_ACQUIRE_TIMEOUT_SECS must be greater than 0".to_string(),
            ));
        }
        if self.store_timeout.is_zero() {
            return Err(Error::Config(
                "STORE_TIMEOUT_MS must be greater than 0".to_string(),
            ));
        }

        if self.cache.enabled {
            if self.cache.capacity == 0 {
                return Err(Error::Config(
                    "CACHE_CAPACITY must be greater than 0 when the cache is enabled"
                        .to_string(),
                ));
            }
            if self.cache.ttl.is_zero() {
                return Err(Error::Config(
                    "CACHE_TTL_SECS must be greater than 0".to_string(),
                ));
            }
            if self.cache.operation_timeout.is_zero() {
                return Err(Error::Config(
                    "CACHE_TIMEOUT_MS must be greater than 0".to_string(),
                ));
            }
        }

        if let Some(url) = &self.enrichment.base_url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(Error::Config(format!(
                    "EXTERNAL_API_URL must be an http(s) URL, got '{}'",
                    url
                )));
            }
        }
        if self.enrichment.timeout.is_zero() {
            return Err(Error::Config(
                "EXTERNAL_API_TIMEOUT_SECS must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

/// Builder for [`ServiceConfig`]
#[derive(Debug, Clone, Default)]
pub struct ServiceConfigBuilder {
    http: HttpConfig,
    database: DatabaseSettings,
    store_timeout: Option<Duration>,
    cache: CacheConfig,
    enrichment: EnrichmentConfig,
    logging: LoggingConfig,
}

impl ServiceConfigBuilder {
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.http.host = host.into();
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.http.port = port;
        self
    }

    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.http.request_timeout = timeout;
        self
    }

    /// Sets the sqlx connection URL (e.g. `sqlite:songs.db`, `sqlite::memory:`).
    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.database.url = url.into();
        self
    }

    pub fn max_connections(mut self, max: u32) -> Self {
        self.database.max_connections = max;
        self
    }

    pub fn acquire_timeout(mut self, timeout: Duration) -> Self {
        self.database.acquire_timeout = timeout;
        self
    }

    pub fn store_timeout(mut self, timeout: Duration) -> Self {
        self.store_timeout = Some(timeout);
        self
    }

    pub fn cache_enabled(mut self, enabled: bool) -> Self {
        self.cache.enabled = enabled;
        self
    }

    pub fn cache_capacity(mut self, capacity: usize) -> Self {
        self.cache.capacity = capacity;
        self
    }

    /// Sets the song TTL.
    ///
    /// Default: 10 minutes
    pub fn cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache.ttl = ttl;
        self
    }

    pub fn cache_timeout(mut self, timeout: Duration) -> Self {
        self.cache.operation_timeout = timeout;
        self
    }

    pub fn enrichment_url(mut self, url: impl Into<String>) -> Self {
        self.enrichment.base_url = Some(url.into());
        self
    }

    pub fn enrichment_timeout(mut self, timeout: Duration) -> Self {
        self.enrichment.timeout = timeout;
        self
    }

    pub fn log_level(mut self, level: LogLevel) -> Self {
        self.logging = self.logging.with_level(level);
        self
    }

    pub fn log_format(mut self, format: LogFormat) -> Self {
        self.logging = self.logging.with_format(format);
        self
    }

    pub fn log_filter(mut self, filter: impl Into<String>) -> Self {
        self.logging = self.logging.with_filter(filter);
        self
    }

    /// Builds and validates the configuration.
    pub fn build(self) -> Result<ServiceConfig> {
        let config = ServiceConfig {
            http: self.http,
            database: self.database,
            store_timeout: self.store_timeout.unwrap_or(DEFAULT_STORE_TIMEOUT),
            cache: self.cache,
            enrichment: self.enrichment,
            logging: self.logging,
        };
        config.validate()?;
        Ok(config)
    }
}

fn parse_var<T>(get: &impl Fn(&str) -> Option<String>, name: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: Display,
{
    get(name)
        .map(|raw| {
            raw.parse::<T>()
                .map_err(|e| Error::Config(format!("{} has invalid value '{}': {}", name, raw, e)))
        })
        .transpose()
}

fn parse_bool(name: &str, raw: &str) -> Result<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(Error::Config(format!(
            "{} must be a boolean, got '{}'",
            name, raw
        ))),
    }
}
