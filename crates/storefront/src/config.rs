//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `STOREFRONT_BASE_URL` - Public URL for the storefront
//! - `CLERK_PUBLISHABLE_KEY` - Clerk publishable key (when `IDENTITY_PROVIDER=clerk`)
//! - `IDENTITY_SIGN_IN_URL` / `IDENTITY_SIGN_UP_URL` - Hosted page URLs (when `IDENTITY_PROVIDER=hosted`)
//!
//! ## Optional
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `STOREFRONT_CATALOG_PATH` - Catalog JSON file (default: crates/storefront/content/catalog.json)
//! - `IDENTITY_PROVIDER` - `clerk` or `hosted` (default: clerk)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Performance trace sample rate (default: 0.0)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use thiserror::Error;
use url::Url;

const DEFAULT_CATALOG_PATH: &str = "crates/storefront/content/catalog.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront (no trailing slash)
    pub base_url: String,
    /// Path to the catalog JSON file
    pub catalog_path: PathBuf,
    /// Hosted identity provider settings
    pub identity: IdentityConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "production")
    pub sentry_environment: Option<String>,
    /// Fraction of errors sent to Sentry
    pub sentry_sample_rate: f32,
    /// Fraction of transactions traced
    pub sentry_traces_sample_rate: f32,
}

/// Which hosted identity provider renders the auth pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityConfig {
    /// Clerk widgets embedded on `/sign-in` and `/sign-up`.
    Clerk {
        /// Publishable key (`pk_test_...` or `pk_live_...`), safe to expose in the browser
        publishable_key: String,
    },
    /// Redirect to externally hosted sign-in / sign-up pages.
    Hosted {
        sign_in_url: Url,
        sign_up_url: Url,
    },
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("STOREFRONT_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_HOST".to_string(), e.to_string())
            })?;
        let port = get_env_or_default("STOREFRONT_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_PORT".to_string(), e.to_string())
            })?;
        let base_url = parse_base_url(&get_required_env("STOREFRONT_BASE_URL")?)?;
        let catalog_path =
            PathBuf::from(get_env_or_default("STOREFRONT_CATALOG_PATH", DEFAULT_CATALOG_PATH));

        let identity = IdentityConfig::from_env()?;

        Ok(Self {
            host,
            port,
            base_url,
            catalog_path,
            identity,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
            sentry_sample_rate: get_rate("SENTRY_SAMPLE_RATE", 1.0)?,
            sentry_traces_sample_rate: get_rate("SENTRY_TRACES_SAMPLE_RATE", 0.0)?,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether the storefront is served over HTTPS (secure cookies).
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

impl IdentityConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let provider = get_env_or_default("IDENTITY_PROVIDER", "clerk");
        match provider.to_ascii_lowercase().as_str() {
            "clerk" => Ok(Self::Clerk {
                publishable_key: get_required_env("CLERK_PUBLISHABLE_KEY")?,
            }),
            "hosted" => Ok(Self::Hosted {
                sign_in_url: get_required_url("IDENTITY_SIGN_IN_URL")?,
                sign_up_url: get_required_url("IDENTITY_SIGN_UP_URL")?,
            }),
            other => Err(ConfigError::InvalidEnvVar(
                "IDENTITY_PROVIDER".to_string(),
                format!("unknown provider '{other}' (expected 'clerk' or 'hosted')"),
            )),
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get a required environment variable that must be an absolute URL.
fn get_required_url(key: &str) -> Result<Url, ConfigError> {
    let value = get_required_env(key)?;
    Url::parse(&value).map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Get a sample rate in `[0.0, 1.0]`.
fn get_rate(key: &str, default: f32) -> Result<f32, ConfigError> {
    let Some(value) = get_optional_env(key) else {
        return Ok(default);
    };
    parse_rate(&value).map_err(|reason| ConfigError::InvalidEnvVar(key.to_string(), reason))
}

fn parse_rate(value: &str) -> Result<f32, String> {
    let rate = value.parse::<f32>().map_err(|e| e.to_string())?;
    if (0.0..=1.0).contains(&rate) {
        Ok(rate)
    } else {
        Err(format!("must be between 0.0 and 1.0 (got {rate})"))
    }
}

/// Validate the base URL and strip any trailing slash.
fn parse_base_url(value: &str) -> Result<String, ConfigError> {
    let url = Url::parse(value).map_err(|e| {
        ConfigError::InvalidEnvVar("STOREFRONT_BASE_URL".to_string(), e.to_string())
    })?;
    if url.host_str().is_none() {
        return Err(ConfigError::InvalidEnvVar(
            "STOREFRONT_BASE_URL".to_string(),
            "must have a host".to_string(),
        ));
    }
    Ok(value.trim_end_matches('/').to_string())
}
