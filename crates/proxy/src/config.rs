//! Proxy configuration loaded from environment variables.
//!
//! Configuration is read once at startup into an immutable [`ProxyConfig`]
//! and handed to the handlers through `AppState`. Nothing reads the
//! environment after that.
//!
//! # Environment Variables
//!
//! ## Required
//! - `SHOPIFY_STORE_DOMAIN` - Shopify store domain (e.g., your-store.myshopify.com);
//!   a leading `http://` or `https://` is stripped
//! - `SHOPIFY_ADMIN_ACCESS_TOKEN` - Admin API access token (never sent to browsers)
//!
//! ## Optional
//! - `PROXY_HOST` - Bind address (default: 127.0.0.1)
//! - `PROXY_PORT` - Listen port (default: 8080)
//! - `SHOPIFY_API_VERSION` - API version (default: 2024-07)
//! - `PROXY_EXPOSE_ERROR_DETAILS` - Include the internal error chain in error
//!   bodies (default: false, development only)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Transaction sample rate (default: 0.0)

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;

/// Default Admin API version when `SHOPIFY_API_VERSION` is unset.
pub const DEFAULT_API_VERSION: &str = "2024-07";

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "password",
    "dummy",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "enter-",
    "put-your",
    "add-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Proxy application configuration.
#[derive(Debug, Clone)]
pub struct ProxyConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Shopify Admin API configuration
    pub shopify: ShopifyAdminConfig,
    /// Return the internal error chain to callers (development only)
    pub expose_error_details: bool,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
    /// Fraction of errors sent to Sentry
    pub sentry_sample_rate: f32,
    /// Fraction of transactions traced
    pub sentry_traces_sample_rate: f32,
}

/// Shopify Admin API configuration.
///
/// Implements `Debug` manually to redact the access token.
#[derive(Clone)]
pub struct ShopifyAdminConfig {
    /// Origin of the Admin API (`https://<store-domain>/`)
    pub base_url: Url,
    /// Shopify API version (e.g., 2024-07)
    pub api_version: String,
    /// Admin API access token (server-side only)
    pub access_token: SecretString,
}

impl std::fmt::Debug for ShopifyAdminConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShopifyAdminConfig")
            .field("base_url", &self.base_url.as_str())
            .field("api_version", &self.api_version)
            .field("access_token", &"[REDACTED]")
            .finish()
    }
}

impl ProxyConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing, invalid, or
    /// if the access token fails validation (placeholder detection, entropy check).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("PROXY_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("PROXY_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("PROXY_PORT", "8080")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("PROXY_PORT".to_string(), e.to_string()))?;
        let expose_error_details = get_env_or_default("PROXY_EXPOSE_ERROR_DETAILS", "false")
            .parse::<bool>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("PROXY_EXPOSE_ERROR_DETAILS".to_string(), e.to_string())
            })?;

        let shopify = ShopifyAdminConfig::from_env()?;
        let sentry_dsn = get_optional_env("SENTRY_DSN");
        let sentry_environment = get_optional_env("SENTRY_ENVIRONMENT");
        let sentry_sample_rate = get_optional_env("SENTRY_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);
        let sentry_traces_sample_rate = get_optional_env("SENTRY_TRACES_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(0.0);

        Ok(Self {
            host,
            port,
            shopify,
            expose_error_details,
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
}

impl ShopifyAdminConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let store = get_required_env("SHOPIFY_STORE_DOMAIN")?;
        let api_version = get_env_or_default("SHOPIFY_API_VERSION", DEFAULT_API_VERSION);
        validate_api_version(&api_version, "SHOPIFY_API_VERSION")?;

        Ok(Self {
            base_url: parse_store_domain(&store, "SHOPIFY_STORE_DOMAIN")?,
            api_version,
            access_token: get_validated_secret("SHOPIFY_ADMIN_ACCESS_TOKEN")?,
        })
    }

    /// The bare store domain (e.g., your-store.myshopify.com).
    #[must_use]
    pub fn store(&self) -> &str {
        self.base_url.host_str().unwrap_or_default()
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Turn a store domain into the Admin API origin.
///
/// Accepts `shop.myshopify.com`, `https://shop.myshopify.com` and
/// `http://shop.myshopify.com/`. Anything carrying a path, query,
/// credentials or an empty host is rejected so the process fails at startup
/// instead of on the first request.
fn parse_store_domain(raw: &str, var_name: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: &str| ConfigError::InvalidEnvVar(var_name.to_string(), reason.to_string());

    let trimmed = raw.trim();
    let domain = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"))
        .unwrap_or(trimmed)
        .trim_end_matches('/');

    if domain.is_empty() {
        return Err(invalid("store domain is empty"));
    }

    let url = Url::parse(&format!("https://{domain}/")).map_err(|e| invalid(&e.to_string()))?;

    if url.host_str().is_none_or(str::is_empty) {
        return Err(invalid("store domain has no host"));
    }
    if url.path() != "/" || url.query().is_some() || url.fragment().is_some() {
        return Err(invalid("store domain must not contain a path or query"));
    }
    if !url.username().is_empty() || url.password().is_some() {
        return Err(invalid("store domain must not contain credentials"));
    }

    Ok(url)
}

/// API versions are date stamps (`2024-07`) or `unstable`; they become a path
/// segment, so only alphanumerics and dashes are allowed.
fn validate_api_version(version: &str, var_name: &str) -> Result<(), ConfigError> {
    if version.is_empty() || !version.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            format!("'{version}' is not a valid API version"),
        ));
    }
    Ok(())
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.chars().count() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)] // Character count will never exceed f64 precision
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate that a secret is not a placeholder and has sufficient entropy.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    // Check blocklist
    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    // Real admin tokens (shpat_ + 32 hex chars) have high entropy
    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1})"
            ),
        ));
    }

    Ok(())
}

/// Load and validate a secret from environment.
fn get_validated_secret(key: &str) -> Result<SecretString, ConfigError> {
    let value = get_required_env(key)?;
    validate_secret_strength(&value, key)?;
    Ok(SecretString::from(value))
}
