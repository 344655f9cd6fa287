//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `ORDER_DESK_API_URL` - Base URL of the hosted data store (e.g., `https://abc.supabase.co`)
//! - `ORDER_DESK_API_KEY` - API key sent as `apikey` and bearer token
//!
//! ## Optional
//! - `ORDER_DESK_CUSTOMER_ID` - Customer that orders are placed for (default: 2)
//! - `ORDER_DESK_DATA_DIR` - Directory for the durable local store (default: .order-desk)
//! - `ORDER_DESK_ORDER_DESCRIPTION` - Label written on every new order (default: New Order)
//! - `ORDER_DESK_HTTP_TIMEOUT_SECS` - Per-request HTTP timeout (default: none)
//! - `SENTRY_DSN` - Sentry error tracking DSN

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use order_desk_core::CustomerId;
use secrecy::SecretString;
use thiserror::Error;
use url::Url;

use crate::submit::DEFAULT_ORDER_DESCRIPTION;

const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;

const DEFAULT_CUSTOMER_ID: &str = "2";
const DEFAULT_DATA_DIR: &str = ".order-desk";

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "xxx",
    "todo",
    "insert",
    "put-your",
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

/// Order Desk client configuration.
///
/// Implements `Debug` manually to redact the API key.
#[derive(Clone)]
pub struct DeskConfig {
    /// Base URL of the data store
    pub api_url: Url,
    /// Data store API key
    pub api_key: SecretString,
    /// Customer that submitted orders are attributed to
    pub customer_id: CustomerId,
    /// Directory backing the durable local store
    pub data_dir: PathBuf,
    /// Fixed description written on each new order
    pub order_description: String,
    /// Optional per-request HTTP timeout
    pub http_timeout: Option<Duration>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

impl std::fmt::Debug for DeskConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeskConfig")
            .field("api_url", &self.api_url.as_str())
            .field("api_key", &"[REDACTED]")
            .field("customer_id", &self.customer_id)
            .field("data_dir", &self.data_dir)
            .field("order_description", &self.order_description)
            .field("http_timeout", &self.http_timeout)
            .field("sentry_dsn", &self.sentry_dsn)
            .finish()
    }
}

impl DeskConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid, or
    /// if the API key looks like a placeholder.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Same conditions as [`DeskConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env(lookup);

        let api_url = env.required("ORDER_DESK_API_URL")?;
        let api_url = Url::parse(&api_url).map_err(|e| {
            ConfigError::InvalidEnvVar("ORDER_DESK_API_URL".to_string(), e.to_string())
        })?;

        let api_key = env.required("ORDER_DESK_API_KEY")?;
        validate_secret_strength(&api_key, "ORDER_DESK_API_KEY")?;

        let customer_id = env
            .or_default("ORDER_DESK_CUSTOMER_ID", DEFAULT_CUSTOMER_ID)
            .parse::<CustomerId>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("ORDER_DESK_CUSTOMER_ID".to_string(), e.to_string())
            })?;

        let http_timeout = env
            .optional("ORDER_DESK_HTTP_TIMEOUT_SECS")
            .map(|secs| {
                secs.trim().parse::<u64>().map(Duration::from_secs).map_err(|e| {
                    ConfigError::InvalidEnvVar(
                        "ORDER_DESK_HTTP_TIMEOUT_SECS".to_string(),
                        e.to_string(),
                    )
                })
            })
            .transpose()?;

        Ok(Self {
            api_url,
            api_key: SecretString::from(api_key),
            customer_id,
            data_dir: PathBuf::from(env.or_default("ORDER_DESK_DATA_DIR", DEFAULT_DATA_DIR)),
            order_description: env
                .or_default("ORDER_DESK_ORDER_DESCRIPTION", DEFAULT_ORDER_DESCRIPTION),
            http_timeout,
            sentry_dsn: env.optional("SENTRY_DSN"),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

struct Env<F>(F);

impl<F> Env<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn required(&self, key: &str) -> Result<String, ConfigError> {
        self.optional(key)
            .ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
    }

    /// Empty values count as unset.
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|v| !v.trim().is_empty())
    }

    fn or_default(&self, key: &str, default: &str) -> String {
        self.optional(key).unwrap_or_else(|| default.to_string())
    }
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

    #[allow(clippy::cast_precision_loss)] // key length never approaches f64 precision
    let len = s.chars().count() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)]
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Three non-empty base64url segments separated by dots.
///
/// Issued keys have this shape, and their random base64 text can contain any
/// placeholder substring by chance.
fn is_jwt_shaped(secret: &str) -> bool {
    let segments: Vec<&str> = secret.split('.').collect();
    segments.len() == 3
        && segments.iter().all(|segment| {
            !segment.is_empty()
                && segment
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        })
}

/// Reject keys that are obviously placeholders or have too little entropy.
///
/// The placeholder blocklist only applies to keys that are not JWT-shaped.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    if !is_jwt_shaped(secret) {
        let lower = secret.to_lowercase();
        for pattern in PLACEHOLDER_PATTERNS {
            if lower.contains(pattern) {
                return Err(ConfigError::InsecureSecret(
                    var_name.to_string(),
                    format!("appears to be a placeholder (contains '{pattern}')"),
                ));
            }
        }
    }

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
