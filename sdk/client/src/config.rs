use crate::error::config::ConfigError;

use common::{ErrorLocation, RedactedSecret};

use std::env;
use std::time::Duration;

use log::{debug, info};

const DEFAULT_BASE_URL: &str = "https://api.sma-platform.com/api";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_RETRY_ATTEMPTS: u32 = 3;
const DEFAULT_RETRY_BASE_DELAY: Duration = Duration::from_secs(1);
const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(15 * 60);

// Environment variable names read by `from_env`.
const ENV_BASE_URL: &str = "SMA_BASE_URL";
const ENV_API_KEY: &str = "SMA_API_KEY";
const ENV_TIMEOUT_SECS: &str = "SMA_TIMEOUT_SECS";
const ENV_RETRY_ATTEMPTS: &str = "SMA_RETRY_ATTEMPTS";
const ENV_DEBUG: &str = "SMA_DEBUG";

/// Client configuration. Immutable once handed to [`crate::SmaClient`].
#[derive(Debug, Clone)]
pub struct SmaConfig {
    /// API root, e.g. `https://api.sma-platform.com/api`.
    pub base_url: String,
    /// Fallback credential used when no token pair is held.
    pub api_key: Option<RedactedSecret>,
    /// Per-request timeout applied by the transport.
    pub timeout: Duration,
    /// Retries after the first attempt, for transport failures and
    /// retryable server statuses alike.
    pub retry_attempts: u32,
    /// First backoff delay; doubles each subsequent attempt.
    pub retry_base_delay: Duration,
    /// Client-side expiry window applied to freshly issued tokens.
    /// The server token is never parsed.
    pub token_ttl: Duration,
    /// Log request/response bodies at debug level.
    pub debug: bool,
}

impl Default for SmaConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            timeout: DEFAULT_TIMEOUT,
            retry_attempts: DEFAULT_RETRY_ATTEMPTS,
            retry_base_delay: DEFAULT_RETRY_BASE_DELAY,
            token_ttl: DEFAULT_TOKEN_TTL,
            debug: false,
        }
    }
}

impl SmaConfig {
    /// Validate config values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] if any value is invalid.
    #[track_caller]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::Validation {
                location: ErrorLocation::caller(),
                reason: "base_url cannot be empty".to_string(),
            });
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ConfigError::Validation {
                location: ErrorLocation::caller(),
                reason: format!("Invalid base_url format: {}", self.base_url),
            });
        }

        if self.timeout.is_zero() {
            return Err(ConfigError::Validation {
                location: ErrorLocation::caller(),
                reason: "timeout must be non-zero".to_string(),
            });
        }

        if self.retry_base_delay.is_zero() {
            return Err(ConfigError::Validation {
                location: ErrorLocation::caller(),
                reason: "retry_base_delay must be non-zero".to_string(),
            });
        }

        Ok(())
    }

    /// Build a config from the environment, loading `.env` first if present.
    ///
    /// Unset variables keep their defaults. Malformed numeric variables are
    /// an error rather than a silent fallback.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a variable cannot be parsed or the
    /// resulting config fails validation.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Non-fatal if missing; existing environment still applies.
        match dotenvy::dotenv() {
            Ok(path) => info!("Loaded .env from: {:?}", path),
            Err(_) => debug!("No .env file found - using existing environment"),
        }

        let mut config = Self::default();

        if let Ok(base_url) = env::var(ENV_BASE_URL) {
            config.base_url = base_url;
        }

        if let Ok(key) = env::var(ENV_API_KEY) {
            if !key.trim().is_empty() {
                config.api_key = Some(RedactedSecret::new(key));
            }
        }

        if let Ok(raw) = env::var(ENV_TIMEOUT_SECS) {
            let secs: u64 = parse_env_int(ENV_TIMEOUT_SECS, &raw)?;
            config.timeout = Duration::from_secs(secs);
        }

        if let Ok(raw) = env::var(ENV_RETRY_ATTEMPTS) {
            config.retry_attempts = parse_env_int(ENV_RETRY_ATTEMPTS, &raw)?;
        }

        if let Ok(raw) = env::var(ENV_DEBUG) {
            config.debug = matches!(raw.trim(), "1" | "true" | "TRUE" | "yes");
        }

        config.validate()?;
        Ok(config)
    }
}

// Parses into the target integer width, so out-of-range values fail
// the same way malformed ones do.
#[track_caller]
fn parse_env_int<T>(name: &str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr<Err = std::num::ParseIntError>,
{
    raw.trim().parse::<T>().map_err(|e| ConfigError::Env {
        location: ErrorLocation::caller(),
        variable: name.to_string(),
        reason: format!("expected an integer, got '{raw}': {e}"),
    })
}
